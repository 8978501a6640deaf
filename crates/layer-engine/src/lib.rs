//! Layer resolution and dynamic styling for the route-atlas viewer.
//!
//! The pipeline: fetch directory listings, classify each GeoJSON file into
//! a style variant by file-name convention, reproject into WGS84 where
//! needed, compute per-feature symbols, and install the result into a map
//! session whose legend, zoom scaling and click hit-testing stay
//! consistent with render membership.

pub mod builder;
pub mod classify;
pub mod fetch;
pub mod hit;
pub mod layer;
pub mod pane;
pub mod popup;
pub mod scale;
pub mod session;
pub mod style;
pub mod variant;

pub use builder::LayerCollectionBuilder;
pub use classify::{Classification, Classifier};
pub use fetch::DirectoryClient;
pub use hit::{resolve_click, Candidate, ClosestPair, HitDecision, CLICK_PADDING_METERS};
pub use layer::{Layer, RenderedFeature};
pub use pane::Pane;
pub use popup::{
    build_popup, PopupContent, PopupRouting, PopupRow, FURTHER_INFO_PANEL, NO_INFORMATION_MESSAGE,
};
pub use scale::{magic_weight, rescale_symbol, zoom_size, BASE_SIZE, REFERENCE_ZOOM};
pub use session::{ClickOutcome, MapSession, MembershipSet, Sidebar, DEFAULT_ZOOM};
pub use style::{MarkerSpec, StyleDescriptor, Symbol};
pub use variant::{symbol_for, VariantKind};
