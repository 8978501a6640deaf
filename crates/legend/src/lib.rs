//! UI-independent legend: a hierarchical visibility-control tree over
//! layers and their stroke-color subgroups, synchronized with map render
//! membership.

pub mod symbol;
pub mod tree;

pub use symbol::{ExampleSymbol, LegendSymbol};
pub use tree::{ColorGroup, Legend, MapMembership, RegistrationEntry, VisibilityNode};
