//! Zoom-driven symbol rescaling.
//!
//! The displayed size of every symbol follows the zoom level through a
//! bounded arctangent curve centered on zoom 15, where symbols render at
//! their base size of 15. Stroke weights additionally pass through
//! `magic_weight`, a curve fitted so that thin and thick strokes scale at
//! different relative rates. The constants are fitted values; changing any
//! of them changes the rendered map.
//!
//! Rescaling is idempotent per zoom level: every output derives from the
//! symbol's `original_*` baseline, never from its current value.

use std::f64::consts::FRAC_PI_2;

use crate::style::Symbol;

/// Zoom level at which symbols render at [`BASE_SIZE`].
pub const REFERENCE_ZOOM: f64 = 15.0;

/// Base symbol size in pixels at the reference zoom.
pub const BASE_SIZE: f64 = 15.0;

/// Aspect ratio of the stock pin icon (width / height).
const DEFAULT_PIN_RATIO: f64 = 25.0 / 41.0;

/// Symbol size for a zoom level: bounded, smooth, and fixed at
/// `BASE_SIZE` for zoom 15.
pub fn zoom_size(zoom: f64) -> f64 {
    (zoom - REFERENCE_ZOOM).atan() / FRAC_PI_2 * (18.0 - 4.0) + BASE_SIZE
}

/// Fitted stroke-weight curve. Takes the symbol's *original* weight; thick
/// strokes grow faster than thin ones through the log term.
pub fn magic_weight(new_size: f64, original: f64) -> f64 {
    original * (0.05 * new_size + 0.258135 * (0.6351 * original).ln())
}

/// Recompute one symbol's displayed size for a zoom level.
pub fn rescale_symbol(symbol: &mut Symbol, zoom: f64) {
    let new_size = zoom_size(zoom);

    match symbol {
        Symbol::Line(vector) | Symbol::Polygon(vector) => {
            vector.weight = magic_weight(new_size, vector.original_weight);
        }
        Symbol::Circle(circle) => {
            circle.weight = magic_weight(new_size, circle.original_stroke_width);
            circle.radius = new_size / 2.0;
        }
        Symbol::Icon(icon) => {
            if icon.default_pin {
                let width = DEFAULT_PIN_RATIO * new_size * 2.0;
                let height = new_size * 2.0;
                icon.icon_size = [width, height];
                icon.icon_anchor = Some([width / 2.0, height]);
                icon.shadow_size = Some([new_size * 2.0, new_size * 2.0]);
            } else if let Some(original) = icon.original_size {
                let scaled = original * new_size / BASE_SIZE;
                icon.icon_size = [scaled, scaled];
            } else {
                icon.icon_size = [new_size, new_size];
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{IconSymbol, MarkerSpec, StyleDescriptor};
    use atlas_common::Color;

    #[test]
    fn test_zoom_15_is_fixed_point() {
        assert!((zoom_size(15.0) - 15.0).abs() < 1e-12);
    }

    #[test]
    fn test_zoom_size_bounded_and_monotone() {
        // Asymptotes at 15 ± 14.
        assert!(zoom_size(0.0) > 1.0);
        assert!(zoom_size(30.0) < 29.0);
        let mut previous = zoom_size(0.0);
        for step in 1..=60 {
            let size = zoom_size(step as f64 * 0.5);
            assert!(size > previous);
            previous = size;
        }
    }

    #[test]
    fn test_rescaling_does_not_compound() {
        let descriptor = StyleDescriptor::line(Some(Color::new("#4555e4")), 5.0);
        let mut once = Symbol::from_descriptor(descriptor.clone(), false);
        let mut thrice = Symbol::from_descriptor(descriptor, false);

        rescale_symbol(&mut once, 17.0);
        rescale_symbol(&mut thrice, 9.0);
        rescale_symbol(&mut thrice, 13.0);
        rescale_symbol(&mut thrice, 17.0);

        let (Symbol::Line(a), Symbol::Line(b)) = (&once, &thrice) else {
            panic!("expected line symbols");
        };
        assert_eq!(a.weight, b.weight);
        assert_eq!(a.original_weight, 5.0);
        assert_eq!(b.original_weight, 5.0);
    }

    #[test]
    fn test_magic_weight_reference_values() {
        // At the reference zoom a weight-5 stroke draws at
        // 5 * (0.75 + 0.258135 * ln(3.1755)).
        let expected = 5.0 * (0.05 * 15.0 + 0.258135 * (0.6351f64 * 5.0).ln());
        assert!((magic_weight(15.0, 5.0) - expected).abs() < 1e-12);

        // Thick strokes scale up faster than thin ones, relatively.
        let thin = magic_weight(20.0, 2.0) / 2.0;
        let thick = magic_weight(20.0, 7.5) / 7.5;
        assert!(thick > thin);
    }

    #[test]
    fn test_circle_radius_tracks_zoom_size() {
        let mut symbol = Symbol::from_marker(MarkerSpec::Circle {
            radius: 5.0,
            color: Color::new("#eba608"),
            fill_color: Color::new("#ebc508"),
            fill_opacity: 0.9,
            weight: 2.0,
            raise_on_add: true,
        });

        rescale_symbol(&mut symbol, 17.0);
        let Symbol::Circle(circle) = &symbol else {
            panic!("expected circle");
        };
        assert!((circle.radius - zoom_size(17.0) / 2.0).abs() < 1e-12);
        assert_eq!(circle.original_radius, 5.0);
    }

    #[test]
    fn test_default_pin_keeps_aspect_ratio() {
        let mut symbol = Symbol::Icon(IconSymbol::default_pin());
        rescale_symbol(&mut symbol, 12.0);

        let Symbol::Icon(icon) = &symbol else {
            panic!("expected icon");
        };
        let [width, height] = icon.icon_size;
        assert!((width / height - 25.0 / 41.0).abs() < 1e-12);
        assert_eq!(icon.icon_anchor, Some([width / 2.0, height]));
    }

    #[test]
    fn test_sized_icon_scales_proportionally() {
        let mut symbol = Symbol::Icon(IconSymbol {
            icon_url: "images/custom.svg".to_string(),
            icon_size: [30.0, 30.0],
            icon_anchor: None,
            shadow_size: None,
            original_size: Some(30.0),
            default_pin: false,
        });

        rescale_symbol(&mut symbol, 15.0);
        let Symbol::Icon(icon) = &symbol else {
            panic!("expected icon");
        };
        assert_eq!(icon.icon_size, [30.0, 30.0]);
    }
}
