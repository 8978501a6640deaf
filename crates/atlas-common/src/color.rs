//! Stroke/fill colors as hex strings.
//!
//! The legend groups features by *exact* stroke color value, so colors keep
//! their source spelling and compare as strings. RGBA decomposition exists
//! for consumers that need channel values.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A color as written in a style rule, e.g. `"#4d4d4d"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(String);

impl Color {
    pub fn new(hex: impl Into<String>) -> Self {
        Self(hex.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Decompose into RGBA channels. "#RRGGBB" and "#RRGGBBAA" are
    /// understood; anything else decodes as opaque black.
    pub fn to_rgba(&self) -> (u8, u8, u8, u8) {
        let s = self.0.trim_start_matches('#');

        if s.len() == 6 {
            let r = u8::from_str_radix(&s[0..2], 16).unwrap_or(0);
            let g = u8::from_str_radix(&s[2..4], 16).unwrap_or(0);
            let b = u8::from_str_radix(&s[4..6], 16).unwrap_or(0);
            (r, g, b, 255)
        } else if s.len() == 8 {
            let r = u8::from_str_radix(&s[0..2], 16).unwrap_or(0);
            let g = u8::from_str_radix(&s[2..4], 16).unwrap_or(0);
            let b = u8::from_str_radix(&s[4..6], 16).unwrap_or(0);
            let a = u8::from_str_radix(&s[6..8], 16).unwrap_or(255);
            (r, g, b, a)
        } else {
            (0, 0, 0, 255)
        }
    }
}

impl From<&str> for Color {
    fn from(s: &str) -> Self {
        Color::new(s)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_parsing() {
        assert_eq!(Color::new("#FF5500").to_rgba(), (255, 85, 0, 255));
        assert_eq!(Color::new("#4d4d4d").to_rgba(), (77, 77, 77, 255));
        assert_eq!(Color::new("#00000080").to_rgba(), (0, 0, 0, 128));
    }

    #[test]
    fn test_exact_equality_drives_grouping() {
        // Same color, different spelling: distinct groups on purpose.
        assert_ne!(Color::new("#ff0000"), Color::new("#FF0000"));
        assert_eq!(Color::new("#ee6600"), Color::new("#ee6600"));
    }

    #[test]
    fn test_garbage_decodes_black() {
        assert_eq!(Color::new("tomato").to_rgba(), (0, 0, 0, 255));
    }
}
