//! Stroke definitions for links and label halos.
//!
//! # Overview
//!
//! - [`StrokeDefinition`]: color, width, opacity and join of a stroke
//! - [`StrokeJoin`]: how line corners are rendered (miter, round, bevel)
//! - [`apply_stroke!`](crate::apply_stroke!): applies every stroke attribute to an SVG element
//!
//! # SVG Attribute Mapping
//!
//! | Rust Property | SVG Attribute | Example Values |
//! |--------------|---------------|----------------|
//! | `color` | `stroke` | `"#555555"` |
//! | `opacity` | `stroke-opacity` | `0.4` |
//! | `width` | `stroke-width` | `1.5` |
//! | `join` | `stroke-linejoin` | `"miter"`, `"round"`, `"bevel"` |

use std::str::FromStr;

use crate::color::Color;

/// Defines how line corners (joins) are rendered.
///
/// Maps directly to SVG `stroke-linejoin` attribute values.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum StrokeJoin {
    /// Sharp corner with mitered point (SVG default)
    #[default]
    Miter,
    /// Rounded corner
    Round,
    /// Beveled (cut-off) corner
    Bevel,
}

impl StrokeJoin {
    /// Returns the SVG stroke-linejoin value
    pub fn to_svg_value(&self) -> &'static str {
        match self {
            Self::Miter => "miter",
            Self::Round => "round",
            Self::Bevel => "bevel",
        }
    }
}

impl FromStr for StrokeJoin {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "miter" => Ok(Self::Miter),
            "round" => Ok(Self::Round),
            "bevel" => Ok(Self::Bevel),
            _ => Err(format!(
                "invalid stroke join `{s}`, valid values: miter, round, bevel"
            )),
        }
    }
}

/// A stroke definition for rendering links and text halos.
///
/// # Examples
///
/// ```
/// use dendra_core::draw::{StrokeDefinition, StrokeJoin};
/// use dendra_core::color::Color;
///
/// let mut halo = StrokeDefinition::new(Color::new("white").unwrap(), 3.0);
/// halo.set_join(StrokeJoin::Round);
/// assert_eq!(halo.width(), 3.0);
/// assert_eq!(halo.opacity(), 1.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeDefinition {
    color: Color,
    width: f32,
    opacity: f32,
    join: StrokeJoin,
}

impl StrokeDefinition {
    /// Creates a fully opaque stroke with the given color and width.
    pub fn new(color: Color, width: f32) -> Self {
        Self {
            color,
            width,
            ..Self::default()
        }
    }

    /// Returns the stroke color.
    pub fn color(&self) -> Color {
        self.color
    }

    /// Returns the stroke width.
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Returns the stroke opacity, independent of the color's own alpha.
    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    /// Returns the stroke join style.
    pub fn join(&self) -> StrokeJoin {
        self.join
    }

    /// Sets the stroke opacity.
    pub fn set_opacity(&mut self, opacity: f32) {
        self.opacity = opacity;
    }

    /// Sets the stroke join style.
    pub fn set_join(&mut self, join: StrokeJoin) {
        self.join = join;
    }
}

impl Default for StrokeDefinition {
    fn default() -> Self {
        Self {
            color: Color::default(),
            width: 1.0,
            opacity: 1.0,
            join: StrokeJoin::default(),
        }
    }
}

/// Apply all stroke attributes to an SVG element.
///
/// # Examples
///
/// ```
/// use dendra_core::draw::StrokeDefinition;
/// use dendra_core::color::Color;
/// use svg::node::element as svg_element;
///
/// let stroke = StrokeDefinition::new(Color::new("gray").unwrap(), 1.5);
/// let path = svg_element::Path::new().set("d", "M 0 0 L 10 10");
///
/// let path = dendra_core::apply_stroke!(path, &stroke);
/// ```
#[macro_export]
macro_rules! apply_stroke {
    ($element:expr, $stroke:expr) => {{
        $element
            .set("stroke", $stroke.color().to_string())
            .set("stroke-opacity", $stroke.opacity())
            .set("stroke-width", $stroke.width())
            .set("stroke-linejoin", $stroke.join().to_svg_value())
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stroke_default() {
        let stroke = StrokeDefinition::default();
        assert_eq!(stroke.width(), 1.0);
        assert_eq!(stroke.opacity(), 1.0);
        assert_eq!(stroke.join(), StrokeJoin::Miter);
    }

    #[test]
    fn test_stroke_setters() {
        let mut stroke = StrokeDefinition::new(Color::new("blue").unwrap(), 1.5);
        stroke.set_opacity(0.4);
        stroke.set_join(StrokeJoin::Round);

        assert_eq!(stroke.width(), 1.5);
        assert_eq!(stroke.opacity(), 0.4);
        assert_eq!(stroke.join(), StrokeJoin::Round);
        assert_eq!(stroke.color(), Color::new("blue").unwrap());
    }

    #[test]
    fn test_stroke_join_from_str() {
        assert_eq!(StrokeJoin::from_str("round").unwrap(), StrokeJoin::Round);
        assert_eq!(StrokeJoin::from_str("bevel").unwrap(), StrokeJoin::Bevel);

        let result = StrokeJoin::from_str("invalid");
        assert!(result.unwrap_err().contains("invalid stroke join"));
    }

    #[test]
    fn test_apply_stroke_sets_attributes() {
        let stroke = StrokeDefinition::new(Color::new("red").unwrap(), 2.0);
        let path = apply_stroke!(svg::node::element::Path::new(), &stroke);
        let rendered = path.to_string();
        assert!(rendered.contains("stroke-width=\"2\""));
        assert!(rendered.contains("stroke-linejoin=\"miter\""));
        assert!(rendered.contains("stroke-opacity=\"1\""));
    }
}
