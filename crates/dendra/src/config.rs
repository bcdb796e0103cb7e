//! Configuration types for Dendra chart rendering.
//!
//! This module provides configuration structures that control how charts
//! are laid out, styled and interacted with. All types implement
//! [`serde::Deserialize`] for flexible loading from external sources, and
//! every section falls back to its defaults when omitted.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining layout, style and interaction settings.
//! - [`LayoutConfig`] - Viewport size, margin, view center and radial mode.
//! - [`StyleConfig`] - Palette, glyph sequence, label fonts and chart chrome.
//! - [`InteractionConfig`] - Hover dimming and zoom limits.
//!
//! # Example
//!
//! ```
//! # use dendra::config::AppConfig;
//! // Use default configuration
//! let config = AppConfig::default();
//! assert_eq!(config.layout().width(), 500.0);
//! assert!(config.style().palette().is_ok());
//! ```

use serde::Deserialize;

use dendra_core::{
    color::{CATEGORY10, Color, Palette},
    draw::Glyph,
};

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,

    /// Interaction configuration section.
    #[serde(default)]
    interaction: InteractionConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its three sections.
    pub fn new(layout: LayoutConfig, style: StyleConfig, interaction: InteractionConfig) -> Self {
        Self {
            layout,
            style,
            interaction,
        }
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// Returns the interaction configuration.
    pub fn interaction(&self) -> &InteractionConfig {
        &self.interaction
    }
}

/// Distance kept free between the outermost ring and the viewport edge.
///
/// In TOML this is written as `margin = { fixed = 80 }` or
/// `margin = { relative = 0.16 }`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Margin {
    /// Absolute margin in user units.
    Fixed(f32),
    /// Margin as a fraction of the viewport width.
    Relative(f32),
}

impl Margin {
    /// Resolves the margin to user units for a viewport of the given width.
    pub fn resolve(self, width: f32) -> f32 {
        match self {
            Self::Fixed(units) => units,
            Self::Relative(fraction) => fraction * width,
        }
    }
}

impl Default for Margin {
    fn default() -> Self {
        Self::Fixed(80.0)
    }
}

/// How node radii are derived from the tree shape.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RadialMode {
    /// Radius grows with depth; the deepest node lands on the outer ring.
    #[default]
    Depth,
    /// Radius shrinks with height; every leaf lands on the outer ring.
    LeafAligned,
}

/// Position of the chart origin inside the viewport, as fractions of its size.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct CenterConfig {
    x: f32,
    y: f32,
}

impl CenterConfig {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn x(&self) -> f32 {
        self.x
    }

    pub fn y(&self) -> f32 {
        self.y
    }
}

impl Default for CenterConfig {
    fn default() -> Self {
        Self { x: 0.5, y: 0.54 }
    }
}

/// Viewport and radial geometry configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    width: f32,
    height: f32,
    margin: Margin,
    center: CenterConfig,
    radial: RadialMode,
}

impl LayoutConfig {
    /// Creates a layout configuration for a viewport of the given size with
    /// default margin, center and radial mode.
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Returns a copy with a different margin (builder style).
    pub fn with_margin(mut self, margin: Margin) -> Self {
        self.margin = margin;
        self
    }

    /// Returns a copy with a different radial mode (builder style).
    pub fn with_radial(mut self, radial: RadialMode) -> Self {
        self.radial = radial;
        self
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn margin(&self) -> Margin {
        self.margin
    }

    pub fn center(&self) -> CenterConfig {
        self.center
    }

    pub fn radial(&self) -> RadialMode {
        self.radial
    }

    /// Radius of the outermost ring: half the smaller viewport side minus the margin.
    pub fn outer_radius(&self) -> f32 {
        self.width.min(self.height) / 2.0 - self.margin.resolve(self.width)
    }

    /// Checks that the viewport can hold a chart.
    ///
    /// # Errors
    ///
    /// Returns a message describing the first invalid value found.
    pub fn validate(&self) -> Result<(), String> {
        if !(self.width.is_finite() && self.width > 0.0) {
            return Err(format!("width must be positive, got {}", self.width));
        }
        if !(self.height.is_finite() && self.height > 0.0) {
            return Err(format!("height must be positive, got {}", self.height));
        }
        let radius = self.outer_radius();
        if !(radius.is_finite() && radius >= 0.0) {
            return Err(format!(
                "margin leaves no room for the chart (outer radius {radius})"
            ));
        }
        Ok(())
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            width: 500.0,
            height: 500.0,
            margin: Margin::default(),
            center: CenterConfig::default(),
            radial: RadialMode::default(),
        }
    }
}

/// Visual styling configuration for rendered charts.
///
/// Colors are stored as CSS strings and parsed on access, so a bad value is
/// reported when a chart is rendered rather than when the file is loaded.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    palette: Vec<String>,
    neutral_color: String,
    shapes: Vec<Glyph>,
    node_radius: f32,
    glyph_size: f32,
    label_font_size: f32,
    expanded_label_font_size: f32,
    expanded_label_offset: f32,
    font_family: String,
    link_opacity: f32,
    link_width: f32,
    background_color: Option<String>,
    overlay: Vec<String>,
    legend: bool,
}

impl StyleConfig {
    /// Returns the ordinal palette used for cluster colors.
    ///
    /// # Errors
    ///
    /// Returns an error if the palette is empty or holds an invalid color.
    pub fn palette(&self) -> Result<Palette, String> {
        Palette::from_css(&self.palette).map_err(|err| format!("Invalid palette in config: {err}"))
    }

    /// Returns the color used for internal nodes and their links.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn neutral_color(&self) -> Result<Color, String> {
        Color::new(&self.neutral_color)
            .map_err(|err| format!("Invalid neutral color in config: {err}"))
    }

    /// Returns the parsed background [`Color`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed
    /// into a valid [`Color`].
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        self.background_color
            .as_ref()
            .map(|color| Color::new(color))
            .transpose()
            .map_err(|err| format!("Invalid background color in config: {err}"))
    }

    /// Returns the glyph sequence assigned to categories in first-seen order.
    ///
    /// # Errors
    ///
    /// Returns an error if the sequence is empty.
    pub fn shapes(&self) -> Result<&[Glyph], String> {
        if self.shapes.is_empty() {
            return Err("Invalid shapes in config: at least one glyph is required".to_string());
        }
        Ok(&self.shapes)
    }

    /// Returns a copy with a different palette (builder style).
    pub fn with_palette<S: AsRef<str>>(mut self, colors: &[S]) -> Self {
        self.palette = colors.iter().map(|c| c.as_ref().to_string()).collect();
        self
    }

    /// Returns a copy with different overlay help lines (builder style).
    pub fn with_overlay<S: AsRef<str>>(mut self, lines: &[S]) -> Self {
        self.overlay = lines.iter().map(|l| l.as_ref().to_string()).collect();
        self
    }

    /// Returns a copy with the legend switched on or off (builder style).
    pub fn with_legend(mut self, legend: bool) -> Self {
        self.legend = legend;
        self
    }

    pub fn node_radius(&self) -> f32 {
        self.node_radius
    }

    /// Area of category glyphs in square user units.
    pub fn glyph_size(&self) -> f32 {
        self.glyph_size
    }

    pub fn label_font_size(&self) -> f32 {
        self.label_font_size
    }

    pub fn expanded_label_font_size(&self) -> f32 {
        self.expanded_label_font_size
    }

    pub fn expanded_label_offset(&self) -> f32 {
        self.expanded_label_offset
    }

    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    pub fn link_opacity(&self) -> f32 {
        self.link_opacity
    }

    pub fn link_width(&self) -> f32 {
        self.link_width
    }

    pub fn overlay(&self) -> &[String] {
        &self.overlay
    }

    pub fn legend(&self) -> bool {
        self.legend
    }
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            palette: CATEGORY10.iter().map(|c| c.to_string()).collect(),
            neutral_color: "gray".to_string(),
            shapes: Glyph::SEQUENCE.to_vec(),
            node_radius: 1.0,
            glyph_size: 16.0,
            label_font_size: 4.5,
            expanded_label_font_size: 9.0,
            expanded_label_offset: 10.0,
            font_family: "sans-serif".to_string(),
            link_opacity: 0.4,
            link_width: 1.5,
            background_color: None,
            overlay: vec![
                "Scroll to zoom, drag to pan".to_string(),
                "Hover a leaf to highlight its category".to_string(),
                "Click a leaf to pin its label".to_string(),
            ],
            legend: true,
        }
    }
}

/// Hover and zoom behaviour.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
    dim_opacity: f32,
    min_scale: f32,
    max_scale: f32,
}

impl InteractionConfig {
    pub fn new(dim_opacity: f32, min_scale: f32, max_scale: f32) -> Self {
        Self {
            dim_opacity,
            min_scale,
            max_scale,
        }
    }

    /// Opacity applied to elements outside the hovered category.
    pub fn dim_opacity(&self) -> f32 {
        self.dim_opacity
    }

    pub fn min_scale(&self) -> f32 {
        self.min_scale
    }

    pub fn max_scale(&self) -> f32 {
        self.max_scale
    }

    /// Checks the scale extent and dim opacity.
    ///
    /// # Errors
    ///
    /// Returns a message describing the first invalid value found.
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=1.0).contains(&self.dim_opacity) {
            return Err(format!(
                "dim_opacity must be within [0, 1], got {}",
                self.dim_opacity
            ));
        }
        if !(self.min_scale > 0.0 && self.min_scale <= self.max_scale) {
            return Err(format!(
                "scale extent [{}, {}] is invalid",
                self.min_scale, self.max_scale
            ));
        }
        Ok(())
    }
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            dim_opacity: 0.2,
            min_scale: 1.0,
            max_scale: 8.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_default_outer_radius() {
        let layout = LayoutConfig::default();
        assert_approx_eq!(f32, layout.outer_radius(), 170.0);
        assert!(layout.validate().is_ok());
    }

    #[test]
    fn test_relative_margin() {
        let layout = LayoutConfig::new(1000.0, 600.0).with_margin(Margin::Relative(0.1));
        assert_approx_eq!(f32, layout.outer_radius(), 200.0);
    }

    #[test]
    fn test_validate_rejects_degenerate_viewport() {
        assert!(LayoutConfig::new(0.0, 500.0).validate().is_err());
        assert!(LayoutConfig::new(500.0, f32::NAN).validate().is_err());
        assert!(LayoutConfig::new(100.0, 100.0).validate().is_err());
    }

    #[test]
    fn test_style_defaults() {
        let style = StyleConfig::default();
        assert_eq!(style.palette().unwrap().len(), 10);
        assert_eq!(style.shapes().unwrap().len(), 9);
        assert!(style.background_color().unwrap().is_none());
        assert_eq!(style.neutral_color().unwrap(), Color::new("gray").unwrap());
        assert_eq!(style.overlay().len(), 3);
        assert!(style.legend());
    }

    #[test]
    fn test_invalid_colors_are_reported() {
        let style = StyleConfig::default().with_palette(&["not-a-color"]);
        assert!(style.palette().unwrap_err().contains("Invalid palette"));

        let empty = StyleConfig::default().with_palette::<&str>(&[]);
        assert!(empty.palette().is_err());
    }

    #[test]
    fn test_interaction_validate() {
        assert!(InteractionConfig::default().validate().is_ok());
        assert!(InteractionConfig::new(1.5, 1.0, 8.0).validate().is_err());
        assert!(InteractionConfig::new(0.2, 4.0, 2.0).validate().is_err());
    }

    #[test]
    fn test_deserialize_partial_json() {
        let config: AppConfig = serde_json::from_str(
            r#"{
                "layout": {
                    "width": 800,
                    "margin": { "relative": 0.16 },
                    "radial": "leaf-aligned"
                },
                "style": { "shapes": ["square", "star"], "legend": false },
                "interaction": { "max_scale": 4 }
            }"#,
        )
        .unwrap();

        assert_approx_eq!(f32, config.layout().width(), 800.0);
        assert_approx_eq!(f32, config.layout().height(), 500.0);
        assert_eq!(config.layout().margin(), Margin::Relative(0.16));
        assert_eq!(config.layout().radial(), RadialMode::LeafAligned);
        assert_eq!(config.style().shapes().unwrap(), &[Glyph::Square, Glyph::Star]);
        assert!(!config.style().legend());
        assert_approx_eq!(f32, config.interaction().max_scale(), 4.0);
        assert_approx_eq!(f32, config.interaction().dim_opacity(), 0.2);
    }
}
