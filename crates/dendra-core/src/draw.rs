//! Drawing Primitives for Chart Rendering
//!
//! This module provides the building blocks used to turn chart elements into
//! SVG. Chart elements implement the [`Drawable`] trait, which renders them to
//! layered SVG output and reports the area they cover.
//!
//! # Layer-Based Rendering
//!
//! Drawables render to one or more [`RenderLayer`]s, which are automatically ordered
//! during final SVG generation.
mod glyph;
mod layer;
mod stroke;
mod text;

pub use glyph::Glyph;
pub use layer::{LayeredOutput, RenderLayer, SvgNode};
pub use stroke::{StrokeDefinition, StrokeJoin};
pub use text::TextDefinition;

use crate::geometry::Bounds;

/// Trait for chart elements that can be rendered to SVG layers.
pub trait Drawable: std::fmt::Debug {
    /// Renders this drawable to one or more layers.
    ///
    /// Positions are absolute chart coordinates, so no placement argument is
    /// needed; every element already carries its own transform.
    fn render_to_layers(&self) -> LayeredOutput;

    /// Returns the chart-space area covered by this drawable.
    fn bounds(&self) -> Bounds;
}
