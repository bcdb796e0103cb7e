//! Export functionality for Dendra charts.
//!
//! This module provides the [`Exporter`] trait that defines the interface for
//! writing a rendered chart to an output format. It is the final stage in
//! the Dendra pipeline.
//!
//! # Pipeline Position
//!
//! ```text
//! JSON document
//!     ↓ parse
//! HierarchyNode
//!     ↓ layout + encoding
//! RenderedChart
//!     ↓ interaction (optional)
//!     ↓ export (this module)
//! Output File
//! ```
//!
//! # Available Backends
//!
//! - [`svg`] — SVG output via [`svg::SvgBuilder`] and [`svg::Svg`]
//!
//! # Error Handling
//!
//! Export operations return [`Error`], covering rendering failures and I/O
//! errors. [`Error`] converts into [`DendraError::Export`] at the crate
//! boundary.
//!
//! [`DendraError::Export`]: crate::DendraError::Export

/// SVG export backend.
pub mod svg;

use crate::scene::RenderedChart;

/// Abstraction for chart export backends.
pub trait Exporter {
    /// Exports a rendered chart, including its current zoom and highlight
    /// state, to the backend's output format.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if the chart cannot be converted to the
    /// target format, or [`Error::Io`] if writing the output fails.
    fn export_chart(&mut self, chart: &RenderedChart) -> Result<(), Error>;
}

/// Errors that can occur during chart export.
///
/// This type is converted into [`DendraError::Export`] at the crate
/// boundary via the [`From`] implementation in [`crate::error`].
///
/// [`DendraError::Export`]: crate::DendraError::Export
#[derive(Debug)]
pub enum Error {
    /// A rendering or conversion failure described by `message`.
    Render(String),
    /// An I/O error encountered while writing output.
    Io(std::io::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Render(msg) => write!(f, "Render error: {msg}"),
            Self::Io(err) => write!(f, "I/O error: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Render(_) => None,
            Self::Io(err) => Some(err),
        }
    }
}
