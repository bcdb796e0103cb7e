//! Error types for Dendra operations.
//!
//! This module provides the main error type [`DendraError`] which wraps
//! the error conditions that can occur while loading, laying out and
//! exporting a chart.

use std::io;

use thiserror::Error;

use crate::host::HostError;

/// The main error type for Dendra operations.
///
/// # Diagnostic Variants
///
/// The `Parse` variant keeps the offending JSON source next to the
/// `serde_json` error, whose line and column can be turned into a source span
/// for rich error reporting.
#[derive(Debug, Error)]
pub enum DendraError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid hierarchy document: {err}")]
    Parse { err: serde_json::Error, src: String },

    #[error(transparent)]
    Host(#[from] HostError),

    #[error("Layout error: {0}")]
    Layout(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error>),
}

impl From<crate::export::Error> for DendraError {
    fn from(error: crate::export::Error) -> Self {
        Self::Export(Box::new(error))
    }
}

impl DendraError {
    /// Create a new `Parse` error with the associated source document.
    pub fn new_parse_error(err: serde_json::Error, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }
}
