//! Error types for umlsheet operations.
//!
//! [`UmlSheetError`] wraps the error of every pipeline stage so callers deal
//! with a single type.

use std::io;

use thiserror::Error;

use umlsheet_parser::error::ParseError;

use crate::{export, render, report, store};

/// The main error type for umlsheet operations.
///
/// # Diagnostic Variants
///
/// The `Parse` variant keeps the parsed source next to the structured
/// diagnostics so that the labels can be shown against it.
#[derive(Debug, Error)]
pub enum UmlSheetError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Parse { err: ParseError, src: String },

    #[error("Workbook error: {0}")]
    Store(#[from] store::Error),

    #[error("Export error: {0}")]
    Export(#[from] export::Error),

    #[error("Render error: {0}")]
    Render(#[from] render::Error),

    #[error("Report error: {0}")]
    Report(#[from] report::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl UmlSheetError {
    /// Create a new `Parse` error with the associated source text.
    pub fn new_parse_error(err: ParseError, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }
}
