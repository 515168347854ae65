//! Export of normalized tables into diagram sources.
//!
//! # Pipeline Position
//!
//! ```text
//! JSON model ──parse──▶ ModelTables ──store──▶ workbook
//!                                     │
//!                                     └──export (this module)──▶ .puml
//!                                                                  │
//!                                                    render ◀──────┘
//! ```
//!
//! # Available Backends
//!
//! - [`plantuml`] - One PlantUML class diagram per class
//!
//! # Error Handling
//!
//! Export operations return [`Error`], which converts into
//! [`UmlSheetError::Export`] at the crate boundary.
//!
//! [`UmlSheetError::Export`]: crate::UmlSheetError::Export

/// PlantUML class diagram backend.
pub mod plantuml;

use thiserror::Error;

/// Errors that can occur during diagram export.
#[derive(Debug, Error)]
pub enum Error {
    /// The requested class has no row in the `classes` table.
    #[error("class `{0}` has no rows in the classes table")]
    UnknownClass(String),
}
