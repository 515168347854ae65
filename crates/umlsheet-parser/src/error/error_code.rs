//! Error codes for the umlsheet diagnostic system.
//!
//! Error codes are organized by phase:
//! - `E0xx` - Document syntax errors
//! - `E1xx` - Model block shape and naming errors
//! - `E2xx` - Attribute warnings
//! - `E3xx` - Extension record warnings

use std::fmt;

/// Error codes for categorizing diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Syntax Errors (E0xx)
    // =========================================================================
    /// Malformed JSON document.
    ///
    /// The model document could not be read as JSON.
    E001,

    /// Malformed XML document.
    ///
    /// The extension configuration could not be read as XML.
    E002,

    // =========================================================================
    // Model Block Errors (E1xx)
    // =========================================================================
    /// Definition block is not a mapping.
    ///
    /// The `Types` or `Interfaces` value of the located block must map
    /// definition keys to definitions.
    E100,

    /// Invalid type definition.
    ///
    /// An entry under `Types` does not have the shape of a type definition.
    E101,

    /// Invalid interface definition.
    ///
    /// An entry under `Interfaces` does not have the shape of an interface
    /// definition.
    E102,

    /// Empty name.
    ///
    /// A definition resolves to an empty name, or `ScopeTypes` lists an
    /// empty type name. Such entries cannot be told apart from blank
    /// workbook rows.
    E103,

    // =========================================================================
    // Attribute Warnings (E2xx)
    // =========================================================================
    /// Empty authorized value list.
    ///
    /// `AuthorizedValues` is declared but lists no literal, so the attribute
    /// is treated as a plain attribute.
    E200,

    // =========================================================================
    // Extension Record Warnings (E3xx)
    // =========================================================================
    /// Malformed attribute definition record.
    ///
    /// An `AttributeDef` parameter does not carry `class|type|property`.
    E300,
}

impl ErrorCode {
    /// Returns the numeric code as a string (e.g., "E001").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "E001",
            ErrorCode::E002 => "E002",
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
            ErrorCode::E102 => "E102",
            ErrorCode::E103 => "E103",
            ErrorCode::E200 => "E200",
            ErrorCode::E300 => "E300",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
