//! # umlsheet Parser
//!
//! Reads type-model documents into the normalized tables of
//! [`umlsheet_core`]. The pipeline is:
//!
//! 1. **Read** - Parse the JSON source into a document tree
//! 2. **Locate** - Find the first block exposing `Types` / `Interfaces`
//! 3. **Ingest** - Convert that block into typed definitions
//! 4. **Normalize** - Flatten the definitions into five tables
//!
//! It also reads the XML extension records appended to the `classes` table
//! (see [`extension`]).
//!
//! ## Usage
//!
//! ```
//! # use umlsheet_parser::{parse, error::ParseError};
//!
//! fn main() -> Result<(), ParseError> {
//!     let source = r#"{"Model":{"Types":{"T1":{"Attributes":{"a1":{"Type":"string"}}}}}}"#;
//!
//!     let tables = parse(source)?;
//!     assert_eq!(tables.classes().len(), 1);
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod extension;
pub mod locate;
pub mod normalize;

mod ingest;
mod span;

pub use extension::{ExtensionAttribute, parse_extensions};
pub use span::Span;

use log::{debug, info};
use serde_json::Value;

use umlsheet_core::{model::TypeModel, tables::ModelTables};

use error::{Diagnostic, ErrorCode, ParseError};

/// Parse a JSON model document into normalized tables.
///
/// A document without any `Types` / `Interfaces` block yields empty tables;
/// callers treat that as "nothing to do" rather than as an error.
///
/// # Errors
///
/// Returns [`ParseError`] if the source is not JSON or if the located block
/// contains malformed definitions.
pub fn parse(source: &str) -> Result<ModelTables, ParseError> {
    let model = parse_model(source)?;
    Ok(normalize::normalize(&model))
}

/// Parse a JSON model document into typed definitions without normalizing.
///
/// # Errors
///
/// See [`parse`].
pub fn parse_model(source: &str) -> Result<TypeModel, ParseError> {
    let document: Value = serde_json::from_str(source).map_err(|err| {
        let span = Span::from_line_column(source, err.line(), err.column());
        Diagnostic::error("malformed JSON document")
            .with_code(ErrorCode::E001)
            .with_label(span, err.to_string())
    })?;

    let block = locate::locate(&document);
    if block.is_empty() {
        info!("No Types or Interfaces block found in document");
    } else {
        debug!("Located model block");
    }

    ingest::ingest(block)
}

#[cfg(test)]
mod tests {
    use umlsheet_core::row::{AttributeKind, ClassAttributeRow};

    use super::*;

    #[test]
    fn test_parse_end_to_end() {
        let tables =
            parse(r#"{"Model":{"Types":{"T1":{"Attributes":{"a1":{"Type":"string"}}}}}}"#)
                .unwrap();

        assert_eq!(
            tables.classes(),
            [ClassAttributeRow::new(
                "T1",
                "a1",
                "string",
                Some(AttributeKind::Attribute)
            )]
        );
        assert!(tables.enums().is_empty());
    }

    #[test]
    fn test_parse_without_block_is_empty() {
        let tables = parse(r#"{"Project":{"Name":"demo"}}"#).unwrap();
        assert!(tables.is_empty());
    }

    #[test]
    fn test_malformed_json_points_at_location() {
        let source = "{\n  \"Model\": ]\n}";
        let err = parse(source).unwrap_err();
        let diag = &err.diagnostics()[0];

        assert_eq!(diag.code(), Some(ErrorCode::E001));
        let span = diag.labels()[0].span();
        assert_eq!(source[..span.start()].matches('\n').count(), 1);
    }
}
