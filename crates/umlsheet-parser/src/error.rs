//! Error and diagnostic system for the umlsheet parser.
//!
//! The error system is built around the [`Diagnostic`] type, which represents
//! a single error or warning with an optional error code, source labels, and
//! help text. Every diagnostic raised while reading one document is wrapped
//! in a [`ParseError`].
//!
//! # Example
//!
//! ```
//! # use umlsheet_parser::error::{Diagnostic, ErrorCode};
//!
//! let diag = Diagnostic::error("invalid type definition `Types.Car`")
//!     .with_code(ErrorCode::E101)
//!     .with_help("`Attributes` must be a mapping");
//! ```

mod collector;
mod diagnostic;
mod error_code;
mod label;
mod parse_error;
mod severity;

pub(crate) use collector::DiagnosticCollector;

pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use label::Label;
pub use parse_error::ParseError;
pub use severity::Severity;
