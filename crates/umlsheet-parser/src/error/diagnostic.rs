//! The core diagnostic type for the umlsheet error system.
//!
//! A [`Diagnostic`] represents a single error or warning with an optional
//! error code, labeled source spans, and help text.

use std::fmt;

use crate::{
    error::{Severity, error_code::ErrorCode, label::Label},
    span::Span,
};

/// A diagnostic message with optional source location information.
///
/// Syntax diagnostics carry a label pointing into the source document.
/// Diagnostics about located definitions name the definition path in their
/// message instead.
///
/// # Example
///
/// ```text
/// error[E101]: invalid type definition `Types.Car`
///    = help: `Parent` must be a string
/// ```
#[derive(Debug, Clone)]
pub struct Diagnostic {
    severity: Severity,
    code: Option<ErrorCode>,
    message: String,
    labels: Vec<Label>,
    help: Option<String>,
}

impl Diagnostic {
    /// Create an error diagnostic.
    ///
    /// # Example
    ///
    /// ```
    /// # use umlsheet_parser::error::{Diagnostic, ErrorCode};
    /// # use umlsheet_parser::Span;
    ///
    /// let diag = Diagnostic::error("malformed JSON document")
    ///     .with_code(ErrorCode::E001)
    ///     .with_label(Span::new(12..13), "expected `,` or `}`");
    /// ```
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    /// Create a warning diagnostic.
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn code(&self) -> Option<ErrorCode> {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    /// Set the error code.
    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = Some(code);
        self
    }

    /// Add a primary label to this diagnostic.
    pub fn with_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::primary(span, message));
        self
    }

    /// Add a secondary label to this diagnostic.
    pub fn with_secondary_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::secondary(span, message));
        self
    }

    /// Set the help text.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            code: None,
            message: message.into(),
            labels: Vec::new(),
            help: None,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // "error[E001]: message" or "error: message"
        write!(f, "{}", self.severity)?;
        if let Some(code) = self.code {
            write!(f, "[{}]", code)?;
        }
        write!(f, ": {}", self.message)
    }
}

impl std::error::Error for Diagnostic {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_new() {
        let diag = Diagnostic::error("definition block is not a mapping");

        assert!(diag.severity().is_error());
        assert!(diag.code().is_none());
        assert!(diag.labels().is_empty());
        assert!(diag.help().is_none());
    }

    #[test]
    fn test_diagnostic_with_label() {
        let diag = Diagnostic::error("malformed JSON document")
            .with_code(ErrorCode::E001)
            .with_label(Span::new(4..5), "expected value");

        assert_eq!(diag.labels().len(), 1);
        assert!(diag.labels()[0].is_primary());
        assert_eq!(diag.labels()[0].message(), "expected value");
    }

    #[test]
    fn test_diagnostic_with_secondary_label() {
        let diag = Diagnostic::warning("attribute definition `A|b` is not `class|type|property`")
            .with_label(Span::new(40..43), "expected three `|`-separated segments")
            .with_secondary_label(Span::new(10..60), "record skipped");

        assert!(diag.labels()[0].is_primary());
        assert!(!diag.labels()[1].is_primary());
    }

    #[test]
    fn test_diagnostic_display_with_code() {
        let diag = Diagnostic::error("invalid type definition `Types.Car`")
            .with_code(ErrorCode::E101)
            .with_help("`Parent` must be a string");

        assert_eq!(
            diag.to_string(),
            "error[E101]: invalid type definition `Types.Car`"
        );
        assert_eq!(diag.help(), Some("`Parent` must be a string"));
    }

    #[test]
    fn test_diagnostic_display_without_code() {
        let diag = Diagnostic::warning("no attribute definitions found");

        assert_eq!(diag.to_string(), "warning: no attribute definitions found");
    }
}
