//! miette rendering of [`UmlSheetError`].
//!
//! A parse error carries several diagnostics against one document; each is
//! turned into its own [`Reportable`] so that every snippet is shown.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceCode, SourceSpan};

use umlsheet::UmlSheetError;
use umlsheet_parser::{Span, error::Diagnostic};

/// One renderable problem.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// A parser diagnostic together with the document it points into.
    Diagnostic { diag: &'a Diagnostic, src: &'a str },
    /// Any other error, shown without a source snippet.
    Error(&'a UmlSheetError),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Diagnostic { diag, .. } => f.write_str(diag.message()),
            Reportable::Error(err) => fmt::Display::fmt(err, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Diagnostic { .. } => None,
            Reportable::Error(err) => err.source(),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Diagnostic { diag, .. } => diag
                .code()
                .map(|code| Box::new(code) as Box<dyn fmt::Display + 'a>),
            Reportable::Error(err) => {
                error_code(err).map(|code| Box::new(code) as Box<dyn fmt::Display + 'a>)
            }
        }
    }

    fn severity(&self) -> Option<miette::Severity> {
        match self {
            Reportable::Diagnostic { diag, .. } if diag.severity().is_warning() => {
                Some(miette::Severity::Warning)
            }
            _ => Some(miette::Severity::Error),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Diagnostic { diag, .. } => {
                diag.help().map(|help| Box::new(help) as Box<dyn fmt::Display + 'a>)
            }
            Reportable::Error(err) => {
                error_help(err).map(|help| Box::new(help) as Box<dyn fmt::Display + 'a>)
            }
        }
    }

    fn source_code(&self) -> Option<&dyn SourceCode> {
        match self {
            Reportable::Diagnostic { src, .. } => Some(src as &dyn SourceCode),
            Reportable::Error(_) => None,
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let Reportable::Diagnostic { diag, .. } = self else {
            return None;
        };
        if diag.labels().is_empty() {
            return None;
        }

        Some(Box::new(diag.labels().iter().map(|label| {
            let message = Some(label.message().to_string());
            let span = source_span(label.span());
            if label.is_primary() {
                LabeledSpan::new_primary_with_span(message, span)
            } else {
                LabeledSpan::new_with_span(message, span)
            }
        })))
    }
}

fn error_code(err: &UmlSheetError) -> Option<&'static str> {
    let code = match err {
        UmlSheetError::Io(_) => "umlsheet::io",
        UmlSheetError::Parse { .. } => return None,
        UmlSheetError::Store(_) => "umlsheet::store",
        UmlSheetError::Export(_) => "umlsheet::export",
        UmlSheetError::Render(_) => "umlsheet::render",
        UmlSheetError::Report(_) => "umlsheet::report",
        UmlSheetError::Config(_) => "umlsheet::config",
    };
    Some(code)
}

fn error_help(err: &UmlSheetError) -> Option<&'static str> {
    match err {
        UmlSheetError::Render(_) => {
            Some("use --no-render or set `render.enabled = false` to skip rendering")
        }
        UmlSheetError::Config(_) => Some("pass --config to choose another configuration file"),
        _ => None,
    }
}

fn source_span(span: Span) -> SourceSpan {
    SourceSpan::new(span.start().into(), span.len())
}

/// Splits `err` into the problems to render, one per parser diagnostic.
pub fn to_reportables(err: &UmlSheetError) -> Vec<Reportable<'_>> {
    match err {
        UmlSheetError::Parse { err, src } => err
            .diagnostics()
            .iter()
            .map(|diag| Reportable::Diagnostic {
                diag,
                src: src.as_str(),
            })
            .collect(),
        _ => vec![Reportable::Error(err)],
    }
}
