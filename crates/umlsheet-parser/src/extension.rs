//! Extension attribute records from a flat XML configuration list.
//!
//! A configuration document lists `Parameter` elements directly under its
//! root. Those tagged `category="AttributeDef"` carry pipe-delimited
//! `class|type|property` text and describe attributes injected into an
//! existing class. They are stored in the `classes` table under the owner
//! `XP_{class}Ext_` so they stay distinguishable from primary attributes.
//!
//! ```xml
//! <Configuration>
//!   <Parameter category="AttributeDef">Vehicle|string|serialNumber</Parameter>
//!   <Parameter category="Display">ignored</Parameter>
//! </Configuration>
//! ```

use log::debug;

use umlsheet_core::row::ClassAttributeRow;

use crate::{
    error::{Diagnostic, DiagnosticCollector, ErrorCode, ParseError},
    span::Span,
};

/// Element name of a configuration entry.
pub const PARAMETER_TAG: &str = "Parameter";

/// `category` value marking an attribute definition.
pub const ATTRIBUTE_DEF_CATEGORY: &str = "AttributeDef";

/// One `class|type|property` attribute definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionAttribute {
    class: String,
    type_label: String,
    property: String,
}

impl ExtensionAttribute {
    pub fn new(
        class: impl Into<String>,
        type_label: impl Into<String>,
        property: impl Into<String>,
    ) -> Self {
        Self {
            class: class.into(),
            type_label: type_label.into(),
            property: property.into(),
        }
    }

    /// The extended class name as written in the record.
    pub fn class(&self) -> &str {
        &self.class
    }

    pub fn type_label(&self) -> &str {
        &self.type_label
    }

    pub fn property(&self) -> &str {
        &self.property
    }

    /// The owning class name used in the `classes` table.
    ///
    /// # Examples
    ///
    /// ```
    /// # use umlsheet_parser::extension::ExtensionAttribute;
    /// let record = ExtensionAttribute::new("Vehicle", "string", "serialNumber");
    /// assert_eq!(record.owner(), "XP_VehicleExt_");
    /// ```
    pub fn owner(&self) -> String {
        format!("XP_{}Ext_", self.class)
    }

    /// Converts the record into a `classes` row with a blank marker.
    pub fn to_class_row(&self) -> ClassAttributeRow {
        ClassAttributeRow::new(self.owner(), &self.property, &self.type_label, None)
    }
}

/// Reads every attribute definition record of an XML configuration list.
///
/// Only `Parameter` elements that are direct children of the root element
/// and whose `category` is `AttributeDef` are considered. Each segment of
/// the record text is trimmed; segments beyond the third are ignored. A
/// record with fewer than three segments is skipped with a warning.
///
/// # Errors
///
/// Returns [`ParseError`] with [`ErrorCode::E002`] if `source` is not
/// well-formed XML.
pub fn parse_extensions(source: &str) -> Result<Vec<ExtensionAttribute>, ParseError> {
    let document = roxmltree::Document::parse(source).map_err(|err| {
        let pos = err.pos();
        let span = Span::from_line_column(source, pos.row as usize, pos.col as usize);
        Diagnostic::error("malformed XML document")
            .with_code(ErrorCode::E002)
            .with_label(span, err.to_string())
    })?;

    let mut collector = DiagnosticCollector::new();
    let mut records = Vec::new();

    let parameters = document
        .root_element()
        .children()
        .filter(|node| node.has_tag_name(PARAMETER_TAG))
        .filter(|node| node.attribute("category") == Some(ATTRIBUTE_DEF_CATEGORY));

    for parameter in parameters {
        let text = parameter.text().unwrap_or_default();
        let parts: Vec<&str> = text.split('|').map(str::trim).collect();

        match parts.as_slice() {
            [class, type_label, property, ..] => {
                records.push(ExtensionAttribute::new(*class, *type_label, *property));
            }
            _ => {
                let diagnostic = Diagnostic::warning(format!(
                    "attribute definition `{}` is not `class|type|property`",
                    text.trim()
                ))
                .with_code(ErrorCode::E300);
                let diagnostic = match parameter.first_child().filter(|child| child.is_text()) {
                    Some(content) => diagnostic
                        .with_label(
                            Span::new(content.range()),
                            "expected three `|`-separated segments",
                        )
                        .with_secondary_label(Span::new(parameter.range()), "record skipped"),
                    None => diagnostic.with_label(Span::new(parameter.range()), "record skipped"),
                };
                collector.emit(diagnostic);
            }
        }
    }

    collector.finish()?;
    debug!(records = records.len(); "Extension records parsed");
    Ok(records)
}
