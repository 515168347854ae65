//! Attribute rows and relation edges of the normalized tables.

use std::{fmt, str::FromStr};

use thiserror::Error;

/// Marker distinguishing enum-typed attributes from plain ones.
///
/// The names match the `Enum` column of the `classes` sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeKind {
    /// A plain attribute.
    Attribute,
    /// An attribute whose domain is a synthesized enumeration.
    Enum,
}

/// A marker string that is neither `enum` nor `attribute`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown attribute marker `{0}`")]
pub struct UnknownMarker(pub String);

impl AttributeKind {
    /// Parses a sheet cell, where a blank cell means "no marker".
    ///
    /// # Errors
    ///
    /// Returns [`UnknownMarker`] for any other non-blank text.
    pub fn from_cell(cell: &str) -> Result<Option<Self>, UnknownMarker> {
        if cell.is_empty() {
            Ok(None)
        } else {
            cell.parse().map(Some)
        }
    }
}

impl FromStr for AttributeKind {
    type Err = UnknownMarker;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "attribute" => Ok(Self::Attribute),
            "enum" => Ok(Self::Enum),
            _ => Err(UnknownMarker(s.to_string())),
        }
    }
}

impl From<AttributeKind> for &'static str {
    fn from(val: AttributeKind) -> Self {
        match val {
            AttributeKind::Attribute => "attribute",
            AttributeKind::Enum => "enum",
        }
    }
}

impl fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s: &'static str = (*self).into();
        write!(f, "{s}")
    }
}

/// One row of the `classes` table.
///
/// A class without attributes is represented by a single placeholder row
/// whose attribute, type, and marker are blank. Rows imported from
/// extension records have a blank marker but a non-blank attribute.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClassAttributeRow {
    class: String,
    attribute: String,
    type_label: String,
    kind: Option<AttributeKind>,
}

impl ClassAttributeRow {
    /// Creates a row for one attribute of `class`.
    pub fn new(
        class: impl Into<String>,
        attribute: impl Into<String>,
        type_label: impl Into<String>,
        kind: Option<AttributeKind>,
    ) -> Self {
        Self {
            class: class.into(),
            attribute: attribute.into(),
            type_label: type_label.into(),
            kind,
        }
    }

    /// Creates the placeholder row of an attribute-less class.
    pub fn placeholder(class: impl Into<String>) -> Self {
        Self::new(class, "", "", None)
    }

    pub fn class(&self) -> &str {
        &self.class
    }

    pub fn attribute(&self) -> &str {
        &self.attribute
    }

    pub fn type_label(&self) -> &str {
        &self.type_label
    }

    pub fn kind(&self) -> Option<AttributeKind> {
        self.kind
    }

    /// Returns `true` if the attribute is marked `enum`.
    pub fn is_enum(&self) -> bool {
        self.kind == Some(AttributeKind::Enum)
    }

    /// Returns `true` for the blank row that only records the class.
    pub fn is_placeholder(&self) -> bool {
        self.attribute.is_empty() && self.type_label.is_empty() && self.kind.is_none()
    }
}

/// One row of the `interfaces` table.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InterfaceAttributeRow {
    interface: String,
    attribute: String,
    type_label: String,
}

impl InterfaceAttributeRow {
    /// Creates a row for one attribute of `interface`.
    pub fn new(
        interface: impl Into<String>,
        attribute: impl Into<String>,
        type_label: impl Into<String>,
    ) -> Self {
        Self {
            interface: interface.into(),
            attribute: attribute.into(),
            type_label: type_label.into(),
        }
    }

    /// Creates the placeholder row of an attribute-less interface.
    pub fn placeholder(interface: impl Into<String>) -> Self {
        Self::new(interface, "", "")
    }

    pub fn interface(&self) -> &str {
        &self.interface
    }

    pub fn attribute(&self) -> &str {
        &self.attribute
    }

    pub fn type_label(&self) -> &str {
        &self.type_label
    }

    /// Returns `true` for the blank row that only records the interface.
    pub fn is_placeholder(&self) -> bool {
        self.attribute.is_empty() && self.type_label.is_empty()
    }
}

/// An inheritance edge: `child` extends `parent`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GeneralizationEdge {
    child: String,
    parent: String,
}

impl GeneralizationEdge {
    pub fn new(child: impl Into<String>, parent: impl Into<String>) -> Self {
        Self {
            child: child.into(),
            parent: parent.into(),
        }
    }

    pub fn child(&self) -> &str {
        &self.child
    }

    pub fn parent(&self) -> &str {
        &self.parent
    }

    /// Returns `true` if `class` is either end of the edge.
    pub fn involves(&self, class: &str) -> bool {
        self.child == class || self.parent == class
    }
}

/// A realization edge: every class in `classes` implements `interface`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RealizationEdge {
    interface: String,
    classes: Vec<String>,
}

impl RealizationEdge {
    pub fn new<I, S>(interface: impl Into<String>, classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            interface: interface.into(),
            classes: classes.into_iter().map(Into::into).collect(),
        }
    }

    pub fn interface(&self) -> &str {
        &self.interface
    }

    /// Realizing class names, in declaration order.
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Appends `class` unless it is already recorded.
    pub fn add_class(&mut self, class: impl Into<String>) {
        let class = class.into();
        if !self.classes.contains(&class) {
            self.classes.push(class);
        }
    }
}
