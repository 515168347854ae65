//! Typed records for a located type-model block.
//!
//! A source document exposes its definitions as loosely-shaped key/value
//! entries. The types in this module give those entries an explicit shape:
//!
//! - [`AttributeDef`] - a single attribute (`name`, `Type`, `AuthorizedValues`)
//! - [`TypeDef`] - a class definition (`name`, `Parent`, `Attributes`)
//! - [`InterfaceDef`] - an interface definition (`name`, `Attributes`, `ScopeTypes`)
//! - [`TypeModel`] - the `Types` and `Interfaces` mappings of one block
//!
//! All records implement [`serde::Deserialize`] using the source key names.
//! Missing keys and `null` values take the documented defaults, and an empty
//! `name` or `Parent` string counts as absent.
//!
//! # Example
//!
//! ```
//! # use umlsheet_core::model::{AttributeDef, TypeDef};
//! let def = TypeDef::new()
//!     .with_parent("Vehicle")
//!     .with_attribute("wheels", AttributeDef::new().with_type("int"));
//!
//! assert_eq!(def.name_or("Car"), "Car");
//! assert_eq!(def.parent(), Some("Vehicle"));
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};

/// Type label used for class attributes that do not declare a `Type`.
pub const DEFAULT_CLASS_ATTRIBUTE_TYPE: &str = "attribute";

/// Type label used for interface attributes that do not declare a `Type`.
pub const DEFAULT_INTERFACE_ATTRIBUTE_TYPE: &str = "string";

/// A single attribute of a type or interface.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AttributeDef {
    /// Display name; the attribute key is used when absent.
    #[serde(default, deserialize_with = "non_empty_text")]
    name: Option<String>,

    /// Declared type label.
    #[serde(default, rename = "Type", deserialize_with = "non_empty_text")]
    type_label: Option<String>,

    /// Literal values of an enumerated attribute, in source order.
    #[serde(default, rename = "AuthorizedValues", deserialize_with = "literal_list")]
    authorized_values: Option<Vec<String>>,
}

impl AttributeDef {
    /// Creates an attribute with every field absent.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the declared type label.
    pub fn with_type(mut self, type_label: impl Into<String>) -> Self {
        self.type_label = Some(type_label.into());
        self
    }

    /// Sets the authorized literal values.
    pub fn with_authorized_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.authorized_values = Some(values.into_iter().map(Into::into).collect());
        self
    }

    /// Returns the display name, if declared.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the display name, falling back to the attribute `key`.
    pub fn name_or<'a>(&'a self, key: &'a str) -> &'a str {
        self.name.as_deref().unwrap_or(key)
    }

    /// Returns the declared type label, if any.
    pub fn type_label(&self) -> Option<&str> {
        self.type_label.as_deref()
    }

    /// Returns the declared type label, falling back to `default`.
    pub fn type_label_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.type_label.as_deref().unwrap_or(default)
    }

    /// Returns the authorized values exactly as declared, including an empty list.
    pub fn authorized_values(&self) -> Option<&[String]> {
        self.authorized_values.as_deref()
    }

    /// Returns the literal values when the attribute is enum-typed.
    ///
    /// An attribute is enum-typed iff it declares a non-empty
    /// `AuthorizedValues` list.
    pub fn enum_values(&self) -> Option<&[String]> {
        self.authorized_values
            .as_deref()
            .filter(|values| !values.is_empty())
    }

    /// Returns `true` if the attribute is enum-typed.
    pub fn is_enum(&self) -> bool {
        self.enum_values().is_some()
    }
}

/// A class definition from the `Types` mapping.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TypeDef {
    #[serde(default, deserialize_with = "non_empty_text")]
    name: Option<String>,

    #[serde(default, rename = "Parent", deserialize_with = "non_empty_text")]
    parent: Option<String>,

    #[serde(default, rename = "Attributes", deserialize_with = "null_as_default")]
    attributes: IndexMap<String, AttributeDef>,
}

impl TypeDef {
    /// Creates a type with no name, parent, or attributes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the parent type reference.
    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    /// Appends an attribute, replacing any attribute with the same key.
    pub fn with_attribute(mut self, key: impl Into<String>, attribute: AttributeDef) -> Self {
        self.attributes.insert(key.into(), attribute);
        self
    }

    /// Returns the display name, if declared.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the display name, falling back to the mapping `key`.
    pub fn name_or<'a>(&'a self, key: &'a str) -> &'a str {
        self.name.as_deref().unwrap_or(key)
    }

    /// Returns the parent type reference, if declared.
    pub fn parent(&self) -> Option<&str> {
        self.parent.as_deref()
    }

    /// Returns the attributes keyed by attribute key, in source order.
    pub fn attributes(&self) -> &IndexMap<String, AttributeDef> {
        &self.attributes
    }
}

/// An interface definition from the `Interfaces` mapping.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct InterfaceDef {
    #[serde(default, deserialize_with = "non_empty_text")]
    name: Option<String>,

    #[serde(default, rename = "Attributes", deserialize_with = "null_as_default")]
    attributes: IndexMap<String, AttributeDef>,

    /// Names of the types that realize this interface.
    #[serde(default, rename = "ScopeTypes", deserialize_with = "null_as_default")]
    scope_types: Vec<String>,
}

impl InterfaceDef {
    /// Creates an interface with no name, attributes, or scope types.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Appends an attribute, replacing any attribute with the same key.
    pub fn with_attribute(mut self, key: impl Into<String>, attribute: AttributeDef) -> Self {
        self.attributes.insert(key.into(), attribute);
        self
    }

    /// Appends a realizing type name.
    pub fn with_scope_type(mut self, type_name: impl Into<String>) -> Self {
        self.scope_types.push(type_name.into());
        self
    }

    /// Returns the display name, if declared.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the display name, falling back to the mapping `key`.
    pub fn name_or<'a>(&'a self, key: &'a str) -> &'a str {
        self.name.as_deref().unwrap_or(key)
    }

    /// Returns the attributes keyed by attribute key, in source order.
    pub fn attributes(&self) -> &IndexMap<String, AttributeDef> {
        &self.attributes
    }

    /// Returns the realizing type names, in source order.
    pub fn scope_types(&self) -> &[String] {
        &self.scope_types
    }
}

/// The typed contents of one qualifying `Types`/`Interfaces` block.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TypeModel {
    types: IndexMap<String, TypeDef>,
    interfaces: IndexMap<String, InterfaceDef>,
}

impl TypeModel {
    /// Creates a model from its type and interface mappings.
    pub fn new(
        types: IndexMap<String, TypeDef>,
        interfaces: IndexMap<String, InterfaceDef>,
    ) -> Self {
        Self { types, interfaces }
    }

    /// Returns the type definitions keyed by their mapping key.
    pub fn types(&self) -> &IndexMap<String, TypeDef> {
        &self.types
    }

    /// Returns the interface definitions keyed by their mapping key.
    pub fn interfaces(&self) -> &IndexMap<String, InterfaceDef> {
        &self.interfaces
    }

    /// Returns `true` if the model has neither types nor interfaces.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty() && self.interfaces.is_empty()
    }
}

/// A literal value as it may appear in `AuthorizedValues`.
#[derive(Deserialize)]
#[serde(untagged)]
enum Literal {
    Text(String),
    Integer(i64),
    Float(f64),
    Flag(bool),
}

impl From<Literal> for String {
    fn from(literal: Literal) -> Self {
        match literal {
            Literal::Text(text) => text,
            Literal::Integer(value) => value.to_string(),
            Literal::Float(value) => value.to_string(),
            Literal::Flag(value) => value.to_string(),
        }
    }
}

fn non_empty_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.filter(|text| !text.is_empty()))
}

fn literal_list<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let literals = Option::<Vec<Literal>>::deserialize(deserializer)?;
    Ok(literals.map(|literals| literals.into_iter().map(String::from).collect()))
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
