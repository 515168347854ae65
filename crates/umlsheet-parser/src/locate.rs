//! Locating the type-model block inside a nested document.
//!
//! A model document may wrap its definitions in any number of enclosing
//! mappings. [`locate`] performs a depth-first search for the first mapping
//! that directly exposes a `Types` or `Interfaces` key.

use serde_json::{Map, Value};

/// Key holding the type (class) definitions of a block.
pub const TYPES_KEY: &str = "Types";

/// Key holding the interface definitions of a block.
pub const INTERFACES_KEY: &str = "Interfaces";

/// The raw `Types` and `Interfaces` values of the located block.
///
/// Either value is `None` when the block does not declare it, or when no
/// block was found at all.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ModelBlock<'a> {
    types: Option<&'a Value>,
    interfaces: Option<&'a Value>,
}

impl<'a> ModelBlock<'a> {
    fn from_map(map: &'a Map<String, Value>) -> Self {
        Self {
            types: map.get(TYPES_KEY),
            interfaces: map.get(INTERFACES_KEY),
        }
    }

    /// The `Types` value, if declared.
    pub fn types(&self) -> Option<&'a Value> {
        self.types
    }

    /// The `Interfaces` value, if declared.
    pub fn interfaces(&self) -> Option<&'a Value> {
        self.interfaces
    }

    /// Returns `true` if neither value carries any content.
    pub fn is_empty(&self) -> bool {
        is_blank(self.types) && is_blank(self.interfaces)
    }
}

/// Finds the first qualifying block of `document`.
///
/// The document itself is tested first, then its mapping values are searched
/// depth-first in document order. A mapping that directly contains `Types`
/// or `Interfaces` is returned as soon as it is met. The result of a nested
/// search is only accepted when it carries content, so an empty block buried
/// in one branch does not hide a populated block in a later branch. Lists and
/// scalars are not descended into.
///
/// Returns an empty [`ModelBlock`] when nothing qualifies.
///
/// # Examples
///
/// ```
/// # use serde_json::json;
/// # use umlsheet_parser::locate::locate;
/// let document = json!({ "Project": { "Model": { "Types": { "T1": {} } } } });
/// let block = locate(&document);
///
/// assert_eq!(block.types(), Some(&json!({ "T1": {} })));
/// assert_eq!(block.interfaces(), None);
/// ```
pub fn locate(document: &Value) -> ModelBlock<'_> {
    match document {
        Value::Object(map) if qualifies(map) => ModelBlock::from_map(map),
        Value::Object(map) => search(map),
        _ => ModelBlock::default(),
    }
}

fn search(map: &Map<String, Value>) -> ModelBlock<'_> {
    for value in map.values() {
        let Value::Object(child) = value else {
            continue;
        };

        if qualifies(child) {
            return ModelBlock::from_map(child);
        }

        let found = search(child);
        if !found.is_empty() {
            return found;
        }
    }

    ModelBlock::default()
}

fn qualifies(map: &Map<String, Value>) -> bool {
    map.contains_key(TYPES_KEY) || map.contains_key(INTERFACES_KEY)
}

fn is_blank(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::Object(map)) => map.is_empty(),
        Some(Value::Array(items)) => items.is_empty(),
        Some(Value::String(text)) => text.is_empty(),
        Some(_) => false,
    }
}
