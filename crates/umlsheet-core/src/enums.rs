//! Synthesized enumeration table.
//!
//! Every enum-typed attribute contributes one enumeration named after its
//! owner and attribute key (see [`enum_name`]). The table keeps enumerations
//! in registration order and each literal list in source order.

use indexmap::{IndexMap, map::Iter};

/// Builds the enumeration name for an attribute: `{owner}_{attribute}_Enum`.
///
/// # Examples
///
/// ```
/// # use umlsheet_core::enum_name;
/// assert_eq!(enum_name("Color", "shade"), "Color_shade_Enum");
/// ```
pub fn enum_name(owner: &str, attribute: &str) -> String {
    format!("{owner}_{attribute}_Enum")
}

/// Ordered mapping from enumeration name to its literal values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnumTable {
    entries: IndexMap<String, Vec<String>>,
}

impl EnumTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `values` under `name`, replacing previously registered values.
    ///
    /// A replaced enumeration keeps its original position.
    pub fn insert(&mut self, name: impl Into<String>, values: Vec<String>) {
        self.entries.insert(name.into(), values);
    }

    /// Appends a single literal to `name`, creating the enumeration if needed.
    pub fn push_value(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries
            .entry(name.into())
            .or_default()
            .push(value.into());
    }

    /// Returns the literal values of `name`.
    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.entries.get(name).map(Vec::as_slice)
    }

    /// Returns `true` if an enumeration named `name` exists.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Iterates over `(name, values)` in registration order.
    pub fn iter(&self) -> Iter<'_, String, Vec<String>> {
        self.entries.iter()
    }

    /// Number of enumerations.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no enumeration is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Unions `other` into this table.
    ///
    /// Unknown enumerations are appended; literals missing from a known
    /// enumeration are appended to its list. Nothing is removed.
    pub fn merge(&mut self, other: EnumTable) {
        for (name, values) in other.entries {
            let existing = self.entries.entry(name).or_default();
            for value in values {
                if !existing.contains(&value) {
                    existing.push(value);
                }
            }
        }
    }
}

impl<'a> IntoIterator for &'a EnumTable {
    type Item = (&'a String, &'a Vec<String>);
    type IntoIter = Iter<'a, String, Vec<String>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(items: &[&str]) -> Vec<String> {
        items.iter().map(|item| item.to_string()).collect()
    }

    #[test]
    fn test_insert_overwrites_in_place() {
        let mut table = EnumTable::new();
        table.insert("A_x_Enum", values(&["1"]));
        table.insert("B_y_Enum", values(&["2"]));
        table.insert("A_x_Enum", values(&["3", "4"]));

        let names: Vec<&str> = table.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, ["A_x_Enum", "B_y_Enum"]);
        assert_eq!(table.get("A_x_Enum"), Some(&values(&["3", "4"])[..]));
    }

    #[test]
    fn test_push_value_groups_by_name() {
        let mut table = EnumTable::new();
        table.push_value("E", "a");
        table.push_value("F", "b");
        table.push_value("E", "c");

        assert_eq!(table.len(), 2);
        assert_eq!(table.get("E"), Some(&values(&["a", "c"])[..]));
    }

    #[test]
    fn test_merge_appends_missing_literals() {
        let mut table = EnumTable::new();
        table.insert("E", values(&["a", "b"]));

        let mut other = EnumTable::new();
        other.insert("E", values(&["b", "c"]));
        other.insert("G", values(&["z"]));
        table.merge(other);

        assert_eq!(table.get("E"), Some(&values(&["a", "b", "c"])[..]));
        assert_eq!(table.get("G"), Some(&values(&["z"])[..]));
    }
}
