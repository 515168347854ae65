//! The five normalized tables as a single value.

use indexmap::{IndexMap, IndexSet};

use crate::{
    enums::EnumTable,
    row::{ClassAttributeRow, GeneralizationEdge, InterfaceAttributeRow, RealizationEdge},
};

/// Enumerations, class attributes, interface attributes, generalization
/// edges, and realization edges of one model snapshot.
///
/// Tables are produced either by normalizing a type model or by loading a
/// workbook. Row order is significant for output but not for identity of
/// the enumeration table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelTables {
    enums: EnumTable,
    classes: Vec<ClassAttributeRow>,
    interfaces: Vec<InterfaceAttributeRow>,
    generalizations: Vec<GeneralizationEdge>,
    realizations: Vec<RealizationEdge>,
}

impl ModelTables {
    /// Creates tables from their parts.
    pub fn new(
        enums: EnumTable,
        classes: Vec<ClassAttributeRow>,
        interfaces: Vec<InterfaceAttributeRow>,
        generalizations: Vec<GeneralizationEdge>,
        realizations: Vec<RealizationEdge>,
    ) -> Self {
        Self {
            enums,
            classes,
            interfaces,
            generalizations,
            realizations,
        }
    }

    pub fn enums(&self) -> &EnumTable {
        &self.enums
    }

    pub fn classes(&self) -> &[ClassAttributeRow] {
        &self.classes
    }

    pub fn interfaces(&self) -> &[InterfaceAttributeRow] {
        &self.interfaces
    }

    pub fn generalizations(&self) -> &[GeneralizationEdge] {
        &self.generalizations
    }

    pub fn realizations(&self) -> &[RealizationEdge] {
        &self.realizations
    }

    /// Returns `true` if every table is empty.
    pub fn is_empty(&self) -> bool {
        self.enums.is_empty()
            && self.classes.is_empty()
            && self.interfaces.is_empty()
            && self.generalizations.is_empty()
            && self.realizations.is_empty()
    }

    /// Distinct class names in first-appearance order.
    pub fn class_names(&self) -> IndexSet<&str> {
        self.classes.iter().map(ClassAttributeRow::class).collect()
    }

    /// Distinct non-blank interface names in first-appearance order.
    pub fn interface_names(&self) -> IndexSet<&str> {
        self.interfaces
            .iter()
            .map(InterfaceAttributeRow::interface)
            .filter(|name| !name.is_empty())
            .collect()
    }

    /// Flattens realization edges into `(interface, class)` pairs.
    ///
    /// This is the row layout of the `realisation` sheet.
    pub fn realization_pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.realizations.iter().flat_map(|edge| {
            edge.classes()
                .iter()
                .map(move |class| (edge.interface(), class.as_str()))
        })
    }

    /// Appends class rows that are not already present.
    pub fn extend_classes(&mut self, rows: impl IntoIterator<Item = ClassAttributeRow>) {
        for row in rows {
            if !self.classes.contains(&row) {
                self.classes.push(row);
            }
        }
    }

    /// Unions `other` into these tables without removing any row.
    ///
    /// Rows and edges already present are skipped. Realizing classes are
    /// merged into the existing edge of the same interface.
    pub fn merge(&mut self, other: ModelTables) {
        self.enums.merge(other.enums);
        self.extend_classes(other.classes);

        for row in other.interfaces {
            if !self.interfaces.contains(&row) {
                self.interfaces.push(row);
            }
        }

        for edge in other.generalizations {
            if !self.generalizations.contains(&edge) {
                self.generalizations.push(edge);
            }
        }

        for edge in other.realizations {
            match self
                .realizations
                .iter_mut()
                .find(|existing| existing.interface() == edge.interface())
            {
                Some(existing) => {
                    for class in edge.classes() {
                        existing.add_class(class.as_str());
                    }
                }
                None => self.realizations.push(edge),
            }
        }
    }
}

/// Groups `(interface, class)` pairs into one edge per interface.
///
/// Edges appear in the order their interface is first seen.
pub fn group_realizations<I, S>(pairs: I) -> Vec<RealizationEdge>
where
    I: IntoIterator<Item = (S, S)>,
    S: Into<String>,
{
    let mut grouped: IndexMap<String, Vec<String>> = IndexMap::new();
    for (interface, class) in pairs {
        grouped
            .entry(interface.into())
            .or_default()
            .push(class.into());
    }

    grouped
        .into_iter()
        .map(|(interface, classes)| RealizationEdge::new(interface, classes))
        .collect()
}
