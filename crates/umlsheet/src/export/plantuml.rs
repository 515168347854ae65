//! PlantUML class diagrams assembled from normalized tables.
//!
//! Every class gets its own diagram showing:
//!
//! 1. the class with its attributes,
//! 2. its generalization edges, plus the box of each parent class,
//! 3. its realization edges, plus the box of each realized interface,
//! 4. the enumerations referenced by its enum-typed attributes.
//!
//! Sections are emitted in that order. Rows come out in table order.

use std::{borrow::Cow, collections::HashSet};

use indexmap::IndexMap;
use log::{debug, warn};

use umlsheet_core::{
    enums::enum_name,
    row::{ClassAttributeRow, InterfaceAttributeRow},
    tables::ModelTables,
};

use super::Error;

const START: &str = "@startuml\n\n";
const END: &str = "@enduml\n";

/// Assembles per-class diagrams from a set of tables.
///
/// The class and interface indexes are built once on construction so that
/// assembling every class of a large model stays linear in its size.
///
/// # Examples
///
/// ```
/// # use umlsheet::export::plantuml::ClassDiagramAssembler;
/// # use umlsheet::{row::{AttributeKind, ClassAttributeRow}, tables::ModelTables};
/// let tables = ModelTables::new(
///     Default::default(),
///     vec![ClassAttributeRow::new("Car", "wheels", "int", Some(AttributeKind::Attribute))],
///     vec![],
///     vec![],
///     vec![],
/// );
///
/// let source = ClassDiagramAssembler::new(&tables).assemble("Car").unwrap();
/// assert!(source.contains("class Car {\n  wheels: int\n}"));
/// ```
pub struct ClassDiagramAssembler<'a> {
    tables: &'a ModelTables,
    classes: IndexMap<&'a str, Vec<&'a ClassAttributeRow>>,
    interfaces: IndexMap<&'a str, Vec<&'a InterfaceAttributeRow>>,
}

impl<'a> ClassDiagramAssembler<'a> {
    pub fn new(tables: &'a ModelTables) -> Self {
        let mut classes: IndexMap<&str, Vec<&ClassAttributeRow>> = IndexMap::new();
        for row in tables.classes() {
            classes.entry(row.class()).or_default().push(row);
        }

        let mut interfaces: IndexMap<&str, Vec<&InterfaceAttributeRow>> = IndexMap::new();
        for row in tables.interfaces() {
            interfaces.entry(row.interface()).or_default().push(row);
        }

        debug!(
            classes = classes.len(),
            interfaces = interfaces.len();
            "Diagram indexes built"
        );

        Self {
            tables,
            classes,
            interfaces,
        }
    }

    /// Distinct class names, in first-appearance order.
    pub fn class_names(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.classes.keys().copied()
    }

    /// Returns the PlantUML source of the diagram for `class_name`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownClass`] if no row of the `classes` table
    /// belongs to `class_name`.
    pub fn assemble(&self, class_name: &str) -> Result<String, Error> {
        let rows = self
            .classes
            .get(class_name)
            .ok_or_else(|| Error::UnknownClass(class_name.to_string()))?;

        let mut out = String::from(START);

        write_box(
            &mut out,
            "class",
            class_name,
            rows.iter().filter(|row| !row.is_placeholder()).map(|row| {
                let type_label = if row.is_enum() {
                    Cow::Owned(enum_name(class_name, row.attribute()))
                } else {
                    Cow::Borrowed(row.type_label())
                };
                member(row.attribute(), &type_label)
            }),
        );

        self.write_generalizations(&mut out, class_name);
        self.write_realizations(&mut out, class_name);

        for row in rows.iter().filter(|row| row.is_enum()) {
            let name = enum_name(class_name, row.attribute());
            match self.tables.enums().get(&name) {
                Some(values) => write_box(&mut out, "enum", &name, values.iter().cloned()),
                None => debug!(
                    class = class_name,
                    attribute = row.attribute(),
                    name = name.as_str();
                    "Enumeration not in enum table, box skipped"
                ),
            }
        }

        out.push_str(END);
        Ok(out)
    }

    fn write_generalizations(&self, out: &mut String, class_name: &str) {
        let mut emitted: Vec<&str> = Vec::new();

        for edge in self
            .tables
            .generalizations()
            .iter()
            .filter(|edge| edge.involves(class_name))
        {
            relation(out, edge.child(), "--|>", edge.parent());

            let parent = edge.parent();
            if emitted.contains(&parent) {
                continue;
            }
            if let Some(parent_rows) = self.classes.get(parent) {
                emitted.push(parent);
                write_box(
                    out,
                    "class",
                    parent,
                    parent_rows
                        .iter()
                        .filter(|row| !row.is_placeholder())
                        .map(|row| member(row.attribute(), row.type_label())),
                );
            }
        }
    }

    fn write_realizations(&self, out: &mut String, class_name: &str) {
        for (interface, class) in self
            .tables
            .realization_pairs()
            .filter(|(interface, class)| *interface == class_name || *class == class_name)
        {
            relation(out, class, "..|>", interface);

            if let Some(interface_rows) = self.interfaces.get(interface) {
                write_box(
                    out,
                    "interface",
                    interface,
                    interface_rows
                        .iter()
                        .filter(|row| !row.is_placeholder())
                        .map(|row| member(row.attribute(), row.type_label())),
                );
            }
        }
    }
}

/// File stem of the diagram of `class_name`.
///
/// Characters outside `[A-Za-z0-9_.-]` become `_`.
///
/// ```
/// # use umlsheet::export::plantuml::file_stem;
/// assert_eq!(file_stem("Fuel Tank/Main", "_diagram"), "Fuel_Tank_Main_diagram");
/// ```
pub fn file_stem(class_name: &str, suffix: &str) -> String {
    let mut stem: String = class_name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();
    stem.push_str(suffix);
    stem
}

/// Hands out diagram file stems that are unique within one output directory.
///
/// Distinct class names can sanitize to the same stem (`Fuel Tank` and
/// `Fuel_Tank`), and some file systems ignore case. A stem already handed
/// out, compared case-insensitively, gets a `_2`, `_3`, ... counter.
#[derive(Debug, Default)]
pub struct FileStems {
    claimed: HashSet<String>,
}

impl FileStems {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the stem for `class_name`, unique among the stems claimed so far.
    pub fn claim(&mut self, class_name: &str, suffix: &str) -> String {
        let base = file_stem(class_name, suffix);
        let mut stem = base.clone();
        let mut counter = 1;
        while !self.claimed.insert(stem.to_lowercase()) {
            counter += 1;
            stem = format!("{base}_{counter}");
        }
        if counter > 1 {
            warn!(class = class_name, stem = stem.as_str(); "Diagram file name already taken, numbered");
        }
        stem
    }
}

fn member(attribute: &str, type_label: &str) -> String {
    format!("{attribute}: {type_label}")
}

fn write_box(out: &mut String, keyword: &str, name: &str, lines: impl Iterator<Item = String>) {
    out.push_str(keyword);
    out.push(' ');
    out.push_str(&quote(name));
    out.push_str(" {\n");
    for line in lines {
        out.push_str("  ");
        out.push_str(&line);
        out.push('\n');
    }
    out.push_str("}\n\n");
}

fn relation(out: &mut String, from: &str, arrow: &str, to: &str) {
    out.push_str(&format!("{} {arrow} {}\n\n", quote(from), quote(to)));
}

/// Wraps names that are not plain identifiers in double quotes.
fn quote(name: &str) -> Cow<'_, str> {
    if !name.is_empty() && name.chars().all(|c| c.is_alphanumeric() || c == '_') {
        Cow::Borrowed(name)
    } else {
        Cow::Owned(format!("\"{}\"", name.replace('"', "'")))
    }
}

#[cfg(test)]
mod tests {
    use umlsheet_core::{
        enums::EnumTable,
        row::{AttributeKind, GeneralizationEdge, RealizationEdge},
    };

    use super::*;

    fn attr(class: &str, attribute: &str, type_label: &str) -> ClassAttributeRow {
        ClassAttributeRow::new(class, attribute, type_label, Some(AttributeKind::Attribute))
    }

    #[test]
    fn test_plain_class_diagram() {
        let tables = ModelTables::new(
            EnumTable::new(),
            vec![attr("Car", "wheels", "int"), attr("Car", "brand", "string")],
            vec![],
            vec![],
            vec![],
        );

        let source = ClassDiagramAssembler::new(&tables).assemble("Car").unwrap();

        assert_eq!(
            source,
            "@startuml\n\nclass Car {\n  wheels: int\n  brand: string\n}\n\n@enduml\n"
        );
    }

    #[test]
    fn test_full_diagram_section_order() {
        let mut enums = EnumTable::new();
        enums.insert("Car_color_Enum", vec!["Red".into(), "Blue".into()]);

        let tables = ModelTables::new(
            enums,
            vec![
                attr("Vehicle", "speed", "float"),
                attr("Car", "wheels", "int"),
                ClassAttributeRow::new("Car", "color", "attribute", Some(AttributeKind::Enum)),
            ],
            vec![InterfaceAttributeRow::new("IDrivable", "license", "string")],
            vec![GeneralizationEdge::new("Car", "Vehicle")],
            vec![RealizationEdge::new("IDrivable", ["Car"])],
        );

        let source = ClassDiagramAssembler::new(&tables).assemble("Car").unwrap();

        assert_eq!(
            source,
            concat!(
                "@startuml\n\n",
                "class Car {\n  wheels: int\n  color: Car_color_Enum\n}\n\n",
                "Car --|> Vehicle\n\n",
                "class Vehicle {\n  speed: float\n}\n\n",
                "Car ..|> IDrivable\n\n",
                "interface IDrivable {\n  license: string\n}\n\n",
                "enum Car_color_Enum {\n  Red\n  Blue\n}\n\n",
                "@enduml\n",
            )
        );
    }

    #[test]
    fn test_parent_box_emitted_once() {
        let tables = ModelTables::new(
            EnumTable::new(),
            vec![attr("P", "id", "int"), attr("C", "x", "int")],
            vec![],
            vec![
                GeneralizationEdge::new("C", "P"),
                GeneralizationEdge::new("C", "P"),
            ],
            vec![],
        );

        let source = ClassDiagramAssembler::new(&tables).assemble("C").unwrap();

        assert_eq!(source.matches("C --|> P").count(), 2);
        assert_eq!(source.matches("class P {").count(), 1);
    }

    #[test]
    fn test_target_as_parent_gets_parent_box() {
        let tables = ModelTables::new(
            EnumTable::new(),
            vec![attr("P", "id", "int"), attr("C", "x", "int")],
            vec![],
            vec![GeneralizationEdge::new("C", "P")],
            vec![],
        );

        let source = ClassDiagramAssembler::new(&tables).assemble("P").unwrap();

        assert_eq!(
            source,
            concat!(
                "@startuml\n\n",
                "class P {\n  id: int\n}\n\n",
                "C --|> P\n\n",
                "class P {\n  id: int\n}\n\n",
                "@enduml\n",
            )
        );
        assert!(!source.contains("class C {"));
    }

    #[test]
    fn test_dangling_references_have_no_boxes() {
        let tables = ModelTables::new(
            EnumTable::new(),
            vec![
                attr("C", "x", "int"),
                ClassAttributeRow::new("C", "mode", "attribute", Some(AttributeKind::Enum)),
            ],
            vec![],
            vec![GeneralizationEdge::new("C", "Nowhere")],
            vec![RealizationEdge::new("IGhost", ["C"])],
        );

        let source = ClassDiagramAssembler::new(&tables).assemble("C").unwrap();

        assert!(source.contains("C --|> Nowhere"));
        assert!(!source.contains("class Nowhere"));
        assert!(source.contains("C ..|> IGhost"));
        assert!(!source.contains("interface IGhost"));
        assert!(!source.contains("enum "));
    }

    #[test]
    fn test_placeholder_rows_render_empty_box() {
        let tables = ModelTables::new(
            EnumTable::new(),
            vec![ClassAttributeRow::placeholder("Empty")],
            vec![],
            vec![],
            vec![],
        );

        let source = ClassDiagramAssembler::new(&tables)
            .assemble("Empty")
            .unwrap();

        assert_eq!(source, "@startuml\n\nclass Empty {\n}\n\n@enduml\n");
    }

    #[test]
    fn test_non_identifier_names_are_quoted() {
        let tables = ModelTables::new(
            EnumTable::new(),
            vec![attr("Fuel Tank", "level", "int")],
            vec![],
            vec![GeneralizationEdge::new("Fuel Tank", "Tank")],
            vec![],
        );

        let source = ClassDiagramAssembler::new(&tables)
            .assemble("Fuel Tank")
            .unwrap();

        assert!(source.contains("class \"Fuel Tank\" {"));
        assert!(source.contains("\"Fuel Tank\" --|> Tank"));
    }

    #[test]
    fn test_file_stems_never_collide() {
        let mut stems = FileStems::new();

        assert_eq!(stems.claim("Fuel Tank", "_diagram"), "Fuel_Tank_diagram");
        assert_eq!(stems.claim("Fuel_Tank", "_diagram"), "Fuel_Tank_diagram_2");
        assert_eq!(stems.claim("Fuel/Tank", "_diagram"), "Fuel_Tank_diagram_3");
        assert_eq!(stems.claim("fuel_tank", "_diagram"), "fuel_tank_diagram_4");
        assert_eq!(stems.claim("Car", "_diagram"), "Car_diagram");
    }

    #[test]
    fn test_unknown_class() {
        let tables = ModelTables::default();
        let err = ClassDiagramAssembler::new(&tables)
            .assemble("Ghost")
            .unwrap_err();

        assert!(matches!(err, Error::UnknownClass(name) if name == "Ghost"));
    }

    #[test]
    fn test_class_names_first_appearance() {
        let tables = ModelTables::new(
            EnumTable::new(),
            vec![attr("B", "x", "int"), attr("A", "y", "int"), attr("B", "z", "int")],
            vec![],
            vec![],
            vec![],
        );

        let assembler = ClassDiagramAssembler::new(&tables);
        assert_eq!(assembler.class_names().collect::<Vec<_>>(), ["B", "A"]);
    }
}
