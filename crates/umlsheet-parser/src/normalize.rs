//! Flattening a typed model into the five normalized tables.

use indexmap::IndexMap;
use log::{debug, trace};

use umlsheet_core::{
    enums::{EnumTable, enum_name},
    model::{
        AttributeDef, DEFAULT_CLASS_ATTRIBUTE_TYPE, DEFAULT_INTERFACE_ATTRIBUTE_TYPE, TypeModel,
    },
    row::{
        AttributeKind, ClassAttributeRow, GeneralizationEdge, InterfaceAttributeRow,
        RealizationEdge,
    },
    tables::ModelTables,
};

/// Flattens `model` into enumerations, class rows, interface rows,
/// generalization edges, and realization edges.
///
/// Names resolve to the declared display name, else the mapping key.
/// Enum-typed attributes register `{owner}_{attributeKey}_Enum`. Classes and
/// interfaces without attributes get a single placeholder row.
///
/// When two definitions resolve to the same class (or interface) name, the
/// later one replaces the earlier one's rows in place. A redeclared parent
/// for the same child replaces the earlier edge. Referenced parent and scope
/// type names are not checked.
///
/// # Examples
///
/// ```
/// # use umlsheet_core::model::{AttributeDef, TypeDef, TypeModel};
/// # use umlsheet_parser::normalize::normalize;
/// let mut types = indexmap::IndexMap::new();
/// types.insert(
///     "Color".to_string(),
///     TypeDef::new().with_attribute(
///         "shade",
///         AttributeDef::new().with_authorized_values(["Red", "Blue"]),
///     ),
/// );
///
/// let tables = normalize(&TypeModel::new(types, Default::default()));
/// assert_eq!(
///     tables.enums().get("Color_shade_Enum"),
///     Some(&["Red".to_string(), "Blue".to_string()][..])
/// );
/// ```
pub fn normalize(model: &TypeModel) -> ModelTables {
    let mut enums = EnumTable::new();
    let mut classes: IndexMap<String, Vec<ClassAttributeRow>> = IndexMap::new();
    let mut interfaces: IndexMap<String, Vec<InterfaceAttributeRow>> = IndexMap::new();
    let mut generalizations: IndexMap<String, String> = IndexMap::new();
    let mut realizations: IndexMap<String, Vec<String>> = IndexMap::new();

    for (key, def) in model.types() {
        let class_name = def.name_or(key);

        let mut rows: Vec<ClassAttributeRow> = def
            .attributes()
            .iter()
            .map(|(attr_key, attribute)| {
                let kind = register_enum(&mut enums, class_name, attr_key, attribute);
                ClassAttributeRow::new(
                    class_name,
                    attribute.name_or(attr_key),
                    attribute.type_label_or(DEFAULT_CLASS_ATTRIBUTE_TYPE),
                    Some(kind),
                )
            })
            .collect();
        if rows.is_empty() {
            rows.push(ClassAttributeRow::placeholder(class_name));
        }

        if classes.insert(class_name.to_string(), rows).is_some() {
            debug!(class = class_name; "Class declared more than once, keeping the later definition");
        }

        let replaced = def.parent().and_then(|parent| {
            generalizations.insert(class_name.to_string(), parent.to_string())
        });
        if let Some(previous) = replaced {
            debug!(class = class_name, previous:%; "Parent redeclared, keeping the later one");
        }
    }

    for (key, def) in model.interfaces() {
        let interface_name = def.name_or(key);

        let mut rows: Vec<InterfaceAttributeRow> = def
            .attributes()
            .iter()
            .map(|(attr_key, attribute)| {
                register_enum(&mut enums, interface_name, attr_key, attribute);
                InterfaceAttributeRow::new(
                    interface_name,
                    attribute.name_or(attr_key),
                    attribute.type_label_or(DEFAULT_INTERFACE_ATTRIBUTE_TYPE),
                )
            })
            .collect();
        if rows.is_empty() {
            rows.push(InterfaceAttributeRow::placeholder(interface_name));
        }
        interfaces.insert(interface_name.to_string(), rows);

        if !def.scope_types().is_empty() {
            realizations.insert(interface_name.to_string(), def.scope_types().to_vec());
        }
    }

    let tables = ModelTables::new(
        enums,
        classes.into_values().flatten().collect(),
        interfaces.into_values().flatten().collect(),
        generalizations
            .into_iter()
            .map(|(child, parent)| GeneralizationEdge::new(child, parent))
            .collect(),
        realizations
            .into_iter()
            .map(|(interface, classes)| RealizationEdge::new(interface, classes))
            .collect(),
    );

    debug!(
        enums = tables.enums().len(),
        class_rows = tables.classes().len(),
        interface_rows = tables.interfaces().len(),
        generalizations = tables.generalizations().len(),
        realizations = tables.realizations().len();
        "Model normalized"
    );
    trace!(tables:?; "Normalized tables");

    tables
}

/// Registers the enumeration of an enum-typed attribute and returns its marker.
fn register_enum(
    enums: &mut EnumTable,
    owner: &str,
    attr_key: &str,
    attribute: &AttributeDef,
) -> AttributeKind {
    match attribute.enum_values() {
        Some(values) => {
            enums.insert(enum_name(owner, attr_key), values.to_vec());
            AttributeKind::Enum
        }
        None => AttributeKind::Attribute,
    }
}

#[cfg(test)]
mod tests {
    use umlsheet_core::model::{InterfaceDef, TypeDef};

    use super::*;

    fn model(types: Vec<(&str, TypeDef)>, interfaces: Vec<(&str, InterfaceDef)>) -> TypeModel {
        TypeModel::new(
            types
                .into_iter()
                .map(|(key, def)| (key.to_string(), def))
                .collect(),
            interfaces
                .into_iter()
                .map(|(key, def)| (key.to_string(), def))
                .collect(),
        )
    }

    #[test]
    fn test_plain_attribute_row() {
        let tables = normalize(&model(
            vec![(
                "T1",
                TypeDef::new().with_attribute("a1", AttributeDef::new().with_type("string")),
            )],
            vec![],
        ));

        assert_eq!(
            tables.classes(),
            [ClassAttributeRow::new(
                "T1",
                "a1",
                "string",
                Some(AttributeKind::Attribute)
            )]
        );
        assert!(tables.enums().is_empty());
    }

    #[test]
    fn test_enum_attribute_uses_attribute_key_and_defaults() {
        let tables = normalize(&model(
            vec![(
                "Color",
                TypeDef::new().with_attribute(
                    "shade",
                    AttributeDef::new().with_authorized_values(["Red", "Blue"]),
                ),
            )],
            vec![],
        ));

        assert_eq!(
            tables.classes(),
            [ClassAttributeRow::new(
                "Color",
                "shade",
                "attribute",
                Some(AttributeKind::Enum)
            )]
        );
        assert_eq!(
            tables.enums().get("Color_shade_Enum"),
            Some(&["Red".to_string(), "Blue".to_string()][..])
        );
    }

    #[test]
    fn test_display_names_resolve_rows_but_not_enum_keys() {
        let tables = normalize(&model(
            vec![(
                "veh",
                TypeDef::new().with_name("Vehicle").with_attribute(
                    "fuel",
                    AttributeDef::new()
                        .with_name("Fuel Type")
                        .with_authorized_values(["Petrol"]),
                ),
            )],
            vec![],
        ));

        assert_eq!(tables.classes()[0].class(), "Vehicle");
        assert_eq!(tables.classes()[0].attribute(), "Fuel Type");
        assert!(tables.enums().contains("Vehicle_fuel_Enum"));
    }

    #[test]
    fn test_attribute_less_entities_get_placeholder_rows() {
        let tables = normalize(&model(
            vec![("Empty", TypeDef::new())],
            vec![("IEmpty", InterfaceDef::new())],
        ));

        assert_eq!(tables.classes(), [ClassAttributeRow::placeholder("Empty")]);
        assert_eq!(
            tables.interfaces(),
            [InterfaceAttributeRow::placeholder("IEmpty")]
        );
        assert!(tables.realizations().is_empty());
    }

    #[test]
    fn test_interface_attributes_default_to_string() {
        let tables = normalize(&model(
            vec![],
            vec![(
                "IColor",
                InterfaceDef::new()
                    .with_attribute("hue", AttributeDef::new())
                    .with_attribute(
                        "tone",
                        AttributeDef::new().with_authorized_values(["Light", "Dark"]),
                    )
                    .with_scope_type("Color")
                    .with_scope_type("Paint"),
            )],
        ));

        assert_eq!(
            tables.interfaces(),
            [
                InterfaceAttributeRow::new("IColor", "hue", "string"),
                InterfaceAttributeRow::new("IColor", "tone", "string"),
            ]
        );
        assert!(tables.enums().contains("IColor_tone_Enum"));
        assert_eq!(
            tables.realizations(),
            [RealizationEdge::new("IColor", ["Color", "Paint"])]
        );
    }

    #[test]
    fn test_redeclared_parent_last_wins() {
        // Two keys resolving to the same class name: the later parent replaces
        // the earlier edge. Whether the source intends this is unknown.
        let tables = normalize(&model(
            vec![
                ("a", TypeDef::new().with_name("Car").with_parent("Vehicle")),
                ("b", TypeDef::new().with_name("Car").with_parent("Machine")),
            ],
            vec![],
        ));

        assert_eq!(
            tables.generalizations(),
            [GeneralizationEdge::new("Car", "Machine")]
        );
        assert_eq!(tables.classes(), [ClassAttributeRow::placeholder("Car")]);
    }

    #[test]
    fn test_redeclared_class_keeps_first_position() {
        let tables = normalize(&model(
            vec![
                ("a", TypeDef::new().with_name("A")),
                ("b", TypeDef::new().with_name("B")),
                (
                    "a2",
                    TypeDef::new()
                        .with_name("A")
                        .with_attribute("x", AttributeDef::new()),
                ),
            ],
            vec![],
        ));

        let names: Vec<&str> = tables.classes().iter().map(|row| row.class()).collect();
        assert_eq!(names, ["A", "B"]);
        assert_eq!(tables.classes()[0].attribute(), "x");
    }

    #[test]
    fn test_dangling_references_are_preserved() {
        let tables = normalize(&model(
            vec![("Car", TypeDef::new().with_parent("Nowhere"))],
            vec![("IGhost", InterfaceDef::new().with_scope_type("Phantom"))],
        ));

        assert_eq!(
            tables.generalizations(),
            [GeneralizationEdge::new("Car", "Nowhere")]
        );
        assert_eq!(tables.realizations()[0].classes(), ["Phantom"]);
    }
}
