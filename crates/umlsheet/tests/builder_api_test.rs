//! Integration tests for the ModelBuilder API
//!
//! These tests drive the pipeline end to end through the public API with
//! workbooks and diagrams written to temporary directories.

use std::{cell::RefCell, fs, path::Path};

use umlsheet::{
    ExtensionAttribute, ModelBuilder, UmlSheetError,
    config::{AppConfig, DiagramConfig, RenderConfig, StoreConfig},
    render::{self, DiagramRenderer, ImageFormat},
    row::{AttributeKind, ClassAttributeRow},
};

const MODEL: &str = r#"{
    "Project": {
        "Name": "fleet",
        "Model": {
            "Types": {
                "Vehicle": { "Attributes": { "speed": { "Type": "float" } } },
                "Car": {
                    "Parent": "Vehicle",
                    "Attributes": {
                        "wheels": { "Type": "int" },
                        "color": { "AuthorizedValues": ["Red", "Blue"] }
                    }
                },
                "Garage": {}
            },
            "Interfaces": {
                "IDrivable": { "Attributes": { "license": {} }, "ScopeTypes": ["Car"] },
                "IFlyable": { "Attributes": { "altitude": { "Type": "float" } } }
            }
        }
    }
}"#;

/// Records every rendered source and fails for sources mentioning `fail_on`.
struct FakeRenderer {
    fail_on: &'static str,
    calls: RefCell<Vec<String>>,
}

impl FakeRenderer {
    fn new(fail_on: &'static str) -> Self {
        Self {
            fail_on,
            calls: RefCell::new(Vec::new()),
        }
    }
}

impl DiagramRenderer for FakeRenderer {
    fn render(&self, source: &str) -> Result<Vec<u8>, render::Error> {
        self.calls.borrow_mut().push(source.to_string());
        if source.contains(self.fail_on) {
            Err(render::Error::Status {
                status: 500,
                url: "http://render.invalid/svg".to_string(),
            })
        } else {
            Ok(b"<svg/>".to_vec())
        }
    }

    fn format(&self) -> ImageFormat {
        ImageFormat::Svg
    }
}

#[test]
fn test_parse_nested_model() {
    let tables = ModelBuilder::default().parse(MODEL).expect("Failed to parse");

    assert_eq!(
        tables.class_names().into_iter().collect::<Vec<_>>(),
        ["Vehicle", "Car", "Garage"]
    );
    assert_eq!(
        tables.enums().get("Car_color_Enum"),
        Some(&["Red".to_string(), "Blue".to_string()][..])
    );
    assert!(tables.classes().contains(&ClassAttributeRow::placeholder("Garage")));
}

#[test]
fn test_parse_invalid_document_keeps_source() {
    let source = r#"{"Types": ["Car"]}"#;
    let err = ModelBuilder::default().parse(source).unwrap_err();

    match err {
        UmlSheetError::Parse { err, src } => {
            assert_eq!(src, source);
            assert_eq!(err.diagnostics().len(), 1);
        }
        other => panic!("Expected a parse error, got {other:?}"),
    }
}

#[test]
fn test_workbook_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let builder = ModelBuilder::default();
    let tables = builder.parse(MODEL).unwrap();

    let path = builder.workbook_path(dir.path());
    builder.save_tables(&tables, &path, false).unwrap();

    assert!(path.ends_with("enums_classes_interfaces_generalizations_realisations.xlsx"));
    assert_eq!(builder.load_tables(&path).unwrap(), tables);
}

#[test]
fn test_merge_never_removes_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("model.xlsx");
    let builder = ModelBuilder::default();

    let first = builder.parse(MODEL).unwrap();
    builder.save_tables(&first, &path, false).unwrap();

    let second = builder
        .parse(r#"{"Types":{"Boat":{"Attributes":{"hull":{"Type":"string"}}}}}"#)
        .unwrap();
    builder.save_tables(&second, &path, true).unwrap();
    builder.save_tables(&second, &path, true).unwrap();

    let merged = builder.load_tables(&path).unwrap();
    for row in first.classes().iter().chain(second.classes()) {
        assert_eq!(merged.classes().iter().filter(|r| *r == row).count(), 1);
    }
    assert_eq!(merged.generalizations(), first.generalizations());
}

#[test]
fn test_append_extensions_creates_and_extends() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("model.xlsx");
    let builder = ModelBuilder::default();

    let records = builder
        .parse_extensions(
            r#"<Configuration>
                 <Parameter category="AttributeDef">Vehicle|string|serialNumber</Parameter>
               </Configuration>"#,
        )
        .unwrap();
    assert_eq!(records, [ExtensionAttribute::new("Vehicle", "string", "serialNumber")]);

    assert_eq!(builder.append_extensions(&records, &path).unwrap(), 1);
    assert_eq!(builder.append_extensions(&records, &path).unwrap(), 0);

    let tables = builder.load_tables(&path).unwrap();
    assert_eq!(
        tables.classes(),
        [ClassAttributeRow::new("XP_VehicleExt_", "serialNumber", "string", None)]
    );
}

#[test]
fn test_write_diagrams_without_renderer() {
    let dir = tempfile::tempdir().unwrap();
    let builder = ModelBuilder::default();
    let tables = builder.parse(MODEL).unwrap();

    let batch = builder.write_diagrams(&tables, dir.path(), None).unwrap();

    assert_eq!(batch.sources().len(), 3);
    assert!(batch.images().is_empty());
    assert!(batch.failures().is_empty());

    let car = fs::read_to_string(dir.path().join("Car_diagram.puml")).unwrap();
    assert!(car.starts_with("@startuml\n\nclass Car {"));
    assert!(car.contains("Car --|> Vehicle"));
    assert!(car.contains("class Vehicle {\n  speed: float\n}"));
    assert!(car.contains("Car ..|> IDrivable"));
    assert!(car.contains("interface IDrivable {\n  license: string\n}"));
    assert!(car.contains("enum Car_color_Enum {\n  Red\n  Blue\n}"));
    assert!(car.ends_with("@enduml\n"));
}

#[test]
fn test_render_failure_is_isolated_per_class() {
    let dir = tempfile::tempdir().unwrap();
    let config = AppConfig::new(
        StoreConfig::default(),
        DiagramConfig::new("_uml"),
        RenderConfig::default(),
    );
    let builder = ModelBuilder::new(config);
    let tables = builder.parse(MODEL).unwrap();
    let renderer = FakeRenderer::new("class Garage");

    let batch = builder
        .write_diagrams(&tables, dir.path(), Some(&renderer))
        .unwrap();

    assert_eq!(renderer.calls.borrow().len(), 3);
    assert_eq!(batch.sources().len(), 3);
    assert_eq!(batch.images().len(), 2);
    assert_eq!(batch.failures().len(), 1);
    assert_eq!(batch.failures()[0].0, "Garage");
    assert!(matches!(batch.failures()[0].1, UmlSheetError::Render(_)));

    assert!(Path::new(&dir.path().join("Car_uml.svg")).is_file());
    assert!(dir.path().join("Garage_uml.puml").is_file());
    assert!(!dir.path().join("Garage_uml.svg").exists());
}

#[test]
fn test_unused_interface_report() {
    let dir = tempfile::tempdir().unwrap();
    let builder = ModelBuilder::default();
    let tables = builder.parse(MODEL).unwrap();

    let unused = builder.unused_interfaces(&tables);
    assert_eq!(unused.iter().copied().collect::<Vec<_>>(), ["IFlyable"]);

    let path = dir.path().join("report.csv");
    builder.write_report(&unused, &path).unwrap();
    assert_eq!(fs::read_to_string(path).unwrap(), "Interface\nIFlyable\n");
}

#[test]
fn test_class_diagram_for_unknown_class() {
    let builder = ModelBuilder::default();
    let tables = builder.parse(MODEL).unwrap();

    let err = builder.class_diagram(&tables, "Ghost").unwrap_err();
    assert!(matches!(err, UmlSheetError::Export(_)));

    let kinds: Vec<_> = tables
        .classes()
        .iter()
        .filter(|row| row.class() == "Car")
        .map(ClassAttributeRow::kind)
        .collect();
    assert_eq!(kinds, [Some(AttributeKind::Attribute), Some(AttributeKind::Enum)]);
}

#[test]
fn test_colliding_file_names_are_numbered() {
    let dir = tempfile::tempdir().unwrap();
    let builder = ModelBuilder::default();
    let tables = builder
        .parse(
            r#"{"Types": {
                "Fuel Tank": { "Attributes": { "level": { "Type": "int" } } },
                "Fuel_Tank": { "Attributes": { "volume": { "Type": "int" } } }
            }}"#,
        )
        .unwrap();

    let batch = builder.write_diagrams(&tables, dir.path(), None).unwrap();

    assert_eq!(batch.sources().len(), 2);
    assert!(batch.failures().is_empty());

    let first = fs::read_to_string(dir.path().join("Fuel_Tank_diagram.puml")).unwrap();
    let second = fs::read_to_string(dir.path().join("Fuel_Tank_diagram_2.puml")).unwrap();
    assert!(first.contains("class \"Fuel Tank\" {\n  level: int\n}"));
    assert!(second.contains("class Fuel_Tank {\n  volume: int\n}"));
}

#[test]
fn test_empty_names_are_rejected_before_the_workbook() {
    let source = r#"{"Types": {"": {}}, "Interfaces": {"I": {"ScopeTypes": [""]}}}"#;
    let err = ModelBuilder::default().parse(source).unwrap_err();

    match err {
        UmlSheetError::Parse { err, .. } => {
            let codes: Vec<_> = err
                .diagnostics()
                .iter()
                .map(|d| d.code().map(|code| code.to_string()))
                .collect();
            assert_eq!(codes, [Some("E103".to_string()), Some("E103".to_string())]);
        }
        other => panic!("Expected a parse error, got {other:?}"),
    }
}

#[test]
fn test_workbook_round_trip_keeps_placeholders_and_realizations() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("model.xlsx");
    let builder = ModelBuilder::default();
    let tables = builder
        .parse(
            r#"{"Types": {"Empty": {}, "Car": {}},
                "Interfaces": {"IBare": {}, "IDrivable": {"ScopeTypes": ["Car", "Empty"]}}}"#,
        )
        .unwrap();

    builder.save_tables(&tables, &path, false).unwrap();
    let loaded = builder.load_tables(&path).unwrap();

    assert_eq!(loaded, tables);
    assert!(loaded.classes().contains(&ClassAttributeRow::placeholder("Empty")));
    assert_eq!(loaded.realizations().len(), 1);
}
