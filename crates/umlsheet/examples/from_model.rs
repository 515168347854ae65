//! Example: Building tables programmatically and printing a class diagram
//!
//! This example constructs the normalized tables directly, without a JSON
//! document, and prints the PlantUML source of one class.

use umlsheet::{
    ModelBuilder,
    enums::EnumTable,
    row::{AttributeKind, ClassAttributeRow, GeneralizationEdge, InterfaceAttributeRow, RealizationEdge},
    tables::ModelTables,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut enums = EnumTable::new();
    enums.insert(
        "Car_fuel_Enum",
        vec!["Petrol".to_string(), "Diesel".to_string(), "Electric".to_string()],
    );

    let tables = ModelTables::new(
        enums,
        vec![
            ClassAttributeRow::new("Vehicle", "speed", "float", Some(AttributeKind::Attribute)),
            ClassAttributeRow::new("Car", "wheels", "int", Some(AttributeKind::Attribute)),
            ClassAttributeRow::new("Car", "fuel", "attribute", Some(AttributeKind::Enum)),
        ],
        vec![InterfaceAttributeRow::new("IDrivable", "license", "string")],
        vec![GeneralizationEdge::new("Car", "Vehicle")],
        vec![RealizationEdge::new("IDrivable", ["Car"])],
    );

    let builder = ModelBuilder::default();
    println!("{}", builder.class_diagram(&tables, "Car")?);

    let unused = builder.unused_interfaces(&tables);
    println!("Unused interfaces: {}", unused.len());

    Ok(())
}
