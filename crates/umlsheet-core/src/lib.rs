//! umlsheet Core Types and Definitions
//!
//! This crate provides the foundational types shared by every umlsheet
//! stage. It includes:
//!
//! - **Model**: Typed records for a located type-model block ([`model`] module)
//! - **Rows**: Class/interface attribute rows and relation edges ([`row`] module)
//! - **Enums**: The synthesized enumeration table ([`enums`] module)
//! - **Tables**: The five normalized tables as one value ([`tables::ModelTables`])

pub mod enums;
pub mod model;
pub mod row;
pub mod tables;

pub use enums::{EnumTable, enum_name};
pub use model::{AttributeDef, InterfaceDef, TypeDef, TypeModel};
pub use row::{
    AttributeKind, ClassAttributeRow, GeneralizationEdge, InterfaceAttributeRow, RealizationEdge,
    UnknownMarker,
};
pub use tables::{ModelTables, group_realizations};
