//! Typed ingestion of a located model block.
//!
//! Converts the raw `Types`/`Interfaces` values into [`TypeModel`] records.
//! Every malformed entry is reported, then ingestion fails as a whole.

use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde_json::Value;

use umlsheet_core::model::{AttributeDef, InterfaceDef, TypeDef, TypeModel};

use crate::{
    error::{Diagnostic, DiagnosticCollector, ErrorCode, ParseError},
    locate::{INTERFACES_KEY, ModelBlock, TYPES_KEY},
};

/// Converts `block` into typed definitions.
///
/// An absent or `null` section is empty. A section that is not a mapping
/// raises [`ErrorCode::E100`]; an entry that does not deserialize raises
/// [`ErrorCode::E101`] or [`ErrorCode::E102`]. An empty `AuthorizedValues`
/// list is reported as a warning. A definition that resolves to an empty
/// name, or an empty `ScopeTypes` entry, raises [`ErrorCode::E103`].
pub(crate) fn ingest(block: ModelBlock<'_>) -> Result<TypeModel, ParseError> {
    let mut collector = DiagnosticCollector::new();

    let types: IndexMap<String, TypeDef> = ingest_section(
        block.types(),
        TYPES_KEY,
        "type",
        ErrorCode::E101,
        &mut collector,
    );
    let interfaces: IndexMap<String, InterfaceDef> = ingest_section(
        block.interfaces(),
        INTERFACES_KEY,
        "interface",
        ErrorCode::E102,
        &mut collector,
    );

    for (key, def) in &types {
        check_name(TYPES_KEY, key, def.name_or(key), &mut collector);
        check_attributes(&format!("{TYPES_KEY}.{key}"), def.attributes(), &mut collector);
    }
    for (key, def) in &interfaces {
        check_name(INTERFACES_KEY, key, def.name_or(key), &mut collector);
        if def.scope_types().iter().any(String::is_empty) {
            collector.emit(
                Diagnostic::error(format!(
                    "`{INTERFACES_KEY}.{key}.ScopeTypes` lists an empty type name"
                ))
                .with_code(ErrorCode::E103),
            );
        }
        check_attributes(
            &format!("{INTERFACES_KEY}.{key}"),
            def.attributes(),
            &mut collector,
        );
    }

    collector.finish()?;
    Ok(TypeModel::new(types, interfaces))
}

fn ingest_section<T: DeserializeOwned>(
    value: Option<&Value>,
    section: &str,
    noun: &str,
    code: ErrorCode,
    collector: &mut DiagnosticCollector,
) -> IndexMap<String, T> {
    let entries = match value {
        None | Some(Value::Null) => return IndexMap::new(),
        Some(Value::Object(entries)) => entries,
        Some(other) => {
            collector.emit(
                Diagnostic::error(format!("`{section}` must be a mapping of definitions"))
                    .with_code(ErrorCode::E100)
                    .with_help(format!("found {}", describe(other))),
            );
            return IndexMap::new();
        }
    };

    let mut definitions = IndexMap::with_capacity(entries.len());
    for (key, entry) in entries {
        match T::deserialize(entry) {
            Ok(definition) => {
                definitions.insert(key.clone(), definition);
            }
            Err(err) => collector.emit(
                Diagnostic::error(format!("invalid {noun} definition `{section}.{key}`"))
                    .with_code(code)
                    .with_help(err.to_string()),
            ),
        }
    }
    definitions
}

fn check_name(section: &str, key: &str, name: &str, collector: &mut DiagnosticCollector) {
    if name.is_empty() {
        collector.emit(
            Diagnostic::error(format!("definition `{section}.{key}` has an empty name"))
                .with_code(ErrorCode::E103)
                .with_help("give the definition a non-empty key or `name`"),
        );
    }
}

fn check_attributes(
    owner_path: &str,
    attributes: &IndexMap<String, AttributeDef>,
    collector: &mut DiagnosticCollector,
) {
    for (key, attribute) in attributes {
        if attribute.authorized_values().is_some_and(<[String]>::is_empty) {
            collector.emit(
                Diagnostic::warning(format!(
                    "`AuthorizedValues` of `{owner_path}.Attributes.{key}` is empty"
                ))
                .with_code(ErrorCode::E200)
                .with_help("the attribute is treated as a plain attribute"),
            );
        }
    }
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a mapping",
    }
}
