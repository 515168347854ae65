//! Property tests for locating the model block at arbitrary depth.

use proptest::prelude::*;
use serde_json::{Map, Value, json};

use umlsheet_parser::{locate::locate, parse};

fn block() -> Value {
    json!({
        "Types": {
            "Car": { "Parent": "Vehicle", "Attributes": { "wheels": { "Type": "int" } } }
        },
        "Interfaces": {
            "IDrivable": { "ScopeTypes": ["Car"] }
        }
    })
}

/// Wraps `inner` in one mapping per entry of `path`, adding non-qualifying
/// siblings before the wrapped value at every level.
fn wrap(inner: Value, path: &[(String, Vec<(String, i64)>)]) -> Value {
    path.iter().rev().fold(inner, |acc, (key, siblings)| {
        let mut map = Map::new();
        for (name, value) in siblings {
            map.insert(format!("sibling_{name}"), json!({ "value": value, "list": [value] }));
        }
        map.insert(format!("wrap_{key}"), acc);
        Value::Object(map)
    })
}

fn path_strategy() -> impl Strategy<Value = Vec<(String, Vec<(String, i64)>)>> {
    prop::collection::vec(
        (
            "[a-z]{1,6}",
            prop::collection::vec(("[a-z]{1,6}", any::<i64>()), 0..3),
        ),
        0..8,
    )
}

proptest! {
    #[test]
    fn block_found_at_any_depth(path in path_strategy()) {
        let expected = block();
        let document = wrap(block(), &path);
        let located = locate(&document);

        prop_assert_eq!(located.types(), expected.get("Types"));
        prop_assert_eq!(located.interfaces(), expected.get("Interfaces"));
    }

    #[test]
    fn tables_independent_of_depth(path in path_strategy()) {
        let direct = parse(&block().to_string()).unwrap();
        let nested = parse(&wrap(block(), &path).to_string()).unwrap();

        prop_assert_eq!(direct, nested);
    }
}
