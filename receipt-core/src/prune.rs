//! Recursive removal of empty values from a JSON tree.

use serde_json::Value;

/// True for `null`, `{}` and `[]`. Scalars such as `0`, `false` and `""`
/// are never empty.
pub fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

/// Remove empty values from objects and arrays, children first, so that a
/// container emptied by pruning is itself removed from its parent.
///
/// Key order and element order are preserved. The root is returned as-is
/// when it ends up empty.
pub fn prune(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, child)| (key, prune(child)))
                .filter(|(_, child)| !is_empty(child))
                .collect(),
        ),
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(prune)
                .filter(|child| !is_empty(child))
                .collect(),
        ),
        scalar => scalar,
    }
}
