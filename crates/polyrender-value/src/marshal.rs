//! Structural marshaling of an [`Environment`].
//!
//! Some engines cannot walk arbitrary values; they need a plain JSON-shaped
//! tree. [`to_structural`] produces that tree by serializing every entry and
//! re-materializing the result as a string-keyed map.
//!
//! The conversion is lossy:
//!
//! - entries holding a function are dropped without error
//! - functions nested inside maps are dropped, inside lists they become `null`
//!
//! A value that cannot be serialized at all (a NaN or infinite float) fails
//! the whole marshal with [`ValueError::Marshal`] naming the top-level entry.

use serde_json::{Map, Value as JsonValue};
use tracing::{debug, trace};

use crate::error::{Result, ValueError};
use crate::Environment;

/// The JSON-shaped view of an environment.
pub type StructuralTree = Map<String, JsonValue>;

/// Serializes an environment into its structural intermediate.
pub fn to_structural(env: &Environment) -> Result<StructuralTree> {
    let mut tree = Map::new();
    let mut dropped = 0usize;

    for (key, value) in env {
        if value.is_function() {
            trace!(key = key.as_str(), "dropping function from structural view");
            dropped += 1;
            continue;
        }
        let node = serde_json::to_value(value).map_err(|err| ValueError::Marshal {
            key: key.clone(),
            message: err.to_string(),
        })?;
        tree.insert(key.clone(), node);
    }

    debug!(entries = tree.len(), dropped, "marshaled environment");
    Ok(tree)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Value;
    use serde_json::json;
    use std::collections::BTreeMap;

    #[test]
    fn plain_entries_round_trip_structurally() {
        let env = Environment::new()
            .with("name", "Ann")
            .with("n", 3)
            .with("tags", vec!["a", "b"]);

        let tree = to_structural(&env).unwrap();
        assert_eq!(
            JsonValue::Object(tree),
            json!({"name": "Ann", "n": 3, "tags": ["a", "b"]})
        );
    }

    #[test]
    fn functions_are_dropped_silently() {
        let nested = BTreeMap::from([
            ("keep".to_string(), Value::from(true)),
            ("call".to_string(), Value::function("call", |_| Ok(Value::Null))),
        ]);
        let env = Environment::new()
            .with("probe", Value::function("probe", |_| Ok(Value::Null)))
            .with("nested", Value::Map(nested));

        let tree = to_structural(&env).unwrap();
        assert!(!tree.contains_key("probe"));
        assert_eq!(tree["nested"], json!({"keep": true}));
    }

    #[test]
    fn non_finite_float_names_the_entry() {
        let env = Environment::new()
            .with("ok", 1)
            .with("ratio", f64::INFINITY);

        match to_structural(&env) {
            Err(ValueError::Marshal { key, message }) => {
                assert_eq!(key, "ratio");
                assert!(message.contains("unsupported float value"));
            }
            other => panic!("expected marshal error, got {:?}", other),
        }
    }

    #[test]
    fn empty_environment_is_an_empty_tree() {
        assert!(to_structural(&Environment::new()).unwrap().is_empty());
    }
}
