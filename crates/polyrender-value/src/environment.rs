//! The caller-owned set of named values handed to an engine.

use std::collections::btree_map;
use std::collections::BTreeMap;

use serde::ser::{Serialize, Serializer};

use crate::error::{Result, ValueError};
use crate::Value;

/// Named values available to a template, script or expression.
///
/// Entries are kept ordered by name so every engine sees them in the same,
/// deterministic order. An `Environment` is read-only from the engines' point
/// of view; each render converts it afresh.
///
/// # Example
///
/// ```rust
/// use polyrender_value::{Environment, Value};
///
/// let env = Environment::new()
///     .with("name", "Ann")
///     .with("count", 3);
///
/// assert_eq!(env.get("name"), Some(&Value::from("Ann")));
/// assert_eq!(env.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Environment {
    entries: BTreeMap<String, Value>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an environment from any serializable map or struct.
    ///
    /// Fails if the serialized form is not a map.
    ///
    /// ```rust
    /// use polyrender_value::Environment;
    /// use serde::Serialize;
    ///
    /// #[derive(Serialize)]
    /// struct Resource { name: String, replicas: u32 }
    ///
    /// let env = Environment::from_serialize(&Resource {
    ///     name: "web".into(),
    ///     replicas: 3,
    /// }).unwrap();
    /// assert_eq!(env.get("replicas").and_then(|v| v.as_i64()), Some(3));
    /// ```
    pub fn from_serialize<T: Serialize + ?Sized>(data: &T) -> Result<Self> {
        match Value::from_serialize(data)? {
            Value::Map(entries) => Ok(Self { entries }),
            other => Err(ValueError::NotAMap {
                found: other.type_name(),
            }),
        }
    }

    /// Inserts a value, returning the previous value under that name.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.entries.insert(name.into(), value.into())
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(|k| k.as_str())
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, Value> {
        self.entries.iter()
    }

    pub fn as_map(&self) -> &BTreeMap<String, Value> {
        &self.entries
    }

    pub fn into_map(self) -> BTreeMap<String, Value> {
        self.entries
    }
}

impl From<BTreeMap<String, Value>> for Environment {
    fn from(entries: BTreeMap<String, Value>) -> Self {
        Self { entries }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Environment {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Environment {
    type Item = (&'a String, &'a Value);
    type IntoIter = btree_map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl IntoIterator for Environment {
    type Item = (String, Value);
    type IntoIter = btree_map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

// Serializes exactly like a `Value::Map` with the same entries.
impl Serialize for Environment {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let fields: Vec<_> = self.entries.iter().filter(|(_, v)| !v.is_function()).collect();
        let mut out = serializer.serialize_map(Some(fields.len()))?;
        for (key, value) in fields {
            out.serialize_entry(key, value)?;
        }
        out.end()
    }
}
