//! Script engine (rhai).

use std::time::Instant;

use polyrender_value::{Environment, Value};
use rhai::{Dynamic, Scope};
use tracing::trace;

use super::RenderEngine;
use crate::error::{RenderError, Result};
use crate::options::RenderOptions;
use crate::spec::EngineKind;

/// Runs a script with every environment entry bound as a global.
///
/// Each call owns a fresh `rhai::Engine` and `Scope`; nothing is shared or
/// reused between calls. The script's final expression is its result and must
/// be a string. Any other type is a [`RenderError::TypeContract`] error,
/// never an implicit conversion.
///
/// Function values cannot be bound; a single one aborts the call with
/// [`RenderError::Binding`] before the script runs.
///
/// # Example
///
/// ```rust
/// use polyrender::engine::{RenderEngine, ScriptEngine};
/// use polyrender::{Environment, RenderOptions};
///
/// let options = RenderOptions::default();
/// let env = Environment::new().with("x", "hi");
///
/// let out = ScriptEngine::new(&options).render(&env, r#"x + "!""#).unwrap();
/// assert_eq!(out, "hi!");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ScriptEngine<'a> {
    options: &'a RenderOptions,
}

impl<'a> ScriptEngine<'a> {
    pub fn new(options: &'a RenderOptions) -> Self {
        Self { options }
    }

    fn runtime(&self) -> rhai::Engine {
        let mut engine = rhai::Engine::new();
        if let Some(limit) = self.options.max_operations {
            engine.set_max_operations(limit);
        }
        if let Some(timeout) = self.options.timeout_duration() {
            let deadline = Instant::now() + timeout;
            engine.on_progress(move |_| (Instant::now() >= deadline).then_some(Dynamic::UNIT));
        }
        engine
    }
}

impl RenderEngine for ScriptEngine<'_> {
    fn kind(&self) -> EngineKind {
        EngineKind::Script
    }

    fn render(&self, environment: &Environment, body: &str) -> Result<String> {
        let engine = self.runtime();
        let mut scope = Scope::new();

        for (key, value) in environment {
            let bound = to_dynamic(value).map_err(|message| RenderError::Binding {
                key: key.clone(),
                message,
            })?;
            trace!(key = key.as_str(), kind = value.type_name(), "bound script global");
            scope.push_dynamic(key.as_str(), bound);
        }

        let output = engine
            .eval_with_scope::<Dynamic>(&mut scope, body)
            .map_err(|err| RenderError::execution(EngineKind::Script, None, err))?;

        output
            .into_string()
            .map_err(|type_name| RenderError::TypeContract {
                type_name: type_name.to_string(),
            })
    }
}

/// Converts a value into its script representation.
fn to_dynamic(value: &Value) -> std::result::Result<Dynamic, String> {
    Ok(match value {
        Value::Null => Dynamic::UNIT,
        Value::Bool(b) => Dynamic::from_bool(*b),
        Value::Int(i) => Dynamic::from_int(*i),
        Value::Float(f) => Dynamic::from_float(*f),
        Value::String(s) => Dynamic::from(s.clone()),
        Value::List(items) => Dynamic::from_array(
            items
                .iter()
                .map(to_dynamic)
                .collect::<std::result::Result<rhai::Array, _>>()?,
        ),
        Value::Map(entries) => {
            let mut map = rhai::Map::new();
            for (key, value) in entries {
                map.insert(key.as_str().into(), to_dynamic(value)?);
            }
            Dynamic::from_map(map)
        }
        Value::Function(function) => {
            return Err(format!(
                "function `{}` has no script representation",
                function.name()
            ))
        }
    })
}
