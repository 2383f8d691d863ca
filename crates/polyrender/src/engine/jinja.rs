//! Bridges between polyrender values and MiniJinja.
//!
//! Both the template and the expression engine run on MiniJinja. They differ
//! in what they hand it: the template engine passes the marshaled structural
//! tree, the expression engine passes a [`MapView`] over the raw environment
//! so host functions stay callable.

use std::collections::BTreeMap;
use std::sync::Arc;

use minijinja::value::{Enumerator, Object, Rest, ValueKind};
use minijinja::{Environment as JinjaEnvironment, Error, ErrorKind, UndefinedBehavior};
use minijinja::Value as JinjaValue;
use polyrender_value::{Environment, NativeFunction, Value};

use crate::functions::FunctionLibrary;
use crate::options::RenderOptions;

/// Builds a fresh MiniJinja environment for a single render.
pub(crate) fn environment<'source>(
    options: &RenderOptions,
    functions: &FunctionLibrary,
    undefined: UndefinedBehavior,
) -> JinjaEnvironment<'source> {
    let mut env = JinjaEnvironment::new();
    env.set_undefined_behavior(undefined);
    if let Some(fuel) = options.max_operations.filter(|n| *n > 0) {
        env.set_fuel(Some(fuel));
    }
    install_functions(&mut env, functions);
    env
}

/// Registers every library function as both a global function and a filter.
pub(crate) fn install_functions(env: &mut JinjaEnvironment<'_>, functions: &FunctionLibrary) {
    for function in functions.iter() {
        let global = function.clone();
        env.add_function(function.name().to_string(), move |args: Rest<JinjaValue>| {
            call_native(&global, &args.0)
        });

        let filter = function.clone();
        env.add_filter(function.name().to_string(), move |args: Rest<JinjaValue>| {
            call_native(&filter, &args.0)
        });
    }
}

fn call_native(function: &NativeFunction, args: &[JinjaValue]) -> Result<JinjaValue, Error> {
    let args: Vec<Value> = args.iter().map(from_jinja).collect();
    function
        .call(&args)
        .map(|value| to_jinja(&value))
        .map_err(|message| {
            Error::new(
                ErrorKind::InvalidOperation,
                format!("{}: {}", function.name(), message),
            )
        })
}

/// Converts a polyrender value into a MiniJinja value.
///
/// Maps become lazy [`MapView`]s and functions become callables.
pub(crate) fn to_jinja(value: &Value) -> JinjaValue {
    match value {
        Value::Null => JinjaValue::from(()),
        Value::Bool(b) => JinjaValue::from(*b),
        Value::Int(i) => JinjaValue::from(*i),
        Value::Float(f) => JinjaValue::from(*f),
        Value::String(s) => JinjaValue::from(s.as_str()),
        Value::List(items) => JinjaValue::from(items.iter().map(to_jinja).collect::<Vec<_>>()),
        Value::Map(map) => JinjaValue::from_object(MapView::new(map.clone())),
        Value::Function(function) => {
            let function = function.clone();
            JinjaValue::from_function(move |args: Rest<JinjaValue>| call_native(&function, &args.0))
        }
    }
}

/// Converts a MiniJinja value back into a polyrender value.
pub(crate) fn from_jinja(value: &JinjaValue) -> Value {
    match value.kind() {
        ValueKind::Undefined | ValueKind::None => Value::Null,
        ValueKind::Bool => Value::Bool(value.is_true()),
        ValueKind::Number => match value.as_i64() {
            Some(i) => Value::Int(i),
            None => f64::try_from(value.clone())
                .map(Value::Float)
                .unwrap_or(Value::Null),
        },
        ValueKind::String => Value::from(value.as_str().unwrap_or_default()),
        ValueKind::Seq => match value.try_iter() {
            Ok(items) => Value::List(items.map(|item| from_jinja(&item)).collect()),
            Err(_) => Value::List(Vec::new()),
        },
        ValueKind::Map => {
            let mut map = BTreeMap::new();
            if let Ok(keys) = value.try_iter() {
                for key in keys {
                    let item = value.get_item(&key).unwrap_or(JinjaValue::UNDEFINED);
                    map.insert(key.to_string(), from_jinja(&item));
                }
            }
            Value::Map(map)
        }
        _ => Value::from(value.to_string()),
    }
}

/// A read-only MiniJinja object over a map of polyrender values.
///
/// Entries are converted on lookup, so only the values an expression touches
/// are ever converted.
#[derive(Debug)]
pub(crate) struct MapView {
    entries: BTreeMap<String, Value>,
}

impl MapView {
    pub(crate) fn new(entries: BTreeMap<String, Value>) -> Self {
        Self { entries }
    }

    pub(crate) fn of(env: &Environment) -> JinjaValue {
        JinjaValue::from_object(Self::new(env.as_map().clone()))
    }
}

impl Object for MapView {
    fn get_value(self: &Arc<Self>, key: &JinjaValue) -> Option<JinjaValue> {
        self.entries.get(key.as_str()?).map(to_jinja)
    }

    fn enumerate(self: &Arc<Self>) -> Enumerator {
        Enumerator::Values(
            self.entries
                .keys()
                .map(|k| JinjaValue::from(k.as_str()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalars_round_trip() {
        for value in [
            Value::Null,
            Value::Bool(true),
            Value::Int(-3),
            Value::Float(2.5),
            Value::from("text"),
        ] {
            assert_eq!(from_jinja(&to_jinja(&value)), value);
        }
    }

    #[test]
    fn containers_round_trip() {
        let value = Value::Map(BTreeMap::from([
            ("list".to_string(), Value::from(vec![1, 2])),
            ("name".to_string(), Value::from("x")),
        ]));
        assert_eq!(from_jinja(&to_jinja(&value)), value);
    }

    #[test]
    fn map_view_exposes_entries_lazily() {
        let env = Environment::new().with("a", 1).with("b", "two");
        let view = MapView::of(&env);

        assert_eq!(view.get_attr("a").unwrap(), JinjaValue::from(1));
        assert_eq!(view.get_attr("b").unwrap().as_str(), Some("two"));
        assert!(view.get_attr("c").unwrap().is_undefined());
        assert_eq!(view.len(), Some(2));
    }

    #[test]
    fn functions_become_callable() {
        let double = Value::function("double", |args| match args {
            [Value::Int(n)] => Ok(Value::Int(n * 2)),
            _ => Err("expected one integer".to_string()),
        });

        let env = JinjaEnvironment::new();
        let expr = env.compile_expression("double(21)").unwrap();
        let ctx = JinjaValue::from_object(MapView::new(BTreeMap::from([(
            "double".to_string(),
            double,
        )])));
        assert_eq!(expr.eval(ctx).unwrap(), JinjaValue::from(42));
    }

    #[test]
    fn function_errors_name_the_function() {
        let lib = FunctionLibrary::new().with(NativeFunction::new("boom", |_| {
            Err("nope".to_string())
        }));
        let env = environment(&RenderOptions::default(), &lib, UndefinedBehavior::Strict);

        let err = env.render_str("{{ boom() }}", ()).unwrap_err();
        assert!(err.to_string().contains("boom: nope"));
    }
}
