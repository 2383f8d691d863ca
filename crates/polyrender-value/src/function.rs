//! Host functions carried inside the value model.

use std::fmt;
use std::sync::Arc;

use crate::Value;

/// Signature shared by every host function.
///
/// Arguments arrive in call order. A failure is reported as a plain message;
/// each engine wraps it in its own error type.
pub type NativeFn = dyn Fn(&[Value]) -> Result<Value, String> + Send + Sync;

/// A named host callable.
///
/// Functions are the one [`Value`] shape with no structural form: they are
/// dropped by the marshaler, refused by the script binder, and callable from
/// expressions and templates. Cloning is cheap.
///
/// # Example
///
/// ```rust
/// use polyrender_value::{NativeFunction, Value};
///
/// let double = NativeFunction::new("double", |args| match args {
///     [Value::Int(n)] => Ok(Value::Int(n * 2)),
///     _ => Err("expected one integer".to_string()),
/// });
///
/// assert_eq!(double.call(&[Value::Int(21)]), Ok(Value::Int(42)));
/// ```
#[derive(Clone)]
pub struct NativeFunction {
    name: Arc<str>,
    func: Arc<NativeFn>,
}

impl NativeFunction {
    pub fn new<F>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value, String> + Send + Sync + 'static,
    {
        Self {
            name: Arc::from(name.into()),
            func: Arc::new(func),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn call(&self, args: &[Value]) -> Result<Value, String> {
        (self.func)(args)
    }
}

impl fmt::Debug for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeFunction")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

// Identity, not behavior: two functions are equal only if they share the callable.
impl PartialEq for NativeFunction {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.func, &other.func)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn call_passes_arguments_through() {
        let join = NativeFunction::new("join", |args| {
            let parts: Vec<_> = args.iter().filter_map(Value::as_str).collect();
            Ok(Value::from(parts.join("-")))
        });

        let out = join.call(&["a".into(), "b".into()]).unwrap();
        assert_eq!(out, Value::from("a-b"));
        assert_eq!(join.name(), "join");
    }

    #[test]
    fn equality_is_identity() {
        let a = NativeFunction::new("f", |_| Ok(Value::Null));
        let b = NativeFunction::new("f", |_| Ok(Value::Null));

        assert_eq!(a, a.clone());
        assert_ne!(a, b);
    }

    #[test]
    fn debug_shows_name_only() {
        let f = NativeFunction::new("probe", |_| Ok(Value::Null));
        assert!(format!("{:?}", f).contains("probe"));
    }
}
