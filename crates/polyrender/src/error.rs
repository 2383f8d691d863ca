//! Error types for rendering.
//!
//! [`RenderError`] is the single error type returned by every engine. Engine
//! errors are carried as messages so the public API does not leak rhai or
//! minijinja types.

use polyrender_value::ValueError;
use thiserror::Error;

use crate::spec::EngineKind;

/// Error returned by a failed render.
///
/// A failed render never produces partial output alongside the error.
#[derive(Debug, Error)]
pub enum RenderError {
    /// An environment entry could not be bound into the script runtime.
    #[error("error setting {key}: {message}")]
    Binding { key: String, message: String },

    /// The engine failed while running the body.
    #[error("failed to run {engine}{}: {message}", origin_suffix(.origin))]
    Execution {
        engine: EngineKind,
        /// First line of the template body, when the engine reports one.
        origin: Option<String>,
        message: String,
    },

    /// A script produced something other than a string.
    #[error("failed to cast output to string; it is of type {type_name}")]
    TypeContract { type_name: String },

    /// The body failed to parse or compile.
    #[error("failed to compile {engine}{}: {message}", origin_suffix(.origin))]
    Compilation {
        engine: EngineKind,
        /// First line of the template body, when the engine reports one.
        origin: Option<String>,
        message: String,
    },

    /// The environment could not be marshaled to its structural form.
    #[error("failed to marshal environment: {0}")]
    Marshal(#[from] ValueError),

    /// More than one engine body was populated and strict mode is on.
    #[error("ambiguous template specification: {} are all populated", join_engines(.engines))]
    AmbiguousSpec { engines: Vec<EngineKind> },
}

impl RenderError {
    /// The engine that produced this error, if any.
    pub fn engine(&self) -> Option<EngineKind> {
        match self {
            RenderError::Binding { .. } | RenderError::TypeContract { .. } => {
                Some(EngineKind::Script)
            }
            RenderError::Execution { engine, .. } | RenderError::Compilation { engine, .. } => {
                Some(*engine)
            }
            RenderError::Marshal(_) => Some(EngineKind::Template),
            RenderError::AmbiguousSpec { .. } => None,
        }
    }

    pub(crate) fn execution(
        engine: EngineKind,
        origin: Option<&str>,
        message: impl ToString,
    ) -> Self {
        RenderError::Execution {
            engine,
            origin: origin.map(str::to_string),
            message: message.to_string(),
        }
    }

    pub(crate) fn compilation(
        engine: EngineKind,
        origin: Option<&str>,
        message: impl ToString,
    ) -> Self {
        RenderError::Compilation {
            engine,
            origin: origin.map(str::to_string),
            message: message.to_string(),
        }
    }
}

fn origin_suffix(origin: &Option<String>) -> String {
    match origin {
        Some(line) => format!(" `{}`", line),
        None => String::new(),
    }
}

fn join_engines(engines: &[EngineKind]) -> String {
    engines
        .iter()
        .map(EngineKind::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Result type for render operations.
pub type Result<T> = std::result::Result<T, RenderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn execution_display_includes_origin() {
        let err = RenderError::execution(
            EngineKind::Template,
            Some("Hello {{ name.first }}"),
            "undefined value",
        );
        assert_eq!(
            err.to_string(),
            "failed to run template `Hello {{ name.first }}`: undefined value"
        );
    }

    #[test]
    fn compilation_display_without_origin() {
        let err = RenderError::compilation(EngineKind::Expression, None, "unexpected end");
        assert_eq!(
            err.to_string(),
            "failed to compile expression: unexpected end"
        );
    }

    #[test]
    fn engine_is_reported_per_variant() {
        let binding = RenderError::Binding {
            key: "f".into(),
            message: "unsupported".into(),
        };
        assert_eq!(binding.engine(), Some(EngineKind::Script));

        let marshal = RenderError::from(ValueError::NotAMap { found: "int" });
        assert_eq!(marshal.engine(), Some(EngineKind::Template));

        let ambiguous = RenderError::AmbiguousSpec {
            engines: vec![EngineKind::Script, EngineKind::Template],
        };
        assert_eq!(ambiguous.engine(), None);
        assert_eq!(
            ambiguous.to_string(),
            "ambiguous template specification: script, template are all populated"
        );
    }
}
