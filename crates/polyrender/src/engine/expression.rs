//! Expression engine (MiniJinja expressions).

use minijinja::UndefinedBehavior;
use polyrender_value::Environment;

use super::{jinja, RenderEngine};
use crate::error::{RenderError, Result};
use crate::functions::FunctionLibrary;
use crate::options::RenderOptions;
use crate::spec::EngineKind;

/// Evaluates a single expression and stringifies the result.
///
/// Unlike the template engine, expressions see the raw environment through a
/// lazy view: nothing is marshaled, and function values are callable. Unknown
/// names are always an error.
///
/// The result is converted back into a [`Value`](polyrender_value::Value) and
/// printed with its display form, whatever its type: `5`, `4` for an integral
/// float, `true`, `null`, the string itself, or JSON for lists and maps.
///
/// # Example
///
/// ```rust
/// use polyrender::engine::{ExpressionEngine, RenderEngine};
/// use polyrender::{Environment, FunctionLibrary, RenderOptions};
///
/// let options = RenderOptions::default();
/// let functions = FunctionLibrary::standard();
/// let engine = ExpressionEngine::new(&options, &functions);
///
/// let env = Environment::new().with("a", 2).with("b", 3);
/// assert_eq!(engine.render(&env, "a + b").unwrap(), "5");
/// assert_eq!(engine.render(&env, "a > b").unwrap(), "false");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ExpressionEngine<'a> {
    options: &'a RenderOptions,
    functions: &'a FunctionLibrary,
}

impl<'a> ExpressionEngine<'a> {
    pub fn new(options: &'a RenderOptions, functions: &'a FunctionLibrary) -> Self {
        Self { options, functions }
    }
}

impl RenderEngine for ExpressionEngine<'_> {
    fn kind(&self) -> EngineKind {
        EngineKind::Expression
    }

    fn render(&self, environment: &Environment, body: &str) -> Result<String> {
        let env = jinja::environment(self.options, self.functions, UndefinedBehavior::Strict);

        let expr = env
            .compile_expression(body)
            .map_err(|err| RenderError::compilation(EngineKind::Expression, None, err))?;

        let value = expr
            .eval(jinja::MapView::of(environment))
            .map_err(|err| RenderError::execution(EngineKind::Expression, None, err))?;

        Ok(jinja::from_jinja(&value).to_string())
    }
}
