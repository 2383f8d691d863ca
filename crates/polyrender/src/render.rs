//! The render entry point.

use polyrender_value::Environment;
use tracing::{debug, warn};

use crate::engine::{ExpressionEngine, RenderEngine, ScriptEngine, TemplateEngine};
use crate::error::{RenderError, Result};
use crate::functions::FunctionLibrary;
use crate::options::RenderOptions;
use crate::spec::{EngineKind, TemplateSpec};

/// Routes a [`TemplateSpec`] to the engine it selects.
///
/// A `Renderer` holds configuration only: options and the function library.
/// It keeps no state between calls and can be shared across threads; every
/// call builds its own engine instances.
///
/// # Example
///
/// ```rust
/// use polyrender::{Environment, Renderer, RenderOptions, TemplateSpec};
///
/// let renderer = Renderer::new(RenderOptions::default());
/// let env = Environment::new().with("a", 2).with("b", 3);
///
/// assert_eq!(renderer.render(&env, &TemplateSpec::expression("a + b")).unwrap(), "5");
/// assert_eq!(renderer.render(&env, &TemplateSpec::default()).unwrap(), "");
/// ```
#[derive(Debug, Clone)]
pub struct Renderer {
    options: RenderOptions,
    functions: FunctionLibrary,
}

impl Renderer {
    /// Creates a renderer with the standard function library.
    pub fn new(options: RenderOptions) -> Self {
        Self {
            options,
            functions: FunctionLibrary::standard(),
        }
    }

    /// Replaces the function library.
    pub fn with_functions(mut self, functions: FunctionLibrary) -> Self {
        self.functions = functions;
        self
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    pub fn functions(&self) -> &FunctionLibrary {
        &self.functions
    }

    /// Renders `spec` against `environment`.
    ///
    /// The first non-empty body in the order script → template → expression
    /// selects the engine. An empty spec renders to `""`. The engine's error is
    /// returned as is: there is no fallback to another engine and no retry.
    pub fn render(&self, environment: &Environment, spec: &TemplateSpec) -> Result<String> {
        if spec.is_ambiguous() {
            let engines = spec.populated();
            if self.options.strict_spec {
                return Err(RenderError::AmbiguousSpec { engines });
            }
            warn!(
                ?engines,
                "template specification populates more than one engine; using the first"
            );
        }

        let Some((kind, body)) = spec.selected() else {
            debug!("empty template specification");
            return Ok(String::new());
        };

        let engine = self.engine(kind);
        debug!(engine = %engine.kind(), entries = environment.len(), "rendering");
        engine.render(environment, body)
    }

    fn engine(&self, kind: EngineKind) -> Box<dyn RenderEngine + '_> {
        match kind {
            EngineKind::Script => Box::new(ScriptEngine::new(&self.options)),
            EngineKind::Template => Box::new(TemplateEngine::new(&self.options, &self.functions)),
            EngineKind::Expression => {
                Box::new(ExpressionEngine::new(&self.options, &self.functions))
            }
        }
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(RenderOptions::default())
    }
}

/// Renders `spec` against `environment` with default options and the standard
/// function library.
///
/// ```rust
/// use polyrender::{render, Environment, TemplateSpec};
///
/// let env = Environment::new().with("name", "Ann");
/// let out = render(&env, &TemplateSpec::template("  Hello {{ name }}  \n")).unwrap();
/// assert_eq!(out, "Hello Ann");
/// ```
pub fn render(environment: &Environment, spec: &TemplateSpec) -> Result<String> {
    Renderer::default().render(environment, spec)
}
