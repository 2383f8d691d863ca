//! Text template engine (MiniJinja).

use polyrender_value::{marshal, Environment};
use tracing::debug;

use super::{first_line, jinja, RenderEngine};
use crate::error::{RenderError, Result};
use crate::functions::FunctionLibrary;
use crate::options::RenderOptions;
use crate::spec::EngineKind;

/// Renders Jinja2-syntax templates against the structural environment tree.
///
/// The pipeline is compile → marshal → render → trim. Compilation comes first,
/// so a malformed template is reported before the environment is touched.
/// Function values do not survive marshaling: a template can not see them,
/// and calling one fails at render time.
///
/// # Example
///
/// ```rust
/// use polyrender::engine::{RenderEngine, TemplateEngine};
/// use polyrender::{Environment, FunctionLibrary, RenderOptions};
///
/// let options = RenderOptions::default();
/// let functions = FunctionLibrary::standard();
/// let engine = TemplateEngine::new(&options, &functions);
///
/// let env = Environment::new().with("name", "Ann");
/// let out = engine.render(&env, "\n  Hello {{ name }}!\n").unwrap();
/// assert_eq!(out, "Hello Ann!");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TemplateEngine<'a> {
    options: &'a RenderOptions,
    functions: &'a FunctionLibrary,
}

impl<'a> TemplateEngine<'a> {
    pub fn new(options: &'a RenderOptions, functions: &'a FunctionLibrary) -> Self {
        Self { options, functions }
    }
}

impl RenderEngine for TemplateEngine<'_> {
    fn kind(&self) -> EngineKind {
        EngineKind::Template
    }

    fn render(&self, environment: &Environment, body: &str) -> Result<String> {
        let origin = first_line(body);
        let env = jinja::environment(self.options, self.functions, self.options.undefined.into());

        let template = env
            .template_from_str(body)
            .map_err(|err| RenderError::compilation(EngineKind::Template, Some(origin), err))?;

        let tree = marshal::to_structural(environment)?;

        let rendered = template
            .render(&tree)
            .map_err(|err| RenderError::execution(EngineKind::Template, Some(origin), err))?;

        debug!(bytes = rendered.len(), "rendered template");
        Ok(rendered.trim().to_string())
    }
}
