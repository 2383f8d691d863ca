//! Engine adapters.
//!
//! Each adapter turns an [`Environment`] and a body into a string through one
//! engine. The [`Renderer`](crate::Renderer) picks exactly one per call.
//!
//! | Adapter | Engine | Environment conversion | Result coercion |
//! |---------|--------|------------------------|-----------------|
//! | [`ScriptEngine`] | rhai | direct binding into a scope | must be a string |
//! | [`TemplateEngine`] | MiniJinja | structural marshal | rendered text, trimmed |
//! | [`ExpressionEngine`] | MiniJinja expressions | lazy object view | display form |
//!
//! Adapters hold only borrowed configuration. Every engine instance they need
//! is built inside [`RenderEngine::render`] and dropped before it returns.

mod expression;
mod jinja;
mod script;
mod template;

pub use expression::ExpressionEngine;
pub use script::ScriptEngine;
pub use template::TemplateEngine;

use polyrender_value::Environment;

use crate::error::Result;
use crate::spec::EngineKind;

/// An engine that renders a body against an environment.
pub trait RenderEngine {
    /// Which engine this is.
    fn kind(&self) -> EngineKind;

    /// Renders `body` against `environment`.
    ///
    /// On error, no output is produced.
    fn render(&self, environment: &Environment, body: &str) -> Result<String>;
}

/// First line of a body, used as diagnostic context in errors.
pub(crate) fn first_line(body: &str) -> &str {
    body.split('\n').next().unwrap_or_default().trim_end_matches('\r')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_line_of_multiline_body() {
        assert_eq!(first_line("one\ntwo"), "one");
        assert_eq!(first_line("one\r\ntwo"), "one");
        assert_eq!(first_line(""), "");
    }
}
