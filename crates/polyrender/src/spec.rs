//! Template specifications and engine selection.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The three engines behind the render contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineKind {
    /// Sandboxed script execution (rhai).
    Script,
    /// Text-substitution templating (minijinja).
    Template,
    /// Single-expression evaluation (minijinja expressions).
    Expression,
}

impl EngineKind {
    /// All engines, in selection precedence order.
    pub const ALL: [EngineKind; 3] = [
        EngineKind::Script,
        EngineKind::Template,
        EngineKind::Expression,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EngineKind::Script => "script",
            EngineKind::Template => "template",
            EngineKind::Expression => "expression",
        }
    }
}

impl fmt::Display for EngineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which engine to run, and the body it runs.
///
/// At most one field is expected to be non-empty. When several are, the first
/// non-empty one in the order script → template → expression wins and the rest
/// are ignored. An all-empty spec renders to an empty string.
///
/// # Example
///
/// ```rust
/// use polyrender::{EngineKind, TemplateSpec};
///
/// let spec: TemplateSpec = serde_yaml::from_str("expr: a + b").unwrap();
/// assert_eq!(spec.selected(), Some((EngineKind::Expression, "a + b")));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateSpec {
    #[serde(alias = "javascript", skip_serializing_if = "String::is_empty")]
    pub script: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub template: String,

    #[serde(rename = "expr", alias = "expression", skip_serializing_if = "String::is_empty")]
    pub expression: String,
}

impl TemplateSpec {
    pub fn script(body: impl Into<String>) -> Self {
        Self {
            script: body.into(),
            ..Self::default()
        }
    }

    pub fn template(body: impl Into<String>) -> Self {
        Self {
            template: body.into(),
            ..Self::default()
        }
    }

    pub fn expression(body: impl Into<String>) -> Self {
        Self {
            expression: body.into(),
            ..Self::default()
        }
    }

    /// Body of the given engine; empty if unset.
    pub fn body(&self, kind: EngineKind) -> &str {
        match kind {
            EngineKind::Script => &self.script,
            EngineKind::Template => &self.template,
            EngineKind::Expression => &self.expression,
        }
    }

    /// Engines with a non-empty body, in precedence order.
    pub fn populated(&self) -> Vec<EngineKind> {
        EngineKind::ALL
            .into_iter()
            .filter(|kind| !self.body(*kind).is_empty())
            .collect()
    }

    /// The engine that will run and its body, or `None` for an empty spec.
    pub fn selected(&self) -> Option<(EngineKind, &str)> {
        EngineKind::ALL
            .into_iter()
            .map(|kind| (kind, self.body(kind)))
            .find(|(_, body)| !body.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.selected().is_none()
    }

    pub fn is_ambiguous(&self) -> bool {
        self.populated().len() > 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_spec_selects_nothing() {
        let spec = TemplateSpec::default();
        assert!(spec.is_empty());
        assert_eq!(spec.selected(), None);
        assert!(spec.populated().is_empty());
    }

    #[test]
    fn script_beats_template_beats_expression() {
        let all = TemplateSpec {
            script: "s".into(),
            template: "t".into(),
            expression: "e".into(),
        };
        assert_eq!(all.selected(), Some((EngineKind::Script, "s")));
        assert!(all.is_ambiguous());

        let two = TemplateSpec {
            template: "t".into(),
            expression: "e".into(),
            ..TemplateSpec::default()
        };
        assert_eq!(two.selected(), Some((EngineKind::Template, "t")));
        assert_eq!(
            two.populated(),
            vec![EngineKind::Template, EngineKind::Expression]
        );
    }

    #[test]
    fn deserialize_accepts_aliases() {
        let spec: TemplateSpec = serde_json::from_str(r#"{"javascript": "x"}"#).unwrap();
        assert_eq!(spec, TemplateSpec::script("x"));

        let spec: TemplateSpec = serde_json::from_str(r#"{"expression": "1 + 1"}"#).unwrap();
        assert_eq!(spec, TemplateSpec::expression("1 + 1"));
    }

    #[test]
    fn serialize_omits_empty_bodies() {
        let json = serde_json::to_string(&TemplateSpec::expression("a")).unwrap();
        assert_eq!(json, r#"{"expr":"a"}"#);
    }

    #[test]
    fn engine_kind_display() {
        assert_eq!(EngineKind::Script.to_string(), "script");
        assert_eq!(EngineKind::Expression.to_string(), "expression");
    }
}
