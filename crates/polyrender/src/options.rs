//! Render options.
//!
//! [`RenderOptions`] tunes how a [`Renderer`](crate::Renderer) drives its
//! engines. Every field defaults to the permissive behavior: ambiguous specs
//! are accepted, undefined template variables render empty, and nothing is
//! bounded.
//!
//! Options can be built in code or loaded from YAML (JSON is valid YAML):
//!
//! ```yaml
//! strict_spec: true
//! undefined: strict
//! max_operations: 100000
//! timeout_ms: 250
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How the template engine treats undefined variables.
///
/// The expression engine always runs strict.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UndefinedMode {
    /// Undefined values render as empty; attribute access on them fails.
    #[default]
    Lenient,
    /// Undefined values render as empty and attribute access chains.
    Chainable,
    /// Any use of an undefined value fails.
    Strict,
}

impl From<UndefinedMode> for minijinja::UndefinedBehavior {
    fn from(mode: UndefinedMode) -> Self {
        match mode {
            UndefinedMode::Lenient => minijinja::UndefinedBehavior::Lenient,
            UndefinedMode::Chainable => minijinja::UndefinedBehavior::Chainable,
            UndefinedMode::Strict => minijinja::UndefinedBehavior::Strict,
        }
    }
}

/// Options shared by every render call of a [`Renderer`](crate::Renderer).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderOptions {
    /// Reject specs with more than one populated body instead of applying
    /// precedence.
    pub strict_spec: bool,

    /// Undefined-variable behavior of the template engine.
    pub undefined: UndefinedMode,

    /// Upper bound on engine operations: rhai operations for scripts, minijinja
    /// fuel for templates and expressions. `None` and `Some(0)` are unbounded.
    pub max_operations: Option<u64>,

    /// Wall-clock budget for scripts, in milliseconds. `None` is unbounded.
    pub timeout_ms: Option<u64>,
}

impl RenderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses options from YAML. Empty input yields the defaults.
    pub fn from_yaml(yaml: &str) -> Result<Self, OptionsError> {
        parse(yaml, None)
    }

    /// Loads options from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, OptionsError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| OptionsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        parse(&content, Some(path))
    }

    pub fn strict_spec(mut self, strict: bool) -> Self {
        self.strict_spec = strict;
        self
    }

    pub fn undefined(mut self, mode: UndefinedMode) -> Self {
        self.undefined = mode;
        self
    }

    pub fn max_operations(mut self, limit: u64) -> Self {
        self.max_operations = Some(limit);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout_ms = Some(timeout.as_millis().try_into().unwrap_or(u64::MAX));
        self
    }

    /// The script timeout as a [`Duration`].
    pub fn timeout_duration(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }
}

fn parse(content: &str, path: Option<&Path>) -> Result<RenderOptions, OptionsError> {
    if content.trim().is_empty() {
        return Ok(RenderOptions::default());
    }
    serde_yaml::from_str(content).map_err(|err| OptionsError::Parse {
        path: path.map(Path::to_path_buf),
        message: err.to_string(),
    })
}

/// Error loading [`RenderOptions`].
#[derive(Debug, Error)]
pub enum OptionsError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid render options{}: {message}", path_suffix(.path))]
    Parse {
        path: Option<PathBuf>,
        message: String,
    },
}

fn path_suffix(path: &Option<PathBuf>) -> String {
    match path {
        Some(p) => format!(" in {}", p.display()),
        None => String::new(),
    }
}
