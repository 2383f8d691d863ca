//! # polyrender - One render contract, three engines
//!
//! `polyrender` turns an [`Environment`] of named values and a
//! [`TemplateSpec`] into a single string. The spec selects one of three
//! engines:
//!
//! - **script**: a [rhai](https://rhai.rs) script; its final expression must be
//!   a string
//! - **template**: a [MiniJinja](https://docs.rs/minijinja) template, rendered
//!   and trimmed
//! - **expression**: a single MiniJinja expression, its result stringified
//!
//! ## Quick Start
//!
//! ```rust
//! use polyrender::{render, Environment, TemplateSpec};
//!
//! let env = Environment::new()
//!     .with("x", "hi")
//!     .with("a", 2)
//!     .with("b", 3)
//!     .with("name", "Ann");
//!
//! assert_eq!(render(&env, &TemplateSpec::script(r#"x + "!""#)).unwrap(), "hi!");
//! assert_eq!(render(&env, &TemplateSpec::template("Hello {{ name }}\n")).unwrap(), "Hello Ann");
//! assert_eq!(render(&env, &TemplateSpec::expression("a + b")).unwrap(), "5");
//! ```
//!
//! ## Engine Selection
//!
//! A spec should populate one body. If it populates several, the first
//! non-empty one in the order script → template → expression wins and a
//! warning is logged; set [`RenderOptions::strict_spec`] to reject such specs
//! instead. An empty spec renders to `""` without error.
//!
//! ## Type Coercion
//!
//! The script engine enforces a string result and fails with
//! [`RenderError::TypeContract`] otherwise. The expression engine converts
//! whatever it gets to the [`Value`] display form (`5`, `true`, `null`, JSON
//! for containers). The asymmetry is part of the contract.
//!
//! ## Environment Conversion
//!
//! | Engine | Sees | Function values |
//! |--------|------|-----------------|
//! | script | every entry bound as a global | binding error |
//! | template | the marshaled JSON-shaped tree | silently dropped |
//! | expression | a lazy view of the raw environment | callable |
//!
//! ## Limits
//!
//! By default nothing is bounded. [`RenderOptions::max_operations`] caps rhai
//! operations and MiniJinja fuel; [`RenderOptions::timeout_ms`] puts a
//! wall-clock deadline on scripts.
//!
//! ## Logging
//!
//! Engine selection, marshaling, and ambiguous specs are reported through
//! [`tracing`]. No subscriber is installed.

pub mod engine;
mod error;
pub mod functions;
mod options;
mod render;
mod spec;

pub use error::{RenderError, Result};
pub use functions::FunctionLibrary;
pub use options::{OptionsError, RenderOptions, UndefinedMode};
pub use render::{render, Renderer};
pub use spec::{EngineKind, TemplateSpec};

// Value model
pub use polyrender_value::{marshal, Environment, NativeFunction, StructuralTree, Value, ValueError};
