//! # polyrender-value - Dynamic values for multi-engine rendering
//!
//! This crate holds the data side of `polyrender`: the [`Value`] tagged union,
//! host [`NativeFunction`]s, the caller-owned [`Environment`], and the
//! structural marshaler used by engines that only understand JSON-shaped
//! trees.
//!
//! ## Conversions
//!
//! Each engine converts out of [`Value`] in its own way:
//!
//! | Engine      | Conversion                                   |
//! |-------------|----------------------------------------------|
//! | script      | direct binding, functions are refused        |
//! | template    | [`marshal::to_structural`], functions dropped |
//! | expression  | lazy view, functions callable                |
//!
//! Only the structural one lives here; the others belong to the engine
//! adapters in `polyrender`.
//!
//! ## Example
//!
//! ```rust
//! use polyrender_value::{marshal, Environment, Value};
//!
//! let env = Environment::new()
//!     .with("name", "Ann")
//!     .with("shout", Value::function("shout", |args| {
//!         Ok(Value::from(args[0].to_string().to_uppercase()))
//!     }));
//!
//! let tree = marshal::to_structural(&env).unwrap();
//! assert_eq!(tree.len(), 1);
//! assert_eq!(tree["name"], "Ann");
//! ```

mod environment;
mod error;
mod function;
pub mod marshal;
mod value;

pub use environment::Environment;
pub use error::{Result, ValueError};
pub use function::{NativeFn, NativeFunction};
pub use marshal::StructuralTree;
pub use value::Value;
