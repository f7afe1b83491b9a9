//! # optval - Options Validator
//!
//! Declarative validation for nested configuration objects. A template
//! describes the expected keys, their types and optional constraints; the
//! options are checked against it recursively and the first violation is
//! returned as a descriptive error.
//!
//! ## Features
//!
//! - **Type Checks**: `string`, `number`, `boolean`, `object`, `list`,
//!   plus `file-path` and `folder-path` shape checks
//! - **Constraints**: required keys, inclusive value and length bounds,
//!   accepted/rejected value sets, regex formats, list element types
//! - **Nested Templates**: `object` entries carry their own template, to any depth
//! - **Pass-through**: validated options are handed back untouched, never copied
//! - **Formats**: templates decode from JSON, TOML (`toml` feature) or YAML
//!   (`yaml` feature)
//!
//! ## Quick Start
//!
//! ```rust
//! use optval::{Template, ValidatedOptions};
//! use serde_json::json;
//!
//! let template = Template::from_value(&json!({
//!     "name": "string",
//!     "port": { "type": "number", "minValue": 1, "maxValue": 65535 },
//!     "mode": { "type": "string", "acceptedValues": ["fast", "safe"] },
//!     "db": { "type": "object", "required": true, "host": "string" },
//! }))?;
//!
//! let options = json!({
//!     "name": "server-1",
//!     "port": 8080,
//!     "db": { "host": "localhost" },
//! });
//!
//! let validated = ValidatedOptions::new(&template, options)?;
//! assert_eq!(validated.to_object()["db"]["host"], "localhost");
//! # Ok::<(), optval::Error>(())
//! ```
//!
//! ## Defining Templates in Code
//!
//! ```rust
//! use optval::{template, validate, Descriptor, TypeTag};
//! use serde_json::json;
//!
//! let template = template! {
//!     "conf" => TypeTag::FilePath,
//!     "tags" => Descriptor::list(TypeTag::String).max_length(4),
//!     "user" => Descriptor::string().not_accepted_values(["root"]),
//! };
//!
//! let err = validate(&json!({ "tags": ["a", 2] }), &template).unwrap_err();
//! assert_eq!(err.to_string(), "Element 1 of 'tags' was expected to be of type 'String'.");
//! ```
//!
//! ## Errors
//!
//! Validation is fail-fast: the first violated rule is the only error
//! reported. Every failure is an [`Error`]; use [`Error::is_violation`] to tell
//! a bad configuration from a bad template.

// Core modules
mod error;
mod validator;

pub mod format;
pub mod template;

// Re-exports from core
pub use error::{Error, Result};
pub use validator::{ValidatedOptions, validate};

// Re-exports from template
pub use template::{
    Constraints, Descriptor, NestedTemplate, Pattern, Template, TemplateEntry, TypeTag,
};

// Format re-exports
pub use format::{JsonFormat, TemplateFormat};
#[cfg(feature = "toml")]
pub use format::TomlFormat;
#[cfg(feature = "yaml")]
pub use format::YamlFormat;
