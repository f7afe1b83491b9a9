//! Template types
//!
//! This module contains the types a caller uses to describe expected options:
//! - `Template` - Mapping of option keys to entries
//! - `TemplateEntry` - Bare type tag, constraint descriptor or nested template
//! - `TypeTag` - Closed set of declared types

mod schema;
mod types;

pub use schema::{Constraints, Descriptor, NestedTemplate, Template, TemplateEntry, keys};

pub use types::{Pattern, TypeTag};
