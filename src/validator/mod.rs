//! Recursive validation of options against a template
//!
//! The walk visits template keys in sorted order. For each key present in the
//! options it runs the type check, then the nested template (if any), then the
//! declared constraints. The first failure aborts the whole walk. Keys only
//! present in the options are ignored; keys only present in the template fail
//! only when they are required.

mod rules;

use crate::error::Result;
use crate::template::{Template, TemplateEntry, TypeTag};
use log::{debug, trace, warn};
use serde_json::{Map, Value};
use std::borrow::Borrow;

/// Validate options against a template
///
/// The template is checked first. Options that are not a mapping are then
/// accepted as-is, since there are no keys to match against the template.
///
/// # Errors
///
/// Returns a template error if the template itself is malformed, otherwise
/// the first violated rule as an [`crate::Error`].
///
/// # Example
///
/// ```
/// use optval::{template, validate, Descriptor};
/// use serde_json::json;
///
/// let template = template! {
///     "port" => Descriptor::number().min_value(1.0).max_value(65535.0),
/// };
///
/// assert!(validate(&json!({ "port": 8080 }), &template).is_ok());
///
/// let err = validate(&json!({ "port": 70000 }), &template).unwrap_err();
/// assert_eq!(err.to_string(), "Value of 'port' cannot be 65536 or more.");
/// ```
pub fn validate(options: &Value, template: &Template) -> Result<()> {
    template.validate_schema()?;

    let Value::Object(options) = options else {
        warn!("Options are not a mapping, skipping validation");
        return Ok(());
    };

    validate_map(options, template)
}

fn validate_map(options: &Map<String, Value>, template: &Template) -> Result<()> {
    for (key, entry) in template.iter() {
        match options.get(key) {
            Some(value) => validate_entry(key, entry, value)?,
            None => rules::check_required(key, entry.is_required(), false)?,
        }
    }
    Ok(())
}

fn validate_entry(key: &str, entry: &TemplateEntry, value: &Value) -> Result<()> {
    trace!("Checking '{key}' as {}", entry.type_tag());

    match entry {
        TemplateEntry::Bare(tag) => rules::check_type(key, *tag, None, value),
        TemplateEntry::Nested(nested) => {
            rules::check_type(key, TypeTag::Object, None, value)?;
            if let Value::Object(inner) = value {
                debug!("Descending into nested options '{key}'");
                validate_map(inner, &nested.template)?;
            }
            rules::check_constraints(key, &nested.constraints, value)
        }
        TemplateEntry::Constrained(descriptor) => {
            let constraints = &descriptor.constraints;
            rules::check_type(key, descriptor.value_type, constraints.list_contents, value)?;
            rules::check_constraints(key, constraints, value)
        }
    }
}

// =============================================================================
// Validated Options
// =============================================================================

/// Options that passed validation
///
/// Construction validates immediately. The options are stored untouched, so
/// [`ValidatedOptions::to_object`] hands back exactly what was passed in.
/// `C` can be an owned `Value`, a `&Value`, an `Arc<Value>` or anything else
/// that borrows as a `Value`.
///
/// # Example
///
/// ```
/// use optval::{template, TypeTag, ValidatedOptions};
/// use serde_json::json;
///
/// let template = template! { "name" => TypeTag::String };
/// let options = json!({ "name": "server-1" });
///
/// let validated = ValidatedOptions::new(&template, &options)?;
/// assert!(std::ptr::eq(validated.to_object(), &options));
/// # Ok::<(), optval::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct ValidatedOptions<C = Value> {
    options: C,
}

impl<C: Borrow<Value>> ValidatedOptions<C> {
    /// Check the template, then validate the options against it
    ///
    /// # Errors
    ///
    /// Returns a template error if the template itself is malformed, or the
    /// first rule the options violate.
    pub fn new(template: &Template, options: C) -> Result<Self> {
        validate(options.borrow(), template)?;
        debug!("Options validated against {} template keys", template.len());
        Ok(Self { options })
    }

    /// The validated options, unchanged
    pub fn to_object(&self) -> &Value {
        self.options.borrow()
    }

    /// Give back the options as they were passed in
    pub fn into_inner(self) -> C {
        self.options
    }
}

impl<C: Borrow<Value>> AsRef<Value> for ValidatedOptions<C> {
    fn as_ref(&self) -> &Value {
        self.to_object()
    }
}
