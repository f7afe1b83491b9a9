//! Template entries, constraint descriptors and template decoding
//!
//! # Overview
//!
//! A [`Template`] maps option keys to a [`TemplateEntry`]. Each entry is one of:
//!
//! - **Bare type tag**: `"port": "number"`. Only the type is checked.
//! - **Constraint descriptor**: `"port": { "type": "number", "minValue": 1 }`.
//!   The type is checked, then every declared constraint.
//! - **Nested template**: `"db": { "type": "object", "host": "string" }`.
//!   The value must be a mapping and is validated against the inner template.
//!
//! Templates are built with the fluent API or decoded from a JSON value:
//!
//! ```rust
//! use optval::{template, Descriptor, NestedTemplate, Template, TypeTag};
//! use serde_json::json;
//!
//! let built = template! {
//!     "name" => TypeTag::String,
//!     "port" => Descriptor::number().min_value(1.0).max_value(65535.0),
//!     "db" => NestedTemplate::new(template! { "host" => TypeTag::String }),
//! };
//!
//! let decoded = Template::from_value(&json!({
//!     "name": "string",
//!     "port": { "type": "number", "minValue": 1, "maxValue": 65535 },
//!     "db": { "type": "object", "host": "string" },
//! }))
//! .unwrap();
//!
//! assert_eq!(built, decoded);
//! ```
//!
//! # Reserved Keys
//!
//! Inside a nested template (`"type": "object"`) the key `type` and the
//! constraint keys (`required`, `minLength`, `maxLength`, `acceptedValues`,
//! `notAcceptedValues`, `regexFormat`) belong to the descriptor itself, every
//! other key is a child entry. To declare an option with one of those names,
//! give the children as the value of `type`:
//!
//! ```rust
//! use optval::Template;
//! use serde_json::json;
//!
//! let template = Template::from_value(&json!({
//!     "rules": { "type": { "required": "boolean" }, "minLength": 1 },
//! }))
//! .unwrap();
//! assert!(template.validate(&json!({ "rules": { "required": true } })).is_ok());
//! ```

use crate::error::{Error, Result};
use crate::template::types::{Pattern, TypeTag};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::collections::btree_map;
use std::str::FromStr;

// =============================================================================
// Descriptor Keys
// =============================================================================

/// Keys understood inside a constraint descriptor object.
pub mod keys {
    pub const TYPE: &str = "type";
    pub const REQUIRED: &str = "required";
    pub const MIN_VALUE: &str = "minValue";
    pub const MAX_VALUE: &str = "maxValue";
    pub const MIN_LENGTH: &str = "minLength";
    pub const MAX_LENGTH: &str = "maxLength";
    pub const ACCEPTED_VALUES: &str = "acceptedValues";
    pub const NOT_ACCEPTED_VALUES: &str = "notAcceptedValues";
    pub const REGEX_FORMAT: &str = "regexFormat";
    pub const LIST_CONTENTS: &str = "listContents";

    pub(crate) const ALL: [&str; 10] = [
        TYPE,
        REQUIRED,
        MIN_VALUE,
        MAX_VALUE,
        MIN_LENGTH,
        MAX_LENGTH,
        ACCEPTED_VALUES,
        NOT_ACCEPTED_VALUES,
        REGEX_FORMAT,
        LIST_CONTENTS,
    ];
}

// =============================================================================
// Constraints
// =============================================================================

/// Optional per-key rules declared by a descriptor
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Constraints {
    /// Fail when the key is missing from the options
    pub required: bool,
    /// Inclusive lower bound for numbers
    pub min_value: Option<f64>,
    /// Inclusive upper bound for numbers
    pub max_value: Option<f64>,
    /// Inclusive lower bound on string/list/object length
    pub min_length: Option<usize>,
    /// Inclusive upper bound on string/list/object length
    pub max_length: Option<usize>,
    /// Value must be one of these
    pub accepted_values: Option<Vec<Value>>,
    /// Value must not be any of these
    pub not_accepted_values: Option<Vec<Value>>,
    /// Stringified value must match
    pub regex_format: Option<Pattern>,
    /// Type every list element must satisfy
    pub list_contents: Option<TypeTag>,
}

impl Constraints {
    fn check_fit(&self, key: &str, tag: TypeTag) -> Result<()> {
        if self.min_value.is_some() || self.max_value.is_some() {
            if tag != TypeTag::Number {
                return Err(Error::invalid_template(
                    key,
                    format!("minValue/maxValue cannot be applied to type '{tag}'"),
                ));
            }
            if self.min_value.is_some_and(|v| !v.is_finite())
                || self.max_value.is_some_and(|v| !v.is_finite())
            {
                return Err(Error::invalid_template(key, "value bounds must be finite"));
            }
        }
        if let (Some(min), Some(max)) = (self.min_value, self.max_value) {
            if min > max {
                return Err(Error::invalid_template(
                    key,
                    format!("minValue ({min}) cannot be greater than maxValue ({max})"),
                ));
            }
        }

        if (self.min_length.is_some() || self.max_length.is_some()) && !tag.has_length() {
            return Err(Error::invalid_template(
                key,
                format!("minLength/maxLength cannot be applied to type '{tag}'"),
            ));
        }
        if let (Some(min), Some(max)) = (self.min_length, self.max_length) {
            if min > max {
                return Err(Error::invalid_template(
                    key,
                    format!("minLength ({min}) cannot be greater than maxLength ({max})"),
                ));
            }
        }

        if self.list_contents.is_some() && tag != TypeTag::List {
            return Err(Error::invalid_template(
                key,
                format!("listContents cannot be applied to type '{tag}'"),
            ));
        }

        Ok(())
    }

    /// Decode one descriptor field into `self`
    ///
    /// Returns `false` when `field` is not a constraint key.
    fn read_field(&mut self, key: &str, field: &str, value: &Value) -> Result<bool> {
        match field {
            keys::REQUIRED => {
                self.required = value.as_bool().ok_or_else(|| {
                    Error::invalid_template(
                        key,
                        format!("'{field}' must be a boolean, found {value}"),
                    )
                })?;
            }
            keys::MIN_VALUE => self.min_value = Some(read_number(key, field, value)?),
            keys::MAX_VALUE => self.max_value = Some(read_number(key, field, value)?),
            keys::MIN_LENGTH => self.min_length = Some(read_length(key, field, value)?),
            keys::MAX_LENGTH => self.max_length = Some(read_length(key, field, value)?),
            keys::ACCEPTED_VALUES => self.accepted_values = Some(read_values(key, field, value)?),
            keys::NOT_ACCEPTED_VALUES => {
                self.not_accepted_values = Some(read_values(key, field, value)?);
            }
            keys::REGEX_FORMAT => {
                let source = value.as_str().ok_or_else(|| {
                    Error::invalid_template(key, format!("'{field}' must be a string"))
                })?;
                self.regex_format = Some(Pattern::new(source)?);
            }
            keys::LIST_CONTENTS => {
                let element = value
                    .as_str()
                    .ok_or_else(|| {
                        Error::invalid_template(key, format!("'{field}' must be a type tag"))
                    })
                    .and_then(|s| {
                        TypeTag::from_str(s).map_err(|reason| Error::invalid_template(key, reason))
                    })?;
                self.list_contents = Some(element);
            }
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn write_fields(&self, map: &mut Map<String, Value>) {
        if self.required {
            map.insert(keys::REQUIRED.into(), Value::Bool(true));
        }
        if let Some(v) = self.min_value {
            map.insert(keys::MIN_VALUE.into(), Value::from(v));
        }
        if let Some(v) = self.max_value {
            map.insert(keys::MAX_VALUE.into(), Value::from(v));
        }
        if let Some(len) = self.min_length {
            map.insert(keys::MIN_LENGTH.into(), Value::from(len));
        }
        if let Some(len) = self.max_length {
            map.insert(keys::MAX_LENGTH.into(), Value::from(len));
        }
        if let Some(ref values) = self.accepted_values {
            map.insert(keys::ACCEPTED_VALUES.into(), Value::Array(values.clone()));
        }
        if let Some(ref values) = self.not_accepted_values {
            map.insert(keys::NOT_ACCEPTED_VALUES.into(), Value::Array(values.clone()));
        }
        if let Some(ref pattern) = self.regex_format {
            map.insert(keys::REGEX_FORMAT.into(), Value::from(pattern.as_str()));
        }
        if let Some(tag) = self.list_contents {
            map.insert(keys::LIST_CONTENTS.into(), Value::from(tag.as_str()));
        }
    }
}

// =============================================================================
// Descriptor
// =============================================================================

/// A type tag plus constraints
///
/// # Example
///
/// ```
/// use optval::{Descriptor, TypeTag};
///
/// let mode = Descriptor::string()
///     .required()
///     .accepted_values(["fast", "safe"]);
///
/// let tags = Descriptor::list(TypeTag::String).max_length(8);
///
/// let id = Descriptor::string().regex_format(r"^[a-z0-9-]+$").unwrap();
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Descriptor {
    /// Declared type
    pub value_type: TypeTag,
    /// Declared rules
    pub constraints: Constraints,
}

impl Descriptor {
    /// Descriptor for any type tag, with no constraints yet
    pub fn new(value_type: TypeTag) -> Self {
        Self {
            value_type,
            constraints: Constraints::default(),
        }
    }

    pub fn string() -> Self {
        Self::new(TypeTag::String)
    }

    pub fn number() -> Self {
        Self::new(TypeTag::Number)
    }

    pub fn boolean() -> Self {
        Self::new(TypeTag::Boolean)
    }

    pub fn file_path() -> Self {
        Self::new(TypeTag::FilePath)
    }

    pub fn folder_path() -> Self {
        Self::new(TypeTag::FolderPath)
    }

    /// List whose elements must all satisfy `element`
    pub fn list(element: TypeTag) -> Self {
        Self::new(TypeTag::List).list_contents(element)
    }

    #[must_use]
    pub fn required(mut self) -> Self {
        self.constraints.required = true;
        self
    }

    #[must_use]
    pub fn min_value(mut self, val: f64) -> Self {
        self.constraints.min_value = Some(val);
        self
    }

    #[must_use]
    pub fn max_value(mut self, val: f64) -> Self {
        self.constraints.max_value = Some(val);
        self
    }

    #[must_use]
    pub fn min_length(mut self, len: usize) -> Self {
        self.constraints.min_length = Some(len);
        self
    }

    #[must_use]
    pub fn max_length(mut self, len: usize) -> Self {
        self.constraints.max_length = Some(len);
        self
    }

    #[must_use]
    pub fn accepted_values<I, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.constraints.accepted_values = Some(values.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn not_accepted_values<I, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.constraints.not_accepted_values = Some(values.into_iter().map(Into::into).collect());
        self
    }

    /// Require the stringified value to match a regex
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidPattern` if the regex does not compile.
    pub fn regex_format(mut self, pattern: impl Into<String>) -> Result<Self> {
        self.constraints.regex_format = Some(Pattern::new(pattern)?);
        Ok(self)
    }

    #[must_use]
    pub fn list_contents(mut self, element: TypeTag) -> Self {
        self.constraints.list_contents = Some(element);
        self
    }

    /// Check that the declared constraints fit the declared type
    ///
    /// Checks:
    /// - Value bounds only on numbers, and finite
    /// - Length bounds only on length-bearing types
    /// - Lower bounds not above upper bounds
    /// - `listContents` only on lists
    pub fn validate_schema(&self, key: &str) -> Result<()> {
        self.constraints.check_fit(key, self.value_type)
    }

    fn to_value(&self) -> Value {
        let mut map = Map::new();
        map.insert(keys::TYPE.into(), Value::from(self.value_type.as_str()));
        self.constraints.write_fields(&mut map);
        Value::Object(map)
    }
}

// =============================================================================
// Nested Template
// =============================================================================

/// A sub-template for an `object` option
///
/// The mapping itself may carry constraints too (`required`, length bounds,
/// accepted values, regex). They are checked after the inner template.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NestedTemplate {
    /// Rules applied to the mapping as a whole
    pub constraints: Constraints,
    /// Template applied to the nested mapping
    pub template: Template,
}

impl NestedTemplate {
    pub fn new(template: Template) -> Self {
        Self {
            constraints: Constraints::default(),
            template,
        }
    }

    #[must_use]
    pub fn required(mut self) -> Self {
        self.constraints.required = true;
        self
    }

    /// Minimum number of entries
    #[must_use]
    pub fn min_length(mut self, len: usize) -> Self {
        self.constraints.min_length = Some(len);
        self
    }

    /// Maximum number of entries
    #[must_use]
    pub fn max_length(mut self, len: usize) -> Self {
        self.constraints.max_length = Some(len);
        self
    }

    #[must_use]
    pub fn accepted_values<I, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.constraints.accepted_values = Some(values.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn not_accepted_values<I, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.constraints.not_accepted_values = Some(values.into_iter().map(Into::into).collect());
        self
    }

    /// Require the compact JSON text of the mapping to match a regex
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidPattern` if the regex does not compile.
    pub fn regex_format(mut self, pattern: impl Into<String>) -> Result<Self> {
        self.constraints.regex_format = Some(Pattern::new(pattern)?);
        Ok(self)
    }

    /// Check the mapping's own constraints, then the inner template
    pub fn validate_schema(&self, key: &str) -> Result<()> {
        self.constraints.check_fit(key, TypeTag::Object)?;
        self.template.validate_schema()
    }
}

// =============================================================================
// Template Entry
// =============================================================================

/// What a template declares for one key
#[derive(Debug, Clone, PartialEq)]
pub enum TemplateEntry {
    /// Type only
    Bare(TypeTag),
    /// Type plus constraints
    Constrained(Descriptor),
    /// Mapping checked against its own template
    Nested(NestedTemplate),
}

impl TemplateEntry {
    /// Declared type of the entry
    #[must_use]
    pub fn type_tag(&self) -> TypeTag {
        match self {
            TemplateEntry::Bare(tag) => *tag,
            TemplateEntry::Constrained(descriptor) => descriptor.value_type,
            TemplateEntry::Nested(_) => TypeTag::Object,
        }
    }

    /// Whether the key must be present in the options
    #[must_use]
    pub fn is_required(&self) -> bool {
        match self {
            TemplateEntry::Bare(_) => false,
            TemplateEntry::Constrained(descriptor) => descriptor.constraints.required,
            TemplateEntry::Nested(nested) => nested.constraints.required,
        }
    }

    fn from_value(key: &str, value: &Value) -> Result<Self> {
        match value {
            Value::String(tag) => TypeTag::from_str(tag)
                .map(TemplateEntry::Bare)
                .map_err(|reason| Error::invalid_template(key, reason)),
            Value::Object(map) => Self::from_descriptor_map(key, map),
            other => Err(Error::invalid_template(
                key,
                format!("expected a type tag or a descriptor object, found {other}"),
            )),
        }
    }

    fn from_descriptor_map(key: &str, map: &Map<String, Value>) -> Result<Self> {
        // `"type": { ... }` declares the children directly, leaving the outer
        // map for constraints only.
        let (tag, declared_children) = match map.get(keys::TYPE) {
            None | Some(Value::Null) => {
                return Err(Error::MissingTemplateType {
                    key: key.to_string(),
                });
            }
            Some(Value::String(tag)) => (
                TypeTag::from_str(tag).map_err(|reason| Error::invalid_template(key, reason))?,
                None,
            ),
            Some(Value::Object(inner)) => (TypeTag::Object, Some(inner)),
            Some(other) => {
                return Err(Error::invalid_template(
                    key,
                    format!("'type' must be a type tag or a mapping, found {other}"),
                ));
            }
        };

        let mut constraints = Constraints::default();
        let mut template = Template::new();
        for (field, value) in map {
            if field == keys::TYPE || constraints.read_field(key, field, value)? {
                continue;
            }
            if tag == TypeTag::Object && declared_children.is_none() {
                template.insert(field.clone(), Self::from_value(field, value)?);
            } else {
                log::warn!("Ignoring unknown template option '{field}' for '{key}'");
            }
        }

        if tag != TypeTag::Object {
            return Ok(TemplateEntry::Constrained(Descriptor {
                value_type: tag,
                constraints,
            }));
        }

        if let Some(inner) = declared_children {
            for (child_key, child) in inner {
                template.insert(child_key.clone(), Self::from_value(child_key, child)?);
            }
        }
        Ok(TemplateEntry::Nested(NestedTemplate {
            constraints,
            template,
        }))
    }

    fn to_value(&self) -> Value {
        match self {
            TemplateEntry::Bare(tag) => Value::from(tag.as_str()),
            TemplateEntry::Constrained(descriptor) => descriptor.to_value(),
            TemplateEntry::Nested(nested) => {
                let mut map = Map::new();
                nested.constraints.write_fields(&mut map);
                let children = nested.template.to_value();
                if nested.template.iter().any(|(key, _)| keys::ALL.contains(&key)) {
                    map.insert(keys::TYPE.into(), children);
                } else {
                    map.insert(keys::TYPE.into(), Value::from(TypeTag::Object.as_str()));
                    if let Value::Object(children) = children {
                        map.extend(children);
                    }
                }
                Value::Object(map)
            }
        }
    }
}

impl From<TypeTag> for TemplateEntry {
    fn from(tag: TypeTag) -> Self {
        TemplateEntry::Bare(tag)
    }
}

/// `object` descriptors become nested templates with no children.
impl From<Descriptor> for TemplateEntry {
    fn from(descriptor: Descriptor) -> Self {
        match descriptor.value_type {
            TypeTag::Object => TemplateEntry::Nested(NestedTemplate {
                constraints: descriptor.constraints,
                template: Template::new(),
            }),
            _ => TemplateEntry::Constrained(descriptor),
        }
    }
}

impl From<NestedTemplate> for TemplateEntry {
    fn from(nested: NestedTemplate) -> Self {
        TemplateEntry::Nested(nested)
    }
}

impl From<Template> for TemplateEntry {
    fn from(template: Template) -> Self {
        TemplateEntry::Nested(NestedTemplate::new(template))
    }
}

fn read_number(key: &str, field: &str, value: &Value) -> Result<f64> {
    value
        .as_f64()
        .ok_or_else(|| Error::invalid_template(key, format!("'{field}' must be a number, found {value}")))
}

fn read_length(key: &str, field: &str, value: &Value) -> Result<usize> {
    value
        .as_u64()
        .and_then(|n| usize::try_from(n).ok())
        .ok_or_else(|| {
            Error::invalid_template(
                key,
                format!("'{field}' must be a non-negative integer, found {value}"),
            )
        })
}

fn read_values(key: &str, field: &str, value: &Value) -> Result<Vec<Value>> {
    value
        .as_array()
        .cloned()
        .ok_or_else(|| Error::invalid_template(key, format!("'{field}' must be a list, found {value}")))
}

// =============================================================================
// Template
// =============================================================================

/// Expected keys, types and constraints for an options object
///
/// Keys are kept sorted, so validation visits them in a stable order and the
/// same invalid options always produce the same error.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Template {
    entries: BTreeMap<String, TemplateEntry>,
}

impl Template {
    /// Create an empty template
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry (builder pattern)
    #[must_use]
    pub fn entry(mut self, key: impl Into<String>, entry: impl Into<TemplateEntry>) -> Self {
        self.insert(key, entry);
        self
    }

    /// Add or replace an entry, returning the previous one
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        entry: impl Into<TemplateEntry>,
    ) -> Option<TemplateEntry> {
        self.entries.insert(key.into(), entry.into())
    }

    pub fn get(&self, key: &str) -> Option<&TemplateEntry> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Entries in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TemplateEntry)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Decode a template from its JSON form and check it
    ///
    /// # Errors
    ///
    /// - `Error::MissingTemplateType` for a descriptor object without `type`
    /// - `Error::InvalidTemplate` for unknown tags, mistyped descriptor
    ///   fields or constraints that do not fit their type
    /// - `Error::InvalidPattern` for a `regexFormat` that does not compile
    pub fn from_value(value: &Value) -> Result<Self> {
        let Value::Object(map) = value else {
            return Err(Error::invalid_template(
                "<root>",
                format!("a template must be a mapping, found {value}"),
            ));
        };

        let mut template = Template::new();
        for (key, entry) in map {
            template.insert(key.clone(), TemplateEntry::from_value(key, entry)?);
        }
        template.validate_schema()?;

        log::debug!("Decoded template with {} top-level keys", template.len());
        Ok(template)
    }

    /// JSON form of the template, the inverse of [`Template::from_value`]
    #[must_use]
    pub fn to_value(&self) -> Value {
        Value::Object(
            self.iter()
                .map(|(key, entry)| (key.to_string(), entry.to_value()))
                .collect(),
        )
    }

    /// Validate the template definition itself, recursively
    ///
    /// See [`Descriptor::validate_schema`] and [`NestedTemplate::validate_schema`]
    /// for the per-entry checks.
    pub fn validate_schema(&self) -> Result<()> {
        for (key, entry) in self.iter() {
            match entry {
                TemplateEntry::Bare(_) => {}
                TemplateEntry::Constrained(descriptor) => descriptor.validate_schema(key)?,
                TemplateEntry::Nested(nested) => nested.validate_schema(key)?,
            }
        }
        Ok(())
    }

    /// Validate options against this template
    ///
    /// Shorthand for [`crate::validate`].
    pub fn validate(&self, options: &Value) -> Result<()> {
        crate::validator::validate(options, self)
    }
}

impl TryFrom<&Value> for Template {
    type Error = Error;

    fn try_from(value: &Value) -> Result<Self> {
        Template::from_value(value)
    }
}

impl FromStr for Template {
    type Err = Error;

    /// Parse a template from JSON text
    fn from_str(s: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(s).map_err(|e| Error::parse("json", e))?;
        Template::from_value(&value)
    }
}

impl<'a> IntoIterator for &'a Template {
    type Item = (&'a String, &'a TemplateEntry);
    type IntoIter = btree_map::Iter<'a, String, TemplateEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

// =============================================================================
// Helper Macro
// =============================================================================

/// Macro for building a `Template` from `key => entry` pairs
///
/// # Example
/// ```rust
/// use optval::{template, Descriptor, TypeTag};
///
/// let template = template! {
///     "name" => TypeTag::String,
///     "port" => Descriptor::number().min_value(1.0).max_value(65535.0),
///     "db" => template! {
///         "host" => TypeTag::String,
///     },
/// };
/// assert_eq!(template.len(), 3);
/// ```
#[macro_export]
macro_rules! template {
    ($($key:expr => $value:expr),* $(,)?) => {{
        let mut template = $crate::Template::new();
        $(
            template.insert($key, $value);
        )*
        template
    }};
}

// =============================================================================
// Tests
// =============================================================================
