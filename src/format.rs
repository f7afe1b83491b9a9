//! Document formats for templates and options
//!
//! Templates and options are plain `serde_json::Value` trees. These front-ends
//! decode JSON, TOML or YAML text into that shape so the same template can be
//! written in whichever format an application already uses.

use crate::error::{Error, Result};
use crate::template::Template;
use serde_json::Value;

/// Trait for document format implementations
pub trait TemplateFormat: Send + Sync {
    /// File extension for this format (e.g., "json", "toml")
    fn extension(&self) -> &str;

    /// Decode a document into a JSON value
    fn parse(&self, content: &str) -> Result<Value>;

    /// Decode a document and build a template from it
    fn parse_template(&self, content: &str) -> Result<Template> {
        Template::from_value(&self.parse(content)?)
    }
}

/// Pick a format by file extension (`"yml"` is accepted for YAML)
///
/// Returns `None` for unknown extensions and for formats whose feature is not
/// enabled.
pub fn for_extension(extension: &str) -> Option<Box<dyn TemplateFormat>> {
    match extension.to_ascii_lowercase().as_str() {
        "json" => Some(Box::new(JsonFormat)),
        #[cfg(feature = "toml")]
        "toml" => Some(Box::new(TomlFormat)),
        #[cfg(feature = "yaml")]
        "yaml" | "yml" => Some(Box::new(YamlFormat)),
        _ => None,
    }
}

// =============================================================================
// JSON Format Implementation
// =============================================================================

/// JSON documents (always available)
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormat;

impl TemplateFormat for JsonFormat {
    fn extension(&self) -> &str {
        "json"
    }

    fn parse(&self, content: &str) -> Result<Value> {
        serde_json::from_str(content).map_err(|e| Error::parse("json", e))
    }
}

// =============================================================================
// TOML Format Implementation
// =============================================================================

/// TOML documents (requires the `toml` feature)
#[cfg(feature = "toml")]
#[derive(Debug, Clone, Copy, Default)]
pub struct TomlFormat;

#[cfg(feature = "toml")]
impl TemplateFormat for TomlFormat {
    fn extension(&self) -> &str {
        "toml"
    }

    fn parse(&self, content: &str) -> Result<Value> {
        toml::from_str(content).map_err(|e| Error::parse("toml", e))
    }
}

// =============================================================================
// YAML Format Implementation
// =============================================================================

/// YAML documents (requires the `yaml` feature)
#[cfg(feature = "yaml")]
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlFormat;

#[cfg(feature = "yaml")]
impl TemplateFormat for YamlFormat {
    fn extension(&self) -> &str {
        "yaml"
    }

    fn parse(&self, content: &str) -> Result<Value> {
        serde_yaml::from_str(content).map_err(|e| Error::parse("yaml", e))
    }
}

// =============================================================================
// Tests
// =============================================================================
