//! Type tags and compiled patterns used by templates

use crate::error::{Error, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

// =============================================================================
// Type Tags
// =============================================================================

/// Declared type of a template entry
///
/// Serialized in kebab-case, so `TypeTag::FilePath` reads and writes as
/// `"file-path"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TypeTag {
    /// Any JSON string
    String,
    /// Any JSON number (integer or float)
    Number,
    /// `true` or `false`
    Boolean,
    /// A mapping of keys to values
    Object,
    /// An ordered sequence
    List,
    /// A string shaped like a path to a file with an extension
    FilePath,
    /// A string shaped like a path to a directory
    FolderPath,
}

impl TypeTag {
    /// All known tags, in declaration order
    pub const ALL: [TypeTag; 7] = [
        TypeTag::String,
        TypeTag::Number,
        TypeTag::Boolean,
        TypeTag::Object,
        TypeTag::List,
        TypeTag::FilePath,
        TypeTag::FolderPath,
    ];

    /// Tag as written in templates
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeTag::String => "string",
            TypeTag::Number => "number",
            TypeTag::Boolean => "boolean",
            TypeTag::Object => "object",
            TypeTag::List => "list",
            TypeTag::FilePath => "file-path",
            TypeTag::FolderPath => "folder-path",
        }
    }

    /// Capitalized tag, as shown in error messages (`"File-path"`)
    #[must_use]
    pub fn display_name(&self) -> String {
        let tag = self.as_str();
        let mut chars = tag.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    /// Whether `minLength`/`maxLength` make sense for values of this type
    #[must_use]
    pub fn has_length(&self) -> bool {
        !matches!(self, TypeTag::Number | TypeTag::Boolean)
    }

    /// Base kind check, without the path grammar or list element checks
    ///
    /// `null` never matches.
    #[must_use]
    pub fn matches_kind(&self, value: &Value) -> bool {
        match self {
            TypeTag::String | TypeTag::FilePath | TypeTag::FolderPath => value.is_string(),
            TypeTag::Number => value.is_number(),
            TypeTag::Boolean => value.is_boolean(),
            TypeTag::Object => value.is_object(),
            TypeTag::List => value.is_array(),
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TypeTag {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        TypeTag::ALL
            .into_iter()
            .find(|tag| tag.as_str() == s)
            .ok_or_else(|| format!("unknown type tag '{s}'"))
    }
}

// =============================================================================
// Patterns
// =============================================================================

/// Regex compiled once when the template is built
///
/// Two patterns are equal when their source text is equal.
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    regex: Regex,
}

impl Pattern {
    /// Compile a pattern
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidPattern` if the regex does not compile.
    pub fn new(source: impl Into<String>) -> Result<Self> {
        let source = source.into();
        let regex = Regex::new(&source).map_err(|e| Error::InvalidPattern {
            pattern: source.clone(),
            reason: e.to_string(),
        })?;
        Ok(Self { source, regex })
    }

    /// Source text of the pattern
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Test the pattern against some text (unanchored, like `RegExp.test`)
    #[must_use]
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tag_parsing() {
        assert_eq!("file-path".parse::<TypeTag>(), Ok(TypeTag::FilePath));
        assert_eq!("list".parse::<TypeTag>(), Ok(TypeTag::List));
        assert!("int".parse::<TypeTag>().is_err());
        assert!("String".parse::<TypeTag>().is_err());
    }

    #[test]
    fn test_tag_serde_matches_as_str() {
        for tag in TypeTag::ALL {
            assert_eq!(serde_json::to_value(tag).unwrap(), json!(tag.as_str()));
        }
    }

    #[test]
    fn test_display_name() {
        assert_eq!(TypeTag::Number.display_name(), "Number");
        assert_eq!(TypeTag::FolderPath.display_name(), "Folder-path");
    }

    #[test]
    fn test_kind_matching() {
        assert!(TypeTag::Number.matches_kind(&json!(1.5)));
        assert!(TypeTag::FilePath.matches_kind(&json!("anything")));
        assert!(TypeTag::Object.matches_kind(&json!({})));
        assert!(!TypeTag::Object.matches_kind(&json!([])));
        assert!(!TypeTag::Object.matches_kind(&Value::Null));
        assert!(!TypeTag::String.matches_kind(&Value::Null));
    }

    #[test]
    fn test_pattern() {
        let pattern = Pattern::new(r"^\d{3}$").unwrap();
        assert!(pattern.is_match("123"));
        assert!(!pattern.is_match("12a"));
        assert_eq!(pattern, Pattern::new(r"^\d{3}$").unwrap());

        let err = Pattern::new("([a-z").unwrap_err();
        assert!(matches!(err, Error::InvalidPattern { .. }));
    }
}
