//! Format registry for format discovery and selection
//!
//! This module provides a centralized registry for all available formats.
//! Formats can be registered and retrieved by name.

use crate::error::FormatError;
use crate::format::Format;
use crate::formats::{HtmlFormat, MarkdownFormat, WikiFormat};
use crate::render::RenderOptions;
use moire_parser::Document;
use std::collections::HashMap;

/// Names of the built-in formats, in the order they are listed
pub const DEFAULT_FORMATS: &[&str] = &["markdown", "html", "wiki"];

/// Registry of output formats
///
/// # Examples
///
/// ```ignore
/// let registry = FormatRegistry::with_defaults();
/// let html = registry.serialize(&document, "html")?;
/// ```
pub struct FormatRegistry {
    formats: HashMap<String, Box<dyn Format>>,
}

impl FormatRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        FormatRegistry {
            formats: HashMap::new(),
        }
    }

    /// Register a format
    ///
    /// If a format with the same name already exists, it will be replaced. A format whose rule
    /// table misses registered commands is still accepted, with a warning; documents using those
    /// commands will fail to render in it.
    pub fn register<F: Format + 'static>(&mut self, format: F) {
        let missing = format.rules().missing();
        if !missing.is_empty() {
            let names: Vec<String> = missing.iter().map(ToString::to_string).collect();
            log::warn!(
                "format '{}' has no rule for: {}",
                format.name(),
                names.join(", ")
            );
        }
        self.formats
            .insert(format.name().to_string(), Box::new(format));
    }

    /// Get a format by name
    pub fn get(&self, name: &str) -> Result<&dyn Format, FormatError> {
        self.formats
            .get(name)
            .map(|f| f.as_ref())
            .ok_or_else(|| FormatError::FormatNotFound(name.to_string()))
    }

    /// Check if a format exists
    pub fn has(&self, name: &str) -> bool {
        self.formats.contains_key(name)
    }

    /// List all available format names (sorted)
    pub fn list_formats(&self) -> Vec<String> {
        let mut names: Vec<_> = self.formats.keys().cloned().collect();
        names.sort();
        names
    }

    /// Serialize a document using the specified format
    pub fn serialize(&self, doc: &Document, format: &str) -> Result<String, FormatError> {
        self.get(format)?.serialize(doc)
    }

    /// Create a registry with the built-in formats and default options
    pub fn with_defaults() -> Self {
        Self::configured(|_| RenderOptions::default())
    }

    /// Create a registry with the built-in formats, asking `options` for each format's settings
    pub fn configured(options: impl Fn(&str) -> RenderOptions) -> Self {
        let mut registry = Self::new();
        registry.register(MarkdownFormat::new(options("markdown")));
        registry.register(HtmlFormat::new(options("html")));
        registry.register(WikiFormat::new(options("wiki")));
        registry
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{Dialect, Rule, RuleTable};
    use moire_parser::moire::registry::Command;
    use moire_parser::parse_document;

    // Test format
    struct TestFormat {
        rules: RuleTable,
        options: RenderOptions,
    }

    impl TestFormat {
        fn new() -> Self {
            Self {
                rules: RuleTable::from_fn(|_| Rule::Verbatim),
                options: RenderOptions::default(),
            }
        }
    }

    impl Dialect for TestFormat {
        fn name(&self) -> &str {
            "test"
        }
        fn rules(&self) -> &RuleTable {
            &self.rules
        }
        fn options(&self) -> &RenderOptions {
            &self.options
        }
        fn escape_text(&self, text: &str, _at_block_start: bool) -> String {
            text.to_string()
        }
        fn unescape_text(&self, text: &str) -> String {
            text.to_string()
        }
        fn escape_attribute(&self, value: &str) -> String {
            value.to_string()
        }
    }

    impl Format for TestFormat {
        fn description(&self) -> &str {
            "Test format"
        }
        fn file_extension(&self) -> &str {
            "test"
        }
        fn as_dialect(&self) -> &dyn Dialect {
            self
        }
    }

    #[test]
    fn test_registry_creation() {
        let registry = FormatRegistry::new();
        assert_eq!(registry.formats.len(), 0);
    }

    #[test]
    fn test_registry_register() {
        let mut registry = FormatRegistry::new();
        registry.register(TestFormat::new());

        assert!(registry.has("test"));
        assert_eq!(registry.list_formats(), vec!["test"]);
    }

    #[test]
    fn test_registry_get_nonexistent() {
        let registry = FormatRegistry::new();
        match registry.get("nonexistent") {
            Err(FormatError::FormatNotFound(name)) => assert_eq!(name, "nonexistent"),
            _ => panic!("Expected FormatNotFound error"),
        }
    }

    #[test]
    fn test_registry_serialize() {
        let mut registry = FormatRegistry::new();
        registry.register(TestFormat::new());

        let doc = parse_document(r"Hello \raw{there}").unwrap();
        assert_eq!(registry.serialize(&doc, "test").unwrap(), "Hello there\n");
    }

    #[test]
    fn test_registry_accepts_incomplete_rule_table() {
        let mut format = TestFormat::new();
        format.rules = format.rules.without(Command::Rule);
        let mut registry = FormatRegistry::new();
        registry.register(format);

        let doc = parse_document(r"\hr").unwrap();
        assert!(matches!(
            registry.serialize(&doc, "test"),
            Err(FormatError::UnsupportedCommand { .. })
        ));
    }

    #[test]
    fn test_registry_with_defaults() {
        let registry = FormatRegistry::with_defaults();
        assert_eq!(registry.list_formats(), vec!["html", "markdown", "wiki"]);
        for name in DEFAULT_FORMATS {
            let format = registry.get(name).unwrap();
            assert!(format.rules().missing().is_empty(), "{} is incomplete", name);
        }
    }

    #[test]
    fn test_registry_configured_options() {
        let registry = FormatRegistry::configured(|name| RenderOptions {
            number_headings: name == "wiki",
            indent: 4,
        });
        assert!(registry.get("wiki").unwrap().options().number_headings);
        assert!(!registry.get("html").unwrap().options().number_headings);
        assert_eq!(registry.get("markdown").unwrap().options().indent, 4);
    }

    #[test]
    fn test_registry_replace_format() {
        let mut registry = FormatRegistry::new();
        registry.register(TestFormat::new());
        registry.register(TestFormat::new());

        assert_eq!(registry.list_formats().len(), 1);
    }
}
