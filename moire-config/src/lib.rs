//! Shared configuration loader for the moire toolchain.
//!
//! `defaults/moire.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`MoireConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use moire_babel::RenderOptions;
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/moire.default.toml");

/// Top-level configuration consumed by moire applications.
#[derive(Debug, Clone, Deserialize)]
pub struct MoireConfig {
    pub build: BuildConfig,
    pub markdown: DialectConfig,
    pub html: DialectConfig,
    pub wiki: DialectConfig,
    pub inspect: InspectConfig,
}

/// Knobs of the batch driver.
#[derive(Debug, Clone, Deserialize)]
pub struct BuildConfig {
    pub source_extension: String,
    pub dialects: Vec<String>,
    pub jobs: usize,
}

/// Rendering knobs shared by every output dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct DialectConfig {
    pub number_headings: bool,
    pub indent: usize,
}

impl From<DialectConfig> for RenderOptions {
    fn from(config: DialectConfig) -> Self {
        RenderOptions {
            number_headings: config.number_headings,
            indent: config.indent,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct InspectConfig {
    pub show_line_numbers: bool,
}

impl MoireConfig {
    /// Renderer options for the dialect called `name`; unknown names get the defaults.
    pub fn render_options(&self, name: &str) -> RenderOptions {
        match name {
            "markdown" => self.markdown.into(),
            "html" => self.html.into(),
            "wiki" => self.wiki.into(),
            _ => RenderOptions::default(),
        }
    }
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<MoireConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<MoireConfig, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn loads_default_config() {
        let config = load_defaults().expect("defaults to deserialize");
        assert_eq!(config.build.source_extension, "moi");
        assert_eq!(config.build.dialects, vec!["markdown", "html", "wiki"]);
        assert_eq!(config.build.jobs, 0);
        assert!(!config.markdown.number_headings);
        assert_eq!(config.html.indent, 2);
        assert!(!config.inspect.show_line_numbers);
    }

    #[test]
    fn supports_overrides() {
        let config = Loader::new()
            .set_override("wiki.number_headings", true)
            .expect("override to apply")
            .set_override("build.jobs", 4)
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert!(config.wiki.number_headings);
        assert_eq!(config.build.jobs, 4);
    }

    #[test]
    fn layers_user_file_over_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("moire.toml");
        fs::write(&path, "[markdown]\nindent = 4\n\n[build]\ndialects = [\"html\"]\n").unwrap();

        let config = Loader::new().with_file(&path).build().expect("config to build");
        assert_eq!(config.markdown.indent, 4);
        assert!(!config.markdown.number_headings);
        assert_eq!(config.build.dialects, vec!["html"]);
        assert_eq!(config.build.source_extension, "moi");
    }

    #[test]
    fn missing_required_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = Loader::new().with_file(dir.path().join("absent.toml")).build();
        assert!(result.is_err());
    }

    #[test]
    fn missing_optional_file_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let config = Loader::new()
            .with_optional_file(dir.path().join("absent.toml"))
            .build()
            .expect("config to build");
        assert_eq!(config.build.source_extension, "moi");
    }

    #[test]
    fn render_options_per_dialect() {
        let config = Loader::new()
            .set_override("html.number_headings", true)
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert!(config.render_options("html").number_headings);
        assert!(!config.render_options("markdown").number_headings);
        assert_eq!(config.render_options("wiki").indent, 0);
        assert_eq!(config.render_options("unknown"), RenderOptions::default());
    }
}
