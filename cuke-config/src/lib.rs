//! Shared configuration loader for cuke-modeler.
//!
//! `defaults/cuke.default.toml` is embedded into the crate so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`CukeConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

pub use config::ConfigError;

const DEFAULT_TOML: &str = include_str!("../defaults/cuke.default.toml");

/// Name of the configuration file looked up in a project directory.
pub const PROJECT_FILE: &str = "cuke.toml";

/// Top-level configuration consumed by the modeler.
#[derive(Debug, Clone, Deserialize)]
pub struct CukeConfig {
    pub parsing: ParsingConfig,
    pub formatting: FormattingConfig,
    pub loading: LoadingConfig,
}

/// Controls how source text is handed to the grammar engine.
#[derive(Debug, Clone, Deserialize)]
pub struct ParsingConfig {
    /// Locale code of the default Gherkin dialect.
    pub dialect: String,
}

/// Mirrors the knobs exposed by the Gherkin formatter.
#[derive(Debug, Clone, Deserialize)]
pub struct FormattingConfig {
    pub indent_string: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoadingConfig {
    pub feature_extension: String,
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

    /// Layer `<dir>/cuke.toml` when the project has one.
    pub fn with_project_dir(self, dir: impl AsRef<Path>) -> Self {
        self.with_optional_file(dir.as_ref().join(PROJECT_FILE))
    }

    /// Apply a single key/value override, e.g. `("parsing.dialect", "fr")`.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<CukeConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<CukeConfig, ConfigError> {
    Loader::new().build()
}
