//! Main module for cuke-modeler functionality
//!
//! Layout
//!
//!     gherkin     The grammar engine: dialects, line classification, document AST
//!     parsing     The adapter between engine and model: normalized parse data, the active
//!                 dialect, stand-alone snippets
//!     model       The element tree, its traits, equality and ancestry
//!     formats     Rendering elements back to Gherkin
//!     loader      Reading feature files and directories from disk
//!     error       Error types
//!
//! Configuration comes from the `cuke-config` crate. The active dialect is applied with
//! [`configure`] or [`configure_project`]; formatting and loading settings go through
//! [`GherkinFormatter::from_config`](formats::GherkinFormatter::from_config) and
//! [`DirectoryLoader::from_config`](loader::DirectoryLoader::from_config).

pub mod error;
pub mod formats;
pub mod gherkin;
pub mod loader;
pub mod model;
pub mod parsing;

use cuke_config::{CukeConfig, Loader};
use error::CukeError;
use std::path::Path;
use tracing::{debug, warn};

/// Apply the process-wide parts of a configuration: the default dialect.
pub fn configure(config: &CukeConfig) {
    let code = config.parsing.dialect.as_str();
    if gherkin::Dialect::get(code).is_none() {
        warn!(dialect = code, "unknown dialect configured");
    }
    debug!(dialect = code, "setting default dialect");
    parsing::set_dialect(code);
}

/// Load the defaults with the project's `cuke.toml` (if any) layered on top, and apply them.
///
/// The configuration is returned for building the formatter and the loader.
pub fn configure_project(dir: impl AsRef<Path>) -> Result<CukeConfig, CukeError> {
    let config = Loader::new().with_project_dir(dir).build()?;
    configure(&config);
    Ok(config)
}
