//! Parsing adapter
//!
//! Sits between the [grammar engine](crate::cuke::gherkin) and the model. Everything the
//! model knows about parsed text comes through here as a normalized [`serde_json::Value`]
//! (see [normalize] for its shape), so the engine's own tree never leaks into the model.
//!
//! The adapter also owns the active dialect ([state]) and the wrapping of snippets that are
//! not documents on their own ([standalone]).

pub mod normalize;
pub mod standalone;
pub mod state;

pub use standalone::{parse_stand_alone, StandAlone};
pub use state::{default_dialect, dialect, set_dialect, with_dialect, DialectGuard};

use crate::cuke::error::ParseError;
use crate::cuke::gherkin::parse_document;
use serde_json::Value;
use tracing::debug;

/// Parse a complete document under the active dialect.
///
/// `display_name` names the text in errors. The result is a `GherkinDocument` map whose
/// `feature` is null when the text holds no feature.
pub fn parse_text(source: &str, display_name: &str) -> Result<Value, ParseError> {
    let code = dialect();
    debug!(
        file = display_name,
        dialect = %code,
        bytes = source.len(),
        "parsing gherkin text"
    );

    let document = parse_document(source, display_name, &code)?;
    let raw = serde_json::to_value(&document)
        .map_err(|error| ParseError::new(display_name, 1, error.to_string()))?;
    Ok(normalize::document(&raw))
}
