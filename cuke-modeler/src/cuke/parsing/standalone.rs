//! Stand-alone snippets
//!
//! A step or a tag is not a valid document on its own. Snippets are wrapped in the smallest
//! document that makes them parseable, in the active dialect, and the node of interest is
//! pulled back out. Line numbers in the extracted data are shifted so they count from the
//! first line of the snippet.

use super::{dialect, parse_text};
use crate::cuke::error::ParseError;
use crate::cuke::gherkin::Dialect;
use serde_json::Value;
use tracing::trace;

const FAKE_FEATURE: &str = "Fake feature to parse";

/// The kinds of node that can be parsed from a snippet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StandAlone {
    Feature,
    Background,
    Scenario,
    Outline,
    Example,
    Step,
    Tag,
    Comment,
}

impl StandAlone {
    pub fn name(self) -> &'static str {
        match self {
            StandAlone::Feature => "feature",
            StandAlone::Background => "background",
            StandAlone::Scenario => "scenario",
            StandAlone::Outline => "outline",
            StandAlone::Example => "example",
            StandAlone::Step => "step",
            StandAlone::Tag => "tag",
            StandAlone::Comment => "comment",
        }
    }

    /// Display name used for parse errors.
    pub fn file_name(self) -> String {
        format!("cuke_modeler_stand_alone_{}.feature", self.name())
    }

    /// The wrapped document and the number of wrapper lines preceding the snippet.
    fn wrap(self, snippet: &str, code: &str, dialect: &Dialect) -> (String, usize) {
        let language = format!("# language: {}\n", code);
        let feature = format!("{}: {}", dialect.feature_keyword(), FAKE_FEATURE);
        match self {
            StandAlone::Feature => (snippet.to_string(), 0),
            StandAlone::Background | StandAlone::Scenario | StandAlone::Outline => {
                (format!("{}{}\n{}", language, feature, snippet), 2)
            }
            StandAlone::Example => (
                format!(
                    "{}{}\n{}:\n{} fake step\n{}",
                    language,
                    feature,
                    dialect.outline_keyword(),
                    dialect.given_keyword(),
                    snippet
                ),
                4,
            ),
            StandAlone::Step => (
                format!(
                    "{}{}\n{}:\n{}",
                    language,
                    feature,
                    dialect.scenario_keyword(),
                    snippet
                ),
                3,
            ),
            StandAlone::Tag | StandAlone::Comment => {
                (format!("{}{}\n{}", language, snippet, feature), 1)
            }
        }
    }

    fn extract(self, document: &Value) -> Option<Value> {
        let feature = document.get("feature").filter(|feature| !feature.is_null());
        let first_test = || feature.and_then(|f| f.get("elements")).and_then(|e| e.get(0));
        let found = match self {
            StandAlone::Feature => feature,
            StandAlone::Background => feature.and_then(|f| f.get("background")),
            StandAlone::Scenario => first_test().filter(|test| is_type(test, "Scenario")),
            StandAlone::Outline => first_test().filter(|test| is_type(test, "ScenarioOutline")),
            StandAlone::Example => first_test()
                .and_then(|test| test.get("examples"))
                .and_then(|examples| examples.get(0)),
            StandAlone::Step => first_test()
                .and_then(|test| test.get("steps"))
                .and_then(|steps| steps.get(0)),
            StandAlone::Tag => feature
                .and_then(|f| f.get("tags"))
                .and_then(|tags| tags.get(0)),
            StandAlone::Comment => document
                .get("comments")
                .and_then(Value::as_array)
                .and_then(|comments| comments.last()),
        };
        found.cloned()
    }
}

/// Parse `snippet` as a node of the given kind.
///
/// Returns `Ok(None)` only for a feature snippet that contains no feature; every other kind
/// reports a missing node as a [`ParseError`].
pub fn parse_stand_alone(kind: StandAlone, snippet: &str) -> Result<Option<Value>, ParseError> {
    let file = kind.file_name();
    let code = dialect();
    let keywords = Dialect::get(&code)
        .ok_or_else(|| ParseError::new(&file, 1, format!("Language not supported: {}", code)))?;

    let (wrapped, offset) = kind.wrap(snippet, &code, keywords);
    trace!(kind = kind.name(), offset, "wrapped stand-alone snippet");

    let document = parse_text(&wrapped, &file).map_err(|mut error| {
        error.line = error.line.saturating_sub(offset).max(1);
        error
    })?;

    match kind.extract(&document) {
        Some(mut data) => {
            shift_lines(&mut data, offset);
            Ok(Some(data))
        }
        None if kind == StandAlone::Feature => Ok(None),
        None => Err(ParseError::new(
            file,
            1,
            format!("no {} found in the text", kind.name()),
        )),
    }
}

fn is_type(data: &Value, kind: &str) -> bool {
    data.get("type").and_then(Value::as_str) == Some(kind)
}

/// Subtract `offset` from every `location.line` in the tree.
fn shift_lines(data: &mut Value, offset: usize) {
    if offset == 0 {
        return;
    }
    match data {
        Value::Object(map) => {
            for (key, value) in map.iter_mut() {
                if key == "location" {
                    if let Some(line) = value.get("line").and_then(Value::as_u64) {
                        value["line"] = Value::from(line.saturating_sub(offset as u64));
                    }
                } else {
                    shift_lines(value, offset);
                }
            }
        }
        Value::Array(items) => items.iter_mut().for_each(|item| shift_lines(item, offset)),
        _ => {}
    }
}
