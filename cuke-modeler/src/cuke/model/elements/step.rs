//! Step
//!
//! One `<keyword> <text>` line, optionally followed by a block argument: a data table or a
//! doc string. Blocks are plain data and are compared as part of the step.

use crate::cuke::error::ParseError;
use crate::cuke::formats::GherkinFormatter;
use crate::cuke::model::source::{lines_of, rows, string, Excerpt, ParentLink, SourceInfo};
use crate::cuke::model::traits::impl_parsed_element;
use crate::cuke::model::{shared, Shared};
use crate::cuke::parsing::{parse_stand_alone, StandAlone};
use serde_json::Value;
use std::fmt;

/// Block argument of a step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepBlock {
    DataTable {
        rows: Vec<Vec<String>>,
    },
    DocString {
        content: String,
        content_type: Option<String>,
    },
}

impl StepBlock {
    pub fn table<R, C>(rows: R) -> Self
    where
        R: IntoIterator,
        R::Item: IntoIterator<Item = C>,
        C: Into<String>,
    {
        StepBlock::DataTable {
            rows: rows
                .into_iter()
                .map(|row| row.into_iter().map(Into::into).collect())
                .collect(),
        }
    }

    pub fn doc_string(content: impl Into<String>, content_type: Option<&str>) -> Self {
        StepBlock::DocString {
            content: content.into(),
            content_type: content_type.map(str::to_string),
        }
    }

    fn from_parsed(data: &Value) -> Option<Self> {
        match data.get("type").and_then(Value::as_str)? {
            "DataTable" => Some(StepBlock::DataTable { rows: rows(data) }),
            "DocString" => Some(StepBlock::DocString {
                content: string(data, "content"),
                content_type: data
                    .get("content_type")
                    .and_then(Value::as_str)
                    .map(str::to_string),
            }),
            _ => None,
        }
    }
}

#[derive(Debug, Default)]
pub struct Step {
    /// Trimmed keyword, e.g. `Given` or `*`.
    pub keyword: String,
    pub text: String,
    pub block: Option<StepBlock>,
    pub source: SourceInfo,
    pub parsing_data: Option<Value>,
    pub parent: ParentLink,
}

impl_parsed_element!(Step);

impl Step {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn parse(text: &str) -> Result<Shared<Step>, ParseError> {
        let data = parse_stand_alone(StandAlone::Step, text)?.unwrap_or_default();
        let lines = lines_of(text);
        Ok(Self::from_parsed(&data, &Excerpt::whole(&lines), ParentLink::default()))
    }

    pub(crate) fn from_parsed(data: &Value, excerpt: &Excerpt<'_>, parent: ParentLink) -> Shared<Step> {
        shared(Step {
            keyword: string(data, "keyword"),
            text: string(data, "text"),
            block: data.get("block").and_then(StepBlock::from_parsed),
            source: SourceInfo::parsed(excerpt, data),
            parsing_data: Some(data.clone()),
            parent,
        })
    }
}

impl PartialEq for Step {
    fn eq(&self, other: &Self) -> bool {
        self.keyword == other.keyword && self.text == other.text && self.block == other.block
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&GherkinFormatter::default().step(self))
    }
}
