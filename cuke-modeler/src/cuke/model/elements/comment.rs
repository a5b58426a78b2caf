//! Comment
//!
//! A `#` line of a feature file. Comments are collected at document level and hang off the
//! feature, wherever they appear in the file.

use crate::cuke::error::ParseError;
use crate::cuke::formats::GherkinFormatter;
use crate::cuke::model::source::{lines_of, string, Excerpt, ParentLink, SourceInfo};
use crate::cuke::model::traits::impl_parsed_element;
use crate::cuke::model::{shared, Shared};
use crate::cuke::parsing::{parse_stand_alone, StandAlone};
use serde_json::Value;
use std::fmt;

#[derive(Debug, Default)]
pub struct Comment {
    /// The full comment, including the leading `#`.
    pub text: String,
    pub source: SourceInfo,
    pub parsing_data: Option<Value>,
    pub parent: ParentLink,
}

impl_parsed_element!(Comment);

impl Comment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a comment line. When the text holds several comments, the last one is used.
    pub fn parse(text: &str) -> Result<Shared<Comment>, ParseError> {
        let data = parse_stand_alone(StandAlone::Comment, text)?.unwrap_or_default();
        let lines = lines_of(text);
        Ok(Self::from_parsed(&data, &Excerpt::whole(&lines), ParentLink::default()))
    }

    pub(crate) fn from_parsed(data: &Value, excerpt: &Excerpt<'_>, parent: ParentLink) -> Shared<Comment> {
        shared(Comment {
            text: string(data, "text"),
            source: SourceInfo::parsed(excerpt, data),
            parsing_data: Some(data.clone()),
            parent,
        })
    }
}

impl PartialEq for Comment {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl fmt::Display for Comment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&GherkinFormatter::default().comment(self))
    }
}
