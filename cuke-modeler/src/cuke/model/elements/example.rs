//! Example
//!
//! An examples block of an outline: an optional name and description, tags, and a table
//! whose first row holds the parameter names and whose other rows hold argument values.

use crate::cuke::error::{ModelError, ParseError};
use crate::cuke::formats::GherkinFormatter;
use crate::cuke::model::source::{
    description, lines_of, rows, string, Excerpt, ParentLink, SourceInfo,
};
use crate::cuke::model::traits::{impl_parsed_element, Containing, Described, Tagged};
use crate::cuke::model::{shared, Node, Shared};
use crate::cuke::parsing::{parse_stand_alone, StandAlone};
use serde_json::Value;
use std::fmt;

use super::{tags_from, Tag};

#[derive(Debug, Default)]
pub struct Example {
    pub keyword: String,
    pub name: String,
    pub description: String,
    pub tags: Vec<Shared<Tag>>,
    /// The first row is the parameter row.
    pub rows: Vec<Vec<String>>,
    pub source: SourceInfo,
    pub parsing_data: Option<Value>,
    pub parent: ParentLink,
}

impl_parsed_element!(Example);

impl Example {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn parse(text: &str) -> Result<Shared<Example>, ParseError> {
        let data = parse_stand_alone(StandAlone::Example, text)?.unwrap_or_default();
        let lines = lines_of(text);
        Ok(Self::from_parsed(&data, &Excerpt::whole(&lines), ParentLink::default()))
    }

    pub(crate) fn from_parsed(
        data: &Value,
        excerpt: &Excerpt<'_>,
        parent: ParentLink,
    ) -> Shared<Example> {
        let example = shared(Example {
            keyword: string(data, "keyword"),
            name: string(data, "name"),
            description: description(data),
            rows: rows(data),
            source: SourceInfo::parsed(excerpt, data),
            parsing_data: Some(data.clone()),
            parent,
            ..Self::default()
        });

        let owner = ParentLink::to(&Node::from(&example));
        example.borrow_mut().tags = tags_from(data, excerpt, &owner);
        example
    }

    /// Names in the parameter row.
    pub fn parameters(&self) -> &[String] {
        self.rows.first().map(Vec::as_slice).unwrap_or_default()
    }

    /// Every row after the parameter row.
    pub fn argument_rows(&self) -> &[Vec<String>] {
        self.rows.get(1..).unwrap_or_default()
    }

    /// Append an argument row given as `(parameter, value)` pairs.
    ///
    /// Values are placed in parameter order; parameters left out get an empty value.
    pub fn add_row(&mut self, values: &[(&str, &str)]) -> Result<(), ModelError> {
        let row = self.row_for(values)?;
        self.rows.push(row);
        Ok(())
    }

    /// Remove the first argument row matching `values` (built as for [`Example::add_row`]).
    /// Returns whether a row was removed.
    pub fn remove_row(&mut self, values: &[(&str, &str)]) -> bool {
        let Ok(row) = self.row_for(values) else {
            return false;
        };
        match self.argument_rows().iter().position(|existing| *existing == row) {
            Some(index) => {
                self.rows.remove(index + 1);
                true
            }
            None => false,
        }
    }

    fn row_for(&self, values: &[(&str, &str)]) -> Result<Vec<String>, ModelError> {
        if self.parameters().is_empty() {
            return Err(ModelError::NoParameters);
        }
        Ok(self
            .parameters()
            .iter()
            .map(|parameter| {
                values
                    .iter()
                    .find(|(name, _)| *name == parameter.as_str())
                    .map(|(_, value)| value.to_string())
                    .unwrap_or_default()
            })
            .collect())
    }
}

impl Containing for Example {
    fn children(&self) -> Vec<Node> {
        self.tags.iter().map(Node::from).collect()
    }
}

impl Tagged for Example {
    fn tags(&self) -> &[Shared<Tag>] {
        &self.tags
    }
}

impl Described for Example {
    fn description(&self) -> &str {
        &self.description
    }
}

impl PartialEq for Example {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.description == other.description
            && self.tags == other.tags
            && self.rows == other.rows
    }
}

impl fmt::Display for Example {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&GherkinFormatter::default().example(self))
    }
}
