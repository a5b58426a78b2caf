//! Outline
//!
//! A scenario template: steps with `<placeholders>` plus the examples blocks that fill them.
//! Examples render at the outline's own indentation, after its steps.

use crate::cuke::error::ParseError;
use crate::cuke::formats::GherkinFormatter;
use crate::cuke::model::source::{
    description, items, lines_of, string, Excerpt, ParentLink, SourceInfo,
};
use crate::cuke::model::traits::{impl_parsed_element, Containing, Described, Stepped, Tagged};
use crate::cuke::model::{shared, Node, Shared};
use crate::cuke::parsing::{parse_stand_alone, StandAlone};
use serde_json::Value;
use std::fmt;

use super::{excerpts_for, steps_from, tags_from, Example, Step, Tag};

#[derive(Debug, Default)]
pub struct Outline {
    pub keyword: String,
    pub name: String,
    pub description: String,
    pub tags: Vec<Shared<Tag>>,
    pub steps: Vec<Shared<Step>>,
    pub examples: Vec<Shared<Example>>,
    pub source: SourceInfo,
    pub parsing_data: Option<Value>,
    pub parent: ParentLink,
}

impl_parsed_element!(Outline);

impl Outline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn parse(text: &str) -> Result<Shared<Outline>, ParseError> {
        let data = parse_stand_alone(StandAlone::Outline, text)?.unwrap_or_default();
        let lines = lines_of(text);
        Ok(Self::from_parsed(&data, &Excerpt::whole(&lines), ParentLink::default()))
    }

    pub(crate) fn from_parsed(
        data: &Value,
        excerpt: &Excerpt<'_>,
        parent: ParentLink,
    ) -> Shared<Outline> {
        let outline = shared(Outline {
            keyword: string(data, "keyword"),
            name: string(data, "name"),
            description: description(data),
            source: SourceInfo::parsed(excerpt, data),
            parsing_data: Some(data.clone()),
            parent,
            ..Self::default()
        });

        let owner = ParentLink::to(&Node::from(&outline));
        let examples_data: Vec<&Value> = items(data, "examples").collect();
        let steps = steps_from(data, &examples_data, excerpt, &owner);
        let examples = examples_data
            .iter()
            .zip(excerpts_for(excerpt, &examples_data))
            .map(|(example, example_excerpt)| {
                Example::from_parsed(example, &example_excerpt, owner.clone())
            })
            .collect();
        let tags = tags_from(data, excerpt, &owner);
        {
            let mut outline = outline.borrow_mut();
            outline.steps = steps;
            outline.examples = examples;
            outline.tags = tags;
        }
        outline
    }
}

impl Containing for Outline {
    /// Steps, then examples, then tags.
    fn children(&self) -> Vec<Node> {
        self.steps
            .iter()
            .map(Node::from)
            .chain(self.examples.iter().map(Node::from))
            .chain(self.tags.iter().map(Node::from))
            .collect()
    }
}

impl Stepped for Outline {
    fn steps(&self) -> &[Shared<Step>] {
        &self.steps
    }
}

impl Tagged for Outline {
    fn tags(&self) -> &[Shared<Tag>] {
        &self.tags
    }
}

impl Described for Outline {
    fn description(&self) -> &str {
        &self.description
    }
}

impl fmt::Display for Outline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&GherkinFormatter::default().outline(self))
    }
}
