//! Feature
//!
//! The top-level block of a feature file: tags, name, description, an optional background
//! and the tests (scenarios and outlines, in source order). Comments found anywhere in the
//! document are kept on the feature.

use crate::cuke::error::ParseError;
use crate::cuke::formats::GherkinFormatter;
use crate::cuke::model::source::{
    description, items, lines_of, location_line, string, Excerpt, ParentLink, SourceInfo,
};
use crate::cuke::model::traits::{impl_parsed_element, Containing, Described, Tagged};
use crate::cuke::model::{shared, Node, Shared};
use crate::cuke::parsing::{parse_stand_alone, StandAlone};
use serde_json::Value;
use std::fmt;

use super::{excerpts_for, tags_from, Background, Comment, Outline, Scenario, Tag};

/// A test of a feature: a scenario or an outline.
#[derive(Debug, Clone)]
pub enum Test {
    Scenario(Shared<Scenario>),
    Outline(Shared<Outline>),
}

impl Test {
    pub fn node(&self) -> Node {
        match self {
            Test::Scenario(scenario) => Node::from(scenario),
            Test::Outline(outline) => Node::from(outline),
        }
    }

    pub fn name(&self) -> String {
        match self {
            Test::Scenario(scenario) => scenario.borrow().name.clone(),
            Test::Outline(outline) => outline.borrow().name.clone(),
        }
    }
}

impl PartialEq for Test {
    fn eq(&self, other: &Self) -> bool {
        self.node() == other.node()
    }
}

impl From<&Test> for Node {
    fn from(test: &Test) -> Self {
        test.node()
    }
}

impl fmt::Display for Test {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Test::Scenario(scenario) => write!(f, "{}", scenario.borrow()),
            Test::Outline(outline) => write!(f, "{}", outline.borrow()),
        }
    }
}

#[derive(Debug, Default)]
pub struct Feature {
    pub keyword: String,
    pub name: String,
    pub description: String,
    pub tags: Vec<Shared<Tag>>,
    pub background: Option<Shared<Background>>,
    pub tests: Vec<Test>,
    pub comments: Vec<Shared<Comment>>,
    /// Locale code of the dialect the feature was parsed with; empty for bare features.
    pub language: String,
    pub source: SourceInfo,
    pub parsing_data: Option<Value>,
    pub parent: ParentLink,
}

impl_parsed_element!(Feature);

impl Feature {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a feature. Text without a feature yields a bare feature.
    pub fn parse(text: &str) -> Result<Shared<Feature>, ParseError> {
        let lines = lines_of(text);
        Ok(match parse_stand_alone(StandAlone::Feature, text)? {
            Some(data) => Self::from_parsed(&data, &Excerpt::whole(&lines), ParentLink::default()),
            None => shared(Feature::new()),
        })
    }

    pub(crate) fn from_parsed(
        data: &Value,
        excerpt: &Excerpt<'_>,
        parent: ParentLink,
    ) -> Shared<Feature> {
        let feature = shared(Feature {
            keyword: string(data, "keyword"),
            name: string(data, "name"),
            description: description(data),
            language: string(data, "language"),
            source: SourceInfo::parsed(excerpt, data),
            parsing_data: Some(data.clone()),
            parent,
            ..Self::default()
        });
        let owner = ParentLink::to(&Node::from(&feature));

        let background_data = data.get("background").filter(|b| !b.is_null());
        let tests_data: Vec<&Value> = items(data, "elements").collect();
        let blocks: Vec<&Value> = background_data.into_iter().chain(tests_data.iter().copied()).collect();
        let mut excerpts = excerpts_for(excerpt, &blocks).into_iter();

        let background = background_data.and_then(|background| {
            excerpts
                .next()
                .map(|bg_excerpt| Background::from_parsed(background, &bg_excerpt, owner.clone()))
        });
        let tests = tests_data
            .iter()
            .zip(excerpts)
            .map(|(test, test_excerpt)| {
                match test.get("type").and_then(Value::as_str) {
                    Some("ScenarioOutline") => Test::Outline(Outline::from_parsed(
                        test,
                        &test_excerpt,
                        owner.clone(),
                    )),
                    _ => Test::Scenario(Scenario::from_parsed(test, &test_excerpt, owner.clone())),
                }
            })
            .collect();
        let comments = items(data, "comments")
            .map(|comment| {
                let line = location_line(comment).unwrap_or(1);
                Comment::from_parsed(comment, &excerpt.line(line), owner.clone())
            })
            .collect();
        let tags = tags_from(data, excerpt, &owner);

        {
            let mut feature = feature.borrow_mut();
            feature.background = background;
            feature.tests = tests;
            feature.comments = comments;
            feature.tags = tags;
        }
        feature
    }

    pub fn has_background(&self) -> bool {
        self.background.is_some()
    }

    pub fn scenarios(&self) -> Vec<Shared<Scenario>> {
        self.tests
            .iter()
            .filter_map(|test| match test {
                Test::Scenario(scenario) => Some(scenario.clone()),
                Test::Outline(_) => None,
            })
            .collect()
    }

    pub fn outlines(&self) -> Vec<Shared<Outline>> {
        self.tests
            .iter()
            .filter_map(|test| match test {
                Test::Outline(outline) => Some(outline.clone()),
                Test::Scenario(_) => None,
            })
            .collect()
    }

    /// Number of test cases: one per scenario, one per argument row of each outline.
    pub fn test_count(&self) -> usize {
        self.tests
            .iter()
            .map(|test| match test {
                Test::Scenario(_) => 1,
                Test::Outline(outline) => outline
                    .borrow()
                    .examples
                    .iter()
                    .map(|example| example.borrow().argument_rows().len())
                    .sum::<usize>(),
            })
            .sum()
    }
}

impl Containing for Feature {
    /// Background, tests, tags, then comments.
    fn children(&self) -> Vec<Node> {
        self.background
            .iter()
            .map(Node::from)
            .chain(self.tests.iter().map(Node::from))
            .chain(self.tags.iter().map(Node::from))
            .chain(self.comments.iter().map(Node::from))
            .collect()
    }
}

impl Tagged for Feature {
    fn tags(&self) -> &[Shared<Tag>] {
        &self.tags
    }
}

impl Described for Feature {
    fn description(&self) -> &str {
        &self.description
    }
}

impl PartialEq for Feature {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.description == other.description
            && self.tags == other.tags
            && self.background == other.background
            && self.tests == other.tests
            && self.comments == other.comments
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&GherkinFormatter::default().feature(self))
    }
}
