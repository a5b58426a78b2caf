use crate::cuke::error::ParseError;
use crate::cuke::formats::GherkinFormatter;
use crate::cuke::model::source::{description, lines_of, string, Excerpt, ParentLink, SourceInfo};
use crate::cuke::model::traits::{impl_parsed_element, Containing, Described, Stepped};
use crate::cuke::model::{shared, Node, Shared};
use crate::cuke::parsing::{parse_stand_alone, StandAlone};
use serde_json::Value;
use std::fmt;

use super::{steps_from, Step};

/// Steps run before every test of a feature.
///
/// Equality only looks at the steps, so a background equals any scenario or outline with the
/// same steps.
#[derive(Debug, Default)]
pub struct Background {
    pub keyword: String,
    pub name: String,
    pub description: String,
    pub steps: Vec<Shared<Step>>,
    pub source: SourceInfo,
    pub parsing_data: Option<Value>,
    pub parent: ParentLink,
}

impl_parsed_element!(Background);

impl Background {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn parse(text: &str) -> Result<Shared<Background>, ParseError> {
        let data = parse_stand_alone(StandAlone::Background, text)?.unwrap_or_default();
        let lines = lines_of(text);
        Ok(Self::from_parsed(&data, &Excerpt::whole(&lines), ParentLink::default()))
    }

    pub(crate) fn from_parsed(
        data: &Value,
        excerpt: &Excerpt<'_>,
        parent: ParentLink,
    ) -> Shared<Background> {
        let background = shared(Background {
            keyword: string(data, "keyword"),
            name: string(data, "name"),
            description: description(data),
            source: SourceInfo::parsed(excerpt, data),
            parsing_data: Some(data.clone()),
            parent,
            ..Self::default()
        });

        let owner = ParentLink::to(&Node::from(&background));
        background.borrow_mut().steps = steps_from(data, &[], excerpt, &owner);
        background
    }
}

impl Containing for Background {
    fn children(&self) -> Vec<Node> {
        self.steps.iter().map(Node::from).collect()
    }
}

impl Stepped for Background {
    fn steps(&self) -> &[Shared<Step>] {
        &self.steps
    }
}

impl Described for Background {
    fn description(&self) -> &str {
        &self.description
    }
}

impl fmt::Display for Background {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&GherkinFormatter::default().background(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cuke::model::traits::{Nested, Parsed, Sourced};

    #[test]
    fn test_parse_background() {
        let background = Background::parse(
            "Background: test background\n\nSome description.\nSome more.\n\n  * a step\n  * another step",
        )
        .unwrap();
        let background = background.borrow();
        assert_eq!(background.keyword, "Background");
        assert_eq!(background.name, "test background");
        assert_eq!(background.description, "Some description.\nSome more.");
        assert_eq!(background.steps.len(), 2);
        assert_eq!(background.source_line(), Some(1));
        assert_eq!(background.parsing_data().unwrap()["type"], "Background");
    }

    #[test]
    fn test_empty_background() {
        let background = Background::parse("Background:").unwrap();
        assert!(background.borrow().steps.is_empty());
    }

    #[test]
    fn test_steps_know_their_background() {
        let background = Background::parse("Background:\n  * one\n  * two\n\n").unwrap();
        let step = background.borrow().steps[0].clone();
        let parent = step.borrow().parent().unwrap();
        assert!(parent.ptr_eq(&Node::from(&background)));
        assert_eq!(step.borrow().source_text(), Some("  * one"));
        assert_eq!(background.borrow().steps[1].borrow().source_text(), Some("  * two"));
    }

    #[test]
    fn test_parse_error() {
        let error = Background::parse("bad background text").unwrap_err();
        assert!(error
            .to_string()
            .contains("'cuke_modeler_stand_alone_background.feature'"));
    }
}
