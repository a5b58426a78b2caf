use crate::cuke::error::ParseError;
use crate::cuke::formats::GherkinFormatter;
use crate::cuke::model::source::{description, lines_of, string, Excerpt, ParentLink, SourceInfo};
use crate::cuke::model::traits::{impl_parsed_element, Containing, Described, Stepped, Tagged};
use crate::cuke::model::{shared, Node, Shared};
use crate::cuke::parsing::{parse_stand_alone, StandAlone};
use serde_json::Value;
use std::fmt;

use super::{steps_from, tags_from, Step, Tag};

/// A single test: tags, a name and a step sequence.
#[derive(Debug, Default)]
pub struct Scenario {
    pub keyword: String,
    pub name: String,
    pub description: String,
    pub tags: Vec<Shared<Tag>>,
    pub steps: Vec<Shared<Step>>,
    pub source: SourceInfo,
    pub parsing_data: Option<Value>,
    pub parent: ParentLink,
}

impl_parsed_element!(Scenario);

impl Scenario {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn parse(text: &str) -> Result<Shared<Scenario>, ParseError> {
        let data = parse_stand_alone(StandAlone::Scenario, text)?.unwrap_or_default();
        let lines = lines_of(text);
        Ok(Self::from_parsed(&data, &Excerpt::whole(&lines), ParentLink::default()))
    }

    pub(crate) fn from_parsed(
        data: &Value,
        excerpt: &Excerpt<'_>,
        parent: ParentLink,
    ) -> Shared<Scenario> {
        let scenario = shared(Scenario {
            keyword: string(data, "keyword"),
            name: string(data, "name"),
            description: description(data),
            source: SourceInfo::parsed(excerpt, data),
            parsing_data: Some(data.clone()),
            parent,
            ..Self::default()
        });

        let owner = ParentLink::to(&Node::from(&scenario));
        let steps = steps_from(data, &[], excerpt, &owner);
        let tags = tags_from(data, excerpt, &owner);
        {
            let mut scenario = scenario.borrow_mut();
            scenario.steps = steps;
            scenario.tags = tags;
        }
        scenario
    }
}

impl Containing for Scenario {
    /// Steps, then tags.
    fn children(&self) -> Vec<Node> {
        self.steps
            .iter()
            .map(Node::from)
            .chain(self.tags.iter().map(Node::from))
            .collect()
    }
}

impl Stepped for Scenario {
    fn steps(&self) -> &[Shared<Step>] {
        &self.steps
    }
}

impl Tagged for Scenario {
    fn tags(&self) -> &[Shared<Tag>] {
        &self.tags
    }
}

impl Described for Scenario {
    fn description(&self) -> &str {
        &self.description
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&GherkinFormatter::default().scenario(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cuke::model::traits::{Nested, Sourced};

    #[test]
    fn test_parse_scenario() {
        let scenario = Scenario::parse(
            "@tag1 @tag2\n@tag3\nScenario: test scenario\n\n  description\n\n  Given a step\n  Then another step",
        )
        .unwrap();
        let scenario = scenario.borrow();
        assert_eq!(scenario.keyword, "Scenario");
        assert_eq!(scenario.name, "test scenario");
        assert_eq!(scenario.description, "description");
        assert_eq!(scenario.tag_names(), vec!["@tag1", "@tag2", "@tag3"]);
        assert_eq!(scenario.steps.len(), 2);
        assert_eq!(scenario.source_line(), Some(3));
    }

    #[test]
    fn test_children_order() {
        let scenario = Scenario::parse("@tag\nScenario:\n  * step").unwrap();
        let kinds: Vec<_> = scenario.borrow().children().iter().map(Node::kind).collect();
        assert_eq!(
            kinds,
            vec![crate::cuke::model::NodeKind::Step, crate::cuke::model::NodeKind::Tag]
        );
        assert_eq!(scenario.borrow().contains().len(), 1);
    }

    #[test]
    fn test_children_point_back_to_the_scenario() {
        let scenario = Scenario::parse("@tag\nScenario:\n  * step").unwrap();
        for child in scenario.borrow().children() {
            assert!(child.parent().unwrap().ptr_eq(&Node::from(&scenario)));
        }
        let step = scenario.borrow().steps[0].clone();
        assert!(step.borrow().get_ancestor(crate::cuke::model::NodeKind::Test).is_some());
    }

    #[test]
    fn test_parse_error() {
        let error = Scenario::parse("bad scenario text").unwrap_err();
        assert!(error
            .to_string()
            .contains("'cuke_modeler_stand_alone_scenario.feature'"));
    }
}
