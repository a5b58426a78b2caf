//! Structural equality
//!
//! Equality ignores where an element came from (source, parse data, parent). Elements made
//! of steps (backgrounds, scenarios and outlines) compare by their steps alone, across types:
//! a background equals a scenario with the same steps in the same order. Every other element
//! compares its own attributes, and elements of different kinds are never equal.

use super::elements::{Background, Outline, Scenario};
use super::node::Node;
use super::traits::Stepped;
use std::any::Any;

/// Compare a node against an arbitrary value. Values that are not model elements never match.
pub fn equal(node: &Node, other: &dyn Any) -> bool {
    Node::from_any(other).is_some_and(|other| *node == other)
}

fn steps_of(node: &Node) -> Option<Vec<super::Shared<super::elements::Step>>> {
    match node {
        Node::Background(rc) => Some(rc.borrow().steps().to_vec()),
        Node::Scenario(rc) => Some(rc.borrow().steps().to_vec()),
        Node::Outline(rc) => Some(rc.borrow().steps().to_vec()),
        _ => None,
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Node) -> bool {
        if let (Some(mine), Some(theirs)) = (steps_of(self), steps_of(other)) {
            return mine == theirs;
        }
        match (self, other) {
            (Node::Directory(a), Node::Directory(b)) => a == b,
            (Node::FeatureFile(a), Node::FeatureFile(b)) => a == b,
            (Node::Feature(a), Node::Feature(b)) => a == b,
            (Node::Example(a), Node::Example(b)) => a == b,
            (Node::Step(a), Node::Step(b)) => a == b,
            (Node::Tag(a), Node::Tag(b)) => a == b,
            (Node::Comment(a), Node::Comment(b)) => a == b,
            _ => false,
        }
    }
}

/// `PartialEq` between every pair of stepped element types.
macro_rules! steps_equality {
    ($($left:ty => $right:ty),* $(,)?) => {
        $(
            impl PartialEq<$right> for $left {
                fn eq(&self, other: &$right) -> bool {
                    self.steps() == other.steps()
                }
            }
        )*
    };
}

steps_equality!(
    Background => Background,
    Background => Scenario,
    Background => Outline,
    Scenario => Background,
    Scenario => Scenario,
    Scenario => Outline,
    Outline => Background,
    Outline => Scenario,
    Outline => Outline,
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cuke::model::elements::{Step, Tag};
    use crate::cuke::model::shared;

    fn step(text: &str) -> super::super::Shared<Step> {
        let mut step = Step::new();
        step.keyword = "*".to_string();
        step.text = text.to_string();
        shared(step)
    }

    #[test]
    fn test_stepped_elements_compare_across_types() {
        let mut background = Background::new();
        background.steps = vec![step("a"), step("b")];
        let mut scenario = Scenario::new();
        scenario.steps = vec![step("a"), step("b")];
        let mut outline = Outline::new();
        outline.steps = vec![step("b"), step("a")];

        assert!(background == scenario);
        assert!(scenario == background);
        assert!(outline != scenario);

        outline.steps.reverse();
        assert!(outline == background);
    }

    #[test]
    fn test_stepped_nodes_ignore_names() {
        let mut scenario = Scenario::new();
        scenario.name = "one".to_string();
        let mut outline = Outline::new();
        outline.name = "two".to_string();
        assert_eq!(Node::from(shared(scenario)), Node::from(shared(outline)));
    }

    #[test]
    fn test_different_kinds_are_unequal() {
        let tag = Node::from(shared(Tag::new()));
        let scenario = Node::from(shared(Scenario::new()));
        assert_ne!(tag, scenario);
    }

    #[test]
    fn test_foreign_values_are_unequal() {
        let node = Node::from(shared(Scenario::new()));
        assert!(!equal(&node, &1));
        assert!(!equal(&node, &"foo"));
        assert!(!equal(&node, &Vec::<i32>::new()));
        assert!(!equal(&node, &std::collections::HashMap::<String, i32>::new()));
        assert!(equal(&node, &shared(Background::new())));
    }
}
