//! Programmatic tree building
//!
//! Parsed trees are linked during construction. Trees built by hand go through [`attach`],
//! which puts the child into the parent's collection for its kind and links it back:
//!
//! | parent      | accepted children                          |
//! |-------------|--------------------------------------------|
//! | Directory   | FeatureFile, Directory                     |
//! | FeatureFile | Feature (replaces the current one)         |
//! | Feature     | Background (replaces), Scenario, Outline, Tag, Comment |
//! | Background  | Step                                       |
//! | Scenario    | Step, Tag                                  |
//! | Outline     | Step, Example, Tag                         |
//! | Example     | Tag                                        |
//!
//! A replaced Feature or Background is unlinked and can be attached elsewhere.

use super::ancestry::ancestors;
use super::elements::Test;
use super::node::Node;
use super::source::ParentLink;
use crate::cuke::error::ModelError;

/// Append `child` to `parent` and point the child's parent link at it.
pub fn attach(parent: &Node, child: Node) -> Result<(), ModelError> {
    let child_kind = child.kind().name();
    if !accepts(parent, &child) {
        return Err(ModelError::InvalidChild {
            parent: parent.kind().name(),
            child: child_kind,
        });
    }
    if child.parent().is_some() {
        return Err(ModelError::AlreadyAttached { child: child_kind });
    }
    if child.ptr_eq(parent) || ancestors(parent).iter().any(|a| a.ptr_eq(&child)) {
        return Err(ModelError::Cycle { kind: child_kind });
    }

    child.with_parent_link(|link| link.set(parent, child_kind))?;

    match (parent, child) {
        (Node::Directory(dir), Node::FeatureFile(file)) => dir.borrow_mut().feature_files.push(file),
        (Node::Directory(dir), Node::Directory(sub)) => dir.borrow_mut().directories.push(sub),
        (Node::FeatureFile(file), Node::Feature(feature)) => {
            let displaced = file.borrow_mut().feature.replace(feature);
            release(displaced.map(Node::from));
        }
        (Node::Feature(feature), Node::Background(background)) => {
            let displaced = feature.borrow_mut().background.replace(background);
            release(displaced.map(Node::from));
        }
        (Node::Feature(feature), Node::Scenario(scenario)) => {
            feature.borrow_mut().tests.push(Test::Scenario(scenario))
        }
        (Node::Feature(feature), Node::Outline(outline)) => {
            feature.borrow_mut().tests.push(Test::Outline(outline))
        }
        (Node::Feature(feature), Node::Tag(tag)) => feature.borrow_mut().tags.push(tag),
        (Node::Feature(feature), Node::Comment(comment)) => {
            feature.borrow_mut().comments.push(comment)
        }
        (Node::Background(background), Node::Step(step)) => {
            background.borrow_mut().steps.push(step)
        }
        (Node::Scenario(scenario), Node::Step(step)) => scenario.borrow_mut().steps.push(step),
        (Node::Scenario(scenario), Node::Tag(tag)) => scenario.borrow_mut().tags.push(tag),
        (Node::Outline(outline), Node::Step(step)) => outline.borrow_mut().steps.push(step),
        (Node::Outline(outline), Node::Example(example)) => {
            outline.borrow_mut().examples.push(example)
        }
        (Node::Outline(outline), Node::Tag(tag)) => outline.borrow_mut().tags.push(tag),
        (Node::Example(example), Node::Tag(tag)) => example.borrow_mut().tags.push(tag),
        _ => unreachable!("kind pairs are checked by `accepts`"),
    }
    Ok(())
}

fn release(displaced: Option<Node>) {
    if let Some(node) = displaced {
        node.with_parent_link(ParentLink::clear);
    }
}

fn accepts(parent: &Node, child: &Node) -> bool {
    matches!(
        (parent, child),
        (Node::Directory(_), Node::FeatureFile(_) | Node::Directory(_))
            | (Node::FeatureFile(_), Node::Feature(_))
            | (
                Node::Feature(_),
                Node::Background(_)
                    | Node::Scenario(_)
                    | Node::Outline(_)
                    | Node::Tag(_)
                    | Node::Comment(_)
            )
            | (Node::Background(_), Node::Step(_))
            | (Node::Scenario(_), Node::Step(_) | Node::Tag(_))
            | (Node::Outline(_), Node::Step(_) | Node::Example(_) | Node::Tag(_))
            | (Node::Example(_), Node::Tag(_))
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cuke::model::elements::{
        Background, Directory, Example, Feature, FeatureFile, Outline, Step, Tag,
    };
    use crate::cuke::model::NodeKind;
    use crate::cuke::model::shared;

    #[test]
    fn test_attach_links_both_ways() {
        let outline = shared(Outline::new());
        let example = shared(Example::new());
        attach(&Node::from(&outline), Node::from(&example)).unwrap();

        assert_eq!(outline.borrow().examples.len(), 1);
        let parent = Node::from(&example).parent().unwrap();
        assert!(parent.ptr_eq(&Node::from(&outline)));
    }

    #[test]
    fn test_invalid_kind_pair() {
        let error = attach(
            &Node::from(shared(Directory::new("features"))),
            Node::from(shared(Tag::new())),
        )
        .unwrap_err();
        assert_eq!(
            error,
            ModelError::InvalidChild {
                parent: "Directory",
                child: "Tag"
            }
        );
    }

    #[test]
    fn test_already_attached() {
        let first = Node::from(shared(Outline::new()));
        let second = Node::from(shared(Outline::new()));
        let step = Node::from(shared(Step::new()));
        attach(&first, step.clone()).unwrap();
        assert_eq!(
            attach(&second, step).unwrap_err(),
            ModelError::AlreadyAttached { child: "Step" }
        );
    }

    #[test]
    fn test_cycles_are_rejected() {
        let root = Node::from(shared(Directory::new("root")));
        let child = Node::from(shared(Directory::new("root/child")));
        attach(&root, child.clone()).unwrap();

        assert_eq!(
            attach(&child, root.clone()).unwrap_err(),
            ModelError::Cycle { kind: "Directory" }
        );
        let lonely = Node::from(shared(Directory::new("lonely")));
        assert!(matches!(
            attach(&lonely, lonely.clone()),
            Err(ModelError::Cycle { .. })
        ));
    }

    #[test]
    fn test_replaced_feature_is_unlinked() {
        let file = Node::from(shared(FeatureFile::new("a.feature")));
        let first = shared(Feature::new());
        let second = shared(Feature::new());
        attach(&file, Node::from(&first)).unwrap();
        attach(&file, Node::from(&second)).unwrap();

        assert!(Node::from(&first).parent().is_none());
        assert!(Node::from(&first).get_ancestor(NodeKind::FeatureFile).is_none());
        assert!(Node::from(&second).parent().unwrap().ptr_eq(&file));

        let other = Node::from(shared(FeatureFile::new("b.feature")));
        attach(&other, Node::from(&first)).unwrap();
        assert!(Node::from(&first).parent().unwrap().ptr_eq(&other));
    }

    #[test]
    fn test_replaced_background_is_unlinked() {
        let feature = shared(Feature::new());
        let old = shared(Background::new());
        let step = shared(Step::new());
        attach(&Node::from(&old), Node::from(&step)).unwrap();
        attach(&Node::from(&feature), Node::from(&old)).unwrap();
        attach(&Node::from(&feature), Node::from(shared(Background::new()))).unwrap();

        assert!(Node::from(&step).get_ancestor(NodeKind::Feature).is_none());
        assert!(Node::from(&old).parent().is_none());
        assert_eq!(Node::from(&feature).children().len(), 1);
    }
}
