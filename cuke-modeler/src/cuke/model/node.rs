//! Node
//!
//! `Node` is the common handle for every element of the model. It lets tooling walk mixed
//! structures (a directory of files, a feature with scenarios and outlines) without knowing
//! the concrete types, and is what parent links point back to.
//!
//! Nodes are shared handles: cloning a `Node` clones the handle, not the element.

use super::elements::{
    Background, Comment, Directory, Example, Feature, FeatureFile, Outline, Scenario, Step, Tag,
};
use super::source::ParentLink;
use super::traits::{Containing, Nested};
use super::Shared;
use std::any::Any;
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

/// Strong handle to any model element.
#[derive(Debug, Clone)]
pub enum Node {
    Directory(Shared<Directory>),
    FeatureFile(Shared<FeatureFile>),
    Feature(Shared<Feature>),
    Background(Shared<Background>),
    Scenario(Shared<Scenario>),
    Outline(Shared<Outline>),
    Example(Shared<Example>),
    Step(Shared<Step>),
    Tag(Shared<Tag>),
    Comment(Shared<Comment>),
}

/// Non-owning handle, used for parent links.
#[derive(Debug, Clone)]
pub enum WeakNode {
    Directory(Weak<RefCell<Directory>>),
    FeatureFile(Weak<RefCell<FeatureFile>>),
    Feature(Weak<RefCell<Feature>>),
    Background(Weak<RefCell<Background>>),
    Scenario(Weak<RefCell<Scenario>>),
    Outline(Weak<RefCell<Outline>>),
    Example(Weak<RefCell<Example>>),
    Step(Weak<RefCell<Step>>),
    Tag(Weak<RefCell<Tag>>),
    Comment(Weak<RefCell<Comment>>),
}

/// Element kinds, used to query ancestry.
///
/// `Test` is not an element of its own: it matches both scenarios and outlines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Directory,
    FeatureFile,
    Feature,
    Background,
    Scenario,
    Outline,
    Example,
    Step,
    Tag,
    Comment,
    Test,
}

impl NodeKind {
    pub fn name(self) -> &'static str {
        match self {
            NodeKind::Directory => "Directory",
            NodeKind::FeatureFile => "FeatureFile",
            NodeKind::Feature => "Feature",
            NodeKind::Background => "Background",
            NodeKind::Scenario => "Scenario",
            NodeKind::Outline => "Outline",
            NodeKind::Example => "Example",
            NodeKind::Step => "Step",
            NodeKind::Tag => "Tag",
            NodeKind::Comment => "Comment",
            NodeKind::Test => "Test",
        }
    }

    /// Whether an element of kind `self` satisfies a query for `query`.
    pub fn matches(self, query: NodeKind) -> bool {
        self == query
            || (query == NodeKind::Test && matches!(self, NodeKind::Scenario | NodeKind::Outline))
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Apply `$body` to the shared element inside a `Node`, whatever its type.
macro_rules! with_element {
    ($node:expr, $element:ident => $body:expr) => {
        match $node {
            Node::Directory($element) => $body,
            Node::FeatureFile($element) => $body,
            Node::Feature($element) => $body,
            Node::Background($element) => $body,
            Node::Scenario($element) => $body,
            Node::Outline($element) => $body,
            Node::Example($element) => $body,
            Node::Step($element) => $body,
            Node::Tag($element) => $body,
            Node::Comment($element) => $body,
        }
    };
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Directory(_) => NodeKind::Directory,
            Node::FeatureFile(_) => NodeKind::FeatureFile,
            Node::Feature(_) => NodeKind::Feature,
            Node::Background(_) => NodeKind::Background,
            Node::Scenario(_) => NodeKind::Scenario,
            Node::Outline(_) => NodeKind::Outline,
            Node::Example(_) => NodeKind::Example,
            Node::Step(_) => NodeKind::Step,
            Node::Tag(_) => NodeKind::Tag,
            Node::Comment(_) => NodeKind::Comment,
        }
    }

    pub fn downgrade(&self) -> WeakNode {
        match self {
            Node::Directory(rc) => WeakNode::Directory(Rc::downgrade(rc)),
            Node::FeatureFile(rc) => WeakNode::FeatureFile(Rc::downgrade(rc)),
            Node::Feature(rc) => WeakNode::Feature(Rc::downgrade(rc)),
            Node::Background(rc) => WeakNode::Background(Rc::downgrade(rc)),
            Node::Scenario(rc) => WeakNode::Scenario(Rc::downgrade(rc)),
            Node::Outline(rc) => WeakNode::Outline(Rc::downgrade(rc)),
            Node::Example(rc) => WeakNode::Example(Rc::downgrade(rc)),
            Node::Step(rc) => WeakNode::Step(Rc::downgrade(rc)),
            Node::Tag(rc) => WeakNode::Tag(Rc::downgrade(rc)),
            Node::Comment(rc) => WeakNode::Comment(Rc::downgrade(rc)),
        }
    }

    /// Address of the shared element; equal for handles to the same element.
    pub fn address(&self) -> usize {
        with_element!(self, rc => Rc::as_ptr(rc) as *const () as usize)
    }

    /// Whether both handles point at the same element.
    pub fn ptr_eq(&self, other: &Node) -> bool {
        self.address() == other.address()
    }

    pub fn parent(&self) -> Option<Node> {
        with_element!(self, rc => rc.borrow().parent())
    }

    pub(crate) fn with_parent_link<R>(&self, f: impl FnOnce(&mut ParentLink) -> R) -> R {
        with_element!(self, rc => f(&mut rc.borrow_mut().parent))
    }

    /// Nearest ancestor of the given kind.
    pub fn get_ancestor(&self, kind: NodeKind) -> Option<Node> {
        super::ancestry::get_ancestor(self, kind)
    }

    /// Ordered children; empty for leaf elements.
    pub fn children(&self) -> Vec<Node> {
        match self {
            Node::Directory(rc) => rc.borrow().children(),
            Node::FeatureFile(rc) => rc.borrow().children(),
            Node::Feature(rc) => rc.borrow().children(),
            Node::Background(rc) => rc.borrow().children(),
            Node::Scenario(rc) => rc.borrow().children(),
            Node::Outline(rc) => rc.borrow().children(),
            Node::Example(rc) => rc.borrow().children(),
            Node::Step(_) | Node::Tag(_) | Node::Comment(_) => Vec::new(),
        }
    }

    /// Structural children, without tags or comments.
    pub fn contains(&self) -> Vec<Node> {
        match self {
            Node::Directory(rc) => rc.borrow().contains(),
            Node::FeatureFile(rc) => rc.borrow().contains(),
            Node::Feature(rc) => rc.borrow().contains(),
            Node::Background(rc) => rc.borrow().contains(),
            Node::Scenario(rc) => rc.borrow().contains(),
            Node::Outline(rc) => rc.borrow().contains(),
            Node::Example(rc) => rc.borrow().contains(),
            Node::Step(_) | Node::Tag(_) | Node::Comment(_) => Vec::new(),
        }
    }

    /// Recover a node from a type-erased value: a `Node` or any shared element.
    pub fn from_any(value: &dyn Any) -> Option<Node> {
        if let Some(node) = value.downcast_ref::<Node>() {
            return Some(node.clone());
        }
        macro_rules! try_shared {
            ($($variant:ident),*) => {
                $(
                    if let Some(rc) = value.downcast_ref::<Shared<$variant>>() {
                        return Some(Node::$variant(rc.clone()));
                    }
                )*
            };
        }
        try_shared!(
            Directory,
            FeatureFile,
            Feature,
            Background,
            Scenario,
            Outline,
            Example,
            Step,
            Tag,
            Comment
        );
        None
    }
}

impl WeakNode {
    pub fn upgrade(&self) -> Option<Node> {
        match self {
            WeakNode::Directory(weak) => weak.upgrade().map(Node::Directory),
            WeakNode::FeatureFile(weak) => weak.upgrade().map(Node::FeatureFile),
            WeakNode::Feature(weak) => weak.upgrade().map(Node::Feature),
            WeakNode::Background(weak) => weak.upgrade().map(Node::Background),
            WeakNode::Scenario(weak) => weak.upgrade().map(Node::Scenario),
            WeakNode::Outline(weak) => weak.upgrade().map(Node::Outline),
            WeakNode::Example(weak) => weak.upgrade().map(Node::Example),
            WeakNode::Step(weak) => weak.upgrade().map(Node::Step),
            WeakNode::Tag(weak) => weak.upgrade().map(Node::Tag),
            WeakNode::Comment(weak) => weak.upgrade().map(Node::Comment),
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        with_element!(self, rc => write!(f, "{}", rc.borrow()))
    }
}

macro_rules! impl_from_shared {
    ($($variant:ident),*) => {
        $(
            impl From<Shared<$variant>> for Node {
                fn from(rc: Shared<$variant>) -> Self {
                    Node::$variant(rc)
                }
            }

            impl From<&Shared<$variant>> for Node {
                fn from(rc: &Shared<$variant>) -> Self {
                    Node::$variant(rc.clone())
                }
            }
        )*
    };
}

impl_from_shared!(
    Directory,
    FeatureFile,
    Feature,
    Background,
    Scenario,
    Outline,
    Example,
    Step,
    Tag,
    Comment
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cuke::model::shared;

    #[test]
    fn test_test_kind_matches_scenarios_and_outlines() {
        assert!(NodeKind::Scenario.matches(NodeKind::Test));
        assert!(NodeKind::Outline.matches(NodeKind::Test));
        assert!(!NodeKind::Background.matches(NodeKind::Test));
        assert!(NodeKind::Step.matches(NodeKind::Step));
    }

    #[test]
    fn test_handles_to_the_same_element() {
        let step = shared(Step::new());
        let a = Node::from(&step);
        let b = Node::Step(step.clone());
        let other = Node::from(shared(Step::new()));
        assert!(a.ptr_eq(&b));
        assert!(!a.ptr_eq(&other));
    }

    #[test]
    fn test_weak_handles_do_not_keep_elements_alive() {
        let tag = Node::from(shared(Tag::new()));
        let weak = tag.downgrade();
        assert!(weak.upgrade().is_some());
        drop(tag);
        assert!(weak.upgrade().is_none());
    }

    #[test]
    fn test_from_any() {
        let step = shared(Step::new());
        assert!(Node::from_any(&step).is_some());
        assert!(Node::from_any(&Node::from(&step)).is_some());
        assert!(Node::from_any(&"foo").is_none());
        assert!(Node::from_any(&1).is_none());
    }
}
