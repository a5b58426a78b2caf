//! Model traits - common interfaces across element types
//!
//! Each capability is a small trait implemented by the elements that have it:
//!
//! - [`Sourced`]: source text and line, for elements parsed from text
//! - [`Parsed`]: the normalized parse data the element was built from
//! - [`Nested`]: the link to the containing element and ancestor lookup
//! - [`Containing`]: ordered children
//! - [`Stepped`], [`Tagged`], [`Described`]: attribute groups shared by several elements

use super::elements::{Step, Tag};
use super::node::{Node, NodeKind};
use super::source::{ParentLink, SourceInfo};
use super::Shared;
use serde_json::Value;

pub trait Sourced {
    fn source(&self) -> &SourceInfo;

    fn source_text(&self) -> Option<&str> {
        self.source().text.as_deref()
    }

    fn source_line(&self) -> Option<usize> {
        self.source().line
    }
}

pub trait Parsed {
    /// `None` for elements that were not built from text.
    fn parsing_data(&self) -> Option<&Value>;
}

pub trait Nested {
    fn parent_link(&self) -> &ParentLink;

    fn parent(&self) -> Option<Node> {
        self.parent_link().get()
    }

    /// Nearest ancestor of the given kind, starting with the parent.
    fn get_ancestor(&self, kind: NodeKind) -> Option<Node> {
        self.parent()
            .and_then(|parent| super::ancestry::find_from(parent, kind))
    }
}

pub trait Containing {
    /// Every child, in the order documented on the element.
    fn children(&self) -> Vec<Node>;

    /// Structural children only: tags and comments are left out.
    fn contains(&self) -> Vec<Node> {
        self.children()
            .into_iter()
            .filter(|child| !matches!(child.kind(), NodeKind::Tag | NodeKind::Comment))
            .collect()
    }
}

/// Elements made of a step sequence. Two stepped elements are equal when their steps are.
pub trait Stepped {
    fn steps(&self) -> &[Shared<Step>];
}

pub trait Tagged {
    fn tags(&self) -> &[Shared<Tag>];

    fn tag_names(&self) -> Vec<String> {
        self.tags().iter().map(|tag| tag.borrow().name.clone()).collect()
    }
}

pub trait Described {
    fn description(&self) -> &str;
}

/// Implement the source, parse-data and parent facets for an element with the usual
/// `source`, `parsing_data` and `parent` fields.
macro_rules! impl_parsed_element {
    ($element:ty) => {
        impl $crate::cuke::model::traits::Sourced for $element {
            fn source(&self) -> &$crate::cuke::model::source::SourceInfo {
                &self.source
            }
        }

        impl $crate::cuke::model::traits::Parsed for $element {
            fn parsing_data(&self) -> Option<&serde_json::Value> {
                self.parsing_data.as_ref()
            }
        }

        impl $crate::cuke::model::traits::Nested for $element {
            fn parent_link(&self) -> &$crate::cuke::model::source::ParentLink {
                &self.parent
            }
        }
    };
}

pub(crate) use impl_parsed_element;
