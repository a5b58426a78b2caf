//! Object model
//!
//! The model is a tree of shared elements. Containers own their children through
//! [`Shared`] handles; children point back at their container through a weak
//! [`ParentLink`], so dropping the root frees the whole tree.
//!
//! Layout
//!
//!     elements     One module per element type (Directory down to Tag and Comment)
//!     node         `Node`, the type-erased handle to any element, and `NodeKind`
//!     traits       Capabilities shared across element types
//!     source       Source text and line tracking, parse-data helpers
//!     attach       Building trees by hand
//!     equality     Structural comparison, across types for stepped elements
//!     ancestry     Upward lookup through parent links
//!
//! Elements parsed from text are linked as they are built. Trees built by hand are linked
//! with [`attach`].

pub mod ancestry;
pub mod attach;
pub mod elements;
pub mod equality;
pub mod node;
pub mod source;
pub mod traits;

pub use ancestry::{ancestors, get_ancestor};
pub use attach::attach;
pub use elements::{
    Background, Comment, Directory, Example, Feature, FeatureFile, Outline, Scenario, Step,
    StepBlock, Tag, Test,
};
pub use equality::equal;
pub use node::{Node, NodeKind, WeakNode};
pub use source::{normalize_description, ParentLink, SourceInfo};
pub use traits::{Containing, Described, Nested, Parsed, Sourced, Stepped, Tagged};

use std::cell::RefCell;
use std::rc::Rc;

/// Shared handle to an element.
pub type Shared<T> = Rc<RefCell<T>>;

pub fn shared<T>(value: T) -> Shared<T> {
    Rc::new(RefCell::new(value))
}
