//! # cuke-modeler
//!
//! An object model for Gherkin feature files and the directories that hold them.
//!
//! Text goes in through `parse` constructors or the [loader](cuke::loader); what comes out
//! is a tree of typed elements (directories, feature files, features, backgrounds,
//! scenarios, outlines, examples, steps, tags, comments) linked in both directions. Any
//! element, parsed or built by hand, renders back to Gherkin through `Display`.
//!
//! ```rust,ignore
//! use cuke_modeler::{Feature, Containing};
//!
//! let feature = Feature::parse("Feature: login\n  Scenario: ok\n    * it works")?;
//! assert_eq!(feature.borrow().tests.len(), 1);
//! println!("{}", feature.borrow());
//! ```

pub mod cuke;

pub use cuke::{configure, configure_project};
pub use cuke::error::{CukeError, ModelError, ParseError};
pub use cuke::formats::GherkinFormatter;
pub use cuke::loader::{load_directory, load_feature_file, DirectoryLoader};
pub use cuke::model::{
    attach, equal, get_ancestor, shared, Background, Comment, Containing, Described, Directory,
    Example, Feature, FeatureFile, Nested, Node, NodeKind, Outline, Parsed, Scenario, Shared,
    Sourced, Step, StepBlock, Stepped, Tag, Tagged, Test,
};
pub use cuke::parsing::{dialect, set_dialect, with_dialect, DialectGuard};
