//! Model elements
//!
//! One module per element type. Every element can be built bare (`new()`, all attributes
//! empty) or parsed from text (`parse(..)`), in which case it also carries its source text,
//! source line and parse data, and its children are linked back to it.

pub mod background;
pub mod comment;
pub mod directory;
pub mod example;
pub mod feature;
pub mod feature_file;
pub mod outline;
pub mod scenario;
pub mod step;
pub mod tag;

pub use background::Background;
pub use comment::Comment;
pub use directory::Directory;
pub use example::Example;
pub use feature::{Feature, Test};
pub use feature_file::FeatureFile;
pub use outline::Outline;
pub use scenario::Scenario;
pub use step::{Step, StepBlock};
pub use tag::Tag;

use super::source::{items, location_line, start_line, Excerpt, ParentLink};
use super::Shared;
use serde_json::Value;

/// Tags under `data`, each with its own line as source text.
pub(crate) fn tags_from(data: &Value, excerpt: &Excerpt<'_>, owner: &ParentLink) -> Vec<Shared<Tag>> {
    items(data, "tags")
        .map(|tag| {
            let line = location_line(tag).unwrap_or(1);
            Tag::from_parsed(tag, &excerpt.line(line), owner.clone())
        })
        .collect()
}

/// Source excerpts for a run of sibling blocks, in source order.
pub(crate) fn excerpts_for<'a>(excerpt: &Excerpt<'a>, blocks: &[&Value]) -> Vec<Excerpt<'a>> {
    let starts: Vec<usize> = blocks.iter().map(|block| start_line(block)).collect();
    excerpt.split(&starts)
}

/// Steps under `data`. `later` holds the blocks that follow the steps (an outline's examples),
/// which bound the source text of the last step.
pub(crate) fn steps_from(
    data: &Value,
    later: &[&Value],
    excerpt: &Excerpt<'_>,
    owner: &ParentLink,
) -> Vec<Shared<Step>> {
    let steps: Vec<&Value> = items(data, "steps").collect();
    let mut blocks = steps.clone();
    blocks.extend_from_slice(later);
    let excerpts = excerpts_for(excerpt, &blocks);

    steps
        .iter()
        .zip(&excerpts)
        .map(|(step, step_excerpt)| Step::from_parsed(step, step_excerpt, owner.clone()))
        .collect()
}
