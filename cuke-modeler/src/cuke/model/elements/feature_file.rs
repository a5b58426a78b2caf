//! Feature file
//!
//! A `.feature` file on disk: its path and the feature it holds, if any. Reading the file is
//! left to the [loader](crate::cuke::loader); this type only works from path and text.

use crate::cuke::error::ParseError;
use crate::cuke::formats::GherkinFormatter;
use crate::cuke::model::source::{lines_of, Excerpt, ParentLink};
use crate::cuke::model::traits::{Containing, Nested};
use crate::cuke::model::{shared, Node, Shared};
use crate::cuke::parsing::parse_text;
use std::fmt;
use std::path::{Path, PathBuf};

use super::Feature;

#[derive(Debug, Default)]
pub struct FeatureFile {
    pub path: PathBuf,
    pub feature: Option<Shared<Feature>>,
    pub parent: ParentLink,
}

impl FeatureFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    /// Build a feature file from its path and contents. Text without a feature (empty, or
    /// only comments) gives a file with no feature.
    pub fn parse(path: impl AsRef<Path>, text: &str) -> Result<Shared<FeatureFile>, ParseError> {
        let path = path.as_ref();
        let data = parse_text(text, &path.display().to_string())?;
        let file = shared(FeatureFile::new(path));

        if let Some(feature_data) = data.get("feature").filter(|f| !f.is_null()) {
            let lines = lines_of(text);
            let feature = Feature::from_parsed(
                feature_data,
                &Excerpt::whole(&lines),
                ParentLink::to(&Node::from(&file)),
            );
            file.borrow_mut().feature = Some(feature);
        }
        Ok(file)
    }

    /// Final component of the path.
    pub fn name(&self) -> String {
        file_name(&self.path)
    }
}

pub(crate) fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

impl Nested for FeatureFile {
    fn parent_link(&self) -> &ParentLink {
        &self.parent
    }
}

impl Containing for FeatureFile {
    fn children(&self) -> Vec<Node> {
        self.feature.iter().map(Node::from).collect()
    }
}

impl PartialEq for FeatureFile {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path && self.feature == other.feature
    }
}

impl fmt::Display for FeatureFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&GherkinFormatter::default().feature_file(self))
    }
}
