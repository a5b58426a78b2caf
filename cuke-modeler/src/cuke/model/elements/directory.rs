use crate::cuke::formats::GherkinFormatter;
use crate::cuke::model::source::ParentLink;
use crate::cuke::model::traits::{Containing, Nested};
use crate::cuke::model::{Node, Shared};
use std::fmt;
use std::path::PathBuf;

use super::feature_file::file_name;
use super::FeatureFile;

/// A directory of feature files and nested directories.
///
/// Directories are filled by the [loader](crate::cuke::loader) or by hand through
/// [`attach`](crate::cuke::model::attach).
#[derive(Debug, Default)]
pub struct Directory {
    pub path: PathBuf,
    pub feature_files: Vec<Shared<FeatureFile>>,
    pub directories: Vec<Shared<Directory>>,
    pub parent: ParentLink,
}

impl Directory {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    /// Final component of the path.
    pub fn name(&self) -> String {
        file_name(&self.path)
    }

    pub fn feature_file_count(&self) -> usize {
        self.feature_files.len()
    }

    pub fn directory_count(&self) -> usize {
        self.directories.len()
    }
}

impl Nested for Directory {
    fn parent_link(&self) -> &ParentLink {
        &self.parent
    }
}

impl Containing for Directory {
    /// Feature files, then sub-directories.
    fn children(&self) -> Vec<Node> {
        self.feature_files
            .iter()
            .map(Node::from)
            .chain(self.directories.iter().map(Node::from))
            .collect()
    }
}

impl PartialEq for Directory {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
            && self.feature_files == other.feature_files
            && self.directories == other.directories
    }
}

impl fmt::Display for Directory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&GherkinFormatter::default().directory(self))
    }
}
