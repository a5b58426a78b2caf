//! Loading from disk
//!
//! `DirectoryLoader` reads feature files and walks directory trees, handing path and text
//! to the model constructors. Each directory is listed once, entries sorted by name; files
//! with the feature extension are parsed and sub-directories are loaded recursively. Other
//! files are skipped.
//!
//! # Example
//!
//! ```rust,ignore
//! use cuke_modeler::cuke::loader::load_directory;
//!
//! let features = load_directory("features")?;
//! println!("{} feature files", features.borrow().feature_file_count());
//! ```

use crate::cuke::error::CukeError;
use crate::cuke::model::{attach, shared, Directory, FeatureFile, Node, Shared};
use cuke_config::LoadingConfig;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const DEFAULT_EXTENSION: &str = "feature";

/// Loads feature files and directories with a configurable file extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryLoader {
    extension: String,
}

impl Default for DirectoryLoader {
    fn default() -> Self {
        Self::new(DEFAULT_EXTENSION)
    }
}

impl DirectoryLoader {
    /// `extension` is matched without its leading dot.
    pub fn new(extension: impl Into<String>) -> Self {
        let extension: String = extension.into();
        Self {
            extension: extension.trim_start_matches('.').to_string(),
        }
    }

    pub fn from_config(config: &LoadingConfig) -> Self {
        Self::new(config.feature_extension.clone())
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Read and parse a single feature file.
    pub fn load_feature_file(&self, path: impl AsRef<Path>) -> Result<Shared<FeatureFile>, CukeError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|error| CukeError::io(path, error))?;
        let file = FeatureFile::parse(path, &text)?;
        if file.borrow().feature.is_none() {
            warn!(path = %path.display(), "feature file holds no feature");
        }
        Ok(file)
    }

    /// Load a directory tree. Everything loaded is linked to its parent directory.
    pub fn load_directory(&self, path: impl AsRef<Path>) -> Result<Shared<Directory>, CukeError> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading directory");

        let directory = shared(Directory::new(path));
        let node = Node::from(&directory);

        for entry in self.entries(path)? {
            if entry.is_dir() {
                let sub = self.load_directory(&entry)?;
                attach(&node, Node::from(sub))?;
            } else if self.is_feature_file(&entry) {
                let file = self.load_feature_file(&entry)?;
                attach(&node, Node::from(file))?;
            } else {
                debug!(path = %entry.display(), "skipping non-feature file");
            }
        }

        debug!(
            path = %path.display(),
            feature_files = directory.borrow().feature_file_count(),
            directories = directory.borrow().directory_count(),
            "loaded directory"
        );
        Ok(directory)
    }

    /// Paths directly inside `path`, sorted by name.
    fn entries(&self, path: &Path) -> Result<Vec<PathBuf>, CukeError> {
        let mut entries = fs::read_dir(path)
            .map_err(|error| CukeError::io(path, error))?
            .map(|entry| entry.map(|entry| entry.path()))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|error| CukeError::io(path, error))?;
        entries.sort();
        Ok(entries)
    }

    fn is_feature_file(&self, path: &Path) -> bool {
        path.extension()
            .is_some_and(|extension| extension.to_string_lossy() == self.extension)
    }
}

/// Load a directory tree with the default settings.
pub fn load_directory(path: impl AsRef<Path>) -> Result<Shared<Directory>, CukeError> {
    DirectoryLoader::default().load_directory(path)
}

/// Load a single feature file with the default settings.
pub fn load_feature_file(path: impl AsRef<Path>) -> Result<Shared<FeatureFile>, CukeError> {
    DirectoryLoader::default().load_feature_file(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cuke::model::{Nested, NodeKind};
    use tempfile::TempDir;

    fn write(dir: &Path, name: &str, text: &str) {
        fs::write(dir.join(name), text).unwrap();
    }

    #[test]
    fn test_loads_sorted_files_and_sub_directories() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "b.feature", "Feature: b");
        write(temp.path(), "a.feature", "Feature: a");
        write(temp.path(), "notes.txt", "not gherkin");
        fs::create_dir(temp.path().join("nested")).unwrap();
        write(&temp.path().join("nested"), "c.feature", "Feature: c");

        let root = load_directory(temp.path()).unwrap();
        let root = root.borrow();
        let names: Vec<_> = root.feature_files.iter().map(|f| f.borrow().name()).collect();
        assert_eq!(names, vec!["a.feature", "b.feature"]);
        assert_eq!(root.directory_count(), 1);

        let nested = root.directories[0].clone();
        assert_eq!(nested.borrow().name(), "nested");
        let file = nested.borrow().feature_files[0].clone();
        let parent = file.borrow().parent().unwrap();
        assert!(parent.ptr_eq(&Node::from(&nested)));
        assert_eq!(
            file.borrow().get_ancestor(NodeKind::Directory).unwrap().kind(),
            NodeKind::Directory
        );
    }

    #[test]
    fn test_empty_directory() {
        let temp = TempDir::new().unwrap();
        let root = load_directory(temp.path()).unwrap();
        assert_eq!(root.borrow().feature_file_count(), 0);
        assert_eq!(root.borrow().directory_count(), 0);
    }

    #[test]
    fn test_missing_directory_names_the_path() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("missing");
        let error = load_directory(&missing).unwrap_err();
        assert!(matches!(error, CukeError::Io { .. }));
        assert!(error.to_string().contains("missing"));
    }

    #[test]
    fn test_parse_errors_propagate() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "bad.feature", "not gherkin");
        let error = load_directory(temp.path()).unwrap_err();
        assert!(matches!(error, CukeError::Parse(_)));
        assert!(error.to_string().contains("bad.feature"));
    }

    #[test]
    fn test_custom_extension() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "a.feature", "Feature: a");
        write(temp.path(), "b.story", "Feature: b");
        let root = DirectoryLoader::new(".story").load_directory(temp.path()).unwrap();
        let names: Vec<_> = root.borrow().feature_files.iter().map(|f| f.borrow().name()).collect();
        assert_eq!(names, vec!["b.story"]);
    }

    #[test]
    fn test_from_config() {
        let config = cuke_config::load_defaults().unwrap();
        assert_eq!(DirectoryLoader::from_config(&config.loading), DirectoryLoader::default());
    }
}
