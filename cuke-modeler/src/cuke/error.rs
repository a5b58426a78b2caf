//! Error types
//!
//! Parsing, tree manipulation and loading each have their own error; [`CukeError`] wraps
//! them for callers that go through the loader.

use std::path::PathBuf;
use thiserror::Error;

/// A document (or stand-alone snippet) failed to parse.
///
/// `file` is the display name the text was parsed under, `line` is 1-based within that text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{file}' (line {line}): {message}")]
pub struct ParseError {
    pub file: String,
    pub line: usize,
    pub message: String,
}

impl ParseError {
    pub fn new(file: impl Into<String>, line: usize, message: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            line,
            message: message.into(),
        }
    }
}

/// Rejected tree manipulation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// The parent kind has no collection for the child kind (e.g. a Tag under a Directory).
    #[error("a {parent} cannot contain a {child}")]
    InvalidChild {
        parent: &'static str,
        child: &'static str,
    },
    #[error("{child} already has a parent")]
    AlreadyAttached { child: &'static str },
    #[error("an example needs a parameter row before argument rows can be added")]
    NoParameters,
    /// The child is the parent itself or one of its ancestors.
    #[error("attaching this {kind} would create a cycle")]
    Cycle { kind: &'static str },
}

#[derive(Debug, Error)]
pub enum CukeError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Model(#[from] ModelError),
    #[error("could not read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid configuration: {0}")]
    Config(#[from] cuke_config::ConfigError),
}

impl CukeError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CukeError::Io {
            path: path.into(),
            source,
        }
    }
}
