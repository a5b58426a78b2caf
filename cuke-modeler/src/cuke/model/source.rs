//! Source tracking and parse-data helpers
//!
//! Elements built from text remember where they came from ([`SourceInfo`]) and who contains
//! them ([`ParentLink`]). [`Excerpt`] carves the source text of nested elements out of the
//! text that was parsed: an element spans from its first line (its tags, when it has any) up
//! to the line before the next structural sibling, minus trailing blank and comment lines.

use super::node::{Node, WeakNode};
use crate::cuke::error::ModelError;
use serde_json::Value;

/// Where a parsed element came from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceInfo {
    /// The exact lines the element was parsed from.
    pub text: Option<String>,
    /// 1-based line of the element's keyword (or text, for tags and comments).
    pub line: Option<usize>,
}

impl SourceInfo {
    pub(crate) fn parsed(excerpt: &Excerpt<'_>, data: &Value) -> Self {
        Self {
            text: Some(excerpt.text()),
            line: location_line(data),
        }
    }
}

/// Weak link from an element to its container.
#[derive(Debug, Clone, Default)]
pub struct ParentLink(Option<WeakNode>);

impl ParentLink {
    pub fn to(parent: &Node) -> Self {
        Self(Some(parent.downgrade()))
    }

    /// The container, if it is still alive.
    pub fn get(&self) -> Option<Node> {
        self.0.as_ref().and_then(WeakNode::upgrade)
    }

    pub fn is_attached(&self) -> bool {
        self.get().is_some()
    }

    /// Detach from the container, which no longer holds the element.
    pub(crate) fn clear(&mut self) {
        self.0 = None;
    }

    /// Point the link at `parent`. A link to a live container is never replaced.
    pub(crate) fn set(&mut self, parent: &Node, child: &'static str) -> Result<(), ModelError> {
        if self.is_attached() {
            return Err(ModelError::AlreadyAttached { child });
        }
        self.0 = Some(parent.downgrade());
        Ok(())
    }
}

/// A run of lines within the text handed to a `parse` call.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Excerpt<'a> {
    lines: &'a [&'a str],
    /// 1-based, inclusive.
    first: usize,
    last: usize,
}

impl<'a> Excerpt<'a> {
    pub fn whole(lines: &'a [&'a str]) -> Self {
        Self {
            lines,
            first: 1,
            last: lines.len(),
        }
    }

    pub fn text(&self) -> String {
        if self.first > self.last || self.first == 0 {
            return String::new();
        }
        let end = self.last.min(self.lines.len());
        self.lines[self.first - 1..end].join("\n")
    }

    /// A single line.
    pub fn line(&self, number: usize) -> Self {
        let number = number.clamp(self.first, self.last.max(self.first));
        Self {
            first: number,
            last: number,
            ..*self
        }
    }

    /// Excerpts for siblings starting at `starts` (ascending line numbers).
    pub fn split(&self, starts: &[usize]) -> Vec<Excerpt<'a>> {
        starts
            .iter()
            .enumerate()
            .map(|(index, &start)| {
                let bound = starts
                    .get(index + 1)
                    .map(|next| next.saturating_sub(1))
                    .unwrap_or(self.last)
                    .min(self.last);
                self.trimmed(start, bound)
            })
            .collect()
    }

    fn trimmed(&self, first: usize, mut last: usize) -> Self {
        while last > first {
            let line = self.lines.get(last - 1).map(|l| l.trim()).unwrap_or_default();
            if line.is_empty() || line.starts_with('#') {
                last -= 1;
            } else {
                break;
            }
        }
        Self {
            first,
            last: last.max(first),
            ..*self
        }
    }
}

/// Split text into lines such that joining with `\n` gives the text back.
pub(crate) fn lines_of(text: &str) -> Vec<&str> {
    text.split('\n').collect()
}

pub(crate) fn location_line(data: &Value) -> Option<usize> {
    data.get("location")
        .and_then(|location| location.get("line"))
        .and_then(Value::as_u64)
        .map(|line| line as usize)
}

/// First line of an element: its earliest tag, or its own keyword line.
pub(crate) fn start_line(data: &Value) -> usize {
    let own = location_line(data).unwrap_or(1);
    items(data, "tags")
        .filter_map(location_line)
        .chain(std::iter::once(own))
        .min()
        .unwrap_or(own)
}

pub(crate) fn string(data: &Value, key: &str) -> String {
    data.get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

pub(crate) fn items<'v>(data: &'v Value, key: &str) -> impl Iterator<Item = &'v Value> {
    data.get(key).and_then(Value::as_array).into_iter().flatten()
}

/// Rows of cells, as stored under `rows` in tables and examples.
pub(crate) fn rows(data: &Value) -> Vec<Vec<String>> {
    items(data, "rows")
        .map(|row| {
            items(row, "cells")
                .map(|cell| cell.as_str().unwrap_or_default().to_string())
                .collect()
        })
        .collect()
}

/// Normalize description text.
///
/// Leading and trailing blank lines are removed, trailing whitespace is trimmed from every
/// line, and the indentation shared by all non-blank lines is stripped.
pub fn normalize_description(raw: &str) -> String {
    let mut lines: Vec<&str> = raw.lines().map(str::trim_end).collect();
    while lines.first().is_some_and(|line| line.is_empty()) {
        lines.remove(0);
    }
    while lines.last().is_some_and(|line| line.is_empty()) {
        lines.pop();
    }

    let indent = lines
        .iter()
        .filter(|line| !line.is_empty())
        .map(|line| line.chars().take_while(|c| c.is_whitespace()).count())
        .min()
        .unwrap_or(0);

    lines
        .iter()
        .map(|line| line.chars().skip(indent).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

pub(crate) fn description(data: &Value) -> String {
    data.get("description")
        .and_then(Value::as_str)
        .map(normalize_description)
        .unwrap_or_default()
}
