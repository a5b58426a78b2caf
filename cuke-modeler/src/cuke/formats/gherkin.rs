//! Gherkin formatter
//!
//!     Renders any element, parsed or built by hand, as Gherkin text that parses back into an
//!     equal element. Rendering never fails: missing keywords fall back to the active dialect
//!     and empty attributes are left out.
//!
//!     Layout rules:
//!
//!         - Tags share one line, each with a leading `@`.
//!         - A description sits at its owner's indentation, after a blank line. Another blank
//!           line separates it from the steps or rows that follow.
//!         - Steps are indented one level inside their owner, and their tables and doc
//!           strings one level more.
//!         - Examples sit at their outline's indentation, each after a blank line. Their rows
//!           are indented one level.
//!         - The background and tests of a feature are indented one level, each after a blank
//!           line. Comments open the feature.
//!
//!     Output carries no trailing newline.

use crate::cuke::gherkin::lexer::escape_cell;
use crate::cuke::gherkin::{Dialect, DEFAULT_DIALECT};
use crate::cuke::model::elements::{
    Background, Comment, Directory, Example, Feature, FeatureFile, Outline, Scenario, Step,
    StepBlock, Tag, Test,
};
use crate::cuke::model::{Node, Shared};
use crate::cuke::parsing::dialect;
use cuke_config::FormattingConfig;

const DEFAULT_INDENT: &str = "  ";
const DOC_STRING_FENCE: &str = "\"\"\"";
const ESCAPED_FENCE: &str = "\\\"\\\"\\\"";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GherkinFormatter {
    indent_string: String,
}

impl Default for GherkinFormatter {
    fn default() -> Self {
        Self::new(DEFAULT_INDENT)
    }
}

impl GherkinFormatter {
    pub fn new(indent_string: impl Into<String>) -> Self {
        Self {
            indent_string: indent_string.into(),
        }
    }

    pub fn from_config(config: &FormattingConfig) -> Self {
        Self::new(config.indent_string.clone())
    }

    /// Render any element.
    pub fn render(&self, node: &Node) -> String {
        match node {
            Node::Directory(rc) => self.directory(&rc.borrow()),
            Node::FeatureFile(rc) => self.feature_file(&rc.borrow()),
            Node::Feature(rc) => self.feature(&rc.borrow()),
            Node::Background(rc) => self.background(&rc.borrow()),
            Node::Scenario(rc) => self.scenario(&rc.borrow()),
            Node::Outline(rc) => self.outline(&rc.borrow()),
            Node::Example(rc) => self.example(&rc.borrow()),
            Node::Step(rc) => self.step(&rc.borrow()),
            Node::Tag(rc) => self.tag(&rc.borrow()),
            Node::Comment(rc) => self.comment(&rc.borrow()),
        }
    }

    pub fn comment(&self, comment: &Comment) -> String {
        comment.text.clone()
    }

    pub fn tag(&self, tag: &Tag) -> String {
        if tag.name.is_empty() || tag.name.starts_with('@') {
            tag.name.clone()
        } else {
            format!("@{}", tag.name)
        }
    }

    pub fn step(&self, step: &Step) -> String {
        let mut out = self.writer();
        let keyword = if step.keyword.is_empty() {
            "*"
        } else {
            step.keyword.as_str()
        };
        // The space after the keyword stays even without text, or the line is not a step.
        out.line(0, &format!("{} {}", keyword, step.text));

        match &step.block {
            Some(StepBlock::DataTable { rows }) => out.table(1, rows),
            Some(StepBlock::DocString {
                content,
                content_type,
            }) => {
                let opening = format!(
                    "{}{}",
                    DOC_STRING_FENCE,
                    content_type.as_deref().unwrap_or_default()
                );
                out.line(1, &opening);
                if !content.is_empty() {
                    out.block(1, &content.replace(DOC_STRING_FENCE, ESCAPED_FENCE));
                }
                out.line(1, DOC_STRING_FENCE);
            }
            None => {}
        }
        out.finish()
    }

    pub fn example(&self, example: &Example) -> String {
        let mut out = self.writer();
        out.tags(self, &example.tags);
        out.line(
            0,
            &name_line(&keyword_or(&example.keyword, Dialect::examples_keyword), &example.name),
        );
        out.description(&example.description);
        if !example.rows.is_empty() {
            if !example.description.is_empty() {
                out.blank();
            }
            out.table(1, &example.rows);
        }
        out.finish()
    }

    pub fn background(&self, background: &Background) -> String {
        let mut out = self.writer();
        out.line(
            0,
            &name_line(
                &keyword_or(&background.keyword, Dialect::background_keyword),
                &background.name,
            ),
        );
        out.description(&background.description);
        self.write_steps(&mut out, &background.description, &background.steps);
        out.finish()
    }

    pub fn scenario(&self, scenario: &Scenario) -> String {
        let mut out = self.writer();
        out.tags(self, &scenario.tags);
        out.line(
            0,
            &name_line(
                &keyword_or(&scenario.keyword, Dialect::scenario_keyword),
                &scenario.name,
            ),
        );
        out.description(&scenario.description);
        self.write_steps(&mut out, &scenario.description, &scenario.steps);
        out.finish()
    }

    pub fn outline(&self, outline: &Outline) -> String {
        let mut out = self.writer();
        out.tags(self, &outline.tags);
        out.line(
            0,
            &name_line(
                &keyword_or(&outline.keyword, Dialect::outline_keyword),
                &outline.name,
            ),
        );
        out.description(&outline.description);
        self.write_steps(&mut out, &outline.description, &outline.steps);
        for example in &outline.examples {
            out.blank();
            out.block(0, &self.example(&example.borrow()));
        }
        out.finish()
    }

    pub fn feature(&self, feature: &Feature) -> String {
        let mut out = self.writer();
        for comment in &feature.comments {
            let rendered = self.comment(&comment.borrow());
            if !rendered.is_empty() {
                out.line(0, &rendered);
            }
        }
        out.tags(self, &feature.tags);
        out.line(
            0,
            &name_line(
                &keyword_or(&feature.keyword, Dialect::feature_keyword),
                &feature.name,
            ),
        );
        out.description(&feature.description);

        if let Some(background) = &feature.background {
            out.blank();
            out.block(1, &self.background(&background.borrow()));
        }
        for test in &feature.tests {
            out.blank();
            let rendered = match test {
                Test::Scenario(scenario) => self.scenario(&scenario.borrow()),
                Test::Outline(outline) => self.outline(&outline.borrow()),
            };
            out.block(1, &rendered);
        }
        out.finish()
    }

    pub fn feature_file(&self, file: &FeatureFile) -> String {
        file.feature
            .as_ref()
            .map(|feature| self.feature(&feature.borrow()))
            .unwrap_or_default()
    }

    /// Feature files, then sub-directories, separated by blank lines.
    pub fn directory(&self, directory: &Directory) -> String {
        directory
            .feature_files
            .iter()
            .map(|file| self.feature_file(&file.borrow()))
            .chain(
                directory
                    .directories
                    .iter()
                    .map(|sub| self.directory(&sub.borrow())),
            )
            .filter(|rendered| !rendered.is_empty())
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    fn write_steps(&self, out: &mut Writer<'_>, description: &str, steps: &[Shared<Step>]) {
        if steps.is_empty() {
            return;
        }
        if !description.is_empty() {
            out.blank();
        }
        for step in steps {
            out.block(1, &self.step(&step.borrow()));
        }
    }

    fn writer(&self) -> Writer<'_> {
        Writer {
            indent_string: &self.indent_string,
            lines: Vec::new(),
        }
    }
}

/// Line buffer for one element.
struct Writer<'a> {
    indent_string: &'a str,
    lines: Vec<String>,
}

impl Writer<'_> {
    fn indent(&self, level: usize) -> String {
        self.indent_string.repeat(level)
    }

    fn line(&mut self, level: usize, text: &str) {
        if text.is_empty() {
            self.lines.push(String::new());
        } else {
            self.lines.push(format!("{}{}", self.indent(level), text));
        }
    }

    /// Every line of `text`, indented. Blank lines stay empty.
    fn block(&mut self, level: usize, text: &str) {
        for line in text.split('\n') {
            self.line(level, line);
        }
    }

    /// A single blank line, never at the start and never doubled.
    fn blank(&mut self) {
        if self.lines.last().is_some_and(|last| !last.is_empty()) {
            self.lines.push(String::new());
        }
    }

    fn tags(&mut self, formatter: &GherkinFormatter, tags: &[Shared<Tag>]) {
        let rendered: Vec<String> = tags
            .iter()
            .map(|tag| formatter.tag(&tag.borrow()))
            .filter(|tag| !tag.is_empty())
            .collect();
        if !rendered.is_empty() {
            self.line(0, &rendered.join(" "));
        }
    }

    fn description(&mut self, description: &str) {
        if !description.is_empty() {
            self.blank();
            self.block(0, description);
        }
    }

    /// Table rows with every column padded to its widest cell.
    fn table(&mut self, level: usize, rows: &[Vec<String>]) {
        let escaped: Vec<Vec<String>> = rows
            .iter()
            .map(|row| row.iter().map(|cell| escape_cell(cell)).collect())
            .collect();
        let columns = escaped.iter().map(Vec::len).max().unwrap_or(0);
        let widths: Vec<usize> = (0..columns)
            .map(|column| {
                escaped
                    .iter()
                    .filter_map(|row| row.get(column))
                    .map(|cell| cell.chars().count())
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        for row in &escaped {
            let cells: Vec<String> = row
                .iter()
                .zip(&widths)
                .map(|(cell, width)| format!("{:<width$}", cell, width = width))
                .collect();
            let text = if cells.is_empty() {
                "|".to_string()
            } else {
                format!("| {} |", cells.join(" | "))
            };
            self.line(level, &text);
        }
    }

    fn finish(self) -> String {
        self.lines.join("\n")
    }
}

/// `keyword`, or the active dialect's keyword when it is empty.
fn keyword_or(keyword: &str, fallback: fn(&Dialect) -> &str) -> String {
    if !keyword.is_empty() {
        return keyword.to_string();
    }
    Dialect::get(&dialect())
        .or_else(|| Dialect::get(DEFAULT_DIALECT))
        .map(fallback)
        .unwrap_or_default()
        .to_string()
}

fn name_line(keyword: &str, name: &str) -> String {
    if name.is_empty() {
        format!("{}:", keyword)
    } else {
        format!("{}: {}", keyword, name)
    }
}
