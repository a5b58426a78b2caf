//! Line classification
//!
//! Gherkin is line oriented: every line is recognized on its own, in this order, and the
//! first match wins.
//!
//! 1. blank lines
//! 2. `# language: xx` headers, then other `#` comments
//! 3. tag lines (starting with `@`)
//! 4. block headers (`<keyword>:`), longest keyword first
//! 5. steps (`<keyword><text>`), longest keyword first
//! 6. doc string fences (`"""` or three backticks, optionally followed by a content type)
//! 7. table rows (starting with `|`)
//! 8. anything else, which is description text or an error depending on where it occurs
//!
//! Whether a line is legal at its position is the [parser](super::parser)'s concern.

use super::dialect::Dialect;
use once_cell::sync::Lazy;
use regex::Regex;

static LANGUAGE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#\s*language\s*:\s*([a-zA-Z0-9_\-]+)\s*$").unwrap());

pub const DOC_STRING_FENCES: [&str; 2] = ["\"\"\"", "```"];

/// Keyword-introduced blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Block {
    Feature,
    Background,
    Scenario,
    ScenarioOutline,
    Examples,
}

impl Block {
    pub fn label(self) -> &'static str {
        match self {
            Block::Feature => "FeatureLine",
            Block::Background => "BackgroundLine",
            Block::Scenario => "ScenarioLine",
            Block::ScenarioOutline => "ScenarioOutlineLine",
            Block::Examples => "ExamplesLine",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    Empty,
    Comment,
    Language(String),
    TagLine,
    Header {
        block: Block,
        keyword: String,
        name: String,
    },
    Step {
        keyword: String,
        text: String,
    },
    DocStringSeparator {
        delimiter: &'static str,
        content_type: String,
    },
    TableRow,
    Other,
}

impl LineKind {
    /// Token name used in "expected ..." error messages.
    pub fn label(&self) -> &'static str {
        match self {
            LineKind::Empty => "Empty",
            LineKind::Comment => "Comment",
            LineKind::Language(_) => "Language",
            LineKind::TagLine => "TagLine",
            LineKind::Header { block, .. } => block.label(),
            LineKind::Step { .. } => "StepLine",
            LineKind::DocStringSeparator { .. } => "DocStringSeparator",
            LineKind::TableRow => "TableRow",
            LineKind::Other => "Other",
        }
    }
}

/// One physical line of the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line<'a> {
    /// 1-based line number.
    pub number: usize,
    /// The line as written, without its line terminator.
    pub raw: &'a str,
    /// Leading whitespace, in characters.
    pub indent: usize,
    /// The line with surrounding whitespace removed.
    pub text: &'a str,
    pub kind: LineKind,
}

impl<'a> Line<'a> {
    /// 1-based column of the first significant character.
    pub fn column(&self) -> usize {
        self.indent + 1
    }

    /// The text after the indentation, keeping trailing whitespace.
    pub fn unindented(&self) -> &'a str {
        self.raw.trim_start()
    }
}

/// Classifies lines against the keywords of one dialect.
#[derive(Debug, Clone)]
pub struct LineMatcher {
    dialect: &'static Dialect,
    headers: Vec<(Block, &'static str)>,
    steps: Vec<&'static str>,
}

impl LineMatcher {
    pub fn new(dialect: &'static Dialect) -> Self {
        let mut headers: Vec<(Block, &'static str)> = Vec::new();
        for (block, keywords) in [
            (Block::Feature, &dialect.feature),
            (Block::Background, &dialect.background),
            (Block::Scenario, &dialect.scenario),
            (Block::ScenarioOutline, &dialect.scenario_outline),
            (Block::Examples, &dialect.examples),
        ] {
            headers.extend(keywords.iter().map(|keyword| (block, keyword.as_str())));
        }
        headers.sort_by(|a, b| b.1.chars().count().cmp(&a.1.chars().count()));

        Self {
            dialect,
            headers,
            steps: dialect.step_keywords(),
        }
    }

    pub fn dialect(&self) -> &'static Dialect {
        self.dialect
    }

    pub fn classify<'a>(&self, number: usize, raw: &'a str) -> Line<'a> {
        let text = raw.trim();
        let indent = raw.chars().take_while(|c| c.is_whitespace()).count();
        let kind = self.kind_of(raw.trim_start());
        Line {
            number,
            raw,
            indent,
            text,
            kind,
        }
    }

    /// `unindented` keeps its trailing whitespace so that a bare `"Given "` is still a step.
    fn kind_of(&self, unindented: &str) -> LineKind {
        let text = unindented.trim_end();
        if text.is_empty() {
            return LineKind::Empty;
        }
        if text.starts_with('#') {
            return match LANGUAGE_REGEX.captures(text) {
                Some(captures) => LineKind::Language(captures[1].to_string()),
                None => LineKind::Comment,
            };
        }
        if text.starts_with('@') {
            return LineKind::TagLine;
        }
        for (block, keyword) in &self.headers {
            if let Some(rest) = text.strip_prefix(keyword).and_then(|r| r.strip_prefix(':')) {
                return LineKind::Header {
                    block: *block,
                    keyword: keyword.to_string(),
                    name: rest.trim().to_string(),
                };
            }
        }
        for keyword in &self.steps {
            if let Some(rest) = unindented.strip_prefix(keyword) {
                return LineKind::Step {
                    keyword: keyword.to_string(),
                    text: rest.trim().to_string(),
                };
            }
        }
        for delimiter in DOC_STRING_FENCES {
            if let Some(rest) = text.strip_prefix(delimiter) {
                return LineKind::DocStringSeparator {
                    delimiter,
                    content_type: rest.trim().to_string(),
                };
            }
        }
        if text.starts_with('|') {
            return LineKind::TableRow;
        }
        LineKind::Other
    }
}

/// Split source text into lines; `\r\n` and `\n` both terminate a line.
pub fn split_lines(source: &str) -> impl Iterator<Item = (usize, &str)> {
    source
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .enumerate()
        .map(|(index, line)| (index + 1, line))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn matcher(code: &str) -> LineMatcher {
        LineMatcher::new(Dialect::get(code).unwrap())
    }

    #[rstest]
    #[case("", "Empty")]
    #[case("   ", "Empty")]
    #[case("# a comment", "Comment")]
    #[case("@tag @other", "TagLine")]
    #[case("Feature: name", "FeatureLine")]
    #[case("  Background:", "BackgroundLine")]
    #[case("Scenario: name", "ScenarioLine")]
    #[case("Example: name", "ScenarioLine")]
    #[case("Scenario Outline: name", "ScenarioOutlineLine")]
    #[case("Scenarios:", "ExamplesLine")]
    #[case("    Given a step", "StepLine")]
    #[case("* a step", "StepLine")]
    #[case("\"\"\"", "DocStringSeparator")]
    #[case("```json", "DocStringSeparator")]
    #[case("| a | b |", "TableRow")]
    #[case("just some words", "Other")]
    #[case("Feature without colon", "Other")]
    fn test_classification(#[case] text: &str, #[case] expected: &str) {
        assert_eq!(matcher("en").classify(1, text).kind.label(), expected);
    }

    #[test]
    fn test_language_header() {
        let line = matcher("en").classify(1, "  #language:en-au ");
        assert_eq!(line.kind, LineKind::Language("en-au".to_string()));
    }

    #[test]
    fn test_longest_header_keyword_wins() {
        let line = matcher("en").classify(1, "Scenario Outline: outline");
        assert_eq!(
            line.kind,
            LineKind::Header {
                block: Block::ScenarioOutline,
                keyword: "Scenario Outline".to_string(),
                name: "outline".to_string(),
            }
        );
    }

    #[test]
    fn test_step_keyword_and_text() {
        let line = matcher("en-au").classify(7, "    Yeah nah zen  ");
        assert_eq!(line.indent, 4);
        assert_eq!(line.column(), 5);
        assert_eq!(
            line.kind,
            LineKind::Step {
                keyword: "Yeah nah ".to_string(),
                text: "zen".to_string(),
            }
        );
    }

    #[rstest]
    #[case("  Given ", "Given ")]
    #[case("* ", "* ")]
    #[case("    But \t", "But ")]
    fn test_step_without_text(#[case] raw: &str, #[case] keyword: &str) {
        assert_eq!(
            matcher("en").classify(1, raw).kind,
            LineKind::Step {
                keyword: keyword.to_string(),
                text: String::new(),
            }
        );
    }

    #[test]
    fn test_keyword_without_its_space_is_not_a_step() {
        assert_eq!(matcher("en").classify(1, "  Given").kind, LineKind::Other);
        assert_eq!(matcher("en").classify(1, "*").kind, LineKind::Other);
    }

    #[test]
    fn test_glued_step_keyword() {
        let line = matcher("fr").classify(1, "Sachant qu'il pleut");
        assert_eq!(
            line.kind,
            LineKind::Step {
                keyword: "Sachant qu'".to_string(),
                text: "il pleut".to_string(),
            }
        );
    }

    #[test]
    fn test_doc_string_content_type() {
        let line = matcher("en").classify(1, "  \"\"\" text/plain");
        assert_eq!(
            line.kind,
            LineKind::DocStringSeparator {
                delimiter: "\"\"\"",
                content_type: "text/plain".to_string(),
            }
        );
    }

    #[test]
    fn test_split_lines_handles_crlf() {
        let lines: Vec<_> = split_lines("a\r\nb\nc").collect();
        assert_eq!(lines, vec![(1, "a"), (2, "b"), (3, "c")]);
    }
}
