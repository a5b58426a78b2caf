//! Document parser
//!
//! A recursive descent over classified lines. Blank lines and comments may appear between
//! any two constructs; comments are collected at document level wherever they occur,
//! except inside doc strings, where every line is content.
//!
//! Grammar, with `*` for repetition:
//!
//! ```text
//! Document    := Language? Feature?
//! Feature     := TagLine* FeatureLine Description? Background? Test*
//! Background  := BackgroundLine Description? Step*
//! Test        := TagLine* (ScenarioLine | ScenarioOutlineLine) Description? Step* Examples*
//! Examples    := TagLine* ExamplesLine Description? TableRow*
//! Step        := StepLine (DocString | TableRow+)?
//! ```
//!
//! Only outlines may carry examples. What counts as description text depends on the block
//! being described: a step line is description text under a feature header but ends the
//! description of a scenario.

use super::ast::*;
use super::dialect::Dialect;
use super::lexer::{split_cells, split_tags};
use super::line::{split_lines, Block, Line, LineKind, LineMatcher};
use crate::cuke::error::ParseError;

const DOCUMENT_START: &str = "#EOF, #Language, #TagLine, #FeatureLine, #Comment, #Empty";
const FEATURE_BODY: &str =
    "#EOF, #Comment, #BackgroundLine, #TagLine, #ScenarioLine, #ScenarioOutlineLine, #Empty";
const STEP_BODY: &str = "#EOF, #TableRow, #DocStringSeparator, #StepLine, #TagLine, \
                         #ScenarioLine, #ScenarioOutlineLine, #Comment, #Empty";
const OUTLINE_BODY: &str = "#EOF, #TableRow, #DocStringSeparator, #StepLine, #TagLine, \
                            #ExamplesLine, #ScenarioLine, #ScenarioOutlineLine, #Comment, #Empty";
const EXAMPLES_BODY: &str = "#EOF, #TableRow, #TagLine, #ExamplesLine, #ScenarioLine, \
                             #ScenarioOutlineLine, #Comment, #Empty";
const TEST_START: &str = "#TagLine, #ScenarioLine, #ScenarioOutlineLine, #Comment, #Empty";
const FEATURE_START: &str = "#TagLine, #FeatureLine, #Comment, #Empty";
const EXAMPLES_START: &str = "#TagLine, #ExamplesLine, #Comment, #Empty";

/// Parse a whole document.
///
/// `dialect` is the locale code used unless the document starts with a `# language:` header.
pub fn parse_document(
    source: &str,
    file: &str,
    dialect: &str,
) -> Result<GherkinDocument, ParseError> {
    let (dialect, language, header_line) = detect_language(source, file, dialect)?;

    let matcher = LineMatcher::new(dialect);
    let lines = split_lines(source)
        .map(|(number, raw)| {
            let mut line = matcher.classify(number, raw);
            if matches!(line.kind, LineKind::Language(_)) && Some(number) != header_line {
                line.kind = LineKind::Comment;
            }
            line
        })
        .collect();

    Parser {
        file,
        lines,
        pos: 0,
        language,
        comments: Vec::new(),
    }
    .document()
}

/// Find a `# language:` header among the comments and blank lines that open the document.
fn detect_language(
    source: &str,
    file: &str,
    default: &str,
) -> Result<(&'static Dialect, String, Option<usize>), ParseError> {
    let unsupported = |code: &str, line: usize| {
        ParseError::new(file, line, format!("Language not supported: {}", code))
    };
    let fallback = Dialect::get(default).ok_or_else(|| unsupported(default, 1))?;

    let matcher = LineMatcher::new(fallback);
    for (number, raw) in split_lines(source) {
        match matcher.classify(number, raw).kind {
            LineKind::Empty | LineKind::Comment => continue,
            LineKind::Language(code) => {
                let dialect = Dialect::get(&code).ok_or_else(|| unsupported(&code, number))?;
                return Ok((dialect, code, Some(number)));
            }
            _ => break,
        }
    }
    Ok((fallback, default.to_string(), None))
}

struct Parser<'s> {
    file: &'s str,
    lines: Vec<Line<'s>>,
    pos: usize,
    language: String,
    comments: Vec<Comment>,
}

impl<'s> Parser<'s> {
    fn document(mut self) -> Result<GherkinDocument, ParseError> {
        self.skip_trivia();
        let feature = match self.peek() {
            Some(_) => Some(self.feature()?),
            None => None,
        };
        Ok(GherkinDocument {
            feature,
            comments: self.comments,
        })
    }

    fn feature(&mut self) -> Result<Feature, ParseError> {
        let tags = self.tags()?;
        let (line, keyword, name) = match self.peek() {
            Some(line) => match &line.kind {
                LineKind::Header {
                    block: Block::Feature,
                    keyword,
                    name,
                } => (line.clone(), keyword.clone(), name.clone()),
                _ if tags.is_empty() => return Err(self.unexpected(&line, DOCUMENT_START)),
                _ => return Err(self.unexpected(&line, FEATURE_START)),
            },
            None => return Err(self.end_of_file(FEATURE_START)),
        };
        self.pos += 1;
        let description = self.description(Block::Feature);

        let mut children: Vec<FeatureChild> = Vec::new();
        let mut expected = FEATURE_BODY;
        loop {
            self.skip_trivia();
            let Some(next) = self.peek() else { break };
            match &next.kind {
                LineKind::Header {
                    block: Block::Background,
                    ..
                } => {
                    if !children.is_empty() {
                        return Err(self.error(
                            &next,
                            "a Background must come before every Scenario and Scenario Outline",
                        ));
                    }
                    children.push(FeatureChild::Background(self.background()?));
                    expected = STEP_BODY;
                }
                LineKind::TagLine
                | LineKind::Header {
                    block: Block::Scenario | Block::ScenarioOutline,
                    ..
                } => {
                    let child = self.test()?;
                    expected = match child {
                        FeatureChild::ScenarioOutline(_) => OUTLINE_BODY,
                        _ => STEP_BODY,
                    };
                    children.push(child);
                }
                LineKind::Header {
                    block: Block::Feature,
                    ..
                } => {
                    return Err(self.error(&next, "a document may contain only one Feature"));
                }
                LineKind::Header {
                    block: Block::Examples,
                    ..
                } if matches!(children.last(), Some(FeatureChild::Scenario(_))) => {
                    return Err(self.error(
                        &next,
                        "Examples are only allowed in a Scenario Outline",
                    ));
                }
                _ => return Err(self.unexpected(&next, expected)),
            }
        }

        Ok(Feature {
            location: Location::new(line.number, line.column()),
            tags,
            language: self.language.clone(),
            keyword,
            name,
            description,
            children,
        })
    }

    fn background(&mut self) -> Result<Background, ParseError> {
        let (line, keyword, name) = self.header();
        let description = self.description(Block::Background);
        let steps = self.steps()?;
        Ok(Background {
            location: Location::new(line.number, line.column()),
            keyword,
            name,
            description,
            steps,
        })
    }

    fn test(&mut self) -> Result<FeatureChild, ParseError> {
        let tags = self.tags()?;
        let block = match self.peek() {
            Some(line) => match &line.kind {
                LineKind::Header {
                    block: block @ (Block::Scenario | Block::ScenarioOutline),
                    ..
                } => *block,
                LineKind::Header {
                    block: Block::Feature,
                    ..
                } => return Err(self.error(&line, "a document may contain only one Feature")),
                _ => return Err(self.unexpected(&line, TEST_START)),
            },
            None => return Err(self.end_of_file(TEST_START)),
        };

        let (line, keyword, name) = self.header();
        let location = Location::new(line.number, line.column());
        let description = self.description(block);
        let steps = self.steps()?;

        if block == Block::Scenario {
            return Ok(FeatureChild::Scenario(Scenario {
                location,
                tags,
                keyword,
                name,
                description,
                steps,
            }));
        }

        let mut examples = Vec::new();
        while self.examples_follow() {
            examples.push(self.examples()?);
        }
        Ok(FeatureChild::ScenarioOutline(ScenarioOutline {
            location,
            tags,
            keyword,
            name,
            description,
            steps,
            examples,
        }))
    }

    /// Whether the next block is an Examples block, looking past any tags that precede it.
    fn examples_follow(&mut self) -> bool {
        self.skip_trivia();
        self.lines[self.pos..]
            .iter()
            .find(|line| {
                !matches!(
                    line.kind,
                    LineKind::TagLine | LineKind::Empty | LineKind::Comment | LineKind::Language(_)
                )
            })
            .map(|line| {
                matches!(
                    line.kind,
                    LineKind::Header {
                        block: Block::Examples,
                        ..
                    }
                )
            })
            .unwrap_or(false)
    }

    fn examples(&mut self) -> Result<Examples, ParseError> {
        let tags = self.tags()?;
        match self.peek() {
            Some(Line {
                kind: LineKind::Header {
                    block: Block::Examples,
                    ..
                },
                ..
            }) => {}
            Some(line) => return Err(self.unexpected(&line, EXAMPLES_START)),
            None => return Err(self.end_of_file(EXAMPLES_START)),
        }
        let (line, keyword, name) = self.header();
        let description = self.description(Block::Examples);
        self.skip_trivia();
        let mut rows = self.table_rows()?.into_iter();
        let table_header = rows.next();
        let table_body = rows.collect();

        if let Some(next) = self.peek() {
            if matches!(next.kind, LineKind::Step { .. } | LineKind::DocStringSeparator { .. }) {
                return Err(self.unexpected(&next, EXAMPLES_BODY));
            }
        }

        Ok(Examples {
            location: Location::new(line.number, line.column()),
            tags,
            keyword,
            name,
            description,
            table_header,
            table_body,
        })
    }

    fn steps(&mut self) -> Result<Vec<Step>, ParseError> {
        let mut steps = Vec::new();
        loop {
            self.skip_trivia();
            let Some(line) = self.peek() else { break };
            let LineKind::Step { keyword, text } = &line.kind else {
                break;
            };
            let location = Location::new(line.number, line.column());
            let (keyword, text) = (keyword.clone(), text.clone());
            self.pos += 1;
            let argument = self.step_argument()?;
            steps.push(Step {
                location,
                keyword,
                text,
                argument,
            });
        }
        Ok(steps)
    }

    fn step_argument(&mut self) -> Result<Option<StepArgument>, ParseError> {
        self.skip_trivia();
        let Some(line) = self.peek() else {
            return Ok(None);
        };
        match &line.kind {
            LineKind::TableRow => {
                let rows = self.table_rows()?;
                let location = rows
                    .first()
                    .map(|row| row.location)
                    .unwrap_or(Location::new(line.number, line.column()));
                Ok(Some(StepArgument::DataTable(DataTable { location, rows })))
            }
            LineKind::DocStringSeparator {
                delimiter,
                content_type,
            } => {
                let (delimiter, content_type) = (*delimiter, content_type.clone());
                self.pos += 1;
                let content = self.doc_string_content(&line, delimiter)?;
                Ok(Some(StepArgument::DocString(DocString {
                    location: Location::new(line.number, line.column()),
                    content_type: Some(content_type).filter(|c| !c.is_empty()),
                    content,
                    delimiter: delimiter.to_string(),
                })))
            }
            _ => Ok(None),
        }
    }

    fn doc_string_content(&mut self, open: &Line<'s>, delimiter: &str) -> Result<String, ParseError> {
        let escaped = delimiter
            .chars()
            .map(|c| format!("\\{}", c))
            .collect::<String>();
        let mut content: Vec<String> = Vec::new();

        while let Some(line) = self.lines.get(self.pos) {
            self.pos += 1;
            if let LineKind::DocStringSeparator { delimiter: d, .. } = &line.kind {
                if *d == delimiter {
                    return Ok(content.join("\n"));
                }
            }
            let text = strip_indent(line.raw, open.indent);
            content.push(text.replace(&escaped, delimiter));
        }

        Err(self.error(open, "unterminated doc string"))
    }

    /// Consecutive table rows, allowing comments and blank lines between them.
    fn table_rows(&mut self) -> Result<Vec<TableRow>, ParseError> {
        let mut rows: Vec<TableRow> = Vec::new();
        loop {
            self.skip_trivia();
            let Some(line) = self.peek() else { break };
            if line.kind != LineKind::TableRow {
                break;
            }
            let cells = split_cells(line.text, line.number, line.column());
            if let Some(first) = rows.first() {
                if first.cells.len() != cells.len() {
                    return Err(self.error(&line, "inconsistent cell count within the table"));
                }
            }
            rows.push(TableRow {
                location: Location::new(line.number, line.column()),
                cells,
            });
            self.pos += 1;
        }
        Ok(rows)
    }

    fn tags(&mut self) -> Result<Vec<Tag>, ParseError> {
        let mut tags = Vec::new();
        loop {
            self.skip_trivia();
            let Some(line) = self.peek() else { break };
            if line.kind != LineKind::TagLine {
                break;
            }
            let found = split_tags(line.text, line.number, line.column())
                .map_err(|message| self.error(&line, message))?;
            tags.extend(found);
            self.pos += 1;
        }
        Ok(tags)
    }

    /// Consume the header line under the cursor.
    fn header(&mut self) -> (Line<'s>, String, String) {
        let line = self.lines[self.pos].clone();
        self.pos += 1;
        match &line.kind {
            LineKind::Header { keyword, name, .. } => {
                let (keyword, name) = (keyword.clone(), name.clone());
                (line, keyword, name)
            }
            _ => (line, String::new(), String::new()),
        }
    }

    /// Free text following a header, up to the first comment or structural line of the block.
    fn description(&mut self, block: Block) -> Option<String> {
        while self
            .lines
            .get(self.pos)
            .is_some_and(|line| line.kind == LineKind::Empty)
        {
            self.pos += 1;
        }

        let mut text: Vec<&str> = Vec::new();
        while let Some(line) = self.lines.get(self.pos) {
            if ends_description(block, &line.kind) {
                break;
            }
            text.push(line.raw.trim_end());
            self.pos += 1;
        }
        while text.last().is_some_and(|line| line.is_empty()) {
            text.pop();
        }

        if text.is_empty() {
            None
        } else {
            Some(text.join("\n"))
        }
    }

    fn skip_trivia(&mut self) {
        while let Some(line) = self.lines.get(self.pos) {
            match line.kind {
                LineKind::Empty | LineKind::Language(_) => {}
                LineKind::Comment => self.comments.push(Comment {
                    location: Location::new(line.number, 1),
                    text: line.raw.trim().to_string(),
                }),
                _ => break,
            }
            self.pos += 1;
        }
    }

    fn peek(&self) -> Option<Line<'s>> {
        self.lines.get(self.pos).cloned()
    }

    fn error(&self, line: &Line<'_>, message: impl Into<String>) -> ParseError {
        ParseError::new(self.file, line.number, message)
    }

    fn unexpected(&self, line: &Line<'_>, expected: &str) -> ParseError {
        self.error(line, format!("expected: {}, got '{}'", expected, line.text))
    }

    fn end_of_file(&self, expected: &str) -> ParseError {
        ParseError::new(
            self.file,
            self.lines.len(),
            format!("unexpected end of file, expected: {}", expected),
        )
    }
}

fn ends_description(block: Block, kind: &LineKind) -> bool {
    match kind {
        LineKind::Comment | LineKind::Language(_) | LineKind::TagLine => true,
        LineKind::Header { .. } => true,
        LineKind::Step { .. } => !matches!(block, Block::Feature | Block::Examples),
        LineKind::TableRow => block == Block::Examples,
        _ => false,
    }
}

/// Remove up to `indent` leading whitespace characters.
fn strip_indent(raw: &str, indent: usize) -> &str {
    let mut rest = raw;
    for _ in 0..indent {
        match rest.chars().next() {
            Some(c) if c.is_whitespace() => rest = &rest[c.len_utf8()..],
            _ => break,
        }
    }
    rest
}
