//! Intra-line lexing
//!
//! Lines are classified by the [line](super::line) matcher; the two line kinds with inner
//! structure, tag lines and table rows, are split into items here with logos.
//!
//! Table cells honor the Gherkin escapes: `\|` is a literal pipe, `\\` a backslash and `\n`
//! a newline. Any other backslash is kept as written. Text after the last unescaped pipe of
//! a row is ignored.

use super::ast::{Location, Tag, TableCell};
use logos::Logos;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
enum CellToken {
    #[token("|")]
    Pipe,
    #[token("\\|")]
    EscapedPipe,
    #[token("\\\\")]
    EscapedBackslash,
    #[token("\\n")]
    EscapedNewline,
    #[token("\\")]
    Backslash,
    #[regex(r"[^|\\]+")]
    Text,
}

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"\s+")]
enum TagToken {
    #[regex(r"@[^\s@]+")]
    Tag,
    #[regex(r"#.*")]
    Comment,
    #[regex(r"[^\s@#][^\s]*")]
    Word,
}

/// Split a table row into trimmed, unescaped cells.
///
/// `row` is the line with its indentation removed and must start with `|`; `column` is the
/// 1-based column of that first pipe.
pub fn split_cells(row: &str, line: usize, column: usize) -> Vec<TableCell> {
    let mut cells = Vec::new();
    let mut cell_start: Option<usize> = None;
    let mut lexer = CellToken::lexer(row);

    while let Some(token) = lexer.next() {
        if token != Ok(CellToken::Pipe) {
            continue;
        }
        let pipe = lexer.span().start;
        if let Some(start) = cell_start {
            let raw = &row[start..pipe];
            let leading = raw.chars().take_while(|c| c.is_whitespace()).count();
            let offset = row[..start].chars().count() + leading;
            cells.push(TableCell {
                location: Location::new(line, column + offset),
                value: unescape_cell(raw.trim()),
            });
        }
        cell_start = Some(lexer.span().end);
    }

    cells
}

/// Resolve the escapes of a single (already trimmed) cell.
pub fn unescape_cell(raw: &str) -> String {
    let mut value = String::with_capacity(raw.len());
    let mut lexer = CellToken::lexer(raw);
    while let Some(token) = lexer.next() {
        match token {
            Ok(CellToken::EscapedPipe) => value.push('|'),
            Ok(CellToken::EscapedBackslash) => value.push('\\'),
            Ok(CellToken::EscapedNewline) => value.push('\n'),
            _ => value.push_str(lexer.slice()),
        }
    }
    value
}

/// Inverse of [`unescape_cell`], used when rendering tables.
pub fn escape_cell(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('|', "\\|")
        .replace('\n', "\\n")
}

/// Split a tag line into tags.
///
/// `text` is the line with its indentation removed; `column` is the 1-based column of its
/// first character. A `#` starting a new word begins a trailing comment. Words that are not
/// tags are reported back as the error message.
pub fn split_tags(text: &str, line: usize, column: usize) -> Result<Vec<Tag>, String> {
    let mut tags = Vec::new();
    let mut lexer = TagToken::lexer(text);

    while let Some(token) = lexer.next() {
        match token {
            Ok(TagToken::Tag) => {
                let offset = text[..lexer.span().start].chars().count();
                tags.push(Tag {
                    location: Location::new(line, column + offset),
                    name: lexer.slice().to_string(),
                });
            }
            Ok(TagToken::Comment) => break,
            Ok(TagToken::Word) => {
                return Err(format!("tags must start with '@', got '{}'", lexer.slice()));
            }
            Err(()) => return Err(format!("invalid tag '{}'", lexer.slice())),
        }
    }

    Ok(tags)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(cells: &[TableCell]) -> Vec<&str> {
        cells.iter().map(|cell| cell.value.as_str()).collect()
    }

    #[test]
    fn test_split_simple_row() {
        let cells = split_cells("| a | bb |", 4, 3);
        assert_eq!(values(&cells), vec!["a", "bb"]);
        assert_eq!(cells[0].location, Location::new(4, 5));
        assert_eq!(cells[1].location, Location::new(4, 9));
    }

    #[test]
    fn test_split_row_without_padding() {
        let cells = split_cells("|value|", 1, 1);
        assert_eq!(values(&cells), vec!["value"]);
    }

    #[test]
    fn test_escaped_cells() {
        let cells = split_cells(r"| a \| b | c \\ d | e \n f | g \x |", 1, 1);
        assert_eq!(values(&cells), vec!["a | b", "c \\ d", "e \n f", "g \\x"]);
    }

    #[test]
    fn test_trailing_text_is_ignored() {
        let cells = split_cells("| a | b | trailing", 1, 1);
        assert_eq!(values(&cells), vec!["a", "b"]);
    }

    #[test]
    fn test_escape_round_trip() {
        let value = "pipe | slash \\ line\nbreak";
        assert_eq!(unescape_cell(&escape_cell(value)), value);
    }

    #[test]
    fn test_split_tags() {
        let tags = split_tags("@tag1 @tag2  @tag3 # a comment", 2, 3).unwrap();
        let names: Vec<_> = tags.iter().map(|tag| tag.name.as_str()).collect();
        assert_eq!(names, vec!["@tag1", "@tag2", "@tag3"]);
        assert_eq!(tags[1].location, Location::new(2, 9));
    }

    #[test]
    fn test_adjacent_tags() {
        let tags = split_tags("@a@b", 1, 1).unwrap();
        let names: Vec<_> = tags.iter().map(|tag| tag.name.as_str()).collect();
        assert_eq!(names, vec!["@a", "@b"]);
    }

    #[test]
    fn test_rejects_words_on_tag_lines() {
        let error = split_tags("@foo bar", 1, 1).unwrap_err();
        assert!(error.contains("bar"));
    }
}
