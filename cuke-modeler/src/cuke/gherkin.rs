//! Gherkin grammar engine
//!
//! Turns document text into the raw [ast] tree. The engine knows nothing about the object
//! model: the [parsing adapter](crate::cuke::parsing) treats it as a black box and
//! normalizes its output.
//!
//! Pipeline:
//!
//! 1. [dialect]: keyword tables per locale, embedded from `languages.json`
//! 2. [line]: each line is classified against the active dialect
//! 3. [lexer]: tag lines and table rows are split into items
//! 4. [parser]: a recursive descent over the classified lines builds the [ast]

pub mod ast;
pub mod dialect;
pub mod lexer;
pub mod line;
pub mod parser;

pub use ast::GherkinDocument;
pub use dialect::{Dialect, DEFAULT_DIALECT};
pub use parser::parse_document;
