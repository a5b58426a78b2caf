//! Output formats
//!
//! Rendering of model elements back to text. Gherkin is the only format: every element's
//! `Display` goes through [`GherkinFormatter`] with the default settings.

pub mod gherkin;

pub use gherkin::GherkinFormatter;
