//! Gherkin dialects
//!
//!     A dialect is the set of localized keyword spellings for one human language. The table
//!     is the complete `gherkin-languages` table shipped with Cucumber, embedded from
//!     `languages.json` and keyed by locale code (`en`, `en-au`, `fr`, `pt`, `ja`, ...).
//!
//!     Step keywords keep their trailing space, as the grammar matches them as line prefixes
//!     (`"Given "`, `"* "`). A few languages have keywords that glue onto the following word
//!     (`"Sachant qu'"`) and therefore carry no space.

use once_cell::sync::Lazy;
use serde::Deserialize;
use std::collections::BTreeMap;

/// Locale code of the dialect used when nothing else is configured.
pub const DEFAULT_DIALECT: &str = "en";

static DIALECTS: Lazy<BTreeMap<String, Dialect>> = Lazy::new(|| {
    serde_json::from_str(include_str!("languages.json"))
        .expect("embedded dialect table is valid JSON")
});

/// Keyword spellings for one language.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dialect {
    pub name: String,
    pub native: String,
    pub feature: Vec<String>,
    pub background: Vec<String>,
    pub scenario: Vec<String>,
    pub scenario_outline: Vec<String>,
    pub examples: Vec<String>,
    pub given: Vec<String>,
    pub when: Vec<String>,
    pub then: Vec<String>,
    pub and: Vec<String>,
    pub but: Vec<String>,
}

impl Dialect {
    /// Look up a dialect by locale code.
    pub fn get(code: &str) -> Option<&'static Dialect> {
        DIALECTS.get(code)
    }

    /// All supported locale codes, sorted.
    pub fn codes() -> impl Iterator<Item = &'static str> {
        DIALECTS.keys().map(String::as_str)
    }

    /// Every step keyword of the dialect, deduplicated, longest first.
    pub fn step_keywords(&self) -> Vec<&str> {
        let mut keywords: Vec<&str> = self
            .given
            .iter()
            .chain(&self.when)
            .chain(&self.then)
            .chain(&self.and)
            .chain(&self.but)
            .map(String::as_str)
            .collect();
        keywords.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()).then(a.cmp(b)));
        keywords.dedup();
        keywords
    }

    pub fn feature_keyword(&self) -> &str {
        primary(&self.feature)
    }

    pub fn background_keyword(&self) -> &str {
        primary(&self.background)
    }

    /// Most languages list their "Example" synonym first, the singular of an examples
    /// keyword. That one is skipped when there is another.
    pub fn scenario_keyword(&self) -> &str {
        match self.scenario.as_slice() {
            [first, second, ..]
                if self
                    .examples
                    .iter()
                    .any(|examples| examples.starts_with(first.as_str())) =>
            {
                second.as_str()
            }
            keywords => primary(keywords),
        }
    }

    pub fn outline_keyword(&self) -> &str {
        primary(&self.scenario_outline)
    }

    pub fn examples_keyword(&self) -> &str {
        primary(&self.examples)
    }

    /// The first given keyword that is not the `*` wildcard, without its trailing space.
    pub fn given_keyword(&self) -> &str {
        self.given
            .iter()
            .map(|keyword| keyword.trim_end())
            .find(|keyword| *keyword != "*")
            .unwrap_or("*")
    }
}

fn primary(keywords: &[String]) -> &str {
    keywords.first().map(String::as_str).unwrap_or_default()
}
