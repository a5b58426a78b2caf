use crate::cuke::error::ParseError;
use crate::cuke::formats::GherkinFormatter;
use crate::cuke::model::source::{lines_of, string, Excerpt, ParentLink, SourceInfo};
use crate::cuke::model::traits::impl_parsed_element;
use crate::cuke::model::{shared, Shared};
use crate::cuke::parsing::{parse_stand_alone, StandAlone};
use serde_json::Value;
use std::fmt;

/// A tag on a feature, scenario, outline or examples block.
#[derive(Debug, Default)]
pub struct Tag {
    /// Parsed names keep their leading `@`.
    pub name: String,
    pub source: SourceInfo,
    pub parsing_data: Option<Value>,
    pub parent: ParentLink,
}

impl_parsed_element!(Tag);

impl Tag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Parse a tag line; the first tag on it is used.
    pub fn parse(text: &str) -> Result<Shared<Tag>, ParseError> {
        let data = parse_stand_alone(StandAlone::Tag, text)?.unwrap_or_default();
        let lines = lines_of(text);
        Ok(Self::from_parsed(&data, &Excerpt::whole(&lines), ParentLink::default()))
    }

    pub(crate) fn from_parsed(data: &Value, excerpt: &Excerpt<'_>, parent: ParentLink) -> Shared<Tag> {
        shared(Tag {
            name: string(data, "name"),
            source: SourceInfo::parsed(excerpt, data),
            parsing_data: Some(data.clone()),
            parent,
        })
    }
}

impl PartialEq for Tag {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&GherkinFormatter::default().tag(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cuke::model::traits::Sourced;
    use rstest::rstest;

    #[test]
    fn test_parse_tag() {
        let tag = Tag::parse("@some_tag").unwrap();
        let tag = tag.borrow();
        assert_eq!(tag.name, "@some_tag");
        assert_eq!(tag.source_line(), Some(1));
        assert_eq!(tag.to_string(), "@some_tag");
    }

    #[rstest]
    #[case("", "")]
    #[case("foo", "@foo")]
    #[case("@foo", "@foo")]
    fn test_render(#[case] name: &str, #[case] expected: &str) {
        assert_eq!(Tag::named(name).to_string(), expected);
    }

    #[test]
    fn test_parse_error() {
        let error = Tag::parse("bad tag").unwrap_err();
        assert!(error
            .to_string()
            .contains("'cuke_modeler_stand_alone_tag.feature'"));
    }
}
