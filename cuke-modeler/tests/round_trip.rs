//! Round-trip tests
//!
//! Rendering a parsed element and parsing the output again must give an equal element that
//! renders identically. Cases cover each element type with a single attribute set and with
//! everything set.

use cuke_modeler::{
    load_feature_file, shared, Background, Comment, Example, Feature, Outline, Scenario, Step,
    Stepped, Tag,
};
use rstest::rstest;
use std::path::PathBuf;

fn fixture(path: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(path)
}

#[rstest]
#[case::name_only("Feature: a name")]
#[case::description_only("Feature:\n\nSome description.\n  Indented more.")]
#[case::tags_only("@a @b\nFeature:")]
#[case::background_only("Feature:\n\n  Background:\n    * a step")]
#[case::tests_only("Feature:\n\n  Scenario: one\n    * a step\n\n  Scenario Outline: two\n    * a <x> step\n\n  Examples:\n    | x |\n    | 1 |")]
#[case::comments("# first\n# second\nFeature: commented")]
fn test_feature_round_trip(#[case] source: &str) {
    let feature = Feature::parse(source).unwrap();
    let rendered = feature.borrow().to_string();
    let reparsed = Feature::parse(&rendered).unwrap();

    assert_eq!(reparsed.borrow().to_string(), rendered);
    assert!(*reparsed.borrow() == *feature.borrow());
}

#[rstest]
#[case::name_only("Background: setup")]
#[case::description_only("Background:\n\nSome text.")]
#[case::steps_only("Background:\n  * one\n  * two")]
#[case::everything("Background: setup\n\nSome text.\n\n  Given one\n    | a | b |\n  And two\n    \"\"\"\n    doc\n    \"\"\"")]
fn test_background_round_trip(#[case] source: &str) {
    let background = Background::parse(source).unwrap();
    let rendered = background.borrow().to_string();
    let reparsed = Background::parse(&rendered).unwrap();

    assert_eq!(reparsed.borrow().to_string(), rendered);
    assert_eq!(reparsed.borrow().name, background.borrow().name);
    assert_eq!(reparsed.borrow().description, background.borrow().description);
}

#[rstest]
#[case::name_only("Scenario: a test")]
#[case::tags_only("@a\n@b\nScenario:")]
#[case::description_only("Scenario:\n\n  Line one.\n\n  Line three.")]
#[case::steps_only("Scenario:\n  Given a\n  When b\n  Then c")]
#[case::everything("@tag\nScenario: all\n\nWhy.\n\n  Given a table\n    | x\\|y | z |\n  Then a doc\n    \"\"\"json\n    {}\n    \"\"\"")]
fn test_scenario_round_trip(#[case] source: &str) {
    let scenario = Scenario::parse(source).unwrap();
    let rendered = scenario.borrow().to_string();
    let reparsed = Scenario::parse(&rendered).unwrap();

    assert_eq!(reparsed.borrow().to_string(), rendered);
    assert!(*reparsed.borrow() == *scenario.borrow());
    assert_eq!(reparsed.borrow().tags.len(), scenario.borrow().tags.len());
}

#[rstest]
#[case::name_only("Scenario Outline: template")]
#[case::steps_only("Scenario Outline:\n  * a <x>")]
#[case::examples_only("Scenario Outline:\n\nExamples: one\n  | x |\n  | 1 |\n\n@t\nExamples: two\n  | x |\n  | 2 |")]
#[case::everything("@o\nScenario Outline: all\n\nText.\n\n  * a <x>\n\nExamples:\n\nMore text.\n\n  | x |\n  | 1 |")]
fn test_outline_round_trip(#[case] source: &str) {
    let outline = Outline::parse(source).unwrap();
    let rendered = outline.borrow().to_string();
    let reparsed = Outline::parse(&rendered).unwrap();

    assert_eq!(reparsed.borrow().to_string(), rendered);
    assert_eq!(reparsed.borrow().examples.len(), outline.borrow().examples.len());
}

#[rstest]
#[case::name_only("Examples: values")]
#[case::rows_only("Examples:\n  | a | b |\n  | 1 | 2 |")]
#[case::everything("@e\nExamples: all\n\nDescribed.\n\n  | a |\n  | 1 |")]
fn test_example_round_trip(#[case] source: &str) {
    let example = Example::parse(source).unwrap();
    let rendered = example.borrow().to_string();
    let reparsed = Example::parse(&rendered).unwrap();

    assert_eq!(reparsed.borrow().to_string(), rendered);
    assert!(*reparsed.borrow() == *example.borrow());
}

#[rstest]
#[case::plain("Given a step")]
#[case::table("When a table\n  | a  | b |\n  | cc | d |")]
#[case::doc_string("Then a doc string\n  \"\"\"markdown\n  # heading\n    indented\n  \"\"\"")]
fn test_step_round_trip(#[case] source: &str) {
    let step = Step::parse(source).unwrap();
    let rendered = step.borrow().to_string();
    assert_eq!(rendered, source);
    assert!(*Step::parse(&rendered).unwrap().borrow() == *step.borrow());
}

#[test]
fn test_tag_and_comment_round_trip() {
    let tag = Tag::parse("@some_tag").unwrap();
    assert_eq!(Tag::parse(&tag.borrow().to_string()).unwrap().borrow().name, "@some_tag");

    let comment = Comment::parse("# a comment").unwrap();
    assert_eq!(
        Comment::parse(&comment.borrow().to_string()).unwrap().borrow().text,
        "# a comment"
    );
}

#[rstest]
#[case("features/login.feature")]
#[case("features/nested/checkout.feature")]
fn test_fixture_files_round_trip(#[case] path: &str) {
    let file = load_feature_file(fixture(path)).unwrap();
    let rendered = file.borrow().to_string();
    let reparsed = Feature::parse(&rendered).unwrap();

    assert_eq!(reparsed.borrow().to_string(), rendered);
    let original = file.borrow().feature.clone().unwrap();
    assert!(*reparsed.borrow() == *original.borrow());
}

#[test]
fn test_steps_without_text_round_trip() {
    let mut given = Step::new();
    given.keyword = "Given".to_string();
    let mut scenario = Scenario::new();
    scenario.steps = vec![shared(given), shared(Step::new())];

    let rendered = scenario.to_string();
    assert_eq!(rendered, "Scenario:\n  Given \n  * ");
    let reparsed = Scenario::parse(&rendered).unwrap();
    let reparsed = reparsed.borrow();
    assert_eq!(reparsed.description, "");
    assert_eq!(reparsed.steps().len(), 2);
    assert_eq!(reparsed.steps[0].borrow().keyword, "Given");
    assert_eq!(reparsed.steps[0].borrow().text, "");
    assert_eq!(reparsed.steps[1].borrow().keyword, "*");
    assert_eq!(reparsed.to_string(), rendered);
}

#[test]
fn test_bare_steps_keep_their_count() {
    let mut background = Background::new();
    background.steps = vec![shared(Step::new()), shared(Step::new())];
    let rendered = background.to_string();

    let reparsed = Background::parse(&rendered).unwrap();
    assert_eq!(reparsed.borrow().steps.len(), 2);
    assert_eq!(reparsed.borrow().to_string(), rendered);

    let step = Step::parse(&Step::new().to_string()).unwrap();
    assert_eq!(step.borrow().keyword, "*");
    assert_eq!(step.borrow().text, "");
}
