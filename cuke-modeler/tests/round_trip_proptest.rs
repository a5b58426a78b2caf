//! Property-based round-trip tests
//!
//! Scenarios built by hand from generated names, tags, steps and step blocks must render to
//! text that parses back into an equal scenario rendering the same way.

use cuke_modeler::{shared, Scenario, Step, StepBlock, Tag};
use proptest::prelude::*;

/// Zero words gives empty text, which a step keeps through the round trip.
fn words_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec("[a-z]{1,8}", 0..4).prop_map(|words| words.join(" "))
}

fn keyword_strategy() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just("Given"),
        Just("When"),
        Just("Then"),
        Just("And"),
        Just("But"),
        Just("*"),
    ]
}

/// Cells never start or end with whitespace, as cells are trimmed when parsed.
fn table_strategy() -> impl Strategy<Value = StepBlock> {
    (1usize..4).prop_flat_map(|columns| {
        prop::collection::vec(
            prop::collection::vec("[a-z0-9|\\\\]{1,6}", columns),
            1..4,
        )
        .prop_map(StepBlock::table)
    })
}

fn doc_string_strategy() -> impl Strategy<Value = StepBlock> {
    (
        prop::collection::vec("[a-z ]{0,12}[a-z]", 1..4),
        prop::option::of("[a-z]{1,6}"),
    )
        .prop_map(|(lines, content_type)| {
            StepBlock::doc_string(lines.join("\n"), content_type.as_deref())
        })
}

fn step_strategy() -> impl Strategy<Value = (String, String, Option<StepBlock>)> {
    (
        keyword_strategy(),
        words_strategy(),
        prop_oneof![
            2 => Just(None),
            1 => table_strategy().prop_map(Some),
            1 => doc_string_strategy().prop_map(Some),
        ],
    )
        .prop_map(|(keyword, text, block)| (keyword.to_string(), text, block))
}

fn scenario_strategy() -> impl Strategy<Value = Scenario> {
    (
        prop::option::of(words_strategy()),
        prop::collection::vec("[a-z_]{1,8}", 0..3),
        prop::collection::vec(step_strategy(), 0..4),
    )
        .prop_map(|(name, tags, steps)| {
            let mut scenario = Scenario::new();
            scenario.name = name.unwrap_or_default();
            scenario.tags = tags.into_iter().map(|tag| shared(Tag::named(tag))).collect();
            scenario.steps = steps
                .into_iter()
                .map(|(keyword, text, block)| {
                    let mut step = Step::new();
                    step.keyword = keyword;
                    step.text = text;
                    step.block = block;
                    shared(step)
                })
                .collect();
            scenario
        })
}

proptest! {
    #[test]
    fn test_rendered_scenarios_parse_back(scenario in scenario_strategy()) {
        let rendered = scenario.to_string();
        let reparsed = Scenario::parse(&rendered).unwrap();

        prop_assert_eq!(reparsed.borrow().to_string(), rendered);
        prop_assert!(*reparsed.borrow() == scenario);
        prop_assert_eq!(&reparsed.borrow().name, &scenario.name);
        prop_assert_eq!(reparsed.borrow().tags.len(), scenario.tags.len());
    }
}
