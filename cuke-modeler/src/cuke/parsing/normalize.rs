//! Normalization of the raw document tree
//!
//! The grammar engine's tree is serialized to JSON and reshaped here into the stable map
//! retained on model nodes as their parsing data. Every map has a `type` key; the other keys
//! are named by semantic role:
//!
//! | type              | keys                                                                |
//! |-------------------|---------------------------------------------------------------------|
//! | `GherkinDocument` | `feature` (map or null), `comments`                                  |
//! | `Feature`         | `tags`, `location`, `keyword`, `name`, `description`?, `background`?, `elements`, `comments`, `language` |
//! | `Background`      | `location`, `keyword`, `name`, `description`?, `steps`               |
//! | `Scenario`        | `tags`, `location`, `keyword`, `name`, `description`?, `steps`       |
//! | `ScenarioOutline` | as `Scenario`, plus `examples`                                      |
//! | `Examples`        | `tags`, `location`, `keyword`, `name`, `description`?, `rows`        |
//! | `Step`            | `location`, `keyword` (trimmed), `text`, `block`?                    |
//! | `DataTable`       | `location`, `rows`                                                  |
//! | `DocString`       | `location`, `content`, `content_type`?                              |
//! | `Tag` / `Comment` | `location`, `name` / `text`                                         |
//!
//! Rows are `{location, cells}` with plain string cells. Keys marked `?` are only present when
//! the source has them.

use serde_json::{json, Map, Value};

pub fn document(raw: &Value) -> Value {
    let comments = list(raw, "comments", comment);
    let feature = match raw.get("feature") {
        Some(data) if !data.is_null() => feature(data, &comments),
        _ => Value::Null,
    };
    json!({
        "type": "GherkinDocument",
        "feature": feature,
        "comments": comments,
    })
}

fn feature(raw: &Value, comments: &Value) -> Value {
    let mut map = header("Feature", raw);
    map.insert("tags".into(), list(raw, "tags", tag));
    map.insert("language".into(), field(raw, "language"));
    map.insert("comments".into(), comments.clone());

    let mut elements = Vec::new();
    for child in raw.get("children").and_then(Value::as_array).into_iter().flatten() {
        match child.get("type").and_then(Value::as_str) {
            Some("Background") => {
                map.insert("background".into(), background(child));
            }
            Some("Scenario") => elements.push(scenario(child)),
            Some("ScenarioOutline") => elements.push(outline(child)),
            _ => {}
        }
    }
    map.insert("elements".into(), Value::Array(elements));
    Value::Object(map)
}

fn background(raw: &Value) -> Value {
    let mut map = header("Background", raw);
    map.insert("steps".into(), list(raw, "steps", step));
    Value::Object(map)
}

fn scenario(raw: &Value) -> Value {
    let mut map = header("Scenario", raw);
    map.insert("tags".into(), list(raw, "tags", tag));
    map.insert("steps".into(), list(raw, "steps", step));
    Value::Object(map)
}

fn outline(raw: &Value) -> Value {
    let mut map = header("ScenarioOutline", raw);
    map.insert("tags".into(), list(raw, "tags", tag));
    map.insert("steps".into(), list(raw, "steps", step));
    map.insert("examples".into(), list(raw, "examples", examples));
    Value::Object(map)
}

fn examples(raw: &Value) -> Value {
    let mut map = header("Examples", raw);
    map.insert("tags".into(), list(raw, "tags", tag));

    let mut rows = Vec::new();
    if let Some(row) = raw.get("tableHeader").filter(|row| !row.is_null()) {
        rows.push(table_row(row));
    }
    rows.extend(
        raw.get("tableBody")
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
            .map(table_row),
    );
    map.insert("rows".into(), Value::Array(rows));
    Value::Object(map)
}

fn step(raw: &Value) -> Value {
    let mut map = Map::new();
    map.insert("type".into(), json!("Step"));
    map.insert("location".into(), field(raw, "location"));
    let keyword = raw.get("keyword").and_then(Value::as_str).unwrap_or_default();
    map.insert("keyword".into(), json!(keyword.trim()));
    map.insert("text".into(), field(raw, "text"));

    if let Some(argument) = raw.get("argument").filter(|argument| !argument.is_null()) {
        map.insert("block".into(), block(argument));
    }
    Value::Object(map)
}

fn block(raw: &Value) -> Value {
    match raw.get("type").and_then(Value::as_str) {
        Some("DocString") => {
            let mut map = Map::new();
            map.insert("type".into(), json!("DocString"));
            map.insert("location".into(), field(raw, "location"));
            map.insert("content".into(), field(raw, "content"));
            if let Some(content_type) = raw.get("contentType").filter(|c| !c.is_null()) {
                map.insert("content_type".into(), content_type.clone());
            }
            Value::Object(map)
        }
        _ => json!({
            "type": "DataTable",
            "location": field(raw, "location"),
            "rows": list(raw, "rows", table_row),
        }),
    }
}

fn table_row(raw: &Value) -> Value {
    let cells: Vec<Value> = raw
        .get("cells")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .map(|cell| field(cell, "value"))
        .collect();
    json!({
        "location": field(raw, "location"),
        "cells": cells,
    })
}

fn tag(raw: &Value) -> Value {
    json!({
        "type": "Tag",
        "location": field(raw, "location"),
        "name": field(raw, "name"),
    })
}

fn comment(raw: &Value) -> Value {
    json!({
        "type": "Comment",
        "location": field(raw, "location"),
        "text": field(raw, "text"),
    })
}

/// Keys shared by every keyword-introduced block.
fn header(kind: &str, raw: &Value) -> Map<String, Value> {
    let mut map = Map::new();
    map.insert("type".into(), json!(kind));
    map.insert("location".into(), field(raw, "location"));
    map.insert("keyword".into(), field(raw, "keyword"));
    map.insert("name".into(), field(raw, "name"));
    if let Some(description) = raw
        .get("description")
        .and_then(Value::as_str)
        .filter(|description| !description.trim().is_empty())
    {
        map.insert("description".into(), json!(description));
    }
    map
}

fn field(raw: &Value, key: &str) -> Value {
    raw.get(key).cloned().unwrap_or(Value::Null)
}

fn list(raw: &Value, key: &str, normalize: fn(&Value) -> Value) -> Value {
    Value::Array(
        raw.get(key)
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
            .map(normalize)
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cuke::gherkin::parse_document;

    fn normalized(source: &str) -> Value {
        let parsed = parse_document(source, "test.feature", "en").unwrap();
        document(&serde_json::to_value(parsed).unwrap())
    }

    #[test]
    fn test_document_shape() {
        let data = normalized("# hi\nFeature: f\n");
        assert_eq!(data["type"], "GherkinDocument");
        assert_eq!(data["comments"][0]["text"], "# hi");
        assert_eq!(data["feature"]["type"], "Feature");
        assert_eq!(data["feature"]["comments"][0]["type"], "Comment");
        assert_eq!(data["feature"]["language"], "en");
        assert!(data["feature"].get("description").is_none());
        assert!(data["feature"].get("background").is_none());
    }

    #[test]
    fn test_missing_feature_is_null() {
        let data = normalized("");
        assert!(data["feature"].is_null());
    }

    #[test]
    fn test_elements_and_background() {
        let data = normalized(
            "Feature:\n  Background:\n    * a\n  Scenario: s\n    * b\n  Scenario Outline: o\n    * <c>\n  Examples:\n    | c |\n    | 1 |\n",
        );
        let feature = &data["feature"];
        assert_eq!(feature["background"]["type"], "Background");
        assert_eq!(feature["elements"][0]["type"], "Scenario");
        assert_eq!(feature["elements"][1]["type"], "ScenarioOutline");

        let example = &feature["elements"][1]["examples"][0];
        assert_eq!(example["type"], "Examples");
        assert_eq!(example["rows"][0]["cells"], json!(["c"]));
        assert_eq!(example["rows"][1]["cells"], json!(["1"]));
        assert_eq!(example["rows"][1]["location"]["line"], 10);
    }

    #[test]
    fn test_outline_keys() {
        let data = normalized("Feature:\n  @t\n  Scenario Outline: o\n    desc\n    * step\n");
        let outline = data["feature"]["elements"][0].as_object().unwrap();
        let mut keys: Vec<&str> = outline.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            vec!["description", "examples", "keyword", "location", "name", "steps", "tags", "type"]
        );
    }

    #[test]
    fn test_step_blocks() {
        let data = normalized(
            "Feature:\n  Scenario:\n    Given a table\n      | a |\n    And a doc\n      \"\"\" type\n      text\n      \"\"\"\n",
        );
        let steps = &data["feature"]["elements"][0]["steps"];
        assert_eq!(steps[0]["keyword"], "Given");
        assert_eq!(steps[0]["block"]["type"], "DataTable");
        assert_eq!(steps[0]["block"]["rows"][0]["cells"], json!(["a"]));
        assert_eq!(steps[1]["block"]["type"], "DocString");
        assert_eq!(steps[1]["block"]["content"], "text");
        assert_eq!(steps[1]["block"]["content_type"], "type");
    }
}
