//! Tests for the JSON report produced for templates and invocations.
#![expect(
    clippy::expect_used,
    clippy::indexing_slicing,
    reason = "report tests use expect and JSON indexing for clarity"
)]

use outline_steps::json::{self, JsonRenderer};
use outline_steps::{
    DocString, ExamplesTable, Location, ScenarioOutline, StepRegistry, Template, TemplateResult,
};
use rstest::{fixture, rstest};
use serde_json::{Value, json};

#[fixture]
fn outline() -> ScenarioOutline {
    let examples = ExamplesTable::from_raw(vec![
        vec!["n".into(), "who".into()],
        vec!["3".into(), "Ann".into()],
    ])
    .expect("valid examples");
    let given = Template::new(
        "en",
        Location::new("features/notes.feature", 4),
        "Given ",
        "I have <n> notes",
    )
    .expect("valid template");
    let when = Template::new(
        "en",
        Location::new("features/notes.feature", 5),
        "When ",
        "I write",
    )
    .expect("valid template")
    .with_argument(DocString::new("Dear <who>").with_content_type("text"));
    ScenarioOutline::new(
        "Scenario Outline",
        "notes",
        Location::new("features/notes.feature", 3),
    )
    .with_step(given)
    .with_step(when)
    .with_examples(examples)
}

#[fixture]
fn registry() -> StepRegistry {
    let mut registry = StepRegistry::new();
    registry
        .register_at("I have {n:u32} notes", "steps.rs:7")
        .expect("valid pattern");
    registry
}

fn parse(text: &str) -> Value {
    serde_json::from_str(text).expect("valid JSON")
}

#[rstest]
fn templates_serialize_as_skipped_with_their_preview(
    outline: ScenarioOutline,
    registry: StepRegistry,
) {
    let results: Vec<TemplateResult<'_>> = outline
        .steps()
        .iter()
        .map(|step| step.present(&outline, &registry))
        .collect();
    let report = parse(&json::to_string(&results).expect("serializes"));
    let given = &report["steps"][0];
    assert_eq!(given["kind"], "template");
    assert_eq!(given["status"], "skipped");
    assert_eq!(given["exception"], Value::Null);
    assert_eq!(given["background"], false);
    assert_eq!(given["dom_id"], "features_notes_feature_4");
    assert_eq!(given["step_match"], json!({
        "matched": true,
        "name_to_report": "I have <n> notes",
        "pattern": "I have {n:u32} notes",
        "location": "steps.rs:7",
        "arguments": ["3"],
    }));

    let when = &report["steps"][1];
    assert_eq!(when["step_match"]["matched"], false);
    assert_eq!(when["argument"], json!({
        "type": "doc_string",
        "content": "Dear <who>",
        "content_type": "text",
    }));
}

#[rstest]
fn writer_output_matches_string_output(outline: ScenarioOutline, registry: StepRegistry) {
    let results: Vec<TemplateResult<'_>> = outline
        .steps()
        .iter()
        .map(|step| step.present(&outline, &registry))
        .collect();
    let mut buffer = Vec::new();
    json::write(&mut buffer, &results).expect("writes");
    let written = String::from_utf8(buffer).expect("utf-8 output");
    assert_eq!(written, json::to_string(&results).expect("serializes"));
}

#[rstest]
fn renderer_collects_invocations_with_consumed_cells(outline: ScenarioOutline) {
    let mut renderer = JsonRenderer::new();
    for (_, invocations) in outline.expand() {
        for invocation in &invocations {
            invocation.accept(&mut renderer).expect("serializes");
        }
    }
    assert_eq!(renderer.steps().len(), 2);
    let report = parse(&renderer.finish().expect("serializes"));
    assert_eq!(report["steps"][0], json!({
        "kind": "invocation",
        "keyword": "Given ",
        "name": "I have 3 notes",
        "line": 4,
        "consumed": [{ "column": 0, "header": "n", "value": "3" }],
    }));
    assert_eq!(report["steps"][1]["argument"]["content"], "Dear Ann");
    assert_eq!(report["steps"][1]["consumed"][0]["header"], "who");
}

#[rstest]
fn outline_walk_feeds_the_renderer(outline: ScenarioOutline, registry: StepRegistry) {
    let mut renderer = JsonRenderer::new();
    outline
        .accept(&registry, &mut renderer)
        .expect("serializes");
    let kinds: Vec<_> = renderer
        .steps()
        .iter()
        .map(|step| step["kind"].clone())
        .collect();
    assert_eq!(kinds, [json!("template"), json!("template")]);
}
