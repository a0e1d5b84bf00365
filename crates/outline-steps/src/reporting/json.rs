//! JSON output for templates and invocations.
//!
//! Each rendered step becomes one object in a top-level `steps` array.
//! Templates are marked `"kind": "template"` and always carry the
//! `"skipped"` status; invocations are marked `"kind": "invocation"` and list
//! the cells their row consumed.

use std::io::Write;

use serde::Serialize;

use super::{RenderTarget, StepRenderer, TemplateResult};
use crate::argument::StepArgument;
use crate::examples::Cell;
use crate::invocation::ResolvedInvocation;
use crate::matcher::{MatchOutcome, StepMatch};

#[derive(Serialize)]
struct JsonReport<'a> {
    steps: &'a [serde_json::Value],
}

#[derive(Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum JsonStep<'a> {
    Template {
        keyword: &'a str,
        name: &'a str,
        line: usize,
        file_colon_line: &'a str,
        dom_id: &'a str,
        status: &'static str,
        exception: Option<&'a str>,
        background: bool,
        source_indent: usize,
        #[serde(skip_serializing_if = "Option::is_none")]
        argument: Option<JsonArgument<'a>>,
        step_match: JsonMatch<'a>,
    },
    Invocation {
        keyword: &'a str,
        name: &'a str,
        line: usize,
        #[serde(skip_serializing_if = "Option::is_none")]
        argument: Option<JsonArgument<'a>>,
        consumed: Vec<JsonCell<'a>>,
    },
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum JsonArgument<'a> {
    Table {
        rows: &'a [Vec<String>],
    },
    DocString {
        content: &'a str,
        #[serde(skip_serializing_if = "Option::is_none")]
        content_type: Option<&'a str>,
    },
}

#[derive(Serialize)]
struct JsonMatch<'a> {
    matched: bool,
    name_to_report: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pattern: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    location: Option<&'a str>,
    arguments: Vec<&'a str>,
}

#[derive(Serialize)]
struct JsonCell<'a> {
    column: usize,
    header: &'a str,
    value: Option<&'a str>,
}

impl<'a> From<&'a StepArgument> for JsonArgument<'a> {
    fn from(argument: &'a StepArgument) -> Self {
        match argument {
            StepArgument::Table(table) => Self::Table { rows: table.rows() },
            StepArgument::DocString(doc) => Self::DocString {
                content: doc.content(),
                content_type: doc.content_type(),
            },
        }
    }
}

impl<'a> From<&'a MatchOutcome<'_>> for JsonMatch<'a> {
    fn from(outcome: &'a MatchOutcome<'_>) -> Self {
        let found = outcome.step_match();
        Self {
            matched: outcome.is_matched(),
            name_to_report: outcome.name_to_report(),
            pattern: found.map(StepMatch::pattern),
            location: found.and_then(StepMatch::location),
            arguments: found
                .map(|m| m.arguments().iter().map(|a| a.value.as_str()).collect())
                .unwrap_or_default(),
        }
    }
}

impl<'a> From<&'a Cell> for JsonCell<'a> {
    fn from(cell: &'a Cell) -> Self {
        Self {
            column: cell.column(),
            header: cell.header(),
            value: cell.value(),
        }
    }
}

impl<'a> From<&'a TemplateResult<'_>> for JsonStep<'a> {
    fn from(result: &'a TemplateResult<'_>) -> Self {
        let template = result.template();
        Self::Template {
            keyword: template.keyword(),
            name: template.name(),
            line: template.line(),
            file_colon_line: result.file_colon_line(),
            dom_id: template.dom_id(),
            status: result.status().label(),
            exception: result.exception(),
            background: result.background(),
            source_indent: result.source_indent(),
            argument: result.argument().map(JsonArgument::from),
            step_match: JsonMatch::from(result.step_match()),
        }
    }
}

impl<'a> From<&'a ResolvedInvocation<'_>> for JsonStep<'a> {
    fn from(invocation: &'a ResolvedInvocation<'_>) -> Self {
        Self::Invocation {
            keyword: invocation.keyword(),
            name: invocation.name(),
            line: invocation.template().line(),
            argument: invocation.argument().map(JsonArgument::from),
            consumed: invocation
                .consumed_cells()
                .iter()
                .map(JsonCell::from)
                .collect(),
        }
    }
}

/// Serialize template results into `writer` as `{"steps": [...]}`.
///
/// # Errors
/// Returns an error when serialization or writing fails.
pub fn write<W: Write>(writer: &mut W, results: &[TemplateResult<'_>]) -> serde_json::Result<()> {
    let steps = values(results)?;
    serde_json::to_writer(writer, &JsonReport { steps: &steps })
}

fn values(results: &[TemplateResult<'_>]) -> serde_json::Result<Vec<serde_json::Value>> {
    results
        .iter()
        .map(|result| serde_json::to_value(JsonStep::from(result)))
        .collect()
}

/// Serialize template results into a string.
///
/// # Examples
/// ```rust
/// use outline_steps::{json, Location, MatchLookup, ScenarioOutline, Template};
///
/// let step = Template::new("en", Location::new("a.feature", 2), "Given ", "x")
///     .expect("valid template");
/// let outline = ScenarioOutline::new("Scenario Outline", "o", Location::new("a.feature", 1));
/// let result = step.present(&outline, &|_: &str, _: &str| MatchLookup::NotFound);
/// let output = json::to_string(&[result]).expect("serializes");
/// assert!(output.contains("\"status\":\"skipped\""));
/// ```
///
/// # Errors
/// Returns an error when serialization fails.
pub fn to_string(results: &[TemplateResult<'_>]) -> serde_json::Result<String> {
    let steps = values(results)?;
    serde_json::to_string(&JsonReport { steps: &steps })
}

/// Renderer collecting every target as a JSON object.
#[derive(Debug, Default)]
pub struct JsonRenderer {
    steps: Vec<serde_json::Value>,
}

impl JsonRenderer {
    /// Start with no steps.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Steps rendered so far.
    #[must_use]
    pub fn steps(&self) -> &[serde_json::Value] {
        &self.steps
    }

    /// Produce the `{"steps": [...]}` document.
    ///
    /// # Errors
    /// Returns an error when serialization fails.
    pub fn finish(&self) -> serde_json::Result<String> {
        serde_json::to_string(&JsonReport { steps: &self.steps })
    }
}

impl StepRenderer for JsonRenderer {
    type Error = serde_json::Error;

    fn render(&mut self, target: RenderTarget<'_>) -> serde_json::Result<()> {
        let step = match target {
            RenderTarget::Template(result) => JsonStep::from(result),
            RenderTarget::Invocation(invocation) => JsonStep::from(invocation),
        };
        self.steps.push(serde_json::to_value(step)?);
        Ok(())
    }
}
