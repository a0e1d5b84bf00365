//! Conversion from a parsed `gherkin` AST into outlines.

use gherkin::{Feature, Scenario, Step};
use outline_patterns::placeholder_names;

use super::{OutlineError, ScenarioOutline};
use crate::argument::{DataTable, DocString, StepArgument};
use crate::examples::ExamplesTable;
use crate::template::Template;
use crate::types::Location;

impl ScenarioOutline {
    /// Convert a parsed scenario into an outline.
    ///
    /// `path` is the display path of the feature file and `language` the tag
    /// of the dialect it was parsed with. Keywords gain a single trailing
    /// space so that `keyword + name` reads as the source line does.
    ///
    /// # Errors
    /// Returns [`OutlineError`] when a step is empty, when an examples block
    /// lacks a table, or when an examples table is malformed.
    pub fn from_gherkin(
        path: impl Into<String>,
        language: &str,
        scenario: &Scenario,
    ) -> Result<Self, OutlineError> {
        let location = Location::new(path, scenario.position.line);
        let mut outline = Self::new(
            scenario.keyword.trim(),
            scenario.name.clone(),
            location.clone(),
        );
        for step in &scenario.steps {
            outline.push_step(template_from_step(&location, language, step)?);
        }
        for examples in &scenario.examples {
            let examples_location = location.at_line(examples.position.line);
            let Some(table) = examples.table.as_ref() else {
                return Err(OutlineError::MissingTable {
                    location: examples_location,
                });
            };
            let parsed = ExamplesTable::from_raw(table.rows.clone())
                .map_err(|source| OutlineError::Examples {
                    location: examples_location,
                    source,
                })?
                .at_line(table.position.line);
            outline = outline.with_examples(parsed);
        }
        for name in outline.unknown_placeholders() {
            log::warn!(
                "placeholder <{name}> in outline '{}' at {} has no examples column",
                outline.name(),
                outline.location()
            );
        }
        Ok(outline)
    }
}

fn template_from_step(
    outline: &Location,
    language: &str,
    step: &Step,
) -> Result<Template, OutlineError> {
    let keyword = format!("{} ", step.keyword.trim());
    let mut template = Template::new(
        language,
        outline.at_line(step.position.line),
        keyword,
        step.value.clone(),
    )?;
    if let Some(argument) = step_argument(step) {
        template = template.with_argument(argument);
    }
    Ok(template)
}

fn step_argument(step: &Step) -> Option<StepArgument> {
    if let Some(table) = step.table.as_ref() {
        return Some(DataTable::new(table.rows.clone()).into());
    }
    step.docstring
        .as_ref()
        .map(|content| DocString::new(content.as_str()).into())
}

/// Every scenario of `feature` that carries examples, including those nested
/// in rules, converted into outlines in source order.
///
/// # Errors
/// Returns the first [`OutlineError`] raised by
/// [`ScenarioOutline::from_gherkin`].
pub fn outlines_from_feature(
    path: &str,
    language: &str,
    feature: &Feature,
) -> Result<Vec<ScenarioOutline>, OutlineError> {
    let nested = feature.rules.iter().flat_map(|rule| rule.scenarios.iter());
    feature
        .scenarios
        .iter()
        .chain(nested)
        .filter(|scenario| has_examples(path, scenario))
        .map(|scenario| ScenarioOutline::from_gherkin(path, language, scenario))
        .collect()
}

/// Returns `true` when `scenario` carries examples. Outlines without any are
/// reported, since their templates can never resolve.
fn has_examples(path: &str, scenario: &Scenario) -> bool {
    if !scenario.examples.is_empty() {
        return true;
    }
    if declares_outline(scenario) {
        log::warn!(
            "{} '{}' at {path}:{} has no examples and is skipped",
            scenario.keyword.trim(),
            scenario.name,
            scenario.position.line
        );
    }
    false
}

fn declares_outline(scenario: &Scenario) -> bool {
    let keyword = scenario.keyword.to_lowercase();
    keyword.contains("outline")
        || keyword.contains("template")
        || scenario
            .steps
            .iter()
            .any(|step| !placeholder_names(&step.value).is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use gherkin::GherkinEnv;
    use rstest::rstest;

    fn first_scenario(source: &str) -> Scenario {
        let Ok(feature) = Feature::parse(source, GherkinEnv::default()) else {
            panic!("feature should parse");
        };
        let Some(scenario) = feature.scenarios.into_iter().next() else {
            panic!("feature should hold a scenario");
        };
        scenario
    }

    #[rstest]
    #[case::outline_keyword("Scenario Outline: bare\n    Given a step\n", true)]
    #[case::placeholder_step("Scenario: loose\n    Given <n> steps\n", true)]
    #[case::plain("Scenario: plain\n    Given a step\n", false)]
    fn recognises_outlines_missing_examples(#[case] body: &str, #[case] expected: bool) {
        let scenario = first_scenario(&format!("Feature: f\n\n  {body}"));
        assert!(scenario.examples.is_empty());
        assert_eq!(declares_outline(&scenario), expected);
        assert!(!has_examples("f.feature", &scenario));
    }
}
