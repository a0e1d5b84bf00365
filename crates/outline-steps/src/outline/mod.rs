//! Scenario outlines: the containers that own templates and example rows.

mod gherkin_ast;

use std::sync::OnceLock;

use hashbrown::HashSet;
use outline_patterns::placeholder_names;
use thiserror::Error;

use crate::argument::StepArgument;
use crate::examples::{ExamplesError, ExamplesTable, Row};
use crate::invocation::ResolvedInvocation;
use crate::matcher::StepMatcher;
use crate::reporting::StepRenderer;
use crate::template::{INDENT, Template};
use crate::types::{Location, TemplateError};

pub use gherkin_ast::outlines_from_feature;

/// What a template needs from the outline that owns it.
///
/// Templates never hold a reference to their outline; the outline is passed
/// in by the caller whenever display metadata is computed.
pub trait OutlineContext {
    /// Example rows in declaration order.
    fn example_rows(&self) -> impl Iterator<Item = &Row>;

    /// Padding placed after a line of `text_length` so that trailing
    /// comments line up across the outline.
    fn source_indent(&self, text_length: usize) -> usize;

    /// Backtrace entry naming `text` at `line`.
    fn backtrace_line(&self, text: &str, line: usize) -> String;

    /// `file:line` for a line of the outline's file.
    fn file_colon_line(&self, line: usize) -> String;
}

/// Errors raised while building an outline from parsed Gherkin.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum OutlineError {
    /// A step could not be turned into a template.
    #[error(transparent)]
    Template(#[from] TemplateError),
    /// An examples block is malformed.
    #[error("examples at {location}: {source}")]
    Examples {
        /// Where the examples block starts.
        location: Location,
        /// What was wrong with it.
        #[source]
        source: ExamplesError,
    },
    /// An examples block has no table.
    #[error("examples at {location} have no table")]
    MissingTable {
        /// Where the examples block starts.
        location: Location,
    },
}

/// A scenario outline with its step templates and examples.
#[derive(Debug, Clone)]
pub struct ScenarioOutline {
    keyword: String,
    name: String,
    location: Location,
    steps: Vec<Template>,
    examples: Vec<ExamplesTable>,
    max_line_length: OnceLock<usize>,
}

impl ScenarioOutline {
    /// Create an outline with no steps or examples.
    #[must_use]
    pub fn new(keyword: impl Into<String>, name: impl Into<String>, location: Location) -> Self {
        Self {
            keyword: keyword.into(),
            name: name.into(),
            location,
            steps: Vec::new(),
            examples: Vec::new(),
            max_line_length: OnceLock::new(),
        }
    }

    /// Append a step template.
    #[must_use]
    pub fn with_step(mut self, step: Template) -> Self {
        self.push_step(step);
        self
    }

    /// Append an examples table.
    #[must_use]
    pub fn with_examples(mut self, examples: ExamplesTable) -> Self {
        self.examples.push(examples);
        self
    }

    /// Append a step template in place.
    pub fn push_step(&mut self, step: Template) {
        self.steps.push(step);
        self.max_line_length = OnceLock::new();
    }

    /// Outline keyword, e.g. `Scenario Outline`.
    #[must_use]
    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    /// Outline title.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Where the outline was declared.
    #[must_use]
    pub fn location(&self) -> &Location {
        &self.location
    }

    /// Step templates in declaration order.
    #[must_use]
    pub fn steps(&self) -> &[Template] {
        &self.steps
    }

    /// Examples tables in declaration order.
    #[must_use]
    pub fn examples(&self) -> &[ExamplesTable] {
        &self.examples
    }

    /// Widths of the title lines. Continuation lines of a multi-line title
    /// are indented one level deeper than the first.
    fn name_line_lengths(&self) -> Vec<usize> {
        let keyword = self.keyword.chars().count() + ": ".len();
        if self.name.trim().is_empty() {
            return vec![INDENT + keyword];
        }
        self.name
            .lines()
            .enumerate()
            .map(|(index, line)| {
                if index == 0 {
                    INDENT + keyword + line.chars().count()
                } else {
                    INDENT + INDENT + line.chars().count()
                }
            })
            .collect()
    }

    /// Widest line of the outline, title and steps included.
    #[must_use]
    pub fn max_line_length(&self) -> usize {
        *self.max_line_length.get_or_init(|| {
            self.steps
                .iter()
                .map(Template::text_length)
                .chain(self.name_line_lengths())
                .max()
                .unwrap_or_default()
        })
    }

    /// Placeholders referenced by a step's text, table cells or doc string
    /// that no examples table declares as a column.
    ///
    /// Each name is reported once, in order of first appearance. Such
    /// placeholders are never substituted and stay literal in every
    /// invocation.
    #[must_use]
    pub fn unknown_placeholders(&self) -> Vec<&str> {
        let declared: HashSet<&str> = self
            .examples
            .iter()
            .flat_map(|table| table.headers().iter().map(String::as_str))
            .collect();
        let mut seen = HashSet::new();
        self.steps
            .iter()
            .flat_map(referenced_placeholders)
            .filter(|name| !declared.contains(name) && seen.insert(*name))
            .collect()
    }

    /// Bind every step to `row`, in step order.
    #[must_use]
    pub fn invocations_for(&self, row: &Row) -> Vec<ResolvedInvocation<'_>> {
        self.steps.iter().map(|step| step.resolve(row)).collect()
    }

    /// One list of invocations per example row, rows in declaration order.
    pub fn expand(&self) -> impl Iterator<Item = (&Row, Vec<ResolvedInvocation<'_>>)> {
        self.example_rows()
            .map(|row| (row, self.invocations_for(row)))
    }

    /// Present every step template to `renderer`.
    ///
    /// # Errors
    /// Stops at and returns the renderer's first error.
    pub fn accept<M, R>(&self, matcher: &M, renderer: &mut R) -> Result<(), R::Error>
    where
        M: StepMatcher + ?Sized,
        R: StepRenderer + ?Sized,
    {
        self.steps
            .iter()
            .try_for_each(|step| step.accept(self, matcher, renderer))
    }
}

fn referenced_placeholders(step: &Template) -> Vec<&str> {
    let mut names = placeholder_names(step.name());
    if let Some(argument) = step.argument() {
        match argument {
            StepArgument::Table(table) => names.extend(
                table
                    .rows()
                    .iter()
                    .flatten()
                    .flat_map(|cell| placeholder_names(cell)),
            ),
            StepArgument::DocString(doc) => names.extend(placeholder_names(doc.content())),
        }
    }
    names
}

impl OutlineContext for ScenarioOutline {
    fn example_rows(&self) -> impl Iterator<Item = &Row> {
        self.examples.iter().flat_map(|table| table.rows().iter())
    }

    fn source_indent(&self, text_length: usize) -> usize {
        self.max_line_length().saturating_sub(text_length)
    }

    fn backtrace_line(&self, text: &str, line: usize) -> String {
        format!("{}:in `{text}'", self.file_colon_line(line))
    }

    fn file_colon_line(&self, line: usize) -> String {
        self.location.at_line(line).to_string()
    }
}
