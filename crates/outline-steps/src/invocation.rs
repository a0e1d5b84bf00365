//! Concrete step invocations produced from a template and one example row.

use outline_patterns::delimit;

use crate::argument::StepArgument;
use crate::examples::{Cell, Row};
use crate::reporting::{RenderTarget, StepRenderer};
use crate::template::Template;

/// A template bound to the values of one example row.
///
/// The invocation owns its substituted argument; the template's argument is
/// never aliased or modified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedInvocation<'t> {
    template: &'t Template,
    name: String,
    argument: Option<StepArgument>,
    consumed: Vec<Cell>,
}

impl<'t> ResolvedInvocation<'t> {
    pub(crate) fn new(
        template: &'t Template,
        name: String,
        argument: Option<StepArgument>,
        consumed: Vec<Cell>,
    ) -> Self {
        Self {
            template,
            name,
            argument,
            consumed,
        }
    }

    /// Template this invocation was resolved from.
    #[must_use]
    pub fn template(&self) -> &'t Template {
        self.template
    }

    /// Keyword of the template.
    #[must_use]
    pub fn keyword(&self) -> &'t str {
        self.template.keyword()
    }

    /// Substituted step text.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Substituted argument, if the template carries one.
    #[must_use]
    pub fn argument(&self) -> Option<&StepArgument> {
        self.argument.as_ref()
    }

    /// Cells whose placeholder occurs in the template text or argument.
    #[must_use]
    pub fn consumed_cells(&self) -> &[Cell] {
        &self.consumed
    }

    /// Take the substituted text, dropping the rest.
    #[must_use]
    pub fn into_name(self) -> String {
        self.name
    }

    /// Hand the invocation to `renderer`.
    ///
    /// # Errors
    /// Propagates the renderer's error.
    pub fn accept<R>(&self, renderer: &mut R) -> Result<(), R::Error>
    where
        R: StepRenderer + ?Sized,
    {
        renderer.render(RenderTarget::Invocation(self))
    }
}

/// Cells of `row` whose delimited header occurs in `name` or in `argument`.
///
/// Only highlighting depends on the result; matching ignores it. Rows pair
/// cells with headers by position when they are built, so each cell is
/// checked against its own header.
///
/// # Examples
/// ```
/// use outline_steps::{Row, consumed_cells};
///
/// let row = Row::new(&["count", "veg"], &["5", "leek"]);
/// let used = consumed_cells("I have <count> cucumbers", None, &row);
/// assert_eq!(used.iter().map(|c| c.header()).collect::<Vec<_>>(), ["count"]);
/// ```
#[must_use]
pub fn consumed_cells(name: &str, argument: Option<&StepArgument>, row: &Row) -> Vec<Cell> {
    row.cells()
        .iter()
        .filter(|cell| {
            let token = delimit(cell.header());
            name.contains(&token) || argument.is_some_and(|arg| arg.contains_text(&token))
        })
        .cloned()
        .collect()
}
