//! Presentation of templates and invocations.
//!
//! Renderers receive a [`RenderTarget`]: either the skipped
//! [`TemplateResult`] built for a template listed on its own, or a concrete
//! [`ResolvedInvocation`]. A single [`StepRenderer::render`] method handles
//! both, so renderers match on the target instead of implementing one
//! callback per node type.

/// JSON writer for template results.
#[cfg(feature = "diagnostics")]
pub mod json;
/// Plain-text renderer laid out like a feature file.
pub mod pretty;

use crate::argument::StepArgument;
use crate::invocation::ResolvedInvocation;
use crate::matcher::MatchOutcome;
use crate::template::Template;

/// Status attached to a rendered step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum StepStatus {
    /// The step ran and succeeded.
    Passed,
    /// The step ran and failed.
    Failed,
    /// The step definition asked to be implemented later.
    Pending,
    /// No step definition matched.
    Undefined,
    /// The step was not run.
    Skipped,
}

impl StepStatus {
    /// Lowercase label used in reports.
    ///
    /// # Examples
    /// ```
    /// use outline_steps::StepStatus;
    ///
    /// assert_eq!(StepStatus::Skipped.label(), "skipped");
    /// ```
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Passed => "passed",
            Self::Failed => "failed",
            Self::Pending => "pending",
            Self::Undefined => "undefined",
            Self::Skipped => "skipped",
        }
    }
}

/// Display record for a template shown outside any example row.
///
/// Templates are never executed, so the status is always
/// [`StepStatus::Skipped`], there is never an exception, and the step is
/// never part of a background. Only an invocation handed to an execution
/// engine can pass or fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateResult<'t> {
    template: &'t Template,
    step_match: MatchOutcome<'t>,
    status: StepStatus,
    exception: Option<String>,
    source_indent: usize,
    background: bool,
    file_colon_line: String,
}

impl<'t> TemplateResult<'t> {
    pub(crate) fn new(
        template: &'t Template,
        step_match: MatchOutcome<'t>,
        source_indent: usize,
        file_colon_line: String,
    ) -> Self {
        Self {
            template,
            step_match,
            status: StepStatus::Skipped,
            exception: None,
            source_indent,
            background: false,
            file_colon_line,
        }
    }

    /// Template being presented.
    #[must_use]
    pub fn template(&self) -> &'t Template {
        self.template
    }

    /// Keyword of the template.
    #[must_use]
    pub fn keyword(&self) -> &'t str {
        self.template.keyword()
    }

    /// Preview match found by probing the example rows.
    #[must_use]
    pub fn step_match(&self) -> &MatchOutcome<'t> {
        &self.step_match
    }

    /// The template's own argument, unsubstituted.
    #[must_use]
    pub fn argument(&self) -> Option<&'t StepArgument> {
        self.template.argument()
    }

    /// Always [`StepStatus::Skipped`].
    #[must_use]
    pub fn status(&self) -> StepStatus {
        self.status
    }

    /// Always `None`.
    #[must_use]
    pub fn exception(&self) -> Option<&str> {
        self.exception.as_deref()
    }

    /// Padding that aligns the trailing comment with the rest of the outline.
    #[must_use]
    pub fn source_indent(&self) -> usize {
        self.source_indent
    }

    /// Always `false`.
    #[must_use]
    pub fn background(&self) -> bool {
        self.background
    }

    /// `file:line` of the template.
    #[must_use]
    pub fn file_colon_line(&self) -> &str {
        &self.file_colon_line
    }
}

/// What a renderer is asked to draw.
#[derive(Debug, Clone, Copy)]
pub enum RenderTarget<'a> {
    /// A template listed on its own.
    Template(&'a TemplateResult<'a>),
    /// A template bound to one example row.
    Invocation(&'a ResolvedInvocation<'a>),
}

/// Receives templates and invocations for display.
pub trait StepRenderer {
    /// Failure raised while rendering.
    type Error;

    /// Draw `target`.
    ///
    /// # Errors
    /// Implementation specific.
    fn render(&mut self, target: RenderTarget<'_>) -> Result<(), Self::Error>;
}
