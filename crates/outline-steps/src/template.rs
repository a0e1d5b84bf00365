//! Outline step templates.
//!
//! A [`Template`] is a step as written inside a scenario outline: keyword,
//! name with `<placeholder>` tokens, and an optional table or doc string.
//! It is resolved against example rows to produce
//! [`ResolvedInvocation`]s, and presented on its own as a skipped step.
//!
//! The template does not point back at the outline that owns it. Operations
//! that need the outline take it as an [`OutlineContext`] argument.

use std::sync::OnceLock;

use crate::argument::StepArgument;
use crate::examples::Row;
use crate::invocation::{ResolvedInvocation, consumed_cells};
use crate::matcher::{MatchOutcome, StepMatcher};
use crate::outline::OutlineContext;
use crate::reporting::{RenderTarget, StepRenderer, TemplateResult};
use crate::resolver::first_match;
use crate::sexp::Sexp;
use crate::types::{Language, Location, TemplateError};

/// Indent width of one nesting level in pretty output.
pub const INDENT: usize = 2;

/// A parametrised outline step.
#[derive(Debug, Clone)]
pub struct Template {
    language: Language,
    location: Location,
    keyword: String,
    name: String,
    argument: Option<StepArgument>,
    text_length: OnceLock<usize>,
    dom_id: OnceLock<String>,
}

impl Template {
    /// Build a template.
    ///
    /// # Errors
    /// Returns [`TemplateError::MissingLanguage`] when `language` is blank
    /// and [`TemplateError::EmptyStep`] when both `keyword` and `name` are
    /// empty.
    ///
    /// # Examples
    /// ```
    /// use outline_steps::{Location, Template, TemplateError};
    ///
    /// let location = Location::new("features/cukes.feature", 4);
    /// let step = Template::new("en", location.clone(), "Given ", "I have <count> cucumbers");
    /// assert!(step.is_ok());
    /// assert_eq!(
    ///     Template::new("", location, "Given ", "x").err(),
    ///     Some(TemplateError::MissingLanguage),
    /// );
    /// ```
    pub fn new(
        language: impl AsRef<str>,
        location: Location,
        keyword: impl Into<String>,
        name: impl Into<String>,
    ) -> Result<Self, TemplateError> {
        let language = Language::new(language)?;
        let keyword = keyword.into();
        let name = name.into();
        if keyword.is_empty() && name.is_empty() {
            return Err(TemplateError::EmptyStep { location });
        }
        Ok(Self {
            language,
            location,
            keyword,
            name,
            argument: None,
            text_length: OnceLock::new(),
            dom_id: OnceLock::new(),
        })
    }

    /// Attach a table or doc string.
    #[must_use]
    pub fn with_argument(mut self, argument: impl Into<StepArgument>) -> Self {
        self.argument = Some(argument.into());
        self
    }

    /// Language tag of the source.
    #[must_use]
    pub fn language(&self) -> &Language {
        &self.language
    }

    /// Where the step was declared.
    #[must_use]
    pub fn location(&self) -> &Location {
        &self.location
    }

    /// Source line of the step.
    #[must_use]
    pub fn line(&self) -> usize {
        self.location.line()
    }

    /// Keyword including its trailing space, e.g. `"Given "`.
    #[must_use]
    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    /// Step text with placeholders intact.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Attached table or doc string.
    #[must_use]
    pub fn argument(&self) -> Option<&StepArgument> {
        self.argument.as_ref()
    }

    /// Width of the step line in pretty output, counted in code points.
    ///
    /// # Examples
    /// ```
    /// use outline_steps::{Location, Template};
    ///
    /// let step = Template::new("en", Location::new("a.feature", 1), "Given ", "ébcd")
    ///     .expect("valid template");
    /// assert_eq!(step.text_length(), 14);
    /// ```
    #[must_use]
    pub fn text_length(&self) -> usize {
        *self
            .text_length
            .get_or_init(|| self.text_length_with(&self.name))
    }

    /// Width of the step line if its text were `name`.
    #[must_use]
    pub fn text_length_with(&self, name: &str) -> usize {
        INDENT + INDENT + self.keyword.chars().count() + name.chars().count()
    }

    /// `file:line` of the step.
    #[must_use]
    pub fn file_colon_line(&self) -> String {
        self.location.to_string()
    }

    /// Identifier for HTML reports: `file:line` with `/`, `.` and `:`
    /// replaced by `_`.
    #[must_use]
    pub fn dom_id(&self) -> &str {
        self.dom_id
            .get_or_init(|| self.file_colon_line().replace(['/', '.', ':'], "_"))
    }

    /// Backtrace entry for the step as the enclosing outline formats it.
    #[must_use]
    pub fn backtrace_line<C>(&self, outline: &C) -> String
    where
        C: OutlineContext + ?Sized,
    {
        outline.backtrace_line(&format!("{}{}", self.keyword, self.name), self.line())
    }

    /// Tagged tuple form: `[:step, line, "keyword", "name", <argument>?]`.
    #[must_use]
    pub fn to_sexp(&self) -> Sexp {
        let mut items = vec![
            Sexp::Int(self.line()),
            Sexp::str(self.keyword.as_str()),
            Sexp::str(self.name.as_str()),
        ];
        items.extend(self.argument.as_ref().map(StepArgument::to_sexp));
        Sexp::tagged("step", items)
    }

    /// Bind the template to `row`.
    ///
    /// The name and the argument are substituted with the same mapping, so
    /// they never disagree about a value.
    #[must_use]
    pub fn resolve(&self, row: &Row) -> ResolvedInvocation<'_> {
        let subs = row.substitutions();
        let name = subs.apply(&self.name);
        let argument = self
            .argument
            .as_ref()
            .map(|arg| arg.with_substitutions(&subs));
        let consumed = consumed_cells(&self.name, self.argument.as_ref(), row);
        ResolvedInvocation::new(self, name, argument, consumed)
    }

    /// The template as an invocation with nothing substituted.
    #[must_use]
    pub fn unbound_invocation(&self) -> ResolvedInvocation<'_> {
        ResolvedInvocation::new(self, self.name.clone(), self.argument.clone(), Vec::new())
    }

    /// Resolve against `rows` in order and return the first match.
    ///
    /// See [`first_match`].
    pub fn first_match<'r, M>(
        &self,
        rows: impl IntoIterator<Item = &'r Row>,
        matcher: &M,
    ) -> MatchOutcome<'_>
    where
        M: StepMatcher + ?Sized,
    {
        first_match(self, rows, matcher)
    }

    /// Build the skipped result shown when the template is listed on its
    /// own, outside any example row.
    ///
    /// The preview match comes from a single pass over the outline's example
    /// rows; matcher errors leave the preview unmatched.
    #[must_use]
    pub fn present<C, M>(&self, outline: &C, matcher: &M) -> TemplateResult<'_>
    where
        C: OutlineContext + ?Sized,
        M: StepMatcher + ?Sized,
    {
        let preview = first_match(self, outline.example_rows(), matcher);
        TemplateResult::new(
            self,
            preview,
            outline.source_indent(self.text_length()),
            self.file_colon_line(),
        )
    }

    /// Present the template and hand the result to `renderer`.
    ///
    /// # Errors
    /// Propagates the renderer's error.
    pub fn accept<C, M, R>(&self, outline: &C, matcher: &M, renderer: &mut R) -> Result<(), R::Error>
    where
        C: OutlineContext + ?Sized,
        M: StepMatcher + ?Sized,
        R: StepRenderer + ?Sized,
    {
        let result = self.present(outline, matcher);
        renderer.render(RenderTarget::Template(&result))
    }
}

/// Equality ignores memoized display fields.
impl PartialEq for Template {
    fn eq(&self, other: &Self) -> bool {
        self.language == other.language
            && self.location == other.location
            && self.keyword == other.keyword
            && self.name == other.name
            && self.argument == other.argument
    }
}

impl Eq for Template {}

#[cfg(test)]
#[expect(clippy::expect_used, reason = "templates in tests are valid")]
mod tests {
    use super::*;
    use crate::argument::{DataTable, DocString};
    use crate::examples::Cell;
    use rstest::{fixture, rstest};

    #[fixture]
    fn cucumbers() -> Template {
        Template::new(
            "en",
            Location::new("features/cukes.feature", 7),
            "Given ",
            "I have <count> cucumbers",
        )
        .expect("valid template")
    }

    #[rstest]
    fn resolves_name_and_consumed_cells(cucumbers: Template) {
        let row = Row::new(&["count"], &["5"]);
        let invocation = cucumbers.resolve(&row);
        assert_eq!(invocation.name(), "I have 5 cucumbers");
        let used: Vec<_> = invocation.consumed_cells().iter().map(Cell::header).collect();
        assert_eq!(used, ["count"]);
        assert_eq!(cucumbers.name(), "I have <count> cucumbers");
    }

    #[test]
    fn static_step_is_unchanged() {
        let step = Template::new("en", Location::new("a.feature", 1), "Then ", "a static step")
            .expect("valid template");
        let invocation = step.resolve(&Row::new(&["count"], &["5"]));
        assert_eq!(invocation.name(), "a static step");
        assert!(invocation.consumed_cells().is_empty());
    }

    #[rstest]
    fn argument_is_substituted_with_the_name(cucumbers: Template) {
        let step = cucumbers.with_argument(DataTable::new(vec![
            vec!["veg".into(), "count".into()],
            vec!["<veg>".into(), "<count>".into()],
        ]));
        let invocation = step.resolve(&Row::new(&["count", "veg"], &["5", "leek"]));
        let table = invocation
            .argument()
            .and_then(StepArgument::as_table)
            .expect("table argument");
        assert_eq!(table.raw(), vec![vec!["veg", "count"], vec!["leek", "5"]]);
        assert_eq!(invocation.name(), "I have 5 cucumbers");
        assert_eq!(invocation.consumed_cells().len(), 2);
        let original = step.argument().and_then(StepArgument::as_table).expect("table");
        assert_eq!(original.cell(1, 0), Some("<veg>"));
    }

    #[rstest]
    #[case::ascii("Given ", "abcd", 14)]
    #[case::two_byte("Given ", "ébcd", 14)]
    #[case::wide("Given ", "日本", 12)]
    #[case::no_keyword("", "x", 5)]
    fn text_length_counts_code_points(#[case] keyword: &str, #[case] name: &str, #[case] expected: usize) {
        let step = Template::new("en", Location::new("a.feature", 1), keyword, name)
            .expect("valid template");
        assert_eq!(step.text_length(), expected);
        assert_eq!(step.text_length_with(name), expected);
    }

    #[rstest]
    fn dom_id_replaces_separators(cucumbers: Template) {
        assert_eq!(cucumbers.file_colon_line(), "features/cukes.feature:7");
        assert_eq!(cucumbers.dom_id(), "features_cukes_feature_7");
    }

    #[rstest]
    fn sexp_omits_missing_argument(cucumbers: Template) {
        assert_eq!(
            cucumbers.to_sexp().to_string(),
            r#"[:step, 7, "Given ", "I have <count> cucumbers"]"#
        );
        let with_doc = cucumbers.with_argument(DocString::new("hi"));
        assert_eq!(
            with_doc.to_sexp().to_string(),
            r#"[:step, 7, "Given ", "I have <count> cucumbers", [:doc_string, "hi"]]"#
        );
    }

    #[rstest]
    fn unbound_invocation_keeps_placeholders(cucumbers: Template) {
        let invocation = cucumbers.unbound_invocation();
        assert_eq!(invocation.name(), cucumbers.name());
        assert!(invocation.consumed_cells().is_empty());
    }

    #[test]
    fn empty_step_is_rejected() {
        let location = Location::new("a.feature", 3);
        assert_eq!(
            Template::new("en", location.clone(), "", "").err(),
            Some(TemplateError::EmptyStep { location })
        );
    }

    #[rstest]
    fn memoized_fields_do_not_affect_equality(cucumbers: Template) {
        let fresh = cucumbers.clone();
        let _ = cucumbers.dom_id();
        let _ = cucumbers.text_length();
        assert_eq!(cucumbers, fresh);
    }
}
