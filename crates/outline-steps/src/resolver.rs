//! First-match resolution of a template across example rows.
//!
//! Rows are probed in the order the caller supplies them. Each row is
//! resolved independently and its text is offered to the matcher. A miss or a
//! matcher error moves on to the next row; the first hit ends the search, so
//! later rows are never resolved.

use crate::examples::Row;
use crate::invocation::ResolvedInvocation;
use crate::matcher::{MatchLookup, MatchOutcome, NoStepMatch, StepMatch, StepMatcher};
use crate::template::Template;

/// Return the match produced by the first row that matches.
///
/// Matcher errors are logged and treated as misses; they never reach the
/// caller. When no row matches, including when `rows` is empty, the result is
/// [`MatchOutcome::Unmatched`] carrying the template's original name.
///
/// # Examples
/// ```
/// use outline_steps::{first_match, Location, MatchLookup, Row, StepMatch, Template};
///
/// let step = Template::new("en", Location::new("a.feature", 3), "Given ", "I have <n> leeks")
///     .expect("valid template");
/// let rows = [Row::new(&["n"], &["1"]), Row::new(&["n"], &["2"])];
/// let matcher = |candidate: &str, original: &str| {
///     if candidate.ends_with("2 leeks") {
///         MatchLookup::Found(StepMatch::new("I have 2 leeks", candidate, original))
///     } else {
///         MatchLookup::NotFound
///     }
/// };
/// let outcome = first_match(&step, &rows, &matcher);
/// assert_eq!(outcome.step_match().map(|m| m.step_name()), Some("I have 2 leeks"));
/// let no_rows: [Row; 0] = [];
/// assert!(first_match(&step, &no_rows, &matcher).no_match().is_some());
/// ```
pub fn first_match<'t, 'r, M>(
    template: &'t Template,
    rows: impl IntoIterator<Item = &'r Row>,
    matcher: &M,
) -> MatchOutcome<'t>
where
    M: StepMatcher + ?Sized,
{
    match first_resolved_match(template, rows, matcher) {
        Ok((_, step_match)) => MatchOutcome::Matched(step_match),
        Err(missing) => MatchOutcome::Unmatched(missing),
    }
}

/// Like [`first_match`], but also return the invocation of the matching row
/// so its consumed cells can be highlighted.
///
/// # Errors
/// Returns the [`NoStepMatch`] sentinel when no row matched. This is an
/// ordinary outcome rather than a failure.
pub fn first_resolved_match<'t, 'r, M>(
    template: &'t Template,
    rows: impl IntoIterator<Item = &'r Row>,
    matcher: &M,
) -> Result<(ResolvedInvocation<'t>, StepMatch), NoStepMatch<'t>>
where
    M: StepMatcher + ?Sized,
{
    let mut last_attempted = None;
    for (index, row) in rows.into_iter().enumerate() {
        let invocation = template.resolve(row);
        log::trace!(
            "probing example row {index} of '{}' as '{}'",
            template.name(),
            invocation.name()
        );
        match matcher.find(invocation.name(), template.name()) {
            MatchLookup::Found(step_match) => return Ok((invocation, step_match)),
            MatchLookup::NotFound => {}
            MatchLookup::Errored(err) => {
                log::debug!(
                    "example row {index} of '{}' skipped after lookup error: {err}",
                    template.name()
                );
            }
        }
        last_attempted = Some(invocation.into_name());
    }
    Err(NoStepMatch::new(template, last_attempted))
}
