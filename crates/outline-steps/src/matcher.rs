//! The boundary between outline resolution and a step-definition registry.
//!
//! Resolution asks a [`StepMatcher`] for a definition matching each
//! candidate text. The matcher answers with a [`MatchLookup`] rather than a
//! `Result`: a failed lookup is an ordinary answer that the resolver turns
//! into "try the next row".

use outline_patterns::CapturedValue;
use thiserror::Error;

use crate::template::Template;

/// Errors a matcher may report for a single lookup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum MatchError {
    /// Several step definitions matched the text equally well.
    #[error("ambiguous step '{step}' matches {}", candidates.join(", "))]
    Ambiguous {
        /// Text that was looked up.
        step: String,
        /// Patterns of the competing definitions.
        candidates: Vec<String>,
    },
    /// The lookup itself failed.
    #[error("lookup of step '{step}' failed: {reason}")]
    Lookup {
        /// Text that was looked up.
        step: String,
        /// Description of the failure.
        reason: String,
    },
}

/// Answer from a [`StepMatcher`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchLookup {
    /// A definition matched.
    Found(StepMatch),
    /// No definition matched.
    NotFound,
    /// The lookup failed.
    Errored(MatchError),
}

impl MatchLookup {
    /// Convert into the match, discarding the reason for a miss.
    #[must_use]
    pub fn found(self) -> Option<StepMatch> {
        match self {
            Self::Found(step_match) => Some(step_match),
            Self::NotFound | Self::Errored(_) => None,
        }
    }
}

/// Looks up step definitions for concrete step text.
///
/// Implementations must be safe to call repeatedly; resolution may probe the
/// same matcher once per example row. Closures of the right shape implement
/// the trait directly:
///
/// ```
/// use outline_steps::{MatchLookup, StepMatch, StepMatcher};
///
/// let matcher = |candidate: &str, original: &str| {
///     if candidate == "I have 5 cucumbers" {
///         MatchLookup::Found(StepMatch::new("I have {n} cucumbers", candidate, original))
///     } else {
///         MatchLookup::NotFound
///     }
/// };
/// assert!(matcher.find("I have 5 cucumbers", "I have <n> cucumbers").found().is_some());
/// ```
pub trait StepMatcher {
    /// Find a definition for `candidate`.
    ///
    /// `original` is the unsubstituted template text; matchers use it as the
    /// name to report.
    fn find(&self, candidate: &str, original: &str) -> MatchLookup;
}

impl<F> StepMatcher for F
where
    F: Fn(&str, &str) -> MatchLookup,
{
    fn find(&self, candidate: &str, original: &str) -> MatchLookup {
        self(candidate, original)
    }
}

/// A step definition matched against concrete text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepMatch {
    pattern: String,
    location: Option<String>,
    step_name: String,
    name_to_report: String,
    arguments: Vec<CapturedValue>,
}

impl StepMatch {
    /// Record a match of `pattern` against `step_name`, with no captures.
    #[must_use]
    pub fn new(
        pattern: impl Into<String>,
        step_name: impl Into<String>,
        name_to_report: impl Into<String>,
    ) -> Self {
        Self {
            pattern: pattern.into(),
            location: None,
            step_name: step_name.into(),
            name_to_report: name_to_report.into(),
            arguments: Vec::new(),
        }
    }

    /// Attach the values captured from `step_name`.
    #[must_use]
    pub fn with_arguments(mut self, arguments: Vec<CapturedValue>) -> Self {
        self.arguments = arguments;
        self
    }

    /// Attach where the definition was declared, e.g. `steps.rs:12`.
    #[must_use]
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Pattern of the matched definition.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Declaration site of the definition, when known.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    /// Concrete text that matched.
    #[must_use]
    pub fn step_name(&self) -> &str {
        &self.step_name
    }

    /// Text to show in reports; the template text for outline steps.
    #[must_use]
    pub fn name_to_report(&self) -> &str {
        &self.name_to_report
    }

    /// Captured values in pattern order.
    #[must_use]
    pub fn arguments(&self) -> &[CapturedValue] {
        &self.arguments
    }

    /// Render the matched text with every captured value passed through
    /// `format`.
    ///
    /// Captures without an offset, or whose offsets overlap an earlier
    /// capture, are left as plain text.
    ///
    /// # Examples
    /// ```
    /// use outline_patterns::CapturedValue;
    /// use outline_steps::StepMatch;
    ///
    /// let step = StepMatch::new("I have {n} {veg}", "I have 5 leeks", "I have <n> <veg>")
    ///     .with_arguments(vec![
    ///         CapturedValue { value: "5".into(), offset: Some(7) },
    ///         CapturedValue { value: "leeks".into(), offset: Some(9) },
    ///     ]);
    /// assert_eq!(step.format_args(|arg| format!("[{arg}]")), "I have [5] [leeks]");
    /// ```
    #[must_use]
    pub fn format_args(&self, format: impl Fn(&str) -> String) -> String {
        let mut out = String::with_capacity(self.step_name.len());
        let mut cursor = 0;
        for argument in &self.arguments {
            let Some(start) = argument.offset else {
                continue;
            };
            let Some(end) = start.checked_add(argument.value.len()) else {
                continue;
            };
            let (Some(before), Some(value)) = (
                self.step_name.get(cursor..start),
                self.step_name.get(start..end),
            ) else {
                continue;
            };
            out.push_str(before);
            out.push_str(&format(value));
            cursor = end;
        }
        out.push_str(self.step_name.get(cursor..).unwrap_or_default());
        out
    }
}

/// Sentinel returned when no example row produced a match.
///
/// The sentinel is bound to the template's original text so a report can
/// ask the user to define a step for exactly what they wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoStepMatch<'t> {
    template: &'t Template,
    name: String,
    last_attempted: Option<String>,
}

impl<'t> NoStepMatch<'t> {
    pub(crate) fn new(template: &'t Template, last_attempted: Option<String>) -> Self {
        Self {
            template,
            name: template.name().to_owned(),
            last_attempted,
        }
    }

    /// Template the lookup was made for.
    #[must_use]
    pub fn template(&self) -> &'t Template {
        self.template
    }

    /// Original, unsubstituted name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Substituted text of the last row probed, if any row was probed.
    #[must_use]
    pub fn last_attempted(&self) -> Option<&str> {
        self.last_attempted.as_deref()
    }
}

/// Outcome of resolving a template against its example rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchOutcome<'t> {
    /// A row produced a match.
    Matched(StepMatch),
    /// No row produced a match.
    Unmatched(NoStepMatch<'t>),
}

impl<'t> MatchOutcome<'t> {
    /// The match, if one was found.
    #[must_use]
    pub fn step_match(&self) -> Option<&StepMatch> {
        match self {
            Self::Matched(step_match) => Some(step_match),
            Self::Unmatched(_) => None,
        }
    }

    /// The sentinel, if nothing matched.
    #[must_use]
    pub fn no_match(&self) -> Option<&NoStepMatch<'t>> {
        match self {
            Self::Unmatched(missing) => Some(missing),
            Self::Matched(_) => None,
        }
    }

    /// Returns `true` when a definition was found.
    #[must_use]
    pub fn is_matched(&self) -> bool {
        matches!(self, Self::Matched(_))
    }

    /// Name to show in reports: the definition's reporting name, or the
    /// template's original text when nothing matched.
    #[must_use]
    pub fn name_to_report(&self) -> &str {
        match self {
            Self::Matched(step_match) => step_match.name_to_report(),
            Self::Unmatched(missing) => missing.name(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn captured(value: &str, offset: Option<usize>) -> CapturedValue {
        CapturedValue {
            value: value.to_owned(),
            offset,
        }
    }

    #[rstest]
    #[case::no_arguments(vec![], "I have 5 leeks")]
    #[case::single(vec![captured("5", Some(7))], "I have *5* leeks")]
    #[case::missing_offset(vec![captured("", None), captured("leeks", Some(9))], "I have 5 *leeks*")]
    #[case::overlap(vec![captured("5 leeks", Some(7)), captured("leeks", Some(9))], "I have *5 leeks*")]
    #[case::overflowing_offset(vec![captured("5", Some(usize::MAX))], "I have 5 leeks")]
    #[case::offset_past_end(vec![captured("5", Some(40)), captured("leeks", Some(9))], "I have 5 *leeks*")]
    fn formats_captured_spans(#[case] arguments: Vec<CapturedValue>, #[case] expected: &str) {
        let step = StepMatch::new("p", "I have 5 leeks", "I have <n> <veg>").with_arguments(arguments);
        assert_eq!(step.format_args(|arg| format!("*{arg}*")), expected);
    }

    #[test]
    fn ambiguous_error_lists_candidates() {
        let err = MatchError::Ambiguous {
            step: "a b".into(),
            candidates: vec!["a {x}".into(), "{x} b".into()],
        };
        assert_eq!(err.to_string(), "ambiguous step 'a b' matches a {x}, {x} b");
    }

    #[test]
    fn lookup_found_discards_misses() {
        assert!(MatchLookup::NotFound.found().is_none());
        let errored = MatchLookup::Errored(MatchError::Lookup {
            step: "x".into(),
            reason: "offline".into(),
        });
        assert!(errored.found().is_none());
        let found = MatchLookup::Found(StepMatch::new("x", "x", "x"));
        assert_eq!(found.found().map(|m| m.pattern().to_owned()), Some("x".to_owned()));
    }
}
