//! A small step-definition registry usable as a [`StepMatcher`].
//!
//! Definitions are written with the `{name}` / `{name:type}` placeholder
//! syntax and compiled to anchored regular expressions. Patterns without
//! braces are also indexed by their text so that exact lookups skip regex
//! evaluation; an exact hit always wins because nothing is more specific than
//! the literal step.
//!
//! When several patterns match the same text the lookup is ambiguous. By
//! default that is reported as [`MatchError::Ambiguous`]; with
//! [`MatchConfig::guess`] enabled the most specific pattern is chosen
//! instead, provided it is strictly more specific than every other match.

use hashbrown::HashMap;
use outline_patterns::{
    CapturedValue, CompiledPattern, PatternError, compile_step_pattern, extract_captured_values,
};
use thiserror::Error;

use crate::config::MatchConfig;
use crate::matcher::{MatchError, MatchLookup, StepMatch, StepMatcher};

/// Errors raised while registering a step definition.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RegistryError {
    /// The pattern does not compile.
    #[error("invalid step pattern '{pattern}': {source}")]
    Pattern {
        /// Pattern as written.
        pattern: String,
        /// Why it was rejected.
        #[source]
        source: PatternError,
    },
    /// The same pattern was registered twice.
    #[error("step pattern '{pattern}' is already registered")]
    Duplicate {
        /// Pattern as written.
        pattern: String,
    },
}

#[derive(Debug)]
struct StepDefinition {
    pattern: CompiledPattern,
    location: Option<String>,
}

impl StepDefinition {
    fn to_match(&self, text: &str, name_to_report: &str, arguments: Vec<CapturedValue>) -> StepMatch {
        let mut step_match = StepMatch::new(self.pattern.as_str(), text, name_to_report)
            .with_arguments(arguments);
        if let Some(location) = &self.location {
            step_match = step_match.with_location(location.as_str());
        }
        step_match
    }
}

struct Candidate<'a> {
    definition: &'a StepDefinition,
    arguments: Vec<CapturedValue>,
}

/// Registered step definitions.
///
/// # Examples
/// ```
/// use outline_steps::{MatchLookup, StepMatcher, StepRegistry};
///
/// let mut registry = StepRegistry::new();
/// registry.register("I have {count:u32} cucumbers").expect("valid pattern");
/// let MatchLookup::Found(step) = registry.find("I have 5 cucumbers", "I have <n> cucumbers") else {
///     panic!("step should match");
/// };
/// assert_eq!(step.arguments()[0].value, "5");
/// assert_eq!(step.name_to_report(), "I have <n> cucumbers");
/// ```
#[derive(Debug, Default)]
pub struct StepRegistry {
    definitions: Vec<StepDefinition>,
    exact: HashMap<String, usize>,
    config: MatchConfig,
}

impl StepRegistry {
    /// Empty registry with strict matching.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty registry using `config`.
    #[must_use]
    pub fn with_config(config: MatchConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> MatchConfig {
        self.config
    }

    /// Number of registered definitions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Returns `true` when nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Register a definition without a source location.
    ///
    /// # Errors
    /// See [`register_at`](Self::register_at).
    pub fn register(&mut self, pattern: &str) -> Result<(), RegistryError> {
        self.insert(pattern, None)
    }

    /// Register a definition declared at `location`, e.g. `steps.rs:12`.
    ///
    /// # Errors
    /// Returns [`RegistryError::Pattern`] when the pattern does not compile
    /// and [`RegistryError::Duplicate`] when it is already registered.
    pub fn register_at(
        &mut self,
        pattern: &str,
        location: impl Into<String>,
    ) -> Result<(), RegistryError> {
        self.insert(pattern, Some(location.into()))
    }

    fn insert(&mut self, pattern: &str, location: Option<String>) -> Result<(), RegistryError> {
        if self.definitions.iter().any(|d| d.pattern.as_str() == pattern) {
            return Err(RegistryError::Duplicate {
                pattern: pattern.to_owned(),
            });
        }
        let compiled = compile_step_pattern(pattern).map_err(|source| RegistryError::Pattern {
            pattern: pattern.to_owned(),
            source,
        })?;
        if !pattern.contains(['{', '}']) {
            self.exact.insert(pattern.to_owned(), self.definitions.len());
        }
        self.definitions.push(StepDefinition {
            pattern: compiled,
            location,
        });
        Ok(())
    }

    /// Look up the definition matching `text`.
    ///
    /// `name_to_report` is carried into the returned [`StepMatch`].
    #[must_use]
    pub fn lookup(&self, text: &str, name_to_report: &str) -> MatchLookup {
        if let Some(definition) = self.exact.get(text).and_then(|&i| self.definitions.get(i)) {
            return MatchLookup::Found(definition.to_match(text, name_to_report, Vec::new()));
        }
        let mut candidates: Vec<Candidate<'_>> = self
            .definitions
            .iter()
            .filter_map(|definition| {
                extract_captured_values(definition.pattern.regex(), text).map(|arguments| {
                    Candidate {
                        definition,
                        arguments,
                    }
                })
            })
            .collect();
        if candidates.len() > 1 {
            return self.resolve_ambiguity(text, name_to_report, candidates);
        }
        candidates.pop().map_or(MatchLookup::NotFound, |candidate| {
            MatchLookup::Found(candidate.definition.to_match(
                text,
                name_to_report,
                candidate.arguments,
            ))
        })
    }

    fn resolve_ambiguity(
        &self,
        text: &str,
        name_to_report: &str,
        candidates: Vec<Candidate<'_>>,
    ) -> MatchLookup {
        let patterns: Vec<String> = candidates
            .iter()
            .map(|c| c.definition.pattern.as_str().to_owned())
            .collect();
        let ambiguous = || {
            MatchLookup::Errored(MatchError::Ambiguous {
                step: text.to_owned(),
                candidates: patterns.clone(),
            })
        };
        if !self.config.guess() {
            return ambiguous();
        }
        let Some(best) = candidates
            .iter()
            .map(|c| c.definition.pattern.specificity())
            .max()
        else {
            return MatchLookup::NotFound;
        };
        let mut top = candidates
            .into_iter()
            .filter(|c| c.definition.pattern.specificity() == best);
        match (top.next(), top.next()) {
            (Some(chosen), None) => {
                log::warn!(
                    "step '{text}' matches {} definitions; guessing '{}'",
                    patterns.len(),
                    chosen.definition.pattern.as_str()
                );
                MatchLookup::Found(chosen.definition.to_match(
                    text,
                    name_to_report,
                    chosen.arguments,
                ))
            }
            _ => ambiguous(),
        }
    }
}

impl StepMatcher for StepRegistry {
    fn find(&self, candidate: &str, original: &str) -> MatchLookup {
        self.lookup(candidate, original)
    }
}

#[cfg(test)]
#[expect(clippy::expect_used, reason = "registration in tests uses valid patterns")]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    fn registry(config: MatchConfig, patterns: &[&str]) -> StepRegistry {
        let mut registry = StepRegistry::with_config(config);
        for pattern in patterns {
            registry.register(pattern).expect("valid pattern");
        }
        registry
    }

    #[fixture]
    fn overlapping() -> [&'static str; 3] {
        ["I have {n} {veg}", "I have {n:u32} leeks", "I have 5 leeks"]
    }

    #[rstest]
    fn exact_patterns_win_outright(overlapping: [&'static str; 3]) {
        let registry = registry(MatchConfig::new(), &overlapping);
        let MatchLookup::Found(step) = registry.lookup("I have 5 leeks", "I have <n> leeks") else {
            panic!("exact text should match");
        };
        assert_eq!(step.pattern(), "I have 5 leeks");
        assert!(step.arguments().is_empty());
    }

    #[rstest]
    fn strict_mode_reports_every_candidate(overlapping: [&'static str; 3]) {
        let registry = registry(MatchConfig::new(), &overlapping);
        let MatchLookup::Errored(MatchError::Ambiguous { candidates, .. }) =
            registry.lookup("I have 7 leeks", "I have <n> leeks")
        else {
            panic!("two patterns match");
        };
        assert_eq!(candidates, ["I have {n} {veg}", "I have {n:u32} leeks"]);
    }

    #[rstest]
    fn guess_mode_prefers_the_most_specific(overlapping: [&'static str; 3]) {
        let registry = registry(MatchConfig::new().with_guess(true), &overlapping);
        let MatchLookup::Found(step) = registry.lookup("I have 7 leeks", "I have <n> leeks") else {
            panic!("guessing should settle the ambiguity");
        };
        assert_eq!(step.pattern(), "I have {n:u32} leeks");
        assert_eq!(step.format_args(|arg| format!("<{arg}>")), "I have <7> leeks");
    }

    #[test]
    fn guess_mode_still_rejects_ties() {
        let registry = registry(MatchConfig::new().with_guess(true), &["a {x} c", "a b {y}"]);
        assert!(matches!(
            registry.lookup("a b c", "a b c"),
            MatchLookup::Errored(MatchError::Ambiguous { .. })
        ));
    }

    #[test]
    fn unmatched_text_is_not_found() {
        let registry = registry(MatchConfig::new(), &["I have {n:u32} leeks"]);
        assert_eq!(registry.lookup("I have many leeks", "x"), MatchLookup::NotFound);
    }

    #[test]
    fn duplicates_and_bad_patterns_are_rejected() {
        let mut registry = StepRegistry::new();
        registry.register_at("a {x}", "steps.rs:1").expect("valid pattern");
        assert!(matches!(
            registry.register("a {x}"),
            Err(RegistryError::Duplicate { .. })
        ));
        let err = registry.register("a {x").expect_err("unclosed brace");
        assert!(
            err.to_string()
                .starts_with("invalid step pattern 'a {x': missing closing '}'"),
            "unexpected message: {err}"
        );
        assert_eq!(registry.len(), 1);
    }
}
