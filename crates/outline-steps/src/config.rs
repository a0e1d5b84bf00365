//! Matching configuration.
//!
//! The only setting is `guess`, which lets the registry settle ambiguous
//! lookups by picking the most specific definition instead of reporting an
//! error. It defaults to off and can be switched on through the
//! `OUTLINE_STEPS_GUESS` environment variable.

/// Environment variable read by [`MatchConfig::from_env`].
pub const GUESS_ENV: &str = "OUTLINE_STEPS_GUESS";

fn parse_env_bool(value: &str) -> Option<bool> {
    match value.trim() {
        "1" | "true" | "TRUE" | "True" | "yes" | "YES" | "Yes" | "on" | "ON" | "On" => Some(true),
        "0" | "false" | "FALSE" | "False" | "no" | "NO" | "No" | "off" | "OFF" | "Off" => {
            Some(false)
        }
        _ => None,
    }
}

/// Settings controlling how the step registry resolves lookups.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchConfig {
    guess: bool,
}

impl MatchConfig {
    /// Strict matching: any ambiguity is an error.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable guessing.
    #[must_use]
    pub fn with_guess(mut self, guess: bool) -> Self {
        self.guess = guess;
        self
    }

    /// Whether ambiguous lookups pick the most specific definition.
    #[must_use]
    pub fn guess(self) -> bool {
        self.guess
    }

    /// Read settings from the process environment.
    ///
    /// Unset or unrecognised values leave the default in place.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through `lookup`, which maps a variable name to its
    /// value.
    ///
    /// # Examples
    /// ```
    /// use outline_steps::{GUESS_ENV, MatchConfig};
    ///
    /// let config = MatchConfig::from_lookup(|key| (key == GUESS_ENV).then(|| "yes".to_owned()));
    /// assert!(config.guess());
    /// ```
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let guess = lookup(GUESS_ENV)
            .as_deref()
            .and_then(parse_env_bool)
            .unwrap_or_default();
        Self { guess }
    }
}
