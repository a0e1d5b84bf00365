//! Small value types shared across the crate.
//!
//! The module defines the language tag every template carries, the source
//! location used for display metadata, and the construction error raised
//! when a template's preconditions are not met.

use std::fmt;
use thiserror::Error;

/// Language tag of the specification a template was read from, e.g. `en`.
///
/// The tag is never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Language(String);

impl Language {
    /// Build a language tag, rejecting blank input.
    ///
    /// # Errors
    /// Returns [`TemplateError::MissingLanguage`] when `tag` is empty or only
    /// whitespace.
    ///
    /// # Examples
    /// ```
    /// use outline_steps::Language;
    ///
    /// assert_eq!(Language::new(" en ").map(|l| l.to_string()).ok(), Some("en".into()));
    /// assert!(Language::new("").is_err());
    /// ```
    pub fn new(tag: impl AsRef<str>) -> Result<Self, TemplateError> {
        let tag = tag.as_ref().trim();
        if tag.is_empty() {
            return Err(TemplateError::MissingLanguage);
        }
        Ok(Self(tag.to_owned()))
    }

    /// Access the tag text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// File and line a template or outline was declared at.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Location {
    file: String,
    line: usize,
}

impl Location {
    /// Create a location from a display path and a one-based line number.
    #[must_use]
    pub fn new(file: impl Into<String>, line: usize) -> Self {
        Self {
            file: file.into(),
            line,
        }
    }

    /// The file path as it should be displayed.
    #[must_use]
    pub fn file(&self) -> &str {
        &self.file
    }

    /// One-based line number.
    #[must_use]
    pub fn line(&self) -> usize {
        self.line
    }

    /// Same file, different line.
    #[must_use]
    pub fn at_line(&self, line: usize) -> Self {
        Self {
            file: self.file.clone(),
            line,
        }
    }
}

/// Renders as `file:line`.
impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// Errors raised while constructing a [`Template`](crate::Template).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum TemplateError {
    /// The template was built without a language tag.
    #[error("language is required to build a step template")]
    MissingLanguage,
    /// Both the keyword and the name were empty.
    #[error("step template at {location} has neither a keyword nor a name")]
    EmptyStep {
        /// Where the empty step was declared.
        location: Location,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_displays_file_colon_line() {
        let location = Location::new("features/cukes.feature", 12);
        assert_eq!(location.to_string(), "features/cukes.feature:12");
        assert_eq!(location.at_line(3).to_string(), "features/cukes.feature:3");
    }

    #[test]
    fn blank_language_is_rejected() {
        assert_eq!(Language::new("   "), Err(TemplateError::MissingLanguage));
    }

    #[test]
    fn empty_step_error_names_location() {
        let err = TemplateError::EmptyStep {
            location: Location::new("a.feature", 4),
        };
        assert_eq!(
            err.to_string(),
            "step template at a.feature:4 has neither a keyword nor a name"
        );
    }
}
