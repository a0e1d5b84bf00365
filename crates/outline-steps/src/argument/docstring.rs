//! Doc strings attached to steps.

use outline_patterns::Substitutions;

use crate::sexp::Sexp;

/// A free-text block attached to a step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocString {
    content: String,
    content_type: Option<String>,
}

impl DocString {
    /// Doc string with no content type.
    #[must_use]
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            content_type: None,
        }
    }

    /// Attach a media type such as `json`.
    #[must_use]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Text of the block.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Media type, when one was declared.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// Lines of the block, without terminators.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.content.lines()
    }

    /// Returns `true` when the content contains `text` literally.
    #[must_use]
    pub fn contains_text(&self, text: &str) -> bool {
        self.content.contains(text)
    }

    /// Copy with the content substituted. The content type is kept as is.
    #[must_use]
    pub fn with_substitutions(&self, subs: &Substitutions) -> Self {
        Self {
            content: subs.apply(&self.content),
            content_type: self.content_type.clone(),
        }
    }

    pub(crate) fn to_sexp(&self) -> Sexp {
        Sexp::tagged("doc_string", [Sexp::str(self.content.as_str())])
    }
}
