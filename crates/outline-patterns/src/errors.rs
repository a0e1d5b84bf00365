//! Errors raised while compiling step-definition patterns.

use thiserror::Error;

/// Syntax fault found while lexing a step pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum SyntaxErrorKind {
    /// `{` not followed by a placeholder name and not doubled.
    #[error("unescaped '{{'")]
    UnescapedOpen,
    /// `}` outside any placeholder and not doubled.
    #[error("unmatched '}}'")]
    UnmatchedClose,
    /// `{name:}` with nothing after the colon.
    #[error("empty type hint")]
    EmptyHint,
    /// The name or hint is followed by something other than `}`.
    #[error("unexpected character")]
    UnexpectedChar,
    /// The pattern ends inside a placeholder.
    #[error("missing closing '}}'")]
    MissingClose,
}

/// Errors surfaced while converting step patterns into regular expressions.
///
/// # Examples
/// ```
/// use outline_patterns::{PatternError, SyntaxErrorKind, compile_step_pattern};
///
/// let err = compile_step_pattern("I have {count").expect_err("unterminated");
/// assert!(matches!(
///     err,
///     PatternError::Syntax { kind: SyntaxErrorKind::MissingClose, offset: 7, .. }
/// ));
/// assert_eq!(err.to_string(), "missing closing '}' at byte 7 in placeholder `count`");
/// ```
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PatternError {
    /// The `{placeholder}` syntax is malformed.
    #[error("{kind} at byte {offset}{}", in_placeholder(.placeholder.as_deref()))]
    Syntax {
        /// What is wrong.
        kind: SyntaxErrorKind,
        /// Byte offset of the offending brace.
        offset: usize,
        /// Placeholder name, when one was read before the fault.
        placeholder: Option<String>,
    },
    /// The generated regular expression failed to compile.
    #[error(transparent)]
    Regex(#[from] regex::Error),
}

impl PatternError {
    pub(crate) fn syntax(kind: SyntaxErrorKind, offset: usize, placeholder: Option<String>) -> Self {
        Self::Syntax {
            kind,
            offset,
            placeholder,
        }
    }
}

fn in_placeholder(name: Option<&str>) -> String {
    name.map(|name| format!(" in placeholder `{name}`"))
        .unwrap_or_default()
}
