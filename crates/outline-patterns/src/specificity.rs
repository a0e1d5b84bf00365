//! Pattern specificity used to rank overlapping step definitions.
//!
//! More literal text and fewer placeholders make a pattern more specific.

use crate::PatternError;
use crate::pattern::lexer::{Token, lex_pattern};
use std::cmp::Ordering;

/// Specificity score for a step pattern.
///
/// Ordering compares, in turn: literal character count (more wins),
/// placeholder count (fewer wins), typed placeholder count (more wins).
///
/// # Examples
///
/// ```
/// use outline_patterns::SpecificityScore;
///
/// let specific = SpecificityScore::calculate("the output is foo")
///     .expect("valid specific pattern");
/// let generic = SpecificityScore::calculate("the output is {value}")
///     .expect("valid generic pattern");
/// assert!(specific > generic);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SpecificityScore {
    /// Literal characters in the pattern, counted in code points.
    pub literal_chars: usize,
    /// Number of placeholders.
    pub placeholder_count: usize,
    /// Number of placeholders carrying a type hint.
    pub typed_placeholder_count: usize,
}

impl SpecificityScore {
    /// Calculate the specificity score for a pattern string.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError`] if the pattern contains invalid syntax.
    pub fn calculate(pattern: &str) -> Result<Self, PatternError> {
        lex_pattern(pattern).map(|tokens| Self::from_tokens(&tokens))
    }

    pub(crate) fn from_tokens(tokens: &[Token]) -> Self {
        tokens.iter().fold(Self::default(), |mut score, token| {
            match token {
                Token::Literal(text) => score.literal_chars += text.chars().count(),
                Token::Placeholder { hint, .. } => {
                    score.placeholder_count += 1;
                    if hint.is_some() {
                        score.typed_placeholder_count += 1;
                    }
                }
            }
            score
        })
    }
}

impl Ord for SpecificityScore {
    fn cmp(&self, other: &Self) -> Ordering {
        self.literal_chars
            .cmp(&other.literal_chars)
            .then_with(|| other.placeholder_count.cmp(&self.placeholder_count))
            .then_with(|| {
                self.typed_placeholder_count
                    .cmp(&other.typed_placeholder_count)
            })
    }
}

impl PartialOrd for SpecificityScore {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
#[expect(clippy::expect_used, reason = "tests use valid literal patterns")]
mod tests {
    use super::*;

    fn score(pattern: &str) -> SpecificityScore {
        SpecificityScore::calculate(pattern).expect("pattern should lex")
    }

    #[test]
    fn counts_literals_and_placeholders() {
        let s = score("I have {count:u32} apples");
        assert_eq!(s.literal_chars, 14);
        assert_eq!(s.placeholder_count, 1);
        assert_eq!(s.typed_placeholder_count, 1);
    }

    #[test]
    fn fewer_placeholders_win_on_equal_literals() {
        assert!(score("a {x}") > score("a {x}{y}"));
    }

    #[test]
    fn typed_placeholders_break_ties() {
        assert!(score("take {n:u32}") > score("take {n}"));
    }

    #[test]
    fn literal_text_dominates() {
        assert!(score("overlap apples") > score("overlap {item}"));
    }
}
