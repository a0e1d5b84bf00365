//! Step-definition pattern lexing and compilation.

pub(crate) mod lexer;

use crate::errors::PatternError;
use crate::hint::get_type_pattern;
use crate::specificity::SpecificityScore;
use lexer::{Token, lex_pattern};
use regex::Regex;

/// A step-definition pattern compiled to an anchored regular expression.
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    source: String,
    regex: Regex,
    specificity: SpecificityScore,
    placeholders: Vec<String>,
}

impl CompiledPattern {
    /// The pattern text as written by the step author.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// The anchored regular expression the pattern compiled to.
    #[must_use]
    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    /// Ranking used to break ties between overlapping patterns.
    #[must_use]
    pub fn specificity(&self) -> SpecificityScore {
        self.specificity
    }

    /// Placeholder names in declaration order.
    #[must_use]
    pub fn placeholders(&self) -> &[String] {
        &self.placeholders
    }
}

fn regex_source(tokens: &[Token], capacity: usize) -> String {
    let mut regex = String::with_capacity(capacity.saturating_mul(2) + 2);
    regex.push('^');
    for token in tokens {
        match token {
            Token::Literal(text) => regex.push_str(&regex::escape(text)),
            Token::Placeholder { hint, .. } => {
                regex.push('(');
                regex.push_str(get_type_pattern(hint.as_deref()));
                regex.push(')');
            }
        }
    }
    regex.push('$');
    regex
}

/// Build an anchored regular-expression source from a step pattern.
///
/// # Errors
/// Returns [`PatternError`] when the pattern contains malformed placeholders
/// or stray braces.
///
/// # Examples
/// ```
/// use outline_patterns::build_regex_from_pattern;
/// let regex = build_regex_from_pattern("I have {n:u32} cucumbers")
///     .expect("pattern is valid");
/// assert_eq!(regex, r"^I have (\d+) cucumbers$");
/// ```
pub fn build_regex_from_pattern(pat: &str) -> Result<String, PatternError> {
    let tokens = lex_pattern(pat)?;
    Ok(regex_source(&tokens, pat.len()))
}

/// Lex, score, and compile a step pattern in one pass.
///
/// # Errors
/// Returns [`PatternError`] when placeholder parsing fails or the generated
/// regex cannot be compiled.
pub fn compile_step_pattern(pat: &str) -> Result<CompiledPattern, PatternError> {
    let tokens = lex_pattern(pat)?;
    let regex = Regex::new(&regex_source(&tokens, pat.len()))?;
    let placeholders = tokens
        .iter()
        .filter_map(|token| match token {
            Token::Placeholder { name, .. } => Some(name.clone()),
            Token::Literal(_) => None,
        })
        .collect();
    Ok(CompiledPattern {
        source: pat.to_owned(),
        regex,
        specificity: SpecificityScore::from_tokens(&tokens),
        placeholders,
    })
}
