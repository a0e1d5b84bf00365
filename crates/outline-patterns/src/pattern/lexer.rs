//! Pattern lexer converting step-definition patterns into tokens.
//!
//! The syntax is deliberately small: `{name}` or `{name:hint}` introduces a
//! placeholder, `{{` and `}}` stand for literal braces, and everything else is
//! literal text.

use crate::errors::{PatternError, SyntaxErrorKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Token {
    Literal(String),
    Placeholder {
        start: usize,
        name: String,
        hint: Option<String>,
    },
}

fn is_name_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_'
}

fn is_name_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

pub(crate) fn lex_pattern(pattern: &str) -> Result<Vec<Token>, PatternError> {
    let mut tokens = Vec::new();
    let mut literal = String::new();
    let mut chars = pattern.char_indices().peekable();

    while let Some((pos, ch)) = chars.next() {
        match ch {
            '{' if chars.peek().is_some_and(|&(_, next)| next == '{') => {
                chars.next();
                literal.push('{');
            }
            '}' if chars.peek().is_some_and(|&(_, next)| next == '}') => {
                chars.next();
                literal.push('}');
            }
            '{' => {
                if !chars.peek().is_some_and(|&(_, next)| is_name_start(next)) {
                    return Err(PatternError::syntax(
                        SyntaxErrorKind::UnescapedOpen,
                        pos,
                        None,
                    ));
                }
                let mut name = String::new();
                while let Some(&(_, next)) = chars.peek() {
                    if !is_name_char(next) {
                        break;
                    }
                    name.push(next);
                    chars.next();
                }
                let mut hint = None;
                if chars.peek().is_some_and(|&(_, next)| next == ':') {
                    chars.next();
                    let mut raw = String::new();
                    while let Some(&(_, next)) = chars.peek() {
                        if next == '}' || next.is_whitespace() || next == '{' {
                            break;
                        }
                        raw.push(next);
                        chars.next();
                    }
                    if raw.is_empty() {
                        return Err(PatternError::syntax(
                            SyntaxErrorKind::EmptyHint,
                            pos,
                            Some(name),
                        ));
                    }
                    hint = Some(raw);
                }
                match chars.next() {
                    Some((_, '}')) => {}
                    Some(_) => {
                        return Err(PatternError::syntax(
                            SyntaxErrorKind::UnexpectedChar,
                            pos,
                            Some(name),
                        ));
                    }
                    None => {
                        return Err(PatternError::syntax(
                            SyntaxErrorKind::MissingClose,
                            pos,
                            Some(name),
                        ));
                    }
                }
                if !literal.is_empty() {
                    tokens.push(Token::Literal(std::mem::take(&mut literal)));
                }
                tokens.push(Token::Placeholder {
                    start: pos,
                    name,
                    hint,
                });
            }
            '}' => {
                return Err(PatternError::syntax(
                    SyntaxErrorKind::UnmatchedClose,
                    pos,
                    None,
                ));
            }
            other => literal.push(other),
        }
    }

    if !literal.is_empty() {
        tokens.push(Token::Literal(literal));
    }
    Ok(tokens)
}
