//! Tagged tuple rendering used for debug output and tooling.
//!
//! Templates render as `[:step, line, "keyword", "name", <argument>]`. The
//! form is meant for inspection only; no stability guarantees are made.

use std::fmt;

/// A node of the tagged tuple tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sexp {
    /// A tag such as `:step`.
    Symbol(&'static str),
    /// A line number or count.
    Int(usize),
    /// Quoted text.
    Str(String),
    /// A bracketed sequence.
    List(Vec<Self>),
}

impl Sexp {
    /// Build a list headed by `tag`.
    #[must_use]
    pub fn tagged(tag: &'static str, rest: impl IntoIterator<Item = Self>) -> Self {
        let mut items = vec![Self::Symbol(tag)];
        items.extend(rest);
        Self::List(items)
    }

    /// Shorthand for [`Sexp::Str`].
    #[must_use]
    pub fn str(value: impl Into<String>) -> Self {
        Self::Str(value.into())
    }

    /// The tag of a list built with [`tagged`](Self::tagged).
    #[must_use]
    pub fn tag(&self) -> Option<&'static str> {
        match self {
            Self::List(items) => match items.first() {
                Some(Self::Symbol(tag)) => Some(*tag),
                _ => None,
            },
            _ => None,
        }
    }

    /// Child nodes of a list; empty for atoms.
    #[must_use]
    pub fn items(&self) -> &[Self] {
        match self {
            Self::List(items) => items,
            _ => &[],
        }
    }
}

impl fmt::Display for Sexp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Symbol(tag) => write!(f, ":{tag}"),
            Self::Int(value) => write!(f, "{value}"),
            Self::Str(value) => write!(f, "{value:?}"),
            Self::List(items) => {
                f.write_str("[")?;
                for (index, item) in items.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    item.fmt(f)?;
                }
                f.write_str("]")
            }
        }
    }
}
