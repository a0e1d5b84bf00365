//! Placeholder delimiting and literal substitution for outline step text.
//!
//! Outline steps reference example columns as `<column>`. This module turns
//! column names into those delimited tokens and substitutes row values into
//! free text. Substitution is a plain literal replacement: no escaping is
//! applied to either the token or the value.

use regex::Regex;
use std::sync::LazyLock;

/// Marker opening a delimited placeholder.
pub const OPEN_MARKER: char = '<';
/// Marker closing a delimited placeholder.
pub const CLOSE_MARKER: char = '>';

/// Matches `<placeholder>` tokens in step text, capturing the bare name.
static PLACEHOLDER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<([^<>\s][^<>]*)>").unwrap_or_else(|_| unreachable!("placeholder regex is valid"))
});

/// Wrap an identifier in the placeholder markers.
///
/// # Examples
/// ```
/// use outline_patterns::delimit;
/// assert_eq!(delimit("count"), "<count>");
/// ```
#[must_use]
pub fn delimit(identifier: &str) -> String {
    let mut token = String::with_capacity(identifier.len() + 2);
    token.push(OPEN_MARKER);
    token.push_str(identifier);
    token.push(CLOSE_MARKER);
    token
}

/// Strip the placeholder markers from a delimited token.
///
/// Returns `None` when `token` is not wrapped in the markers.
///
/// # Examples
/// ```
/// use outline_patterns::{delimit, undelimit};
/// assert_eq!(undelimit(&delimit("count")), Some("count"));
/// assert_eq!(undelimit("count"), None);
/// ```
#[must_use]
pub fn undelimit(token: &str) -> Option<&str> {
    token
        .strip_prefix(OPEN_MARKER)?
        .strip_suffix(CLOSE_MARKER)
}

/// List the bare names of every `<placeholder>` in `text`, in order of
/// appearance. Repeated placeholders are listed each time they occur.
///
/// # Examples
/// ```
/// use outline_patterns::placeholder_names;
/// let names = placeholder_names("I have <count> <item> and <count> more");
/// assert_eq!(names, vec!["count", "item", "count"]);
/// ```
#[must_use]
pub fn placeholder_names(text: &str) -> Vec<&str> {
    PLACEHOLDER_RE
        .captures_iter(text)
        .filter_map(|cap| cap.get(1).map(|m| m.as_str()))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Entry {
    token: String,
    value: Option<String>,
}

/// Mapping from delimited tokens to the values substituted for them.
///
/// Entries are kept longest-token-first. [`apply`](Self::apply) scans the
/// original text once from left to right and, at each position, replaces the
/// longest token that starts there. Replacement values are never rescanned,
/// so a value that happens to look like a token is emitted verbatim and the
/// result does not depend on insertion order.
///
/// An absent value (`None`) substitutes as the empty string.
///
/// # Examples
/// ```
/// use outline_patterns::Substitutions;
///
/// let subs = Substitutions::from_cells([("count", Some("5")), ("veg", Some("cucumbers"))]);
/// assert_eq!(subs.apply("I have <count> <veg>"), "I have 5 cucumbers");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Substitutions {
    entries: Vec<Entry>,
}

impl Substitutions {
    /// Create an empty mapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a mapping from `(header, value)` pairs, delimiting each header.
    ///
    /// Later pairs replace earlier ones that share a header.
    pub fn from_cells<'a, I>(cells: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, Option<&'a str>)>,
    {
        let mut subs = Self::new();
        for (header, value) in cells {
            subs.insert(delimit(header), value.map(str::to_owned));
        }
        subs
    }

    /// Map `token` to `value`, replacing any previous value for the token.
    ///
    /// Empty tokens are ignored because they would match between every
    /// character of the input.
    pub fn insert(&mut self, token: impl Into<String>, value: Option<String>) {
        let token = token.into();
        if token.is_empty() {
            return;
        }
        if let Some(entry) = self.entries.iter_mut().find(|e| e.token == token) {
            entry.value = value;
            return;
        }
        self.entries.push(Entry { token, value });
        self.entries.sort_by(|a, b| {
            b.token
                .len()
                .cmp(&a.token.len())
                .then_with(|| a.token.cmp(&b.token))
        });
    }

    /// Value substituted for `token`, or `None` when the token is unmapped.
    ///
    /// Absent values are reported as the empty string.
    #[must_use]
    pub fn value_for(&self, token: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.token == token)
            .map(|e| e.value.as_deref().unwrap_or_default())
    }

    /// Iterate over the mapped tokens, longest first.
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.token.as_str())
    }

    /// Number of mapped tokens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when no token is mapped.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Replace every occurrence of every mapped token in `text`.
    ///
    /// Unmapped tokens are left untouched.
    #[must_use]
    pub fn apply(&self, text: &str) -> String {
        if self.entries.is_empty() {
            return text.to_owned();
        }
        let mut out = String::with_capacity(text.len());
        let mut rest = text;
        'scan: while let Some(ch) = rest.chars().next() {
            for entry in &self.entries {
                if let Some(tail) = rest.strip_prefix(entry.token.as_str()) {
                    out.push_str(entry.value.as_deref().unwrap_or_default());
                    rest = tail;
                    continue 'scan;
                }
            }
            out.push(ch);
            rest = rest.get(ch.len_utf8()..).unwrap_or_default();
        }
        out
    }
}
