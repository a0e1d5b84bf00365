//! Structured arguments attached to steps.
//!
//! A step may carry a data table or a doc string. Both are substituted as a
//! unit with the same mapping used for the step name, and both can report
//! whether a placeholder token occurs anywhere inside them.

mod docstring;
mod table;

use outline_patterns::Substitutions;

pub use docstring::DocString;
pub use table::DataTable;

use crate::sexp::Sexp;

/// A table or doc string attached to a step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepArgument {
    /// Tabular argument.
    Table(DataTable),
    /// Free-text argument.
    DocString(DocString),
}

impl StepArgument {
    /// Returns `true` when any cell or line contains `token` literally.
    #[must_use]
    pub fn contains_text(&self, token: &str) -> bool {
        match self {
            Self::Table(table) => table.contains_text(token),
            Self::DocString(doc) => doc.contains_text(token),
        }
    }

    /// New argument with every mapped token replaced. `self` is unchanged.
    #[must_use]
    pub fn with_substitutions(&self, subs: &Substitutions) -> Self {
        match self {
            Self::Table(table) => Self::Table(table.with_substitutions(subs)),
            Self::DocString(doc) => Self::DocString(doc.with_substitutions(subs)),
        }
    }

    /// The table, when this argument is one.
    #[must_use]
    pub fn as_table(&self) -> Option<&DataTable> {
        match self {
            Self::Table(table) => Some(table),
            Self::DocString(_) => None,
        }
    }

    /// The doc string, when this argument is one.
    #[must_use]
    pub fn as_docstring(&self) -> Option<&DocString> {
        match self {
            Self::DocString(doc) => Some(doc),
            Self::Table(_) => None,
        }
    }

    /// Tagged tuple form: `[:table, ...]` or `[:doc_string, "..."]`.
    #[must_use]
    pub fn to_sexp(&self) -> Sexp {
        match self {
            Self::Table(table) => table.to_sexp(),
            Self::DocString(doc) => doc.to_sexp(),
        }
    }
}

impl From<DataTable> for StepArgument {
    fn from(table: DataTable) -> Self {
        Self::Table(table)
    }
}

impl From<DocString> for StepArgument {
    fn from(doc: DocString) -> Self {
        Self::DocString(doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variants_dispatch_substitution_and_containment() {
        let subs = Substitutions::from_cells([("count", Some("5"))]);
        let table = StepArgument::from(DataTable::new(vec![vec!["<count>".into()]]));
        let doc = StepArgument::from(DocString::new("total: <count>"));

        assert!(table.contains_text("<count>"));
        assert!(doc.contains_text("<count>"));

        let table = table.with_substitutions(&subs);
        let doc = doc.with_substitutions(&subs);
        assert_eq!(table.as_table().and_then(|t| t.cell(0, 0)), Some("5"));
        assert_eq!(doc.as_docstring().map(DocString::content), Some("total: 5"));
        assert!(table.as_docstring().is_none());
        assert!(doc.as_table().is_none());
    }
}
