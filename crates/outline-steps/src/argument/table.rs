//! Data tables attached to steps.

use outline_patterns::Substitutions;

use crate::sexp::Sexp;

/// A data table attached to a step, stored row-major.
///
/// # Examples
/// ```
/// use outline_steps::DataTable;
///
/// let table = DataTable::new(vec![
///     vec!["name".into(), "count".into()],
///     vec!["cucumber".into(), "<count>".into()],
/// ]);
/// assert_eq!(table.cell(1, 1), Some("<count>"));
/// assert!(table.contains_text("<count>"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataTable {
    rows: Vec<Vec<String>>,
}

impl DataTable {
    /// Wrap raw rows.
    #[must_use]
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    /// Rows of the table, header row included.
    #[must_use]
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Borrowed view shaped like the argument step functions receive.
    #[must_use]
    pub fn raw(&self) -> Vec<Vec<&str>> {
        self.rows
            .iter()
            .map(|row| row.iter().map(String::as_str).collect())
            .collect()
    }

    /// Cell at `row`, `column` (both zero-based).
    #[must_use]
    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.rows.get(row)?.get(column).map(String::as_str)
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` when the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns `true` when any cell contains `text` literally.
    #[must_use]
    pub fn contains_text(&self, text: &str) -> bool {
        self.rows.iter().flatten().any(|cell| cell.contains(text))
    }

    /// Copy of the table with every cell substituted.
    #[must_use]
    pub fn with_substitutions(&self, subs: &Substitutions) -> Self {
        let rows = self
            .rows
            .iter()
            .map(|row| row.iter().map(|cell| subs.apply(cell)).collect())
            .collect();
        Self { rows }
    }

    pub(crate) fn to_sexp(&self) -> Sexp {
        Sexp::tagged(
            "table",
            self.rows.iter().map(|row| {
                Sexp::tagged(
                    "row",
                    row.iter()
                        .map(|cell| Sexp::tagged("cell", [Sexp::str(cell.as_str())])),
                )
            }),
        )
    }
}

impl From<Vec<Vec<String>>> for DataTable {
    fn from(rows: Vec<Vec<String>>) -> Self {
        Self::new(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(rows: &[&[&str]]) -> DataTable {
        DataTable::new(
            rows.iter()
                .map(|row| row.iter().map(|c| (*c).to_owned()).collect())
                .collect(),
        )
    }

    #[test]
    fn substitution_leaves_original_untouched() {
        let original = table(&[&["item", "qty"], &["<veg>", "<count>"]]);
        let subs = Substitutions::from_cells([("veg", Some("leek")), ("count", Some("2"))]);
        let replaced = original.with_substitutions(&subs);
        assert_eq!(replaced.raw(), vec![vec!["item", "qty"], vec!["leek", "2"]]);
        assert_eq!(original.cell(1, 0), Some("<veg>"));
    }

    #[test]
    fn containment_checks_every_cell() {
        let t = table(&[&["a", "b"], &["c", "x <count> y"]]);
        assert!(t.contains_text("<count>"));
        assert!(!t.contains_text("<veg>"));
    }

    #[test]
    fn renders_rows_and_cells() {
        let t = table(&[&["a", "b"]]);
        assert_eq!(
            t.to_sexp().to_string(),
            r#"[:table, [:row, [:cell, "a"], [:cell, "b"]]]"#
        );
    }

    #[test]
    fn out_of_range_cells_are_none() {
        let t = table(&[&["a"]]);
        assert_eq!(t.cell(0, 1), None);
        assert_eq!(t.cell(1, 0), None);
        assert_eq!(t.len(), 1);
        assert!(!t.is_empty());
    }
}
