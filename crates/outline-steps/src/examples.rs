//! Example rows supplying concrete values to outline templates.
//!
//! An [`ExamplesTable`] is validated once when it is built. Rows handed out by
//! the table always have one cell per header, so the per-row code in
//! [`invocation`](crate::invocation) can rely on positional correspondence.

use outline_patterns::Substitutions;
use thiserror::Error;

/// Errors raised while assembling an examples table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ExamplesError {
    /// The table has no header row.
    #[error("examples table requires a header row")]
    MissingHeader,
    /// A header cell is blank.
    #[error("examples table header has an empty column at position {column}")]
    EmptyHeader {
        /// 1-based column index.
        column: usize,
    },
    /// The header row repeats a column name.
    #[error("examples table header contains duplicate column '{column}'")]
    DuplicateHeader {
        /// The repeated column name.
        column: String,
    },
    /// A row contains more or fewer cells than the header.
    #[error("examples row {row_number} has {actual} cells but expected {expected}")]
    UnevenRow {
        /// 1-based index of the row, counting the header as row 1.
        row_number: usize,
        /// Number of headers.
        expected: usize,
        /// Number of cells present in the offending row.
        actual: usize,
    },
}

/// One named value in an example row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    column: usize,
    header: String,
    value: Option<String>,
}

impl Cell {
    /// Create a cell for `column` (zero-based).
    #[must_use]
    pub fn new(column: usize, header: impl Into<String>, value: Option<String>) -> Self {
        Self {
            column,
            header: header.into(),
            value,
        }
    }

    /// Zero-based column index.
    #[must_use]
    pub fn column(&self) -> usize {
        self.column
    }

    /// Header name of the column.
    #[must_use]
    pub fn header(&self) -> &str {
        &self.header
    }

    /// Value of the cell. Absent values substitute as empty text.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }
}

/// An ordered sequence of cells, one per header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    line: Option<usize>,
    cells: Vec<Cell>,
}

impl Row {
    /// Pair `headers` with `values` by position.
    ///
    /// # Panics
    /// Panics when the two slices differ in length. A row whose arity does
    /// not match its headers means the caller assembled the examples
    /// incorrectly, and truncating would silently drop values.
    ///
    /// # Examples
    /// ```
    /// use outline_steps::Row;
    ///
    /// let row = Row::new(&["count"], &["5"]);
    /// assert_eq!(row.cells()[0].value(), Some("5"));
    /// ```
    #[must_use]
    pub fn new<H, V>(headers: &[H], values: &[V]) -> Self
    where
        H: AsRef<str>,
        V: AsRef<str>,
    {
        assert_eq!(
            headers.len(),
            values.len(),
            "example row has {} cells but the table declares {} headers",
            values.len(),
            headers.len(),
        );
        let cells = headers
            .iter()
            .zip(values)
            .enumerate()
            .map(|(column, (header, value))| {
                Cell::new(column, header.as_ref(), Some(value.as_ref().to_owned()))
            })
            .collect();
        Self { line: None, cells }
    }

    /// Build a row from `(header, value)` pairs; `None` marks an absent value.
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, Option<&'a str>)>,
    {
        let cells = pairs
            .into_iter()
            .enumerate()
            .map(|(column, (header, value))| Cell::new(column, header, value.map(str::to_owned)))
            .collect();
        Self { line: None, cells }
    }

    /// Record the source line the row was declared on.
    #[must_use]
    pub fn at_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    /// Source line, when known.
    #[must_use]
    pub fn line(&self) -> Option<usize> {
        self.line
    }

    /// Cells in header order.
    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Value stored under `header`.
    #[must_use]
    pub fn get(&self, header: &str) -> Option<&str> {
        self.cells
            .iter()
            .find(|cell| cell.header == header)
            .and_then(Cell::value)
    }

    /// Token mapping for this row: `<header>` to the cell value.
    #[must_use]
    pub fn substitutions(&self) -> Substitutions {
        Substitutions::from_cells(
            self.cells
                .iter()
                .map(|cell| (cell.header.as_str(), cell.value.as_deref())),
        )
    }
}

/// A named block of example rows sharing one header row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExamplesTable {
    name: Option<String>,
    line: Option<usize>,
    headers: Vec<String>,
    rows: Vec<Row>,
}

impl ExamplesTable {
    /// Validate `headers` and pair every value row with them.
    ///
    /// # Errors
    /// Returns [`ExamplesError`] when a header is blank or repeated, or when
    /// a row's length differs from the header's.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self, ExamplesError> {
        validate_headers(&headers)?;
        let rows = rows
            .into_iter()
            .enumerate()
            .map(|(index, values)| {
                if values.len() == headers.len() {
                    Ok(Row::new(&headers, &values))
                } else {
                    Err(ExamplesError::UnevenRow {
                        row_number: index + 2,
                        expected: headers.len(),
                        actual: values.len(),
                    })
                }
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            name: None,
            line: None,
            headers,
            rows,
        })
    }

    /// Treat the first raw row as the header row.
    ///
    /// # Errors
    /// Returns [`ExamplesError::MissingHeader`] for an empty table, otherwise
    /// the errors of [`new`](Self::new).
    pub fn from_raw(raw: Vec<Vec<String>>) -> Result<Self, ExamplesError> {
        let mut raw = raw.into_iter();
        let headers = raw.next().ok_or(ExamplesError::MissingHeader)?;
        Self::new(headers, raw.collect())
    }

    /// Attach the examples block's name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.name = (!name.trim().is_empty()).then_some(name);
        self
    }

    /// Record source lines: the header at `line`, each row on the next line.
    #[must_use]
    pub fn at_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        for (offset, row) in self.rows.iter_mut().enumerate() {
            row.line = Some(line + offset + 1);
        }
        self
    }

    /// Replace the recorded line of each row, in order.
    #[must_use]
    pub fn with_row_lines(mut self, lines: impl IntoIterator<Item = usize>) -> Self {
        for (row, line) in self.rows.iter_mut().zip(lines) {
            row.line = Some(line);
        }
        self
    }

    /// Name of the examples block, if any.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Line of the header row, when known.
    #[must_use]
    pub fn line(&self) -> Option<usize> {
        self.line
    }

    /// Column headers.
    #[must_use]
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Value rows in declaration order.
    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }
}

fn validate_headers(headers: &[String]) -> Result<(), ExamplesError> {
    if headers.is_empty() {
        return Err(ExamplesError::MissingHeader);
    }
    let mut seen = hashbrown::HashSet::with_capacity(headers.len());
    for (index, header) in headers.iter().enumerate() {
        if header.trim().is_empty() {
            return Err(ExamplesError::EmptyHeader { column: index + 1 });
        }
        if !seen.insert(header.as_str()) {
            return Err(ExamplesError::DuplicateHeader {
                column: header.clone(),
            });
        }
    }
    Ok(())
}
