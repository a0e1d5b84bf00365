//! Plain-text rendering laid out like a feature file.
//!
//! Template lines end in a comment aligned across the outline, naming the
//! matched step definition or, when nothing matched, the template's own
//! position. Invocation lines list the placeholders their row filled in.

use std::io::{self, Write};

use outline_patterns::delimit;

use super::{RenderTarget, StepRenderer, TemplateResult};
use crate::argument::{DataTable, DocString, StepArgument};
use crate::invocation::ResolvedInvocation;
use crate::matcher::StepMatch;

const STEP_INDENT: &str = "    ";
const ARGUMENT_INDENT: &str = "      ";

/// Writes steps to any [`Write`] sink.
///
/// # Examples
/// ```
/// use outline_steps::{Location, PrettyRenderer, Row, Template};
///
/// let step = Template::new("en", Location::new("a.feature", 2), "Given ", "I have <n> leeks")
///     .expect("valid template");
/// let mut renderer = PrettyRenderer::new(Vec::new());
/// step.resolve(&Row::new(&["n"], &["3"]))
///     .accept(&mut renderer)
///     .expect("writing to a Vec succeeds");
/// let text = String::from_utf8(renderer.into_inner()).expect("utf-8");
/// assert_eq!(text, "    Given I have 3 leeks # <n>\n");
/// ```
#[derive(Debug)]
pub struct PrettyRenderer<W> {
    out: W,
}

impl<W: Write> PrettyRenderer<W> {
    /// Render into `out`.
    #[must_use]
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Recover the sink.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.out
    }

    fn template(&mut self, result: &TemplateResult<'_>) -> io::Result<()> {
        let comment = result
            .step_match()
            .step_match()
            .and_then(StepMatch::location)
            .unwrap_or_else(|| result.file_colon_line());
        writeln!(
            self.out,
            "{STEP_INDENT}{}{}{:pad$} # {comment}",
            result.keyword(),
            result.template().name(),
            "",
            pad = result.source_indent(),
        )?;
        result
            .argument()
            .map_or(Ok(()), |argument| self.argument(argument))
    }

    fn invocation(&mut self, invocation: &ResolvedInvocation<'_>) -> io::Result<()> {
        write!(
            self.out,
            "{STEP_INDENT}{}{}",
            invocation.keyword(),
            invocation.name()
        )?;
        let used: Vec<String> = invocation
            .consumed_cells()
            .iter()
            .map(|cell| delimit(cell.header()))
            .collect();
        if !used.is_empty() {
            write!(self.out, " # {}", used.join(", "))?;
        }
        writeln!(self.out)?;
        invocation
            .argument()
            .map_or(Ok(()), |argument| self.argument(argument))
    }

    fn argument(&mut self, argument: &StepArgument) -> io::Result<()> {
        match argument {
            StepArgument::Table(table) => self.table(table),
            StepArgument::DocString(doc) => self.doc_string(doc),
        }
    }

    fn table(&mut self, table: &DataTable) -> io::Result<()> {
        let widths = column_widths(table.rows());
        for row in table.rows() {
            write!(self.out, "{ARGUMENT_INDENT}|")?;
            for (cell, width) in row.iter().zip(&widths) {
                let pad = width.saturating_sub(cell.chars().count());
                write!(self.out, " {cell}{:pad$} |", "")?;
            }
            writeln!(self.out)?;
        }
        Ok(())
    }

    fn doc_string(&mut self, doc: &DocString) -> io::Result<()> {
        writeln!(
            self.out,
            "{ARGUMENT_INDENT}\"\"\"{}",
            doc.content_type().unwrap_or_default()
        )?;
        for line in doc.lines() {
            writeln!(self.out, "{ARGUMENT_INDENT}{line}")?;
        }
        writeln!(self.out, "{ARGUMENT_INDENT}\"\"\"")
    }
}

fn column_widths(rows: &[Vec<String>]) -> Vec<usize> {
    let columns = rows.iter().map(Vec::len).max().unwrap_or_default();
    (0..columns)
        .map(|column| {
            rows.iter()
                .filter_map(|row| row.get(column))
                .map(|cell| cell.chars().count())
                .max()
                .unwrap_or_default()
        })
        .collect()
}

impl<W: Write> StepRenderer for PrettyRenderer<W> {
    type Error = io::Error;

    fn render(&mut self, target: RenderTarget<'_>) -> io::Result<()> {
        match target {
            RenderTarget::Template(result) => self.template(result),
            RenderTarget::Invocation(invocation) => self.invocation(invocation),
        }
    }
}
