//! Perft runs checked against published node counts.
//!
//! Two annotation forms are accepted after the FEN:
//!
//! * `<fen>;D1 20;D2 400` - explicit depth/count clauses,
//! * `<fen>,20,400` - the Nth value is the count at depth N.
//!
//! A count mismatch is a `FAILED` row in the report, not an error.

use std::fmt;
use std::io::BufRead;
use std::time::Duration;

use log::{info, warn};

use crate::chess_errors::{ChessError, ChessResult};
use crate::move_generation::perft::{run_to_depth, PerftDivide, PerftOptions};

/// Expected leaf count at one depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Expectation {
    pub depth: u8,
    pub nodes: u64,
}

/// Splits an annotated line into its FEN and expectations.
pub fn parse_expectations(text: &str) -> ChessResult<(String, Vec<Expectation>)> {
    let text = text.trim();

    let mut clauses = text.split(';');
    let fen = clauses.next().unwrap_or_default();
    let clauses: Vec<&str> = clauses.collect();
    if !clauses.is_empty() {
        let expectations = clauses
            .iter()
            .map(|clause| parse_depth_clause(clause, text))
            .collect::<ChessResult<Vec<_>>>()?;
        return Ok((fen.trim().to_owned(), expectations));
    }

    let mut values = text.split(',');
    let fen = values.next().unwrap_or_default();
    let values: Vec<&str> = values.collect();
    if values.is_empty() {
        return Err(ChessError::expectation(format!(
            "missing expected results: '{text}'"
        )));
    }

    let mut expectations = Vec::with_capacity(values.len());
    for (idx, value) in values.iter().enumerate() {
        let depth = u8::try_from(idx + 1).map_err(|_| {
            ChessError::expectation(format!("too many expected results: '{text}'"))
        })?;
        let nodes = parse_count(value, text)?;
        expectations.push(Expectation { depth, nodes });
    }

    Ok((fen.trim().to_owned(), expectations))
}

/// `D<depth> <count>`
fn parse_depth_clause(clause: &str, line: &str) -> ChessResult<Expectation> {
    let Some(body) = clause.trim().strip_prefix('D') else {
        return Err(ChessError::expectation(format!(
            "clause '{clause}' must start with 'D' in '{line}'"
        )));
    };

    let numbers: Vec<&str> = body.split_whitespace().collect();
    let [depth, nodes] = numbers.as_slice() else {
        return Err(ChessError::expectation(format!(
            "clause '{clause}' needs a depth and a count in '{line}'"
        )));
    };

    let depth = depth.parse::<u8>().map_err(|_| {
        ChessError::expectation(format!("depth '{depth}' is not a number in '{line}'"))
    })?;
    let nodes = parse_count(nodes, line)?;

    Ok(Expectation { depth, nodes })
}

fn parse_count(value: &str, line: &str) -> ChessResult<u64> {
    value.trim().parse::<u64>().map_err(|_| {
        ChessError::expectation(format!("count '{}' is not a number in '{line}'", value.trim()))
    })
}

/// One compared depth.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepthResult {
    pub depth: u8,
    pub expected: u64,
    pub actual: u64,
    pub elapsed: Duration,
    /// Per-root-move counts, printed above the row when divide was requested.
    pub divide: Option<PerftDivide>,
}

impl DepthResult {
    pub fn passed(&self) -> bool {
        self.expected == self.actual
    }

    fn write_row(&self, f: &mut impl fmt::Write) -> fmt::Result {
        write!(
            f,
            "  Depth: {:3}. Expected: {:12}. Actual: {:12}. {}",
            self.depth,
            self.expected,
            self.actual,
            if self.passed() { "PASSED" } else { "FAILED" }
        )
    }

    /// The comparison row alone, without any divide lines.
    pub fn row(&self) -> String {
        let mut row = String::new();
        // Writing into a String cannot fail.
        let _ = self.write_row(&mut row);
        row
    }
}

impl fmt::Display for DepthResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(divide) = &self.divide {
            for (mv, nodes) in &divide.branches {
                writeln!(f, "    {mv}: {nodes}")?;
            }
            writeln!(
                f,
                "    Nodes searched: {} in {:.3}s",
                divide.total,
                self.elapsed.as_secs_f64()
            )?;
        }
        self.write_row(f)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PerftReport {
    pub fen: String,
    pub results: Vec<DepthResult>,
}

impl PerftReport {
    pub fn passed(&self) -> bool {
        self.results.iter().all(DepthResult::passed)
    }
}

impl fmt::Display for PerftReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FEN: {}", self.fen)?;
        for result in &self.results {
            write!(f, "\n{result}")?;
        }
        Ok(())
    }
}

/// Outcome for one line of a perft source.
#[derive(Debug)]
pub enum SourceLine {
    /// Blank or `#` comment line, kept for layout.
    Passthrough(String),
    Report(PerftReport),
    /// The line could not be run; later lines are unaffected.
    Failed { line: String, error: ChessError },
}

impl SourceLine {
    pub fn passed(&self) -> bool {
        match self {
            SourceLine::Passthrough(_) => true,
            SourceLine::Report(report) => report.passed(),
            SourceLine::Failed { .. } => false,
        }
    }
}

impl fmt::Display for SourceLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceLine::Passthrough(line) => write!(f, "{line}"),
            SourceLine::Report(report) => write!(f, "{report}"),
            SourceLine::Failed { line, error } => write!(f, "FEN: {line}\n  ERROR: {error}"),
        }
    }
}

/// Runs every depth annotated on `text` and compares the counts.
pub fn run_with_expected(text: &str, options: PerftOptions) -> ChessResult<PerftReport> {
    let (fen, expectations) = parse_expectations(text)?;

    let mut results = Vec::with_capacity(expectations.len());
    for expectation in expectations {
        let run = run_to_depth(&fen, expectation.depth, options)?;
        let result = DepthResult {
            depth: expectation.depth,
            expected: expectation.nodes,
            actual: run.nodes,
            elapsed: run.elapsed,
            divide: run.divide,
        };
        info!("{}", result.row());
        results.push(result);
    }

    Ok(PerftReport { fen, results })
}

/// Runs `run_with_expected` over each line of `reader`.
///
/// A line that fails to parse or run is reported and skipped; a read error
/// ends the whole call.
pub fn run_from_source<R: BufRead>(reader: R, options: PerftOptions) -> ChessResult<Vec<SourceLine>> {
    let mut outcomes = Vec::new();

    for line in reader.lines() {
        let line = line?;
        let trimmed = line.trim();

        if trimmed.is_empty() || trimmed.starts_with('#') {
            outcomes.push(SourceLine::Passthrough(trimmed.to_owned()));
            continue;
        }

        match run_with_expected(trimmed, options) {
            Ok(report) => outcomes.push(SourceLine::Report(report)),
            Err(error) => {
                warn!("skipping perft line '{trimmed}': {error}");
                outcomes.push(SourceLine::Failed {
                    line: trimmed.to_owned(),
                    error,
                });
            }
        }
    }

    Ok(outcomes)
}
