//! Human-readable projections of a seed run.
//!
//! Nothing here holds state; every function is a pure view over its input.

use std::fmt;
use std::fmt::Write as _;

use crate::orchestrator::OperationResult;
use crate::registry::OperationRegistry;

const SUCCESS_GLYPH: char = '✓';
const FAILURE_GLYPH: char = '✗';

/// Aggregate figures over a run's results.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSummary {
    pub total_records: u64,
    pub total_time_ms: f64,
    pub success_count: usize,
    pub failure_count: usize,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} in {:.2} ms ({} succeeded, {} failed)",
            records_label(self.total_records),
            self.total_time_ms,
            self.success_count,
            self.failure_count,
        )
    }
}

pub fn summarize(results: &[OperationResult]) -> RunSummary {
    let success_count = results.iter().filter(|r| r.success).count();
    RunSummary {
        total_records: results.iter().map(|r| r.records_created).sum(),
        total_time_ms: results.iter().map(|r| r.execution_time_ms).sum(),
        success_count,
        failure_count: results.len() - success_count,
    }
}

/// Render one line per result, in the order given, followed by the totals.
///
/// Failed results get an extra indented `error:` line.
pub fn format(summary: &RunSummary, results: &[OperationResult]) -> String {
    let width = results.iter().map(|r| r.name.len()).max().unwrap_or(0);
    let mut out = String::new();

    for result in results {
        let glyph = if result.success {
            SUCCESS_GLYPH
        } else {
            FAILURE_GLYPH
        };
        let _ = writeln!(
            out,
            "  {glyph} {name:<width$}  {records:>12}  {ms:>10.2} ms",
            name = result.name,
            records = records_label(result.records_created),
            ms = result.execution_time_ms,
        );
        if let Some(error) = &result.error {
            let _ = writeln!(out, "      error: {error}");
        }
    }

    let _ = writeln!(out, "  {}", "-".repeat(width + 34));
    let _ = write!(out, "  Total: {summary}");
    out
}

/// Render the execution plan: one line per operation in run order.
pub fn format_plan(registry: &OperationRegistry) -> String {
    let sorted = registry.sorted();
    let width = sorted
        .iter()
        .map(|op| op.config().name.len())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for op in sorted {
        let config = op.config();
        let _ = write!(
            out,
            "{order:>6}  {name:<width$}  {description}",
            order = config.order,
            name = config.name,
            description = config.description,
        );
        if !config.depends_on.is_empty() {
            let _ = write!(out, " (after {})", config.depends_on.join(", "));
        }
        out.push('\n');
    }
    out
}

fn records_label(count: u64) -> String {
    if count == 1 {
        "1 record".to_string()
    } else {
        format!("{count} records")
    }
}
