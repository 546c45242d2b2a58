use std::io::{self, Write};

use serde::Serialize;

use crate::grouper::IngestStats;
use crate::groups::Grouping;

/// Distinct lines plus their final partition.
#[derive(Debug, Clone)]
pub struct GroupReport {
    lines: Vec<String>,
    grouping: Grouping,
    stats: IngestStats,
}

impl GroupReport {
    pub fn new(lines: Vec<String>, grouping: Grouping, stats: IngestStats) -> Self {
        Self { lines, grouping, stats }
    }

    pub fn grouping(&self) -> &Grouping {
        &self.grouping
    }

    /// Group member texts, largest group first.
    pub fn group_lines<'a>(
        &'a self,
    ) -> impl Iterator<Item = impl Iterator<Item = &'a str> + 'a> + 'a {
        self.grouping
            .groups()
            .iter()
            .map(move |g| g.members().iter().map(move |&id| self.lines[id].as_str()))
    }

    pub fn write_to<W: Write>(&self, out: W) -> io::Result<()> {
        write_report(self, out)
    }
}

/// Write the grouped output:
///
/// ```text
/// <multi-member group count>
/// Group 1:
/// <line>
/// ...
/// ```
pub fn write_report<W: Write>(report: &GroupReport, mut out: W) -> io::Result<()> {
    writeln!(out, "{}", report.grouping.multi_member_count())?;
    for (i, members) in report.group_lines().enumerate() {
        writeln!(out, "Group {}:", i + 1)?;
        for line in members {
            writeln!(out, "{line}")?;
        }
    }
    out.flush()
}

/// End-of-run summary.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub input: String,
    pub output: String,
    pub total_groups: usize,
    pub multi_member_groups: usize,
    pub distinct_lines: usize,
    pub duplicate_lines: usize,
    pub skipped_lines: usize,
    pub elapsed_secs: f64,
}

impl RunSummary {
    pub fn new(report: &GroupReport, input: &str, output: &str, elapsed_secs: f64) -> Self {
        Self {
            input: input.to_string(),
            output: output.to_string(),
            total_groups: report.grouping.total_groups(),
            multi_member_groups: report.grouping.multi_member_count(),
            distinct_lines: report.stats.distinct,
            duplicate_lines: report.stats.duplicates,
            skipped_lines: report.stats.skipped,
            elapsed_secs,
        }
    }
}
