//! Line ingestion: dedup, parse, column matching, union.

use std::io::BufRead;

use rustc_hash::FxHashMap;

use crate::column_index::ColumnIndex;
use crate::config::GroupConfig;
use crate::dsu::DisjointSets;
use crate::error::{GroupError, ParseFailure};
use crate::groups::{extract_groups, Grouping};
use crate::parser::parse_line;
use crate::report::GroupReport;

/// What happened to one pushed line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineOutcome {
    /// New distinct record with this id.
    Added(usize),
    /// Same text as record `usize`; ignored.
    Duplicate(usize),
    /// Blank line; ignored.
    Empty,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestStats {
    pub distinct: usize,
    pub duplicates: usize,
    pub empty: usize,
    pub skipped: usize,
    pub unions: usize,
}

/// Owns all ingestion state. Feed lines with [`push_line`](Self::push_line)
/// or [`ingest_reader`](Self::ingest_reader), then call [`finish`](Self::finish).
#[derive(Debug)]
pub struct LineGrouper {
    delimiter: char,
    dsu: DisjointSets,
    index: ColumnIndex,
    lines: Vec<String>,
    seen: FxHashMap<String, usize>,
    stats: IngestStats,
}

impl Default for LineGrouper {
    fn default() -> Self {
        Self::new(&GroupConfig::default())
    }
}

impl LineGrouper {
    pub fn new(config: &GroupConfig) -> Self {
        Self {
            delimiter: config.delimiter,
            dsu: DisjointSets::new(),
            index: ColumnIndex::new(),
            lines: Vec::new(),
            seen: FxHashMap::default(),
            stats: IngestStats::default(),
        }
    }

    pub fn stats(&self) -> IngestStats {
        self.stats
    }

    /// Distinct lines in record id order.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Register one raw line.
    ///
    /// Parse failures come back as [`GroupError::Parse`], are counted as
    /// skipped, and leave no trace in the grouping.
    pub fn push_line(&mut self, line: &str) -> Result<LineOutcome, GroupError> {
        if line.is_empty() {
            self.stats.empty += 1;
            return Ok(LineOutcome::Empty);
        }

        let values = match parse_line(line, self.delimiter) {
            Ok(values) => values,
            Err(e) => {
                self.stats.skipped += 1;
                return Err(e);
            }
        };

        if let Some(&id) = self.seen.get(line) {
            self.stats.duplicates += 1;
            return Ok(LineOutcome::Duplicate(id));
        }

        let id = self.dsu.add_record();
        self.lines.push(line.to_string());
        self.seen.insert(line.to_string(), id);
        self.stats.distinct += 1;

        for (column, value) in values.iter().enumerate() {
            let Some(value) = *value else {
                continue;
            };
            if let Some(owner) = self.index.claim(column, value, id) {
                if self.dsu.union(owner, id)? {
                    self.stats.unions += 1;
                }
            }
        }

        Ok(LineOutcome::Added(id))
    }

    /// Feed every line of `reader`. Unparseable lines are logged and skipped;
    /// read errors abort.
    ///
    /// Lines end at `\n`, `\r\n` or a bare `\r`. A line that is not valid
    /// UTF-8 is skipped like any other unparseable line.
    pub fn ingest_reader<R: BufRead>(&mut self, reader: R) -> Result<IngestStats, GroupError> {
        for chunk in reader.split(b'\n') {
            let mut raw = chunk?;
            if raw.last() == Some(&b'\r') {
                raw.pop();
            }
            for bytes in raw.split(|&b| b == b'\r') {
                let outcome = match std::str::from_utf8(bytes) {
                    Ok(line) => self.push_line(line),
                    Err(e) => self.reject_undecodable(bytes, e.valid_up_to()),
                };
                match outcome {
                    Ok(_) => {}
                    Err(e) if e.is_recoverable() => log::warn!("{e}"),
                    Err(e) => return Err(e),
                }
            }
        }

        log::debug!(
            "ingested {} distinct lines ({} duplicate, {} empty, {} skipped), {} unions over {} columns",
            self.stats.distinct,
            self.stats.duplicates,
            self.stats.empty,
            self.stats.skipped,
            self.stats.unions,
            self.index.width(),
        );
        Ok(self.stats)
    }

    fn reject_undecodable(
        &mut self,
        bytes: &[u8],
        offset: usize,
    ) -> Result<LineOutcome, GroupError> {
        self.stats.skipped += 1;
        Err(GroupError::Parse {
            line: String::from_utf8_lossy(bytes).into_owned(),
            reason: ParseFailure::InvalidUtf8 { offset },
        })
    }

    /// Current partition without consuming the grouper.
    pub fn grouping(&mut self) -> Result<Grouping, GroupError> {
        extract_groups(&mut self.dsu)
    }

    pub fn finish(mut self) -> Result<GroupReport, GroupError> {
        let grouping = extract_groups(&mut self.dsu)?;
        Ok(GroupReport::new(self.lines, grouping, self.stats))
    }
}
