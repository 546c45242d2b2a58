//! `linegroup-grouping` — Column-value grouping engine.
//!
//! Pure engine crate: receives raw lines, returns groups of lines that share a
//! value in the same column. No CLI or file system dependencies.

pub mod column_index;
pub mod config;
pub mod dsu;
pub mod error;
pub mod grouper;
pub mod groups;
pub mod parser;
pub mod report;

pub use config::GroupConfig;
pub use dsu::DisjointSets;
pub use error::GroupError;
pub use grouper::{IngestStats, LineGrouper, LineOutcome};
pub use groups::{extract_groups, Group, Grouping};
pub use parser::parse_line;
pub use report::{write_report, GroupReport, RunSummary};
