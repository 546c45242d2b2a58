// linegroup CLI - group delimited numeric records sharing a column value

mod exit_codes;

use std::fs::File;
use std::io::{self, BufReader, BufWriter, IsTerminal};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use linegroup_cli::paths::output_path_for;
use linegroup_grouping::{GroupConfig, GroupError, LineGrouper, RunSummary};
use tracing_subscriber::EnvFilter;

use exit_codes::{EXIT_CONFIG, EXIT_ERROR, EXIT_IO, EXIT_SUCCESS, EXIT_USAGE};

const USAGE: &str = "One argument expected: <INPUT_FILE_NAME>";

#[derive(Parser)]
#[command(name = "linegroup")]
#[command(about = "Group lines that share a value in the same column")]
#[command(long_version = long_version())]
#[command(version)]
#[command(after_help = "\
Examples:
  linegroup lng.txt
  linegroup lng.csv --delimiter ','
  linegroup lng.txt --output groups.txt --json
  RUST_LOG=debug linegroup lng.txt")]
struct Cli {
    /// Input file: one record per line, e.g. "1";"2";""
    input: Option<PathBuf>,

    /// Field delimiter (overrides the config file)
    #[arg(long, short = 'd')]
    delimiter: Option<char>,

    /// Output file (default: input name with -out before the extension)
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,

    /// TOML config file (delimiter, output_suffix)
    #[arg(long, short = 'c', env = "LINEGROUP_CONFIG")]
    config: Option<PathBuf>,

    /// Print the run summary as JSON to stdout
    #[arg(long)]
    json: bool,

    /// Suppress the human-readable summary
    #[arg(long, short = 'q')]
    quiet: bool,
}

fn long_version() -> &'static str {
    if cfg!(debug_assertions) {
        concat!(
            env!("CARGO_PKG_VERSION"),
            " (", env!("GIT_COMMIT_HASH"), ")",
            "\nbuild:   debug",
            "\ntarget:  ", env!("TARGET"),
        )
    } else {
        concat!(
            env!("CARGO_PKG_VERSION"),
            " (", env!("GIT_COMMIT_HASH"), ")",
            "\nbuild:   release",
            "\ntarget:  ", env!("TARGET"),
        )
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging();

    let result = match cli.input.clone() {
        None => {
            println!("{USAGE}");
            println!("       linegroup --help for more information");
            Err(CliError::usage())
        }
        Some(input) => cmd_group(&cli, &input),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    /// Usage already printed; exit quietly with the usage code.
    pub fn usage() -> Self {
        Self { code: EXIT_USAGE, message: String::new(), hint: None }
    }

    pub fn general(msg: impl Into<String>) -> Self {
        Self { code: EXIT_ERROR, message: msg.into(), hint: None }
    }

    pub fn args(msg: impl Into<String>) -> Self {
        Self { code: EXIT_USAGE, message: msg.into(), hint: None }
    }

    pub fn io(msg: impl Into<String>) -> Self {
        Self { code: EXIT_IO, message: msg.into(), hint: None }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self { code: EXIT_CONFIG, message: msg.into(), hint: None }
    }

    /// Map an engine error to its exit code.
    pub fn grouping(err: GroupError) -> Self {
        let code = match &err {
            GroupError::Io(_) => EXIT_IO,
            GroupError::ConfigParse(_) | GroupError::ConfigValidation(_) => EXIT_CONFIG,
            GroupError::Parse { .. } | GroupError::InvalidId { .. } => EXIT_ERROR,
        };
        Self { code, message: err.to_string(), hint: None }
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

// ============================================================================
// group
// ============================================================================

/// Defaults, then config file, then command-line flags.
fn resolve_config(cli: &Cli) -> Result<GroupConfig, CliError> {
    let mut config = match &cli.config {
        Some(path) => {
            let text = std::fs::read_to_string(path).map_err(|e| {
                CliError::config(format!("cannot read config {}: {e}", path.display()))
            })?;
            GroupConfig::from_toml(&text).map_err(CliError::grouping)?
        }
        None => GroupConfig::default(),
    };

    if let Some(delimiter) = cli.delimiter {
        config.delimiter = delimiter;
        config.validate().map_err(|e| {
            CliError::args(e.to_string())
                .with_hint("the delimiter cannot be a double quote, '\\n' or '\\r'")
        })?;
    }

    Ok(config)
}

fn open_input(input: &Path) -> Result<File, CliError> {
    File::open(input).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => CliError::io(format!("input file {} not found", input.display())),
        _ => CliError::io(format!("cannot read {}: {e}", input.display())),
    })
}

/// Compare resolved paths when both exist, so `./in.txt` matches `in.txt`.
fn is_same_file(a: &Path, b: &Path) -> bool {
    match (std::fs::canonicalize(a), std::fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

fn cmd_group(cli: &Cli, input: &Path) -> Result<(), CliError> {
    let started = Instant::now();
    let config = resolve_config(cli)?;

    let output = match &cli.output {
        Some(path) => path.clone(),
        None => output_path_for(input, &config.output_suffix).ok_or_else(|| {
            CliError::args(format!("cannot derive an output name from {}", input.display()))
                .with_hint("pass --output <FILE>")
        })?,
    };
    if is_same_file(&output, input) {
        return Err(CliError::args(format!(
            "output {} would overwrite the input",
            output.display()
        )));
    }
    log::debug!("grouping {} -> {}", input.display(), output.display());

    let mut grouper = LineGrouper::new(&config);
    grouper
        .ingest_reader(BufReader::new(open_input(input)?))
        .map_err(|e| CliError::io(format!("error while reading {}: {e}", input.display())))?;
    let report = grouper.finish().map_err(CliError::grouping)?;

    let file = File::create(&output).map_err(|e| {
        CliError::io(format!("cannot create output file {}: {e}", output.display()))
    })?;
    report
        .write_to(BufWriter::new(file))
        .map_err(|e| CliError::io(format!("error writing to output file: {e}")))?;

    let summary = RunSummary::new(
        &report,
        &input.display().to_string(),
        &output.display().to_string(),
        started.elapsed().as_secs_f64(),
    );

    if cli.json {
        let json = serde_json::to_string_pretty(&summary)
            .map_err(|e| CliError::general(format!("JSON serialization error: {e}")))?;
        println!("{json}");
    } else if !cli.quiet {
        print_summary(&summary);
    }

    Ok(())
}

fn print_summary(summary: &RunSummary) {
    println!("================================================================");
    println!("Total number of groups: {}", summary.total_groups);
    println!(
        "Number of groups containing more than 1 string: {}",
        summary.multi_member_groups
    );
    if summary.skipped_lines > 0 {
        println!("Skipped lines: {}", summary.skipped_lines);
    }
    println!("Done in {:.3} seconds!", summary.elapsed_secs);
}
