mod logging;
mod maxes;

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;

use clap::{Parser, Subcommand, ValueEnum};
use repline_core::{FormatOptions, ParseError, PhaseRecord, Style};
use repline_resolve::{ResolveError, StoreOneRepMaxProvider, SubmitError};
use repline_storage::InMemoryStore;
use serde::Deserialize;

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

/// Set-line notation toolkit for strength training.
#[derive(Parser)]
#[command(
    name = "repline",
    version,
    about = "Set-line notation toolkit for strength training"
)]
struct Cli {
    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text", value_enum)]
    output: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    quiet: bool,

    /// Log debug events to stderr (overrides REPLINE_LOG)
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a set line and print its canonical form
    Parse {
        /// The set line, e.g. "4 x 3 @50kg 90s"
        line: String,
    },

    /// Format stored phase records (JSON) back into set lines
    Format {
        /// Path to a JSON record or array of records, or '-' for stdin
        file: PathBuf,
        /// Use the workout-view style ("4×3 @ 50kg")
        #[arg(long)]
        display: bool,
        /// Print the source percentage instead of the resolved weight
        #[arg(long)]
        percent: bool,
    },

    /// Resolve a set line against a table of one-rep maxes
    Resolve {
        /// The set line, e.g. "4 x 5 @80%"
        line: String,
        /// Exercise whose one-rep max is used
        #[arg(long)]
        exercise: String,
        /// Path to the maxes TOML file
        #[arg(long)]
        maxes: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match cli.command {
        Commands::Parse { line } => {
            cmd_parse(&line, cli.output, cli.quiet);
        }
        Commands::Format {
            file,
            display,
            percent,
        } => {
            let opts = FormatOptions {
                style: if display {
                    Style::Display
                } else {
                    Style::Canonical
                },
                prefer_percentage: percent,
            };
            cmd_format(&file, opts, cli.output, cli.quiet);
        }
        Commands::Resolve {
            line,
            exercise,
            maxes,
        } => {
            cmd_resolve(&line, &exercise, &maxes, cli.output, cli.quiet);
        }
    }
}

// ── parse ────────────────────────────────────────────────────────────────────

fn cmd_parse(line: &str, output: OutputFormat, quiet: bool) {
    let prescription = match repline_core::parse_set_line(line) {
        Ok(p) => p,
        Err(e) => {
            report_parse_error(&e, output, quiet);
            process::exit(1);
        }
    };

    match output {
        OutputFormat::Json => print_json(&prescription),
        OutputFormat::Text => {
            println!("{}", prescription.kind());
            if let Ok(resolved) = prescription.clone().into_resolved() {
                for record in repline_core::decompose(&resolved) {
                    println!("  {}", repline_core::format_record(&record));
                }
            }
            if quiet {
                return;
            }
            let summary = match serde_json::to_value(prescription.summary()) {
                Ok(serde_json::Value::Object(map)) => map,
                _ => return,
            };
            for (key, value) in summary {
                println!("  {}: {}", key, render_value(&value));
            }
        }
    }
}

fn render_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Array(items) => items
            .iter()
            .map(render_value)
            .collect::<Vec<_>>()
            .join(" "),
        serde_json::Value::Object(map) => map
            .iter()
            .map(|(k, v)| format!("{}={}", k, render_value(v)))
            .collect::<Vec<_>>()
            .join(","),
        other => other.to_string(),
    }
}

// ── format ───────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(untagged)]
enum RecordInput {
    Many(Vec<PhaseRecord>),
    One(Box<PhaseRecord>),
}

fn cmd_format(path: &Path, opts: FormatOptions, output: OutputFormat, quiet: bool) {
    let content = match read_input(path) {
        Ok(s) => s,
        Err(msg) => {
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    };

    let records = match serde_json::from_str::<RecordInput>(&content) {
        Ok(RecordInput::Many(records)) => records,
        Ok(RecordInput::One(record)) => vec![*record],
        Err(e) => {
            let msg = format!("error: invalid record JSON in {}: {}", path.display(), e);
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    };

    let lines: Vec<String> = records
        .iter()
        .map(|r| repline_core::format_record_with(r, opts))
        .collect();
    match output {
        OutputFormat::Json => print_json(&lines),
        OutputFormat::Text => {
            for line in lines {
                println!("{}", line);
            }
        }
    }
}

fn read_input(path: &Path) -> Result<String, String> {
    if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| format!("error: could not read stdin: {}", e))?;
        return Ok(buf);
    }
    std::fs::read_to_string(path)
        .map_err(|e| format!("error: could not read '{}': {}", path.display(), e))
}

// ── resolve ──────────────────────────────────────────────────────────────────

fn cmd_resolve(line: &str, exercise: &str, maxes_path: &Path, output: OutputFormat, quiet: bool) {
    let table = match maxes::read_maxes(maxes_path) {
        Ok(m) => m,
        Err(msg) => {
            report_error(&format!("error: {}", msg), output, quiet);
            process::exit(1);
        }
    };

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            report_error(
                &format!("error: failed to start runtime: {}", e),
                output,
                quiet,
            );
            process::exit(1);
        }
    };

    let result = rt.block_on(async {
        let store = Arc::new(InMemoryStore::new());
        maxes::load_into(&*store, table)
            .await
            .map_err(ResolveFailure::Maxes)?;
        let provider = StoreOneRepMaxProvider::new(Arc::clone(&store));
        repline_resolve::submit_line(&*store, &provider, exercise, exercise, line)
            .await
            .map_err(ResolveFailure::Submit)
    });

    let stored = match result {
        Ok(stored) => stored,
        Err(ResolveFailure::Maxes(msg)) => {
            report_error(&format!("error: {}", msg), output, quiet);
            process::exit(1);
        }
        Err(ResolveFailure::Submit(e)) => {
            report_submit_error(&e, output, quiet);
            process::exit(1);
        }
    };

    let records: Vec<&PhaseRecord> = stored.iter().map(|s| &s.phase).collect();
    match output {
        OutputFormat::Json => print_json(&records),
        OutputFormat::Text => {
            for record in records {
                println!("{}", repline_core::format_record(record));
            }
        }
    }
}

enum ResolveFailure {
    Maxes(String),
    Submit(SubmitError),
}

// ── Output helpers ───────────────────────────────────────────────────────────

fn print_json<T: serde::Serialize + ?Sized>(value: &T) {
    let pretty = serde_json::to_string_pretty(value)
        .unwrap_or_else(|e| format!("serialization error: {}", e));
    println!("{}", pretty);
}

fn report_parse_error(e: &ParseError, output: OutputFormat, quiet: bool) {
    match output {
        OutputFormat::Json => {
            let err_json = serde_json::to_string_pretty(&e.to_json_value())
                .unwrap_or_else(|_| format!("{{\"error\": \"{:?}\"}}", e));
            eprintln!("{}", err_json);
        }
        OutputFormat::Text => {
            if !quiet {
                eprintln!("error: {}", e);
            }
        }
    }
}

fn report_submit_error(e: &SubmitError, output: OutputFormat, quiet: bool) {
    let parse_error = match e {
        SubmitError::Parse(p) | SubmitError::Resolve(ResolveError::InvalidWeight(p)) => Some(p),
        _ => None,
    };
    if let Some(p) = parse_error {
        report_parse_error(p, output, quiet);
        return;
    }

    let kind = match e {
        SubmitError::Resolve(ResolveError::RmNotFound { .. }) => "rm_not_found",
        SubmitError::Resolve(_) => "provider",
        _ => "storage",
    };
    match output {
        OutputFormat::Json => {
            let value = serde_json::json!({ "kind": kind, "message": e.to_string() });
            eprintln!(
                "{}",
                serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string())
            );
        }
        OutputFormat::Text => {
            if !quiet {
                eprintln!("error: {}", e);
            }
        }
    }
}

pub(crate) fn report_error(msg: &str, output: OutputFormat, quiet: bool) {
    if quiet {
        return;
    }
    match output {
        OutputFormat::Text => eprintln!("{}", msg),
        OutputFormat::Json => {
            eprintln!("{}", serde_json::json!({ "error": msg }));
        }
    }
}
