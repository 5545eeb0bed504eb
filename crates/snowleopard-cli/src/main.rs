//! Snowleopard CLI - pick, rename and derive CSV columns

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use snowleopard::prelude::*;
use snowleopard::{CalculatedSlot, FUNCTIONS};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "snowleopard")]
#[command(
    author,
    version,
    about = "Select, rename and calculate columns of a CSV file"
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the headers of a CSV file
    Headers {
        /// Input CSV file
        input: PathBuf,

        /// Field delimiter (default: comma)
        #[arg(short, long, default_value = ",")]
        delimiter: char,
    },

    /// Describe the functions available in calculations
    Functions,

    /// Build a column mapping and print it as JSON
    Map {
        /// Input CSV file
        input: PathBuf,

        #[command(flatten)]
        selection: SelectionArgs,

        /// Field delimiter (default: comma)
        #[arg(short, long, default_value = ",")]
        delimiter: char,
    },

    /// Apply a column mapping and write the resulting table
    Project {
        /// Input CSV file
        input: PathBuf,

        #[command(flatten)]
        selection: SelectionArgs,

        /// Mapping JSON produced by `map` (replaces --config/--select/--calc)
        #[arg(short, long, conflicts_with_all = ["config", "select", "calc"])]
        mapping: Option<PathBuf>,

        /// Output CSV file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Value for missing or non-numeric cells
        #[arg(long, default_value = "0", allow_negative_numbers = true)]
        fill: f64,

        /// Report every failing column and row instead of stopping at the first
        #[arg(long)]
        collect_errors: bool,

        /// Field delimiter for input and output (default: comma)
        #[arg(short, long, default_value = ",")]
        delimiter: char,
    },
}

#[derive(Args)]
struct SelectionArgs {
    /// Selection config JSON file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Source column to keep, optionally renamed (NAME or NAME=RENAME)
    ///
    /// The argument is split at the first `=`; select headers that contain
    /// `=` through --config instead.
    #[arg(short, long, value_name = "NAME[=RENAME]")]
    select: Vec<String>,

    /// Calculated column (NAME=FORMULA)
    #[arg(long, value_name = "NAME=FORMULA")]
    calc: Vec<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Headers { input, delimiter } => list_headers(&input, delimiter),
        Commands::Functions => list_functions(),
        Commands::Map {
            input,
            selection,
            delimiter,
        } => show_mapping(&input, &selection, delimiter),
        Commands::Project {
            input,
            selection,
            mapping,
            output,
            fill,
            collect_errors,
            delimiter,
        } => {
            let options = ProjectionOptions {
                fill_value: fill,
                error_mode: if collect_errors {
                    ErrorMode::CollectAll
                } else {
                    ErrorMode::FailFast
                },
            };
            run_projection(
                &input,
                &selection,
                mapping.as_deref(),
                output.as_deref(),
                &options,
                delimiter,
            )
        }
    }
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

fn delimiter_byte(delimiter: char) -> Result<u8> {
    if !delimiter.is_ascii() {
        bail!("Delimiter must be a single ASCII character, got '{}'", delimiter);
    }
    Ok(delimiter as u8)
}

fn read_options(delimiter: char) -> Result<CsvReadOptions> {
    Ok(CsvReadOptions {
        delimiter: delimiter_byte(delimiter)?,
        ..Default::default()
    })
}

fn list_headers(input: &Path, delimiter: char) -> Result<()> {
    let headers = CsvReader::read_headers_file(input, &read_options(delimiter)?)
        .with_context(|| format!("Failed to read headers of '{}'", input.display()))?;

    for (i, header) in headers.iter().enumerate() {
        println!("{}\t{}", i, header);
    }

    Ok(())
}

fn list_functions() -> Result<()> {
    for (i, def) in FUNCTIONS.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("{}", def.name);
        println!("  Usage: {}", def.usage);
        println!("  {}", def.help);
    }

    Ok(())
}

/// Split `NAME=VALUE` at the first `=`
fn split_assignment(arg: &str) -> Option<(&str, &str)> {
    let (name, value) = arg.split_once('=')?;
    Some((name.trim(), value.trim()))
}

fn build_selection(headers: &[String], args: &SelectionArgs) -> Result<Vec<ColumnSpec>> {
    let mut selection = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read '{}'", path.display()))?;
            let config: SelectionConfig = serde_json::from_str(&text)
                .with_context(|| format!("Invalid selection config '{}'", path.display()))?;
            config.to_selection(headers.iter().cloned())?
        }
        None => ColumnSelection::new(headers.iter().cloned()),
    };

    for arg in &args.select {
        match split_assignment(arg) {
            Some((name, rename)) => selection.select_as(name, rename)?,
            None => selection.select(arg.trim())?,
        };
    }

    for arg in &args.calc {
        let (name, formula) = split_assignment(arg)
            .with_context(|| format!("Expected NAME=FORMULA, got '{}'", arg))?;
        // Fill after any slots taken by the config
        let slot = selection.slots().len();
        selection.set_slot(slot, CalculatedSlot::new(name, formula))?;
    }

    // Nothing chosen: keep every column
    if args.config.is_none() && args.select.is_empty() && args.calc.is_empty() {
        selection.select_all();
    }

    Ok(selection.build()?)
}

fn show_mapping(input: &Path, args: &SelectionArgs, delimiter: char) -> Result<()> {
    let headers = CsvReader::read_headers_file(input, &read_options(delimiter)?)
        .with_context(|| format!("Failed to read headers of '{}'", input.display()))?;

    let specs = build_selection(&headers, args)?;
    for spec in &specs {
        tracing::debug!("{}", spec);
    }

    let json = serde_json::to_string_pretty(&specs).context("Failed to serialize mapping")?;
    println!("{}", json);

    Ok(())
}

fn load_mapping(path: &Path) -> Result<Vec<ColumnSpec>> {
    let text =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read '{}'", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Invalid mapping '{}'", path.display()))
}

fn run_projection(
    input: &Path,
    args: &SelectionArgs,
    mapping: Option<&Path>,
    output: Option<&Path>,
    options: &ProjectionOptions,
    delimiter: char,
) -> Result<()> {
    let table = RawTable::open_with_options(input, &read_options(delimiter)?)
        .with_context(|| format!("Failed to open '{}'", input.display()))?;

    let specs = match mapping {
        Some(path) => load_mapping(path)?,
        None => build_selection(table.headers(), args)?,
    };

    let projected = match table.project_with_options(&specs, options) {
        Ok(projected) => projected,
        Err(err) => {
            for e in err.errors() {
                eprintln!("error: {}", e);
            }
            bail!("Projection failed ({} error(s))", err.errors().len());
        }
    };

    let write_options = CsvWriteOptions {
        delimiter: delimiter_byte(delimiter)?,
        ..Default::default()
    };

    if let Some(output_path) = output {
        projected
            .save_with_options(output_path, &write_options)
            .with_context(|| format!("Failed to write '{}'", output_path.display()))?;
        eprintln!(
            "Wrote {} rows x {} columns to '{}'",
            projected.row_count(),
            projected.columns.len(),
            output_path.display()
        );
    } else {
        let stdout = io::stdout();
        let mut lock = stdout.lock();
        CsvWriter::write(&projected, &mut lock, &write_options)
            .context("Failed to write to stdout")?;
        lock.flush().context("Failed to write to stdout")?;
    }

    Ok(())
}
