use anyhow::Result;
use clap::{ArgAction, CommandFactory, Parser, ValueEnum};
use colored::Colorize;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use amalgamate::collect::Selection;
use amalgamate::config::{AmalgamateConfig, MissingReferencePolicy};
use amalgamate::pipeline::{self, Options};
use amalgamate::AmalgamateError;

#[derive(Parser)]
#[command(name = "amalgamate")]
#[command(about = "Merge a directory of headers into one dependency-ordered header", long_about = None)]
#[command(version)]
struct Cli {
    /// Directory holding the headers
    input_dir: PathBuf,

    /// Path of the merged header to write
    output: PathBuf,

    /// Merge only these optional modules (comma separated, without extension)
    #[arg(short, long, value_name = "MODULES")]
    include: Option<String>,

    /// Merge every optional module except these (comma separated, without extension)
    #[arg(short, long, value_name = "MODULES")]
    exclude: Option<String>,

    /// TOML configuration file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// File name glob used in every scanned directory
    #[arg(long, value_name = "GLOB")]
    pattern: Option<String>,

    /// Directory, relative to the input, whose headers are always merged (repeatable)
    #[arg(long = "core-dir", value_name = "DIR")]
    core_dirs: Vec<String>,

    /// Directory, relative to the input, holding optional modules
    #[arg(long, value_name = "DIR")]
    module_dir: Option<String>,

    /// Fail when an include names a file that is not part of the merge
    #[arg(long)]
    strict: bool,

    /// Summary format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Do not print the summary
    #[arg(short, long)]
    quiet: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Initialize the tracing subscriber; `RUST_LOG` wins over `-v`
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// File configuration with command-line overrides applied
fn load_config(cli: &Cli) -> Result<AmalgamateConfig> {
    let mut config = match &cli.config {
        Some(path) => AmalgamateConfig::load(path)?,
        None => AmalgamateConfig::default(),
    };

    if let Some(pattern) = &cli.pattern {
        config.collect.pattern = pattern.clone();
    }
    if !cli.core_dirs.is_empty() {
        config.collect.core_dirs = cli.core_dirs.clone();
    }
    if let Some(module_dir) = &cli.module_dir {
        config.collect.module_dir = Some(module_dir.clone());
    }
    if cli.strict {
        config.merge.missing_references = MissingReferencePolicy::Error;
    }

    Ok(config)
}

fn execute(cli: Cli) -> Result<()> {
    // Selection is checked before anything touches the filesystem
    let selection = Selection::from_flags(cli.include.as_deref(), cli.exclude.as_deref())?;
    let config = load_config(&cli)?;

    let options = Options {
        input_dir: cli.input_dir,
        output: cli.output,
        selection,
        config,
    };
    let report = pipeline::run(&options)?;

    if !cli.quiet {
        match cli.format {
            OutputFormat::Text => print!("{}", report.to_text()),
            OutputFormat::Json => println!("{}", report.to_json()?),
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::from(1)
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    init_tracing(cli.verbose);

    match execute(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {e:#}", "error:".red().bold());
            if let Some(AmalgamateError::Usage(_)) = e.downcast_ref::<AmalgamateError>() {
                eprintln!("\n{}", Cli::command().render_usage());
            }
            ExitCode::from(1)
        }
    }
}
