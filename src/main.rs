use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use tracing::info;

use penmark::config::{parse_weights, Config};
use penmark::corpus::scan::{read_text, CorpusIndexer};
use penmark::error::AttributionError;
use penmark::output::terminal;
use penmark::pipeline::attribution::{attribute, AttributionSettings};
use penmark::signature::SignatureLayout;

/// How many ranked candidates the verbose report lists.
const REPORT_TOP_N: usize = 5;

/// Penmark: stylometric authorship attribution.
///
/// Compares the writing style of a mystery text against a directory of
/// samples by known authors and reports the closest match.
#[derive(Parser)]
#[command(name = "penmark", version, about, args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Mystery text to attribute (prompted for when omitted). A file named
    /// like a subcommand must follow `--`, as in `penmark -- corpus`.
    mystery: Option<PathBuf>,

    /// Print only the identifier of the best match
    #[arg(short, long)]
    quiet: bool,

    /// Print the full result as JSON
    #[arg(long, conflicts_with = "quiet")]
    json: bool,

    #[command(flatten)]
    options: AnalysisOptions,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the style signature of a single text file
    Signature {
        /// The file to analyze
        file: PathBuf,

        /// Print the signature as JSON
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        options: AnalysisOptions,
    },

    /// Show the signature of every known sample and any skipped files
    Corpus {
        /// Print the corpus as JSON
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        options: AnalysisOptions,
    },
}

/// Overrides for values otherwise taken from the environment.
#[derive(Args, Clone, Default)]
struct AnalysisOptions {
    /// Directory of known-author samples (default: PENMARK_KNOWN_DIR or data/known_authors)
    #[arg(long)]
    known_dir: Option<PathBuf>,

    /// Signature layout: basic (5 features) or extended (7 features)
    #[arg(long)]
    layout: Option<SignatureLayout>,

    /// Comma-separated weights, one per signature feature
    #[arg(long)]
    weights: Option<String>,

    /// Index known samples on all cores
    #[arg(long)]
    parallel: bool,
}

impl AnalysisOptions {
    /// Environment configuration with command-line overrides applied.
    fn resolve(&self) -> Result<Config> {
        let mut config = Config::load()?;
        if let Some(dir) = &self.known_dir {
            config.known_dir = dir.clone();
        }
        if let Some(layout) = self.layout {
            if layout != config.layout && self.weights.is_none() {
                // Environment weights were sized for the other layout
                config.weights = None;
            }
            config.layout = layout;
        }
        if let Some(raw) = &self.weights {
            config.weights = Some(parse_weights(raw).context("Invalid --weights")?);
        }
        config.parallel |= self.parallel;
        Ok(config)
    }
}

fn main() -> ExitCode {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Quiet and JSON output own stdout, so only warnings are logged by default.
    // Logs always go to stderr.
    let default_filter = if cli.quiet || cli.json {
        "penmark=warn"
    } else {
        "penmark=info"
    };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("\n{} {err:#}", "Error:".red().bold());
            if let Some(hint) = hint_for(&err) {
                eprintln!("{}", hint.dimmed());
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Some(Commands::Signature {
            file,
            json,
            options,
        }) => show_signature(&file, json, &options),
        Some(Commands::Corpus { json, options }) => show_corpus(json, &options),
        None => {
            let config = cli.options.resolve()?;
            let mystery = match cli.mystery {
                Some(path) => path,
                None => prompt_for_mystery(&config)?,
            };
            identify(&mystery, &config, cli.quiet, cli.json)
        }
    }
}

/// Attribute one mystery file and print the result in the requested form.
fn identify(mystery: &Path, config: &Config, quiet: bool, json: bool) -> Result<()> {
    let verbose = !quiet && !json;
    let mut settings: AttributionSettings = config.settings()?;
    settings.show_progress = verbose;

    if verbose {
        println!("Analyzing: {}", mystery.display());
        println!("Against samples in: {}", config.known_dir.display());
        println!("{}", "-".repeat(60));
    }

    let attribution = attribute(mystery, &config.known_dir, &settings)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&attribution)?);
    } else if quiet {
        println!("{}", attribution.best_match.identifier);
    } else {
        terminal::display_attribution(&attribution, REPORT_TOP_N);
    }
    Ok(())
}

/// Interactive mode: confirm the corpus directory, then ask for a file name.
fn prompt_for_mystery(config: &Config) -> Result<PathBuf> {
    println!("{}", "=".repeat(60));
    println!("{}", "AUTHORSHIP ATTRIBUTION SYSTEM".bold());
    println!("{}", "=".repeat(60));
    println!("Known author samples directory: {}", config.known_dir.display());
    println!();

    config.require_known_dir()?;

    println!("Please enter the filename of the mystery text you want to analyze.");
    println!("(Include the full path if the file is not in the current directory)");
    print!("\nEnter filename: ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read the filename from standard input")?;
    let name = line.trim();
    if name.is_empty() {
        anyhow::bail!("No filename provided.");
    }
    info!(file = name, "Mystery file chosen interactively");
    Ok(PathBuf::from(name))
}

fn show_signature(file: &Path, json: bool, options: &AnalysisOptions) -> Result<()> {
    let config = options.resolve()?;
    let builder = config.settings()?.signature_builder();
    let text = read_text(file)?;
    let signature = builder.build(&text)?;

    if json {
        let features: Vec<serde_json::Value> = config
            .layout
            .features()
            .iter()
            .zip(signature.values())
            .map(|(feature, value)| serde_json::json!({ "feature": feature, "value": value }))
            .collect();
        let out = serde_json::json!({
            "file": file.display().to_string(),
            "layout": config.layout,
            "signature": signature,
            "features": features,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        let name = file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| file.display().to_string());
        terminal::display_signature(&name, &signature, config.layout);
    }
    Ok(())
}

fn show_corpus(json: bool, options: &AnalysisOptions) -> Result<()> {
    let config = options.resolve()?;
    config.require_known_dir()?;
    let settings = config.settings()?;
    let scan = CorpusIndexer::new(settings.signature_builder())
        .parallel(settings.parallel)
        .show_progress(!json)
        .scan(&config.known_dir)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&scan)?);
    } else {
        terminal::display_corpus(&scan, config.layout);
    }
    Ok(())
}

/// A follow-up suggestion for the library errors a user can fix themselves.
fn hint_for(err: &anyhow::Error) -> Option<&'static str> {
    match err.downcast_ref::<AttributionError>()? {
        AttributionError::MissingFile { .. } => {
            Some("Please check that the filename is correct and the file exists.")
        }
        AttributionError::EmptyCorpus { .. } | AttributionError::CorpusDirectory { .. } => {
            Some("Please ensure the known author directory contains valid text files.")
        }
        AttributionError::Undecodable { .. } => {
            Some("The file may be a binary file or use an unsupported text encoding.")
        }
        AttributionError::Unreadable { .. } => Some("Check the file's permissions."),
        AttributionError::EmptyInput { .. } => {
            Some("The text needs at least one word and one sentence to be analyzed.")
        }
        AttributionError::DimensionMismatch { .. } | AttributionError::InvalidWeight { .. } => {
            Some("Provide exactly one non-negative weight per signature feature.")
        }
    }
}
