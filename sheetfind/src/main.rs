use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use sheetfind_core::{Finder, LookupConfig, SearchOutcome};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt};

mod formatter;

#[derive(Parser)]
#[command(name = "sheetfind")]
#[command(about = "Look up a spreadsheet record by its national ID", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to the spreadsheet (xlsx, xlsm, xlsb, xls, ods)
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// National ID to search for
    #[arg(value_name = "NATIONAL_ID")]
    national_id: String,

    /// Header of the column holding the national IDs
    #[arg(long, value_name = "NAME")]
    column: Option<String>,

    /// Sheet to read instead of the workbook's first
    #[arg(long, value_name = "NAME")]
    sheet: Option<String>,

    /// Path to configuration file (TOML)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "human")]
    format: OutputFormat,

    /// Also print the full table after the result
    #[arg(short, long)]
    table: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Human-readable colored output
    Human,
    /// JSON output for scripting
    Json,
}

fn main() -> Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // Load configuration; CLI flags override the file
    let mut config = if let Some(config_path) = &cli.config {
        LookupConfig::from_file(config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))?
    } else {
        // Try to load default config from current directory if it exists
        let default_config_path = PathBuf::from("sheetfind.toml");
        if default_config_path.exists() {
            LookupConfig::from_file(&default_config_path).with_context(|| {
                format!(
                    "Failed to load config from {}",
                    default_config_path.display()
                )
            })?
        } else {
            LookupConfig::default()
        }
    };
    if let Some(column) = cli.column {
        config.key_column = column;
    }
    if let Some(sheet) = cli.sheet {
        config.sheet = Some(sheet);
    }
    config.validate().context("Invalid configuration")?;

    let finder = Finder::with_config(config);

    // The progress line only belongs in human output
    let show_progress = matches!(cli.format, OutputFormat::Human);
    let session = finder
        .open_session(&cli.file, |event| {
            if show_progress {
                formatter::draw_progress(event);
            }
        })
        .with_context(|| format!("Failed to load file: {}", cli.file.display()))?;

    let session = finder.search(session, &cli.national_id);

    match cli.format {
        OutputFormat::Human => formatter::print_human(&session, cli.table),
        OutputFormat::Json => formatter::print_json(&session)?,
    }

    let exit_code = match session.outcome {
        SearchOutcome::Found(_) => 0,
        _ => 1,
    };

    std::process::exit(exit_code);
}
