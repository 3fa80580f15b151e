use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use sheetfind_core::audit::AuditReport;
use sheetfind_core::{LookupConfig, audit, ingest};
use std::path::{Path, PathBuf};
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Parser)]
#[command(name = "sheetvet")]
#[command(about = "Audit the national-ID column of a spreadsheet")]
#[command(version)]
struct Cli {
    /// Path to the spreadsheet (xlsx, xlsm, xlsb, xls, ods)
    #[arg(value_name = "FILE")]
    file: PathBuf,

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
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
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

    let dataset = ingest::read_dataset(&cli.file, config.sheet.as_deref())
        .with_context(|| format!("Failed to read file: {}", cli.file.display()))?;

    let report = audit::audit_key_column(&dataset, &config.key_column)
        .with_context(|| format!("Failed to audit file: {}", cli.file.display()))?;

    match cli.format {
        OutputFormat::Human => print_human(&cli.file, &report),
        OutputFormat::Json => print_json(&cli.file, &report)?,
    }

    let exit_code = if report.findings.is_empty() { 0 } else { 1 };
    std::process::exit(exit_code);
}

fn print_human(file: &Path, report: &AuditReport) {
    println!("Audited column '{}' in {}", report.column, file.display());
    println!();

    if report.findings.is_empty() {
        println!("All {} records hold a valid national ID.", report.checked);
        return;
    }

    for finding in &report.findings {
        if finding.value.is_empty() {
            println!("  row {}: {}", finding.row, finding.problem);
        } else {
            println!("  row {}: '{}' {}", finding.row, finding.value, finding.problem);
        }
    }

    println!();
    println!("Summary:");
    println!("  Checked:  {}", report.checked);
    println!("  Valid:    {}", report.valid);
    println!("  Findings: {}", report.findings.len());
}

fn print_json(file: &Path, report: &AuditReport) -> Result<()> {
    let output = serde_json::json!({
        "file": file.display().to_string(),
        "column": report.column,
        "checked": report.checked,
        "valid": report.valid,
        "findings": report.findings,
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
