//! h2h - Hexo/Hugo front matter converter
//!
//! CLI entry point: parse flags, load config, set up logging, run one batch.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use tracing::{debug, info};

use h2h::batch::{BatchEngine, BatchReport};
use h2h::cli::{Cli, get_log_path};
use h2h::config::Config;

fn setup_logging(cli_log_level: Option<&str>, config_log_level: Option<&str>) -> Result<()> {
    let log_path = get_log_path();
    if let Some(log_dir) = log_path.parent() {
        fs::create_dir_all(log_dir).context("Failed to create log directory")?;
    }

    // Priority: CLI --log-level / -v > config file > INFO
    let level = match cli_log_level.or(config_log_level) {
        Some(s) => match s.to_uppercase().as_str() {
            "TRACE" => tracing::Level::TRACE,
            "DEBUG" => tracing::Level::DEBUG,
            "INFO" => tracing::Level::INFO,
            "WARN" | "WARNING" => tracing::Level::WARN,
            "ERROR" => tracing::Level::ERROR,
            _ => {
                eprintln!("Warning: Unknown log-level '{}', defaulting to INFO", s);
                tracing::Level::INFO
            }
        },
        None => tracing::Level::INFO,
    };

    let log_file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .context("Failed to open log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (level: {:?})", level);
    Ok(())
}

fn absolute(path: &Path, what: &str) -> Result<PathBuf> {
    std::path::absolute(path).context(format!("Failed to get absolute path for {} directory", what))
}

fn print_failures(report: &BatchReport) {
    for failure in &report.failures {
        println!("{} {}: {}", "✗".red(), failure.path.display(), failure.error);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let cli_log_level = cli.requested_log_level();
    let config_log_level = Config::load_log_level(cli.config.as_ref());
    setup_logging(cli_log_level.as_deref(), config_log_level.as_deref()).context("Failed to setup logging")?;

    let mut config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    config.apply_cli(&cli);
    debug!(?config, "main: effective configuration");

    let src = absolute(&cli.src, "source")?;
    let dst = absolute(&cli.dst, "destination")?;

    info!(
        "Starting conversion from [{}] to [{}] format, output will be written to [{}]",
        src.display(),
        config.target_format,
        dst.display()
    );
    info!("Conversion direction: {}", config.direction);

    let engine = BatchEngine::new(config.to_batch_config())?;

    match engine.run(&src, &dst).await {
        Ok(report) => {
            info!("Conversion completed successfully");
            println!(
                "{} Converted {}/{} files into {}",
                "✓".green(),
                report.converted,
                report.attempted,
                dst.display().to_string().cyan()
            );
            Ok(())
        }
        Err(e) => {
            if let Some(report) = e.report() {
                print_failures(report);
                println!(
                    "{} Converted {}/{} files into {}",
                    "!".yellow(),
                    report.converted,
                    report.attempted,
                    dst.display().to_string().cyan()
                );
            }
            tracing::error!("Conversion failed: {}", e);
            Err(e.into())
        }
    }
}
