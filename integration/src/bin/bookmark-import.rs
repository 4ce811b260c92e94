//! Detect and parse browser bookmark exports, printing one JSON report per file

use anyhow::{bail, Context};
use bookmark_import_integration::{ImportConfig, ImportService, UnifiedLogger};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "bookmark-import")]
#[command(about = "Detect and parse browser bookmark exports (HTML or CSV)")]
struct Cli {
    /// Export files to import
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level, overrides the configuration file
    #[arg(short, long)]
    log_level: Option<String>,

    /// Pretty-print the JSON reports
    #[arg(long)]
    pretty: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => ImportConfig::from_json_file(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => ImportConfig::default(),
    };
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }

    UnifiedLogger::init(config.logger_config())?;

    let service = ImportService::new(config);
    let reports = service.import_files(&cli.files).await;

    let mut failed = 0;
    for (path, report) in cli.files.iter().zip(reports) {
        match report {
            Ok(report) => println!("{}", report.to_json(cli.pretty)?),
            Err(e) => {
                eprintln!("{}: {}", path.display(), e);
                failed += 1;
            }
        }
    }

    if failed > 0 {
        bail!("{} of {} imports failed", failed, cli.files.len());
    }

    Ok(())
}
