mod config;
mod server;

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use orderclean_core::schema::PREVIEW_ROWS;
use orderclean_core::{process, write_xlsx};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::ServerConfig;

#[derive(Parser, Debug)]
#[command(author, version, about = "Order export cleaner", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Clean one order export CSV and write the resulting workbook
    Clean(CleanArgs),
    /// Serve the upload page and cleaning API
    Serve,
}

#[derive(Args, Debug)]
struct CleanArgs {
    /// Order export to clean
    input: PathBuf,
    /// Directory the cleaned workbook is written to
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,
    /// Number of cleaned rows to print
    #[arg(long, default_value_t = PREVIEW_ROWS)]
    preview_rows: usize,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Clean(args) => handle_clean(args),
        Command::Serve => {
            let config = ServerConfig::from_env()?;
            server::serve(config).await
        }
    }
}

fn handle_clean(args: CleanArgs) -> Result<()> {
    let content = fs::read(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;

    let cleaned = process(&content)
        .with_context(|| format!("failed to clean {}", args.input.display()))?;

    println!("Dispatch Date: {}", cleaned.range);
    if args.preview_rows > 0 {
        let preview = cleaned.table.to_dataframe()?.head(Some(args.preview_rows));
        println!("{preview}");
    }

    let workbook = write_xlsx(&cleaned.table)?;
    let path = args.output_dir.join(&cleaned.file_name);
    fs::write(&path, &workbook)
        .with_context(|| format!("failed to write {}", path.display()))?;

    info!(
        path = %path.display(),
        rows = cleaned.table.height(),
        "wrote cleaned workbook"
    );
    Ok(())
}
