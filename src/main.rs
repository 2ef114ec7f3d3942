//! # Asset Compressor - Main Entry Point
//!
//! ## Flusso di esecuzione:
//! 1. Parsa gli argomenti CLI con `clap`
//! 2. Inizializza il logging con `tracing` (INFO, o DEBUG con --verbose)
//! 3. Con `--input`: run non interattiva su file o directory
//! 4. Senza `--input`: banner di benvenuto e menu interattivo
//! 5. Opzionalmente riscrive i riferimenti nei file passati con
//!    `--rewrite-refs` e ne scrive i sidecar gzip/brotli
//!
//! L'exit code è 0 a fine run anche se singoli file sono falliti; solo gli
//! errori a livello di orchestratore (path invalida) terminano con errore.

use anyhow::Result;
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use asset_compressor::benchmark::format_signed_size;
use asset_compressor::ui::{self, MenuAction};
use asset_compressor::{
    rewriter, text_compressor, AssetFinder, BatchProcessor, Config, WorkerOutcome,
};

#[derive(Parser)]
#[command(name = "asset-compressor")]
#[command(about = "Optimize images and videos for production")]
struct Args {
    /// File or directory to optimize (skips the interactive menu)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Print the report as JSON instead of a table
    #[arg(long)]
    json: bool,

    /// Text file whose asset references are rewritten and compressed
    /// after the batch (repeatable)
    #[arg(long = "rewrite-refs", value_name = "FILE")]
    rewrite_refs: Vec<PathBuf>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(if args.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    if let Some(ref input) = args.input {
        if !input.exists() {
            return Err(anyhow::anyhow!("Input path does not exist: {}", input.display()));
        }
        run_batch(input, &args).await?;
    } else {
        ui::display_welcome();
        if let MenuAction::Optimize = ui::prompt_action()? {
            let path = ui::prompt_path()?;
            if path.exists() {
                run_batch(&path, &args).await?;
            } else {
                eprintln!("Invalid path.");
            }
        }
        println!("Goodbye!");
    }

    Ok(())
}

async fn run_batch(input: &Path, args: &Args) -> Result<()> {
    info!("Starting asset optimization in: {}", input.display());

    let files = AssetFinder::find(input)?;
    let processor = BatchProcessor::new(Config::default())?;
    let report = processor.process(files).await?;

    if args.json {
        println!("{}", report.to_json()?);
    } else if let Some(table) = report.render_table() {
        println!("\n{}", table);
        println!(
            "\nTotal Space Saved: {}",
            format_signed_size(report.total_bytes_saved)
        );
    } else {
        println!("No new assets needed optimization.");
    }

    if !args.rewrite_refs.is_empty() {
        let replacements = rewriter::from_report(&report);
        let changed = rewriter::rewrite_references(&replacements, &args.rewrite_refs).await;
        info!(
            "Rewrote asset references in {} of {} files",
            changed,
            args.rewrite_refs.len()
        );

        for file in &args.rewrite_refs {
            match text_compressor::compress(file).await {
                WorkerOutcome::Success(asset) => {
                    info!("Compressed {}: {:.1}% saved", asset.original_name, asset.savings_pct);
                }
                WorkerOutcome::Failure { path, message, .. } => {
                    warn!("Could not compress {}: {}", path.display(), message);
                }
                WorkerOutcome::Skipped { .. } => {}
            }
        }
    }

    Ok(())
}
