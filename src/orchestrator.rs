//! # Batch Orchestrator Module
//!
//! Questo è il modulo che coordina l'intera pipeline di ottimizzazione.
//!
//! ## Flusso di esecuzione:
//! 1. **Classificazione**: ogni input diventa un `AssetJob` (Image/Video) in
//!    base all'estensione; gli input `Other` e `Text` vengono scartati
//!    silenziosamente
//! 2. **Preflight**: se il batch contiene video, verifica che ffmpeg e
//!    ffprobe siano disponibili
//! 3. **Dispatch parallelo**: ogni job gira in un task tokio, con un
//!    semaforo che limita i worker concorrenti (default: 4)
//! 4. **Progress**: la barra avanza di uno per ogni task completato,
//!    in ordine non deterministico
//! 5. **Aggregazione**: gli esiti confluiscono nel `Report`
//!
//! ## Gestione errori:
//! - Gli errori per singolo file diventano `WorkerOutcome::Failure`, vengono
//!   loggati a livello ERROR e non interrompono mai il batch
//! - Una volta accettato, un task gira fino al completamento: nessuna
//!   cancellazione a metà batch
//! - Solo gli errori a livello di orchestratore (path invalida, dipendenze
//!   mancanti) terminano la run

use crate::config::Config;
use crate::finder::AssetKind;
use crate::image_optimizer::ImageOptimizer;
use crate::outcome::WorkerOutcome;
use crate::progress::ProgressManager;
use crate::report::Report;
use crate::video_optimizer::VideoOptimizer;
use anyhow::Result;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{debug, error, info};

/// A work item, classified exactly once at submit time.
enum AssetJob {
    Image(PathBuf),
    Video(PathBuf),
}

impl AssetJob {
    fn path(&self) -> &PathBuf {
        match self {
            Self::Image(path) | Self::Video(path) => path,
        }
    }
}

/// Dispatches classified jobs onto a bounded worker pool and aggregates
/// their outcomes into a report
pub struct BatchProcessor {
    config: Config,
}

impl BatchProcessor {
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Process every discovered file and return the aggregated report.
    pub async fn process(&self, files: Vec<PathBuf>) -> Result<Report> {
        let jobs: Vec<AssetJob> = files
            .into_iter()
            .filter_map(|file| match AssetKind::from_path(&file) {
                AssetKind::Image => Some(AssetJob::Image(file)),
                AssetKind::Video => Some(AssetJob::Video(file)),
                kind => {
                    debug!("Dropping {} input: {}", kind, file.display());
                    None
                }
            })
            .collect();

        if jobs.is_empty() {
            info!("No optimizable assets found");
            return Ok(Report::from_outcomes(Vec::new()));
        }

        if jobs.iter().any(|job| matches!(job, AssetJob::Video(_))) {
            VideoOptimizer::check_dependencies().await?;
        }

        info!(
            "Optimizing {} assets with {} workers",
            jobs.len(),
            self.config.workers
        );

        let progress = ProgressManager::new(jobs.len() as u64);
        let semaphore = Arc::new(Semaphore::new(self.config.workers));
        let mut tasks = Vec::with_capacity(jobs.len());

        for job in jobs {
            let permit = semaphore.clone().acquire_owned().await?;
            let config = self.config.clone();
            let progress = progress.clone();

            tasks.push(tokio::spawn(async move {
                let _permit = permit;
                debug!("Processing {}", job.path().display());

                let outcome = match &job {
                    AssetJob::Image(path) => ImageOptimizer::new(config).compress(path).await,
                    AssetJob::Video(path) => VideoOptimizer::new(config).compress(path).await,
                };

                progress.update(&outcome_message(&outcome));
                outcome
            }));
        }

        // Every submitted task runs to completion; completion order is
        // irrelevant, the report imposes its own order at the end
        let mut outcomes = Vec::with_capacity(tasks.len());
        for task in tasks {
            outcomes.push(task.await?);
        }

        for outcome in &outcomes {
            if let WorkerOutcome::Failure { path, message, .. } = outcome {
                error!("Failed to optimize {}: {}", path.display(), message);
            }
        }

        let report = Report::from_outcomes(outcomes);
        progress.finish(&format!(
            "Optimized: {} | Skipped: {} | Errors: {}",
            report.successes.len(),
            report.skipped,
            report.failures
        ));

        Ok(report)
    }
}

fn outcome_message(outcome: &WorkerOutcome) -> String {
    match outcome {
        WorkerOutcome::Success(asset) => {
            format!("✅ {}: {:.1}% saved", asset.original_name, asset.savings_pct)
        }
        WorkerOutcome::Skipped { path, reason } => {
            format!(
                "⏩ {}: {}",
                path.file_name().unwrap_or_default().to_string_lossy(),
                reason
            )
        }
        WorkerOutcome::Failure { path, .. } => {
            format!(
                "❌ {}: error",
                path.file_name().unwrap_or_default().to_string_lossy()
            )
        }
    }
}
