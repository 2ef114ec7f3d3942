//! # Asset Compressor Library
//!
//! Batch asset optimizer: scopre immagini e video in un albero di directory,
//! produce varianti più leggere accanto ai sorgenti e riporta i risparmi.
//!
//! ## Architettura dei moduli:
//! - `config`: Parametri di compressione e validazione
//! - `error`: Tipi di errore custom
//! - `benchmark`: Misura dimensioni su disco e calcolo risparmi
//! - `finder`: Discovery ricorsiva con pruning e classificazione
//! - `image_optimizer`: Conversione immagini → WebP
//! - `video_optimizer`: Transcodifica video → H.264/AAC MP4
//! - `text_compressor`: Sidecar gzip/brotli per asset testuali
//! - `rewriter`: Aggiornamento riferimenti negli asset testuali (opt-in)
//! - `orchestrator`: Dispatch parallelo e aggregazione esiti
//! - `report`: Ordinamento, totali e rendering del report
//! - `progress`: Progress bar del batch
//! - `ui`: Banner e prompt interattivi
//!
//! ## Idempotenza:
//! Il nome del target è una funzione pura dell'input (`<stem>.webp`,
//! `<stem>.optimized.mp4`): non esiste alcun ledger, il filesystem stesso è
//! il registro. Una seconda run salta ogni input già ottimizzato.

pub mod benchmark;
pub mod config;
pub mod error;
pub mod finder;
pub mod image_optimizer;
pub mod orchestrator;
pub mod outcome;
pub mod progress;
pub mod report;
pub mod rewriter;
pub mod text_compressor;
pub mod ui;
pub mod video_optimizer;

pub use config::Config;
pub use error::OptimizeError;
pub use finder::{AssetFinder, AssetKind};
pub use image_optimizer::ImageOptimizer;
pub use orchestrator::BatchProcessor;
pub use outcome::{OptimizedAsset, SkipReason, WorkerOutcome};
pub use report::Report;
pub use rewriter::Replacement;
pub use video_optimizer::VideoOptimizer;
