//! # Error Types Module
//!
//! Questo modulo definisce i tipi di errore custom dell'applicazione.
//!
//! ## Categorie di errori:
//! - `Io`: Errori di I/O (file non trovati, permessi, etc.)
//! - `Image`: Errori di decodifica/elaborazione immagini
//! - `WebpEncode`: Errori dell'encoder WebP
//! - `Ffmpeg`: Errori di transcodifica video con FFmpeg
//! - `MissingDependency`: Tool esterno mancante (ffmpeg, ffprobe)
//!
//! Gli errori per singolo file vengono catturati come `WorkerOutcome::Failure`
//! e non interrompono mai il batch; `anyhow` gestisce la propagazione a
//! livello di orchestratore.

/// Custom error types for asset compression
#[derive(thiserror::Error, Debug)]
pub enum OptimizeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image processing error: {0}")]
    Image(#[from] image::ImageError),

    #[error("WebP encoding error: {0}")]
    WebpEncode(String),

    #[error("FFmpeg error: {0}")]
    Ffmpeg(String),

    #[error("Dependency missing: {0}")]
    MissingDependency(String),
}
