//! # Configuration Module
//!
//! Questo modulo raccoglie tutti i parametri di compressione dell'applicazione.
//!
//! ## Parametri:
//! - `max_width`: Larghezza massima di immagini e video (default: 1920)
//! - `webp_quality`: Qualità WebP (1-100, default: 75)
//! - `webp_method`: Effort dell'encoder WebP (0-6, default: 6 = compressione massima)
//! - `video_crf`: CRF video (0-51, default: 26, più basso = migliore qualità)
//! - `video_preset`: Preset libx264 (default: "medium")
//! - `workers`: Numero di worker paralleli (default: 4)
//!
//! I valori di default sono costanti compile-time, non flag CLI. Il set
//! `IGNORE_DIRS` elenca le directory mai visitate durante la discovery.
//!
//! ## Validazione:
//! `Config::validate()` controlla i range di tutti i parametri prima
//! dell'avvio del batch.

use anyhow::Result;

/// Maximum width for images and videos; wider assets are downscaled.
pub const MAX_WIDTH: u32 = 1920;
/// WebP quality (1-100).
pub const WEBP_QUALITY: f32 = 75.0;
/// WebP encoder effort (0 fastest, 6 slowest/smallest).
pub const WEBP_METHOD: i32 = 6;
/// H.264 Constant Rate Factor (lower = higher quality).
pub const VIDEO_CRF: u8 = 26;
/// libx264 encoding preset.
pub const VIDEO_PRESET: &str = "medium";
/// Number of parallel workers.
pub const WORKERS: usize = 4;

/// Directory base names that are never descended into during discovery.
pub const IGNORE_DIRS: &[&str] = &[
    "node_modules",
    "venv",
    ".git",
    ".vscode",
    "__pycache__",
    "site-packages",
    "dist",
    "build",
    ".idea",
    "env",
];

/// Compression parameters for a batch run
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum width; wider images/videos are rescaled proportionally
    pub max_width: u32,
    /// WebP quality (1-100)
    pub webp_quality: f32,
    /// WebP encoder effort (0-6)
    pub webp_method: i32,
    /// Video CRF value (0-51, lower = better quality)
    pub video_crf: u8,
    /// libx264 preset name
    pub video_preset: String,
    /// Number of parallel workers
    pub workers: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_width: MAX_WIDTH,
            webp_quality: WEBP_QUALITY,
            webp_method: WEBP_METHOD,
            video_crf: VIDEO_CRF,
            video_preset: VIDEO_PRESET.to_string(),
            workers: WORKERS,
        }
    }
}

impl Config {
    /// Validate configuration parameters
    pub fn validate(&self) -> Result<()> {
        if self.max_width == 0 {
            return Err(anyhow::anyhow!("Max width must be greater than 0"));
        }

        if !(1.0..=100.0).contains(&self.webp_quality) {
            return Err(anyhow::anyhow!("WebP quality must be between 1 and 100"));
        }

        if !(0..=6).contains(&self.webp_method) {
            return Err(anyhow::anyhow!("WebP method must be between 0 and 6"));
        }

        if self.video_crf > 51 {
            return Err(anyhow::anyhow!("Video CRF must be between 0 and 51"));
        }

        if self.video_preset.is_empty() {
            return Err(anyhow::anyhow!("Video preset must not be empty"));
        }

        if self.workers == 0 {
            return Err(anyhow::anyhow!("Number of workers must be greater than 0"));
        }

        Ok(())
    }
}
