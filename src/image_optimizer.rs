//! # Image Optimization Module
//!
//! Questo modulo converte le immagini raster (PNG/JPEG) in WebP.
//!
//! ## Pipeline:
//! 1. Skip immediato se l'input è già WebP o se il target esiste
//!    (senza decodificare l'immagine)
//! 2. Decodifica con la crate `image`
//! 3. Downscale a `max_width` con filtro Lanczos3 se l'immagine è più larga,
//!    altezza proporzionale arrotondata per difetto
//! 4. Encoding WebP con libwebp (quality 75, method 6)
//! 5. Benchmark delle dimensioni su disco
//!
//! ## Naming:
//! Il target è `<stem>.webp` nella stessa directory del sorgente; il nome è
//! una funzione pura dell'input, quindi una seconda run osserva
//! `Skipped{target_exists}` per ogni file già convertito.
//!
//! Decodifica ed encoding sono CPU-bound e girano su `spawn_blocking`.

use crate::benchmark;
use crate::config::Config;
use crate::error::OptimizeError;
use crate::finder::AssetKind;
use crate::outcome::{OptimizedAsset, SkipReason, WorkerOutcome};
use image::imageops::FilterType;
use image::DynamicImage;
use std::path::{Path, PathBuf};
use tracing::debug;
use webp::{Encoder, WebPConfig};

/// Handles single-file image to WebP conversion
pub struct ImageOptimizer {
    config: Config,
}

impl ImageOptimizer {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Target path: same directory, extension replaced with `.webp`.
    pub fn target_path(input: &Path) -> PathBuf {
        input.with_extension("webp")
    }

    /// Convert a single image to WebP, returning the per-item outcome.
    pub async fn compress(&self, input: &Path) -> WorkerOutcome {
        let ext = input
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        if ext == "webp" {
            debug!("Skipping already-WebP input: {}", input.display());
            return WorkerOutcome::skipped(input, SkipReason::AlreadyWebp);
        }

        let target = Self::target_path(input);
        if target.exists() {
            debug!("Skipping, target exists: {}", target.display());
            return WorkerOutcome::skipped(input, SkipReason::TargetExists);
        }

        let config = self.config.clone();
        let source = input.to_path_buf();
        let dest = target.clone();
        let encoded = tokio::task::spawn_blocking(move || encode_webp(&source, &dest, &config)).await;

        match encoded {
            Ok(Ok(())) => match benchmark::benchmark(input, &target) {
                Ok((old_bytes, new_bytes, savings_pct)) => {
                    WorkerOutcome::Success(OptimizedAsset {
                        kind: AssetKind::Image,
                        original_name: file_name(input),
                        new_name: file_name(&target),
                        old_bytes,
                        new_bytes,
                        savings_pct,
                    })
                }
                Err(e) => WorkerOutcome::failure(AssetKind::Image, input, e),
            },
            Ok(Err(e)) => WorkerOutcome::failure(AssetKind::Image, input, e),
            Err(e) => WorkerOutcome::failure(AssetKind::Image, input, e),
        }
    }
}

fn file_name(path: &Path) -> String {
    path.file_name().unwrap_or_default().to_string_lossy().to_string()
}

/// Decode, resize if wider than `max_width`, and write the WebP target.
fn encode_webp(input: &Path, target: &Path, config: &Config) -> Result<(), OptimizeError> {
    let mut img = image::open(input)?;

    if img.width() > config.max_width {
        let ratio = config.max_width as f64 / img.width() as f64;
        let new_height = ((img.height() as f64 * ratio) as u32).max(1);
        debug!(
            "Resizing {} from {}x{} to {}x{}",
            input.display(),
            img.width(),
            img.height(),
            config.max_width,
            new_height
        );
        img = img.resize_exact(config.max_width, new_height, FilterType::Lanczos3);
    }

    // libwebp only accepts RGB8/RGBA8 buffers
    let img = match img {
        DynamicImage::ImageRgb8(_) | DynamicImage::ImageRgba8(_) => img,
        other => DynamicImage::ImageRgba8(other.to_rgba8()),
    };

    let encoder = Encoder::from_image(&img).map_err(|e| OptimizeError::WebpEncode(e.to_string()))?;

    let mut webp_config = WebPConfig::new()
        .map_err(|_| OptimizeError::WebpEncode("failed to initialize encoder config".to_string()))?;
    webp_config.quality = config.webp_quality;
    webp_config.method = config.webp_method;

    let memory = encoder
        .encode_advanced(&webp_config)
        .map_err(|e| OptimizeError::WebpEncode(format!("{e:?}")))?;

    std::fs::write(target, &*memory)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;
    use std::fs;
    use tempfile::TempDir;

    fn write_png(path: &Path, width: u32, height: u32) {
        let img = RgbImage::from_pixel(width, height, image::Rgb([120, 80, 40]));
        img.save(path).unwrap();
    }

    #[test]
    fn test_target_path_is_pure_and_case_insensitive() {
        assert_eq!(
            ImageOptimizer::target_path(Path::new("/a/b/photo.png")),
            PathBuf::from("/a/b/photo.webp")
        );
        assert_eq!(
            ImageOptimizer::target_path(Path::new("/a/b/PHOTO.JPG")),
            PathBuf::from("/a/b/PHOTO.webp")
        );
        assert_eq!(
            ImageOptimizer::target_path(Path::new("pic.jpeg")),
            PathBuf::from("pic.webp")
        );
    }

    #[tokio::test]
    async fn test_compress_produces_webp() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("a.png");
        write_png(&input, 64, 48);

        let optimizer = ImageOptimizer::new(Config::default());
        let outcome = optimizer.compress(&input).await;

        let asset = match outcome {
            WorkerOutcome::Success(asset) => asset,
            other => panic!("expected success, got {other:?}"),
        };
        assert_eq!(asset.original_name, "a.png");
        assert_eq!(asset.new_name, "a.webp");
        assert_eq!(asset.old_bytes, fs::metadata(&input).unwrap().len());

        let target = dir.path().join("a.webp");
        assert!(target.exists());
        assert_eq!(asset.new_bytes, fs::metadata(&target).unwrap().len());

        // Small image keeps its dimensions
        let out = image::open(&target).unwrap();
        assert_eq!((out.width(), out.height()), (64, 48));
    }

    #[tokio::test]
    async fn test_compress_downscales_wide_images() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("wide.png");
        write_png(&input, 2400, 1200);

        let optimizer = ImageOptimizer::new(Config::default());
        let outcome = optimizer.compress(&input).await;
        assert!(matches!(outcome, WorkerOutcome::Success(_)));

        let out = image::open(dir.path().join("wide.webp")).unwrap();
        assert_eq!((out.width(), out.height()), (1920, 960));
    }

    #[tokio::test]
    async fn test_compress_skips_webp_input() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("b.webp");
        fs::write(&input, b"not even a real webp").unwrap();

        let optimizer = ImageOptimizer::new(Config::default());
        let outcome = optimizer.compress(&input).await;
        assert!(matches!(
            outcome,
            WorkerOutcome::Skipped { reason: SkipReason::AlreadyWebp, .. }
        ));
    }

    #[tokio::test]
    async fn test_compress_skips_existing_target_without_decoding() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("c.jpg");
        let target = dir.path().join("c.webp");
        // Garbage input proves the image is never decoded on this path
        fs::write(&input, b"garbage").unwrap();
        fs::write(&target, b"previous run output").unwrap();

        let optimizer = ImageOptimizer::new(Config::default());
        let outcome = optimizer.compress(&input).await;
        assert!(matches!(
            outcome,
            WorkerOutcome::Skipped { reason: SkipReason::TargetExists, .. }
        ));
        assert_eq!(fs::read(&target).unwrap(), b"previous run output");
    }

    #[tokio::test]
    async fn test_compress_reports_failure_for_malformed_input() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("broken.png");
        fs::write(&input, b"definitely not a png").unwrap();

        let optimizer = ImageOptimizer::new(Config::default());
        let outcome = optimizer.compress(&input).await;
        assert!(matches!(outcome, WorkerOutcome::Failure { .. }));
    }
}
