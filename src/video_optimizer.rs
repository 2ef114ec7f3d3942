//! # Video Optimization Module
//!
//! Questo modulo transcodifica i video in MP4 H.264/AAC tramite FFmpeg.
//!
//! ## Pipeline:
//! 1. Eligibility: solo estensioni MP4/MOV/AVI; stem contenente "optimized"
//!    o target già presente → skip
//! 2. Probe della larghezza con ffprobe (JSON)
//! 3. Encoding su un path temporaneo `temp_<stem>.optimized.mp4` con
//!    libx264 (CRF 26, preset medium) e audio AAC; downscale a `max_width`
//!    se il video è più largo
//! 4. Rimozione di un eventuale target pre-esistente e rename atomico
//!    temp → target
//!
//! Un crash tra encoding e rename lascia solo un file `temp_*`, mai un
//! target scritto a metà. L'output di FFmpeg è soppresso (`-loglevel error`).
//!
//! ## Dipendenze richieste:
//! - `ffmpeg`: Transcodifica video
//! - `ffprobe`: Probe delle proprietà del video

use crate::benchmark;
use crate::config::Config;
use crate::error::OptimizeError;
use crate::finder::AssetKind;
use crate::outcome::{OptimizedAsset, SkipReason, WorkerOutcome};
use std::path::{Path, PathBuf};
use tokio::process::Command;
use tracing::debug;

/// Handles single-file video transcoding with atomic rename
pub struct VideoOptimizer {
    config: Config,
}

impl VideoOptimizer {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Target path: `<stem>.optimized.mp4` in the source's directory.
    pub fn target_path(input: &Path) -> PathBuf {
        let stem = input.file_stem().unwrap_or_default().to_string_lossy();
        input.with_file_name(format!("{}.optimized.mp4", stem))
    }

    /// Sibling temp path the encoder writes to before the final rename.
    pub fn temp_path(input: &Path) -> PathBuf {
        let stem = input.file_stem().unwrap_or_default().to_string_lossy();
        input.with_file_name(format!("temp_{}.optimized.mp4", stem))
    }

    /// Transcode a single video, returning the per-item outcome.
    pub async fn compress(&self, input: &Path) -> WorkerOutcome {
        let ext = input
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        if !matches!(ext.as_str(), "mp4" | "mov" | "avi") {
            return WorkerOutcome::skipped(input, SkipReason::UnsupportedExt);
        }

        let stem = input.file_stem().unwrap_or_default().to_string_lossy();
        if stem.contains("optimized") {
            debug!("Skipping already-optimized video: {}", input.display());
            return WorkerOutcome::skipped(input, SkipReason::AlreadyOptimized);
        }

        let target = Self::target_path(input);
        if target.exists() {
            debug!("Skipping, target exists: {}", target.display());
            return WorkerOutcome::skipped(input, SkipReason::TargetExists);
        }

        match self.transcode(input, &target).await {
            Ok(()) => match benchmark::benchmark(input, &target) {
                Ok((old_bytes, new_bytes, savings_pct)) => {
                    WorkerOutcome::Success(OptimizedAsset {
                        kind: AssetKind::Video,
                        original_name: file_name(input),
                        new_name: file_name(&target),
                        old_bytes,
                        new_bytes,
                        savings_pct,
                    })
                }
                Err(e) => WorkerOutcome::failure(AssetKind::Video, input, e),
            },
            Err(e) => WorkerOutcome::failure(AssetKind::Video, input, e),
        }
    }

    async fn transcode(&self, input: &Path, target: &Path) -> Result<(), OptimizeError> {
        let temp = Self::temp_path(input);
        let width = self.probe_width(input).await?;

        let mut cmd = Command::new("ffmpeg");
        cmd.arg("-i")
            .arg(input)
            .args(["-c:v", "libx264"])
            .args(["-preset", &self.config.video_preset])
            .args(["-crf", &self.config.video_crf.to_string()])
            .args(["-c:a", "aac"]);
        if width > self.config.max_width {
            // -2 keeps the height even, which yuv420p/libx264 requires
            cmd.args(["-vf", &format!("scale={}:-2", self.config.max_width)]);
        }
        cmd.args(["-loglevel", "error", "-y"]).arg(&temp);

        debug!(
            "Transcoding {} (CRF {}, preset {})",
            input.display(),
            self.config.video_crf,
            self.config.video_preset
        );

        let output = cmd
            .output()
            .await
            .map_err(|e| OptimizeError::Ffmpeg(format!("failed to execute ffmpeg: {}", e)))?;

        if !output.status.success() {
            let _ = tokio::fs::remove_file(&temp).await;
            return Err(OptimizeError::Ffmpeg(
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
            ));
        }

        // A concurrent run may have produced the target while we encoded
        if target.exists() {
            tokio::fs::remove_file(target).await?;
        }
        tokio::fs::rename(&temp, target).await?;

        Ok(())
    }

    /// Width of the first video stream, via ffprobe JSON output.
    async fn probe_width(&self, input: &Path) -> Result<u32, OptimizeError> {
        let output = Command::new("ffprobe")
            .args(["-v", "error", "-select_streams", "v:0"])
            .args(["-show_entries", "stream=width"])
            .args(["-of", "json"])
            .arg(input)
            .output()
            .await
            .map_err(|e| OptimizeError::Ffmpeg(format!("failed to execute ffprobe: {}", e)))?;

        if !output.status.success() {
            return Err(OptimizeError::Ffmpeg(
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
            ));
        }

        let info: serde_json::Value = serde_json::from_slice(&output.stdout)
            .map_err(|e| OptimizeError::Ffmpeg(format!("unparseable ffprobe output: {}", e)))?;

        info["streams"][0]["width"]
            .as_u64()
            .map(|w| w as u32)
            .ok_or_else(|| OptimizeError::Ffmpeg(format!("no video stream in {}", input.display())))
    }

    /// Check that the external encoder tools are available
    pub async fn check_dependencies() -> Result<(), OptimizeError> {
        for tool in ["ffmpeg", "ffprobe"] {
            let available = Command::new(tool)
                .arg("-version")
                .stdout(std::process::Stdio::null())
                .stderr(std::process::Stdio::null())
                .status()
                .await
                .map(|s| s.success())
                .unwrap_or(false);
            if !available {
                return Err(OptimizeError::MissingDependency(format!(
                    "{} is required for video processing",
                    tool
                )));
            }
        }
        Ok(())
    }
}

fn file_name(path: &Path) -> String {
    path.file_name().unwrap_or_default().to_string_lossy().to_string()
}
