//! # Text Compression Module
//!
//! Writes gzip and brotli sidecars (`<file>.gz`, `<file>.br`) next to a text
//! asset, overwriting any previous sidecars. Used only by the deploy flow
//! after reference rewriting, never by the general asset pipeline.

use crate::benchmark;
use crate::finder::AssetKind;
use crate::outcome::{OptimizedAsset, WorkerOutcome};
use flate2::write::GzEncoder;
use flate2::Compression;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Append an extra extension, keeping the original one (`a.css` → `a.css.gz`).
pub fn sidecar_path(path: &Path, ext: &str) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(format!(".{}", ext));
    PathBuf::from(name)
}

/// Compress a text file to `.gz` and `.br` sidecars.
///
/// The gzip sidecar is reported as the produced asset; the brotli sidecar is
/// written alongside it.
pub async fn compress(path: &Path) -> WorkerOutcome {
    match compress_inner(path).await {
        Ok(outcome) => outcome,
        Err(e) => WorkerOutcome::failure(AssetKind::Text, path, e),
    }
}

async fn compress_inner(path: &Path) -> anyhow::Result<WorkerOutcome> {
    let data = tokio::fs::read(path).await?;

    let gz_path = sidecar_path(path, "gz");
    let mut gz = GzEncoder::new(Vec::new(), Compression::default());
    gz.write_all(&data)?;
    let gz_bytes = gz.finish()?;
    tokio::fs::write(&gz_path, &gz_bytes).await?;

    let br_path = sidecar_path(path, "br");
    let mut br_bytes = Vec::new();
    {
        let mut writer = brotli::CompressorWriter::new(&mut br_bytes, 4096, 11, 22);
        writer.write_all(&data)?;
        writer.flush()?;
    }
    tokio::fs::write(&br_path, &br_bytes).await?;

    debug!(
        "Compressed {} -> {} + {}",
        path.display(),
        gz_path.display(),
        br_path.display()
    );

    let (old_bytes, new_bytes, savings_pct) = benchmark::benchmark(path, &gz_path)?;
    Ok(WorkerOutcome::Success(OptimizedAsset {
        kind: AssetKind::Text,
        original_name: file_name(path),
        new_name: file_name(&gz_path),
        old_bytes,
        new_bytes,
        savings_pct,
    }))
}

fn file_name(path: &Path) -> String {
    path.file_name().unwrap_or_default().to_string_lossy().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Read;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_compress_writes_both_sidecars() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("style.css");
        let body = "body { margin: 0; } ".repeat(200);
        fs::write(&file, &body).unwrap();

        let outcome = compress(&file).await;
        assert!(matches!(outcome, WorkerOutcome::Success(_)));

        // gzip sidecar round-trips
        let gz = fs::File::open(dir.path().join("style.css.gz")).unwrap();
        let mut decoded = String::new();
        flate2::read::GzDecoder::new(gz).read_to_string(&mut decoded).unwrap();
        assert_eq!(decoded, body);

        // brotli sidecar round-trips
        let br = fs::File::open(dir.path().join("style.css.br")).unwrap();
        let mut decoded = Vec::new();
        brotli::Decompressor::new(br, 4096).read_to_end(&mut decoded).unwrap();
        assert_eq!(decoded, body.as_bytes());
    }

    #[tokio::test]
    async fn test_compress_overwrites_stale_sidecars() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("app.js");
        fs::write(&file, "console.log('hello');".repeat(50)).unwrap();
        fs::write(dir.path().join("app.js.gz"), b"stale").unwrap();
        fs::write(dir.path().join("app.js.br"), b"stale").unwrap();

        let outcome = compress(&file).await;
        assert!(matches!(outcome, WorkerOutcome::Success(_)));
        assert_ne!(fs::read(dir.path().join("app.js.gz")).unwrap(), b"stale");
        assert_ne!(fs::read(dir.path().join("app.js.br")).unwrap(), b"stale");
    }

    #[tokio::test]
    async fn test_compress_missing_file_is_a_failure() {
        let dir = TempDir::new().unwrap();
        let outcome = compress(&dir.path().join("missing.html")).await;
        assert!(matches!(outcome, WorkerOutcome::Failure { .. }));
    }
}
