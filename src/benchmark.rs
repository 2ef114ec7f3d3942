//! # Size Benchmark Module
//!
//! Utilities for measuring files on disk and computing savings. Sizes are
//! always read from the filesystem, never from in-memory estimates.

use anyhow::Result;
use std::path::Path;

/// Size of a file on disk, in bytes.
pub fn file_size(path: &Path) -> Result<u64> {
    Ok(std::fs::metadata(path)?.len())
}

/// Percentage saved going from `old` to `new` bytes. Negative when the new
/// file is larger; `0` when the original is empty.
pub fn savings_percent(old: u64, new: u64) -> f64 {
    if old == 0 {
        0.0
    } else {
        (1.0 - (new as f64 / old as f64)) * 100.0
    }
}

/// Measure both files on disk and compute the savings percentage.
pub fn benchmark(old_path: &Path, new_path: &Path) -> Result<(u64, u64, f64)> {
    let old = file_size(old_path)?;
    let new = file_size(new_path)?;
    Ok((old, new, savings_percent(old, new)))
}

/// Get human-readable file size
pub fn format_size(size: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
    let mut size = size as f64;
    let mut unit_index = 0;

    while size >= 1024.0 && unit_index < UNITS.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{} {}", size as u64, UNITS[unit_index])
    } else {
        format!("{:.2} {}", size, UNITS[unit_index])
    }
}

/// Format a possibly negative byte delta (a larger output subtracts honestly).
pub fn format_signed_size(bytes: i64) -> String {
    if bytes < 0 {
        format!("-{}", format_size(bytes.unsigned_abs()))
    } else {
        format_size(bytes as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.00 KB");
        assert_eq!(format_size(2 * 1024 * 1024), "2.00 MB");
    }

    #[test]
    fn test_format_signed_size() {
        assert_eq!(format_signed_size(2048), "2.00 KB");
        assert_eq!(format_signed_size(-2048), "-2.00 KB");
    }

    #[test]
    fn test_savings_percent() {
        assert_eq!(savings_percent(1000, 250), 75.0);
        assert_eq!(savings_percent(0, 100), 0.0);
        // Larger outputs report a negative percentage
        assert_eq!(savings_percent(100, 150), -50.0);
    }

    #[test]
    fn test_benchmark_measures_from_disk() {
        let dir = TempDir::new().unwrap();
        let old = dir.path().join("old.bin");
        let new = dir.path().join("new.bin");
        let mut f = std::fs::File::create(&old).unwrap();
        f.write_all(&[0u8; 1000]).unwrap();
        let mut f = std::fs::File::create(&new).unwrap();
        f.write_all(&[0u8; 400]).unwrap();

        let (old_bytes, new_bytes, pct) = benchmark(&old, &new).unwrap();
        assert_eq!(old_bytes, 1000);
        assert_eq!(new_bytes, 400);
        assert!((pct - 60.0).abs() < 1e-9);
    }
}
