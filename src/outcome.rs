//! # Worker Outcome Module
//!
//! Per-item results of the batch: a worker either produces a smaller asset,
//! skips the input for a classification reason, or fails. Failures never
//! abort the batch; they are collected and surfaced as diagnostics.

use crate::finder::AssetKind;
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// Why a worker skipped an input without producing output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The derived target path already exists (idempotent re-run)
    TargetExists,
    /// The input is already a WebP image
    AlreadyWebp,
    /// The video stem is marked as optimized
    AlreadyOptimized,
    /// The extension is not handled by this worker
    UnsupportedExt,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Self::TargetExists => "target exists",
            Self::AlreadyWebp => "already WebP",
            Self::AlreadyOptimized => "already optimized",
            Self::UnsupportedExt => "unsupported extension",
        };
        write!(f, "{}", reason)
    }
}

/// A successfully produced variant, measured on disk after the worker returned.
#[derive(Debug, Clone, Serialize)]
pub struct OptimizedAsset {
    pub kind: AssetKind,
    pub original_name: String,
    pub new_name: String,
    pub old_bytes: u64,
    pub new_bytes: u64,
    /// `(1 - new/old) * 100`; negative when the output grew
    pub savings_pct: f64,
}

/// Result of dispatching one input to one worker
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum WorkerOutcome {
    Success(OptimizedAsset),
    Skipped { path: PathBuf, reason: SkipReason },
    Failure { kind: AssetKind, path: PathBuf, message: String },
}

impl WorkerOutcome {
    pub fn skipped(path: &Path, reason: SkipReason) -> Self {
        Self::Skipped {
            path: path.to_path_buf(),
            reason,
        }
    }

    pub fn failure(kind: AssetKind, path: &Path, message: impl ToString) -> Self {
        Self::Failure {
            kind,
            path: path.to_path_buf(),
            message: message.to_string(),
        }
    }
}
