//! # File Discovery Module
//!
//! Questo modulo gestisce la discovery ricorsiva degli asset e la loro
//! classificazione.
//!
//! ## Responsabilità:
//! - Walk ricorsivo depth-first con `walkdir`
//! - Pruning delle directory nel set `IGNORE_DIRS` (mai visitate, il filtro
//!   avviene durante il walk e non a posteriori)
//! - Filtro per estensione: PNG, JPG, JPEG, MP4
//! - Classificazione per estensione in `AssetKind` (Image/Video/Text/Other)
//!
//! ## Casi particolari:
//! - Se la root è un singolo file viene ritornato così com'è,
//!   indipendentemente dall'estensione: è l'orchestratore a classificarlo
//! - I symlink non vengono seguiti

use crate::config::IGNORE_DIRS;
use anyhow::Result;
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Asset classification derived solely from the lowercased extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    Image,
    Video,
    Text,
    Other,
}

impl AssetKind {
    /// Classify a path by its extension (case-insensitive).
    pub fn from_path(path: &Path) -> Self {
        let Some(ext) = path.extension() else {
            return Self::Other;
        };
        match ext.to_string_lossy().to_lowercase().as_str() {
            "png" | "jpg" | "jpeg" | "webp" => Self::Image,
            "mp4" | "mov" | "avi" => Self::Video,
            "html" | "css" | "js" => Self::Text,
            _ => Self::Other,
        }
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Image => "image",
            Self::Video => "video",
            Self::Text => "text",
            Self::Other => "other",
        };
        write!(f, "{}", name)
    }
}

/// Discovers optimizable assets under a root path
pub struct AssetFinder;

impl AssetFinder {
    /// Find every regular file under `root` whose lowercased extension is in
    /// {png, jpg, jpeg, mp4}, pruning ignored directories before descent.
    /// A file root yields a one-element result regardless of extension.
    pub fn find(root: &Path) -> Result<Vec<PathBuf>> {
        if root.is_file() {
            return Ok(vec![root.to_path_buf()]);
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(root)
            .into_iter()
            .filter_entry(|e| !Self::is_ignored_dir(e))
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
        {
            if Self::has_target_extension(entry.path()) {
                files.push(entry.path().to_path_buf());
            }
        }

        Ok(files)
    }

    fn is_ignored_dir(entry: &DirEntry) -> bool {
        entry.file_type().is_dir()
            && entry
                .file_name()
                .to_str()
                .map(|name| IGNORE_DIRS.contains(&name))
                .unwrap_or(false)
    }

    fn has_target_extension(path: &Path) -> bool {
        if let Some(ext) = path.extension() {
            let ext_lower = ext.to_string_lossy().to_lowercase();
            matches!(ext_lower.as_str(), "png" | "jpg" | "jpeg" | "mp4")
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(path: &Path) {
        fs::write(path, b"x").unwrap();
    }

    #[test]
    fn test_kind_from_extension() {
        assert_eq!(AssetKind::from_path(Path::new("a.png")), AssetKind::Image);
        assert_eq!(AssetKind::from_path(Path::new("a.JPG")), AssetKind::Image);
        assert_eq!(AssetKind::from_path(Path::new("a.webp")), AssetKind::Image);
        assert_eq!(AssetKind::from_path(Path::new("a.mp4")), AssetKind::Video);
        assert_eq!(AssetKind::from_path(Path::new("a.MOV")), AssetKind::Video);
        assert_eq!(AssetKind::from_path(Path::new("a.css")), AssetKind::Text);
        assert_eq!(AssetKind::from_path(Path::new("a.txt")), AssetKind::Other);
        assert_eq!(AssetKind::from_path(Path::new("noext")), AssetKind::Other);
    }

    #[test]
    fn test_find_filters_by_extension() {
        let dir = TempDir::new().unwrap();
        touch(&dir.path().join("a.png"));
        touch(&dir.path().join("b.JPEG"));
        touch(&dir.path().join("c.mp4"));
        touch(&dir.path().join("d.txt"));
        touch(&dir.path().join("e.webp"));

        let mut found = AssetFinder::find(dir.path()).unwrap();
        found.sort();
        let names: Vec<_> = found
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.png", "b.JPEG", "c.mp4"]);
    }

    #[test]
    fn test_find_prunes_ignored_dirs() {
        let dir = TempDir::new().unwrap();
        touch(&dir.path().join("keep.jpg"));
        for ignored in ["node_modules", ".git", "__pycache__"] {
            let sub = dir.path().join(ignored).join("nested");
            fs::create_dir_all(&sub).unwrap();
            touch(&sub.join("big.png"));
        }

        let found = AssetFinder::find(dir.path()).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].file_name().unwrap(), "keep.jpg");
    }

    #[test]
    fn test_find_single_file_root_ignores_extension() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("anything.xyz");
        touch(&file);

        let found = AssetFinder::find(&file).unwrap();
        assert_eq!(found, vec![file]);
    }
}
