//! # Reference Rewriting Module
//!
//! Questo modulo aggiorna i riferimenti agli asset nei file di testo di un
//! progetto dopo una run di ottimizzazione.
//!
//! ## Regole di sostituzione (per ogni replacement):
//! 1. Ogni occorrenza di `images/<original>` diventa `images/<new>`
//! 2. Se `<original>` compare ancora e `<new>` non compare da nessuna parte,
//!    anche `<original>` nudo diventa `<new>`
//!
//! Il file viene riscritto solo se il contenuto è cambiato: applicare due
//! volte le stesse sostituzioni è un no-op. Gli errori di I/O per singolo
//! file sono best-effort e non interrompono il giro.
//!
//! La lista dei file e la root sono fornite dal chiamante: il rewriter non
//! conosce path hard-coded ed è sempre opt-in.

use crate::finder::AssetKind;
use crate::outcome::OptimizedAsset;
use crate::report::Report;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// One old-name/new-name pair extracted from a successful optimization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Replacement {
    pub original: String,
    pub new: String,
}

impl Replacement {
    pub fn new(original: impl Into<String>, new: impl Into<String>) -> Self {
        Self {
            original: original.into(),
            new: new.into(),
        }
    }
}

impl From<&OptimizedAsset> for Replacement {
    fn from(asset: &OptimizedAsset) -> Self {
        Self::new(asset.original_name.clone(), asset.new_name.clone())
    }
}

/// Build replacements from the Image and Video successes of a report.
pub fn from_report(report: &Report) -> Vec<Replacement> {
    report
        .successes
        .iter()
        .filter(|a| matches!(a.kind, AssetKind::Image | AssetKind::Video))
        .map(Replacement::from)
        .collect()
}

/// Apply every replacement to every listed text file, best effort.
/// Returns how many files actually changed.
pub async fn rewrite_references(replacements: &[Replacement], files: &[PathBuf]) -> usize {
    let mut changed = 0;
    for file in files {
        match rewrite_file(replacements, file).await {
            Ok(true) => {
                info!("Updated asset references in {}", file.display());
                changed += 1;
            }
            Ok(false) => {}
            Err(e) => {
                // Best effort: a missing or non-UTF-8 file never aborts the pass
                debug!("Could not rewrite {}: {}", file.display(), e);
            }
        }
    }
    changed
}

async fn rewrite_file(replacements: &[Replacement], file: &Path) -> anyhow::Result<bool> {
    let original_content = tokio::fs::read_to_string(file).await?;
    let mut content = original_content.clone();

    for replacement in replacements {
        let prefixed_old = format!("images/{}", replacement.original);
        let prefixed_new = format!("images/{}", replacement.new);
        content = content.replace(&prefixed_old, &prefixed_new);

        if content.contains(&replacement.original) && !content.contains(&replacement.new) {
            content = content.replace(&replacement.original, &replacement.new);
        }
    }

    if content != original_content {
        tokio::fs::write(file, &content).await?;
        Ok(true)
    } else {
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_rewrite_prefixed_reference() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("index.html");
        fs::write(&file, r#"<img src="images/a.png">"#).unwrap();

        let replacements = vec![Replacement::new("a.png", "a.webp")];
        let changed = rewrite_references(&replacements, &[file.clone()]).await;
        assert_eq!(changed, 1);
        assert_eq!(
            fs::read_to_string(&file).unwrap(),
            r#"<img src="images/a.webp">"#
        );
    }

    #[tokio::test]
    async fn test_rewrite_bare_reference_only_when_new_absent() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("page.html");
        fs::write(&file, "background: url(a.png);").unwrap();

        let replacements = vec![Replacement::new("a.png", "a.webp")];
        rewrite_references(&replacements, &[file.clone()]).await;
        assert_eq!(fs::read_to_string(&file).unwrap(), "background: url(a.webp);");

        // When the new name is already present, bare occurrences stay put
        let mixed = dir.path().join("mixed.html");
        fs::write(&mixed, "a.webp and a legacy a.png").unwrap();
        rewrite_references(&replacements, &[mixed.clone()]).await;
        assert_eq!(fs::read_to_string(&mixed).unwrap(), "a.webp and a legacy a.png");
    }

    #[tokio::test]
    async fn test_rewrite_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("index.html");
        fs::write(&file, r#"<img src="images/a.png"> <video src="v.mp4">"#).unwrap();

        let replacements = vec![
            Replacement::new("a.png", "a.webp"),
            Replacement::new("v.mp4", "v.optimized.mp4"),
        ];
        let first = rewrite_references(&replacements, &[file.clone()]).await;
        assert_eq!(first, 1);
        let after_first = fs::read_to_string(&file).unwrap();

        let second = rewrite_references(&replacements, &[file.clone()]).await;
        assert_eq!(second, 0);
        assert_eq!(fs::read_to_string(&file).unwrap(), after_first);
    }

    #[tokio::test]
    async fn test_rewrite_swallows_missing_files() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope.html");
        let replacements = vec![Replacement::new("a.png", "a.webp")];
        let changed = rewrite_references(&replacements, &[missing]).await;
        assert_eq!(changed, 0);
    }
}
