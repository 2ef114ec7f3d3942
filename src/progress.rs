//! # Progress Tracking Module
//!
//! Barra di progresso per il batch, basata su `indicatif`. Avanza di uno per
//! ogni task completato; l'ordine di completamento non è deterministico e il
//! messaggio mostra solo l'ultimo esito.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Manages the batch progress bar
#[derive(Clone)]
pub struct ProgressManager {
    bar: ProgressBar,
}

impl ProgressManager {
    /// Create a progress bar for `total` work items
    pub fn new(total: u64) -> Self {
        let bar = ProgressBar::new(total);

        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}")
                .unwrap()
                .progress_chars("=>-"),
        );
        bar.enable_steady_tick(Duration::from_millis(100));

        Self { bar }
    }

    /// Advance by one completed item and show its outcome
    pub fn update(&self, message: &str) {
        self.bar.inc(1);
        self.bar.set_message(message.to_string());
    }

    /// Finish with a summary message
    pub fn finish(&self, message: &str) {
        self.bar.finish_with_message(message.to_string());
    }
}
