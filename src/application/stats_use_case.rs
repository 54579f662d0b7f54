// ============================================================
// Application — Stats Use Case
// ============================================================
// Runs one epoch over a split exactly the way a training or
// evaluation loop would, and reports what came out:
//
//   restart(split, batch_size, shuffle)
//   loop get_next_batch(split, ignore_left_samples)
//
// Useful for choosing a batch size: padding_ratio shows how
// much of each dense batch is wasted on <pad>.

use anyhow::Result;
use serde::Serialize;

use crate::application::corpus_config::CorpusConfig;
use crate::data::dialog::MultiTurnDialog;
use crate::domain::split::Split;
use crate::infra::metrics::EpochStatsLogger;

/// Summary of one epoch over a split.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EpochStats {
    pub split:         Split,
    pub batch_size:    usize,
    /// Non-empty batches returned
    pub batches:       usize,
    /// Sessions delivered across all batches
    pub samples:       usize,
    /// Sessions left unread at the end of the epoch
    pub dropped:       usize,
    /// Batches smaller than batch_size
    pub short_batches: usize,
    /// Padding share over all delivered positions
    pub padding_ratio: f64,
}

#[derive(Debug, Clone)]
pub struct StatsRequest {
    pub split:               Split,
    pub batch_size:          usize,
    pub shuffle:             bool,
    pub ignore_left_samples: bool,
    /// Directory to append epoch_stats.csv to
    pub log_dir:             Option<String>,
}

pub struct StatsUseCase {
    config: CorpusConfig,
}

impl StatsUseCase {
    pub fn new(config: CorpusConfig) -> Self {
        Self { config }
    }

    pub fn execute(&self, req: &StatsRequest) -> Result<EpochStats> {
        let mut dialog = self.config.load_dialog()?;
        let stats = run_epoch(&mut dialog, req)?;

        if let Some(dir) = &req.log_dir {
            let logger = EpochStatsLogger::new(dir)?;
            logger.log(&stats)?;
            tracing::info!("Appended epoch stats to '{}'", logger.csv_path().display());
        }
        Ok(stats)
    }
}

/// Iterate one full epoch of `req.split` on an already-loaded dialog.
pub fn run_epoch(dialog: &mut MultiTurnDialog, req: &StatsRequest) -> Result<EpochStats> {
    dialog.restart(req.split, Some(req.batch_size), req.shuffle)?;

    let mut batches       = 0;
    let mut samples       = 0;
    let mut short_batches = 0;
    let mut positions     = 0;
    let mut tokens        = 0;

    while let Some(batch) = dialog.get_next_batch(req.split, req.ignore_left_samples)? {
        batches   += 1;
        samples   += batch.len();
        positions += batch.sent.len();
        tokens    += batch.token_count();
        if batch.len() < req.batch_size {
            short_batches += 1;
        }
    }

    let total = dialog.split_len(req.split)?;
    let padding_ratio = if positions == 0 {
        0.0
    } else {
        1.0 - tokens as f64 / positions as f64
    };

    tracing::info!(
        "Epoch over '{}': {} batches, {} / {} sessions, padding {:.1}%",
        req.split,
        batches,
        samples,
        total,
        padding_ratio * 100.0,
    );

    Ok(EpochStats {
        split: req.split,
        batch_size: req.batch_size,
        batches,
        samples,
        dropped: total - samples,
        short_batches,
        padding_ratio,
    })
}
