// ============================================================
// Infrastructure — Epoch Stats Logger
// ============================================================
// Records one CSV row per iterated epoch:
//
//   split,batch_size,batches,samples,dropped,padding_ratio
//   train,7,3,21,2,0.412300
//
// The header is written once when the file is created, so
// repeated runs append to the same log.

use anyhow::Result;
use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::PathBuf,
};

use crate::application::stats_use_case::EpochStats;

pub const STATS_FILE: &str = "epoch_stats.csv";

/// Appends EpochStats rows to a CSV file.
pub struct EpochStatsLogger {
    csv_path: PathBuf,
}

impl EpochStatsLogger {
    /// Create the directory and CSV header if they don't exist yet.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir: PathBuf = dir.into();
        fs::create_dir_all(&dir)?;

        let csv_path = dir.join(STATS_FILE);
        if !csv_path.exists() {
            let mut f = fs::File::create(&csv_path)?;
            writeln!(f, "split,batch_size,batches,samples,dropped,padding_ratio")?;
            tracing::debug!("Created stats CSV: '{}'", csv_path.display());
        }

        Ok(Self { csv_path })
    }

    pub fn log(&self, s: &EpochStats) -> Result<()> {
        let mut f = OpenOptions::new().append(true).open(&self.csv_path)?;
        writeln!(
            f,
            "{},{},{},{},{},{:.6}",
            s.split, s.batch_size, s.batches, s.samples, s.dropped, s.padding_ratio,
        )?;
        Ok(())
    }

    pub fn csv_path(&self) -> &PathBuf {
        &self.csv_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::split::Split;

    #[test]
    fn test_header_once_then_rows() {
        let dir = std::env::temp_dir().join(format!("dialog-loader-stats-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);

        let stats = EpochStats {
            split:         Split::Dev,
            batch_size:    4,
            batches:       3,
            samples:       11,
            dropped:       0,
            short_batches: 1,
            padding_ratio: 0.5,
        };
        EpochStatsLogger::new(&dir).unwrap().log(&stats).unwrap();
        EpochStatsLogger::new(&dir).unwrap().log(&stats).unwrap();

        let text = fs::read_to_string(dir.join(STATS_FILE)).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "dev,4,3,11,0,0.500000");

        fs::remove_dir_all(&dir).unwrap();
    }
}
