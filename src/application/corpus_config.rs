// ============================================================
// Application — Corpus Configuration
// ============================================================
// Everything needed to load the same corpus the same way
// twice. Serialisable so it can live in corpus_config.json.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::data::{dialog::MultiTurnDialog, ubuntu::UbuntuCorpus};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorpusConfig {
    /// Directory holding ubuntu_corpus_<split>.json
    pub corpus_dir: String,

    /// Minimum train-split frequency for a word to enter the vocabulary
    pub min_vocab_times: usize,

    /// Longest sentence kept, <go> and <eot> included
    pub max_sen_length: usize,

    /// Most turns kept per session
    pub max_turn_length: usize,

    /// Shuffle seed; None draws a fresh one every run
    pub seed: Option<u64>,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            corpus_dir:      "data/ubuntu_corpus".to_string(),
            min_vocab_times: 10,
            max_sen_length:  50,
            max_turn_length: 20,
            seed:            None,
        }
    }
}

impl CorpusConfig {
    pub fn source(&self) -> UbuntuCorpus {
        UbuntuCorpus::new(&self.corpus_dir)
            .with_min_vocab_times(self.min_vocab_times)
            .with_max_sen_length(self.max_sen_length)
            .with_max_turn_length(self.max_turn_length)
    }

    /// Load the configured corpus.
    pub fn load_dialog(&self) -> Result<MultiTurnDialog> {
        tracing::info!("Loading corpus from '{}'", self.corpus_dir);
        MultiTurnDialog::from_source(&self.source(), self.seed)
            .with_context(|| format!("Cannot load corpus from '{}'", self.corpus_dir))
    }
}
