// ============================================================
// Domain — Core Traits
// ============================================================
// The dataloader does not parse raw corpus files itself.
// A CorpusSource hands it everything it needs in one go:
//
//   - the fixed set of splits
//   - the vocabulary list, special prefix first
//   - per-split sessions already converted to ids and
//     already wrapped in <go> ... <eot>
//
// Implementations:
//   - UbuntuCorpus   → reads ubuntu_corpus_<split>.json files
//   - InMemoryCorpus → hands over data built in code (tests, tooling)

use std::collections::BTreeMap;

use crate::domain::{session::Session, split::Split};
use crate::error::Result;

/// Everything a corpus source produces at load time.
#[derive(Debug, Clone, Default)]
pub struct CorpusData {
    /// Vocabulary list, starting with the five special tokens
    pub vocab_list: Vec<String>,

    /// Sessions per split. The keys are the recognised splits.
    pub sessions: BTreeMap<Split, Vec<Session>>,
}

/// Any component that can produce a tokenised dialog corpus.
pub trait CorpusSource {
    /// Load the vocabulary and every split's sessions.
    fn load(&self) -> Result<CorpusData>;
}

/// A corpus that is already in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCorpus {
    data: CorpusData,
}

impl InMemoryCorpus {
    pub fn new(vocab_list: Vec<String>, sessions: BTreeMap<Split, Vec<Session>>) -> Self {
        Self { data: CorpusData { vocab_list, sessions } }
    }
}

impl CorpusSource for InMemoryCorpus {
    fn load(&self) -> Result<CorpusData> {
        Ok(self.data.clone())
    }
}
