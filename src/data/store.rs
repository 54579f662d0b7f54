// ============================================================
// Data — Session Store
// ============================================================
// Per-split, read-only storage of tokenised sessions.
// Populated once from a CorpusSource and never mutated
// afterwards. Each split's sessions sit behind an Arc so a
// burn Dataset view can be handed out without copying.

use std::{collections::BTreeMap, sync::Arc};

use burn::data::dataset::Dataset;

use crate::domain::{session::Session, split::Split};
use crate::error::{Error, Result};

/// Immutable per-split session storage.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    splits: BTreeMap<Split, Arc<Vec<Session>>>,
}

impl SessionStore {
    pub fn new(sessions: BTreeMap<Split, Vec<Session>>) -> Self {
        let splits = sessions
            .into_iter()
            .map(|(split, sessions)| (split, Arc::new(sessions)))
            .collect();
        Self { splits }
    }

    /// The splits this store was built with, in canonical order
    pub fn splits(&self) -> impl Iterator<Item = Split> + '_ {
        self.splits.keys().copied()
    }

    pub fn contains(&self, split: Split) -> bool {
        self.splits.contains_key(&split)
    }

    /// All sessions of a split.
    pub fn sessions(&self, split: Split) -> Result<&[Session]> {
        self.splits
            .get(&split)
            .map(|s| s.as_slice())
            .ok_or_else(|| Error::UnknownSplit(split.to_string()))
    }

    /// Number of sessions in a split.
    pub fn len(&self, split: Split) -> Result<usize> {
        Ok(self.sessions(split)?.len())
    }

    /// One session by record index.
    pub fn session(&self, split: Split, index: usize) -> Result<&Session> {
        let sessions = self.sessions(split)?;
        sessions.get(index).ok_or(Error::IndexOutOfRange {
            split,
            index,
            len: sessions.len(),
        })
    }

    /// A burn Dataset over one split, for use with burn's DataLoader.
    pub fn dataset(&self, split: Split) -> Result<SplitDataset> {
        self.splits
            .get(&split)
            .map(|sessions| SplitDataset { sessions: Arc::clone(sessions) })
            .ok_or_else(|| Error::UnknownSplit(split.to_string()))
    }
}

/// A shared, read-only view of one split.
#[derive(Debug, Clone)]
pub struct SplitDataset {
    sessions: Arc<Vec<Session>>,
}

impl Dataset<Session> for SplitDataset {
    fn get(&self, index: usize) -> Option<Session> {
        self.sessions.get(index).cloned()
    }

    fn len(&self) -> usize {
        self.sessions.len()
    }
}
