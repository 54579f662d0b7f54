// ============================================================
// Data — Batch Indexer
// ============================================================
// Per-split iteration state:
//
//   index:      a permutation of 0..session_count
//   batch_size: set by restart(), reused when omitted later
//   cursor:     next unread position in `index`
//
// One epoch = restart() followed by next_indices() until it
// returns None. Each call hands back the next `batch_size`
// record indices:
//
//   index = [4, 0, 3, 1, 2], batch_size = 2
//
//   call 1 → [4, 0]     cursor 0 → 2
//   call 2 → [3, 1]     cursor 2 → 4
//   call 3 → [2]        (short batch)   or   None (ignore_left_samples)
//   call 4 → None
//
// Shuffling uses Fisher–Yates via rand::seq::SliceRandom.
// restart() without shuffle leaves `index` untouched, so two
// unshuffled restarts in a row always replay the same order.

use std::collections::BTreeMap;

use rand::{seq::SliceRandom, Rng};

use crate::domain::split::Split;
use crate::error::{Error, Result};

/// Iteration state for one split.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexState {
    index:      Vec<usize>,
    batch_size: Option<usize>,
    cursor:     usize,
}

impl IndexState {
    /// Identity order, no batch size, cursor at the start.
    pub fn new(session_count: usize) -> Self {
        Self {
            index:      (0..session_count).collect(),
            batch_size: None,
            cursor:     0,
        }
    }

    pub fn index(&self) -> &[usize] {
        &self.index
    }

    pub fn batch_size(&self) -> Option<usize> {
        self.batch_size
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Entries left in this epoch
    pub fn remaining(&self) -> usize {
        self.index.len() - self.cursor
    }
}

/// Owns the iteration state of every split in a dataset.
#[derive(Debug, Clone, Default)]
pub struct BatchIndexer {
    states: BTreeMap<Split, IndexState>,
}

impl BatchIndexer {
    /// One identity-ordered state per (split, session count).
    pub fn new(sizes: impl IntoIterator<Item = (Split, usize)>) -> Self {
        let states = sizes
            .into_iter()
            .map(|(split, n)| (split, IndexState::new(n)))
            .collect();
        Self { states }
    }

    pub fn state(&self, split: Split) -> Result<&IndexState> {
        self.states
            .get(&split)
            .ok_or_else(|| Error::UnknownSplit(split.to_string()))
    }

    fn state_mut(&mut self, split: Split) -> Result<&mut IndexState> {
        self.states
            .get_mut(&split)
            .ok_or_else(|| Error::UnknownSplit(split.to_string()))
    }

    /// Start a new epoch on `split`.
    ///
    /// `batch_size = None` reuses the previously configured size.
    pub fn restart<R: Rng + ?Sized>(
        &mut self,
        split:      Split,
        batch_size: Option<usize>,
        shuffle:    bool,
        rng:        &mut R,
    ) -> Result<()> {
        let state = self.state_mut(split)?;

        let batch_size = batch_size
            .or(state.batch_size)
            .ok_or(Error::MissingBatchSize(split))?;
        if batch_size == 0 {
            return Err(Error::ZeroBatchSize(split));
        }

        if shuffle {
            state.index = (0..state.index.len()).collect();
            state.index.shuffle(rng);
        }
        state.batch_size = Some(batch_size);
        state.cursor     = 0;

        tracing::debug!(
            "Restarted split '{}': {} records, batch_size={}, shuffle={}",
            split,
            state.index.len(),
            batch_size,
            shuffle,
        );
        Ok(())
    }

    /// Record indices of the next batch, or None at the end of the epoch.
    pub fn next_indices(
        &mut self,
        split:               Split,
        ignore_left_samples: bool,
    ) -> Result<Option<Vec<usize>>> {
        let state = self.state_mut(split)?;
        let batch_size = state.batch_size.ok_or(Error::NotStarted(split))?;

        let remaining = state.remaining();
        if remaining == 0 || (remaining < batch_size && ignore_left_samples) {
            tracing::debug!(
                "Epoch over on split '{}' ({} records left unread)",
                split,
                remaining,
            );
            return Ok(None);
        }

        let take  = batch_size.min(remaining);
        let start = state.cursor;
        state.cursor += take;

        Ok(Some(state.index[start..start + take].to_vec()))
    }
}
