// ============================================================
// Data — Batch Assembler
// ============================================================
// Turns a list of variable-length sessions into one dense,
// padded 3D array plus the true lengths of everything in it.
//
//   Input (2 sessions):
//     s0: [[2, 7, 4], [2, 9, 9, 4]]
//     s1: [[2, 4]]
//
//   Output:
//     turn_length: [2, 1]
//     sent_length: [[3, 4], [2]]
//     sent (shape [2, 2, 4]):
//       [[[2, 7, 4, 0], [2, 9, 9, 4]],
//        [[2, 4, 0, 0], [0, 0, 0, 0]]]
//
// Padding is sized per batch, not to a corpus-wide maximum,
// so short batches stay small.
//
// Two passes:
//   1. measure every session and sentence, find the maxima
//   2. copy ids into a buffer pre-filled with <pad>

use ndarray::Array3;

use crate::domain::session::{Session, PAD_ID};

/// A padded batch of sessions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogBatch {
    /// Number of turns in each session — shape: [batch]
    pub turn_length: Vec<usize>,

    /// Length of every turn in each session — shape: [batch][turns]
    pub sent_length: Vec<Vec<usize>>,

    /// Token ids — shape: [batch, max_turns, max_sent_len]
    pub sent: Array3<usize>,
}

impl DialogBatch {
    /// Number of sessions in the batch
    pub fn len(&self) -> usize {
        self.turn_length.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turn_length.is_empty()
    }

    /// Number of real (non-padding) positions
    pub fn token_count(&self) -> usize {
        self.sent_length.iter().flatten().sum()
    }

    /// Fraction of `sent` that is padding, 0.0 for an empty batch
    pub fn padding_ratio(&self) -> f64 {
        let total = self.sent.len();
        if total == 0 {
            return 0.0;
        }
        1.0 - self.token_count() as f64 / total as f64
    }
}

/// Stateless builder of padded dialog batches.
#[derive(Debug, Clone, Copy, Default)]
pub struct BatchAssembler;

impl BatchAssembler {
    pub fn new() -> Self {
        Self
    }

    /// Assemble the given sessions, in order, into one padded batch.
    pub fn assemble<'a, I>(&self, sessions: I) -> DialogBatch
    where
        I: IntoIterator<Item = &'a Session>,
    {
        let sessions: Vec<&Session> = sessions.into_iter().collect();

        // ── Pass 1: measure ──────────────────────────────────────────────────
        let turn_length: Vec<usize> = sessions.iter().map(|s| s.len()).collect();
        let sent_length: Vec<Vec<usize>> = sessions
            .iter()
            .map(|s| s.iter().map(|sent| sent.len()).collect())
            .collect();

        let max_turns = turn_length.iter().copied().max().unwrap_or(0);
        let max_len   = sent_length.iter().flatten().copied().max().unwrap_or(0);

        // ── Pass 2: fill ─────────────────────────────────────────────────────
        let mut sent = Array3::from_elem((sessions.len(), max_turns, max_len), PAD_ID);
        for (b, session) in sessions.iter().enumerate() {
            for (t, sentence) in session.iter().enumerate() {
                for (i, &id) in sentence.iter().enumerate() {
                    sent[[b, t, i]] = id;
                }
            }
        }

        DialogBatch { turn_length, sent_length, sent }
    }
}
