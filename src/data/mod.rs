// ============================================================
// Data Pipeline
// ============================================================
// Everything between a tokenised corpus and a padded batch.
//
//   CorpusSource (ubuntu.rs, or any other)
//       │  vocab list + sessions of ids
//       ▼
//   Vocabulary    + SessionStore     → loaded once, read-only
//       │                │
//       │                ▼
//       │          BatchIndexer      → per-split order, batch size, cursor
//       │                │  record indices
//       │                ▼
//       │          BatchAssembler    → padded [batch, turns, len] array
//       │                │
//       │                ▼
//       │          DialogBatcher     → burn tensors
//       ▼
//   SentenceConverter                → ids ↔ tokens, trimming
//
// MultiTurnDialog (dialog.rs) owns all of it and is the
// only type most callers need.

/// Token ↔ id mapping with the fixed special prefix
pub mod vocab;

/// Read-only per-split sessions, burn Dataset view
pub mod store;

/// Per-split shuffle / restart / cursor state
pub mod indexer;

/// Padded dense batch construction
pub mod assembler;

/// burn tensor conversion and Batcher implementation
pub mod batcher;

/// Id ↔ text conversion with turn trimming
pub mod converter;

/// The dataset object tying the pipeline together
pub mod dialog;

/// Ubuntu Dialogue Corpus source
pub mod ubuntu;
