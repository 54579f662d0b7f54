// ============================================================
// Domain Layer
// ============================================================
// Plain Rust types that describe a dialog corpus:
//
//   split.rs    — the closed set of corpus partitions
//                 (train / dev / test)
//   session.rs  — sessions, sentences and the five
//                 special tokens every vocabulary starts with
//   traits.rs   — the seams to external collaborators:
//                 corpus sources and metric pipelines
//
// Rules for this layer:
//   - NO burn types
//   - NO file I/O
//   - Only structs, enums, constants and traits

/// Named corpus partitions
pub mod split;

/// Sessions, sentences and special token ids
pub mod session;

/// Corpus source and metric abstractions
pub mod traits;
