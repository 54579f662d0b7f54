// ============================================================
// Infrastructure Layer
// ============================================================
// Cross-cutting concerns that touch the filesystem but are
// not part of the dataloader itself:
//
//   config_store.rs — saves and loads corpus_config.json so a
//                     run can be repeated with the same corpus
//                     settings and shuffle seed
//
//   metrics.rs      — appends per-epoch iteration statistics
//                     (batches, samples, padding) to a CSV
//                     file for later inspection

/// Corpus configuration persistence
pub mod config_store;

/// Epoch statistics CSV logger
pub mod metrics;
