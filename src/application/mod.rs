// ============================================================
// Application / Use Cases
// ============================================================
// Workflows built on top of the dataloader. Each use case
// loads a corpus from a CorpusConfig and drives the public
// MultiTurnDialog API; none of them contain batching logic
// of their own.
//
//   corpus_config.rs  — corpus location, vocabulary and
//                       truncation settings, shuffle seed
//   stats_use_case.rs — iterate one epoch of a split and
//                       summarise the batches it produced
//   show_use_case.rs  — decode stored sessions back to text

pub mod corpus_config;

pub mod stats_use_case;

pub mod show_use_case;
