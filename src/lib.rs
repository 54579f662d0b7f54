//! Dataset-iteration core for multi-turn dialog corpora.
//!
//! Loads tokenised sessions once, then hands them out as padded
//! `[batch, turns, length]` batches with per-split shuffle, restart
//! and cursor state:
//!
//! ```no_run
//! use dialog_loader::{data::{dialog::MultiTurnDialog, ubuntu::UbuntuCorpus}, domain::split::Split};
//!
//! # fn main() -> dialog_loader::error::Result<()> {
//! let mut dialog = MultiTurnDialog::from_source(&UbuntuCorpus::new("data/ubuntu"), Some(42))?;
//! dialog.restart(Split::Train, Some(32), true)?;
//! while let Some(batch) = dialog.get_next_batch(Split::Train, false)? {
//!     println!("{:?}", batch.sent.dim());
//! }
//! # Ok(())
//! # }
//! ```

pub mod application;
pub mod data;
pub mod domain;
pub mod error;
pub mod infra;
pub mod metric;

pub use data::{assembler::DialogBatch, dialog::MultiTurnDialog, vocab::Vocabulary};
pub use domain::split::Split;
pub use error::{Error, Result};
