// ============================================================
// Application — Show Use Case
// ============================================================
// Decodes stored sessions back into readable turns. Handy
// for checking what the corpus source actually produced:
// truncation, <unk> rate and turn boundaries are all visible.

use anyhow::Result;

use crate::application::corpus_config::CorpusConfig;
use crate::data::dialog::MultiTurnDialog;
use crate::domain::split::Split;

/// One decoded session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShownSession {
    pub index: usize,
    pub turns: Vec<String>,
}

pub struct ShowUseCase {
    config: CorpusConfig,
}

impl ShowUseCase {
    pub fn new(config: CorpusConfig) -> Self {
        Self { config }
    }

    pub fn execute(&self, split: Split, indices: &[usize], trim: bool) -> Result<Vec<ShownSession>> {
        let dialog = self.config.load_dialog()?;
        show_sessions(&dialog, split, indices, trim)
    }
}

/// Decode the sessions at `indices`, one line of text per turn.
pub fn show_sessions(
    dialog:  &MultiTurnDialog,
    split:   Split,
    indices: &[usize],
    trim:    bool,
) -> Result<Vec<ShownSession>> {
    // get_batch validates every index up front
    dialog.get_batch(split, indices)?;
    let sessions = dialog.sessions(split)?;

    Ok(indices
        .iter()
        .map(|&index| ShownSession {
            index,
            turns: dialog
                .multi_turn_index_to_token(&sessions[index], trim)
                .into_iter()
                .map(|turn| turn.join(" "))
                .collect(),
        })
        .collect())
}
