// ============================================================
// Data — Sentence Converter
// ============================================================
// Token ↔ id conversion for single sentences and for whole
// sessions, with optional trimming of generated output.
//
// Trimming a sentence keeps everything up to and including
// the first <eos>:
//
//   [<pad> <unk> <go> <eos> <pad> <eot> <unk>]  →  [<pad> <unk> <go> <eos>]
//
// Trimming a session trims each turn in order, then stops at
// the first turn that still contains <eot>; that turn is cut
// just before its <eot> and becomes the last turn emitted:
//
//   [[.. <eos> .. <eot> ..], [<pad> <eot>], [..], [..]]
//     → [[.. <eos>], [<pad>]]
//
// The <eos> trim runs first, so an <eot> that follows an
// <eos> in the same turn never ends the session.

use std::sync::Arc;

use crate::data::vocab::Vocabulary;
use crate::domain::session::{EOS_ID, EOT_ID};

/// Stateless id/text converter bound to one vocabulary.
#[derive(Debug, Clone)]
pub struct SentenceConverter {
    vocab: Arc<Vocabulary>,
}

impl SentenceConverter {
    pub fn new(vocab: Arc<Vocabulary>) -> Self {
        Self { vocab }
    }

    pub fn vocab(&self) -> &Vocabulary {
        &self.vocab
    }

    // ─── Single sentence ─────────────────────────────────────────────────────

    /// Map tokens to ids, unknown tokens becoming <unk>.
    pub fn token_to_index<S: AsRef<str>>(&self, tokens: &[S]) -> Vec<usize> {
        tokens
            .iter()
            .map(|t| self.vocab.token_to_id(t.as_ref()))
            .collect()
    }

    /// Map ids to tokens, optionally trimming after the first <eos>.
    pub fn index_to_token(&self, ids: &[usize], trim: bool) -> Vec<String> {
        let ids = if trim { trim_index(ids) } else { ids };
        ids.iter()
            .map(|&id| self.vocab.id_to_token(id).to_string())
            .collect()
    }

    /// Like index_to_token, joined with single spaces
    pub fn index_to_text(&self, ids: &[usize], trim: bool) -> String {
        self.index_to_token(ids, trim).join(" ")
    }

    // ─── Whole session ───────────────────────────────────────────────────────

    pub fn multi_turn_token_to_index<S: AsRef<str>>(&self, turns: &[Vec<S>]) -> Vec<Vec<usize>> {
        turns.iter().map(|turn| self.token_to_index(turn)).collect()
    }

    pub fn multi_turn_index_to_token(&self, turns: &[Vec<usize>], trim: bool) -> Vec<Vec<String>> {
        if trim {
            multi_turn_trim_index(turns)
                .into_iter()
                .map(|turn| self.index_to_token(turn, false))
                .collect()
        } else {
            turns.iter().map(|turn| self.index_to_token(turn, false)).collect()
        }
    }
}

/// Prefix of `ids` up to and including the first <eos>, or all of it.
pub fn trim_index(ids: &[usize]) -> &[usize] {
    match ids.iter().position(|&id| id == EOS_ID) {
        Some(pos) => &ids[..=pos],
        None      => ids,
    }
}

/// Session-level trim: per-turn <eos> trim, then stop at the first
/// turn still holding an <eot> (cut before it).
pub fn multi_turn_trim_index(turns: &[Vec<usize>]) -> Vec<&[usize]> {
    let mut out = Vec::with_capacity(turns.len());
    for turn in turns {
        let trimmed = trim_index(turn);
        match trimmed.iter().position(|&id| id == EOT_ID) {
            Some(pos) => {
                out.push(&trimmed[..pos]);
                break;
            }
            None => out.push(trimmed),
        }
    }
    out
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn converter() -> SentenceConverter {
        SentenceConverter::new(Arc::new(Vocabulary::specials_only()))
    }

    fn strs(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_round_trip_specials() {
        let c = converter();
        assert_eq!(c.token_to_index(&["<pad>", "<unk>", "<go>"]), vec![0, 1, 2]);
        assert_eq!(c.index_to_token(&[0, 1, 2], true), strs(&["<pad>", "<unk>", "<go>"]));
    }

    #[test]
    fn test_unknown_words_become_unk() {
        let c = converter();
        let tokens = ["<unk>", "<go>", "<pad>", "<unknownword>", "<pad>", "<go>"];
        assert_eq!(c.token_to_index(&tokens), vec![1, 2, 0, 1, 0, 2]);
    }

    #[test]
    fn test_trim_keeps_first_eos() {
        let c = converter();
        let ids = [0, 1, 2, 3, 0, 4, 1, 0, 0];
        assert_eq!(c.index_to_token(&ids, true), strs(&["<pad>", "<unk>", "<go>", "<eos>"]));
        assert_eq!(
            c.index_to_token(&ids, false),
            strs(&["<pad>", "<unk>", "<go>", "<eos>", "<pad>", "<eot>", "<unk>", "<pad>", "<pad>"])
        );
    }

    #[test]
    fn test_trim_without_eos_is_identity() {
        assert_eq!(trim_index(&[2, 1, 4, 0]), &[2, 1, 4, 0]);
        assert_eq!(trim_index(&[]), &[] as &[usize]);
    }

    #[test]
    fn test_multi_turn_round_trip() {
        let c = converter();
        let ids = vec![vec![0, 1, 2], vec![2, 1, 0]];
        let tokens = vec![strs(&["<pad>", "<unk>", "<go>"]), strs(&["<go>", "<unk>", "<pad>"])];
        assert_eq!(c.multi_turn_index_to_token(&ids, true), tokens);
        assert_eq!(c.multi_turn_token_to_index(&tokens), ids);
    }

    #[test]
    fn test_multi_turn_unknown_words() {
        let c = converter();
        let tokens = vec![
            strs(&["<unk>", "<go>", "<pad>", "<unknownword>", "<pad>", "<go>"]),
            strs(&["<eos>", "<eot>"]),
        ];
        assert_eq!(c.multi_turn_token_to_index(&tokens), vec![vec![1, 2, 0, 1, 0, 2], vec![3, 4]]);
    }

    #[test]
    fn test_multi_turn_trim_stops_at_eot() {
        let c = converter();
        let ids = vec![vec![0, 1, 2, 3, 0, 4, 1, 0, 0], vec![0, 4], vec![1, 2, 3, 0], vec![1, 2, 3, 4]];

        assert_eq!(
            c.multi_turn_index_to_token(&ids, true),
            vec![strs(&["<pad>", "<unk>", "<go>", "<eos>"]), strs(&["<pad>"])]
        );
        assert_eq!(
            c.multi_turn_index_to_token(&ids, false),
            vec![
                strs(&["<pad>", "<unk>", "<go>", "<eos>", "<pad>", "<eot>", "<unk>", "<pad>", "<pad>"]),
                strs(&["<pad>", "<eot>"]),
                strs(&["<unk>", "<go>", "<eos>", "<pad>"]),
                strs(&["<unk>", "<go>", "<eos>", "<eot>"]),
            ]
        );
    }

    #[test]
    fn test_multi_turn_without_eot_keeps_every_turn() {
        let turns = vec![vec![2, 5, 3, 4], vec![2, 6]];
        assert_eq!(multi_turn_trim_index(&turns), vec![&[2, 5, 3][..], &[2, 6][..]]);
    }

    #[test]
    fn test_index_to_text() {
        assert_eq!(converter().index_to_text(&[2, 1, 3, 4], true), "<go> <unk> <eos>");
    }
}
