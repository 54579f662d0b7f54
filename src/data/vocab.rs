// ============================================================
// Data — Vocabulary
// ============================================================
// Owns the ordered token list and its inverse mapping.
//
//   vocab_list: ["<pad>", "<unk>", "<go>", "<eos>", "<eot>", "hello", ...]
//   word2id:    {"<pad>": 0, "<unk>": 1, ..., "hello": 5, ...}
//
// word2id is always the exact inverse of vocab_list, which is
// why construction rejects duplicate tokens: a duplicate would
// leave two ids pointing at one token.
//
// Lookups never fail for tokens (unknown → <unk>), but an id
// past the end of the list is a programming error and panics.

use std::collections::HashMap;

use crate::domain::session::{SpecialIds, SPECIAL_TOKENS, UNK_ID};
use crate::error::{Error, Result};

/// Immutable token ↔ id mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    vocab_list: Vec<String>,
    word2id:    HashMap<String, usize>,
}

impl Vocabulary {
    /// Build a vocabulary from an ordered token list.
    ///
    /// The list must start with the five special tokens and must not
    /// contain duplicates.
    pub fn new(vocab_list: Vec<String>) -> Result<Self> {
        let prefix_ok = vocab_list.len() >= SPECIAL_TOKENS.len()
            && vocab_list
                .iter()
                .zip(SPECIAL_TOKENS.iter())
                .all(|(have, want)| have == want);
        if !prefix_ok {
            return Err(Error::InvalidVocabulary {
                reason: format!("vocabulary must start with {:?}", SPECIAL_TOKENS),
            });
        }

        let mut word2id = HashMap::with_capacity(vocab_list.len());
        for (id, word) in vocab_list.iter().enumerate() {
            if word2id.insert(word.clone(), id).is_some() {
                return Err(Error::InvalidVocabulary {
                    reason: format!("duplicate token '{word}'"),
                });
            }
        }

        Ok(Self { vocab_list, word2id })
    }

    /// A vocabulary holding only the special tokens.
    pub fn specials_only() -> Self {
        let vocab_list: Vec<String> = SPECIAL_TOKENS.iter().map(|s| s.to_string()).collect();
        let word2id = vocab_list
            .iter()
            .enumerate()
            .map(|(id, word)| (word.clone(), id))
            .collect();
        Self { vocab_list, word2id }
    }

    /// Map a token to its id, falling back to <unk>.
    pub fn token_to_id(&self, token: &str) -> usize {
        self.word2id.get(token).copied().unwrap_or(UNK_ID)
    }

    /// Map an id back to its token.
    ///
    /// # Panics
    /// If `id >= vocab_size()`.
    pub fn id_to_token(&self, id: usize) -> &str {
        &self.vocab_list[id]
    }

    pub fn vocab_size(&self) -> usize {
        self.vocab_list.len()
    }

    pub fn vocab_list(&self) -> &[String] {
        &self.vocab_list
    }

    pub fn word2id(&self) -> &HashMap<String, usize> {
        &self.word2id
    }

    /// The five reserved tokens, in id order
    pub fn ext_vocab(&self) -> &[String] {
        &self.vocab_list[..SPECIAL_TOKENS.len()]
    }

    pub fn special_ids(&self) -> SpecialIds {
        SpecialIds::default()
    }
}
