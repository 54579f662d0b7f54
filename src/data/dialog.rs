// ============================================================
// Data — MultiTurnDialog
// ============================================================
// The dataset object. Owns:
//
//   Vocabulary      shared read-only (Arc) with converters
//                   and metric pipelines
//   SessionStore    read-only sessions per split
//   BatchIndexer    per-split permutation, batch size, cursor
//   StdRng          shuffle source, seeded from config
//
// Public operations validate the split first and return
// Error::UnknownSplit for any split the corpus did not load.
//
// Typical epoch:
//
//   dialog.restart(Split::Train, Some(32), true)?;
//   while let Some(batch) = dialog.get_next_batch(Split::Train, false)? {
//       model.step(&batch);
//   }

use std::sync::Arc;

use rand::{rngs::StdRng, SeedableRng};

use crate::data::{
    assembler::{BatchAssembler, DialogBatch},
    converter::SentenceConverter,
    indexer::{BatchIndexer, IndexState},
    store::{SessionStore, SplitDataset},
    vocab::Vocabulary,
};
use crate::domain::{
    session::{Session, SpecialIds},
    split::Split,
    traits::CorpusSource,
};
use crate::error::{Error, Result};
use crate::metric::{chain::MetricChain, factory::MetricFactory};

/// A multi-turn dialog corpus with resumable per-split iteration.
#[derive(Debug)]
pub struct MultiTurnDialog {
    vocab:     Arc<Vocabulary>,
    store:     SessionStore,
    indexer:   BatchIndexer,
    assembler: BatchAssembler,
    converter: SentenceConverter,
    rng:       StdRng,
}

impl MultiTurnDialog {
    /// Load a corpus from any source. `seed = None` draws shuffle
    /// randomness from the OS.
    pub fn from_source<S: CorpusSource + ?Sized>(source: &S, seed: Option<u64>) -> Result<Self> {
        let data  = source.load()?;
        let vocab = Arc::new(Vocabulary::new(data.vocab_list)?);
        let store = SessionStore::new(data.sessions);

        let sizes: Vec<(Split, usize)> = store
            .splits()
            .map(|split| store.len(split).map(|n| (split, n)))
            .collect::<Result<_>>()?;
        let indexer = BatchIndexer::new(sizes.iter().copied());

        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None       => StdRng::from_entropy(),
        };

        tracing::info!(
            "Loaded dialog corpus: vocab_size={}, splits={:?}",
            vocab.vocab_size(),
            sizes,
        );

        Ok(Self {
            converter: SentenceConverter::new(Arc::clone(&vocab)),
            vocab,
            store,
            indexer,
            assembler: BatchAssembler::new(),
            rng,
        })
    }

    // ─── Vocabulary ──────────────────────────────────────────────────────────

    pub fn vocab(&self) -> &Vocabulary {
        &self.vocab
    }

    /// Shared handle to the vocabulary
    pub fn vocab_handle(&self) -> Arc<Vocabulary> {
        Arc::clone(&self.vocab)
    }

    pub fn vocab_size(&self) -> usize {
        self.vocab.vocab_size()
    }

    pub fn special_ids(&self) -> SpecialIds {
        self.vocab.special_ids()
    }

    // ─── Splits and sessions ─────────────────────────────────────────────────

    /// Splits this corpus was loaded with
    pub fn splits(&self) -> Vec<Split> {
        self.store.splits().collect()
    }

    pub fn sessions(&self, split: Split) -> Result<&[Session]> {
        self.store.sessions(split)
    }

    pub fn split_len(&self, split: Split) -> Result<usize> {
        self.store.len(split)
    }

    /// burn Dataset view over one split
    pub fn dataset(&self, split: Split) -> Result<SplitDataset> {
        self.store.dataset(split)
    }

    // ─── Iteration state ─────────────────────────────────────────────────────

    pub fn index_state(&self, split: Split) -> Result<&IndexState> {
        self.indexer.state(split)
    }

    /// Current record order of a split
    pub fn index(&self, split: Split) -> Result<&[usize]> {
        Ok(self.indexer.state(split)?.index())
    }

    pub fn batch_size(&self, split: Split) -> Result<Option<usize>> {
        Ok(self.indexer.state(split)?.batch_size())
    }

    /// Position of the next unread entry in `index(split)`
    pub fn cursor(&self, split: Split) -> Result<usize> {
        Ok(self.indexer.state(split)?.cursor())
    }

    /// Start a new epoch on `split`. See BatchIndexer::restart.
    pub fn restart(&mut self, split: Split, batch_size: Option<usize>, shuffle: bool) -> Result<()> {
        self.indexer.restart(split, batch_size, shuffle, &mut self.rng)
    }

    /// Assemble the sessions at the given record indices.
    /// Does not touch the iteration cursor.
    pub fn get_batch(&self, split: Split, indices: &[usize]) -> Result<DialogBatch> {
        let sessions = self.store.sessions(split)?;
        let len = sessions.len();
        if let Some(&index) = indices.iter().find(|&&i| i >= len) {
            return Err(Error::IndexOutOfRange { split, index, len });
        }
        Ok(self.assembler.assemble(indices.iter().map(|&i| &sessions[i])))
    }

    /// Next batch of the current epoch, or None once it is exhausted.
    ///
    /// With `ignore_left_samples` a trailing batch smaller than the
    /// batch size is dropped instead of returned.
    pub fn get_next_batch(&mut self, split: Split, ignore_left_samples: bool) -> Result<Option<DialogBatch>> {
        match self.indexer.next_indices(split, ignore_left_samples)? {
            Some(indices) => self.get_batch(split, &indices).map(Some),
            None          => Ok(None),
        }
    }

    // ─── Conversion ──────────────────────────────────────────────────────────

    pub fn converter(&self) -> &SentenceConverter {
        &self.converter
    }

    pub fn token_to_index<S: AsRef<str>>(&self, tokens: &[S]) -> Vec<usize> {
        self.converter.token_to_index(tokens)
    }

    pub fn index_to_token(&self, ids: &[usize], trim: bool) -> Vec<String> {
        self.converter.index_to_token(ids, trim)
    }

    pub fn multi_turn_token_to_index<S: AsRef<str>>(&self, turns: &[Vec<S>]) -> Vec<Vec<usize>> {
        self.converter.multi_turn_token_to_index(turns)
    }

    pub fn multi_turn_index_to_token(&self, turns: &[Vec<usize>], trim: bool) -> Vec<Vec<String>> {
        self.converter.multi_turn_index_to_token(turns, trim)
    }

    // ─── Metrics ─────────────────────────────────────────────────────────────

    pub fn metric_factory(&self) -> MetricFactory {
        MetricFactory::new(self.vocab_handle())
    }

    /// Metric pipeline for teacher-forcing evaluation (perplexity)
    pub fn teacher_forcing_metric(&self) -> MetricChain {
        self.metric_factory().build_teacher_forcing_metric()
    }

    /// Metric pipeline for free-running generation (BLEU + recorder)
    pub fn inference_metric(&self) -> MetricChain {
        self.metric_factory().build_inference_metric()
    }
}
