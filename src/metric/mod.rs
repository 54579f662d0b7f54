// ============================================================
// Metric Pipelines
// ============================================================
// Evaluation metrics consume the same batches the dataloader
// produces, plus whatever the model generated for them:
//
//   MetricData
//     turn_length, sent_length, sent   ← from DialogBatch
//     gen_log_prob                     ← teacher forcing output
//     gen                              ← free-running output
//
// Every metric follows the same two-step contract:
//
//   forward(&data)   accumulate statistics for one batch
//   close()          aggregate into a MetricOutput map
//
// MetricFactory wires the right metrics together for each
// evaluation mode, bound to one corpus's vocabulary.

use std::collections::BTreeMap;

use ndarray::{Array3, Array4};

use crate::data::assembler::DialogBatch;
use crate::error::Result;

/// Composite of several metrics
pub mod chain;

/// Builds pipelines bound to a vocabulary
pub mod factory;

/// Multi-turn perplexity (teacher forcing)
pub mod perplexity;

/// Multi-turn corpus BLEU (inference)
pub mod bleu;

/// Decodes references and generations to text
pub mod recorder;

/// Aggregated metric results, keyed by metric field name
pub type MetricOutput = BTreeMap<String, serde_json::Value>;

/// One batch of evaluation data.
#[derive(Debug, Clone)]
pub struct MetricData {
    /// Turns per session — shape: [batch]
    pub turn_length: Vec<usize>,

    /// Sentence lengths — shape: [batch][turns]
    pub sent_length: Vec<Vec<usize>>,

    /// Reference ids — shape: [batch, max_turns, max_sent_len]
    pub sent: Array3<usize>,

    /// Log-probabilities of every next token given the reference prefix —
    /// shape: [batch, max_turns, max_sent_len - 1, vocab_size]
    pub gen_log_prob: Option<Array4<f32>>,

    /// Generated ids — shape: [batch][turns][len]
    pub gen: Option<Vec<Vec<Vec<usize>>>>,
}

impl MetricData {
    pub fn with_gen_log_prob(mut self, gen_log_prob: Array4<f32>) -> Self {
        self.gen_log_prob = Some(gen_log_prob);
        self
    }

    pub fn with_gen(mut self, gen: Vec<Vec<Vec<usize>>>) -> Self {
        self.gen = Some(gen);
        self
    }

    pub fn batch_len(&self) -> usize {
        self.turn_length.len()
    }

    /// Reference turn `t` of session `b` with its <go> and <eot> stripped.
    pub(crate) fn reference(&self, b: usize, t: usize) -> Vec<usize> {
        let len = self.sent_length[b][t];
        (1..len.saturating_sub(1)).map(|j| self.sent[[b, t, j]]).collect()
    }
}

impl From<DialogBatch> for MetricData {
    fn from(batch: DialogBatch) -> Self {
        Self {
            turn_length:  batch.turn_length,
            sent_length:  batch.sent_length,
            sent:         batch.sent,
            gen_log_prob: None,
            gen:          None,
        }
    }
}

/// An accumulating evaluation metric.
pub trait Metric: Send {
    /// Short name, used in error messages
    fn name(&self) -> &'static str;

    /// Accumulate statistics from one batch.
    fn forward(&mut self, data: &MetricData) -> Result<()>;

    /// Aggregate everything seen so far.
    fn close(&mut self) -> Result<MetricOutput>;
}
