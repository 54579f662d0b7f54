// ============================================================
// Metric — MetricFactory
// ============================================================
// Builds ready-to-use metric pipelines for one corpus. The
// pipelines need the corpus's special ids (to skip padding
// and find turn markers) and its vocabulary (to decode ids
// back to text), so the factory holds a shared handle to it.
//
//   teacher forcing → [perplexity]
//   inference       → [corpus BLEU, dialog recorder]

use std::sync::Arc;

use crate::data::vocab::Vocabulary;
use crate::metric::{
    bleu::MultiTurnBleuCorpusMetric,
    chain::MetricChain,
    perplexity::MultiTurnPerplexityMetric,
    recorder::MultiTurnDialogRecorder,
};

#[derive(Debug, Clone)]
pub struct MetricFactory {
    vocab: Arc<Vocabulary>,
}

impl MetricFactory {
    pub fn new(vocab: Arc<Vocabulary>) -> Self {
        Self { vocab }
    }

    pub fn build_teacher_forcing_metric(&self) -> MetricChain {
        let mut chain = MetricChain::new();
        chain.add_metric(MultiTurnPerplexityMetric::new(
            self.vocab.vocab_size(),
            self.vocab.special_ids(),
        ));
        chain
    }

    pub fn build_inference_metric(&self) -> MetricChain {
        let mut chain = MetricChain::new();
        chain
            .add_metric(MultiTurnBleuCorpusMetric::new(self.vocab.special_ids()))
            .add_metric(MultiTurnDialogRecorder::new(Arc::clone(&self.vocab)));
        chain
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipelines_hold_expected_metrics() {
        let factory = MetricFactory::new(Arc::new(Vocabulary::specials_only()));
        assert_eq!(factory.build_teacher_forcing_metric().names(), vec!["multi_turn_perplexity"]);
        assert_eq!(
            factory.build_inference_metric().names(),
            vec!["multi_turn_bleu_corpus", "multi_turn_dialog_recorder"]
        );
    }
}
