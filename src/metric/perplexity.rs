// ============================================================
// Metric — Multi-Turn Perplexity
// ============================================================
// Teacher-forcing metric. For every real token after <go> in
// every real turn, look up the log-probability the model gave
// it and average:
//
//   perplexity = exp( -(1/N) · Σ log p(token | prefix) )
//
// gen_log_prob[b, t, j - 1, :] is the distribution over the
// token at position j of turn t in session b. Padding turns
// and padding positions are never scored.

use crate::domain::session::SpecialIds;
use crate::error::{Error, Result};
use crate::metric::{Metric, MetricData, MetricOutput};

const NAME: &str = "multi_turn_perplexity";

/// Accumulates token log-likelihood across batches.
#[derive(Debug, Clone)]
pub struct MultiTurnPerplexityMetric {
    vocab_size:  usize,
    special_ids: SpecialIds,
    log_prob:    f64,
    word_count:  usize,
}

impl MultiTurnPerplexityMetric {
    pub fn new(vocab_size: usize, special_ids: SpecialIds) -> Self {
        Self { vocab_size, special_ids, log_prob: 0.0, word_count: 0 }
    }
}

impl Metric for MultiTurnPerplexityMetric {
    fn name(&self) -> &'static str {
        NAME
    }

    fn forward(&mut self, data: &MetricData) -> Result<()> {
        let gen_log_prob = data
            .gen_log_prob
            .as_ref()
            .ok_or(Error::MissingMetricField { metric: NAME, field: "gen_log_prob" })?;

        let (batch, turns, len) = data.sent.dim();
        let (g_batch, g_turns, g_len, g_vocab) = gen_log_prob.dim();
        if g_batch != batch || g_turns < turns || g_len + 1 < len || g_vocab != self.vocab_size {
            return Err(Error::ShapeMismatch {
                metric: NAME,
                reason: format!(
                    "sent is {:?} but gen_log_prob is {:?} (vocab_size {})",
                    (batch, turns, len),
                    (g_batch, g_turns, g_len, g_vocab),
                    self.vocab_size,
                ),
            });
        }

        for b in 0..batch {
            for t in 0..data.turn_length[b] {
                for j in 1..data.sent_length[b][t] {
                    let target = data.sent[[b, t, j]];
                    if target == self.special_ids.pad {
                        continue;
                    }
                    self.log_prob   += f64::from(gen_log_prob[[b, t, j - 1, target]]);
                    self.word_count += 1;
                }
            }
        }
        Ok(())
    }

    fn close(&mut self) -> Result<MetricOutput> {
        if self.word_count == 0 {
            return Err(Error::EmptyMetric(NAME));
        }
        let perplexity = (-self.log_prob / self.word_count as f64).exp();

        let mut out = MetricOutput::new();
        out.insert("perplexity".to_string(), perplexity.into());
        out.insert("word_count".to_string(), self.word_count.into());
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::assembler::BatchAssembler;
    use ndarray::Array4;

    fn uniform_data(vocab_size: usize) -> MetricData {
        let s0 = vec![vec![2, 5, 6, 4]];
        let s1 = vec![vec![2, 4], vec![2, 5, 4]];
        let batch = BatchAssembler::new().assemble([&s0, &s1]);
        let (b, t, l) = batch.sent.dim();
        let log_p = -(vocab_size as f32).ln();
        MetricData::from(batch).with_gen_log_prob(Array4::from_elem((b, t, l - 1, vocab_size), log_p))
    }

    #[test]
    fn test_uniform_model_has_vocab_size_perplexity() {
        let mut metric = MultiTurnPerplexityMetric::new(8, SpecialIds::default());
        metric.forward(&uniform_data(8)).unwrap();
        let out = metric.close().unwrap();

        let ppl = out["perplexity"].as_f64().unwrap();
        assert!((ppl - 8.0).abs() < 1e-4);
        // 3 + 1 + 2 scored tokens
        assert_eq!(out["word_count"], 6);
    }

    #[test]
    fn test_missing_log_prob_is_an_error() {
        let mut metric = MultiTurnPerplexityMetric::new(8, SpecialIds::default());
        let mut data = uniform_data(8);
        data.gen_log_prob = None;
        assert!(matches!(metric.forward(&data), Err(Error::MissingMetricField { .. })));
    }

    #[test]
    fn test_vocab_mismatch_is_an_error() {
        let mut metric = MultiTurnPerplexityMetric::new(9, SpecialIds::default());
        assert!(matches!(metric.forward(&uniform_data(8)), Err(Error::ShapeMismatch { .. })));
    }

    #[test]
    fn test_close_without_data() {
        let mut metric = MultiTurnPerplexityMetric::new(8, SpecialIds::default());
        assert!(matches!(metric.close(), Err(Error::EmptyMetric(_))));
    }
}
