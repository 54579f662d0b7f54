// ============================================================
// Metric — Multi-Turn Corpus BLEU
// ============================================================
// Inference metric. Every real turn is one (reference,
// candidate) pair:
//
//   reference = sent[b, t] without its <go> and <eot>
//   candidate = gen[b][t] cut at the first <eos> or <eot>,
//               with a leading <go> dropped
//
// Corpus BLEU-4 (Papineni et al., 2002) pools clipped n-gram
// matches over all pairs before taking the geometric mean,
// then applies the brevity penalty:
//
//   BLEU = BP · exp( Σ_n ¼ · ln(matches_n / total_n) )
//   BP   = 1                 if c > r
//          exp(1 - r / c)    otherwise
//
// Any n-gram order with zero matches gives BLEU = 0.

use std::collections::HashMap;

use crate::domain::session::SpecialIds;
use crate::error::{Error, Result};
use crate::metric::{Metric, MetricData, MetricOutput};

const NAME: &str = "multi_turn_bleu_corpus";
const MAX_ORDER: usize = 4;

/// Pools n-gram statistics across batches.
#[derive(Debug, Clone)]
pub struct MultiTurnBleuCorpusMetric {
    special_ids: SpecialIds,
    matches:     [usize; MAX_ORDER],
    totals:      [usize; MAX_ORDER],
    ref_len:     usize,
    cand_len:    usize,
    pairs:       usize,
}

impl MultiTurnBleuCorpusMetric {
    pub fn new(special_ids: SpecialIds) -> Self {
        Self {
            special_ids,
            matches:  [0; MAX_ORDER],
            totals:   [0; MAX_ORDER],
            ref_len:  0,
            cand_len: 0,
            pairs:    0,
        }
    }

    /// Generated ids up to the first sentence/turn end, without <go>.
    fn candidate<'a>(&self, gen: &'a [usize]) -> &'a [usize] {
        let gen = match gen.first() {
            Some(&id) if id == self.special_ids.go => &gen[1..],
            _ => gen,
        };
        let end = gen
            .iter()
            .position(|&id| id == self.special_ids.eos || id == self.special_ids.eot)
            .unwrap_or(gen.len());
        &gen[..end]
    }

    fn add_pair(&mut self, reference: &[usize], candidate: &[usize]) {
        self.ref_len  += reference.len();
        self.cand_len += candidate.len();
        self.pairs    += 1;

        for n in 1..=MAX_ORDER {
            let ref_counts = ngram_counts(reference, n);
            for (gram, count) in ngram_counts(candidate, n) {
                let clip = ref_counts.get(gram).copied().unwrap_or(0);
                self.matches[n - 1] += count.min(clip);
            }
            self.totals[n - 1] += candidate.len().saturating_sub(n - 1);
        }
    }

    fn score(&self) -> f64 {
        if self.cand_len == 0 || self.matches.iter().any(|&m| m == 0) {
            return 0.0;
        }
        let log_precision: f64 = self
            .matches
            .iter()
            .zip(self.totals.iter())
            .map(|(&m, &t)| (m as f64 / t as f64).ln() / MAX_ORDER as f64)
            .sum();

        let brevity = if self.cand_len > self.ref_len {
            1.0
        } else {
            (1.0 - self.ref_len as f64 / self.cand_len as f64).exp()
        };
        brevity * log_precision.exp()
    }
}

fn ngram_counts(ids: &[usize], n: usize) -> HashMap<&[usize], usize> {
    let mut counts = HashMap::new();
    if n == 0 || ids.len() < n {
        return counts;
    }
    for gram in ids.windows(n) {
        *counts.entry(gram).or_insert(0) += 1;
    }
    counts
}

impl Metric for MultiTurnBleuCorpusMetric {
    fn name(&self) -> &'static str {
        NAME
    }

    fn forward(&mut self, data: &MetricData) -> Result<()> {
        let gen = data
            .gen
            .as_ref()
            .ok_or(Error::MissingMetricField { metric: NAME, field: "gen" })?;
        if gen.len() != data.batch_len() {
            return Err(Error::ShapeMismatch {
                metric: NAME,
                reason: format!("{} generated sessions for a batch of {}", gen.len(), data.batch_len()),
            });
        }

        for (b, session) in gen.iter().enumerate() {
            let turns = data.turn_length[b];
            if session.len() < turns {
                return Err(Error::ShapeMismatch {
                    metric: NAME,
                    reason: format!("session {b} has {turns} turns but {} were generated", session.len()),
                });
            }
            for t in 0..turns {
                let reference = data.reference(b, t);
                let candidate = self.candidate(&session[t]);
                self.add_pair(&reference, candidate);
            }
        }
        Ok(())
    }

    fn close(&mut self) -> Result<MetricOutput> {
        if self.pairs == 0 {
            return Err(Error::EmptyMetric(NAME));
        }
        let mut out = MetricOutput::new();
        out.insert("bleu".to_string(), self.score().into());
        out.insert("turn_count".to_string(), self.pairs.into());
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::assembler::BatchAssembler;

    fn data(gen: Vec<Vec<Vec<usize>>>) -> MetricData {
        let s0 = vec![vec![2, 5, 6, 7, 8, 9, 4]];
        let s1 = vec![vec![2, 10, 11, 12, 13, 4]];
        MetricData::from(BatchAssembler::new().assemble([&s0, &s1])).with_gen(gen)
    }

    #[test]
    fn test_perfect_generation_scores_one() {
        let mut metric = MultiTurnBleuCorpusMetric::new(SpecialIds::default());
        metric
            .forward(&data(vec![vec![vec![2, 5, 6, 7, 8, 9, 3, 0]], vec![vec![10, 11, 12, 13, 4]]]))
            .unwrap();
        let out = metric.close().unwrap();
        assert!((out["bleu"].as_f64().unwrap() - 1.0).abs() < 1e-9);
        assert_eq!(out["turn_count"], 2);
    }

    #[test]
    fn test_unrelated_generation_scores_zero() {
        let mut metric = MultiTurnBleuCorpusMetric::new(SpecialIds::default());
        metric.forward(&data(vec![vec![vec![20, 21, 22]], vec![vec![23, 24]]])).unwrap();
        assert_eq!(metric.close().unwrap()["bleu"].as_f64(), Some(0.0));
    }

    #[test]
    fn test_short_generation_is_penalised() {
        let mut metric = MultiTurnBleuCorpusMetric::new(SpecialIds::default());
        metric
            .forward(&data(vec![vec![vec![5, 6, 7, 8]], vec![vec![10, 11, 12, 13]]]))
            .unwrap();
        let bleu = metric.close().unwrap()["bleu"].as_f64().unwrap();
        // all n-grams match, 8 candidate tokens against 9 reference tokens
        assert!((bleu - (1.0f64 - 9.0 / 8.0).exp()).abs() < 1e-9);
    }

    #[test]
    fn test_missing_turns_rejected() {
        let mut metric = MultiTurnBleuCorpusMetric::new(SpecialIds::default());
        let err = metric.forward(&data(vec![vec![], vec![vec![10]]])).unwrap_err();
        assert!(matches!(err, Error::ShapeMismatch { .. }));
    }

    #[test]
    fn test_ngram_counts() {
        let counts = ngram_counts(&[1, 2, 1, 2], 2);
        assert_eq!(counts[&[1, 2][..]], 2);
        assert_eq!(counts[&[2, 1][..]], 1);
        assert!(ngram_counts(&[1], 2).is_empty());
    }
}
