// ============================================================
// Metric — Multi-Turn Dialog Recorder
// ============================================================
// Not a score: decodes every evaluated session to text so
// generations can be read next to their references.
//
//   reference: turns of `sent`, <go>/<eot> stripped
//   gen:       generated turns, session-trimmed
//
// Output:
//   { "reference": [[ "turn text", ... ], ...],
//     "gen":       [[ "turn text", ... ], ...] }

use std::sync::Arc;

use serde_json::json;

use crate::data::{converter::SentenceConverter, vocab::Vocabulary};
use crate::error::{Error, Result};
use crate::metric::{Metric, MetricData, MetricOutput};

const NAME: &str = "multi_turn_dialog_recorder";

/// Collects decoded references and generations.
#[derive(Debug, Clone)]
pub struct MultiTurnDialogRecorder {
    converter: SentenceConverter,
    reference: Vec<Vec<String>>,
    gen:       Vec<Vec<String>>,
}

impl MultiTurnDialogRecorder {
    pub fn new(vocab: Arc<Vocabulary>) -> Self {
        Self {
            converter: SentenceConverter::new(vocab),
            reference: Vec::new(),
            gen:       Vec::new(),
        }
    }
}

impl Metric for MultiTurnDialogRecorder {
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
            let reference = (0..data.turn_length[b])
                .map(|t| self.converter.index_to_text(&data.reference(b, t), false))
                .collect();
            let generated = self
                .converter
                .multi_turn_index_to_token(session, true)
                .into_iter()
                .map(|turn| turn.join(" "))
                .collect();

            self.reference.push(reference);
            self.gen.push(generated);
        }
        Ok(())
    }

    fn close(&mut self) -> Result<MetricOutput> {
        let mut out = MetricOutput::new();
        out.insert("reference".to_string(), json!(self.reference));
        out.insert("gen".to_string(), json!(self.gen));
        Ok(out)
    }
}
