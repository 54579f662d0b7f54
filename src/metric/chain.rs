// ============================================================
// Metric — MetricChain
// ============================================================
// Runs several metrics over the same batches and merges
// their outputs into one map. A chain is itself a Metric,
// so chains can nest.

use std::fmt;

use crate::error::Result;
use crate::metric::{Metric, MetricData, MetricOutput};

/// Ordered composite of metrics.
#[derive(Default)]
pub struct MetricChain {
    metrics: Vec<Box<dyn Metric>>,
}

impl MetricChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a metric to the chain.
    pub fn add_metric<M: Metric + 'static>(&mut self, metric: M) -> &mut Self {
        self.metrics.push(Box::new(metric));
        self
    }

    /// Names of the chained metrics, in order
    pub fn names(&self) -> Vec<&'static str> {
        self.metrics.iter().map(|m| m.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }
}

impl fmt::Debug for MetricChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MetricChain").field("metrics", &self.names()).finish()
    }
}

impl Metric for MetricChain {
    fn name(&self) -> &'static str {
        "chain"
    }

    fn forward(&mut self, data: &MetricData) -> Result<()> {
        for metric in &mut self.metrics {
            metric.forward(data)?;
        }
        Ok(())
    }

    /// Later metrics win on key collisions.
    fn close(&mut self) -> Result<MetricOutput> {
        let mut out = MetricOutput::new();
        for metric in &mut self.metrics {
            out.extend(metric.close()?);
        }
        Ok(out)
    }
}
