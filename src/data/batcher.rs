// ============================================================
// Data — Dialog Batcher (burn)
// ============================================================
// Bridges padded DialogBatches into burn tensors so a model
// can consume them on any backend.
//
//   DialogBatch (ndarray, usize)  →  DialogTensorBatch<B> (Int tensors)
//
//   sent:        [batch, max_turns, max_sent_len]
//   turn_length: [batch]
//   sent_length: [batch, max_turns]   (0 for missing turns)
//
// DialogBatcher also implements burn's Batcher trait, so a
// SplitDataset can be fed through burn's DataLoaderBuilder
// with the same padding rules the dataloader itself uses.

use burn::{
    data::dataloader::batcher::Batcher,
    prelude::*,
    tensor::TensorData,
};

use crate::data::assembler::{BatchAssembler, DialogBatch};
use crate::domain::session::Session;

// ─── DialogTensorBatch ───────────────────────────────────────────────────────
/// A dialog batch living on a burn device.
#[derive(Debug, Clone)]
pub struct DialogTensorBatch<B: Backend> {
    /// Token ids — shape: [batch, max_turns, max_sent_len]
    pub sent: Tensor<B, 3, Int>,

    /// Turns per session — shape: [batch]
    pub turn_length: Tensor<B, 1, Int>,

    /// Sentence lengths — shape: [batch, max_turns]
    pub sent_length: Tensor<B, 2, Int>,
}

impl DialogBatch {
    /// Copy this batch onto a burn device.
    pub fn to_tensors<B: Backend>(&self, device: &B::Device) -> DialogTensorBatch<B> {
        let (batch, turns, len) = self.sent.dim();

        let sent_flat: Vec<i64> = self.sent.iter().map(|&id| id as i64).collect();
        let turn_flat: Vec<i64> = self.turn_length.iter().map(|&n| n as i64).collect();

        // Ragged [batch][turns] → dense [batch, max_turns], zero-filled
        let mut sent_len_flat = vec![0i64; batch * turns];
        for (b, lengths) in self.sent_length.iter().enumerate() {
            for (t, &n) in lengths.iter().enumerate() {
                sent_len_flat[b * turns + t] = n as i64;
            }
        }

        let sent = Tensor::<B, 3, Int>::from_data(
            TensorData::new(sent_flat, [batch, turns, len]),
            device,
        );
        let turn_length = Tensor::<B, 1, Int>::from_data(
            TensorData::new(turn_flat, [batch]),
            device,
        );
        let sent_length = Tensor::<B, 2, Int>::from_data(
            TensorData::new(sent_len_flat, [batch, turns]),
            device,
        );

        DialogTensorBatch { sent, turn_length, sent_length }
    }
}

// ─── DialogBatcher ───────────────────────────────────────────────────────────
/// burn Batcher over raw sessions.
#[derive(Debug, Clone, Copy, Default)]
pub struct DialogBatcher {
    assembler: BatchAssembler,
}

impl DialogBatcher {
    pub fn new() -> Self {
        Self { assembler: BatchAssembler::new() }
    }
}

impl<B: Backend> Batcher<B, Session, DialogTensorBatch<B>> for DialogBatcher {
    fn batch(&self, items: Vec<Session>, device: &B::Device) -> DialogTensorBatch<B> {
        self.assembler.assemble(items.iter()).to_tensors(device)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;

    type TestBackend = NdArray;

    #[test]
    fn test_tensor_shapes_match_batch() {
        let s0: Session = vec![vec![2, 7, 4], vec![2, 9, 9, 4]];
        let s1: Session = vec![vec![2, 4]];
        let device = Default::default();

        let batch: DialogTensorBatch<TestBackend> =
            DialogBatcher::new().batch(vec![s0, s1], &device);

        assert_eq!(batch.sent.dims(), [2, 2, 4]);
        assert_eq!(batch.turn_length.dims(), [2]);
        assert_eq!(batch.sent_length.dims(), [2, 2]);
    }

    #[test]
    fn test_tensor_values_carry_over() {
        let s0: Session = vec![vec![2, 7, 4], vec![2, 9, 9, 4]];
        let s1: Session = vec![vec![2, 4]];
        let device = Default::default();

        let batch = BatchAssembler::new().assemble([&s0, &s1]);
        let tensors = batch.to_tensors::<TestBackend>(&device);

        let sent_length: Vec<i64> = tensors.sent_length.into_data().convert::<i64>().to_vec().unwrap();
        assert_eq!(sent_length, vec![3, 4, 2, 0]);

        let sent: Vec<i64> = tensors.sent.into_data().convert::<i64>().to_vec().unwrap();
        assert_eq!(&sent[..4], &[2, 7, 4, 0]);
        assert_eq!(&sent[12..], &[0, 0, 0, 0]);
    }
}
