// ============================================================
// Domain — Sessions, Sentences and Special Tokens
// ============================================================
// A session is one multi-turn dialogue. Each turn is a
// sentence: a sequence of token ids that starts with <go>
// and ends with <eot>. Those markers are inserted by the
// corpus source before the dataloader ever sees the data.
//
// Every vocabulary starts with the same five special tokens
// at fixed ids:
//
//   id  token   meaning
//   0   <pad>   padding
//   1   <unk>   unknown word
//   2   <go>    turn start
//   3   <eos>   sentence end
//   4   <eot>   turn end

/// One turn: token ids bounded by <go> ... <eot>
pub type Sentence = Vec<usize>;

/// One dialogue: an ordered list of turns
pub type Session = Vec<Sentence>;

pub const PAD_ID: usize = 0;
pub const UNK_ID: usize = 1;
pub const GO_ID:  usize = 2;
pub const EOS_ID: usize = 3;
pub const EOT_ID: usize = 4;

/// The special prefix every vocabulary list must begin with,
/// indexed by the ids above.
pub const SPECIAL_TOKENS: [&str; 5] = ["<pad>", "<unk>", "<go>", "<eos>", "<eot>"];

/// The special ids as a bundle, handed to metric pipelines so they
/// can skip padding and recognise turn markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpecialIds {
    pub pad: usize,
    pub unk: usize,
    pub go:  usize,
    pub eos: usize,
    pub eot: usize,
}

impl Default for SpecialIds {
    fn default() -> Self {
        Self { pad: PAD_ID, unk: UNK_ID, go: GO_ID, eos: EOS_ID, eot: EOT_ID }
    }
}

/// True when a sentence carries both turn markers.
pub fn is_delimited(sentence: &[usize]) -> bool {
    sentence.first() == Some(&GO_ID) && sentence.last() == Some(&EOT_ID)
}
