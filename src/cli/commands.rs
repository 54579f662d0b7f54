// ============================================================
// CLI — Commands and Arguments
// ============================================================
// Three subcommands: `stats`, `show` and `init-config`.
//
// Corpus settings come from corpus_config.json when present
// and can be overridden per flag.

use clap::{Args, Subcommand};

use dialog_loader::application::corpus_config::CorpusConfig;
use dialog_loader::domain::split::Split;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Iterate one epoch of a split and report batch statistics
    Stats(StatsArgs),

    /// Decode stored sessions back to text
    Show(ShowArgs),

    /// Write a corpus_config.json with the given settings
    InitConfig(CorpusArgs),
}

/// Corpus settings shared by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct CorpusArgs {
    /// Directory containing corpus_config.json
    #[arg(long, default_value = ".")]
    pub config_dir: String,

    /// Directory containing ubuntu_corpus_<split>.json
    #[arg(long)]
    pub corpus_dir: Option<String>,

    /// Minimum train-split word frequency to enter the vocabulary
    #[arg(long)]
    pub min_vocab_times: Option<usize>,

    /// Longest sentence kept, turn markers included
    #[arg(long)]
    pub max_sen_length: Option<usize>,

    /// Most turns kept per session
    #[arg(long)]
    pub max_turn_length: Option<usize>,

    /// Shuffle seed for reproducible epochs
    #[arg(long)]
    pub seed: Option<u64>,
}

impl CorpusArgs {
    /// Apply every flag that was given on top of `base`.
    pub fn apply(&self, mut base: CorpusConfig) -> CorpusConfig {
        if let Some(dir) = &self.corpus_dir {
            base.corpus_dir = dir.clone();
        }
        if let Some(n) = self.min_vocab_times {
            base.min_vocab_times = n;
        }
        if let Some(n) = self.max_sen_length {
            base.max_sen_length = n;
        }
        if let Some(n) = self.max_turn_length {
            base.max_turn_length = n;
        }
        if self.seed.is_some() {
            base.seed = self.seed;
        }
        base
    }
}

#[derive(Args, Debug)]
pub struct StatsArgs {
    #[command(flatten)]
    pub corpus: CorpusArgs,

    /// Split to iterate: train, dev or test
    #[arg(long, default_value = "train", value_parser = parse_split)]
    pub split: Split,

    /// Sessions per batch
    #[arg(long, default_value_t = 32)]
    pub batch_size: usize,

    /// Keep the current record order instead of reshuffling
    #[arg(long)]
    pub no_shuffle: bool,

    /// Drop a trailing batch smaller than --batch-size
    #[arg(long)]
    pub ignore_left_samples: bool,

    /// Append the result to <dir>/epoch_stats.csv
    #[arg(long)]
    pub log_dir: Option<String>,
}

#[derive(Args, Debug)]
pub struct ShowArgs {
    #[command(flatten)]
    pub corpus: CorpusArgs,

    /// Split to read from: train, dev or test
    #[arg(long, default_value = "train", value_parser = parse_split)]
    pub split: Split,

    /// Record indices to decode
    #[arg(required = true)]
    pub indices: Vec<usize>,

    /// Apply generation trimming (stops at the first <eot>)
    #[arg(long)]
    pub trim: bool,
}

fn parse_split(s: &str) -> Result<Split, String> {
    s.parse::<Split>().map_err(|e| e.to_string())
}
