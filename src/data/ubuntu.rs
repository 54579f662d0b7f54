// ============================================================
// Data — Ubuntu Dialogue Corpus Source
// ============================================================
// Reads one JSON file per split from a directory:
//
//   <dir>/ubuntu_corpus_train.json
//   <dir>/ubuntu_corpus_dev.json
//   <dir>/ubuntu_corpus_test.json
//
// Each file is an array of records:
//
//   { "context": "hi __eou__ __eot__ hello there __eou__ __eot__ ",
//     "utterance": "how are you __eou__",
//     "label": 1.0 }
//
// Records carrying a label other than 1.0 are distractor
// responses and are skipped. A session is context + utterance:
// __eou__ markers are dropped and the text is split into turns
// on __eot__, each turn split into words on whitespace.
//
// Vocabulary is built from the train split only: words sorted
// by frequency (ties broken alphabetically so the order is the
// same on every run), keeping those seen at least
// `min_vocab_times` times.
//
// Each turn becomes [<go>, ids..., <eot>]; long turns are cut
// to `max_sen_length` ids keeping the closing <eot>, long
// sessions are cut to `max_turn_length` turns.

use std::{
    collections::{BTreeMap, HashMap},
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;

use crate::domain::{
    session::{Sentence, Session, EOT_ID, GO_ID, SPECIAL_TOKENS, UNK_ID},
    split::Split,
    traits::{CorpusData, CorpusSource},
};
use crate::error::Result;

/// One CSV-derived row of the Ubuntu Dialogue Corpus
#[derive(Debug, Clone, Deserialize)]
struct RawRecord {
    context:   String,
    utterance: String,
    #[serde(default)]
    label:     Option<f64>,
}

/// A session as words, before id conversion
type RawSession = Vec<Vec<String>>;

/// Corpus source for the Ubuntu Dialogue Corpus.
#[derive(Debug, Clone)]
pub struct UbuntuCorpus {
    dir:             PathBuf,
    min_vocab_times: usize,
    max_sen_length:  usize,
    max_turn_length: usize,
}

impl UbuntuCorpus {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir:             dir.into(),
            min_vocab_times: 10,
            max_sen_length:  50,
            max_turn_length: 20,
        }
    }

    pub fn with_min_vocab_times(mut self, n: usize) -> Self {
        self.min_vocab_times = n;
        self
    }

    /// Longest sentence kept, markers included. Never below 2.
    pub fn with_max_sen_length(mut self, n: usize) -> Self {
        self.max_sen_length = n.max(2);
        self
    }

    pub fn with_max_turn_length(mut self, n: usize) -> Self {
        self.max_turn_length = n;
        self
    }

    pub fn split_path(&self, split: Split) -> PathBuf {
        self.dir.join(format!("ubuntu_corpus_{}.json", split.name()))
    }

    fn read_split(&self, split: Split) -> Result<Vec<RawSession>> {
        let path = self.split_path(split);
        let records: Vec<RawRecord> = read_json(&path)?;

        let sessions: Vec<RawSession> = records
            .into_iter()
            .filter(|r| r.label.map_or(true, |l| l == 1.0))
            .map(|r| raw_to_turns(&format!("{}{}", r.context, r.utterance)))
            .collect();

        tracing::debug!("Read {} sessions from '{}'", sessions.len(), path.display());
        Ok(sessions)
    }

    /// Frequency-sorted word list, special tokens first.
    fn build_vocab(&self, train: &[RawSession]) -> Vec<String> {
        let mut freq: HashMap<&str, usize> = HashMap::new();
        for word in train.iter().flatten().flatten() {
            *freq.entry(word.as_str()).or_insert(0) += 1;
        }

        let mut words: Vec<(&str, usize)> = freq
            .into_iter()
            .filter(|&(w, n)| n >= self.min_vocab_times && !SPECIAL_TOKENS.contains(&w))
            .collect();
        words.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

        SPECIAL_TOKENS
            .iter()
            .map(|s| s.to_string())
            .chain(words.into_iter().map(|(w, _)| w.to_string()))
            .collect()
    }

    fn line_to_ids(&self, line: &[String], word2id: &HashMap<&str, usize>) -> Sentence {
        let keep = line.len().min(self.max_sen_length - 2);
        let mut sent = Vec::with_capacity(keep + 2);
        sent.push(GO_ID);
        sent.extend(
            line[..keep]
                .iter()
                .map(|w| word2id.get(w.as_str()).copied().unwrap_or(UNK_ID)),
        );
        sent.push(EOT_ID);
        sent
    }

    fn session_to_ids(&self, session: &RawSession, word2id: &HashMap<&str, usize>) -> Session {
        session
            .iter()
            .take(self.max_turn_length)
            .map(|line| self.line_to_ids(line, word2id))
            .collect()
    }

    fn log_split_stats(&self, split: Split, sessions: &[RawSession], word2id: &HashMap<&str, usize>) {
        let words   = sessions.iter().flatten().flatten();
        let total   = words.clone().count();
        let oov     = words.filter(|w| !word2id.contains_key(w.as_str())).count();
        let lengths = sessions.iter().flatten().map(|line| line.len() + 2);
        let max_len = lengths.clone().max().unwrap_or(0);
        let cut     = lengths.map(|l| l.saturating_sub(self.max_sen_length)).sum::<usize>();
        let cut_turns = sessions
            .iter()
            .map(|s| s.len().saturating_sub(self.max_turn_length))
            .sum::<usize>();

        let rate = |n: usize| if total == 0 { 0.0 } else { n as f64 / total as f64 };
        tracing::info!(
            "{} set: {} sessions, OOV rate {:.6}, max length before cut {}, cut word rate {:.6}, cut turns {}",
            split,
            sessions.len(),
            rate(oov),
            max_len,
            rate(cut),
            cut_turns,
        );
    }
}

impl CorpusSource for UbuntuCorpus {
    fn load(&self) -> Result<CorpusData> {
        let mut raw = BTreeMap::new();
        for split in Split::ALL {
            raw.insert(split, self.read_split(split)?);
        }

        let train = raw.get(&Split::Train).map(Vec::as_slice).unwrap_or(&[]);
        let vocab_list = self.build_vocab(train);
        let word2id: HashMap<&str, usize> = vocab_list
            .iter()
            .enumerate()
            .map(|(i, w)| (w.as_str(), i))
            .collect();

        let mut sessions = BTreeMap::new();
        for (split, raw_sessions) in &raw {
            self.log_split_stats(*split, raw_sessions, &word2id);
            let ids: Vec<Session> = raw_sessions
                .iter()
                .map(|s| self.session_to_ids(s, &word2id))
                .collect();
            sessions.insert(*split, ids);
        }

        Ok(CorpusData { vocab_list, sessions })
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let text = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

/// Split raw session text into turns of words.
fn raw_to_turns(raw: &str) -> RawSession {
    raw.trim()
        .replace("__eou__", "")
        .split("__eot__")
        .map(|turn| turn.split_whitespace().map(str::to_string).collect())
        .collect()
}
