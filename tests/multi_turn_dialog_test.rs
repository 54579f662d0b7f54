//! End-to-end tests of MultiTurnDialog over a small Ubuntu-format corpus.
//!
//! The fixture splits hold 23 / 11 / 12 sessions, none a multiple of 7,
//! so every epoch at batch size 7 ends with a short batch.

use std::path::PathBuf;

use dialog_loader::{
    data::{dialog::MultiTurnDialog, ubuntu::UbuntuCorpus},
    domain::session::{is_delimited, SPECIAL_TOKENS},
    metric::{Metric, MetricData},
    Error, Split,
};

fn fixture_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/dummy_ubuntucorpus")
}

fn load() -> MultiTurnDialog {
    MultiTurnDialog::from_source(&UbuntuCorpus::new(fixture_dir()), Some(2018)).unwrap()
}

fn strs(tokens: &[&str]) -> Vec<String> {
    tokens.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_init() {
    let dl = load();

    assert_eq!(dl.vocab().ext_vocab(), &strs(&SPECIAL_TOKENS)[..]);
    let ids = dl.special_ids();
    assert_eq!([ids.pad, ids.unk, ids.go, ids.eos, ids.eot], [0, 1, 2, 3, 4]);

    let vocab = dl.vocab();
    assert_eq!(vocab.word2id().len(), vocab.vocab_list().len());
    for (i, word) in vocab.vocab_list().iter().enumerate() {
        assert_eq!(vocab.word2id()[word], i);
    }
    assert_eq!(dl.vocab_size(), vocab.vocab_list().len());
    assert!(dl.vocab_size() > SPECIAL_TOKENS.len());

    assert_eq!(dl.splits(), Split::ALL.to_vec());
    assert_eq!(dl.split_len(Split::Train).unwrap(), 23);
    assert_eq!(dl.split_len(Split::Dev).unwrap(), 11);
    assert_eq!(dl.split_len(Split::Test).unwrap(), 12);

    for split in dl.splits() {
        for session in dl.sessions(split).unwrap() {
            for sentence in session {
                assert!(is_delimited(sentence));
                assert!(sentence.len() <= 50);
            }
        }
    }
}

#[test]
fn test_restart() {
    let mut dl = load();
    assert!(matches!("unknown set".parse::<Split>(), Err(Error::UnknownSplit(_))));

    for split in dl.splits() {
        assert!(matches!(dl.restart(split, None, true), Err(Error::MissingBatchSize(_))));

        let record_index = dl.index(split).unwrap().to_vec();
        dl.restart(split, Some(3), false).unwrap();
        assert_eq!(dl.index(split).unwrap(), &record_index[..]);
        assert_eq!(dl.cursor(split).unwrap(), 0);
        assert_eq!(dl.batch_size(split).unwrap(), Some(3));

        dl.restart(split, None, true).unwrap();
        assert_eq!(dl.cursor(split).unwrap(), 0);
        assert_eq!(dl.batch_size(split).unwrap(), Some(3));

        let record_index = dl.index(split).unwrap().to_vec();
        dl.restart(split, None, false).unwrap();
        assert_eq!(dl.index(split).unwrap(), &record_index[..]);
        assert_eq!(dl.cursor(split).unwrap(), 0);
    }
}

#[test]
fn test_get_batch() {
    let dl = load();
    for split in dl.splits() {
        let len = dl.split_len(split).unwrap();
        assert!(matches!(
            dl.get_batch(split, &[len - 1, len]),
            Err(Error::IndexOutOfRange { index, .. }) if index == len
        ));

        let batch = dl.get_batch(split, &[0, 1]).unwrap();
        assert!(dl.index(split).unwrap().len() >= 2);
        assert_eq!(batch.turn_length.len(), 2);
        assert_eq!(batch.sent_length.len(), 2);

        let (b, t, l) = batch.sent.dim();
        assert_eq!(b, 2);
        assert_eq!(t, *batch.turn_length.iter().max().unwrap());
        assert_eq!(l, *batch.sent_length.iter().flatten().max().unwrap());
    }
}

#[test]
fn test_get_next_batch() {
    let mut dl = load();
    for split in dl.splits() {
        assert!(matches!(dl.get_next_batch(split, false), Err(Error::NotStarted(_))));
        let len = dl.split_len(split).unwrap();

        dl.restart(split, Some(7), true).unwrap();
        let mut sample_num = 0;
        while let Some(batch) = dl.get_next_batch(split, true).unwrap() {
            assert_eq!(batch.turn_length.len(), 7);
            assert_eq!(batch.sent_length.len(), 7);
            assert_eq!(batch.sent.dim().0, 7);
            sample_num += 7;
        }
        assert_eq!(sample_num, len / 7 * 7);
        assert!(sample_num + 7 >= len);

        dl.restart(split, Some(7), true).unwrap();
        let mut sample_num = 0;
        loop {
            let batch = dl
                .get_next_batch(split, false)
                .unwrap()
                .expect("fixture splits are not multiples of 7");
            if batch.len() == 7 {
                assert_eq!(batch.sent.dim().0, 7);
                sample_num += 7;
            } else {
                assert_eq!(batch.sent_length.len(), batch.sent.dim().0);
                assert_eq!(batch.turn_length.len(), batch.sent.dim().0);
                sample_num += batch.len();
                assert!(dl.get_next_batch(split, false).unwrap().is_none());
                break;
            }
        }
        assert_eq!(sample_num, len);
    }
}

#[test]
fn test_convert() {
    let dl = load();

    assert_eq!(dl.index_to_token(&[0, 1, 2], true), strs(&["<pad>", "<unk>", "<go>"]));
    assert_eq!(dl.token_to_index(&["<pad>", "<unk>", "<go>"]), vec![0, 1, 2]);

    let sent = ["<unk>", "<go>", "<pad>", "<unkownword>", "<pad>", "<go>"];
    assert_eq!(dl.token_to_index(&sent), vec![1, 2, 0, 1, 0, 2]);

    let ids = [0, 1, 2, 3, 0, 4, 1, 0, 0];
    assert_eq!(
        dl.index_to_token(&ids, false),
        strs(&["<pad>", "<unk>", "<go>", "<eos>", "<pad>", "<eot>", "<unk>", "<pad>", "<pad>"])
    );
    assert_eq!(dl.index_to_token(&ids, true), strs(&["<pad>", "<unk>", "<go>", "<eos>"]));
}

#[test]
fn test_multi_turn_convert() {
    let dl = load();

    let ids = vec![vec![0, 1, 2], vec![2, 1, 0]];
    let tokens = vec![strs(&["<pad>", "<unk>", "<go>"]), strs(&["<go>", "<unk>", "<pad>"])];
    assert_eq!(dl.multi_turn_index_to_token(&ids, true), tokens);
    assert_eq!(dl.multi_turn_token_to_index(&tokens), ids);

    let tokens = vec![
        strs(&["<unk>", "<go>", "<pad>", "<unkownword>", "<pad>", "<go>"]),
        strs(&["<eos>", "<eot>"]),
    ];
    assert_eq!(dl.multi_turn_token_to_index(&tokens), vec![vec![1, 2, 0, 1, 0, 2], vec![3, 4]]);

    let ids = vec![vec![0, 1, 2, 3, 0, 4, 1, 0, 0], vec![0, 4], vec![1, 2, 3, 0], vec![1, 2, 3, 4]];
    assert_eq!(
        dl.multi_turn_index_to_token(&ids, false),
        vec![
            strs(&["<pad>", "<unk>", "<go>", "<eos>", "<pad>", "<eot>", "<unk>", "<pad>", "<pad>"]),
            strs(&["<pad>", "<eot>"]),
            strs(&["<unk>", "<go>", "<eos>", "<pad>"]),
            strs(&["<unk>", "<go>", "<eos>", "<eot>"]),
        ]
    );
    assert_eq!(
        dl.multi_turn_index_to_token(&ids, true),
        vec![strs(&["<pad>", "<unk>", "<go>", "<eos>"]), strs(&["<pad>"])]
    );
}

#[test]
fn test_teacher_forcing_metric() {
    let dl = load();
    let mut metric = dl.teacher_forcing_metric();
    assert_eq!(metric.names(), vec!["multi_turn_perplexity"]);

    let batch = dl.get_batch(Split::Dev, &[0, 1, 2]).unwrap();
    let (b, t, l) = batch.sent.dim();
    let vocab_size = dl.vocab_size();
    let uniform = -(vocab_size as f32).ln();
    let data = MetricData::from(batch)
        .with_gen_log_prob(ndarray::Array4::from_elem((b, t, l - 1, vocab_size), uniform));

    metric.forward(&data).unwrap();
    let ppl = metric.close().unwrap()["perplexity"].as_f64().unwrap();
    assert!((ppl - vocab_size as f64).abs() < 1e-2);
}

#[test]
fn test_inference_metric() {
    let dl = load();
    let mut metric = dl.inference_metric();

    // Echo the references back as generations
    let batch = dl.get_batch(Split::Test, &[3, 4]).unwrap();
    let gen: Vec<Vec<Vec<usize>>> = [3, 4]
        .iter()
        .map(|&i| dl.sessions(Split::Test).unwrap()[i].clone())
        .collect();
    metric.forward(&MetricData::from(batch).with_gen(gen)).unwrap();

    let out = metric.close().unwrap();
    assert!(out.contains_key("bleu"));
    assert_eq!(out["reference"].as_array().unwrap().len(), 2);
    assert_eq!(out["gen"].as_array().unwrap().len(), 2);
}

#[test]
fn test_init_multi_runs() {
    let runs: Vec<MultiTurnDialog> = (0..3).map(|_| load()).collect();
    assert!(runs.iter().all(|d| d.vocab().vocab_list() == runs[0].vocab().vocab_list()));
}
