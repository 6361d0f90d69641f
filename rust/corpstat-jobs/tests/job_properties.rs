use std::collections::{BTreeMap, BTreeSet, HashMap};

use itertools::Itertools;

use corpstat_format::{BigramKey, IndexEntry, Posting, decode_record, encode_record};
use corpstat_jobs::{BigramCountJob, InvertedIndexJob, RelativeFrequencyJob};
use corpstat_mapreduce::{
    DocIdPolicy, JobParams, JobRunner, MapReduceJob, Record, TextInput,
    shuffle::{collate, combine_runs, group_runs, merge_runs},
    write_text_output,
};

fn random_corpus(seed: u64, lines: usize) -> Vec<String> {
    let mut rng = fastrand::Rng::with_seed(seed);
    // A skewed vocabulary, so that some words repeat within a line.
    let vocabulary = ["the", "king", "is", "dead", "long", "live", "a", "b", "***", "\\x"];
    (0..lines)
        .map(|_| {
            let len = rng.usize(0..10);
            (0..len)
                .map(|_| {
                    let hi = rng.usize(1..=vocabulary.len());
                    vocabulary[rng.usize(0..hi)]
                })
                .join(" ")
        })
        .collect()
}

fn records(lines: &[String], policy: DocIdPolicy) -> Vec<Record> {
    TextInput::from_lines(lines, policy).into_records()
}

fn params(partitions_count: usize, use_combiner: bool) -> JobParams {
    JobParams {
        partitions_count,
        map_tasks: Some(4),
        max_degree: Some(2),
        use_combiner,
    }
}

fn run<J: MapReduceJob>(job: &J, records: &[Record], params: JobParams) -> Vec<(J::OutputKey, J::OutputValue)> {
    JobRunner::new(params)
        .unwrap()
        .run(job, records)
        .unwrap()
        .into_records()
}

fn adjacent_pairs(lines: &[String]) -> usize {
    lines
        .iter()
        .map(|line| line.split_whitespace().count().saturating_sub(1))
        .sum()
}

#[test]
fn test_bigram_count_total_equals_adjacent_pairs() {
    for seed in 0..5 {
        let lines = random_corpus(seed, 200);
        let records = records(&lines, DocIdPolicy::ByteOffset);
        for partitions_count in [1, 3] {
            let output = run(&BigramCountJob::default(), &records, params(partitions_count, true));
            let total: u64 = output.iter().map(|(_, count)| count).sum();
            assert_eq!(total as usize, adjacent_pairs(&lines), "seed {seed}");

            let distinct = output.iter().map(|(key, _)| key).collect::<BTreeSet<_>>();
            assert_eq!(distinct.len(), output.len());
        }
    }
}

#[test]
fn test_marginal_equals_sum_of_pair_counts() {
    for seed in 10..15 {
        let lines = random_corpus(seed, 150);
        let records = records(&lines, DocIdPolicy::LineNumber);
        let counts = run(&BigramCountJob::default(), &records, params(2, true));
        let frequencies = run(&RelativeFrequencyJob::default(), &records, params(3, true));

        let mut sums: BTreeMap<String, u64> = BTreeMap::new();
        for (key, count) in &counts {
            *sums.entry(key.left.clone()).or_default() += count;
        }
        let marginals = frequencies
            .iter()
            .filter(|(key, _)| key.is_marginal())
            .map(|(key, value)| (key.left.clone(), *value as u64))
            .collect::<BTreeMap<_, _>>();
        assert_eq!(marginals, sums, "seed {seed}");

        let counts = counts.into_iter().collect::<HashMap<_, _>>();
        let mut totals: BTreeMap<String, f64> = BTreeMap::new();
        for (key, value) in frequencies.iter().filter(|(key, _)| !key.is_marginal()) {
            let expected = counts[key] as f64 / marginals[&key.left] as f64;
            assert_eq!(*value, expected);
            *totals.entry(key.left.clone()).or_default() += value;
        }
        for (left, total) in totals {
            assert!((total - 1.0).abs() < 1e-9, "{left}: {total}");
        }
    }
}

#[test]
fn test_relfreq_groups_start_with_marginal() {
    let lines = random_corpus(21, 100);
    let output = JobRunner::new(params(4, true))
        .unwrap()
        .run(&RelativeFrequencyJob::default(), &records(&lines, DocIdPolicy::ByteOffset))
        .unwrap();
    for unit in output.partitions() {
        for (previous, current) in unit.iter().map(|(key, _)| key).tuple_windows() {
            assert!(previous < current);
            if previous.left != current.left {
                assert!(current.is_marginal(), "{current} opens a group");
            }
        }
        if let Some((first, _)) = unit.first() {
            assert!(first.is_marginal());
        }
    }
}

#[test]
fn test_inverted_index_document_frequencies() {
    for seed in 30..34 {
        let lines = random_corpus(seed, 120);
        let records = records(&lines, DocIdPolicy::ByteOffset);
        let index = run(&InvertedIndexJob::default(), &records, params(3, false));

        let mut expected: BTreeMap<String, Vec<Posting>> = BTreeMap::new();
        for record in &records {
            let counts = record.text.split_whitespace().counts();
            for (term, tf) in counts {
                expected
                    .entry(term.to_string())
                    .or_default()
                    .push(Posting::new(record.doc_id, tf as u32));
            }
        }

        let actual = index.into_iter().collect::<BTreeMap<_, _>>();
        assert_eq!(actual.len(), expected.len());
        for (term, postings) in expected {
            let entry = &actual[&term];
            assert_eq!(entry.doc_freq() as usize, postings.len(), "{term}");
            assert_eq!(entry.postings(), postings.as_slice(), "{term}");
        }
    }
}

#[test]
fn test_combiner_applications_do_not_change_output() {
    let lines = random_corpus(40, 80);
    let records = records(&lines, DocIdPolicy::LineNumber);
    let job = RelativeFrequencyJob::default();

    let without = run(&job, &records, params(2, false));
    let with = run(&job, &records, params(2, true));
    assert_eq!(without, with);

    // Apply the combiner zero, one and three times to the raw map output.
    let mut emitted: Vec<(BigramKey, u64)> = Vec::new();
    for record in &records {
        job.map(record, &mut emitted).unwrap();
    }
    let combiner = job.combiner().unwrap();
    let reduce_all = |times: usize| {
        let mut runs = collate(emitted.clone());
        for _ in 0..times {
            runs = combine_runs(combiner, runs);
        }
        let mut out: Vec<(BigramKey, f64)> = Vec::new();
        for group in group_runs(merge_runs(runs), |a, b| job.same_group(a, b)) {
            job.reduce(group, &mut out).unwrap();
        }
        out
    };
    let reference = reduce_all(0);
    assert_eq!(reduce_all(1), reference);
    assert_eq!(reduce_all(3), reference);
}

#[test]
fn test_persisted_entries_round_trip() {
    let lines = random_corpus(50, 60);
    let records = records(&lines, DocIdPolicy::ByteOffset);
    let root = tempfile::tempdir().unwrap();

    let frequencies = JobRunner::new(params(2, true))
        .unwrap()
        .run(&RelativeFrequencyJob::default(), &records)
        .unwrap();
    let dir = root.path().join("relfreq");
    write_text_output(&frequencies, &dir).unwrap();
    let mut decoded = Vec::new();
    for index in 0..2 {
        let text = std::fs::read_to_string(dir.join(format!("part-{index:05}"))).unwrap();
        for line in text.lines() {
            decoded.push(decode_record::<BigramKey, f64>(line).unwrap());
        }
    }
    assert_eq!(decoded, frequencies.into_records());

    let index = run(&InvertedIndexJob::default(), &records, params(1, true));
    for (term, entry) in index {
        let line = encode_record(&term, &entry);
        assert_eq!(decode_record::<String, IndexEntry>(&line).unwrap(), (term, entry));
    }
}

#[test]
fn test_king_scenario() {
    let lines = ["the king is the king", "the king is dead"].map(String::from);
    let records = records(&lines, DocIdPolicy::ByteOffset);

    let counts = run(&BigramCountJob::default(), &records, params(2, true))
        .into_iter()
        .collect::<BTreeMap<_, _>>();
    assert_eq!(counts[&BigramKey::pair("the", "king")], 3);
    assert_eq!(counts[&BigramKey::pair("king", "is")], 2);
    assert_eq!(counts[&BigramKey::pair("is", "the")], 1);
    assert_eq!(counts[&BigramKey::pair("is", "dead")], 1);
    assert_eq!(counts.len(), 4);

    let frequencies = run(&RelativeFrequencyJob::default(), &records, params(2, true))
        .into_iter()
        .collect::<BTreeMap<_, _>>();
    assert_eq!(frequencies[&BigramKey::marginal("the")], 3.0);
    assert_eq!(frequencies[&BigramKey::pair("the", "king")], 1.0);
    assert_eq!(frequencies[&BigramKey::marginal("is")], 2.0);
    assert_eq!(frequencies[&BigramKey::pair("is", "dead")], 0.5);
    assert_eq!(frequencies[&BigramKey::pair("is", "the")], 0.5);
}

#[test]
fn test_two_document_index_scenario() {
    let lines = ["a b a", "b a"].map(String::from);
    let records = records(&lines, DocIdPolicy::LineNumber);
    let index = run(&InvertedIndexJob::default(), &records, params(2, true))
        .into_iter()
        .collect::<BTreeMap<_, _>>();

    let a = &index["a"];
    assert_eq!(a.doc_freq(), 2);
    assert_eq!(a.postings(), &[Posting::new(0, 2), Posting::new(1, 1)]);
    let b = &index["b"];
    assert_eq!(b.doc_freq(), 2);
    assert_eq!(b.postings(), &[Posting::new(0, 1), Posting::new(1, 1)]);
}

#[test]
fn test_single_token_and_empty_records_emit_nothing() {
    let lines = ["alone", "", "   "].map(String::from);
    let records = records(&lines, DocIdPolicy::LineNumber);
    assert!(run(&BigramCountJob::default(), &records, params(1, true)).is_empty());
    assert!(run(&RelativeFrequencyJob::default(), &records, params(1, true)).is_empty());
    let index = run(&InvertedIndexJob::default(), &records, params(1, true));
    assert_eq!(index.len(), 1);
}
