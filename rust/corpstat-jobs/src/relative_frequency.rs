//! Relative frequency of bigrams via order inversion.
//!
//! For every observed pair the mapper emits `(left, right) -> 1` and
//! `(left, Marker) -> 1`. Partitioning hashes `left` only and grouping compares `left`
//! only, so one reduce call sees the whole `left` group in key order, which puts the
//! marginal run first. The reducer learns the denominator from that run and
//! normalizes each following pair as it streams past.

use corpstat_common::{Result, error::Error};
use corpstat_format::BigramKey;
use corpstat_mapreduce::{
    Combiner, Emitter, Group, KeyRun, MapReduceJob, Record, SumCombiner, hash_partition,
};
use corpstat_text::{BigramExtractor, TextAnalyzer};

/// Computes `P(right | left) = count(left, right) / count(left, *)`.
///
/// Output per `left` group: first `(left, Marker) -> marginal count`, then
/// `(left, right) -> relative frequency` for every observed `right` in ascending order.
#[derive(Debug, Clone)]
pub struct RelativeFrequencyJob {
    extractor: BigramExtractor,
}

impl Default for RelativeFrequencyJob {
    fn default() -> Self {
        RelativeFrequencyJob::new(TextAnalyzer::default())
    }
}

impl RelativeFrequencyJob {
    pub fn new(analyzer: TextAnalyzer) -> RelativeFrequencyJob {
        RelativeFrequencyJob {
            extractor: BigramExtractor::with_marginals(analyzer),
        }
    }
}

/// Reducer state within one `left` group.
enum Normalization {
    /// No marginal seen yet.
    Start,
    Normalizing { denominator: u64 },
}

impl Normalization {
    fn accept(
        &mut self,
        run: KeyRun<BigramKey, u64>,
        out: &mut dyn Emitter<BigramKey, f64>,
    ) -> Result<()> {
        let count: u64 = run.values.into_iter().sum();
        match self {
            Normalization::Start => {
                if !run.key.is_marginal() {
                    return Err(Error::consistency(format!(
                        "group '{}' does not start with its marginal entry (got {})",
                        run.key.left, run.key
                    )));
                }
                if count == 0 {
                    return Err(Error::consistency(format!(
                        "marginal count of '{}' is zero",
                        run.key.left
                    )));
                }
                out.emit(run.key, count as f64)?;
                *self = Normalization::Normalizing { denominator: count };
            }
            Normalization::Normalizing { denominator } => {
                if run.key.is_marginal() {
                    return Err(Error::consistency(format!(
                        "duplicate marginal entry for '{}'",
                        run.key.left
                    )));
                }
                if count > *denominator {
                    return Err(Error::consistency(format!(
                        "count {count} of {} exceeds its marginal {denominator}",
                        run.key
                    )));
                }
                let frequency = count as f64 / *denominator as f64;
                out.emit(run.key, frequency)?;
            }
        }
        Ok(())
    }
}

impl MapReduceJob for RelativeFrequencyJob {
    type Key = BigramKey;
    type Value = u64;
    type OutputKey = BigramKey;
    type OutputValue = f64;

    fn name(&self) -> &str {
        "bigram-relfreq"
    }

    fn map(&self, record: &Record, out: &mut dyn Emitter<BigramKey, u64>) -> Result<()> {
        for key in self.extractor.bigrams(&record.text) {
            out.emit(key, 1)?;
        }
        Ok(())
    }

    /// Sums per exact key; a marginal run is never merged with a pair run.
    fn combiner(&self) -> Option<&dyn Combiner<BigramKey, u64>> {
        Some(&SumCombiner)
    }

    fn partition(&self, key: &BigramKey, partitions_count: usize) -> usize {
        hash_partition(key.left.as_bytes(), partitions_count)
    }

    fn same_group(&self, a: &BigramKey, b: &BigramKey) -> bool {
        a.left == b.left
    }

    fn reduce(&self, group: Group<BigramKey, u64>, out: &mut dyn Emitter<BigramKey, f64>) -> Result<()> {
        let left = group.key().left.clone();
        let mut state = Normalization::Start;
        for run in group.into_runs() {
            state.accept(run, out).inspect_err(|e| {
                log::debug!("{}: normalizing group '{left}' failed: {e}", self.name());
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use corpstat_common::error::ErrorKind;

    fn reduce(runs: Vec<KeyRun<BigramKey, u64>>) -> Result<Vec<(BigramKey, f64)>> {
        let mut out: Vec<(BigramKey, f64)> = Vec::new();
        RelativeFrequencyJob::default().reduce(Group::new(runs), &mut out)?;
        Ok(out)
    }

    #[test]
    fn test_map_emits_marginal_per_pair() {
        let mut out: Vec<(BigramKey, u64)> = Vec::new();
        RelativeFrequencyJob::default()
            .map(&Record::new(0, "a b a"), &mut out)
            .unwrap();
        assert_eq!(
            out,
            vec![
                (BigramKey::pair("a", "b"), 1),
                (BigramKey::marginal("a"), 1),
                (BigramKey::pair("b", "a"), 1),
                (BigramKey::marginal("b"), 1),
            ]
        );
    }

    #[test]
    fn test_reduce_normalizes() {
        let out = reduce(vec![
            KeyRun::new(BigramKey::marginal("the"), vec![3, 1]),
            KeyRun::new(BigramKey::pair("the", "king"), vec![3]),
            KeyRun::new(BigramKey::pair("the", "queen"), vec![1]),
        ])
        .unwrap();
        assert_eq!(
            out,
            vec![
                (BigramKey::marginal("the"), 4.0),
                (BigramKey::pair("the", "king"), 0.75),
                (BigramKey::pair("the", "queen"), 0.25),
            ]
        );
    }

    #[test]
    fn test_missing_marginal_is_fatal() {
        let err = reduce(vec![KeyRun::new(BigramKey::pair("the", "king"), vec![1])]).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::Consistency { .. }));
    }

    #[test]
    fn test_inconsistent_counts_are_fatal() {
        let err = reduce(vec![
            KeyRun::new(BigramKey::marginal("a"), vec![1]),
            KeyRun::new(BigramKey::pair("a", "b"), vec![2]),
        ])
        .unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::Consistency { .. }));

        let err = reduce(vec![
            KeyRun::new(BigramKey::marginal("a"), vec![0]),
            KeyRun::new(BigramKey::pair("a", "b"), vec![0]),
        ])
        .unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::Consistency { .. }));
    }

    #[test]
    fn test_partition_ignores_right() {
        let job = RelativeFrequencyJob::default();
        for n in [2, 3, 16] {
            let unit = job.partition(&BigramKey::marginal("romeo"), n);
            for right in ["is", "and", "zzz"] {
                assert_eq!(job.partition(&BigramKey::pair("romeo", right), n), unit);
            }
        }
    }
}
