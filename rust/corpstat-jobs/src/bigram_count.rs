use corpstat_common::Result;
use corpstat_format::BigramKey;
use corpstat_mapreduce::{
    Combiner, Emitter, Group, MapReduceJob, Record, SumCombiner, hash_partition_parts,
};
use corpstat_text::{BigramExtractor, TextAnalyzer};

/// Counts the occurrences of every adjacent word pair.
///
/// Output: `(left, right) -> count`, one record per distinct pair, in key order
/// within each reduce unit.
#[derive(Debug, Clone, Default)]
pub struct BigramCountJob {
    extractor: BigramExtractor,
}

impl BigramCountJob {
    pub fn new(analyzer: TextAnalyzer) -> BigramCountJob {
        BigramCountJob {
            extractor: BigramExtractor::new(analyzer),
        }
    }
}

impl MapReduceJob for BigramCountJob {
    type Key = BigramKey;
    type Value = u64;
    type OutputKey = BigramKey;
    type OutputValue = u64;

    fn name(&self) -> &str {
        "bigram-count"
    }

    fn map(&self, record: &Record, out: &mut dyn Emitter<BigramKey, u64>) -> Result<()> {
        for key in self.extractor.bigrams(&record.text) {
            out.emit(key, 1)?;
        }
        Ok(())
    }

    fn combiner(&self) -> Option<&dyn Combiner<BigramKey, u64>> {
        Some(&SumCombiner)
    }

    /// Hashes the full pair: every group is a single key, so nothing needs to be
    /// co-located beyond it.
    fn partition(&self, key: &BigramKey, partitions_count: usize) -> usize {
        let right = key.right.as_word().unwrap_or_default();
        hash_partition_parts(&[key.left.as_bytes(), right.as_bytes()], partitions_count)
    }

    fn reduce(&self, group: Group<BigramKey, u64>, out: &mut dyn Emitter<BigramKey, u64>) -> Result<()> {
        for run in group.into_runs() {
            let count = run.values.into_iter().sum();
            out.emit(run.key, count)?;
        }
        Ok(())
    }
}
