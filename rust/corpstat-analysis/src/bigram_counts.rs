use serde::Serialize;

use corpstat_common::{Result, error::Error};
use corpstat_format::BigramKey;

use crate::top_k::top_k;

/// Bigram-count output as a table.
#[derive(Debug, Clone, Default)]
pub struct BigramCounts {
    counts: Vec<(BigramKey, u64)>,
    total: u64,
}

/// A bigram and its count, as reported by [`BigramCountSummary`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedBigram {
    pub bigram: String,
    pub count: u64,
}

/// The standard report over a bigram-count table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BigramCountSummary {
    pub unique_bigrams: usize,
    pub total_bigrams: u64,
    /// Bigrams occurring exactly twice.
    pub doubletons: usize,
    pub top: Vec<RankedBigram>,
    /// Share of all bigram occurrences covered by `top`.
    pub top_share: f64,
}

impl BigramCounts {
    /// Builds the table from `(bigram, count)` records.
    ///
    /// # Errors
    ///
    /// Rejects marginal entries, which only relative-frequency output contains, and
    /// repeated bigrams.
    pub fn from_records(mut counts: Vec<(BigramKey, u64)>) -> Result<BigramCounts> {
        if let Some((key, _)) = counts.iter().find(|(key, _)| key.is_marginal()) {
            return Err(Error::invalid_arg(
                "counts",
                format!("marginal entry {key} in bigram counts"),
            ));
        }
        counts.sort_unstable_by(|a, b| a.0.cmp(&b.0));
        if let Some(pair) = counts.windows(2).find(|w| w[0].0 == w[1].0) {
            return Err(Error::consistency(format!(
                "bigram {} occurs more than once",
                pair[0].0
            )));
        }
        let total = counts.iter().map(|(_, count)| count).sum();
        Ok(BigramCounts { counts, total })
    }

    /// Number of distinct bigrams.
    pub fn unique(&self) -> usize {
        self.counts.len()
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn get(&self, key: &BigramKey) -> Option<u64> {
        self.counts
            .binary_search_by(|(k, _)| k.cmp(key))
            .ok()
            .map(|index| self.counts[index].1)
    }

    /// Number of distinct bigrams whose count is exactly `n`.
    pub fn occurring_exactly(&self, n: u64) -> usize {
        self.counts.iter().filter(|(_, count)| *count == n).count()
    }

    pub fn top(&self, k: usize) -> Vec<(BigramKey, u64)> {
        top_k(self.counts.iter().cloned(), k)
    }

    /// Fraction of all occurrences accounted for by the `k` most frequent bigrams.
    /// Zero for an empty table.
    pub fn top_share(&self, k: usize) -> f64 {
        let covered = self.top(k).iter().map(|(_, count)| count).sum();
        self.share(covered)
    }

    fn share(&self, covered: u64) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            covered as f64 / self.total as f64
        }
    }

    pub fn summary(&self, k: usize) -> BigramCountSummary {
        let top = self.top(k);
        let covered: u64 = top.iter().map(|(_, count)| count).sum();
        BigramCountSummary {
            unique_bigrams: self.unique(),
            total_bigrams: self.total,
            doubletons: self.occurring_exactly(2),
            top: top
                .into_iter()
                .map(|(key, count)| RankedBigram {
                    bigram: key.to_string(),
                    count,
                })
                .collect(),
            top_share: self.share(covered),
        }
    }
}
