//! Per-record term frequency distributions.

use ahash::AHashMap;

use crate::analyzer::TextAnalyzer;

/// A term → occurrence count distribution for one record.
///
/// The distribution is rebuilt for every record and never shared between records,
/// so a document's postings are derived from its own terms only.
#[derive(Debug, Clone, Default)]
pub struct TermFrequencies {
    counts: AHashMap<String, u32>,
}

impl TermFrequencies {
    /// Counts the terms of `text` as produced by `analyzer`.
    pub fn from_text(analyzer: &TextAnalyzer, text: &str) -> TermFrequencies {
        let mut frequencies = TermFrequencies::default();
        for term in analyzer.terms(text) {
            frequencies.increment(&term);
        }
        frequencies
    }

    fn increment(&mut self, term: &str) {
        if let Some(count) = self.counts.get_mut(term) {
            *count += 1;
        } else {
            self.counts.insert(term.to_string(), 1);
        }
    }

    /// Consumes the distribution, yielding `(term, count)` sorted by term.
    pub fn into_sorted_vec(self) -> Vec<(String, u32)> {
        let mut entries: Vec<_> = self.counts.into_iter().collect();
        entries.sort_unstable_by(|a, b| a.0.cmp(&b.0));
        entries
    }
}
