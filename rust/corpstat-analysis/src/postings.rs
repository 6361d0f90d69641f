use std::collections::BTreeMap;

use serde::Serialize;

use corpstat_common::{Result, error::Error};
use corpstat_format::{DocId, IndexEntry};

use crate::top_k::top_k;

/// Inverted-index output as a term lookup table.
#[derive(Debug, Clone, Default)]
pub struct InvertedIndex {
    entries: BTreeMap<String, IndexEntry>,
}

/// Everything known about one term of the index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostingsReport {
    pub term: String,
    pub doc_freq: u64,
    /// Total occurrences of the term in the corpus.
    pub total_tf: u64,
    /// The document of the first posting, i.e. the lowest document id.
    pub first_doc_id: DocId,
    /// `(doc_id, tf)` pairs by ascending document id.
    pub postings: Vec<(DocId, u32)>,
    /// Term frequency → number of documents with exactly that frequency.
    pub tf_histogram: BTreeMap<u32, u64>,
}

impl InvertedIndex {
    pub fn from_records(records: Vec<(String, IndexEntry)>) -> Result<InvertedIndex> {
        let mut entries = BTreeMap::new();
        for (term, entry) in records {
            if entries.contains_key(&term) {
                return Err(Error::consistency(format!(
                    "term '{term}' occurs more than once"
                )));
            }
            entries.insert(term, entry);
        }
        Ok(InvertedIndex { entries })
    }

    /// Number of distinct terms.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, term: &str) -> Result<&IndexEntry> {
        self.entries
            .get(term)
            .ok_or_else(|| Error::not_found(format!("postings of '{term}'")))
    }

    pub fn lookup(&self, term: &str) -> Result<PostingsReport> {
        let entry = self.get(term)?;
        let mut tf_histogram = BTreeMap::new();
        for posting in entry.postings() {
            *tf_histogram.entry(posting.tf).or_insert(0u64) += 1;
        }
        Ok(PostingsReport {
            term: term.to_string(),
            doc_freq: entry.doc_freq(),
            total_tf: entry.total_tf(),
            first_doc_id: entry.postings()[0].doc_id,
            postings: entry
                .postings()
                .iter()
                .map(|posting| (posting.doc_id, posting.tf))
                .collect(),
            tf_histogram,
        })
    }

    /// The `k` terms with the highest document frequency, ties by ascending term.
    pub fn top_terms(&self, k: usize) -> Vec<(String, u64)> {
        top_k(
            self.entries
                .iter()
                .map(|(term, entry)| (term.clone(), entry.doc_freq())),
            k,
        )
    }
}
