use corpstat_common::{Result, error::Error};
use corpstat_format::{IndexEntry, Posting};
use corpstat_mapreduce::{Emitter, Group, MapReduceJob, Record, hash_partition};
use corpstat_text::{TermFrequencies, TextAnalyzer};

/// Builds an inverted index: for every term, its document frequency and the postings
/// `(doc_id, tf)` sorted by document id.
///
/// Each record is one document. The mapper emits one posting per distinct term of the
/// document, carrying the term's in-document frequency.
#[derive(Debug, Clone, Default)]
pub struct InvertedIndexJob {
    analyzer: TextAnalyzer,
}

impl InvertedIndexJob {
    pub fn new(analyzer: TextAnalyzer) -> InvertedIndexJob {
        InvertedIndexJob { analyzer }
    }
}

impl MapReduceJob for InvertedIndexJob {
    type Key = String;
    type Value = Posting;
    type OutputKey = String;
    type OutputValue = IndexEntry;

    fn name(&self) -> &str {
        "inverted-index"
    }

    fn map(&self, record: &Record, out: &mut dyn Emitter<String, Posting>) -> Result<()> {
        let frequencies = TermFrequencies::from_text(&self.analyzer, &record.text);
        for (term, tf) in frequencies.into_sorted_vec() {
            out.emit(term, Posting::new(record.doc_id, tf))?;
        }
        Ok(())
    }

    fn partition(&self, term: &String, partitions_count: usize) -> usize {
        hash_partition(term.as_bytes(), partitions_count)
    }

    fn reduce(&self, group: Group<String, Posting>, out: &mut dyn Emitter<String, IndexEntry>) -> Result<()> {
        for run in group.into_runs() {
            let mut postings = run.values;
            postings.sort_by_key(|posting| posting.doc_id);
            let entry = IndexEntry::from_sorted(postings).map_err(|e| {
                Error::consistency(format!("postings of term '{}': {e}", run.key))
            })?;
            out.emit(run.key, entry)?;
        }
        Ok(())
    }
}
