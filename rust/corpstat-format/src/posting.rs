//! Postings and inverted-index entries.

use std::cmp::Ordering;

use corpstat_common::{Result, error::Error};

/// Identifier of an input record (document). Unique within one corpus snapshot.
pub type DocId = u64;

/// Records that a term occurs `tf` times in document `doc_id`.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Posting {
    /// The document containing the term.
    pub doc_id: DocId,
    /// Number of occurrences of the term within the document. Always at least 1.
    pub tf: u32,
}

impl Posting {
    pub fn new(doc_id: DocId, tf: u32) -> Posting {
        Posting { doc_id, tf }
    }
}

impl Ord for Posting {
    /// Postings order by document id. Within one term's postings list document ids are
    /// unique, so the term frequency only participates to keep the order total.
    fn cmp(&self, other: &Posting) -> Ordering {
        (self.doc_id, self.tf).cmp(&(other.doc_id, other.tf))
    }
}

impl PartialOrd for Posting {
    fn partial_cmp(&self, other: &Posting) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// The aggregated inverted-index value of one term: its document frequency and its
/// postings list.
///
/// # Invariants
///
/// - `postings` is non-empty and strictly increasing by document id;
/// - `doc_freq == postings.len()`.
///
/// Both are established by [`IndexEntry::from_sorted`], the only constructor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    doc_freq: u64,
    postings: Vec<Posting>,
}

impl IndexEntry {
    /// Builds an entry from a postings list already sorted by document id.
    ///
    /// # Errors
    ///
    /// Returns a consistency error if the list is empty or if document ids are not
    /// strictly increasing (a duplicate document id means the same document was
    /// counted twice upstream).
    pub fn from_sorted(postings: Vec<Posting>) -> Result<IndexEntry> {
        if postings.is_empty() {
            return Err(Error::consistency("postings list is empty"));
        }
        if let Some(pair) = postings.windows(2).find(|w| w[0].doc_id >= w[1].doc_id) {
            return Err(Error::consistency(format!(
                "postings are not strictly increasing by document id: {} followed by {}",
                pair[0].doc_id, pair[1].doc_id
            )));
        }
        Ok(IndexEntry {
            doc_freq: postings.len() as u64,
            postings,
        })
    }

    /// Number of distinct documents containing the term.
    pub fn doc_freq(&self) -> u64 {
        self.doc_freq
    }

    /// Postings sorted by ascending document id.
    pub fn postings(&self) -> &[Posting] {
        &self.postings
    }

    pub fn into_postings(self) -> Vec<Posting> {
        self.postings
    }

    /// Total number of occurrences of the term across the corpus.
    pub fn total_tf(&self) -> u64 {
        self.postings.iter().map(|p| p.tf as u64).sum()
    }
}
