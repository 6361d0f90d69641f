//! Readers and analyses over persisted job output.
//!
//! [`reader`] parses part files back into typed records; everything else in this
//! crate is a pure function of those records and never touches the file system:
//!
//! - [`BigramCounts`]: unique/total counts, count-of-counts and top-K ranking of
//!   bigram-count output.
//! - [`RelativeFrequencyTable`]: conditional probability lookups, ranked
//!   continuations and chain probabilities over relative-frequency output.
//! - [`InvertedIndex`]: postings lookups with term-frequency histograms, and terms
//!   ranked by document frequency.

mod bigram_counts;
mod postings;
pub mod reader;
mod relative_frequency;
mod top_k;

pub use bigram_counts::{BigramCountSummary, BigramCounts, RankedBigram};
pub use postings::{InvertedIndex, PostingsReport};
pub use reader::{RecordReader, parse_records, read_part_files};
pub use relative_frequency::{ChainStep, RelativeFrequencyTable};
pub use top_k::{Weight, top_k};
