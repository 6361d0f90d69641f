//! The corpus statistics jobs.
//!
//! - [`BigramCountJob`]: occurrences of every adjacent word pair.
//! - [`RelativeFrequencyJob`]: the conditional probability `P(right | left)` of every
//!   pair, computed in a single pass with the order-inversion pattern.
//! - [`InvertedIndexJob`]: document frequency and postings of every term.
//!
//! All jobs run on [`corpstat_mapreduce::JobRunner`] and persist through
//! [`corpstat_mapreduce::write_text_output`].

mod bigram_count;
mod inverted_index;
mod relative_frequency;

pub use bigram_count::BigramCountJob;
pub use inverted_index::InvertedIndexJob;
pub use relative_frequency::RelativeFrequencyJob;

