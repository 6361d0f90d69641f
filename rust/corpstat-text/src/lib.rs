//! Record-level text processing for the corpus statistics jobs.
//!
//! This crate turns one line of raw text into the per-record emissions the jobs need:
//!
//! - **Tokenizers** ([`Tokenizer`]): split a line into an ordered, lazily produced
//!   sequence of word tokens. The default tokenizer splits on runs of whitespace and
//!   performs no normalization.
//! - **Analyzer** ([`TextAnalyzer`]): a tokenizer plus the term policy (optional case
//!   folding) shared by all extractors.
//! - **Bigram extraction** ([`BigramExtractor`]): adjacent word pairs, optionally
//!   followed by a `(left, Marker)` marginal emission per pair.
//! - **Term frequencies** ([`TermFrequencies`]): the per-record term → count
//!   distribution used to build postings.
//!
//! # Quick Start
//!
//! ```rust
//! use corpstat_text::{BigramExtractor, TextAnalyzer};
//!
//! let extractor = BigramExtractor::new(TextAnalyzer::default());
//! let pairs: Vec<String> = extractor
//!     .bigrams("the king is dead")
//!     .map(|key| key.to_string())
//!     .collect();
//! assert_eq!(pairs, ["(the, king)", "(king, is)", "(is, dead)"]);
//! ```

mod analyzer;
mod bigrams;
mod term_freq;
mod tokenizers;

pub use analyzer::{ExtractorConfig, TextAnalyzer};
pub use bigrams::BigramExtractor;
pub use term_freq::TermFrequencies;
pub use tokenizers::{Tokenizer, TokenizerKind, TokenizerType, create_tokenizer};
