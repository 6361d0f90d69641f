//! Typed entities exchanged between the aggregation jobs and the result readers,
//! together with the line-oriented text encoding used to persist them.
//!
//! # Entities
//!
//! - [`BigramKey`]: an ordered `(left, right)` pair whose right component is either a
//!   real word or the [`Continuation::Marker`] sentinel. The derived total order places
//!   the marker before every real word sharing the same `left`.
//! - [`Posting`]: a `(document id, term frequency)` pair.
//! - [`IndexEntry`]: the document frequency and the sorted postings list of one term.
//!
//! # Text encoding
//!
//! Every persisted record occupies one line of the form `<key-text>\t<value-text>`.
//! The [`TextCodec`] trait renders and parses individual keys and values, and
//! [`encode_record`] / [`decode_record`] handle the whole line.

pub mod bigram;
pub mod codec;
pub mod posting;

pub use bigram::{BigramKey, Continuation, MARKER_TEXT};
pub use codec::{TextCodec, decode_record, encode_record};
pub use posting::{DocId, IndexEntry, Posting};
