//! Whitespace Tokenizer - splits on runs of whitespace.

use std::str::SplitWhitespace;

use super::{Tokenizer, TokenizerKind};

/// Whitespace Tokenizer - the default tokenizer of all corpus jobs.
///
/// Splits the input on runs of Unicode whitespace and yields every non-empty piece
/// unchanged. No case folding or punctuation stripping is performed; an empty or
/// all-whitespace line yields no tokens.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhitespaceTokenizer;

impl Tokenizer for WhitespaceTokenizer {
    type TokenIter<'a> = SplitWhitespace<'a>;

    fn tokenize<'a>(&'a self, input: &'a str) -> Self::TokenIter<'a> {
        input.split_whitespace()
    }

    fn kind(&self) -> TokenizerKind {
        TokenizerKind::Whitespace
    }
}
