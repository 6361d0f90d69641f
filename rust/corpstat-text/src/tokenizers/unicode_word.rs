//! Tokenizer that keeps runs of alphanumeric characters and drops everything else.

use super::{Tokenizer, TokenizerKind};

/// Splits text into maximal runs of Unicode alphanumeric characters, so punctuation
/// attached to a word (`"king,"`, `"(dead)"`) does not produce distinct tokens.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnicodeWordTokenizer;

/// Yields the alphanumeric runs of the remaining input.
pub struct WordTokenIterator<'a> {
    rest: &'a str,
}

impl<'a> WordTokenIterator<'a> {
    pub fn new(input: &'a str) -> Self {
        WordTokenIterator { rest: input }
    }
}

impl<'a> Iterator for WordTokenIterator<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let start = self.rest.find(char::is_alphanumeric)?;
        let tail = &self.rest[start..];
        let len = tail
            .find(|c: char| !c.is_alphanumeric())
            .unwrap_or(tail.len());
        let (word, rest) = tail.split_at(len);
        self.rest = rest;
        Some(word)
    }
}

impl Tokenizer for UnicodeWordTokenizer {
    type TokenIter<'a> = WordTokenIterator<'a>;

    fn tokenize<'a>(&'a self, input: &'a str) -> Self::TokenIter<'a> {
        WordTokenIterator::new(input)
    }

    fn kind(&self) -> TokenizerKind {
        TokenizerKind::UnicodeWord
    }
}
