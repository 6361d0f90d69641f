//! Tokenizers for splitting record text into word tokens.
//!
//! Tokenizers return iterators of string slices borrowed from the input, so splitting a
//! line allocates nothing. The sequence is lazy, finite and restartable: calling
//! [`Tokenizer::tokenize`] again on the same input yields the same tokens.

pub mod unicode_word;
pub mod whitespace;

use corpstat_common::{Result, error::Error};
pub use unicode_word::UnicodeWordTokenizer;
pub use whitespace::WhitespaceTokenizer;

/// A tokenizer extracts word tokens from one line of text.
pub trait Tokenizer: Send + Sync {
    /// The iterator type returned by tokenize.
    type TokenIter<'a>: Iterator<Item = &'a str>
    where
        Self: 'a;

    /// Extract tokens from the input string, in order of appearance.
    /// Tokens never contain whitespace and are never empty.
    fn tokenize<'a>(&'a self, input: &'a str) -> Self::TokenIter<'a>;

    /// Get the kind of the tokenizer.
    fn kind(&self) -> TokenizerKind;

    /// Get the name of the tokenizer kind as a static string.
    fn name(&self) -> &'static str {
        self.kind().name()
    }
}

/// Creates a tokenizer instance based on the provided name string.
///
/// # Errors
/// Returns an [`Error::invalid_arg`] if the provided tokenizer name is not recognized.
pub fn create_tokenizer(name: &str) -> Result<TokenizerType> {
    match name.try_into()? {
        TokenizerKind::Whitespace => Ok(TokenizerType::Whitespace(WhitespaceTokenizer)),
        TokenizerKind::UnicodeWord => Ok(TokenizerType::UnicodeWord(UnicodeWordTokenizer)),
    }
}

/// Tokenizer kinds, addressable by name from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenizerKind {
    /// Splits on runs of whitespace; punctuation stays attached to words.
    Whitespace,
    /// Extracts maximal runs of alphanumeric characters.
    UnicodeWord,
}

impl TryFrom<&str> for TokenizerKind {
    type Error = corpstat_common::error::Error;

    fn try_from(name: &str) -> Result<Self> {
        match name {
            "whitespace" => Ok(TokenizerKind::Whitespace),
            "unicode-word" => Ok(TokenizerKind::UnicodeWord),
            _ => Err(Error::invalid_arg(
                "name",
                format!("Unrecognized tokenizer: {name}"),
            )),
        }
    }
}

impl TokenizerKind {
    pub const fn name(&self) -> &'static str {
        match self {
            TokenizerKind::Whitespace => "whitespace",
            TokenizerKind::UnicodeWord => "unicode-word",
        }
    }
}

/// A tokenizer chosen at run time by name, see [`create_tokenizer`].
#[derive(Debug, Clone)]
pub enum TokenizerType {
    Whitespace(WhitespaceTokenizer),
    UnicodeWord(UnicodeWordTokenizer),
}

impl Default for TokenizerType {
    fn default() -> Self {
        TokenizerType::Whitespace(WhitespaceTokenizer)
    }
}

impl Tokenizer for TokenizerType {
    type TokenIter<'a> = Box<dyn Iterator<Item = &'a str> + 'a>;

    fn tokenize<'a>(&'a self, input: &'a str) -> Self::TokenIter<'a> {
        match self {
            TokenizerType::Whitespace(tokenizer) => Box::new(tokenizer.tokenize(input)),
            TokenizerType::UnicodeWord(tokenizer) => Box::new(tokenizer.tokenize(input)),
        }
    }

    fn kind(&self) -> TokenizerKind {
        match self {
            TokenizerType::Whitespace(tokenizer) => tokenizer.kind(),
            TokenizerType::UnicodeWord(tokenizer) => tokenizer.kind(),
        }
    }
}
