//! Tokenizer plus term policy, shared by the extractors.

use std::borrow::Cow;

use corpstat_common::Result;

use crate::tokenizers::{Tokenizer, TokenizerType, create_tokenizer};

/// Configuration of record-level term extraction.
#[derive(Debug, Clone)]
pub struct ExtractorConfig {
    /// Name of the tokenizer, see [`crate::TokenizerKind`].
    pub tokenizer: String,
    /// Lower-case every token before it is emitted.
    pub fold_case: bool,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        ExtractorConfig {
            tokenizer: "whitespace".to_string(),
            fold_case: false,
        }
    }
}

/// Produces the terms of one record: tokenization followed by the optional case folding.
///
/// Case folding is an extraction policy, not a tokenizer concern, so the same
/// tokenizer output can feed case-sensitive and case-insensitive jobs.
#[derive(Debug, Clone, Default)]
pub struct TextAnalyzer {
    tokenizer: TokenizerType,
    fold_case: bool,
}

impl TextAnalyzer {
    pub fn new(tokenizer: TokenizerType, fold_case: bool) -> TextAnalyzer {
        TextAnalyzer {
            tokenizer,
            fold_case,
        }
    }

    /// # Errors
    /// Returns an invalid argument error for an unknown tokenizer name.
    pub fn from_config(config: &ExtractorConfig) -> Result<TextAnalyzer> {
        Ok(TextAnalyzer::new(
            create_tokenizer(&config.tokenizer)?,
            config.fold_case,
        ))
    }

    pub fn fold_case(&self) -> bool {
        self.fold_case
    }

    /// Terms of `text` in order of appearance. Borrowed from the input unless case
    /// folding had to produce a new string.
    pub fn terms<'a>(&'a self, text: &'a str) -> impl Iterator<Item = Cow<'a, str>> + 'a {
        self.tokenizer.tokenize(text).map(move |token| {
            if self.fold_case && token.chars().any(char::is_uppercase) {
                Cow::Owned(token.to_lowercase())
            } else {
                Cow::Borrowed(token)
            }
        })
    }
}
