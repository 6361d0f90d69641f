//! Bigram extraction from a single record.

use std::iter;

use corpstat_format::BigramKey;
use itertools::Itertools;

use crate::analyzer::TextAnalyzer;

/// Emits the adjacent word pairs of a record.
///
/// A rolling window over the record's terms yields `(previous, current)` for every term
/// after the first. When marginals are enabled, each pair is immediately followed by
/// `(previous, Marker)`, so every bigram occurrence contributes one unit to its own
/// count and one unit to its left word's marginal count.
///
/// Records with fewer than two terms yield nothing. Every emitted key owns its words;
/// nothing handed out aliases a buffer that is later reused.
#[derive(Debug, Clone, Default)]
pub struct BigramExtractor {
    analyzer: TextAnalyzer,
    emit_marginals: bool,
}

impl BigramExtractor {
    /// Creates an extractor emitting plain bigrams only.
    pub fn new(analyzer: TextAnalyzer) -> BigramExtractor {
        BigramExtractor {
            analyzer,
            emit_marginals: false,
        }
    }

    /// Creates an extractor that follows every bigram with its marginal key.
    pub fn with_marginals(analyzer: TextAnalyzer) -> BigramExtractor {
        BigramExtractor {
            analyzer,
            emit_marginals: true,
        }
    }

    /// Lazily yields the bigram keys of `text`, each with an implied weight of 1.
    pub fn bigrams<'a>(&'a self, text: &'a str) -> impl Iterator<Item = BigramKey> + 'a {
        self.analyzer
            .terms(text)
            .tuple_windows()
            .flat_map(move |(previous, current)| {
                let marginal = self
                    .emit_marginals
                    .then(|| BigramKey::marginal(&*previous));
                iter::once(BigramKey::pair(previous, current)).chain(marginal)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(keys: impl Iterator<Item = BigramKey>) -> Vec<String> {
        keys.map(|k| k.to_string()).collect()
    }

    #[test]
    fn test_plain_bigrams() {
        let extractor = BigramExtractor::new(TextAnalyzer::default());
        assert_eq!(
            render(extractor.bigrams("the king is the king")),
            vec!["(the, king)", "(king, is)", "(is, the)", "(the, king)"]
        );
    }

    #[test]
    fn test_bigrams_with_marginals() {
        let extractor = BigramExtractor::with_marginals(TextAnalyzer::default());
        assert_eq!(
            render(extractor.bigrams("the king is dead")),
            vec![
                "(the, king)",
                "(the, ***)",
                "(king, is)",
                "(king, ***)",
                "(is, dead)",
                "(is, ***)",
            ]
        );
    }

    #[test]
    fn test_short_records_emit_nothing() {
        let extractor = BigramExtractor::with_marginals(TextAnalyzer::default());
        assert_eq!(extractor.bigrams("").count(), 0);
        assert_eq!(extractor.bigrams("   ").count(), 0);
        assert_eq!(extractor.bigrams("alone").count(), 0);
        assert_eq!(extractor.bigrams("a b").count(), 2);
    }

    #[test]
    fn test_one_pair_per_adjacent_position() {
        let extractor = BigramExtractor::new(TextAnalyzer::default());
        let line = "a a a a";
        assert_eq!(extractor.bigrams(line).count(), 3);
        assert!(extractor.bigrams(line).all(|k| k == BigramKey::pair("a", "a")));
    }
}
