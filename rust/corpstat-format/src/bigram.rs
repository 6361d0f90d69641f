//! Bigram keys and the marker sentinel used for marginal counts.

use std::fmt;

/// Text rendering of [`Continuation::Marker`] in persisted output.
///
/// Real words that would read back as the marker are escaped by the codec, so this
/// string never collides with a token taken from the corpus.
pub const MARKER_TEXT: &str = "***";

/// The right-hand component of a bigram key.
///
/// `Marker` stands for "any word following `left`" and carries the marginal count of
/// the left word. It is a dedicated variant rather than a reserved string, so no real
/// token can ever be mistaken for it.
///
/// The variant order is significant: the derived `Ord` sorts `Marker` before every
/// `Word`, which is what delivers the marginal entry of a group to the reducer ahead
/// of the individual bigram counts it normalizes.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Continuation {
    /// Sentinel for the marginal entry `(left, *)`.
    Marker,
    /// A real word following `left`.
    Word(String),
}

impl Continuation {
    pub fn is_marker(&self) -> bool {
        matches!(self, Continuation::Marker)
    }

    /// Returns the word, or `None` for the marker.
    pub fn as_word(&self) -> Option<&str> {
        match self {
            Continuation::Marker => None,
            Continuation::Word(word) => Some(word),
        }
    }
}

impl fmt::Display for Continuation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Continuation::Marker => f.write_str(MARKER_TEXT),
            Continuation::Word(word) => f.write_str(word),
        }
    }
}

/// An ordered pair of adjacent tokens, or a `(left, Marker)` marginal entry.
///
/// The total order is primarily by `left` (lexicographic, byte-wise) and secondarily by
/// `right`, with [`Continuation::Marker`] first.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BigramKey {
    /// The first word of the pair; also the grouping and partitioning key.
    pub left: String,
    /// The following word, or the marker.
    pub right: Continuation,
}

impl BigramKey {
    /// Creates the key for an observed `(left, right)` word pair.
    pub fn pair(left: impl Into<String>, right: impl Into<String>) -> BigramKey {
        BigramKey {
            left: left.into(),
            right: Continuation::Word(right.into()),
        }
    }

    /// Creates the marginal key `(left, Marker)`.
    pub fn marginal(left: impl Into<String>) -> BigramKey {
        BigramKey {
            left: left.into(),
            right: Continuation::Marker,
        }
    }

    pub fn is_marginal(&self) -> bool {
        self.right.is_marker()
    }
}

impl fmt::Display for BigramKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.left, self.right)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_sorts_first_within_left() {
        let mut keys = vec![
            BigramKey::pair("the", "king"),
            BigramKey::pair("is", "the"),
            BigramKey::marginal("the"),
            BigramKey::pair("the", "a"),
            BigramKey::marginal("is"),
        ];
        keys.sort();
        assert_eq!(
            keys,
            vec![
                BigramKey::marginal("is"),
                BigramKey::pair("is", "the"),
                BigramKey::marginal("the"),
                BigramKey::pair("the", "a"),
                BigramKey::pair("the", "king"),
            ]
        );
    }

    #[test]
    fn test_marker_precedes_words_that_sort_low() {
        // Byte-wise, '!' sorts before '*', but the marker must still come first.
        assert!(BigramKey::marginal("a") < BigramKey::pair("a", "!"));
        assert!(BigramKey::marginal("a") < BigramKey::pair("a", ""));
        // Left dominates: the marker of a later word sorts after any pair of an earlier one.
        assert!(BigramKey::pair("a", "zzz") < BigramKey::marginal("b"));
    }

    #[test]
    fn test_display() {
        assert_eq!(BigramKey::pair("the", "king").to_string(), "(the, king)");
        assert_eq!(BigramKey::marginal("the").to_string(), "(the, ***)");
        assert_eq!(Continuation::Word("x".into()).as_word(), Some("x"));
        assert_eq!(Continuation::Marker.as_word(), None);
    }
}
