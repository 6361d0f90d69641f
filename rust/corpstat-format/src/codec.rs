//! Line-oriented text encoding of aggregation output.
//!
//! One record per line: `<key-text>\t<value-text>`. Composite keys and values use
//! parenthesis/bracket grouping:
//!
//! ```text
//! (the, king)\t2
//! (the, ***)\t2
//! (the, king)\t1
//! king\t(2, [(0, 2), (19, 1)])
//! ```
//!
//! Words are written verbatim, except that a word beginning with `\` or equal to the
//! marker text gets a single leading `\`. Decoding strips exactly one such escape, so
//! every word round-trips and the marker stays unambiguous.

use corpstat_common::{Result, error::Error, verify_data};

use crate::{
    bigram::{BigramKey, Continuation, MARKER_TEXT},
    posting::{IndexEntry, Posting},
};

const ESCAPE: char = '\\';
const FIELD_SEPARATOR: char = '\t';
const ITEM_SEPARATOR: &str = ", ";

/// A key or value that can be written to and read back from the persisted text format.
pub trait TextCodec: Sized {
    /// Appends the text form of `self` to `out`.
    fn encode(&self, out: &mut String);

    /// Parses a value previously produced by [`TextCodec::encode`].
    fn decode(text: &str) -> Result<Self>;
}

/// Renders one `<key>\t<value>` line, without the trailing newline.
pub fn encode_record<K: TextCodec, V: TextCodec>(key: &K, value: &V) -> String {
    let mut line = String::new();
    key.encode(&mut line);
    line.push(FIELD_SEPARATOR);
    value.encode(&mut line);
    line
}

/// Splits a line at its first tab and decodes both halves.
pub fn decode_record<K: TextCodec, V: TextCodec>(line: &str) -> Result<(K, V)> {
    let (key, value) = line
        .split_once(FIELD_SEPARATOR)
        .ok_or_else(|| Error::invalid_format("record", "missing tab separator"))?;
    Ok((K::decode(key)?, V::decode(value)?))
}

fn encode_word(word: &str, out: &mut String) {
    if word.starts_with(ESCAPE) || word == MARKER_TEXT {
        out.push(ESCAPE);
    }
    out.push_str(word);
}

fn decode_word(text: &str) -> Result<String> {
    verify_data!(word, !text.is_empty());
    Ok(text.strip_prefix(ESCAPE).unwrap_or(text).to_string())
}

/// Strips a `open ... close` grouping, failing with a format error naming `element`.
fn strip_group<'a>(text: &'a str, open: char, close: char, element: &str) -> Result<&'a str> {
    text.strip_prefix(open)
        .and_then(|rest| rest.strip_suffix(close))
        .ok_or_else(|| {
            Error::invalid_format(element, format!("expected {open}...{close}, got '{text}'"))
        })
}

fn split_pair<'a>(text: &'a str, element: &str) -> Result<(&'a str, &'a str)> {
    text.split_once(ITEM_SEPARATOR).ok_or_else(|| {
        Error::invalid_format(element, format!("missing '{ITEM_SEPARATOR}' in '{text}'"))
    })
}

impl TextCodec for BigramKey {
    fn encode(&self, out: &mut String) {
        out.push('(');
        encode_word(&self.left, out);
        out.push_str(ITEM_SEPARATOR);
        match &self.right {
            Continuation::Marker => out.push_str(MARKER_TEXT),
            Continuation::Word(word) => encode_word(word, out),
        }
        out.push(')');
    }

    fn decode(text: &str) -> Result<Self> {
        let inner = strip_group(text, '(', ')', "bigram")?;
        let (left, right) = split_pair(inner, "bigram")?;
        if left == MARKER_TEXT {
            return Err(Error::invalid_format(
                "bigram",
                "the marker cannot be the left word",
            ));
        }
        let right = if right == MARKER_TEXT {
            Continuation::Marker
        } else {
            Continuation::Word(decode_word(right)?)
        };
        Ok(BigramKey {
            left: decode_word(left)?,
            right,
        })
    }
}

/// Terms of the inverted index are plain words.
impl TextCodec for String {
    fn encode(&self, out: &mut String) {
        encode_word(self, out);
    }

    fn decode(text: &str) -> Result<Self> {
        decode_word(text)
    }
}

impl TextCodec for u64 {
    fn encode(&self, out: &mut String) {
        out.push_str(&self.to_string());
    }

    fn decode(text: &str) -> Result<Self> {
        Ok(text.trim().parse()?)
    }
}

/// Relative frequencies use the shortest decimal form that parses back to the same `f64`.
impl TextCodec for f64 {
    fn encode(&self, out: &mut String) {
        out.push_str(&self.to_string());
    }

    fn decode(text: &str) -> Result<Self> {
        let value: f64 = text.trim().parse()?;
        verify_data!(value, value.is_finite());
        Ok(value)
    }
}

impl TextCodec for Posting {
    fn encode(&self, out: &mut String) {
        out.push_str(&format!("({}{}{})", self.doc_id, ITEM_SEPARATOR, self.tf));
    }

    fn decode(text: &str) -> Result<Self> {
        let inner = strip_group(text, '(', ')', "posting")?;
        let (doc_id, tf) = split_pair(inner, "posting")?;
        Ok(Posting {
            doc_id: doc_id.parse()?,
            tf: tf.parse()?,
        })
    }
}

impl TextCodec for IndexEntry {
    fn encode(&self, out: &mut String) {
        out.push('(');
        out.push_str(&self.doc_freq().to_string());
        out.push_str(ITEM_SEPARATOR);
        out.push('[');
        for (i, posting) in self.postings().iter().enumerate() {
            if i > 0 {
                out.push_str(ITEM_SEPARATOR);
            }
            posting.encode(out);
        }
        out.push_str("])");
    }

    fn decode(text: &str) -> Result<Self> {
        let inner = strip_group(text, '(', ')', "index entry")?;
        let (doc_freq, postings) = split_pair(inner, "index entry")?;
        let doc_freq: u64 = doc_freq.parse()?;
        let postings = strip_group(postings, '[', ']', "postings")?;
        let postings = strip_group(postings, '(', ')', "postings")?;
        let postings = postings
            .split("), (")
            .map(|item| Posting::decode(&format!("({item})")))
            .collect::<Result<Vec<_>>>()?;
        verify_data!(doc_freq, doc_freq == postings.len() as u64);
        IndexEntry::from_sorted(postings)
            .map_err(|e| Error::invalid_format("postings", e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use corpstat_common::error::ErrorKind;

    fn round_trip<K, V>(key: K, value: V) -> String
    where
        K: TextCodec + PartialEq + std::fmt::Debug,
        V: TextCodec + PartialEq + std::fmt::Debug,
    {
        let line = encode_record(&key, &value);
        let (k, v) = decode_record::<K, V>(&line).unwrap();
        assert_eq!(k, key);
        assert_eq!(v, value);
        line
    }

    #[test]
    fn test_bigram_lines() {
        assert_eq!(round_trip(BigramKey::pair("the", "king"), 2u64), "(the, king)\t2");
        assert_eq!(round_trip(BigramKey::marginal("the"), 2.0f64), "(the, ***)\t2");
        assert_eq!(
            round_trip(BigramKey::pair("the", "king"), 0.3333333333333333f64),
            "(the, king)\t0.3333333333333333"
        );
    }

    #[test]
    fn test_marker_lookalike_words_are_escaped() {
        assert_eq!(
            round_trip(BigramKey::pair("***", "***"), 1u64),
            "(\\***, \\***)\t1"
        );
        assert_eq!(
            round_trip(BigramKey::pair("\\x", "a,b)"), 1u64),
            "(\\\\x, a,b))\t1"
        );
        let (key, _) = decode_record::<BigramKey, u64>("(a, \\***)\t3").unwrap();
        assert_eq!(key, BigramKey::pair("a", "***"));
        assert!(!key.is_marginal());
    }

    #[test]
    fn test_index_entry_line() {
        let entry =
            IndexEntry::from_sorted(vec![Posting::new(0, 2), Posting::new(1, 1)]).unwrap();
        assert_eq!(
            round_trip("a".to_string(), entry),
            "a\t(2, [(0, 2), (1, 1)])"
        );
        let single = IndexEntry::from_sorted(vec![Posting::new(42, 7)]).unwrap();
        assert_eq!(round_trip("z".to_string(), single), "z\t(1, [(42, 7)])");
    }

    #[test]
    fn test_malformed_lines() {
        let cases = [
            "(the, king) 2",
            "the, king)\t2",
            "(the king)\t2",
            "(the, king)\tx",
            "(, king)\t1",
            "(***, king)\t1",
        ];
        for line in cases {
            let err = decode_record::<BigramKey, u64>(line).unwrap_err();
            assert!(
                matches!(err.kind(), ErrorKind::InvalidFormat { .. }),
                "{line}: {err}"
            );
        }

        let cases = [
            "a\t(2, [(0, 2)])",
            "a\t(1, [])",
            "a\t(2, [(1, 1), (0, 2)])",
            "a\t2, [(0, 2)]",
            "a\t(1, [(0 2)])",
        ];
        for line in cases {
            assert!(decode_record::<String, IndexEntry>(line).is_err(), "{line}");
        }
    }
}
