use std::collections::BTreeMap;

use itertools::Itertools;
use serde::Serialize;

use corpstat_common::{Result, error::Error, verify_arg};
use corpstat_format::{BigramKey, Continuation};

use crate::top_k::top_k;

/// Relative-frequency output as a lookup table.
///
/// Holds the marginal count of every left word and `P(right | left)` of every
/// observed pair.
#[derive(Debug, Clone, Default)]
pub struct RelativeFrequencyTable {
    entries: BTreeMap<BigramKey, f64>,
}

/// One factor of a chain probability.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChainStep {
    pub left: String,
    pub right: String,
    pub probability: f64,
}

impl RelativeFrequencyTable {
    /// # Errors
    ///
    /// Fails with a consistency error on a repeated key, on a pair whose left word
    /// has no marginal entry, on a marginal that is not a positive whole count, or on
    /// a probability outside `(0, 1]`.
    pub fn from_records(records: Vec<(BigramKey, f64)>) -> Result<RelativeFrequencyTable> {
        let mut entries = BTreeMap::new();
        for (key, value) in records {
            let valid = if key.is_marginal() {
                value >= 1.0 && value.fract() == 0.0
            } else {
                value > 0.0 && value <= 1.0
            };
            if !valid {
                return Err(Error::consistency(format!("{key} has invalid value {value}")));
            }
            if let Some(previous) = entries.insert(key.clone(), value) {
                return Err(Error::consistency(format!(
                    "{key} occurs more than once ({previous} and {value})"
                )));
            }
        }
        if let Some(orphan) = entries
            .keys()
            .find(|key| !key.is_marginal() && !entries.contains_key(&BigramKey::marginal(&*key.left)))
        {
            return Err(Error::consistency(format!(
                "{orphan} has no marginal entry"
            )));
        }
        Ok(RelativeFrequencyTable { entries })
    }

    /// Number of observed pairs, marginal entries excluded.
    pub fn pair_count(&self) -> usize {
        self.entries.keys().filter(|key| !key.is_marginal()).count()
    }

    /// Number of distinct left words.
    pub fn left_count(&self) -> usize {
        self.entries.keys().filter(|key| key.is_marginal()).count()
    }

    /// The number of pairs starting with `left`.
    pub fn marginal(&self, left: &str) -> Result<u64> {
        self.entries
            .get(&BigramKey::marginal(left))
            .map(|&count| count as u64)
            .ok_or_else(|| Error::not_found(format!("marginal count of '{left}'")))
    }

    /// `P(right | left)`.
    pub fn conditional(&self, left: &str, right: &str) -> Result<f64> {
        self.entries
            .get(&BigramKey::pair(left, right))
            .copied()
            .ok_or_else(|| Error::not_found(format!("P({right} | {left})")))
    }

    /// Every observed continuation of `left` with its probability, by descending
    /// probability and then ascending word.
    pub fn continuations(&self, left: &str) -> Result<Vec<(String, f64)>> {
        self.top_continuations(left, usize::MAX)
    }

    /// The `k` most probable continuations of `left`.
    pub fn top_continuations(&self, left: &str, k: usize) -> Result<Vec<(String, f64)>> {
        self.marginal(left)?;
        let continuations = self
            .entries
            .range(BigramKey::marginal(left)..)
            .skip(1)
            .take_while(|(key, _)| key.left == left)
            .filter_map(|(key, &probability)| match &key.right {
                Continuation::Word(word) => Some((word.clone(), probability)),
                Continuation::Marker => None,
            });
        Ok(top_k(continuations, k))
    }

    /// The factors `P(w[i+1] | w[i])` of a token chain.
    pub fn chain_steps<S: AsRef<str>>(&self, tokens: &[S]) -> Result<Vec<ChainStep>> {
        let words: Vec<&str> = tokens.iter().map(|token| token.as_ref()).collect();
        words
            .into_iter()
            .tuple_windows()
            .map(|(left, right)| {
                Ok(ChainStep {
                    left: left.to_string(),
                    right: right.to_string(),
                    probability: self.conditional(left, right)?,
                })
            })
            .collect()
    }

    /// `prior * P(w2 | w1) * P(w3 | w2) * ...` for `tokens = [w1, w2, w3, ...]`, where
    /// `prior` is the externally supplied probability of `w1`.
    ///
    /// # Errors
    ///
    /// - invalid argument for an empty chain or a prior outside `[0, 1]`;
    /// - not found when any conditional of the chain is absent. A missing pair is never
    ///   taken as probability zero.
    pub fn chain_probability<S: AsRef<str>>(&self, prior: f64, tokens: &[S]) -> Result<f64> {
        verify_arg!(tokens, !tokens.is_empty());
        verify_arg!(prior, (0.0..=1.0).contains(&prior));
        let steps = self.chain_steps(tokens)?;
        Ok(steps.iter().fold(prior, |product, step| product * step.probability))
    }
}
