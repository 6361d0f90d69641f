//! Analyses of bigram-count and relative-frequency output.

use std::path::Path;

use anyhow::{Context, Result};

use corpstat_analysis::{BigramCounts, RelativeFrequencyTable, read_part_files};
use corpstat_format::{BigramKey, encode_record};

fn load_relative_frequencies(dir: &Path) -> Result<RelativeFrequencyTable> {
    let records = read_part_files(dir)
        .with_context(|| format!("Failed to read relative frequencies: {}", dir.display()))?;
    RelativeFrequencyTable::from_records(records)
        .with_context(|| format!("Inconsistent relative frequencies in {}", dir.display()))
}

pub fn bigrams(dir: &Path, top: usize, json: bool) -> Result<()> {
    let records = read_part_files(dir)
        .with_context(|| format!("Failed to read bigram counts: {}", dir.display()))?;
    let counts = BigramCounts::from_records(records)
        .with_context(|| format!("Invalid bigram counts in {}", dir.display()))?;
    let summary = counts.summary(top);

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }
    println!("total number of unique bigrams: {}", summary.unique_bigrams);
    println!("total number of bigrams: {}", summary.total_bigrams);
    println!("number of bigrams that appear only twice: {}", summary.doubletons);
    println!();
    println!("{} most frequent bigrams:", summary.top.len());
    for ranked in &summary.top {
        println!("{}\t{}", ranked.bigram, ranked.count);
    }
    println!(
        "cumulative frequency of the top {} bigrams: {}",
        summary.top.len(),
        summary.top_share
    );
    Ok(())
}

pub fn continuations(dir: &Path, word: &str, top: Option<usize>) -> Result<()> {
    let table = load_relative_frequencies(dir)?;
    for line in continuation_lines(&table, word, top.unwrap_or(usize::MAX))? {
        println!("{line}");
    }
    Ok(())
}

/// The marginal of `word` followed by its top continuations, in the persisted line format.
fn continuation_lines(table: &RelativeFrequencyTable, word: &str, top: usize) -> Result<Vec<String>> {
    let marginal = table.marginal(word)?;
    let mut lines = vec![encode_record(&BigramKey::marginal(word), &marginal)];
    for (right, probability) in table.top_continuations(word, top)? {
        lines.push(encode_record(&BigramKey::pair(word, right), &probability));
    }
    Ok(lines)
}

pub fn chain(dir: &Path, prior: f64, words: &[String]) -> Result<()> {
    let table = load_relative_frequencies(dir)?;
    let probability = table.chain_probability(prior, words)?;
    if let Some(first) = words.first() {
        println!("P({first}) = {prior}");
    }
    for step in table.chain_steps(words)? {
        println!("P({} | {}) = {}", step.right, step.left, step.probability);
    }
    println!("P({}) = {probability}", words.join(" "));
    Ok(())
}
