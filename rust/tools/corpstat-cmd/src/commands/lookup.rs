//! Postings lookup over inverted-index output.

use std::path::Path;

use anyhow::{Context, Result};

use corpstat_analysis::{InvertedIndex, PostingsReport, read_part_files};

pub fn run(dir: &Path, terms: &[String], json: bool) -> Result<()> {
    let records = read_part_files(dir)
        .with_context(|| format!("Failed to read inverted index: {}", dir.display()))?;
    let index = InvertedIndex::from_records(records)
        .with_context(|| format!("Inconsistent inverted index in {}", dir.display()))?;
    log::debug!("loaded {} terms from {}", index.len(), dir.display());

    let reports = terms
        .iter()
        .map(|term| index.lookup(term))
        .collect::<corpstat_common::Result<Vec<_>>>()?;
    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        for report in &reports {
            print_report(report);
        }
    }
    Ok(())
}

fn print_report(report: &PostingsReport) {
    println!("term: {}", report.term);
    println!("document frequency: {}", report.doc_freq);
    println!("total occurrences: {}", report.total_tf);
    println!("first posting document: {}", report.first_doc_id);
    println!("term frequency histogram:");
    for (tf, docs) in &report.tf_histogram {
        println!("{tf}\t{docs}");
    }
    println!();
}
