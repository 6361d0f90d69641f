//! Command implementations for corpstat

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use corpstat_mapreduce::{DocIdPolicy, JobParams};
use corpstat_text::{ExtractorConfig, TextAnalyzer};

pub mod analyze;
pub mod lookup;
pub mod run_job;

/// Installs the logger. `RUST_LOG` wins over the verbosity flag.
pub fn init_logging(verbose: u8) {
    let default_filter = if verbose > 0 { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp_millis()
        .init();
}

/// Input, output and execution options shared by the job commands.
#[derive(Args, Debug, Clone)]
pub struct JobArgs {
    /// Input text file, or a directory of text files
    pub input: PathBuf,

    /// Output directory; replaced if it already exists
    pub output: PathBuf,

    /// Number of map tasks (defaults to the number of CPUs)
    #[arg(long)]
    pub mappers: Option<usize>,

    /// Number of reduce units, i.e. of output part files
    #[arg(long, default_value_t = 1)]
    pub reducers: usize,

    /// Maximum number of worker threads; 1 runs every task sequentially
    #[arg(long)]
    pub threads: Option<usize>,

    /// Do not apply the job's combiner to map output
    #[arg(long)]
    pub no_combiner: bool,

    /// Tokenizer: "whitespace" or "unicode-word"
    #[arg(long, default_value = "whitespace")]
    pub tokenizer: String,

    /// Lower-case all tokens
    #[arg(long)]
    pub fold_case: bool,

    /// Document ids: "offset" (byte offset of the line) or "line" (line number)
    #[arg(long, default_value = "offset")]
    pub doc_id: String,
}

impl JobArgs {
    pub fn params(&self) -> JobParams {
        JobParams {
            partitions_count: self.reducers,
            map_tasks: self.mappers,
            max_degree: self.threads,
            use_combiner: !self.no_combiner,
        }
    }

    pub fn analyzer(&self) -> Result<TextAnalyzer> {
        let config = ExtractorConfig {
            tokenizer: self.tokenizer.clone(),
            fold_case: self.fold_case,
        };
        TextAnalyzer::from_config(&config)
            .with_context(|| format!("Invalid tokenizer: {}", self.tokenizer))
    }

    pub fn doc_id_policy(&self) -> Result<DocIdPolicy> {
        DocIdPolicy::try_from(self.doc_id.as_str())
            .with_context(|| format!("Invalid document id policy: {}", self.doc_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Wrapper {
        #[command(flatten)]
        args: JobArgs,
    }

    #[test]
    fn test_job_args_defaults() {
        let args = Wrapper::parse_from(["corpstat", "in.txt", "out"]).args;
        let params = args.params();
        assert_eq!(params.partitions_count, 1);
        assert_eq!(params.map_tasks, None);
        assert!(params.use_combiner);
        assert_eq!(args.doc_id_policy().unwrap(), DocIdPolicy::ByteOffset);
        assert!(!args.analyzer().unwrap().fold_case());
    }

    #[test]
    fn test_job_args_options() {
        let args = Wrapper::parse_from([
            "corpstat",
            "in",
            "out",
            "--mappers",
            "4",
            "--reducers",
            "5",
            "--threads",
            "1",
            "--no-combiner",
            "--doc-id",
            "line",
            "--tokenizer",
            "unicode-word",
            "--fold-case",
        ])
        .args;
        let params = args.params();
        assert_eq!(params.partitions_count, 5);
        assert_eq!(params.map_tasks, Some(4));
        assert_eq!(params.max_degree, Some(1));
        assert!(!params.use_combiner);
        assert_eq!(args.doc_id_policy().unwrap(), DocIdPolicy::LineNumber);
        assert!(args.analyzer().unwrap().fold_case());
    }

    #[test]
    fn test_job_args_rejects_unknown_names() {
        let args = Wrapper::parse_from(["corpstat", "in", "out", "--tokenizer", "ngram"]).args;
        assert!(args.analyzer().is_err());
        let args = Wrapper::parse_from(["corpstat", "in", "out", "--doc-id", "uuid"]).args;
        assert!(args.doc_id_policy().is_err());
    }
}
