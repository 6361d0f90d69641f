use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;

use commands::JobArgs;

#[derive(Parser)]
#[command(name = "corpstat")]
#[command(about = "Map-reduce corpus statistics: bigram counts, relative frequencies and inverted indexes")]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v for debug); RUST_LOG takes precedence
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Count every adjacent word pair
    BigramCount(JobArgs),

    /// Compute P(right | left) for every adjacent word pair
    BigramRelfreq(JobArgs),

    /// Build an inverted index with document frequencies and postings
    InvertedIndex(JobArgs),

    /// Summarize bigram-count output
    AnalyzeBigrams {
        /// Output directory of a bigram-count run
        dir: PathBuf,

        /// Number of top bigrams to report
        #[arg(long, default_value_t = 20)]
        top: usize,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the continuations of a word from relative-frequency output
    AnalyzeRelfreq {
        /// Output directory of a bigram-relfreq run
        dir: PathBuf,

        /// The left word
        #[arg(short, long)]
        word: String,

        /// Only report the most probable continuations
        #[arg(long)]
        top: Option<usize>,
    },

    /// Evaluate the probability of a word chain from relative-frequency output
    Chain {
        /// Output directory of a bigram-relfreq run
        dir: PathBuf,

        /// Prior probability of the first word
        #[arg(long)]
        prior: f64,

        /// The words of the chain, in order
        #[arg(required = true)]
        words: Vec<String>,
    },

    /// Look up the postings of one or more terms in inverted-index output
    Lookup {
        /// Output directory of an inverted-index run
        dir: PathBuf,

        /// Terms to look up
        #[arg(required = true)]
        terms: Vec<String>,

        /// Print the reports as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    commands::init_logging(cli.verbose);

    match cli.command {
        Commands::BigramCount(args) => commands::run_job::bigram_count(&args),
        Commands::BigramRelfreq(args) => commands::run_job::bigram_relfreq(&args),
        Commands::InvertedIndex(args) => commands::run_job::inverted_index(&args),
        Commands::AnalyzeBigrams { dir, top, json } => commands::analyze::bigrams(&dir, top, json),
        Commands::AnalyzeRelfreq { dir, word, top } => {
            commands::analyze::continuations(&dir, &word, top)
        }
        Commands::Chain { dir, prior, words } => commands::analyze::chain(&dir, prior, &words),
        Commands::Lookup { dir, terms, json } => commands::lookup::run(&dir, &terms, json),
    }
}
