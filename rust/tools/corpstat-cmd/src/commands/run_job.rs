//! The job commands: read the input, run the job, persist its part files.

use anyhow::{Context, Result};

use corpstat_format::TextCodec;
use corpstat_jobs::{BigramCountJob, InvertedIndexJob, RelativeFrequencyJob};
use corpstat_mapreduce::{JobRunner, MapReduceJob, TextInput, write_text_output};

use super::JobArgs;

pub fn bigram_count(args: &JobArgs) -> Result<()> {
    run(&BigramCountJob::new(args.analyzer()?), args)
}

pub fn bigram_relfreq(args: &JobArgs) -> Result<()> {
    run(&RelativeFrequencyJob::new(args.analyzer()?), args)
}

pub fn inverted_index(args: &JobArgs) -> Result<()> {
    run(&InvertedIndexJob::new(args.analyzer()?), args)
}

fn run<J>(job: &J, args: &JobArgs) -> Result<()>
where
    J: MapReduceJob,
    J::OutputKey: TextCodec,
    J::OutputValue: TextCodec,
{
    let input = TextInput::open(std::slice::from_ref(&args.input), args.doc_id_policy()?)
        .with_context(|| format!("Failed to read input: {}", args.input.display()))?;
    let runner = JobRunner::new(args.params()).context("Invalid job parameters")?;
    let output = runner
        .run(job, input.records())
        .with_context(|| format!("Job {} failed", job.name()))?;
    write_text_output(&output, &args.output)
        .with_context(|| format!("Failed to write output: {}", args.output.display()))?;

    let counters = output.counters();
    println!("job:              {}", job.name());
    println!("input records:    {}", counters.map_input_records);
    println!("map output pairs: {}", counters.map_output_records);
    println!("shuffled values:  {}", counters.shuffled_values);
    println!("output records:   {}", counters.reduce_output_records);
    println!("output:           {}", args.output.display());
    Ok(())
}
