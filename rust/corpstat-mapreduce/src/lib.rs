//! A local, in-process map-reduce execution engine.
//!
//! The engine drives jobs through the classic contract:
//!
//! ```text
//! map(record)                    -> [(key, value)]
//! combine(key, [value])          -> [value]            (optional, associative)
//! partition(key, unit_count)     -> unit_index
//! reduce(group of sorted keys)   -> [(output_key, output_value)]
//! ```
//!
//! # Execution
//!
//! 1. **Map**: the input records are cut into splits, one per map task. Map tasks run in
//!    parallel and share no mutable state; each task routes its emissions into
//!    per-unit buffers using the job's pure partition function.
//! 2. **Combine**: when enabled, every task buffer is collated by exact key and the
//!    job's combiner pre-aggregates each key's values before transfer.
//! 3. **Shuffle**: the only synchronization point. All buffers destined for one
//!    reduce unit are gathered, sorted by the key's total order and merged by exact
//!    key, then cut into groups with the job's grouping predicate.
//! 4. **Reduce**: reduce units run in parallel; within a unit, groups are reduced
//!    strictly in key order.
//!
//! Map, combine and reduce are pure functions of their input, so re-running any task
//! produces identical output. Each reduce unit produces a disjoint slice of the
//! result, persisted as its own part file by [`output::write_text_output`].

pub mod input;
pub mod job;
pub mod output;
pub mod params;
pub mod partition;
pub mod runner;
pub mod shuffle;

pub use input::{DocIdPolicy, Record, TextInput, list_data_files};
pub use job::{Combiner, Emitter, MapReduceJob, SumCombiner};
pub use output::{
    JobCounters, JobOutput, SUCCESS_FILE_NAME, part_file_name, write_text_output,
};
pub use params::JobParams;
pub use partition::{hash_partition, hash_partition_parts};
pub use runner::JobRunner;
pub use shuffle::{Group, KeyRun};
