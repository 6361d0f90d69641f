use corpstat_common::{Result, verify_arg};

/// Execution parameters of a single map-reduce job.
///
/// Only `partitions_count` shapes the *content* of the output: it determines which
/// part file each key lands in. The remaining parameters change how the work is
/// scheduled, never what it produces.
#[derive(Debug, Clone)]
pub struct JobParams {
    /// Number of reduce units, and therefore of output part files. Must be at least 1.
    pub partitions_count: usize,

    /// Number of map tasks (input splits). Defaults to the number of available threads,
    /// capped by the number of input records.
    pub map_tasks: Option<usize>,

    /// Maximum number of map or reduce tasks running concurrently.
    /// `None` uses all available threads; `Some(1)` executes every task sequentially
    /// on the calling thread.
    pub max_degree: Option<usize>,

    /// Whether the job's combiner, if it has one, is applied to map task output.
    pub use_combiner: bool,
}

impl Default for JobParams {
    fn default() -> Self {
        JobParams {
            partitions_count: 1,
            map_tasks: None,
            max_degree: None,
            use_combiner: true,
        }
    }
}

impl JobParams {
    /// Upper bound on reduce units, to keep per-unit overhead bounded.
    pub const MAX_PARTITIONS_COUNT: usize = 4096;

    pub fn with_partitions(partitions_count: usize) -> JobParams {
        JobParams {
            partitions_count,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        verify_arg!(partitions_count, self.partitions_count >= 1);
        verify_arg!(
            partitions_count,
            self.partitions_count <= Self::MAX_PARTITIONS_COUNT
        );
        verify_arg!(map_tasks, self.map_tasks != Some(0));
        verify_arg!(max_degree, self.max_degree != Some(0));
        Ok(())
    }

    /// Effective number of map tasks for an input of `record_count` records.
    /// Always at least 1, so that an empty input still runs one (empty) task.
    pub fn map_tasks(&self, record_count: usize) -> usize {
        self.map_tasks
            .unwrap_or_else(available_threads)
            .min(record_count)
            .max(1)
    }

    /// Effective degree of parallelism.
    pub fn max_degree(&self) -> usize {
        self.max_degree.unwrap_or_else(available_threads).max(1)
    }
}

fn available_threads() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}
