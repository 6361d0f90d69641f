//! Drives a [`MapReduceJob`] through map, combine, shuffle and reduce.

use std::time::Instant;

use rayon::prelude::*;

use corpstat_common::{Result, error::Error};

use crate::{
    input::Record,
    job::{Emitter, MapReduceJob},
    output::{JobCounters, JobOutput},
    params::JobParams,
    shuffle::{KeyRun, collate, combine_runs, group_runs, merge_runs},
};

/// Executes jobs with a fixed set of [`JobParams`].
///
/// The output of [`JobRunner::run`] depends only on the job, the records and
/// `partitions_count`; map task count, parallelism and the combiner switch affect
/// scheduling and intermediate volume but never the result.
pub struct JobRunner {
    params: JobParams,
    pool: Option<rayon::ThreadPool>,
}

impl JobRunner {
    pub fn new(params: JobParams) -> Result<JobRunner> {
        params.validate()?;
        let degree = params.max_degree();
        let pool = if degree > 1 {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(degree)
                .thread_name(|i| format!("corpstat-worker-{i}"))
                .build()
                .map_err(|e| Error::worker("failed to build the task thread pool", e))?;
            Some(pool)
        } else {
            None
        };
        Ok(JobRunner { params, pool })
    }

    /// Runs `job` over `records` and returns the records of every reduce unit.
    ///
    /// The first error raised by any map or reduce task aborts the job.
    pub fn run<J: MapReduceJob>(
        &self,
        job: &J,
        records: &[Record],
    ) -> Result<JobOutput<J::OutputKey, J::OutputValue>> {
        let started = Instant::now();
        let partitions_count = self.params.partitions_count;
        let map_tasks = self.params.map_tasks(records.len());
        let split_len = records.len().div_ceil(map_tasks).max(1);
        let combiner = if self.params.use_combiner {
            job.combiner()
        } else {
            None
        };
        log::info!(
            "{}: starting with {} records, {} map task(s), {} reduce unit(s), combiner {}",
            job.name(),
            records.len(),
            map_tasks,
            partitions_count,
            if combiner.is_some() { "on" } else { "off" },
        );

        let splits = if records.is_empty() {
            vec![records]
        } else {
            records.chunks(split_len).collect::<Vec<_>>()
        };
        let map_outputs = self.execute(
            splits.into_iter().enumerate().collect(),
            |(task, split)| {
                let mut output = run_map_task(job, split, partitions_count)?;
                if let Some(combiner) = combiner {
                    for runs in &mut output.partitions {
                        *runs = combine_runs(combiner, std::mem::take(runs));
                    }
                }
                output.counters.shuffled_values = output
                    .partitions
                    .iter()
                    .flatten()
                    .map(|run| run.values.len() as u64)
                    .sum();
                log::debug!(
                    "{}: map task {} done, {} records in, {} pairs out",
                    job.name(),
                    task,
                    output.counters.map_input_records,
                    output.counters.map_output_records
                );
                Ok(output)
            },
        )?;

        let mut counters = JobCounters::default();
        let mut units = (0..partitions_count).map(|_| Vec::new()).collect::<Vec<_>>();
        for output in map_outputs {
            counters.merge(&output.counters);
            for (unit, runs) in units.iter_mut().zip(output.partitions) {
                unit.extend(runs);
            }
        }

        let reduce_outputs = self.execute(units.into_iter().enumerate().collect(), |(index, runs)| {
            let (records, unit_counters) = run_reduce_unit(job, runs)?;
            log::debug!(
                "{}: reduce unit {} done, {} groups in, {} records out",
                job.name(),
                index,
                unit_counters.reduce_input_groups,
                unit_counters.reduce_output_records
            );
            Ok((records, unit_counters))
        })?;

        let mut partitions = Vec::with_capacity(partitions_count);
        for (records, unit_counters) in reduce_outputs {
            counters.merge(&unit_counters);
            partitions.push(records);
        }
        log::info!(
            "{}: finished in {:.2?}, {} map output pairs, {} shuffled values, {} output records",
            job.name(),
            started.elapsed(),
            counters.map_output_records,
            counters.shuffled_values,
            counters.reduce_output_records
        );
        Ok(JobOutput::new(partitions, counters))
    }

    /// Applies `f` to every item, in parallel when a pool is configured, and returns
    /// the results in item order. Fails with the error of the first failing item.
    fn execute<T, R, F>(&self, items: Vec<T>, f: F) -> Result<Vec<R>>
    where
        T: Send,
        R: Send,
        F: Fn(T) -> Result<R> + Send + Sync,
    {
        match &self.pool {
            Some(pool) if items.len() > 1 => {
                pool.install(|| items.into_par_iter().map(&f).collect::<Result<Vec<_>>>())
            }
            _ => items.into_iter().map(f).collect(),
        }
    }
}

struct MapTaskOutput<K, V> {
    partitions: Vec<Vec<KeyRun<K, V>>>,
    counters: JobCounters,
}

/// Routes map emissions into per-unit buffers.
struct PartitionedEmitter<'a, J: MapReduceJob> {
    job: &'a J,
    buffers: Vec<Vec<(J::Key, J::Value)>>,
    emitted: u64,
}

impl<J: MapReduceJob> Emitter<J::Key, J::Value> for PartitionedEmitter<'_, J> {
    fn emit(&mut self, key: J::Key, value: J::Value) -> Result<()> {
        let partitions_count = self.buffers.len();
        let index = self.job.partition(&key, partitions_count);
        let buffer = self.buffers.get_mut(index).ok_or_else(|| {
            Error::consistency(format!(
                "{}: partition {index} is out of range for {partitions_count} reduce units",
                self.job.name()
            ))
        })?;
        buffer.push((key, value));
        self.emitted += 1;
        Ok(())
    }
}

fn run_map_task<J: MapReduceJob>(
    job: &J,
    split: &[Record],
    partitions_count: usize,
) -> Result<MapTaskOutput<J::Key, J::Value>> {
    let mut emitter = PartitionedEmitter {
        job,
        buffers: (0..partitions_count).map(|_| Vec::new()).collect(),
        emitted: 0,
    };
    for record in split {
        job.map(record, &mut emitter)?;
    }
    let counters = JobCounters {
        map_input_records: split.len() as u64,
        map_output_records: emitter.emitted,
        ..Default::default()
    };
    Ok(MapTaskOutput {
        partitions: emitter.buffers.into_iter().map(collate).collect(),
        counters,
    })
}

fn run_reduce_unit<J: MapReduceJob>(
    job: &J,
    runs: Vec<KeyRun<J::Key, J::Value>>,
) -> Result<(Vec<(J::OutputKey, J::OutputValue)>, JobCounters)> {
    let groups = group_runs(merge_runs(runs), |a, b| job.same_group(a, b));
    let mut counters = JobCounters {
        reduce_input_groups: groups.len() as u64,
        ..Default::default()
    };
    let mut records = Vec::new();
    for group in groups {
        job.reduce(group, &mut records)?;
    }
    counters.reduce_output_records = records.len() as u64;
    Ok((records, counters))
}
