//! Job results and their persisted form: one `part-NNNNN` text file per reduce unit.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use corpstat_common::{Result, error::Error};
use corpstat_format::{TextCodec, encode_record};

/// Name of the empty marker file written after all part files are complete.
pub const SUCCESS_FILE_NAME: &str = "_SUCCESS";

/// File name of the output of reduce unit `index`.
pub fn part_file_name(index: usize) -> String {
    format!("part-{index:05}")
}

/// Record counts observed while running a job.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JobCounters {
    pub map_input_records: u64,
    pub map_output_records: u64,
    /// Values handed over to the shuffle, after the combiner (if any) ran.
    pub shuffled_values: u64,
    pub reduce_input_groups: u64,
    pub reduce_output_records: u64,
}

impl JobCounters {
    pub fn merge(&mut self, other: &JobCounters) {
        self.map_input_records += other.map_input_records;
        self.map_output_records += other.map_output_records;
        self.shuffled_values += other.shuffled_values;
        self.reduce_input_groups += other.reduce_input_groups;
        self.reduce_output_records += other.reduce_output_records;
    }
}

/// The output of a job: the records of each reduce unit, in emission order.
#[derive(Debug, Clone)]
pub struct JobOutput<K, V> {
    partitions: Vec<Vec<(K, V)>>,
    counters: JobCounters,
}

impl<K, V> JobOutput<K, V> {
    pub fn new(partitions: Vec<Vec<(K, V)>>, counters: JobCounters) -> JobOutput<K, V> {
        JobOutput {
            partitions,
            counters,
        }
    }

    pub fn partitions(&self) -> &[Vec<(K, V)>] {
        &self.partitions
    }

    pub fn counters(&self) -> &JobCounters {
        &self.counters
    }

    /// Total number of output records over all reduce units.
    pub fn len(&self) -> usize {
        self.partitions.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All records, reduce unit by reduce unit.
    pub fn iter(&self) -> impl Iterator<Item = &(K, V)> {
        self.partitions.iter().flatten()
    }

    pub fn into_records(self) -> Vec<(K, V)> {
        self.partitions.into_iter().flatten().collect()
    }
}

/// Persists `output` under `dir` as `part-00000 .. part-{N-1}` plus an empty
/// `_SUCCESS` file.
///
/// The files are first written to a temporary sibling directory that is then renamed
/// into place, so readers never observe a partially written output. An existing `dir`
/// is replaced.
pub fn write_text_output<K, V>(output: &JobOutput<K, V>, dir: &Path) -> Result<()>
where
    K: TextCodec,
    V: TextCodec,
{
    let context = || dir.display().to_string();
    let parent = match dir.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent).map_err(|e| Error::io(context(), e))?;
    let staging = tempfile::Builder::new()
        .prefix(".corpstat-output-")
        .tempdir_in(parent)
        .map_err(|e| Error::io(context(), e))?;

    for (index, records) in output.partitions().iter().enumerate() {
        let path = staging.path().join(part_file_name(index));
        let file = File::create(&path).map_err(|e| Error::io(path.display().to_string(), e))?;
        let mut writer = BufWriter::new(file);
        for (key, value) in records {
            writeln!(writer, "{}", encode_record(key, value))
                .map_err(|e| Error::io(path.display().to_string(), e))?;
        }
        writer
            .flush()
            .map_err(|e| Error::io(path.display().to_string(), e))?;
    }
    File::create(staging.path().join(SUCCESS_FILE_NAME)).map_err(|e| Error::io(context(), e))?;

    if dir.exists() {
        log::warn!("replacing existing output directory {}", dir.display());
        std::fs::remove_dir_all(dir).map_err(|e| Error::io(context(), e))?;
    }
    std::fs::rename(staging.path(), dir).map_err(|e| Error::io(context(), e))?;
    log::info!(
        "wrote {} records in {} part file(s) to {}",
        output.len(),
        output.partitions().len(),
        dir.display()
    );
    Ok(())
}
