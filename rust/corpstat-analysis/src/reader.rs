//! Parsing of persisted `<key>\t<value>` part files.
//!
//! A line that fails to decode aborts the read with a
//! [`MalformedRecord`](corpstat_common::error::ErrorKind::MalformedRecord) error
//! naming the file and the 1-based line number. Skipping bad lines would silently
//! truncate the tables every analysis is computed from.

use std::{
    fs::File,
    io::{BufRead, BufReader, Lines},
    marker::PhantomData,
    path::Path,
};

use corpstat_common::{Result, error::Error, try_or_ret_some_err};
use corpstat_format::{TextCodec, decode_record};
use corpstat_mapreduce::list_data_files;

/// Decodes one record per line from a buffered reader.
pub struct RecordReader<K, V, R> {
    lines: Lines<R>,
    origin: String,
    line: usize,
    _marker: PhantomData<fn() -> (K, V)>,
}

impl<K, V, R: BufRead> RecordReader<K, V, R> {
    /// `origin` names the source in error messages, usually the file name.
    pub fn new(origin: impl Into<String>, reader: R) -> Self {
        RecordReader {
            lines: reader.lines(),
            origin: origin.into(),
            line: 0,
            _marker: PhantomData,
        }
    }
}

impl<K: TextCodec, V: TextCodec, R: BufRead> Iterator for RecordReader<K, V, R> {
    type Item = Result<(K, V)>;

    fn next(&mut self) -> Option<Self::Item> {
        let text = try_or_ret_some_err!(
            self.lines
                .next()?
                .map_err(|e| Error::io(self.origin.clone(), e))
        );
        self.line += 1;
        Some(
            decode_record(&text)
                .map_err(|e| Error::malformed_record(self.origin.clone(), self.line, e)),
        )
    }
}

/// Parses records from in-memory text.
pub fn parse_records<K: TextCodec, V: TextCodec>(origin: &str, text: &str) -> Result<Vec<(K, V)>> {
    RecordReader::new(origin, text.as_bytes()).collect()
}

/// Reads all part files of a job output directory, in file-name order.
///
/// Hidden and `_`-prefixed files (such as `_SUCCESS`) are skipped. A path that names a
/// single file is read as is.
pub fn read_part_files<K: TextCodec, V: TextCodec>(path: &Path) -> Result<Vec<(K, V)>> {
    let files = list_data_files(path)?;
    if files.is_empty() {
        return Err(Error::not_found(format!(
            "part files in {}",
            path.display()
        )));
    }
    let mut records = Vec::new();
    for file in files {
        let origin = file
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| file.display().to_string());
        let handle = File::open(&file).map_err(|e| Error::io(file.display().to_string(), e))?;
        let before = records.len();
        for record in RecordReader::new(origin, BufReader::new(handle)) {
            records.push(record?);
        }
        log::debug!(
            "read {} records from {}",
            records.len() - before,
            file.display()
        );
    }
    Ok(records)
}
