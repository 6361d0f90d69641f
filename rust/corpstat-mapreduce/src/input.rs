//! Line-oriented text input.
//!
//! Every line of every input file is one record (document). Input paths are either
//! files or directories; a directory contributes its regular files in filename order,
//! skipping hidden (`.`) and bookkeeping (`_`) files such as `_SUCCESS`.

use std::{
    borrow::Cow,
    fs::File,
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
};

use corpstat_common::{Result, error::Error};
use corpstat_format::DocId;

/// One input record: a line of text and its document identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub doc_id: DocId,
    pub text: String,
}

impl Record {
    pub fn new(doc_id: DocId, text: impl Into<String>) -> Record {
        Record {
            doc_id,
            text: text.into(),
        }
    }
}

/// How document identifiers are assigned to input lines.
///
/// In both policies identifiers increase with input position and stay unique across
/// all files of one input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DocIdPolicy {
    /// Zero-based line number, counted across all input files.
    LineNumber,
    /// Byte offset of the line start, counted across the concatenation of all input
    /// files.
    #[default]
    ByteOffset,
}

impl TryFrom<&str> for DocIdPolicy {
    type Error = Error;

    fn try_from(name: &str) -> Result<Self> {
        match name {
            "line" | "line-number" => Ok(DocIdPolicy::LineNumber),
            "offset" | "byte-offset" => Ok(DocIdPolicy::ByteOffset),
            _ => Err(Error::invalid_arg(
                "doc_id",
                format!("unknown document id policy '{name}'"),
            )),
        }
    }
}

/// Assigns document identifiers to a stream of lines.
#[derive(Debug, Clone)]
struct DocIdCounter {
    policy: DocIdPolicy,
    next: DocId,
}

impl DocIdCounter {
    fn new(policy: DocIdPolicy) -> DocIdCounter {
        DocIdCounter { policy, next: 0 }
    }

    /// Returns the id of a line occupying `len` bytes (terminator included).
    fn advance(&mut self, len: usize) -> DocId {
        let id = self.next;
        self.next += match self.policy {
            DocIdPolicy::LineNumber => 1,
            DocIdPolicy::ByteOffset => len as u64,
        };
        id
    }
}

/// The complete set of records of a job input.
#[derive(Debug, Clone, Default)]
pub struct TextInput {
    records: Vec<Record>,
    files: Vec<PathBuf>,
}

impl TextInput {
    /// Reads all lines of the files under `paths`.
    ///
    /// Invalid UTF-8 sequences are replaced with U+FFFD and logged; document ids
    /// still count the raw bytes of each line.
    pub fn open(paths: &[PathBuf], policy: DocIdPolicy) -> Result<TextInput> {
        let mut files = Vec::new();
        for path in paths {
            files.extend(list_data_files(path)?);
        }
        let mut counter = DocIdCounter::new(policy);
        let mut records = Vec::new();
        for file in &files {
            read_lines(file, &mut counter, &mut records)?;
        }
        log::debug!(
            "read {} records from {} input file(s)",
            records.len(),
            files.len()
        );
        Ok(TextInput { records, files })
    }

    /// Builds an input from in-memory lines, assigning ids as if the lines were one
    /// file with `\n` terminators.
    pub fn from_lines<S: AsRef<str>>(
        lines: impl IntoIterator<Item = S>,
        policy: DocIdPolicy,
    ) -> TextInput {
        let mut counter = DocIdCounter::new(policy);
        let records = lines
            .into_iter()
            .map(|line| {
                let line = line.as_ref();
                Record::new(counter.advance(line.len() + 1), line)
            })
            .collect();
        TextInput {
            records,
            files: Vec::new(),
        }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn into_records(self) -> Vec<Record> {
        self.records
    }

    /// The data files the records were read from, in reading order.
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Lists the data files designated by `path`: the path itself when it is a file, or
/// the visible regular files of a directory sorted by name.
pub fn list_data_files(path: &Path) -> Result<Vec<PathBuf>> {
    let metadata =
        std::fs::metadata(path).map_err(|e| Error::io(path.display().to_string(), e))?;
    if metadata.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }
    let mut files = Vec::new();
    let entries =
        std::fs::read_dir(path).map_err(|e| Error::io(path.display().to_string(), e))?;
    for entry in entries {
        let entry = entry.map_err(|e| Error::io(path.display().to_string(), e))?;
        let name = entry.file_name();
        let name = name.to_string_lossy();
        if name.starts_with('.') || name.starts_with('_') {
            continue;
        }
        if entry
            .file_type()
            .map_err(|e| Error::io(entry.path().display().to_string(), e))?
            .is_file()
        {
            files.push(entry.path());
        }
    }
    files.sort();
    Ok(files)
}

fn read_lines(path: &Path, counter: &mut DocIdCounter, records: &mut Vec<Record>) -> Result<()> {
    let context = || path.display().to_string();
    let file = File::open(path).map_err(|e| Error::io(context(), e))?;
    let mut reader = BufReader::new(file);
    let mut buf = Vec::new();
    let mut line_no = 0;
    loop {
        buf.clear();
        let len = reader
            .read_until(b'\n', &mut buf)
            .map_err(|e| Error::io(context(), e))?;
        if len == 0 {
            return Ok(());
        }
        line_no += 1;
        let doc_id = counter.advance(len);
        let mut line = buf.as_slice();
        if let Some(rest) = line.strip_suffix(b"\n") {
            line = rest.strip_suffix(b"\r").unwrap_or(rest);
        }
        let text = String::from_utf8_lossy(line);
        if matches!(text, Cow::Owned(_)) {
            log::warn!(
                "{}:{line_no}: invalid UTF-8 replaced with U+FFFD",
                context()
            );
        }
        records.push(Record::new(doc_id, text));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_from_lines_policies() {
        let input = TextInput::from_lines(["a b a", "b a"], DocIdPolicy::LineNumber);
        let ids = input.records().iter().map(|r| r.doc_id).collect::<Vec<_>>();
        assert_eq!(ids, vec![0, 1]);

        let input = TextInput::from_lines(["a b a", "b a", ""], DocIdPolicy::ByteOffset);
        let ids = input.records().iter().map(|r| r.doc_id).collect::<Vec<_>>();
        assert_eq!(ids, vec![0, 6, 10]);
    }

    #[test]
    fn test_open_directory() {
        let dir = tempfile::tempdir().unwrap();
        let write = |name: &str, content: &str| {
            let mut f = File::create(dir.path().join(name)).unwrap();
            f.write_all(content.as_bytes()).unwrap();
        };
        write("b.txt", "third\r\nfourth");
        write("a.txt", "first\nsecond\n");
        write("_SUCCESS", "");
        write(".hidden", "ignored\n");
        std::fs::create_dir(dir.path().join("nested")).unwrap();

        let input = TextInput::open(&[dir.path().to_path_buf()], DocIdPolicy::ByteOffset).unwrap();
        assert_eq!(input.files().len(), 2);
        let records = input.into_records();
        assert_eq!(
            records,
            vec![
                Record::new(0, "first"),
                Record::new(6, "second"),
                Record::new(13, "third"),
                Record::new(20, "fourth"),
            ]
        );

        let input = TextInput::open(&[dir.path().to_path_buf()], DocIdPolicy::LineNumber).unwrap();
        let ids = input.records().iter().map(|r| r.doc_id).collect::<Vec<_>>();
        assert_eq!(ids, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("latin1.txt");
        std::fs::write(&path, b"caf\xe9 au lait\nnext line\n").unwrap();

        let input = TextInput::open(&[path], DocIdPolicy::ByteOffset).unwrap();
        assert_eq!(
            input.into_records(),
            vec![
                Record::new(0, "caf\u{fffd} au lait"),
                Record::new(13, "next line"),
            ]
        );
    }

    #[test]
    fn test_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let err = TextInput::open(&[dir.path().join("absent")], DocIdPolicy::LineNumber)
            .unwrap_err();
        assert!(matches!(
            err.kind(),
            corpstat_common::error::ErrorKind::Io { .. }
        ));
    }

    #[test]
    fn test_policy_names() {
        assert_eq!(
            DocIdPolicy::try_from("line").unwrap(),
            DocIdPolicy::LineNumber
        );
        assert_eq!(
            DocIdPolicy::try_from("byte-offset").unwrap(),
            DocIdPolicy::ByteOffset
        );
        assert!(DocIdPolicy::try_from("uuid").is_err());
    }
}
