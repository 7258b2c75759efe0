//! Line ingestion
//!
//! Turns a log file (or any buffered reader) into the ordered, numbered line
//! sequence the rest of the pipeline consumes. Line terminators (`\n`, `\r\n`)
//! are removed; nothing else is trimmed.

use crate::types::{AnalyzerError, RawLine, Result};
use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind};
use std::path::Path;

/// Read a log file into numbered lines
///
/// Fails before any parsing if the file cannot be opened or is not UTF-8.
pub fn read_log_file(path: &Path) -> Result<Vec<RawLine>> {
    log::info!("Reading log file: {:?}", path);

    let file = File::open(path).map_err(|source| AnalyzerError::Ingestion {
        path: path.to_path_buf(),
        source,
    })?;

    let mut lines = Vec::new();
    for (index, line) in BufReader::new(file).lines().enumerate() {
        let line_number = index + 1;
        match line {
            Ok(text) => lines.push(RawLine::new(line_number, text)),
            Err(e) if e.kind() == ErrorKind::InvalidData => {
                return Err(AnalyzerError::InvalidEncoding {
                    path: path.to_path_buf(),
                    line: line_number,
                });
            }
            Err(source) => {
                return Err(AnalyzerError::Ingestion {
                    path: path.to_path_buf(),
                    source,
                });
            }
        }
    }

    log::debug!("Read {} lines from {:?}", lines.len(), path);
    Ok(lines)
}

/// Read numbered lines from any buffered reader
pub fn read_lines<R: BufRead>(reader: R) -> Result<Vec<RawLine>> {
    reader
        .lines()
        .enumerate()
        .map(|(index, line)| -> Result<RawLine> { Ok(RawLine::new(index + 1, line?)) })
        .collect()
}

/// Split in-memory text into numbered lines
pub fn lines_from_str(content: &str) -> Vec<RawLine> {
    content
        .lines()
        .enumerate()
        .map(|(index, text)| RawLine::new(index + 1, text))
        .collect()
}
