//! Format detection from a file's leading content.
//!
//! The sniffer always works on its own reader, so it never moves the cursor
//! of an [`IntervalFile`](crate::file::IntervalFile) that is already open.

use crate::config::sniff_lookahead;
use crate::error::{IntervalError, Result};
use crate::format::FileType;
use crate::parsing::{parse_u64_fast, should_skip_line, split_tabs, trim_newline};
use crate::reader::open_reader;
use log::debug;
use std::io::BufRead;
use std::path::Path;

/// Classify a single data line, or return None if it has no known shape.
pub fn classify_line(line: &str) -> Option<FileType> {
    let fields = split_tabs(line);
    let numeric = |i: usize| parse_u64_fast(fields[i].as_bytes()).is_some();

    if fields.len() >= 9 && numeric(3) && numeric(4) {
        let attrs = fields[8].trim();
        if attrs.contains('"') {
            return Some(FileType::Gtf);
        }
        if attrs.contains('=') {
            return Some(FileType::Gff);
        }
        if attrs.contains(';') {
            // Unquoted `key value;` pairs.
            let first = attrs.split(';').next().unwrap_or_default().trim();
            return Some(if first.contains(char::is_whitespace) {
                FileType::Gtf
            } else {
                FileType::Gff
            });
        }
        // An empty column alone cannot tell GFF from BED9 with no itemRgb;
        // GFF source and type columns are never both numeric.
        if (attrs == "." || attrs.is_empty()) && !(numeric(1) && numeric(2)) {
            return Some(FileType::Gff);
        }
    }

    if (3..=12).contains(&fields.len()) && numeric(1) && numeric(2) {
        return Some(FileType::Bed);
    }

    None
}

/// Detect the format of buffered content.
///
/// Header, comment and blank lines are skipped. The first data line with a
/// known shape decides; at most [`sniff_lookahead`] data lines are examined.
pub fn detect_reader<R: BufRead>(mut reader: R) -> Result<FileType> {
    let lookahead = sniff_lookahead();
    let mut buffer = String::new();
    let mut examined = 0;

    while examined < lookahead {
        buffer.clear();
        if reader.read_line(&mut buffer)? == 0 {
            break;
        }
        let line = trim_newline(&buffer);
        if should_skip_line(line.as_bytes()) {
            continue;
        }
        examined += 1;
        if let Some(file_type) = classify_line(line) {
            return Ok(file_type);
        }
    }

    Err(IntervalError::UnrecognizedFormat(format!(
        "no BED, GFF or GTF record found in the first {} data lines",
        examined
    )))
}

/// Detect the format of in-memory content.
pub fn detect_str(content: &str) -> Result<FileType> {
    detect_reader(content.as_bytes())
}

/// Detect the format of a (possibly compressed) file.
pub fn detect<P: AsRef<Path>>(path: P) -> Result<FileType> {
    let path = path.as_ref();
    let file_type = detect_reader(open_reader(path)?).map_err(|e| match e {
        IntervalError::UnrecognizedFormat(msg) => {
            IntervalError::UnrecognizedFormat(format!("{}: {}", path.display(), msg))
        }
        other => other,
    })?;
    debug!("{}: detected {} format", path.display(), file_type);
    Ok(file_type)
}
