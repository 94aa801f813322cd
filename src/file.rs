//! Sequential reading and overlap queries over one interval file.

use crate::error::Result;
use crate::format::FileType;
use crate::index::OverlapIndex;
use crate::interval::{Interval, Strand};
use crate::parsing::{should_skip_line, trim_newline};
use crate::reader::open_reader;
use crate::sniff;
use log::debug;
use std::io::{self, BufRead};
use std::path::{Path, PathBuf};

/// Options for [`IntervalFile::hits_with`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HitOptions {
    /// Only report hits on the query's strand. A query with unknown strand
    /// (`.`) then matches nothing.
    pub same_strand: bool,
    /// Minimum fraction of the query covered by a hit. 0.0 accepts any overlap.
    pub overlap_fraction: f64,
}

impl HitOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn same_strand(mut self, same_strand: bool) -> Self {
        self.same_strand = same_strand;
        self
    }

    pub fn overlap_fraction(mut self, fraction: f64) -> Self {
        self.overlap_fraction = fraction;
        self
    }

    fn accepts(&self, query: &Interval, hit: &Interval) -> bool {
        if self.same_strand {
            let strand = query.strand();
            if strand == Strand::Unknown || hit.strand() != strand {
                return false;
            }
        }
        if self.overlap_fraction > 0.0 {
            let len = query.length();
            if len == 0 {
                return false;
            }
            return (query.overlap_length(hit) as f64 / len as f64) >= self.overlap_fraction;
        }
        true
    }
}

/// Read every record from a buffered source.
fn read_all<R: BufRead>(reader: R, file_type: FileType) -> Result<Vec<Interval>> {
    let mut records = Records::new(reader, file_type);
    let mut intervals = Vec::new();
    while let Some(interval) = records.read_interval()? {
        intervals.push(interval);
    }
    Ok(intervals)
}

/// Line cursor shared by the sequential reader and the index scan.
struct Records<R> {
    reader: R,
    file_type: FileType,
    line_number: usize,
    buffer: String,
    done: bool,
}

impl<R: BufRead> Records<R> {
    fn new(reader: R, file_type: FileType) -> Self {
        Self {
            reader,
            file_type,
            line_number: 0,
            buffer: String::with_capacity(1024),
            done: false,
        }
    }

    fn read_interval(&mut self) -> Result<Option<Interval>> {
        if self.done {
            return Ok(None);
        }
        loop {
            self.buffer.clear();
            let bytes_read = self.reader.read_line(&mut self.buffer)?;
            if bytes_read == 0 {
                self.done = true;
                return Ok(None);
            }
            self.line_number += 1;

            let line = trim_newline(&self.buffer);
            if should_skip_line(line.as_bytes()) {
                continue;
            }

            return Interval::parse_line_at(line, self.file_type, self.line_number).map(Some);
        }
    }
}

/// An open interval file: a forward-only record cursor plus a lazily built
/// overlap index.
///
/// The format is detected once when the file is opened and is used for every
/// record. Overlap queries re-scan the file with their own reader, so they
/// never move the sequential cursor.
pub struct IntervalFile {
    path: PathBuf,
    file_type: FileType,
    records: Records<Box<dyn BufRead>>,
    index: Option<OverlapIndex>,
}

impl IntervalFile {
    /// Open a BED, GFF or GTF file, optionally gzip/BGZF compressed.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file_type = sniff::detect(&path)?;
        Self::open_as(path, file_type)
    }

    /// Open a file with a known format, skipping detection.
    pub fn open_as<P: AsRef<Path>>(path: P, file_type: FileType) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let records = Records::new(open_reader(&path)?, file_type);
        Ok(Self {
            path,
            file_type,
            records,
            index: None,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn file_type(&self) -> FileType {
        self.file_type
    }

    /// Read the next record. `None` signals end of input and repeats on
    /// every later call.
    pub fn read_interval(&mut self) -> Result<Option<Interval>> {
        self.records.read_interval()
    }

    /// Restart sequential reading from the first record.
    pub fn rewind(&mut self) -> Result<()> {
        self.records = Records::new(open_reader(&self.path)?, self.file_type);
        Ok(())
    }

    /// The overlap index, built on first use by scanning the whole file.
    pub fn index(&mut self) -> Result<&OverlapIndex> {
        let index = match self.index.take() {
            Some(index) => index,
            None => {
                let intervals = read_all(open_reader(&self.path)?, self.file_type)?;
                debug!(
                    "{}: indexing {} records",
                    self.path.display(),
                    intervals.len()
                );
                OverlapIndex::from_intervals(intervals)
            }
        };
        Ok(&*self.index.insert(index))
    }

    /// All records overlapping `query` (half-open, same chromosome).
    ///
    /// With `same_strand`, only records on the query's strand are returned;
    /// a query with unknown strand then returns nothing. Results are ordered
    /// by `(start, end)`, ties in file order.
    pub fn all_hits(&mut self, query: &Interval, same_strand: bool) -> Result<Vec<Interval>> {
        self.hits_with(query, HitOptions::new().same_strand(same_strand))
    }

    /// Like [`all_hits`](Self::all_hits) with additional filters.
    pub fn hits_with(&mut self, query: &Interval, options: HitOptions) -> Result<Vec<Interval>> {
        let index = self.index()?;
        Ok(index
            .find_overlaps(query)
            .into_iter()
            .filter(|hit| options.accepts(query, hit))
            .cloned()
            .collect())
    }

    /// Number of records overlapping `query`.
    pub fn count_hits(&mut self, query: &Interval, same_strand: bool) -> Result<usize> {
        let options = HitOptions::new().same_strand(same_strand);
        let index = self.index()?;
        Ok(index
            .find_overlaps(query)
            .into_iter()
            .filter(|hit| options.accepts(query, hit))
            .count())
    }

    /// True if any record overlaps `query`.
    pub fn any_hits(&mut self, query: &Interval, same_strand: bool) -> Result<bool> {
        let options = HitOptions::new().same_strand(same_strand);
        let index = self.index()?;
        Ok(index
            .find_overlaps(query)
            .into_iter()
            .any(|hit| options.accepts(query, hit)))
    }
}

impl Iterator for IntervalFile {
    type Item = Result<Interval>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_interval().transpose()
    }
}

/// Parse intervals of a known format from a string (useful for testing).
pub fn parse_intervals(content: &str, file_type: FileType) -> Result<Vec<Interval>> {
    read_all(content.as_bytes(), file_type)
}

/// Read all intervals from a file, detecting its format.
pub fn read_intervals<P: AsRef<Path>>(path: P) -> Result<Vec<Interval>> {
    IntervalFile::open(path)?.collect()
}

/// Write intervals to a writer, one line each.
pub fn write_intervals<'a, W, I>(writer: &mut W, intervals: I) -> io::Result<()>
where
    W: io::Write,
    I: IntoIterator<Item = &'a Interval>,
{
    for interval in intervals {
        writeln!(writer, "{}", interval)?;
    }
    Ok(())
}
