//! Supported tabular formats and their column layouts.

use std::fmt;

/// A tabular genomic interval format.
///
/// BED stores 0-based half-open coordinates; GFF and GTF store 1-based
/// inclusive coordinates and carry a packed attribute column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileType {
    Bed,
    Gff,
    Gtf,
}

impl FileType {
    /// Column holding the start coordinate.
    #[inline]
    pub fn start_column(self) -> usize {
        match self {
            FileType::Bed => 1,
            FileType::Gff | FileType::Gtf => 3,
        }
    }

    /// Column holding the end coordinate.
    #[inline]
    pub fn end_column(self) -> usize {
        match self {
            FileType::Bed => 2,
            FileType::Gff | FileType::Gtf => 4,
        }
    }

    #[inline]
    pub fn score_column(self) -> usize {
        match self {
            FileType::Bed => 4,
            FileType::Gff | FileType::Gtf => 5,
        }
    }

    #[inline]
    pub fn strand_column(self) -> usize {
        match self {
            FileType::Bed => 5,
            FileType::Gff | FileType::Gtf => 6,
        }
    }

    /// Column holding the packed attributes, if the format has one.
    #[inline]
    pub fn attributes_column(self) -> Option<usize> {
        match self {
            FileType::Bed => None,
            FileType::Gff | FileType::Gtf => Some(8),
        }
    }

    /// Minimum number of columns a record of this format must have.
    #[inline]
    pub fn min_columns(self) -> usize {
        match self {
            FileType::Bed => 3,
            FileType::Gff | FileType::Gtf => 9,
        }
    }

    /// True when the stored start is 1-based.
    #[inline]
    pub fn is_one_based(self) -> bool {
        !matches!(self, FileType::Bed)
    }

    /// Convert a stored start value to a 0-based start.
    #[inline]
    pub(crate) fn start_from_stored(self, stored: u64) -> u64 {
        if self.is_one_based() {
            stored.saturating_sub(1)
        } else {
            stored
        }
    }

    /// Convert a 0-based start to the value stored in the start column.
    #[inline]
    pub(crate) fn start_to_stored(self, start: u64) -> u64 {
        if self.is_one_based() {
            start + 1
        } else {
            start
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileType::Bed => write!(f, "bed"),
            FileType::Gff => write!(f, "gff"),
            FileType::Gtf => write!(f, "gtf"),
        }
    }
}
