//! GRIT intervals: format-aware genomic interval records and overlap queries.
//!
//! This library models BED, GFF and GTF records as mutable [`Interval`]s
//! whose text columns and 0-based coordinates always agree, and answers
//! overlap queries against whole files through a per-chromosome index.
//!
//! # Features
//!
//! - **One coordinate system**: GFF/GTF 1-based inclusive columns are read
//!   and written through 0-based half-open accessors
//! - **Byte-stable records**: an unmodified record prints exactly as read
//! - **Indexed queries**: overlap lookups over files with millions of records
//! - **Compressed input**: gzip and BGZF are detected and decoded transparently
//!
//! # Example
//!
//! ```rust,no_run
//! use grit_intervals::{Interval, IntervalFile, Strand};
//!
//! let mut file = IntervalFile::open("rmsk.bed.gz").unwrap();
//! let query = Interval::new("chr21", 9719768, 9739768).with_strand(Strand::Plus);
//! for hit in file.all_hits(&query, true).unwrap() {
//!     println!("{}", hit);
//! }
//! ```

pub mod attrs;
pub mod config;
pub mod error;
pub mod file;
pub mod format;
pub mod index;
pub mod interval;
pub mod parsing;
pub mod reader;
pub mod sniff;
pub mod tempfiles;

// Re-export commonly used types
pub use attrs::{AttrStyle, Attributes};
pub use error::{IntervalError, Result};
pub use file::{parse_intervals, read_intervals, write_intervals, HitOptions, IntervalFile};
pub use format::FileType;
pub use index::OverlapIndex;
pub use interval::{FieldName, FieldValue, Interval, Relation, Strand};
pub use tempfiles::TempFiles;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::attrs::Attributes;
    pub use crate::error::{IntervalError, Result};
    pub use crate::file::{HitOptions, IntervalFile};
    pub use crate::format::FileType;
    pub use crate::index::OverlapIndex;
    pub use crate::interval::{Interval, Relation, Strand};
}
