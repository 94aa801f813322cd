//! Error type shared by every module of the crate.

use crate::format::FileType;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while parsing, accessing or comparing intervals.
#[derive(Error, Debug)]
pub enum IntervalError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Malformed record. `line` is 1-based; 0 means the value did not come from a file.
    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Unrecognized interval format: {0}")]
    UnrecognizedFormat(String),

    #[error("Unknown field name: '{0}'")]
    UnknownField(String),

    #[error("Field index {index} out of range for record with {len} fields")]
    IndexOutOfRange { index: isize, len: usize },

    #[error("Format {0} has no attribute column")]
    NoAttributes(FileType),

    /// One interval strictly contains the other, so no ordering answer is given.
    #[error("Incomparable intervals: {a} and {b} are nested")]
    Incomparable { a: String, b: String },

    #[error("Directory does not exist: {0}")]
    MissingDirectory(PathBuf),
}

impl IntervalError {
    pub(crate) fn parse(line: usize, message: impl Into<String>) -> Self {
        IntervalError::Parse {
            line,
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, IntervalError>;
