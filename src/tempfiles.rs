//! Caller-owned registry of temporary interval files.
//!
//! External genome arithmetic tools consume and produce interval files. The
//! registry hands out uniquely named scratch files for those hand-offs and
//! removes them when it is cleaned up or dropped.

use crate::error::{IntervalError, Result};
use crate::file::write_intervals;
use crate::interval::Interval;
use log::{debug, warn};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::Builder;

const PREFIX: &str = "intervals.";
const SUFFIX: &str = ".tmp";

/// Tracks temporary files created for one session.
#[derive(Debug)]
pub struct TempFiles {
    dir: PathBuf,
    files: Vec<PathBuf>,
    keep: bool,
}

impl TempFiles {
    /// Registry in the system temporary directory.
    pub fn new() -> Self {
        Self {
            dir: std::env::temp_dir(),
            files: Vec::new(),
            keep: false,
        }
    }

    /// Registry in a specific directory, which must already exist.
    pub fn in_dir<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(IntervalError::MissingDirectory(dir.to_path_buf()));
        }
        Ok(Self {
            dir: dir.to_path_buf(),
            files: Vec::new(),
            keep: false,
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Paths currently tracked.
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    /// Keep files on cleanup and drop.
    pub fn keep(&mut self, keep: bool) {
        self.keep = keep;
    }

    /// Create an empty, uniquely named temp file and track it.
    pub fn create(&mut self) -> Result<PathBuf> {
        let path = Builder::new()
            .prefix(PREFIX)
            .suffix(SUFFIX)
            .tempfile_in(&self.dir)?
            .into_temp_path()
            .keep()
            .map_err(|e| e.error)?;
        self.files.push(path.clone());
        Ok(path)
    }

    /// Write intervals to a new temp file and return its path.
    pub fn write_intervals<'a, I>(&mut self, intervals: I) -> Result<PathBuf>
    where
        I: IntoIterator<Item = &'a Interval>,
    {
        let path = self.create()?;
        let mut writer = BufWriter::new(File::create(&path)?);
        write_intervals(&mut writer, intervals)?;
        writer.flush()?;
        Ok(path)
    }

    /// Remove every tracked file, unless keeping is enabled.
    pub fn cleanup(&mut self) {
        if self.keep {
            return;
        }
        for path in self.files.drain(..) {
            debug!("removing {}", path.display());
            if let Err(e) = fs::remove_file(&path) {
                if path.exists() {
                    warn!("could not remove {}: {}", path.display(), e);
                }
            }
        }
    }

    /// Remove tracked files and every `intervals.*.tmp` file in the directory,
    /// including ones left behind by other sessions.
    pub fn cleanup_all(&mut self) -> Result<()> {
        if self.keep {
            return Ok(());
        }
        self.cleanup();
        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            let name = entry.file_name();
            let name = name.to_string_lossy();
            if name.starts_with(PREFIX) && name.ends_with(SUFFIX) && entry.path().is_file() {
                debug!("removing {}", entry.path().display());
                fs::remove_file(entry.path())?;
            }
        }
        Ok(())
    }
}

impl Default for TempFiles {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TempFiles {
    fn drop(&mut self) {
        self.cleanup();
    }
}
