//! Per-access diagnostic log.
//!
//! When enabled, every access appends `Accessing <tag>|<set>|<offset>` and every
//! eviction appends `Up to evict index <way>`. The format is a human-readable
//! trace, not a stable interface.
//!
//! Opening the log is fallible and reported at construction. Writes happen on
//! the access hot path, which never fails: the first write error is kept, later
//! writes are skipped, and the error is returned by [`TraceLog::finish`].

use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::warn;

use super::geometry::DecodedAddr;
use crate::common::SimError;

/// Buffered diagnostic log sink.
pub struct TraceLog {
    path: PathBuf,
    sink: Box<dyn Write + Send>,
    error: Option<io::Error>,
}

impl TraceLog {
    /// Creates (truncating) the log file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::TraceLog`] if the file cannot be created.
    pub fn create(path: impl AsRef<Path>) -> Result<Self, SimError> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| SimError::TraceLog {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_writer(path, BufWriter::new(file)))
    }

    /// Wraps an arbitrary writer; `label` is used in error messages.
    pub fn from_writer(label: impl Into<PathBuf>, sink: impl Write + Send + 'static) -> Self {
        Self {
            path: label.into(),
            sink: Box::new(sink),
            error: None,
        }
    }

    /// Records one decoded access.
    pub fn access(&mut self, addr: DecodedAddr) {
        self.write_line(format_args!(
            "Accessing {}|{}|{}",
            addr.tag, addr.set_index, addr.offset
        ));
    }

    /// Records the way chosen for eviction.
    pub fn eviction(&mut self, way: usize) {
        self.write_line(format_args!("Up to evict index {way}"));
    }

    fn write_line(&mut self, args: fmt::Arguments<'_>) {
        if self.error.is_some() {
            return;
        }
        if let Err(e) = writeln!(self.sink, "{args}") {
            warn!(path = %self.path.display(), error = %e, "trace log write failed; further entries dropped");
            self.error = Some(e);
        }
    }

    /// Flushes buffered entries and reports the first write failure, if any.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::TraceLog`] carrying the first failed write or the
    /// flush failure.
    pub fn finish(&mut self) -> Result<(), SimError> {
        let result = match self.error.take() {
            Some(e) => Err(e),
            None => self.sink.flush(),
        };
        result.map_err(|source| SimError::TraceLog {
            path: self.path.clone(),
            source,
        })
    }
}

impl fmt::Debug for TraceLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TraceLog")
            .field("path", &self.path)
            .field("failed", &self.error.is_some())
            .finish_non_exhaustive()
    }
}
