use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};

use super::offset::{LogOffsetStore, OffsetError};

#[derive(Debug, Error)]
pub enum ScanError {
    #[error(transparent)]
    Offset(#[from] OffsetError),
    #[error("failed to read log {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Scans the tail of a log file for a fixed search token, resuming from the
/// byte offset persisted by a [`LogOffsetStore`] so that a process restart
/// neither re-scans nor skips data.
#[derive(Debug)]
pub struct LogTailScanner {
    log_path: PathBuf,
    token: String,
    store: LogOffsetStore,
}

impl LogTailScanner {
    pub fn new(
        log_path: impl Into<PathBuf>,
        state_path: impl Into<PathBuf>,
        token: impl Into<String>,
    ) -> Self {
        Self {
            log_path: log_path.into(),
            token: token.into(),
            store: LogOffsetStore::new(state_path),
        }
    }

    pub fn log_path(&self) -> &Path {
        &self.log_path
    }

    /// Scan any newly appended bytes and return the first line containing
    /// the search token, if one exists.
    ///
    /// At most one match is surfaced per call; the rest of the new region is
    /// consumed regardless, because the end-of-file offset is persisted after
    /// every complete read. A read failure returns before the offset is
    /// rewritten, so the same region is re-scanned on the next poll rather
    /// than silently skipped.
    pub fn find_next_match(&self) -> Result<Option<String>, ScanError> {
        let mut start = self.store.load()?;

        // A missing log file reads as empty; nothing to scan yet.
        let end = match fs::metadata(&self.log_path) {
            Ok(meta) => meta.len(),
            Err(e) if e.kind() == io::ErrorKind::NotFound => 0,
            Err(source) => {
                return Err(ScanError::Read {
                    path: self.log_path.clone(),
                    source,
                })
            }
        };

        if start > end {
            // The file was rotated, truncated, or recreated under us.
            warn!(
                "log {} shrank below persisted offset {} (now {} bytes), restarting from 0",
                self.log_path.display(),
                start,
                end
            );
            start = 0;
        }

        if start >= end {
            return Ok(None);
        }

        let read_err = |source| ScanError::Read {
            path: self.log_path.clone(),
            source,
        };

        let file = File::open(&self.log_path).map_err(read_err)?;
        let mut reader = BufReader::new(file);
        reader.seek(SeekFrom::Start(start)).map_err(read_err)?;

        let mut found = None;
        for line in reader.lines() {
            let line = line.map_err(read_err)?;
            if line.contains(&self.token) {
                found = Some(line);
                break;
            }
        }

        debug!(
            "scanned {} from {} to {}, match: {}",
            self.log_path.display(),
            start,
            end,
            found.is_some()
        );

        // Mark the whole region seen, match or not, so lines are never
        // reprocessed on the next poll.
        self.store.store(end)?;

        Ok(found)
    }
}
