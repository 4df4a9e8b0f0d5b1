use std::fs;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum OffsetError {
    #[error("failed to read offset state {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write offset state {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("offset state {path} is corrupt ({len} bytes, expected 8)")]
    Corrupt { path: PathBuf, len: usize },
}

/// Persists the single byte offset a log tail scanner has consumed up to.
///
/// The state file holds one fixed-width 64-bit big-endian integer. A missing
/// file means offset zero; a crash mid-write costs at worst a re-scan of
/// already-seen lines on the next run.
#[derive(Debug, Clone)]
pub struct LogOffsetStore {
    path: PathBuf,
}

impl LogOffsetStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Last persisted offset, or 0 when no state file exists yet.
    pub fn load(&self) -> Result<u64, OffsetError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(0),
            Err(source) => {
                return Err(OffsetError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        let raw: [u8; 8] = bytes.as_slice().try_into().map_err(|_| OffsetError::Corrupt {
            path: self.path.clone(),
            len: bytes.len(),
        })?;
        Ok(u64::from_be_bytes(raw))
    }

    pub fn store(&self, offset: u64) -> Result<(), OffsetError> {
        fs::write(&self.path, offset.to_be_bytes()).map_err(|source| OffsetError::Write {
            path: self.path.clone(),
            source,
        })
    }
}
