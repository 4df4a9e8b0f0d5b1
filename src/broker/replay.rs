//! A canned administrative client.
//!
//! Serves query responses from a JSON fixture, keyed by
//! [`Query::fixture_key`]. Used to exercise the full collection pipeline in
//! development and in integration tests without a live broker.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use super::{AdminClient, AdminSession, Query, QueryError, Row, SessionError};

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("failed to read replay fixture {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse replay fixture {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Default, Deserialize)]
struct Fixture {
    /// Rows returned per query key. Queries absent from the map return an
    /// empty result set, not an error.
    #[serde(default)]
    responses: HashMap<String, Vec<Row>>,
    /// When set, connecting fails with this reason code instead.
    #[serde(default)]
    fail_connect: Option<i64>,
}

#[derive(Debug)]
pub struct ReplayClient {
    fixture: Fixture,
}

impl ReplayClient {
    pub fn from_file(path: &Path) -> Result<Self, ReplayError> {
        let raw = fs::read_to_string(path).map_err(|source| ReplayError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let fixture: Fixture =
            serde_json::from_str(&raw).map_err(|source| ReplayError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        debug!(
            "loaded replay fixture {} with {} canned responses",
            path.display(),
            fixture.responses.len()
        );
        Ok(Self { fixture })
    }
}

impl AdminClient for ReplayClient {
    fn connect(&mut self) -> Result<Box<dyn AdminSession + '_>, SessionError> {
        if let Some(reason_code) = self.fixture.fail_connect {
            return Err(SessionError::Unavailable { reason_code });
        }
        Ok(Box::new(ReplaySession {
            responses: &self.fixture.responses,
        }))
    }
}

struct ReplaySession<'a> {
    responses: &'a HashMap<String, Vec<Row>>,
}

impl AdminSession for ReplaySession<'_> {
    fn query(&mut self, query: &Query) -> Result<Vec<Row>, QueryError> {
        Ok(self
            .responses
            .get(&query.fixture_key())
            .cloned()
            .unwrap_or_default())
    }
}
