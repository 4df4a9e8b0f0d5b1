//! The administrative-client seam.
//!
//! The broker's wire protocol lives behind [`AdminClient`] / [`AdminSession`]
//! so the merge/filter/scan core never sees protocol details. Sessions are
//! cycle-scoped: acquired when a poll cycle starts and dropped when it ends.

pub mod constants;
pub mod replay;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single administrative query issued during a poll cycle.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Query {
    /// Local queue definitions with depth and handle counts.
    QueueInquire,
    /// Reset-statistics counters per queue (destructive read on the broker).
    QueueResetStats,
    /// Additional per-queue runtime status.
    QueueStatus,
    /// Topic status rows keyed by topic string.
    TopicStatus,
    /// Per-subscription topic status.
    TopicSubscriptions,
    /// Current channel status rows.
    ChannelStatus,
    /// Defined listeners.
    ListenerInquire,
    /// Runtime status for one listener.
    ListenerStatus { name: String },
    /// Queue manager health.
    QueueManagerStatus,
    /// Drain pending event messages from an event queue.
    EventMessages { queue: String },
}

impl Query {
    /// Stable key used by replay fixtures and logging.
    pub fn fixture_key(&self) -> String {
        match self {
            Query::QueueInquire => "queue_inquire".into(),
            Query::QueueResetStats => "queue_reset_stats".into(),
            Query::QueueStatus => "queue_status".into(),
            Query::TopicStatus => "topic_status".into(),
            Query::TopicSubscriptions => "topic_subscriptions".into(),
            Query::ChannelStatus => "channel_status".into(),
            Query::ListenerInquire => "listener_inquire".into(),
            Query::ListenerStatus { name } => format!("listener_status:{name}"),
            Query::QueueManagerStatus => "queue_manager_status".into(),
            Query::EventMessages { queue } => format!("event_messages:{queue}"),
        }
    }
}

/// A raw attribute value in a query response row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Number(i64),
    Text(String),
    Bytes(Vec<u8>),
}

/// One result row: an opaque name-to-value mapping.
///
/// Fields a broker does not support for a particular object subtype are
/// simply absent; the typed getters return `None` rather than failing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Row(HashMap<String, Value>);

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, name: impl Into<String>, value: Value) -> Self {
        self.0.insert(name.into(), value);
        self
    }

    pub fn with_text(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, Value::Text(value.into()))
    }

    pub fn with_number(self, name: impl Into<String>, value: i64) -> Self {
        self.set(name, Value::Number(value))
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        match self.0.get(name) {
            Some(Value::Text(s)) => Some(s),
            _ => None,
        }
    }

    pub fn number(&self, name: &str) -> Option<i64> {
        match self.0.get(name) {
            Some(Value::Number(n)) => Some(*n),
            _ => None,
        }
    }

    pub fn bytes(&self, name: &str) -> Option<&[u8]> {
        match self.0.get(name) {
            Some(Value::Bytes(b)) => Some(b),
            _ => None,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }
}

/// Why an administrative session could not be established. This is the one
/// failure that abandons a whole poll cycle.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("queue manager not available (reason {reason_code})")]
    Unavailable { reason_code: i64 },
    #[error("administrative session setup failed (reason {reason_code})")]
    AdminSetup { reason_code: i64 },
}

impl SessionError {
    /// Status label carried in the broker-unavailable record.
    pub fn status_label(&self) -> &'static str {
        match self {
            SessionError::Unavailable { .. } => "QUEUE_MANAGER_NOT_AVAILABLE",
            SessionError::AdminSetup { .. } => "QUEUE_MANAGER_CONNECT_ERROR",
        }
    }

    pub fn reason_code(&self) -> i64 {
        match self {
            SessionError::Unavailable { reason_code }
            | SessionError::AdminSetup { reason_code } => *reason_code,
        }
    }
}

/// A failed administrative query. Query failures are cycle-local: the
/// orchestrator logs them and moves on to the next query.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("connection error {reason_code}: {message}")]
    Connection { reason_code: i64, message: String },
    #[error("protocol error {reason_code}: {message}")]
    Protocol { reason_code: i64, message: String },
    #[error("not supported ({reason_code}): {message}")]
    NotSupported { reason_code: i64, message: String },
}

impl QueryError {
    pub fn reason_code(&self) -> i64 {
        match self {
            QueryError::Connection { reason_code, .. }
            | QueryError::Protocol { reason_code, .. }
            | QueryError::NotSupported { reason_code, .. } => *reason_code,
        }
    }
}

/// An established administrative session against one queue manager.
pub trait AdminSession {
    /// Execute one query and return its ordered result rows.
    fn query(&mut self, query: &Query) -> Result<Vec<Row>, QueryError>;
}

/// Connects administrative sessions. Implementations own transport and
/// credentials; the orchestrator only sees the two-stage failure
/// classification (broker unreachable vs. admin setup refused).
pub trait AdminClient {
    fn connect(&mut self) -> Result<Box<dyn AdminSession + '_>, SessionError>;
}
