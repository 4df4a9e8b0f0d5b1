//! Broker event messages: drains the administrative event queues and turns
//! each pending message into one event record.

use std::fmt::Write as _;

use tracing::{debug, error};

use crate::broker::constants::{lookup_or_code, Category};
use crate::broker::{AdminSession, Query, Row, Value};
use crate::metrics::names;
use crate::reporting::Reporter;

use super::Identity;

const EVENT_QUEUES: [&str; 7] = [
    "SYSTEM.ADMIN.QMGR.EVENT",
    "SYSTEM.ADMIN.CHANNEL.EVENT",
    "SYSTEM.ADMIN.PERFM.EVENT",
    "SYSTEM.ADMIN.CONFIG.EVENT",
    "SYSTEM.ADMIN.COMMAND.EVENT",
    "SYSTEM.ADMIN.LOGGER.EVENT",
    "SYSTEM.ADMIN.PUBSUB.EVENT",
];

pub(crate) fn collect(
    session: &mut dyn AdminSession,
    identity: &Identity<'_>,
    reporter: &mut dyn Reporter,
) {
    for queue in EVENT_QUEUES {
        let rows = match session.query(&Query::EventMessages {
            queue: queue.to_string(),
        }) {
            Ok(rows) => rows,
            Err(e) => {
                error!("error draining event queue {}: {}", queue, e);
                continue;
            }
        };
        if !rows.is_empty() {
            debug!("{} pending events on {}", rows.len(), queue);
        }

        for row in &rows {
            report_event(identity, reporter, queue, row);
        }
    }
}

fn report_event(identity: &Identity<'_>, reporter: &mut dyn Reporter, queue: &str, row: &Row) {
    let mut set = identity.base(names::OBJ_EVENT);
    set.add_attr(names::QUEUE_MANAGER, identity.manager_name);
    set.add_attr(names::EVENT_QUEUE, queue);
    if let Some(put_time) = row.text(names::PUT_TIME) {
        set.add_attr(names::PUT_TIME, put_time);
    }
    if let Some(code) = row.number(names::REASON_CODE) {
        set.add_attr(
            names::REASON_CODE,
            lookup_or_code(code, Category::ReasonCode, "REASON"),
        );
    }
    if let Some(qualifier) = row.number(names::REASON_QUALIFIER) {
        set.add_attr(
            names::REASON_QUALIFIER,
            lookup_or_code(qualifier, Category::ReasonQualifier, "QUALIFIER"),
        );
    }
    set.add_attr(names::DETAILS, details(row));

    reporter.report(names::MQ_EVENT_SAMPLE, set, None);
}

/// Event payloads vary per reason code; everything not lifted into a named
/// attribute is preserved as one `name=value;` string.
fn details(row: &Row) -> String {
    let mut fields: Vec<(&String, &Value)> = row
        .iter()
        .filter(|(name, _)| {
            !matches!(
                name.as_str(),
                names::PUT_TIME | names::REASON_CODE | names::REASON_QUALIFIER
            )
        })
        .collect();
    fields.sort_by(|a, b| a.0.cmp(b.0));

    let mut out = String::new();
    for (name, value) in fields {
        match value {
            Value::Number(n) => {
                let _ = write!(out, "{name}={n};");
            }
            Value::Text(s) => {
                let _ = write!(out, "{name}={};", s.trim());
            }
            Value::Bytes(b) => {
                let _ = write!(out, "{name}=");
                for byte in b {
                    let _ = write!(out, "{byte:02x}");
                }
                out.push(';');
            }
        }
    }
    out
}
