//! Channel metrics: one record per current channel instance, with numeric
//! status codes decoded to their short names.

use tracing::{debug, error};

use crate::broker::constants::{lookup, Category};
use crate::broker::{AdminSession, Query, Row};
use crate::metrics::merger::RecordMerger;
use crate::metrics::names;

const UNKNOWN: &str = "UNKNOWN";

pub(crate) fn collect(session: &mut dyn AdminSession, merger: &mut RecordMerger) {
    let rows = match session.query(&Query::ChannelStatus) {
        Ok(rows) => rows,
        Err(e) => {
            error!("error fetching channel status: {}", e);
            return;
        }
    };

    debug!("{} channel instances returned by this query", rows.len());

    for row in &rows {
        let Some(name) = row.text(names::CHANNEL_NAME) else {
            continue;
        };

        let set = merger.record_mut(name);
        set.add_attr(names::CHANNEL_STATUS, status_label(row));
        if let Some(kind) = row.number(names::CHANNEL_TYPE) {
            set.add_attr(
                names::CHANNEL_TYPE,
                lookup(kind, Category::ChannelType).unwrap_or(UNKNOWN),
            );
        }
        if let Some(sub_state) = row.number(names::CHANNEL_SUB_STATE) {
            set.add_attr(
                names::CHANNEL_SUB_STATE,
                lookup(sub_state, Category::ChannelSubState).unwrap_or(UNKNOWN),
            );
        }
        if let Some(connection) = row.text(names::CONNECTION_NAME) {
            set.add_attr(names::CONNECTION_NAME, connection.trim());
        }
        if let Some(date) = row.text(names::CHANNEL_START_DATE) {
            set.add_attr(names::CHANNEL_START_DATE, date);
        }
        if let Some(time) = row.text(names::CHANNEL_START_TIME) {
            set.add_attr(names::CHANNEL_START_TIME, time);
        }

        // Traffic counters are cumulative on the broker side; each is
        // reported both as the raw gauge and as a rate.
        for (field, count_name, rate_name) in [
            ("messages", names::MSGS_COUNT, names::MSGS_RATE),
            ("bytesSent", names::BYTES_SENT_COUNT, names::BYTES_SENT_RATE),
            ("bytesReceived", names::BYTES_REC_COUNT, names::BYTES_REC_RATE),
            ("buffersSent", names::BUFFERS_SENT_COUNT, names::BUFFERS_SENT_RATE),
            ("buffersReceived", names::BUFFER_REC_COUNT, names::BUFFER_REC_RATE),
        ] {
            if let Some(value) = row.number(field) {
                set.add_gauge(count_name, value as f64);
                set.add_rate(rate_name, value as f64);
            }
        }
    }
}

/// Channel status label. An in-doubt channel overrides its transport status;
/// server-connection channels have no in-doubt state and the field is simply
/// absent for them.
fn status_label(row: &Row) -> &'static str {
    if row.number("indoubtStatus").is_some_and(|v| v != 0) {
        return "INDOUBT";
    }
    match row.number(names::CHANNEL_STATUS) {
        Some(code) => lookup(code, Category::ChannelStatus).unwrap_or(UNKNOWN),
        None => UNKNOWN,
    }
}
