//! Queue metrics: three independent administrative queries merged into one
//! record per queue.

use tracing::{debug, error};

use crate::broker::{AdminSession, Query};
use crate::filtering::FilterRuleSet;
use crate::metrics::merger::RecordMerger;
use crate::metrics::names;

pub(crate) fn collect(
    session: &mut dyn AdminSession,
    filter: &FilterRuleSet,
    merger: &mut RecordMerger,
    additional_status: bool,
) {
    inquire(session, filter, merger);
    reset_stats(session, filter, merger);
    if additional_status {
        status(session, filter, merger);
    }
}

fn inquire(session: &mut dyn AdminSession, filter: &FilterRuleSet, merger: &mut RecordMerger) {
    let rows = match session.query(&Query::QueueInquire) {
        Ok(rows) => rows,
        Err(e) => {
            error!("error fetching queue metrics: {}", e);
            return;
        }
    };

    debug!("{} queues returned by this query", rows.len());

    let mut skipped = 0usize;
    let mut reporting = 0usize;
    for row in &rows {
        let Some(name) = row.text(names::Q_NAME) else {
            continue;
        };
        if !filter.should_report(name) {
            skipped += 1;
            continue;
        }
        reporting += 1;

        let depth = row.number(names::Q_DEPTH);
        let max_depth = row.number(names::Q_MAX_DEPTH);

        let set = merger.record_mut(name);
        if let Some(depth) = depth {
            set.add_gauge(names::Q_DEPTH, depth as f64);
        }
        if let Some(max_depth) = max_depth {
            set.add_gauge(names::Q_MAX_DEPTH, max_depth as f64);
        }
        if let Some(open_input) = row.number(names::OPEN_INPUT_COUNT) {
            set.add_gauge(names::OPEN_INPUT_COUNT, open_input as f64);
        }
        if let Some(open_output) = row.number(names::OPEN_OUTPUT_COUNT) {
            set.add_gauge(names::OPEN_OUTPUT_COUNT, open_output as f64);
        }
        if let (Some(depth), Some(max_depth)) = (depth, max_depth) {
            let percent = if max_depth > 0 {
                depth * 100 / max_depth
            } else {
                0
            };
            set.add_gauge(names::Q_DEPTH_PERCENT, percent as f64);
        }

        debug!("[queue_name: {}, queue_depth: {:?}]", name.trim(), depth);
    }

    debug!(
        "{} queues skipped and {} queues reporting for this queue manager",
        skipped, reporting
    );
}

fn reset_stats(session: &mut dyn AdminSession, filter: &FilterRuleSet, merger: &mut RecordMerger) {
    let rows = match session.query(&Query::QueueResetStats) {
        Ok(rows) => rows,
        Err(e) => {
            error!("error fetching reset-queue statistics: {}", e);
            return;
        }
    };

    for row in &rows {
        let Some(name) = row.text(names::Q_NAME) else {
            continue;
        };
        if !filter.should_report(name) {
            continue;
        }

        let set = merger.record_mut(name);
        for field in [
            names::HIGH_Q_DEPTH,
            names::MSG_DEQ_COUNT,
            names::MSG_ENQ_COUNT,
            names::TIME_SINCE_RESET,
        ] {
            if let Some(value) = row.number(field) {
                set.add_gauge(field, value as f64);
            }
        }
    }
}

fn status(session: &mut dyn AdminSession, filter: &FilterRuleSet, merger: &mut RecordMerger) {
    let rows = match session.query(&Query::QueueStatus) {
        Ok(rows) => rows,
        Err(e) => {
            error!("error fetching additional queue status: {}", e);
            return;
        }
    };

    for row in &rows {
        let Some(name) = row.text(names::Q_NAME) else {
            continue;
        };
        if !filter.should_report(name) {
            continue;
        }

        let set = merger.record_mut(name);
        if let Some(age) = row.number(names::OLDEST_MSG_AGE) {
            set.add_gauge(names::OLDEST_MSG_AGE, age as f64);
        }
        if let Some(uncommitted) = row.number(names::UNCOMMITTED_MSGS) {
            set.add_gauge(names::UNCOMMITTED_MSGS, uncommitted as f64);
        }
        if let Some(last_get) = date_time_pair(row.text("lastGetDate"), row.text("lastGetTime")) {
            set.add_attr(names::LAST_GET, last_get);
        }
        if let Some(last_put) = date_time_pair(row.text("lastPutDate"), row.text("lastPutTime")) {
            set.add_attr(names::LAST_PUT, last_put);
        }
    }
}

fn date_time_pair(date: Option<&str>, time: Option<&str>) -> Option<String> {
    match (date, time) {
        (None, None) => None,
        (date, time) => Some(
            format!("{} {}", date.unwrap_or_default(), time.unwrap_or_default())
                .trim()
                .to_string(),
        ),
    }
}
