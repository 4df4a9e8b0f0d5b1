//! Queue manager health: one status record per cycle.

use tracing::error;

use crate::broker::constants::{lookup, Category};
use crate::broker::{AdminSession, Query};
use crate::metrics::names;
use crate::reporting::Reporter;

use super::Identity;

const UNKNOWN: &str = "UNKNOWN";

pub(crate) fn collect(
    session: &mut dyn AdminSession,
    identity: &Identity<'_>,
    reporter: &mut dyn Reporter,
) {
    let rows = match session.query(&Query::QueueManagerStatus) {
        Ok(rows) => rows,
        Err(e) => {
            error!("error fetching queue manager status: {}", e);
            return;
        }
    };
    let Some(row) = rows.first() else {
        return;
    };

    let mut set = identity.base(names::OBJ_Q_MGR);
    set.add_attr(names::NAME, identity.manager_name);

    let service = |code| lookup(code, Category::ServiceStatus).unwrap_or(UNKNOWN);
    if let Some(code) = row.number(names::CHANNEL_INIT_STATUS) {
        set.add_attr(names::CHANNEL_INIT_STATUS, service(code));
    }
    if let Some(code) = row.number(names::COMMAND_SERVER_STATUS) {
        set.add_attr(names::COMMAND_SERVER_STATUS, service(code));
    }
    if let Some(count) = row.number(names::CONNECTION_COUNT) {
        set.add_gauge(names::CONNECTION_COUNT, count as f64);
    }
    let status = match row.number(names::STATUS) {
        Some(code) => lookup(code, Category::QueueManagerStatus).unwrap_or(UNKNOWN),
        None => UNKNOWN,
    };
    set.add_attr(names::STATUS, status);
    set.add_attr_number(names::ERROR, 0);

    reporter.report(names::MQ_OBJECT_STATUS_SAMPLE, set, Some(identity.manager_name));
}
