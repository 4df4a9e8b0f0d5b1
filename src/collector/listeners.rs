//! Listener status: one status query per defined listener.

use tracing::{debug, error};

use crate::broker::constants::{lookup, Category};
use crate::broker::{AdminSession, Query};
use crate::metrics::names;
use crate::reporting::Reporter;

use super::Identity;

pub(crate) fn collect(
    session: &mut dyn AdminSession,
    identity: &Identity<'_>,
    reporter: &mut dyn Reporter,
) {
    let rows = match session.query(&Query::ListenerInquire) {
        Ok(rows) => rows,
        Err(e) => {
            error!("error fetching listener names: {}", e);
            return;
        }
    };

    for row in &rows {
        let Some(name) = row.text(names::NAME).map(str::trim) else {
            continue;
        };
        // Broker-generated default listener definitions carry no status.
        if name.contains(".DEFAULT.") {
            debug!("skipping default listener {}", name);
            continue;
        }
        report_status(session, identity, reporter, name);
    }
}

fn report_status(
    session: &mut dyn AdminSession,
    identity: &Identity<'_>,
    reporter: &mut dyn Reporter,
    name: &str,
) {
    let mut set = identity.base(names::OBJ_LISTENER);
    set.add_attr(names::NAME, name);

    match session.query(&Query::ListenerStatus {
        name: name.to_string(),
    }) {
        Ok(rows) => {
            // A listener that has never started returns no status row;
            // report it as stopped rather than dropping it.
            let status = rows
                .first()
                .and_then(|row| row.number(names::STATUS))
                .unwrap_or(0);
            set.add_attr(
                names::STATUS,
                lookup(status, Category::ServiceStatus).unwrap_or("UNKNOWN"),
            );
            if let Some(port) = rows.first().and_then(|row| row.number("port")) {
                set.add_gauge("port", port as f64);
            }
        }
        Err(e) => {
            error!("error fetching status for listener {}: {}", name, e);
            set.add_attr(names::STATUS, "UNKNOWN");
            set.add_attr_number(names::ERROR, e.reason_code());
        }
    }

    reporter.report(names::MQ_OBJECT_STATUS_SAMPLE, set, Some(name));
}
