//! Log-derived events: the incremental error-log tail and the daily
//! maintenance-log sweep.

use std::fs;
use std::io;
use std::path::Path;

use chrono::NaiveDate;
use tracing::{debug, error, info};

use crate::logscan::LogTailScanner;
use crate::metrics::names;
use crate::reporting::Reporter;

use super::Identity;

/// Error-log file name within the configured error log directory.
pub(crate) const ERROR_LOG_FILE: &str = "AMQERR01.LOG";
/// Message id logged when a channel falls out of sync with its partner.
pub(crate) const CHANNEL_OUT_OF_SYNC_TOKEN: &str = "AMQ9526";
/// Token marking a failed compression pass in the maintenance log.
const COMPRESSING_TOKEN: &str = "Compressing";

/// Tail the broker error log for the out-of-sync signature and report a hit
/// as an event. Scan failures keep the persisted offset untouched, so the
/// same region is retried on the next cycle.
pub(crate) fn scan_error_log(
    scanner: &LogTailScanner,
    identity: &Identity<'_>,
    reporter: &mut dyn Reporter,
) {
    match scanner.find_next_match() {
        Ok(Some(line)) => {
            info!("channel out-of-sync error found in {}", scanner.log_path().display());
            let mut set = identity.base(names::OBJ_LOG);
            set.add_attr(names::QUEUE_MANAGER, identity.manager_name);
            set.add_attr(names::REASON_CODE, "CHANNEL_OUT_OF_SYNC");
            set.add_attr(names::DETAILS, line);
            reporter.report(names::MQ_EVENT_SAMPLE, set, None);
        }
        Ok(None) => {}
        Err(e) => error!("error scanning broker error log: {}", e),
    }
}

/// Sweep today's maintenance log for a compression failure. The file is
/// date-stamped and rewritten by each maintenance run, so the sweep reads it
/// whole instead of keeping an offset; a missing file means no maintenance
/// ran today.
pub(crate) fn scan_maintenance_log(
    dir: &Path,
    date: NaiveDate,
    identity: &Identity<'_>,
    reporter: &mut dyn Reporter,
) {
    let path = dir.join(format!("mqmaint_err.{}.log", date.format("%Y%m%d")));
    let contents = match fs::read_to_string(&path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!("no maintenance log at {}", path.display());
            return;
        }
        Err(e) => {
            error!("error reading maintenance log {}: {}", path.display(), e);
            return;
        }
    };

    if contents.lines().any(|line| line.contains(COMPRESSING_TOKEN)) {
        info!("compression error found in {}", path.display());
        let mut set = identity.base(names::OBJ_LOG);
        set.add_attr(names::QUEUE_MANAGER, identity.manager_name);
        set.add_attr(names::REASON_CODE, "COMPRESSING_ERROR");
        reporter.report(names::MQ_EVENT_SAMPLE, set, None);
    }
}
