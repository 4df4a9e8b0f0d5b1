//! The poll-cycle orchestrator and the per-object-kind collectors.

mod channels;
mod events;
mod listeners;
mod logs;
mod queue_manager;
mod queues;
mod topics;

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Local;
use tracing::{debug, error, info};

use crate::broker::{AdminClient, SessionError};
use crate::config::{Config, ReportConfig};
use crate::filtering::FilterRuleSet;
use crate::logscan::{LogTailScanner, MaintenanceScanScheduler};
use crate::metrics::merger::RecordMerger;
use crate::metrics::{names, MetricSet};
use crate::reporting::Reporter;

/// Identity of the monitored queue manager, shared by every record in a
/// cycle.
pub(crate) struct Identity<'a> {
    pub manager_name: &'a str,
    pub manager_host: &'a str,
}

impl Identity<'_> {
    /// A record seeded with the common-attribute prefix for `object_kind`.
    pub(crate) fn base(&self, object_kind: &str) -> MetricSet {
        let mut set = MetricSet::new();
        set.add_attr(names::PROVIDER, names::IBM_PROVIDER);
        set.add_attr(names::OBJECT_ATTRIBUTE, object_kind);
        set.add_attr(names::Q_MANAGER_NAME, self.manager_name);
        set.add_attr(names::Q_MANAGER_HOST, self.manager_host);
        set
    }
}

/// Runs one collection cycle at a time: establishes an administrative
/// session, runs each enabled collector against it, drains the merged
/// records into the reporter, then runs the log scans.
///
/// Failures below the session level are cycle-local; a failed query is
/// logged and the remaining collectors still run.
pub struct CollectionOrchestrator {
    manager_name: String,
    manager_host: String,
    gates: ReportConfig,
    queue_filter: FilterRuleSet,
    topic_filter: FilterRuleSet,
    error_scanner: Option<LogTailScanner>,
    maintenance: MaintenanceScanScheduler,
    maintenance_dir: Option<PathBuf>,
}

impl CollectionOrchestrator {
    pub fn from_config(config: &Config) -> Result<Self> {
        let queue_filter = config
            .queue_filter()
            .context("invalid queue filter configuration")?;
        let topic_filter = config
            .topic_filter()
            .context("invalid topic filter configuration")?;

        // Presence of the paths is guaranteed by Config::validate.
        let error_scanner = if config.report.monitor_error_logs {
            config.logs.error_log_path.as_ref().map(|dir| {
                LogTailScanner::new(
                    dir.join(logs::ERROR_LOG_FILE),
                    config.state_dir().join("log-reader.state"),
                    logs::CHANNEL_OUT_OF_SYNC_TOKEN,
                )
            })
        } else {
            None
        };

        let maintenance = match (
            config.report.maintenance_errors,
            &config.logs.daily_maintenance_scan_time,
        ) {
            (true, Some(spec)) => MaintenanceScanScheduler::configure(spec, Local::now())
                .context("invalid maintenance scan time")?,
            _ => MaintenanceScanScheduler::disabled(),
        };
        if let Some(next) = maintenance.next_scan_time() {
            info!("first maintenance log scan scheduled for {}", next);
        }

        Ok(Self {
            manager_name: config.broker.queue_manager.clone(),
            manager_host: config.broker.host.clone(),
            gates: config.report.clone(),
            queue_filter,
            topic_filter,
            error_scanner,
            maintenance,
            maintenance_dir: config.logs.maintenance_log_path.clone(),
        })
    }

    /// Run one poll cycle. The session is acquired here and dropped on every
    /// exit path; nothing is retained between cycles except the scanner's
    /// persisted offset and the maintenance schedule.
    pub fn run_cycle(&mut self, client: &mut dyn AdminClient, reporter: &mut dyn Reporter) {
        debug!("starting poll cycle for queue manager {}", self.manager_name);

        let identity = Identity {
            manager_name: &self.manager_name,
            manager_host: &self.manager_host,
        };

        {
            let mut session = match client.connect() {
                Ok(session) => session,
                Err(e) => {
                    error!(
                        "could not establish session with queue manager {}: {}",
                        self.manager_name, e
                    );
                    self.report_unavailable(&e, reporter);
                    return;
                }
            };

            queue_manager::collect(&mut *session, &identity, reporter);
            listeners::collect(&mut *session, &identity, reporter);

            let mut merger = RecordMerger::new(
                names::OBJ_QUEUE,
                names::Q_NAME,
                &self.manager_name,
                &self.manager_host,
            );
            queues::collect(
                &mut *session,
                &self.queue_filter,
                &mut merger,
                self.gates.additional_queue_status,
            );
            for (name, set) in merger.into_records() {
                reporter.report(names::MQ_QUEUE_SAMPLE, set, Some(&name));
            }

            let mut merger = RecordMerger::new(
                names::OBJ_CHANNEL,
                names::CHANNEL_NAME,
                &self.manager_name,
                &self.manager_host,
            );
            channels::collect(&mut *session, &mut merger);
            for (name, set) in merger.into_records() {
                reporter.report(names::MQ_CHANNEL_SAMPLE, set, Some(&name));
            }

            if self.gates.topic_status {
                let mut merger = RecordMerger::new(
                    names::OBJ_TOPIC,
                    names::TOPIC_NAME,
                    &self.manager_name,
                    &self.manager_host,
                );
                topics::collect(
                    &mut *session,
                    &self.topic_filter,
                    &mut merger,
                    self.gates.additional_topic_status,
                );
                for (name, set) in merger.into_records() {
                    reporter.report(names::MQ_TOPIC_SAMPLE, set, Some(&name));
                }
            }

            if self.gates.event_messages {
                events::collect(&mut *session, &identity, reporter);
            }
        }

        if let Some(scanner) = &self.error_scanner {
            logs::scan_error_log(scanner, &identity, reporter);
        }

        let now = Local::now();
        if self.maintenance.is_due(now) {
            if let Some(dir) = &self.maintenance_dir {
                logs::scan_maintenance_log(dir, now.date_naive(), &identity, reporter);
            }
        }

        debug!("poll cycle complete for queue manager {}", self.manager_name);
    }

    /// The single status record emitted when a cycle is abandoned because no
    /// administrative session could be established.
    fn report_unavailable(&self, error: &SessionError, reporter: &mut dyn Reporter) {
        let label = error.status_label();
        let identity = Identity {
            manager_name: &self.manager_name,
            manager_host: &self.manager_host,
        };
        let mut set = identity.base(names::OBJ_Q_MGR);
        set.add_attr(names::CHANNEL_INIT_STATUS, label);
        set.add_attr(names::COMMAND_SERVER_STATUS, label);
        set.add_attr(names::STATUS, label);
        set.add_attr_number(names::ERROR, error.reason_code());
        set.add_attr(names::NAME, &self.manager_name);
        reporter.report(names::MQ_OBJECT_STATUS_SAMPLE, set, Some(&self.manager_name));
    }
}
