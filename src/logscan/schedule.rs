use chrono::{DateTime, Days, Duration, Local, LocalResult, NaiveDate, NaiveTime, TimeZone};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("invalid scan time '{0}', expected HH:MM on a 24-hour clock")]
    InvalidTime(String),
}

/// Computes the next daily wall-clock instant at which the maintenance-log
/// scan should run, and gates that scan.
///
/// Advancing uses calendar-day arithmetic so the configured hour:minute is
/// preserved across daylight-saving transitions, rather than adding a fixed
/// 24 hours.
#[derive(Debug)]
pub struct MaintenanceScanScheduler {
    state: Option<State>,
}

#[derive(Debug)]
struct State {
    time_of_day: NaiveTime,
    next_scan_time: DateTime<Local>,
}

impl MaintenanceScanScheduler {
    /// A scheduler that never fires, for configurations with the
    /// maintenance scan turned off.
    pub fn disabled() -> Self {
        Self { state: None }
    }

    /// Configure from an `HH:MM` 24-hour local-time string.
    ///
    /// If today's instant at that time is already in the past relative to
    /// `now`, the first scan is scheduled for tomorrow.
    pub fn configure(spec: &str, now: DateTime<Local>) -> Result<Self, ScheduleError> {
        let time_of_day = parse_time_of_day(spec)?;

        let mut next_scan_time = local_instant(now.date_naive(), time_of_day);
        if next_scan_time < now {
            next_scan_time = local_instant(next_day(now.date_naive()), time_of_day);
        }

        Ok(Self {
            state: Some(State {
                time_of_day,
                next_scan_time,
            }),
        })
    }

    /// Whether the scan is due at `now`. If so, the scheduler advances to
    /// the same time of day one calendar day after the instant that fired.
    pub fn is_due(&mut self, now: DateTime<Local>) -> bool {
        let Some(state) = self.state.as_mut() else {
            return false;
        };

        if now < state.next_scan_time {
            return false;
        }

        state.next_scan_time =
            local_instant(next_day(state.next_scan_time.date_naive()), state.time_of_day);
        true
    }

    pub fn next_scan_time(&self) -> Option<DateTime<Local>> {
        self.state.as_ref().map(|s| s.next_scan_time)
    }
}

fn parse_time_of_day(spec: &str) -> Result<NaiveTime, ScheduleError> {
    let invalid = || ScheduleError::InvalidTime(spec.to_string());

    let (hour, minute) = spec.trim().split_once(':').ok_or_else(invalid)?;
    let hour: u32 = hour.parse().map_err(|_| invalid())?;
    let minute: u32 = minute.parse().map_err(|_| invalid())?;
    NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(invalid)
}

fn next_day(date: NaiveDate) -> NaiveDate {
    date.checked_add_days(Days::new(1)).unwrap_or(date)
}

/// Resolve a local date and time of day to an instant, tolerating
/// daylight-saving gaps and ambiguities.
fn local_instant(date: NaiveDate, time: NaiveTime) -> DateTime<Local> {
    match Local.from_local_datetime(&date.and_time(time)) {
        LocalResult::Single(dt) => dt,
        LocalResult::Ambiguous(earliest, _) => earliest,
        LocalResult::None => {
            // Spring-forward gap: the wall-clock time doesn't exist today.
            // Slide an hour later, which lands after the transition.
            let shifted = date.and_time(time) + Duration::hours(1);
            match Local.from_local_datetime(&shifted) {
                LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => dt,
                LocalResult::None => Local::now(),
            }
        }
    }
}
