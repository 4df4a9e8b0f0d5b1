pub mod offset;
pub mod scanner;
pub mod schedule;

pub use offset::{LogOffsetStore, OffsetError};
pub use scanner::{LogTailScanner, ScanError};
pub use schedule::{MaintenanceScanScheduler, ScheduleError};
