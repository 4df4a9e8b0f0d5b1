use anyhow::Result;
use tracing_subscriber::fmt;

use mqmon::{cli, logging};

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::parse_args();
    let log_level = logging::get_log_level(args.verbosity);

    // Metric records go to stdout, so logs stay on stderr. In dev mode they
    // are mirrored to a timestamped file instead; the appender guard must
    // live until exit or buffered lines are dropped.
    let _guard = if args.dev {
        let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
        let log_file = format!("mqmon_dev_{timestamp}.log");
        eprintln!("Development mode enabled. Logs will be written to: {log_file}");

        let file_appender = tracing_appender::rolling::never(".", &log_file);
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
        fmt()
            .with_max_level(log_level)
            .with_ansi(false)
            .with_writer(non_blocking)
            .init();
        Some(guard)
    } else {
        fmt()
            .with_max_level(log_level)
            .with_writer(std::io::stderr)
            .init();
        None
    };

    logging::setup_signal_handler()?;

    cli::run(args).await
}
