use anyhow::Result;
use tokio::signal;
use tracing::{info, Level};

/// Get the appropriate log level based on verbosity
pub fn get_log_level(verbosity: u8) -> Level {
    match verbosity {
        0 => Level::ERROR,
        1 => Level::WARN,
        2 => Level::INFO,
        3 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Handles signals like CTRL+C for graceful termination
pub fn setup_signal_handler() -> Result<()> {
    tokio::spawn(async {
        let _ = signal::ctrl_c().await;
        info!("interrupted, shutting down");
        std::process::exit(0);
    });

    Ok(())
}
