use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(
    author,
    version,
    about = "Message broker monitoring agent for IBM MQ queue managers",
    long_about = "mqmon polls an IBM MQ queue manager's administrative interface for queue,\n\
topic, channel, listener and broker health metrics, normalizes them into\n\
metric records, and emits them as JSON lines on stdout. It also tails the\n\
broker error logs for known diagnostic signatures, resuming across restarts."
)]
pub struct Args {
    /// Path to the TOML configuration file
    #[arg(short = 'f', long = "config", default_value = "mqmon.toml")]
    pub config: PathBuf,

    /// Run a single poll cycle and exit
    #[arg(long)]
    pub once: bool,

    /// Serve administrative responses from a JSON fixture instead of a live broker
    #[arg(long, value_name = "FILE")]
    pub replay: Option<PathBuf>,

    /// Enable development mode - mirrors logs to a timestamped file
    #[arg(long)]
    pub dev: bool,

    /// Verbosity level for debug output
    #[arg(short, long, default_value = "0")]
    pub verbosity: u8,
}

pub fn parse_args() -> Args {
    Args::parse()
}
