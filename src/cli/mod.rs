pub mod args;

pub use args::{parse_args, Args};

use std::time::Duration;

use anyhow::{bail, Context, Result};
use tokio::time;
use tracing::info;

use crate::broker::replay::ReplayClient;
use crate::broker::AdminClient;
use crate::collector::CollectionOrchestrator;
use crate::config::Config;
use crate::reporting::JsonLineReporter;

/// Main application logic: load configuration, build the orchestrator, and
/// drive poll cycles until interrupted (or once, with `--once`).
pub async fn run(args: Args) -> Result<()> {
    let config = Config::load(&args.config)?;
    let mut orchestrator = CollectionOrchestrator::from_config(&config)?;

    let mut client: Box<dyn AdminClient> = match &args.replay {
        Some(path) => Box::new(
            ReplayClient::from_file(path)
                .with_context(|| format!("failed to load replay fixture {}", path.display()))?,
        ),
        None => bail!(
            "no administrative client configured; run with --replay <fixture> \
             (a live broker driver plugs in through the AdminClient trait)"
        ),
    };
    let mut reporter = JsonLineReporter::stdout();

    if args.once {
        orchestrator.run_cycle(client.as_mut(), &mut reporter);
        return Ok(());
    }

    info!(
        "polling queue manager {} every {}s",
        config.broker.queue_manager, config.poll_interval_secs
    );
    let mut interval = time::interval(Duration::from_secs(config.poll_interval_secs));
    loop {
        interval.tick().await;
        orchestrator.run_cycle(client.as_mut(), &mut reporter);
    }
}
