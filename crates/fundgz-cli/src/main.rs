//! fundgz - estimated fund valuation tracker.

use anyhow::Result;
use clap::Parser;
use fundgz_cli::{AppConfig, Application, Cli, Command, TermPrompter};
use std::io;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();

    // Config path: CLI arg > FUNDGZ_CONFIG env var > ./fundgz.toml > defaults
    let mut config = AppConfig::load(args.config.as_deref())?;
    if let Some(store) = args.store {
        config.store.path = store;
    }
    config.validate()?;

    fundgz_telemetry::init_logging(&config.telemetry, args.verbose)?;
    info!(
        version = env!("CARGO_PKG_VERSION"),
        store = %config.store.path.display(),
        "Starting fundgz"
    );

    let app = Application::new(config);
    let mut out = io::stdout();

    match args.command {
        Command::Run { concurrency } => {
            app.run(concurrency, &mut out).await?;
        }
        Command::Add => {
            app.add(&mut TermPrompter::new(), &mut out)?;
        }
        Command::Delete => {
            app.delete(&mut TermPrompter::new(), &mut out)?;
        }
        Command::List => {
            app.list(&mut out)?;
        }
    }

    Ok(())
}
