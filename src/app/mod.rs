pub mod config;
pub mod logging;

pub use config::Config;

use crate::domain::ScribeError;
use crate::ingest;
use clap::Parser;
use std::process;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

pub struct App {
    config: Config,
}

impl App {
    pub fn from_args<I, T>(args: I) -> Result<Self, ScribeError>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let config = Config::try_parse_from(args).map_err(|e| ScribeError::Config(e.to_string()))?;
        Ok(Self::from_config(config))
    }

    pub fn from_config(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub async fn run(self) -> Result<(), ScribeError> {
        info!("starting logscribe v{}", env!("CARGO_PKG_VERSION"));

        // Ctrl+C behaves like the exit sentinel: finish the queue, drain,
        // terminate cleanly.
        let cancel = CancellationToken::new();
        let signal_cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("received Ctrl+C, shutting down");
                signal_cancel.cancel();
            }
        });

        let written = ingest::run(&self.config, cancel).await?;
        info!(
            "wrote {written} record(s) to {}",
            self.config.log_file.display()
        );
        Ok(())
    }
}

// Main entry point for the application
pub async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Clap handles --help/--version and argument errors, exiting itself.
    let config = Config::parse();

    logging::init();

    let app = App::from_config(config);
    if let Err(e) = app.run().await {
        error!("application error: {e}");
        process::exit(1);
    }

    Ok(())
}
