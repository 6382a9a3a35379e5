use std::{
    fs::File,
    path::PathBuf,
    sync::{Arc, Mutex},
};

use anyhow::{Result, anyhow};
use clap::Parser;
use reqwest::Client;
use teammove_core::ports::RideSource;
use teammove_provider_api as api;
use teammove_provider_snapshot as snapshot;
use tracing_subscriber::EnvFilter;

/// Match carpool passengers with drivers from a Teammove deployment or a snapshot file.
#[derive(Debug, Parser)]
#[command(name = "teammove", version)]
pub(crate) struct Config {
    /// Base URL of the Teammove API.
    #[arg(long, env = "TEAMMOVE_API_URL", default_value = api::DEFAULT_BASE_URL)]
    pub api_url: String,

    /// Bearer token issued at login.
    #[arg(long, env = "TEAMMOVE_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Read events and rides from a JSON snapshot instead of the API.
    #[arg(long, value_name = "PATH")]
    pub snapshot: Option<PathBuf>,

    /// Write logs to this file (the terminal is taken by the UI).
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

impl Config {
    /// Install the log subscriber when a log file was requested. `RUST_LOG` overrides the level.
    pub(crate) fn init_logging(&self) -> Result<()> {
        let Some(path) = &self.log_file else {
            return Ok(());
        };

        let file = File::create(path)?;
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .try_init()
            .map_err(|err| anyhow!(err))
    }

    /// Build the ride source: the snapshot when given, the API otherwise.
    pub(crate) fn ride_source(&self) -> Result<Arc<dyn RideSource>> {
        if let Some(path) = &self.snapshot {
            return Ok(snapshot::source(path)?);
        }

        let client = Client::builder().user_agent("teammove/0.1").build()?;
        Ok(api::source(client, &self.api_url, self.token.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEMO_SNAPSHOT: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../demos/snapshot.json");

    #[test]
    fn snapshot_takes_precedence_over_api() {
        let config = Config::try_parse_from([
            "teammove",
            "--api-url",
            "https://teammove.example",
            "--snapshot",
            DEMO_SNAPSHOT,
        ])
        .expect("valid arguments");

        let source = config.ride_source().expect("demo snapshot loads");
        assert_eq!(source.name(), DEMO_SNAPSHOT);
    }

    #[test]
    fn api_source_is_named_after_base_url() {
        let config = Config::try_parse_from(["teammove", "--api-url", "https://teammove.example/"])
            .expect("valid arguments");

        let source = config.ride_source().expect("client builds");
        assert_eq!(source.name(), "https://teammove.example");
    }

    #[test]
    fn logging_is_off_without_log_file() {
        let config = Config::try_parse_from(["teammove"]).expect("valid arguments");
        assert!(config.log_file.is_none());
        config.init_logging().expect("nothing to install");
    }
}
