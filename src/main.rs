// src/main.rs

//! Statistics generator entry point.
//!
//! Runs with no arguments; the scheduler invokes it periodically. All
//! tunables live in `config.toml`, with the webhook URL overridable via
//! the `DISCORD_WEBHOOK_URL` environment variable.

use tofgm_stats::config::Config;
use tofgm_stats::error::Result;
use tofgm_stats::pipeline::run_pipeline;

const CONFIG_PATH: &str = "config.toml";

/// Initialize logging with an `info` default.
fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .init();
}

fn main() -> Result<()> {
    init_logging();

    let mut config = Config::load_or_default(CONFIG_PATH);

    // Environment is read once here; components only see the config object.
    if let Ok(url) = std::env::var("DISCORD_WEBHOOK_URL") {
        if !url.trim().is_empty() {
            config.notify.webhook_url = Some(url);
        }
    }

    config.validate()?;

    run_pipeline(&config)
}
