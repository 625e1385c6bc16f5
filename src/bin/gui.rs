use anyhow::Context;

use mandel_explorer::{ExplorerConfig, run_gui};

/// Usage: `gui [config.json]`
fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_micros()
        .init();

    let config_path = std::env::args_os().nth(1);
    let config = ExplorerConfig::load_or_default(config_path.as_ref())
        .context("Failed to load configuration")?;

    run_gui(&config)
}
