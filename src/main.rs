use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, bail};
use log::info;

use mandel_explorer::{Explorer, ExplorerConfig, ExportOutcome, InputEvent, SoftwareDevice};

const FIRST_FRAME_TIMEOUT: Duration = Duration::from_secs(60);
const POLL_INTERVAL: Duration = Duration::from_millis(1);

/// Renders the initial view through the full pipeline without a window and
/// exports it.
///
/// Usage: `mandel_explorer [config.json]`
fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_micros()
        .init();

    let config_path = std::env::args_os().nth(1);
    let config = ExplorerConfig::load_or_default(config_path.as_ref())
        .context("Failed to load configuration")?;

    let device = SoftwareDevice::new(config.window.bounds());
    let mut explorer =
        Explorer::start(&config, device).context("Failed to start the explorer")?;

    let deadline = Instant::now() + FIRST_FRAME_TIMEOUT;
    loop {
        let report = explorer.frame().context("Render loop failed")?;
        if report.uploaded {
            break;
        }
        if Instant::now() >= deadline {
            bail!("No frame generated within {:?}", FIRST_FRAME_TIMEOUT);
        }
        thread::sleep(POLL_INTERVAL);
    }

    let Some(task) = explorer.dispatch(InputEvent::ExportRequested) else {
        bail!("Failed to start export");
    };
    let outcome = task.join().context("Export task panicked")?;

    explorer.shutdown();

    match outcome {
        ExportOutcome::Written(path) => {
            info!("Done: {}", path.display());
            Ok(())
        }
        ExportOutcome::Failed(err) => Err(err).context("Export failed"),
    }
}
