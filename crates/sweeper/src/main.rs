//! `scratchkeeper-sweeper` -- bounded scratch-cache retention daemon.
//!
//! Periodically sweeps a scratch directory, deleting files that fall past
//! a count cap or an age cap (newest files survive first). Deletion
//! failures never abort a pass; failed files are revisited next pass.
//!
//! # Environment variables
//!
//! | Variable                  | Required | Default | Description                       |
//! |---------------------------|----------|---------|-----------------------------------|
//! | `SCRATCH_DIR`             | yes      | --      | Directory to sweep                |
//! | `RETENTION_MAX_FILES`     | no       | `30`    | Max files kept, newest first      |
//! | `RETENTION_MAX_AGE_DAYS`  | no       | `30`    | Max file age in days              |
//! | `SWEEP_INTERVAL_SECS`     | no       | `3600`  | Seconds between sweep passes      |

use scratchkeeper_sweeper::config::SweeperConfig;
use scratchkeeper_sweeper::sweep;

use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "scratchkeeper_sweeper=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match SweeperConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Invalid sweeper configuration");
            std::process::exit(1);
        }
    };

    tracing::info!(
        dir = %config.scratch_dir.display(),
        "Starting scratchkeeper-sweeper",
    );

    let cancel = CancellationToken::new();
    let signal_cancel = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Shutdown signal received");
            signal_cancel.cancel();
        }
    });

    sweep::run(config, cancel).await;
}
