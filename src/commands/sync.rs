//! Main sync command

use crate::executor::sync;
use crate::types::{CycleStats, EventCallback, SyncError, SyncEvent};
use crate::ui::format_cycle_summary;
use crate::Config;
use std::path::Path;
use std::sync::Arc;
use tokio::runtime::Builder;
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

/// Validate, make sure the replica root exists, run exactly one cycle
///
/// Fatal configuration problems are returned before anything on disk is
/// touched.
pub fn run_once(config: &Config, on_event: Option<&EventCallback>) -> Result<CycleStats, SyncError> {
    prepare(config)?;
    sync(&config.source, &config.replica, on_event)
}

/// Run cycles until interrupted (or once, with `--once`)
///
/// The pause between cycles runs on a tokio runtime so Ctrl-C can end it
/// early. A Ctrl-C that arrives mid-cycle lets the cycle finish first. A
/// failing cycle is logged and retried after the next pause.
pub fn run(config: Config) -> Result<(), SyncError> {
    prepare(&config)?;

    if config.once {
        return run_cycle(&config).map(|_| ());
    }

    let runtime = Builder::new_multi_thread()
        .worker_threads(1)
        .enable_all()
        .build()
        .map_err(|e| SyncError::Runtime(format!("Failed to build tokio runtime: {e}")))?;

    let config = Arc::new(config);
    runtime.block_on(async move {
        let (stop_tx, mut stop_rx) = watch::channel(false);
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                let _ = stop_tx.send(true);
            }
        });

        info!("Starting sync process now!");
        loop {
            let cycle_config = Arc::clone(&config);
            let outcome = tokio::task::spawn_blocking(move || run_cycle(&cycle_config))
                .await
                .map_err(|e| SyncError::Runtime(format!("Sync cycle task failed: {e}")))?;
            if outcome.is_err() {
                info!("Retrying in {}s", config.interval.as_secs());
            }

            if *stop_rx.borrow() {
                break;
            }
            tokio::select! {
                _ = tokio::time::sleep(config.interval) => {}
                // A dropped sender (no Ctrl-C handler) disables this branch
                Ok(()) = stop_rx.changed() => break,
            }
        }

        info!("Sync process stopped by user.");
        Ok::<(), SyncError>(())
    })
}

/// Fatal checks and one-time replica creation
fn prepare(config: &Config) -> Result<(), SyncError> {
    debug!("Checking folders");
    if let Err(e) = config.validate() {
        match &e {
            SyncError::SourceMissing { .. } => {
                error!("Source folder missing: {}", config.source.display())
            }
            e if e.is_fatal() => error!("{e}"),
            _ => {}
        }
        return Err(e);
    }
    if config.ensure_replica()? {
        info!(
            "Replica folder does not exist, created {}",
            config.replica.display()
        );
    }
    Ok(())
}

/// One logged cycle; errors are logged here and handed back
fn run_cycle(config: &Config) -> Result<CycleStats, SyncError> {
    info!("Syncing (this might take some time)");
    let (source, replica) = (config.source.clone(), config.replica.clone());
    let logger = move |event: &SyncEvent| log_event(&source, &replica, event);

    match sync(&config.source, &config.replica, Some(&logger)) {
        Ok(stats) => {
            let next = (!config.once).then_some(config.interval);
            info!("{}", format_cycle_summary(&stats, next));
            Ok(stats)
        }
        Err(e) => {
            error!("Sync cycle failed: {e}");
            Err(e)
        }
    }
}

/// Map a cycle event to a log line
pub fn log_event(source: &Path, replica: &Path, event: &SyncEvent) {
    match event {
        SyncEvent::DirCreated { path } => {
            debug!("Created folder: {}", replica.join(path).display())
        }
        SyncEvent::Copied { path, .. } => info!(
            "Copied: {} -> {}",
            source.join(path).display(),
            replica.join(path).display()
        ),
        SyncEvent::Deleted { path } => info!("Deleted: {}", replica.join(path).display()),
        SyncEvent::EmptyDirRetained { path } => warn!(
            "Empty folder detected in replica (not removed): {}",
            replica.join(path).display()
        ),
        SyncEvent::SourceMissing { path } => warn!(
            "Source file disappeared before it could be copied: {}",
            source.join(path).display()
        ),
        SyncEvent::Skipped { path, reason } => {
            warn!("Skipped {}: {}", path.display(), reason)
        }
    }
}
