use std::future::Future;

use anyhow::Context;
use tokio::{
    signal::{
        self,
        unix::{signal as unix_signal, SignalKind},
    },
    task::JoinHandle,
};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use crate::internals::core::{
    ports::{GpioPort, HardwareError, PresenceEventPort},
    presence::PresenceMonitor,
};

/// Task: Poll the tool sensor and switch the fan until cancelled.
/// A hardware failure ends the task with the error.
#[tracing::instrument(skip_all)]
pub async fn task_monitor_presence<G: GpioPort, E: PresenceEventPort>(
    token: CancellationToken,
    mut monitor: PresenceMonitor<G, E>,
) -> Result<(), HardwareError> {
    info!("Started.");

    let result = monitor.run_loop(&token).await;
    match &result {
        Ok(()) => warn!("Cancelled."),
        Err(e) => error!("Stopped on hardware failure. Error: {}", e),
    }
    result
}

/// Wait for the monitor task to end, cancelling it once `shutdown` resolves.
/// Fails if the task failed or if `shutdown` could not be listened for.
pub async fn supervise_monitor(
    token: CancellationToken,
    mut monitor_task: JoinHandle<Result<(), HardwareError>>,
    shutdown: impl Future<Output = std::io::Result<()>>,
) -> anyhow::Result<()> {
    let outcome = tokio::select! {
        res = &mut monitor_task => res,
        res = shutdown => {
            res.context("Failed to listen for shutdown signals")?;
            info!("Shutdown signal received.");
            token.cancel();
            monitor_task.await
        },
    };

    outcome
        .context("Presence monitor task panicked")?
        .context("Presence monitor failed")?;
    Ok(())
}

/// Resolve on Ctrl-C (SIGINT) or SIGTERM.
pub async fn shutdown_signal() -> std::io::Result<()> {
    let mut terminate = unix_signal(SignalKind::terminate())?;

    tokio::select! {
        res = signal::ctrl_c() => res,
        _ = terminate.recv() => Ok(()),
    }
}
