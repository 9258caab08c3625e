pub mod config;
pub mod externals;
pub mod internals;
pub mod models;
pub mod system;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use config::{Args, Settings};
use externals::{event_logging::EventLoggingModule, gpio::GpioModule};
use internals::core::{fan::FanController, presence::PresenceMonitor};
use system::{shutdown_signal, supervise_monitor, task_monitor_presence};
use tokio_util::{sync::CancellationToken, task::TaskTracker};

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::try_from(Args::parse())?;

    let subscriber = tracing_subscriber::fmt()
        .compact()
        .with_file(true)
        .with_line_number(true)
        .with_thread_ids(true)
        .with_target(false)
        .with_max_level(settings.log_level)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let GpioModule { gpio } = GpioModule::initialize().context("Failed to open GPIO")?;

    let EventLoggingModule {
        presence_event_adapter,
    } = EventLoggingModule::initialize();

    let fan = FanController::initialize(Arc::clone(&gpio), settings.fan_pin, settings.fan_speed)
        .context("Failed to set up the fan")?;
    let monitor = PresenceMonitor::initialize(gpio, settings.tool_pin, fan, presence_event_adapter)
        .context("Failed to set up the tool sensor")?;

    let tracker = TaskTracker::new();
    let token = CancellationToken::new();

    let token_clone = token.clone();
    let monitor_task =
        tracker.spawn(async move { task_monitor_presence(token_clone, monitor).await });
    tracker.close();

    supervise_monitor(token, monitor_task, shutdown_signal()).await?;
    tracker.wait().await;

    Ok(())
}
