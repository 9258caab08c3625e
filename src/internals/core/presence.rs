use std::{sync::Arc, time::Duration};

use tokio_util::sync::CancellationToken;
use tracing::{info, trace};

use crate::models::{pin::Pin, presence_event::PresenceEvent};

use super::{
    fan::FanController,
    ports::{GpioPort, HardwareError, PinMode, PresenceEventPort, PullMode},
};

/// Time between two reads of the tool sensor.
pub const POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Where the tool is, as last acted upon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresenceState {
    /// Resting on the dock, fan commanded off.
    Present,
    /// Lifted off the dock, fan commanded on at its idle speed.
    Absent,
}

/// Watches the tool sensor and switches the fan on the edges.
///
/// Each reading is taken as a settled level; only a change of level
/// actuates the fan, so repeated identical readings are no-ops.
pub struct PresenceMonitor<G: GpioPort, E: PresenceEventPort> {
    gpio: Arc<G>,
    pin: Pin,
    state: PresenceState,
    fan: FanController<G>,
    events: E,
}

impl<G: GpioPort, E: PresenceEventPort> PresenceMonitor<G, E> {
    /// Configure `pin` as a pulled-down input. A disconnected sensor
    /// therefore reads as the tool being docked.
    pub fn initialize(
        gpio: Arc<G>,
        pin: Pin,
        fan: FanController<G>,
        events: E,
    ) -> Result<Self, HardwareError> {
        gpio.set_pin_mode(pin, PinMode::Input)?;
        gpio.set_pull_up_down(pin, PullMode::Down)?;
        info!("Monitoring tool on pin {}", pin);

        Ok(Self {
            gpio,
            pin,
            state: PresenceState::Present,
            fan,
            events,
        })
    }

    pub fn on_tool_removed(&mut self) -> Result<(), HardwareError> {
        if self.state == PresenceState::Present {
            self.events.emit(PresenceEvent::ToolRemoved);
            self.fan.on()?;
            self.state = PresenceState::Absent;
        }
        Ok(())
    }

    pub fn on_tool_replaced(&mut self) -> Result<(), HardwareError> {
        if self.state == PresenceState::Absent {
            self.fan.off()?;
            self.state = PresenceState::Present;
            self.events.emit(PresenceEvent::ToolReplaced);
        }
        Ok(())
    }

    /// Read the sensor once and dispatch on the level.
    pub fn poll(&mut self) -> Result<PresenceState, HardwareError> {
        let lifted = self.gpio.read_digital(self.pin)?;
        trace!("Tool sensor reads {}.", if lifted { "high" } else { "low" });

        if lifted {
            self.on_tool_removed()?;
        } else {
            self.on_tool_replaced()?;
        }
        Ok(self.state)
    }

    /// Poll every [`POLL_INTERVAL`] until `token` is cancelled.
    ///
    /// Hardware is left as it is on cancellation.
    pub async fn run_loop(&mut self, token: &CancellationToken) -> Result<(), HardwareError> {
        loop {
            self.poll()?;

            tokio::select! {
                _ = token.cancelled() => {
                    info!("Interrupt caught. Returning control.");
                    return Ok(());
                },
                _ = tokio::time::sleep(POLL_INTERVAL) => {}
            }
        }
    }

    pub fn state(&self) -> PresenceState {
        self.state
    }

    pub fn is_tool_absent(&self) -> bool {
        self.state == PresenceState::Absent
    }

    pub fn pin(&self) -> Pin {
        self.pin
    }
}
