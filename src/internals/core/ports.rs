use thiserror::Error;

use crate::models::{duty_cycle::DutyCycle, pin::Pin, presence_event::PresenceEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinMode {
    Input,
    Output,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PullMode {
    Down,
}

/// Failures reported by the GPIO layer. None of them are retried.
#[derive(Error, Debug)]
pub enum HardwareError {
    #[error("GPIO interface unavailable: {0}")]
    Unavailable(String),
    #[error("Pin {pin} rejected its configuration: {reason}")]
    Configuration { pin: Pin, reason: String },
    #[error("Hardware I/O on pin {pin} failed: {reason}")]
    Io { pin: Pin, reason: String },
}

/// The narrow GPIO/PWM surface the fan and the presence monitor drive.
///
/// One instance is shared by both, so every method takes `&self`.
pub trait GpioPort {
    fn set_pin_mode(&self, pin: Pin, mode: PinMode) -> Result<(), HardwareError>;

    /// Only meaningful for input pins.
    fn set_pull_up_down(&self, pin: Pin, pull: PullMode) -> Result<(), HardwareError>;

    fn read_digital(&self, pin: Pin) -> Result<bool, HardwareError>;

    fn set_hardware_pwm(
        &self,
        pin: Pin,
        frequency_hz: u32,
        duty: DutyCycle,
    ) -> Result<(), HardwareError>;
}

pub trait PresenceEventPort {
    fn emit(&self, event: PresenceEvent);
}
