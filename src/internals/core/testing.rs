//! Recording fakes for the core ports.

use std::{
    collections::VecDeque,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, Mutex,
    },
};

use tokio_util::sync::CancellationToken;

use crate::models::{
    duty_cycle::DutyCycle, percentage::Percentage, pin::Pin, presence_event::PresenceEvent,
};

use super::ports::{GpioPort, HardwareError, PinMode, PresenceEventPort, PullMode};

pub fn pin(number: u8) -> Pin {
    Pin::try_from(number).expect("Failed to get pin.")
}

pub fn speed(value: u8) -> Percentage {
    Percentage::try_from(value).expect("Failed to get percentage.")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GpioCall {
    SetPinMode(Pin, PinMode),
    SetPullUpDown(Pin, PullMode),
    ReadDigital(Pin),
    SetHardwarePwm {
        pin: Pin,
        frequency_hz: u32,
        duty: u32,
    },
    /// Written by a [`RecordingEvents`] sharing this fake's log.
    Notified(PresenceEvent),
}

/// A `GpioPort` that replays scripted input readings and records every call.
///
/// Once the script runs out the last reading repeats (low if none was
/// scripted) and the optional token is cancelled.
#[derive(Default)]
pub struct FakeGpio {
    calls: Mutex<Vec<GpioCall>>,
    readings: Mutex<VecDeque<bool>>,
    last_reading: Mutex<bool>,
    exhausted_token: Option<CancellationToken>,
    reject_pin_mode: bool,
    fail_reads: bool,
    fail_pwm: AtomicBool,
}

impl FakeGpio {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_readings(readings: &[bool]) -> Self {
        Self {
            readings: Mutex::new(readings.iter().copied().collect()),
            ..Self::default()
        }
    }

    pub fn cancel_when_exhausted(mut self, token: CancellationToken) -> Self {
        self.exhausted_token = Some(token);
        self
    }

    pub fn reject_pin_mode(mut self) -> Self {
        self.reject_pin_mode = true;
        self
    }

    pub fn fail_reads(mut self) -> Self {
        self.fail_reads = true;
        self
    }

    pub fn fail_pwm(self) -> Self {
        self.set_pwm_failing(true);
        self
    }

    pub fn set_pwm_failing(&self, failing: bool) {
        self.fail_pwm.store(failing, Ordering::SeqCst);
    }

    pub fn calls(&self) -> Vec<GpioCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    /// `(frequency_hz, raw duty)` of every PWM command, in order.
    pub fn pwm_commands(&self) -> Vec<(u32, u32)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                GpioCall::SetHardwarePwm {
                    frequency_hz, duty, ..
                } => Some((frequency_hz, duty)),
                _ => None,
            })
            .collect()
    }

    pub fn pwm_duties(&self) -> Vec<u32> {
        self.pwm_commands()
            .into_iter()
            .map(|(_, duty)| duty)
            .collect()
    }

    fn record(&self, call: GpioCall) {
        self.calls.lock().unwrap().push(call);
    }
}

impl GpioPort for FakeGpio {
    fn set_pin_mode(&self, pin: Pin, mode: PinMode) -> Result<(), HardwareError> {
        if self.reject_pin_mode {
            return Err(HardwareError::Configuration {
                pin,
                reason: "rejected by fake".to_owned(),
            });
        }
        self.record(GpioCall::SetPinMode(pin, mode));
        Ok(())
    }

    fn set_pull_up_down(&self, pin: Pin, pull: PullMode) -> Result<(), HardwareError> {
        self.record(GpioCall::SetPullUpDown(pin, pull));
        Ok(())
    }

    fn read_digital(&self, pin: Pin) -> Result<bool, HardwareError> {
        if self.fail_reads {
            return Err(HardwareError::Io {
                pin,
                reason: "read failed in fake".to_owned(),
            });
        }
        self.record(GpioCall::ReadDigital(pin));

        let mut last_reading = self.last_reading.lock().unwrap();
        match self.readings.lock().unwrap().pop_front() {
            Some(reading) => *last_reading = reading,
            None => {
                if let Some(token) = &self.exhausted_token {
                    token.cancel();
                }
            }
        }
        Ok(*last_reading)
    }

    fn set_hardware_pwm(
        &self,
        pin: Pin,
        frequency_hz: u32,
        duty: DutyCycle,
    ) -> Result<(), HardwareError> {
        if self.fail_pwm.load(Ordering::SeqCst) {
            return Err(HardwareError::Io {
                pin,
                reason: "pwm failed in fake".to_owned(),
            });
        }
        self.record(GpioCall::SetHardwarePwm {
            pin,
            frequency_hz,
            duty: duty.raw(),
        });
        Ok(())
    }
}

/// Collects emitted presence events; clones share the same log.
#[derive(Clone, Default)]
pub struct RecordingEvents {
    events: Arc<Mutex<Vec<PresenceEvent>>>,
    gpio: Option<Arc<FakeGpio>>,
}

impl RecordingEvents {
    /// Also append each event to `gpio`'s call log, so the order of
    /// notifications and actuations can be checked.
    pub fn sharing_log_with(gpio: &Arc<FakeGpio>) -> Self {
        Self {
            gpio: Some(Arc::clone(gpio)),
            ..Self::default()
        }
    }

    pub fn events(&self) -> Vec<PresenceEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl PresenceEventPort for RecordingEvents {
    fn emit(&self, event: PresenceEvent) {
        self.events.lock().unwrap().push(event);
        if let Some(gpio) = &self.gpio {
            gpio.record(GpioCall::Notified(event));
        }
    }
}
