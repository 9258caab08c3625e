use std::sync::Arc;

use tracing::{debug, info};

use crate::models::{
    duty_cycle::{DutyCycle, PWM_FREQUENCY_HZ},
    percentage::Percentage,
    pin::Pin,
};

use super::ports::{GpioPort, HardwareError, PinMode};

/// Drives the fume hood fan over hardware PWM.
pub struct FanController<G: GpioPort> {
    gpio: Arc<G>,
    pin: Pin,
    idle_speed: Percentage,
}

impl<G: GpioPort> FanController<G> {
    /// Configure `pin` as an output and command the fan off.
    pub fn initialize(
        gpio: Arc<G>,
        pin: Pin,
        idle_speed: Percentage,
    ) -> Result<Self, HardwareError> {
        gpio.set_pin_mode(pin, PinMode::Output)?;
        info!("Controlling fan on pin {}", pin);
        info!("Fan speed: {}", idle_speed.value());

        let fan = Self {
            gpio,
            pin,
            idle_speed,
        };
        fan.off()?;
        Ok(fan)
    }

    pub fn set_speed(&self, speed: Percentage) -> Result<(), HardwareError> {
        let duty = DutyCycle::for_speed(speed);
        debug!("Setting fan to {} (raw duty {}).", speed, duty);
        self.gpio.set_hardware_pwm(self.pin, PWM_FREQUENCY_HZ, duty)
    }

    /// Run the fan at the configured idle speed.
    pub fn on(&self) -> Result<(), HardwareError> {
        self.set_speed(self.idle_speed)
    }

    pub fn off(&self) -> Result<(), HardwareError> {
        self.set_speed(Percentage::ZERO)
    }

    pub fn pin(&self) -> Pin {
        self.pin
    }

    pub fn idle_speed(&self) -> Percentage {
        self.idle_speed
    }
}
