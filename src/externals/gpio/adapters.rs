use std::{
    collections::HashMap,
    sync::{Mutex, MutexGuard},
};

use rppal::{
    gpio::{Gpio, InputPin, OutputPin},
    pwm::{Channel, Pwm},
};

use crate::{
    internals::core::ports::{GpioPort, HardwareError, PinMode, PullMode},
    models::{duty_cycle::DutyCycle, pin::Pin},
};

/// A pin after `set_pin_mode`. Outputs on a PWM-capable pin hold the
/// hardware PWM channel instead of a plain output.
enum ConfiguredPin {
    Input(InputPin),
    // Only held to keep the pin claimed.
    #[allow(dead_code)]
    Output(OutputPin),
    Pwm(Pwm),
}

impl ConfiguredPin {
    /// Leave the pin's mode, bias and PWM output untouched when dropped.
    fn retained(mut self) -> Self {
        match &mut self {
            ConfiguredPin::Input(input) => input.set_reset_on_drop(false),
            ConfiguredPin::Output(output) => output.set_reset_on_drop(false),
            ConfiguredPin::Pwm(pwm) => pwm.set_reset_on_drop(false),
        }
        self
    }
}

/// `GpioPort` over the Raspberry Pi's GPIO and hardware PWM peripherals.
pub struct RppalGpio {
    gpio: Gpio,
    pins: Mutex<HashMap<Pin, ConfiguredPin>>,
}

/// Hardware PWM channel routed to `pin`, if any.
fn pwm_channel(pin: Pin) -> Option<Channel> {
    match pin.number() {
        12 | 18 => Some(Channel::Pwm0),
        13 | 19 => Some(Channel::Pwm1),
        _ => None,
    }
}

fn configuration_error(pin: Pin) -> impl FnOnce(rppal::gpio::Error) -> HardwareError {
    move |e| HardwareError::Configuration {
        pin,
        reason: e.to_string(),
    }
}

impl RppalGpio {
    pub fn new() -> Result<Self, HardwareError> {
        let gpio = Gpio::new().map_err(|e| HardwareError::Unavailable(e.to_string()))?;
        Ok(Self {
            gpio,
            pins: Mutex::new(HashMap::new()),
        })
    }

    fn pins(&self, pin: Pin) -> Result<MutexGuard<'_, HashMap<Pin, ConfiguredPin>>, HardwareError> {
        self.pins.lock().map_err(|_| HardwareError::Io {
            pin,
            reason: "GPIO pin table poisoned".to_owned(),
        })
    }
}

impl GpioPort for RppalGpio {
    fn set_pin_mode(&self, pin: Pin, mode: PinMode) -> Result<(), HardwareError> {
        let mut pins = self.pins(pin)?;
        // Release any previous claim so the pin can be taken again.
        pins.remove(&pin);

        let configured = match (mode, pwm_channel(pin)) {
            (PinMode::Input, _) => ConfiguredPin::Input(
                self.gpio
                    .get(pin.number())
                    .map_err(configuration_error(pin))?
                    .into_input(),
            ),
            (PinMode::Output, Some(channel)) => {
                ConfiguredPin::Pwm(Pwm::new(channel).map_err(|e| HardwareError::Configuration {
                    pin,
                    reason: e.to_string(),
                })?)
            }
            (PinMode::Output, None) => ConfiguredPin::Output(
                self.gpio
                    .get(pin.number())
                    .map_err(configuration_error(pin))?
                    .into_output(),
            ),
        };
        pins.insert(pin, configured.retained());
        Ok(())
    }

    fn set_pull_up_down(&self, pin: Pin, pull: PullMode) -> Result<(), HardwareError> {
        let mut pins = self.pins(pin)?;
        if !matches!(pins.get(&pin), Some(ConfiguredPin::Input(_))) {
            return Err(HardwareError::Configuration {
                pin,
                reason: "pull resistors apply to input pins only".to_owned(),
            });
        }
        pins.remove(&pin);

        let input = self.gpio.get(pin.number()).map_err(configuration_error(pin))?;
        let input = match pull {
            PullMode::Down => input.into_input_pulldown(),
        };
        pins.insert(pin, ConfiguredPin::Input(input).retained());
        Ok(())
    }

    fn read_digital(&self, pin: Pin) -> Result<bool, HardwareError> {
        match self.pins(pin)?.get(&pin) {
            Some(ConfiguredPin::Input(input)) => Ok(input.is_high()),
            _ => Err(HardwareError::Io {
                pin,
                reason: "pin is not configured as an input".to_owned(),
            }),
        }
    }

    fn set_hardware_pwm(
        &self,
        pin: Pin,
        frequency_hz: u32,
        duty: DutyCycle,
    ) -> Result<(), HardwareError> {
        match self.pins(pin)?.get(&pin) {
            Some(ConfiguredPin::Pwm(pwm)) => pwm
                .set_frequency(f64::from(frequency_hz), duty.as_fraction())
                .and_then(|_| pwm.enable())
                .map_err(|e| HardwareError::Io {
                    pin,
                    reason: e.to_string(),
                }),
            Some(ConfiguredPin::Output(_)) => Err(HardwareError::Io {
                pin,
                reason: "pin has no hardware PWM channel".to_owned(),
            }),
            _ => Err(HardwareError::Io {
                pin,
                reason: "pin is not configured as an output".to_owned(),
            }),
        }
    }
}
