use derive_more::Display;

use super::percentage::Percentage;

/// Carrier frequency of the fan's PWM signal.
pub const PWM_FREQUENCY_HZ: u32 = 25_000;

/// Full scale of the PWM driver's duty cycle (100%).
pub const DUTY_FULL_SCALE: u32 = 1_000_000;

/// Raw duty that holds the fan stopped: 99% of full scale.
pub const MAX_DUTY_CYCLE: u32 = 99 * 10_000;

/// A raw PWM duty cycle on the `0..=MAX_DUTY_CYCLE` scale.
///
/// The fan is driven active-low: a lower raw value spins it faster.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[display(fmt = "{}", _0)]
pub struct DutyCycle(u32);

impl DutyCycle {
    pub const MAX: DutyCycle = DutyCycle(MAX_DUTY_CYCLE);

    /// Map a fan speed onto the raw duty the driver expects.
    ///
    /// A stopped fan is pinned to [`DutyCycle::MAX`]; every other speed
    /// scales linearly down from it.
    pub fn for_speed(speed: Percentage) -> Self {
        if speed.is_zero() {
            return Self::MAX;
        }
        let off_fraction = 1f64 - f64::from(speed.value()) / 100f64;
        Self((off_fraction * f64::from(MAX_DUTY_CYCLE)).round() as u32)
    }

    pub fn raw(&self) -> u32 {
        self.0
    }

    /// The duty as a 0.0-1.0 fraction of the driver's full scale.
    pub fn as_fraction(&self) -> f64 {
        f64::from(self.0) / f64::from(DUTY_FULL_SCALE)
    }
}
