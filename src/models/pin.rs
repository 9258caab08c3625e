use derive_more::Display;
use thiserror::Error;

/// Highest BCM GPIO number exposed by the Broadcom SoCs.
pub const MAX_PIN: u8 = 53;

/// A BCM-numbered GPIO pin.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
#[display(fmt = "{}", _0)]
pub struct Pin(u8);

#[derive(Error, Debug, PartialEq, Eq)]
pub enum PinError {
    #[error("GPIO {0} does not exist (highest is {max})", max = MAX_PIN)]
    OutOfRange(u8),
}

impl Pin {
    pub fn number(&self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Pin {
    type Error = PinError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if value > MAX_PIN {
            return Err(PinError::OutOfRange(value));
        }
        Ok(Self(value))
    }
}
