use std::fmt::Display;

use thiserror::Error;

/// Represents a whole 0-100% fan speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Percentage {
    value: u8,
}

/// Represents errors in creating a `Percentage`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PercentageError {
    #[error("Percentage {0} is above 100")]
    TooHigh(u8),
}

impl Percentage {
    pub const ZERO: Percentage = Percentage { value: 0 };

    /// Get the underlying percentage value.
    pub fn value(&self) -> u8 {
        self.value
    }

    pub fn is_zero(&self) -> bool {
        self.value == 0
    }
}

impl TryFrom<u8> for Percentage {
    type Error = PercentageError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if value > 100 {
            return Err(PercentageError::TooHigh(value));
        }
        Ok(Self { value })
    }
}

impl Display for Percentage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}%", self.value)
    }
}
