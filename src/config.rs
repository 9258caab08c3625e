use clap::Parser;
use thiserror::Error;
use tracing::Level;

use crate::models::{
    percentage::{Percentage, PercentageError},
    pin::{Pin, PinError},
};

pub const DEFAULT_TOOL_PIN: u8 = 8;
pub const DEFAULT_FAN_PIN: u8 = 12;
pub const DEFAULT_FAN_SPEED: u8 = 50;

/// Monitor a tool on its dock and run the fume hood fan while it is lifted.
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Args {
    /// The pin to which the tool is connected
    #[arg(short, long, env = "FUME_HOOD_TOOL_PIN", default_value_t = DEFAULT_TOOL_PIN)]
    pub tool_pin: u8,

    /// The pin to which the fan is connected
    #[arg(short, long, env = "FUME_HOOD_FAN_PIN", default_value_t = DEFAULT_FAN_PIN)]
    pub fan_pin: u8,

    /// The integer percent (0-100) speed the fan should spin at
    #[arg(
        short = 's',
        long,
        env = "FUME_HOOD_FAN_SPEED",
        default_value_t = DEFAULT_FAN_SPEED,
        value_parser = clap::value_parser!(u8).range(0..=100),
    )]
    pub fan_speed: u8,

    /// Maximum level of log lines to print (trace, debug, info, warn, error)
    #[arg(long, env = "FUME_HOOD_LOG_LEVEL", default_value_t = Level::INFO)]
    pub log_level: Level,
}

/// Validated startup configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    pub tool_pin: Pin,
    pub fan_pin: Pin,
    pub fan_speed: Percentage,
    pub log_level: Level,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SettingsError {
    #[error("Invalid pin. {0}")]
    Pin(#[from] PinError),
    #[error("Invalid fan speed. {0}")]
    FanSpeed(#[from] PercentageError),
    #[error("Tool and fan can't share pin {0}")]
    SharedPin(Pin),
}

impl TryFrom<Args> for Settings {
    type Error = SettingsError;

    fn try_from(args: Args) -> Result<Self, Self::Error> {
        let tool_pin = Pin::try_from(args.tool_pin)?;
        let fan_pin = Pin::try_from(args.fan_pin)?;
        if tool_pin == fan_pin {
            return Err(SettingsError::SharedPin(tool_pin));
        }

        Ok(Settings {
            tool_pin,
            fan_pin,
            fan_speed: Percentage::try_from(args.fan_speed)?,
            log_level: args.log_level,
        })
    }
}
