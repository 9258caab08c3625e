use std::sync::Arc;

use crate::internals::core::ports::HardwareError;

use self::adapters::RppalGpio;

pub mod adapters;

pub struct GpioModule {
    /// Shared by the fan controller and the presence monitor.
    pub gpio: Arc<RppalGpio>,
}

impl GpioModule {
    pub fn initialize() -> Result<Self, HardwareError> {
        Ok(Self {
            gpio: Arc::new(RppalGpio::new()?),
        })
    }
}
