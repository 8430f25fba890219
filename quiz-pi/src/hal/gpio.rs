// Raspberry Pi GPIO Treiber
//
// Nutzt rppal (/dev/gpiomem). Ohne GPIO-Chip schlägt `open()` fehl
// und hal::initialize() fällt auf den Simulator zurück.

use quiz_core::{Channel, DeviceConfig, DeviceError, Level, OutputDevice};

// ============================================================================
// Real Hardware Implementation (nur unter Linux)
// ============================================================================

#[cfg(target_os = "linux")]
mod real_impl {
    use super::*;
    use quiz_core::ChannelState;
    use rppal::gpio::{Gpio, OutputPin};
    use tracing::{debug, info};

    pub struct GpioDriver {
        green: Option<OutputPin>,
        red: Option<OutputPin>,
    }

    impl GpioDriver {
        /// Öffnet GPIO und konfiguriert beide Pins als Ausgang (AUS)
        pub fn open(config: &DeviceConfig) -> Result<Self, DeviceError> {
            let gpio = Gpio::new().map_err(|e| DeviceError::Unavailable(e.to_string()))?;
            let off = config.polarity.level_for(ChannelState::Off);

            let claim = |pin: u8| -> Result<OutputPin, DeviceError> {
                let pin = gpio
                    .get(pin)
                    .map_err(|e| DeviceError::Unavailable(format!("GPIO{pin}: {e}")))?;
                let output = match off {
                    Level::High => pin.into_output_high(),
                    Level::Low => pin.into_output_low(),
                };
                Ok(output)
            };

            let green = claim(config.pins.green)?;
            let red = claim(config.pins.red)?;
            info!(
                "GPIO{} and GPIO{} configured as outputs",
                config.pins.green, config.pins.red
            );

            Ok(Self {
                green: Some(green),
                red: Some(red),
            })
        }
    }

    impl OutputDevice for GpioDriver {
        fn write(&mut self, channel: Channel, level: Level) -> Result<(), DeviceError> {
            let pin = match channel {
                Channel::Green => self.green.as_mut(),
                Channel::Red => self.red.as_mut(),
            }
            .ok_or(DeviceError::Released)?;

            debug!("GPIO{} -> {}", pin.pin(), level);
            match level {
                Level::High => pin.set_high(),
                Level::Low => pin.set_low(),
            }
            Ok(())
        }

        /// rppal setzt die Pins beim Drop auf ihren vorherigen Modus zurück
        fn release(&mut self) -> Result<(), DeviceError> {
            self.green.take();
            self.red.take();
            info!("GPIO cleanup complete");
            Ok(())
        }

        fn name(&self) -> &'static str {
            "gpio"
        }
    }
}

#[cfg(target_os = "linux")]
pub use real_impl::GpioDriver;

// ============================================================================
// Andere Plattformen: kein GPIO
// ============================================================================

#[cfg(not(target_os = "linux"))]
pub struct GpioDriver {
    _private: (),
}

#[cfg(not(target_os = "linux"))]
impl GpioDriver {
    pub fn open(_config: &DeviceConfig) -> Result<Self, DeviceError> {
        Err(DeviceError::Unavailable(format!(
            "GPIO is not supported on {}",
            std::env::consts::OS
        )))
    }
}

#[cfg(not(target_os = "linux"))]
impl OutputDevice for GpioDriver {
    fn write(&mut self, _channel: Channel, _level: Level) -> Result<(), DeviceError> {
        Err(DeviceError::Released)
    }

    fn release(&mut self) -> Result<(), DeviceError> {
        Ok(())
    }

    fn name(&self) -> &'static str {
        "gpio"
    }
}
