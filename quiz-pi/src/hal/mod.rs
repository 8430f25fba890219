// Hardware Abstraction Layer (HAL) Module
//
// Kapselt den GPIO-Zugriff hinter quiz_core::OutputDevice.
// Die Wahl zwischen echtem und simuliertem Treiber fällt genau einmal,
// beim Start in `initialize()`.

pub mod gpio;
pub mod simulated;

pub use gpio::GpioDriver;
pub use simulated::SimulatedDriver;

use quiz_core::{DeviceConfig, DeviceError, Indicator, OutputDevice};
use tracing::warn;

/// Treiber-Typ, mit dem die Binary arbeitet
pub type BoxedDevice = Box<dyn OutputDevice>;

/// Wählt den Treiber und schaltet beide LEDs aus
///
/// Ist die GPIO-Schnittstelle nicht verfügbar, wird mit einer Warnung
/// auf den Simulator ausgewichen statt abzubrechen. `GpioDriver::open()`
/// setzt beide Pins schon beim Belegen auf AUS, danach fällt keine
/// Entscheidung mehr und kein Treiber wird zweimal freigegeben.
pub fn initialize(
    config: DeviceConfig,
    force_simulation: bool,
) -> Result<Indicator<BoxedDevice>, DeviceError> {
    Indicator::initialize(select_driver(&config, force_simulation), config)
}

fn select_driver(config: &DeviceConfig, force_simulation: bool) -> BoxedDevice {
    if force_simulation {
        return simulated(config);
    }
    match GpioDriver::open(config) {
        Ok(driver) => Box::new(driver),
        Err(e) => {
            warn!("{}. Running in simulation mode.", e);
            simulated(config)
        }
    }
}

fn simulated(config: &DeviceConfig) -> BoxedDevice {
    Box::new(SimulatedDriver::new(config.pins))
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::{Channel, ChannelState, PinMap};
    use std::time::Duration;

    fn config() -> DeviceConfig {
        DeviceConfig {
            hold: Duration::ZERO,
            ..DeviceConfig::default()
        }
    }

    #[test]
    fn test_forced_simulation() {
        let indicator = initialize(config(), true).unwrap();
        assert_eq!(indicator.device().name(), "simulated");
        assert_eq!(indicator.state(Channel::Green), ChannelState::Off);
        assert_eq!(indicator.state(Channel::Red), ChannelState::Off);
    }

    #[test]
    fn test_unavailable_gpio_falls_back_to_simulation() {
        // Kein Raspberry Pi hat GPIO200/201: open() schlägt überall fehl
        let config = DeviceConfig {
            pins: PinMap {
                green: 200,
                red: 201,
            },
            ..config()
        };
        let indicator = initialize(config, false).unwrap();

        assert_eq!(indicator.device().name(), "simulated");
        assert_eq!(indicator.state(Channel::Green), ChannelState::Off);
        assert_eq!(indicator.state(Channel::Red), ChannelState::Off);
    }
}
