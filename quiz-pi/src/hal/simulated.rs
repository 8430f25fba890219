// Simulierter Treiber für Rechner ohne GPIO
//
// Loggt jeden angeforderten Pegelwechsel an derselben Stelle,
// an der GpioDriver den Pin schalten würde.

use quiz_core::{Channel, DeviceError, Level, OutputDevice, PinMap};
use tracing::info;

pub struct SimulatedDriver {
    pins: PinMap,
    /// Zuletzt gesetzte Pegel (grün, rot)
    levels: [Option<Level>; 2],
    released: bool,
}

impl SimulatedDriver {
    pub fn new(pins: PinMap) -> Self {
        info!("[SIM] GPIO{} configured as output (green)", pins.green);
        info!("[SIM] GPIO{} configured as output (red)", pins.red);
        Self {
            pins,
            levels: [None, None],
            released: false,
        }
    }

    pub fn level(&self, channel: Channel) -> Option<Level> {
        self.levels[index(channel)]
    }

    pub fn is_released(&self) -> bool {
        self.released
    }
}

fn index(channel: Channel) -> usize {
    match channel {
        Channel::Green => 0,
        Channel::Red => 1,
    }
}

impl OutputDevice for SimulatedDriver {
    fn write(&mut self, channel: Channel, level: Level) -> Result<(), DeviceError> {
        info!("[SIM] GPIO{} ({}) -> {}", self.pins.pin(channel), channel, level);
        self.levels[index(channel)] = Some(level);
        Ok(())
    }

    fn release(&mut self) -> Result<(), DeviceError> {
        self.released = true;
        info!("[SIM] GPIO cleanup complete");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "simulated"
    }
}
