//! LED-Anzeige über zwei Ausgabekanäle
//!
//! `Indicator` besitzt den Treiber und garantiert:
//! - höchstens ein Kanal ist AN
//! - nach `show()` sind beide Kanäle AUS
//! - `release()` des Treibers läuft genau einmal

use std::sync::{Arc, Mutex, MutexGuard};
use std::thread;

use tracing::{debug, error, info, warn};

use crate::traits::{DeviceError, Feedback, OutputDevice};
use crate::types::{Channel, ChannelState, DeviceConfig, Outcome};

pub struct Indicator<D: OutputDevice> {
    device: D,
    config: DeviceConfig,
    green: ChannelState,
    red: ChannelState,
    released: bool,
}

impl<D: OutputDevice> Indicator<D> {
    /// Übernimmt den Treiber und schaltet beide Kanäle AUS
    pub fn initialize(device: D, config: DeviceConfig) -> Result<Self, DeviceError> {
        let mut indicator = Self {
            device,
            config,
            green: ChannelState::Off,
            red: ChannelState::Off,
            released: false,
        };
        for channel in Channel::ALL {
            indicator.drive(channel, ChannelState::Off)?;
        }
        info!(
            "Output ready: {} (green=GPIO{}, red=GPIO{}, {:?})",
            indicator.device.name(),
            config.pins.green,
            config.pins.red,
            config.polarity
        );
        Ok(indicator)
    }

    pub fn config(&self) -> &DeviceConfig {
        &self.config
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    pub fn is_released(&self) -> bool {
        self.released
    }

    /// Aktueller logischer Zustand eines Kanals
    pub fn state(&self, channel: Channel) -> ChannelState {
        match channel {
            Channel::Green => self.green,
            Channel::Red => self.red,
        }
    }

    /// Setzt einen Kanal logisch AN oder AUS
    ///
    /// Beim Einschalten wird der andere Kanal vorher ausgeschaltet.
    pub fn set_channel(&mut self, channel: Channel, state: ChannelState) -> Result<(), DeviceError> {
        if self.released {
            return Err(DeviceError::Released);
        }
        if state == ChannelState::On && self.state(channel.other()) == ChannelState::On {
            self.drive(channel.other(), ChannelState::Off)?;
        }
        self.drive(channel, state)
    }

    /// Schaltet einen Kanal AUS, bei einem Fehler ein zweiter Versuch
    ///
    /// Nach einer Runde darf keine LED an bleiben.
    pub fn switch_off(&mut self, channel: Channel) -> Result<(), DeviceError> {
        match self.set_channel(channel, ChannelState::Off) {
            Err(DeviceError::Released) => Err(DeviceError::Released),
            Err(e) => {
                warn!("Switching {} channel off failed ({}), retrying", channel, e);
                self.set_channel(channel, ChannelState::Off)
            }
            Ok(()) => Ok(()),
        }
    }

    fn drive(&mut self, channel: Channel, state: ChannelState) -> Result<(), DeviceError> {
        let level = self.config.polarity.level_for(state);
        debug!("{} channel {:?} -> {}", channel, state, level);
        self.device.write(channel, level)?;
        match channel {
            Channel::Green => self.green = state,
            Channel::Red => self.red = state,
        }
        Ok(())
    }

    /// Schaltet beide Kanäle AUS und gibt den Treiber frei
    ///
    /// Mehrfache Aufrufe sind erlaubt, der Treiber wird nur einmal freigegeben.
    pub fn cleanup(&mut self) -> Result<(), DeviceError> {
        if self.released {
            return Ok(());
        }
        self.released = true;

        let mut first_error = None;
        for channel in Channel::ALL {
            if let Err(e) = self.drive(channel, ChannelState::Off) {
                error!("Failed to switch {} channel off: {}", channel, e);
                first_error.get_or_insert(e);
            }
        }
        if let Err(e) = self.device.release() {
            first_error.get_or_insert(e);
        }
        info!("Output released: {}", self.device.name());

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl<D: OutputDevice> Feedback for Indicator<D> {
    fn show(&mut self, outcome: Outcome) -> Result<(), DeviceError> {
        let channel = Channel::for_outcome(outcome);
        self.set_channel(channel, ChannelState::On)?;
        thread::sleep(self.config.hold);
        self.switch_off(channel)
    }
}

impl<D: OutputDevice> Drop for Indicator<D> {
    fn drop(&mut self) {
        if let Err(e) = self.cleanup() {
            error!("Cleanup on drop failed: {}", e);
        }
    }
}

/// Gemeinsam genutzter `Indicator`
///
/// Ein Signal-Handler kann `cleanup()` aufrufen, während die Quiz-Schleife
/// auf Eingabe wartet oder eine LED leuchten lässt. Das Lock wird während
/// der Leuchtdauer nicht gehalten.
pub struct SharedIndicator<D: OutputDevice> {
    inner: Arc<Mutex<Indicator<D>>>,
}

impl<D: OutputDevice> Clone for SharedIndicator<D> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<D: OutputDevice> SharedIndicator<D> {
    pub fn new(indicator: Indicator<D>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(indicator)),
        }
    }

    /// Ein Panic in einem anderen Thread darf das Cleanup nicht verhindern
    pub fn lock(&self) -> MutexGuard<'_, Indicator<D>> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn cleanup(&self) -> Result<(), DeviceError> {
        self.lock().cleanup()
    }
}

impl<D: OutputDevice> Feedback for SharedIndicator<D> {
    fn show(&mut self, outcome: Outcome) -> Result<(), DeviceError> {
        let channel = Channel::for_outcome(outcome);
        let hold = {
            let mut indicator = self.lock();
            indicator.set_channel(channel, ChannelState::On)?;
            indicator.config().hold
        };
        thread::sleep(hold);
        self.lock().switch_off(channel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Level, Polarity};
    use std::time::Duration;

    #[derive(Default)]
    struct RecordingDevice {
        writes: Vec<(Channel, Level)>,
        releases: usize,
    }

    impl OutputDevice for RecordingDevice {
        fn write(&mut self, channel: Channel, level: Level) -> Result<(), DeviceError> {
            self.writes.push((channel, level));
            Ok(())
        }

        fn release(&mut self) -> Result<(), DeviceError> {
            self.releases += 1;
            Ok(())
        }

        fn name(&self) -> &'static str {
            "recording"
        }
    }

    fn config() -> DeviceConfig {
        DeviceConfig {
            hold: Duration::ZERO,
            ..DeviceConfig::default()
        }
    }

    #[test]
    fn test_initialize_drives_both_off() {
        let indicator = Indicator::initialize(RecordingDevice::default(), config()).unwrap();
        assert_eq!(
            indicator.device().writes,
            vec![(Channel::Green, Level::High), (Channel::Red, Level::High)]
        );
        assert_eq!(indicator.state(Channel::Green), ChannelState::Off);
        assert_eq!(indicator.state(Channel::Red), ChannelState::Off);
    }

    #[test]
    fn test_turning_one_on_turns_other_off() {
        let mut indicator = Indicator::initialize(RecordingDevice::default(), config()).unwrap();
        indicator.set_channel(Channel::Green, ChannelState::On).unwrap();
        indicator.set_channel(Channel::Red, ChannelState::On).unwrap();

        assert_eq!(indicator.state(Channel::Green), ChannelState::Off);
        assert_eq!(indicator.state(Channel::Red), ChannelState::On);
        assert_eq!(
            indicator.device().writes[2..],
            [
                (Channel::Green, Level::Low),
                (Channel::Green, Level::High),
                (Channel::Red, Level::Low),
            ]
        );
    }

    #[test]
    fn test_show_leaves_both_off() {
        let mut indicator = Indicator::initialize(RecordingDevice::default(), config()).unwrap();
        indicator.show(Outcome::Wrong).unwrap();
        assert_eq!(indicator.state(Channel::Red), ChannelState::Off);
        assert_eq!(
            indicator.device().writes[2..],
            [(Channel::Red, Level::Low), (Channel::Red, Level::High)]
        );
    }

    #[test]
    fn test_active_high_polarity() {
        let config = DeviceConfig {
            polarity: Polarity::ActiveHigh,
            ..config()
        };
        let mut indicator = Indicator::initialize(RecordingDevice::default(), config).unwrap();
        indicator.set_channel(Channel::Green, ChannelState::On).unwrap();
        assert_eq!(
            indicator.device().writes.last(),
            Some(&(Channel::Green, Level::High))
        );
    }

    #[test]
    fn test_cleanup_is_idempotent() {
        let mut indicator = Indicator::initialize(RecordingDevice::default(), config()).unwrap();
        indicator.cleanup().unwrap();
        indicator.cleanup().unwrap();
        assert_eq!(indicator.device().releases, 1);
        assert!(indicator.is_released());
    }

    #[test]
    fn test_set_channel_after_cleanup_is_rejected() {
        let mut indicator = Indicator::initialize(RecordingDevice::default(), config()).unwrap();
        indicator.cleanup().unwrap();
        let writes = indicator.device().writes.len();

        let result = indicator.set_channel(Channel::Green, ChannelState::On);
        assert_eq!(result, Err(DeviceError::Released));
        assert_eq!(indicator.device().writes.len(), writes);
    }

    #[test]
    fn test_shared_show_and_cleanup() {
        let indicator = Indicator::initialize(RecordingDevice::default(), config()).unwrap();
        let mut shared = SharedIndicator::new(indicator);
        let handler = shared.clone();

        shared.show(Outcome::Correct).unwrap();
        handler.cleanup().unwrap();
        shared.cleanup().unwrap();

        let indicator = shared.lock();
        assert_eq!(indicator.device().releases, 1);
        assert_eq!(indicator.state(Channel::Green), ChannelState::Off);
    }
}
