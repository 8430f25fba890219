//! Hardware Abstraction Traits
//!
//! Diese Traits definieren Schnittstellen für die LED-Ausgabe
//! ohne konkrete Implementierung.

use thiserror::Error;

use crate::types::{Channel, Level, Outcome};

/// Fehler-Typ für Ausgabe-Operationen
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeviceError {
    /// GPIO-Schnittstelle konnte nicht geöffnet werden
    #[error("output device unavailable: {0}")]
    Unavailable(String),
    #[error("failed to drive {channel} channel: {reason}")]
    WriteFailed { channel: Channel, reason: String },
    /// Gerät wurde bereits freigegeben
    #[error("output device already released")]
    Released,
}

/// Trait für den Hardware-Zugriff auf zwei Ausgabekanäle
///
/// Treiber sehen nur elektrische Pegel. Die Übersetzung von logisch
/// AN/AUS auf HIGH/LOW übernimmt [`crate::Indicator`].
///
/// # Implementierungen
/// - **Production:** `GpioDriver` (Raspberry Pi GPIO via rppal)
/// - **Fallback:** `SimulatedDriver` (loggt nur)
/// - **Testing:** `MockDevice` (in-memory Mock)
pub trait OutputDevice: Send {
    /// Setzt den Pegel eines Kanals
    ///
    /// # Fehlerbehandlung
    /// Gibt `DeviceError::WriteFailed` zurück wenn Hardware-Zugriff fehlschlägt
    fn write(&mut self, channel: Channel, level: Level) -> Result<(), DeviceError>;

    /// Gibt die Hardware-Schnittstelle frei
    fn release(&mut self) -> Result<(), DeviceError>;

    /// Kurzname für Logs
    fn name(&self) -> &'static str;
}

impl<D: OutputDevice + ?Sized> OutputDevice for Box<D> {
    fn write(&mut self, channel: Channel, level: Level) -> Result<(), DeviceError> {
        (**self).write(channel, level)
    }

    fn release(&mut self) -> Result<(), DeviceError> {
        (**self).release()
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

/// Zeigt ein Rundenergebnis an
///
/// Die Quiz-Schleife kennt nur diesen Trait und weiß nicht,
/// welcher Treiber dahinter aktiv ist.
pub trait Feedback {
    fn show(&mut self, outcome: Outcome) -> Result<(), DeviceError>;
}
