// Library-Root: Konfiguration, Treiber und Sitzungs-Ablauf der Binary

pub mod config;
pub mod hal;

// Re-exports von quiz-core
pub use quiz_core::{
    DeviceConfig, DeviceError, Indicator, OutputDevice, Quiz, QuizError, SharedIndicator,
    Summary,
};

use std::io::{BufRead, Write};
use std::sync::{Arc, Mutex, MutexGuard};

use hal::BoxedDevice;
use tracing::error;

/// Spielt das Quiz und gibt die LEDs danach frei
///
/// `cleanup()` läuft auf jedem Rückweg, auch bei Fehlern. Ein
/// Signal-Handler mit einem Klon von `indicator` kann vorher bereits
/// aufgeräumt haben, dann ist der zweite Aufruf wirkungslos.
pub fn run_session<R: BufRead, W: Write>(
    quiz: &mut Quiz<R, W>,
    indicator: &SharedIndicator<BoxedDevice>,
) -> Result<Summary, QuizError> {
    let mut feedback = indicator.clone();
    let result = quiz.run(&mut feedback);
    if let Err(e) = indicator.cleanup() {
        error!("Cleanup failed: {}", e);
    }
    result
}

// ============================================================================
// Interrupt-Anbindung
// ============================================================================

struct SlotState<D: OutputDevice> {
    indicator: Option<SharedIndicator<D>>,
    interrupted: bool,
}

/// Verbindet den Signal-Handler mit dem `Indicator`
///
/// Der Handler wird installiert, bevor die Pins belegt sind. Kommt ein
/// Interrupt, solange der Slot noch leer ist, räumt `fill()` auf, sobald
/// der `Indicator` existiert.
pub struct CleanupSlot<D: OutputDevice> {
    inner: Arc<Mutex<SlotState<D>>>,
}

impl<D: OutputDevice> Clone for CleanupSlot<D> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<D: OutputDevice> Default for CleanupSlot<D> {
    fn default() -> Self {
        Self {
            inner: Arc::new(Mutex::new(SlotState {
                indicator: None,
                interrupted: false,
            })),
        }
    }
}

impl<D: OutputDevice> CleanupSlot<D> {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, SlotState<D>> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Aufruf aus dem Signal-Handler
    ///
    /// `true`: aufgeräumt, der Prozess darf sofort beendet werden.
    /// `false`: noch kein `Indicator`, das Aufräumen übernimmt `fill()`.
    pub fn interrupt(&self) -> bool {
        let mut state = self.lock();
        match &state.indicator {
            Some(indicator) => {
                if let Err(e) = indicator.cleanup() {
                    error!("Cleanup on interrupt failed: {}", e);
                }
                true
            }
            None => {
                state.interrupted = true;
                false
            }
        }
    }

    /// Übergibt den fertigen `Indicator`
    ///
    /// Gibt `false` zurück, wenn vorher ein Interrupt kam. Dann ist der
    /// `Indicator` bereits freigegeben und die Sitzung darf nicht starten.
    pub fn fill(&self, indicator: SharedIndicator<D>) -> bool {
        let mut state = self.lock();
        if state.interrupted {
            if let Err(e) = indicator.cleanup() {
                error!("Cleanup after early interrupt failed: {}", e);
            }
            return false;
        }
        state.indicator = Some(indicator);
        true
    }
}
