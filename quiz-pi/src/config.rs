// Projekt-Konfiguration: Konstanten, Hardware-Zuordnungen und CLI

use std::time::Duration;

use clap::Parser;
use quiz_core::{DeviceConfig, PinMap, Polarity};

// ============================================================================
// LED Konfiguration
// ============================================================================

/// GPIO-Pin für die grüne LED (BCM 13 = Board-Pin 33)
pub const DEFAULT_GREEN_PIN: u8 = 13;

/// GPIO-Pin für die rote LED (BCM 19 = Board-Pin 35)
pub const DEFAULT_RED_PIN: u8 = 19;

/// Leuchtdauer nach einer Antwort in Sekunden
pub const DEFAULT_HOLD_SECS: u64 = 5;

// ============================================================================
// Exit Codes
// ============================================================================

pub const EXIT_INPUT_CLOSED: u8 = 1;

/// 128 + SIGINT
pub const EXIT_INTERRUPTED: u8 = 130;

// ============================================================================
// Kommandozeile
// ============================================================================

/// Addition quiz with LED feedback on a Raspberry Pi
///
/// Every option can also be set through the environment or a `.env` file.
#[derive(Parser, Debug, Clone)]
#[command(name = "quiz-pi", version, about)]
pub struct Cli {
    /// BCM GPIO number of the green ("correct") LED
    #[arg(long, env = "QUIZ_GREEN_PIN", default_value_t = DEFAULT_GREEN_PIN)]
    pub green_pin: u8,

    /// BCM GPIO number of the red ("wrong") LED
    #[arg(long, env = "QUIZ_RED_PIN", default_value_t = DEFAULT_RED_PIN)]
    pub red_pin: u8,

    /// Seconds an LED stays lit after an answer
    #[arg(long, env = "QUIZ_HOLD_SECS", default_value_t = DEFAULT_HOLD_SECS)]
    pub hold_secs: u64,

    /// LEDs light on HIGH instead of LOW
    #[arg(long, env = "QUIZ_ACTIVE_HIGH")]
    pub active_high: bool,

    /// Skip GPIO detection and always use the simulated driver
    #[arg(long, env = "QUIZ_SIMULATE")]
    pub simulate: bool,
}

impl Cli {
    /// Prüft Werte, die clap allein nicht abdeckt
    pub fn validate(&self) -> Result<(), String> {
        if self.green_pin == self.red_pin {
            return Err(format!(
                "green and red LED must use different pins (both are GPIO{})",
                self.green_pin
            ));
        }
        Ok(())
    }
}

/// Grenze zwischen CLI und Core: quiz-core sieht nie clap-Typen
impl From<&Cli> for DeviceConfig {
    fn from(cli: &Cli) -> Self {
        DeviceConfig {
            pins: PinMap {
                green: cli.green_pin,
                red: cli.red_pin,
            },
            polarity: if cli.active_high {
                Polarity::ActiveHigh
            } else {
                Polarity::ActiveLow
            },
            hold: Duration::from_secs(cli.hold_secs),
        }
    }
}
