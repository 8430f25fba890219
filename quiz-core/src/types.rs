//! Core Types für das Quiz
//!
//! Datenstrukturen ohne Hardware-Dependencies

use core::fmt;
use std::time::Duration;

/// Logischer Ausgabekanal (eine LED)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Grüne LED - Antwort richtig
    Green,
    /// Rote LED - Antwort falsch
    Red,
}

impl Channel {
    pub const ALL: [Channel; 2] = [Channel::Green, Channel::Red];

    /// Kanal, der ein Ergebnis anzeigt
    pub fn for_outcome(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Correct => Channel::Green,
            Outcome::Wrong => Channel::Red,
        }
    }

    /// Der jeweils andere Kanal
    pub fn other(self) -> Self {
        match self {
            Channel::Green => Channel::Red,
            Channel::Red => Channel::Green,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Channel::Green => "green",
            Channel::Red => "red",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Logischer Zustand, wie ihn die Quiz-Schleife anfordert
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelState {
    On,
    Off,
}

/// Elektrischer Pegel am Pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    High,
    Low,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::High => f.write_str("HIGH"),
            Level::Low => f.write_str("LOW"),
        }
    }
}

/// Verdrahtung der LEDs
///
/// Die Referenz-Schaltung ist active-low: LOW = LED leuchtet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Polarity {
    #[default]
    ActiveLow,
    ActiveHigh,
}

/// Ergebnis einer Runde
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Correct,
    Wrong,
}

/// Eine Additionsaufgabe "left + right"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Question {
    pub left: i64,
    pub right: i64,
}

impl Question {
    pub fn new(left: i64, right: i64) -> Self {
        Self { left, right }
    }

    /// Korrektes Ergebnis
    ///
    /// Breiter als die Operanden, damit die Summe nie überläuft.
    pub fn expected(&self) -> i128 {
        i128::from(self.left) + i128::from(self.right)
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} + {}", self.left, self.right)
    }
}

/// Zuordnung Kanal → GPIO-Nummer (BCM-Nummerierung)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinMap {
    pub green: u8,
    pub red: u8,
}

impl PinMap {
    pub fn pin(&self, channel: Channel) -> u8 {
        match channel {
            Channel::Green => self.green,
            Channel::Red => self.red,
        }
    }
}

impl Default for PinMap {
    /// GPIO 13 (Board-Pin 33) grün, GPIO 19 (Board-Pin 35) rot
    fn default() -> Self {
        Self { green: 13, red: 19 }
    }
}

/// Unveränderliche Konfiguration der Ausgabe
///
/// Wird beim Erzeugen von [`crate::Indicator`] übergeben.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceConfig {
    pub pins: PinMap,
    pub polarity: Polarity,
    /// Wie lange eine LED nach einer Antwort leuchtet
    pub hold: Duration,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            pins: PinMap::default(),
            polarity: Polarity::default(),
            hold: Duration::from_secs(5),
        }
    }
}

/// Statistik einer Quiz-Sitzung (nur im Speicher)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Summary {
    pub rounds: u32,
    pub correct: u32,
}

impl Summary {
    pub fn record(&mut self, outcome: Outcome) {
        self.rounds += 1;
        if outcome == Outcome::Correct {
            self.correct += 1;
        }
    }
}
