//! Pure Business Logic Functions
//!
//! Funktionen ohne Hardware-Dependencies (testbar!)

use core::num::ParseIntError;
use core::str::FromStr;

use thiserror::Error;

use crate::types::{ChannelState, Level, Outcome, Polarity, Question};

/// Eingabe ist keine ganze Zahl
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid input {input:?}: {source}")]
pub struct InvalidInput {
    pub input: String,
    #[source]
    pub source: ParseIntError,
}

/// Parst eine Benutzereingabe als ganze Zahl
///
/// Leerzeichen am Rand werden ignoriert. Text wird nie still in eine
/// Zahl umgewandelt.
///
/// # Beispiele
///
/// ```
/// # use quiz_core::parse_integer;
/// assert_eq!(parse_integer::<i64>(" 42\n"), Ok(42));
/// assert!(parse_integer::<i64>("vier").is_err());
/// ```
pub fn parse_integer<T>(input: &str) -> Result<T, InvalidInput>
where
    T: FromStr<Err = ParseIntError>,
{
    let trimmed = input.trim();
    trimmed.parse::<T>().map_err(|source| InvalidInput {
        input: trimmed.to_owned(),
        source,
    })
}

/// Vergleicht die Antwort exakt mit der Summe
///
/// ```
/// # use quiz_core::{evaluate, Outcome, Question};
/// assert_eq!(evaluate(&Question::new(5, 3), 8), Outcome::Correct);
/// assert_eq!(evaluate(&Question::new(10, 7), 15), Outcome::Wrong);
/// ```
pub fn evaluate(question: &Question, answer: i128) -> Outcome {
    if answer == question.expected() {
        Outcome::Correct
    } else {
        Outcome::Wrong
    }
}

/// `y` oder `yes` (Groß-/Kleinschreibung egal) startet eine neue Runde
pub fn is_affirmative(input: &str) -> bool {
    let answer = input.trim();
    answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes")
}

impl Polarity {
    /// Übersetzt logisch AN/AUS in den elektrischen Pegel
    pub fn level_for(self, state: ChannelState) -> Level {
        match (self, state) {
            (Polarity::ActiveLow, ChannelState::On) => Level::Low,
            (Polarity::ActiveLow, ChannelState::Off) => Level::High,
            (Polarity::ActiveHigh, ChannelState::On) => Level::High,
            (Polarity::ActiveHigh, ChannelState::Off) => Level::Low,
        }
    }
}
