//! Quiz-Schleife
//!
//! Liest zwei Zahlen und eine Antwort von der Konsole, vergleicht mit der
//! Summe und zeigt das Ergebnis über [`Feedback`] an. Generisch über
//! Ein- und Ausgabe, damit sie ohne Terminal testbar ist.

use std::io::{self, BufRead, Write};

use thiserror::Error;
use tracing::{error, info, warn};

use crate::logic::{evaluate, is_affirmative, parse_integer};
use crate::traits::Feedback;
use crate::types::{Outcome, Question, Summary};

#[derive(Debug, Error)]
pub enum QuizError {
    /// Eingabestrom während einer Runde geschlossen
    #[error("input stream closed")]
    InputClosed,
    #[error("console I/O failed: {0}")]
    Io(#[from] io::Error),
}

pub const INVALID_NUMBER_MESSAGE: &str = "❌ Please enter a valid integer.";

pub struct Quiz<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Quiz<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Gibt Ein- und Ausgabe zurück (für Tests)
    pub fn into_parts(self) -> (R, W) {
        (self.input, self.output)
    }

    /// Spielt Runden, bis der Benutzer nicht mehr weitermachen will
    pub fn run<F: Feedback>(&mut self, feedback: &mut F) -> Result<Summary, QuizError> {
        self.banner()?;

        let mut summary = Summary::default();
        loop {
            let outcome = self.round(feedback)?;
            summary.record(outcome);

            writeln!(self.output)?;
            // Ungültiges UTF-8 ist nie "y" und beendet wie jede andere Antwort
            let again = match self.read_line("Try another? (y/n): ")? {
                Some(bytes) => is_affirmative(&String::from_utf8_lossy(&bytes)),
                None => false,
            };
            if !again {
                break;
            }
            writeln!(self.output)?;
        }

        info!("Quiz finished: {}/{} correct", summary.correct, summary.rounds);
        writeln!(
            self.output,
            "👋 Quiz ended. {} of {} correct. Goodbye!",
            summary.correct, summary.rounds
        )?;
        Ok(summary)
    }

    /// Eine Runde: Frage, Antwort, Vergleich, LED
    pub fn round<F: Feedback>(&mut self, feedback: &mut F) -> Result<Outcome, QuizError> {
        let left: i64 = self.read_number("Enter first number: ")?;
        let right: i64 = self.read_number("Enter second number: ")?;
        let question = Question::new(left, right);

        let answer: i128 = self.read_number(&format!("What is {question}? "))?;
        let expected = question.expected();
        let outcome = evaluate(&question, answer);

        match outcome {
            Outcome::Correct => {
                writeln!(self.output, "✅ Correct! {question} = {expected}")?;
                writeln!(self.output, "🟢 Green LED ON")?;
            }
            Outcome::Wrong => {
                writeln!(
                    self.output,
                    "❌ Wrong! {question} = {expected} (you said {answer})"
                )?;
                writeln!(self.output, "🔴 Red LED ON")?;
            }
        }
        self.output.flush()?;

        info!("Round: {} answered {} -> {:?}", question, answer, outcome);
        if let Err(e) = feedback.show(outcome) {
            error!("Failed to show result: {}", e);
        }

        Ok(outcome)
    }

    fn banner(&mut self) -> io::Result<()> {
        let rule = "=".repeat(50);
        writeln!(self.output)?;
        writeln!(self.output, "{rule}")?;
        writeln!(self.output, "🧮 RASPBERRY PI MATH QUIZ")?;
        writeln!(self.output, "{rule}")?;
        writeln!(self.output, "Answer correctly to see the GREEN light!")?;
        writeln!(self.output, "Wrong answers get the RED light.")?;
        writeln!(self.output)
    }

    /// Fragt so lange, bis eine ganze Zahl eingegeben wird
    fn read_number<T>(&mut self, prompt: &str) -> Result<T, QuizError>
    where
        T: core::str::FromStr<Err = core::num::ParseIntError>,
    {
        loop {
            let Some(bytes) = self.read_line(prompt)? else {
                writeln!(self.output)?;
                writeln!(self.output, "⚠️  Input stream closed.")?;
                return Err(QuizError::InputClosed);
            };
            let line = match String::from_utf8(bytes) {
                Ok(line) => line,
                Err(e) => {
                    warn!("invalid input: {}", e);
                    writeln!(self.output, "{INVALID_NUMBER_MESSAGE}")?;
                    continue;
                }
            };
            match parse_integer(&line) {
                Ok(value) => return Ok(value),
                Err(e) => {
                    warn!("{}", e);
                    writeln!(self.output, "{INVALID_NUMBER_MESSAGE}")?;
                }
            }
        }
    }

    /// Rohe Bytes einer Zeile, `None` bei Ende der Eingabe
    ///
    /// Dekodiert wird erst beim Aufrufer, damit ungültiges UTF-8 wie
    /// jede andere ungültige Eingabe behandelt wird.
    fn read_line(&mut self, prompt: &str) -> Result<Option<Vec<u8>>, QuizError> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = Vec::new();
        if self.input.read_until(b'\n', &mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }
}
