//! Quiz Core - Platform-agnostic Logic and Traits
//!
//! Diese Crate enthält KEINE Hardware-Dependencies.
//! Sie definiert Typen, Traits, Pure Functions und die Quiz-Schleife.

pub mod indicator;
pub mod logic;
pub mod quiz;
pub mod traits;
pub mod types;

// Re-exports für einfachen Zugriff
pub use indicator::{Indicator, SharedIndicator};
pub use logic::{InvalidInput, evaluate, is_affirmative, parse_integer};
pub use quiz::{INVALID_NUMBER_MESSAGE, Quiz, QuizError};
pub use traits::{DeviceError, Feedback, OutputDevice};
pub use types::{
    Channel, ChannelState, DeviceConfig, Level, Outcome, PinMap, Polarity, Question, Summary,
};
