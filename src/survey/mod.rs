// src/survey/mod.rs

pub mod navigation;
pub mod registry;
pub mod validation;

pub use navigation::{Advance, AnswerInput, Position, Retreat, SurveyError, SurveySession};
pub use registry::{SessionEntry, SessionRegistry};
pub use validation::can_proceed;
