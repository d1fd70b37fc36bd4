//! Errors raised when parsing cards, checking hands or loading rules.

use thiserror::Error;

use crate::deck::CardId;

#[derive(Debug, Error)]
pub enum RulesError {
    #[error("invalid card id: {0:?}")]
    InvalidCardId(String),
    #[error("hand holds {actual} cards, expected {expected} (or one more mid-turn)")]
    HandSize { expected: usize, actual: usize },
    #[error("card {0} appears more than once")]
    DuplicateCard(CardId),
    #[error("config error: {0}")]
    Config(String),
    #[error("io error: {0}")]
    Io(String),
}

impl From<std::io::Error> for RulesError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value.to_string())
    }
}

impl From<serde_json::Error> for RulesError {
    fn from(value: serde_json::Error) -> Self {
        Self::Config(value.to_string())
    }
}
