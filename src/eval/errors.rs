use thiserror::Error;

use crate::domain::card::Card;

/// Ошибки оценки руки.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EvalError {
    #[error("Need at least 5 cards to evaluate a hand, got {got}")]
    InsufficientCards { got: usize },

    #[error("Invalid card code {0}, expected 0..=51")]
    InvalidCard(Card),
}
