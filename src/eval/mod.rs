//! Модуль оценки силы покерных рук.
//!
//! Основная функция:
//!   `evaluate_hand(cards) -> Result<Score, EvalError>`
//!
//! Карты – коды 0..=51, сила руки – одно сравнимое число `Score`.

pub mod errors;
pub mod evaluator;
pub mod hand_rank;

pub use errors::EvalError;
pub use evaluator::{evaluate5, evaluate_hand, evaluate_hand_value, HandEvaluator, StandardEvaluator};
pub use hand_rank::{describe_hand, HandRank, HandValue, Score};
