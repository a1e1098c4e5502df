//! Детерминированное ядро экономики покерной платформы.
//!
//! Четыре части, все без I/O (кроме хранилища мест у балансировщика):
//!   - `eval` – лучшая 5-карточная рука из любого набора карт;
//!   - `engine` – сайд-поты и раздача банка на шоудауне;
//!   - `tournament::icm` – ICM-выплаты по стекам и призовой сетке;
//!   - `tournament::TableBalancer` – балансировка столов с кулдауном пересадок.
//!
//! Одинаковые входы всегда дают одинаковый результат: на этом строится
//! аудит раздач во внешней системе.

pub mod domain;
pub mod engine;
pub mod eval;
pub mod infra;
pub mod tournament;

pub use engine::{calculate_side_pots, settle_pots, PotBreakdown, SettlementState};
pub use eval::{evaluate_hand, EvalError, HandEvaluator, Score, StandardEvaluator};
pub use tournament::{calculate_icm_payouts, TableBalancer};
