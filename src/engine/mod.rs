//! Расчёт банка: сайд-поты и раздача фишек на шоудауне.
//!
//! Основные операции:
//!   - `calculate_side_pots` – разложить банк на main + сайд-поты
//!   - `build_settlement_pots` – явные слои банка с претендентами
//!   - `settle_pots` – раздать банк(и) победителям, обнулив стол

pub mod pot;
pub mod settlement;
pub mod side_pots;

pub use pot::PotBreakdown;
pub use settlement::{settle_pots, PotAward, SettlementPlayer, SettlementState, SettlementSummary};
pub use side_pots::{build_settlement_pots, calculate_side_pots, SidePot};

/// RNG интерфейс для раздачи карт.
/// Реализации – в infra (обёртки над `rand`).
pub trait RandomSource {
    fn shuffle<T>(&mut self, slice: &mut [T]);
}
