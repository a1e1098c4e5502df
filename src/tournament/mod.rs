//! Турнирная экономика: ICM, призовые, балансировка столов.

pub mod balancer;
pub mod icm;
pub mod payouts;
pub mod rebalance;

pub use balancer::{BalancerError, RebalanceOutcome, SeatMove, TableBalancer};
pub use icm::{calculate_icm_payouts, calculate_icm_payouts_bounded, icm_raw, IcmError};
pub use payouts::{calculate_prizes, resolve_bubble_elimination, BubblePrize, BubbleTracker, PayoutError};
pub use rebalance::{balance_tables, is_balanced, BalanceParams, RebalanceMove, RebalancePlan};
