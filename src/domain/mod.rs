//! Доменная модель экономики покера: карты, фишки, места, столы, конфиг.

pub mod card;
pub mod chips;
pub mod config;
pub mod deck;
pub mod seat;

// Базовые идентификаторы
pub type PlayerId = u64;
pub type TableId = u64;
pub type TournamentId = u64;
pub type SeatId = u64;

/// Порядковый номер раздачи внутри турнира.
pub type HandIndex = u64;

pub use card::*;
pub use chips::*;
pub use config::*;
pub use deck::*;
pub use seat::*;
