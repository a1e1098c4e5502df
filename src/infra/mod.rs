//! Инфраструктурный слой вокруг ядра:
//! - абстракция хранения столов/мест (и in-memory реализация для тестов);
//! - RNG-реализации для раздачи карт.

pub mod persistence;
pub mod rng;

pub use persistence::{InMemorySeatRepository, SeatRepository, StorageError};
pub use rng::{deal, shuffled_deck, DeterministicRng, SystemRng};
