//! Конфигурация ядра: балансировка столов и лимиты ICM.
//!
//! Всё, что приходит "снаружи" (env, JSON от админки), валидируется здесь,
//! прежде чем попасть в алгоритмы.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Окно кулдауна пересадок по умолчанию (в раздачах).
pub const DEFAULT_AVOID_WITHIN: u64 = 10;

/// Переменная окружения, переопределяющая окно кулдауна.
pub const AVOID_WITHIN_ENV: &str = "TOURNAMENT_AVOID_WITHIN";

/// Жёсткий потолок числа игроков для рекурсивного ICM.
pub const MAX_ICM_PLAYERS: usize = 20;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid config: {0}")]
    Invalid(String),

    #[error("Cannot parse config JSON: {0}")]
    Json(String),

    #[error("Cannot parse {var}={value:?} as a number of hands")]
    Env { var: &'static str, value: String },
}

/// Настройки балансировки столов.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct BalancerConfig {
    /// Сколько раздач должно пройти, прежде чем игрока можно пересадить снова.
    pub avoid_within_hands: u64,
    /// Максимально допустимая разница по количеству игроков
    /// между самым полным и самым пустым столом.
    pub max_seat_diff: u8,
    /// Предохранитель от слишком длинного цикла на огромных турнирах.
    pub max_iterations: usize,
}

impl Default for BalancerConfig {
    fn default() -> Self {
        Self {
            avoid_within_hands: DEFAULT_AVOID_WITHIN,
            max_seat_diff: 1,
            max_iterations: 10_000,
        }
    }
}

impl BalancerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_seat_diff == 0 {
            return Err(ConfigError::Invalid(
                "BalancerConfig: max_seat_diff = 0".into(),
            ));
        }
        if self.max_iterations == 0 {
            return Err(ConfigError::Invalid(
                "BalancerConfig: max_iterations = 0".into(),
            ));
        }
        Ok(())
    }

    /// Разобрать и провалидировать конфиг из JSON.
    /// Отсутствующие поля берутся из `Default`.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let cfg: BalancerConfig =
            serde_json::from_str(s).map_err(|e| ConfigError::Json(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Дефолтный конфиг, окно кулдауна можно переопределить через
    /// `TOURNAMENT_AVOID_WITHIN`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut cfg = Self::default();
        if let Ok(raw) = std::env::var(AVOID_WITHIN_ENV) {
            cfg.avoid_within_hands = raw.trim().parse().map_err(|_| ConfigError::Env {
                var: AVOID_WITHIN_ENV,
                value: raw.clone(),
            })?;
        }
        cfg.validate()?;
        Ok(cfg)
    }
}

/// Лимиты для ICM.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct IcmConfig {
    pub max_players: usize,
}

impl Default for IcmConfig {
    fn default() -> Self {
        Self {
            max_players: MAX_ICM_PLAYERS,
        }
    }
}

impl IcmConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_players == 0 || self.max_players > MAX_ICM_PLAYERS {
            return Err(ConfigError::Invalid(format!(
                "IcmConfig: max_players must be in [1, {MAX_ICM_PLAYERS}]"
            )));
        }
        Ok(())
    }
}
