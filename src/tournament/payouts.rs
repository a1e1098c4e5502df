//! Призовые: сетка из процентов, пузырь, одновременные вылеты на пузыре.

use std::collections::HashSet;

use log::info;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{PlayerId, TournamentId};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum PayoutError {
    #[error("Payout ladder is empty")]
    EmptyLadder,

    #[error("Payout share at place {place} is invalid: {share}")]
    InvalidShare { place: usize, share: f64 },

    #[error("Payout shares sum to {0}, expected at most 1.0")]
    SharesExceedPool(f64),
}

/// Допуск на накопленную ошибку при сложении долей вида 0.1 + 0.2.
const SHARE_EPSILON: f64 = 1e-9;

/// Разложить призовой фонд по долям мест (0.5 = 50% за первое место).
///
/// Каждая доля округляется вниз, остаток по одной фишке раздаётся
/// начиная с первого места. Сумма результата == prize_pool, если доли
/// в сумме дают 1.0.
pub fn calculate_prizes(prize_pool: u64, shares: &[f64]) -> Result<Vec<u64>, PayoutError> {
    if shares.is_empty() {
        return Err(PayoutError::EmptyLadder);
    }
    for (place, &share) in shares.iter().enumerate() {
        if !share.is_finite() || share < 0.0 {
            return Err(PayoutError::InvalidShare { place, share });
        }
    }
    let share_sum: f64 = shares.iter().sum();
    if share_sum > 1.0 + SHARE_EPSILON {
        return Err(PayoutError::SharesExceedPool(share_sum));
    }

    let mut prizes: Vec<u64> = shares
        .iter()
        .map(|&s| (prize_pool as f64 * s).floor() as u64)
        .collect();

    // Остаток раздаём, только если сетка покрывает весь фонд.
    if (share_sum - 1.0).abs() <= SHARE_EPSILON {
        let assigned: u64 = prizes.iter().sum();
        let remainder = prize_pool.saturating_sub(assigned);
        let n = prizes.len();
        for k in 0..remainder as usize {
            prizes[k % n] += 1;
        }
    }

    Ok(prizes)
}

/// Выплата игроку, вылетевшему на пузыре.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BubblePrize {
    pub player_id: PlayerId,
    pub prize: u64,
}

/// Одновременный вылет нескольких игроков на пузыре.
///
/// Вход: (player_id, стек на начало раздачи) и призы затронутых мест
/// (берутся первые busts.len()). Игроки делят сумму этих призов поровну,
/// лишние фишки получают самые большие стартовые стеки.
pub fn resolve_bubble_elimination(busts: &[(PlayerId, u64)], prizes: &[u64]) -> Vec<BubblePrize> {
    if busts.is_empty() {
        return Vec::new();
    }

    let mut sorted: Vec<(PlayerId, u64)> = busts.to_vec();
    sorted.sort_by(|a, b| b.1.cmp(&a.1));

    let pot: u64 = prizes.iter().take(sorted.len()).sum();
    let n = sorted.len() as u64;
    let base = pot / n;
    let remainder = (pot - base * n) as usize;

    sorted
        .into_iter()
        .enumerate()
        .map(|(i, (player_id, _))| BubblePrize {
            player_id,
            prize: base + u64::from(i < remainder),
        })
        .collect()
}

/// Детектор пузыря: срабатывает один раз на турнир, когда число
/// оставшихся игроков впервые становится равным порогу пузыря.
#[derive(Debug, Default)]
pub struct BubbleTracker {
    announced: HashSet<TournamentId>,
}

impl BubbleTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// `payout_threshold` – число игроков, при котором начинается пузырь.
    pub fn detect_bubble(
        &mut self,
        tournament_id: TournamentId,
        remaining_players: usize,
        payout_threshold: usize,
    ) -> bool {
        if remaining_players != payout_threshold || self.announced.contains(&tournament_id) {
            return false;
        }
        self.announced.insert(tournament_id);
        info!("tournament {tournament_id}: bubble reached with {remaining_players} players left");
        true
    }

    /// Турнир закончился – забываем про него.
    pub fn forget(&mut self, tournament_id: TournamentId) {
        self.announced.remove(&tournament_id);
    }
}
