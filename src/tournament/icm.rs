//! ICM (Independent Chip Model): стеки + призовая сетка → ожидаемые выплаты.
//!
//! Модель рекурсивного выбывания: игрок i забирает текущий старший приз
//! с вероятностью stack_i / сумма стеков, остальные призы рекурсивно
//! делятся между оставшимися игроками с тем же весом.
//!
//! Целочисленный результат должен совпадать бит в бит с эталонным
//! пересчётом во внешних нагрузочных скриптах, поэтому порядок
//! float-операций здесь повторяет прямую рекурсию один в один.

use std::collections::HashMap;

use thiserror::Error;

use crate::domain::config::MAX_ICM_PLAYERS;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IcmError {
    #[error("ICM needs at least one stack")]
    EmptyStacks,

    #[error("Stack at position {0} must be positive")]
    NonPositiveStack(usize),

    #[error("Too many players for ICM: {players} > {max}")]
    TooManyPlayers { players: usize, max: usize },

    #[error("More prize slots ({prizes}) than players ({players})")]
    MorePrizesThanPlayers { prizes: usize, players: usize },
}

fn validate(stacks: &[u64], prizes: &[u64], max_players: usize) -> Result<(), IcmError> {
    if stacks.is_empty() {
        return Err(IcmError::EmptyStacks);
    }
    if let Some(i) = stacks.iter().position(|&s| s == 0) {
        return Err(IcmError::NonPositiveStack(i));
    }
    let max = max_players.min(MAX_ICM_PLAYERS);
    if stacks.len() > max {
        return Err(IcmError::TooManyPlayers {
            players: stacks.len(),
            max,
        });
    }
    if prizes.len() > stacks.len() {
        return Err(IcmError::MorePrizesThanPlayers {
            prizes: prizes.len(),
            players: stacks.len(),
        });
    }
    Ok(())
}

/// Сырые (нецелые) ожидания ICM для каждой позиции стека.
pub fn icm_raw(stacks: &[u64], prizes: &[u64]) -> Result<Vec<f64>, IcmError> {
    validate(stacks, prizes, MAX_ICM_PLAYERS)?;
    Ok(solve_validated(stacks, prizes))
}

/// Вход уже прошёл `validate`.
fn solve_validated(stacks: &[u64], prizes: &[u64]) -> Vec<f64> {
    let stacks_f: Vec<f64> = stacks.iter().map(|&s| s as f64).collect();
    let prizes_f: Vec<f64> = prizes.iter().map(|&p| p as f64).collect();
    // stacks.len() <= MAX_ICM_PLAYERS, маска влезает в u32.
    let full_mask: u32 = (1u32 << stacks.len()) - 1;

    let mut memo = IcmMemo {
        stacks: &stacks_f,
        prizes: &prizes_f,
        cache: HashMap::new(),
    };
    memo.solve(full_mask)
}

/// Целочисленные выплаты ICM, сумма ровно равна сумме призов.
///
/// Каждое ожидание округляется вниз, недостающие единицы по одной
/// отдаются позициям с наибольшей дробной частью (метод наибольших остатков).
pub fn calculate_icm_payouts(stacks: &[u64], prizes: &[u64]) -> Result<Vec<u64>, IcmError> {
    let raw = icm_raw(stacks, prizes)?;
    Ok(round_largest_remainder(&raw, prizes.iter().sum()))
}

/// То же, с явным лимитом игроков из `IcmConfig`.
pub fn calculate_icm_payouts_bounded(
    stacks: &[u64],
    prizes: &[u64],
    max_players: usize,
) -> Result<Vec<u64>, IcmError> {
    validate(stacks, prizes, max_players)?;
    let raw = solve_validated(stacks, prizes);
    Ok(round_largest_remainder(&raw, prizes.iter().sum()))
}

fn round_largest_remainder(raw: &[f64], total: u64) -> Vec<u64> {
    let mut floored: Vec<u64> = raw.iter().map(|v| v.floor().max(0.0) as u64).collect();
    let floored_sum: u64 = floored.iter().sum();

    debug_assert!(floored_sum <= total, "ICM floors exceed the prize pool");
    let remainder = total.saturating_sub(floored_sum);

    let mut fractions: Vec<(usize, f64)> = raw
        .iter()
        .enumerate()
        .map(|(i, v)| (i, v - v.floor()))
        .collect();
    // Стабильная сортировка: при равных дробных частях раньше идёт меньший индекс.
    fractions.sort_by(|a, b| b.1.total_cmp(&a.1));

    if !fractions.is_empty() {
        for k in 0..remainder as usize {
            let (idx, _) = fractions[k % fractions.len()];
            floored[idx] += 1;
        }
    }

    floored
}

/// Кэш рекурсии по битовой маске оставшихся игроков.
///
/// Результат для маски зависит только от упорядоченного набора оставшихся
/// стеков и глубины (= сколько призов уже разыграно), поэтому кэш
/// не меняет ни одного бита ответа.
struct IcmMemo<'a> {
    stacks: &'a [f64],
    prizes: &'a [f64],
    cache: HashMap<u32, Vec<f64>>,
}

impl IcmMemo<'_> {
    /// Ожидания для игроков из `mask`, в порядке возрастания их индексов.
    fn solve(&mut self, mask: u32) -> Vec<f64> {
        if let Some(hit) = self.cache.get(&mask) {
            return hit.clone();
        }

        let players: Vec<usize> = (0..self.stacks.len())
            .filter(|i| mask & (1 << i) != 0)
            .collect();
        let n = players.len();
        let depth = self.stacks.len() - n;
        let prizes = self.prizes.get(depth..).unwrap_or(&[]);

        let mut res = vec![0.0f64; n];
        if prizes.is_empty() {
            return res;
        }

        let total = players.iter().fold(0.0f64, |acc, &p| acc + self.stacks[p]);
        for (i, &p) in players.iter().enumerate() {
            let prob = self.stacks[p] / total;
            res[i] += prizes[0] * prob;
            if prizes.len() > 1 {
                let sub = self.solve(mask & !(1 << p));
                for (j, v) in sub.iter().enumerate() {
                    let idx = if j >= i { j + 1 } else { j };
                    res[idx] += v * prob;
                }
            }
        }

        self.cache.insert(mask, res.clone());
        res
    }
}
