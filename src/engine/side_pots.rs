use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::{chips::Chips, PlayerId};

use super::pot::PotBreakdown;

/// Сайд-пот: часть банка, в которую участвуют только некоторые игроки.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SidePot {
    pub amount: Chips,
    /// Кто претендует на этот слой (внёс не меньше его уровня).
    pub players: Vec<PlayerId>,
    /// Кто сколько внёс именно в этот слой.
    pub contributions: BTreeMap<PlayerId, Chips>,
}

/// Разложить банк на main pot и сайд-поты по вкладам игроков.
///
/// Вход: committed[i] = сколько суммарно фишек поставил игрок i,
/// total_pot = фактический банк (рейк/лишние фишки уже учтены снаружи).
///
/// Слой, на который претендует только один игрок, слоем не считается:
/// его фишки остаются в main (main = total - сумма сайд-потов).
pub fn calculate_side_pots(committed: &[Chips], total_pot: Chips) -> PotBreakdown {
    let mut commitments: Vec<Chips> = committed
        .iter()
        .copied()
        .filter(|c| !c.is_zero())
        .collect();
    commitments.sort_unstable();

    let mut layers: Vec<Chips> = Vec::new();
    let mut prev = Chips::ZERO;
    let mut remaining = commitments.len();

    for &amount in &commitments {
        let diff = amount.saturating_sub(prev);
        if !diff.is_zero() && remaining > 1 {
            layers.push(diff.times(remaining));
            prev = amount;
        }
        remaining -= 1;
    }

    // Первый слой – это main, всё остальное – сайд-поты.
    let side_pots: Vec<Chips> = layers.into_iter().skip(1).collect();
    let side_total: Chips = side_pots.iter().sum();

    debug_assert!(
        side_total <= total_pot,
        "side pots exceed the total pot: {side_total} > {total_pot}"
    );

    PotBreakdown {
        main: total_pot - side_total,
        side_pots,
    }
}

/// Построить явные слои банка для расчёта шоудауна.
///
/// Вход: (player_id, сколько всего внёс за раздачу), включая сфолдивших –
/// их фишки лежат в слоях, но претендовать на них они не будут.
/// Выход: слои в порядке "от младших" к "старшим", сумма слоёв == сумме вкладов.
pub fn build_settlement_pots(contributions: &[(PlayerId, Chips)]) -> Vec<SidePot> {
    let mut entries: Vec<(PlayerId, Chips)> = contributions
        .iter()
        .copied()
        .filter(|(_, c)| !c.is_zero())
        .collect();

    if entries.is_empty() {
        return Vec::new();
    }

    // Стабильная сортировка по размеру вклада: порядок игроков с равным
    // вкладом остаётся входным.
    entries.sort_by_key(|(_, c)| *c);

    let mut pots = Vec::new();
    let mut prev_level = Chips::ZERO;

    for &(_, level) in &entries {
        if level == prev_level {
            continue;
        }
        let level_diff = level - prev_level;

        // Все игроки, у кого вклад >= level, участвуют в этом уровне.
        // Порядок – входной, он же порядок выплаты остатка.
        let players: Vec<PlayerId> = contributions
            .iter()
            .filter(|(_, c)| *c >= level)
            .map(|(pid, _)| *pid)
            .collect();

        // Следующий уровень – минимальный вклад выше prev_level, поэтому
        // каждый участник слоя вносит в него ровно level_diff.
        let layer_contrib: BTreeMap<PlayerId, Chips> =
            players.iter().map(|pid| (*pid, level_diff)).collect();
        let amount = level_diff.times(players.len());

        pots.push(SidePot {
            amount,
            players,
            contributions: layer_contrib,
        });

        prev_level = level;
    }

    pots
}
