use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::seat::can_move;
use crate::domain::{HandIndex, PlayerId};

/// Перемещение одного игрока между столами при ребалансировке.
///
/// Индексы столов – позиции во входном списке `tables`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RebalanceMove {
    pub player_id: PlayerId,
    pub from_table: usize,
    pub to_table: usize,
}

/// Параметры одного прохода балансировки.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BalanceParams {
    /// Номер текущей раздачи.
    pub current_hand: HandIndex,
    /// Сколько раздач должно пройти между двумя пересадками одного игрока.
    pub avoid_within: u64,
    /// Допустимая разница между самым полным и самым пустым столом.
    pub max_seat_diff: usize,
    /// Предохранитель от бесконечного цикла.
    pub max_iterations: usize,
}

/// Полный план ребалансировки.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RebalancePlan {
    /// Последовательность шагов в порядке выполнения.
    pub moves: Vec<RebalanceMove>,

    /// Итоговое распределение игроков по столам после выполнения moves,
    /// в том же порядке столов, что и на входе.
    pub final_distribution: Vec<Vec<PlayerId>>,

    /// Баланс не достигнут: на самом полном столе все игроки на кулдауне.
    pub blocked_by_cooldown: bool,
}

/// Проверка, сбалансированы ли столы по количеству игроков.
///
/// Правило:
///   - считаем min и max кол-во игроков среди всех столов;
///   - если (max - min) <= max_seat_diff – считаем расклад допустимым.
pub fn is_balanced(tables: &[Vec<PlayerId>], max_seat_diff: usize) -> bool {
    match (
        tables.iter().map(|t| t.len()).min(),
        tables.iter().map(|t| t.len()).max(),
    ) {
        (Some(min), Some(max)) => max - min <= max_seat_diff,
        _ => true,
    }
}

/// Самый полный и самый пустой стол; при равенстве – первый по порядку.
fn fullest_and_emptiest(tables: &[Vec<PlayerId>]) -> Option<(usize, usize)> {
    let mut max_idx = 0;
    let mut min_idx = 0;
    for (i, t) in tables.iter().enumerate().skip(1) {
        if t.len() > tables[max_idx].len() {
            max_idx = i;
        }
        if t.len() < tables[min_idx].len() {
            min_idx = i;
        }
    }
    (!tables.is_empty()).then_some((max_idx, min_idx))
}

/// Основной алгоритм ребалансировки столов с кулдауном пересадок.
///
/// Вход:
///   - tables: кто за каким столом сидит, в порядке рассадки;
///   - last_moved: player_id -> номер раздачи последней пересадки.
///     Для каждого пересаженного игрока сюда записывается current_hand.
///
/// Алгоритм:
///   1. Берём стол с максимальным кол-вом игроков (донор)
///      и стол с минимальным (реципиент).
///   2. Если разница уже <= max_seat_diff – стоп.
///   3. С конца донора ищем первого игрока, которого можно пересадить
///      (с последней пересадки прошло >= avoid_within раздач).
///      Нет такого – стоп: лучше временный дисбаланс, чем двойная пересадка.
///   4. Переносим его на реципиента и повторяем.
pub fn balance_tables(
    tables: &[Vec<PlayerId>],
    last_moved: &mut HashMap<PlayerId, HandIndex>,
    params: BalanceParams,
) -> RebalancePlan {
    let mut distribution: Vec<Vec<PlayerId>> = tables.to_vec();
    let mut moves: Vec<RebalanceMove> = Vec::new();
    let mut blocked_by_cooldown = false;

    for _ in 0..params.max_iterations {
        let Some((max_idx, min_idx)) = fullest_and_emptiest(&distribution) else {
            break;
        };

        let max_cnt = distribution[max_idx].len();
        let min_cnt = distribution[min_idx].len();
        if max_cnt - min_cnt <= params.max_seat_diff {
            break;
        }

        let candidate = distribution[max_idx].iter().rposition(|pid| {
            can_move(
                last_moved.get(pid).copied(),
                params.current_hand,
                params.avoid_within,
            )
        });

        let Some(pos) = candidate else {
            blocked_by_cooldown = true;
            break;
        };

        let player_id = distribution[max_idx].remove(pos);
        distribution[min_idx].push(player_id);
        last_moved.insert(player_id, params.current_hand);

        moves.push(RebalanceMove {
            player_id,
            from_table: max_idx,
            to_table: min_idx,
        });
    }

    RebalancePlan {
        moves,
        final_distribution: distribution,
        blocked_by_cooldown,
    }
}
