use std::collections::HashMap;

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::config::{BalancerConfig, ConfigError};
use crate::domain::seat::Seat;
use crate::domain::{HandIndex, PlayerId, TableId, TournamentId};
use crate::infra::persistence::{SeatRepository, StorageError};

use super::rebalance::{balance_tables, is_balanced, BalanceParams};

#[derive(Debug, Error)]
pub enum BalancerError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Balancer config error: {0}")]
    Config(#[from] ConfigError),
}

/// Пересадка, которая реально записана в хранилище.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeatMove {
    pub player_id: PlayerId,
    pub from_table: TableId,
    pub to_table: TableId,
}

/// Результат одного вызова `rebalance_if_needed`.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RebalanceOutcome {
    pub moves: Vec<SeatMove>,
    /// Баланс не достигнут из-за кулдауна пересадок (это не ошибка).
    pub blocked_by_cooldown: bool,
    /// Сколько игроков осталось в турнире (для детектора пузыря).
    pub remaining_players: usize,
}

impl RebalanceOutcome {
    pub fn rebalanced(&self) -> bool {
        !self.moves.is_empty()
    }
}

/// Балансировщик столов турнира поверх хранилища мест.
///
/// Одновременно для одного турнира должен идти максимум один ребаланс –
/// это обеспечивает вызывающий код. `&mut self` гарантирует это
/// только в пределах одного экземпляра.
pub struct TableBalancer<R: SeatRepository> {
    repo: R,
    config: BalancerConfig,
}

impl<R: SeatRepository> TableBalancer<R> {
    pub fn new(repo: R, config: BalancerConfig) -> Result<Self, BalancerError> {
        config.validate()?;
        Ok(Self { repo, config })
    }

    pub fn config(&self) -> &BalancerConfig {
        &self.config
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    pub fn repository_mut(&mut self) -> &mut R {
        &mut self.repo
    }

    pub fn into_repository(self) -> R {
        self.repo
    }

    /// Ребаланс с окном кулдауна из конфига.
    pub fn rebalance_with_defaults(
        &mut self,
        tournament_id: TournamentId,
        current_hand: HandIndex,
    ) -> Result<RebalanceOutcome, BalancerError> {
        let avoid_within = self.config.avoid_within_hands;
        self.rebalance_if_needed(tournament_id, current_hand, avoid_within)
    }

    /// Выровнять столы турнира, если разница по игрокам больше допустимой.
    ///
    /// Историю пересадок берём из `Seat::last_moved_hand`, в хранилище
    /// пишем одной пачкой только те места, у которых сменился стол.
    pub fn rebalance_if_needed(
        &mut self,
        tournament_id: TournamentId,
        current_hand: HandIndex,
        avoid_within: u64,
    ) -> Result<RebalanceOutcome, BalancerError> {
        let mut tables = self.repo.find(tournament_id)?;
        // Для детерминизма – всегда в порядке table_id.
        tables.sort_by_key(|t| t.table_id);

        let table_players: Vec<Vec<PlayerId>> = tables.iter().map(|t| t.player_ids()).collect();
        let remaining_players = table_players.iter().map(Vec::len).sum();
        let max_seat_diff = self.config.max_seat_diff as usize;

        let mut outcome = RebalanceOutcome {
            remaining_players,
            ..RebalanceOutcome::default()
        };

        if is_balanced(&table_players, max_seat_diff) {
            return Ok(outcome);
        }

        let mut seats_by_player: HashMap<PlayerId, Seat> = tables
            .iter()
            .flat_map(|t| t.seats.iter())
            .map(|s| (s.player_id, s.clone()))
            .collect();

        let mut last_moved: HashMap<PlayerId, HandIndex> = seats_by_player
            .values()
            .filter_map(|s| s.last_moved_hand.map(|h| (s.player_id, h)))
            .collect();

        let plan = balance_tables(
            &table_players,
            &mut last_moved,
            BalanceParams {
                current_hand,
                avoid_within,
                max_seat_diff,
                max_iterations: self.config.max_iterations,
            },
        );

        let mut moved: Vec<Seat> = Vec::new();
        for (table, players) in tables.iter().zip(&plan.final_distribution) {
            for pid in players {
                let Some(seat) = seats_by_player.get_mut(pid) else {
                    continue;
                };
                if seat.table_id == table.table_id {
                    continue;
                }

                debug!(
                    "tournament {tournament_id}: moving player {pid} from table {} to table {} at hand {current_hand}",
                    seat.table_id, table.table_id
                );
                outcome.moves.push(SeatMove {
                    player_id: *pid,
                    from_table: seat.table_id,
                    to_table: table.table_id,
                });

                seat.table_id = table.table_id;
                seat.position = None;
                seat.last_moved_hand = Some(current_hand);
                moved.push(seat.clone());
            }
        }

        if !moved.is_empty() {
            self.repo.save(tournament_id, &moved)?;
        }

        if plan.blocked_by_cooldown {
            warn!(
                "tournament {tournament_id}: tables left unbalanced at hand {current_hand}, \
                 every candidate on the fullest table moved within {avoid_within} hands"
            );
            outcome.blocked_by_cooldown = true;
        }

        Ok(outcome)
    }
}
