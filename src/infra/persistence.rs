use std::collections::HashMap;

use thiserror::Error;

use crate::domain::chips::Chips;
use crate::domain::seat::{Seat, TableSeats};
use crate::domain::{PlayerId, TableId, TournamentId};

/// Ошибки хранилища столов/мест.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StorageError {
    #[error("Tournament {0} not found")]
    TournamentNotFound(TournamentId),

    #[error("Table {table_id} not found in tournament {tournament_id}")]
    TableNotFound {
        tournament_id: TournamentId,
        table_id: TableId,
    },

    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// Абстракция хранилища столов и мест турнира.
///
/// Настоящая реализация живёт снаружи (БД), ядру нужны только две операции.
pub trait SeatRepository {
    /// Все столы турнира вместе с местами (в порядке рассадки).
    fn find(&self, tournament_id: TournamentId) -> Result<Vec<TableSeats>, StorageError>;

    /// Сохранить изменённые места одной пачкой.
    /// Место переезжает за стол `seat.table_id` и встаёт в конец.
    fn save(&mut self, tournament_id: TournamentId, seats: &[Seat]) -> Result<(), StorageError>;
}

/// Простая in-memory реализация для тестов и локального запуска.
#[derive(Debug, Default)]
pub struct InMemorySeatRepository {
    tournaments: HashMap<TournamentId, Vec<TableSeats>>,
    save_calls: usize,
}

impl InMemorySeatRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Добавить пустой стол в турнир (турнир создаётся при первом столе).
    pub fn add_table(&mut self, tournament_id: TournamentId, table_id: TableId) {
        let tables = self.tournaments.entry(tournament_id).or_default();
        if !tables.iter().any(|t| t.table_id == table_id) {
            tables.push(TableSeats::new(table_id));
        }
    }

    /// Посадить место за его стол (`seat.table_id`).
    pub fn seat_player(&mut self, tournament_id: TournamentId, seat: Seat) -> Result<(), StorageError> {
        let table = self.table_mut(tournament_id, seat.table_id)?;
        table.seats.push(seat);
        Ok(())
    }

    /// Убрать игрока из турнира (вылет). Возвращает его место.
    pub fn remove_player(&mut self, tournament_id: TournamentId, player_id: PlayerId) -> Option<Seat> {
        let tables = self.tournaments.get_mut(&tournament_id)?;
        for table in tables.iter_mut() {
            if let Some(pos) = table.seats.iter().position(|s| s.player_id == player_id) {
                return Some(table.seats.remove(pos));
            }
        }
        None
    }

    /// Вылет `count` игроков, сидящих первыми за столом.
    pub fn bust_first(
        &mut self,
        tournament_id: TournamentId,
        table_id: TableId,
        count: usize,
    ) -> Result<Vec<Seat>, StorageError> {
        let table = self.table_mut(tournament_id, table_id)?;
        let n = count.min(table.seats.len());
        Ok(table.seats.drain(..n).collect())
    }

    /// Обновить стек игрока после раздачи. Место за столом не меняется.
    pub fn set_stack(
        &mut self,
        tournament_id: TournamentId,
        player_id: PlayerId,
        stack: Chips,
    ) -> Result<(), StorageError> {
        let tables = self
            .tournaments
            .get_mut(&tournament_id)
            .ok_or(StorageError::TournamentNotFound(tournament_id))?;
        let seat = tables
            .iter_mut()
            .flat_map(|t| t.seats.iter_mut())
            .find(|s| s.player_id == player_id)
            .ok_or_else(|| StorageError::Backend(format!("player {player_id} is not seated")))?;
        seat.stack = stack;
        Ok(())
    }

    /// Закрыть опустевшие столы. Возвращает их id.
    pub fn close_empty_tables(&mut self, tournament_id: TournamentId) -> Vec<TableId> {
        let Some(tables) = self.tournaments.get_mut(&tournament_id) else {
            return Vec::new();
        };
        let closed: Vec<TableId> = tables
            .iter()
            .filter(|t| t.seats.is_empty())
            .map(|t| t.table_id)
            .collect();
        tables.retain(|t| !t.seats.is_empty());
        closed
    }

    /// Количество игроков за каждым столом, в порядке добавления столов.
    pub fn table_counts(&self, tournament_id: TournamentId) -> Vec<(TableId, usize)> {
        self.tournaments
            .get(&tournament_id)
            .map(|tables| tables.iter().map(|t| (t.table_id, t.seats.len())).collect())
            .unwrap_or_default()
    }

    /// Найти место игрока.
    pub fn seat_of(&self, tournament_id: TournamentId, player_id: PlayerId) -> Option<&Seat> {
        self.tournaments
            .get(&tournament_id)?
            .iter()
            .flat_map(|t| t.seats.iter())
            .find(|s| s.player_id == player_id)
    }

    /// Сколько раз вызывали `save` (для проверки пакетной записи).
    pub fn save_calls(&self) -> usize {
        self.save_calls
    }

    fn table_mut(
        &mut self,
        tournament_id: TournamentId,
        table_id: TableId,
    ) -> Result<&mut TableSeats, StorageError> {
        self.tournaments
            .get_mut(&tournament_id)
            .ok_or(StorageError::TournamentNotFound(tournament_id))?
            .iter_mut()
            .find(|t| t.table_id == table_id)
            .ok_or(StorageError::TableNotFound {
                tournament_id,
                table_id,
            })
    }
}

impl SeatRepository for InMemorySeatRepository {
    fn find(&self, tournament_id: TournamentId) -> Result<Vec<TableSeats>, StorageError> {
        self.tournaments
            .get(&tournament_id)
            .cloned()
            .ok_or(StorageError::TournamentNotFound(tournament_id))
    }

    fn save(&mut self, tournament_id: TournamentId, seats: &[Seat]) -> Result<(), StorageError> {
        self.save_calls += 1;

        // Проверяем целевые столы до любых изменений: пачка либо целиком, либо никак.
        for seat in seats {
            self.table_mut(tournament_id, seat.table_id)?;
        }

        for seat in seats {
            if let Some(tables) = self.tournaments.get_mut(&tournament_id) {
                for table in tables.iter_mut() {
                    table.seats.retain(|s| s.id != seat.id);
                }
            }
            self.table_mut(tournament_id, seat.table_id)?
                .seats
                .push(seat.clone());
        }
        Ok(())
    }
}
