use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::{HandIndex, PlayerId, SeatId, TableId};

/// Индекс места за столом (0..max_seats-1).
pub type SeatIndex = u8;

/// Место игрока в турнире.
///
/// Место всегда принадлежит ровно одному столу. Переносит его между
/// столами только балансировщик (`tournament::TableBalancer`).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Seat {
    pub id: SeatId,
    /// Игрок за этим местом. После создания не меняется.
    pub player_id: PlayerId,
    /// Стол, за которым сейчас место.
    pub table_id: TableId,
    /// Позиция за столом. `None` – игрока только что пересадили,
    /// конкретное место ему назначит движок стола.
    pub position: Option<SeatIndex>,
    pub stack: Chips,
    /// Номер раздачи, на которой игрока последний раз пересаживали.
    /// `None` – ещё ни разу не пересаживали.
    pub last_moved_hand: Option<HandIndex>,
}

impl Seat {
    pub fn new(id: SeatId, player_id: PlayerId, table_id: TableId, stack: Chips) -> Self {
        Self {
            id,
            player_id,
            table_id,
            position: None,
            stack,
            last_moved_hand: None,
        }
    }

    pub fn with_position(mut self, position: SeatIndex) -> Self {
        self.position = Some(position);
        self
    }

    /// Можно ли пересадить игрока на раздаче `current_hand`,
    /// если между пересадками должно пройти не меньше `avoid_within` раздач.
    pub fn can_move_at(&self, current_hand: HandIndex, avoid_within: u64) -> bool {
        can_move(self.last_moved_hand, current_hand, avoid_within)
    }
}

/// Общее правило кулдауна пересадок.
pub fn can_move(last_moved: Option<HandIndex>, current_hand: HandIndex, avoid_within: u64) -> bool {
    match last_moved {
        None => true,
        Some(last) => current_hand.saturating_sub(last) >= avoid_within,
    }
}

/// Снимок одного стола турнира: стол + места за ним в порядке рассадки.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableSeats {
    pub table_id: TableId,
    pub seats: Vec<Seat>,
}

impl TableSeats {
    pub fn new(table_id: TableId) -> Self {
        Self {
            table_id,
            seats: Vec::new(),
        }
    }

    pub fn seated_count(&self) -> usize {
        self.seats.len()
    }

    pub fn player_ids(&self) -> Vec<PlayerId> {
        self.seats.iter().map(|s| s.player_id).collect()
    }
}
