use serde::{Deserialize, Serialize};

use crate::domain::card::{Card, DECK_SIZE};

/// Колода карт. В домене – просто упорядоченный список кодов.
/// Перемешивание делает вызывающий код (через RNG из infra), НЕ здесь.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Deck {
    pub cards: Vec<Card>,
}

impl Deck {
    /// Стандартная 52-карточная колода в порядке кодов 0..=51.
    pub fn standard_52() -> Self {
        Deck {
            cards: (0..DECK_SIZE).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Взять n карт сверху (меньше, если колода кончилась).
    pub fn draw_n(&mut self, n: usize) -> Vec<Card> {
        let take = n.min(self.cards.len());
        let at = self.cards.len() - take;
        let mut taken = self.cards.split_off(at);
        taken.reverse();
        taken
    }
}
