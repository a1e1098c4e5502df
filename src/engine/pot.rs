use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;

/// Банк, разложенный на main pot и сайд-поты.
///
/// Сайд-поты идут в порядке создания: от самого младшего олл-ина к старшему.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PotBreakdown {
    pub main: Chips,
    pub side_pots: Vec<Chips>,
}

impl PotBreakdown {
    /// Весь банк без сайд-потов.
    pub fn single(total: Chips) -> Self {
        Self {
            main: total,
            side_pots: Vec::new(),
        }
    }

    pub fn side_total(&self) -> Chips {
        self.side_pots.iter().sum()
    }

    /// main + все сайд-поты.
    pub fn total(&self) -> Chips {
        self.main + self.side_total()
    }

    pub fn has_side_pots(&self) -> bool {
        !self.side_pots.is_empty()
    }
}
