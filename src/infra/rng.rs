use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::domain::card::Card;
use crate::domain::deck::Deck;
use crate::engine::RandomSource;

/// RNG на системной энтропии – для живых раздач.
#[derive(Clone, Debug, Default)]
pub struct SystemRng;

impl RandomSource for SystemRng {
    fn shuffle<T>(&mut self, slice: &mut [T]) {
        slice.shuffle(&mut rand::thread_rng());
    }
}

/// Детерминированный RNG для тестов и реплея.
/// Позволяет воспроизводить одни и те же раздачи при одинаковом seed.
#[derive(Clone, Debug)]
pub struct DeterministicRng {
    inner: StdRng,
}

impl DeterministicRng {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for DeterministicRng {
    fn shuffle<T>(&mut self, slice: &mut [T]) {
        slice.shuffle(&mut self.inner);
    }
}

/// Свежая перемешанная колода.
pub fn shuffled_deck<R: RandomSource>(rng: &mut R) -> Deck {
    let mut deck = Deck::standard_52();
    rng.shuffle(&mut deck.cards);
    deck
}

/// Сдать `players` рук по `hole` карт и `board` общих карт.
/// `None`, если карт в колоде не хватает.
pub fn deal<R: RandomSource>(
    rng: &mut R,
    players: usize,
    hole: usize,
    board: usize,
) -> Option<(Vec<Vec<Card>>, Vec<Card>)> {
    if players * hole + board > Deck::standard_52().len() {
        return None;
    }
    let mut deck = shuffled_deck(rng);
    let hands = (0..players).map(|_| deck.draw_n(hole)).collect();
    let community = deck.draw_n(board);
    Some((hands, community))
}
