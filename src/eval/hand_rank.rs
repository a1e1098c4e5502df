use serde::{Deserialize, Serialize};

/// Категория покерной руки по силе.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HandRank {
    HighCard = 0,
    Pair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
}

impl HandRank {
    pub fn from_digit(d: u32) -> Option<Self> {
        Some(match d {
            0 => HandRank::HighCard,
            1 => HandRank::Pair,
            2 => HandRank::TwoPair,
            3 => HandRank::ThreeOfAKind,
            4 => HandRank::Straight,
            5 => HandRank::Flush,
            6 => HandRank::FullHouse,
            7 => HandRank::FourOfAKind,
            8 => HandRank::StraightFlush,
            _ => return None,
        })
    }

    /// Сколько рангов-кикеров несёт рука этой категории.
    pub fn kicker_count(self) -> usize {
        match self {
            HandRank::StraightFlush | HandRank::Straight => 1,
            HandRank::FourOfAKind | HandRank::FullHouse => 2,
            HandRank::TwoPair | HandRank::ThreeOfAKind => 3,
            HandRank::Pair => 4,
            HandRank::Flush | HandRank::HighCard => 5,
        }
    }
}

/// Основание смешанной системы счисления для Score:
/// на единицу больше старшего ранга, который может встретиться в разряде.
pub const SCORE_BASE: u32 = 15;

/// Сколько разрядов-кикеров всегда занимает Score.
///
/// Короткие списки кикеров добиваются нулями справа, иначе у категорий
/// с разным числом кикеров разряд категории имел бы разный вес.
pub const SCORE_KICKER_DIGITS: usize = 5;

/// Рука, разобранная на категорию и ранги (от старшего к младшему).
///
/// Первый элемент `kickers` – определяющий ранг (каре, сет, старшая пара,
/// старшая карта стрита); дальше – настоящие кикеры.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct HandValue {
    pub rank: HandRank,
    pub kickers: Vec<u8>,
}

impl HandValue {
    pub fn new(rank: HandRank, kickers: Vec<u8>) -> Self {
        Self { rank, kickers }
    }

    pub fn score(&self) -> Score {
        Score::from_value(self)
    }
}

impl PartialOrd for HandValue {
    fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HandValue {
    fn cmp(&self, other: &Self) -> core::cmp::Ordering {
        self.score().cmp(&other.score())
    }
}

/// Сила руки одним сравнимым числом.
///
/// Схема кодирования (основание 15):
///   [категория][k0][k1][k2][k3][k4]
/// Сравнение Score как чисел в точности повторяет сравнение рук.
#[derive(
    Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
pub struct Score(pub u32);

impl Score {
    /// Score "ничего": меньше любой реальной руки, кроме худшего хай-карда.
    pub const ZERO: Score = Score(0);

    pub fn from_value(value: &HandValue) -> Self {
        let mut s = value.rank as u32;
        for i in 0..SCORE_KICKER_DIGITS {
            let k = value.kickers.get(i).copied().unwrap_or(0) as u32;
            s = s * SCORE_BASE + k;
        }
        Score(s)
    }

    /// Вытащить категорию из Score.
    pub fn rank(&self) -> HandRank {
        let digit = self.0 / SCORE_BASE.pow(SCORE_KICKER_DIGITS as u32);
        HandRank::from_digit(digit).unwrap_or(HandRank::HighCard)
    }

    /// Достать все 5 разрядов-кикеров (включая добивку нулями).
    pub fn kicker_digits(&self) -> [u8; SCORE_KICKER_DIGITS] {
        let mut out = [0u8; SCORE_KICKER_DIGITS];
        let mut v = self.0;
        for slot in out.iter_mut().rev() {
            *slot = (v % SCORE_BASE) as u8;
            v /= SCORE_BASE;
        }
        out
    }

    /// Обратно в HandValue (кикеры обрезаются по категории).
    pub fn to_value(&self) -> HandValue {
        let rank = self.rank();
        let kickers = self.kicker_digits()[..rank.kicker_count()].to_vec();
        HandValue { rank, kickers }
    }
}

/// Человеческое описание руки по категории.
pub fn describe_hand(score: Score) -> String {
    match score.rank() {
        HandRank::HighCard => "High card".to_string(),
        HandRank::Pair => "One pair".to_string(),
        HandRank::TwoPair => "Two pair".to_string(),
        HandRank::ThreeOfAKind => "Three of a kind".to_string(),
        HandRank::Straight => "Straight".to_string(),
        HandRank::Flush => "Flush".to_string(),
        HandRank::FullHouse => "Full house".to_string(),
        HandRank::FourOfAKind => "Four of a kind".to_string(),
        HandRank::StraightFlush => "Straight flush".to_string(),
    }
}
