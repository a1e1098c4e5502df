use crate::domain::card::{card_rank, card_suit, is_valid_card, Card, ACE};

use super::errors::EvalError;
use super::hand_rank::{HandRank, HandValue, Score};

/// Минимальное число карт для оценки руки.
pub const HAND_SIZE: usize = 5;

/// Оценщик силы руки. Через этот трейт движок расчёта банка
/// получает оценку, не завязываясь на конкретную реализацию.
pub trait HandEvaluator {
    fn evaluate(&self, cards: &[Card]) -> Result<Score, EvalError>;
}

/// Стандартный оценщик: полный перебор 5-карточных комбинаций.
#[derive(Clone, Copy, Debug, Default)]
pub struct StandardEvaluator;

impl HandEvaluator for StandardEvaluator {
    fn evaluate(&self, cards: &[Card]) -> Result<Score, EvalError> {
        evaluate_hand(cards)
    }
}

/// Главная функция: лучшая 5-карточная рука из произвольного набора карт.
///
/// Ошибка, если карт меньше 5 или среди них есть невалидный код.
pub fn evaluate_hand(cards: &[Card]) -> Result<Score, EvalError> {
    evaluate_hand_value(cards).map(|v| v.score())
}

/// То же, что `evaluate_hand`, но возвращает разобранную руку.
pub fn evaluate_hand_value(cards: &[Card]) -> Result<HandValue, EvalError> {
    if cards.len() < HAND_SIZE {
        return Err(EvalError::InsufficientCards { got: cards.len() });
    }
    if let Some(&bad) = cards.iter().find(|&&c| !is_valid_card(c)) {
        return Err(EvalError::InvalidCard(bad));
    }

    let mut best: Option<(Score, HandValue)> = None;
    for_each_five(cards, |five| {
        let value = evaluate5(five);
        let score = value.score();
        if best.as_ref().map_or(true, |(s, _)| score > *s) {
            best = Some((score, value));
        }
    });

    best.map(|(_, v)| v)
        .ok_or(EvalError::InsufficientCards { got: cards.len() })
}

/// Перебираем все комбинации 5 карт из N.
fn for_each_five(cards: &[Card], mut f: impl FnMut(&[Card; 5])) {
    let n = cards.len();
    for a in 0..n {
        for b in (a + 1)..n {
            for c in (b + 1)..n {
                for d in (c + 1)..n {
                    for e in (d + 1)..n {
                        f(&[cards[a], cards[b], cards[c], cards[d], cards[e]]);
                    }
                }
            }
        }
    }
}

/// Оценка строго 5-карточной комбинации.
pub fn evaluate5(cards: &[Card; 5]) -> HandValue {
    let mut ranks: Vec<u8> = cards.iter().map(|&c| card_rank(c)).collect();
    ranks.sort_unstable_by(|a, b| b.cmp(a));

    let first_suit = card_suit(cards[0]);
    let is_flush = cards.iter().all(|&c| card_suit(c) == first_suit);

    let straight_high = detect_straight(&ranks);

    // (rank, count), сначала по количеству (desc), затем по рангу (desc).
    let mut counts: Vec<(u8, u8)> = Vec::with_capacity(5);
    for &r in &ranks {
        match counts.iter_mut().find(|(rank, _)| *rank == r) {
            Some((_, c)) => *c += 1,
            None => counts.push((r, 1)),
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| b.0.cmp(&a.0)));

    let top_count = counts[0].1;
    let second_count = counts.get(1).map_or(0, |c| c.1);

    if is_flush {
        if let Some(high) = straight_high {
            return HandValue::new(HandRank::StraightFlush, vec![high]);
        }
    }

    if top_count == 4 {
        let quad = counts[0].0;
        return HandValue::new(HandRank::FourOfAKind, with_kickers(quad, &[], &ranks, 1));
    }

    if top_count == 3 && second_count == 2 {
        return HandValue::new(HandRank::FullHouse, vec![counts[0].0, counts[1].0]);
    }

    if is_flush {
        return HandValue::new(HandRank::Flush, ranks);
    }

    if let Some(high) = straight_high {
        return HandValue::new(HandRank::Straight, vec![high]);
    }

    if top_count == 3 {
        let trip = counts[0].0;
        return HandValue::new(HandRank::ThreeOfAKind, with_kickers(trip, &[], &ranks, 2));
    }

    if top_count == 2 && second_count == 2 {
        // counts уже отсортированы: первая пара старше второй.
        let high_pair = counts[0].0;
        let low_pair = counts[1].0;
        return HandValue::new(
            HandRank::TwoPair,
            with_kickers(high_pair, &[low_pair], &ranks, 1),
        );
    }

    if top_count == 2 {
        let pair = counts[0].0;
        return HandValue::new(HandRank::Pair, with_kickers(pair, &[], &ranks, 3));
    }

    ranks.truncate(5);
    HandValue::new(HandRank::HighCard, ranks)
}

/// Собрать список: определяющие ранги + `n` кикеров из оставшихся рангов
/// (ranks уже отсортированы по убыванию).
fn with_kickers(primary: u8, secondary: &[u8], ranks: &[u8], n: usize) -> Vec<u8> {
    let mut out = Vec::with_capacity(1 + secondary.len() + n);
    out.push(primary);
    out.extend_from_slice(secondary);
    out.extend(
        ranks
            .iter()
            .copied()
            .filter(|r| *r != primary && !secondary.contains(r))
            .take(n),
    );
    out
}

/// Найти стрит среди рангов. Возвращает старший ранг стрита.
///
/// Окно из 5 подряд идущих различных рангов, `max - min == 4`.
/// Особый случай: wheel (A2345) → старшая карта пятёрка (ранг 3).
/// Других "заворотов" через туза нет.
fn detect_straight(ranks_desc: &[u8]) -> Option<u8> {
    let mut unique: Vec<u8> = ranks_desc.to_vec();
    unique.sort_unstable();
    unique.dedup();

    let mut high = None;
    for w in unique.windows(5) {
        if w[4] - w[0] == 4 {
            high = Some(w[4]);
        }
    }
    if high.is_some() {
        return high;
    }

    let wheel = [ACE, 0, 1, 2, 3];
    if wheel.iter().all(|r| unique.contains(r)) {
        return Some(3);
    }
    None
}
