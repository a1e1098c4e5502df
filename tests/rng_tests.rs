//! RNG / deck tests
//!
//! Эти тесты проверяют:
//! - детерминированность DeterministicRng (один seed → одна раздача)
//! - различие seed → различие колод
//! - отсутствие повторяющихся карт при раздаче
//! - отказ раздавать, если карт не хватает
//! - разбор и печать карт

use std::collections::HashSet;

use poker_economics::domain::card::{card, format_card, parse_card, parse_cards, CardParseError};
use poker_economics::domain::deck::Deck;
use poker_economics::engine::RandomSource;
use poker_economics::infra::{deal, shuffled_deck, DeterministicRng, SystemRng};

//
// TEST 1 – DeterministicRng reproducibility
//
#[test]
fn deterministic_rng_same_seed_same_deal() {
    let mut r1 = DeterministicRng::from_seed(123);
    let mut r2 = DeterministicRng::from_seed(123);

    assert_eq!(deal(&mut r1, 6, 2, 5), deal(&mut r2, 6, 2, 5));
}

//
// TEST 2 – different seeds produce different decks
//
#[test]
fn different_seeds_give_different_decks() {
    let d1 = shuffled_deck(&mut DeterministicRng::from_seed(1));
    let d2 = shuffled_deck(&mut DeterministicRng::from_seed(2));
    assert_ne!(d1.cards, d2.cards);
}

//
// TEST 3 – deal never repeats a card
//
#[test]
fn deal_has_no_duplicate_cards() {
    let mut rng = DeterministicRng::from_seed(7);
    let (hands, board) = deal(&mut rng, 9, 2, 5).unwrap();

    assert_eq!(hands.len(), 9);
    assert!(hands.iter().all(|h| h.len() == 2));
    assert_eq!(board.len(), 5);

    let all: HashSet<u8> = hands.iter().flatten().chain(board.iter()).copied().collect();
    assert_eq!(all.len(), 9 * 2 + 5);
}

//
// TEST 4 – not enough cards
//
#[test]
fn deal_refuses_when_deck_is_too_small() {
    let mut rng = DeterministicRng::from_seed(7);
    assert!(deal(&mut rng, 24, 2, 5).is_none());
    assert!(deal(&mut rng, 23, 2, 5).is_some());
}

//
// TEST 5 – SystemRng keeps the deck a permutation
//
#[test]
fn system_rng_shuffle_is_permutation() {
    let mut deck = Deck::standard_52();
    SystemRng.shuffle(&mut deck.cards);

    let mut sorted = deck.cards.clone();
    sorted.sort_unstable();
    assert_eq!(sorted, Deck::standard_52().cards);
}

//
// TEST 6 – card codes
//
#[test]
fn card_codes_parse_and_format() {
    assert_eq!(parse_card("2c"), Ok(0));
    assert_eq!(parse_card("As"), Ok(51));
    assert_eq!(parse_card("th"), Ok(card(8, 2)));
    assert_eq!(format_card(card(12, 2)), "Ah");
    assert_eq!(format_card(52), "??");

    assert_eq!(parse_cards("Ah Kh").unwrap(), vec![card(12, 2), card(11, 2)]);
    assert_eq!(parse_card("1c"), Err(CardParseError::InvalidRank('1')));
    assert_eq!(parse_card("Ax"), Err(CardParseError::InvalidSuit('x')));
    assert!(matches!(parse_card("10h"), Err(CardParseError::BadLength(_))));
}
