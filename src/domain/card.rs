use thiserror::Error;

/// Карта – просто код 0..=51.
///
/// rank = code / 4 (0 = двойка … 12 = туз), suit = code % 4.
/// Никакой обёртки: в горячем цикле оценщика это обычный `u8`.
pub type Card = u8;

/// Количество карт в стандартной колоде.
pub const DECK_SIZE: u8 = 52;

/// Ранг туза в кодировке карт.
pub const ACE: u8 = 12;

const RANK_CHARS: [char; 13] = [
    '2', '3', '4', '5', '6', '7', '8', '9', 'T', 'J', 'Q', 'K', 'A',
];

// 0:clubs, 1:diamonds, 2:hearts, 3:spades
const SUIT_CHARS: [char; 4] = ['c', 'd', 'h', 's'];

/// Ошибка разбора строкового представления карты.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CardParseError {
    #[error("Card string must have length 2, got {0:?}")]
    BadLength(String),

    #[error("Invalid rank: {0}")]
    InvalidRank(char),

    #[error("Invalid suit: {0}")]
    InvalidSuit(char),
}

/// Собрать код карты из ранга (0..=12) и масти (0..=3).
#[inline]
pub const fn card(rank: u8, suit: u8) -> Card {
    rank * 4 + suit
}

#[inline]
pub const fn card_rank(code: Card) -> u8 {
    code / 4
}

#[inline]
pub const fn card_suit(code: Card) -> u8 {
    code % 4
}

#[inline]
pub const fn is_valid_card(code: Card) -> bool {
    code < DECK_SIZE
}

/// Формат вида `Ah`, `Td`, `7c`. Для невалидного кода – `??`.
pub fn format_card(code: Card) -> String {
    if !is_valid_card(code) {
        return "??".to_string();
    }
    let r = RANK_CHARS[card_rank(code) as usize];
    let s = SUIT_CHARS[card_suit(code) as usize];
    format!("{r}{s}")
}

/// Парсинг строки вида "Ah", "Td", "7c" в код карты.
pub fn parse_card(s: &str) -> Result<Card, CardParseError> {
    let chars: Vec<char> = s.chars().collect();
    if chars.len() != 2 {
        return Err(CardParseError::BadLength(s.to_string()));
    }

    let r_ch = chars[0].to_ascii_uppercase();
    let s_ch = chars[1].to_ascii_lowercase();

    let rank = RANK_CHARS
        .iter()
        .position(|&c| c == r_ch)
        .ok_or(CardParseError::InvalidRank(chars[0]))?;
    let suit = SUIT_CHARS
        .iter()
        .position(|&c| c == s_ch)
        .ok_or(CardParseError::InvalidSuit(chars[1]))?;

    Ok(card(rank as u8, suit as u8))
}

/// Разобрать список карт через пробел: "Ah Kh Qh".
pub fn parse_cards(s: &str) -> Result<Vec<Card>, CardParseError> {
    s.split_whitespace().map(parse_card).collect()
}
