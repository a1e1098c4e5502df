//! Showdown / settlement tests.
//!
//! Проверяем:
//! - сплит банка и правило нечётной фишки (всё первому победителю);
//! - сфолдившие не выигрывают, но их фишки разыгрываются;
//! - нераспознанные руки получают Score 0 и не роняют расчёт;
//! - сайд-поты разыгрываются только между своими претендентами;
//! - неуравненный излишек возвращается тому, кто его поставил;
//! - слой без активных претендентов уходит в нижний банк;
//! - после расчёта банк обнулён, фишки не теряются.

use poker_economics::domain::card::{parse_cards, Card};
use poker_economics::domain::chips::Chips;
use poker_economics::engine::{
    build_settlement_pots, settle_pots, SettlementPlayer, SettlementState, SidePot,
};
use poker_economics::eval::{HandRank, Score, StandardEvaluator};

fn cards(s: &str) -> Vec<Card> {
    parse_cards(s).expect("valid card string in test")
}

fn player(id: u64, hole: &str) -> SettlementPlayer {
    SettlementPlayer::new(id, Chips::ZERO).with_hole_cards(cards(hole))
}

fn stack_of(state: &SettlementState, id: u64) -> Chips {
    state
        .players
        .iter()
        .find(|p| p.id == id)
        .map(|p| p.stack)
        .expect("player must be present")
}

//
// ====================== ОДИН БАНК ======================
//

/// Роял на доске: оба игрока играют доску, банк 101 делится,
/// нечётная фишка уходит первому победителю по порядку игроков.
#[test]
fn split_pot_odd_chip_goes_to_first_winner() {
    let mut state = SettlementState {
        players: vec![player(1, "2c 3d"), player(2, "4c 5d")],
        pot: Chips(101),
        side_pots: vec![],
        community_cards: cards("Ah Kh Qh Jh Th"),
    };

    let summary = settle_pots(&mut state, &StandardEvaluator);

    assert_eq!(stack_of(&state, 1), Chips(51));
    assert_eq!(stack_of(&state, 2), Chips(50));
    assert_eq!(summary.total_awarded(), Chips(101));
    assert_eq!(summary.awards.len(), 2);
    assert_eq!(summary.awards[0].score.rank(), HandRank::StraightFlush);
    assert_eq!(state.pot, Chips::ZERO);
}

/// Три победителя, банк 100: 34 / 33 / 33.
#[test]
fn three_way_split_remainder_to_first() {
    let mut state = SettlementState {
        players: vec![player(5, "2c 3d"), player(6, "2d 3c"), player(7, "2h 3s")],
        pot: Chips(100),
        side_pots: vec![],
        community_cards: cards("Ah Kd Qs Jc Th"),
    };

    settle_pots(&mut state, &StandardEvaluator);

    assert_eq!(stack_of(&state, 5), Chips(34));
    assert_eq!(stack_of(&state, 6), Chips(33));
    assert_eq!(stack_of(&state, 7), Chips(33));
}

/// Сфолдивший с лучшей рукой не получает ничего.
#[test]
fn folded_player_cannot_win() {
    let mut state = SettlementState {
        players: vec![player(1, "Ac Ad").folded(), player(2, "7c 8d")],
        pot: Chips(300),
        side_pots: vec![],
        community_cards: cards("2h 5s 9c Jd Kh"),
    };

    let summary = settle_pots(&mut state, &StandardEvaluator);

    assert_eq!(stack_of(&state, 1), Chips::ZERO);
    assert_eq!(stack_of(&state, 2), Chips(300));
    assert_eq!(summary.won_by(2), Chips(300));
    assert_eq!(summary.scores.len(), 1, "Оцениваются только активные игроки");
}

/// Карты не записаны и на доске только флоп: рука не оценивается,
/// Score 0, банк забирает игрок с картами.
#[test]
fn missing_hole_cards_score_zero() {
    let mut state = SettlementState {
        players: vec![
            SettlementPlayer::new(1, Chips(10)),
            player(2, "3s 4s"),
        ],
        pot: Chips(80),
        side_pots: vec![],
        community_cards: cards("2c 7d 9h"),
    };

    let summary = settle_pots(&mut state, &StandardEvaluator);

    assert_eq!(summary.scores[0], (1, Score::ZERO));
    assert!(summary.scores[1].1 > Score::ZERO);
    assert_eq!(stack_of(&state, 1), Chips(10));
    assert_eq!(stack_of(&state, 2), Chips(80));
}

/// Обе руки не оцениваются: оба Score 0, банк делится как ничья.
#[test]
fn unevaluable_hands_split_as_tie() {
    let mut state = SettlementState {
        players: vec![SettlementPlayer::new(1, Chips::ZERO), SettlementPlayer::new(2, Chips::ZERO)],
        pot: Chips(11),
        side_pots: vec![],
        community_cards: vec![],
    };

    settle_pots(&mut state, &StandardEvaluator);

    assert_eq!(stack_of(&state, 1), Chips(6));
    assert_eq!(stack_of(&state, 2), Chips(5));
}

/// Все сфолдили – ничего не делаем, банк остаётся на месте.
#[test]
fn no_active_players_is_noop() {
    let mut state = SettlementState {
        players: vec![player(1, "Ac Ad").folded(), player(2, "Kc Kd").folded()],
        pot: Chips(500),
        side_pots: vec![],
        community_cards: cards("2h 5s 9c Jd 3h"),
    };
    let before = state.clone();

    let summary = settle_pots(&mut state, &StandardEvaluator);

    assert!(summary.awards.is_empty());
    assert_eq!(state, before);
}

//
// ====================== САЙД-ПОТЫ ======================
//

/// Короткий олл-ин с лучшей рукой забирает только main,
/// сайд-пот разыгрывают двое оставшихся.
#[test]
fn short_all_in_wins_only_main_pot() {
    let contributions = [(1, Chips(100)), (2, Chips(300)), (3, Chips(300))];
    let mut state = SettlementState {
        players: vec![player(1, "Ah Ad"), player(2, "Kh Kd"), player(3, "Qh 3d")],
        pot: Chips::ZERO,
        side_pots: build_settlement_pots(&contributions),
        community_cards: cards("2c 7d 9h Js 4c"),
    };
    let on_table = state.chips_on_table();

    let summary = settle_pots(&mut state, &StandardEvaluator);

    assert_eq!(stack_of(&state, 1), Chips(300));
    assert_eq!(stack_of(&state, 2), Chips(400));
    assert_eq!(stack_of(&state, 3), Chips::ZERO);
    assert_eq!(summary.total_awarded(), on_table);
    assert_eq!(state.pot, Chips::ZERO);
    assert!(state.side_pots.is_empty());
}

/// Вклад сфолдившего остаётся в слоях и достаётся активным.
#[test]
fn folded_contribution_is_won_by_active_players() {
    let contributions = [(1, Chips(50)), (2, Chips(200)), (3, Chips(200))];
    let mut state = SettlementState {
        players: vec![player(1, "Ac Ad").folded(), player(2, "Kh Kd"), player(3, "Qh 3d")],
        pot: Chips::ZERO,
        side_pots: build_settlement_pots(&contributions),
        community_cards: cards("2c 7d 9h Js 4c"),
    };

    let summary = settle_pots(&mut state, &StandardEvaluator);

    assert_eq!(stack_of(&state, 2), Chips(450));
    assert!(summary.refunds.is_empty());
}

/// Слой, который внёс только сфолдивший, – неуравненный излишек:
/// он возвращается владельцу, нижний банк забирает активный игрок.
#[test]
fn uncalled_layer_returns_to_its_owner() {
    let mut state = SettlementState {
        players: vec![player(1, "Ac Ad").folded(), player(2, "Kh Kd")],
        pot: Chips::ZERO,
        side_pots: vec![
            SidePot {
                amount: Chips(100),
                players: vec![1, 2],
                contributions: Default::default(),
            },
            SidePot {
                amount: Chips(40),
                players: vec![1],
                contributions: Default::default(),
            },
        ],
        community_cards: cards("2c 7d 9h Js 4c"),
    };

    let summary = settle_pots(&mut state, &StandardEvaluator);

    assert_eq!(stack_of(&state, 1), Chips(40));
    assert_eq!(stack_of(&state, 2), Chips(100));
    assert_eq!(summary.refunds, vec![(1, Chips(40))]);
    assert_eq!(summary.total_awarded() + summary.total_refunded(), Chips(140));
    assert!(state.side_pots.is_empty());
}

/// Сфолдивший поставил 200, двое активных – по 100.
/// Верхние 100 никто не уравнял: они возвращаются игроку 1,
/// ни одна фишка не пропадает.
#[test]
fn folded_overbet_is_refunded_and_chips_are_conserved() {
    let contributions = [(1, Chips(200)), (2, Chips(100)), (3, Chips(100))];
    let mut state = SettlementState {
        players: vec![player(1, "Ac Ad").folded(), player(2, "Kh Kd"), player(3, "Qh 3d")],
        pot: Chips::ZERO,
        side_pots: build_settlement_pots(&contributions),
        community_cards: cards("2c 7d 9h Js 4c"),
    };
    let on_table = state.chips_on_table();
    assert_eq!(on_table, Chips(400));

    let summary = settle_pots(&mut state, &StandardEvaluator);

    let stacks: Chips = state.players.iter().map(|p| p.stack).sum();
    assert_eq!(stacks, on_table);
    assert_eq!(stack_of(&state, 1), Chips(100));
    assert_eq!(stack_of(&state, 2), Chips(300));
    assert_eq!(stack_of(&state, 3), Chips::ZERO);
    assert_eq!(summary.total_refunded(), Chips(100));
}

/// Двое сфолдивших поставили больше всех активных: их общий верхний
/// слой никому не возвращается, а переходит в main к победителю.
#[test]
fn orphan_layer_of_two_folders_merges_into_lower_pot() {
    let contributions = [(1, Chips(300)), (2, Chips(300)), (3, Chips(100)), (4, Chips(100))];
    let mut state = SettlementState {
        players: vec![
            player(1, "Ac Ad").folded(),
            player(2, "Kc Kd").folded(),
            player(3, "Qh Qd"),
            player(4, "8h 3d"),
        ],
        pot: Chips::ZERO,
        side_pots: build_settlement_pots(&contributions),
        community_cards: cards("2c 7d 9h Js 4c"),
    };

    let summary = settle_pots(&mut state, &StandardEvaluator);

    assert_eq!(stack_of(&state, 3), Chips(800));
    assert_eq!(stack_of(&state, 1), Chips::ZERO);
    assert_eq!(stack_of(&state, 2), Chips::ZERO);
    assert!(summary.refunds.is_empty());
    assert_eq!(summary.awards.len(), 1);
    assert_eq!(summary.awards[0].pot_index, 0);
}

/// Нижний слой целиком сфолдивших, верхний – с активным:
/// нижнему некуда спускаться, он поднимается в верхний.
#[test]
fn orphan_bottom_layer_moves_up() {
    let mut state = SettlementState {
        players: vec![player(1, "Ac Ad").folded(), player(2, "Kc Kd").folded(), player(3, "7h 2d")],
        pot: Chips::ZERO,
        side_pots: vec![
            SidePot {
                amount: Chips(60),
                players: vec![1, 2],
                contributions: Default::default(),
            },
            SidePot {
                amount: Chips(30),
                players: vec![3],
                contributions: Default::default(),
            },
        ],
        community_cards: cards("2c 7d 9h Js 4c"),
    };

    let summary = settle_pots(&mut state, &StandardEvaluator);

    assert_eq!(stack_of(&state, 3), Chips(90));
    assert_eq!(summary.total_awarded(), Chips(90));
    assert_eq!(summary.awards[0].pot_index, 1);
}

/// Ненулевой pot рядом с явными слоями разыгрывается между всеми активными.
#[test]
fn flat_pot_next_to_layers_is_not_lost() {
    let mut state = SettlementState {
        players: vec![player(1, "Ah Ad"), player(2, "Kh Kd")],
        pot: Chips(50),
        side_pots: build_settlement_pots(&[(1, Chips(100)), (2, Chips(100))]),
        community_cards: cards("2c 7d 9h Js 4c"),
    };

    let summary = settle_pots(&mut state, &StandardEvaluator);

    assert_eq!(stack_of(&state, 1), Chips(250));
    assert_eq!(summary.awards.len(), 2);
    assert_eq!(summary.awards[1].pot_index, 1);
    assert_eq!(state.pot, Chips::ZERO);
}
