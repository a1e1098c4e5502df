// src/bin/poker_economics_dev_cli.rs

use log::info;

use poker_economics::domain::chips::Chips;
use poker_economics::domain::config::BalancerConfig;
use poker_economics::domain::seat::Seat;
use poker_economics::domain::{HandIndex, PlayerId, TableId, TournamentId};
use poker_economics::engine::{build_settlement_pots, settle_pots, SettlementPlayer, SettlementState};
use poker_economics::eval::{describe_hand, StandardEvaluator};
use poker_economics::infra::{deal, DeterministicRng, InMemorySeatRepository, SeatRepository};
use poker_economics::tournament::{
    calculate_icm_payouts, calculate_prizes, BubbleTracker, TableBalancer,
};

// Параметры симуляции – можно смело крутить.
const TOURNAMENT_ID: TournamentId = 1;
const NUM_TABLES: u64 = 3;
const PLAYERS_PER_TABLE: u64 = 6;
const STARTING_STACK: u64 = 10_000;
const MAX_HANDS: HandIndex = 500;
const SEED: u64 = 42;

const PRIZE_POOL: u64 = 18_000;
const PAYOUT_SHARES: [f64; 3] = [0.5, 0.3, 0.2];

fn main() {
    env_logger::init();

    println!("poker_economics_dev_cli: стартуем симуляцию турнира…");

    let config = match BalancerConfig::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Некорректный конфиг балансировки: {e}");
            std::process::exit(1);
        }
    };
    println!("Окно кулдауна пересадок: {} раздач", config.avoid_within_hands);

    let mut repo = InMemorySeatRepository::new();
    if let Err(e) = seat_everyone(&mut repo) {
        eprintln!("Не удалось рассадить игроков: {e}");
        std::process::exit(1);
    }

    let mut balancer = match TableBalancer::new(repo, config) {
        Ok(b) => b,
        Err(e) => {
            eprintln!("Не удалось создать балансировщик: {e}");
            std::process::exit(1);
        }
    };

    let prizes = match calculate_prizes(PRIZE_POOL, &PAYOUT_SHARES) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Некорректная призовая сетка: {e}");
            std::process::exit(1);
        }
    };
    let bubble_at = prizes.len() + 1;

    let mut rng = DeterministicRng::from_seed(SEED);
    let mut bubbles = BubbleTracker::new();
    let mut busted: Vec<PlayerId> = Vec::new();
    let mut total_moves = 0usize;

    println!();
    println!("================ TOURNAMENT SIMULATION =================");

    for hand in 1..=MAX_HANDS {
        let tables = match balancer.repository().find(TOURNAMENT_ID) {
            Ok(t) => t,
            Err(e) => {
                eprintln!("Ошибка хранилища: {e}");
                std::process::exit(1);
            }
        };

        let remaining: usize = tables.iter().map(|t| t.seated_count()).sum();
        if remaining <= prizes.len() {
            println!("Раздача #{hand}: в деньгах осталось {remaining} игроков, стоп.");
            break;
        }

        for table in &tables {
            if table.seated_count() < 2 {
                continue;
            }
            let out = play_hand(&mut rng, hand, table.table_id, &table.seats);
            for (player_id, stack) in out {
                let repo = balancer.repository_mut();
                if stack.is_zero() {
                    repo.remove_player(TOURNAMENT_ID, player_id);
                    busted.push(player_id);
                    println!("  раздача #{hand}: игрок {player_id} вылетел (стол {})", table.table_id);
                } else if let Err(e) = repo.set_stack(TOURNAMENT_ID, player_id, stack) {
                    eprintln!("Ошибка хранилища: {e}");
                    std::process::exit(1);
                }
            }
        }

        for closed in balancer.repository_mut().close_empty_tables(TOURNAMENT_ID) {
            println!("  раздача #{hand}: стол {closed} закрыт");
        }

        match balancer.rebalance_with_defaults(TOURNAMENT_ID, hand) {
            Ok(outcome) => {
                for mv in &outcome.moves {
                    println!(
                        "  раздача #{hand}: пересадка игрока {} со стола {} за стол {}",
                        mv.player_id, mv.from_table, mv.to_table
                    );
                }
                total_moves += outcome.moves.len();
                if outcome.blocked_by_cooldown {
                    println!("  раздача #{hand}: столы не выровнены, все кандидаты на кулдауне");
                }
                if bubbles.detect_bubble(TOURNAMENT_ID, outcome.remaining_players, bubble_at) {
                    println!("  раздача #{hand}: ПУЗЫРЬ! осталось {} игроков", outcome.remaining_players);
                }
            }
            Err(e) => {
                eprintln!("Ошибка балансировки: {e}");
                std::process::exit(1);
            }
        }
    }

    println!();
    println!("================ FINAL STANDINGS =================");
    println!("Вылетело игроков: {}, пересадок: {total_moves}", busted.len());
    for (table_id, count) in balancer.repository().table_counts(TOURNAMENT_ID) {
        println!("  стол {table_id}: {count} игроков");
    }

    let survivors: Vec<Seat> = match balancer.repository().find(TOURNAMENT_ID) {
        Ok(tables) => tables.into_iter().flat_map(|t| t.seats).collect(),
        Err(e) => {
            eprintln!("Ошибка хранилища: {e}");
            std::process::exit(1);
        }
    };

    let stacks: Vec<u64> = survivors.iter().map(|s| s.stack.0).collect();
    let icm_prizes: Vec<u64> = prizes.iter().copied().take(stacks.len()).collect();

    match calculate_icm_payouts(&stacks, &icm_prizes) {
        Ok(payouts) => {
            println!();
            println!("ICM-сделка по призам {icm_prizes:?}:");
            for (seat, payout) in survivors.iter().zip(&payouts) {
                println!("  игрок {}: стек {} → {payout}", seat.player_id, seat.stack);
            }
        }
        Err(e) => println!("ICM не посчитан: {e}"),
    }
}

fn seat_everyone(repo: &mut InMemorySeatRepository) -> Result<(), poker_economics::infra::StorageError> {
    let mut next_id: u64 = 1;
    for t in 0..NUM_TABLES {
        let table_id: TableId = 100 + t;
        repo.add_table(TOURNAMENT_ID, table_id);
        for pos in 0..PLAYERS_PER_TABLE {
            let seat = Seat::new(next_id, next_id, table_id, Chips::new(STARTING_STACK))
                .with_position(pos as u8);
            repo.seat_player(TOURNAMENT_ID, seat)?;
            next_id += 1;
        }
    }
    Ok(())
}

/// Одна упрощённая раздача: все идут до вскрытия, ставка растёт с номером раздачи.
/// Возвращает новые стеки игроков.
fn play_hand(
    rng: &mut DeterministicRng,
    hand: HandIndex,
    table_id: TableId,
    seats: &[Seat],
) -> Vec<(PlayerId, Chips)> {
    let Some((holes, board)) = deal(rng, seats.len(), 2, 5) else {
        return seats.iter().map(|s| (s.player_id, s.stack)).collect();
    };

    let bet = Chips::new(200 * (1 + hand / 10));
    // Раз в пять раздач "кнопка" сбрасывает карты, чтобы в банке были мёртвые фишки.
    let folder = (hand % 5 == 0).then(|| seats[(hand as usize) % seats.len()].player_id);

    let contributions: Vec<(PlayerId, Chips)> = seats
        .iter()
        .map(|s| (s.player_id, s.stack.min(bet)))
        .collect();

    let players: Vec<SettlementPlayer> = seats
        .iter()
        .zip(&contributions)
        .zip(holes)
        .map(|((seat, (_, put)), cards)| {
            let p = SettlementPlayer::new(seat.player_id, seat.stack - *put).with_hole_cards(cards);
            if Some(seat.player_id) == folder {
                p.folded()
            } else {
                p
            }
        })
        .collect();

    let mut state = SettlementState {
        players,
        pot: Chips::ZERO,
        side_pots: build_settlement_pots(&contributions),
        community_cards: board,
    };

    // Хотя бы один игрок активен, поэтому фишки за столом сохраняются.
    let stacks_before: Chips = state.players.iter().map(|p| p.stack).sum();
    let before = stacks_before + state.chips_on_table();
    let summary = settle_pots(&mut state, &StandardEvaluator);

    for award in &summary.awards {
        info!(
            "table {table_id} hand {hand}: player {} wins {} from pot #{} with {}",
            award.player_id,
            award.amount,
            award.pot_index,
            describe_hand(award.score)
        );
    }
    for (player_id, amount) in &summary.refunds {
        info!("table {table_id} hand {hand}: uncalled {amount} returned to player {player_id}");
    }
    debug_assert_eq!(before, state.players.iter().map(|p| p.stack).sum::<Chips>());

    state.players.into_iter().map(|p| (p.id, p.stack)).collect()
}
