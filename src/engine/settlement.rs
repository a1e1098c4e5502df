use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::PlayerId;
use crate::eval::{HandEvaluator, Score};

use super::side_pots::SidePot;

/// Игрок на момент шоудауна.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SettlementPlayer {
    pub id: PlayerId,
    pub stack: Chips,
    pub folded: bool,
    /// Карманные карты. `None` – карты не записаны (оборванная раздача).
    pub hole_cards: Option<Vec<Card>>,
}

impl SettlementPlayer {
    pub fn new(id: PlayerId, stack: Chips) -> Self {
        Self {
            id,
            stack,
            folded: false,
            hole_cards: None,
        }
    }

    pub fn with_hole_cards(mut self, cards: Vec<Card>) -> Self {
        self.hole_cards = Some(cards);
        self
    }

    pub fn folded(mut self) -> Self {
        self.folded = true;
        self
    }
}

/// Всё, что нужно для расчёта банка в конце раздачи.
///
/// Обычно либо `side_pots` уже разложены (см. `build_settlement_pots`),
/// а `pot == 0`, либо весь `pot` делится одним банком между всеми
/// активными игроками.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SettlementState {
    pub players: Vec<SettlementPlayer>,
    pub pot: Chips,
    pub side_pots: Vec<SidePot>,
    pub community_cards: Vec<Card>,
}

impl SettlementState {
    /// Сколько фишек лежит на столе до расчёта.
    pub fn chips_on_table(&self) -> Chips {
        self.pot + self.side_pots.iter().map(|p| p.amount).sum::<Chips>()
    }
}

/// Выплата одного банка одному победителю.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PotAward {
    /// Индекс банка в порядке расчёта (0 = main).
    pub pot_index: usize,
    pub player_id: PlayerId,
    pub amount: Chips,
    pub score: Score,
}

/// Итог расчёта: кому сколько и почему. Удобно для аудита/истории.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SettlementSummary {
    pub awards: Vec<PotAward>,
    /// Оценка каждого активного игрока (0 – если руку оценить не удалось).
    pub scores: Vec<(PlayerId, Score)>,
    /// Невостребованные излишки: слой, который внёс один игрок и никто
    /// не уравнял, возвращается ему (даже если он сфолдил).
    pub refunds: Vec<(PlayerId, Chips)>,
}

impl SettlementSummary {
    pub fn total_awarded(&self) -> Chips {
        self.awards.iter().map(|a| a.amount).sum()
    }

    pub fn total_refunded(&self) -> Chips {
        self.refunds.iter().map(|(_, c)| *c).sum()
    }

    /// Сколько всего выиграл игрок по всем банкам.
    pub fn won_by(&self, player_id: PlayerId) -> Chips {
        self.awards
            .iter()
            .filter(|a| a.player_id == player_id)
            .map(|a| a.amount)
            .sum()
    }
}

/// Раздать банк(и) на шоудауне.
///
/// Правила:
///   - нет активных игроков → ничего не делаем;
///   - руку, которую не удалось оценить, считаем Score 0, расчёт не падает;
///   - банк делится поровну между лучшими руками среди его претендентов,
///     весь остаток от деления получает первый победитель по порядку `players`;
///   - слой без активных претендентов с одним участником – неуравненный
///     излишек, он возвращается этому участнику;
///   - остальные слои без активных претендентов переносятся в ближайший
///     нижний банк, где претендент есть (если такого нет – в ближайший верхний);
///   - если есть хоть один активный игрок, стеки вырастают ровно на
///     `chips_on_table()`, после расчёта `pot == 0`, `side_pots` пуст.
pub fn settle_pots<E: HandEvaluator>(
    state: &mut SettlementState,
    evaluator: &E,
) -> SettlementSummary {
    let active: Vec<usize> = state
        .players
        .iter()
        .enumerate()
        .filter(|(_, p)| !p.folded)
        .map(|(i, _)| i)
        .collect();

    if active.is_empty() {
        return SettlementSummary::default();
    }

    // scores[i] – оценка игрока state.players[i].
    let mut scores: Vec<Score> = vec![Score::ZERO; state.players.len()];
    let mut summary = SettlementSummary::default();

    for &i in &active {
        let p = &state.players[i];
        let mut cards: Vec<Card> = p.hole_cards.clone().unwrap_or_default();
        cards.extend_from_slice(&state.community_cards);

        let score = evaluator.evaluate(&cards).unwrap_or(Score::ZERO);
        scores[i] = score;
        summary.scores.push((p.id, score));
    }

    let everyone: Vec<PlayerId> = active.iter().map(|&i| state.players[i].id).collect();
    let mut pots: Vec<(Chips, Vec<PlayerId>)> = state
        .side_pots
        .iter()
        .map(|sp| (sp.amount, sp.players.clone()))
        .collect();
    // Плоский pot (или то, что осталось в нём рядом с явными слоями)
    // делится между всеми активными игроками.
    if pots.is_empty() || !state.pot.is_zero() {
        pots.push((state.pot, everyone.clone()));
    }

    summary.refunds = resolve_orphan_pots(&mut pots, &everyone);
    for &(player_id, amount) in &summary.refunds {
        if let Some(p) = state.players.iter_mut().find(|p| p.id == player_id) {
            p.stack += amount;
        }
    }

    for (pot_index, (amount, eligible)) in pots.into_iter().enumerate() {
        if amount.is_zero() {
            continue;
        }

        // Претенденты – активные игроки этого слоя, в порядке `players`.
        let contenders: Vec<usize> = active
            .iter()
            .copied()
            .filter(|&i| eligible.contains(&state.players[i].id))
            .collect();

        let best = contenders
            .iter()
            .map(|&i| scores[i])
            .max()
            .unwrap_or(Score::ZERO);

        let winners: Vec<usize> = contenders
            .into_iter()
            .filter(|&i| scores[i] == best)
            .collect();

        let (share, remainder) = amount.split(winners.len());

        for (n, &i) in winners.iter().enumerate() {
            // Нечётные фишки целиком первому победителю.
            let prize = if n == 0 { share + remainder } else { share };
            let player = &mut state.players[i];
            player.stack += prize;

            summary.awards.push(PotAward {
                pot_index,
                player_id: player.id,
                amount: prize,
                score: best,
            });
        }
    }

    state.pot = Chips::ZERO;
    state.side_pots.clear();

    summary
}

/// Убирает из `pots` слои без активных претендентов: излишек одного
/// участника отдаётся обратно (возвращается списком), прочие фишки
/// переезжают в соседний банк с претендентом. После вызова у каждого
/// ненулевого банка есть хотя бы один активный претендент.
fn resolve_orphan_pots(
    pots: &mut [(Chips, Vec<PlayerId>)],
    active: &[PlayerId],
) -> Vec<(PlayerId, Chips)> {
    let contested = |eligible: &[PlayerId]| eligible.iter().any(|id| active.contains(id));
    let mut refunds = Vec::new();

    for (amount, eligible) in pots.iter_mut() {
        if !amount.is_zero() && eligible.len() == 1 && !contested(eligible.as_slice()) {
            refunds.push((eligible[0], *amount));
            *amount = Chips::ZERO;
        }
    }

    for k in 0..pots.len() {
        if pots[k].0.is_zero() || contested(&pots[k].1) {
            continue;
        }
        let target = (0..k)
            .rev()
            .find(|&j| contested(&pots[j].1))
            .or_else(|| (k + 1..pots.len()).find(|&j| contested(&pots[j].1)));

        match target {
            Some(j) => {
                let amount = pots[k].0;
                pots[j].0 += amount;
                pots[k].0 = Chips::ZERO;
            }
            // Ни в одном банке нет активных: разыгрываем между всеми.
            None => pots[k].1 = active.to_vec(),
        }
    }

    refunds
}
