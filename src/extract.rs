//! Staged greedy partitioning of a hand into quads, runs and triples.
//!
//! Phases run in a fixed order over a working copy of the hand and always take
//! the first structural match. Nothing is retried across phases, so a hand that
//! only splits under a different grouping comes back empty.

use std::collections::VecDeque;

use tracing::{debug, trace};

use crate::bitset::CardMask;
use crate::bonus::{extract_natural_seven_combo, has_natural_seven};
use crate::combo::{covers_exactly, Combo, ComboCard, ComboKind, Partition};
use crate::deck::{Card, NUM_RANKS, SUITS};
use crate::shapes::{take_of_value, take_run_in_suit, value_counts};
use crate::wildcards::{split_hand, WildcardSet};

/// Wildcards not yet spent, drawn in hand order.
#[derive(Debug, Clone, Default)]
pub struct WildcardPool {
    cards: VecDeque<Card>,
}

impl WildcardPool {
    pub fn new(cards: Vec<Card>) -> Self {
        Self {
            cards: cards.into(),
        }
    }

    pub fn take(&mut self) -> Option<Card> {
        self.cards.pop_front()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

fn remove_cards(cards: &mut Vec<Card>, taken: &[Card]) {
    let mask = CardMask::from_ids(taken.iter().map(|card| card.id));
    cards.retain(|card| !mask.contains(card.id));
}

fn take_groups(naturals: &mut Vec<Card>, size: usize, kind: ComboKind) -> Vec<Combo> {
    let mut combos = Vec::new();
    for value in 1..=NUM_RANKS as u8 {
        if let Some(group) = take_of_value(naturals, value, size) {
            remove_cards(naturals, &group);
            combos.push(Combo::natural(kind, &group));
        }
    }
    combos
}

fn take_runs(naturals: &mut Vec<Card>) -> Vec<Combo> {
    let mut combos = Vec::new();
    for length in [4, 3] {
        for suit in SUITS {
            if let Some(run) = take_run_in_suit(naturals, suit, length) {
                remove_cards(naturals, &run);
                combos.push(Combo::natural(ComboKind::Run, &run));
            }
        }
    }
    combos
}

/// Pairs of equal value topped up with one wildcard each.
fn complete_triples(naturals: &mut Vec<Card>, pool: &mut WildcardPool) -> Vec<Combo> {
    let mut combos = Vec::new();
    for value in 1..=NUM_RANKS as u8 {
        if pool.is_empty() {
            break;
        }
        if value_counts(naturals.iter())[value as usize] != 2 {
            continue;
        }
        let (Some(pair), Some(wild)) = (take_of_value(naturals, value, 2), pool.take()) else {
            continue;
        };
        remove_cards(naturals, &pair);
        let mut cards: Vec<ComboCard> = pair.into_iter().map(ComboCard::Natural).collect();
        cards.push(ComboCard::Wildcard {
            card: wild,
            assumed_value: value,
            assumed_suit: None,
        });
        combos.push(Combo {
            kind: ComboKind::Triple,
            cards,
        });
    }
    combos
}

/// Same-suit cards two apart with the middle value filled by a wildcard.
fn bridge_runs(naturals: &mut Vec<Card>, pool: &mut WildcardPool) -> Vec<Combo> {
    let mut combos = Vec::new();
    for suit in SUITS {
        let mut in_suit: Vec<Card> = naturals.iter().filter(|c| c.suit == suit).copied().collect();
        in_suit.sort_by_key(|card| card.value);
        let mut used = vec![false; in_suit.len()];
        for low in 0..in_suit.len() {
            for high in low + 1..in_suit.len() {
                if pool.is_empty() || used[low] {
                    break;
                }
                if used[high] || in_suit[high].value != in_suit[low].value + 2 {
                    continue;
                }
                let middle = in_suit[low].value + 1;
                let middle_held = in_suit
                    .iter()
                    .zip(&used)
                    .any(|(card, &taken)| !taken && card.value == middle);
                if middle_held {
                    continue;
                }
                let Some(wild) = pool.take() else {
                    break;
                };
                used[low] = true;
                used[high] = true;
                let mut run = Combo {
                    kind: ComboKind::Run,
                    cards: vec![
                        ComboCard::Natural(in_suit[low]),
                        ComboCard::Wildcard {
                            card: wild,
                            assumed_value: middle,
                            assumed_suit: Some(suit),
                        },
                        ComboCard::Natural(in_suit[high]),
                    ],
                };
                run.sort_by_value();
                combos.push(run);
            }
        }
        let bridged: Vec<Card> = in_suit
            .iter()
            .zip(&used)
            .filter(|(_, &taken)| taken)
            .map(|(card, _)| *card)
            .collect();
        remove_cards(naturals, &bridged);
    }
    combos
}

/// Greedy partition of `hand`; empty unless every card lands in exactly one combo.
pub fn extract_win_partition(hand: &[Card], wildcards: &WildcardSet) -> Partition {
    let mut working = hand.to_vec();
    let mut partition = Partition::new();

    let has_bonus = has_natural_seven(hand);
    if has_bonus {
        let bonus = extract_natural_seven_combo(hand);
        for combo in &bonus {
            let cards: Vec<Card> = combo.cards.iter().map(|slot| *slot.card()).collect();
            remove_cards(&mut working, &cards);
        }
        partition.extend(bonus);
    }

    let (mut naturals, wilds) = split_hand(&working, wildcards);
    let mut pool = WildcardPool::new(wilds);

    partition.extend(take_groups(&mut naturals, 4, ComboKind::Quad));
    partition.extend(take_runs(&mut naturals));
    partition.extend(take_groups(&mut naturals, 3, ComboKind::Triple));
    trace!(
        target: "melds.extract",
        natural_combos = partition.len(),
        naturals_left = naturals.len(),
        wildcards_left = pool.len(),
        "natural phases done"
    );

    if has_bonus || !pool.is_empty() {
        partition.extend(complete_triples(&mut naturals, &mut pool));
    }
    if has_bonus || !pool.is_empty() {
        partition.extend(bridge_runs(&mut naturals, &mut pool));
    }

    for combo in &partition {
        trace!(target: "melds.extract", %combo, "emitted");
    }
    if !covers_exactly(&partition, hand) {
        debug!(
            target: "melds.extract",
            naturals_left = naturals.len(),
            wildcards_left = pool.len(),
            "no full partition"
        );
        return Partition::new();
    }
    partition
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::{card_from_str, Suit};

    fn cards(ids: &[&str]) -> Vec<Card> {
        ids.iter().map(|id| card_from_str(id).unwrap()).collect()
    }

    fn kinds(partition: &Partition) -> Vec<ComboKind> {
        partition.iter().map(|combo| combo.kind).collect()
    }

    #[test]
    fn pool_hands_out_in_order() {
        let mut pool = WildcardPool::new(cards(&["JOKER-2", "JOKER-0"]));
        assert_eq!(pool.take().unwrap().id.to_string(), "JOKER-2");
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn pair_and_wildcard_become_triple() {
        let mut naturals = cards(&["7H-0", "7C-1", "2S-0"]);
        let mut pool = WildcardPool::new(cards(&["JOKER-0"]));
        let combos = complete_triples(&mut naturals, &mut pool);
        assert_eq!(combos.len(), 1);
        assert_eq!(combos[0].kind, ComboKind::Triple);
        assert_eq!(combos[0].wildcards_used(), 1);
        assert_eq!(naturals, cards(&["2S-0"]));
        assert!(pool.is_empty());
    }

    #[test]
    fn gap_is_bridged_with_a_stand_in() {
        let mut naturals = cards(&["7H-0", "5H-0", "9C-0"]);
        let mut pool = WildcardPool::new(cards(&["JOKER-3"]));
        let combos = bridge_runs(&mut naturals, &mut pool);
        assert_eq!(combos.len(), 1);
        let run = &combos[0];
        let values: Vec<u8> = run.cards.iter().map(ComboCard::value).collect();
        assert_eq!(values, vec![5, 6, 7]);
        match run.cards[1] {
            ComboCard::Wildcard {
                card, assumed_suit, ..
            } => {
                assert_eq!(card.id.to_string(), "JOKER-3");
                assert_eq!(assumed_suit, Some(Suit::Hearts));
            }
            other => panic!("expected wildcard, got {other:?}"),
        }
        assert_eq!(naturals, cards(&["9C-0"]));
    }

    #[test]
    fn held_middle_blocks_bridging() {
        let mut naturals = cards(&["5H-0", "6H-0", "7H-0"]);
        let mut pool = WildcardPool::new(cards(&["JOKER-0"]));
        assert!(bridge_runs(&mut naturals, &mut pool).is_empty());
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn kings_and_three_runs_partition() {
        let hand = cards(&[
            "KH-0", "KS-0", "KD-0", "KC-1", "3H-0", "4H-0", "5H-0", "3C-0", "4C-0", "5C-0", "3D-0",
            "4D-0", "5D-0",
        ]);
        let wild = WildcardSet::for_round(&card_from_str("9S-0").unwrap());
        let partition = extract_win_partition(&hand, &wild);
        assert_eq!(
            kinds(&partition),
            vec![ComboKind::Quad, ComboKind::Run, ComboKind::Run, ComboKind::Run]
        );
        assert!(covers_exactly(&partition, &hand));
    }

    #[test]
    fn wildcards_complete_triple_and_run() {
        let hand = cards(&[
            "QH-0", "QS-0", "QD-0", "QC-0", "9S-0", "10S-0", "JS-0", "7H-0", "7C-1", "JOKER-0",
            "4D-0", "6D-0", "2D-1",
        ]);
        // Twos are the round's temporary jokers.
        let wild = WildcardSet::for_round(&card_from_str("2C-0").unwrap());
        let partition = extract_win_partition(&hand, &wild);
        assert_eq!(
            kinds(&partition),
            vec![ComboKind::Quad, ComboKind::Run, ComboKind::Triple, ComboKind::Run]
        );
        assert_eq!(partition[2].wildcards_used(), 1);
        assert_eq!(partition[2].cards[2].id().to_string(), "JOKER-0");
        assert_eq!(partition[3].cards[1].id().to_string(), "2D-1");
        assert!(covers_exactly(&partition, &hand));
    }

    #[test]
    fn leftover_card_fails_the_partition() {
        let hand = cards(&[
            "KH-0", "KS-0", "KD-0", "KC-1", "3H-0", "4H-0", "5H-0", "3C-0", "4C-0", "5C-0", "3D-0",
            "4D-0", "9D-0",
        ]);
        assert!(extract_win_partition(&hand, &WildcardSet::jokers_only()).is_empty());
    }

    #[test]
    fn greedy_order_misses_alternative_grouping() {
        // 3-6 of hearts goes out as a 4-run, stranding the other two sixes.
        let hand = cards(&[
            "3H-0", "4H-0", "5H-0", "6H-0", "6S-0", "6C-0", "7D-0", "8D-0", "9D-0", "10D-0", "9C-0",
            "10C-0", "JC-0",
        ]);
        assert!(has_natural_seven(&hand));
        assert!(extract_natural_seven_combo(&hand).is_empty());
        assert!(extract_win_partition(&hand, &WildcardSet::jokers_only()).is_empty());
    }
}
