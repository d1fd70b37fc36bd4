//! Shape predicates: quads, triples and runs, with and without wildcard help.

use crate::deck::{Card, Suit, NUM_RANKS, SUITS};
use crate::wildcards::{split_hand, WildcardSet};

/// How much wildcard help the wildcard-aware predicates accept.
///
/// Once a hand already banks a natural seven, the remaining shapes are held
/// to [`Strictness::RequireNatural`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strictness {
    Lenient,
    RequireNatural,
}

impl Strictness {
    pub fn from_bonus(has_bonus: bool) -> Self {
        if has_bonus {
            Strictness::RequireNatural
        } else {
            Strictness::Lenient
        }
    }
}

/// Occurrences of each rank value, indexed by value (slot 0 unused).
pub(crate) fn value_counts<'a, I>(cards: I) -> [usize; NUM_RANKS + 1]
where
    I: IntoIterator<Item = &'a Card>,
{
    let mut counts = [0; NUM_RANKS + 1];
    for card in cards {
        if (1..=NUM_RANKS as u8).contains(&card.value) {
            counts[card.value as usize] += 1;
        }
    }
    counts
}

/// Sorted distinct values held in `suit`.
pub(crate) fn suit_values(cards: &[Card], suit: Suit) -> Vec<u8> {
    let mut values: Vec<u8> = cards
        .iter()
        .filter(|card| card.suit == suit && card.value > 0)
        .map(|card| card.value)
        .collect();
    values.sort_unstable();
    values.dedup();
    values
}

/// Lowest starting value of `length` consecutive entries in sorted distinct `values`.
pub(crate) fn first_run_start(values: &[u8], length: usize) -> Option<u8> {
    if length == 0 || values.is_empty() {
        return None;
    }
    let mut streak = 1;
    if streak >= length {
        return values.first().copied();
    }
    for pair in values.windows(2) {
        if pair[1] == pair[0] + 1 {
            streak += 1;
        } else {
            streak = 1;
        }
        if streak >= length {
            return Some(pair[1] + 1 - length as u8);
        }
    }
    None
}

/// First `count` cards of `value`, in hand order, if that many are held.
pub(crate) fn take_of_value(cards: &[Card], value: u8, count: usize) -> Option<Vec<Card>> {
    let picked: Vec<Card> = cards
        .iter()
        .filter(|card| card.value == value)
        .take(count)
        .copied()
        .collect();
    (picked.len() == count).then_some(picked)
}

/// Lowest value holding at least `count` cards, with the first `count` of them.
pub(crate) fn take_first_group(cards: &[Card], count: usize) -> Option<Vec<Card>> {
    let counts = value_counts(cards);
    (1..=NUM_RANKS as u8)
        .find(|&value| counts[value as usize] >= count)
        .and_then(|value| take_of_value(cards, value, count))
}

/// First run of `length` in `suit`, one card per value, ordered by value.
pub(crate) fn take_run_in_suit(cards: &[Card], suit: Suit, length: usize) -> Option<Vec<Card>> {
    let start = first_run_start(&suit_values(cards, suit), length)?;
    (start..start + length as u8)
        .map(|value| {
            cards
                .iter()
                .find(|card| card.suit == suit && card.value == value)
                .copied()
        })
        .collect()
}

/// First run of `length` across suits in their fixed order.
pub(crate) fn take_first_run(cards: &[Card], length: usize) -> Option<Vec<Card>> {
    SUITS.iter().find_map(|&suit| take_run_in_suit(cards, suit, length))
}

fn has_count(hand: &[Card], threshold: usize) -> bool {
    value_counts(hand).iter().any(|&count| count >= threshold)
}

pub fn is_quad(hand: &[Card]) -> bool {
    has_count(hand, 4)
}

pub fn is_triple(hand: &[Card]) -> bool {
    has_count(hand, 3)
}

pub fn is_run(hand: &[Card], length: usize) -> bool {
    SUITS
        .iter()
        .any(|&suit| first_run_start(&suit_values(hand, suit), length).is_some())
}

pub fn is_triple_with_wildcards(
    hand: &[Card],
    wildcards: &WildcardSet,
    strictness: Strictness,
) -> bool {
    let (naturals, wilds) = split_hand(hand, wildcards);
    match strictness {
        Strictness::Lenient if is_triple(&naturals) => return true,
        Strictness::RequireNatural if wilds.is_empty() => return is_triple(&naturals),
        _ => {}
    }
    !wilds.is_empty() && has_count(&naturals, 2)
}

pub fn is_run_with_wildcards(
    hand: &[Card],
    length: usize,
    wildcards: &WildcardSet,
    strictness: Strictness,
) -> bool {
    let (naturals, wilds) = split_hand(hand, wildcards);
    match strictness {
        Strictness::Lenient if is_run(&naturals, length) => return true,
        Strictness::RequireNatural if wilds.is_empty() => return is_run(&naturals, length),
        _ => {}
    }
    SUITS
        .iter()
        .any(|&suit| bridged_run_reaches(&suit_values(&naturals, suit), length, wilds.len()))
}

/// Walks from each start value, spending one wildcard per missing value, and
/// reports whether `length` is reachable (topping up from leftover budget).
fn bridged_run_reaches(values: &[u8], length: usize, budget: usize) -> bool {
    for start in 0..values.len() {
        let mut remaining = budget;
        let mut reach = 1;
        let mut prev = values[start];
        for &next in &values[start + 1..] {
            let gap = (next - prev - 1) as usize;
            if gap > remaining {
                break;
            }
            remaining -= gap;
            reach += gap + 1;
            prev = next;
        }
        if reach >= length || reach + remaining >= length {
            return true;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::card_from_str;

    fn cards(ids: &[&str]) -> Vec<Card> {
        ids.iter().map(|id| card_from_str(id).unwrap()).collect()
    }

    #[test]
    fn counts_ignore_suits_and_jokers() {
        let hand = cards(&["7H-0", "7S-0", "7D-1", "JOKER-0", "JOKER-1", "JOKER-2"]);
        assert!(is_triple(&hand));
        assert!(!is_quad(&hand));
        assert!(is_quad(&cards(&["7H-0", "7H-1", "7S-0", "7C-1"])));
    }

    #[test]
    fn runs_need_one_suit_and_no_wrap() {
        assert!(is_run(&cards(&["3H-0", "4H-0", "5H-0"]), 3));
        assert!(!is_run(&cards(&["3H-0", "4D-0", "5H-0"]), 3));
        assert!(!is_run(&cards(&["QC-0", "KC-0", "AC-0"]), 3));
        assert!(is_run(&cards(&["QC-0", "KC-0", "JC-1", "10C-0"]), 4));
        assert!(is_run(&cards(&["5H-0", "5H-1", "6H-0", "7H-0"]), 3));
    }

    #[test]
    fn first_run_start_finds_lowest_window() {
        assert_eq!(first_run_start(&[1, 3, 4, 5, 6], 3), Some(3));
        assert_eq!(first_run_start(&[2, 3, 5], 3), None);
        assert_eq!(first_run_start(&[9], 1), Some(9));
    }

    #[test]
    fn pair_plus_wildcard_makes_a_triple() {
        let wild = WildcardSet::jokers_only();
        let hand = cards(&["7H-0", "7S-0", "JOKER-0", "2C-0"]);
        assert!(is_triple_with_wildcards(&hand, &wild, Strictness::Lenient));
        assert!(is_triple_with_wildcards(&hand, &wild, Strictness::RequireNatural));
        let no_pair = cards(&["7H-0", "8S-0", "JOKER-0", "JOKER-1"]);
        assert!(!is_triple_with_wildcards(&no_pair, &wild, Strictness::Lenient));
    }

    #[test]
    fn strict_mode_without_wildcards_needs_natural_triple() {
        let wild = WildcardSet::jokers_only();
        let pair = cards(&["7H-0", "7S-0", "2C-0"]);
        assert!(!is_triple_with_wildcards(&pair, &wild, Strictness::RequireNatural));
        let triple = cards(&["7H-0", "7S-0", "7C-0"]);
        assert!(is_triple_with_wildcards(&triple, &wild, Strictness::RequireNatural));
    }

    #[test]
    fn temporary_jokers_do_not_count_naturally() {
        let wild = WildcardSet::for_round(&card_from_str("7D-0").unwrap());
        let hand = cards(&["7H-0", "7S-0", "7C-0"]);
        assert!(is_triple(&hand));
        assert!(!is_triple_with_wildcards(&hand, &wild, Strictness::Lenient));
    }

    #[test]
    fn wildcards_bridge_gaps_in_runs() {
        let wild = WildcardSet::jokers_only();
        let gap = cards(&["5H-0", "7H-0", "JOKER-0"]);
        assert!(is_run_with_wildcards(&gap, 3, &wild, Strictness::Lenient));
        assert!(!is_run_with_wildcards(&gap, 4, &wild, Strictness::Lenient));
        let wide = cards(&["5H-0", "8H-0", "JOKER-0"]);
        assert!(!is_run_with_wildcards(&wide, 3, &wild, Strictness::Lenient));
        let topped = cards(&["5H-0", "6H-0", "JOKER-0", "JOKER-1"]);
        assert!(is_run_with_wildcards(&topped, 4, &wild, Strictness::RequireNatural));
    }

    #[test]
    fn strict_runs_without_wildcards_stay_natural() {
        let wild = WildcardSet::jokers_only();
        let hand = cards(&["5H-0", "7H-0", "9C-0"]);
        assert!(!is_run_with_wildcards(&hand, 3, &wild, Strictness::RequireNatural));
        let natural = cards(&["5H-0", "6H-0", "7H-0"]);
        assert!(is_run_with_wildcards(&natural, 3, &wild, Strictness::RequireNatural));
    }
}
