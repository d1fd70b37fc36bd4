//! Enumeration of candidate combos (sets and runs) for the exhaustive cover search.

use std::collections::HashSet;

use crate::bitset::CardMask;
use crate::combo::ComboKind;
use crate::deck::{Card, Suit, NUM_RANKS, SUITS};

/// Every candidate keeps at least this many natural cards.
const MIN_NATURALS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Slot {
    pub value: u8,
    /// `None` marks a slot a wildcard has to fill.
    pub card: Option<Card>,
}

#[derive(Debug, Clone)]
pub(crate) struct Candidate {
    pub kind: ComboKind,
    pub suit: Option<Suit>,
    pub slots: Vec<Slot>,
    pub mask: CardMask,
    pub wilds: usize,
}

impl Candidate {
    fn new(kind: ComboKind, suit: Option<Suit>, slots: Vec<Slot>) -> Self {
        let mask = CardMask::from_ids(slots.iter().filter_map(|slot| slot.card.map(|c| c.id)));
        let wilds = slots.iter().filter(|slot| slot.card.is_none()).count();
        Self {
            kind,
            suit,
            slots,
            mask,
            wilds,
        }
    }

    fn naturals(&self) -> usize {
        self.slots.len() - self.wilds
    }
}

fn cartesian_product<T: Copy>(lists: &[Vec<T>]) -> Vec<Vec<T>> {
    if lists.is_empty() {
        return vec![Vec::new()];
    }
    let mut results = Vec::new();
    let mut current = Vec::with_capacity(lists.len());
    fn recurse<T: Copy>(
        lists: &[Vec<T>],
        index: usize,
        current: &mut Vec<T>,
        results: &mut Vec<Vec<T>>,
    ) {
        if index == lists.len() {
            results.push(current.clone());
            return;
        }
        for &value in &lists[index] {
            current.push(value);
            recurse(lists, index + 1, current, results);
            current.pop();
        }
    }
    recurse(lists, 0, &mut current, &mut results);
    results
}

fn combinations<T: Copy>(items: &[T], k: usize) -> Vec<Vec<T>> {
    if k == 0 {
        return vec![Vec::new()];
    }
    if items.len() < k {
        return Vec::new();
    }
    let mut results = Vec::new();
    let mut current = Vec::with_capacity(k);
    fn recurse<T: Copy>(
        items: &[T],
        start: usize,
        k: usize,
        current: &mut Vec<T>,
        results: &mut Vec<Vec<T>>,
    ) {
        if current.len() == k {
            results.push(current.clone());
            return;
        }
        for idx in start..items.len() {
            current.push(items[idx]);
            recurse(items, idx + 1, k, current, results);
            current.pop();
        }
    }
    recurse(items, 0, k, &mut current, &mut results);
    results
}

fn enumerate_sets(naturals: &[Card], max_wilds: usize) -> Vec<Candidate> {
    let mut results = Vec::new();
    for value in 1..=NUM_RANKS as u8 {
        let same: Vec<Card> = naturals.iter().filter(|c| c.value == value).copied().collect();
        for size in 3..=4 {
            let kind = if size == 4 { ComboKind::Quad } else { ComboKind::Triple };
            for natural_count in (MIN_NATURALS..=size.min(same.len())).rev() {
                let wilds = size - natural_count;
                if wilds > max_wilds {
                    continue;
                }
                for picked in combinations(&same, natural_count) {
                    let mut slots: Vec<Slot> = picked
                        .into_iter()
                        .map(|card| Slot {
                            value,
                            card: Some(card),
                        })
                        .collect();
                    slots.extend((0..wilds).map(|_| Slot { value, card: None }));
                    results.push(Candidate::new(kind, None, slots));
                }
            }
        }
    }
    results
}

fn enumerate_runs(naturals: &[Card], max_wilds: usize) -> Vec<Candidate> {
    let mut results = Vec::new();
    let mut seen: HashSet<(CardMask, usize)> = HashSet::new();
    for suit in SUITS {
        let by_value: Vec<Vec<Option<Card>>> = (0..=NUM_RANKS as u8)
            .map(|value| {
                let mut options: Vec<Option<Card>> = naturals
                    .iter()
                    .filter(|c| c.suit == suit && c.value == value)
                    .map(|&c| Some(c))
                    .collect();
                options.push(None);
                options
            })
            .collect();
        for length in 3..=4usize {
            for start in 1..=(NUM_RANKS + 1 - length) {
                let window = &by_value[start..start + length];
                let held = window.iter().filter(|options| options.len() > 1).count();
                if held < MIN_NATURALS {
                    continue;
                }
                for picked in cartesian_product(window) {
                    let slots: Vec<Slot> = picked
                        .into_iter()
                        .enumerate()
                        .map(|(offset, card)| Slot {
                            value: (start + offset) as u8,
                            card,
                        })
                        .collect();
                    let candidate = Candidate::new(ComboKind::Run, Some(suit), slots);
                    if candidate.naturals() < MIN_NATURALS || candidate.wilds > max_wilds {
                        continue;
                    }
                    if seen.insert((candidate.mask, candidate.wilds)) {
                        results.push(candidate);
                    }
                }
            }
        }
    }
    results
}

/// All sets and runs buildable from `naturals` using at most `max_wilds` wildcards,
/// ordered fewest wildcards first, then longest, then quads before runs before triples.
pub(crate) fn enumerate_candidates(naturals: &[Card], max_wilds: usize) -> Vec<Candidate> {
    let mut candidates = enumerate_sets(naturals, max_wilds);
    candidates.extend(enumerate_runs(naturals, max_wilds));
    candidates.sort_by_key(|c| {
        let kind_rank = match c.kind {
            ComboKind::Quad => 0,
            ComboKind::Run => 1,
            ComboKind::Triple => 2,
        };
        (c.wilds, std::cmp::Reverse(c.slots.len()), kind_rank)
    });
    candidates
}
