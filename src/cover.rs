//! Exact-cover search over candidate combos.
//!
//! Unlike the greedy extractor this backtracks, so it finds a partition
//! whenever one exists with at least two natural cards per combo.

use std::collections::HashSet;

use tracing::{debug, trace};

use crate::bitset::CardMask;
use crate::combo::{covers_exactly, Combo, ComboCard, Partition};
use crate::deck::Card;
use crate::extract::WildcardPool;
use crate::runs_sets::{enumerate_candidates, Candidate};
use crate::wildcards::{split_hand, WildcardSet};

struct Search<'a> {
    naturals: &'a [Card],
    candidates: &'a [Candidate],
    target: CardMask,
    total_wilds: usize,
    dead: HashSet<(CardMask, usize)>,
}

impl Search<'_> {
    fn run(&mut self, covered: CardMask, wilds_used: usize, selection: &mut Vec<usize>) -> bool {
        if covered == self.target {
            return wilds_used == self.total_wilds;
        }
        if self.dead.contains(&(covered, wilds_used)) {
            return false;
        }
        let (naturals, candidates) = (self.naturals, self.candidates);
        // Branch only on the first uncovered card; it must land somewhere.
        let Some(pivot) = naturals.iter().find(|card| !covered.contains(card.id)) else {
            return false;
        };
        for (idx, candidate) in candidates.iter().enumerate() {
            if !candidate.mask.contains(pivot.id)
                || candidate.mask.overlaps(covered)
                || wilds_used + candidate.wilds > self.total_wilds
            {
                continue;
            }
            selection.push(idx);
            if self.run(covered.union(candidate.mask), wilds_used + candidate.wilds, selection) {
                return true;
            }
            selection.pop();
        }
        self.dead.insert((covered, wilds_used));
        false
    }
}

fn build_combo(candidate: &Candidate, pool: &mut WildcardPool) -> Option<Combo> {
    let cards = candidate
        .slots
        .iter()
        .map(|slot| match slot.card {
            Some(card) => Some(ComboCard::Natural(card)),
            None => pool.take().map(|card| ComboCard::Wildcard {
                card,
                assumed_value: slot.value,
                assumed_suit: candidate.suit,
            }),
        })
        .collect::<Option<Vec<_>>>()?;
    Some(Combo {
        kind: candidate.kind,
        cards,
    })
}

/// Backtracking partition of `hand`; empty when no exact cover exists.
pub fn extract_exhaustive_partition(hand: &[Card], wildcards: &WildcardSet) -> Partition {
    let (naturals, wilds) = split_hand(hand, wildcards);
    let candidates = enumerate_candidates(&naturals, wilds.len());
    trace!(target: "melds.cover", candidates = candidates.len(), "enumerated");

    let mut search = Search {
        naturals: &naturals,
        candidates: &candidates,
        target: CardMask::from_ids(naturals.iter().map(|card| card.id)),
        total_wilds: wilds.len(),
        dead: HashSet::new(),
    };
    let mut selection = Vec::new();
    if naturals.is_empty() || !search.run(CardMask::EMPTY, 0, &mut selection) {
        debug!(
            target: "melds.cover",
            dead_states = search.dead.len(),
            "no exact cover"
        );
        return Partition::new();
    }

    let mut pool = WildcardPool::new(wilds);
    let partition: Option<Partition> = selection
        .iter()
        .map(|&idx| build_combo(&candidates[idx], &mut pool))
        .collect();
    match partition {
        Some(partition) if covers_exactly(&partition, hand) => partition,
        _ => Partition::new(),
    }
}
