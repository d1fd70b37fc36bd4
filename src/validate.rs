//! Win confirmation: shape predicates first, then a concrete partition.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::bonus::has_natural_seven;
use crate::combo::{covers_exactly, Partition};
use crate::cover::extract_exhaustive_partition;
use crate::deck::Card;
use crate::extract::extract_win_partition;
use crate::shapes::{is_quad, is_run_with_wildcards, is_triple_with_wildcards, Strictness};
use crate::wildcards::WildcardSet;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartitionStrategy {
    /// Staged first-match extraction.
    #[default]
    Greedy,
    /// Backtracking exact cover.
    Exhaustive,
}

impl PartitionStrategy {
    pub fn partition(self, hand: &[Card], wildcards: &WildcardSet) -> Partition {
        match self {
            PartitionStrategy::Greedy => extract_win_partition(hand, wildcards),
            PartitionStrategy::Exhaustive => extract_exhaustive_partition(hand, wildcards),
        }
    }
}

/// Whether the hand shows a win shape: a quad with a 3-run, or a 4-run
/// with a triple, wildcards allowed unless a natural seven is banked.
pub fn has_win_shape(hand: &[Card], wildcards: &WildcardSet) -> bool {
    let strictness = Strictness::from_bonus(has_natural_seven(hand));
    let quad_and_run = is_quad(hand) && is_run_with_wildcards(hand, 3, wildcards, strictness);
    quad_and_run
        || (is_run_with_wildcards(hand, 4, wildcards, strictness)
            && is_triple_with_wildcards(hand, wildcards, strictness))
}

pub fn validate_win(hand: &[Card], wildcards: &WildcardSet) -> bool {
    validate_win_with(hand, wildcards, PartitionStrategy::Greedy)
}

pub fn validate_win_with(
    hand: &[Card],
    wildcards: &WildcardSet,
    strategy: PartitionStrategy,
) -> bool {
    if !has_win_shape(hand, wildcards) {
        debug!(target: "melds.validate", cards = hand.len(), "no win shape");
        return false;
    }
    let partition = strategy.partition(hand, wildcards);
    let complete = !partition.is_empty() && covers_exactly(&partition, hand);
    debug!(
        target: "melds.validate",
        ?strategy,
        combos = partition.len(),
        complete,
        "partition checked"
    );
    complete
}
