//! The "natural seven" bonus: a quad with a 3-run, or a 4-run with a triple,
//! made without any wildcard help.

use tracing::debug;

use crate::combo::{Combo, ComboKind, Partition};
use crate::deck::Card;
use crate::shapes::{is_quad, is_run, is_triple, take_first_group, take_first_run};

const BONUS_CARDS: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BonusShape {
    QuadAndRun,
    RunAndTriple,
}

fn predicated_shapes(hand: &[Card]) -> Vec<BonusShape> {
    let mut shapes = Vec::with_capacity(2);
    if is_quad(hand) && is_run(hand, 3) {
        shapes.push(BonusShape::QuadAndRun);
    }
    if is_run(hand, 4) && is_triple(hand) {
        shapes.push(BonusShape::RunAndTriple);
    }
    shapes
}

pub fn has_natural_seven(hand: &[Card]) -> bool {
    !predicated_shapes(hand).is_empty()
}

fn isolate(hand: &[Card], shape: BonusShape) -> Option<Partition> {
    let (first, second) = match shape {
        BonusShape::QuadAndRun => (
            Combo::natural(ComboKind::Quad, &take_first_group(hand, 4)?),
            Combo::natural(ComboKind::Run, &take_first_run(hand, 3)?),
        ),
        BonusShape::RunAndTriple => (
            Combo::natural(ComboKind::Run, &take_first_run(hand, 4)?),
            Combo::natural(ComboKind::Triple, &take_first_group(hand, 3)?),
        ),
    };
    if first.len() + second.len() != BONUS_CARDS || first.mask().overlaps(second.mask()) {
        debug!(target: "melds.bonus", ?shape, "bonus combos overlap");
        return None;
    }
    Some(vec![first, second])
}

/// The two combos forming the bonus, or empty when no disjoint pair of
/// seven cards can be isolated even though [`has_natural_seven`] holds.
pub fn extract_natural_seven_combo(hand: &[Card]) -> Partition {
    predicated_shapes(hand)
        .into_iter()
        .find_map(|shape| isolate(hand, shape))
        .unwrap_or_default()
}
