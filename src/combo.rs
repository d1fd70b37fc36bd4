//! Combos (quads, triples, runs) and partitions of a hand into them.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::bitset::CardMask;
use crate::deck::{Card, CardId, Suit};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ComboKind {
    Quad,
    Triple,
    Run,
}

impl ComboKind {
    pub fn name(self) -> &'static str {
        match self {
            ComboKind::Quad => "quad",
            ComboKind::Triple => "triple",
            ComboKind::Run => "run",
        }
    }
}

/// One slot of a combo. A wildcard keeps its own card (and id) and records
/// what it stands in for; `assumed_suit` is only set when it bridges a run.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ComboCard {
    Natural(Card),
    Wildcard {
        card: Card,
        assumed_value: u8,
        assumed_suit: Option<Suit>,
    },
}

impl ComboCard {
    pub fn id(&self) -> CardId {
        self.card().id
    }

    pub fn card(&self) -> &Card {
        match self {
            ComboCard::Natural(card) => card,
            ComboCard::Wildcard { card, .. } => card,
        }
    }

    /// Value this slot counts as inside its combo.
    pub fn value(&self) -> u8 {
        match self {
            ComboCard::Natural(card) => card.value,
            ComboCard::Wildcard { assumed_value, .. } => *assumed_value,
        }
    }

    pub fn is_wildcard(&self) -> bool {
        matches!(self, ComboCard::Wildcard { .. })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Combo {
    pub kind: ComboKind,
    pub cards: Vec<ComboCard>,
}

pub type Partition = Vec<Combo>;

impl Combo {
    pub fn natural(kind: ComboKind, cards: &[Card]) -> Self {
        Self {
            kind,
            cards: cards.iter().copied().map(ComboCard::Natural).collect(),
        }
    }

    pub fn ids(&self) -> impl Iterator<Item = CardId> + '_ {
        self.cards.iter().map(ComboCard::id)
    }

    pub fn mask(&self) -> CardMask {
        CardMask::from_ids(self.ids())
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn wildcards_used(&self) -> usize {
        self.cards.iter().filter(|slot| slot.is_wildcard()).count()
    }

    pub fn sort_by_value(&mut self) {
        self.cards.sort_by_key(ComboCard::value);
    }
}

impl fmt::Display for Combo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[", self.kind.name())?;
        for (idx, slot) in self.cards.iter().enumerate() {
            if idx > 0 {
                f.write_str(" ")?;
            }
            if slot.is_wildcard() {
                write!(f, "*{}={}", slot.id(), slot.value())?;
            } else {
                write!(f, "{}", slot.id())?;
            }
        }
        f.write_str("]")
    }
}

/// True when the combos use every card of `hand` exactly once.
pub fn covers_exactly(partition: &[Combo], hand: &[Card]) -> bool {
    let mut used = CardMask::EMPTY;
    for id in partition.iter().flat_map(|combo| combo.ids()) {
        if !used.insert(id) {
            return false;
        }
    }
    let held = CardMask::from_ids(hand.iter().map(|card| card.id));
    used == held && held.len() == hand.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::card_from_str;

    fn cards(ids: &[&str]) -> Vec<Card> {
        ids.iter().map(|id| card_from_str(id).unwrap()).collect()
    }

    #[test]
    fn cover_rejects_omission_and_reuse() {
        let hand = cards(&["3H-0", "4H-0", "5H-0", "KS-0", "KS-1", "KD-0"]);
        let run = Combo::natural(ComboKind::Run, &hand[..3]);
        let triple = Combo::natural(ComboKind::Triple, &hand[3..]);
        assert!(covers_exactly(&[run.clone(), triple.clone()], &hand));
        assert!(!covers_exactly(&[run.clone()], &hand));
        assert!(!covers_exactly(&[run.clone(), run, triple], &hand));
    }

    #[test]
    fn wildcard_slot_keeps_backing_id() {
        let joker = card_from_str("JOKER-1").unwrap();
        let slot = ComboCard::Wildcard {
            card: joker,
            assumed_value: 6,
            assumed_suit: Some(Suit::Hearts),
        };
        assert_eq!(slot.id(), joker.id);
        assert_eq!(slot.value(), 6);
        let json = serde_json::to_value(slot).unwrap();
        assert_eq!(json["type"], "wildcard");
        assert_eq!(json["card"]["id"], "JOKER-1");
        assert_eq!(json["assumed_suit"], "Hearts");
    }
}
