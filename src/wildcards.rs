//! The per-round wildcard set: physical jokers plus the revealed "temporary joker" rank.

use serde::{Deserialize, Serialize};

use crate::bitset::CardMask;
use crate::deck::{Card, CardId, JOKER_IDS, NUM_COPIES, SUITS};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "Vec<CardId>", from = "Vec<CardId>")]
pub struct WildcardSet {
    mask: CardMask,
}

impl WildcardSet {
    /// Jokers plus both copies of the revealed card's value in every suit.
    /// A revealed joker adds nothing beyond the four physical jokers.
    pub fn for_round(revealed: &Card) -> Self {
        let mut mask = CardMask::from_ids(JOKER_IDS);
        if !revealed.is_joker() {
            for suit in SUITS {
                for copy in 0..NUM_COPIES as u8 {
                    if let Some(id) = CardId::ranked(suit, revealed.value, copy) {
                        mask.insert(id);
                    }
                }
            }
        }
        Self { mask }
    }

    pub fn jokers_only() -> Self {
        Self {
            mask: CardMask::from_ids(JOKER_IDS),
        }
    }

    pub fn from_ids<I: IntoIterator<Item = CardId>>(ids: I) -> Self {
        Self {
            mask: CardMask::from_ids(ids),
        }
    }

    pub fn contains(&self, id: CardId) -> bool {
        self.mask.contains(id)
    }

    pub fn is_wild(&self, card: &Card) -> bool {
        self.contains(card.id)
    }

    pub fn len(&self) -> usize {
        self.mask.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mask.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = CardId> {
        self.mask.ids()
    }

    pub fn mask(&self) -> CardMask {
        self.mask
    }
}

impl From<WildcardSet> for Vec<CardId> {
    fn from(set: WildcardSet) -> Self {
        set.ids().collect()
    }
}

impl From<Vec<CardId>> for WildcardSet {
    fn from(ids: Vec<CardId>) -> Self {
        WildcardSet::from_ids(ids)
    }
}

/// Splits a hand into `(naturals, wilds)`, both in hand order.
pub fn split_hand(hand: &[Card], wildcards: &WildcardSet) -> (Vec<Card>, Vec<Card>) {
    hand.iter().partition(|card| !wildcards.is_wild(card))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::{card_from_str, create_deck};

    #[test]
    fn revealed_rank_adds_eight_cards() {
        let revealed = card_from_str("9S-1").unwrap();
        let set = WildcardSet::for_round(&revealed);
        assert_eq!(set.len(), 12);
        let nines = create_deck().into_iter().filter(|c| c.value == 9).count();
        assert_eq!(nines, 8);
        for card in create_deck() {
            assert_eq!(set.is_wild(&card), card.is_joker() || card.value == 9);
        }
    }

    #[test]
    fn revealed_joker_keeps_only_physical_jokers() {
        let revealed = card_from_str("JOKER-3").unwrap();
        assert_eq!(WildcardSet::for_round(&revealed), WildcardSet::jokers_only());
    }

    #[test]
    fn split_preserves_order() {
        let hand: Vec<Card> = ["2H-0", "JOKER-0", "5C-1", "9D-0"]
            .iter()
            .map(|id| card_from_str(id).unwrap())
            .collect();
        let set = WildcardSet::for_round(&card_from_str("9S-0").unwrap());
        let (naturals, wilds) = split_hand(&hand, &set);
        assert_eq!(naturals, vec![hand[0], hand[2]]);
        assert_eq!(wilds, vec![hand[1], hand[3]]);
    }

    #[test]
    fn serializes_as_id_list() {
        let set = WildcardSet::jokers_only();
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, r#"["JOKER-0","JOKER-1","JOKER-2","JOKER-3"]"#);
        let back: WildcardSet = serde_json::from_str(&json).unwrap();
        assert_eq!(back, set);
    }
}
