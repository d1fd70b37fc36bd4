//! Bitset utilities for representing sets of card ids.

use crate::deck::{CardId, DECK_SIZE};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct CardMask(u128);

pub fn card_bitmask(card_id: CardId) -> u128 {
    1u128 << card_id.index()
}

impl CardMask {
    pub const EMPTY: CardMask = CardMask(0);

    pub fn from_ids<I: IntoIterator<Item = CardId>>(ids: I) -> Self {
        let mut mask = Self::EMPTY;
        for id in ids {
            mask.insert(id);
        }
        mask
    }

    pub fn bits(self) -> u128 {
        self.0
    }

    pub fn insert(&mut self, id: CardId) -> bool {
        let bit = card_bitmask(id);
        let fresh = self.0 & bit == 0;
        self.0 |= bit;
        fresh
    }

    pub fn remove(&mut self, id: CardId) {
        self.0 &= !card_bitmask(id);
    }

    pub fn contains(self, id: CardId) -> bool {
        self.0 & card_bitmask(id) != 0
    }

    pub fn overlaps(self, other: CardMask) -> bool {
        self.0 & other.0 != 0
    }

    pub fn union(self, other: CardMask) -> CardMask {
        CardMask(self.0 | other.0)
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Ids in ascending order.
    pub fn ids(self) -> impl Iterator<Item = CardId> {
        (0..DECK_SIZE as u8)
            .filter(move |&idx| (self.0 >> idx) & 1 == 1)
            .map(CardId::new_unchecked)
    }
}

/// Splits a mask into the `(hi, lo)` words handed across the binding layer.
pub fn combine_mask(mask: CardMask) -> (u64, u64) {
    (
        ((mask.0 >> 64) & ((1u128 << 64) - 1)) as u64,
        (mask.0 & ((1u128 << 64) - 1)) as u64,
    )
}

pub fn merge_words(mask_hi: u64, mask_lo: u64) -> CardMask {
    CardMask(((mask_hi as u128) << 64) | mask_lo as u128)
}
