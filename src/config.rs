//! JSON-backed rule settings and the checked entry points built on them.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::bitset::CardMask;
use crate::bonus::{extract_natural_seven_combo, has_natural_seven};
use crate::combo::Partition;
use crate::deck::Card;
use crate::error::RulesError;
use crate::validate::{validate_win_with, PartitionStrategy};
use crate::wildcards::WildcardSet;

pub const DEFAULT_HAND_SIZE: usize = 13;

fn default_hand_size() -> usize {
    DEFAULT_HAND_SIZE
}

fn default_check_hands() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulesConfig {
    #[serde(default = "default_hand_size")]
    pub hand_size: usize,
    #[serde(default)]
    pub strategy: PartitionStrategy,
    #[serde(default = "default_check_hands")]
    pub check_hands: bool,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            hand_size: DEFAULT_HAND_SIZE,
            strategy: PartitionStrategy::default(),
            check_hands: true,
        }
    }
}

impl RulesConfig {
    pub fn from_json_str(raw: &str) -> Result<Self, RulesError> {
        let config: RulesConfig = serde_json::from_str(raw)?;
        if config.hand_size == 0 {
            return Err(RulesError::Config("hand_size must be positive".to_string()));
        }
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, RulesError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }
}

/// Checked entry points for callers that hand over raw snapshots.
#[derive(Debug, Clone, Default)]
pub struct Rules {
    config: RulesConfig,
}

impl Rules {
    pub fn new(config: RulesConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RulesConfig {
        &self.config
    }

    /// Hand length must be the turn-boundary size or one more, ids unique.
    pub fn check_hand(&self, hand: &[Card]) -> Result<(), RulesError> {
        if !self.config.check_hands {
            return Ok(());
        }
        let expected = self.config.hand_size;
        if hand.len() != expected && hand.len() != expected + 1 {
            return Err(RulesError::HandSize {
                expected,
                actual: hand.len(),
            });
        }
        let mut seen = CardMask::EMPTY;
        for card in hand {
            if !seen.insert(card.id) {
                return Err(RulesError::DuplicateCard(card.id));
            }
        }
        Ok(())
    }

    /// The two bonus combos, or `None` when the hand has no natural seven or
    /// its predicated shapes overlap and cannot be isolated.
    pub fn natural_seven(&self, hand: &[Card]) -> Result<Option<Partition>, RulesError> {
        self.check_hand(hand)?;
        if !has_natural_seven(hand) {
            return Ok(None);
        }
        let combos = extract_natural_seven_combo(hand);
        Ok((!combos.is_empty()).then_some(combos))
    }

    pub fn validate_win(
        &self,
        hand: &[Card],
        wildcards: &WildcardSet,
    ) -> Result<bool, RulesError> {
        self.check_hand(hand)?;
        Ok(validate_win_with(hand, wildcards, self.config.strategy))
    }

    pub fn win_partition(
        &self,
        hand: &[Card],
        wildcards: &WildcardSet,
    ) -> Result<Partition, RulesError> {
        self.check_hand(hand)?;
        let partition = self.config.strategy.partition(hand, wildcards);
        debug!(
            target: "melds.rules",
            strategy = ?self.config.strategy,
            combos = partition.len(),
            "win partition"
        );
        Ok(partition)
    }
}
