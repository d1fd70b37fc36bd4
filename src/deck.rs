//! Card metadata and the 108-card two-deck shoe.

use std::fmt;
use std::str::FromStr;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::error::RulesError;

pub const NUM_RANKS: usize = 13;
pub const NUM_SUITS: usize = 4;
pub const NUM_COPIES: usize = 2;
pub const NUM_JOKERS: usize = 4;
pub const RANKED_CARDS: usize = NUM_RANKS * NUM_SUITS * NUM_COPIES;
pub const DECK_SIZE: usize = RANKED_CARDS + NUM_JOKERS;
pub const JOKER_IDS: [CardId; NUM_JOKERS] = [CardId(104), CardId(105), CardId(106), CardId(107)];

pub const SUITS: [Suit; NUM_SUITS] = [Suit::Hearts, Suit::Diamonds, Suit::Clubs, Suit::Spades];

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Suit {
    Hearts,
    Diamonds,
    Clubs,
    Spades,
    Joker,
}

impl Suit {
    fn index(self) -> Option<u8> {
        match self {
            Suit::Hearts => Some(0),
            Suit::Diamonds => Some(1),
            Suit::Clubs => Some(2),
            Suit::Spades => Some(3),
            Suit::Joker => None,
        }
    }

    fn symbol(self) -> &'static str {
        match self {
            Suit::Hearts => "H",
            Suit::Diamonds => "D",
            Suit::Clubs => "C",
            Suit::Spades => "S",
            Suit::Joker => "",
        }
    }

    fn from_symbol(symbol: &str) -> Option<Suit> {
        match symbol {
            "H" => Some(Suit::Hearts),
            "D" => Some(Suit::Diamonds),
            "C" => Some(Suit::Clubs),
            "S" => Some(Suit::Spades),
            _ => None,
        }
    }

    pub fn color(self) -> Option<Color> {
        match self {
            Suit::Hearts | Suit::Diamonds => Some(Color::Red),
            Suit::Clubs | Suit::Spades => Some(Color::Black),
            Suit::Joker => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Color {
    Red,
    Black,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Rank {
    Ace,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Joker,
}

const RANKS: [Rank; NUM_RANKS] = [
    Rank::Ace,
    Rank::Two,
    Rank::Three,
    Rank::Four,
    Rank::Five,
    Rank::Six,
    Rank::Seven,
    Rank::Eight,
    Rank::Nine,
    Rank::Ten,
    Rank::Jack,
    Rank::Queen,
    Rank::King,
];

const RANK_SYMBOLS: [&str; NUM_RANKS] = [
    "A", "2", "3", "4", "5", "6", "7", "8", "9", "10", "J", "Q", "K",
];

impl Rank {
    /// 1..=13 for ranked cards, 0 for the joker.
    pub fn value(self) -> u8 {
        match self {
            Rank::Joker => 0,
            other => RANKS.iter().position(|&r| r == other).map_or(0, |idx| idx as u8 + 1),
        }
    }

    pub fn from_value(value: u8) -> Option<Rank> {
        RANKS.get((value as usize).checked_sub(1)?).copied()
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Rank::Joker => "JOKER",
            other => RANK_SYMBOLS[other.value() as usize - 1],
        }
    }
}

/// Index of a physical card within one 108-card shoe.
///
/// `0..104` are ranked cards laid out as `copy * 52 + suit * 13 + (value - 1)`,
/// `104..108` are the fixed jokers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct CardId(u8);

impl CardId {
    pub fn new(index: u8) -> Option<CardId> {
        ((index as usize) < DECK_SIZE).then_some(CardId(index))
    }

    pub(crate) fn new_unchecked(index: u8) -> CardId {
        CardId(index)
    }

    pub fn ranked(suit: Suit, value: u8, copy: u8) -> Option<CardId> {
        let suit = suit.index()?;
        if !(1..=NUM_RANKS as u8).contains(&value) || copy as usize >= NUM_COPIES {
            return None;
        }
        Some(CardId(copy * 52 + suit * 13 + (value - 1)))
    }

    pub fn joker(n: u8) -> Option<CardId> {
        JOKER_IDS.get(n as usize).copied()
    }

    pub fn index(self) -> u8 {
        self.0
    }

    pub fn is_joker(self) -> bool {
        self.0 as usize >= RANKED_CARDS
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_joker() {
            return write!(f, "JOKER-{}", self.0 as usize - RANKED_CARDS);
        }
        let copy = self.0 / 52;
        let base = self.0 % 52;
        write!(
            f,
            "{}{}-{}",
            RANK_SYMBOLS[(base % 13) as usize],
            SUITS[(base / 13) as usize].symbol(),
            copy
        )
    }
}

impl FromStr for CardId {
    type Err = RulesError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let invalid = || RulesError::InvalidCardId(raw.to_string());
        let (face, copy) = raw.rsplit_once('-').ok_or_else(invalid)?;
        let copy: u8 = copy.parse().map_err(|_| invalid())?;
        if face == "JOKER" {
            return CardId::joker(copy).ok_or_else(invalid);
        }
        // Suit is always the single trailing letter.
        let (split, _) = face
            .char_indices()
            .last()
            .filter(|&(at, _)| at > 0)
            .ok_or_else(invalid)?;
        let (rank, suit) = face.split_at(split);
        let suit = Suit::from_symbol(suit).ok_or_else(invalid)?;
        let value = RANK_SYMBOLS
            .iter()
            .position(|&symbol| symbol == rank)
            .ok_or_else(invalid)? as u8
            + 1;
        CardId::ranked(suit, value, copy).ok_or_else(invalid)
    }
}

impl From<CardId> for String {
    fn from(id: CardId) -> Self {
        id.to_string()
    }
}

impl TryFrom<String> for CardId {
    type Error = RulesError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        raw.parse()
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "RawCard")]
pub struct Card {
    pub id: CardId,
    pub suit: Suit,
    pub rank: Rank,
    pub value: u8,
    pub color: Color,
}

/// Serialized card as read back; every field must agree with `id`.
#[derive(Deserialize)]
struct RawCard {
    id: CardId,
    suit: Suit,
    rank: Rank,
    value: u8,
    color: Color,
}

impl TryFrom<RawCard> for Card {
    type Error = RulesError;

    fn try_from(raw: RawCard) -> Result<Self, Self::Error> {
        let card = Card::from_id(raw.id);
        let recorded = (raw.suit, raw.rank, raw.value, raw.color);
        if recorded != (card.suit, card.rank, card.value, card.color) {
            return Err(RulesError::InvalidCardId(format!(
                "{} recorded as {:?} of {:?} ({}, {:?})",
                raw.id, raw.rank, raw.suit, raw.value, raw.color
            )));
        }
        Ok(card)
    }
}

impl Card {
    pub fn from_id(id: CardId) -> Card {
        if id.is_joker() {
            let n = id.0 as usize - RANKED_CARDS;
            return Card {
                id,
                suit: Suit::Joker,
                rank: Rank::Joker,
                value: 0,
                color: if n < 2 { Color::Black } else { Color::Red },
            };
        }
        let base = id.0 % 52;
        let suit = SUITS[(base / 13) as usize];
        let rank = RANKS[(base % 13) as usize];
        Card {
            id,
            suit,
            rank,
            value: rank.value(),
            color: suit.color().unwrap_or(Color::Black),
        }
    }

    pub fn is_joker(&self) -> bool {
        self.rank == Rank::Joker
    }
}

pub fn card_from_str(raw: &str) -> Result<Card, RulesError> {
    raw.parse().map(Card::from_id)
}

pub fn parse_hand<S: AsRef<str>>(raw: &[S]) -> Result<Vec<Card>, RulesError> {
    raw.iter().map(|id| card_from_str(id.as_ref())).collect()
}

pub fn create_deck() -> Vec<Card> {
    (0..DECK_SIZE as u8).map(|idx| Card::from_id(CardId(idx))).collect()
}

pub fn shuffle<R: Rng + ?Sized>(deck: &[Card], rng: &mut R) -> Vec<Card> {
    let mut cards = deck.to_vec();
    cards.shuffle(rng);
    cards
}

pub fn shuffle_with_seed(deck: &[Card], seed: u64) -> Vec<Card> {
    shuffle(deck, &mut StdRng::seed_from_u64(seed))
}
