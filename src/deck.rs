//! Deck construction, shuffling, and card comparison.

use alloc::vec::Vec;
use core::ops::Index;

#[cfg(all(not(feature = "std"), feature = "alloc"))]
use hashbrown::HashSet;
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
#[cfg(feature = "std")]
use std::collections::HashSet;

use crate::card::{Card, DECK_SIZE, Suit};
use crate::error::DeckError;

/// Outcome of comparing two cards by rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Comparison {
    /// The first card ranks above the second.
    Higher,
    /// The first card ranks below the second.
    Lower,
    /// Both cards have the same rank.
    Equal,
}

/// An ordered set of the 52 distinct cards.
///
/// A `Deck` can only be obtained from [`build_deck`], [`shuffle`], or the
/// validating [`Deck::from_cards`], so every value holds exactly one card per
/// suit and rank.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Validates `cards` and wraps them as a deck.
    ///
    /// # Errors
    ///
    /// Returns an error if there are not exactly 52 cards, a rank is outside
    /// 1..=13, or a suit/rank pair appears twice.
    pub fn from_cards(cards: Vec<Card>) -> Result<Self, DeckError> {
        if cards.len() != DECK_SIZE {
            return Err(DeckError::WrongSize { len: cards.len() });
        }

        let mut seen = HashSet::with_capacity(DECK_SIZE);
        for &card in &cards {
            if !card.has_valid_rank() {
                return Err(DeckError::InvalidRank(card));
            }
            if !seen.insert(card) {
                return Err(DeckError::DuplicateCard(card));
            }
        }

        Ok(Self { cards })
    }

    /// Returns the number of cards (always 52).
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Returns `true` if the deck holds no cards. Never the case for a valid deck.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Returns the card at `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<Card> {
        self.cards.get(index).copied()
    }

    /// Returns the cards in deck order.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Consumes the deck, returning its cards.
    #[must_use]
    pub fn into_cards(self) -> Vec<Card> {
        self.cards
    }
}

impl Index<usize> for Deck {
    type Output = Card;

    fn index(&self, index: usize) -> &Card {
        &self.cards[index]
    }
}

/// Builds the 52 canonical cards, suit-major and rank-ascending.
#[must_use]
pub fn build_deck() -> Deck {
    let mut cards = Vec::with_capacity(DECK_SIZE);

    for suit in Suit::ALL {
        for rank in Card::MIN_RANK..=Card::MAX_RANK {
            cards.push(Card::new(suit, rank));
        }
    }

    Deck { cards }
}

/// Returns a uniformly shuffled copy of `deck`.
///
/// Fisher–Yates over positions: from the last index down to 1, each position
/// is swapped with an index drawn uniformly from `0..=i`. Cards of equal rank
/// stay distinguishable.
pub fn shuffle<R: RngCore + ?Sized>(deck: &Deck, rng: &mut R) -> Deck {
    let mut cards = deck.cards.clone();
    for i in (1..cards.len()).rev() {
        let j = rng.random_range(0..=i);
        cards.swap(i, j);
    }
    Deck { cards }
}

/// Compares `a` against `b` by rank alone; suits are never consulted.
#[must_use]
pub fn compare(a: Card, b: Card) -> Comparison {
    match a.rank.cmp(&b.rank) {
        core::cmp::Ordering::Greater => Comparison::Higher,
        core::cmp::Ordering::Less => Comparison::Lower,
        core::cmp::Ordering::Equal => Comparison::Equal,
    }
}

/// Supplies freshly shuffled decks to the game engine.
///
/// The engine validates whatever is returned, so implementations are free to
/// hand back arbitrary card lists (useful for scripted tests).
pub trait DeckSource {
    /// Returns the cards for the next session, top card first.
    fn next_deck(&mut self) -> Vec<Card>;
}

impl<F> DeckSource for F
where
    F: FnMut() -> Vec<Card>,
{
    fn next_deck(&mut self) -> Vec<Card> {
        self()
    }
}

/// Deck service backed by an injectable random source.
#[derive(Debug, Clone)]
pub struct DeckService<R = ChaCha8Rng> {
    rng: R,
}

impl DeckService<ChaCha8Rng> {
    /// Creates a service shuffling with a `ChaCha8` generator seeded from `seed`.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: RngCore> DeckService<R> {
    /// Creates a service shuffling with `rng`.
    pub const fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Builds the canonical unshuffled deck.
    #[must_use]
    pub fn build_deck(&self) -> Deck {
        build_deck()
    }

    /// Shuffles `deck` with the service's random source.
    pub fn shuffle(&mut self, deck: &Deck) -> Deck {
        shuffle(deck, &mut self.rng)
    }

    /// Compares two cards by rank.
    #[must_use]
    pub fn compare(&self, a: Card, b: Card) -> Comparison {
        compare(a, b)
    }

    /// Returns a freshly built and shuffled deck.
    pub fn shuffled_deck(&mut self) -> Deck {
        shuffle(&build_deck(), &mut self.rng)
    }
}

impl<R: RngCore> DeckSource for DeckService<R> {
    fn next_deck(&mut self) -> Vec<Card> {
        self.shuffled_deck().into_cards()
    }
}
