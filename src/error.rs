//! Error types for game operations.

use thiserror::Error;

use crate::card::Card;

/// Reasons a card list is not a valid deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DeckError {
    /// The deck does not hold exactly 52 cards.
    #[error("deck has {len} cards, expected 52")]
    WrongSize {
        /// Number of cards supplied.
        len: usize,
    },
    /// A card rank is outside 1..=13.
    #[error("card {0:?} has a rank outside 1..=13")]
    InvalidRank(Card),
    /// The same suit and rank appear more than once.
    #[error("card {0} appears more than once")]
    DuplicateCard(Card),
}

/// Errors from the pure round state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TransitionError {
    /// The event is not accepted in the current phase, or no card is left
    /// to reveal.
    #[error("invalid transition for the current phase")]
    InvalidTransition,
}

/// Errors that can occur when starting a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SessionError {
    /// A session is still in progress.
    #[error("a session is still in progress")]
    InvalidTransition,
    /// The deck source returned a malformed deck.
    #[error("malformed deck: {0}")]
    Deck(#[from] DeckError),
}

/// Errors that can occur when submitting a guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GuessError {
    /// No session has been started.
    #[error("no session has been started")]
    NoSession,
    /// The session is revealing a card, is over, or has no card left.
    #[error("invalid game state for guessing")]
    InvalidTransition,
}

impl From<TransitionError> for GuessError {
    fn from(err: TransitionError) -> Self {
        match err {
            TransitionError::InvalidTransition => Self::InvalidTransition,
        }
    }
}

/// Errors that can occur when completing a reveal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RevealError {
    /// No session has been started.
    #[error("no session has been started")]
    NoSession,
    /// No reveal is pending.
    #[error("invalid game state for completing a reveal")]
    InvalidTransition,
    /// The ticket was cancelled by ending the session or superseded.
    #[error("reveal was cancelled")]
    Cancelled,
}
