//! Game state types.

use crate::card::Card;
use crate::result::Snapshot;

/// Phase of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum Phase {
    /// Waiting for the player to guess.
    AwaitingGuess,
    /// A guess was evaluated and the next card is shown.
    Revealing,
    /// The session has ended.
    GameOver,
}

/// The player's call about the next card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Direction {
    /// The next card ranks higher.
    Higher,
    /// The next card ranks lower.
    Lower,
}

/// Why a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum EndReason {
    /// The player ended the session.
    Ended,
    /// A wrong guess after reaching the push-your-luck streak.
    PushYourLuck,
    /// The last card was revealed.
    DeckExhausted,
}

/// An evaluated guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct GuessResult {
    /// What the player called.
    pub direction: Direction,
    /// The card that was compared against.
    pub current: Card,
    /// The card that was revealed.
    pub revealed: Card,
    /// Whether the guess was correct (ties always are).
    pub correct: bool,
    /// Points added by this guess.
    pub points: u32,
    /// Streak after this guess.
    pub streak: u32,
    /// Whether this guess ended the session.
    pub ends_session: bool,
}

/// Handle for a scheduled reveal.
///
/// The caller waits `delay_ms` and then passes the ticket back to
/// [`Game::complete_reveal`](crate::Game::complete_reveal). Ending the
/// session cancels the ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct RevealTicket {
    /// Ticket identifier, unique within the process.
    pub id: u32,
    /// How long to show the revealed card, in milliseconds.
    pub delay_ms: u32,
}

/// Returned by [`Game::submit_guess`](crate::Game::submit_guess).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuessOutcome {
    /// The evaluated guess.
    pub result: GuessResult,
    /// Ticket for the pending reveal, or `None` if the guess ended the session.
    pub ticket: Option<RevealTicket>,
    /// Session view after the guess.
    pub snapshot: Snapshot,
}
