//! Views handed to the presentation layer.

use alloc::string::String;

use crate::card::Card;
use crate::game::state::{EndReason, GuessResult, Phase};

/// Read-only projection of a session for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Snapshot {
    /// Current score.
    pub score: u32,
    /// Consecutive correct guesses.
    pub streak: u32,
    /// Highest streak reached this session.
    pub best_streak: u32,
    /// Index of the card to be revealed next.
    pub position: usize,
    /// Number of cards in the deck.
    pub deck_size: usize,
    /// Cards not yet revealed.
    pub cards_remaining: usize,
    /// The card being compared against.
    pub current_card: Card,
    /// The revealed card while it is on display.
    pub upcoming_card: Option<Card>,
    /// The most recent evaluated guess.
    pub last_guess: Option<GuessResult>,
    /// Current phase.
    pub phase: Phase,
    /// Whether the session is still running.
    pub active: bool,
}

/// Final record of a finished session.
///
/// Timestamps are left to the caller, which owns the clock.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct SessionSummary {
    /// Caller-supplied session identifier.
    pub session_id: String,
    /// Caller-supplied user identifier.
    pub user_id: String,
    /// Final score.
    pub score: u32,
    /// Streak when the session ended.
    pub streak: u32,
    /// Highest streak reached.
    pub best_streak: u32,
    /// Number of guesses evaluated.
    pub guesses: u32,
    /// Number of cards turned face up, including the first card.
    pub cards_seen: usize,
    /// Why the session ended.
    pub end_reason: EndReason,
}
