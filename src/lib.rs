//! A higher-or-lower card game engine with optional `no_std` support.
//!
//! The crate provides a [`Game`] type that runs one session at a time: it
//! deals a shuffled 52-card deck, scores guesses about the next card with a
//! streak bonus, and ends the session on a miss after a long streak or when the
//! deck runs out. The rules live in the pure [`RoundState`] state machine; the
//! deck side lives in [`deck`].
//!
//! # Example
//!
//! ```
//! use hilo::{Direction, Game, GameOptions};
//!
//! let game = Game::new(GameOptions::default(), 42);
//! game.start_session("game-1", "player-1").unwrap();
//!
//! let outcome = game.submit_guess(Direction::Higher).unwrap();
//! if let Some(ticket) = outcome.ticket {
//!     // Show the revealed card for `ticket.delay_ms`, then:
//!     game.complete_reveal(ticket).unwrap();
//! }
//! ```
#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(all(not(feature = "std"), not(feature = "alloc")))]
compile_error!(
    "`std` is disabled but `alloc` feature is not enabled. Enable `alloc` or keep `std` enabled."
);

extern crate alloc;

pub mod card;
pub mod deck;
pub mod error;
pub mod game;
pub mod options;
pub mod result;
mod sync;

// Re-export main types
pub use card::{Card, Color, DECK_SIZE, Suit};
pub use deck::{Comparison, Deck, DeckService, DeckSource, build_deck, compare, shuffle};
pub use error::{DeckError, GuessError, RevealError, SessionError, TransitionError};
pub use game::{
    Direction, EndReason, Event, Game, GuessOutcome, GuessResult, Phase, RevealTicket,
    RoundState, SessionListener,
};
pub use options::GameOptions;
pub use result::{SessionSummary, Snapshot};
