//! The per-session round state machine.
//!
//! [`RoundState`] is a plain value. Every transition goes through
//! [`RoundState::apply`], which returns the next state and leaves the current
//! one untouched, so the rules can be exercised without an engine or a clock.

use crate::card::Card;
use crate::deck::{Comparison, Deck, compare};
use crate::error::TransitionError;
use crate::options::GameOptions;
use crate::result::Snapshot;

use super::state::{Direction, EndReason, GuessResult, Phase};

/// Input to the round state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Event {
    /// The player calls the next card.
    Guess(Direction),
    /// The reveal delay has elapsed.
    RevealElapsed,
    /// The player ends the session.
    End,
}

/// Live state of one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundState {
    deck: Deck,
    /// Index of the card to be revealed next; `deck[position - 1]` is showing.
    position: usize,
    current_card: Card,
    upcoming_card: Option<Card>,
    score: u32,
    streak: u32,
    best_streak: u32,
    guesses: u32,
    phase: Phase,
    last_guess: Option<GuessResult>,
    end_reason: Option<EndReason>,
    streak_bonus: u32,
    push_your_luck_streak: u32,
}

impl RoundState {
    /// Starts a round on `deck`, showing its first card.
    #[must_use]
    pub fn new(deck: Deck, options: &GameOptions) -> Self {
        let current_card = deck[0];
        Self {
            deck,
            position: 1,
            current_card,
            upcoming_card: None,
            score: 0,
            streak: 0,
            best_streak: 0,
            guesses: 0,
            phase: Phase::AwaitingGuess,
            last_guess: None,
            end_reason: None,
            streak_bonus: options.streak_bonus,
            push_your_luck_streak: options.push_your_luck_streak,
        }
    }

    /// Applies `event`, returning the resulting state.
    ///
    /// `Event::End` is accepted in every phase and is a no-op once the round is
    /// over.
    ///
    /// # Errors
    ///
    /// Returns [`TransitionError::InvalidTransition`] for a guess outside
    /// `AwaitingGuess` or with no card left, and for a reveal outside
    /// `Revealing`.
    pub fn apply(&self, event: Event) -> Result<Self, TransitionError> {
        let mut next = self.clone();
        match event {
            Event::Guess(direction) => {
                next.guess(direction)?;
            }
            Event::RevealElapsed => next.complete_reveal()?,
            Event::End => next.end(),
        }
        Ok(next)
    }

    /// Evaluates a guess in place and returns its result.
    ///
    /// On error the state is left unchanged.
    ///
    /// # Errors
    ///
    /// See [`RoundState::apply`].
    pub fn guess(&mut self, direction: Direction) -> Result<GuessResult, TransitionError> {
        if self.phase != Phase::AwaitingGuess {
            return Err(TransitionError::InvalidTransition);
        }
        let next = self
            .deck
            .get(self.position)
            .ok_or(TransitionError::InvalidTransition)?;

        let correct = matches!(
            (direction, compare(next, self.current_card)),
            (Direction::Higher, Comparison::Higher)
                | (Direction::Lower, Comparison::Lower)
                | (_, Comparison::Equal)
        );

        let prior_streak = self.streak;
        let mut points = 0;
        let mut ends_session = false;
        if correct {
            self.streak += 1;
            self.best_streak = self.best_streak.max(self.streak);
            points = self.streak.saturating_mul(self.streak_bonus);
            self.score = self.score.saturating_add(points);
        } else {
            self.streak = 0;
            ends_session = prior_streak >= self.push_your_luck_streak;
        }

        let result = GuessResult {
            direction,
            current: self.current_card,
            revealed: next,
            correct,
            points,
            streak: self.streak,
            ends_session,
        };

        self.guesses += 1;
        self.upcoming_card = Some(next);
        self.last_guess = Some(result);

        if ends_session {
            self.finish(EndReason::PushYourLuck);
        } else {
            self.phase = Phase::Revealing;
        }

        Ok(result)
    }

    fn complete_reveal(&mut self) -> Result<(), TransitionError> {
        if self.phase != Phase::Revealing {
            return Err(TransitionError::InvalidTransition);
        }
        let next = self
            .upcoming_card
            .ok_or(TransitionError::InvalidTransition)?;

        if self.position + 1 >= self.deck.len() {
            self.finish(EndReason::DeckExhausted);
        } else {
            self.position += 1;
            self.current_card = next;
            self.upcoming_card = None;
            self.phase = Phase::AwaitingGuess;
        }

        Ok(())
    }

    /// Ends the round in place. Does nothing once the round is over.
    pub fn end(&mut self) {
        if self.phase != Phase::GameOver {
            self.finish(EndReason::Ended);
        }
    }

    const fn finish(&mut self, reason: EndReason) {
        self.phase = Phase::GameOver;
        self.end_reason = Some(reason);
    }

    /// Returns the deck for this round.
    #[must_use]
    pub const fn deck(&self) -> &Deck {
        &self.deck
    }

    /// Returns the index of the card to be revealed next.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Returns the card being compared against.
    #[must_use]
    pub const fn current_card(&self) -> Card {
        self.current_card
    }

    /// Returns the revealed card while it is on display.
    #[must_use]
    pub const fn upcoming_card(&self) -> Option<Card> {
        self.upcoming_card
    }

    /// Returns the score.
    #[must_use]
    pub const fn score(&self) -> u32 {
        self.score
    }

    /// Returns the number of consecutive correct guesses.
    #[must_use]
    pub const fn streak(&self) -> u32 {
        self.streak
    }

    /// Returns the highest streak reached this round.
    #[must_use]
    pub const fn best_streak(&self) -> u32 {
        self.best_streak
    }

    /// Returns the number of guesses evaluated.
    #[must_use]
    pub const fn guesses(&self) -> u32 {
        self.guesses
    }

    /// Returns the current phase.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Returns `true` until the round is over.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.phase != Phase::GameOver
    }

    /// Returns the most recent evaluated guess.
    #[must_use]
    pub const fn last_guess(&self) -> Option<GuessResult> {
        self.last_guess
    }

    /// Returns why the round ended, once it has.
    #[must_use]
    pub const fn end_reason(&self) -> Option<EndReason> {
        self.end_reason
    }

    /// Returns the number of cards not yet revealed.
    #[must_use]
    pub fn cards_remaining(&self) -> usize {
        self.deck.len() - self.position
    }

    /// Returns a read-only view for rendering.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            score: self.score,
            streak: self.streak,
            best_streak: self.best_streak,
            position: self.position,
            deck_size: self.deck.len(),
            cards_remaining: self.cards_remaining(),
            current_card: self.current_card,
            upcoming_card: self.upcoming_card,
            last_guess: self.last_guess,
            phase: self.phase,
            active: self.is_active(),
        }
    }
}
