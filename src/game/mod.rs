//! Game engine and session management.

use core::sync::atomic::{AtomicU32, Ordering};

use alloc::boxed::Box;
use alloc::string::String;

use crate::sync::Mutex;

use crate::deck::{Deck, DeckService, DeckSource};
use crate::error::SessionError;
use crate::options::GameOptions;
use crate::result::{SessionSummary, Snapshot};

mod guess;
mod reveal;
pub mod round;
pub mod state;

pub use round::{Event, RoundState};
pub use state::{Direction, EndReason, GuessOutcome, GuessResult, Phase, RevealTicket};

/// Next reveal ticket ID to assign, shared by every engine in the process so a
/// ticket from one engine can never match another engine's pending reveal.
static NEXT_TICKET: AtomicU32 = AtomicU32::new(1);

/// Receives session updates for rendering and record keeping.
///
/// Callbacks run with no engine lock held, so a listener may read from the
/// engine or drive it (for example end the session). Changes made from inside
/// a callback are not reported back to the same listener. A listener installed
/// from inside a callback replaces the running one once the callback returns.
pub trait SessionListener {
    /// Called after every state change.
    fn on_snapshot(&mut self, snapshot: &Snapshot);

    /// Called once when a session ends.
    fn on_session_end(&mut self, summary: &SessionSummary) {
        let _ = summary;
    }
}

struct Session {
    session_id: String,
    user_id: String,
    round: RoundState,
    pending: Option<RevealTicket>,
}

impl Session {
    fn summary(&self) -> Option<SessionSummary> {
        let end_reason = self.round.end_reason()?;
        Some(SessionSummary {
            session_id: self.session_id.clone(),
            user_id: self.user_id.clone(),
            score: self.round.score(),
            streak: self.round.streak(),
            best_streak: self.round.best_streak(),
            guesses: self.round.guesses(),
            cards_seen: self.round.guesses() as usize + 1,
            end_reason,
        })
    }
}

/// A higher-or-lower game engine driving one session at a time.
///
/// The engine requests decks from a [`DeckSource`] (by default a seeded
/// [`DeckService`]) and applies guesses, reveals, and session ends to the
/// live [`RoundState`]. Methods take `&self` so one handle can be shared by
/// input handlers and reveal timers.
pub struct Game<D = DeckService> {
    /// Game options.
    pub options: GameOptions,
    /// Where fresh decks come from.
    deck_source: Mutex<D>,
    /// The live or most recently finished session.
    session: Mutex<Option<Session>>,
    /// Presentation hook.
    listener: Mutex<Option<Box<dyn SessionListener + Send>>>,
}

impl Game<DeckService> {
    /// Creates a new game that shuffles with the given seed.
    ///
    /// # Example
    ///
    /// ```
    /// use hilo::{Game, GameOptions};
    ///
    /// let game = Game::new(GameOptions::default(), 42);
    /// let snapshot = game.start_session("game-1", "player-1").unwrap();
    /// assert_eq!(snapshot.deck_size, 52);
    /// ```
    #[must_use]
    pub fn new(options: GameOptions, seed: u64) -> Self {
        Self::with_source(options, DeckService::seeded(seed))
    }
}

impl<D> Game<D> {
    /// Creates a new game drawing decks from `source`.
    pub const fn with_source(options: GameOptions, source: D) -> Self {
        Self {
            options,
            deck_source: Mutex::new(source),
            session: Mutex::new(None),
            listener: Mutex::new(None),
        }
    }

    /// Installs a listener, replacing any previous one.
    pub fn set_listener<L>(&self, listener: L)
    where
        L: SessionListener + Send + 'static,
    {
        *self.listener.lock() = Some(Box::new(listener));
    }

    /// Removes the listener.
    pub fn clear_listener(&self) {
        *self.listener.lock() = None;
    }

    /// Returns a view of the current session.
    ///
    /// Returns `None` before the first session is started.
    pub fn snapshot(&self) -> Option<Snapshot> {
        self.session
            .with(|session| session.as_ref().map(|s| s.round.snapshot()))
    }

    /// Returns a copy of the round state.
    pub fn round(&self) -> Option<RoundState> {
        self.session
            .with(|session| session.as_ref().map(|s| s.round.clone()))
    }

    /// Returns the current phase.
    pub fn phase(&self) -> Option<Phase> {
        self.session
            .with(|session| session.as_ref().map(|s| s.round.phase()))
    }

    /// Returns whether a session is running.
    pub fn is_active(&self) -> bool {
        self.session
            .with(|session| session.as_ref().is_some_and(|s| s.round.is_active()))
    }

    /// Returns the reveal waiting to be completed, if any.
    pub fn pending_reveal(&self) -> Option<RevealTicket> {
        self.session
            .with(|session| session.as_ref().and_then(|s| s.pending))
    }

    /// Returns the summary of the last session once it has ended.
    pub fn summary(&self) -> Option<SessionSummary> {
        self.session
            .with(|session| session.as_ref().and_then(Session::summary))
    }

    /// Returns the caller-supplied session identifier.
    pub fn session_id(&self) -> Option<String> {
        self.session
            .with(|session| session.as_ref().map(|s| s.session_id.clone()))
    }

    /// Returns the caller-supplied user identifier.
    pub fn user_id(&self) -> Option<String> {
        self.session
            .with(|session| session.as_ref().map(|s| s.user_id.clone()))
    }

    fn issue_ticket(&self) -> RevealTicket {
        RevealTicket {
            id: NEXT_TICKET.fetch_add(1, Ordering::Relaxed),
            delay_ms: self.options.reveal_delay_ms,
        }
    }

    /// Notifies the listener. Must be called without the session lock held.
    fn emit(&self, snapshot: &Snapshot, summary: Option<&SessionSummary>) {
        if let Some(summary) = summary {
            tracing::info!(
                session_id = %summary.session_id,
                user_id = %summary.user_id,
                score = summary.score,
                best_streak = summary.best_streak,
                reason = ?summary.end_reason,
                "session ended"
            );
        }

        // The slot is empty while the callback runs; nested emits skip it.
        let Some(mut listener) = self.listener.lock().take() else {
            return;
        };
        listener.on_snapshot(snapshot);
        if let Some(summary) = summary {
            listener.on_session_end(summary);
        }

        let mut slot = self.listener.lock();
        if slot.is_none() {
            *slot = Some(listener);
        }
    }
}

impl<D: DeckSource> Game<D> {
    /// Starts a new session with a freshly shuffled deck.
    ///
    /// Valid before the first session and after the previous one has ended.
    /// Any outstanding reveal ticket is cancelled.
    ///
    /// # Errors
    ///
    /// Returns an error if a session is still running or the deck source
    /// returns a malformed deck. On error the previous session is kept.
    pub fn start_session(
        &self,
        session_id: impl Into<String>,
        user_id: impl Into<String>,
    ) -> Result<Snapshot, SessionError> {
        let mut session = self.session.lock();
        if session.as_ref().is_some_and(|s| s.round.is_active()) {
            tracing::warn!("start_session rejected: a session is still running");
            return Err(SessionError::InvalidTransition);
        }

        let cards = self.deck_source.with(DeckSource::next_deck);
        let deck = Deck::from_cards(cards)
            .inspect_err(|err| tracing::warn!(%err, "deck source returned a malformed deck"))?;

        let round = RoundState::new(deck, &self.options);
        let snapshot = round.snapshot();
        let session_id = session_id.into();
        let user_id = user_id.into();
        tracing::info!(
            session_id = %session_id,
            user_id = %user_id,
            first_card = %snapshot.current_card,
            "session started"
        );

        *session = Some(Session {
            session_id,
            user_id,
            round,
            pending: None,
        });
        drop(session);

        self.emit(&snapshot, None);
        Ok(snapshot)
    }
}
