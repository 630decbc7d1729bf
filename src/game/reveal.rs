use crate::error::RevealError;
use crate::result::{SessionSummary, Snapshot};

use super::{Event, Game, RevealTicket};

impl<D> Game<D> {
    /// Completes the reveal started by a guess.
    ///
    /// Advances to the revealed card, or ends the session if it was the last
    /// card in the deck.
    ///
    /// # Errors
    ///
    /// Returns [`RevealError::Cancelled`] if `ticket` is not the outstanding
    /// reveal (the session was ended or replaced in the meantime). The state
    /// is unchanged on error.
    pub fn complete_reveal(&self, ticket: RevealTicket) -> Result<Snapshot, RevealError> {
        let mut guard = self.session.lock();
        let session = guard.as_mut().ok_or(RevealError::NoSession)?;

        if session.pending != Some(ticket) {
            tracing::debug!(ticket = ticket.id, "discarding cancelled reveal");
            return Err(RevealError::Cancelled);
        }

        session.round = session
            .round
            .apply(Event::RevealElapsed)
            .map_err(|_| RevealError::InvalidTransition)?;
        session.pending = None;

        let snapshot = session.round.snapshot();
        let summary = session.summary();
        drop(guard);

        tracing::debug!(
            ticket = ticket.id,
            position = snapshot.position,
            current = %snapshot.current_card,
            "reveal completed"
        );
        self.emit(&snapshot, summary.as_ref());

        Ok(snapshot)
    }

    /// Ends the running session and returns its summary.
    ///
    /// A pending reveal is cancelled. Calling this again after the session has
    /// ended returns the same summary without notifying the listener. Returns
    /// `None` if no session was ever started.
    pub fn end_session(&self) -> Option<SessionSummary> {
        let mut guard = self.session.lock();
        let session = guard.as_mut()?;

        if !session.round.is_active() {
            return session.summary();
        }

        if let Some(ticket) = session.pending.take() {
            tracing::debug!(ticket = ticket.id, "pending reveal cancelled");
        }
        session.round.end();

        let snapshot = session.round.snapshot();
        let summary = session.summary();
        drop(guard);

        self.emit(&snapshot, summary.as_ref());
        summary
    }
}
