use crate::error::GuessError;

use super::{Direction, Game, GuessOutcome};

impl<D> Game<D> {
    /// Submits a guess about the card after the current one.
    ///
    /// On success the next card is revealed. If the session continues, the
    /// returned ticket must be passed to [`Game::complete_reveal`] once the
    /// reveal delay has elapsed; until then further guesses are rejected.
    ///
    /// # Errors
    ///
    /// Returns an error if no session was started, or the session is revealing
    /// a card, is over, or has no card left. The state is unchanged
    /// on error.
    pub fn submit_guess(&self, direction: Direction) -> Result<GuessOutcome, GuessError> {
        let mut guard = self.session.lock();
        let session = guard.as_mut().ok_or(GuessError::NoSession)?;

        let result = session.round.guess(direction).inspect_err(|err| {
            tracing::warn!(?direction, phase = ?session.round.phase(), %err, "guess rejected");
        })?;

        let ticket = if session.round.is_active() {
            Some(self.issue_ticket())
        } else {
            None
        };
        session.pending = ticket;

        tracing::debug!(
            ?direction,
            current = %result.current,
            revealed = %result.revealed,
            correct = result.correct,
            points = result.points,
            streak = result.streak,
            "guess evaluated"
        );

        let snapshot = session.round.snapshot();
        let summary = session.summary();
        drop(guard);

        self.emit(&snapshot, summary.as_ref());

        Ok(GuessOutcome {
            result,
            ticket,
            snapshot,
        })
    }
}
