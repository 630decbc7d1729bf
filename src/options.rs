//! Game configuration options.

/// Configuration options for a higher-or-lower game.
///
/// Use the builder pattern to customize options:
///
/// ```
/// use hilo::GameOptions;
///
/// let options = GameOptions::default()
///     .with_reveal_delay_ms(1500)
///     .with_streak_bonus(5)
///     .with_push_your_luck_streak(4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameOptions {
    /// How long the presentation layer should show a revealed card before
    /// completing the reveal, in milliseconds.
    pub reveal_delay_ms: u32,
    /// Points per streak step. A correct guess scores `new_streak * streak_bonus`.
    pub streak_bonus: u32,
    /// Streak at or above which a wrong guess ends the session.
    pub push_your_luck_streak: u32,
}

impl Default for GameOptions {
    fn default() -> Self {
        Self {
            reveal_delay_ms: 2000,
            streak_bonus: 10,
            push_your_luck_streak: 3,
        }
    }
}

impl GameOptions {
    /// Sets the reveal delay.
    ///
    /// # Example
    ///
    /// ```
    /// use hilo::GameOptions;
    ///
    /// let options = GameOptions::default().with_reveal_delay_ms(500);
    /// assert_eq!(options.reveal_delay_ms, 500);
    /// ```
    #[must_use]
    pub const fn with_reveal_delay_ms(mut self, delay_ms: u32) -> Self {
        self.reveal_delay_ms = delay_ms;
        self
    }

    /// Sets the points awarded per streak step.
    ///
    /// # Example
    ///
    /// ```
    /// use hilo::GameOptions;
    ///
    /// let options = GameOptions::default().with_streak_bonus(25);
    /// assert_eq!(options.streak_bonus, 25);
    /// ```
    #[must_use]
    pub const fn with_streak_bonus(mut self, bonus: u32) -> Self {
        self.streak_bonus = bonus;
        self
    }

    /// Sets the streak at which a miss ends the session.
    ///
    /// # Example
    ///
    /// ```
    /// use hilo::GameOptions;
    ///
    /// let options = GameOptions::default().with_push_your_luck_streak(5);
    /// assert_eq!(options.push_your_luck_streak, 5);
    /// ```
    #[must_use]
    pub const fn with_push_your_luck_streak(mut self, streak: u32) -> Self {
        self.push_your_luck_streak = streak;
        self
    }
}
