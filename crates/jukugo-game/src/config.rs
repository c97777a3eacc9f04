use std::num::NonZero;

use jukugo_generator::DEFAULT_FILL_ATTEMPTS;

/// Tunables for a [`Puzzle`](crate::Puzzle).
///
/// # Examples
///
/// ```
/// use std::num::NonZero;
///
/// use jukugo_game::PuzzleConfig;
///
/// let config = PuzzleConfig::default()
///     .with_fade_step(0.1)
///     .with_refill_attempts(NonZero::new(4).unwrap());
/// assert_eq!(config.fade_step, 0.1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PuzzleConfig {
    /// How far a tile's alpha moves per tick, in `(0.0, 1.0]`.
    pub fade_step: f32,
    /// How many times a refill is attempted before an unbalanced grid is
    /// accepted.
    pub refill_attempts: NonZero<usize>,
}

impl PuzzleConfig {
    /// Default alpha change per tick.
    pub const DEFAULT_FADE_STEP: f32 = 0.05;

    /// Sets [`PuzzleConfig::fade_step`].
    #[must_use]
    pub const fn with_fade_step(mut self, fade_step: f32) -> Self {
        self.fade_step = fade_step;
        self
    }

    /// Sets [`PuzzleConfig::refill_attempts`].
    #[must_use]
    pub const fn with_refill_attempts(mut self, refill_attempts: NonZero<usize>) -> Self {
        self.refill_attempts = refill_attempts;
        self
    }

    pub(crate) fn has_valid_fade_step(&self) -> bool {
        self.fade_step > 0.0 && self.fade_step <= 1.0
    }
}

impl Default for PuzzleConfig {
    fn default() -> Self {
        Self {
            fade_step: Self::DEFAULT_FADE_STEP,
            refill_attempts: DEFAULT_FILL_ATTEMPTS,
        }
    }
}
