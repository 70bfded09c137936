//! Bounded score type shared by every player stat.

/// A score in `[0, 100]`.
///
/// Every constructor clamps, so an out-of-range value cannot be represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Score(u8);

impl Score {
    /// Lowest representable score.
    pub const MIN: i32 = 0;
    /// Highest representable score.
    pub const MAX: i32 = 100;

    /// Score of zero.
    pub const ZERO: Self = Self(0);
    /// Midpoint score, used as the default for trust, clout and affinity.
    pub const NEUTRAL: Self = Self(50);

    /// Creates a score, clamping `value` into range.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn clamped(value: i32) -> Self {
        // Clamped to 0..=100, so the cast is lossless.
        Self(value.clamp(Self::MIN, Self::MAX) as u8)
    }

    /// Returns the score as an integer.
    #[must_use]
    pub fn value(self) -> i32 {
        i32::from(self.0)
    }

    /// Adds a signed delta and clamps the result.
    #[must_use]
    pub fn apply(self, delta: i32) -> Self {
        Self::clamped(self.value().saturating_add(delta))
    }
}
