//! Geometric level generator.

use rand::{Rng, SeedableRng, rngs::SmallRng};
use thiserror::Error;

use crate::level_generator::{DEFAULT_LEVELS, DEFAULT_P, LevelGenerator};

#[derive(Error, Debug, PartialEq, Eq)]
/// Errors that can occur when creating a [`Geometric`] level generator.
#[expect(
    clippy::module_name_repetitions,
    reason = "Using 'Error' would be too generic and may cause confusion."
)]
#[non_exhaustive]
pub enum GeometricError {
    /// The maximum number of levels must be non-zero.
    #[error("max must be non-zero.")]
    ZeroMax,
    /// The maximum number of levels must be less than `i32::MAX`.
    #[error("max must be less than i32::MAX.")]
    MaxTooLarge,
    /// The probability `$p$` must be in the range `$(0, 1)$`.
    #[error("p must be in (0, 1).")]
    InvalidProbability,
}

/// A level generator using a geometric distribution.
///
/// This distribution assumes that if a node is present at some level `$n$`,
/// then the probability that it is present at level `$n+1$` is some constant
/// `$p \in (0, 1)$`. This produces a geometric distribution, albeit truncated
/// at the maximum number of levels allowed.
///
/// The generator owns its random number generator, which defaults to a
/// [`SmallRng`] but can be any [`Rng`].
#[derive(Debug, Clone)]
pub struct Geometric<R = SmallRng> {
    /// The total number of levels that are assumed to exist.
    total: usize,
    /// The probability that a node is present in the next level.
    p: f64,
    /// `$p^{\text{total}}$`, cached as it is needed for every draw.
    p_total: f64,
    /// The random number generator.
    rng: R,
}

impl Geometric {
    /// Create a new geometric level generator with `total` number of levels,
    /// and `p` as the probability that a given node is present in the next
    /// level. The random number generator is seeded from the thread-local
    /// generator.
    ///
    /// # Errors
    ///
    /// `p` must be strictly between 0 and 1, and `total` must be at least 1
    /// and fit in an `i32`.
    #[inline]
    pub fn new(total: usize, p: f64) -> Result<Self, GeometricError> {
        Self::with_rng(total, p, SmallRng::from_rng(&mut rand::rng()))
    }

    /// Create a generator whose sequence of levels is fully determined by
    /// `seed`.
    ///
    /// # Errors
    ///
    /// Same as [`Geometric::new`].
    #[inline]
    pub fn seeded(total: usize, p: f64, seed: u64) -> Result<Self, GeometricError> {
        Self::with_rng(total, p, SmallRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Geometric<R> {
    /// Create a generator drawing its randomness from `rng`.
    ///
    /// # Errors
    ///
    /// Same as [`Geometric::new`].
    #[inline]
    pub fn with_rng(total: usize, p: f64, rng: R) -> Result<Self, GeometricError> {
        if total == 0 {
            return Err(GeometricError::ZeroMax);
        }
        let Ok(exponent) = i32::try_from(total) else {
            return Err(GeometricError::MaxTooLarge);
        };
        if !(0.0 < p && p < 1.0) {
            return Err(GeometricError::InvalidProbability);
        }
        Ok(Geometric {
            total,
            p,
            p_total: p.powi(exponent),
            rng,
        })
    }

    /// The probability that a node reaches the next level.
    #[inline]
    #[must_use]
    pub fn p(&self) -> f64 {
        self.p
    }
}

impl Default for Geometric {
    /// Sixteen levels with `$p = 1/4$`.
    #[inline]
    #[expect(clippy::expect_used, reason = "The default parameters are valid")]
    fn default() -> Self {
        Geometric::new(DEFAULT_LEVELS, DEFAULT_P).expect("default parameters are valid")
    }
}

impl<R: Rng> LevelGenerator for Geometric<R> {
    #[inline]
    fn total(&self) -> usize {
        self.total
    }

    /// Generate a level for a new node using a geometric distribution.
    ///
    /// This function generates a random level in the range
    /// `$[0, \text{total})$` by sampling from a uniform distribution and
    /// inverting the cumulative distribution function of the truncated
    /// geometric distribution. Since
    ///
    /// ```math
    /// P(L \geq n) = \frac{p^n - p^{t}}{1 - p^{t}}
    /// ```
    ///
    /// where `$t$` is the total number of levels, inverting it for `$n$` gives
    ///
    /// ```math
    /// n = \left\lfloor \log_p\left(1 - (1 - p^{t}) \cdot u\right) \right\rfloor
    /// ```
    ///
    /// where `$u \in [0, 1)$` is a uniformly distributed random variate.
    #[inline]
    #[expect(clippy::float_arithmetic, reason = "Computing inverse CDF")]
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "The logarithm lies in [0, total) so the cast is safe"
    )]
    #[expect(clippy::as_conversions, reason = "No other way to do this")]
    fn level(&mut self) -> usize {
        let u = self.rng.random::<f64>();
        let level = (1.0 - (1.0 - self.p_total) * u).log(self.p).floor() as usize;
        // Rounding near u = 1 may land exactly on `total`.
        level.min(self.total - 1)
    }
}

#[cfg(test)]
mod tests {
    use anyhow::{Result, bail};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::{Geometric, LevelGenerator};
    use crate::level_generator::{DEFAULT_LEVELS, DEFAULT_P, geometric::GeometricError};

    #[test]
    fn invalid_max() {
        assert_eq!(Geometric::new(0, 0.5).err(), Some(GeometricError::ZeroMax));
    }

    #[test]
    fn invalid_p() {
        assert_eq!(
            Geometric::new(1, 0.0).err(),
            Some(GeometricError::InvalidProbability)
        );
        assert_eq!(
            Geometric::new(1, 1.0).err(),
            Some(GeometricError::InvalidProbability)
        );
        assert_eq!(
            Geometric::new(1, f64::NAN).err(),
            Some(GeometricError::InvalidProbability)
        );
    }

    #[test]
    fn default_levels() -> Result<()> {
        let generator = Geometric::default();
        assert_eq!(generator.total(), DEFAULT_LEVELS);
        assert!((generator.p() - DEFAULT_P).abs() < f64::EPSILON);
        let exponent = i32::try_from(generator.total())?;
        assert!((generator.p_total - generator.p().powi(exponent)).abs() < f64::EPSILON);
        Ok(())
    }

    #[rstest]
    fn new(
        #[values(1, 2, 16, 128)] n: usize,
        #[values(0.01, 0.25, 0.5, 0.99)] p: f64,
    ) -> Result<()> {
        let mut generator = Geometric::new(n, p)?;
        assert_eq!(generator.total(), n);
        for _ in 0..100_000 {
            let level = generator.level();
            assert!((0..n).contains(&level));
        }
        // Make sure that we can produce at least one level-0 node.
        let mut found = false;
        for _ in 0..100_000 {
            if generator.level() == 0 {
                found = true;
                break;
            }
        }
        if !found {
            bail!("Failed to generate a level-0 node.");
        }
        Ok(())
    }

    #[test]
    fn seeded_is_reproducible() -> Result<()> {
        let mut a = Geometric::seeded(16, 0.25, 0x1234_abcd)?;
        let mut b = Geometric::seeded(16, 0.25, 0x1234_abcd)?;
        let a: Vec<_> = std::iter::repeat_with(|| a.level()).take(1000).collect();
        let b: Vec<_> = std::iter::repeat_with(|| b.level()).take(1000).collect();
        assert_eq!(a, b);
        Ok(())
    }

    #[test]
    #[expect(clippy::float_arithmetic, clippy::cast_precision_loss, clippy::as_conversions)]
    fn distribution() -> Result<()> {
        let mut generator = Geometric::seeded(16, 0.25, 7)?;
        let samples = 400_000;
        let mut counts = [0_usize; 16];
        for _ in 0..samples {
            counts[generator.level()] += 1;
        }
        // Each level should hold roughly a quarter of the one below it.
        for level in 1..4 {
            let ratio = counts[level] as f64 / counts[level - 1] as f64;
            assert!(
                (0.22..0.28).contains(&ratio),
                "level {level} ratio {ratio} out of bounds"
            );
        }
        Ok(())
    }
}
