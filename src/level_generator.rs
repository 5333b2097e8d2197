//! Skiplists use a probabilistic distribution of nodes over the internal
//! levels, whereby the lowest level (level 0) contains all the nodes, and each
//! level $n > 0$ will contain a random subset of the nodes on level `n - 1`.
//!
//! Most commonly, a geometric distribution is used whereby the chance that a
//! node occupies level $n$ is $p$ times the chance of occupying level $n-1$
//! (with $0 < p < 1$).
//!
//! The source of randomness is always owned by the generator, and the
//! generator is owned by the list it serves. Supplying a seeded generator (or
//! a custom [`LevelGenerator`]) makes the shape of a list reproducible.

pub mod geometric;

pub use geometric::{Geometric, GeometricError};

/// Number of levels used when no capacity hint is given.
pub const DEFAULT_LEVELS: usize = 16;

/// Probability that a node present at level $n$ is also present at $n + 1$.
pub const DEFAULT_P: f64 = 0.25;

// ////////////////////////////////////////////////////////////////////////////
// Level Generator
// ////////////////////////////////////////////////////////////////////////////

/// Upon the insertion of a new node in the list, the node is replicated to high
/// levels with a certain probability as determined by a [`LevelGenerator`].
pub trait LevelGenerator {
    /// The total number of levels that are assumed to exist.
    #[must_use]
    fn total(&self) -> usize;

    /// Generate a random level for a new node in the range `[0, total)`.
    ///
    /// A node at level `n` is linked into levels `0..=n`. This function must
    /// _never_ return a level greater or equal to
    /// [`total`][LevelGenerator::total], and it is called once per insertion.
    #[must_use]
    fn level(&mut self) -> usize;
}

impl<G: LevelGenerator + ?Sized> LevelGenerator for &mut G {
    #[inline]
    fn total(&self) -> usize {
        (**self).total()
    }

    #[inline]
    fn level(&mut self) -> usize {
        (**self).level()
    }
}
