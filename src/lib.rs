//! A skiplist is a way of storing records in such a way that they can be
//! efficiently looked up, inserted and removed, all in `O(log(n))` on average,
//! while staying sorted.
//!
//! Conceptually, a skiplist resembles something like:
//!
//! ```text
//! <head> ----------> [2] --------------------------------------------------> [9] ---------->
//! <head> ----------> [2] ------------------------------------[7] ----------> [9] ---------->
//! <head> ----------> [2] ----------> [4] ------------------> [7] ----------> [9] --> [10] ->
//! <head> --> [1] --> [2] --> [3] --> [4] --> [5] --> [6] --> [7] --> [8] --> [9] --> [10] ->
//! ```
//!
//! where each node `[x]` has references to nodes further down the list,
//! allowing a search to skip ahead. Every level is also linked backwards and
//! wraps around through the head, so the list can be walked in either
//! direction.
//!
//! [`SkipList`] is the generic index: it stores records of any type, ordered by
//! a comparison function supplied at construction. That function **must** be
//! a total order over the records stored:
//!
//! - Be well defined: `f(a, b)` should always return the same value.
//! - Be anti-symmetric: `f(a, b) == Greater` iff `f(b, a) == Less`.
//! - Be transitive: if `f(a, b) == Greater` and `f(b, c) == Greater` then
//!   `f(a, c) == Greater`.
//!
//! Lookups and removals take a *probe* instead of a whole record: a closure
//! reporting how a stored record orders relative to the target, in the manner
//! of [`slice::binary_search_by`].
//!
//! On top of the index sit four collections:
//!
//! - [`SkipArray`], a sparse array with `i64` indices;
//! - [`SkipMap`], a map with string keys;
//! - [`SkipSet`], a set of strings with intersection, difference and union;
//! - [`RangeMap`], a map from non-overlapping string intervals to values.
//!
//! With the `tracing` feature enabled, structural changes to the index are
//! reported as `trace`-level events.

mod cursor;
mod error;
pub mod key;
pub mod level_generator;
mod skipnode;

pub mod array;
pub mod map;
pub mod range_map;
pub mod set;
pub mod skiplist;

pub use array::SkipArray;
pub use cursor::CursorMut;
pub use error::{Error, InsertError, Result};
pub use level_generator::{Geometric, GeometricError, LevelGenerator};
pub use map::SkipMap;
pub use range_map::{Entry, RangeMap};
pub use set::SkipSet;
pub use skiplist::{IntoIter, SkipList};
pub use skipnode::{Iter, Range};
