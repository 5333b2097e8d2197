//! A map from closed string intervals to values.
//!
//! Entries never overlap. The ordering used to index them treats two
//! intervals as *equal* whenever they overlap, which is what makes both point
//! lookup and the rejection of overlapping insertions fall out of the ordinary
//! skiplist search:
//!
//! ```text
//! [aaa, ddd] < [fff, jjj]    since ddd < fff
//! [fff, jjj] = [ggg, zzz]    since they overlap
//! ```
//!
//! A point `k` is looked up as the degenerate interval `[k, k]`.

use std::cmp::Ordering;

use crate::{
    error::{Error, InsertError, Result},
    key::{MAX_KEY_LEN, bounded_cmp},
    level_generator::Geometric,
    skiplist::SkipList,
    skipnode::Iter,
};

/// How the stored interval `[min, max]` orders relative to the probe interval
/// `[lo, hi]`.
fn overlap_cmp(min: &str, max: &str, lo: &str, hi: &str, max_key_len: usize) -> Ordering {
    if bounded_cmp(min, hi, max_key_len) == Ordering::Greater {
        Ordering::Greater
    } else if bounded_cmp(max, lo, max_key_len) == Ordering::Less {
        Ordering::Less
    } else {
        Ordering::Equal
    }
}

/// One interval of a [`RangeMap`] and the value it maps to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry<V> {
    min: String,
    max: String,
    value: V,
}

impl<V> Entry<V> {
    /// The inclusive lower bound.
    #[inline]
    #[must_use]
    pub fn min(&self) -> &str {
        &self.min
    }

    /// The inclusive upper bound.
    #[inline]
    #[must_use]
    pub fn max(&self) -> &str {
        &self.max
    }

    /// The value mapped to by the interval.
    #[inline]
    #[must_use]
    pub fn value(&self) -> &V {
        &self.value
    }

    /// Take the value, dropping the bounds.
    #[inline]
    #[must_use]
    pub fn into_value(self) -> V {
        self.value
    }
}

/// A map from non-overlapping closed intervals `[min, max]` of strings to
/// values.
///
/// # Examples
///
/// ```
/// use skipindex::{Error, RangeMap};
///
/// let mut ranges = RangeMap::new();
/// ranges.insert("a", "d", 1).unwrap();
/// ranges.insert("f", "j", 2).unwrap();
///
/// assert_eq!(ranges.get("g").map(|entry| *entry.value()), Ok(2));
/// assert_eq!(ranges.get("e").err(), Some(Error::NotFound));
///
/// // [c, g] overlaps both entries.
/// let err = ranges.insert("c", "g", 3).unwrap_err();
/// assert_eq!(err.error(), Error::Duplicate);
/// ```
pub struct RangeMap<V> {
    list: SkipList<Entry<V>>,
    max_key_len: usize,
}

impl<V: 'static> RangeMap<V> {
    /// Create an empty map comparing the first 32 bytes of each bound.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::with_options(MAX_KEY_LEN, Geometric::default())
    }

    /// Create an empty map comparing the first `max_key_len` bytes of each
    /// bound.
    #[inline]
    #[must_use]
    pub fn with_max_key_len(max_key_len: usize) -> Self {
        Self::with_options(max_key_len, Geometric::default())
    }

    /// Create an empty map whose node levels are drawn from
    /// `level_generator`.
    #[inline]
    #[must_use]
    pub fn with_level_generator(level_generator: Geometric) -> Self {
        Self::with_options(MAX_KEY_LEN, level_generator)
    }

    fn with_options(max_key_len: usize, level_generator: Geometric) -> Self {
        RangeMap {
            list: SkipList::with_level_generator(
                level_generator,
                move |a: &Entry<V>, b: &Entry<V>| {
                    overlap_cmp(&a.min, &a.max, &b.min, &b.max, max_key_len)
                },
            ),
            max_key_len,
        }
    }
}

impl<V> RangeMap<V> {
    /// Map the closed interval `[min, max]` to `value`.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidArgument`] if `min` orders after `max`.
    /// - [`Error::Duplicate`] if the interval overlaps an existing entry.
    /// - [`Error::AllocationFailure`] if the node could not be allocated.
    ///
    /// The map is unchanged on error and the rejected entry is handed back.
    pub fn insert<K: Into<String>>(
        &mut self,
        min: K,
        max: K,
        value: V,
    ) -> Result<(), InsertError<Entry<V>>> {
        let entry = Entry {
            min: min.into(),
            max: max.into(),
            value,
        };
        if bounded_cmp(&entry.min, &entry.max, self.max_key_len) == Ordering::Greater {
            return Err(InsertError::new(
                Error::InvalidArgument("lower bound is greater than upper bound"),
                entry,
            ));
        }
        self.list.insert_unique(entry)
    }

    /// The entry whose interval contains `point`.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] if no interval contains it.
    #[inline]
    pub fn get(&self, point: &str) -> Result<&Entry<V>> {
        self.list
            .get_by(|entry| overlap_cmp(&entry.min, &entry.max, point, point, self.max_key_len))
            .ok_or(Error::NotFound)
    }

    /// Mutable access to the value of the entry containing `point`.
    ///
    /// The bounds themselves cannot be changed in place.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] if no interval contains it.
    pub fn get_mut(&mut self, point: &str) -> Result<&mut V> {
        let max_key_len = self.max_key_len;
        self.list
            .get_mut_by(|entry| overlap_cmp(&entry.min, &entry.max, point, point, max_key_len))
            .map(|entry| &mut entry.value)
            .ok_or(Error::NotFound)
    }

    /// Returns `true` if some interval contains `point`.
    #[inline]
    #[must_use]
    pub fn contains(&self, point: &str) -> bool {
        self.get(point).is_ok()
    }

    /// Iterate, in order, over the entries overlapping `[min, max]`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] if `min` orders after `max`.
    ///
    /// # Examples
    ///
    /// ```
    /// use skipindex::RangeMap;
    ///
    /// let mut ranges = RangeMap::new();
    /// for (min, max) in [("a", "d"), ("f", "j"), ("l", "o"), ("u", "v"), ("w", "z")] {
    ///     ranges.insert(min, max, ()).unwrap();
    /// }
    ///
    /// let hits: Vec<_> = ranges
    ///     .overlapping("i", "z")
    ///     .unwrap()
    ///     .map(|entry| format!("{}~{}", entry.min(), entry.max()))
    ///     .collect();
    /// assert_eq!(hits, ["f~j", "l~o", "u~v", "w~z"]);
    /// ```
    pub fn overlapping<'a>(
        &'a self,
        min: &'a str,
        max: &'a str,
    ) -> Result<impl Iterator<Item = &'a Entry<V>> + 'a> {
        let max_key_len = self.max_key_len;
        if bounded_cmp(min, max, max_key_len) == Ordering::Greater {
            return Err(Error::InvalidArgument(
                "lower bound is greater than upper bound",
            ));
        }
        Ok(self
            .list
            .range_by(move |entry| overlap_cmp(&entry.min, &entry.max, min, max, max_key_len)))
    }

    /// Remove and return the entry whose interval contains `point`.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] if no interval contains it.
    pub fn remove(&mut self, point: &str) -> Result<Entry<V>> {
        let max_key_len = self.max_key_len;
        self.list
            .remove_by(|entry| overlap_cmp(&entry.min, &entry.max, point, point, max_key_len))
    }

    /// Number of entries.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.list.len()
    }

    /// Returns `true` if there are no entries.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Remove every entry.
    #[inline]
    pub fn clear(&mut self) {
        self.list.clear();
    }

    /// Iterate over every entry in order.
    #[inline]
    pub fn iter(&self) -> Iter<'_, Entry<V>> {
        self.list.iter()
    }
}

impl<V: 'static> Default for RangeMap<V> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<V: std::fmt::Debug> std::fmt::Debug for RangeMap<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map()
            .entries(
                self.iter()
                    .map(|entry| (format!("{}~{}", entry.min, entry.max), &entry.value)),
            )
            .finish()
    }
}

impl<'a, V> IntoIterator for &'a RangeMap<V> {
    type Item = &'a Entry<V>;
    type IntoIter = Iter<'a, Entry<V>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
