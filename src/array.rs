//! A sparse array keyed by integer index, always iterated in index order.

use std::{fmt, iter::FusedIterator};

use crate::{
    error::{Error, InsertError, Result},
    level_generator::Geometric,
    skiplist::SkipList,
    skipnode,
};

/// An occupied index of the array.
struct Slot<V> {
    index: i64,
    value: V,
}

impl<V> Slot<V> {
    #[inline]
    fn into_pair(self) -> (i64, V) {
        (self.index, self.value)
    }
}

// ////////////////////////////////////////////////////////////////////////////
// SkipArray
// ////////////////////////////////////////////////////////////////////////////

/// A sparse array: values are stored against arbitrary `i64` indices, and
/// iteration visits them in increasing index order.
///
/// [`set`][SkipArray::set] overwrites whatever was stored at the index, while
/// [`insert`][SkipArray::insert] refuses to.
pub struct SkipArray<V> {
    list: SkipList<Slot<V>>,
}

// ///////////////////////////////////////////////
// Inherent methods
// ///////////////////////////////////////////////

impl<V: 'static> SkipArray<V> {
    /// Create an empty array.
    ///
    /// # Examples
    ///
    /// ```
    /// use skipindex::SkipArray;
    ///
    /// let mut array = SkipArray::new();
    /// array.set(10, "ten").unwrap();
    /// assert_eq!(array.get(10), Ok(&"ten"));
    /// ```
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::with_level_generator(Geometric::default())
    }

    /// Create an empty array whose node levels are drawn from
    /// `level_generator`.
    #[inline]
    #[must_use]
    pub fn with_level_generator(level_generator: Geometric) -> Self {
        SkipArray {
            list: SkipList::with_level_generator(level_generator, |a: &Slot<V>, b: &Slot<V>| {
                a.index.cmp(&b.index)
            }),
        }
    }
}

impl<V> SkipArray<V> {
    /// Store `value` at `index`, returning the value it replaces.
    ///
    /// # Errors
    ///
    /// [`Error::AllocationFailure`] if the node could not be allocated; the
    /// index and value are handed back and the previous value is untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use skipindex::SkipArray;
    ///
    /// let mut array = SkipArray::new();
    /// assert_eq!(array.set(0, "old").unwrap(), None);
    /// assert_eq!(array.set(0, "new").unwrap(), Some("old"));
    /// assert_eq!(array.len(), 1);
    /// ```
    pub fn set(&mut self, index: i64, value: V) -> Result<Option<V>, InsertError<(i64, V)>> {
        self.list
            .upsert(Slot { index, value })
            .map(|replaced| replaced.map(|slot| slot.value))
            .map_err(|err| err.map(Slot::into_pair))
    }

    /// Store `value` at `index` only if the index is vacant.
    ///
    /// # Errors
    ///
    /// [`Error::Duplicate`] if the index is occupied, or
    /// [`Error::AllocationFailure`]. The index and value are handed back.
    pub fn insert(&mut self, index: i64, value: V) -> Result<(), InsertError<(i64, V)>> {
        self.list
            .insert_unique(Slot { index, value })
            .map_err(|err| err.map(Slot::into_pair))
    }

    /// The value stored at `index`.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] if the index is vacant.
    #[inline]
    pub fn get(&self, index: i64) -> Result<&V> {
        self.list
            .get_by(|slot| slot.index.cmp(&index))
            .map(|slot| &slot.value)
            .ok_or(Error::NotFound)
    }

    /// Mutable access to the value stored at `index`.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] if the index is vacant.
    #[inline]
    pub fn get_mut(&mut self, index: i64) -> Result<&mut V> {
        self.list
            .get_mut_by(|slot| slot.index.cmp(&index))
            .map(|slot| &mut slot.value)
            .ok_or(Error::NotFound)
    }

    /// Returns `true` if a value is stored at `index`.
    #[inline]
    #[must_use]
    pub fn contains(&self, index: i64) -> bool {
        self.list.contains_by(|slot| slot.index.cmp(&index))
    }

    /// Remove and return the value stored at `index`.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] if the index is vacant.
    #[inline]
    pub fn remove(&mut self, index: i64) -> Result<V> {
        self.list
            .remove_by(|slot| slot.index.cmp(&index))
            .map(|slot| slot.value)
    }

    /// The lowest occupied index and its value.
    #[inline]
    #[must_use]
    pub fn first(&self) -> Option<(i64, &V)> {
        self.list.first().map(|slot| (slot.index, &slot.value))
    }

    /// The highest occupied index and its value.
    #[inline]
    #[must_use]
    pub fn last(&self) -> Option<(i64, &V)> {
        self.list.last().map(|slot| (slot.index, &slot.value))
    }

    /// Number of occupied indices.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.list.len()
    }

    /// Returns `true` if no index is occupied.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Remove every value.
    #[inline]
    pub fn clear(&mut self) {
        self.list.clear();
    }

    /// Iterate over the occupied indices and their values, in index order.
    #[inline]
    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            inner: self.list.iter(),
        }
    }
}

// ///////////////////////////////////////////////
// Trait implementation
// ///////////////////////////////////////////////

impl<V: 'static> Default for SkipArray<V> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<V: fmt::Debug> fmt::Debug for SkipArray<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Later values overwrite earlier ones stored at the same index.
///
/// # Panics
///
/// Panics if a node cannot be allocated.
impl<V> Extend<(i64, V)> for SkipArray<V> {
    #[expect(clippy::panic, reason = "Extend has no way to report allocation failure")]
    fn extend<I: IntoIterator<Item = (i64, V)>>(&mut self, iterable: I) {
        for (index, value) in iterable {
            if let Err(err) = self.set(index, value) {
                panic!("{}", err.error());
            }
        }
    }
}

impl<V: 'static> FromIterator<(i64, V)> for SkipArray<V> {
    fn from_iter<I: IntoIterator<Item = (i64, V)>>(iterable: I) -> Self {
        let mut array = SkipArray::new();
        array.extend(iterable);
        array
    }
}

impl<'a, V> IntoIterator for &'a SkipArray<V> {
    type Item = (i64, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Iter<'a, V> {
        self.iter()
    }
}

/// Iterator over the occupied indices of a [`SkipArray`].
pub struct Iter<'a, V> {
    inner: skipnode::Iter<'a, Slot<V>>,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (i64, &'a V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|slot| (slot.index, &slot.value))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<V> DoubleEndedIterator for Iter<'_, V> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|slot| (slot.index, &slot.value))
    }
}

impl<V> ExactSizeIterator for Iter<'_, V> {}

impl<V> FusedIterator for Iter<'_, V> {}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use pretty_assertions::assert_eq;

    use super::SkipArray;
    use crate::{error::Error, level_generator::Geometric};

    #[test]
    fn set_and_get() -> Result<()> {
        let mut array = SkipArray::with_level_generator(Geometric::seeded(16, 0.25, 1)?);
        for i in 0..10_000 {
            assert_eq!(array.set(i, format!("v{i}"))?, None);
            assert_eq!(array.get(i).map(String::as_str), Ok(format!("v{i}").as_str()));
        }
        assert_eq!(array.len(), 10_000);
        array.list.check();
        Ok(())
    }

    #[test]
    fn set_replaces() -> Result<()> {
        let mut array = SkipArray::new();
        array.set(0, String::from("test1"))?;
        assert_eq!(array.set(0, String::from("test2"))?.as_deref(), Some("test1"));
        assert_eq!(array.get(0).map(String::as_str), Ok("test2"));
        assert_eq!(array.len(), 1);
        Ok(())
    }

    #[test]
    fn insert_rejects_occupied() -> Result<()> {
        let mut array = SkipArray::new();
        array.insert(5, 'a')?;
        let err = array.insert(5, 'b').unwrap_err();
        assert_eq!(err.error(), Error::Duplicate);
        assert_eq!(err.into_record(), (5, 'b'));
        assert_eq!(array.get(5), Ok(&'a'));
        Ok(())
    }

    #[test]
    fn negative_and_extreme_indices() -> Result<()> {
        let mut array = SkipArray::new();
        for index in [i64::MAX, 0, i64::MIN, -1, 1] {
            array.insert(index, index)?;
        }
        let indices: Vec<_> = array.iter().map(|(i, _)| i).collect();
        assert_eq!(indices, vec![i64::MIN, -1, 0, 1, i64::MAX]);
        assert_eq!(array.first(), Some((i64::MIN, &i64::MIN)));
        assert_eq!(array.last(), Some((i64::MAX, &i64::MAX)));
        Ok(())
    }

    #[test]
    fn remove() -> Result<()> {
        let mut array: SkipArray<i64> = (0..10).map(|i| (i, i * i)).collect();
        assert_eq!(array.remove(3), Ok(9));
        assert_eq!(array.remove(3), Err(Error::NotFound));
        assert_eq!(array.get(3), Err(Error::NotFound));
        assert!(!array.contains(3));
        array.insert(3, -9)?;
        assert_eq!(array.get(3), Ok(&-9));
        Ok(())
    }

    #[test]
    fn get_mut() -> Result<()> {
        let mut array = SkipArray::new();
        array.set(7, 1)?;
        *array.get_mut(7)? += 41;
        assert_eq!(array.get(7), Ok(&42));
        assert_eq!(array.get_mut(8).err(), Some(Error::NotFound));
        Ok(())
    }

    #[test]
    fn extend_overwrites() {
        let mut array: SkipArray<char> = [(1, 'a'), (2, 'b')].into_iter().collect();
        array.extend([(2, 'x'), (0, 'z'), (1, 'y')]);
        assert_eq!(array.iter().collect::<Vec<_>>(), [(0, &'z'), (1, &'y'), (2, &'x')]);
        array.list.check();
    }

    #[test]
    fn iter_rev() {
        let array: SkipArray<_> = [(3, 'c'), (1, 'a'), (2, 'b')].into_iter().collect();
        let values: String = array.iter().rev().map(|(_, v)| v).collect();
        assert_eq!(values, "cba");
        insta::assert_snapshot!(format!("{array:?}"), @"{1: 'a', 2: 'b', 3: 'c'}");
    }
}
