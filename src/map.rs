//! A string-keyed map, iterated in key order.

use std::{fmt, iter::FusedIterator};

use crate::{
    error::{Error, InsertError, Result},
    key::{MAX_KEY_LEN, bounded_cmp},
    level_generator::Geometric,
    skiplist::SkipList,
    skipnode,
};

struct Pair<V> {
    key: String,
    value: V,
}

impl<V> Pair<V> {
    #[inline]
    fn into_tuple(self) -> (String, V) {
        (self.key, self.value)
    }
}

// ////////////////////////////////////////////////////////////////////////////
// SkipMap
// ////////////////////////////////////////////////////////////////////////////

/// A map from string keys to values, kept sorted by key.
///
/// Keys are compared on at most their first
/// [`max_key_len`][SkipMap::max_key_len] bytes (32 by default), so two keys
/// sharing that prefix address the same entry.
///
/// # Examples
///
/// ```
/// use skipindex::{Error, SkipMap};
///
/// let mut map = SkipMap::new();
/// map.insert("wtf", "world taekwondo federation").unwrap();
/// map.insert("lol", "laugh out loud").unwrap();
///
/// let err = map.insert("wtf", "what the f").unwrap_err();
/// assert_eq!(err.error(), Error::Duplicate);
/// assert_eq!(map.get("wtf"), Ok(&"world taekwondo federation"));
///
/// assert!(map.keys().eq(["lol", "wtf"]));
/// ```
pub struct SkipMap<V> {
    list: SkipList<Pair<V>>,
    max_key_len: usize,
}

// ///////////////////////////////////////////////
// Inherent methods
// ///////////////////////////////////////////////

impl<V: 'static> SkipMap<V> {
    /// Create an empty map comparing the first 32 bytes of each key.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::with_options(MAX_KEY_LEN, Geometric::default())
    }

    /// Create an empty map comparing the first `max_key_len` bytes of each
    /// key.
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
        SkipMap {
            list: SkipList::with_level_generator(level_generator, move |a: &Pair<V>, b: &Pair<V>| {
                bounded_cmp(&a.key, &b.key, max_key_len)
            }),
            max_key_len,
        }
    }
}

impl<V> SkipMap<V> {
    /// Insert a key-value pair, failing if the key is already present.
    ///
    /// # Errors
    ///
    /// [`Error::Duplicate`] if the key is present, in which case the existing
    /// value is left in place, or [`Error::AllocationFailure`]. Either way the
    /// pair is handed back.
    pub fn insert<K: Into<String>>(
        &mut self,
        key: K,
        value: V,
    ) -> Result<(), InsertError<(String, V)>> {
        self.list
            .insert_unique(Pair {
                key: key.into(),
                value,
            })
            .map_err(|err| err.map(Pair::into_tuple))
    }

    /// Insert a key-value pair, replacing and returning any value already
    /// stored against the key.
    ///
    /// # Errors
    ///
    /// [`Error::AllocationFailure`]; the pair is handed back and the map is
    /// unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use skipindex::SkipMap;
    ///
    /// let mut map = SkipMap::new();
    /// assert_eq!(map.upsert("key", 1).unwrap(), None);
    /// assert_eq!(map.upsert("key", 2).unwrap(), Some(1));
    /// assert_eq!(map.get("key"), Ok(&2));
    /// ```
    pub fn upsert<K: Into<String>>(
        &mut self,
        key: K,
        value: V,
    ) -> Result<Option<V>, InsertError<(String, V)>> {
        self.list
            .upsert(Pair {
                key: key.into(),
                value,
            })
            .map(|replaced| replaced.map(|pair| pair.value))
            .map_err(|err| err.map(Pair::into_tuple))
    }

    /// The value stored against `key`.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] if the key is absent.
    #[inline]
    pub fn get(&self, key: &str) -> Result<&V> {
        self.get_key_value(key).map(|(_, value)| value)
    }

    /// The stored key and value matching `key`.
    ///
    /// The stored key may differ from `key` beyond the compared prefix.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] if the key is absent.
    pub fn get_key_value(&self, key: &str) -> Result<(&str, &V)> {
        let max_key_len = self.max_key_len;
        self.list
            .get_by(|pair| bounded_cmp(&pair.key, key, max_key_len))
            .map(|pair| (pair.key.as_str(), &pair.value))
            .ok_or(Error::NotFound)
    }

    /// Mutable access to the value stored against `key`.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] if the key is absent.
    pub fn get_mut(&mut self, key: &str) -> Result<&mut V> {
        let max_key_len = self.max_key_len;
        self.list
            .get_mut_by(|pair| bounded_cmp(&pair.key, key, max_key_len))
            .map(|pair| &mut pair.value)
            .ok_or(Error::NotFound)
    }

    /// Returns `true` if the map holds `key`.
    #[inline]
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.get_key_value(key).is_ok()
    }

    /// Remove `key`, returning its value.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] if the key is absent.
    #[inline]
    pub fn remove(&mut self, key: &str) -> Result<V> {
        self.remove_entry(key).map(|(_, value)| value)
    }

    /// Remove `key`, returning the stored key and its value.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] if the key is absent.
    pub fn remove_entry(&mut self, key: &str) -> Result<(String, V)> {
        let max_key_len = self.max_key_len;
        self.list
            .remove_by(|pair| bounded_cmp(&pair.key, key, max_key_len))
            .map(Pair::into_tuple)
    }

    /// Number of bytes of each key taking part in comparisons.
    #[inline]
    #[must_use]
    pub fn max_key_len(&self) -> usize {
        self.max_key_len
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

    /// Iterate over the entries in key order.
    #[inline]
    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            inner: self.list.iter(),
        }
    }

    /// Iterate over the keys in order.
    #[inline]
    pub fn keys(&self) -> impl DoubleEndedIterator<Item = &str> + ExactSizeIterator {
        self.iter().map(|(key, _)| key)
    }

    /// Iterate over the values in key order.
    #[inline]
    pub fn values(&self) -> impl DoubleEndedIterator<Item = &V> + ExactSizeIterator {
        self.iter().map(|(_, value)| value)
    }
}

// ///////////////////////////////////////////////
// Trait implementation
// ///////////////////////////////////////////////

impl<V: 'static> Default for SkipMap<V> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<V: fmt::Debug> fmt::Debug for SkipMap<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Later values replace earlier ones stored against the same key.
///
/// # Panics
///
/// Panics if a node cannot be allocated.
impl<K: Into<String>, V> Extend<(K, V)> for SkipMap<V> {
    #[expect(clippy::panic, reason = "Extend has no way to report allocation failure")]
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iterable: I) {
        for (key, value) in iterable {
            if let Err(err) = self.upsert(key, value) {
                panic!("{}", err.error());
            }
        }
    }
}

impl<K: Into<String>, V: 'static> FromIterator<(K, V)> for SkipMap<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iterable: I) -> Self {
        let mut map = SkipMap::new();
        map.extend(iterable);
        map
    }
}

impl<'a, V> IntoIterator for &'a SkipMap<V> {
    type Item = (&'a str, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Iter<'a, V> {
        self.iter()
    }
}

/// Iterator over the entries of a [`SkipMap`].
pub struct Iter<'a, V> {
    inner: skipnode::Iter<'a, Pair<V>>,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .next()
            .map(|pair| (pair.key.as_str(), &pair.value))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<V> DoubleEndedIterator for Iter<'_, V> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner
            .next_back()
            .map(|pair| (pair.key.as_str(), &pair.value))
    }
}

impl<V> ExactSizeIterator for Iter<'_, V> {}

impl<V> FusedIterator for Iter<'_, V> {}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use pretty_assertions::assert_eq;

    use super::SkipMap;
    use crate::{error::Error, level_generator::Geometric};

    #[test]
    fn duplicate_keeps_existing() -> Result<()> {
        let mut map = SkipMap::new();
        map.insert("wtf", "world taekwondo federation")?;
        map.insert("lol", "laugh out loud")?;
        map.insert("sb", "small business")?;

        let err = map.insert("wtf", "what the fudge").unwrap_err();
        assert_eq!(err.error(), Error::Duplicate);
        assert_eq!(err.record().1, "what the fudge");
        assert_eq!(map.get("wtf"), Ok(&"world taekwondo federation"));
        assert_eq!(map.len(), 3);

        assert_eq!(map.get("lol"), Ok(&"laugh out loud"));
        assert_eq!(map.get("sb"), Ok(&"small business"));
        assert_eq!(map.get("omg"), Err(Error::NotFound));
        Ok(())
    }

    #[test]
    fn upsert_replaces() -> Result<()> {
        let mut map = SkipMap::new();
        assert_eq!(map.upsert("a", 1)?, None);
        assert_eq!(map.upsert("a", 2)?, Some(1));
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("a"), Ok(&2));
        Ok(())
    }

    #[test]
    fn extend_replaces() {
        let mut map: SkipMap<u8> = [("a", 1), ("b", 2)].into_iter().collect();
        map.extend([("b", 20), ("c", 30), ("a", 10)]);
        assert!(map.iter().eq([("a", &10), ("b", &20), ("c", &30)]));
        map.list.check();
    }

    #[test]
    fn remove() -> Result<()> {
        let mut map: SkipMap<usize> = (0..100).map(|i| (format!("key{i:03}"), i)).collect();
        assert_eq!(map.remove("key042"), Ok(42));
        assert_eq!(map.remove("key042"), Err(Error::NotFound));
        assert!(!map.contains_key("key042"));
        assert_eq!(map.len(), 99);
        map.insert("key042", 4200)?;
        assert_eq!(map.remove_entry("key042"), Ok((String::from("key042"), 4200)));
        map.list.check();
        Ok(())
    }

    #[test]
    fn ordered() -> Result<()> {
        let mut map = SkipMap::with_level_generator(Geometric::seeded(8, 0.5, 3)?);
        for key in ["pear", "apple", "fig", "banana", "cherry"] {
            map.insert(key, key.len())?;
        }
        assert!(map.keys().eq(["apple", "banana", "cherry", "fig", "pear"]));
        assert!(map.values().rev().copied().eq([4, 3, 6, 6, 5]));
        insta::assert_snapshot!(
            format!("{map:?}"),
            @r#"{"apple": 5, "banana": 6, "cherry": 6, "fig": 3, "pear": 4}"#
        );
        Ok(())
    }

    #[test]
    fn bounded_keys() -> Result<()> {
        let mut map = SkipMap::with_max_key_len(4);
        assert_eq!(map.max_key_len(), 4);
        map.insert("prefix-one", 1)?;
        assert_eq!(
            map.insert("prefix-two", 2).unwrap_err().error(),
            Error::Duplicate
        );
        assert_eq!(map.get_key_value("pref"), Ok(("prefix-one", &1)));
        *map.get_mut("prefixes")? = 10;
        assert_eq!(map.get("prefix-one"), Ok(&10));
        Ok(())
    }

    #[test]
    fn long_keys_compare_on_prefix() -> Result<()> {
        let mut map = SkipMap::new();
        let base = "k".repeat(32);
        map.insert(format!("{base}1"), 1)?;
        assert_eq!(map.get(&format!("{base}2")), Ok(&1));
        Ok(())
    }
}
