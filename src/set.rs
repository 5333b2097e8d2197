//! A sorted set of strings with the usual set algebra.

use std::fmt;

use crate::{
    error::{Error, InsertError, Result},
    key::{MAX_KEY_LEN, bounded_cmp},
    level_generator::Geometric,
    skiplist::SkipList,
};

/// A set of strings, iterated in order.
///
/// As with [`SkipMap`][crate::SkipMap], members are compared on at most their
/// first [`max_key_len`][SkipSet::max_key_len] bytes.
///
/// # Examples
///
/// ```
/// use skipindex::SkipSet;
///
/// let a: SkipSet = ["A", "B", "C"].into_iter().collect();
/// let b: SkipSet = ["B", "C", "D"].into_iter().collect();
///
/// let both = SkipSet::intersection(&a, &b).unwrap();
/// assert!(both.iter().eq(["B", "C"]));
/// ```
pub struct SkipSet {
    list: SkipList<String>,
    max_key_len: usize,
}

impl SkipSet {
    /// Create an empty set comparing the first 32 bytes of each member.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::with_options(MAX_KEY_LEN, Geometric::default())
    }

    /// Create an empty set comparing the first `max_key_len` bytes of each
    /// member.
    #[inline]
    #[must_use]
    pub fn with_max_key_len(max_key_len: usize) -> Self {
        Self::with_options(max_key_len, Geometric::default())
    }

    /// Create an empty set whose node levels are drawn from
    /// `level_generator`.
    #[inline]
    #[must_use]
    pub fn with_level_generator(level_generator: Geometric) -> Self {
        Self::with_options(MAX_KEY_LEN, level_generator)
    }

    fn with_options(max_key_len: usize, level_generator: Geometric) -> Self {
        SkipSet {
            list: SkipList::with_level_generator(level_generator, move |a: &String, b: &String| {
                bounded_cmp(a, b, max_key_len)
            }),
            max_key_len,
        }
    }

    /// An empty set comparing members the same way as `self`.
    fn empty_like(&self) -> Self {
        Self::with_max_key_len(self.max_key_len)
    }

    /// Add a member.
    ///
    /// # Errors
    ///
    /// [`Error::Duplicate`][crate::Error::Duplicate] if the member is already
    /// present, or [`Error::AllocationFailure`][crate::Error::AllocationFailure].
    /// The member is handed back.
    pub fn insert<S: Into<String>>(&mut self, member: S) -> Result<(), InsertError<String>> {
        self.list.insert_unique(member.into())
    }

    /// Returns `true` if `member` is in the set.
    #[inline]
    #[must_use]
    pub fn contains(&self, member: &str) -> bool {
        self.list
            .contains_by(|stored| bounded_cmp(stored, member, self.max_key_len))
    }

    /// The stored member equal to `member`.
    #[inline]
    #[must_use]
    pub fn get(&self, member: &str) -> Option<&str> {
        self.list
            .get_by(|stored| bounded_cmp(stored, member, self.max_key_len))
            .map(String::as_str)
    }

    /// Remove `member`, returning the stored string.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`][crate::Error::NotFound] if it is absent.
    pub fn remove(&mut self, member: &str) -> Result<String> {
        let max_key_len = self.max_key_len;
        self.list
            .remove_by(|stored| bounded_cmp(stored, member, max_key_len))
    }

    /// Keep only the members for which `f` returns `true`, returning how many
    /// were removed.
    #[inline]
    pub fn retain<F>(&mut self, mut f: F) -> usize
    where
        F: FnMut(&str) -> bool,
    {
        self.list.retain(|member| f(member))
    }

    /// Number of bytes of each member taking part in comparisons.
    #[inline]
    #[must_use]
    pub fn max_key_len(&self) -> usize {
        self.max_key_len
    }

    /// Number of members.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.list.len()
    }

    /// Returns `true` if the set has no members.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Remove every member.
    #[inline]
    pub fn clear(&mut self) {
        self.list.clear();
    }

    /// Iterate over the members in order.
    #[inline]
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &str> + ExactSizeIterator {
        self.list.iter().map(String::as_str)
    }

    // ///////////////////////////////////////////////
    // Set algebra
    // ///////////////////////////////////////////////
    // Each operation walks its sources once, probes the other source for
    // membership and builds a fresh set. The result compares members the same
    // way as `a`.

    /// Members of both `a` and `b`.
    ///
    /// # Errors
    ///
    /// [`Error::AllocationFailure`][crate::Error::AllocationFailure] if the
    /// result could not be built. The sources are never modified.
    pub fn intersection(a: &SkipSet, b: &SkipSet) -> Result<SkipSet> {
        let mut out = a.empty_like();
        for member in a.iter().filter(|member| b.contains(member)) {
            out.list.insert_unique(member.to_owned())?;
        }
        Ok(out)
    }

    /// Members of `a` which are not in `b`.
    ///
    /// # Errors
    ///
    /// [`Error::AllocationFailure`][crate::Error::AllocationFailure] if the
    /// result could not be built.
    ///
    /// # Examples
    ///
    /// ```
    /// use skipindex::SkipSet;
    ///
    /// let a: SkipSet = ["A", "B", "C"].into_iter().collect();
    /// let b: SkipSet = ["B", "C", "D"].into_iter().collect();
    /// assert!(SkipSet::difference(&a, &b).unwrap().iter().eq(["A"]));
    /// assert!(SkipSet::difference(&b, &a).unwrap().iter().eq(["D"]));
    /// ```
    pub fn difference(a: &SkipSet, b: &SkipSet) -> Result<SkipSet> {
        let mut out = a.empty_like();
        for member in a.iter().filter(|member| !b.contains(member)) {
            out.list.insert_unique(member.to_owned())?;
        }
        Ok(out)
    }

    /// Members of either `a` or `b`.
    ///
    /// # Errors
    ///
    /// [`Error::AllocationFailure`][crate::Error::AllocationFailure] if the
    /// result could not be built.
    pub fn union(a: &SkipSet, b: &SkipSet) -> Result<SkipSet> {
        let mut out = a.empty_like();
        for member in a.iter() {
            out.list.insert_unique(member.to_owned())?;
        }
        for member in b.iter().filter(|member| !a.contains(member)) {
            out.list.insert_unique(member.to_owned())?;
        }
        Ok(out)
    }

    /// Returns `true` if every member of `self` is in `other`.
    #[must_use]
    pub fn is_subset(&self, other: &SkipSet) -> bool {
        self.len() <= other.len() && self.iter().all(|member| other.contains(member))
    }

    /// Returns `true` if `self` and `other` have no member in common.
    #[must_use]
    pub fn is_disjoint(&self, other: &SkipSet) -> bool {
        self.iter().all(|member| !other.contains(member))
    }
}

impl Default for SkipSet {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SkipSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// Members already present are skipped.
///
/// # Panics
///
/// Panics if a node cannot be allocated.
impl<S: Into<String>> Extend<S> for SkipSet {
    #[expect(clippy::panic, reason = "Extend has no way to report allocation failure")]
    fn extend<I: IntoIterator<Item = S>>(&mut self, iterable: I) {
        for member in iterable {
            match self.insert(member).map_err(|err| err.error()) {
                Ok(()) | Err(Error::Duplicate) => {}
                Err(err) => panic!("{err}"),
            }
        }
    }
}

impl<S: Into<String>> FromIterator<S> for SkipSet {
    fn from_iter<I: IntoIterator<Item = S>>(iterable: I) -> Self {
        let mut set = SkipSet::new();
        set.extend(iterable);
        set
    }
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    use super::SkipSet;
    use crate::error::Error;

    fn set(members: &[&str]) -> SkipSet {
        members.iter().copied().collect()
    }

    fn members(set: &SkipSet) -> Vec<&str> {
        set.iter().collect()
    }

    #[test]
    fn algebra() -> Result<()> {
        let s1 = set(&["A", "B", "C"]);
        let s2 = set(&["B", "C", "D"]);

        assert_eq!(members(&SkipSet::intersection(&s1, &s2)?), ["B", "C"]);
        assert_eq!(members(&SkipSet::difference(&s1, &s2)?), ["A"]);
        assert_eq!(members(&SkipSet::union(&s1, &s2)?), ["A", "B", "C", "D"]);

        // Sources are untouched.
        assert_eq!(members(&s1), ["A", "B", "C"]);
        assert_eq!(members(&s2), ["B", "C", "D"]);
        Ok(())
    }

    #[test]
    fn algebra_with_empty() -> Result<()> {
        let empty = SkipSet::new();
        let s = set(&["x", "y"]);
        assert!(SkipSet::intersection(&s, &empty)?.is_empty());
        assert_eq!(members(&SkipSet::difference(&s, &empty)?), ["x", "y"]);
        assert!(SkipSet::difference(&empty, &s)?.is_empty());
        assert_eq!(members(&SkipSet::union(&empty, &s)?), ["x", "y"]);
        Ok(())
    }

    #[test]
    fn insert_duplicate() -> Result<()> {
        let mut s = SkipSet::new();
        s.insert("member")?;
        let err = s.insert(String::from("member")).unwrap_err();
        assert_eq!(err.error(), Error::Duplicate);
        assert_eq!(err.into_record(), "member");
        assert_eq!(s.len(), 1);
        Ok(())
    }

    #[test]
    fn extend_skips_existing_members() {
        let mut s = set(&["b", "d"]);
        s.extend(["a", "b", "c", "a", "d"]);
        assert_eq!(members(&s), ["a", "b", "c", "d"]);
        s.list.check();
    }

    #[test]
    fn remove_and_retain() -> Result<()> {
        let mut s: SkipSet = (0..20).map(|i| format!("{i:02}")).collect();
        assert_eq!(s.remove("07")?, "07");
        assert_eq!(s.remove("07"), Err(Error::NotFound));
        assert_eq!(s.retain(|m| m.ends_with('0')), 17);
        assert_eq!(members(&s), ["00", "10"]);
        assert_eq!(s.get("10"), Some("10"));
        s.list.check();
        Ok(())
    }

    #[test]
    fn debug() {
        let s = set(&["b", "a"]);
        insta::assert_snapshot!(format!("{s:?}"), @r#"{"a", "b"}"#);
    }

    proptest! {
        #[test]
        fn algebra_matches_btreeset(
            a in prop::collection::btree_set("[a-e]{1,2}", 0..12),
            b in prop::collection::btree_set("[a-e]{1,2}", 0..12),
        ) {
            let sa: SkipSet = a.iter().cloned().collect();
            let sb: SkipSet = b.iter().cloned().collect();

            let inter = SkipSet::intersection(&sa, &sb).map_err(|e| TestCaseError::fail(e.to_string()))?;
            let diff = SkipSet::difference(&sa, &sb).map_err(|e| TestCaseError::fail(e.to_string()))?;
            let union = SkipSet::union(&sa, &sb).map_err(|e| TestCaseError::fail(e.to_string()))?;

            prop_assert!(inter.iter().eq(a.intersection(&b).map(String::as_str)));
            prop_assert!(diff.iter().eq(a.difference(&b).map(String::as_str)));
            prop_assert!(union.iter().eq(a.union(&b).map(String::as_str)));
            prop_assert!(inter.is_subset(&sa));
            prop_assert!(diff.is_disjoint(&sb));
        }
    }
}
