//! The comparator-driven skiplist underlying every collection in this crate.

use std::{cmp, cmp::Ordering, fmt, iter, marker::PhantomData, ptr::NonNull};

use smallvec::SmallVec;

use crate::{
    cursor::CursorMut,
    error::{Error, InsertError, Result},
    level_generator::{DEFAULT_LEVELS, DEFAULT_P, Geometric, LevelGenerator},
    skipnode::{self, Iter, Range, SkipNode},
};

/// Per-level predecessors recorded by a tracked search.
type Tracks<T> = SmallVec<[NonNull<SkipNode<T>>; DEFAULT_LEVELS]>;

/// Minimum levels required for a list expected to hold `n` records, given
/// that each level holds about a quarter of the level below.
#[must_use]
pub fn levels_required(n: usize) -> usize {
    let mut levels = 1;
    let mut reach: usize = 4;
    while reach < n {
        levels += 1;
        reach = reach.saturating_mul(4);
    }
    levels
}

// ////////////////////////////////////////////////////////////////////////////
// SkipList
// ////////////////////////////////////////////////////////////////////////////

/// The skiplist stores records such that they are always sorted by an
/// associated comparison function, and provides expected `O(log(n))` search,
/// insertion and removal.
///
/// Records comparing equal are never present at the same time: the list
/// offers two explicit insertion policies instead,
/// [`insert_unique`][SkipList::insert_unique] which rejects the newcomer and
/// [`upsert`][SkipList::upsert] which replaces the incumbent.
///
/// Nodes are doubly linked at every level and circular around a header which
/// holds no record, so the list can be walked in both directions and a node
/// can be unlinked without searching for its predecessors again.
///
/// The comparison function **must** be well-behaved. Specifically, given some
/// ordering function `f(a, b)`, it must satisfy the following properties:
///
/// - Be well defined: `f(a, b)` should always return the same value
/// - Be anti-symmetric: `f(a, b) == Greater` iff `f(b, a) == Less` and
///   `f(a, b) == Equal == f(b, a)`.
/// - Be transitive: If `f(a, b) == Greater` and `f(b, c) == Greater` then
///   `f(a, c) == Greater`.
///
/// Failure to satisfy these properties results in records which cannot be
/// found or duplicates which are not detected, but never in memory
/// unsafety.
pub struct SkipList<T, G = Geometric> {
    head: NonNull<SkipNode<T>>,
    len: usize,
    level_generator: G,
    compare: Box<dyn Fn(&T, &T) -> Ordering>,
    // Owns the header and, through it, every node.
    _owns: PhantomData<Box<SkipNode<T>>>,
}

// ///////////////////////////////////////////////
// Inherent methods
// ///////////////////////////////////////////////

impl<T> SkipList<T> {
    /// Create a new skiplist ordered by `compare`, with the default number of
    /// 16 levels.
    ///
    /// # Examples
    ///
    /// ```
    /// use skipindex::SkipList;
    ///
    /// let mut skiplist = SkipList::new(|a: &i64, b: &i64| a.cmp(b));
    /// skiplist.insert_unique(3).unwrap();
    /// assert_eq!(skiplist.len(), 1);
    /// ```
    #[inline]
    pub fn new<F>(compare: F) -> Self
    where
        F: 'static + Fn(&T, &T) -> Ordering,
    {
        Self::with_level_generator(Geometric::default(), compare)
    }

    /// Constructs a new, empty skiplist with the optimal number of levels for
    /// the intended capacity, ensuring that only *a few* nodes occupy the
    /// highest level.
    ///
    /// # Examples
    ///
    /// ```
    /// use skipindex::SkipList;
    ///
    /// let mut skiplist = SkipList::with_capacity(100, |a: &u32, b: &u32| a.cmp(b));
    /// skiplist.extend(0..100);
    /// assert_eq!(skiplist.len(), 100);
    /// ```
    #[inline]
    pub fn with_capacity<F>(capacity: usize, compare: F) -> Self
    where
        F: 'static + Fn(&T, &T) -> Ordering,
    {
        let lg = Geometric::new(levels_required(capacity), DEFAULT_P)
            .unwrap_or_else(|_| Geometric::default());
        Self::with_level_generator(lg, compare)
    }
}

impl<T, G: LevelGenerator> SkipList<T, G> {
    /// Create a new skiplist drawing node levels from `level_generator`.
    ///
    /// This is how a deterministic shape is obtained, for example with
    /// [`Geometric::seeded`].
    ///
    /// # Examples
    ///
    /// ```
    /// use skipindex::{Geometric, SkipList};
    ///
    /// let lg = Geometric::seeded(8, 0.25, 42).unwrap();
    /// let mut skiplist = SkipList::with_level_generator(lg, |a: &i32, b: &i32| a.cmp(b));
    /// skiplist.extend([3, 1, 2]);
    /// assert!(skiplist.iter().eq(&[1, 2, 3]));
    /// ```
    #[inline]
    pub fn with_level_generator<F>(level_generator: G, compare: F) -> Self
    where
        F: 'static + Fn(&T, &T) -> Ordering,
    {
        SkipList {
            head: SkipNode::head(level_generator.total()),
            len: 0,
            level_generator,
            compare: Box::new(compare),
            _owns: PhantomData,
        }
    }

    /// Insert the record, failing if a record comparing equal is already
    /// present.
    ///
    /// # Errors
    ///
    /// [`Error::Duplicate`] if an equal record exists, or
    /// [`Error::AllocationFailure`] if the node could not be allocated. Either
    /// way the list is unchanged and the record is handed back inside the
    /// [`InsertError`].
    ///
    /// # Examples
    ///
    /// ```
    /// use skipindex::{Error, SkipList};
    ///
    /// let mut skiplist = SkipList::new(|a: &i64, b: &i64| a.cmp(b));
    /// assert!(skiplist.insert_unique(5).is_ok());
    /// let err = skiplist.insert_unique(5).unwrap_err();
    /// assert_eq!(err.error(), Error::Duplicate);
    /// assert_eq!(err.into_record(), 5);
    /// ```
    pub fn insert_unique(&mut self, record: T) -> Result<(), InsertError<T>> {
        let (tracks, existing) = self.locate(&record);
        if existing.is_some() {
            #[cfg(feature = "tracing")]
            tracing::debug!(len = self.len, "insert: rejected duplicate");
            return Err(InsertError::new(Error::Duplicate, record));
        }

        let level = self.next_level();
        let node = SkipNode::new(record, level)
            .map_err(|(error, record)| InsertError::new(error, record))?;
        // SAFETY: the node is fresh and nothing was modified since tracking.
        unsafe { skipnode::splice(node, &tracks) };
        self.len += 1;

        #[cfg(feature = "tracing")]
        tracing::trace!(level, len = self.len, "insert");
        Ok(())
    }

    /// Insert the record, removing and returning any record comparing equal
    /// to it.
    ///
    /// # Errors
    ///
    /// [`Error::AllocationFailure`] if the node could not be allocated, in
    /// which case the list is unchanged and the old record stays in place.
    ///
    /// # Examples
    ///
    /// ```
    /// use skipindex::SkipList;
    ///
    /// let mut skiplist = SkipList::new(|a: &(u8, char), b: &(u8, char)| a.0.cmp(&b.0));
    /// assert_eq!(skiplist.upsert((1, 'a')).unwrap(), None);
    /// assert_eq!(skiplist.upsert((1, 'b')).unwrap(), Some((1, 'a')));
    /// assert_eq!(skiplist.len(), 1);
    /// ```
    pub fn upsert(&mut self, record: T) -> Result<Option<T>, InsertError<T>> {
        // The tracked predecessors all order strictly before `record`, so they
        // stay valid once the equal node is unlinked.
        let (tracks, existing) = self.locate(&record);

        // Allocate before touching the list so a failure leaves it intact.
        let level = self.next_level();
        let node = SkipNode::new(record, level)
            .map_err(|(error, record)| InsertError::new(error, record))?;

        // SAFETY: `existing` was just found in this list.
        let replaced = existing.and_then(|old| unsafe { self.unlink(old) });
        // SAFETY: the node is fresh and only the equal node was unlinked.
        unsafe { skipnode::splice(node, &tracks) };
        self.len += 1;

        #[cfg(feature = "tracing")]
        tracing::trace!(level, len = self.len, replaced = replaced.is_some(), "upsert");
        Ok(replaced)
    }

    /// Draw the level of the next node, clamped below the header's height.
    #[inline]
    fn next_level(&mut self) -> usize {
        cmp::min(self.level_generator.level(), self.height() - 1)
    }
}

impl<T, G> SkipList<T, G> {
    /// Clears the skiplist, dropping every record in order.
    ///
    /// The list is emptied before any record is dropped. If a record's
    /// destructor panics, the list stays empty and usable and the records
    /// after it are leaked.
    ///
    /// # Examples
    ///
    /// ```
    /// use skipindex::SkipList;
    ///
    /// let mut skiplist = SkipList::new(|a: &i32, b: &i32| a.cmp(b));
    /// skiplist.extend(0..10);
    /// skiplist.clear();
    /// assert!(skiplist.is_empty());
    /// ```
    pub fn clear(&mut self) {
        #[cfg(feature = "tracing")]
        tracing::trace!(len = self.len, "clear");
        let head = self.head;
        let first = self.head().next(0);
        // SAFETY: no reference into the header is alive while `self` is
        // borrowed mutably.
        unsafe { skipnode::reset(head) };
        self.len = 0;
        // SAFETY: the header no longer reaches the chain, and its last node
        // still links back to the header.
        unsafe { skipnode::free_chain(head, first) };
    }

    /// Returns the number of records in the skiplist.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the skiplist contains no records.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The number of levels of the header, which bounds the level of every
    /// node.
    #[inline]
    #[must_use]
    pub fn height(&self) -> usize {
        self.head().links.len()
    }

    /// Provides a reference to the smallest record, or `None` if the skiplist
    /// is empty.
    #[inline]
    #[must_use]
    pub fn first(&self) -> Option<&T> {
        self.record_at(self.head().next(0))
    }

    /// Provides a reference to the largest record, or `None` if the skiplist
    /// is empty.
    #[inline]
    #[must_use]
    pub fn last(&self) -> Option<&T> {
        self.record_at(self.head().prev(0))
    }

    /// Find the record comparing equal to `record`.
    ///
    /// # Examples
    ///
    /// ```
    /// use skipindex::SkipList;
    ///
    /// let mut skiplist = SkipList::new(|a: &(u8, char), b: &(u8, char)| a.0.cmp(&b.0));
    /// skiplist.insert_unique((1, 'a')).unwrap();
    /// assert_eq!(skiplist.get(&(1, '?')), Some(&(1, 'a')));
    /// assert_eq!(skiplist.get(&(2, '?')), None);
    /// ```
    #[inline]
    pub fn get(&self, record: &T) -> Option<&T> {
        let compare = &self.compare;
        self.get_by(|existing| compare(existing, record))
    }

    /// Find the record for which `probe` returns [`Equal`][Ordering::Equal].
    ///
    /// `probe` reports how a stored record orders relative to the target, in
    /// the same way as the function given to [`slice::binary_search_by`], and
    /// must agree with the list's comparison function. This allows looking up
    /// a record by key without building a whole record.
    ///
    /// # Examples
    ///
    /// ```
    /// use skipindex::SkipList;
    ///
    /// let mut skiplist = SkipList::new(|a: &(u8, String), b: &(u8, String)| a.0.cmp(&b.0));
    /// skiplist.insert_unique((7, String::from("seven"))).unwrap();
    /// let found = skiplist.get_by(|(k, _)| k.cmp(&7));
    /// assert_eq!(found.map(|(_, v)| v.as_str()), Some("seven"));
    /// ```
    #[inline]
    pub fn get_by<F>(&self, mut probe: F) -> Option<&T>
    where
        F: FnMut(&T) -> Ordering,
    {
        self.find_by(&mut probe)
            .and_then(|node| self.record_at(node))
    }

    /// Mutable access to a matching record.
    ///
    /// Callers must not change anything the comparison function looks at.
    pub(crate) fn get_mut_by<F>(&mut self, mut probe: F) -> Option<&mut T>
    where
        F: FnMut(&T) -> Ordering,
    {
        let node = self.find_by(&mut probe)?;
        // SAFETY: `node` is a record node of this list, which is mutably
        // borrowed for the lifetime of the result.
        unsafe { (*node.as_ptr()).record.as_mut() }
    }

    /// Returns `true` if a record comparing equal to `record` is present.
    #[inline]
    pub fn contains(&self, record: &T) -> bool {
        self.get(record).is_some()
    }

    /// Returns `true` if a record matching `probe` is present.
    #[inline]
    pub fn contains_by<F>(&self, probe: F) -> bool
    where
        F: FnMut(&T) -> Ordering,
    {
        self.get_by(probe).is_some()
    }

    /// Removes and returns the record comparing equal to `record`.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] if there is no such record; retrying is harmless.
    ///
    /// # Examples
    ///
    /// ```
    /// use skipindex::{Error, SkipList};
    ///
    /// let mut skiplist = SkipList::new(|a: &i32, b: &i32| a.cmp(b));
    /// skiplist.extend(0..10);
    /// assert_eq!(skiplist.remove(&4), Ok(4));
    /// assert_eq!(skiplist.remove(&4), Err(Error::NotFound));
    /// ```
    pub fn remove(&mut self, record: &T) -> Result<T> {
        let node = {
            let compare = &self.compare;
            self.find_by(&mut |existing: &T| compare(existing, record))
        };
        // SAFETY: `node` was just found in this list.
        node.and_then(|node| unsafe { self.unlink(node) })
            .ok_or(Error::NotFound)
    }

    /// Removes and returns the record matching `probe`.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] if there is no such record.
    pub fn remove_by<F>(&mut self, mut probe: F) -> Result<T>
    where
        F: FnMut(&T) -> Ordering,
    {
        let node = self.find_by(&mut probe);
        // SAFETY: `node` was just found in this list.
        node.and_then(|node| unsafe { self.unlink(node) })
            .ok_or(Error::NotFound)
    }

    /// Removes the smallest record and returns it, or `None` if the skiplist
    /// is empty.
    #[inline]
    pub fn pop_front(&mut self) -> Option<T> {
        let first = self.head().next(0);
        // SAFETY: the header is never unlinked; any other node is in the list.
        (first != self.head)
            .then(|| unsafe { self.unlink(first) })
            .flatten()
    }

    /// Removes the largest record and returns it, or `None` if the skiplist
    /// is empty.
    #[inline]
    pub fn pop_back(&mut self) -> Option<T> {
        let last = self.head().prev(0);
        // SAFETY: the header is never unlinked; any other node is in the list.
        (last != self.head)
            .then(|| unsafe { self.unlink(last) })
            .flatten()
    }

    /// Retains only the records specified by the predicate, returning how many
    /// were removed.
    ///
    /// # Examples
    ///
    /// ```
    /// use skipindex::SkipList;
    ///
    /// let mut skiplist = SkipList::new(|a: &i32, b: &i32| a.cmp(b));
    /// skiplist.extend(0..10);
    /// assert_eq!(skiplist.retain(|&x| x % 2 == 0), 5);
    /// assert!(skiplist.iter().eq(&[0, 2, 4, 6, 8]));
    /// ```
    pub fn retain<F>(&mut self, mut f: F) -> usize
    where
        F: FnMut(&T) -> bool,
    {
        let mut removed = 0;
        let mut cursor = self.cursor_front_mut();
        while let Some(record) = cursor.current() {
            if f(record) {
                cursor.move_next();
            } else {
                drop(cursor.remove_current());
                removed += 1;
            }
        }
        removed
    }

    /// Creates an iterator over the records of the skiplist, in order.
    ///
    /// # Examples
    ///
    /// ```
    /// use skipindex::SkipList;
    ///
    /// let mut skiplist = SkipList::new(|a: &i32, b: &i32| a.cmp(b));
    /// skiplist.extend([2, 0, 1]);
    /// assert!(skiplist.iter().eq(&[0, 1, 2]));
    /// assert!(skiplist.iter().rev().eq(&[2, 1, 0]));
    /// ```
    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        // SAFETY: the list is borrowed for the iterator's lifetime.
        unsafe { Iter::from_head(self.head, self.len) }
    }

    /// Bounded forward iteration.
    ///
    /// Starts at the first record for which `probe` does not return
    /// [`Less`][Ordering::Less], and yields records for as long as `probe`
    /// returns [`Equal`][Ordering::Equal]. With an ordinary key comparison
    /// this yields at most one record; with a comparison which treats a whole
    /// span as equal (such as an overlap test) it yields the whole span.
    ///
    /// # Examples
    ///
    /// ```
    /// use skipindex::SkipList;
    ///
    /// let mut skiplist = SkipList::new(|a: &i32, b: &i32| a.cmp(b));
    /// skiplist.extend(0..100);
    /// let tens: Vec<_> = skiplist
    ///     .range_by(|x| (x / 10).cmp(&4))
    ///     .copied()
    ///     .collect();
    /// assert_eq!(tens, (40..50).collect::<Vec<_>>());
    /// ```
    #[inline]
    pub fn range_by<F>(&self, mut probe: F) -> Range<'_, T, F>
    where
        F: FnMut(&T) -> Ordering,
    {
        let current = self.lower_bound(&mut probe);
        Range {
            head: self.head,
            current,
            probe,
            _marker: PhantomData,
        }
    }

    /// A cursor positioned at the smallest record.
    #[inline]
    pub fn cursor_front_mut(&mut self) -> CursorMut<'_, T, G> {
        let first = self.head().next(0);
        CursorMut::new(self, first)
    }

    /// A cursor positioned at the largest record.
    #[inline]
    pub fn cursor_back_mut(&mut self) -> CursorMut<'_, T, G> {
        let last = self.head().prev(0);
        CursorMut::new(self, last)
    }

    /// A cursor positioned at the first record for which `probe` does not
    /// return [`Less`][Ordering::Less].
    #[inline]
    pub fn seek_mut_by<F>(&mut self, mut probe: F) -> CursorMut<'_, T, G>
    where
        F: FnMut(&T) -> Ordering,
    {
        let node = self.lower_bound(&mut probe);
        CursorMut::new(self, node)
    }
}

// ///////////////////////////////////////////////
// Internal methods
// ///////////////////////////////////////////////

impl<T, G> SkipList<T, G> {
    #[inline]
    pub(crate) fn head_ptr(&self) -> NonNull<SkipNode<T>> {
        self.head
    }

    #[inline]
    fn head(&self) -> &SkipNode<T> {
        // SAFETY: the header lives as long as the list.
        unsafe { self.head.as_ref() }
    }

    /// The record of `node`, or `None` for the header.
    #[inline]
    pub(crate) fn record_at(&self, node: NonNull<SkipNode<T>>) -> Option<&T> {
        // SAFETY: every pointer handed around internally refers to a live node
        // of this list, borrowed along with `self`.
        unsafe { (*node.as_ptr()).record.as_ref() }
    }

    /// Walk down from the highest level, advancing at each level while the
    /// next record orders strictly before the target, and report the node
    /// where each level stopped.
    ///
    /// Returns the level-0 predecessor of the target's position.
    fn descend<F>(
        &self,
        probe: &mut F,
        mut on_level: impl FnMut(usize, NonNull<SkipNode<T>>),
    ) -> NonNull<SkipNode<T>>
    where
        F: FnMut(&T) -> Ordering,
    {
        let head = self.head;
        let mut current = head;
        for level in (0..self.height()).rev() {
            loop {
                // SAFETY: `current` is a live node reaching at least `level`.
                let next = unsafe { (*current.as_ptr()).next(level) };
                match self.record_at(next) {
                    Some(record) if probe(record) == Ordering::Less => current = next,
                    _ => break,
                }
            }
            on_level(level, current);
        }
        current
    }

    /// The tracked search: the predecessor of the target at every level.
    fn track<F>(&self, probe: &mut F) -> Tracks<T>
    where
        F: FnMut(&T) -> Ordering,
    {
        let mut tracks: Tracks<T> = SmallVec::from_elem(self.head, self.height());
        self.descend(probe, |level, node| tracks[level] = node);
        tracks
    }

    /// Tracked search for `record`, along with the node comparing equal to it
    /// if there is one.
    fn locate(&self, record: &T) -> (Tracks<T>, Option<NonNull<SkipNode<T>>>) {
        let compare = &self.compare;
        let tracks = self.track(&mut |existing: &T| compare(existing, record));
        // SAFETY: every track is a live node of this list.
        let candidate = unsafe { (*tracks[0].as_ptr()).next(0) };
        let existing = self
            .record_at(candidate)
            .filter(|&existing| compare(existing, record) == Ordering::Equal)
            .map(|_| candidate);
        (tracks, existing)
    }

    /// The first node which does not order before the target (possibly the
    /// header).
    #[inline]
    fn lower_bound<F>(&self, probe: &mut F) -> NonNull<SkipNode<T>>
    where
        F: FnMut(&T) -> Ordering,
    {
        let prev = self.descend(probe, |_, _| {});
        // SAFETY: `prev` is a live node.
        unsafe { (*prev.as_ptr()).next(0) }
    }

    /// The node matching the target, if any.
    fn find_by<F>(&self, probe: &mut F) -> Option<NonNull<SkipNode<T>>>
    where
        F: FnMut(&T) -> Ordering,
    {
        let candidate = self.lower_bound(probe);
        let record = self.record_at(candidate)?;
        (probe(record) == Ordering::Equal).then_some(candidate)
    }

    /// Unlink a node and hand back its record.
    ///
    /// # Safety
    ///
    /// `node` must be a record node of this list with no outstanding
    /// references into it.
    pub(crate) unsafe fn unlink(&mut self, node: NonNull<SkipNode<T>>) -> Option<T> {
        // SAFETY: guaranteed by the caller.
        let node = unsafe { skipnode::unsplice(node) };
        self.len -= 1;
        #[cfg(feature = "tracing")]
        tracing::trace!(level = node.level(), len = self.len, "remove");
        node.record
    }
}

#[cfg(test)]
impl<T, G> SkipList<T, G> {
    /// Checks the integrity of the skiplist.
    pub(crate) fn check(&self) {
        let head = self.head;
        for level in 0..self.height() {
            let mut prev = head;
            let mut node = self.head().next(level);
            let mut last: Option<&T> = None;
            let mut count = 0;
            while node != head {
                // SAFETY: all links point at live nodes.
                let current = unsafe { node.as_ref() };
                assert!(current.level() >= level, "node linked above its level");
                assert!(current.prev(level) == prev, "broken prev link");
                let record = current.record.as_ref().expect("record node without record");
                if let Some(last) = last {
                    assert_eq!((self.compare)(last, record), Ordering::Less);
                }
                last = Some(record);
                prev = node;
                node = current.next(level);
                count += 1;
            }
            assert!(self.head().prev(level) == prev, "broken header prev link");
            if level == 0 {
                assert_eq!(count, self.len);
            }
        }
    }

    /// The level of every node, in order.
    pub(crate) fn node_levels(&self) -> Vec<usize> {
        let head = self.head;
        let mut levels = Vec::with_capacity(self.len);
        let mut node = self.head().next(0);
        while node != head {
            // SAFETY: all links point at live nodes.
            let current = unsafe { node.as_ref() };
            levels.push(current.level());
            node = current.next(0);
        }
        levels
    }
}

// ///////////////////////////////////////////////
// Trait implementation
// ///////////////////////////////////////////////

impl<T, G> Drop for SkipList<T, G> {
    fn drop(&mut self) {
        self.clear();
        // SAFETY: the header holds no records and is never used again.
        drop(unsafe { Box::from_raw(self.head.as_ptr()) });
    }
}

impl<T: Ord + 'static> Default for SkipList<T> {
    #[inline]
    fn default() -> Self {
        SkipList::new(T::cmp)
    }
}

impl<T: fmt::Debug, G> fmt::Debug for SkipList<T, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Records comparing equal to one already present are dropped.
///
/// # Panics
///
/// Panics if a node cannot be allocated.
impl<T, G: LevelGenerator> Extend<T> for SkipList<T, G> {
    #[inline]
    #[expect(clippy::panic, reason = "Extend has no way to report allocation failure")]
    fn extend<I: IntoIterator<Item = T>>(&mut self, iterable: I) {
        for record in iterable {
            match self.insert_unique(record).map_err(|err| err.error()) {
                Ok(()) | Err(Error::Duplicate) => {}
                Err(err) => panic!("{err}"),
            }
        }
    }
}

impl<T, G> iter::IntoIterator for SkipList<T, G> {
    type Item = T;
    type IntoIter = IntoIter<T, G>;

    fn into_iter(self) -> IntoIter<T, G> {
        IntoIter { list: self }
    }
}

impl<'a, T, G> iter::IntoIterator for &'a SkipList<T, G> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

/// Consuming iterator, yielding records in order from either end.
pub struct IntoIter<T, G = Geometric> {
    list: SkipList<T, G>,
}

impl<T, G> Iterator for IntoIter<T, G> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        self.list.pop_front()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.list.len(), Some(self.list.len()))
    }
}

impl<T, G> DoubleEndedIterator for IntoIter<T, G> {
    #[inline]
    fn next_back(&mut self) -> Option<T> {
        self.list.pop_back()
    }
}

impl<T, G> ExactSizeIterator for IntoIter<T, G> {}

// ////////////////////////////////////////////////////////////////////////////
// Tests
// ////////////////////////////////////////////////////////////////////////////
