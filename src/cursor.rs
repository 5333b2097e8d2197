//! A cursor which can remove records while walking the list.
//!
//! Borrowing iterators hold shared references and so cannot be used to remove
//! the record they are looking at. The cursor instead advances to the next
//! node *before* unlinking the current one, so it never holds on to a node
//! which has been freed.

use std::ptr::NonNull;

use crate::{skiplist::SkipList, skipnode::SkipNode};

/// A cursor over a [`SkipList`] with removal.
///
/// The cursor sits either on a record or on the "ghost" position between the
/// last and the first record, at which [`current`][CursorMut::current] returns
/// `None`. Moving past either end lands on the ghost position, and moving
/// again wraps around.
pub struct CursorMut<'a, T, G> {
    list: &'a mut SkipList<T, G>,
    current: NonNull<SkipNode<T>>,
}

impl<'a, T, G> CursorMut<'a, T, G> {
    #[inline]
    pub(crate) fn new(list: &'a mut SkipList<T, G>, current: NonNull<SkipNode<T>>) -> Self {
        CursorMut { list, current }
    }

    /// The record under the cursor, or `None` on the ghost position.
    #[inline]
    #[must_use]
    pub fn current(&self) -> Option<&T> {
        self.list.record_at(self.current)
    }

    /// The record after the cursor, without moving.
    #[inline]
    #[must_use]
    pub fn peek_next(&self) -> Option<&T> {
        // SAFETY: `current` is a live node of the borrowed list.
        let next = unsafe { (*self.current.as_ptr()).next(0) };
        self.list.record_at(next)
    }

    /// The record before the cursor, without moving.
    #[inline]
    #[must_use]
    pub fn peek_prev(&self) -> Option<&T> {
        // SAFETY: `current` is a live node of the borrowed list.
        let prev = unsafe { (*self.current.as_ptr()).prev(0) };
        self.list.record_at(prev)
    }

    /// Move to the next record.
    #[inline]
    pub fn move_next(&mut self) {
        // SAFETY: `current` is a live node of the borrowed list.
        self.current = unsafe { (*self.current.as_ptr()).next(0) };
    }

    /// Move to the previous record.
    #[inline]
    pub fn move_prev(&mut self) {
        // SAFETY: `current` is a live node of the borrowed list.
        self.current = unsafe { (*self.current.as_ptr()).prev(0) };
    }

    /// Remove the record under the cursor and return it, leaving the cursor on
    /// the following record.
    ///
    /// Returns `None`, removing nothing, on the ghost position.
    ///
    /// # Examples
    ///
    /// ```
    /// use skipindex::SkipList;
    ///
    /// let mut skiplist = SkipList::new(|a: &i32, b: &i32| a.cmp(b));
    /// skiplist.extend(0..5);
    /// let mut cursor = skiplist.cursor_front_mut();
    /// cursor.move_next();
    /// assert_eq!(cursor.remove_current(), Some(1));
    /// assert_eq!(cursor.current(), Some(&2));
    /// assert!(skiplist.iter().eq(&[0, 2, 3, 4]));
    /// ```
    pub fn remove_current(&mut self) -> Option<T> {
        let node = self.current;
        if node == self.list.head_ptr() {
            return None;
        }
        self.move_next();
        // SAFETY: `node` is a record node of the list, and the cursor has
        // already moved off it.
        unsafe { self.list.unlink(node) }
    }
}
