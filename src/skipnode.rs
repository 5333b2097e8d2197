//! Nodes and the borrowing iterators which walk them.

use std::cmp::Ordering;
use std::iter::FusedIterator;
use std::marker::PhantomData;
use std::ptr::NonNull;

use crate::error::{Error, Result};

// ////////////////////////////////////////////////////////////////////////////
// SkipNode
// ////////////////////////////////////////////////////////////////////////////

/// The predecessor and successor of a node at one level.
pub(crate) struct Link<T> {
    pub(crate) prev: NonNull<SkipNode<T>>,
    pub(crate) next: NonNull<SkipNode<T>>,
}

impl<T> Clone for Link<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Link<T> {}

/// SkipNodes make up the SkipList. The record is stored inline, directly after
/// the links, so each entry costs a single allocation.
///
/// The node has a `level` which corresponds to how 'high' the node reaches: a
/// node of level `n` has `n + 1` links, one per level `0..=n`, and the level
/// never changes once the node is linked in.
///
/// Links are circular. The header node (which has no record) is both the
/// predecessor of the first node and the successor of the last node at every
/// level, so a link is never null.
pub(crate) struct SkipNode<T> {
    // Only `None` for the header.
    pub(crate) record: Option<T>,
    // This vector *must* be of length `level + 1`.
    pub(crate) links: Vec<Link<T>>,
}

impl<T> SkipNode<T> {
    /// Allocate a header with `total` levels, every link pointing back at
    /// itself.
    pub(crate) fn head(total: usize) -> NonNull<Self> {
        let head = NonNull::from(Box::leak(Box::new(SkipNode {
            record: None,
            links: Vec::with_capacity(total),
        })));
        // SAFETY: `head` was just leaked from a box and nothing else refers to
        // it yet.
        unsafe {
            (&mut (*head.as_ptr()).links).resize(
                total,
                Link {
                    prev: head,
                    next: head,
                },
            );
        }
        head
    }

    /// Allocate an unlinked node of the given level holding `record`.
    ///
    /// The link array is reserved fallibly; on failure the record is given
    /// back untouched.
    pub(crate) fn new(record: T, level: usize) -> Result<NonNull<Self>, (Error, T)> {
        let mut links = Vec::new();
        if links.try_reserve_exact(level + 1).is_err() {
            return Err((Error::AllocationFailure, record));
        }
        let dangling = Link {
            prev: NonNull::dangling(),
            next: NonNull::dangling(),
        };
        links.resize(level + 1, dangling);
        Ok(NonNull::from(Box::leak(Box::new(SkipNode {
            record: Some(record),
            links,
        }))))
    }

    /// How high the node reaches.
    #[inline]
    pub(crate) fn level(&self) -> usize {
        self.links.len() - 1
    }

    #[inline]
    pub(crate) fn next(&self, level: usize) -> NonNull<Self> {
        self.links[level].next
    }

    #[inline]
    pub(crate) fn prev(&self, level: usize) -> NonNull<Self> {
        self.links[level].prev
    }
}

/// A raw pointer to the link of `node` at `level`.
///
/// Links are only ever written through these pointers, one at a time, since
/// the nodes on either side of a link may be the same node.
///
/// # Safety
///
/// `node` must be live and reach at least `level`, and no reference into its
/// links may be alive.
#[inline]
unsafe fn link<T>(node: NonNull<SkipNode<T>>, level: usize) -> *mut Link<T> {
    // SAFETY: the caller guarantees `node` is live and `level` is in bounds.
    unsafe {
        let links = &mut (*node.as_ptr()).links;
        debug_assert!(level < links.len());
        links.as_mut_ptr().add(level)
    }
}

/// Link `node` after `prev` at every level of `node`, using `tracks[level]` as
/// the predecessor at each level.
///
/// # Safety
///
/// `node` must be a freshly allocated, unlinked node, and every pointer in
/// `tracks` must refer to a live node of the same list reaching at least the
/// level it is used at.
pub(crate) unsafe fn splice<T>(node: NonNull<SkipNode<T>>, tracks: &[NonNull<SkipNode<T>>]) {
    // SAFETY: the caller guarantees all pointers are live. `prev` and `next`
    // may be the same node, so each write goes through its own link pointer.
    unsafe {
        let level = (*node.as_ptr()).level();
        for (i, &prev) in tracks.iter().enumerate().take(level + 1) {
            let next = (*link(prev, i)).next;
            link(node, i).write(Link { prev, next });
            (*link(prev, i)).next = node;
            (*link(next, i)).prev = node;
        }
    }
}

/// Unlink `node` from every level it reaches, using its own predecessor
/// links, and take back ownership of it.
///
/// # Safety
///
/// `node` must be a linked, non-header node, and no reference into it may be
/// alive.
pub(crate) unsafe fn unsplice<T>(node: NonNull<SkipNode<T>>) -> Box<SkipNode<T>> {
    // SAFETY: the caller guarantees `node` is linked, so all of its neighbours
    // are live nodes of the same list.
    unsafe {
        let level = (*node.as_ptr()).level();
        for i in 0..=level {
            let Link { prev, next } = link(node, i).read();
            (*link(prev, i)).next = next;
            (*link(next, i)).prev = prev;
        }
        Box::from_raw(node.as_ptr())
    }
}

/// Point every link of the header back at itself, detaching all record
/// nodes at once. The detached nodes keep their own links.
///
/// # Safety
///
/// `head` must be a live header, and no reference into it may be alive.
pub(crate) unsafe fn reset<T>(head: NonNull<SkipNode<T>>) {
    // SAFETY: the caller guarantees `head` is live and unborrowed.
    unsafe {
        for slot in &mut (*head.as_ptr()).links {
            *slot = Link {
                prev: head,
                next: head,
            };
        }
    }
}

/// Free a chain of detached record nodes, following level 0 from `first`
/// until it comes back round to `head`.
///
/// A panicking record destructor leaks the rest of the chain.
///
/// # Safety
///
/// Every node from `first` up to `head` must be a record node that nothing
/// else can reach, and `head` must be where the chain ends.
pub(crate) unsafe fn free_chain<T>(head: NonNull<SkipNode<T>>, first: NonNull<SkipNode<T>>) {
    let mut node = first;
    while node != head {
        // SAFETY: `node` is an unreachable record node; `next` is read before
        // it is freed.
        unsafe {
            let next = (*node.as_ptr()).next(0);
            drop(Box::from_raw(node.as_ptr()));
            node = next;
        }
    }
}

// /////////////////////////////////
// Iterators
// /////////////////////////////////
// Iterators only pop from front and back and never see the header, so the
// members are named first and last instead of head/end to avoid confusion.

/// Iterator by reference over the records of a list, in order.
///
/// Reverse iteration follows the predecessor links.
pub struct Iter<'a, T> {
    pub(crate) first: NonNull<SkipNode<T>>,
    pub(crate) last: NonNull<SkipNode<T>>,
    pub(crate) size: usize,
    pub(crate) _marker: PhantomData<&'a SkipNode<T>>,
}

impl<'a, T> Iter<'a, T> {
    /// # Safety
    ///
    /// `head` must be the header of a list holding `size` records which stays
    /// borrowed for `'a`.
    pub(crate) unsafe fn from_head(head: NonNull<SkipNode<T>>, size: usize) -> Self {
        // SAFETY: the header is live for `'a`.
        let (first, last) = unsafe { ((*head.as_ptr()).next(0), (*head.as_ptr()).prev(0)) };
        Iter {
            first,
            last,
            size,
            _marker: PhantomData,
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.size == 0 {
            return None;
        }
        // SAFETY: while `size > 0`, `first` is a record node borrowed for 'a.
        let node = unsafe { &*self.first.as_ptr() };
        self.first = node.next(0);
        self.size -= 1;
        node.record.as_ref()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.size, Some(self.size))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.size == 0 {
            return None;
        }
        // SAFETY: while `size > 0`, `last` is a record node borrowed for 'a.
        let node = unsafe { &*self.last.as_ptr() };
        self.last = node.prev(0);
        self.size -= 1;
        node.record.as_ref()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Iter {
            first: self.first,
            last: self.last,
            size: self.size,
            _marker: PhantomData,
        }
    }
}

/// Bounded forward iterator.
///
/// Starts at the first record which does not order before the probe and
/// yields records for as long as the probe reports them as
/// [`Equal`][Ordering::Equal]. The first record which does not match ends the
/// iteration without being yielded.
pub struct Range<'a, T, F> {
    pub(crate) head: NonNull<SkipNode<T>>,
    pub(crate) current: NonNull<SkipNode<T>>,
    pub(crate) probe: F,
    pub(crate) _marker: PhantomData<&'a SkipNode<T>>,
}

impl<'a, T, F> Iterator for Range<'a, T, F>
where
    F: FnMut(&T) -> Ordering,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current == self.head {
            return None;
        }
        // SAFETY: `current` is a record node of a list borrowed for 'a.
        let node = unsafe { &*self.current.as_ptr() };
        let record = node.record.as_ref()?;
        if (self.probe)(record) == Ordering::Equal {
            self.current = node.next(0);
            Some(record)
        } else {
            self.current = self.head;
            None
        }
    }
}

impl<T, F> FusedIterator for Range<'_, T, F> where F: FnMut(&T) -> Ordering {}
