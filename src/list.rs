//! Arena-backed doubly linked list.
//!
//! Nodes live in a slot table owned by the list and link to each other by slot
//! index, so reordering and removal are O(1) without raw pointers. A
//! [`NodeHandle`] names a slot together with the version the slot had when the
//! node was created. Releasing a slot bumps its version, so a handle that
//! outlives its node is rejected rather than silently aliasing whatever node
//! reuses the slot later.
//!
//! ```text
//!   head                                   tail
//!    │                                      │
//!    ▼                                      ▼
//! ┌──────┐ next ┌──────┐ next ┌──────┐
//! │ slot │─────▶│ slot │─────▶│ slot │
//! │  3   │◀─────│  0   │◀─────│  5   │      free: [1, 2, 4]
//! └──────┘ prev └──────┘ prev └──────┘
//! ```

use crate::error::CacheError;
use alloc::vec::Vec;
use core::fmt;

/// A stable reference to a node of a [`List`].
///
/// Handles are cheap to copy. They stay valid until the node they name is
/// removed from the list; after that every operation taking the handle
/// reports [`CacheError::NodeNotFound`] or returns `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeHandle {
    index: usize,
    version: u32,
}

impl NodeHandle {
    /// Slot index of the node inside its list's arena.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }
}

struct Node<T> {
    value: T,
    prev: Option<usize>,
    next: Option<usize>,
}

struct Slot<T> {
    version: u32,
    node: Option<Node<T>>,
}

/// A doubly linked list whose nodes live in a slot arena.
///
/// The front of the list is the head; the back is the tail.
///
/// # Examples
///
/// ```
/// use mglru_cache::list::List;
///
/// let mut list = List::new();
/// let ten = list.push_front(10);
/// list.push_front(20);
/// list.push_back(5);
///
/// // 20 -> 10 -> 5
/// list.move_to_front(ten).unwrap();
/// assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec![10, 20, 5]);
/// assert_eq!(list.pop_back(), Some(5));
/// assert_eq!(list.len(), 2);
/// ```
pub struct List<T> {
    slots: Vec<Slot<T>>,
    free: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
}

impl<T> List<T> {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            head: None,
            tail: None,
            len: 0,
        }
    }

    /// Creates an empty list with room for `capacity` nodes before the arena
    /// has to grow.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
            head: None,
            tail: None,
            len: 0,
        }
    }

    /// Returns the number of nodes in the list.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the list contains no nodes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Handle of the first node, if any.
    #[inline]
    pub fn head(&self) -> Option<NodeHandle> {
        self.head.map(|index| self.handle_at(index))
    }

    /// Handle of the last node, if any.
    #[inline]
    pub fn tail(&self) -> Option<NodeHandle> {
        self.tail.map(|index| self.handle_at(index))
    }

    /// Value stored in the first node.
    pub fn front(&self) -> Option<&T> {
        self.head.map(|index| &self.node(index).value)
    }

    /// Mutably borrows the value stored in the first node.
    pub fn front_mut(&mut self) -> Option<&mut T> {
        let index = self.head?;
        Some(&mut self.node_mut(index).value)
    }

    /// Value stored in the last node.
    pub fn back(&self) -> Option<&T> {
        self.tail.map(|index| &self.node(index).value)
    }

    /// Returns true if `handle` names a node currently in the list.
    #[inline]
    pub fn contains(&self, handle: NodeHandle) -> bool {
        self.resolve(handle).is_some()
    }

    /// Borrows the value of the node named by `handle`.
    pub fn get(&self, handle: NodeHandle) -> Option<&T> {
        let index = self.resolve(handle)?;
        Some(&self.node(index).value)
    }

    /// Mutably borrows the value of the node named by `handle`.
    pub fn get_mut(&mut self, handle: NodeHandle) -> Option<&mut T> {
        let index = self.resolve(handle)?;
        Some(&mut self.node_mut(index).value)
    }

    /// Inserts `value` at the front and returns the new node's handle.
    pub fn push_front(&mut self, value: T) -> NodeHandle {
        let index = self.allocate(value);
        self.link_front(index);
        self.len += 1;
        self.handle_at(index)
    }

    /// Inserts `value` at the back and returns the new node's handle.
    pub fn push_back(&mut self, value: T) -> NodeHandle {
        let index = self.allocate(value);
        self.link_back(index);
        self.len += 1;
        self.handle_at(index)
    }

    /// Removes the first node and returns its value.
    ///
    /// Does nothing on an empty list.
    pub fn pop_front(&mut self) -> Option<T> {
        let index = self.head?;
        self.unlink(index);
        self.len -= 1;
        Some(self.release(index))
    }

    /// Removes the last node and returns its value.
    ///
    /// Does nothing on an empty list.
    pub fn pop_back(&mut self) -> Option<T> {
        let index = self.tail?;
        self.unlink(index);
        self.len -= 1;
        Some(self.release(index))
    }

    /// Removes the node named by `handle` in O(1) and returns its value.
    pub fn remove_node(&mut self, handle: NodeHandle) -> Result<T, CacheError> {
        let index = self
            .resolve(handle)
            .ok_or(CacheError::NodeNotFound(handle))?;
        self.unlink(index);
        self.len -= 1;
        Ok(self.release(index))
    }

    /// Moves the node named by `handle` to the front of the list.
    ///
    /// The node keeps its value and its handle. A stale handle leaves the
    /// list untouched and reports [`CacheError::NodeNotFound`].
    pub fn move_to_front(&mut self, handle: NodeHandle) -> Result<(), CacheError> {
        let index = self
            .resolve(handle)
            .ok_or(CacheError::NodeNotFound(handle))?;
        if self.head == Some(index) {
            return Ok(());
        }
        self.unlink(index);
        self.link_front(index);
        Ok(())
    }

    /// Iterates over the values from front to back.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            next: self.head,
            remaining: self.len,
        }
    }

    /// Removes every node. Outstanding handles become stale.
    pub fn clear(&mut self) {
        while self.pop_front().is_some() {}
    }

    fn handle_at(&self, index: usize) -> NodeHandle {
        NodeHandle {
            index,
            version: self.slots[index].version,
        }
    }

    fn resolve(&self, handle: NodeHandle) -> Option<usize> {
        let slot = self.slots.get(handle.index)?;
        (slot.version == handle.version && slot.node.is_some()).then_some(handle.index)
    }

    // Linked indices always refer to occupied slots; every index reaching the
    // accessors below comes from head/tail/prev/next or from `resolve`.
    fn node(&self, index: usize) -> &Node<T> {
        match &self.slots[index].node {
            Some(node) => node,
            None => unreachable!("linked slot {index} is vacant"),
        }
    }

    fn node_mut(&mut self, index: usize) -> &mut Node<T> {
        match &mut self.slots[index].node {
            Some(node) => node,
            None => unreachable!("linked slot {index} is vacant"),
        }
    }

    fn allocate(&mut self, value: T) -> usize {
        let node = Node {
            value,
            prev: None,
            next: None,
        };
        match self.free.pop() {
            Some(index) => {
                self.slots[index].node = Some(node);
                index
            }
            None => {
                self.slots.push(Slot {
                    version: 0,
                    node: Some(node),
                });
                self.slots.len() - 1
            }
        }
    }

    fn release(&mut self, index: usize) -> T {
        let slot = &mut self.slots[index];
        let node = match slot.node.take() {
            Some(node) => node,
            None => unreachable!("released slot {index} is vacant"),
        };
        slot.version = slot.version.wrapping_add(1);
        self.free.push(index);
        node.value
    }

    fn link_front(&mut self, index: usize) {
        let old_head = self.head;
        {
            let node = self.node_mut(index);
            node.prev = None;
            node.next = old_head;
        }
        match old_head {
            Some(head) => self.node_mut(head).prev = Some(index),
            None => self.tail = Some(index),
        }
        self.head = Some(index);
    }

    fn link_back(&mut self, index: usize) {
        let old_tail = self.tail;
        {
            let node = self.node_mut(index);
            node.prev = old_tail;
            node.next = None;
        }
        match old_tail {
            Some(tail) => self.node_mut(tail).next = Some(index),
            None => self.head = Some(index),
        }
        self.tail = Some(index);
    }

    fn unlink(&mut self, index: usize) {
        let (prev, next) = {
            let node = self.node_mut(index);
            (node.prev.take(), node.next.take())
        };
        match prev {
            Some(prev) => self.node_mut(prev).next = next,
            None => self.head = next,
        }
        match next {
            Some(next) => self.node_mut(next).prev = prev,
            None => self.tail = prev,
        }
    }

    /// Walks the links and panics if any structural invariant is broken.
    #[cfg(test)]
    pub(crate) fn assert_consistent(&self) {
        assert_eq!(self.head.is_none(), self.len == 0);
        assert_eq!(self.tail.is_none(), self.len == 0);

        let mut steps = 0;
        let mut prev = None;
        let mut cursor = self.head;
        while let Some(index) = cursor {
            let node = self.node(index);
            assert_eq!(node.prev, prev, "broken prev link at slot {index}");
            prev = Some(index);
            cursor = node.next;
            steps += 1;
            assert!(steps <= self.len, "cycle detected");
        }
        assert_eq!(steps, self.len);
        assert_eq!(prev, self.tail);

        let occupied = self.slots.iter().filter(|s| s.node.is_some()).count();
        assert_eq!(occupied, self.len);
        assert_eq!(occupied + self.free.len(), self.slots.len());
    }
}

impl<T: PartialEq> List<T> {
    /// Removes the first node, scanning from the front, whose value equals
    /// `value`. O(n).
    pub fn remove(&mut self, value: &T) -> Option<T> {
        let mut cursor = self.head;
        while let Some(index) = cursor {
            let node = self.node(index);
            if node.value == *value {
                self.unlink(index);
                self.len -= 1;
                return Some(self.release(index));
            }
            cursor = node.next;
        }
        None
    }
}

impl<T> Default for List<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for List<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Front-to-back iterator over a [`List`].
pub struct Iter<'a, T> {
    list: &'a List<T>,
    next: Option<usize>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.next?;
        let node = self.list.node(index);
        self.next = node.next;
        self.remaining -= 1;
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T: fmt::Debug> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iter")
            .field("remaining", &self.remaining)
            .finish()
    }
}

impl<'a, T> IntoIterator for &'a List<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
