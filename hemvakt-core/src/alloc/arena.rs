//! ## hemvakt-core::alloc::arena
//! **Slot arena with stable indices**
//!
//! Nodes are stored in a flat vector of slots. Releasing a node empties its
//! slot and pushes the index on a free list, so ids of other live nodes
//! never move. Links between nodes are plain [`NodeId`] values and carry no
//! ownership.

use std::fmt;
use std::ops::{Index, IndexMut};

/// Stable handle to a node stored in a [`NodeArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl NodeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

pub struct NodeArena<N> {
    slots: Vec<Option<N>>,
    free_indices: Vec<usize>,
    allocated_count: usize,
}

impl<N> NodeArena<N> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_indices: Vec::new(),
            allocated_count: 0,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free_indices: Vec::new(),
            allocated_count: 0,
        }
    }

    /// Stores `node`, reusing a released slot when one is available.
    pub fn allocate(&mut self, node: N) -> NodeId {
        self.allocate_with(|_| node)
    }

    /// Like [`allocate`](Self::allocate), but hands the id the node is about
    /// to receive to `build`. Lets a node link to itself.
    pub fn allocate_with<F>(&mut self, build: F) -> NodeId
    where
        F: FnOnce(NodeId) -> N,
    {
        self.allocated_count += 1;
        match self.free_indices.pop() {
            Some(index) => {
                self.slots[index] = Some(build(NodeId(index)));
                NodeId(index)
            }
            None => {
                let id = NodeId(self.slots.len());
                self.slots.push(Some(build(id)));
                id
            }
        }
    }

    /// Takes the node out of its slot. Returns `None` for an id that was
    /// already released.
    pub fn release(&mut self, id: NodeId) -> Option<N> {
        let node = self.slots.get_mut(id.0)?.take()?;
        self.free_indices.push(id.0);
        self.allocated_count -= 1;
        Some(node)
    }

    #[inline]
    pub fn get(&self, id: NodeId) -> Option<&N> {
        self.slots.get(id.0).and_then(Option::as_ref)
    }

    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut N> {
        self.slots.get_mut(id.0).and_then(Option::as_mut)
    }

    /// Number of live nodes.
    pub fn allocated_count(&self) -> usize {
        self.allocated_count
    }

    /// Number of slots ever created, live or free.
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Drops every node and forgets all ids.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free_indices.clear();
        self.allocated_count = 0;
    }
}

impl<N> Default for NodeArena<N> {
    fn default() -> Self {
        Self::new()
    }
}

// Containers index only with ids they allocated themselves, so a miss here
// is a broken link invariant.
impl<N> Index<NodeId> for NodeArena<N> {
    type Output = N;

    #[inline]
    fn index(&self, id: NodeId) -> &N {
        self.get(id).expect("stale node id")
    }
}

impl<N> IndexMut<NodeId> for NodeArena<N> {
    #[inline]
    fn index_mut(&mut self, id: NodeId) -> &mut N {
        self.get_mut(id).expect("stale node id")
    }
}

impl<N: fmt::Debug> fmt::Debug for NodeArena<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeArena")
            .field("allocated_count", &self.allocated_count)
            .field("slot_count", &self.slots.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arena_allocate_and_get() {
        let mut arena = NodeArena::new();
        let a = arena.allocate(123u32);
        let b = arena.allocate(456u32);

        assert_eq!(arena.get(a), Some(&123));
        assert_eq!(arena.get(b), Some(&456));
        assert_eq!(arena.allocated_count(), 2);
    }

    #[test]
    fn test_arena_release_reuses_slot() {
        let mut arena = NodeArena::new();
        let a = arena.allocate("a");
        let b = arena.allocate("b");

        assert_eq!(arena.release(a), Some("a"));
        assert_eq!(arena.release(a), None);
        assert!(arena.get(a).is_none());

        let c = arena.allocate("c");
        assert_eq!(c, a);
        assert_eq!(arena.get(b), Some(&"b"));
        assert_eq!(arena.slot_count(), 2);
        assert_eq!(arena.allocated_count(), 2);
    }

    #[test]
    #[should_panic(expected = "stale node id")]
    fn test_arena_index_released_id_panics() {
        let mut arena = NodeArena::new();
        let a = arena.allocate(7u8);
        arena.release(a);
        let _ = arena[a];
    }

    #[test]
    fn test_arena_allocate_with_sees_own_id() {
        let mut arena = NodeArena::new();
        let first = arena.allocate_with(|id| id);
        arena.release(first);
        let second = arena.allocate_with(|id| id);

        assert_eq!(arena[second], second);
        assert_eq!(second, first);
    }

    #[test]
    fn test_arena_clear() {
        let mut arena = NodeArena::with_capacity(4);
        let a = arena.allocate(1);
        arena.allocate(2);
        arena.clear();

        assert_eq!(arena.allocated_count(), 0);
        assert!(arena.get(a).is_none());
    }
}
