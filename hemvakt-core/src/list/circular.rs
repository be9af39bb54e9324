//! ## hemvakt-core::list::circular
//! **Singly linked ring for round-robin rotation**
//!
//! The tail's `next` is the head's [`NodeId`], so the cycle is an ordinary
//! index and needs no special ownership. A non-empty ring never contains a
//! terminating link: following `next` `len` times from the head returns to
//! the head.

use std::iter::FusedIterator;

use tracing::trace;

use crate::alloc::{NodeArena, NodeId};

struct Node<T> {
    data: T,
    next: NodeId,
}

pub struct CircularList<T> {
    arena: NodeArena<Node<T>>,
    head: Option<NodeId>,
    len: usize,
}

impl<T> CircularList<T> {
    pub fn new() -> Self {
        Self {
            arena: NodeArena::new(),
            head: None,
            len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Inserts `data` between the current tail and the head.
    ///
    /// The first node links to itself.
    pub fn append(&mut self, data: T) {
        let id = match self.head {
            None => {
                let id = self.arena.allocate_with(|id| Node { data, next: id });
                self.head = Some(id);
                id
            }
            Some(head) => {
                let tail = self.predecessor_of(head);
                let id = self.arena.allocate(Node { data, next: head });
                self.arena[tail].next = id;
                id
            }
        };
        self.len += 1;
        trace!(len = self.len, node = %id, "circular list append");
    }

    /// Removes the first node, scanning one full loop from the head, whose
    /// payload equals `data`.
    ///
    /// Removing the head advances the head to its successor and relinks the
    /// tail to it; removing the last node leaves the ring empty.
    pub fn remove(&mut self, data: &T) -> bool
    where
        T: PartialEq,
    {
        let Some(head) = self.head else {
            return false;
        };

        let mut prev: Option<NodeId> = None;
        let mut current = head;
        loop {
            let node = &self.arena[current];
            if node.data == *data {
                let next = node.next;
                match prev {
                    Some(prev) => self.arena[prev].next = next,
                    None if next == current => self.head = None,
                    None => {
                        let tail = self.predecessor_of(current);
                        self.arena[tail].next = next;
                        self.head = Some(next);
                    }
                }
                self.arena.release(current);
                self.len -= 1;
                trace!(len = self.len, node = %current, "circular list unlink");
                return true;
            }

            prev = Some(current);
            current = node.next;
            if current == head {
                return false;
            }
        }
    }

    /// Yields exactly `steps` payloads starting at the head, wrapping past
    /// the tail as often as needed.
    ///
    /// Returns `None` on an empty ring.
    pub fn rotate(&self, steps: usize) -> Option<Rotation<'_, T>> {
        let head = self.head?;
        Some(Rotation {
            arena: &self.arena,
            next: Some(head),
            remaining: steps,
        })
    }

    /// One loop from the head back to it, without repeating.
    pub fn iter(&self) -> Rotation<'_, T> {
        Rotation {
            arena: &self.arena,
            next: self.head,
            remaining: self.len,
        }
    }

    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }

    /// Node whose `next` is `target`. Walks the ring once.
    fn predecessor_of(&self, target: NodeId) -> NodeId {
        let mut cursor = target;
        while self.arena[cursor].next != target {
            cursor = self.arena[cursor].next;
        }
        cursor
    }
}

impl<T> Default for CircularList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Extend<T> for CircularList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.append(item);
        }
    }
}

impl<T> FromIterator<T> for CircularList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

/// Bounded walk around the ring.
pub struct Rotation<'a, T> {
    arena: &'a NodeArena<Node<T>>,
    next: Option<NodeId>,
    remaining: usize,
}

impl<'a, T> Iterator for Rotation<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = &self.arena[self.next?];
        self.remaining -= 1;
        self.next = Some(node.next);
        Some(&node.data)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Rotation<'_, T> {}

impl<T> FusedIterator for Rotation<'_, T> {}
