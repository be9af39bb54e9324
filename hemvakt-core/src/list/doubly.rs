//! ## hemvakt-core::list::doubly
//! **Bidirectional list with O(1) neighbour relinking**
//!
//! Nodes live in a [`NodeArena`]. `next` is the forward edge, `prev` is a
//! non-owning back link used only to splice a node out; neither link owns
//! anything, the arena does.
//!
//! Invariant: for every node `n` with `n.next == Some(m)`, `m.prev == Some(n)`
//! and the reverse. Only the head has `prev == None` and only the tail has
//! `next == None`.

use tracing::trace;

use crate::alloc::{NodeArena, NodeId};

struct Node<T> {
    data: T,
    next: Option<NodeId>,
    prev: Option<NodeId>,
}

pub struct DoublyLinkedList<T> {
    arena: NodeArena<Node<T>>,
    head: Option<NodeId>,
    len: usize,
}

impl<T> DoublyLinkedList<T> {
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

    /// Links `data` after the current tail, found by walking from the head.
    pub fn append(&mut self, data: T) {
        let prev = self.find_tail();
        let id = self.arena.allocate(Node {
            data,
            next: None,
            prev,
        });
        match prev {
            Some(tail) => self.arena[tail].next = Some(id),
            None => self.head = Some(id),
        }
        self.len += 1;
        trace!(len = self.len, node = %id, "doubly list append");
    }

    /// Removes the first node whose payload equals `data`.
    ///
    /// Returns `false` when nothing matched; the list is left untouched.
    pub fn remove(&mut self, data: &T) -> bool
    where
        T: PartialEq,
    {
        self.remove_first_by(|candidate| candidate == data).is_some()
    }

    /// Removes and returns the first payload matching `predicate`.
    pub fn remove_first_by<F>(&mut self, mut predicate: F) -> Option<T>
    where
        F: FnMut(&T) -> bool,
    {
        let mut cursor = self.head;
        while let Some(id) = cursor {
            let node = &self.arena[id];
            if predicate(&node.data) {
                return Some(self.unlink(id));
            }
            cursor = node.next;
        }
        None
    }

    /// First payload matching `predicate`.
    pub fn find_by<F>(&self, mut predicate: F) -> Option<&T>
    where
        F: FnMut(&T) -> bool,
    {
        self.iter().find(|data| predicate(data))
    }

    pub fn clear(&mut self) {
        self.arena.clear();
        self.head = None;
        self.len = 0;
    }

    /// Head to tail.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            arena: &self.arena,
            next: self.head,
            forward: true,
        }
    }

    /// Tail to head, following the back links.
    pub fn iter_rev(&self) -> Iter<'_, T> {
        Iter {
            arena: &self.arena,
            next: self.find_tail(),
            forward: false,
        }
    }

    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }

    fn find_tail(&self) -> Option<NodeId> {
        let mut tail = self.head?;
        while let Some(next) = self.arena[tail].next {
            tail = next;
        }
        Some(tail)
    }

    fn unlink(&mut self, id: NodeId) -> T {
        let (prev, next) = {
            let node = &self.arena[id];
            (node.prev, node.next)
        };
        match prev {
            Some(prev) => self.arena[prev].next = next,
            None => self.head = next,
        }
        if let Some(next) = next {
            self.arena[next].prev = prev;
        }
        self.len -= 1;
        trace!(len = self.len, node = %id, "doubly list unlink");

        self.arena
            .release(id)
            .map(|node| node.data)
            .expect("linked node missing from arena")
    }
}

impl<T> Default for DoublyLinkedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Extend<T> for DoublyLinkedList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.append(item);
        }
    }
}

impl<T> FromIterator<T> for DoublyLinkedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

pub struct Iter<'a, T> {
    arena: &'a NodeArena<Node<T>>,
    next: Option<NodeId>,
    forward: bool,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = &self.arena[self.next?];
        self.next = if self.forward { node.next } else { node.prev };
        Some(&node.data)
    }
}

impl<'a, T> IntoIterator for &'a DoublyLinkedList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
