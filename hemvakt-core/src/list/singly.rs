//! ## hemvakt-core::list::singly
//! **Append-only forward list**
//!
//! Each node exclusively owns the rest of the chain through `next`.
//! There is no removal at this layer; the list models an append-only log.

use tracing::trace;

struct Node<T> {
    data: T,
    next: Option<Box<Node<T>>>,
}

pub struct SinglyLinkedList<T> {
    head: Option<Box<Node<T>>>,
}

impl<T> SinglyLinkedList<T> {
    pub fn new() -> Self {
        Self { head: None }
    }

    /// Links `data` after the current tail. Walks the whole chain, O(n).
    pub fn append(&mut self, data: T) {
        let mut cursor = &mut self.head;
        let mut depth = 0usize;
        while let Some(node) = cursor {
            cursor = &mut node.next;
            depth += 1;
        }
        *cursor = Some(Box::new(Node { data, next: None }));
        trace!(position = depth, "singly list append");
    }

    /// Walks the chain from the head. Every call starts a fresh traversal.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            next: self.head.as_deref(),
        }
    }

    /// Payloads in insertion order.
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }
}

impl<T> Default for SinglyLinkedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

// Unlink iteratively so long chains don't recurse through Box drops.
impl<T> Drop for SinglyLinkedList<T> {
    fn drop(&mut self) {
        let mut cursor = self.head.take();
        while let Some(mut node) = cursor {
            cursor = node.next.take();
        }
    }
}

impl<T> Extend<T> for SinglyLinkedList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.append(item);
        }
    }
}

impl<T> FromIterator<T> for SinglyLinkedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

pub struct Iter<'a, T> {
    next: Option<&'a Node<T>>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.next.map(|node| {
            self.next = node.next.as_deref();
            &node.data
        })
    }
}

impl<'a, T> IntoIterator for &'a SinglyLinkedList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
