//! ## hemvakt-core::deque
//! **Fixed-capacity double-ended queue**
//!
//! A ring of `capacity` slots addressed by a front index and a length.
//! Pushing onto a full deque hands the value back in [`Full`]; the deque never
//! evicts on its own. Callers that want an eviction policy pop the opposite
//! end first and then push.

use std::fmt;
use std::iter::FusedIterator;

use tracing::trace;

use crate::error::ContainerError;

/// Value rejected because the deque is at capacity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Full<T>(pub T);

impl<T> Full<T> {
    /// Returns the value that could not be pushed.
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> fmt::Display for Full<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "deque is at capacity")
    }
}

impl<T: fmt::Debug> std::error::Error for Full<T> {}

pub struct BoundedDeque<T> {
    buffer: Box<[Option<T>]>,
    front: usize,
    len: usize,
}

impl<T> BoundedDeque<T> {
    /// Creates an empty deque holding at most `capacity` values.
    ///
    /// # Errors
    ///
    /// [`ContainerError::InvalidCapacity`] when `capacity` is zero.
    pub fn with_capacity(capacity: usize) -> Result<Self, ContainerError> {
        if capacity == 0 {
            return Err(ContainerError::InvalidCapacity);
        }

        let buffer = (0..capacity)
            .map(|_| None)
            .collect::<Vec<_>>()
            .into_boxed_slice();

        Ok(Self {
            buffer,
            front: 0,
            len: 0,
        })
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.len == self.capacity()
    }

    pub fn peek_front(&self) -> Option<&T> {
        self.get(0)
    }

    pub fn peek_rear(&self) -> Option<&T> {
        self.len.checked_sub(1).and_then(|last| self.get(last))
    }

    pub fn push_front(&mut self, value: T) -> Result<(), Full<T>> {
        if self.is_full() {
            return Err(Full(value));
        }
        self.front = (self.front + self.capacity() - 1) % self.capacity();
        self.buffer[self.front] = Some(value);
        self.len += 1;
        trace!(len = self.len, "deque push_front");
        Ok(())
    }

    pub fn push_rear(&mut self, value: T) -> Result<(), Full<T>> {
        if self.is_full() {
            return Err(Full(value));
        }
        let slot = self.slot(self.len);
        self.buffer[slot] = Some(value);
        self.len += 1;
        trace!(len = self.len, "deque push_rear");
        Ok(())
    }

    pub fn pop_front(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        let value = self.buffer[self.front].take();
        self.front = (self.front + 1) % self.capacity();
        self.len -= 1;
        value
    }

    pub fn pop_rear(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        let slot = self.slot(self.len - 1);
        self.len -= 1;
        self.buffer[slot].take()
    }

    /// 1-based position of the first value equal to `value`, counted from the
    /// front.
    pub fn position(&self, value: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.iter()
            .position(|candidate| candidate == value)
            .map(|index| index + 1)
    }

    pub fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.position(value).is_some()
    }

    /// Drops every value; the capacity is unchanged.
    pub fn clear(&mut self) {
        for slot in self.buffer.iter_mut() {
            *slot = None;
        }
        self.front = 0;
        self.len = 0;
    }

    /// Front to rear.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            deque: self,
            offset: 0,
        }
    }

    fn get(&self, offset: usize) -> Option<&T> {
        if offset >= self.len {
            return None;
        }
        self.buffer[self.slot(offset)].as_ref()
    }

    #[inline]
    fn slot(&self, offset: usize) -> usize {
        (self.front + offset) % self.capacity()
    }
}

impl<T: fmt::Debug> fmt::Debug for BoundedDeque<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

pub struct Iter<'a, T> {
    deque: &'a BoundedDeque<T>,
    offset: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let value = self.deque.get(self.offset)?;
        self.offset += 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.deque.len - self.offset;
        (remaining, Some(remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

impl<'a, T> IntoIterator for &'a BoundedDeque<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn rejects_zero_capacity() {
        assert!(matches!(
            BoundedDeque::<u8>::with_capacity(0),
            Err(ContainerError::InvalidCapacity)
        ));
    }

    #[test]
    fn evict_front_then_push_rear() {
        let mut commands = BoundedDeque::with_capacity(2).unwrap();
        commands.push_rear("cmd1").unwrap();
        commands.push_rear("cmd2").unwrap();
        assert!(commands.is_full());

        assert_eq!(commands.pop_front(), Some("cmd1"));
        commands.push_rear("cmd3").unwrap();
        assert_eq!(commands.iter().copied().collect::<Vec<_>>(), vec!["cmd2", "cmd3"]);
    }

    #[test]
    fn push_on_full_hands_value_back() {
        let mut deque = BoundedDeque::with_capacity(1).unwrap();
        deque.push_front(1).unwrap();

        assert_eq!(deque.push_front(2), Err(Full(2)));
        assert_eq!(deque.push_rear(3).unwrap_err().into_inner(), 3);
        assert_eq!(deque.len(), 1);
    }

    #[test]
    fn both_ends_wrap_around() {
        let mut deque = BoundedDeque::with_capacity(3).unwrap();
        deque.push_front('b').unwrap();
        deque.push_front('a').unwrap();
        deque.push_rear('c').unwrap();

        assert_eq!(deque.peek_front(), Some(&'a'));
        assert_eq!(deque.peek_rear(), Some(&'c'));
        assert_eq!(deque.pop_rear(), Some('c'));
        assert_eq!(deque.pop_front(), Some('a'));
        assert_eq!(deque.pop_front(), Some('b'));
        assert_eq!(deque.pop_front(), None);
        assert_eq!(deque.pop_rear(), None);
        assert_eq!(deque.peek_rear(), None);
    }

    #[test]
    fn position_is_one_based() {
        let mut deque = BoundedDeque::with_capacity(4).unwrap();
        for cmd in ["lock doors", "arm alarms", "test siren"] {
            deque.push_rear(cmd).unwrap();
        }

        assert_eq!(deque.position(&"arm alarms"), Some(2));
        assert!(deque.contains(&"lock doors"));
        assert_eq!(deque.position(&"open garage"), None);
    }

    #[test]
    fn clear_keeps_capacity() {
        let mut deque = BoundedDeque::with_capacity(2).unwrap();
        deque.push_rear(1).unwrap();
        deque.push_rear(2).unwrap();
        deque.clear();

        assert!(deque.is_empty());
        assert_eq!(deque.capacity(), 2);
        deque.push_front(3).unwrap();
        assert_eq!(format!("{deque:?}"), "[3]");
    }

    #[derive(Debug, Clone)]
    enum Op {
        PushFront(u8),
        PushRear(u8),
        PopFront,
        PopRear,
    }

    proptest! {
        #[test]
        fn matches_vecdeque_and_respects_capacity(
            capacity in 1usize..6,
            ops in prop::collection::vec(
                prop_oneof![
                    any::<u8>().prop_map(Op::PushFront),
                    any::<u8>().prop_map(Op::PushRear),
                    Just(Op::PopFront),
                    Just(Op::PopRear),
                ],
                0..64,
            ),
        ) {
            let mut deque = BoundedDeque::with_capacity(capacity).unwrap();
            let mut model = std::collections::VecDeque::new();

            for op in ops {
                match op {
                    Op::PushFront(v) => {
                        if deque.is_full() {
                            deque.pop_rear();
                            model.pop_back();
                        }
                        prop_assert!(deque.push_front(v).is_ok());
                        model.push_front(v);
                    }
                    Op::PushRear(v) => {
                        if deque.is_full() {
                            deque.pop_front();
                            model.pop_front();
                        }
                        prop_assert!(deque.push_rear(v).is_ok());
                        model.push_back(v);
                    }
                    Op::PopFront => prop_assert_eq!(deque.pop_front(), model.pop_front()),
                    Op::PopRear => prop_assert_eq!(deque.pop_rear(), model.pop_back()),
                }
                prop_assert!(deque.len() <= capacity);
                prop_assert_eq!(
                    deque.iter().copied().collect::<Vec<_>>(),
                    model.iter().copied().collect::<Vec<_>>()
                );
            }
        }
    }
}
