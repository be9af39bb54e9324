//! ## hemvakt-core::sort
//! **In-place quick sort with Lomuto partitioning**
//!
//! The pivot is always the key of the last element of the current range, so
//! already-sorted and reverse-sorted input degrade to O(n²) comparisons.
//! Recursion goes into the smaller partition and the larger one is handled
//! by the loop, which bounds stack depth to O(log n) even in that case.
//! The sort is not stable.

/// Sorts `data` ascending by the key `key` extracts from each element.
///
/// ```
/// use hemvakt_core::quick_sort_by_key;
///
/// let mut priorities = [(3, "door"), (1, "fire"), (2, "window")];
/// quick_sort_by_key(&mut priorities, |alert| alert.0);
/// assert_eq!(priorities, [(1, "fire"), (2, "window"), (3, "door")]);
/// ```
pub fn quick_sort_by_key<T, K, F>(data: &mut [T], mut key: F)
where
    K: Ord,
    F: FnMut(&T) -> K,
{
    sort_range(data, &mut |a: &T, b: &T| key(a) <= key(b));
}

/// Sorts `data` ascending by its own ordering.
pub fn quick_sort<T: Ord>(data: &mut [T]) {
    sort_range(data, &mut |a: &T, b: &T| a <= b);
}

fn sort_range<T, F>(mut data: &mut [T], le: &mut F)
where
    F: FnMut(&T, &T) -> bool,
{
    while data.len() > 1 {
        let pivot = partition(data, le);
        let (left, rest) = std::mem::take(&mut data).split_at_mut(pivot);
        let right = &mut rest[1..];
        if left.len() < right.len() {
            sort_range(left, le);
            data = right;
        } else {
            sort_range(right, le);
            data = left;
        }
    }
}

/// Moves every element that is `le` the last element to the front, then
/// swaps the pivot into place. Returns the pivot's index.
fn partition<T, F>(data: &mut [T], le: &mut F) -> usize
where
    F: FnMut(&T, &T) -> bool,
{
    let high = data.len() - 1;
    let mut boundary = 0;
    for scan in 0..high {
        let (head, pivot) = data.split_at_mut(high);
        if le(&head[scan], &pivot[0]) {
            head.swap(boundary, scan);
            boundary += 1;
        }
    }
    data.swap(boundary, high);
    boundary
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Alert {
        id: &'static str,
        priority: u8,
    }

    #[test]
    fn sorts_alerts_by_priority() {
        let mut alerts = vec![
            Alert { id: "A3", priority: 3 },
            Alert { id: "A1", priority: 1 },
            Alert { id: "A2", priority: 2 },
        ];
        quick_sort_by_key(&mut alerts, |alert| alert.priority);

        let order: Vec<_> = alerts.iter().map(|a| a.priority).collect();
        assert_eq!(order, vec![1, 2, 3]);
    }

    #[test]
    fn empty_and_single_are_untouched() {
        let mut empty: Vec<u8> = Vec::new();
        quick_sort(&mut empty);
        assert!(empty.is_empty());

        let mut single = [42];
        quick_sort(&mut single);
        assert_eq!(single, [42]);
    }

    #[test]
    fn partition_places_pivot_at_sorted_index() {
        let mut data = [5, 1, 4, 2, 3];
        let pivot = partition(&mut data, &mut |a: &i32, b: &i32| a <= b);
        assert_eq!(pivot, 2);
        assert_eq!(data[2], 3);
        assert!(data[..2].iter().all(|x| *x <= 3));
        assert!(data[3..].iter().all(|x| *x > 3));
    }

    #[test]
    fn presorted_input_does_not_exhaust_stack() {
        let mut data: Vec<u32> = (0..5_000).collect();
        quick_sort(&mut data);
        assert!(data.windows(2).all(|w| w[0] <= w[1]));

        data.reverse();
        quick_sort(&mut data);
        assert!(data.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn equal_keys_may_reorder() {
        let mut alerts = vec![
            Alert { id: "first", priority: 2 },
            Alert { id: "second", priority: 2 },
            Alert { id: "third", priority: 1 },
        ];
        quick_sort_by_key(&mut alerts, |alert| alert.priority);
        assert_eq!(alerts[0].id, "third");
        assert!(alerts[1..].iter().all(|alert| alert.priority == 2));
    }

    proptest! {
        #[test]
        fn output_is_sorted_permutation(mut data in prop::collection::vec(any::<i16>(), 0..200)) {
            let mut expected = data.clone();
            expected.sort();

            quick_sort_by_key(&mut data, |x| *x);
            prop_assert_eq!(&data, &expected);

            // Sorting again changes nothing.
            quick_sort_by_key(&mut data, |x| *x);
            prop_assert_eq!(data, expected);
        }

        #[test]
        fn keyed_sort_orders_adjacent_pairs(
            mut pairs in prop::collection::vec((1u8..=5, any::<u16>()), 0..100)
        ) {
            let mut before: Vec<_> = pairs.clone();
            quick_sort_by_key(&mut pairs, |pair| pair.0);

            prop_assert!(pairs.windows(2).all(|w| w[0].0 <= w[1].0));
            let mut after = pairs.clone();
            before.sort();
            after.sort();
            prop_assert_eq!(before, after);
        }
    }
}
