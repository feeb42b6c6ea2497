//! Bounded top-k selection over a min-heap.

use crate::error::{ContainerError, Result};
use crate::heap::BoundedHeap;
use std::cmp::Ordering;

/// Returns the `k` largest items in ascending order.
///
/// Keeps a min-heap of at most `k` items in one pass over `items`, so the
/// cost is O(n log k) and the extra memory O(k). `items` is never modified.
/// When `k` exceeds the input length every item comes back, sorted.
pub fn top_k<T>(k: isize, items: &[T]) -> Result<Vec<T>>
where
    T: PartialOrd + Clone,
{
    if k < 0 {
        return Err(ContainerError::InvalidArgument("k must not be negative"));
    }
    let k = (k as usize).min(items.len());
    if k == 0 {
        return Ok(Vec::new());
    }

    let mut heap = BoundedHeap::new();
    for item in items {
        // Every item must be comparable, including ones the heap never keeps.
        if item.partial_cmp(item) != Some(Ordering::Equal) {
            return Err(ContainerError::InvalidArgument("item is not comparable"));
        }
        if heap.len() < k {
            heap.insert(item.clone())?;
        } else if item > heap.peek_min()? {
            heap.remove_min()?;
            heap.insert(item.clone())?;
        }
    }

    let mut out = Vec::with_capacity(k);
    while !heap.is_empty() {
        out.push(heap.remove_min()?);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_largest_in_ascending_order() {
        let input: Vec<i32> = (0..20).collect();
        assert_eq!(top_k(5, &input).unwrap(), vec![15, 16, 17, 18, 19]);
    }

    #[test]
    fn negative_k_is_rejected() {
        assert!(matches!(
            top_k::<i32>(-1, &[]),
            Err(ContainerError::InvalidArgument(_))
        ));
    }

    #[test]
    fn zero_k_is_empty() {
        assert!(top_k(0, &[3, 2, 1]).unwrap().is_empty());
    }

    #[test]
    fn oversized_k_sorts_everything() {
        let input: Vec<i32> = (0..100).rev().collect();
        let out = top_k(101, &input).unwrap();
        assert_eq!(out, (0..100).collect::<Vec<_>>());
    }

    #[test]
    fn input_is_left_alone() {
        let input: Vec<i32> = (1..=20).rev().collect();
        let before = input.clone();
        let out = top_k(19, &input).unwrap();
        assert_eq!(out, (2..=20).collect::<Vec<_>>());
        assert_eq!(input, before);
    }

    #[test]
    fn keeps_duplicates() {
        let out = top_k(3, &[4, 9, 9, 1, 9, 2]).unwrap();
        assert_eq!(out, vec![9, 9, 9]);
    }

    #[test]
    fn nan_items_propagate_an_error() {
        assert!(top_k(2, &[1.0, f64::NAN, 3.0]).is_err());
    }

    #[test]
    fn nan_after_heap_fills_is_still_rejected() {
        assert!(matches!(
            top_k(1, &[1.0, f64::NAN]),
            Err(ContainerError::InvalidArgument(_))
        ));
        assert!(matches!(
            top_k(2, &[5.0, 4.0, 3.0, f64::NAN, 1.0]),
            Err(ContainerError::InvalidArgument(_))
        ));
    }
}
