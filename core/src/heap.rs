//! Array-backed 4-ary min-heap.
//!
//! Children of slot `i` live at `4i+1 ..= 4i+4`, its parent at `(i-1)/4`.
//! Capacity doubles when full and halves once occupancy drops under a third,
//! never below [`DEFAULT_CAPACITY`].

use crate::error::{ContainerError, Result};
use std::cmp::Ordering;
use std::fmt;

pub const NUM_CHILDREN: usize = 4;
/// Room for a full heap of depth three.
pub const DEFAULT_CAPACITY: usize = 1 + NUM_CHILDREN + NUM_CHILDREN * NUM_CHILDREN;

pub struct BoundedHeap<T> {
    items: Vec<T>,
    capacity: usize,
}

impl<T> BoundedHeap<T> {
    pub fn new() -> Self {
        Self {
            items: Vec::with_capacity(DEFAULT_CAPACITY),
            capacity: DEFAULT_CAPACITY,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Logical capacity under the grow/shrink policy.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn peek_min(&self) -> Result<&T> {
        self.items.first().ok_or(ContainerError::EmptyContainer)
    }

    fn grow_if_full(&mut self) {
        if self.items.len() >= self.capacity {
            self.capacity *= 2;
            self.items.reserve_exact(self.capacity - self.items.len());
        }
    }

    fn shrink_if_sparse(&mut self) {
        if self.capacity > DEFAULT_CAPACITY && self.items.len() < self.capacity / 3 {
            self.capacity /= 2;
            self.items.shrink_to(self.capacity);
        }
    }
}

impl<T: PartialOrd> BoundedHeap<T> {
    /// Adds an item. Items that do not compare equal to themselves (NaN and
    /// the like) have no place in the order and are rejected.
    pub fn insert(&mut self, item: T) -> Result<()> {
        if item.partial_cmp(&item) != Some(Ordering::Equal) {
            return Err(ContainerError::InvalidArgument("heap item is not comparable"));
        }
        self.grow_if_full();
        self.items.push(item);
        self.sift_up(self.items.len() - 1);
        Ok(())
    }

    pub fn remove_min(&mut self) -> Result<T> {
        if self.items.is_empty() {
            return Err(ContainerError::EmptyContainer);
        }
        // Moves the last item into the root slot.
        let min = self.items.swap_remove(0);
        if !self.items.is_empty() {
            self.sift_down(0);
        }
        self.shrink_if_sparse();
        Ok(min)
    }

    fn sift_up(&mut self, mut index: usize) {
        while index > 0 {
            let parent = (index - 1) / NUM_CHILDREN;
            if self.items[index] < self.items[parent] {
                self.items.swap(index, parent);
                index = parent;
            } else {
                break;
            }
        }
    }

    fn sift_down(&mut self, mut index: usize) {
        let len = self.items.len();
        loop {
            let first = index * NUM_CHILDREN + 1;
            if first >= len {
                break;
            }
            let end = (first + NUM_CHILDREN).min(len);
            let mut smallest = first;
            for child in first + 1..end {
                if self.items[child] < self.items[smallest] {
                    smallest = child;
                }
            }
            if self.items[smallest] < self.items[index] {
                self.items.swap(index, smallest);
                index = smallest;
            } else {
                break;
            }
        }
    }
}

impl<T> Default for BoundedHeap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for BoundedHeap<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundedHeap")
            .field("len", &self.items.len())
            .field("capacity", &self.capacity)
            .field("items", &self.items)
            .finish()
    }
}
