//! Fixed-capacity binary min-heap.
//!
//! Both the top-k selection and the k-way merge of posting lists rely on
//! this structure: the first one keyed by score with document IDs as
//! payloads, the second one keyed by document ID with posting cursors as
//! payloads.

use crate::{
    base::ImpactValue,
    error::{Error, Result},
};

struct HeapEntry<K, T> {
    key: K,
    payload: T,
}

/// An array-backed min-heap that never grows past the capacity given at
/// construction.
///
/// Entries with equal keys come out in an unspecified order.
pub struct BoundedMinHeap<T, K = ImpactValue> {
    /// Live entries; the min-heap property holds over the whole vector
    entries: Vec<HeapEntry<K, T>>,
    /// Maximum number of entries
    max_size: usize,
}

impl<T, K: PartialOrd + Copy> BoundedMinHeap<T, K> {
    /// Creates an empty heap able to hold `max_size` entries
    pub fn new(max_size: usize) -> Self {
        Self {
            entries: Vec::with_capacity(max_size),
            max_size,
        }
    }

    /// Number of live entries
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.entries.len() == self.max_size
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.max_size
    }

    /// Inserts a payload with the given key.
    ///
    /// Fails with [`Error::CapacityExceeded`] (leaving the heap untouched)
    /// when the heap is full.
    pub fn insert(&mut self, key: K, payload: T) -> Result<()> {
        if self.is_full() {
            return Err(Error::CapacityExceeded {
                capacity: self.max_size,
            });
        }

        self.entries.push(HeapEntry { key, payload });
        self.sift_up(self.entries.len() - 1);
        Ok(())
    }

    /// Returns the payload with the smallest key
    pub fn peek_min(&self) -> Result<&T> {
        self.entries
            .first()
            .map(|entry| &entry.payload)
            .ok_or(Error::Empty)
    }

    /// Returns the smallest key
    pub fn peek_min_key(&self) -> Result<K> {
        self.entries
            .first()
            .map(|entry| entry.key)
            .ok_or(Error::Empty)
    }

    /// Removes the entry with the smallest key and returns its payload
    pub fn remove_min(&mut self) -> Result<T> {
        self.remove_min_entry().map(|(_, payload)| payload)
    }

    /// Removes the entry with the smallest key and returns both key and
    /// payload
    pub fn remove_min_entry(&mut self) -> Result<(K, T)> {
        if self.entries.is_empty() {
            return Err(Error::Empty);
        }

        // The last entry takes the place of the root
        let min = self.entries.swap_remove(0);
        if !self.entries.is_empty() {
            self.sift_down(0);
        }
        Ok((min.key, min.payload))
    }

    fn sift_up(&mut self, mut index: usize) {
        while index > 0 {
            let parent = (index - 1) / 2;
            if self.entries[index].key < self.entries[parent].key {
                self.entries.swap(index, parent);
                index = parent;
            } else {
                break;
            }
        }
    }

    /// Index of the smallest child of `index`, if any. The right child is
    /// only picked when strictly smaller than the left one.
    fn min_child(&self, index: usize) -> Option<usize> {
        let left = 2 * index + 1;
        if left >= self.entries.len() {
            return None;
        }

        let right = left + 1;
        if right < self.entries.len() && self.entries[right].key < self.entries[left].key {
            Some(right)
        } else {
            Some(left)
        }
    }

    fn sift_down(&mut self, mut index: usize) {
        while let Some(child) = self.min_child(index) {
            if self.entries[child].key < self.entries[index].key {
                self.entries.swap(child, index);
                index = child;
            } else {
                break;
            }
        }
    }
}
