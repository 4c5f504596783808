//! HashSet Cache implementation that .IO.Caching.HashSetCache exactly.
//!
//! This module provides a cache that stores unique items using a hash set.

use std::collections::HashSet;
use std::hash::Hash;
use std::sync::{Arc, Mutex};

/// HashSet cache implementation that .
///
/// This cache stores unique items and provides fast lookup and insertion.
/// It automatically manages capacity by removing items when the limit is reached.
pub struct HashSetCache<T>
where
    T: Hash + Eq + Clone + Send + Sync,
{
    /// The internal hash set for storing items
    items: Arc<Mutex<HashSet<T>>>,
    /// Maximum capacity of the cache
    max_capacity: usize,
}

impl<T> HashSetCache<T>
where
    T: Hash + Eq + Clone + Send + Sync,
{
    /// Creates a new HashSet cache with the specified capacity.
    ///
    /// # Arguments
    ///
    /// * `max_capacity` - The maximum number of items the cache can hold
    ///
    /// # Returns
    ///
    /// A new HashSet cache
    pub fn new(max_capacity: usize) -> Self {
        Self {
            items: Arc::new(Mutex::new(HashSet::new())),
            max_capacity,
        }
    }

    /// Gets the maximum capacity of the cache.
    pub fn max_capacity(&self) -> usize {
        self.max_capacity
    }

    /// Gets the current count of items in the cache.
    pub fn count(&self) -> usize {
        self.items.lock().unwrap().len()
    }

    /// Returns whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.items.lock().unwrap().is_empty()
    }

    /// Adds an item to the cache.
    /// If the cache is at capacity, this may remove an existing item.
    ///
    /// # Arguments
    ///
    /// * `item` - The item to add
    ///
    /// # Returns
    ///
    /// True if the item was added (wasn't already present), false otherwise
    pub fn add(&self, item: T) -> bool {
        let mut items = self.items.lock().unwrap();

        // If item already exists, return false
        if items.contains(&item) {
            return false;
        }

        // Check capacity and remove an item if necessary
        if items.len() >= self.max_capacity {
            // Remove an arbitrary item (HashSet doesn't guarantee order)
            if let Some(to_remove) = items.iter().next().cloned() {
                items.remove(&to_remove);
            }
        }

        items.insert(item)
    }

    /// Checks if the cache contains the specified item.
    ///
    /// # Arguments
    ///
    /// * `item` - The item to check for
    ///
    /// # Returns
    ///
    /// True if the item is in the cache, false otherwise
    pub fn contains(&self, item: &T) -> bool {
        self.items.lock().unwrap().contains(item)
    }

    /// Removes an item from the cache.
    ///
    /// # Arguments
    ///
    /// * `item` - The item to remove
    ///
    /// # Returns
    ///
    /// True if the item was removed, false if it wasn't present
    pub fn remove(&self, item: &T) -> bool {
        self.items.lock().unwrap().remove(item)
    }

    /// Clears all items from the cache.
    pub fn clear(&self) {
        self.items.lock().unwrap().clear();
    }

    /// Gets all items in the cache as a vector.
    ///
    /// # Returns
    ///
    /// A vector containing all items in the cache
    pub fn to_vec(&self) -> Vec<T> {
        self.items.lock().unwrap().iter().cloned().collect()
    }

    /// Adds multiple items to the cache.
    ///
    /// # Arguments
    ///
    /// * `items` - The items to add
    pub fn add_range(&self, items: Vec<T>) {
        for item in items {
            self.add(item);
        }
    }

    /// Copies items to the provided slice starting at the specified index.
    ///
    /// # Arguments
    ///
    /// * `array` - The array to copy items to
    /// * `start_index` - The starting index in the array
    ///
    /// # Returns
    ///
    /// Result indicating success or error message
    pub fn copy_to(&self, array: &mut [T], start_index: usize) -> Result<(), String> {
        let items = self.items.lock().unwrap();
        let count = items.len();

        if start_index + count > array.len() {
            return Err(format!(
                "start_index({}) + count({}) > array.len({})",
                start_index,
                count,
                array.len()
            ));
        }

        let mut index = start_index;
        for item in items.iter() {
            array[index] = item.clone();
            index += 1;
        }

        Ok(())
    }

    /// Creates an iterator over the items in the cache.
    /// Note: This creates a snapshot of the current items.
    pub fn iter(&self) -> impl Iterator<Item = T> {
        self.to_vec().into_iter()
    }
}

impl<T> Clone for HashSetCache<T>
where
    T: Hash + Eq + Clone + Send + Sync,
{
    fn clone(&self) -> Self {
        let items = self.items.lock().unwrap().clone();
        Self {
            items: Arc::new(Mutex::new(items)),
            max_capacity: self.max_capacity,
        }
    }
}

// Implement standard collection traits for compatibility
impl<T> std::iter::FromIterator<T> for HashSetCache<T>
where
    T: Hash + Eq + Clone + Send + Sync,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let items: Vec<T> = iter.into_iter().collect();
        let capacity = items.len().max(16); // Default minimum capacity
        let cache = Self::new(capacity);
        cache.add_range(items);
        cache
    }
}
