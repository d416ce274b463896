//! Named symbol tables: layers, line types and blocks

use indexmap::IndexMap;

pub mod layer;
pub mod linetype;

pub use layer::Layer;
pub use linetype::LineType;

/// Base trait for all table entries
pub trait TableEntry {
    /// Get the entry's name
    fn name(&self) -> &str;
}

/// Generic table for storing named entries
///
/// Keys are upper-cased so lookups are case-insensitive. Iteration follows
/// insertion order.
#[derive(Debug, Clone)]
pub struct Table<T: TableEntry> {
    entries: IndexMap<String, T>,
}

impl<T: TableEntry> Table<T> {
    /// Create a new empty table
    pub fn new() -> Self {
        Table {
            entries: IndexMap::new(),
        }
    }

    /// Insert an entry, replacing any entry with the same name.
    ///
    /// A replaced entry keeps its original position in iteration order.
    pub fn insert(&mut self, entry: T) -> Option<T> {
        let key = entry.name().to_uppercase();
        self.entries.insert(key, entry)
    }

    /// Get an entry by name (case-insensitive)
    pub fn get(&self, name: &str) -> Option<&T> {
        self.entries.get(&name.to_uppercase())
    }

    /// Get a mutable entry by name (case-insensitive)
    pub fn get_mut(&mut self, name: &str) -> Option<&mut T> {
        self.entries.get_mut(&name.to_uppercase())
    }

    /// Check if an entry exists (case-insensitive)
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(&name.to_uppercase())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over all entries
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.values()
    }

    /// Get all entry names, as written in the source
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.values().map(|e| e.name())
    }

    /// Clear all entries
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<T: TableEntry> Default for Table<T> {
    fn default() -> Self {
        Self::new()
    }
}
