//! Symbol tables read from the TABLES section

use crate::types::Handle;
use indexmap::IndexMap;
use serde::Serialize;

pub mod layer;
pub mod linetype;

pub use layer::{Layer, LayerFlagBits};
pub use linetype::LineType;

/// Base trait for all table entries
pub trait TableEntry {
    /// Get the entry's handle, if the file wrote one
    fn handle(&self) -> Option<&Handle>;

    /// Get the entry's name
    fn name(&self) -> &str;
}

/// Generic table of named entries
///
/// Names are kept as written; adding an entry whose name is already present
/// replaces the earlier one in place.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
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

    /// Add an entry, returning the one it replaced
    pub fn add(&mut self, entry: T) -> Option<T> {
        self.entries.insert(entry.name().to_string(), entry)
    }

    /// Get an entry by name
    pub fn get(&self, name: &str) -> Option<&T> {
        self.entries.get(name)
    }

    /// Check if an entry exists
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Get the number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the table is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over all entries in file order
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.values()
    }

    /// Get all entry names
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl<T: TableEntry> Default for Table<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T: TableEntry> IntoIterator for &'a Table<T> {
    type Item = (&'a String, &'a T);
    type IntoIter = indexmap::map::Iter<'a, String, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// The LAYER table
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LayerTable {
    pub layers: Table<Layer>,
}

/// The LTYPE table
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineTypeTable {
    pub line_types: Table<LineType>,
}

/// All tables the reader models
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tables {
    pub layer: LayerTable,
    #[serde(skip_serializing_if = "LineTypeTable::is_empty")]
    pub line_type: LineTypeTable,
}

impl LineTypeTable {
    pub fn is_empty(&self) -> bool {
        self.line_types.is_empty()
    }
}
