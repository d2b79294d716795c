//! Line type table entry

use super::TableEntry;
use crate::types::Handle;
use serde::Serialize;

/// A line type table entry
///
/// Pattern elements are dash lengths: positive is a dash, negative a gap,
/// zero a dot.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineType {
    #[serde(skip)]
    pub handle: Option<Handle>,
    /// Line type name (code 2)
    pub name: String,
    /// Description (code 3)
    pub description: String,
    /// Element lengths in file order (code 49)
    pub pattern: Vec<f64>,
    /// Total pattern length (code 40)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern_length: Option<f64>,
    /// Declared element count (code 73)
    #[serde(skip)]
    pub element_count: Option<i16>,
}

impl LineType {
    /// Create a new line type
    pub fn new(name: impl Into<String>) -> Self {
        LineType {
            handle: None,
            name: name.into(),
            description: String::new(),
            pattern: Vec::new(),
            pattern_length: None,
            element_count: None,
        }
    }

    /// Check if this is a continuous line type
    pub fn is_continuous(&self) -> bool {
        self.pattern.is_empty()
    }
}

impl TableEntry for LineType {
    fn handle(&self) -> Option<&Handle> {
        self.handle.as_ref()
    }

    fn name(&self) -> &str {
        &self.name
    }
}
