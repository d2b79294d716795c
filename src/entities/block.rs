//! Block definition

use super::EntityType;
use crate::types::{Handle, Vector3};
use serde::Serialize;

/// A named, reusable group of entities (BLOCK ... ENDBLK)
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub handle: Option<Handle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_handle: Option<Handle>,
    /// External reference path (code 1)
    pub xref_path: String,
    /// Block name (code 2)
    pub name: String,
    /// Second copy of the name written by some CAD tools (code 3)
    pub name2: String,
    /// Layer (code 8)
    pub layer: String,
    /// Base point (code 10)
    pub position: Vector3,
    /// Block belongs to paper space (code 67)
    pub paper_space: bool,
    /// Block type flags (code 70)
    #[serde(rename = "type")]
    pub block_type: i16,
    /// Owned entities in file order
    pub entities: Vec<EntityType>,
}

impl Block {
    /// Create an empty block
    pub fn new(name: impl Into<String>) -> Self {
        Block {
            handle: None,
            owner_handle: None,
            xref_path: String::new(),
            name: name.into(),
            name2: String::new(),
            layer: "0".to_string(),
            position: Vector3::ZERO,
            paper_space: false,
            block_type: 0,
            entities: Vec::new(),
        }
    }

    /// Anonymous blocks (`*Model_Space`, `*D12`, ...) have type bit 1 set or a `*` prefix
    pub fn is_anonymous(&self) -> bool {
        self.block_type & 1 != 0 || self.name.starts_with('*')
    }

    /// External reference blocks have type bit 4 set
    pub fn is_xref(&self) -> bool {
        self.block_type & 4 != 0
    }
}
