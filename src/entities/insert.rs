//! Insert entity (block reference)

use super::{Entity, EntityCommon};
use crate::types::Vector3;
use serde::Serialize;

/// A block reference
///
/// `name` is resolved against the document's blocks only on request
/// ([`DxfDoc::block_for`](crate::document::DxfDoc::block_for)); an
/// undefined block is not a parse error.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Insert {
    #[serde(flatten)]
    pub common: EntityCommon,
    /// Block name (code 2)
    pub name: String,
    /// Insertion point (code 10)
    pub position: Vector3,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x_scale: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y_scale: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub z_scale: Option<f64>,
    /// Rotation in degrees (code 50)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
    /// Array columns (code 70)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column_count: Option<i16>,
    /// Array rows (code 71)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row_count: Option<i16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column_spacing: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row_spacing: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extrusion_direction: Option<Vector3>,
}

impl Insert {
    /// Create a reference to a named block
    pub fn new(name: impl Into<String>) -> Self {
        Insert {
            common: EntityCommon::new(),
            name: name.into(),
            position: Vector3::ZERO,
            x_scale: None,
            y_scale: None,
            z_scale: None,
            rotation: None,
            column_count: None,
            row_count: None,
            column_spacing: None,
            row_spacing: None,
            extrusion_direction: None,
        }
    }
}

impl Default for Insert {
    fn default() -> Self {
        Self::new("")
    }
}

impl Entity for Insert {
    fn common(&self) -> &EntityCommon {
        &self.common
    }

    fn entity_type(&self) -> &'static str {
        "INSERT"
    }
}
