//! Point entity

use super::{Entity, EntityCommon};
use crate::types::Vector3;
use serde::Serialize;

/// A point entity
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Point {
    #[serde(flatten)]
    pub common: EntityCommon,
    /// Location (code 10)
    pub position: Vector3,
    /// Thickness (code 39)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thickness: Option<f64>,
    /// Extrusion direction (code 210)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extrusion_direction: Option<Vector3>,
}

impl Point {
    /// Create a new point at the origin
    pub fn new() -> Self {
        Point {
            common: EntityCommon::new(),
            position: Vector3::ZERO,
            thickness: None,
            extrusion_direction: None,
        }
    }
}

impl Default for Point {
    fn default() -> Self {
        Self::new()
    }
}

impl Entity for Point {
    fn common(&self) -> &EntityCommon {
        &self.common
    }

    fn entity_type(&self) -> &'static str {
        "POINT"
    }
}
