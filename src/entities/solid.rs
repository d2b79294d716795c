//! Solid entity (filled triangle or quadrilateral)

use super::{Entity, EntityCommon};
use crate::types::Vector3;
use serde::Serialize;

/// A 2D solid
///
/// Corners come from codes 10 through 13 and are kept in corner order;
/// corners absent from the file are left out.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Solid {
    #[serde(flatten)]
    pub common: EntityCommon,
    pub points: Vec<Vector3>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extrusion_direction: Option<Vector3>,
}

impl Solid {
    pub fn new() -> Self {
        Solid {
            common: EntityCommon::new(),
            points: Vec::new(),
            extrusion_direction: None,
        }
    }

    /// A solid with three distinct corners is a triangle
    pub fn is_triangle(&self) -> bool {
        self.points.len() == 3 || (self.points.len() == 4 && self.points[2] == self.points[3])
    }
}

impl Default for Solid {
    fn default() -> Self {
        Self::new()
    }
}

impl Entity for Solid {
    fn common(&self) -> &EntityCommon {
        &self.common
    }

    fn entity_type(&self) -> &'static str {
        "SOLID"
    }
}
