//! Line entity

use super::{Entity, EntityCommon};
use crate::types::Vector3;
use serde::Serialize;

/// A line segment
///
/// The start point (code 10) and end point (code 11) are stored in file
/// order as `vertices`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Line {
    #[serde(flatten)]
    pub common: EntityCommon,
    /// Start and end point
    pub vertices: Vec<Vector3>,
    /// Extrusion direction (code 210)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extrusion_direction: Option<Vector3>,
}

impl Line {
    /// Create an empty line
    pub fn new() -> Self {
        Line {
            common: EntityCommon::new(),
            vertices: Vec::new(),
            extrusion_direction: None,
        }
    }

    /// Create a new line between two points
    pub fn from_points(start: Vector3, end: Vector3) -> Self {
        Line {
            vertices: vec![start, end],
            ..Self::new()
        }
    }

    /// Start point, if written
    pub fn start(&self) -> Option<Vector3> {
        self.vertices.first().copied()
    }

    /// End point, if written
    pub fn end(&self) -> Option<Vector3> {
        self.vertices.get(1).copied()
    }
}

impl Default for Line {
    fn default() -> Self {
        Self::new()
    }
}

impl Entity for Line {
    fn common(&self) -> &EntityCommon {
        &self.common
    }

    fn entity_type(&self) -> &'static str {
        "LINE"
    }
}
