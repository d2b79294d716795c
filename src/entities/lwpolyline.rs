//! Lightweight polyline entity

use super::{Entity, EntityCommon, LwPolylineFlags};
use crate::types::Vector3;
use serde::Serialize;

/// A vertex of a lightweight polyline
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LwVertex {
    /// Location (codes 10/20, optional 30)
    #[serde(flatten)]
    pub location: Vector3,
    /// Start width (code 40)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_width: Option<f64>,
    /// End width (code 41)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_width: Option<f64>,
    /// Bulge (code 42); nonzero means an arc segment to the next vertex
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bulge: Option<f64>,
}

impl LwVertex {
    /// Create a vertex from X and Y
    pub fn new(x: f64, y: f64) -> Self {
        LwVertex {
            location: Vector3::new(x, y, 0.0),
            ..Default::default()
        }
    }

    /// Whether the segment starting at this vertex is an arc
    pub fn is_arc_segment(&self) -> bool {
        self.bulge.is_some_and(|b| b != 0.0)
    }
}

/// A lightweight (2D) polyline
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LwPolyline {
    #[serde(flatten)]
    pub common: EntityCommon,
    /// Elevation (code 38)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elevation: Option<f64>,
    /// Thickness (code 39)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depth: Option<f64>,
    /// Flags (code 70)
    #[serde(flatten)]
    pub flags: LwPolylineFlags,
    /// Declared vertex count (code 90)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_of_vertices: Option<i32>,
    /// Constant width (code 43)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    pub vertices: Vec<LwVertex>,
    /// Extrusion direction (code 210)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extrusion_direction: Option<Vector3>,
}

impl LwPolyline {
    /// Create a new empty lightweight polyline
    pub fn new() -> Self {
        LwPolyline {
            common: EntityCommon::new(),
            elevation: None,
            depth: None,
            flags: LwPolylineFlags::default(),
            number_of_vertices: None,
            width: None,
            vertices: Vec::new(),
            extrusion_direction: None,
        }
    }

    /// Whether the polyline is closed
    pub fn is_closed(&self) -> bool {
        self.flags.shape
    }
}

impl Default for LwPolyline {
    fn default() -> Self {
        Self::new()
    }
}

impl Entity for LwPolyline {
    fn common(&self) -> &EntityCommon {
        &self.common
    }

    fn entity_type(&self) -> &'static str {
        "LWPOLYLINE"
    }
}
