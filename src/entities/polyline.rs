//! Polyline entity (heavy polyline with VERTEX sub-records)

use super::{Entity, EntityCommon, PolylineFlags, VertexFlags};
use crate::types::Vector3;
use serde::Serialize;

/// A vertex of a POLYLINE
///
/// Vertices are written as separate VERTEX records, so each carries its own
/// common entity data.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Vertex {
    #[serde(flatten)]
    pub common: EntityCommon,
    /// Location (code 10)
    #[serde(flatten)]
    pub location: Vector3,
    /// Start width (code 40)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_width: Option<f64>,
    /// End width (code 41)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_width: Option<f64>,
    /// Bulge (code 42, 0 = straight segment, <0 = clockwise arc, >0 = counter-clockwise arc)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bulge: Option<f64>,
    /// Vertex flags (code 70)
    #[serde(flatten)]
    pub flags: VertexFlags,
}

impl Vertex {
    /// Create a vertex at a location
    pub fn new(location: Vector3) -> Self {
        Vertex {
            common: EntityCommon::new(),
            location,
            start_width: None,
            end_width: None,
            bulge: None,
            flags: VertexFlags::default(),
        }
    }
}

/// A 2D/3D polyline, polygon mesh or polyface mesh
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Polyline {
    #[serde(flatten)]
    pub common: EntityCommon,
    /// Thickness (code 39)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thickness: Option<f64>,
    /// Polyline flags (code 70)
    #[serde(flatten)]
    pub flags: PolylineFlags,
    /// Extrusion direction (code 210)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extrusion_direction: Option<Vector3>,
    pub vertices: Vec<Vertex>,
}

impl Polyline {
    /// Create a new empty polyline
    pub fn new() -> Self {
        Polyline {
            common: EntityCommon::new(),
            thickness: None,
            flags: PolylineFlags::default(),
            extrusion_direction: None,
            vertices: Vec::new(),
        }
    }

    /// Whether the polyline is closed
    pub fn is_closed(&self) -> bool {
        self.flags.shape
    }
}

impl Default for Polyline {
    fn default() -> Self {
        Self::new()
    }
}

impl Entity for Polyline {
    fn common(&self) -> &EntityCommon {
        &self.common
    }

    fn entity_type(&self) -> &'static str {
        "POLYLINE"
    }
}

impl Entity for Vertex {
    fn common(&self) -> &EntityCommon {
        &self.common
    }

    fn entity_type(&self) -> &'static str {
        "VERTEX"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::FlagSet;

    #[test]
    fn test_vertex_serializes_flat() {
        let mut vertex = Vertex::new(Vector3::new(1.0, 2.0, 0.0));
        vertex.flags = VertexFlags::from_bits(32);
        let json = serde_json::to_value(&vertex).unwrap();
        assert_eq!(json["x"], 1.0);
        assert_eq!(json["y"], 2.0);
        assert_eq!(json["threeDPolylineVertex"], true);
        assert!(json.get("bulge").is_none());
    }

    #[test]
    fn test_closed_polyline() {
        let mut polyline = Polyline::new();
        polyline.flags = PolylineFlags::from_bits(1);
        assert!(polyline.is_closed());
        assert_eq!(serde_json::to_value(&polyline).unwrap()["shape"], true);
    }
}
