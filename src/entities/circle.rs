//! Circle and arc entities

use super::{Entity, EntityCommon};
use crate::types::Vector3;
use serde::Serialize;
use std::f64::consts::TAU;

/// A circle, or an arc when start/end angles are present
///
/// Angles are stored in radians; the file stores degrees.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Circle {
    #[serde(flatten)]
    pub common: EntityCommon,
    /// Center point (code 10)
    pub center: Vector3,
    /// Radius (code 40)
    pub radius: f64,
    /// Start angle in radians (code 50)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_angle: Option<f64>,
    /// End angle in radians (code 51)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_angle: Option<f64>,
    /// Sweep from start to end angle, counter-clockwise
    #[serde(skip_serializing_if = "Option::is_none")]
    pub angle_length: Option<f64>,
    /// Thickness (code 39)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thickness: Option<f64>,
    /// Extrusion direction (code 210)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extrusion_direction: Option<Vector3>,
}

impl Circle {
    /// Create a new circle
    pub fn new() -> Self {
        Circle {
            common: EntityCommon::new(),
            center: Vector3::ZERO,
            radius: 0.0,
            start_angle: None,
            end_angle: None,
            angle_length: None,
            thickness: None,
            extrusion_direction: None,
        }
    }

    /// Whether start or end angle was given
    pub fn is_arc(&self) -> bool {
        self.start_angle.is_some() || self.end_angle.is_some()
    }

    /// Compute `angle_length` from the two angles, wrapping through 2π when
    /// the end angle is smaller than the start angle
    pub fn update_angle_length(&mut self) {
        self.angle_length = match (self.start_angle, self.end_angle) {
            (Some(start), Some(end)) if end < start => Some(end + TAU - start),
            (Some(start), Some(end)) => Some(end - start),
            _ => None,
        };
    }
}

impl Default for Circle {
    fn default() -> Self {
        Self::new()
    }
}

impl Entity for Circle {
    fn common(&self) -> &EntityCommon {
        &self.common
    }

    fn entity_type(&self) -> &'static str {
        if self.is_arc() {
            "ARC"
        } else {
            "CIRCLE"
        }
    }
}
