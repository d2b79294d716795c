//! Dimension entity

use super::{Entity, EntityCommon};
use crate::types::Vector3;
use serde::Serialize;

/// A dimension of any kind
///
/// The graphics are stored in the anonymous block named by `block`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dimension {
    #[serde(flatten)]
    pub common: EntityCommon,
    /// Name of the block holding the dimension graphics (code 2)
    pub block: String,
    /// Definition point (code 10)
    pub anchor_point: Vector3,
    /// Middle point of the dimension text (code 11)
    pub middle_of_text: Vector3,
    /// Insertion point for clones (code 12)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insertion_point: Option<Vector3>,
    /// Definition points for linear and angular dimensions (codes 13, 14)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linear_or_angular_point1: Option<Vector3>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linear_or_angular_point2: Option<Vector3>,
    /// Definition point for diameter, radius and angular dimensions (code 15)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diameter_or_radius_point: Option<Vector3>,
    /// Arc location for angular dimensions (code 16)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arc_point: Option<Vector3>,
    /// Dimension type and flags (code 70)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimension_type: Option<i16>,
    /// Text attachment point (code 71)
    pub attachment_point: i16,
    /// Measured value (code 42)
    pub actual_measurement: f64,
    /// Text override (code 1)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Rotation of linear dimensions, degrees (code 50)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub angle: Option<f64>,
}

impl Dimension {
    pub fn new() -> Self {
        Dimension {
            common: EntityCommon::new(),
            block: String::new(),
            anchor_point: Vector3::ZERO,
            middle_of_text: Vector3::ZERO,
            insertion_point: None,
            linear_or_angular_point1: None,
            linear_or_angular_point2: None,
            diameter_or_radius_point: None,
            arc_point: None,
            dimension_type: None,
            attachment_point: 0,
            actual_measurement: 0.0,
            text: None,
            angle: None,
        }
    }
}

impl Default for Dimension {
    fn default() -> Self {
        Self::new()
    }
}

impl Entity for Dimension {
    fn common(&self) -> &EntityCommon {
        &self.common
    }

    fn entity_type(&self) -> &'static str {
        "DIMENSION"
    }
}
