//! Multi-line text entity

use super::{Entity, EntityCommon};
use crate::types::Vector3;
use serde::Serialize;

/// A multi-line text
///
/// `rotation` is in radians, as written in the file. Long text is split
/// over several code 3 records followed by a final code 1; the parts are
/// joined in file order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MText {
    #[serde(flatten)]
    pub common: EntityCommon,
    pub text: String,
    /// Text style name (code 7)
    pub text_style: String,
    /// Insertion point (code 10)
    pub position: Vector3,
    /// X-axis direction (code 11)
    pub x_axis_direction: Vector3,
    /// Nominal text height (code 40)
    pub height: f64,
    /// Reference rectangle width (code 41)
    pub width: f64,
    /// Rotation in radians (code 50)
    pub rotation: f64,
    /// Attachment point (code 71), 1 = top left .. 9 = bottom right
    pub attachment_point: i16,
    /// Drawing direction (code 72), 1 = left to right
    pub drawing_direction: i16,
}

impl MText {
    pub fn new() -> Self {
        MText {
            common: EntityCommon::new(),
            text: String::new(),
            text_style: "STANDARD".to_string(),
            position: Vector3::ZERO,
            x_axis_direction: Vector3::UNIT_X,
            height: 0.0,
            width: 0.0,
            rotation: 0.0,
            attachment_point: 1,
            drawing_direction: 1,
        }
    }
}

impl Default for MText {
    fn default() -> Self {
        Self::new()
    }
}

impl Entity for MText {
    fn common(&self) -> &EntityCommon {
        &self.common
    }

    fn entity_type(&self) -> &'static str {
        "MTEXT"
    }
}
