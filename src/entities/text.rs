//! Single-line text entity

use super::{Entity, EntityCommon};
use crate::types::Vector3;
use serde::Serialize;

/// A single-line text
///
/// `rotation` is in degrees, as written in the file.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Text {
    #[serde(flatten)]
    pub common: EntityCommon,
    /// First alignment point (code 10)
    pub start_point: Vector3,
    /// Second alignment point (code 11)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_point: Option<Vector3>,
    /// Text height (code 40)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_height: Option<f64>,
    /// Relative X scale (code 41)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x_scale: Option<f64>,
    /// Rotation in degrees (code 50)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
    /// Text value (code 1)
    pub text: String,
    /// Horizontal justification (code 72): 0 left, 1 center, 2 right,
    /// 3 aligned, 4 middle, 5 fit
    pub halign: i16,
    /// Vertical justification (code 73): 0 baseline, 1 bottom, 2 middle, 3 top
    pub valign: i16,
}

impl Text {
    pub fn new() -> Self {
        Text {
            common: EntityCommon::new(),
            start_point: Vector3::ZERO,
            end_point: None,
            text_height: None,
            x_scale: None,
            rotation: None,
            text: String::new(),
            halign: 0,
            valign: 0,
        }
    }
}

impl Default for Text {
    fn default() -> Self {
        Self::new()
    }
}

impl Entity for Text {
    fn common(&self) -> &EntityCommon {
        &self.common
    }

    fn entity_type(&self) -> &'static str {
        "TEXT"
    }
}
