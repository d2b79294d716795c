//! Attribute definition entity

use super::{AttributeFlags, Entity, EntityCommon, TextGenerationFlags};
use crate::types::Vector3;
use serde::Serialize;

/// An attribute definition (ATTDEF), normally found inside a block
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeDefinition {
    #[serde(flatten)]
    pub common: EntityCommon,
    /// Text start point (code 10)
    #[serde(flatten)]
    pub location: Vector3,
    /// Default value (code 1)
    pub text: String,
    /// Tag (code 2)
    pub tag: String,
    /// Prompt (code 3)
    pub prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thickness: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_height: Option<f64>,
    /// Rotation in degrees (code 50)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
    /// Oblique angle in degrees (code 51)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oblique_angle: Option<f64>,
    /// Attribute flags (code 70)
    #[serde(flatten)]
    pub flags: AttributeFlags,
    /// Text generation flags (code 71)
    #[serde(flatten)]
    pub generation: TextGenerationFlags,
    /// Horizontal justification (code 72)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub horizontal_justification: Option<i16>,
    /// Vertical justification (code 74)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vertical_justification: Option<i16>,
    /// Field length (code 73)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_length: Option<i16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extrusion_direction_x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extrusion_direction_y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extrusion_direction_z: Option<f64>,
    /// Relative X scale (code 41)
    pub scale: f64,
    /// Text style name (code 7)
    pub text_style: String,
}

impl AttributeDefinition {
    pub fn new() -> Self {
        AttributeDefinition {
            common: EntityCommon::new(),
            location: Vector3::ZERO,
            text: String::new(),
            tag: String::new(),
            prompt: String::new(),
            thickness: None,
            text_height: None,
            rotation: None,
            oblique_angle: None,
            flags: AttributeFlags::default(),
            generation: TextGenerationFlags::default(),
            horizontal_justification: None,
            vertical_justification: None,
            field_length: None,
            extrusion_direction_x: None,
            extrusion_direction_y: None,
            extrusion_direction_z: None,
            scale: 1.0,
            text_style: "STANDARD".to_string(),
        }
    }
}

impl Default for AttributeDefinition {
    fn default() -> Self {
        Self::new()
    }
}

impl Entity for AttributeDefinition {
    fn common(&self) -> &EntityCommon {
        &self.common
    }

    fn entity_type(&self) -> &'static str {
        "ATTDEF"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let attdef = AttributeDefinition::new();
        assert_eq!(attdef.scale, 1.0);
        assert_eq!(attdef.text_style, "STANDARD");
    }

    #[test]
    fn test_flattened_shape() {
        let mut attdef = AttributeDefinition::new();
        attdef.location = Vector3::new(3.0, 4.0, 0.0);
        attdef.flags.invisible = true;
        let json = serde_json::to_value(&attdef).unwrap();
        assert_eq!(json["x"], 3.0);
        assert_eq!(json["invisible"], true);
        assert_eq!(json["mirrored"], false);
        assert_eq!(json["textStyle"], "STANDARD");
    }
}
