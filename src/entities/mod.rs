//! Drawing entity types
//!
//! Every entity is a struct embedding [`EntityCommon`] plus its own fields.
//! [`EntityType`] is the closed union of all supported entities; its
//! serialized form carries the DXF type name in a `type` field.

use crate::types::{Handle, LineWeight};
use serde::Serialize;

pub mod flags;
pub mod point;
pub mod line;
pub mod circle;
pub mod polyline;
pub mod lwpolyline;
pub mod text;
pub mod mtext;
pub mod dimension;
pub mod solid;
pub mod insert;
pub mod block;
pub mod attribute_definition;

pub use flags::{
    AttributeFlags, FlagSet, LwPolylineFlags, PolylineFlags, TextGenerationFlags, VertexFlags,
};
pub use point::Point;
pub use line::Line;
pub use circle::Circle;
pub use polyline::{Polyline, Vertex};
pub use lwpolyline::{LwPolyline, LwVertex};
pub use text::Text;
pub use mtext::MText;
pub use dimension::Dimension;
pub use solid::Solid;
pub use insert::Insert;
pub use block::Block;
pub use attribute_definition::AttributeDefinition;

/// Base trait for all drawing entities
pub trait Entity {
    /// Shared entity data
    fn common(&self) -> &EntityCommon;

    /// DXF type name of the entity
    fn entity_type(&self) -> &'static str;

    /// Get the entity's handle
    fn handle(&self) -> Option<&Handle> {
        self.common().handle.as_ref()
    }

    /// Get the entity's layer name
    fn layer(&self) -> &str {
        &self.common().layer
    }
}

/// Common entity data shared by all entities
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityCommon {
    /// Unique handle (code 5)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub handle: Option<Handle>,
    /// Handle of the owning object (code 330)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_handle: Option<Handle>,
    /// Layer name (code 8)
    pub layer: String,
    /// Line type name (code 6)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_type: Option<String>,
    /// Line type scale (code 48)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_type_scale: Option<f64>,
    /// Visibility (code 60, 0 = visible)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
    /// AutoCAD Color Index as written (code 62)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_index: Option<i16>,
    /// Packed 0xRRGGBB color: palette lookup of `color_index`, or true color (code 420)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<u32>,
    /// Entity lives in paper space (code 67)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub in_paper_space: Option<bool>,
    /// Material handle (code 347)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub material_object_handle: Option<Handle>,
    /// Line weight (code 370)
    pub lineweight: LineWeight,
}

impl EntityCommon {
    /// Create new common entity data with defaults
    pub fn new() -> Self {
        EntityCommon {
            handle: None,
            owner_handle: None,
            layer: "0".to_string(),
            line_type: None,
            line_type_scale: None,
            visible: None,
            color_index: None,
            color: None,
            in_paper_space: None,
            material_object_handle: None,
            lineweight: LineWeight::ByLayer,
        }
    }

    /// Create with a specific layer
    pub fn with_layer(layer: impl Into<String>) -> Self {
        EntityCommon {
            layer: layer.into(),
            ..Self::new()
        }
    }
}

impl Default for EntityCommon {
    fn default() -> Self {
        Self::new()
    }
}

/// Enumeration of all supported entity types
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum EntityType {
    #[serde(rename = "LWPOLYLINE")]
    LwPolyline(LwPolyline),
    #[serde(rename = "POLYLINE")]
    Polyline(Polyline),
    #[serde(rename = "LINE")]
    Line(Line),
    #[serde(rename = "CIRCLE")]
    Circle(Circle),
    /// Circle carrying start/end angles
    #[serde(rename = "ARC")]
    Arc(Circle),
    #[serde(rename = "TEXT")]
    Text(Text),
    #[serde(rename = "MTEXT")]
    MText(MText),
    #[serde(rename = "ATTDEF")]
    AttributeDefinition(AttributeDefinition),
    #[serde(rename = "DIMENSION")]
    Dimension(Dimension),
    #[serde(rename = "SOLID")]
    Solid(Solid),
    #[serde(rename = "INSERT")]
    Insert(Insert),
    #[serde(rename = "POINT")]
    Point(Point),
}

impl EntityType {
    /// Get a reference to the entity trait object
    pub fn as_entity(&self) -> &dyn Entity {
        match self {
            EntityType::LwPolyline(e) => e,
            EntityType::Polyline(e) => e,
            EntityType::Line(e) => e,
            EntityType::Circle(e) => e,
            EntityType::Arc(e) => e,
            EntityType::Text(e) => e,
            EntityType::MText(e) => e,
            EntityType::AttributeDefinition(e) => e,
            EntityType::Dimension(e) => e,
            EntityType::Solid(e) => e,
            EntityType::Insert(e) => e,
            EntityType::Point(e) => e,
        }
    }

    /// DXF type name (the serialized `type` tag)
    pub fn type_name(&self) -> &'static str {
        match self {
            EntityType::Arc(_) => "ARC",
            other => other.as_entity().entity_type(),
        }
    }

    /// Shared entity data
    pub fn common(&self) -> &EntityCommon {
        self.as_entity().common()
    }

    /// Entity handle, if written
    pub fn handle(&self) -> Option<&Handle> {
        self.as_entity().handle()
    }

    /// Layer name
    pub fn layer(&self) -> &str {
        self.as_entity().layer()
    }
}
