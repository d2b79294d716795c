//! Layer table entry

use super::TableEntry;
use crate::types::{Color, Handle};
use bitflags::bitflags;
use serde::Serialize;

bitflags! {
    /// Standard flags of a LAYER record (code 70)
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct LayerFlagBits: i16 {
        const FROZEN = 1;
        const FROZEN_IN_NEW_VIEWPORTS = 2;
        const LOCKED = 4;
        const XREF_DEPENDENT = 16;
        const XREF_RESOLVED = 32;
        const REFERENCED = 64;
    }
}

/// A layer table entry
///
/// The color is stored as written; a layer that is turned off carries a
/// negative color, and `visible` is derived from that sign.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layer {
    #[serde(skip)]
    pub handle: Option<Handle>,
    pub name: String,
    /// Raw standard flags (code 70)
    pub flags: i16,
    pub visible: bool,
    /// Stored color index, sign included (code 62)
    pub color: i16,
}

impl Layer {
    /// Create a new layer with default settings
    pub fn new(name: impl Into<String>) -> Self {
        Layer {
            handle: None,
            name: name.into(),
            flags: 0,
            visible: true,
            color: 7,
        }
    }

    /// Store a color and derive visibility from its sign
    pub fn set_color(&mut self, color: i16) {
        self.color = color;
        self.visible = color >= 0;
    }

    /// Decoded standard flags; unknown bits are dropped
    pub fn flag_bits(&self) -> LayerFlagBits {
        LayerFlagBits::from_bits_truncate(self.flags)
    }

    /// Check if the layer is frozen
    pub fn is_frozen(&self) -> bool {
        self.flag_bits().contains(LayerFlagBits::FROZEN)
    }

    /// Check if the layer is locked
    pub fn is_locked(&self) -> bool {
        self.flag_bits().contains(LayerFlagBits::LOCKED)
    }

    /// Layer color with the off-sign removed
    pub fn color_value(&self) -> Color {
        Color::from_index(self.color)
    }
}

impl TableEntry for Layer {
    fn handle(&self) -> Option<&Handle> {
        self.handle.as_ref()
    }

    fn name(&self) -> &str {
        &self.name
    }
}
