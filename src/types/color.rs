//! Color representation and the AutoCAD Color Index palette

use once_cell::sync::Lazy;
use std::fmt;

/// Represents a color in AutoCAD
///
/// Colors can be represented in multiple ways:
/// - By index (1-255): AutoCAD Color Index (ACI)
/// - By RGB values: True color (group code 420)
/// - By layer: Use the layer's color
/// - By block: Use the block's color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Color {
    /// Color by layer (index 256)
    #[default]
    ByLayer,
    /// Color by block (index 0)
    ByBlock,
    /// AutoCAD Color Index (1-255)
    Index(u8),
    /// True color with RGB values
    Rgb { r: u8, g: u8, b: u8 },
}

impl Color {
    /// Create a color from an AutoCAD Color Index
    ///
    /// Layers store a negative index when they are turned off; the sign is
    /// dropped here.
    pub fn from_index(index: i16) -> Self {
        match index {
            0 => Color::ByBlock,
            256 => Color::ByLayer,
            1..=255 => Color::Index(index as u8),
            _ if index < 0 => Color::Index((-(index as i32)).min(255) as u8),
            _ => Color::Index(7),
        }
    }

    /// Create a color from a packed 0xRRGGBB true color value
    pub const fn from_true_color(value: u32) -> Self {
        Color::Rgb {
            r: ((value >> 16) & 0xFF) as u8,
            g: ((value >> 8) & 0xFF) as u8,
            b: (value & 0xFF) as u8,
        }
    }

    /// Get the color index (if applicable)
    pub fn index(&self) -> Option<u16> {
        match self {
            Color::ByBlock => Some(0),
            Color::Index(i) => Some(*i as u16),
            Color::ByLayer => Some(256),
            Color::Rgb { .. } => None,
        }
    }

    /// Packed 0xRRGGBB value of this color, resolving indices through the
    /// ACI palette. ByLayer has no color of its own.
    pub fn true_color(&self) -> Option<u32> {
        match self {
            Color::ByLayer => None,
            Color::ByBlock => aci_to_rgb(0),
            Color::Index(i) => aci_to_rgb(*i as i16),
            Color::Rgb { r, g, b } => Some(((*r as u32) << 16) | ((*g as u32) << 8) | *b as u32),
        }
    }

    pub const RED: Color = Color::Index(1);
    pub const YELLOW: Color = Color::Index(2);
    pub const GREEN: Color = Color::Index(3);
    pub const CYAN: Color = Color::Index(4);
    pub const BLUE: Color = Color::Index(5);
    pub const MAGENTA: Color = Color::Index(6);
    pub const WHITE: Color = Color::Index(7);
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::ByLayer => write!(f, "ByLayer"),
            Color::ByBlock => write!(f, "ByBlock"),
            Color::Index(i) => write!(f, "ACI {}", i),
            Color::Rgb { r, g, b } => write!(f, "RGB({}, {}, {})", r, g, b),
        }
    }
}

/// Brightness of the five shade pairs in each hue column of the palette.
const SHADE_LEVELS: [f64; 5] = [255.0, 204.0, 153.0, 127.0, 76.0];

/// Gray ramp at indices 250..=255.
const GRAYS: [u32; 6] = [0x333333, 0x505050, 0x696969, 0x828282, 0xBEBEBE, 0xFFFFFF];

/// Indices 0..=9 are fixed.
const BASE_COLORS: [u32; 10] = [
    0x000000, 0xFF0000, 0xFFFF00, 0x00FF00, 0x00FFFF, 0x0000FF, 0xFF00FF, 0xFFFFFF, 0x808080,
    0xC0C0C0,
];

static ACI_PALETTE: Lazy<[u32; 256]> = Lazy::new(|| {
    let mut palette = [0u32; 256];
    palette[..10].copy_from_slice(&BASE_COLORS);
    for (index, entry) in palette.iter_mut().enumerate().take(250).skip(10) {
        *entry = hue_entry(index - 10);
    }
    palette[250..].copy_from_slice(&GRAYS);
    palette
});

/// Indices 10..=249 form 24 hue columns (15 degrees apart) of 10 entries:
/// five brightness levels, each as a saturated and a pale variant.
fn hue_entry(offset: usize) -> u32 {
    let hue = offset / 10;
    let shade = offset % 10;
    let level = SHADE_LEVELS[shade / 2];
    let pale = shade % 2 == 1;

    let t = (hue % 4) as f64 / 4.0;
    let (r, g, b) = match hue / 4 {
        0 => (1.0, t, 0.0),
        1 => (1.0 - t, 1.0, 0.0),
        2 => (0.0, 1.0, t),
        3 => (0.0, 1.0 - t, 1.0),
        4 => (t, 0.0, 1.0),
        _ => (1.0, 0.0, 1.0 - t),
    };

    let channel = |f: f64| -> u32 {
        let value = if pale { level * (0.5 + f / 2.0) } else { level * f };
        value.floor() as u32
    };

    (channel(r) << 16) | (channel(g) << 8) | channel(b)
}

/// Resolve an ACI index (0..=255) to a packed 0xRRGGBB value.
pub fn aci_to_rgb(index: i16) -> Option<u32> {
    usize::try_from(index)
        .ok()
        .and_then(|i| ACI_PALETTE.get(i).copied())
}
