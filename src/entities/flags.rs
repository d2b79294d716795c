//! Bit-flag fields decoded into named booleans
//!
//! Each bitmask group code has a `bitflags` type naming its bits and a plain
//! struct of booleans that is flattened into the owning entity. Decoding
//! drops undefined bits; `bits(from_bits(v)) == v` whenever `v` only uses
//! defined bits.

use bitflags::bitflags;
use serde::Serialize;

/// Pure conversion between a raw bitmask and its decoded booleans
pub trait FlagSet: Sized {
    /// Decode a raw bitmask; undefined bits are ignored
    fn from_bits(bits: i16) -> Self;

    /// Encode back to the raw bitmask
    fn bits(&self) -> i16;
}

bitflags! {
    /// POLYLINE flags (code 70)
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct PolylineFlagBits: i16 {
        const CLOSED = 1;
        const CURVE_FIT = 2;
        const SPLINE_FIT = 4;
        const POLYLINE_3D = 8;
        const POLYGON_MESH = 16;
        const CLOSED_N = 32;
        const POLYFACE_MESH = 64;
        const LINETYPE_CONTINUOUS = 128;
    }
}

bitflags! {
    /// VERTEX flags (code 70); bit 4 is undefined
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct VertexFlagBits: i16 {
        const EXTRA_VERTEX = 1;
        const CURVE_FIT_TANGENT = 2;
        const SPLINE_VERTEX = 8;
        const SPLINE_CONTROL = 16;
        const POLYLINE_3D = 32;
        const POLYGON_MESH = 64;
        const POLYFACE_FACE = 128;
    }
}

bitflags! {
    /// LWPOLYLINE flags (code 70)
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct LwPolylineFlagBits: i16 {
        const CLOSED = 1;
        const PLINEGEN = 128;
    }
}

bitflags! {
    /// ATTDEF attribute flags (code 70)
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct AttributeFlagBits: i16 {
        const INVISIBLE = 1;
        const CONSTANT = 2;
        const VERIFY = 4;
        const PRESET = 8;
    }
}

bitflags! {
    /// Text generation flags (code 71)
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct TextGenerationFlagBits: i16 {
        const BACKWARD = 2;
        const UPSIDE_DOWN = 4;
    }
}

/// Decoded POLYLINE flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PolylineFlags {
    /// Closed polyline (or mesh closed in M direction)
    pub shape: bool,
    pub includes_curve_fit_vertices: bool,
    pub includes_spline_fit_vertices: bool,
    pub is_3d_polyline: bool,
    pub is_3d_polygon_mesh: bool,
    /// Mesh closed in the N direction
    pub is_3d_polygon_mesh_closed: bool,
    pub is_polyface_mesh: bool,
    pub has_continuous_linetype_pattern: bool,
}

impl FlagSet for PolylineFlags {
    fn from_bits(bits: i16) -> Self {
        let f = PolylineFlagBits::from_bits_truncate(bits);
        Self {
            shape: f.contains(PolylineFlagBits::CLOSED),
            includes_curve_fit_vertices: f.contains(PolylineFlagBits::CURVE_FIT),
            includes_spline_fit_vertices: f.contains(PolylineFlagBits::SPLINE_FIT),
            is_3d_polyline: f.contains(PolylineFlagBits::POLYLINE_3D),
            is_3d_polygon_mesh: f.contains(PolylineFlagBits::POLYGON_MESH),
            is_3d_polygon_mesh_closed: f.contains(PolylineFlagBits::CLOSED_N),
            is_polyface_mesh: f.contains(PolylineFlagBits::POLYFACE_MESH),
            has_continuous_linetype_pattern: f.contains(PolylineFlagBits::LINETYPE_CONTINUOUS),
        }
    }

    fn bits(&self) -> i16 {
        let mut f = PolylineFlagBits::empty();
        f.set(PolylineFlagBits::CLOSED, self.shape);
        f.set(PolylineFlagBits::CURVE_FIT, self.includes_curve_fit_vertices);
        f.set(PolylineFlagBits::SPLINE_FIT, self.includes_spline_fit_vertices);
        f.set(PolylineFlagBits::POLYLINE_3D, self.is_3d_polyline);
        f.set(PolylineFlagBits::POLYGON_MESH, self.is_3d_polygon_mesh);
        f.set(PolylineFlagBits::CLOSED_N, self.is_3d_polygon_mesh_closed);
        f.set(PolylineFlagBits::POLYFACE_MESH, self.is_polyface_mesh);
        f.set(PolylineFlagBits::LINETYPE_CONTINUOUS, self.has_continuous_linetype_pattern);
        f.bits()
    }
}

/// Decoded VERTEX flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VertexFlags {
    /// Extra vertex created by curve fitting
    pub curve_fitting_vertex: bool,
    pub curve_fit_tangent: bool,
    pub spline_vertex: bool,
    pub spline_control_point: bool,
    pub three_d_polyline_vertex: bool,
    pub three_d_polyline_mesh: bool,
    pub polyface_mesh_vertex: bool,
}

impl FlagSet for VertexFlags {
    fn from_bits(bits: i16) -> Self {
        let f = VertexFlagBits::from_bits_truncate(bits);
        Self {
            curve_fitting_vertex: f.contains(VertexFlagBits::EXTRA_VERTEX),
            curve_fit_tangent: f.contains(VertexFlagBits::CURVE_FIT_TANGENT),
            spline_vertex: f.contains(VertexFlagBits::SPLINE_VERTEX),
            spline_control_point: f.contains(VertexFlagBits::SPLINE_CONTROL),
            three_d_polyline_vertex: f.contains(VertexFlagBits::POLYLINE_3D),
            three_d_polyline_mesh: f.contains(VertexFlagBits::POLYGON_MESH),
            polyface_mesh_vertex: f.contains(VertexFlagBits::POLYFACE_FACE),
        }
    }

    fn bits(&self) -> i16 {
        let mut f = VertexFlagBits::empty();
        f.set(VertexFlagBits::EXTRA_VERTEX, self.curve_fitting_vertex);
        f.set(VertexFlagBits::CURVE_FIT_TANGENT, self.curve_fit_tangent);
        f.set(VertexFlagBits::SPLINE_VERTEX, self.spline_vertex);
        f.set(VertexFlagBits::SPLINE_CONTROL, self.spline_control_point);
        f.set(VertexFlagBits::POLYLINE_3D, self.three_d_polyline_vertex);
        f.set(VertexFlagBits::POLYGON_MESH, self.three_d_polyline_mesh);
        f.set(VertexFlagBits::POLYFACE_FACE, self.polyface_mesh_vertex);
        f.bits()
    }
}

/// Decoded LWPOLYLINE flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LwPolylineFlags {
    /// Closed polyline
    pub shape: bool,
    /// Linetype generated continuously around the vertices (PLINEGEN)
    pub has_continuous_linetype_pattern: bool,
}

impl FlagSet for LwPolylineFlags {
    fn from_bits(bits: i16) -> Self {
        let f = LwPolylineFlagBits::from_bits_truncate(bits);
        Self {
            shape: f.contains(LwPolylineFlagBits::CLOSED),
            has_continuous_linetype_pattern: f.contains(LwPolylineFlagBits::PLINEGEN),
        }
    }

    fn bits(&self) -> i16 {
        let mut f = LwPolylineFlagBits::empty();
        f.set(LwPolylineFlagBits::CLOSED, self.shape);
        f.set(LwPolylineFlagBits::PLINEGEN, self.has_continuous_linetype_pattern);
        f.bits()
    }
}

/// Decoded ATTDEF flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeFlags {
    pub invisible: bool,
    pub constant: bool,
    pub verification_required: bool,
    pub preset: bool,
}

impl FlagSet for AttributeFlags {
    fn from_bits(bits: i16) -> Self {
        let f = AttributeFlagBits::from_bits_truncate(bits);
        Self {
            invisible: f.contains(AttributeFlagBits::INVISIBLE),
            constant: f.contains(AttributeFlagBits::CONSTANT),
            verification_required: f.contains(AttributeFlagBits::VERIFY),
            preset: f.contains(AttributeFlagBits::PRESET),
        }
    }

    fn bits(&self) -> i16 {
        let mut f = AttributeFlagBits::empty();
        f.set(AttributeFlagBits::INVISIBLE, self.invisible);
        f.set(AttributeFlagBits::CONSTANT, self.constant);
        f.set(AttributeFlagBits::VERIFY, self.verification_required);
        f.set(AttributeFlagBits::PRESET, self.preset);
        f.bits()
    }
}

/// Decoded text generation flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextGenerationFlags {
    /// Mirrored in X
    pub backwards: bool,
    /// Mirrored in Y
    pub mirrored: bool,
}

impl FlagSet for TextGenerationFlags {
    fn from_bits(bits: i16) -> Self {
        let f = TextGenerationFlagBits::from_bits_truncate(bits);
        Self {
            backwards: f.contains(TextGenerationFlagBits::BACKWARD),
            mirrored: f.contains(TextGenerationFlagBits::UPSIDE_DOWN),
        }
    }

    fn bits(&self) -> i16 {
        let mut f = TextGenerationFlagBits::empty();
        f.set(TextGenerationFlagBits::BACKWARD, self.backwards);
        f.set(TextGenerationFlagBits::UPSIDE_DOWN, self.mirrored);
        f.bits()
    }
}
