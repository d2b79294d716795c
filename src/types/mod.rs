//! Basic value types shared by entities, tables and the reader

pub mod color;
pub mod handle;
pub mod line_weight;
pub mod vector;

pub use color::{aci_to_rgb, Color};
pub use handle::Handle;
pub use line_weight::LineWeight;
pub use vector::Vector3;
