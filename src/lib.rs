//! # dxfdoc
//!
//! A pure Rust library for reading ASCII DXF drawings into a document model
//! of layers, blocks and entities.
//!
//! ## Features
//!
//! - Group-code tokenizer with typed values and line numbers
//! - HEADER variables, LAYER and LTYPE tables, block definitions
//! - LINE, LWPOLYLINE, POLYLINE, CIRCLE/ARC, TEXT, MTEXT, ATTDEF,
//!   DIMENSION, SOLID, INSERT and POINT entities
//! - Failsafe reading: a malformed record drops only the range it belongs to
//! - Serde serialization of the whole document
//!
//! ## Quick Start
//!
//! ```rust
//! let source = "0\nSECTION\n2\nENTITIES\n0\nLINE\n8\n0\n10\n0\n20\n0\n11\n5\n21\n0\n0\nENDSEC\n0\nEOF\n";
//! let doc = dxfdoc::parse(source)?;
//!
//! for entity in doc.entities() {
//!     println!("{} on layer {}", entity.type_name(), entity.layer());
//! }
//! # Ok::<(), dxfdoc::DxfError>(())
//! ```
//!
//! ## Architecture
//!
//! - [`io::dxf::DxfTextReader`] tokenizes code/value pairs
//! - [`io::dxf::DxfParser`] routes SECTION ranges to the section readers
//! - [`entities::EntityType`] is the closed set of supported entities
//! - [`document::DxfDoc`] is the immutable result
//!
//! Non-fatal problems are collected as [`notification::Notification`]s on
//! the document and mirrored as `tracing` events.

#![allow(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod document;
pub mod entities;
pub mod error;
pub mod io;
pub mod notification;
pub mod tables;
pub mod types;

// Re-export commonly used types
pub use document::{DxfDoc, HeaderValue, ObjectRef};
pub use error::{DxfError, Result};
pub use io::dxf::{parse, parse_bytes, parse_many, DxfParser, DxfParserConfiguration};
pub use notification::{Notification, NotificationCollection, NotificationType};
pub use types::{Color, Handle, LineWeight, Vector3};

// Re-export entity types
pub use entities::{
    AttributeDefinition, Block, Circle, Dimension, Entity, EntityCommon, EntityType, Insert, Line,
    LwPolyline, MText, Point, Polyline, Solid, Text,
};

// Re-export table types
pub use tables::{Layer, LineType, Table, TableEntry, Tables};
