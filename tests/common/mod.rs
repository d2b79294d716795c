//! Shared test utilities for dxfdoc integration tests.
//!
//! Builds DXF text from code/value records and wraps the parse entry
//! points, so each test crate can import them via `mod common;`.

#![allow(dead_code)]

use dxfdoc::entities::EntityType;
use dxfdoc::{DxfDoc, DxfParser, DxfParserConfiguration};
use std::collections::BTreeMap;
use std::fmt::Display;

// ===========================================================================
// DXF text builder
// ===========================================================================

/// Writes code/value records in the ASCII DXF layout
#[derive(Debug, Default, Clone)]
pub struct DxfText {
    text: String,
}

impl DxfText {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one record; codes are right-aligned to three columns the way
    /// CAD tools write them
    pub fn pair(mut self, code: i32, value: impl Display) -> Self {
        self.text.push_str(&format!("{:>3}\n{}\n", code, value));
        self
    }

    /// Append a point group (`code`, `code + 10`, `code + 20`)
    pub fn point(self, code: i32, x: f64, y: f64, z: f64) -> Self {
        self.pair(code, x).pair(code + 10, y).pair(code + 20, z)
    }

    pub fn marker(self, name: &str) -> Self {
        self.pair(0, name)
    }

    pub fn section(self, name: &str) -> Self {
        self.marker("SECTION").pair(2, name)
    }

    pub fn end_section(self) -> Self {
        self.marker("ENDSEC")
    }

    pub fn table(self, name: &str) -> Self {
        self.marker("TABLE").pair(2, name)
    }

    pub fn end_table(self) -> Self {
        self.marker("ENDTAB")
    }

    /// Append raw lines verbatim
    pub fn raw(mut self, lines: &str) -> Self {
        self.text.push_str(lines);
        self
    }

    pub fn eof(self) -> Self {
        self.marker("EOF")
    }

    pub fn build(self) -> String {
        self.text
    }
}

/// Wrap entity records into a complete document with a single ENTITIES section
pub fn entities_document(body: DxfText) -> String {
    DxfText::new()
        .section("ENTITIES")
        .raw(&body.build())
        .end_section()
        .eof()
        .build()
}

// ===========================================================================
// Read helpers
// ===========================================================================

/// Parse in failsafe mode, panicking on a fatal error.
pub fn parse_ok(source: &str) -> DxfDoc {
    dxfdoc::parse(source).unwrap_or_else(|e| panic!("Failed to parse DXF: {e}"))
}

/// Parse in strict mode (malformed records are fatal).
pub fn parse_strict(source: &str) -> dxfdoc::Result<DxfDoc> {
    let config = DxfParserConfiguration {
        failsafe: false,
        ..Default::default()
    };
    DxfParser::new().with_configuration(config).parse(source)
}

// ===========================================================================
// Entity utilities
// ===========================================================================

/// Build a sorted frequency map of entity type names.
pub fn entity_type_histogram(entities: &[EntityType]) -> BTreeMap<&'static str, usize> {
    let mut map = BTreeMap::new();
    for e in entities {
        *map.entry(e.type_name()).or_insert(0) += 1;
    }
    map
}

/// Serialize a document to JSON for shape assertions.
pub fn to_json(doc: &DxfDoc) -> serde_json::Value {
    serde_json::to_value(doc).expect("document serializes")
}
