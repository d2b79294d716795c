//! Parsed drawing document

use crate::entities::{Block, EntityType};
use crate::io::dxf::GroupValue;
use crate::notification::NotificationCollection;
use crate::tables::{Layer, LineType, Tables};
use crate::types::{Handle, Vector3};
use ahash::AHashMap;
use indexmap::IndexMap;
use serde::Serialize;

/// Value of a `$VARIABLE` in the HEADER section
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum HeaderValue {
    /// Variables written with codes 10/20/30
    Point(Vector3),
    Value(GroupValue),
}

impl HeaderValue {
    pub fn as_point(&self) -> Option<Vector3> {
        match self {
            HeaderValue::Point(p) => Some(*p),
            HeaderValue::Value(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            HeaderValue::Value(GroupValue::Str(s)) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            HeaderValue::Value(GroupValue::Int(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn as_double(&self) -> Option<f64> {
        match self {
            HeaderValue::Value(GroupValue::Float(v)) => Some(*v),
            HeaderValue::Value(GroupValue::Int(v)) => Some(*v as f64),
            _ => None,
        }
    }
}

/// Where a handle points inside the document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObjectRef {
    /// A block definition, by name
    Block(String),
    /// An entity, either top level or owned by the named block
    Entity { block: Option<String>, index: usize },
}

/// Read-only handle lookup built after assembly
///
/// Handles stay opaque strings on the entities; this index only answers
/// lookups and never rewires ownership.
#[derive(Debug, Clone, Default)]
pub struct HandleIndex {
    objects: AHashMap<Handle, ObjectRef>,
}

impl HandleIndex {
    fn build(blocks: &IndexMap<String, Block>, entities: &[EntityType]) -> Self {
        let mut objects = AHashMap::new();
        for (name, block) in blocks {
            if let Some(handle) = &block.handle {
                objects.insert(handle.clone(), ObjectRef::Block(name.clone()));
            }
            for (index, entity) in block.entities.iter().enumerate() {
                if let Some(handle) = entity.handle() {
                    objects.insert(
                        handle.clone(),
                        ObjectRef::Entity {
                            block: Some(name.clone()),
                            index,
                        },
                    );
                }
            }
        }
        for (index, entity) in entities.iter().enumerate() {
            if let Some(handle) = entity.handle() {
                objects.insert(handle.clone(), ObjectRef::Entity { block: None, index });
            }
        }
        HandleIndex { objects }
    }

    pub fn get(&self, handle: &Handle) -> Option<&ObjectRef> {
        self.objects.get(handle)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

/// A parsed DXF drawing
///
/// Built once per parse and immutable afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct DxfDoc {
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    header: IndexMap<String, HeaderValue>,
    blocks: IndexMap<String, Block>,
    entities: Vec<EntityType>,
    tables: Tables,
    #[serde(skip)]
    notifications: NotificationCollection,
    #[serde(skip)]
    handles: HandleIndex,
}

impl DxfDoc {
    /// Named blocks in file order
    pub fn blocks(&self) -> &IndexMap<String, Block> {
        &self.blocks
    }

    /// Top-level entities of the ENTITIES section in file order
    pub fn entities(&self) -> &[EntityType] {
        &self.entities
    }

    pub fn tables(&self) -> &Tables {
        &self.tables
    }

    /// Shortcut for `tables().layer.layers`
    pub fn layers(&self) -> &crate::tables::Table<Layer> {
        &self.tables.layer.layers
    }

    pub fn header(&self) -> &IndexMap<String, HeaderValue> {
        &self.header
    }

    /// Look up a header variable, with or without its `$` prefix
    pub fn header_value(&self, name: &str) -> Option<&HeaderValue> {
        if name.starts_with('$') {
            self.header.get(name)
        } else {
            self.header.get(&format!("${}", name))
        }
    }

    /// Diagnostics recorded while reading
    pub fn notifications(&self) -> &NotificationCollection {
        &self.notifications
    }

    pub fn handles(&self) -> &HandleIndex {
        &self.handles
    }

    /// Find an entity by handle, top level or inside a block
    pub fn entity_by_handle(&self, handle: &Handle) -> Option<&EntityType> {
        match self.handles.get(handle)? {
            ObjectRef::Entity { block: None, index } => self.entities.get(*index),
            ObjectRef::Entity {
                block: Some(name),
                index,
            } => self.blocks.get(name)?.entities.get(*index),
            ObjectRef::Block(_) => None,
        }
    }

    /// Resolve an `ownerHandle` to the object it names
    pub fn owner_of(&self, entity: &EntityType) -> Option<&ObjectRef> {
        let owner = entity.common().owner_handle.as_ref()?;
        self.handles.get(owner)
    }

    /// Block definition referenced by an INSERT; `None` when the insert
    /// names an undefined block or the entity is not an insert
    pub fn block_for(&self, entity: &EntityType) -> Option<&Block> {
        match entity {
            EntityType::Insert(insert) => self.blocks.get(&insert.name),
            _ => None,
        }
    }

    /// Count entities by DXF type name, top level only
    pub fn entity_type_counts(&self) -> IndexMap<&'static str, usize> {
        let mut counts = IndexMap::new();
        for entity in &self.entities {
            *counts.entry(entity.type_name()).or_insert(0) += 1;
        }
        counts
    }
}

/// Accumulates the pieces of a document while sections are read
///
/// Sections may repeat; each one appends to what was read before.
#[derive(Debug, Default)]
pub struct DocumentBuilder {
    header: IndexMap<String, HeaderValue>,
    blocks: IndexMap<String, Block>,
    entities: Vec<EntityType>,
    tables: Tables,
    notifications: NotificationCollection,
}

impl DocumentBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_header(&mut self, name: String, value: HeaderValue) {
        self.header.insert(name, value);
    }

    /// Add a layer; a duplicate name replaces the earlier layer
    pub fn add_layer(&mut self, layer: Layer) -> Option<Layer> {
        self.tables.layer.layers.add(layer)
    }

    pub fn add_line_type(&mut self, line_type: LineType) -> Option<LineType> {
        self.tables.line_type.line_types.add(line_type)
    }

    /// Add a block; a duplicate name replaces the earlier block
    pub fn add_block(&mut self, block: Block) -> Option<Block> {
        self.blocks.insert(block.name.clone(), block)
    }

    pub fn add_entity(&mut self, entity: EntityType) {
        self.entities.push(entity);
    }

    pub fn notifications_mut(&mut self) -> &mut NotificationCollection {
        &mut self.notifications
    }

    /// Freeze the document and index its handles
    pub fn build(self) -> DxfDoc {
        let handles = HandleIndex::build(&self.blocks, &self.entities);
        DxfDoc {
            header: self.header,
            blocks: self.blocks,
            entities: self.entities,
            tables: self.tables,
            notifications: self.notifications,
            handles,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Insert, Line};

    fn line_with_handle(handle: &str, owner: Option<&str>) -> EntityType {
        let mut line = Line::new();
        line.common.handle = Some(Handle::new(handle));
        line.common.owner_handle = owner.map(Handle::new);
        EntityType::Line(line)
    }

    #[test]
    fn test_empty_document_shape() {
        let doc = DocumentBuilder::new().build();
        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"blocks": {}, "entities": [], "tables": {"layer": {"layers": {}}}})
        );
    }

    #[test]
    fn test_handle_index() {
        let mut builder = DocumentBuilder::new();
        let mut block = Block::new("Door");
        block.handle = Some(Handle::new("1F"));
        block.entities.push(line_with_handle("20", Some("1F")));
        builder.add_block(block);
        builder.add_entity(line_with_handle("30", None));
        let doc = builder.build();

        assert_eq!(doc.handles().len(), 3);
        assert_eq!(
            doc.handles().get(&Handle::new("30")),
            Some(&ObjectRef::Entity { block: None, index: 0 })
        );
        let inner = &doc.blocks()["Door"].entities[0];
        assert_eq!(doc.owner_of(inner), Some(&ObjectRef::Block("Door".into())));
        assert!(doc.entity_by_handle(&Handle::new("20")).is_some());
        assert!(doc.entity_by_handle(&Handle::new("99")).is_none());
    }

    #[test]
    fn test_block_for_insert() {
        let mut builder = DocumentBuilder::new();
        builder.add_block(Block::new("Door"));
        builder.add_entity(EntityType::Insert(Insert::new("Door")));
        builder.add_entity(EntityType::Insert(Insert::new("Window")));
        let doc = builder.build();

        assert_eq!(doc.block_for(&doc.entities()[0]).map(|b| b.name.as_str()), Some("Door"));
        assert!(doc.block_for(&doc.entities()[1]).is_none());
    }

    #[test]
    fn test_header_lookup() {
        let mut builder = DocumentBuilder::new();
        builder.set_header(
            "$ACADVER".into(),
            HeaderValue::Value(GroupValue::Str("AC1015".into())),
        );
        builder.set_header("$INSBASE".into(), HeaderValue::Point(Vector3::ZERO));
        let doc = builder.build();

        assert_eq!(doc.header_value("ACADVER").and_then(|v| v.as_str()), Some("AC1015"));
        assert_eq!(doc.header_value("$INSBASE").and_then(|v| v.as_point()), Some(Vector3::ZERO));
        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["header"]["$ACADVER"], "AC1015");
        assert_eq!(json["header"]["$INSBASE"]["x"], 0.0);
    }

    #[test]
    fn test_type_counts() {
        let mut builder = DocumentBuilder::new();
        builder.add_entity(line_with_handle("1", None));
        builder.add_entity(line_with_handle("2", None));
        builder.add_entity(EntityType::Insert(Insert::new("X")));
        let counts = builder.build().entity_type_counts();
        assert_eq!(counts["LINE"], 2);
        assert_eq!(counts["INSERT"], 1);
    }
}
