//! Drawing document: blocks, symbol tables and the entity arena

use crate::entities::{EntityType, VertexRecord};
use crate::error::{DxfError, Result};
use crate::notification::{NotificationCollection, NotificationType};
use crate::statistics::ParseStatistics;
use crate::tables::{Layer, LineType, Table, TableEntry};
use crate::types::{Color, DistanceUnit, Vector2, COLOR_BY_BLOCK};
use ahash::AHashMap;
use tracing::warn;

/// Name of the model space root block
pub const MODEL_SPACE: &str = "*MODEL_SPACE";

/// Name of the paper space root block
pub const PAPER_SPACE: &str = "*PAPER_SPACE";

/// True for the two root block names, compared case-insensitively
pub fn is_reserved_block(name: &str) -> bool {
    name.eq_ignore_ascii_case(MODEL_SPACE) || name.eq_ignore_ascii_case(PAPER_SPACE)
}

/// Lifecycle of a [`Document`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentPhase {
    /// Being filled by the reader
    Parsing,
    /// Read-only, ready to flatten
    Flattening,
    /// Contents released; unusable
    Cleared,
}

/// Index of an entity in the document arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(usize);

impl EntityId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// A named, ordered list of entities
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    /// Block name
    pub name: String,
    /// Base point (codes 10/20)
    pub base_point: Vector2,
    /// Block flags (code 70)
    pub flags: i32,
    /// Color forced onto every child, used for dimension arrow blocks
    pub property_override: Option<Color>,
    entities: Vec<EntityId>,
}

impl Block {
    pub fn new(name: impl Into<String>) -> Self {
        Block {
            name: name.into(),
            base_point: Vector2::ZERO,
            flags: 0,
            property_override: None,
            entities: Vec::new(),
        }
    }

    /// Entities in paint order
    pub fn entities(&self) -> &[EntityId] {
        &self.entities
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn is_reserved(&self) -> bool {
        is_reserved_block(&self.name)
    }
}

impl TableEntry for Block {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Header values the flattener and callers care about
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderVariables {
    /// LTSCALE - global line type scale
    pub line_type_scale: f64,
    /// LIMMIN - lower-left drawing limit
    pub limits_min: Vector2,
    /// LIMMAX - upper-right drawing limit
    pub limits_max: Vector2,
    /// INSUNITS - drawing unit
    pub distance_unit: DistanceUnit,
}

impl Default for HeaderVariables {
    fn default() -> Self {
        HeaderVariables {
            line_type_scale: 1.0,
            limits_min: Vector2::ZERO,
            limits_max: Vector2::ZERO,
            distance_unit: DistanceUnit::Unitless,
        }
    }
}

/// A drawing read from a DXF stream.
///
/// Entities live in an arena and are referenced by [`EntityId`] from the
/// blocks that own them. The document is filled during the
/// [`DocumentPhase::Parsing`] phase, frozen by [`Document::finish_parsing`]
/// and then only read by the flattener.
#[derive(Debug, Clone)]
pub struct Document {
    phase: DocumentPhase,

    header: HeaderVariables,

    /// Blocks by name, including the two root blocks
    blocks: Table<Block>,

    /// Layer table
    layers: Table<Layer>,

    /// Line type table
    line_types: Table<LineType>,

    /// Every entity placed in a block
    arena: Vec<EntityType>,

    /// Handle registry
    handles: AHashMap<String, EntityId>,

    /// Most recently placed entity, the container fallback for vertices
    /// that carry no owner handle
    last_added: Option<EntityId>,

    /// Blocks used as dimension arrow heads
    arrow_blocks: Vec<String>,

    default_layer: Layer,
    default_line_type: LineType,

    /// Notifications collected while reading and flattening
    pub notifications: NotificationCollection,

    /// Per-kind reading counters
    pub statistics: ParseStatistics,
}

impl Document {
    /// Create an empty document holding only the two root blocks
    pub fn new() -> Self {
        let mut blocks = Table::new();
        blocks.insert(Block::new(MODEL_SPACE));
        blocks.insert(Block::new(PAPER_SPACE));

        Document {
            phase: DocumentPhase::Parsing,
            header: HeaderVariables::default(),
            blocks,
            layers: Table::new(),
            line_types: Table::new(),
            arena: Vec::new(),
            handles: AHashMap::new(),
            last_added: None,
            arrow_blocks: Vec::new(),
            default_layer: Layer::default_layer(),
            default_line_type: LineType::continuous(),
            notifications: NotificationCollection::new(),
            statistics: ParseStatistics::new(),
        }
    }

    pub fn phase(&self) -> DocumentPhase {
        self.phase
    }

    /// Fail unless the document is in `expected`
    pub(crate) fn ensure_phase(&self, expected: DocumentPhase) -> Result<()> {
        match self.phase {
            actual if actual == expected => Ok(()),
            DocumentPhase::Cleared => Err(DxfError::DocumentCleared),
            actual => Err(DxfError::InvalidPhase { expected, actual }),
        }
    }

    // ---- building, Parsing phase only ----

    pub(crate) fn header_mut(&mut self) -> Result<&mut HeaderVariables> {
        self.ensure_phase(DocumentPhase::Parsing)?;
        Ok(&mut self.header)
    }

    /// Register a block. A block with the same name is replaced, and the
    /// handles of the replaced definition's entities are released.
    pub(crate) fn add_block(&mut self, block: Block) -> Result<()> {
        self.ensure_phase(DocumentPhase::Parsing)?;
        let Some(replaced) = self.blocks.insert(block) else {
            return Ok(());
        };

        let dropped = &replaced.entities;
        self.handles.retain(|_, id| !dropped.contains(id));
        if self.last_added.is_some_and(|id| dropped.contains(&id)) {
            self.last_added = None;
        }
        warn!(block = %replaced.name, entities = dropped.len(), "duplicate block definition replaced");
        self.notifications.reading(
            NotificationType::Warning,
            format!("Block {} is defined again, the later definition wins", replaced.name),
        );
        Ok(())
    }

    pub(crate) fn add_layer(&mut self, layer: Layer) -> Result<()> {
        self.ensure_phase(DocumentPhase::Parsing)?;
        self.layers.insert(layer);
        Ok(())
    }

    pub(crate) fn add_line_type(&mut self, line_type: LineType) -> Result<()> {
        self.ensure_phase(DocumentPhase::Parsing)?;
        self.line_types.insert(line_type);
        Ok(())
    }

    /// Remember a dimension arrow block name; blank and repeated names are
    /// ignored.
    pub(crate) fn add_arrow_block(&mut self, name: &str) -> Result<()> {
        self.ensure_phase(DocumentPhase::Parsing)?;
        let name = name.trim();
        if name.is_empty()
            || self
                .arrow_blocks
                .iter()
                .any(|known| known.eq_ignore_ascii_case(name))
        {
            return Ok(());
        }
        self.arrow_blocks.push(name.to_string());
        Ok(())
    }

    /// Append an entity to the named block.
    ///
    /// The entity is registered under its handle and becomes the last added
    /// entity.
    pub(crate) fn add_entity(&mut self, block: &str, mut entity: EntityType) -> Result<EntityId> {
        self.ensure_phase(DocumentPhase::Parsing)?;
        let id = EntityId(self.arena.len());

        let target = self
            .blocks
            .get_mut(block)
            .ok_or_else(|| DxfError::UnknownBlock(block.to_string()))?;
        target.entities.push(id);
        entity.common_mut().block = Some(target.name.clone());

        if let Some(handle) = entity.handle() {
            if self.handles.insert(handle.to_string(), id).is_some() {
                warn!(handle, "duplicate entity handle");
                self.notifications.reading(
                    NotificationType::Warning,
                    format!("Duplicate handle {handle}, the later entity wins"),
                );
            }
        }

        self.arena.push(entity);
        self.last_added = Some(id);
        Ok(id)
    }

    /// Attach a vertex or face record to its container.
    ///
    /// The container is the entity registered under the record's owner
    /// handle, or the last added entity when the record has no owner.
    /// Returns `false` when no container accepted the record.
    pub(crate) fn attach_vertex(&mut self, record: VertexRecord) -> Result<bool> {
        self.ensure_phase(DocumentPhase::Parsing)?;

        let container = match record.owner() {
            Some(owner) => self.handles.get(owner).copied(),
            None => self.last_added,
        };

        let kind = record.kind();
        let rejected = match container.and_then(|id| self.arena.get_mut(id.0)) {
            Some(entity) => entity.attach(record).err(),
            None => Some(record),
        };

        match rejected {
            None => Ok(true),
            Some(record) => {
                let owner = record.owner().unwrap_or("<none>");
                warn!(%kind, owner, "vertex record has no container");
                self.notifications.reading(
                    NotificationType::Warning,
                    format!("{kind} record with owner {owner} has no container"),
                );
                Ok(false)
            }
        }
    }

    /// End the parsing phase.
    ///
    /// Every arrow block that exists gets a BYBLOCK color override so its
    /// children take the color of the dimension drawing it.
    pub fn finish_parsing(&mut self) -> Result<()> {
        self.ensure_phase(DocumentPhase::Parsing)?;

        for name in &self.arrow_blocks {
            if let Some(block) = self.blocks.get_mut(name) {
                block.property_override = Some(Color::from_index(COLOR_BY_BLOCK));
            }
        }

        self.phase = DocumentPhase::Flattening;
        Ok(())
    }

    /// Release every block, table and entity. The document cannot be
    /// flattened afterwards.
    pub fn clear(&mut self) {
        self.blocks.clear();
        self.layers.clear();
        self.line_types.clear();
        self.arena.clear();
        self.arena.shrink_to_fit();
        self.handles.clear();
        self.last_added = None;
        self.arrow_blocks.clear();
        self.phase = DocumentPhase::Cleared;
    }

    // ---- queries ----

    pub fn header(&self) -> &HeaderVariables {
        &self.header
    }

    pub fn line_type_scale(&self) -> f64 {
        self.header.line_type_scale
    }

    pub fn limits(&self) -> (Vector2, Vector2) {
        (self.header.limits_min, self.header.limits_max)
    }

    pub fn distance_unit(&self) -> DistanceUnit {
        self.header.distance_unit
    }

    /// Arrow block names, in the order they were declared
    pub fn arrow_blocks(&self) -> &[String] {
        &self.arrow_blocks
    }

    /// Block by name (case-insensitive)
    pub fn block(&self, name: &str) -> Option<&Block> {
        self.blocks.get(name)
    }

    pub fn model_space(&self) -> Option<&Block> {
        self.blocks.get(MODEL_SPACE)
    }

    pub fn paper_space(&self) -> Option<&Block> {
        self.blocks.get(PAPER_SPACE)
    }

    /// Block names in declaration order, root blocks first
    pub fn block_names(&self) -> impl Iterator<Item = &str> {
        self.blocks.names()
    }

    /// Layer names in declaration order
    pub fn layer_names(&self) -> impl Iterator<Item = &str> {
        self.layers.names()
    }

    pub fn line_type_names(&self) -> impl Iterator<Item = &str> {
        self.line_types.names()
    }

    /// Layer by name, or the default layer when it is not in the table
    pub fn layer(&self, name: &str) -> &Layer {
        self.layers.get(name).unwrap_or(&self.default_layer)
    }

    /// Whether a layer with this exact name (case-insensitive) was declared
    pub fn has_layer(&self, name: &str) -> bool {
        self.layers.contains(name)
    }

    /// Line type by name, or CONTINUOUS when it is not in the table
    pub fn line_type(&self, name: &str) -> &LineType {
        self.line_types.get(name).unwrap_or(&self.default_line_type)
    }

    pub fn has_line_type(&self, name: &str) -> bool {
        self.line_types.contains(name)
    }

    pub fn entity(&self, id: EntityId) -> Option<&EntityType> {
        self.arena.get(id.0)
    }

    /// Entity registered under `handle`
    pub fn entity_by_handle(&self, handle: &str) -> Option<&EntityType> {
        self.handles.get(handle).and_then(|id| self.arena.get(id.0))
    }

    pub fn entity_id_by_handle(&self, handle: &str) -> Option<EntityId> {
        self.handles.get(handle).copied()
    }

    /// The most recently placed entity
    pub fn last_added(&self) -> Option<EntityId> {
        self.last_added
    }

    /// Entities of a block, in paint order
    pub fn block_entities<'a>(
        &'a self,
        block: &'a Block,
    ) -> impl Iterator<Item = (EntityId, &'a EntityType)> + 'a {
        block
            .entities
            .iter()
            .filter_map(move |&id| self.arena.get(id.0).map(|entity| (id, entity)))
    }

    /// Number of entities placed in blocks that are still defined
    pub fn entity_count(&self) -> usize {
        self.blocks.iter().map(|block| block.entities.len()).sum()
    }

    pub fn handle_count(&self) -> usize {
        self.handles.len()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{
        EntityCommon, EntityKind, Line, Polyline, Vertex,
    };
    use crate::types::Vector3;

    fn line(handle: Option<&str>) -> EntityType {
        let mut common = EntityCommon::new(EntityKind::Line);
        common.handle = handle.map(str::to_string);
        EntityType::Line(Line::from_points(common, Vector3::ZERO, Vector3::new(1.0, 0.0, 0.0)))
    }

    fn polyline(handle: Option<&str>) -> EntityType {
        let mut common = EntityCommon::new(EntityKind::Polyline);
        common.handle = handle.map(str::to_string);
        EntityType::Polyline(Polyline::new(common))
    }

    fn vertex(owner: Option<&str>, x: f64) -> VertexRecord {
        let mut common = EntityCommon::new(EntityKind::Vertex);
        common.owner = owner.map(str::to_string);
        VertexRecord::Vertex(Vertex::new(common, Vector3::new(x, 0.0, 0.0)))
    }

    fn vertex_count(doc: &Document, handle: &str) -> usize {
        match doc.entity_by_handle(handle) {
            Some(EntityType::Polyline(p)) => p.poly_vertices.len(),
            _ => panic!("not a polyline"),
        }
    }

    #[test]
    fn test_new_document_has_root_blocks() {
        let doc = Document::new();
        assert_eq!(doc.phase(), DocumentPhase::Parsing);
        assert!(doc.block("*model_space").is_some());
        assert!(doc.paper_space().is_some());
        let names: Vec<&str> = doc.block_names().collect();
        assert_eq!(names, vec![MODEL_SPACE, PAPER_SPACE]);
    }

    #[test]
    fn test_add_entity_registers_handle_and_last_added() {
        let mut doc = Document::new();
        let id = doc.add_entity(MODEL_SPACE, line(Some("1A"))).unwrap();

        assert_eq!(doc.last_added(), Some(id));
        assert_eq!(doc.entity_id_by_handle("1A"), Some(id));
        assert_eq!(doc.model_space().unwrap().entities(), &[id]);
        assert_eq!(
            doc.entity(id).unwrap().common().block.as_deref(),
            Some(MODEL_SPACE)
        );
    }

    #[test]
    fn test_add_entity_to_unknown_block_fails() {
        let mut doc = Document::new();
        let err = doc.add_entity("NOPE", line(None)).unwrap_err();
        assert!(matches!(err, DxfError::UnknownBlock(name) if name == "NOPE"));
        assert_eq!(doc.entity_count(), 0);
    }

    #[test]
    fn test_vertex_attaches_by_owner_handle() {
        let mut doc = Document::new();
        doc.add_entity(MODEL_SPACE, polyline(Some("10"))).unwrap();
        doc.add_entity(MODEL_SPACE, polyline(Some("20"))).unwrap();

        assert!(doc.attach_vertex(vertex(Some("10"), 1.0)).unwrap());
        assert_eq!(vertex_count(&doc, "10"), 1);
        assert_eq!(vertex_count(&doc, "20"), 0);
    }

    #[test]
    fn test_vertex_without_owner_uses_last_added() {
        let mut doc = Document::new();
        doc.add_entity(MODEL_SPACE, polyline(Some("10"))).unwrap();
        doc.add_entity(MODEL_SPACE, polyline(Some("20"))).unwrap();

        assert!(doc.attach_vertex(vertex(None, 1.0)).unwrap());
        assert_eq!(vertex_count(&doc, "10"), 0);
        assert_eq!(vertex_count(&doc, "20"), 1);
    }

    #[test]
    fn test_unknown_owner_does_not_fall_back() {
        let mut doc = Document::new();
        doc.add_entity(MODEL_SPACE, polyline(Some("10"))).unwrap();

        assert!(!doc.attach_vertex(vertex(Some("FF"), 1.0)).unwrap());
        assert_eq!(vertex_count(&doc, "10"), 0);
        assert!(doc.notifications.has_type(NotificationType::Warning));
    }

    #[test]
    fn test_vertex_rejected_by_non_container() {
        let mut doc = Document::new();
        doc.add_entity(MODEL_SPACE, line(Some("1"))).unwrap();
        assert!(!doc.attach_vertex(vertex(None, 1.0)).unwrap());
    }

    #[test]
    fn test_redefined_block_releases_old_handles() {
        let mut doc = Document::new();
        doc.add_block(Block::new("Door")).unwrap();
        doc.add_entity("Door", line(Some("A1"))).unwrap();
        doc.add_entity("Door", line(Some("A2"))).unwrap();
        doc.add_entity(MODEL_SPACE, line(Some("B1"))).unwrap();
        doc.add_entity("Door", polyline(Some("A3"))).unwrap();

        doc.add_block(Block::new("DOOR")).unwrap();
        assert!(doc.entity_by_handle("A1").is_none());
        assert!(doc.entity_by_handle("A3").is_none());
        assert!(doc.entity_by_handle("B1").is_some());
        assert_eq!(doc.handle_count(), 1);
        assert_eq!(doc.last_added(), None);
        assert_eq!(doc.entity_count(), 1);
        assert!(doc.block("door").unwrap().is_empty());
        assert!(doc.notifications.has_type(NotificationType::Warning));

        // a legacy vertex after the redefinition has nothing to join
        assert!(!doc.attach_vertex(vertex(None, 1.0)).unwrap());
    }

    #[test]
    fn test_arrow_blocks_dedup_and_override() {
        let mut doc = Document::new();
        doc.add_block(Block::new("_ArchTick")).unwrap();
        doc.add_arrow_block("_ArchTick").unwrap();
        doc.add_arrow_block("_ARCHTICK").unwrap();
        doc.add_arrow_block("  ").unwrap();
        doc.add_arrow_block("_Missing").unwrap();
        assert_eq!(doc.arrow_blocks(), &["_ArchTick", "_Missing"]);

        doc.finish_parsing().unwrap();
        assert_eq!(doc.phase(), DocumentPhase::Flattening);
        assert_eq!(
            doc.block("_archtick").unwrap().property_override,
            Some(Color::ByBlock)
        );
        assert_eq!(doc.model_space().unwrap().property_override, None);
    }

    #[test]
    fn test_mutation_after_parsing_is_rejected() {
        let mut doc = Document::new();
        doc.finish_parsing().unwrap();

        let err = doc.add_entity(MODEL_SPACE, line(None)).unwrap_err();
        assert!(matches!(
            err,
            DxfError::InvalidPhase {
                expected: DocumentPhase::Parsing,
                actual: DocumentPhase::Flattening
            }
        ));
        assert!(doc.finish_parsing().is_err());
    }

    #[test]
    fn test_clear_releases_everything() {
        let mut doc = Document::new();
        doc.add_entity(MODEL_SPACE, line(Some("1"))).unwrap();
        doc.finish_parsing().unwrap();
        doc.clear();

        assert_eq!(doc.phase(), DocumentPhase::Cleared);
        assert_eq!(doc.entity_count(), 0);
        assert!(doc.model_space().is_none());
        assert!(doc.entity_by_handle("1").is_none());
        assert!(matches!(
            doc.ensure_phase(DocumentPhase::Flattening),
            Err(DxfError::DocumentCleared)
        ));
    }

    #[test]
    fn test_table_fallbacks() {
        let mut doc = Document::new();
        doc.add_layer(Layer::new("Walls", 0, 3, "DASHED")).unwrap();

        assert_eq!(doc.layer("WALLS").color, 3);
        assert_eq!(doc.layer("unknown").color, 7);
        assert!(doc.line_type("DASHED").is_continuous());
        assert_eq!(doc.line_type("DASHED").name, "CONTINUOUS");
    }
}
