//! Drawing entities and their decoding from record pairs.
//!
//! Every kind is a variant of the closed [`EntityType`] enum and embeds an
//! [`EntityCommon`] with the shared fields. Decoding goes through a static
//! table from [`EntityKind`] to a decoder function; the common fields are
//! decoded first so a discarded paper-space record never reaches the
//! kind-specific decoder.

use ahash::AHashMap;
use once_cell::sync::Lazy;

use crate::io::dxf::PairContainer;
use crate::tables::linetype::BY_LAYER;
use crate::types::{Color, Vector3, COLOR_BY_LAYER};

/// Implements [`Entity`] for a struct whose shared data lives in `common`.
/// Expects `Entity` and `EntityCommon` in scope at the call site.
macro_rules! impl_entity {
    ($ty:ident) => {
        impl Entity for $ty {
            fn common(&self) -> &EntityCommon { &self.common }
            fn common_mut(&mut self) -> &mut EntityCommon { &mut self.common }
        }
    };
}

pub mod arc;
pub mod circle;
pub mod dimension;
pub mod ellipse;
pub mod face3d;
pub mod insert;
pub mod kind;
pub mod line;
pub mod lwpolyline;
pub mod point;
pub mod polyface_mesh;
pub mod polygon_mesh;
pub mod polyline;
pub mod ray;
pub mod solid;
pub mod vertex;
pub mod viewport;
pub mod xline;

pub use arc::Arc;
pub use circle::Circle;
pub use dimension::Dimension;
pub use ellipse::Ellipse;
pub use face3d::{Face3D, InvisibleEdgeFlags};
pub use insert::Insert;
pub use kind::EntityKind;
pub use line::Line;
pub use lwpolyline::LwPolyline;
pub use point::Point;
pub use polyface_mesh::PolyFaceMesh;
pub use polygon_mesh::PolygonMesh;
pub use polyline::{Polyline, PolylineFlags};
pub use ray::Ray;
pub use solid::Solid;
pub use vertex::{FaceDef, FaceType, Vertex, VertexFlags};
pub use viewport::Viewport;
pub use xline::XLine;

/// Subclass marker value holding the shared entity properties
pub const ENTITY_SUBCLASS: &str = "AcDbEntity";

/// Base trait for all drawing entities
pub trait Entity {
    /// Shared entity data
    fn common(&self) -> &EntityCommon;

    /// Shared entity data, mutably
    fn common_mut(&mut self) -> &mut EntityCommon;

    /// Handle (code 5), if the record carried one
    fn handle(&self) -> Option<&str> {
        self.common().handle.as_deref()
    }

    /// Owner handle (code 330), if the record carried one
    fn owner(&self) -> Option<&str> {
        self.common().owner.as_deref()
    }

    fn layer(&self) -> &str {
        &self.common().layer
    }

    fn kind(&self) -> EntityKind {
        self.common().kind
    }

    fn is_invisible(&self) -> bool {
        self.common().invisible
    }

    /// Whether vertex records can be attached to this entity
    fn is_container(&self) -> bool {
        false
    }
}

/// Common entity data shared by all entities
#[derive(Debug, Clone, PartialEq)]
pub struct EntityCommon {
    /// Unique handle
    pub handle: Option<String>,
    /// Handle of the owning record
    pub owner: Option<String>,
    /// Kind the record was decoded as
    pub kind: EntityKind,
    /// Paper space flag (code 67)
    pub paper_space: bool,
    /// Layer name
    pub layer: String,
    /// Raw color, may be one of the inheritance sentinels
    pub color: Color,
    /// Raw line type name, may be `BYLAYER` or `BYBLOCK`
    pub line_type: String,
    /// Line type scale (code 48)
    pub line_type_scale: f64,
    /// Visibility flag (code 60), recorded but never used to skip drawing
    pub invisible: bool,
    /// Name of the block the entity was appended to
    pub block: Option<String>,
}

impl EntityCommon {
    /// Create new common entity data with defaults
    pub fn new(kind: EntityKind) -> Self {
        EntityCommon {
            handle: None,
            owner: None,
            kind,
            paper_space: false,
            layer: "0".to_string(),
            color: Color::ByLayer,
            line_type: BY_LAYER.to_string(),
            line_type_scale: 1.0,
            invisible: false,
            block: None,
        }
    }

    /// Decode the shared fields of a record.
    ///
    /// Handle and owner are read from the whole record; everything else
    /// from the `AcDbEntity` subclass, or from the whole record when that
    /// marker is missing. Returns `None` for a paper-space entity while
    /// paper space is ignored.
    pub fn from_pairs(kind: EntityKind, pairs: &PairContainer, ignore_paper_space: bool) -> Option<Self> {
        let subclass = pairs.subclass(ENTITY_SUBCLASS);
        let fields = subclass.as_ref().unwrap_or(pairs);

        let paper_space = fields.i32_or(67, 0) != 0;
        if paper_space && ignore_paper_space {
            return None;
        }

        let raw_color = fields.i32_or(62, COLOR_BY_LAYER as i32);
        Some(EntityCommon {
            handle: pairs.first_value(5).map(str::to_string),
            owner: pairs.first_value(330).map(str::to_string),
            kind,
            paper_space,
            layer: fields.value_or(8, "0").to_string(),
            color: Color::from_index(i16::try_from(raw_color).unwrap_or(COLOR_BY_LAYER)),
            line_type: fields.value_or(6, BY_LAYER).to_string(),
            line_type_scale: fields.f64_or(48, 1.0),
            invisible: fields.i32_or(60, 0) != 0,
            block: None,
        })
    }

    /// Create with a specific layer
    pub fn with_layer(kind: EntityKind, layer: impl Into<String>) -> Self {
        EntityCommon {
            layer: layer.into(),
            ..Self::new(kind)
        }
    }
}

/// Enumeration of all entity types for type-safe storage
#[derive(Debug, Clone)]
pub enum EntityType {
    Arc(Arc),
    Circle(Circle),
    Line(Line),
    Ray(Ray),
    XLine(XLine),
    Ellipse(Ellipse),
    Point(Point),
    /// Polyline vertex, only lives until it is attached
    Vertex(Vertex),
    /// Polyface face definition, only lives until it is attached
    FaceDef(FaceDef),
    Polyline(Polyline),
    LwPolyline(LwPolyline),
    PolyFaceMesh(PolyFaceMesh),
    PolygonMesh(PolygonMesh),
    Face3D(Face3D),
    /// SOLID and TRACE
    Solid(Solid),
    Insert(Insert),
    Dimension(Dimension),
    Viewport(Viewport),
}

impl EntityType {
    /// Get a reference to the entity trait object
    pub fn as_entity(&self) -> &dyn Entity {
        match self {
            EntityType::Arc(e) => e,
            EntityType::Circle(e) => e,
            EntityType::Line(e) => e,
            EntityType::Ray(e) => e,
            EntityType::XLine(e) => e,
            EntityType::Ellipse(e) => e,
            EntityType::Point(e) => e,
            EntityType::Vertex(e) => e,
            EntityType::FaceDef(e) => e,
            EntityType::Polyline(e) => e,
            EntityType::LwPolyline(e) => e,
            EntityType::PolyFaceMesh(e) => e,
            EntityType::PolygonMesh(e) => e,
            EntityType::Face3D(e) => e,
            EntityType::Solid(e) => e,
            EntityType::Insert(e) => e,
            EntityType::Dimension(e) => e,
            EntityType::Viewport(e) => e,
        }
    }

    /// Get a mutable reference to the entity trait object
    pub fn as_entity_mut(&mut self) -> &mut dyn Entity {
        match self {
            EntityType::Arc(e) => e,
            EntityType::Circle(e) => e,
            EntityType::Line(e) => e,
            EntityType::Ray(e) => e,
            EntityType::XLine(e) => e,
            EntityType::Ellipse(e) => e,
            EntityType::Point(e) => e,
            EntityType::Vertex(e) => e,
            EntityType::FaceDef(e) => e,
            EntityType::Polyline(e) => e,
            EntityType::LwPolyline(e) => e,
            EntityType::PolyFaceMesh(e) => e,
            EntityType::PolygonMesh(e) => e,
            EntityType::Face3D(e) => e,
            EntityType::Solid(e) => e,
            EntityType::Insert(e) => e,
            EntityType::Dimension(e) => e,
            EntityType::Viewport(e) => e,
        }
    }

    pub fn common(&self) -> &EntityCommon {
        self.as_entity().common()
    }

    pub fn common_mut(&mut self) -> &mut EntityCommon {
        self.as_entity_mut().common_mut()
    }

    pub fn kind(&self) -> EntityKind {
        self.common().kind
    }

    pub fn handle(&self) -> Option<&str> {
        self.as_entity().handle()
    }

    pub fn is_container(&self) -> bool {
        self.as_entity().is_container()
    }

    /// Split off a vertex or face record; any other entity comes back as is
    pub fn into_vertex_record(self) -> std::result::Result<VertexRecord, EntityType> {
        match self {
            EntityType::Vertex(v) => Ok(VertexRecord::Vertex(v)),
            EntityType::FaceDef(f) => Ok(VertexRecord::FaceDef(f)),
            other => Err(other),
        }
    }

    /// Absorb a vertex or face record into this container.
    ///
    /// Polylines and polygon meshes take vertices; polyface meshes also take
    /// face definitions. A record this entity cannot hold is handed back.
    pub fn attach(&mut self, record: VertexRecord) -> std::result::Result<(), VertexRecord> {
        match (self, record) {
            (EntityType::Polyline(p), VertexRecord::Vertex(v)) => p.add_vertex(v),
            (EntityType::PolygonMesh(m), VertexRecord::Vertex(v)) => m.base.add_vertex(v),
            (EntityType::PolyFaceMesh(m), VertexRecord::Vertex(v)) => m.base.add_vertex(v),
            (EntityType::PolyFaceMesh(m), VertexRecord::FaceDef(f)) => m.faces.push(f),
            (_, record) => return Err(record),
        }
        Ok(())
    }
}

/// A sub-record that belongs to a polyline-like container
#[derive(Debug, Clone)]
pub enum VertexRecord {
    Vertex(Vertex),
    FaceDef(FaceDef),
}

impl VertexRecord {
    pub fn kind(&self) -> EntityKind {
        match self {
            VertexRecord::Vertex(v) => v.common.kind,
            VertexRecord::FaceDef(f) => f.common.kind,
        }
    }

    pub fn owner(&self) -> Option<&str> {
        match self {
            VertexRecord::Vertex(v) => v.owner(),
            VertexRecord::FaceDef(f) => f.owner(),
        }
    }
}

/// Result of decoding one entity record
#[derive(Debug, Clone)]
pub enum DecodeOutcome {
    Decoded(EntityType),
    /// Paper-space entity while paper space is ignored
    Discarded,
    /// Kind outside the supported set; nothing was built
    Unsupported,
    /// Supported record that carries no entity (SEQEND)
    Empty,
}

/// Kind-specific decoder, run after the common fields are decoded
pub type Decoder = fn(EntityCommon, &PairContainer) -> EntityType;

static DECODERS: Lazy<AHashMap<EntityKind, Decoder>> = Lazy::new(|| {
    let mut map: AHashMap<EntityKind, Decoder> = AHashMap::new();
    map.insert(EntityKind::Arc, decode_arc as Decoder);
    map.insert(EntityKind::Circle, decode_circle as Decoder);
    map.insert(EntityKind::Line, decode_line as Decoder);
    map.insert(EntityKind::Ray, decode_ray as Decoder);
    map.insert(EntityKind::XLine, decode_xline as Decoder);
    map.insert(EntityKind::Ellipse, decode_ellipse as Decoder);
    map.insert(EntityKind::Point, decode_point as Decoder);
    map.insert(EntityKind::Vertex, decode_vertex as Decoder);
    map.insert(EntityKind::Polyline, decode_polyline as Decoder);
    map.insert(EntityKind::LwPolyline, decode_lwpolyline as Decoder);
    map.insert(EntityKind::Face3D, decode_face3d as Decoder);
    map.insert(EntityKind::Solid, decode_solid as Decoder);
    map.insert(EntityKind::Trace, decode_solid as Decoder);
    map.insert(EntityKind::Insert, decode_insert as Decoder);
    map.insert(EntityKind::Dimension, decode_dimension as Decoder);
    map.insert(EntityKind::Viewport, decode_viewport as Decoder);
    map
});

/// Decode one entity record of the given kind
pub fn decode(kind: EntityKind, pairs: &PairContainer, ignore_paper_space: bool) -> DecodeOutcome {
    if !kind.is_supported() {
        return DecodeOutcome::Unsupported;
    }
    let Some(decoder) = DECODERS.get(&kind) else {
        return DecodeOutcome::Empty;
    };
    match EntityCommon::from_pairs(kind, pairs, ignore_paper_space) {
        Some(common) => DecodeOutcome::Decoded(decoder(common, pairs)),
        None => DecodeOutcome::Discarded,
    }
}

fn decode_arc(common: EntityCommon, pairs: &PairContainer) -> EntityType {
    EntityType::Arc(Arc::from_pairs(common, pairs))
}

fn decode_circle(common: EntityCommon, pairs: &PairContainer) -> EntityType {
    EntityType::Circle(Circle::from_pairs(common, pairs))
}

fn decode_line(common: EntityCommon, pairs: &PairContainer) -> EntityType {
    EntityType::Line(Line::from_pairs(common, pairs))
}

fn decode_ray(common: EntityCommon, pairs: &PairContainer) -> EntityType {
    EntityType::Ray(Ray::from_pairs(common, pairs))
}

fn decode_xline(common: EntityCommon, pairs: &PairContainer) -> EntityType {
    EntityType::XLine(XLine::from_pairs(common, pairs))
}

fn decode_ellipse(common: EntityCommon, pairs: &PairContainer) -> EntityType {
    EntityType::Ellipse(Ellipse::from_pairs(common, pairs))
}

fn decode_point(common: EntityCommon, pairs: &PairContainer) -> EntityType {
    EntityType::Point(Point::from_pairs(common, pairs))
}

/// A VERTEX with a non-zero code 71 is a polyface face definition
fn decode_vertex(mut common: EntityCommon, pairs: &PairContainer) -> EntityType {
    if pairs.i32_or(71, 0) != 0 {
        common.kind = EntityKind::FaceDef;
        EntityType::FaceDef(FaceDef::from_pairs(common, pairs))
    } else {
        EntityType::Vertex(Vertex::from_pairs(common, pairs))
    }
}

/// POLYLINE records also carry polygon and polyface meshes, told apart by
/// the flag word.
fn decode_polyline(mut common: EntityCommon, pairs: &PairContainer) -> EntityType {
    let flags = PolylineFlags::from_bits_retain(pairs.i32_or(70, 0));
    if flags.contains(PolylineFlags::POLYGON_MESH) {
        common.kind = EntityKind::Polygon3D;
        EntityType::PolygonMesh(PolygonMesh::from_pairs(common, pairs))
    } else if flags.contains(PolylineFlags::POLYFACE_MESH) {
        common.kind = EntityKind::PolyFace3D;
        EntityType::PolyFaceMesh(PolyFaceMesh::from_pairs(common, pairs))
    } else {
        EntityType::Polyline(Polyline::from_pairs(common, pairs))
    }
}

fn decode_lwpolyline(common: EntityCommon, pairs: &PairContainer) -> EntityType {
    EntityType::LwPolyline(LwPolyline::from_pairs(common, pairs))
}

fn decode_face3d(common: EntityCommon, pairs: &PairContainer) -> EntityType {
    EntityType::Face3D(Face3D::from_pairs(common, pairs))
}

fn decode_solid(common: EntityCommon, pairs: &PairContainer) -> EntityType {
    EntityType::Solid(Solid::from_pairs(common, pairs))
}

fn decode_insert(common: EntityCommon, pairs: &PairContainer) -> EntityType {
    EntityType::Insert(Insert::from_pairs(common, pairs))
}

fn decode_dimension(common: EntityCommon, pairs: &PairContainer) -> EntityType {
    EntityType::Dimension(Dimension::from_pairs(common, pairs))
}

fn decode_viewport(common: EntityCommon, pairs: &PairContainer) -> EntityType {
    EntityType::Viewport(Viewport::from_pairs(common, pairs))
}

/// Read a point whose X is stored under `x_code`, Y under `x_code + 10` and
/// Z under `x_code + 20`. Missing coordinates are zero.
pub(crate) fn read_point(pairs: &PairContainer, x_code: i32) -> Vector3 {
    Vector3::new(
        pairs.f64_or(x_code, 0.0),
        pairs.f64_or(x_code + 10, 0.0),
        pairs.f64_or(x_code + 20, 0.0),
    )
}

/// Extrusion direction (210/220/230), `UNIT_Z` when absent
pub(crate) fn read_normal(pairs: &PairContainer) -> Vector3 {
    if pairs.first_value(210).is_none() && pairs.first_value(220).is_none() && pairs.first_value(230).is_none() {
        return Vector3::UNIT_Z;
    }
    read_point(pairs, 210)
}
