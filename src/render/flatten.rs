//! Block tree flattening
//!
//! Walks a root block depth-first in paint order and turns every drawable
//! entity into a [`RenderItem`]. Inserts and dimensions descend into their
//! blocks with a composed transform and a fresh [`ResolutionContext`].
//! Per-entity problems are counted and reported; they never stop siblings
//! from being drawn.

use super::primitive::{Primitive, RenderItem};
use super::resolve::{dash_pattern, ResolutionContext};
use crate::document::{Block, Document, DocumentPhase, MODEL_SPACE};
use crate::entities::{
    Dimension, Ellipse, EntityType, Insert, LwPolyline, PolyFaceMesh, PolygonMesh, Polyline,
};
use crate::error::{DxfError, Result};
use crate::geometry::{vertex_list, NUMBER_OF_GRADS};
use crate::notification::{NotificationCollection, NotificationType};
use crate::tables::LineType;
use crate::types::{Color, Transform2D, Vector2};
use tracing::{debug, warn};

/// Rotation added to an open elliptical arc drawn as an arc primitive
pub const ELLIPSE_ARC_ROTATION_OFFSET_DEG: f64 = -90.0;

/// Where and how to start flattening
#[derive(Debug, Clone, PartialEq)]
pub struct FlattenOptions {
    /// Name of the root block
    pub block: String,
    /// Transform applied to the root block
    pub transform: Transform2D,
    /// Stroke scale of the root block
    pub stroke_scale: f64,
}

impl Default for FlattenOptions {
    fn default() -> Self {
        FlattenOptions {
            block: MODEL_SPACE.to_string(),
            transform: Transform2D::identity(),
            stroke_scale: 1.0,
        }
    }
}

impl FlattenOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_block(mut self, block: impl Into<String>) -> Self {
        self.block = block.into();
        self
    }

    pub fn with_transform(mut self, transform: Transform2D) -> Self {
        self.transform = transform;
        self
    }

    pub fn with_stroke_scale(mut self, stroke_scale: f64) -> Self {
        self.stroke_scale = stroke_scale;
        self
    }
}

/// Outcome counts over every visited entity, nested ones included
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlattenReport {
    /// Entities that produced output or descended into a block
    pub drawn: usize,
    /// Entities on an off layer, with nothing to draw, or degenerate
    pub skipped: usize,
    /// Entities whose block or vertex references could not be resolved
    pub failed: usize,
}

impl FlattenReport {
    pub fn total(&self) -> usize {
        self.drawn + self.skipped + self.failed
    }

    pub fn is_clean(&self) -> bool {
        self.failed == 0
    }

    fn record(&mut self, outcome: ChildOutcome) {
        match outcome {
            ChildOutcome::Drawn => self.drawn += 1,
            ChildOutcome::Skipped => self.skipped += 1,
            ChildOutcome::Failed => self.failed += 1,
        }
    }
}

/// Result of a flatten call
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Flattened {
    /// Render items in paint order
    pub items: Vec<RenderItem>,
    pub report: FlattenReport,
}

impl Flattened {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ChildOutcome {
    Drawn,
    Skipped,
    Failed,
}

/// Placement shared by every entity of one block visit
#[derive(Debug, Clone, Copy)]
struct Frame {
    transform: Transform2D,
    stroke_scale: f64,
}

/// Resolved style of one entity
struct Style<'d> {
    color: Color,
    line_type: &'d LineType,
    dash: Vec<f64>,
}

struct Flattener<'d> {
    document: &'d Document,
    items: Vec<RenderItem>,
    report: FlattenReport,
    /// Upper-cased names of the blocks being visited, outermost first
    active: Vec<String>,
    notifications: NotificationCollection,
}

impl<'d> Flattener<'d> {
    fn new(document: &'d Document) -> Self {
        Flattener {
            document,
            items: Vec::new(),
            report: FlattenReport::default(),
            active: Vec::new(),
            notifications: NotificationCollection::new(),
        }
    }

    fn run(mut self, root: &'d Block, options: &FlattenOptions) -> (Flattened, NotificationCollection) {
        let frame = Frame {
            transform: options.transform,
            stroke_scale: options.stroke_scale,
        };
        let context = ResolutionContext::default().for_block(root);
        self.flatten_block(root, &context, frame);

        let flattened = Flattened {
            items: self.items,
            report: self.report,
        };
        (flattened, self.notifications)
    }

    fn flatten_block(&mut self, block: &'d Block, context: &ResolutionContext, frame: Frame) {
        let document = self.document;
        self.active.push(block.name.to_uppercase());
        for (_, entity) in document.block_entities(block) {
            let outcome = self.flatten_entity(entity, context, frame);
            self.report.record(outcome);
        }
        self.active.pop();
    }

    fn flatten_entity(&mut self, entity: &'d EntityType, context: &ResolutionContext, frame: Frame) -> ChildOutcome {
        let document = self.document;
        let common = entity.common();
        if !document.layer(&common.layer).is_on() {
            return ChildOutcome::Skipped;
        }

        let line_type = context.resolve_line_type(document, common);
        let style = Style {
            color: context.resolve_color(document, common),
            line_type,
            dash: dash_pattern(document, line_type, common),
        };

        match entity {
            EntityType::Line(line) => {
                self.emit(Primitive::segment(line.start.xy(), line.end.xy()), &style, frame)
            }
            EntityType::Ray(ray) => {
                let (start, end) = ray.segment();
                self.emit(Primitive::segment(start, end), &style, frame)
            }
            EntityType::XLine(xline) => {
                let (start, end) = xline.segment();
                self.emit(Primitive::segment(start, end), &style, frame)
            }
            EntityType::Arc(arc) => {
                let primitive = Primitive::Arc {
                    center: arc.center.xy(),
                    radius_x: arc.radius,
                    radius_y: arc.radius,
                    start_angle: -arc.start_angle,
                    sweep: -arc.sweep(),
                };
                self.emit(primitive, &style, frame)
            }
            EntityType::Circle(circle) => {
                self.emit(Primitive::circle(circle.center.xy(), circle.radius), &style, frame)
            }
            EntityType::Ellipse(ellipse) => self.flatten_ellipse(ellipse, &style, frame),
            EntityType::Polyline(polyline) => self.flatten_polyline(polyline, &style, frame),
            EntityType::LwPolyline(polyline) => self.flatten_lwpolyline(polyline, &style, frame),
            EntityType::PolyFaceMesh(mesh) => self.flatten_polyface(mesh, &style, frame),
            EntityType::PolygonMesh(mesh) => self.flatten_polygon_mesh(mesh, &style, frame),
            EntityType::Face3D(face) => self.emit_polygon(face.outline(), &style, frame),
            EntityType::Solid(solid) => self.emit_polygon(solid.outline(), &style, frame),
            EntityType::Insert(insert) => self.flatten_insert(insert, &style, frame),
            EntityType::Dimension(dimension) => {
                self.flatten_dimension(dimension, &style, context, frame)
            }
            EntityType::Point(_)
            | EntityType::Viewport(_)
            | EntityType::Vertex(_)
            | EntityType::FaceDef(_) => ChildOutcome::Skipped,
        }
    }

    fn push(&mut self, primitive: Primitive, color: Color, dash: Vec<f64>, frame: Frame) {
        self.items.push(RenderItem {
            primitive,
            color,
            dash,
            transform: frame.transform,
            stroke_scale: frame.stroke_scale,
        });
    }

    fn emit(&mut self, primitive: Primitive, style: &Style<'_>, frame: Frame) -> ChildOutcome {
        self.push(primitive, style.color, style.dash.clone(), frame);
        ChildOutcome::Drawn
    }

    /// Faces are filled outlines and are never dashed
    fn emit_polygon(&mut self, vertices: Vec<Vector2>, style: &Style<'_>, frame: Frame) -> ChildOutcome {
        self.push(Primitive::Polygon { vertices }, style.color, Vec::new(), frame);
        ChildOutcome::Drawn
    }

    fn flatten_ellipse(&mut self, ellipse: &Ellipse, style: &Style<'_>, frame: Frame) -> ChildOutcome {
        let continuous = style.line_type.is_continuous();
        let closed = ellipse.is_closed();

        if continuous && closed && ellipse.is_circular() {
            let circle = Primitive::circle(ellipse.center.xy(), ellipse.major_radius());
            return self.emit(circle, style, frame);
        }

        if continuous && frame.transform.is_identity() {
            let (start_angle, sweep, rotation) = if closed {
                (0.0, -360.0, ellipse.rotation())
            } else {
                let mut sweep = ellipse.start_angle - ellipse.end_angle;
                if ellipse.end_angle < ellipse.start_angle {
                    sweep -= 360.0;
                }
                (
                    -ellipse.start_angle,
                    sweep,
                    ellipse.rotation() + ELLIPSE_ARC_ROTATION_OFFSET_DEG,
                )
            };

            let center = ellipse.center.xy();
            let placed = Frame {
                transform: frame
                    .transform
                    .compose(&Transform2D::from_translation(center.x, center.y))
                    .compose(&Transform2D::from_rotation_degrees(rotation)),
                ..frame
            };
            let arc = Primitive::Arc {
                center: Vector2::ZERO,
                radius_x: ellipse.major_radius(),
                radius_y: ellipse.minor_radius(),
                start_angle,
                sweep,
            };
            return self.emit(arc, style, placed);
        }

        let vertices: Vec<Vector2> = ellipse.to_arc().sample(NUMBER_OF_GRADS).collect();
        self.emit(Primitive::Polyline { vertices, closed }, style, frame)
    }

    fn flatten_polyline(&mut self, polyline: &Polyline, style: &Style<'_>, frame: Frame) -> ChildOutcome {
        if polyline.is_degenerate() {
            return ChildOutcome::Skipped;
        }

        let vertices: Vec<Vector2> = if polyline.is_2d() {
            vertex_list(&polyline.poly_vertices, polyline.needs_closing(), false)
                .into_iter()
                .map(|v| v.position)
                .collect()
        } else {
            let mut points: Vec<Vector2> = polyline.vertices.iter().map(|v| v.location.xy()).collect();
            if polyline.needs_closing() {
                points.push(points[0]);
            }
            points
        };

        let closed = polyline.is_closed();
        self.emit(Primitive::Polyline { vertices, closed }, style, frame)
    }

    fn flatten_lwpolyline(&mut self, polyline: &LwPolyline, style: &Style<'_>, frame: Frame) -> ChildOutcome {
        if polyline.is_degenerate() {
            return ChildOutcome::Skipped;
        }

        let vertices = vertex_list(&polyline.vertices, polyline.needs_closing(), polyline.has_width)
            .into_iter()
            .map(|v| v.position)
            .collect();
        let closed = polyline.is_closed();
        self.emit(Primitive::Polyline { vertices, closed }, style, frame)
    }

    fn flatten_polyface(&mut self, mesh: &PolyFaceMesh, style: &Style<'_>, frame: Frame) -> ChildOutcome {
        let mut drawn = 0;
        let mut failed = false;

        for face in &mesh.faces {
            match mesh.face_outline(face) {
                Ok(outline) if outline.is_empty() => {}
                Ok(outline) => {
                    self.emit_polygon(outline, style, frame);
                    drawn += 1;
                }
                Err(index) => {
                    failed = true;
                    let message = format!(
                        "polyface mesh {} references vertex {index} of {}",
                        mesh.base.common.handle.as_deref().unwrap_or("?"),
                        mesh.base.vertices.len()
                    );
                    warn!("{message}");
                    self.notifications.flattening(NotificationType::Error, message);
                }
            }
        }

        match (failed, drawn) {
            (true, _) => ChildOutcome::Failed,
            (false, 0) => ChildOutcome::Skipped,
            _ => ChildOutcome::Drawn,
        }
    }

    fn flatten_polygon_mesh(&mut self, mesh: &PolygonMesh, style: &Style<'_>, frame: Frame) -> ChildOutcome {
        let rows = match mesh.rows() {
            Ok(rows) => rows,
            Err(index) => {
                let message = format!(
                    "polygon mesh {} ({} x {}) is missing vertex {index}",
                    mesh.base.common.handle.as_deref().unwrap_or("?"),
                    mesh.m_count,
                    mesh.n_count
                );
                warn!("{message}");
                self.notifications.flattening(NotificationType::Error, message);
                return ChildOutcome::Failed;
            }
        };
        if rows.is_empty() {
            return ChildOutcome::Skipped;
        }

        for row in rows {
            let primitive = if row.closed {
                Primitive::Polygon { vertices: row.points }
            } else {
                Primitive::Polyline { vertices: row.points, closed: false }
            };
            self.push(primitive, style.color, Vec::new(), frame);
        }
        ChildOutcome::Drawn
    }

    fn flatten_insert(&mut self, insert: &Insert, style: &Style<'_>, frame: Frame) -> ChildOutcome {
        if !insert.has_block_name() {
            return self.unresolved("insert", insert.common.handle.as_deref(), None);
        }
        let Some(block) = self.document.block(&insert.block_name) else {
            return self.unresolved("insert", insert.common.handle.as_deref(), Some(&insert.block_name));
        };

        let (local, factor) = insert.block_transform();
        let context = ResolutionContext::inherited(style.color, Some(style.line_type.name.clone()))
            .for_block(block);
        let child = Frame {
            transform: frame.transform.compose(&local),
            stroke_scale: frame.stroke_scale * factor,
        };
        self.descend(block, &context, child)
    }

    /// Dimension graphics are drawn in the dimension's own frame and keep
    /// the line type of the enclosing context.
    fn flatten_dimension(
        &mut self,
        dimension: &Dimension,
        style: &Style<'_>,
        context: &ResolutionContext,
        frame: Frame,
    ) -> ChildOutcome {
        let handle = dimension.common.handle.as_deref();
        let name = match dimension.block_name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name,
            _ => return self.unresolved("dimension", handle, None),
        };
        let Some(block) = self.document.block(name) else {
            return self.unresolved("dimension", handle, Some(name));
        };

        let context = ResolutionContext {
            color: style.color,
            ..context.clone()
        }
        .for_block(block);
        self.descend(block, &context, frame)
    }

    fn descend(&mut self, block: &'d Block, context: &ResolutionContext, frame: Frame) -> ChildOutcome {
        let key = block.name.to_uppercase();
        if self.active.contains(&key) {
            let message = format!("block {} references itself; reference not drawn", block.name);
            warn!("{message}");
            self.notifications.flattening(NotificationType::Warning, message);
            return ChildOutcome::Failed;
        }

        self.flatten_block(block, context, frame);
        ChildOutcome::Drawn
    }

    fn unresolved(&mut self, what: &str, handle: Option<&str>, block: Option<&str>) -> ChildOutcome {
        let handle = handle.unwrap_or("?");
        let message = match block {
            Some(name) => format!("{what} {handle} references missing block {name}"),
            None => format!("{what} {handle} has no block name"),
        };
        warn!("{message}");
        self.notifications.flattening(NotificationType::Warning, message);
        ChildOutcome::Failed
    }
}

impl Document {
    /// Flatten a root block into render items.
    ///
    /// Requires the flattening phase. Fails only when the root block does
    /// not exist; problems with individual entities are counted in the
    /// report and collected in [`Document::notifications`].
    pub fn flatten(&mut self, options: &FlattenOptions) -> Result<Flattened> {
        self.ensure_phase(DocumentPhase::Flattening)?;
        let document: &Document = self;
        let root = document
            .block(&options.block)
            .ok_or_else(|| DxfError::UnknownBlock(options.block.clone()))?;

        let (flattened, notifications) = Flattener::new(document).run(root, options);
        self.notifications.extend(notifications);

        debug!(
            block = %options.block,
            items = flattened.items.len(),
            drawn = flattened.report.drawn,
            skipped = flattened.report.skipped,
            failed = flattened.report.failed,
            "flattened block"
        );
        Ok(flattened)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Circle, EntityCommon, EntityKind, Line};
    use crate::tables::Layer;
    use crate::types::Vector3;

    fn line(layer: &str, color: Color, from: (f64, f64), to: (f64, f64)) -> EntityType {
        let mut common = EntityCommon::with_layer(EntityKind::Line, layer);
        common.color = color;
        EntityType::Line(Line::from_points(
            common,
            Vector3::new(from.0, from.1, 0.0),
            Vector3::new(to.0, to.1, 0.0),
        ))
    }

    fn insert(block: &str, color: Color, at: (f64, f64), scale: f64) -> EntityType {
        let mut common = EntityCommon::new(EntityKind::Insert);
        common.color = color;
        let mut insert = Insert::new(common, block, Vector3::new(at.0, at.1, 0.0));
        insert.x_scale = scale;
        insert.y_scale = scale;
        EntityType::Insert(insert)
    }

    fn ready(mut doc: Document) -> Document {
        doc.finish_parsing().unwrap();
        doc
    }

    #[test]
    fn test_paint_order_through_nested_blocks() {
        let mut doc = Document::new();
        doc.add_block(Block::new("INNER")).unwrap();
        doc.add_entity("INNER", line("0", Color::Index(2), (0.0, 0.0), (1.0, 0.0))).unwrap();
        doc.add_entity(MODEL_SPACE, line("0", Color::Index(1), (0.0, 0.0), (0.0, 1.0))).unwrap();
        doc.add_entity(MODEL_SPACE, insert("inner", Color::ByLayer, (5.0, 0.0), 1.0)).unwrap();
        doc.add_entity(MODEL_SPACE, line("0", Color::Index(3), (0.0, 0.0), (0.0, 2.0))).unwrap();
        let mut doc = ready(doc);

        let flattened = doc.flatten(&FlattenOptions::default()).unwrap();
        let colors: Vec<Color> = flattened.items.iter().map(|i| i.color).collect();
        assert_eq!(colors, vec![Color::Index(1), Color::Index(2), Color::Index(3)]);
        assert_eq!(
            flattened.items[1].world_points(),
            vec![Vector2::new(5.0, 0.0), Vector2::new(6.0, 0.0)]
        );
        assert_eq!(flattened.report, FlattenReport { drawn: 4, skipped: 0, failed: 0 });
    }

    #[test]
    fn test_by_block_takes_nearest_insert_color() {
        let mut doc = Document::new();
        doc.add_block(Block::new("LEAF")).unwrap();
        doc.add_block(Block::new("MID")).unwrap();
        doc.add_entity("LEAF", line("0", Color::ByBlock, (0.0, 0.0), (1.0, 0.0))).unwrap();
        doc.add_entity("MID", insert("LEAF", Color::Index(4), (0.0, 0.0), 1.0)).unwrap();
        doc.add_entity(MODEL_SPACE, insert("MID", Color::Index(1), (0.0, 0.0), 1.0)).unwrap();
        let mut doc = ready(doc);

        let flattened = doc.flatten(&FlattenOptions::default()).unwrap();
        assert_eq!(flattened.items.len(), 1);
        assert_eq!(flattened.items[0].color, Color::Index(4));
    }

    #[test]
    fn test_stroke_scale_compounds() {
        let mut doc = Document::new();
        doc.add_block(Block::new("LEAF")).unwrap();
        doc.add_block(Block::new("MID")).unwrap();
        doc.add_entity("LEAF", line("0", Color::Index(1), (0.0, 0.0), (1.0, 0.0))).unwrap();
        doc.add_entity("MID", insert("LEAF", Color::ByLayer, (0.0, 0.0), 2.0)).unwrap();
        doc.add_entity("MID", line("0", Color::Index(1), (0.0, 0.0), (1.0, 0.0))).unwrap();
        doc.add_entity(MODEL_SPACE, insert("MID", Color::ByLayer, (0.0, 0.0), 2.0)).unwrap();
        let mut doc = ready(doc);

        let flattened = doc.flatten(&FlattenOptions::default()).unwrap();
        let strokes: Vec<f64> = flattened.items.iter().map(|i| i.stroke_scale).collect();
        assert_eq!(strokes, vec![0.25, 0.5]);
        assert_eq!(
            flattened.items[0].world_points(),
            vec![Vector2::ZERO, Vector2::new(4.0, 0.0)]
        );
    }

    #[test]
    fn test_missing_block_and_recursion_fail_without_aborting() {
        let mut doc = Document::new();
        doc.add_block(Block::new("LOOP")).unwrap();
        doc.add_entity("LOOP", insert("LOOP", Color::ByLayer, (0.0, 0.0), 1.0)).unwrap();
        doc.add_entity("LOOP", line("0", Color::Index(5), (0.0, 0.0), (1.0, 0.0))).unwrap();
        doc.add_entity(MODEL_SPACE, insert("NOWHERE", Color::ByLayer, (0.0, 0.0), 1.0)).unwrap();
        doc.add_entity(MODEL_SPACE, insert("LOOP", Color::ByLayer, (0.0, 0.0), 1.0)).unwrap();
        let mut doc = ready(doc);

        let flattened = doc.flatten(&FlattenOptions::default()).unwrap();
        assert_eq!(flattened.items.len(), 1);
        assert_eq!(flattened.report.failed, 2);
        assert_eq!(flattened.report.drawn, 2);
        assert!(doc.notifications.has_type(NotificationType::Warning));
    }

    #[test]
    fn test_off_layer_is_skipped() {
        let mut doc = Document::new();
        doc.add_layer(Layer::new("HIDDEN", 0, -1, "CONTINUOUS")).unwrap();
        doc.add_entity(MODEL_SPACE, line("HIDDEN", Color::ByLayer, (0.0, 0.0), (1.0, 0.0))).unwrap();
        let mut doc = ready(doc);

        let flattened = doc.flatten(&FlattenOptions::default()).unwrap();
        assert!(flattened.is_empty());
        assert_eq!(flattened.report.skipped, 1);
    }

    #[test]
    fn test_arrow_block_children_follow_dimension_color() {
        let mut doc = Document::new();
        doc.add_arrow_block("_ARROW").unwrap();
        doc.add_block(Block::new("_ARROW")).unwrap();
        doc.add_block(Block::new("*D1")).unwrap();
        doc.add_entity("_ARROW", line("0", Color::Index(1), (0.0, 0.0), (1.0, 0.0))).unwrap();
        doc.add_entity("*D1", insert("_ARROW", Color::ByBlock, (0.0, 0.0), 1.0)).unwrap();
        let mut common = EntityCommon::new(EntityKind::Dimension);
        common.color = Color::Index(6);
        let dimension = Dimension {
            common,
            definition_point: Vector2::ZERO,
            text_point: Vector2::ZERO,
            text: None,
            block_name: Some("*D1".to_string()),
            style_name: None,
            measurement: 0.0,
            text_rotation: 0.0,
            horizontal_direction: 0.0,
        };
        doc.add_entity(MODEL_SPACE, EntityType::Dimension(dimension)).unwrap();
        let mut doc = ready(doc);

        let flattened = doc.flatten(&FlattenOptions::default()).unwrap();
        assert_eq!(flattened.items.len(), 1);
        assert_eq!(flattened.items[0].color, Color::Index(6));
    }

    #[test]
    fn test_root_options() {
        let mut doc = Document::new();
        let circle = Circle::new(EntityCommon::new(EntityKind::Circle), Vector3::new(1.0, 1.0, 0.0), 2.0);
        doc.add_entity(MODEL_SPACE, EntityType::Circle(circle)).unwrap();
        let mut doc = ready(doc);

        let options = FlattenOptions::new()
            .with_transform(Transform2D::from_translation(10.0, 0.0))
            .with_stroke_scale(3.0);
        let flattened = doc.flatten(&options).unwrap();
        assert_eq!(flattened.items[0].world_points(), vec![Vector2::new(11.0, 1.0)]);
        assert_eq!(flattened.items[0].stroke_scale, 3.0);
        assert_eq!(flattened.items[0].color, Color::Index(7));

        let err = doc.flatten(&FlattenOptions::new().with_block("NOPE")).unwrap_err();
        assert!(matches!(err, DxfError::UnknownBlock(_)));
    }

    #[test]
    fn test_phase_is_enforced() {
        let mut doc = Document::new();
        assert!(matches!(
            doc.flatten(&FlattenOptions::default()),
            Err(DxfError::InvalidPhase { .. })
        ));
        doc.finish_parsing().unwrap();
        doc.clear();
        assert!(matches!(
            doc.flatten(&FlattenOptions::default()),
            Err(DxfError::DocumentCleared)
        ));
    }
}
