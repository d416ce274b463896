//! Entity kind registry: record name ↔ kind, and the supported set

use ahash::AHashMap;
use once_cell::sync::Lazy;
use std::fmt;

/// Every entity record name the reader recognizes.
///
/// Names that start with a digit in the file (`3DFACE`, `3DSOLID`) are
/// spelled `Face3D` / `Solid3D` here; [`EntityKind::name`] gives the file
/// spelling back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityKind {
    AcadProxyEntity,
    Arc,
    ArcAlignedText,
    AttDef,
    Attrib,
    Body,
    Circle,
    Dimension,
    Ellipse,
    Face3D,
    FaceDef,
    Hatch,
    Image,
    Insert,
    Leader,
    Line,
    LwPolyline,
    MLine,
    MText,
    PdfUnderlay,
    Point,
    PolyFace3D,
    Polygon3D,
    Polyline,
    Ray,
    Region,
    RText,
    SeqEnd,
    Shape,
    Solid,
    Solid3D,
    Spline,
    Table,
    Text,
    Tolerance,
    Trace,
    Unrecognized,
    Vertex,
    Viewport,
    Wipeout,
    XLine,
}

const KIND_NAMES: &[(EntityKind, &str)] = &[
    (EntityKind::AcadProxyEntity, "ACAD_PROXY_ENTITY"),
    (EntityKind::Arc, "ARC"),
    (EntityKind::ArcAlignedText, "ARCALIGNEDTEXT"),
    (EntityKind::AttDef, "ATTDEF"),
    (EntityKind::Attrib, "ATTRIB"),
    (EntityKind::Body, "BODY"),
    (EntityKind::Circle, "CIRCLE"),
    (EntityKind::Dimension, "DIMENSION"),
    (EntityKind::Ellipse, "ELLIPSE"),
    (EntityKind::Face3D, "3DFACE"),
    (EntityKind::FaceDef, "FACEDEF"),
    (EntityKind::Hatch, "HATCH"),
    (EntityKind::Image, "IMAGE"),
    (EntityKind::Insert, "INSERT"),
    (EntityKind::Leader, "LEADER"),
    (EntityKind::Line, "LINE"),
    (EntityKind::LwPolyline, "LWPOLYLINE"),
    (EntityKind::MLine, "MLINE"),
    (EntityKind::MText, "MTEXT"),
    (EntityKind::PdfUnderlay, "PDFUNDERLAY"),
    (EntityKind::Point, "POINT"),
    (EntityKind::PolyFace3D, "POLYFACE3D"),
    (EntityKind::Polygon3D, "POLYGON3D"),
    (EntityKind::Polyline, "POLYLINE"),
    (EntityKind::Ray, "RAY"),
    (EntityKind::Region, "REGION"),
    (EntityKind::RText, "RTEXT"),
    (EntityKind::SeqEnd, "SEQEND"),
    (EntityKind::Shape, "SHAPE"),
    (EntityKind::Solid, "SOLID"),
    (EntityKind::Solid3D, "3DSOLID"),
    (EntityKind::Spline, "SPLINE"),
    (EntityKind::Table, "TABLE"),
    (EntityKind::Text, "TEXT"),
    (EntityKind::Tolerance, "TOLERANCE"),
    (EntityKind::Trace, "TRACE"),
    (EntityKind::Unrecognized, "UNRECOGNIZED_ENTITY"),
    (EntityKind::Vertex, "VERTEX"),
    (EntityKind::Viewport, "VIEWPORT"),
    (EntityKind::Wipeout, "WIPEOUT"),
    (EntityKind::XLine, "XLINE"),
];

static KINDS_BY_NAME: Lazy<AHashMap<&'static str, EntityKind>> =
    Lazy::new(|| KIND_NAMES.iter().map(|&(kind, name)| (name, kind)).collect());

impl EntityKind {
    /// Look up a record name case-insensitively. Unknown names map to
    /// [`EntityKind::Unrecognized`].
    pub fn from_name(name: &str) -> Self {
        let upper = name.trim().to_ascii_uppercase();
        KINDS_BY_NAME
            .get(upper.as_str())
            .copied()
            .unwrap_or(EntityKind::Unrecognized)
    }

    /// The record name as written in a file
    pub fn name(&self) -> &'static str {
        KIND_NAMES
            .iter()
            .find(|(kind, _)| kind == self)
            .map(|(_, name)| *name)
            .unwrap_or("UNRECOGNIZED_ENTITY")
    }

    /// Whether records of this kind are decoded.
    ///
    /// `SeqEnd` is supported but decodes to nothing; it only terminates a
    /// vertex sequence.
    pub fn is_supported(&self) -> bool {
        matches!(
            self,
            EntityKind::Arc
                | EntityKind::Circle
                | EntityKind::Dimension
                | EntityKind::Ellipse
                | EntityKind::Face3D
                | EntityKind::FaceDef
                | EntityKind::Insert
                | EntityKind::Line
                | EntityKind::LwPolyline
                | EntityKind::Point
                | EntityKind::PolyFace3D
                | EntityKind::Polygon3D
                | EntityKind::Polyline
                | EntityKind::Ray
                | EntityKind::SeqEnd
                | EntityKind::Solid
                | EntityKind::Trace
                | EntityKind::Vertex
                | EntityKind::Viewport
                | EntityKind::XLine
        )
    }

    /// All kinds in declaration order
    pub fn all() -> impl Iterator<Item = EntityKind> {
        KIND_NAMES.iter().map(|(kind, _)| *kind)
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digit_leading_names() {
        assert_eq!(EntityKind::from_name("3DFACE"), EntityKind::Face3D);
        assert_eq!(EntityKind::from_name("3dSolid"), EntityKind::Solid3D);
        assert_eq!(EntityKind::Face3D.name(), "3DFACE");
        assert_eq!(EntityKind::Solid3D.to_string(), "3DSOLID");
    }

    #[test]
    fn test_unknown_name() {
        assert_eq!(EntityKind::from_name("WIDGET"), EntityKind::Unrecognized);
        assert!(!EntityKind::Unrecognized.is_supported());
    }

    #[test]
    fn test_name_round_trip() {
        for kind in EntityKind::all() {
            assert_eq!(EntityKind::from_name(kind.name()), kind);
        }
    }

    #[test]
    fn test_supported_set() {
        assert!(EntityKind::Line.is_supported());
        assert!(EntityKind::SeqEnd.is_supported());
        assert!(!EntityKind::Text.is_supported());
        assert!(!EntityKind::Hatch.is_supported());
    }
}
