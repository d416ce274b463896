//! Lightweight polyline entity (all vertices inline in one record)

use super::{read_normal, Entity, EntityCommon, PolylineFlags};
use crate::geometry::{needs_closing, PolyVertex};
use crate::io::dxf::pair_container::parse_f64;
use crate::io::dxf::PairContainer;
use crate::types::Vector3;

#[derive(Debug, Clone, PartialEq)]
pub struct LwPolyline {
    pub common: EntityCommon,
    /// Declared vertex count (code 90)
    pub vertex_count: usize,
    pub flags: PolylineFlags,
    /// Constant width (code 43); when positive it overrides per-vertex widths
    pub constant_width: f64,
    /// Elevation (code 38)
    pub elevation: f64,
    pub thickness: f64,
    pub normal: Vector3,
    pub vertices: Vec<PolyVertex>,
    pub has_width: bool,
}

impl LwPolyline {
    /// Decode the header fields, then walk the pairs from the first code 10:
    /// each 10 opens a vertex and 20/30/40/41/42 fill the current one.
    pub fn from_pairs(common: EntityCommon, pairs: &PairContainer) -> Self {
        let vertex_count = usize::try_from(pairs.i32_or(90, 0)).unwrap_or(0);
        let constant_width = pairs.f64_or(43, 0.0);
        let mut has_width = constant_width > 0.0;

        let mut vertices: Vec<PolyVertex> = Vec::new();
        for pair in pairs.pairs_from(10) {
            let value = parse_f64(&pair.value).unwrap_or(0.0);
            if pair.code == 10 {
                vertices.push(PolyVertex {
                    location: Vector3::new(value, 0.0, 0.0),
                    start_width: constant_width,
                    end_width: constant_width,
                    bulge: 0.0,
                });
                continue;
            }
            let Some(current) = vertices.last_mut() else {
                continue;
            };
            match pair.code {
                20 => current.location.y = value,
                30 => current.location.z = value,
                40 if constant_width <= 0.0 => {
                    current.start_width = value;
                    has_width |= value > 0.0;
                }
                41 if constant_width <= 0.0 => {
                    current.end_width = value;
                    has_width |= value > 0.0;
                }
                42 => current.bulge = value,
                _ => {}
            }
        }

        LwPolyline {
            vertex_count,
            flags: PolylineFlags::from_bits_retain(pairs.i32_or(70, 0)),
            constant_width,
            elevation: pairs.f64_or(38, 0.0),
            thickness: pairs.f64_or(39, 0.0),
            normal: read_normal(pairs),
            vertices,
            has_width,
            common,
        }
    }

    pub fn is_closed(&self) -> bool {
        self.flags.contains(PolylineFlags::CLOSED)
    }

    pub fn is_degenerate(&self) -> bool {
        self.vertices.len() < 2
    }

    pub fn needs_closing(&self) -> bool {
        match (self.vertices.first(), self.vertices.last()) {
            (Some(first), Some(last)) => needs_closing(self.is_closed(), first.position(), last.position()),
            _ => false,
        }
    }
}

impl_entity!(LwPolyline);
