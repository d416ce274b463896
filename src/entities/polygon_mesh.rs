//! Polygon mesh entity (POLYLINE with flag 16)

use super::{Entity, EntityCommon, Polyline, PolylineFlags};
use crate::io::dxf::PairContainer;
use crate::types::Vector2;

/// One row or column of a polygon mesh
#[derive(Debug, Clone, PartialEq)]
pub struct MeshRow {
    pub points: Vec<Vector2>,
    /// Drawn as a closed polygon rather than an open polyline
    pub closed: bool,
}

/// An M × N grid of vertices
#[derive(Debug, Clone, PartialEq)]
pub struct PolygonMesh {
    pub base: Polyline,
    /// Vertex count in M (code 71)
    pub m_count: usize,
    /// Vertex count in N (code 72)
    pub n_count: usize,
    /// Smooth surface density in M (code 73)
    pub m_density: i32,
    /// Smooth surface density in N (code 74)
    pub n_density: i32,
}

impl PolygonMesh {
    pub fn from_pairs(common: EntityCommon, pairs: &PairContainer) -> Self {
        let count = |code| usize::try_from(pairs.i32_or(code, 0)).unwrap_or(0);
        PolygonMesh {
            m_count: count(71),
            n_count: count(72),
            m_density: pairs.i32_or(73, 0),
            n_density: pairs.i32_or(74, 0),
            base: Polyline::from_pairs(common, pairs),
        }
    }

    /// Grid lines: for each N one row across M, then for each M one row
    /// across N. Vertex (m, n) is `vertices[n_count * m + n]`.
    ///
    /// An empty grid gives no rows. When the declared grid is larger than the
    /// attached vertex list, returns the first index past that list.
    pub fn rows(&self) -> Result<Vec<MeshRow>, usize> {
        let vertices = &self.base.vertices;
        if self.m_count == 0 || self.n_count == 0 {
            return Ok(Vec::new());
        }
        match self.m_count.checked_mul(self.n_count) {
            Some(cells) if cells <= vertices.len() => {}
            _ => return Err(vertices.len()),
        }
        let at = |m: usize, n: usize| {
            let index = self.n_count * m + n;
            vertices.get(index).map(|v| v.location.xy()).ok_or(index)
        };

        let mut rows = Vec::with_capacity(self.m_count + self.n_count);
        let closed_m = self.base.flags.contains(PolylineFlags::CLOSED);
        for n in 0..self.n_count {
            let points = (0..self.m_count).map(|m| at(m, n)).collect::<Result<_, _>>()?;
            rows.push(MeshRow { points, closed: closed_m });
        }
        let closed_n = self.base.flags.contains(PolylineFlags::MESH_CLOSED_N);
        for m in 0..self.m_count {
            let points = (0..self.n_count).map(|n| at(m, n)).collect::<Result<_, _>>()?;
            rows.push(MeshRow { points, closed: closed_n });
        }
        Ok(rows)
    }
}

impl Entity for PolygonMesh {
    fn common(&self) -> &EntityCommon {
        &self.base.common
    }

    fn common_mut(&mut self) -> &mut EntityCommon {
        &mut self.base.common
    }

    fn is_container(&self) -> bool {
        true
    }
}
