//! Polyface mesh entity (POLYLINE with flag 64)

use super::{Entity, EntityCommon, FaceDef, FaceType, Polyline};
use crate::io::dxf::PairContainer;
use crate::types::Vector2;

/// A mesh of faces whose corners index into a shared vertex list.
///
/// The vertex records land in `base.vertices`; face records (VERTEX with
/// code 71) land in `faces`.
#[derive(Debug, Clone, PartialEq)]
pub struct PolyFaceMesh {
    pub base: Polyline,
    /// Declared vertex count (code 71)
    pub vertex_count: i32,
    /// Declared face count (code 72)
    pub face_count: i32,
    pub faces: Vec<FaceDef>,
}

impl PolyFaceMesh {
    pub fn from_pairs(common: EntityCommon, pairs: &PairContainer) -> Self {
        PolyFaceMesh {
            vertex_count: pairs.i32_or(71, 0),
            face_count: pairs.i32_or(72, 0),
            faces: Vec::new(),
            base: Polyline::from_pairs(common, pairs),
        }
    }

    /// Outline of one face, or the first index that does not name a vertex.
    ///
    /// Undefined faces give an empty outline.
    pub fn face_outline(&self, face: &FaceDef) -> Result<Vec<Vector2>, i32> {
        if face.face_type() == FaceType::Undefined {
            return Ok(Vec::new());
        }
        face.indices
            .iter()
            .map(|&index| {
                usize::try_from(index - 1)
                    .ok()
                    .and_then(|i| self.base.vertices.get(i))
                    .map(|v| v.location.xy())
                    .ok_or(index)
            })
            .collect()
    }
}

impl Entity for PolyFaceMesh {
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
