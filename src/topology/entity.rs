//! Mesh entities and reference cells.
//!
//! Every mesh entity (vertex, edge, face, cell) is identified by its kind and
//! a dense per-kind index. [`ReferenceCell`] carries the fixed combinatorics
//! of the supported simplices: local vertex numbering, local edge and face
//! tables, and the canonical reference domain.

use core::fmt;

/// Kind of a mesh entity, in ascending topological dimension.
///
/// The DOF layout orders its blocks by this enum's declaration order
/// (vertices, then edges, then faces, then cells), so the derived `Ord` is
/// load-bearing.
#[derive(
    Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum EntityKind {
    /// 0-dimensional entity.
    Vertex,
    /// 1-dimensional entity (only present for 2D/3D meshes).
    Edge,
    /// 2-dimensional entity (only present for 3D meshes).
    Face,
    /// Top-dimensional entity.
    Cell,
}

/// A mesh entity: kind plus dense per-kind index.
#[derive(
    Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Entity {
    /// Entity kind.
    pub kind: EntityKind,
    /// Index within the kind's dense numbering.
    pub index: usize,
}

impl Entity {
    /// Shorthand constructor.
    #[inline]
    pub const fn new(kind: EntityKind, index: usize) -> Self {
        Self { kind, index }
    }

    /// Vertex entity.
    #[inline]
    pub const fn vertex(index: usize) -> Self {
        Self::new(EntityKind::Vertex, index)
    }

    /// Edge entity.
    #[inline]
    pub const fn edge(index: usize) -> Self {
        Self::new(EntityKind::Edge, index)
    }

    /// Face entity.
    #[inline]
    pub const fn face(index: usize) -> Self {
        Self::new(EntityKind::Face, index)
    }

    /// Cell entity.
    #[inline]
    pub const fn cell(index: usize) -> Self {
        Self::new(EntityKind::Cell, index)
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.kind {
            EntityKind::Vertex => "vertex",
            EntityKind::Edge => "edge",
            EntityKind::Face => "face",
            EntityKind::Cell => "cell",
        };
        write!(f, "{kind} {}", self.index)
    }
}

/// Local edge table for triangles: pairs of local vertex indices in
/// lexicographic combination order.
pub const TRIANGLE_EDGES: [[usize; 2]; 3] = [[0, 1], [0, 2], [1, 2]];

/// Local edge table for tetrahedra.
pub const TET_EDGES: [[usize; 2]; 6] = [[0, 1], [0, 2], [0, 3], [1, 2], [1, 3], [2, 3]];

/// Local face table for tetrahedra: triples of local vertex indices in
/// lexicographic combination order.
pub const TET_FACES: [[usize; 3]; 4] = [[0, 1, 2], [0, 1, 3], [0, 2, 3], [1, 2, 3]];

/// Supported reference cells.
#[derive(
    Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum ReferenceCell {
    /// Unit segment `[0, 1]`.
    Segment,
    /// Unit triangle with vertices (0,0), (1,0), (0,1).
    Triangle,
    /// Unit tetrahedron with vertices (0,0,0), (1,0,0), (0,1,0), (0,0,1).
    Tetrahedron,
}

impl ReferenceCell {
    /// Reference cell for a given cell arity (vertex count), if supported.
    pub fn from_arity(arity: usize) -> Option<Self> {
        match arity {
            2 => Some(Self::Segment),
            3 => Some(Self::Triangle),
            4 => Some(Self::Tetrahedron),
            _ => None,
        }
    }

    /// Topological (and reference) dimension.
    #[inline]
    pub const fn dim(self) -> usize {
        match self {
            Self::Segment => 1,
            Self::Triangle => 2,
            Self::Tetrahedron => 3,
        }
    }

    /// Number of vertices.
    #[inline]
    pub const fn num_vertices(self) -> usize {
        self.dim() + 1
    }

    /// Number of edge sub-entities carrying their own DOF blocks.
    ///
    /// A segment's single "edge" is the cell itself, so it reports zero here;
    /// its interior DOFs live in the cell block.
    #[inline]
    pub const fn num_edges(self) -> usize {
        match self {
            Self::Segment => 0,
            Self::Triangle => 3,
            Self::Tetrahedron => 6,
        }
    }

    /// Number of face sub-entities carrying their own DOF blocks.
    #[inline]
    pub const fn num_faces(self) -> usize {
        match self {
            Self::Segment | Self::Triangle => 0,
            Self::Tetrahedron => 4,
        }
    }

    /// Local edge table (empty for segments).
    #[inline]
    pub fn local_edges(self) -> &'static [[usize; 2]] {
        match self {
            Self::Segment => &[],
            Self::Triangle => &TRIANGLE_EDGES,
            Self::Tetrahedron => &TET_EDGES,
        }
    }

    /// Local face table (empty below 3D).
    #[inline]
    pub fn local_faces(self) -> &'static [[usize; 3]] {
        match self {
            Self::Segment | Self::Triangle => &[],
            Self::Tetrahedron => &TET_FACES,
        }
    }

    /// Whether `point` lies inside the canonical reference domain, within
    /// `tol` in each barycentric coordinate.
    pub fn contains(self, point: &[f64], tol: f64) -> bool {
        if point.len() != self.dim() {
            return false;
        }
        let interior: f64 = 1.0 - point.iter().sum::<f64>();
        point.iter().chain(std::iter::once(&interior)).all(|&l| l >= -tol)
    }
}

#[cfg(test)]
mod layout_tests {
    //! Compile-time checks that the entity types stay small and copyable.
    use super::*;
    use static_assertions::{assert_eq_size, assert_impl_all};

    assert_eq_size!(EntityKind, u8);
    assert_eq_size!(Entity, [usize; 2]);
    assert_impl_all!(Entity: Copy, Send, Sync);
    assert_impl_all!(ReferenceCell: Copy, Send, Sync);
}
