//! `SimplicialMesh`: a minimal, immutable simplicial mesh topology.
//!
//! The mesh is built once from a vertex count and a homogeneous cell list and
//! never mutated afterwards; a space that must follow mesh changes is rebuilt
//! on a new mesh. Edges and faces are derived from the cells by
//! sorted-vertex-tuple deduplication, so every shared entity appears exactly
//! once and its canonical vertex order (ascending global vertex index) is the
//! same as seen from every incident cell.
//!
//! Incidence is stored in flat, index-addressed arrays (`cells`,
//! `cell_edges`, `cell_faces` with fixed per-cell arity) rather than
//! pointer-linked structures, keeping traversal cache-friendly.

use hashbrown::HashMap;
use itertools::Itertools;

use crate::error::FeSpaceError;
use crate::topology::entity::ReferenceCell;

/// Immutable simplicial mesh with derived edge/face entities.
#[derive(Clone, Debug)]
pub struct SimplicialMesh {
    cell_kind: ReferenceCell,
    num_vertices: usize,
    /// Cell-to-vertex incidence, flattened with arity `cell_kind.num_vertices()`.
    cells: Vec<usize>,
    /// Derived edges; each pair is sorted ascending (canonical order).
    edges: Vec<[usize; 2]>,
    /// Derived faces; each triple is sorted ascending (canonical order).
    faces: Vec<[usize; 3]>,
    /// Cell-to-edge incidence, flattened with arity `cell_kind.num_edges()`.
    cell_edges: Vec<usize>,
    /// Cell-to-face incidence, flattened with arity `cell_kind.num_faces()`.
    cell_faces: Vec<usize>,
}

impl SimplicialMesh {
    /// Build a mesh from a vertex count and a homogeneous cell list.
    ///
    /// The cell arity (2 = segment, 3 = triangle, 4 = tetrahedron) is taken
    /// from the first cell and must be shared by all cells.
    ///
    /// # Errors
    /// - [`FeSpaceError::EmptyMesh`] if `cells` is empty;
    /// - [`FeSpaceError::UnsupportedCellArity`] for arities outside 2..=4;
    /// - [`FeSpaceError::MixedCellKinds`] if arities differ between cells;
    /// - [`FeSpaceError::VertexOutOfRange`] for out-of-range vertex indices;
    /// - [`FeSpaceError::DegenerateCell`] if a cell repeats a vertex.
    pub fn from_cells(num_vertices: usize, cells: &[Vec<usize>]) -> Result<Self, FeSpaceError> {
        let first = cells.first().ok_or(FeSpaceError::EmptyMesh)?;
        let arity = first.len();
        let cell_kind =
            ReferenceCell::from_arity(arity).ok_or(FeSpaceError::UnsupportedCellArity(arity))?;

        let mut flat = Vec::with_capacity(cells.len() * arity);
        for (c, cell) in cells.iter().enumerate() {
            if cell.len() != arity {
                return Err(FeSpaceError::MixedCellKinds {
                    cell: c,
                    expected: arity,
                    found: cell.len(),
                });
            }
            for (i, &v) in cell.iter().enumerate() {
                if v >= num_vertices {
                    return Err(FeSpaceError::VertexOutOfRange {
                        cell: c,
                        vertex: v,
                        num_vertices,
                    });
                }
                if cell[..i].contains(&v) {
                    return Err(FeSpaceError::DegenerateCell { cell: c, vertex: v });
                }
            }
            flat.extend_from_slice(cell);
        }

        let mut mesh = Self {
            cell_kind,
            num_vertices,
            cells: flat,
            edges: Vec::new(),
            faces: Vec::new(),
            cell_edges: Vec::new(),
            cell_faces: Vec::new(),
        };
        mesh.derive_edges();
        mesh.derive_faces();
        Ok(mesh)
    }

    /// Derive edge entities and cell-to-edge incidence.
    ///
    /// Local edges are enumerated in lexicographic combination order over the
    /// cell's local vertices, matching [`ReferenceCell::local_edges`].
    fn derive_edges(&mut self) {
        if self.cell_kind.num_edges() == 0 {
            return;
        }
        let mut index: HashMap<[usize; 2], usize> = HashMap::new();
        for c in 0..self.num_cells() {
            let verts = self.cell_vertices(c).to_vec();
            for (a, b) in verts.iter().copied().tuple_combinations() {
                let key = [a.min(b), a.max(b)];
                let next = self.edges.len();
                let id = *index.entry(key).or_insert_with(|| {
                    self.edges.push(key);
                    next
                });
                self.cell_edges.push(id);
            }
        }
    }

    /// Derive face entities and cell-to-face incidence (3D only).
    fn derive_faces(&mut self) {
        if self.cell_kind.num_faces() == 0 {
            return;
        }
        let mut index: HashMap<[usize; 3], usize> = HashMap::new();
        for c in 0..self.num_cells() {
            let verts = self.cell_vertices(c).to_vec();
            for (a, b, d) in verts.iter().copied().tuple_combinations() {
                let mut key = [a, b, d];
                key.sort_unstable();
                let next = self.faces.len();
                let id = *index.entry(key).or_insert_with(|| {
                    self.faces.push(key);
                    next
                });
                self.cell_faces.push(id);
            }
        }
    }

    /// Reference cell shared by all cells of this mesh.
    #[inline]
    pub fn cell_kind(&self) -> ReferenceCell {
        self.cell_kind
    }

    /// Number of vertices.
    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.num_vertices
    }

    /// Number of cells.
    #[inline]
    pub fn num_cells(&self) -> usize {
        self.cells.len() / self.cell_kind.num_vertices()
    }

    /// Number of derived edges (zero for 1D meshes).
    #[inline]
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// Number of derived faces (zero below 3D).
    #[inline]
    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }

    /// Global vertex indices of cell `c`, in the cell's local order.
    #[inline]
    pub fn cell_vertices(&self, c: usize) -> &[usize] {
        let n = self.cell_kind.num_vertices();
        &self.cells[c * n..(c + 1) * n]
    }

    /// Global edge indices of cell `c`, in local edge order.
    #[inline]
    pub fn cell_edges(&self, c: usize) -> &[usize] {
        let n = self.cell_kind.num_edges();
        &self.cell_edges[c * n..(c + 1) * n]
    }

    /// Global face indices of cell `c`, in local face order.
    #[inline]
    pub fn cell_faces(&self, c: usize) -> &[usize] {
        let n = self.cell_kind.num_faces();
        &self.cell_faces[c * n..(c + 1) * n]
    }

    /// Canonical (ascending) vertex pair of edge `e`.
    #[inline]
    pub fn edge_vertices(&self, e: usize) -> [usize; 2] {
        self.edges[e]
    }

    /// Canonical (ascending) vertex triple of face `f`.
    #[inline]
    pub fn face_vertices(&self, f: usize) -> [usize; 3] {
        self.faces[f]
    }

    /// Validate a cell index against the mesh.
    pub fn check_cell(&self, c: usize) -> Result<(), FeSpaceError> {
        if c < self.num_cells() {
            Ok(())
        } else {
            Err(FeSpaceError::CellOutOfRange {
                cell: c,
                num_cells: self.num_cells(),
            })
        }
    }
}

/// Two unit triangles sharing the edge (1, 2): vertices 0..4, cells
/// `[0,1,2]` and `[1,2,3]`. The canonical two-cell fixture used across the
/// test suite.
pub fn two_triangle_mesh() -> SimplicialMesh {
    SimplicialMesh::from_cells(4, &[vec![0, 1, 2], vec![1, 2, 3]])
        .expect("fixture mesh is valid")
}

/// Two tetrahedra sharing the face (1, 2, 3): vertices 0..5, cells
/// `[0,1,2,3]` and `[1,2,3,4]`.
pub fn two_tet_mesh() -> SimplicialMesh {
    SimplicialMesh::from_cells(5, &[vec![0, 1, 2, 3], vec![1, 2, 3, 4]])
        .expect("fixture mesh is valid")
}
