//! `DofLayout`: mapping mesh entities to contiguous global DOF index ranges.
//!
//! The layout packs all DOFs into one flat index space in a stable block
//! order: every vertex (one DOF each), then every edge block, then every
//! face block, then every cell-interior block, each block internally ordered
//! by entity index. Offsets are plain prefix-sum arrays addressed by entity
//! index, not per-entity records.
//!
//! # Invariants
//!
//! - Offsets are contiguous: each block begins where the previous one ends.
//! - DOF ownership partitions the index space: every global index belongs to
//!   exactly one entity's span.
//!
//! These are checked after construction in debug builds.

use crate::topology::{Entity, EntityKind};

/// Per-entity DOF spans for one mesh, produced by a space's `update`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DofLayout {
    num_vertices: usize,
    /// Absolute prefix offsets per edge; `len = num_edges + 1`.
    edge_offsets: Vec<usize>,
    /// Absolute prefix offsets per face; `len = num_faces + 1`.
    face_offsets: Vec<usize>,
    /// Absolute prefix offsets per cell; `len = num_cells + 1`.
    cell_offsets: Vec<usize>,
}

fn prefix_block(next: &mut usize, counts: &[usize]) -> Vec<usize> {
    let mut offsets = Vec::with_capacity(counts.len() + 1);
    offsets.push(*next);
    for &c in counts {
        *next += c;
        offsets.push(*next);
    }
    offsets
}

impl DofLayout {
    /// Build a layout from per-entity DOF counts.
    ///
    /// Vertices always own exactly one DOF; the other slices give the count
    /// owned by each edge, face, and cell in entity-index order.
    pub fn build(
        num_vertices: usize,
        edge_counts: &[usize],
        face_counts: &[usize],
        cell_counts: &[usize],
    ) -> Self {
        let mut next = num_vertices;
        let layout = Self {
            num_vertices,
            edge_offsets: prefix_block(&mut next, edge_counts),
            face_offsets: prefix_block(&mut next, face_counts),
            cell_offsets: prefix_block(&mut next, cell_counts),
        };
        layout.debug_assert_invariants();
        layout
    }

    /// Total number of global DOFs.
    #[inline]
    pub fn total_len(&self) -> usize {
        *self.cell_offsets.last().unwrap_or(&self.num_vertices)
    }

    /// Global DOF index owned by vertex `v`.
    #[inline]
    pub fn vertex_dof(&self, v: usize) -> usize {
        debug_assert!(v < self.num_vertices);
        v
    }

    /// `(offset, len)` of edge `e`'s DOF span.
    #[inline]
    pub fn edge_span(&self, e: usize) -> (usize, usize) {
        (self.edge_offsets[e], self.edge_offsets[e + 1] - self.edge_offsets[e])
    }

    /// `(offset, len)` of face `f`'s DOF span.
    #[inline]
    pub fn face_span(&self, f: usize) -> (usize, usize) {
        (self.face_offsets[f], self.face_offsets[f + 1] - self.face_offsets[f])
    }

    /// `(offset, len)` of cell `c`'s interior DOF span.
    #[inline]
    pub fn cell_span(&self, c: usize) -> (usize, usize) {
        (self.cell_offsets[c], self.cell_offsets[c + 1] - self.cell_offsets[c])
    }

    /// `(offset, len)` of any entity's span.
    pub fn entity_span(&self, entity: Entity) -> (usize, usize) {
        match entity.kind {
            EntityKind::Vertex => (self.vertex_dof(entity.index), 1),
            EntityKind::Edge => self.edge_span(entity.index),
            EntityKind::Face => self.face_span(entity.index),
            EntityKind::Cell => self.cell_span(entity.index),
        }
    }

    /// The entity owning global DOF `dof`, for diagnostics.
    pub fn owner_of(&self, dof: usize) -> Option<Entity> {
        if dof >= self.total_len() {
            return None;
        }
        if dof < self.num_vertices {
            return Some(Entity::vertex(dof));
        }
        for (kind, offsets) in [
            (EntityKind::Edge, &self.edge_offsets),
            (EntityKind::Face, &self.face_offsets),
            (EntityKind::Cell, &self.cell_offsets),
        ] {
            // Offset arrays are never empty; a kind with no entities spans
            // an empty range and is skipped.
            let (first, last) = (offsets[0], offsets[offsets.len() - 1]);
            if dof >= first && dof < last {
                let index = offsets.partition_point(|&o| o <= dof) - 1;
                return Some(Entity::new(kind, index));
            }
        }
        None
    }

    fn debug_assert_invariants(&self) {
        #[cfg(debug_assertions)]
        {
            debug_assert_eq!(self.edge_offsets.first(), Some(&self.num_vertices));
            debug_assert_eq!(self.face_offsets.first(), self.edge_offsets.last());
            debug_assert_eq!(self.cell_offsets.first(), self.face_offsets.last());
            for offsets in [&self.edge_offsets, &self.face_offsets, &self.cell_offsets] {
                debug_assert!(offsets.windows(2).all(|w| w[0] <= w[1]));
            }
        }
    }
}
