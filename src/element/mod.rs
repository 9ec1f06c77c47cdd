//! Finite elements: per-cell shape-function evaluation.
//!
//! An element is a transient value manufactured by the space for one cell
//! during one assembly pass. It knows the cell's reference geometry, the
//! effective per-entity orders, and the cell's orientation data; it does not
//! know the physical embedding. Gradients are reference-space gradients;
//! the caller applies the geometric map's inverse-transpose Jacobian.

use crate::basis::{Dual, MAX_ORDER, barycentric};
use crate::basis::hierarchic::{
    edge_dof_count, edge_shapes, face_shapes, interior_shapes_tet, tet_interior_dof_count,
    tri_face_dof_count,
};
use crate::error::FeSpaceError;
use crate::topology::ReferenceCell;

/// Tolerance for the reference-domain containment check.
const DOMAIN_TOL: f64 = 1e-12;

/// Finite element interface consumed by assembly loops.
///
/// Implementations must be safe to hand to a worker thread; each instance is
/// exclusively owned by the caller that requested it.
pub trait FiniteElement: Send {
    /// Reference cell this element evaluates on.
    fn reference_cell(&self) -> ReferenceCell;

    /// Total number of local shape functions.
    fn ndof(&self) -> usize;

    /// Values of every local shape function at a reference point, in the
    /// local DOF order (vertices, edge blocks, face blocks, interior).
    fn shape_values(&self, point: &[f64]) -> Result<Vec<f64>, FeSpaceError>;

    /// Reference-space gradients of every local shape function, same order
    /// as [`shape_values`](Self::shape_values).
    fn shape_gradients(&self, point: &[f64]) -> Result<Vec<Vec<f64>>, FeSpaceError>;
}

/// Hierarchical high-order H1 element.
///
/// Orientation is applied by feeding each shared-entity family its
/// barycentric arguments in the entity's canonical order, so the traces of
/// shared functions agree exactly between neighboring cells.
#[derive(Clone, Debug)]
pub struct H1Element {
    cell: ReferenceCell,
    cell_order: u8,
    edge_orders: [u8; 6],
    face_orders: [u8; 4],
    edge_swap: [bool; 6],
    face_perm: [[u8; 3]; 4],
    ndof: usize,
}

impl H1Element {
    /// Build an element from per-entity orders and orientation data.
    ///
    /// Slice lengths must match the reference cell's edge/face counts; this
    /// is a programming error on the caller's side, not a recoverable
    /// condition.
    ///
    /// # Errors
    /// [`FeSpaceError::UnsupportedOrder`] if any order exceeds
    /// [`MAX_ORDER`].
    pub fn new(
        cell: ReferenceCell,
        cell_order: u8,
        edge_orders: &[u8],
        face_orders: &[u8],
        edge_swap: &[bool],
        face_perm: &[[u8; 3]],
    ) -> Result<Self, FeSpaceError> {
        assert_eq!(edge_orders.len(), cell.num_edges());
        assert_eq!(face_orders.len(), cell.num_faces());
        assert_eq!(edge_swap.len(), cell.num_edges());
        assert_eq!(face_perm.len(), cell.num_faces());

        for &p in std::iter::once(&cell_order)
            .chain(edge_orders)
            .chain(face_orders)
        {
            if p > MAX_ORDER {
                return Err(FeSpaceError::UnsupportedOrder {
                    found: p,
                    max: MAX_ORDER,
                });
            }
        }

        let mut eo = [0u8; 6];
        eo[..edge_orders.len()].copy_from_slice(edge_orders);
        let mut fo = [0u8; 4];
        fo[..face_orders.len()].copy_from_slice(face_orders);
        let mut es = [false; 6];
        es[..edge_swap.len()].copy_from_slice(edge_swap);
        let mut fp = [[0u8, 1, 2]; 4];
        fp[..face_perm.len()].copy_from_slice(face_perm);

        let interior = match cell {
            ReferenceCell::Segment => edge_dof_count(cell_order),
            ReferenceCell::Triangle => tri_face_dof_count(cell_order),
            ReferenceCell::Tetrahedron => tet_interior_dof_count(cell_order),
        };
        let ndof = cell.num_vertices()
            + eo[..cell.num_edges()]
                .iter()
                .map(|&p| edge_dof_count(p))
                .sum::<usize>()
            + fo[..cell.num_faces()]
                .iter()
                .map(|&p| tri_face_dof_count(p))
                .sum::<usize>()
            + interior;

        Ok(Self {
            cell,
            cell_order,
            edge_orders: eo,
            face_orders: fo,
            edge_swap: es,
            face_perm: fp,
            ndof,
        })
    }

    /// Element with one uniform order and identity orientation, for cells
    /// whose local vertex order is already canonical.
    pub fn uniform(cell: ReferenceCell, order: u8) -> Result<Self, FeSpaceError> {
        let edges = vec![order; cell.num_edges()];
        let faces = vec![order; cell.num_faces()];
        let swaps = vec![false; cell.num_edges()];
        let perms = vec![[0u8, 1, 2]; cell.num_faces()];
        Self::new(cell, order, &edges, &faces, &swaps, &perms)
    }

    fn check_point(&self, point: &[f64]) -> Result<(), FeSpaceError> {
        if point.len() != self.cell.dim() {
            return Err(FeSpaceError::PointDimensionMismatch {
                expected: self.cell.dim(),
                found: point.len(),
            });
        }
        if !self.cell.contains(point, DOMAIN_TOL) {
            return Err(FeSpaceError::OutOfDomain {
                cell: self.cell,
                point: point.to_vec(),
            });
        }
        Ok(())
    }

    /// Evaluate all local shape functions as value/gradient pairs.
    fn eval(&self, point: &[f64]) -> Result<Vec<Dual>, FeSpaceError> {
        self.check_point(point)?;
        let (lam, nv) = barycentric(self.cell, point);
        let mut out = Vec::with_capacity(self.ndof);

        out.extend_from_slice(&lam[..nv]);

        for (e, lv) in self.cell.local_edges().iter().enumerate() {
            let (mut a, mut b) = (lv[0], lv[1]);
            if self.edge_swap[e] {
                std::mem::swap(&mut a, &mut b);
            }
            edge_shapes(self.edge_orders[e], lam[a], lam[b], &mut out);
        }

        for (f, lv) in self.cell.local_faces().iter().enumerate() {
            let perm = self.face_perm[f];
            face_shapes(
                self.face_orders[f],
                lam[lv[perm[0] as usize]],
                lam[lv[perm[1] as usize]],
                lam[lv[perm[2] as usize]],
                &mut out,
            );
        }

        match self.cell {
            ReferenceCell::Segment => edge_shapes(self.cell_order, lam[0], lam[1], &mut out),
            ReferenceCell::Triangle => {
                face_shapes(self.cell_order, lam[0], lam[1], lam[2], &mut out)
            }
            ReferenceCell::Tetrahedron => {
                interior_shapes_tet(self.cell_order, [lam[0], lam[1], lam[2], lam[3]], &mut out)
            }
        }

        debug_assert_eq!(out.len(), self.ndof);
        Ok(out)
    }
}

impl FiniteElement for H1Element {
    #[inline]
    fn reference_cell(&self) -> ReferenceCell {
        self.cell
    }

    #[inline]
    fn ndof(&self) -> usize {
        self.ndof
    }

    fn shape_values(&self, point: &[f64]) -> Result<Vec<f64>, FeSpaceError> {
        Ok(self.eval(point)?.iter().map(|d| d.v).collect())
    }

    fn shape_gradients(&self, point: &[f64]) -> Result<Vec<Vec<f64>>, FeSpaceError> {
        let dim = self.cell.dim();
        Ok(self.eval(point)?.iter().map(|d| d.gradient(dim)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ndof_closed_forms() {
        // Unit triangle, order 2: 3 vertex + 3 edge + 0 interior = 6.
        let fe = H1Element::uniform(ReferenceCell::Triangle, 2).unwrap();
        assert_eq!(fe.ndof(), 6);

        for p in 0u8..=MAX_ORDER {
            let pu = p as usize;
            let seg = H1Element::uniform(ReferenceCell::Segment, p).unwrap();
            assert_eq!(seg.ndof(), 2 + pu.saturating_sub(1));

            let tri = H1Element::uniform(ReferenceCell::Triangle, p).unwrap();
            let tri_interior = if pu < 3 { 0 } else { (pu - 1) * (pu - 2) / 2 };
            assert_eq!(tri.ndof(), 3 + 3 * pu.saturating_sub(1) + tri_interior);

            let tet = H1Element::uniform(ReferenceCell::Tetrahedron, p).unwrap();
            let face = if pu < 3 { 0 } else { (pu - 1) * (pu - 2) / 2 };
            let interior = if pu < 4 {
                0
            } else {
                (pu - 1) * (pu - 2) * (pu - 3) / 6
            };
            assert_eq!(
                tet.ndof(),
                4 + 6 * pu.saturating_sub(1) + 4 * face + interior
            );
        }
    }

    #[test]
    fn order_zero_and_one_reduce_to_nodal_element() {
        for order in 0u8..=1 {
            let fe = H1Element::uniform(ReferenceCell::Triangle, order).unwrap();
            assert_eq!(fe.ndof(), 3);
            let vals = fe.shape_values(&[0.25, 0.25]).unwrap();
            assert_eq!(vals, vec![0.5, 0.25, 0.25]);
        }
    }

    #[test]
    fn partition_of_unity_of_vertex_shapes() {
        let fe = H1Element::uniform(ReferenceCell::Tetrahedron, 5).unwrap();
        let vals = fe.shape_values(&[0.1, 0.25, 0.3]).unwrap();
        let sum: f64 = vals[..4].iter().sum();
        assert!((sum - 1.0).abs() < 1e-14);
        let grads = fe.shape_gradients(&[0.1, 0.25, 0.3]).unwrap();
        for d in 0..3 {
            let gsum: f64 = grads[..4].iter().map(|g| g[d]).sum();
            assert!(gsum.abs() < 1e-14);
        }
    }

    #[test]
    fn unsupported_order_is_rejected() {
        let err = H1Element::uniform(ReferenceCell::Triangle, MAX_ORDER + 1).unwrap_err();
        assert_eq!(
            err,
            FeSpaceError::UnsupportedOrder {
                found: MAX_ORDER + 1,
                max: MAX_ORDER
            }
        );
    }

    #[test]
    fn out_of_domain_point_is_rejected() {
        let fe = H1Element::uniform(ReferenceCell::Triangle, 3).unwrap();
        assert!(matches!(
            fe.shape_values(&[0.7, 0.7]),
            Err(FeSpaceError::OutOfDomain { .. })
        ));
        assert_eq!(
            fe.shape_values(&[0.2]).unwrap_err(),
            FeSpaceError::PointDimensionMismatch {
                expected: 2,
                found: 1
            }
        );
    }

    #[test]
    fn gradients_match_finite_differences() {
        let fe = H1Element::uniform(ReferenceCell::Triangle, 4).unwrap();
        let p = [0.3, 0.2];
        let h = 1e-6;
        let grads = fe.shape_gradients(&p).unwrap();
        for d in 0..2 {
            let mut plus = p;
            plus[d] += h;
            let mut minus = p;
            minus[d] -= h;
            let vp = fe.shape_values(&plus).unwrap();
            let vm = fe.shape_values(&minus).unwrap();
            for i in 0..fe.ndof() {
                let fd = (vp[i] - vm[i]) / (2.0 * h);
                assert!(
                    (grads[i][d] - fd).abs() < 1e-6,
                    "dof {i} dir {d}: {} vs {}",
                    grads[i][d],
                    fd
                );
            }
        }
    }

    #[test]
    fn basis_is_hierarchical_across_orders() {
        let lo = H1Element::uniform(ReferenceCell::Triangle, 2).unwrap();
        let hi = H1Element::uniform(ReferenceCell::Triangle, 4).unwrap();
        let p = [0.2, 0.35];
        let vlo = lo.shape_values(&p).unwrap();
        let vhi = hi.shape_values(&p).unwrap();
        // Same entity blocks, lower order first: vertices then one DOF per
        // edge are shared between orders 2 and 4.
        assert_eq!(vlo[..3], vhi[..3]);
        // Edge blocks shift position (order 4 edges own 3 DOFs each), so
        // compare per-edge leading entries.
        for e in 0..3 {
            assert_eq!(vlo[3 + e], vhi[3 + 3 * e]);
        }
    }
}
