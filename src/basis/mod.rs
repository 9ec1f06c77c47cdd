//! Reference basis generator: hierarchical polynomial families on reference
//! cells, parameterized by order.
//!
//! Order increases are purely additive: the basis for order `p` is a strict
//! superset of the basis for order `p - 1`, which is what makes per-entity
//! order variation (hp-adaptivity) possible without renumbering lower-order
//! functions.

pub mod dual;
pub mod hierarchic;
pub mod legendre;

pub use dual::Dual;
pub use hierarchic::{edge_dof_count, tet_interior_dof_count, tri_face_dof_count};

use crate::topology::ReferenceCell;

/// Largest polynomial order the basis supports.
///
/// The Legendre recurrences are stable well past this, but DOF-count
/// formulas and the test matrix are only exercised up to here; higher
/// requests are rejected rather than silently degraded.
pub const MAX_ORDER: u8 = 12;

/// Barycentric coordinates of `point` as value/gradient pairs, in local
/// vertex order. Returns the coordinates and their count.
///
/// `point` must carry `cell.dim()` coordinates. Total on all of reference
/// space; domain checks are the element's concern.
pub fn barycentric(cell: ReferenceCell, point: &[f64]) -> ([Dual; 4], usize) {
    let mut lam = [Dual::constant(0.0); 4];
    let n = cell.num_vertices();
    let mut first = Dual::constant(1.0);
    for d in 0..cell.dim() {
        let mut g = [0.0; 3];
        g[d] = 1.0;
        lam[d + 1] = Dual::new(point[d], g);
        first = first - lam[d + 1];
    }
    lam[0] = first;
    (lam, n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn barycentrics_sum_to_one_with_zero_gradient() {
        for (cell, point) in [
            (ReferenceCell::Segment, vec![0.3]),
            (ReferenceCell::Triangle, vec![0.2, 0.5]),
            (ReferenceCell::Tetrahedron, vec![0.1, 0.2, 0.3]),
        ] {
            let (lam, n) = barycentric(cell, &point);
            let sum = lam[..n]
                .iter()
                .fold(Dual::constant(0.0), |acc, &l| acc + l);
            assert!((sum.v - 1.0).abs() < 1e-15);
            assert!(sum.g.iter().all(|g| g.abs() < 1e-15));
        }
    }

    #[test]
    fn barycentrics_are_one_at_their_vertex() {
        let (lam, _) = barycentric(ReferenceCell::Triangle, &[1.0, 0.0]);
        assert!((lam[0].v).abs() < 1e-15);
        assert!((lam[1].v - 1.0).abs() < 1e-15);
        assert!((lam[2].v).abs() < 1e-15);
    }
}
