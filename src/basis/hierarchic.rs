//! Hierarchical shape-function families on reference cells.
//!
//! All families are expressed in barycentric coordinates. With the entity's
//! vertices in canonical order (ascending global vertex index), the families
//! are:
//!
//! ```text
//! vertex i:             lambda_i
//! edge (a,b), k=2..=p:  lambda_a lambda_b P_{k-2}(lambda_b - lambda_a)
//! face (a,b,c), i+j<=p-3:
//!                       lambda_a lambda_b lambda_c
//!                         P_i(lambda_b - lambda_a) P_j(2 lambda_c - 1)
//! tet (a,b,c,d), i+j+k<=p-4:
//!                       lambda_a lambda_b lambda_c lambda_d
//!                         P_i(lambda_b - lambda_a) P_j(2 lambda_c - 1)
//!                         P_k(2 lambda_d - 1)
//! ```
//!
//! Every function is a polynomial of total degree at most `p`. The trace of a
//! shared-entity function on its entity depends only on the barycentric
//! coordinates of that entity's vertices, so two cells that agree on the
//! canonical vertex order produce identical traces; that is the H1 continuity
//! mechanism.
//!
//! Each family appends functions in a fixed order (total degree ascending,
//! then lexicographic), and the order-`p` sequence is a prefix-superset of
//! the order-`p-1` sequence within every entity block (hierarchical basis).

use crate::basis::dual::Dual;
use crate::basis::legendre::legendre_with_derivs;

/// Number of DOFs an edge of order `p` owns.
#[inline]
pub fn edge_dof_count(order: u8) -> usize {
    (order as usize).saturating_sub(1)
}

/// Number of interior DOFs a triangular face (or triangle cell) of order `p`
/// owns.
#[inline]
pub fn tri_face_dof_count(order: u8) -> usize {
    let p = order as usize;
    if p < 3 { 0 } else { (p - 1) * (p - 2) / 2 }
}

/// Number of interior DOFs a tetrahedral cell of order `p` owns.
#[inline]
pub fn tet_interior_dof_count(order: u8) -> usize {
    let p = order as usize;
    if p < 4 { 0 } else { (p - 1) * (p - 2) * (p - 3) / 6 }
}

/// `P_0(u) .. P_{n_max}(u)` as duals, chain rule applied to `u`'s gradient.
fn legendre_duals(n_max: usize, u: Dual) -> Vec<Dual> {
    let (p, dp) = legendre_with_derivs(n_max, u.v);
    p.into_iter()
        .zip(dp)
        .map(|(v, d)| Dual::new(v, [d * u.g[0], d * u.g[1], d * u.g[2]]))
        .collect()
}

/// Append the edge-interior functions of degree `2..=order` for the edge with
/// canonical endpoints `(a, b)`.
pub fn edge_shapes(order: u8, la: Dual, lb: Dual, out: &mut Vec<Dual>) {
    if order < 2 {
        return;
    }
    let bubble = la * lb;
    let kernels = legendre_duals(order as usize - 2, lb - la);
    for kernel in kernels {
        out.push(bubble * kernel);
    }
}

/// Append the face-interior functions for the triangular face with canonical
/// corners `(a, b, c)`, total degree ascending.
pub fn face_shapes(order: u8, la: Dual, lb: Dual, lc: Dual, out: &mut Vec<Dual>) {
    if order < 3 {
        return;
    }
    let smax = order as usize - 3;
    let bubble = la * lb * lc;
    let pu = legendre_duals(smax, lb - la);
    let pw = legendre_duals(smax, lc * 2.0 - Dual::constant(1.0));
    for s in 0..=smax {
        for i in 0..=s {
            out.push(bubble * pu[i] * pw[s - i]);
        }
    }
}

/// Append the cell-interior functions for a tetrahedron with canonical
/// vertices `(a, b, c, d)`, total degree ascending.
pub fn interior_shapes_tet(order: u8, l: [Dual; 4], out: &mut Vec<Dual>) {
    if order < 4 {
        return;
    }
    let smax = order as usize - 4;
    let bubble = l[0] * l[1] * l[2] * l[3];
    let pu = legendre_duals(smax, l[1] - l[0]);
    let pw = legendre_duals(smax, l[2] * 2.0 - Dual::constant(1.0));
    let pt = legendre_duals(smax, l[3] * 2.0 - Dual::constant(1.0));
    for s in 0..=smax {
        for i in 0..=s {
            for j in 0..=(s - i) {
                out.push(bubble * pu[i] * pw[j] * pt[s - i - j]);
            }
        }
    }
}
