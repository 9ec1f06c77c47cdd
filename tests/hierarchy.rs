//! Property-based tests for the hierarchical basis: partition of unity and
//! prefix inclusion across orders, at random in-domain points.

use fespace::element::{FiniteElement, H1Element};
use fespace::topology::ReferenceCell;
use proptest::prelude::*;

/// Fold a unit square sample into the unit triangle.
fn triangle_point(a: f64, b: f64) -> [f64; 2] {
    if a + b <= 1.0 { [a, b] } else { [1.0 - a, 1.0 - b] }
}

/// Scale a unit cube sample into the unit tetrahedron.
fn tet_point(a: f64, b: f64, c: f64) -> [f64; 3] {
    let sum = a + b + c;
    if sum <= 1.0 {
        [a, b, c]
    } else {
        // Shrink toward the origin to land back in the simplex.
        let s = 0.999 / sum;
        [a * s, b * s, c * s]
    }
}

proptest! {
    #[test]
    fn vertex_shapes_partition_unity_on_triangle(
        a in 0.0..1.0f64,
        b in 0.0..1.0f64,
        order in 0u8..=8,
    ) {
        let p = triangle_point(a, b);
        let fe = H1Element::uniform(ReferenceCell::Triangle, order).unwrap();
        let vals = fe.shape_values(&p).unwrap();
        let sum: f64 = vals[..3].iter().sum();
        prop_assert!((sum - 1.0).abs() < 1e-13);
        // Constant reproduction: gradients of the vertex shapes cancel.
        let grads = fe.shape_gradients(&p).unwrap();
        for d in 0..2 {
            let gsum: f64 = grads[..3].iter().map(|g| g[d]).sum();
            prop_assert!(gsum.abs() < 1e-13);
        }
    }

    #[test]
    fn vertex_shapes_partition_unity_on_tet(
        a in 0.0..1.0f64,
        b in 0.0..1.0f64,
        c in 0.0..1.0f64,
        order in 0u8..=6,
    ) {
        let p = tet_point(a, b, c);
        let fe = H1Element::uniform(ReferenceCell::Tetrahedron, order).unwrap();
        let vals = fe.shape_values(&p).unwrap();
        let sum: f64 = vals[..4].iter().sum();
        prop_assert!((sum - 1.0).abs() < 1e-13);
    }

    #[test]
    fn lower_order_blocks_are_prefixes(
        a in 0.0..1.0f64,
        b in 0.0..1.0f64,
        low in 2u8..=5,
        extra in 1u8..=4,
    ) {
        // Hierarchical inclusion per entity block: evaluating at the same
        // point, the first functions of each block at order `low + extra`
        // coincide with the block of order `low`.
        let p = triangle_point(a, b);
        let high = low + extra;
        let lo = H1Element::uniform(ReferenceCell::Triangle, low).unwrap();
        let hi = H1Element::uniform(ReferenceCell::Triangle, high).unwrap();
        let vlo = lo.shape_values(&p).unwrap();
        let vhi = hi.shape_values(&p).unwrap();

        // Vertex block.
        prop_assert_eq!(&vlo[..3], &vhi[..3]);
        // Edge blocks: low owns (low-1) per edge, high owns (high-1).
        let (nl, nh) = ((low - 1) as usize, (high - 1) as usize);
        for e in 0..3 {
            prop_assert_eq!(&vlo[3 + e * nl..3 + e * nl + nl], &vhi[3 + e * nh..3 + e * nh + nl]);
        }
        // Interior block prefix.
        let (il, ih) = (3 + 3 * nl, 3 + 3 * nh);
        prop_assert_eq!(&vlo[il..], &vhi[ih..ih + (vlo.len() - il)]);
    }

    #[test]
    fn segment_interior_matches_across_orders(
        x in 0.0..1.0f64,
        low in 2u8..=6,
    ) {
        let lo = H1Element::uniform(ReferenceCell::Segment, low).unwrap();
        let hi = H1Element::uniform(ReferenceCell::Segment, low + 2).unwrap();
        let vlo = lo.shape_values(&[x]).unwrap();
        let vhi = hi.shape_values(&[x]).unwrap();
        prop_assert_eq!(&vlo[..], &vhi[..vlo.len()]);
    }
}
