#![warn(missing_docs)]
//! # fespace
//!
//! fespace implements high-order H1-conforming finite element spaces over
//! simplicial meshes (segments, triangles, tetrahedra) for PDE assembly
//! pipelines. It provides the three layers a generic assembly engine needs:
//!
//! - a hierarchical reference basis (Legendre-based, well-conditioned, and
//!   purely additive in the order, enabling hp-adaptivity);
//! - per-cell finite elements that evaluate shape values and reference
//!   gradients with orientation corrections, so shared edge/face functions
//!   agree exactly between neighboring cells;
//! - a finite element space that owns the global DOF numbering across mesh
//!   entities, answers per-cell DOF index queries, and manufactures elements
//!   on demand.
//!
//! A small registration surface ([`registry`]) lets a host framework
//! construct spaces by type name without any global mutable state.
//!
//! ## Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use fespace::space::{FiniteElementSpace, H1HighOrderSpace, SpaceConfig};
//! use fespace::topology::SimplicialMesh;
//!
//! # fn main() -> Result<(), fespace::error::FeSpaceError> {
//! let mesh = Arc::new(SimplicialMesh::from_cells(
//!     4,
//!     &[vec![0, 1, 2], vec![1, 2, 3]],
//! )?);
//! let mut space = H1HighOrderSpace::new(mesh, SpaceConfig::uniform(2));
//! space.update()?;
//! assert_eq!(space.ndof()?, 9);
//! for cell in 0..space.num_cells() {
//!     let dofs = space.cell_dofs(cell)?;
//!     let fe = space.cell_element(cell)?;
//!     let values = fe.shape_values(&[1.0 / 3.0, 1.0 / 3.0])?;
//!     assert_eq!(dofs.len(), values.len());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Concurrency
//!
//! Read queries take `&self` and are safe from parallel assembly workers;
//! `update` takes `&mut self` and is thereby the exclusive phase between
//! passes. With the `rayon-support` feature, `space::par_visit_cells`
//! iterates cells in parallel.

pub mod basis;
pub mod element;
pub mod error;
pub mod registry;
pub mod space;
pub mod topology;

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::basis::MAX_ORDER;
    pub use crate::element::{FiniteElement, H1Element};
    pub use crate::error::FeSpaceError;
    pub use crate::registry::{SpaceRegistry, register_builtin};
    pub use crate::space::{
        ContinuityPolicy, FiniteElementSpace, H1HighOrderSpace, SpaceConfig, SpaceState,
    };
    pub use crate::topology::{Entity, EntityKind, ReferenceCell, SimplicialMesh};
}
