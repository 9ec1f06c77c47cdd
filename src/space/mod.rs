//! Finite element spaces: global DOF bookkeeping per mesh.
//!
//! [`FiniteElementSpace`] is the capability a generic assembly engine drives:
//! bring the space up to date, ask for the global DOF count, and per cell
//! retrieve the global DOF indices and a finite element to evaluate with.
//!
//! # Concurrency
//!
//! Read queries (`ndof`, `cell_dofs`, `cell_element`) take `&self` and are
//! safe to issue from parallel workers; `update` takes `&mut self`, so the
//! exclusive stop-the-world phase between assembly passes is enforced by the
//! borrow checker rather than by locks.

pub mod config;
pub mod h1;
pub mod layout;

pub use config::{ContinuityPolicy, SpaceConfig};
pub use h1::H1HighOrderSpace;
pub use layout::DofLayout;

use crate::element::FiniteElement;
use crate::error::FeSpaceError;

/// Lifecycle state of a space.
///
/// `Uninitialized -> update -> Ready`; any configuration mutation moves
/// `Ready -> Stale`; `update` returns to `Ready` from either non-ready state.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum SpaceState {
    /// Freshly constructed; no DOF numbering exists yet.
    Uninitialized,
    /// DOF numbering and orientation caches are current.
    Ready,
    /// Configuration changed since the last `update`.
    Stale,
}

/// A finite element space usable by a generic assembly loop.
pub trait FiniteElementSpace: Send + Sync {
    /// Recompute DOF numbering, effective orders, and orientation caches.
    fn update(&mut self) -> Result<(), FeSpaceError>;

    /// Total number of global DOFs; requires a ready space.
    fn ndof(&self) -> Result<usize, FeSpaceError>;

    /// Number of cells in the underlying mesh.
    fn num_cells(&self) -> usize;

    /// Global DOF indices of `cell`'s closure, in exactly the local
    /// shape-function order of [`cell_element`](Self::cell_element);
    /// requires a ready space.
    fn cell_dofs(&self, cell: usize) -> Result<Vec<usize>, FeSpaceError>;

    /// Manufacture a finite element for `cell` from its current orders and
    /// cached orientation; requires a ready space. The returned element is
    /// exclusively owned by the caller.
    fn cell_element(&self, cell: usize) -> Result<Box<dyn FiniteElement>, FeSpaceError>;
}

/// Visit every cell in parallel with its DOF indices and element.
///
/// The space is only read; workers own their elements.
#[cfg(feature = "rayon-support")]
pub fn par_visit_cells<F>(space: &dyn FiniteElementSpace, visit: F) -> Result<(), FeSpaceError>
where
    F: Fn(usize, Vec<usize>, Box<dyn FiniteElement>) -> Result<(), FeSpaceError> + Sync,
{
    use rayon::prelude::*;
    (0..space.num_cells()).into_par_iter().try_for_each(|c| {
        let dofs = space.cell_dofs(c)?;
        let element = space.cell_element(c)?;
        visit(c, dofs, element)
    })
}
