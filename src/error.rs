//! `FeSpaceError`: unified error type for fespace public APIs.
//!
//! Every fallible operation in the crate reports through this enum so that a
//! host assembly engine can match on one type. Variants carry enough context
//! (entity, expected vs. found values) for the caller to act; nothing is
//! retried or coerced internally.

use thiserror::Error;

use crate::space::SpaceState;
use crate::topology::{Entity, ReferenceCell};

/// Unified error type for fespace operations.
///
/// Variants group into four families:
/// - configuration errors, rejected when a mesh or space is built;
/// - consistency errors, detected during [`update`](crate::space::FiniteElementSpace::update);
/// - state errors, raised by queries on a space that is not up to date;
/// - domain errors, raised at the offending evaluation call.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FeSpaceError {
    /// A requested polynomial order exceeds the supported maximum.
    #[error("unsupported polynomial order {found} (maximum supported is {max})")]
    UnsupportedOrder {
        /// Order that was requested.
        found: u8,
        /// Largest order the basis supports.
        max: u8,
    },
    /// A cell has a vertex count that maps to no supported reference cell.
    #[error("unsupported cell arity {0} (expected 2, 3, or 4 vertices per cell)")]
    UnsupportedCellArity(usize),
    /// The mesh contains no cells.
    #[error("mesh has no cells")]
    EmptyMesh,
    /// Cells of different kinds were mixed in one mesh.
    #[error("mixed cell kinds: cell {cell} has {found} vertices, expected {expected}")]
    MixedCellKinds {
        /// Offending cell index.
        cell: usize,
        /// Vertex count established by the first cell.
        expected: usize,
        /// Vertex count of the offending cell.
        found: usize,
    },
    /// A cell references a vertex index outside the mesh's vertex range.
    #[error("cell {cell} references vertex {vertex}, but the mesh has {num_vertices} vertices")]
    VertexOutOfRange {
        /// Offending cell index.
        cell: usize,
        /// Out-of-range vertex index.
        vertex: usize,
        /// Number of vertices in the mesh.
        num_vertices: usize,
    },
    /// A cell lists the same vertex twice; its orientation is ambiguous.
    #[error("cell {cell} is degenerate: vertex {vertex} appears more than once")]
    DegenerateCell {
        /// Offending cell index.
        cell: usize,
        /// Repeated vertex index.
        vertex: usize,
    },
    /// Incident cells disagree on a shared entity's order under the
    /// [`Equal`](crate::space::ContinuityPolicy::Equal) continuity policy.
    #[error("order mismatch on {entity}: incident cells require order {expected}, found {found}")]
    OrderMismatch {
        /// The shared entity whose order is contested.
        entity: Entity,
        /// Order required by the first incident cell.
        expected: u8,
        /// Conflicting order required by a later incident cell.
        found: u8,
    },
    /// A query was issued on a space that has not been brought up to date.
    #[error("space is {state:?}; call `update` before querying")]
    NotUpdated {
        /// State the space was in at the time of the query.
        state: SpaceState,
    },
    /// An order override targets an entity the mesh does not have.
    #[error("order override targets {entity}, but the mesh has {count} entities of that kind")]
    EntityOutOfRange {
        /// The entity named by the override.
        entity: Entity,
        /// Number of entities of that kind in the mesh.
        count: usize,
    },
    /// A cell index is outside the mesh's cell range.
    #[error("cell index {cell} out of range ({num_cells} cells)")]
    CellOutOfRange {
        /// Requested cell index.
        cell: usize,
        /// Number of cells in the mesh.
        num_cells: usize,
    },
    /// An evaluation point lies outside the reference cell's canonical domain.
    #[error("reference point {point:?} lies outside the {cell:?} reference domain")]
    OutOfDomain {
        /// Reference cell whose domain was violated.
        cell: ReferenceCell,
        /// The offending point.
        point: Vec<f64>,
    },
    /// An evaluation point has the wrong number of coordinates.
    #[error("reference point has dimension {found}, expected {expected}")]
    PointDimensionMismatch {
        /// Reference dimension of the cell.
        expected: usize,
        /// Dimension of the supplied point.
        found: usize,
    },
    /// No factory is registered under the requested type name.
    #[error("no finite element space type registered under `{0}`")]
    UnknownSpaceType(String),
}
