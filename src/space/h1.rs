//! `H1HighOrderSpace`: global DOF bookkeeping for the hierarchical H1 basis.
//!
//! The space owns the DOF numbering across all mesh entities, answers
//! per-cell DOF index queries, and manufactures a finite element for each
//! cell. `update` is the single point where configuration and mesh are
//! reconciled: it resolves effective per-entity orders under the continuity
//! policy, rebuilds the [`DofLayout`], and recomputes the orientation cache.
//!
//! Orientation data lives in flat arrays indexed by `(cell, local entity)`
//! so `update` streams through memory once and queries are pointer-chase
//! free.

use std::sync::Arc;

use crate::basis::MAX_ORDER;
use crate::basis::hierarchic::{edge_dof_count, tet_interior_dof_count, tri_face_dof_count};
use crate::element::{FiniteElement, H1Element};
use crate::error::FeSpaceError;
use crate::space::config::{ContinuityPolicy, SpaceConfig};
use crate::space::layout::DofLayout;
use crate::space::{FiniteElementSpace, SpaceState};
use crate::topology::{Entity, EntityKind, ReferenceCell, SimplicialMesh};

/// High-order H1-conforming finite element space over a simplicial mesh.
pub struct H1HighOrderSpace {
    mesh: Arc<SimplicialMesh>,
    config: SpaceConfig,
    state: SpaceState,
    /// Effective orders per entity, valid while `state == Ready`.
    cell_orders: Vec<u8>,
    edge_orders: Vec<u8>,
    face_orders: Vec<u8>,
    layout: DofLayout,
    /// `(cell, local edge)` orientation flips, flattened by cell.
    edge_swap: Vec<bool>,
    /// `(cell, local face)` canonical corner permutations, flattened by cell.
    face_perm: Vec<[u8; 3]>,
}

fn argsort3(keys: [usize; 3]) -> [u8; 3] {
    let mut idx = [0u8, 1, 2];
    idx.sort_unstable_by_key(|&i| keys[i as usize]);
    idx
}

fn check_order(order: u8) -> Result<(), FeSpaceError> {
    if order > MAX_ORDER {
        Err(FeSpaceError::UnsupportedOrder {
            found: order,
            max: MAX_ORDER,
        })
    } else {
        Ok(())
    }
}

fn resolve_shared_order(
    slot: &mut u8,
    seen: &mut bool,
    incident: u8,
    policy: ContinuityPolicy,
    entity: Entity,
) -> Result<(), FeSpaceError> {
    if !*seen {
        *slot = incident;
        *seen = true;
        return Ok(());
    }
    match policy {
        ContinuityPolicy::Equal => {
            if *slot != incident {
                return Err(FeSpaceError::OrderMismatch {
                    entity,
                    expected: *slot,
                    found: incident,
                });
            }
        }
        ContinuityPolicy::MinimumRule => *slot = (*slot).min(incident),
    }
    Ok(())
}

impl H1HighOrderSpace {
    /// Create a space over `mesh` with the given order configuration.
    ///
    /// The space starts [`Uninitialized`](SpaceState::Uninitialized);
    /// configuration problems are reported by the first
    /// [`update`](FiniteElementSpace::update), not here.
    pub fn new(mesh: Arc<SimplicialMesh>, config: SpaceConfig) -> Self {
        Self {
            mesh,
            config,
            state: SpaceState::Uninitialized,
            cell_orders: Vec::new(),
            edge_orders: Vec::new(),
            face_orders: Vec::new(),
            layout: DofLayout::default(),
            edge_swap: Vec::new(),
            face_perm: Vec::new(),
        }
    }

    /// Current lifecycle state.
    #[inline]
    pub fn state(&self) -> SpaceState {
        self.state
    }

    /// The mesh this space numbers DOFs for.
    #[inline]
    pub fn mesh(&self) -> &Arc<SimplicialMesh> {
        &self.mesh
    }

    /// Current order configuration.
    #[inline]
    pub fn config(&self) -> &SpaceConfig {
        &self.config
    }

    /// Replace the uniform base order. Marks the space stale.
    pub fn set_uniform_order(&mut self, order: u8) {
        self.config.order = order;
        self.mark_stale();
    }

    /// Override one cell's order. Marks the space stale.
    pub fn set_cell_order(&mut self, cell: usize, order: u8) {
        self.config.cell_orders.insert(cell, order);
        self.mark_stale();
    }

    /// Pin one entity's order, replacing any previous override for it.
    /// Marks the space stale.
    pub fn set_entity_order(&mut self, entity: Entity, order: u8) {
        self.config.entity_orders.retain(|(e, _)| *e != entity);
        self.config.entity_orders.push((entity, order));
        self.mark_stale();
    }

    /// Effective order of edge `e`; requires a ready space.
    pub fn edge_order(&self, e: usize) -> Result<u8, FeSpaceError> {
        self.ensure_ready()?;
        Ok(self.edge_orders[e])
    }

    /// Effective order of face `f`; requires a ready space.
    pub fn face_order(&self, f: usize) -> Result<u8, FeSpaceError> {
        self.ensure_ready()?;
        Ok(self.face_orders[f])
    }

    /// Effective order of cell `c`'s interior; requires a ready space.
    pub fn cell_order(&self, c: usize) -> Result<u8, FeSpaceError> {
        self.ensure_ready()?;
        Ok(self.cell_orders[c])
    }

    /// The current DOF layout; requires a ready space.
    pub fn layout(&self) -> Result<&DofLayout, FeSpaceError> {
        self.ensure_ready()?;
        Ok(&self.layout)
    }

    fn mark_stale(&mut self) {
        if self.state == SpaceState::Ready {
            self.state = SpaceState::Stale;
        }
    }

    fn ensure_ready(&self) -> Result<(), FeSpaceError> {
        if self.state == SpaceState::Ready {
            Ok(())
        } else {
            Err(FeSpaceError::NotUpdated { state: self.state })
        }
    }

    /// Resolve effective per-entity orders from the configuration.
    fn resolve_orders(&self) -> Result<(Vec<u8>, Vec<u8>, Vec<u8>), FeSpaceError> {
        let mesh = &self.mesh;
        let policy = self.config.continuity;
        check_order(self.config.order)?;

        let mut cell_orders = vec![self.config.order; mesh.num_cells()];
        for (&c, &p) in &self.config.cell_orders {
            check_order(p)?;
            if c >= mesh.num_cells() {
                return Err(FeSpaceError::EntityOutOfRange {
                    entity: Entity::cell(c),
                    count: mesh.num_cells(),
                });
            }
            cell_orders[c] = p;
        }

        let mut edge_orders = vec![0u8; mesh.num_edges()];
        let mut edge_seen = vec![false; mesh.num_edges()];
        let mut face_orders = vec![0u8; mesh.num_faces()];
        let mut face_seen = vec![false; mesh.num_faces()];
        for c in 0..mesh.num_cells() {
            let order = cell_orders[c];
            for &e in mesh.cell_edges(c) {
                resolve_shared_order(
                    &mut edge_orders[e],
                    &mut edge_seen[e],
                    order,
                    policy,
                    Entity::edge(e),
                )?;
            }
            for &f in mesh.cell_faces(c) {
                resolve_shared_order(
                    &mut face_orders[f],
                    &mut face_seen[f],
                    order,
                    policy,
                    Entity::face(f),
                )?;
            }
        }

        for &(entity, p) in &self.config.entity_orders {
            check_order(p)?;
            let count = match entity.kind {
                EntityKind::Vertex => {
                    // A vertex owns exactly one DOF at every order.
                    log::warn!("ignoring order override on {entity}");
                    continue;
                }
                EntityKind::Edge => mesh.num_edges(),
                EntityKind::Face => mesh.num_faces(),
                EntityKind::Cell => mesh.num_cells(),
            };
            if entity.index >= count {
                return Err(FeSpaceError::EntityOutOfRange { entity, count });
            }
            match entity.kind {
                EntityKind::Edge => edge_orders[entity.index] = p,
                EntityKind::Face => face_orders[entity.index] = p,
                EntityKind::Cell => cell_orders[entity.index] = p,
                EntityKind::Vertex => unreachable!(),
            }
        }

        Ok((cell_orders, edge_orders, face_orders))
    }

    /// Recompute the `(cell, local entity)` orientation cache.
    fn rebuild_orientation(&mut self) {
        let mesh = self.mesh.clone();
        let kind = mesh.cell_kind();
        self.edge_swap.clear();
        self.face_perm.clear();
        self.edge_swap.reserve(mesh.num_cells() * kind.num_edges());
        self.face_perm.reserve(mesh.num_cells() * kind.num_faces());
        for c in 0..mesh.num_cells() {
            let gv = mesh.cell_vertices(c);
            for lv in kind.local_edges() {
                self.edge_swap.push(gv[lv[0]] > gv[lv[1]]);
            }
            for lv in kind.local_faces() {
                self.face_perm
                    .push(argsort3([gv[lv[0]], gv[lv[1]], gv[lv[2]]]));
            }
        }
    }

    fn interior_dof_count(kind: ReferenceCell, order: u8) -> usize {
        match kind {
            ReferenceCell::Segment => edge_dof_count(order),
            ReferenceCell::Triangle => tri_face_dof_count(order),
            ReferenceCell::Tetrahedron => tet_interior_dof_count(order),
        }
    }
}

impl FiniteElementSpace for H1HighOrderSpace {
    fn update(&mut self) -> Result<(), FeSpaceError> {
        let (cell_orders, edge_orders, face_orders) = self.resolve_orders()?;

        let kind = self.mesh.cell_kind();
        let edge_counts: Vec<usize> = edge_orders.iter().map(|&p| edge_dof_count(p)).collect();
        let face_counts: Vec<usize> = face_orders.iter().map(|&p| tri_face_dof_count(p)).collect();
        let cell_counts: Vec<usize> = cell_orders
            .iter()
            .map(|&p| Self::interior_dof_count(kind, p))
            .collect();
        self.layout = DofLayout::build(
            self.mesh.num_vertices(),
            &edge_counts,
            &face_counts,
            &cell_counts,
        );

        self.cell_orders = cell_orders;
        self.edge_orders = edge_orders;
        self.face_orders = face_orders;
        self.rebuild_orientation();
        self.state = SpaceState::Ready;

        log::debug!(
            "updated H1 space: {} vertices, {} edges, {} faces, {} cells, {} dofs",
            self.mesh.num_vertices(),
            self.mesh.num_edges(),
            self.mesh.num_faces(),
            self.mesh.num_cells(),
            self.layout.total_len(),
        );
        Ok(())
    }

    fn ndof(&self) -> Result<usize, FeSpaceError> {
        self.ensure_ready()?;
        Ok(self.layout.total_len())
    }

    fn num_cells(&self) -> usize {
        self.mesh.num_cells()
    }

    fn cell_dofs(&self, cell: usize) -> Result<Vec<usize>, FeSpaceError> {
        self.ensure_ready()?;
        self.mesh.check_cell(cell)?;

        let mut out = Vec::new();
        for &v in self.mesh.cell_vertices(cell) {
            out.push(self.layout.vertex_dof(v));
        }
        for &e in self.mesh.cell_edges(cell) {
            let (offset, len) = self.layout.edge_span(e);
            out.extend(offset..offset + len);
        }
        for &f in self.mesh.cell_faces(cell) {
            let (offset, len) = self.layout.face_span(f);
            out.extend(offset..offset + len);
        }
        let (offset, len) = self.layout.cell_span(cell);
        out.extend(offset..offset + len);
        Ok(out)
    }

    fn cell_element(&self, cell: usize) -> Result<Box<dyn FiniteElement>, FeSpaceError> {
        self.ensure_ready()?;
        self.mesh.check_cell(cell)?;

        let kind = self.mesh.cell_kind();
        let ne = kind.num_edges();
        let nf = kind.num_faces();
        let edge_orders: Vec<u8> = self
            .mesh
            .cell_edges(cell)
            .iter()
            .map(|&e| self.edge_orders[e])
            .collect();
        let face_orders: Vec<u8> = self
            .mesh
            .cell_faces(cell)
            .iter()
            .map(|&f| self.face_orders[f])
            .collect();
        let element = H1Element::new(
            kind,
            self.cell_orders[cell],
            &edge_orders,
            &face_orders,
            &self.edge_swap[cell * ne..(cell + 1) * ne],
            &self.face_perm[cell * nf..(cell + 1) * nf],
        )?;
        Ok(Box::new(element))
    }
}
