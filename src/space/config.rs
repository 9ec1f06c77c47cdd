//! Order configuration for a finite element space.
//!
//! The configuration is the only state a host persists for this component;
//! everything else (layout, orientation) is recomputed by `update`. All
//! fields serialize with `serde` so the host can embed the config in its own
//! simulation-state files.

use std::collections::BTreeMap;

use crate::topology::Entity;

/// How shared-entity orders are resolved from the incident cells' orders.
#[derive(
    Copy, Clone, Debug, Default, Eq, PartialEq, serde::Serialize, serde::Deserialize,
)]
pub enum ContinuityPolicy {
    /// A shared edge/face takes the minimum incident cell order. Always
    /// succeeds; the standard choice for hp-adaptive refinement.
    #[default]
    MinimumRule,
    /// Incident cells must agree exactly; `update` fails with
    /// [`OrderMismatch`](crate::error::FeSpaceError::OrderMismatch) otherwise.
    Equal,
}

/// Polynomial order assignment for a space.
///
/// Precedence, lowest to highest: the uniform base `order`, per-cell
/// overrides, then explicit per-entity overrides. Per-cell overrides feed
/// the continuity policy (they determine shared-entity orders); per-entity
/// overrides pin a single edge/face/cell-interior order after policy
/// resolution.
#[derive(Clone, Debug, Default, Eq, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SpaceConfig {
    /// Uniform base order applied to every cell.
    pub order: u8,
    /// Per-cell order overrides, keyed by cell index.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub cell_orders: BTreeMap<usize, u8>,
    /// Explicit per-entity order overrides, applied last.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub entity_orders: Vec<(Entity, u8)>,
    /// Shared-entity order resolution policy.
    #[serde(default)]
    pub continuity: ContinuityPolicy,
}

impl SpaceConfig {
    /// Uniform order, minimum-rule continuity, no overrides.
    pub fn uniform(order: u8) -> Self {
        Self {
            order,
            ..Self::default()
        }
    }

    /// Builder-style switch to the [`ContinuityPolicy::Equal`] policy.
    pub fn with_equal_continuity(mut self) -> Self {
        self.continuity = ContinuityPolicy::Equal;
        self
    }
}
