//! Registration surface toward the host framework.
//!
//! The host owns a [`SpaceRegistry`] and populates it once at startup via
//! [`register_builtin`] (idempotent); afterwards it constructs spaces by
//! type name. There is no global mutable registry inside this crate.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::error::FeSpaceError;
use crate::space::{FiniteElementSpace, H1HighOrderSpace, SpaceConfig};
use crate::topology::SimplicialMesh;

/// Factory for one registered finite-element-space type.
pub trait SpaceFactory: Send + Sync {
    /// Name the host uses to request this space type.
    fn type_name(&self) -> &'static str;

    /// Construct an uninitialized space over `mesh`; the host calls
    /// `update` before querying it.
    fn create(
        &self,
        mesh: Arc<SimplicialMesh>,
        config: SpaceConfig,
    ) -> Box<dyn FiniteElementSpace>;
}

/// Host-owned registry of constructible space types.
#[derive(Default)]
pub struct SpaceRegistry {
    factories: BTreeMap<&'static str, Arc<dyn SpaceFactory>>,
}

impl SpaceRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a factory under its type name.
    ///
    /// Idempotent: a name that is already present is left untouched and
    /// `false` is returned.
    pub fn register(&mut self, factory: Arc<dyn SpaceFactory>) -> bool {
        let name = factory.type_name();
        if self.factories.contains_key(name) {
            return false;
        }
        self.factories.insert(name, factory);
        true
    }

    /// Whether a type name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Registered type names, sorted.
    pub fn type_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.factories.keys().copied()
    }

    /// Construct a space by registered type name.
    pub fn create(
        &self,
        name: &str,
        mesh: Arc<SimplicialMesh>,
        config: SpaceConfig,
    ) -> Result<Box<dyn FiniteElementSpace>, FeSpaceError> {
        let factory = self
            .factories
            .get(name)
            .ok_or_else(|| FeSpaceError::UnknownSpaceType(name.to_string()))?;
        Ok(factory.create(mesh, config))
    }
}

struct H1HighOrderFactory;

impl SpaceFactory for H1HighOrderFactory {
    fn type_name(&self) -> &'static str {
        "H1HighOrder"
    }

    fn create(
        &self,
        mesh: Arc<SimplicialMesh>,
        config: SpaceConfig,
    ) -> Box<dyn FiniteElementSpace> {
        Box::new(H1HighOrderSpace::new(mesh, config))
    }
}

/// Register the space types this crate ships. Safe to call more than once.
pub fn register_builtin(registry: &mut SpaceRegistry) {
    registry.register(Arc::new(H1HighOrderFactory));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::mesh::two_triangle_mesh;

    #[test]
    fn registration_is_idempotent() {
        let mut registry = SpaceRegistry::new();
        register_builtin(&mut registry);
        register_builtin(&mut registry);
        assert_eq!(registry.type_names().collect::<Vec<_>>(), ["H1HighOrder"]);
    }

    #[test]
    fn create_update_query() {
        let mut registry = SpaceRegistry::new();
        register_builtin(&mut registry);
        let mut space = registry
            .create(
                "H1HighOrder",
                Arc::new(two_triangle_mesh()),
                SpaceConfig::uniform(2),
            )
            .unwrap();
        space.update().unwrap();
        assert_eq!(space.ndof().unwrap(), 9);
    }

    #[test]
    fn unknown_name_is_an_error() {
        let registry = SpaceRegistry::new();
        let err = match registry.create(
            "NoSuchSpace",
            Arc::new(two_triangle_mesh()),
            SpaceConfig::uniform(1),
        ) {
            Ok(_) => panic!("expected an error for unknown space type"),
            Err(e) => e,
        };
        assert_eq!(err, FeSpaceError::UnknownSpaceType("NoSuchSpace".into()));
    }
}
