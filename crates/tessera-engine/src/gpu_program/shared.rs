use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Arc;

use parking_lot::RwLock;

use super::error::GpuProgramError;
use super::params::GpuSharedParameters;

/// Name -> shared parameter set map.
pub type SharedParametersMap = HashMap<String, Arc<GpuSharedParameters>>;

/// Engine-wide store of named shared parameter sets.
///
/// Names are unique for the lifetime of the registry. Sets are never evicted;
/// a set is dropped once the registry and every outside holder release it.
#[derive(Debug, Default)]
pub struct SharedParametersRegistry {
    sets: RwLock<SharedParametersMap>,
}

impl SharedParametersRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates and registers an empty set named `name`.
    ///
    /// Fails with [`GpuProgramError::DuplicateName`] if the name is taken, in
    /// which case the registry is left untouched.
    pub fn create(&self, name: &str) -> Result<Arc<GpuSharedParameters>, GpuProgramError> {
        match self.sets.write().entry(name.to_owned()) {
            Entry::Occupied(_) => Err(GpuProgramError::DuplicateName(name.to_owned())),
            Entry::Vacant(slot) => {
                log::debug!("shared parameter set '{name}' created");
                Ok(slot.insert(Arc::new(GpuSharedParameters::new(name))).clone())
            }
        }
    }

    /// Returns the set registered under `name`.
    pub fn get(&self, name: &str) -> Result<Arc<GpuSharedParameters>, GpuProgramError> {
        self.sets
            .read()
            .get(name)
            .cloned()
            .ok_or_else(|| GpuProgramError::NotFound(name.to_owned()))
    }

    /// Snapshot of every registered set.
    ///
    /// The map is a copy of the registry's handles; sets created afterwards
    /// do not appear in it, but the sets themselves are shared.
    pub fn available(&self) -> SharedParametersMap {
        self.sets.read().clone()
    }

    pub fn len(&self) -> usize {
        self.sets.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_returns_the_created_instance() {
        let registry = SharedParametersRegistry::new();
        let created = registry.create("lighting").unwrap();
        let fetched = registry.get("lighting").unwrap();

        assert!(Arc::ptr_eq(&created, &fetched));
        created.set_named_constant("ambient", 0.25f32);
        assert_eq!(fetched.version(), 1);
        assert_eq!(fetched.name(), "lighting");
    }

    #[test]
    fn duplicate_name_keeps_first_set() {
        let registry = SharedParametersRegistry::new();
        let first = registry.create("frame").unwrap();

        assert_eq!(
            registry.create("frame").unwrap_err(),
            GpuProgramError::DuplicateName("frame".into())
        );
        assert_eq!(registry.len(), 1);
        assert!(Arc::ptr_eq(&first, &registry.get("frame").unwrap()));
    }

    #[test]
    fn missing_name_is_not_found() {
        let registry = SharedParametersRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(
            registry.get("missing").unwrap_err(),
            GpuProgramError::NotFound("missing".into())
        );
    }

    #[test]
    fn available_lists_every_set() {
        let registry = SharedParametersRegistry::new();
        let a = registry.create("a").unwrap();
        registry.create("b").unwrap();

        let all = registry.available();
        assert_eq!(all.len(), 2);
        assert!(Arc::ptr_eq(&all["a"], &a));

        registry.create("c").unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(registry.available().len(), 3);
    }

    #[test]
    fn concurrent_creates_of_one_name_yield_a_single_winner() {
        let registry = SharedParametersRegistry::new();
        let barrier = std::sync::Barrier::new(8);

        let successes = std::thread::scope(|s| {
            let handles: Vec<_> = (0..8)
                .map(|_| {
                    s.spawn(|| {
                        barrier.wait();
                        registry.create("contended").is_ok()
                    })
                })
                .collect();
            handles
                .into_iter()
                .map(|h| h.join().unwrap())
                .filter(|created| *created)
                .count()
        });
        assert_eq!(successes, 1);
        assert_eq!(registry.len(), 1);
    }
}
