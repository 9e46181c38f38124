use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;

/// Value of a named program constant.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Float(Vec<f32>),
    Int(Vec<i32>),
}

impl From<f32> for ParamValue {
    fn from(v: f32) -> Self {
        ParamValue::Float(vec![v])
    }
}

impl<const N: usize> From<[f32; N]> for ParamValue {
    fn from(v: [f32; N]) -> Self {
        ParamValue::Float(v.to_vec())
    }
}

impl From<i32> for ParamValue {
    fn from(v: i32) -> Self {
        ParamValue::Int(vec![v])
    }
}

impl<const N: usize> From<[i32; N]> for ParamValue {
    fn from(v: [i32; N]) -> Self {
        ParamValue::Int(v.to_vec())
    }
}

/// Named, engine-wide set of constants shared across programs.
///
/// Every holder of the same `Arc` observes the same values. Writes bump
/// [`version`](Self::version) so consumers can tell when to re-upload.
#[derive(Debug)]
pub struct GpuSharedParameters {
    name: String,
    constants: RwLock<BTreeMap<String, ParamValue>>,
    version: AtomicU64,
}

impl GpuSharedParameters {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            constants: RwLock::new(BTreeMap::new()),
            version: AtomicU64::new(0),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_named_constant(&self, name: impl Into<String>, value: impl Into<ParamValue>) {
        self.constants.write().insert(name.into(), value.into());
        self.version.fetch_add(1, Ordering::AcqRel);
    }

    pub fn remove_named_constant(&self, name: &str) -> Option<ParamValue> {
        let removed = self.constants.write().remove(name);
        if removed.is_some() {
            self.version.fetch_add(1, Ordering::AcqRel);
        }
        removed
    }

    pub fn named_constant(&self, name: &str) -> Option<ParamValue> {
        self.constants.read().get(name).cloned()
    }

    pub fn constant_names(&self) -> Vec<String> {
        self.constants.read().keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.constants.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.constants.read().is_empty()
    }

    /// Monotonic change counter; starts at 0.
    pub fn version(&self) -> u64 {
        self.version.load(Ordering::Acquire)
    }
}

/// Per-program constants plus the shared sets the program links against.
#[derive(Debug, Clone, Default)]
pub struct GpuProgramParameters {
    constants: BTreeMap<String, ParamValue>,
    shared: Vec<Arc<GpuSharedParameters>>,
}

impl GpuProgramParameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_named_constant(&mut self, name: impl Into<String>, value: impl Into<ParamValue>) {
        self.constants.insert(name.into(), value.into());
    }

    /// Looks `name` up in the local constants first, then in linked shared
    /// sets in link order.
    pub fn named_constant(&self, name: &str) -> Option<ParamValue> {
        self.constants
            .get(name)
            .cloned()
            .or_else(|| self.shared.iter().find_map(|set| set.named_constant(name)))
    }

    /// Links a shared set. Linking a set whose name is already linked is a
    /// no-op.
    pub fn add_shared_parameters(&mut self, shared: Arc<GpuSharedParameters>) {
        if !self.is_using_shared_parameters(shared.name()) {
            self.shared.push(shared);
        }
    }

    pub fn is_using_shared_parameters(&self, name: &str) -> bool {
        self.shared.iter().any(|set| set.name() == name)
    }

    pub fn remove_shared_parameters(&mut self, name: &str) {
        self.shared.retain(|set| set.name() != name);
    }

    pub fn remove_all_shared_parameters(&mut self) {
        self.shared.clear();
    }

    pub fn shared_parameters(&self) -> &[Arc<GpuSharedParameters>] {
        &self.shared
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_bump_version() {
        let set = GpuSharedParameters::new("lighting");
        assert_eq!(set.version(), 0);
        assert!(set.is_empty());

        set.set_named_constant("ambient", [0.1f32, 0.1, 0.1, 1.0]);
        set.set_named_constant("count", 3i32);
        assert_eq!(set.version(), 2);
        assert_eq!(set.len(), 2);

        assert_eq!(set.remove_named_constant("missing"), None);
        assert_eq!(set.version(), 2);
        assert_eq!(set.remove_named_constant("count"), Some(ParamValue::Int(vec![3])));
        assert_eq!(set.version(), 3);
    }

    #[test]
    fn local_constants_shadow_shared_ones() {
        let shared = Arc::new(GpuSharedParameters::new("frame"));
        shared.set_named_constant("time", 1.5f32);
        shared.set_named_constant("exposure", 2.0f32);

        let mut params = GpuProgramParameters::new();
        params.add_shared_parameters(shared.clone());
        params.set_named_constant("exposure", 0.5f32);

        assert_eq!(params.named_constant("time"), Some(ParamValue::Float(vec![1.5])));
        assert_eq!(params.named_constant("exposure"), Some(ParamValue::Float(vec![0.5])));
        assert_eq!(params.named_constant("missing"), None);

        // Later writes to the shared set are visible through the link.
        shared.set_named_constant("time", 2.5f32);
        assert_eq!(params.named_constant("time"), Some(ParamValue::Float(vec![2.5])));
    }

    #[test]
    fn shared_links_are_unique_by_name() {
        let a = Arc::new(GpuSharedParameters::new("a"));
        let b = Arc::new(GpuSharedParameters::new("b"));

        let mut params = GpuProgramParameters::new();
        params.add_shared_parameters(a.clone());
        params.add_shared_parameters(a);
        params.add_shared_parameters(b);
        assert_eq!(params.shared_parameters().len(), 2);

        params.remove_shared_parameters("a");
        assert!(!params.is_using_shared_parameters("a"));
        assert!(params.is_using_shared_parameters("b"));

        params.remove_all_shared_parameters();
        assert!(params.shared_parameters().is_empty());
    }
}
