//! Resource-group registration boundary.
//!
//! Resource managers announce themselves to whatever resource-group system the
//! application runs. This crate only defines the interface; the bookkeeping
//! behind it lives outside.

/// Receives resource-manager registrations.
pub trait ResourceRegistrar: Send + Sync {
    /// Called once when a manager is constructed.
    ///
    /// `load_order` ranks managers when a group is loaded; lower loads first.
    fn register_resource_manager(&self, resource_type: &str, load_order: f32);

    /// Called once when the manager is dropped.
    fn unregister_resource_manager(&self, resource_type: &str);
}
