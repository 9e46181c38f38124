use std::sync::Arc;

use parking_lot::RwLock;

use super::RenderSystem;
use crate::gpu_program::GpuProgramError;

/// Handle to "the currently active render system".
///
/// Clones share the same slot, so activating through one clone is visible to
/// every manager and façade built from another. Lifecycle is explicit:
/// [`activate`](Self::activate) at startup, [`deactivate`](Self::deactivate)
/// at shutdown.
#[derive(Clone, Default)]
pub struct ActiveRenderSystem {
    slot: Arc<RwLock<Option<Arc<dyn RenderSystem>>>>,
}

impl ActiveRenderSystem {
    /// Creates a handle with no active render system.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes `render_system` the active one and returns the previous system.
    pub fn activate(&self, render_system: Arc<dyn RenderSystem>) -> Option<Arc<dyn RenderSystem>> {
        log::info!("activating render system '{}'", render_system.name());
        self.slot.write().replace(render_system)
    }

    /// Clears the active render system and returns it.
    pub fn deactivate(&self) -> Option<Arc<dyn RenderSystem>> {
        let prev = self.slot.write().take();
        if let Some(rs) = &prev {
            log::info!("deactivated render system '{}'", rs.name());
        }
        prev
    }

    /// Returns the active render system.
    ///
    /// The returned `Arc` is a snapshot: a concurrent `activate` does not
    /// affect a caller already holding it.
    pub fn current(&self) -> Result<Arc<dyn RenderSystem>, GpuProgramError> {
        self.slot.read().clone().ok_or(GpuProgramError::NoActiveBackend)
    }

    pub fn is_active(&self) -> bool {
        self.slot.read().is_some()
    }
}

impl std::fmt::Debug for ActiveRenderSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = self.slot.read().as_ref().map(|rs| rs.name().to_owned());
        f.debug_struct("ActiveRenderSystem").field("active", &name).finish()
    }
}
