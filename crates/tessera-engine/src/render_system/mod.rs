//! Render system boundary.
//!
//! A render system is the graphics-API abstraction that actually compiles and
//! executes programs. This crate never picks one itself: the application
//! activates one through an [`ActiveRenderSystem`] handle at startup and
//! clears it at shutdown, and every consumer is handed that handle explicitly.

mod active;
mod capabilities;

pub use active::ActiveRenderSystem;
pub use capabilities::RenderSystemCapabilities;

/// Contract implemented by each graphics backend.
pub trait RenderSystem: Send + Sync {
    /// Human-readable backend name, used in logs and errors.
    fn name(&self) -> &str;

    /// Shader syntaxes and profile mappings supported by this backend.
    fn capabilities(&self) -> &RenderSystemCapabilities;
}
