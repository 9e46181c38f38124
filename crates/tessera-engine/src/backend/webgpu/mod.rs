//! wgpu render system.
//!
//! This module is responsible for:
//! - creating a headless wgpu Adapter/Device/Queue
//! - reporting WGSL capabilities to the program manager
//! - building WGSL programs that validate through naga before upload

mod init;
mod program;
mod render_system;

pub use init::WgpuInit;
pub use program::{validate_wgsl, WgslProgram, WgslProgramFactory};
pub use render_system::{wgpu_capabilities, WgpuRenderSystem, WGSL};
