//! Tessera engine crate.
//!
//! GPU program factory and shared parameter registry. Backends plug in through
//! [`render_system::RenderSystem`] and [`gpu_program::ProgramFactory`]; the
//! [`gpu_program::GpuProgramManager`] mediates between engine requests and
//! whichever render system is currently active.

pub mod backend;
pub mod gpu_program;
pub mod logging;
pub mod render_system;
pub mod resource;

#[cfg(test)]
pub(crate) mod test_support;
