//! Concrete render system backends.

pub mod webgpu;
