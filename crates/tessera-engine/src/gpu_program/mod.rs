//! GPU program creation and shared parameters.
//!
//! This module is responsible for:
//! - turning (source, type, syntax) requests into backend program objects
//! - answering syntax/profile questions against the active render system
//! - owning the engine-wide registry of named shared parameter sets

mod error;
mod factory;
mod manager;
mod params;
mod program;
mod query;
mod shared;
mod types;

pub use error::GpuProgramError;
pub use factory::{ProgramFactory, SyntaxDispatch};
pub use manager::{GpuProgramManager, ManagerConfig};
pub use params::{GpuProgramParameters, GpuSharedParameters, ParamValue};
pub use program::{GpuProgram, GpuProgramImpl, LoadState};
pub use query::CapabilityQuery;
pub use shared::{SharedParametersMap, SharedParametersRegistry};
pub use types::{GpuProgramProfile, GpuProgramType};
