use super::types::{GpuProgramProfile, GpuProgramType};

/// Failures surfaced by the program manager, the capability façade and the
/// shared parameter registry.
///
/// Nothing here is retried internally; every variant is reported to the
/// immediate caller.
#[derive(Debug, Clone, Eq, PartialEq, thiserror::Error)]
pub enum GpuProgramError {
    /// No render system is currently active.
    #[error("no render system is active")]
    NoActiveBackend,

    /// The backend could not produce a program for the type/syntax pair.
    #[error("cannot create {ty} with syntax '{syntax_code}': {reason}")]
    Creation {
        ty: GpuProgramType,
        syntax_code: String,
        reason: String,
    },

    /// The active render system has no backend string for this profile.
    #[error("render system '{render_system}' has no mapping for profile {profile}")]
    UnmappedProfile {
        profile: GpuProgramProfile,
        render_system: String,
    },

    /// A shared parameter set with this name is already registered.
    #[error("the shared parameter set '{0}' already exists")]
    DuplicateName(String),

    /// No shared parameter set is registered under this name.
    #[error("no shared parameter set with name '{0}'")]
    NotFound(String),
}

impl GpuProgramError {
    pub fn creation(
        ty: GpuProgramType,
        syntax_code: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        GpuProgramError::Creation {
            ty,
            syntax_code: syntax_code.into(),
            reason: reason.into(),
        }
    }
}
