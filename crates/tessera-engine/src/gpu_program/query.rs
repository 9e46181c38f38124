use std::collections::BTreeSet;

use super::error::GpuProgramError;
use super::types::GpuProgramProfile;
use crate::render_system::ActiveRenderSystem;

/// Read-through queries against the active render system's capabilities.
///
/// Nothing is cached: each call resolves whichever render system is active at
/// that moment.
#[derive(Debug, Clone)]
pub struct CapabilityQuery {
    render_system: ActiveRenderSystem,
}

impl CapabilityQuery {
    pub fn new(render_system: ActiveRenderSystem) -> Self {
        Self { render_system }
    }

    /// All syntax codes the active render system can compile.
    pub fn supported_syntax(&self) -> Result<BTreeSet<String>, GpuProgramError> {
        let rs = self.render_system.current()?;
        Ok(rs.capabilities().supported_shader_profiles().clone())
    }

    pub fn is_syntax_supported(&self, syntax_code: &str) -> Result<bool, GpuProgramError> {
        let rs = self.render_system.current()?;
        Ok(rs.capabilities().is_shader_profile_supported(syntax_code))
    }

    /// Translates an abstract profile into the active backend's profile string.
    pub fn gpu_prog_profile_to_rs_specific_profile(
        &self,
        profile: GpuProgramProfile,
    ) -> Result<String, GpuProgramError> {
        let rs = self.render_system.current()?;
        rs.capabilities()
            .gpu_prog_profile_to_rs_specific_profile(profile)
            .map(str::to_owned)
            .ok_or_else(|| GpuProgramError::UnmappedProfile {
                profile,
                render_system: rs.name().to_owned(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MockRenderSystem;

    fn query_with(rs: Option<MockRenderSystem>) -> CapabilityQuery {
        let active = ActiveRenderSystem::new();
        if let Some(rs) = rs {
            active.activate(std::sync::Arc::new(rs));
        }
        CapabilityQuery::new(active)
    }

    #[test]
    fn queries_fail_without_active_backend() {
        let query = query_with(None);
        assert_eq!(query.supported_syntax(), Err(GpuProgramError::NoActiveBackend));
        assert_eq!(query.is_syntax_supported("glsl150"), Err(GpuProgramError::NoActiveBackend));
        assert_eq!(
            query.gpu_prog_profile_to_rs_specific_profile(GpuProgramProfile::Vs4_0),
            Err(GpuProgramError::NoActiveBackend)
        );
    }

    #[test]
    fn membership_agrees_with_supported_set() {
        let query = query_with(Some(MockRenderSystem::new("gl", &["glsl150", "hlsl50"])));
        let supported = query.supported_syntax().unwrap();

        for code in ["glsl150", "hlsl50", "cg2.0", "", "GLSL150"] {
            assert_eq!(query.is_syntax_supported(code).unwrap(), supported.contains(code), "{code}");
        }
    }

    #[test]
    fn profile_translation_reads_active_backend() {
        let mut rs = MockRenderSystem::new("d3d", &["hlsl50"]);
        rs.capabilities_mut().add_profile_mapping(GpuProgramProfile::Fs5_0, "ps_5_0");
        let query = query_with(Some(rs));

        assert_eq!(
            query.gpu_prog_profile_to_rs_specific_profile(GpuProgramProfile::Fs5_0).unwrap(),
            "ps_5_0"
        );
        assert_eq!(
            query.gpu_prog_profile_to_rs_specific_profile(GpuProgramProfile::Gs4_0),
            Err(GpuProgramError::UnmappedProfile {
                profile: GpuProgramProfile::Gs4_0,
                render_system: "d3d".into(),
            })
        );
    }

    #[test]
    fn answers_follow_backend_switches() {
        let active = ActiveRenderSystem::new();
        let query = CapabilityQuery::new(active.clone());

        active.activate(MockRenderSystem::shared("gl", &["glsl150"]));
        assert!(query.is_syntax_supported("glsl150").unwrap());

        active.activate(MockRenderSystem::shared("d3d", &["hlsl50"]));
        assert!(!query.is_syntax_supported("glsl150").unwrap());
        assert!(query.is_syntax_supported("hlsl50").unwrap());
    }
}
