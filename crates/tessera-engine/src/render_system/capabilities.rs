use std::collections::{BTreeSet, HashMap};

use crate::gpu_program::GpuProgramProfile;

/// Shader capabilities reported by a render system.
///
/// Filled in by the backend during initialization and read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct RenderSystemCapabilities {
    /// Syntax codes the backend can compile.
    shader_profiles: BTreeSet<String>,

    /// Abstract profile -> backend profile string.
    profile_mappings: HashMap<GpuProgramProfile, String>,
}

impl RenderSystemCapabilities {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_shader_profile(&mut self, profile: impl Into<String>) {
        self.shader_profiles.insert(profile.into());
    }

    pub fn remove_shader_profile(&mut self, profile: &str) {
        self.shader_profiles.remove(profile);
    }

    pub fn supported_shader_profiles(&self) -> &BTreeSet<String> {
        &self.shader_profiles
    }

    pub fn is_shader_profile_supported(&self, profile: &str) -> bool {
        self.shader_profiles.contains(profile)
    }

    /// Registers the backend string for an abstract profile, replacing any
    /// previous mapping.
    pub fn add_profile_mapping(&mut self, profile: GpuProgramProfile, rs_profile: impl Into<String>) {
        self.profile_mappings.insert(profile, rs_profile.into());
    }

    pub fn gpu_prog_profile_to_rs_specific_profile(&self, profile: GpuProgramProfile) -> Option<&str> {
        self.profile_mappings.get(&profile).map(String::as_str)
    }

    /// Writes the capability set to the log.
    pub fn log_summary(&self, render_system: &str) {
        let profiles: Vec<&str> = self.shader_profiles.iter().map(String::as_str).collect();
        log::info!("{render_system}: supported shader profiles: {}", profiles.join(" "));

        let mut mappings: Vec<_> = self.profile_mappings.iter().collect();
        mappings.sort_by_key(|(profile, _)| **profile);
        for (profile, rs_profile) in mappings {
            log::info!("{render_system}:   {profile} -> {rs_profile}");
        }
    }
}
