use std::collections::BTreeSet;
use std::sync::Arc;

use parking_lot::Mutex;

use super::error::GpuProgramError;
use super::factory::ProgramFactory;
use super::params::{GpuProgramParameters, GpuSharedParameters};
use super::program::GpuProgram;
use super::query::CapabilityQuery;
use super::shared::{SharedParametersMap, SharedParametersRegistry};
use super::types::{GpuProgramProfile, GpuProgramType};
use crate::render_system::ActiveRenderSystem;
use crate::resource::ResourceRegistrar;

/// Manager registration settings.
#[derive(Debug, Clone)]
pub struct ManagerConfig {
    /// Name announced to the resource registrar.
    pub resource_type: String,

    /// Position among resource managers when a group loads.
    pub load_order: f32,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            resource_type: "GpuProgram".to_owned(),
            load_order: 50.0,
        }
    }
}

/// Creates GPU programs through a backend factory and owns the shared
/// parameter registry.
///
/// Meant to be built once and shared behind `Arc` by every thread that
/// creates programs.
///
/// Locking: construction (the factory hook plus configuration) runs under a
/// single creation mutex, both in [`create_program`](Self::create_program) and
/// in [`load`](Self::load). The load step itself runs outside the mutex so
/// compilation of unrelated programs proceeds in parallel.
pub struct GpuProgramManager {
    config: ManagerConfig,
    render_system: ActiveRenderSystem,
    query: CapabilityQuery,
    factory: Box<dyn ProgramFactory>,
    shared: SharedParametersRegistry,
    create_lock: Mutex<()>,
    registrar: Option<Arc<dyn ResourceRegistrar>>,
}

impl GpuProgramManager {
    pub fn new(render_system: ActiveRenderSystem, factory: impl ProgramFactory + 'static) -> Self {
        Self::with_config(render_system, factory, ManagerConfig::default(), None)
    }

    /// Builds a manager and, if given a registrar, registers with it.
    pub fn with_config(
        render_system: ActiveRenderSystem,
        factory: impl ProgramFactory + 'static,
        config: ManagerConfig,
        registrar: Option<Arc<dyn ResourceRegistrar>>,
    ) -> Self {
        if let Some(registrar) = &registrar {
            registrar.register_resource_manager(&config.resource_type, config.load_order);
            log::debug!(
                "'{}' manager registered (load order {})",
                config.resource_type,
                config.load_order
            );
        }

        Self {
            query: CapabilityQuery::new(render_system.clone()),
            render_system,
            factory: Box::new(factory),
            shared: SharedParametersRegistry::new(),
            create_lock: Mutex::new(()),
            registrar,
            config,
        }
    }

    pub fn config(&self) -> &ManagerConfig {
        &self.config
    }

    pub fn render_system(&self) -> &ActiveRenderSystem {
        &self.render_system
    }

    // ── programs ──────────────────────────────────────────────────────────

    /// Creates a program and triggers its load step.
    ///
    /// A program whose compilation fails is still returned; inspect
    /// [`GpuProgram::state`]. Only failures to create the program are errors.
    pub fn load(
        &self,
        source: &str,
        ty: GpuProgramType,
        syntax_code: &str,
    ) -> Result<Arc<GpuProgram>, GpuProgramError> {
        let program = self.create_program(source, ty, syntax_code)?;
        program.load();
        Ok(program)
    }

    /// Creates and configures a program without loading it.
    pub fn create_program(
        &self,
        source: &str,
        ty: GpuProgramType,
        syntax_code: &str,
    ) -> Result<Arc<GpuProgram>, GpuProgramError> {
        let rs = self.render_system.current()?;

        let _guard = self.create_lock.lock();
        let mut program = self.factory.create(rs.as_ref(), ty, syntax_code)?;
        // The hook only picks the representation; configuration happens here.
        program.set_type(ty);
        program.set_syntax_code(syntax_code);
        program.set_source(source);

        log::debug!("created {ty} ({syntax_code}) on '{}'", rs.name());
        Ok(Arc::new(program))
    }

    /// Returns a fresh, empty per-program parameter set.
    pub fn create_parameters(&self) -> GpuProgramParameters {
        GpuProgramParameters::new()
    }

    // ── capability queries ────────────────────────────────────────────────

    pub fn supported_syntax(&self) -> Result<BTreeSet<String>, GpuProgramError> {
        self.query.supported_syntax()
    }

    pub fn is_syntax_supported(&self, syntax_code: &str) -> Result<bool, GpuProgramError> {
        self.query.is_syntax_supported(syntax_code)
    }

    pub fn gpu_prog_profile_to_rs_specific_profile(
        &self,
        profile: GpuProgramProfile,
    ) -> Result<String, GpuProgramError> {
        self.query.gpu_prog_profile_to_rs_specific_profile(profile)
    }

    // ── shared parameters ─────────────────────────────────────────────────

    pub fn create_shared_parameters(&self, name: &str) -> Result<Arc<GpuSharedParameters>, GpuProgramError> {
        self.shared.create(name)
    }

    pub fn shared_parameters(&self, name: &str) -> Result<Arc<GpuSharedParameters>, GpuProgramError> {
        self.shared.get(name)
    }

    pub fn available_shared_parameters(&self) -> SharedParametersMap {
        self.shared.available()
    }
}

impl Drop for GpuProgramManager {
    fn drop(&mut self) {
        if let Some(registrar) = &self.registrar {
            registrar.unregister_resource_manager(&self.config.resource_type);
        }
    }
}
