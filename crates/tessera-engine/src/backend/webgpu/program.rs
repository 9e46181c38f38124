use std::any::Any;
use std::borrow::Cow;

use anyhow::{anyhow, Result};
use naga::valid::{Capabilities, ValidationFlags, Validator};
use parking_lot::Mutex;

use super::render_system::WGSL;
use crate::gpu_program::{
    GpuProgram, GpuProgramError, GpuProgramImpl, GpuProgramProfile, GpuProgramType, ProgramFactory,
};
use crate::render_system::RenderSystem;

/// Parses and validates WGSL, requiring an entry point for `stage`.
///
/// Errors carry naga's annotated diagnostics.
pub fn validate_wgsl(source: &str, stage: naga::ShaderStage) -> Result<naga::Module> {
    let module = naga::front::wgsl::parse_str(source)
        .map_err(|e| anyhow!("WGSL parse failed:\n{}", e.emit_to_string(source)))?;

    // Strictest capability set; anything accepted here is accepted by wgpu.
    let mut validator = Validator::new(ValidationFlags::all(), Capabilities::empty());
    validator
        .validate(&module)
        .map_err(|e| anyhow!("WGSL validation failed:\n{}", e.emit_to_string(source)))?;

    anyhow::ensure!(
        module.entry_points.iter().any(|ep| ep.stage == stage),
        "no {stage:?} entry point"
    );
    Ok(module)
}

/// Picks the naga stage for a program type, or explains why wgpu can't
/// build it.
fn wgsl_stage(
    render_system: &dyn RenderSystem,
    ty: GpuProgramType,
    syntax_code: &str,
) -> Result<naga::ShaderStage, GpuProgramError> {
    if syntax_code != WGSL {
        return Err(GpuProgramError::creation(ty, syntax_code, "wgpu programs must be WGSL"));
    }

    let caps = render_system.capabilities();
    if !caps.is_shader_profile_supported(syntax_code) {
        return Err(GpuProgramError::creation(
            ty,
            syntax_code,
            format!("not supported by render system '{}'", render_system.name()),
        ));
    }

    match ty {
        GpuProgramType::Vertex => Ok(naga::ShaderStage::Vertex),
        GpuProgramType::Fragment => Ok(naga::ShaderStage::Fragment),
        GpuProgramType::Compute => {
            if caps.gpu_prog_profile_to_rs_specific_profile(GpuProgramProfile::Cs5_0).is_some() {
                Ok(naga::ShaderStage::Compute)
            } else {
                Err(GpuProgramError::creation(ty, syntax_code, "adapter has no compute shaders"))
            }
        }
        GpuProgramType::Geometry | GpuProgramType::Domain | GpuProgramType::Hull => {
            Err(GpuProgramError::creation(ty, syntax_code, "stage does not exist in wgpu"))
        }
    }
}

/// Creates [`WgslProgram`]s bound to one device.
#[derive(Clone)]
pub struct WgslProgramFactory {
    device: wgpu::Device,
}

impl WgslProgramFactory {
    pub fn new(device: wgpu::Device) -> Self {
        Self { device }
    }
}

impl ProgramFactory for WgslProgramFactory {
    fn create(
        &self,
        render_system: &dyn RenderSystem,
        ty: GpuProgramType,
        syntax_code: &str,
    ) -> Result<GpuProgram, GpuProgramError> {
        let stage = wgsl_stage(render_system, ty, syntax_code)?;
        Ok(GpuProgram::new(WgslProgram {
            device: self.device.clone(),
            stage,
            module: Mutex::new(None),
        }))
    }
}

/// WGSL program compiled into a `wgpu::ShaderModule`.
pub struct WgslProgram {
    device: wgpu::Device,
    stage: naga::ShaderStage,

    /// Present once loaded.
    module: Mutex<Option<wgpu::ShaderModule>>,
}

impl WgslProgram {
    pub fn stage(&self) -> naga::ShaderStage {
        self.stage
    }

    /// Compiled module, if the program is loaded.
    pub fn module(&self) -> Option<wgpu::ShaderModule> {
        self.module.lock().clone()
    }
}

impl GpuProgramImpl for WgslProgram {
    fn load(&self, program: &GpuProgram) -> Result<()> {
        validate_wgsl(program.source(), self.stage)?;

        let label = format!("{} ({})", program.ty(), program.syntax_code());
        let module = self.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(label.as_str()),
            source: wgpu::ShaderSource::Wgsl(Cow::Owned(program.source().to_owned())),
        });
        *self.module.lock() = Some(module);
        Ok(())
    }

    fn unload(&self) {
        self.module.lock().take();
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
