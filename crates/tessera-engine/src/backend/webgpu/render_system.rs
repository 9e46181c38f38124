use anyhow::{Context, Result};

use super::WgpuInit;
use super::program::WgslProgramFactory;
use crate::gpu_program::GpuProgramProfile;
use crate::render_system::{RenderSystem, RenderSystemCapabilities};

/// Syntax code of WGSL programs.
pub const WGSL: &str = "wgsl";

/// Builds the capability set wgpu exposes.
///
/// wgpu has no geometry or tessellation stages, so those profiles stay
/// unmapped. Compute is only reported when the adapter supports it.
pub fn wgpu_capabilities(compute_shaders: bool) -> RenderSystemCapabilities {
    use GpuProgramProfile::*;

    let mut caps = RenderSystemCapabilities::new();
    caps.add_shader_profile(WGSL);

    for profile in [Vs2_0, Vs3_0, Vs4_0, Vs5_0, Fs2_0, Fs3_0, Fs4_0, Fs5_0] {
        caps.add_profile_mapping(profile, WGSL);
    }
    if compute_shaders {
        caps.add_profile_mapping(Cs5_0, WGSL);
    }
    caps
}

/// Headless wgpu render system.
///
/// Owns the Adapter/Device/Queue. No surface is created; programs only need
/// a device to be compiled.
pub struct WgpuRenderSystem {
    /// Display name, including the adapter.
    name: String,

    adapter_info: wgpu::AdapterInfo,

    /// Logical device.
    device: wgpu::Device,

    /// Command queue.
    queue: wgpu::Queue,

    caps: RenderSystemCapabilities,
}

impl WgpuRenderSystem {
    /// Acquires an adapter and device.
    ///
    /// Adapter/device acquisition is asynchronous under wgpu.
    pub async fn new(init: WgpuInit) -> Result<Self> {
        let WgpuInit {
            backends,
            power_preference,
            force_fallback_adapter,
            required_features,
            required_limits,
            label,
        } = init;

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends,
            ..Default::default()
        });

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference,
                compatible_surface: None,
                force_fallback_adapter,
            })
            .await
            .context("failed to find a suitable GPU adapter")?;

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some(label.as_str()),
                required_features,
                required_limits,
                experimental_features: wgpu::ExperimentalFeatures::disabled(),
                memory_hints: wgpu::MemoryHints::Performance,
                trace: wgpu::Trace::Off,
            })
            .await
            .context("failed to create wgpu device/queue")?;

        let adapter_info = adapter.get_info();
        let compute = adapter
            .get_downlevel_capabilities()
            .flags
            .contains(wgpu::DownlevelFlags::COMPUTE_SHADERS);

        let name = format!("wgpu {:?} ({})", adapter_info.backend, adapter_info.name);
        let caps = wgpu_capabilities(compute);
        caps.log_summary(&name);

        Ok(Self {
            name,
            adapter_info,
            device,
            queue,
            caps,
        })
    }

    /// Blocking form of [`new`](Self::new).
    pub fn new_blocking(init: WgpuInit) -> Result<Self> {
        pollster::block_on(Self::new(init))
    }

    pub fn adapter_info(&self) -> &wgpu::AdapterInfo {
        &self.adapter_info
    }

    /// Returns a reference to the logical device.
    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    /// Returns a reference to the command queue.
    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    /// Program factory that compiles on this render system's device.
    pub fn program_factory(&self) -> WgslProgramFactory {
        WgslProgramFactory::new(self.device.clone())
    }
}

impl RenderSystem for WgpuRenderSystem {
    fn name(&self) -> &str {
        &self.name
    }

    fn capabilities(&self) -> &RenderSystemCapabilities {
        &self.caps
    }
}
