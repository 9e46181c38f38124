/// Adapter and device options for a headless [`WgpuRenderSystem`].
///
/// No surface is involved, so nothing here depends on a window.
///
/// [`WgpuRenderSystem`]: super::WgpuRenderSystem
#[derive(Debug, Clone)]
pub struct WgpuInit {
    /// Graphics APIs wgpu may pick from.
    pub backends: wgpu::Backends,

    /// Adapter selection preference.
    pub power_preference: wgpu::PowerPreference,

    /// Only accept a software adapter.
    ///
    /// Useful on CI machines without a GPU.
    pub force_fallback_adapter: bool,

    /// Device features shader modules may rely on. Empty by default.
    pub required_features: wgpu::Features,

    /// Device limits; the default is the downlevel tier, which still allows
    /// compute on most adapters.
    pub required_limits: wgpu::Limits,

    /// Debug label for the device.
    pub label: String,
}

impl Default for WgpuInit {
    fn default() -> Self {
        Self {
            backends: wgpu::Backends::all(),
            power_preference: wgpu::PowerPreference::HighPerformance,
            force_fallback_adapter: false,
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::downlevel_defaults(),
            label: "tessera device".to_owned(),
        }
    }
}
