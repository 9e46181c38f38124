use std::fmt;

/// Pipeline stage a program runs at.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Hash)]
pub enum GpuProgramType {
    #[default]
    Vertex,
    Fragment,
    Geometry,
    Domain,
    Hull,
    Compute,
}

impl GpuProgramType {
    pub const ALL: [GpuProgramType; 6] = [
        GpuProgramType::Vertex,
        GpuProgramType::Fragment,
        GpuProgramType::Geometry,
        GpuProgramType::Domain,
        GpuProgramType::Hull,
        GpuProgramType::Compute,
    ];
}

impl fmt::Display for GpuProgramType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            GpuProgramType::Vertex => "vertex program",
            GpuProgramType::Fragment => "fragment program",
            GpuProgramType::Geometry => "geometry program",
            GpuProgramType::Domain => "domain program",
            GpuProgramType::Hull => "hull program",
            GpuProgramType::Compute => "compute program",
        })
    }
}

/// Backend-independent capability tier.
///
/// Each render system translates these into its own profile string through
/// [`RenderSystemCapabilities`](crate::render_system::RenderSystemCapabilities).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum GpuProgramProfile {
    None,
    Fs2_0,
    Fs3_0,
    Fs4_0,
    Fs5_0,
    Vs2_0,
    Vs3_0,
    Vs4_0,
    Vs5_0,
    Gs4_0,
    Gs5_0,
    Hs5_0,
    Ds5_0,
    Cs5_0,
}

impl GpuProgramProfile {
    pub fn as_str(self) -> &'static str {
        match self {
            GpuProgramProfile::None => "none",
            GpuProgramProfile::Fs2_0 => "fs_2_0",
            GpuProgramProfile::Fs3_0 => "fs_3_0",
            GpuProgramProfile::Fs4_0 => "fs_4_0",
            GpuProgramProfile::Fs5_0 => "fs_5_0",
            GpuProgramProfile::Vs2_0 => "vs_2_0",
            GpuProgramProfile::Vs3_0 => "vs_3_0",
            GpuProgramProfile::Vs4_0 => "vs_4_0",
            GpuProgramProfile::Vs5_0 => "vs_5_0",
            GpuProgramProfile::Gs4_0 => "gs_4_0",
            GpuProgramProfile::Gs5_0 => "gs_5_0",
            GpuProgramProfile::Hs5_0 => "hs_5_0",
            GpuProgramProfile::Ds5_0 => "ds_5_0",
            GpuProgramProfile::Cs5_0 => "cs_5_0",
        }
    }

    /// Stage this profile targets; `None` for [`GpuProgramProfile::None`].
    pub fn stage(self) -> Option<GpuProgramType> {
        use GpuProgramProfile::*;
        match self {
            None => Option::None,
            Fs2_0 | Fs3_0 | Fs4_0 | Fs5_0 => Some(GpuProgramType::Fragment),
            Vs2_0 | Vs3_0 | Vs4_0 | Vs5_0 => Some(GpuProgramType::Vertex),
            Gs4_0 | Gs5_0 => Some(GpuProgramType::Geometry),
            Hs5_0 => Some(GpuProgramType::Hull),
            Ds5_0 => Some(GpuProgramType::Domain),
            Cs5_0 => Some(GpuProgramType::Compute),
        }
    }
}

impl fmt::Display for GpuProgramProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}
