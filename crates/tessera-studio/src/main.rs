use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use tessera_engine::backend::webgpu::{WGSL, WgpuInit, WgpuRenderSystem};
use tessera_engine::gpu_program::{GpuProgramManager, GpuProgramProfile, GpuProgramType, LoadState};
use tessera_engine::logging::{init_logging, LoggingConfig};
use tessera_engine::render_system::{ActiveRenderSystem, RenderSystem};

const PROGRAMS: &[(&str, GpuProgramType, &str)] = &[
    ("fullscreen.vs", GpuProgramType::Vertex, include_str!("../shaders/fullscreen.wgsl")),
    ("gradient.fs", GpuProgramType::Fragment, include_str!("../shaders/gradient.wgsl")),
    ("histogram.cs", GpuProgramType::Compute, include_str!("../shaders/histogram.wgsl")),
    ("broken.fs", GpuProgramType::Fragment, include_str!("../shaders/broken.wgsl")),
    ("outline.gs", GpuProgramType::Geometry, ""),
];

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    println!();
    println!("  ╔════════════════════════════════════════╗");
    println!("  ║        TESSERA PROGRAM CHECK v0.1      ║");
    println!("  ║   wgpu backend  ·  naga validation     ║");
    println!("  ╚════════════════════════════════════════╝");
    println!();

    let rs = Arc::new(
        WgpuRenderSystem::new_blocking(WgpuInit::default()).context("render system startup failed")?,
    );
    let active = ActiveRenderSystem::new();
    active.activate(rs.clone());
    log::info!("render system '{}' active", rs.name());

    let manager = GpuProgramManager::new(active.clone(), rs.program_factory());
    report_capabilities(&manager)?;

    let frame = manager.create_shared_parameters("frame")?;
    frame.set_named_constant("time", 0.0f32);
    frame.set_named_constant("resolution", [1280.0f32, 720.0]);

    // Every program is requested from its own worker; loads compile in parallel.
    let results = std::thread::scope(|s| -> Result<Vec<_>> {
        let handles: Vec<_> = PROGRAMS
            .iter()
            .map(|&(name, ty, source)| {
                let manager = &manager;
                s.spawn(move || (name, manager.load(source, ty, WGSL)))
            })
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().map_err(|_| anyhow!("loader thread panicked")))
            .collect()
    })?;

    println!("  [PROGRAMS]");
    for (name, result) in &results {
        match result {
            Ok(program) => match program.state() {
                LoadState::Loaded => println!("    {name:<14} loaded"),
                LoadState::Failed(msg) => {
                    let first = msg.lines().next().unwrap_or_default();
                    println!("    {name:<14} FAILED  {first}");
                }
                other => println!("    {name:<14} {other:?}"),
            },
            Err(err) => println!("    {name:<14} REJECTED  {err}"),
        }
    }
    println!();

    println!("  [SHARED PARAMETERS]");
    for (name, set) in manager.available_shared_parameters() {
        println!("    {name:<14} {} constants, version {}", set.len(), set.version());
    }
    println!();

    drop(manager);
    active.deactivate();
    log::info!("render system '{}' deactivated", rs.name());
    Ok(())
}

fn report_capabilities(manager: &GpuProgramManager) -> Result<()> {
    let syntax: Vec<String> = manager.supported_syntax()?.into_iter().collect();
    println!("  [CAPABILITIES]");
    println!("    syntax         {}", syntax.join(", "));

    let profiles = [
        GpuProgramProfile::Vs5_0,
        GpuProgramProfile::Fs5_0,
        GpuProgramProfile::Cs5_0,
        GpuProgramProfile::Gs5_0,
    ];
    for profile in profiles {
        match manager.gpu_prog_profile_to_rs_specific_profile(profile) {
            Ok(rs_profile) => println!("    {profile:<14} -> {rs_profile}"),
            Err(_) => println!("    {profile:<14} -> (unavailable)"),
        }
    }
    println!();
    Ok(())
}
