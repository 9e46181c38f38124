//! Mock backend pieces shared by the unit tests.

use std::any::Any;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

use crate::gpu_program::{GpuProgram, GpuProgramError, GpuProgramImpl, GpuProgramType, ProgramFactory};
use crate::render_system::{RenderSystem, RenderSystemCapabilities};
use crate::resource::ResourceRegistrar;

pub struct MockRenderSystem {
    name: String,
    caps: RenderSystemCapabilities,
}

impl MockRenderSystem {
    pub fn new(name: &str, syntaxes: &[&str]) -> Self {
        let mut caps = RenderSystemCapabilities::new();
        for syntax in syntaxes {
            caps.add_shader_profile(*syntax);
        }
        Self { name: name.to_owned(), caps }
    }

    pub fn shared(name: &str, syntaxes: &[&str]) -> Arc<dyn RenderSystem> {
        Arc::new(Self::new(name, syntaxes))
    }

    pub fn capabilities_mut(&mut self) -> &mut RenderSystemCapabilities {
        &mut self.caps
    }
}

impl RenderSystem for MockRenderSystem {
    fn name(&self) -> &str {
        &self.name
    }

    fn capabilities(&self) -> &RenderSystemCapabilities {
        &self.caps
    }
}

/// Counts overlapping load steps across programs.
///
/// Each load waits, up to a deadline, until `target` loads have been inside
/// at once, so overlapping loads finish promptly and serialized ones time out.
pub struct LoadOverlap {
    target: usize,
    in_load: AtomicUsize,
    pub max_in_load: AtomicUsize,
}

impl LoadOverlap {
    pub fn new(target: usize) -> Arc<Self> {
        Arc::new(Self {
            target,
            in_load: AtomicUsize::new(0),
            max_in_load: AtomicUsize::new(0),
        })
    }

    fn enter_and_wait(&self) {
        let now = self.in_load.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_load.fetch_max(now, Ordering::SeqCst);

        let deadline = Instant::now() + Duration::from_secs(2);
        while self.max_in_load.load(Ordering::SeqCst) < self.target && Instant::now() < deadline {
            std::thread::sleep(Duration::from_millis(1));
        }
        self.in_load.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Program backend that fails on empty source.
#[derive(Default)]
pub struct MockProgram {
    pub loads: Arc<AtomicUsize>,
    overlap: Option<Arc<LoadOverlap>>,
}

impl GpuProgramImpl for MockProgram {
    fn load(&self, program: &GpuProgram) -> anyhow::Result<()> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        if let Some(overlap) = &self.overlap {
            overlap.enter_and_wait();
        }
        anyhow::ensure!(!program.source().is_empty(), "empty source");
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Factory that accepts any syntax the render system lists and tracks how
/// many `create` calls overlap.
#[derive(Clone, Default)]
pub struct MockFactory {
    pub created: Arc<AtomicUsize>,
    pub max_concurrent_creates: Arc<AtomicUsize>,
    in_create: Arc<AtomicUsize>,
    load_overlap: Arc<Mutex<Option<Arc<LoadOverlap>>>>,
}

impl MockFactory {
    pub fn set_load_overlap(&self, overlap: Arc<LoadOverlap>) {
        *self.load_overlap.lock() = Some(overlap);
    }
}

impl ProgramFactory for MockFactory {
    fn create(
        &self,
        render_system: &dyn RenderSystem,
        ty: GpuProgramType,
        syntax_code: &str,
    ) -> Result<GpuProgram, GpuProgramError> {
        if !render_system.capabilities().is_shader_profile_supported(syntax_code) {
            return Err(GpuProgramError::creation(ty, syntax_code, "unsupported syntax"));
        }

        let now = self.in_create.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_concurrent_creates.fetch_max(now, Ordering::SeqCst);
        std::thread::sleep(Duration::from_millis(1));
        self.in_create.fetch_sub(1, Ordering::SeqCst);

        self.created.fetch_add(1, Ordering::SeqCst);
        Ok(GpuProgram::new(MockProgram {
            loads: Arc::default(),
            overlap: self.load_overlap.lock().clone(),
        }))
    }
}

#[derive(Default)]
pub struct MockRegistrar {
    pub events: Mutex<Vec<String>>,
}

impl ResourceRegistrar for MockRegistrar {
    fn register_resource_manager(&self, resource_type: &str, load_order: f32) {
        self.events.lock().push(format!("register {resource_type} {load_order}"));
    }

    fn unregister_resource_manager(&self, resource_type: &str) {
        self.events.lock().push(format!("unregister {resource_type}"));
    }
}
