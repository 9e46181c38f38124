use std::any::Any;

use parking_lot::{Mutex, RwLock};

use super::types::GpuProgramType;

/// Load lifecycle of a program.
#[derive(Debug, Clone, Eq, PartialEq, Default)]
pub enum LoadState {
    #[default]
    Unloaded,
    Loading,
    Loaded,
    /// Compilation or upload failed; carries the backend's message.
    Failed(String),
}

/// Backend-specific representation of a program.
///
/// Implementations keep whatever compiled artifacts they produce behind their
/// own interior mutability; [`GpuProgram`] serialises calls per program.
pub trait GpuProgramImpl: Send + Sync {
    /// Compiles and uploads `program`'s source.
    fn load(&self, program: &GpuProgram) -> anyhow::Result<()>;

    /// Releases compiled artifacts.
    fn unload(&self) {}

    fn as_any(&self) -> &dyn Any;
}

/// One compiled (or compilable) shader unit.
///
/// Created by a [`ProgramFactory`](super::ProgramFactory), configured by the
/// manager while still exclusively owned, then shared behind `Arc`. The load
/// state belongs to the program, not to the manager that built it.
pub struct GpuProgram {
    ty: GpuProgramType,
    syntax_code: String,
    source: String,

    backend: Box<dyn GpuProgramImpl>,

    /// Held for the duration of a load/unload.
    load_lock: Mutex<()>,
    state: RwLock<LoadState>,
}

impl GpuProgram {
    /// Wraps a backend representation. Type, syntax code and source are left
    /// at their defaults.
    pub fn new(backend: impl GpuProgramImpl + 'static) -> Self {
        Self::from_boxed(Box::new(backend))
    }

    pub fn from_boxed(backend: Box<dyn GpuProgramImpl>) -> Self {
        Self {
            ty: GpuProgramType::default(),
            syntax_code: String::new(),
            source: String::new(),
            backend,
            load_lock: Mutex::new(()),
            state: RwLock::new(LoadState::Unloaded),
        }
    }

    pub fn set_type(&mut self, ty: GpuProgramType) {
        self.ty = ty;
    }

    pub fn set_syntax_code(&mut self, syntax_code: impl Into<String>) {
        self.syntax_code = syntax_code.into();
    }

    pub fn set_source(&mut self, source: impl Into<String>) {
        self.source = source.into();
    }

    pub fn ty(&self) -> GpuProgramType {
        self.ty
    }

    pub fn syntax_code(&self) -> &str {
        &self.syntax_code
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Backend representation, if it is a `T`.
    pub fn backend_as<T: GpuProgramImpl + 'static>(&self) -> Option<&T> {
        self.backend.as_any().downcast_ref::<T>()
    }

    pub fn state(&self) -> LoadState {
        self.state.read().clone()
    }

    pub fn is_loaded(&self) -> bool {
        *self.state.read() == LoadState::Loaded
    }

    /// Message of the last failed load, if the program is in the failed state.
    pub fn load_error(&self) -> Option<String> {
        match &*self.state.read() {
            LoadState::Failed(msg) => Some(msg.clone()),
            _ => None,
        }
    }

    /// Compiles the program through its backend.
    ///
    /// Failure is recorded in [`state`](Self::state) rather than returned.
    /// A loaded program is left as is; a failed one is retried.
    pub fn load(&self) {
        let _guard = self.load_lock.lock();
        if *self.state.read() == LoadState::Loaded {
            return;
        }

        *self.state.write() = LoadState::Loading;
        let mut pending = PendingLoad { state: &self.state, armed: true };
        let next = match self.backend.load(self) {
            Ok(()) => {
                log::debug!("loaded {} ({})", self.ty, self.syntax_code);
                LoadState::Loaded
            }
            Err(err) => {
                let msg = format!("{err:#}");
                log::warn!("failed to load {} ({}): {msg}", self.ty, self.syntax_code);
                LoadState::Failed(msg)
            }
        };
        pending.armed = false;
        *self.state.write() = next;
    }

    /// Releases compiled artifacts and returns to [`LoadState::Unloaded`].
    pub fn unload(&self) {
        let _guard = self.load_lock.lock();
        if *self.state.read() == LoadState::Loaded {
            self.backend.unload();
        }
        *self.state.write() = LoadState::Unloaded;
    }
}

/// Marks the program failed if the backend unwinds out of `load`.
struct PendingLoad<'a> {
    state: &'a RwLock<LoadState>,
    armed: bool,
}

impl Drop for PendingLoad<'_> {
    fn drop(&mut self) {
        if self.armed {
            *self.state.write() = LoadState::Failed("load panicked".to_owned());
        }
    }
}

impl std::fmt::Debug for GpuProgram {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GpuProgram")
            .field("ty", &self.ty)
            .field("syntax_code", &self.syntax_code)
            .field("source_len", &self.source.len())
            .field("state", &*self.state.read())
            .finish()
    }
}
