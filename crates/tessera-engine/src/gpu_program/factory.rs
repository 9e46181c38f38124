use super::error::GpuProgramError;
use super::program::GpuProgram;
use super::types::GpuProgramType;
use crate::render_system::RenderSystem;

/// Backend creation hook.
///
/// Decides, from the program type and syntax code, which concrete program
/// representation to build. Implementations must not set type, syntax code or
/// source on the returned program; the manager does that afterwards.
pub trait ProgramFactory: Send + Sync {
    fn create(
        &self,
        render_system: &dyn RenderSystem,
        ty: GpuProgramType,
        syntax_code: &str,
    ) -> Result<GpuProgram, GpuProgramError>;
}

impl<F> ProgramFactory for F
where
    F: Fn(&dyn RenderSystem, GpuProgramType, &str) -> Result<GpuProgram, GpuProgramError> + Send + Sync,
{
    fn create(
        &self,
        render_system: &dyn RenderSystem,
        ty: GpuProgramType,
        syntax_code: &str,
    ) -> Result<GpuProgram, GpuProgramError> {
        self(render_system, ty, syntax_code)
    }
}

/// Factory table keyed by syntax-code prefix.
///
/// Lets several backends' program representations coexist behind one hook:
/// `"glsl"` can route to one factory and `"hlsl"` to another. The longest
/// registered prefix matching the syntax code wins.
#[derive(Default)]
pub struct SyntaxDispatch {
    entries: Vec<(String, Box<dyn ProgramFactory>)>,
}

impl SyntaxDispatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Routes syntax codes starting with `prefix` to `factory`.
    ///
    /// Registering the same prefix again replaces the earlier factory.
    pub fn register(&mut self, prefix: impl Into<String>, factory: impl ProgramFactory + 'static) {
        let prefix = prefix.into();
        self.entries.retain(|(p, _)| *p != prefix);
        log::debug!("program factory registered for syntax prefix '{prefix}'");
        self.entries.push((prefix, Box::new(factory)));
    }

    /// Builder-style [`register`](Self::register).
    pub fn with(mut self, prefix: impl Into<String>, factory: impl ProgramFactory + 'static) -> Self {
        self.register(prefix, factory);
        self
    }

    fn route(&self, syntax_code: &str) -> Option<&dyn ProgramFactory> {
        self.entries
            .iter()
            .filter(|(prefix, _)| syntax_code.starts_with(prefix.as_str()))
            .max_by_key(|(prefix, _)| prefix.len())
            .map(|(_, factory)| factory.as_ref())
    }
}

impl ProgramFactory for SyntaxDispatch {
    fn create(
        &self,
        render_system: &dyn RenderSystem,
        ty: GpuProgramType,
        syntax_code: &str,
    ) -> Result<GpuProgram, GpuProgramError> {
        match self.route(syntax_code) {
            Some(factory) => factory.create(render_system, ty, syntax_code),
            None => Err(GpuProgramError::creation(
                ty,
                syntax_code,
                "no program factory registered for this syntax",
            )),
        }
    }
}
