/// Program lifecycle manager
///
/// Drives compile(vertex) → compile(fragment) → link → reflect → activate,
/// and tears the program down again on `shutdown`. The manager owns the
/// device and the single `LinkedProgram` for their whole lifetime. The
/// renderer only ever sees the `ProgramHandle`.

use std::fmt;

use crate::compiler::{compile, ShaderSource};
use crate::config::ProgramConfig;
use crate::device::GlDevice;
use crate::error::{Error, InitStage, Result};
use crate::gl_types::GL_CURRENT_PROGRAM;
use crate::handle::{AttributeLocation, ProgramHandle, UniformLocation};
use crate::linker::{link, LinkedProgram};
use crate::log::LogSeverity;
use crate::diagnostics::Diagnostics;
use crate::reflector::{ActiveResourceDescriptor, ProgramReport, Reflector, UniformBlockDescriptor};
use crate::status::ProgramStatus;
use crate::{tri_debug, tri_info, tri_trace, tri_warn};

/// Where a program is in its lifecycle
///
/// States only move forward. `Active → Released` (shutdown) is the one
/// transition the caller triggers directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProgramState {
    Uninitialized,
    StagesCompiled,
    Linked,
    LinkFailed,
    Active,
    Released,
}

impl ProgramState {
    /// Whether `self → next` is a legal transition
    pub fn can_transition_to(self, next: ProgramState) -> bool {
        use ProgramState::*;
        matches!(
            (self, next),
            (Uninitialized, StagesCompiled)
                | (StagesCompiled, Linked)
                | (StagesCompiled, LinkFailed)
                | (Linked, Active)
                | (Active, Released)
        )
    }

    /// Terminal states accept no further transitions
    pub fn is_terminal(self) -> bool {
        matches!(self, ProgramState::LinkFailed | ProgramState::Released)
    }
}

impl fmt::Display for ProgramState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Owns one shader program from source text to teardown
pub struct ProgramManager<D: GlDevice> {
    device: D,
    config: ProgramConfig,
    state: ProgramState,
    program: Option<LinkedProgram>,
    bound: bool,
    last_report: Option<ProgramReport>,
}

impl<D: GlDevice> ProgramManager<D> {
    /// Wrap a device whose context is already current
    pub fn new(device: D, config: ProgramConfig) -> Self {
        Self {
            device,
            config,
            state: ProgramState::Uninitialized,
            program: None,
            bound: false,
            last_report: None,
        }
    }

    fn transition(&mut self, next: ProgramState) {
        debug_assert!(
            self.state.can_transition_to(next),
            "illegal program state transition {} -> {}",
            self.state,
            next
        );
        tri_trace!("triangle::program", "[{}] {} -> {}", self.config.label, self.state, next);
        self.state = next;
    }

    /// Fold a compile/link error into `InitFailed` for the step that raised it
    ///
    /// Context errors are fatal and pass through untouched.
    fn init_error(stage: InitStage, error: Error) -> Error {
        match error {
            Error::CompileFailed { stage, log } => Error::InitFailed { stage: stage.into(), log },
            Error::LinkFailed { log } => Error::InitFailed { stage, log },
            Error::InvalidSource(msg) => Error::InitFailed { stage, log: msg },
            other => other,
        }
    }

    /// Build, link and activate the program
    ///
    /// Stops at the first failure. A failed attempt never leaves a program
    /// object behind and never exposes a handle. Nothing is retried and no
    /// fallback shader is substituted.
    ///
    /// # Errors
    ///
    /// - `InitFailed { stage, log }` for compile/link failures, log verbatim
    /// - `ContextError` when no rendering context is current (fatal)
    /// - `InvalidState` when called on a manager that already ran
    pub fn initialize(&mut self, vertex_source: &str, fragment_source: &str) -> Result<ProgramHandle> {
        if self.state != ProgramState::Uninitialized {
            let reason = match self.state.is_terminal() {
                true => "its lifecycle has ended",
                false => "it is already initialized",
            };
            return Err(Error::InvalidState(format!(
                "initialize called on program '{}' in state {}: {}",
                self.config.label, self.state, reason
            )));
        }

        let vertex = compile(&mut self.device, &ShaderSource::vertex(vertex_source))
            .map_err(|e| Self::init_error(InitStage::Vertex, e))?;

        let fragment = match compile(&mut self.device, &ShaderSource::fragment(fragment_source)) {
            Ok(fragment) => fragment,
            Err(e) => {
                vertex.release(&mut self.device);
                return Err(Self::init_error(InitStage::Fragment, e));
            }
        };
        self.transition(ProgramState::StagesCompiled);

        let program = match link(&mut self.device, vertex, fragment) {
            Ok(program) => program,
            Err(failure) => {
                let error = failure.release(&mut self.device);
                self.transition(ProgramState::LinkFailed);
                return Err(Self::init_error(InitStage::Link, error));
            }
        };
        self.transition(ProgramState::Linked);

        if self.config.reflect_on_init {
            let report = Reflector::new(&self.device, &program).report();
            if self.config.dump_report_on_init {
                Diagnostics::log_lines(LogSeverity::Debug, "triangle::reflect", &report.to_string());
            }
            self.last_report = Some(report);
        }

        let handle = program.handle();
        if self.config.bind_on_activate {
            self.device.use_program(Some(handle));
            self.bound = true;
        }
        self.program = Some(program);
        self.transition(ProgramState::Active);

        tri_info!("triangle::program", "[{}] Program {} active", self.config.label, handle);
        Ok(handle)
    }

    pub fn state(&self) -> ProgramState {
        self.state
    }

    pub fn config(&self) -> &ProgramConfig {
        &self.config
    }

    /// Handle for the renderer; only available while `Active`
    pub fn handle(&self) -> Option<ProgramHandle> {
        match self.state {
            ProgramState::Active => self.program.as_ref().map(|program| program.handle()),
            _ => None,
        }
    }

    pub fn program(&self) -> Option<&LinkedProgram> {
        self.program.as_ref()
    }

    /// Report captured during `initialize` (if reflection was enabled)
    pub fn last_report(&self) -> Option<&ProgramReport> {
        self.last_report.as_ref()
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    pub fn device_mut(&mut self) -> &mut D {
        &mut self.device
    }

    fn active_program(&self) -> Result<&LinkedProgram> {
        match (&self.program, self.state) {
            (Some(program), ProgramState::Linked | ProgramState::Active) => Ok(program),
            _ => Err(Error::InvalidState(format!(
                "program '{}' is not linked (state {})",
                self.config.label, self.state
            ))),
        }
    }

    /// Make the program current (renderer calls this before drawing)
    pub fn bind(&mut self) -> Result<ProgramHandle> {
        let handle = self.active_program()?.handle();
        self.device.use_program(Some(handle));
        self.bound = true;
        Ok(handle)
    }

    /// Uniform location by name; `None` for unknown names or a stale handle
    pub fn uniform_location(&mut self, handle: ProgramHandle, name: &str) -> Option<UniformLocation> {
        let program = self.program.as_mut().filter(|program| program.handle() == handle);
        match program {
            Some(program) => program.uniform_location(&self.device, name),
            None => {
                tri_warn!("triangle::program", "Uniform lookup '{}' on unknown program {}", name, handle);
                None
            }
        }
    }

    /// Attribute location by name; `None` for unknown names or a stale handle
    pub fn attribute_location(&mut self, handle: ProgramHandle, name: &str) -> Option<AttributeLocation> {
        let program = self.program.as_mut().filter(|program| program.handle() == handle);
        match program {
            Some(program) => program.attribute_location(&self.device, name),
            None => {
                tri_warn!("triangle::program", "Attribute lookup '{}' on unknown program {}", name, handle);
                None
            }
        }
    }

    /// Fresh read of the active uniforms
    pub fn list_active_uniforms(&self) -> Result<Vec<ActiveResourceDescriptor>> {
        Ok(Reflector::new(&self.device, self.active_program()?).active_uniforms())
    }

    /// Fresh read of the active attributes
    pub fn list_active_attributes(&self) -> Result<Vec<ActiveResourceDescriptor>> {
        Ok(Reflector::new(&self.device, self.active_program()?).active_attributes())
    }

    /// Fresh read of the active uniform blocks
    pub fn list_uniform_blocks(&self) -> Result<Vec<UniformBlockDescriptor>> {
        Ok(Reflector::new(&self.device, self.active_program()?).uniform_blocks())
    }

    /// Fresh read of the status flags
    pub fn program_status(&self) -> Result<ProgramStatus> {
        Ok(Reflector::new(&self.device, self.active_program()?).program_status())
    }

    /// Fresh full report
    pub fn report(&self) -> Result<ProgramReport> {
        Ok(Reflector::new(&self.device, self.active_program()?).report())
    }

    /// Whether the program is the one installed in the context
    ///
    /// Also asks the driver, since a renderer may have made the program
    /// current without going through `bind`.
    fn is_current(&self, handle: ProgramHandle) -> bool {
        self.bound || self.device.context_parameter(GL_CURRENT_PROGRAM) == handle.raw() as i32
    }

    /// Release the program object
    ///
    /// Unbinds it first so the driver frees it immediately (together with
    /// the two shader objects flagged at link time). Safe to call in any
    /// state; every call after the first is a no-op.
    pub fn shutdown(&mut self) {
        let Some(program) = self.program.take() else {
            tri_debug!("triangle::program", "[{}] shutdown: nothing to release ({})", self.config.label, self.state);
            return;
        };

        let handle = program.handle();
        if self.is_current(handle) {
            self.device.use_program(None);
        }
        self.bound = false;
        program.destroy(&mut self.device);
        self.last_report = None;
        self.transition(ProgramState::Released);

        tri_info!("triangle::program", "[{}] Program {} released", self.config.label, handle);
    }
}

impl<D: GlDevice> Drop for ProgramManager<D> {
    fn drop(&mut self) {
        if let Some(program) = &self.program {
            tri_warn!(
                "triangle::program",
                "[{}] dropped without shutdown; program {} is still allocated",
                self.config.label,
                program.handle()
            );
        }
    }
}

impl<D: GlDevice> fmt::Debug for ProgramManager<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProgramManager")
            .field("label", &self.config.label)
            .field("state", &self.state)
            .field("program", &self.program.as_ref().map(|program| program.handle()))
            .finish()
    }
}

#[cfg(test)]
#[path = "program_tests.rs"]
mod tests;
