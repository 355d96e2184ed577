/// GlDevice trait - every driver entry point the core calls
///
/// Implemented by backends (e.g., the glow-based GLES device) and by the
/// test-only `MockDevice`. All calls are synchronous and must be issued on
/// the thread that owns the current rendering context.

use crate::compiler::ShaderStage;
use crate::error::Result;
use crate::handle::{AttributeLocation, ProgramHandle, ShaderHandle, UniformLocation};

/// Name, type and array size of one active uniform or attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveVariable {
    /// Name as reported by the driver (arrays end in `[0]`)
    pub name: String,
    /// Raw GL type enum
    pub raw_type: u32,
    /// Array size (1 for non-arrays)
    pub size: i32,
}

/// Driver abstraction used by the compiler, linker, reflector and manager
///
/// Object-creating calls fail with `Error::ContextError` when the driver
/// hands back the null object, which is how a missing current context
/// shows up. Everything else mirrors the GL call of the same name.
pub trait GlDevice {
    // ===== SHADER OBJECTS =====

    /// glCreateShader
    fn create_shader(&mut self, stage: ShaderStage) -> Result<ShaderHandle>;

    /// glShaderSource with a single string
    fn shader_source(&mut self, shader: ShaderHandle, source: &str);

    /// glCompileShader
    fn compile_shader(&mut self, shader: ShaderHandle);

    /// glGetShaderiv(GL_COMPILE_STATUS)
    fn shader_compile_status(&self, shader: ShaderHandle) -> bool;

    /// glGetShaderInfoLog
    fn shader_info_log(&self, shader: ShaderHandle) -> String;

    /// glDeleteShader
    ///
    /// Deferred while the shader is attached to a program: the object is
    /// only flagged, and reclaimed when the last program lets go of it.
    fn delete_shader(&mut self, shader: ShaderHandle);

    // ===== PROGRAM OBJECTS =====

    /// glCreateProgram
    fn create_program(&mut self) -> Result<ProgramHandle>;

    fn attach_shader(&mut self, program: ProgramHandle, shader: ShaderHandle);

    fn detach_shader(&mut self, program: ProgramHandle, shader: ShaderHandle);

    fn link_program(&mut self, program: ProgramHandle);

    /// glGetProgramiv(GL_LINK_STATUS)
    fn program_link_status(&self, program: ProgramHandle) -> bool;

    fn program_info_log(&self, program: ProgramHandle) -> String;

    /// glGetProgramiv for any integer parameter
    fn program_parameter(&self, program: ProgramHandle, pname: u32) -> i32;

    /// glDeleteProgram (deferred while the program is current)
    fn delete_program(&mut self, program: ProgramHandle);

    /// glUseProgram; `None` unbinds
    fn use_program(&mut self, program: Option<ProgramHandle>);

    // ===== REFLECTION =====

    /// glGetActiveUniform
    fn active_uniform(&self, program: ProgramHandle, index: u32) -> Option<ActiveVariable>;

    /// glGetActiveAttrib
    fn active_attribute(&self, program: ProgramHandle, index: u32) -> Option<ActiveVariable>;

    /// glGetUniformIndices; `None` where the driver returns GL_INVALID_INDEX
    fn uniform_indices(&self, program: ProgramHandle, names: &[&str]) -> Vec<Option<u32>>;

    /// glGetActiveUniformsiv, one value per index
    fn active_uniforms_parameter(&self, program: ProgramHandle, indices: &[u32], pname: u32) -> Vec<i32>;

    /// glGetActiveUniformBlockName
    fn uniform_block_name(&self, program: ProgramHandle, block: u32) -> String;

    /// glGetActiveUniformBlockiv for a single-valued parameter
    fn uniform_block_parameter(&self, program: ProgramHandle, block: u32, pname: u32) -> i32;

    /// glGetUniformLocation
    fn uniform_location(&self, program: ProgramHandle, name: &str) -> Option<UniformLocation>;

    /// glGetAttribLocation
    fn attribute_location(&self, program: ProgramHandle, name: &str) -> Option<AttributeLocation>;

    // ===== CONTEXT QUERIES =====

    /// glGetIntegerv for a single value
    fn context_parameter(&self, pname: u32) -> i32;

    /// glGetIntegerv into a caller-sized buffer
    fn context_parameter_slice(&self, pname: u32, out: &mut [i32]);
}
