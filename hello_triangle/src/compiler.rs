/// Shader unit compiler - one source string in, one compiled stage out

use std::fmt;

use crate::device::GlDevice;
use crate::error::{Error, Result};
use crate::handle::ShaderHandle;
use crate::gl_types::{GL_FRAGMENT_SHADER, GL_VERTEX_SHADER};
use crate::{tri_debug, tri_error, tri_warn};

/// Log text used when the driver fails a compile without saying why
pub const EMPTY_DRIVER_LOG: &str = "<driver returned no diagnostic>";

/// Programmable pipeline stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    /// Vertex shader
    Vertex,
    /// Fragment shader
    Fragment,
}

impl ShaderStage {
    /// GL shader type enum
    pub fn gl_enum(&self) -> u32 {
        match self {
            ShaderStage::Vertex => GL_VERTEX_SHADER,
            ShaderStage::Fragment => GL_FRAGMENT_SHADER,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => write!(f, "vertex"),
            ShaderStage::Fragment => write!(f, "fragment"),
        }
    }
}

/// Shader text tagged with its stage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderSource<'a> {
    pub stage: ShaderStage,
    pub text: &'a str,
}

impl<'a> ShaderSource<'a> {
    pub fn new(stage: ShaderStage, text: &'a str) -> Self {
        Self { stage, text }
    }

    pub fn vertex(text: &'a str) -> Self {
        Self::new(ShaderStage::Vertex, text)
    }

    pub fn fragment(text: &'a str) -> Self {
        Self::new(ShaderStage::Fragment, text)
    }
}

/// A successfully compiled shader object
///
/// Good for exactly one link attempt: `link` consumes it. If it is never
/// linked, hand it back with `release`. Not `Clone`, so a stage can't be
/// linked twice.
#[derive(Debug)]
#[must_use = "a compiled stage holds a GPU shader object; link it or release it"]
pub struct CompiledStage {
    handle: ShaderHandle,
    stage: ShaderStage,
    info_log: Option<String>,
}

impl CompiledStage {
    pub fn handle(&self) -> ShaderHandle {
        self.handle
    }

    pub fn stage(&self) -> ShaderStage {
        self.stage
    }

    /// Non-empty driver log from a successful compile (warnings)
    pub fn info_log(&self) -> Option<&str> {
        self.info_log.as_deref()
    }

    /// Delete the shader object of a stage that will not be linked
    pub fn release<D: GlDevice + ?Sized>(self, device: &mut D) {
        tri_debug!("triangle::compiler", "Releasing unlinked {} shader {}", self.stage, self.handle);
        device.delete_shader(self.handle);
    }
}

/// Compile one shader stage
///
/// Allocates exactly one shader object. On failure that object is deleted
/// before returning, and the error carries the driver's log verbatim.
///
/// # Errors
///
/// - `InvalidSource` for empty text (the device is never called)
/// - `ContextError` if the driver cannot create a shader object
/// - `CompileFailed { stage, log }` if the driver rejects the source
pub fn compile<D: GlDevice + ?Sized>(device: &mut D, source: &ShaderSource<'_>) -> Result<CompiledStage> {
    if source.text.trim().is_empty() {
        return Err(Error::InvalidSource(format!("{} shader source is empty", source.stage)));
    }

    let handle = device.create_shader(source.stage)?;
    device.shader_source(handle, source.text);
    device.compile_shader(handle);

    let info_log = device.shader_info_log(handle);

    if !device.shader_compile_status(handle) {
        device.delete_shader(handle);
        let log = if info_log.trim().is_empty() {
            EMPTY_DRIVER_LOG.to_string()
        } else {
            info_log
        };
        tri_error!("triangle::compiler", "Error compiling {} shader:\n{}", source.stage, log);
        return Err(Error::CompileFailed { stage: source.stage, log });
    }

    let info_log = if info_log.trim().is_empty() {
        None
    } else {
        tri_warn!("triangle::compiler", "{} shader compiled with warnings:\n{}", source.stage, info_log);
        Some(info_log)
    };

    tri_debug!("triangle::compiler", "Compiled {} shader {}", source.stage, handle);

    Ok(CompiledStage { handle, stage: source.stage, info_log })
}

#[cfg(test)]
#[path = "compiler_tests.rs"]
mod tests;
