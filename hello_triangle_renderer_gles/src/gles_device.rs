/// GlesDevice - glow implementation of the GlDevice trait
///
/// Every trait method is a thin wrapper over one (or a few) GL calls. GL
/// object names are converted to the core's typed handles at this boundary
/// and nowhere else. Program queries glow does not wrap go through
/// `ProgramQueries`.

use std::ffi::{c_void, CStr};

use glow::HasContext;
use hello_triangle::triangle::{
    ActiveVariable, AttributeLocation, Error, GlDevice, ProgramHandle, Result, ShaderHandle,
    ShaderStage, UniformLocation,
};
use hello_triangle::{tri_error, tri_info};

use crate::program_queries::ProgramQueries;

/// GL device backed by a glow context
///
/// The context must stay current on the thread that uses the device. The
/// device never makes a context current itself.
pub struct GlesDevice {
    gl: glow::Context,
    queries: ProgramQueries,
}

impl GlesDevice {
    /// Load a glow context and the extra program queries from one loader
    ///
    /// # Safety
    ///
    /// The context `loader` resolves against must be current on the calling
    /// thread, and must stay current for every later call made through this
    /// device.
    pub unsafe fn from_loader_function_cstr<F>(mut loader: F) -> Result<Self>
    where
        F: FnMut(&CStr) -> *const c_void,
    {
        let queries = ProgramQueries::load(&mut loader)?;
        let gl = glow::Context::from_loader_function_cstr(&mut loader);
        Ok(Self::from_parts(gl, queries))
    }

    /// Wrap an already loaded context
    ///
    /// `loader` must be the loader `gl` was built from; it is only used to
    /// resolve the program queries glow does not wrap.
    ///
    /// # Safety
    ///
    /// Same contract as `from_loader_function_cstr`.
    pub unsafe fn new<F>(gl: glow::Context, mut loader: F) -> Result<Self>
    where
        F: FnMut(&CStr) -> *const c_void,
    {
        let queries = ProgramQueries::load(&mut loader)?;
        Ok(Self::from_parts(gl, queries))
    }

    fn from_parts(gl: glow::Context, queries: ProgramQueries) -> Self {
        let version = gl.version();
        tri_info!(
            "triangle::gles",
            "GL context {}.{} ({}), embedded: {}",
            version.major,
            version.minor,
            version.vendor_info,
            version.is_embedded
        );
        Self { gl, queries }
    }

    /// Underlying glow context, for draw calls outside the program lifecycle
    pub fn gl(&self) -> &glow::Context {
        &self.gl
    }

    pub fn into_inner(self) -> glow::Context {
        self.gl
    }
}

// ===== HANDLE CONVERSIONS =====

pub(crate) fn native_shader(shader: ShaderHandle) -> glow::NativeShader {
    glow::NativeShader(shader.raw_non_zero())
}

pub(crate) fn shader_handle(native: glow::NativeShader) -> ShaderHandle {
    ShaderHandle::new(native.0)
}

pub(crate) fn native_program(program: ProgramHandle) -> glow::NativeProgram {
    glow::NativeProgram(program.raw_non_zero())
}

pub(crate) fn program_handle(native: glow::NativeProgram) -> ProgramHandle {
    ProgramHandle::new(native.0)
}

pub(crate) fn native_uniform_location(location: UniformLocation) -> glow::NativeUniformLocation {
    glow::NativeUniformLocation(location.raw() as u32)
}

pub(crate) fn uniform_location_from_native(native: glow::NativeUniformLocation) -> Option<UniformLocation> {
    i32::try_from(native.0).ok().and_then(UniformLocation::from_raw)
}

/// glCreate* only fails without a current context
fn context_error(call: &str, message: String) -> Error {
    tri_error!("triangle::gles", "{} failed: {}", call, message);
    Error::ContextError(format!("{} failed: {}", call, message))
}

impl GlDevice for GlesDevice {
    fn create_shader(&mut self, stage: ShaderStage) -> Result<ShaderHandle> {
        unsafe { self.gl.create_shader(stage.gl_enum()) }
            .map(shader_handle)
            .map_err(|e| context_error("glCreateShader", e))
    }

    fn shader_source(&mut self, shader: ShaderHandle, source: &str) {
        unsafe { self.gl.shader_source(native_shader(shader), source) }
    }

    fn compile_shader(&mut self, shader: ShaderHandle) {
        unsafe { self.gl.compile_shader(native_shader(shader)) }
    }

    fn shader_compile_status(&self, shader: ShaderHandle) -> bool {
        unsafe { self.gl.get_shader_compile_status(native_shader(shader)) }
    }

    fn shader_info_log(&self, shader: ShaderHandle) -> String {
        unsafe { self.gl.get_shader_info_log(native_shader(shader)) }
    }

    fn delete_shader(&mut self, shader: ShaderHandle) {
        unsafe { self.gl.delete_shader(native_shader(shader)) }
    }

    fn create_program(&mut self) -> Result<ProgramHandle> {
        unsafe { self.gl.create_program() }
            .map(program_handle)
            .map_err(|e| context_error("glCreateProgram", e))
    }

    fn attach_shader(&mut self, program: ProgramHandle, shader: ShaderHandle) {
        unsafe { self.gl.attach_shader(native_program(program), native_shader(shader)) }
    }

    fn detach_shader(&mut self, program: ProgramHandle, shader: ShaderHandle) {
        unsafe { self.gl.detach_shader(native_program(program), native_shader(shader)) }
    }

    fn link_program(&mut self, program: ProgramHandle) {
        unsafe { self.gl.link_program(native_program(program)) }
    }

    fn program_link_status(&self, program: ProgramHandle) -> bool {
        unsafe { self.gl.get_program_link_status(native_program(program)) }
    }

    fn program_info_log(&self, program: ProgramHandle) -> String {
        unsafe { self.gl.get_program_info_log(native_program(program)) }
    }

    fn program_parameter(&self, program: ProgramHandle, pname: u32) -> i32 {
        unsafe { self.queries.program_parameter(program.raw(), pname) }
    }

    fn delete_program(&mut self, program: ProgramHandle) {
        unsafe { self.gl.delete_program(native_program(program)) }
    }

    fn use_program(&mut self, program: Option<ProgramHandle>) {
        unsafe { self.gl.use_program(program.map(native_program)) }
    }

    fn active_uniform(&self, program: ProgramHandle, index: u32) -> Option<ActiveVariable> {
        unsafe { self.gl.get_active_uniform(native_program(program), index) }.map(|uniform| ActiveVariable {
            name: uniform.name,
            raw_type: uniform.utype,
            size: uniform.size,
        })
    }

    fn active_attribute(&self, program: ProgramHandle, index: u32) -> Option<ActiveVariable> {
        unsafe { self.gl.get_active_attribute(native_program(program), index) }.map(|attribute| ActiveVariable {
            name: attribute.name,
            raw_type: attribute.atype,
            size: attribute.size,
        })
    }

    fn uniform_indices(&self, program: ProgramHandle, names: &[&str]) -> Vec<Option<u32>> {
        unsafe { self.queries.uniform_indices(program.raw(), names) }
    }

    fn active_uniforms_parameter(&self, program: ProgramHandle, indices: &[u32], pname: u32) -> Vec<i32> {
        unsafe { self.queries.active_uniforms_parameter(program.raw(), indices, pname) }
    }

    fn uniform_block_name(&self, program: ProgramHandle, block: u32) -> String {
        unsafe { self.gl.get_active_uniform_block_name(native_program(program), block) }
    }

    fn uniform_block_parameter(&self, program: ProgramHandle, block: u32, pname: u32) -> i32 {
        unsafe { self.gl.get_active_uniform_block_parameter_i32(native_program(program), block, pname) }
    }

    fn uniform_location(&self, program: ProgramHandle, name: &str) -> Option<UniformLocation> {
        unsafe { self.gl.get_uniform_location(native_program(program), name) }
            .and_then(uniform_location_from_native)
    }

    fn attribute_location(&self, program: ProgramHandle, name: &str) -> Option<AttributeLocation> {
        unsafe { self.gl.get_attrib_location(native_program(program), name) }
            .and_then(|location| AttributeLocation::from_raw(location as i32))
    }

    fn context_parameter(&self, pname: u32) -> i32 {
        unsafe { self.gl.get_parameter_i32(pname) }
    }

    fn context_parameter_slice(&self, pname: u32, out: &mut [i32]) {
        unsafe { self.gl.get_parameter_i32_slice(pname, out) }
    }
}

#[cfg(test)]
#[path = "gles_device_tests.rs"]
mod tests;
