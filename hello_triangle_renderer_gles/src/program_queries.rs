/// ProgramQueries - GL program queries that glow's `HasContext` lacks
///
/// glGetProgramiv (generic pname), glGetUniformIndices and
/// glGetActiveUniformsiv are loaded here from the same loader function that
/// builds the glow context.

use std::ffi::{c_char, c_void, CStr, CString};

use hello_triangle::gl_types::GL_INVALID_INDEX;
use hello_triangle::triangle::{Error, Result};
use hello_triangle::{tri_debug, tri_error};

type GetProgramiv = unsafe extern "system" fn(program: u32, pname: u32, params: *mut i32);
type GetUniformIndices =
    unsafe extern "system" fn(program: u32, count: i32, names: *const *const c_char, indices: *mut u32);
type GetActiveUniformsiv =
    unsafe extern "system" fn(program: u32, count: i32, indices: *const u32, pname: u32, params: *mut i32);

/// Loaded entry points
#[derive(Clone, Copy)]
pub(crate) struct ProgramQueries {
    get_programiv: GetProgramiv,
    get_uniform_indices: GetUniformIndices,
    get_active_uniformsiv: GetActiveUniformsiv,
}

fn load_symbol<F>(loader: &mut F, symbol: &CStr) -> Result<*const c_void>
where
    F: FnMut(&CStr) -> *const c_void,
{
    let pointer = loader(symbol);
    if pointer.is_null() {
        tri_error!("triangle::gles", "Loader returned null for {:?}", symbol);
        return Err(Error::ContextError(format!(
            "{} is not available (no current GLES 3 context?)",
            symbol.to_string_lossy()
        )));
    }
    Ok(pointer)
}

impl ProgramQueries {
    /// Resolve every entry point through `loader`
    ///
    /// # Safety
    ///
    /// `loader` must return either null or a pointer to the named GL
    /// function for the context that later calls go to.
    pub(crate) unsafe fn load<F>(loader: &mut F) -> Result<Self>
    where
        F: FnMut(&CStr) -> *const c_void,
    {
        let get_programiv = load_symbol(loader, c"glGetProgramiv")?;
        let get_uniform_indices = load_symbol(loader, c"glGetUniformIndices")?;
        let get_active_uniformsiv = load_symbol(loader, c"glGetActiveUniformsiv")?;
        tri_debug!("triangle::gles", "Loaded program query entry points");

        Ok(Self {
            get_programiv: std::mem::transmute::<*const c_void, GetProgramiv>(get_programiv),
            get_uniform_indices: std::mem::transmute::<*const c_void, GetUniformIndices>(get_uniform_indices),
            get_active_uniformsiv: std::mem::transmute::<*const c_void, GetActiveUniformsiv>(get_active_uniformsiv),
        })
    }

    /// glGetProgramiv for a single-value pname
    pub(crate) unsafe fn program_parameter(&self, program: u32, pname: u32) -> i32 {
        let mut value = 0;
        (self.get_programiv)(program, pname, &mut value);
        value
    }

    /// glGetUniformIndices; `None` for inactive names
    ///
    /// Names with an interior NUL can never be active and are not sent.
    pub(crate) unsafe fn uniform_indices(&self, program: u32, names: &[&str]) -> Vec<Option<u32>> {
        let c_names: Vec<Option<CString>> = names.iter().map(|name| CString::new(*name).ok()).collect();
        let sendable: Vec<&CString> = c_names.iter().flatten().collect();

        let mut indices = vec![GL_INVALID_INDEX; sendable.len()];
        if !sendable.is_empty() {
            let pointers: Vec<*const c_char> = sendable.iter().map(|name| name.as_ptr()).collect();
            (self.get_uniform_indices)(program, pointers.len() as i32, pointers.as_ptr(), indices.as_mut_ptr());
        }

        let mut resolved = indices.into_iter();
        c_names
            .iter()
            .map(|name| match name {
                Some(_) => resolved.next().filter(|&index| index != GL_INVALID_INDEX),
                None => None,
            })
            .collect()
    }

    /// glGetActiveUniformsiv, one value per index
    pub(crate) unsafe fn active_uniforms_parameter(&self, program: u32, indices: &[u32], pname: u32) -> Vec<i32> {
        let mut values = vec![0; indices.len()];
        if !indices.is_empty() {
            (self.get_active_uniformsiv)(program, indices.len() as i32, indices.as_ptr(), pname, values.as_mut_ptr());
        }
        values
    }
}

#[cfg(test)]
#[path = "program_queries_tests.rs"]
mod tests;
