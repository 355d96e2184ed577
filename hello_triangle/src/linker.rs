/// Program linker - two compiled stages in, one executable program out

use rustc_hash::FxHashMap;

use crate::compiler::{CompiledStage, ShaderStage, EMPTY_DRIVER_LOG};
use crate::device::GlDevice;
use crate::error::Error;
use crate::handle::{AttributeLocation, ProgramHandle, ShaderHandle, UniformLocation};
use crate::{tri_debug, tri_error, tri_trace};

/// A program object that linked successfully
///
/// Owns the GPU executable and the two shader objects it was built from
/// (already flagged for deletion). Never freed implicitly: call `destroy`.
#[derive(Debug)]
pub struct LinkedProgram {
    handle: ProgramHandle,
    stages: [ShaderHandle; 2],
    uniform_locations: FxHashMap<String, Option<UniformLocation>>,
    attribute_locations: FxHashMap<String, Option<AttributeLocation>>,
}

impl LinkedProgram {
    pub fn handle(&self) -> ProgramHandle {
        self.handle
    }

    /// Vertex and fragment shader objects, pending deletion
    pub fn stage_handles(&self) -> [ShaderHandle; 2] {
        self.stages
    }

    /// Uniform location by name, cached after the first lookup
    ///
    /// A miss is not an error: optional uniforms simply yield `None`.
    pub fn uniform_location<D: GlDevice + ?Sized>(&mut self, device: &D, name: &str) -> Option<UniformLocation> {
        if let Some(cached) = self.uniform_locations.get(name) {
            return *cached;
        }
        let location = device.uniform_location(self.handle, name);
        if location.is_none() {
            tri_debug!("triangle::linker", "Uniform '{}' not found in program {}", name, self.handle);
        }
        self.uniform_locations.insert(name.to_string(), location);
        location
    }

    /// Attribute location by name, cached after the first lookup
    pub fn attribute_location<D: GlDevice + ?Sized>(&mut self, device: &D, name: &str) -> Option<AttributeLocation> {
        if let Some(cached) = self.attribute_locations.get(name) {
            return *cached;
        }
        let location = device.attribute_location(self.handle, name);
        if location.is_none() {
            tri_debug!("triangle::linker", "Attribute '{}' not found in program {}", name, self.handle);
        }
        self.attribute_locations.insert(name.to_string(), location);
        location
    }

    /// Number of names looked up so far (hits and misses)
    pub fn cached_locations(&self) -> usize {
        self.uniform_locations.len() + self.attribute_locations.len()
    }

    /// Delete the program object
    ///
    /// This is also what finally reclaims the two shader objects. If the
    /// program is still current, the driver defers the whole thing until
    /// it is unbound.
    pub fn destroy<D: GlDevice + ?Sized>(self, device: &mut D) {
        tri_trace!(
            "triangle::linker",
            "Deleting program {} ({} cached locations)",
            self.handle,
            self.cached_locations()
        );
        device.delete_program(self.handle);
    }
}

/// A failed link, with the unconsumed stages handed back
///
/// The stages are still live shader objects: release them (or let
/// `release` do it) once the error has been inspected.
#[derive(Debug)]
pub struct LinkFailure {
    pub error: Error,
    pub vertex: CompiledStage,
    pub fragment: CompiledStage,
}

impl LinkFailure {
    /// Delete both stages and keep the error
    pub fn release<D: GlDevice + ?Sized>(self, device: &mut D) -> Error {
        self.vertex.release(device);
        self.fragment.release(device);
        self.error
    }
}

/// Link a vertex and a fragment stage into a program
///
/// Creates one program object, attaches both stages, links, and checks the
/// link status.
///
/// On success both shader objects are deleted while still attached. The
/// driver only flags them: storage is reclaimed when the program itself is
/// destroyed. On failure the program object is deleted right away and the
/// stages come back inside `LinkFailure`.
///
/// Stage kinds are checked first; a mismatch never reaches the driver.
pub fn link<D: GlDevice + ?Sized>(
    device: &mut D,
    vertex: CompiledStage,
    fragment: CompiledStage,
) -> std::result::Result<LinkedProgram, LinkFailure> {
    if vertex.stage() != ShaderStage::Vertex || fragment.stage() != ShaderStage::Fragment {
        let log = format!(
            "expected one vertex and one fragment stage, got {} + {}",
            vertex.stage(),
            fragment.stage()
        );
        tri_error!("triangle::linker", "Refusing to link: {}", log);
        return Err(LinkFailure { error: Error::LinkFailed { log }, vertex, fragment });
    }

    let program = match device.create_program() {
        Ok(program) => program,
        Err(error) => return Err(LinkFailure { error, vertex, fragment }),
    };

    device.attach_shader(program, vertex.handle());
    device.attach_shader(program, fragment.handle());
    device.link_program(program);

    if !device.program_link_status(program) {
        let info_log = device.program_info_log(program);
        let log = if info_log.trim().is_empty() {
            EMPTY_DRIVER_LOG.to_string()
        } else {
            info_log
        };
        tri_error!("triangle::linker", "Error linking program:\n{}", log);
        device.delete_program(program);
        return Err(LinkFailure { error: Error::LinkFailed { log }, vertex, fragment });
    }

    let stages = [vertex.handle(), fragment.handle()];
    for shader in stages {
        device.delete_shader(shader);
    }

    tri_debug!(
        "triangle::linker",
        "Linked program {} from shaders {} + {}",
        program,
        stages[0],
        stages[1]
    );

    Ok(LinkedProgram {
        handle: program,
        stages,
        uniform_locations: FxHashMap::default(),
        attribute_locations: FxHashMap::default(),
    })
}

#[cfg(test)]
#[path = "linker_tests.rs"]
mod tests;
