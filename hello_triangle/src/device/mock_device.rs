/// Mock GL device for unit tests (no GPU required)
///
/// Emulates just enough of a GLES 3 driver to exercise the core:
/// - a line-oriented GLSL front end (declarations, `;` checks, uniform blocks)
/// - link-time interface matching between vertex outputs and fragment inputs
/// - std140 layout for named uniform blocks
/// - deferred deletion of attached shaders and of the current program
/// - object and call accounting so tests can check for leaks

use rustc_hash::FxHashMap;

use crate::compiler::ShaderStage;
use crate::device::{ActiveVariable, GlDevice};
use crate::error::{Error, Result};
use crate::gl_types::*;
use crate::handle::{AttributeLocation, ProgramHandle, ShaderHandle, UniformLocation};

/// Binary format the mock advertises
pub const MOCK_BINARY_FORMAT: i32 = 0x9130;

/// Length the mock reports for GL_PROGRAM_BINARY_LENGTH of a linked program
pub const MOCK_BINARY_LENGTH: i32 = 256;

// ============================================================================
// Mini GLSL front end
// ============================================================================

/// GLSL type keyword → GL type
fn glsl_type(keyword: &str) -> Option<GlType> {
    let ty = match keyword {
        "float" => GlType::Float,
        "vec2" => GlType::FloatVec2,
        "vec3" => GlType::FloatVec3,
        "vec4" => GlType::FloatVec4,
        "int" => GlType::Int,
        "ivec2" => GlType::IntVec2,
        "ivec3" => GlType::IntVec3,
        "ivec4" => GlType::IntVec4,
        "uint" => GlType::UnsignedInt,
        "uvec2" => GlType::UnsignedIntVec2,
        "uvec3" => GlType::UnsignedIntVec3,
        "uvec4" => GlType::UnsignedIntVec4,
        "bool" => GlType::Bool,
        "bvec2" => GlType::BoolVec2,
        "bvec3" => GlType::BoolVec3,
        "bvec4" => GlType::BoolVec4,
        "mat2" | "mat2x2" => GlType::FloatMat2,
        "mat3" | "mat3x3" => GlType::FloatMat3,
        "mat4" | "mat4x4" => GlType::FloatMat4,
        "mat2x3" => GlType::FloatMat2x3,
        "mat2x4" => GlType::FloatMat2x4,
        "mat3x2" => GlType::FloatMat3x2,
        "mat3x4" => GlType::FloatMat3x4,
        "mat4x2" => GlType::FloatMat4x2,
        "mat4x3" => GlType::FloatMat4x3,
        "sampler2D" => GlType::Sampler2D,
        "sampler3D" => GlType::Sampler3D,
        "samplerCube" => GlType::SamplerCube,
        "sampler2DShadow" => GlType::Sampler2DShadow,
        "sampler2DArray" => GlType::Sampler2DArray,
        "isampler2D" => GlType::IntSampler2D,
        "usampler2D" => GlType::UnsignedIntSampler2D,
        _ => return None,
    };
    Some(ty)
}

/// std140 (base alignment, size, matrix stride) of one non-array member
fn std140_layout(ty: GlType) -> (i32, i32, i32) {
    match ty {
        GlType::FloatVec2 | GlType::IntVec2 | GlType::UnsignedIntVec2 | GlType::BoolVec2 => (8, 8, 0),
        GlType::FloatVec3 | GlType::IntVec3 | GlType::UnsignedIntVec3 | GlType::BoolVec3 => (16, 12, 0),
        GlType::FloatVec4 | GlType::IntVec4 | GlType::UnsignedIntVec4 | GlType::BoolVec4 => (16, 16, 0),
        GlType::FloatMat2 | GlType::FloatMat2x3 | GlType::FloatMat2x4 => (16, 32, 16),
        GlType::FloatMat3 | GlType::FloatMat3x2 | GlType::FloatMat3x4 => (16, 48, 16),
        GlType::FloatMat4 | GlType::FloatMat4x2 | GlType::FloatMat4x3 => (16, 64, 16),
        _ => (4, 4, 0),
    }
}

/// GL-style max length: longest name plus the terminator, 0 when empty
fn max_name_length(lengths: impl Iterator<Item = usize>) -> i32 {
    lengths.max().map(|n| n as i32 + 1).unwrap_or(0)
}

fn round_up(value: i32, alignment: i32) -> i32 {
    (value + alignment - 1) / alignment * alignment
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Declaration {
    name: String,
    ty: GlType,
    /// 1 for non-arrays
    size: i32,
    location: Option<u32>,
}

#[derive(Debug, Clone, Default)]
struct BlockDeclaration {
    name: String,
    members: Vec<Declaration>,
}

#[derive(Debug, Clone, Default)]
struct ShaderInterface {
    inputs: Vec<Declaration>,
    outputs: Vec<Declaration>,
    uniforms: Vec<Declaration>,
    blocks: Vec<BlockDeclaration>,
}

fn syntax_error(line: usize, token: &str, message: &str) -> String {
    format!("ERROR: 0:{}: '{}' : {}\nERROR: 1 compilation errors.  No code generated.\n", line, token, message)
}

/// Split `layout(location = N)` off the front of a declaration
fn strip_layout(statement: &str) -> (Option<u32>, &str) {
    let Some(rest) = statement.strip_prefix("layout") else {
        return (None, statement);
    };
    let Some(close) = rest.find(')') else {
        return (None, statement);
    };
    let qualifiers = &rest[..close];
    let location = qualifiers
        .split(',')
        .filter_map(|q| q.split_once('='))
        .find(|(key, _)| key.trim().trim_start_matches('(').trim() == "location")
        .and_then(|(_, value)| value.trim().parse().ok());
    (location, rest[close + 1..].trim_start())
}

/// `TYPE NAME[N]` → declaration (qualifiers already removed)
fn parse_declaration(line_no: usize, words: &[&str], location: Option<u32>) -> std::result::Result<Declaration, String> {
    let words: Vec<&str> = words
        .iter()
        .copied()
        .filter(|w| !matches!(*w, "highp" | "mediump" | "lowp" | "flat" | "smooth" | "centroid" | "row_major" | "column_major"))
        .collect();
    let [type_word, name_word] = words.as_slice() else {
        return Err(syntax_error(line_no, words.first().copied().unwrap_or(""), "syntax error"));
    };
    let ty = glsl_type(type_word)
        .ok_or_else(|| syntax_error(line_no, type_word, "undeclared identifier"))?;
    let name_word = name_word.trim_end_matches(';');
    let (name, size) = match name_word.split_once('[') {
        Some((name, rest)) => {
            let size = rest
                .trim_end_matches(']')
                .parse::<i32>()
                .map_err(|_| syntax_error(line_no, name_word, "array size must be a constant integer expression"))?;
            (name.to_string(), size)
        }
        None => (name_word.to_string(), 1),
    };
    Ok(Declaration { name, ty, size, location })
}

fn parse_shader(source: &str) -> std::result::Result<ShaderInterface, String> {
    let mut interface = ShaderInterface::default();
    let mut depth = 0i32;
    let mut open_block: Option<BlockDeclaration> = None;
    let mut saw_version = false;

    for (index, raw_line) in source.lines().enumerate() {
        let line_no = index + 1;
        let line = raw_line.split("//").next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }
        if line.starts_with('#') {
            if line.starts_with("#version") {
                saw_version = true;
            }
            continue;
        }
        if !saw_version {
            return Err(syntax_error(line_no, "", "No version directive found"));
        }

        // Closing a brace
        if line.starts_with('}') {
            depth -= 1;
            if let Some(block) = open_block.take() {
                if !line.ends_with(';') {
                    return Err(syntax_error(line_no, "}", "syntax error"));
                }
                interface.blocks.push(block);
            }
            continue;
        }
        if line == "{" {
            depth += 1;
            continue;
        }

        // Uniform block header
        let (location, statement) = strip_layout(line);
        if depth == 0 && statement.starts_with("uniform") && statement.ends_with('{') {
            let name = statement
                .trim_start_matches("uniform")
                .trim_end_matches('{')
                .trim()
                .to_string();
            open_block = Some(BlockDeclaration { name, members: Vec::new() });
            depth += 1;
            continue;
        }

        if line.ends_with('{') {
            depth += 1;
            continue;
        }
        // Function header, body opens on the next line
        if depth == 0 && line.ends_with(')') {
            continue;
        }
        if !line.ends_with(';') {
            let token = line.split_whitespace().last().unwrap_or("");
            return Err(syntax_error(line_no + 1, token, "syntax error"));
        }

        let statement = statement.trim_end_matches(';').trim();
        let words: Vec<&str> = statement.split_whitespace().collect();

        if let Some(block) = open_block.as_mut() {
            block.members.push(parse_declaration(line_no, &words, None)?);
            continue;
        }
        if depth > 0 {
            // Statement inside a function body
            continue;
        }
        match words.first().copied() {
            Some("precision") => {}
            Some("in") => interface.inputs.push(parse_declaration(line_no, &words[1..], location)?),
            Some("out") => interface.outputs.push(parse_declaration(line_no, &words[1..], location)?),
            Some("uniform") => interface.uniforms.push(parse_declaration(line_no, &words[1..], location)?),
            Some(other) => return Err(syntax_error(line_no, other, "syntax error")),
            None => {}
        }
    }

    if !saw_version {
        return Err(syntax_error(1, "", "No version directive found"));
    }
    if depth != 0 {
        return Err(syntax_error(source.lines().count(), "", "unexpected end of file"));
    }
    Ok(interface)
}

// ============================================================================
// Mock objects
// ============================================================================

#[derive(Debug)]
struct MockShader {
    stage: ShaderStage,
    source: String,
    compiled: bool,
    info_log: String,
    interface: ShaderInterface,
    attach_count: u32,
    delete_pending: bool,
}

#[derive(Debug, Clone)]
struct MockUniform {
    /// Driver-style name (`alpha[0]` for arrays)
    name: String,
    ty: GlType,
    size: i32,
    block_index: i32,
    offset: i32,
    array_stride: i32,
    matrix_stride: i32,
    location: Option<i32>,
}

#[derive(Debug, Clone)]
struct MockBlock {
    name: String,
    data_size: i32,
    vertex: bool,
    fragment: bool,
}

#[derive(Debug, Clone)]
struct MockAttribute {
    name: String,
    ty: GlType,
    size: i32,
    location: u32,
}

#[derive(Debug, Default)]
struct MockProgram {
    attached: Vec<ShaderHandle>,
    linked: bool,
    info_log: String,
    delete_pending: bool,
    uniforms: Vec<MockUniform>,
    attributes: Vec<MockAttribute>,
    blocks: Vec<MockBlock>,
}

impl MockProgram {
    fn uniform_index(&self, name: &str) -> Option<u32> {
        self.uniforms
            .iter()
            .position(|u| u.name == name || (u.size > 1 && u.name.strip_suffix("[0]") == Some(name)))
            .map(|index| index as u32)
    }
}

/// Calls made through the device, for ordering/"never called" assertions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CallCounts {
    pub create_shader: u32,
    pub compile_shader: u32,
    pub delete_shader: u32,
    pub create_program: u32,
    pub link_program: u32,
    pub delete_program: u32,
    pub use_program: u32,
}

/// Mock GL device that tracks every object it hands out
#[derive(Debug)]
pub struct MockDevice {
    next_name: u32,
    shaders: FxHashMap<u32, MockShader>,
    programs: FxHashMap<u32, MockProgram>,
    current_program: Option<ProgramHandle>,
    /// When false, object creation fails like a call without a current context
    pub has_context: bool,
    /// When true, `name[i]` resolves to the index of the whole array
    pub element_names_resolve_to_array: bool,
    pub calls: CallCounts,
}

impl MockDevice {
    pub fn new() -> Self {
        Self {
            next_name: 1,
            shaders: FxHashMap::default(),
            programs: FxHashMap::default(),
            current_program: None,
            has_context: true,
            element_names_resolve_to_array: false,
            calls: CallCounts::default(),
        }
    }

    /// Device whose object creation always fails
    pub fn without_context() -> Self {
        Self { has_context: false, ..Self::new() }
    }

    fn allocate_name(&mut self) -> u32 {
        let name = self.next_name;
        self.next_name += 1;
        name
    }

    /// Shader objects still holding storage (including delete-pending ones)
    pub fn live_shaders(&self) -> usize {
        self.shaders.len()
    }

    /// Program objects still holding storage (including delete-pending ones)
    pub fn live_programs(&self) -> usize {
        self.programs.len()
    }

    pub fn shader_exists(&self, shader: ShaderHandle) -> bool {
        self.shaders.contains_key(&shader.raw())
    }

    pub fn shader_delete_pending(&self, shader: ShaderHandle) -> bool {
        self.shaders
            .get(&shader.raw())
            .map(|s| s.delete_pending)
            .unwrap_or(false)
    }

    pub fn shader_source_text(&self, shader: ShaderHandle) -> Option<&str> {
        self.shaders.get(&shader.raw()).map(|s| s.source.as_str())
    }

    pub fn program_exists(&self, program: ProgramHandle) -> bool {
        self.programs.contains_key(&program.raw())
    }

    pub fn program_delete_pending(&self, program: ProgramHandle) -> bool {
        self.programs
            .get(&program.raw())
            .map(|p| p.delete_pending)
            .unwrap_or(false)
    }

    pub fn current_program(&self) -> Option<ProgramHandle> {
        self.current_program
    }

    fn release_shader_if_unreferenced(&mut self, shader: ShaderHandle) {
        let reclaim = self
            .shaders
            .get(&shader.raw())
            .map(|s| s.delete_pending && s.attach_count == 0)
            .unwrap_or(false);
        if reclaim {
            self.shaders.remove(&shader.raw());
        }
    }

    /// Free a program and detach its shaders (which may free them too)
    fn destroy_program(&mut self, program: ProgramHandle) {
        if let Some(removed) = self.programs.remove(&program.raw()) {
            for shader in removed.attached {
                if let Some(s) = self.shaders.get_mut(&shader.raw()) {
                    s.attach_count = s.attach_count.saturating_sub(1);
                }
                self.release_shader_if_unreferenced(shader);
            }
        }
    }

    fn link_interfaces(&self, program: &MockProgram) -> std::result::Result<MockProgram, String> {
        let mut vertex: Option<&MockShader> = None;
        let mut fragment: Option<&MockShader> = None;
        for handle in &program.attached {
            let Some(shader) = self.shaders.get(&handle.raw()) else {
                return Err(format!("error: attached shader {} does not exist\n", handle));
            };
            if !shader.compiled {
                return Err(format!("error: {} shader {} is not compiled\n", shader.stage, handle));
            }
            let slot = match shader.stage {
                ShaderStage::Vertex => &mut vertex,
                ShaderStage::Fragment => &mut fragment,
            };
            if slot.is_some() {
                return Err(format!("error: more than one {} shader attached\n", shader.stage));
            }
            *slot = Some(shader);
        }
        let (Some(vertex), Some(fragment)) = (vertex, fragment) else {
            return Err("error: program must have one vertex and one fragment shader\n".to_string());
        };

        // Varyings
        for input in &fragment.interface.inputs {
            match vertex.interface.outputs.iter().find(|o| o.name == input.name) {
                None => {
                    return Err(format!(
                        "error: fragment shader input '{}' is not written by the vertex shader\n",
                        input.name
                    ))
                }
                Some(output) if output.ty != input.ty || output.size != input.size => {
                    return Err(format!(
                        "error: type mismatch for varying '{}' between vertex and fragment shader\n",
                        input.name
                    ))
                }
                Some(_) => {}
            }
        }

        // Default-block uniforms, vertex first, shared names merged
        let mut uniforms: Vec<MockUniform> = Vec::new();
        let mut next_location = 0i32;
        for declaration in vertex.interface.uniforms.iter().chain(fragment.interface.uniforms.iter()) {
            let driver_name = if declaration.size > 1 {
                format!("{}[0]", declaration.name)
            } else {
                declaration.name.clone()
            };
            if let Some(existing) = uniforms.iter().find(|u| u.name == driver_name) {
                if existing.ty != declaration.ty || existing.size != declaration.size {
                    return Err(format!("error: uniform '{}' declared with different types\n", declaration.name));
                }
                continue;
            }
            uniforms.push(MockUniform {
                name: driver_name,
                ty: declaration.ty,
                size: declaration.size,
                block_index: -1,
                offset: -1,
                array_stride: -1,
                matrix_stride: -1,
                location: Some(next_location),
            });
            next_location += declaration.size;
        }

        // Named blocks, std140
        let mut blocks: Vec<MockBlock> = Vec::new();
        let stages = [(ShaderStage::Vertex, vertex), (ShaderStage::Fragment, fragment)];
        for (stage, shader) in stages {
            for block in &shader.interface.blocks {
                if let Some(existing) = blocks.iter_mut().find(|b| b.name == block.name) {
                    match stage {
                        ShaderStage::Vertex => existing.vertex = true,
                        ShaderStage::Fragment => existing.fragment = true,
                    }
                    continue;
                }
                let block_index = blocks.len() as i32;
                let mut offset = 0;
                for member in &block.members {
                    let (align, size, matrix_stride) = std140_layout(member.ty);
                    let (align, total, array_stride) = if member.size > 1 {
                        let stride = round_up(size, 16);
                        (16, stride * member.size, stride)
                    } else {
                        (align, size, 0)
                    };
                    offset = round_up(offset, align);
                    uniforms.push(MockUniform {
                        name: if member.size > 1 { format!("{}[0]", member.name) } else { member.name.clone() },
                        ty: member.ty,
                        size: member.size,
                        block_index,
                        offset,
                        array_stride,
                        matrix_stride,
                        location: None,
                    });
                    offset += total;
                }
                blocks.push(MockBlock {
                    name: block.name.clone(),
                    data_size: round_up(offset, 16),
                    vertex: stage == ShaderStage::Vertex,
                    fragment: stage == ShaderStage::Fragment,
                });
            }
        }

        // Attributes
        let mut attributes = Vec::new();
        let mut next_attribute = 0u32;
        for input in &vertex.interface.inputs {
            let location = input.location.unwrap_or(next_attribute);
            next_attribute = next_attribute.max(location + input.size as u32);
            attributes.push(MockAttribute {
                name: if input.size > 1 { format!("{}[0]", input.name) } else { input.name.clone() },
                ty: input.ty,
                size: input.size,
                location,
            });
        }

        Ok(MockProgram {
            attached: program.attached.clone(),
            linked: true,
            info_log: String::new(),
            delete_pending: program.delete_pending,
            uniforms,
            attributes,
            blocks,
        })
    }
}

impl Default for MockDevice {
    fn default() -> Self {
        Self::new()
    }
}

impl GlDevice for MockDevice {
    fn create_shader(&mut self, stage: ShaderStage) -> Result<ShaderHandle> {
        self.calls.create_shader += 1;
        if !self.has_context {
            return Err(Error::ContextError("glCreateShader returned 0 (no current context)".to_string()));
        }
        let name = self.allocate_name();
        self.shaders.insert(name, MockShader {
            stage,
            source: String::new(),
            compiled: false,
            info_log: String::new(),
            interface: ShaderInterface::default(),
            attach_count: 0,
            delete_pending: false,
        });
        ShaderHandle::from_raw(name).ok_or_else(|| Error::BackendError("mock allocated name 0".to_string()))
    }

    fn shader_source(&mut self, shader: ShaderHandle, source: &str) {
        if let Some(s) = self.shaders.get_mut(&shader.raw()) {
            s.source = source.to_string();
        }
    }

    fn compile_shader(&mut self, shader: ShaderHandle) {
        self.calls.compile_shader += 1;
        if let Some(s) = self.shaders.get_mut(&shader.raw()) {
            match parse_shader(&s.source) {
                Ok(interface) => {
                    s.compiled = true;
                    s.info_log.clear();
                    s.interface = interface;
                }
                Err(log) => {
                    s.compiled = false;
                    s.info_log = log;
                    s.interface = ShaderInterface::default();
                }
            }
        }
    }

    fn shader_compile_status(&self, shader: ShaderHandle) -> bool {
        self.shaders.get(&shader.raw()).map(|s| s.compiled).unwrap_or(false)
    }

    fn shader_info_log(&self, shader: ShaderHandle) -> String {
        self.shaders
            .get(&shader.raw())
            .map(|s| s.info_log.clone())
            .unwrap_or_default()
    }

    fn delete_shader(&mut self, shader: ShaderHandle) {
        self.calls.delete_shader += 1;
        if let Some(s) = self.shaders.get_mut(&shader.raw()) {
            s.delete_pending = true;
        }
        self.release_shader_if_unreferenced(shader);
    }

    fn create_program(&mut self) -> Result<ProgramHandle> {
        self.calls.create_program += 1;
        if !self.has_context {
            return Err(Error::ContextError("glCreateProgram returned 0 (no current context)".to_string()));
        }
        let name = self.allocate_name();
        self.programs.insert(name, MockProgram::default());
        ProgramHandle::from_raw(name).ok_or_else(|| Error::BackendError("mock allocated name 0".to_string()))
    }

    fn attach_shader(&mut self, program: ProgramHandle, shader: ShaderHandle) {
        let (Some(p), Some(s)) = (self.programs.get_mut(&program.raw()), self.shaders.get_mut(&shader.raw())) else {
            return;
        };
        if !p.attached.contains(&shader) {
            p.attached.push(shader);
            s.attach_count += 1;
        }
    }

    fn detach_shader(&mut self, program: ProgramHandle, shader: ShaderHandle) {
        let Some(p) = self.programs.get_mut(&program.raw()) else {
            return;
        };
        let before = p.attached.len();
        p.attached.retain(|attached| *attached != shader);
        if p.attached.len() != before {
            if let Some(s) = self.shaders.get_mut(&shader.raw()) {
                s.attach_count = s.attach_count.saturating_sub(1);
            }
            self.release_shader_if_unreferenced(shader);
        }
    }

    fn link_program(&mut self, program: ProgramHandle) {
        self.calls.link_program += 1;
        let Some(existing) = self.programs.get(&program.raw()) else {
            return;
        };
        let outcome = self.link_interfaces(existing);
        if let Some(p) = self.programs.get_mut(&program.raw()) {
            match outcome {
                Ok(linked) => *p = linked,
                Err(log) => {
                    p.linked = false;
                    p.info_log = log;
                    p.uniforms.clear();
                    p.attributes.clear();
                    p.blocks.clear();
                }
            }
        }
    }

    fn program_link_status(&self, program: ProgramHandle) -> bool {
        self.programs.get(&program.raw()).map(|p| p.linked).unwrap_or(false)
    }

    fn program_info_log(&self, program: ProgramHandle) -> String {
        self.programs
            .get(&program.raw())
            .map(|p| p.info_log.clone())
            .unwrap_or_default()
    }

    fn program_parameter(&self, program: ProgramHandle, pname: u32) -> i32 {
        let Some(p) = self.programs.get(&program.raw()) else {
            return 0;
        };
        match pname {
            GL_DELETE_STATUS => p.delete_pending as i32,
            GL_LINK_STATUS => p.linked as i32,
            GL_VALIDATE_STATUS => 0,
            GL_INFO_LOG_LENGTH => {
                if p.info_log.is_empty() { 0 } else { p.info_log.len() as i32 + 1 }
            }
            GL_ATTACHED_SHADERS => p.attached.len() as i32,
            GL_ACTIVE_UNIFORMS => p.uniforms.len() as i32,
            GL_ACTIVE_UNIFORM_MAX_LENGTH => max_name_length(p.uniforms.iter().map(|u| u.name.len())),
            GL_ACTIVE_ATTRIBUTES => p.attributes.len() as i32,
            GL_ACTIVE_ATTRIBUTE_MAX_LENGTH => max_name_length(p.attributes.iter().map(|a| a.name.len())),
            GL_ACTIVE_UNIFORM_BLOCKS => p.blocks.len() as i32,
            GL_ACTIVE_UNIFORM_BLOCK_MAX_NAME_LENGTH => max_name_length(p.blocks.iter().map(|b| b.name.len())),
            GL_PROGRAM_BINARY_RETRIEVABLE_HINT => 0,
            GL_PROGRAM_BINARY_LENGTH => {
                if p.linked { MOCK_BINARY_LENGTH } else { 0 }
            }
            GL_TRANSFORM_FEEDBACK_BUFFER_MODE => GL_INTERLEAVED_ATTRIBS as i32,
            GL_TRANSFORM_FEEDBACK_VARYINGS | GL_TRANSFORM_FEEDBACK_VARYING_MAX_LENGTH => 0,
            _ => 0,
        }
    }

    fn delete_program(&mut self, program: ProgramHandle) {
        self.calls.delete_program += 1;
        if self.current_program == Some(program) {
            if let Some(p) = self.programs.get_mut(&program.raw()) {
                p.delete_pending = true;
            }
        } else {
            self.destroy_program(program);
        }
    }

    fn use_program(&mut self, program: Option<ProgramHandle>) {
        self.calls.use_program += 1;
        let previous = std::mem::replace(&mut self.current_program, program);
        if let Some(previous) = previous.filter(|prev| Some(*prev) != program) {
            if self.program_delete_pending(previous) {
                self.destroy_program(previous);
            }
        }
    }

    fn active_uniform(&self, program: ProgramHandle, index: u32) -> Option<ActiveVariable> {
        let u = self.programs.get(&program.raw())?.uniforms.get(index as usize)?;
        Some(ActiveVariable { name: u.name.clone(), raw_type: u.ty.raw(), size: u.size })
    }

    fn active_attribute(&self, program: ProgramHandle, index: u32) -> Option<ActiveVariable> {
        let a = self.programs.get(&program.raw())?.attributes.get(index as usize)?;
        Some(ActiveVariable { name: a.name.clone(), raw_type: a.ty.raw(), size: a.size })
    }

    fn uniform_indices(&self, program: ProgramHandle, names: &[&str]) -> Vec<Option<u32>> {
        match self.programs.get(&program.raw()) {
            Some(p) => names
                .iter()
                .map(|name| {
                    let name = match self.element_names_resolve_to_array {
                        true => name.split_once('[').map_or(*name, |(base, _)| base),
                        false => name,
                    };
                    p.uniform_index(name)
                })
                .collect(),
            None => vec![None; names.len()],
        }
    }

    fn active_uniforms_parameter(&self, program: ProgramHandle, indices: &[u32], pname: u32) -> Vec<i32> {
        let Some(p) = self.programs.get(&program.raw()) else {
            return vec![-1; indices.len()];
        };
        indices
            .iter()
            .map(|index| {
                let Some(u) = p.uniforms.get(*index as usize) else {
                    return -1;
                };
                match pname {
                    GL_UNIFORM_TYPE => u.ty.raw() as i32,
                    GL_UNIFORM_SIZE => u.size,
                    GL_UNIFORM_NAME_LENGTH => u.name.len() as i32 + 1,
                    GL_UNIFORM_BLOCK_INDEX => u.block_index,
                    GL_UNIFORM_OFFSET => u.offset,
                    GL_UNIFORM_ARRAY_STRIDE => u.array_stride,
                    GL_UNIFORM_MATRIX_STRIDE => u.matrix_stride,
                    GL_UNIFORM_IS_ROW_MAJOR => 0,
                    _ => -1,
                }
            })
            .collect()
    }

    fn uniform_block_name(&self, program: ProgramHandle, block: u32) -> String {
        self.programs
            .get(&program.raw())
            .and_then(|p| p.blocks.get(block as usize))
            .map(|b| b.name.clone())
            .unwrap_or_default()
    }

    fn uniform_block_parameter(&self, program: ProgramHandle, block: u32, pname: u32) -> i32 {
        let Some(p) = self.programs.get(&program.raw()) else {
            return 0;
        };
        let Some(b) = p.blocks.get(block as usize) else {
            return 0;
        };
        match pname {
            GL_UNIFORM_BLOCK_BINDING => 0,
            GL_UNIFORM_BLOCK_DATA_SIZE => b.data_size,
            GL_UNIFORM_BLOCK_NAME_LENGTH => b.name.len() as i32 + 1,
            GL_UNIFORM_BLOCK_ACTIVE_UNIFORMS => {
                p.uniforms.iter().filter(|u| u.block_index == block as i32).count() as i32
            }
            GL_UNIFORM_BLOCK_REFERENCED_BY_VERTEX_SHADER => b.vertex as i32,
            GL_UNIFORM_BLOCK_REFERENCED_BY_FRAGMENT_SHADER => b.fragment as i32,
            _ => 0,
        }
    }

    fn uniform_location(&self, program: ProgramHandle, name: &str) -> Option<UniformLocation> {
        let p = self.programs.get(&program.raw())?;
        if !p.linked {
            return None;
        }
        let (base, element) = match name.split_once('[') {
            Some((base, rest)) => (base, rest.trim_end_matches(']').parse::<i32>().ok()?),
            None => (name, 0),
        };
        let uniform = p.uniforms.iter().find(|u| {
            u.name == base || u.name.strip_suffix("[0]") == Some(base)
        })?;
        if element >= uniform.size {
            return None;
        }
        UniformLocation::from_raw(uniform.location? + element)
    }

    fn attribute_location(&self, program: ProgramHandle, name: &str) -> Option<AttributeLocation> {
        let p = self.programs.get(&program.raw())?;
        if !p.linked {
            return None;
        }
        p.attributes
            .iter()
            .find(|a| a.name == name || a.name.strip_suffix("[0]") == Some(name))
            .and_then(|a| AttributeLocation::from_raw(a.location as i32))
    }

    fn context_parameter(&self, pname: u32) -> i32 {
        match pname {
            GL_NUM_PROGRAM_BINARY_FORMATS => 1,
            GL_CURRENT_PROGRAM => self.current_program.map_or(0, |program| program.raw() as i32),
            _ => 0,
        }
    }

    fn context_parameter_slice(&self, pname: u32, out: &mut [i32]) {
        if pname == GL_PROGRAM_BINARY_FORMATS {
            if let Some(first) = out.first_mut() {
                *first = MOCK_BINARY_FORMAT;
            }
        }
    }
}

#[cfg(test)]
#[path = "mock_device_tests.rs"]
mod tests;
