/// Resource reflector - read-only introspection of a linked program
///
/// Every call re-reads live driver state; nothing is cached between calls.
/// Arrays are reported once as a whole and then once per element, with
/// uniform block layout (offset, strides, row-major) for block members.

use std::fmt;

use bitflags::bitflags;

use crate::device::{ActiveVariable, GlDevice};
use crate::gl_types::*;
use crate::handle::{AttributeLocation, ProgramHandle, UniformLocation};
use crate::linker::LinkedProgram;
use crate::status::ProgramStatus;
use crate::tri_trace;

bitflags! {
    /// Stages that reference a uniform block
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct StageFlags: u32 {
        const VERTEX = 0b01;
        const FRAGMENT = 0b10;
    }
}

/// Layout of a uniform that lives in a named uniform block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockMembership {
    pub block_index: u32,
    /// Byte offset from the start of the block
    pub offset: i32,
    /// Bytes between array elements (0 for non-arrays)
    pub array_stride: i32,
    /// Bytes between matrix columns/rows (0 for non-matrices)
    pub matrix_stride: i32,
    pub row_major: bool,
}

/// Where a resource can be bound
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceLocation {
    Uniform(UniformLocation),
    Attribute(AttributeLocation),
}

/// One active uniform or attribute (or one element of an array)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveResourceDescriptor {
    /// Base name for whole resources, `name[i]` for elements
    pub name: String,
    /// Active resource index the entry was read from
    pub index: u32,
    pub resource_type: ResourceType,
    /// Declared array size; 1 for scalars and for single elements
    pub array_size: i32,
    /// Element index when this entry describes one array element
    pub element: Option<u32>,
    /// None for block members and inactive names
    pub location: Option<ResourceLocation>,
    /// Set only for members of a named uniform block
    pub block: Option<BlockMembership>,
}

impl ActiveResourceDescriptor {
    pub fn is_array(&self) -> bool {
        self.element.is_none() && self.array_size > 1
    }
}

/// One active uniform block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniformBlockDescriptor {
    pub index: u32,
    pub name: String,
    pub binding: i32,
    pub data_size: i32,
    /// Active uniform indices that belong to this block
    pub member_indices: Vec<u32>,
    pub referenced_by: StageFlags,
}

/// Strip a trailing `[0]` from a driver-reported array name
fn base_name(name: &str) -> &str {
    name.strip_suffix("[0]").unwrap_or(name)
}

/// Read-only view over one linked program
pub struct Reflector<'a, D: GlDevice + ?Sized> {
    device: &'a D,
    program: ProgramHandle,
}

impl<'a, D: GlDevice + ?Sized> Reflector<'a, D> {
    pub fn new(device: &'a D, program: &LinkedProgram) -> Self {
        Self { device, program: program.handle() }
    }

    fn uniform_parameter(&self, index: u32, pname: u32) -> i32 {
        self.device
            .active_uniforms_parameter(self.program, &[index], pname)
            .first()
            .copied()
            .unwrap_or(-1)
    }

    fn block_membership(&self, index: u32) -> Option<BlockMembership> {
        let block_index = u32::try_from(self.uniform_parameter(index, GL_UNIFORM_BLOCK_INDEX)).ok()?;
        Some(BlockMembership {
            block_index,
            offset: self.uniform_parameter(index, GL_UNIFORM_OFFSET),
            array_stride: self.uniform_parameter(index, GL_UNIFORM_ARRAY_STRIDE).max(0),
            matrix_stride: self.uniform_parameter(index, GL_UNIFORM_MATRIX_STRIDE).max(0),
            row_major: self.uniform_parameter(index, GL_UNIFORM_IS_ROW_MAJOR) != 0,
        })
    }

    /// Layout of element `element` of an array block member
    ///
    /// Uses the driver's own index for `name[i]` only when it names a
    /// resource other than the whole array. Drivers that resolve `name[i]`
    /// to the array's index report the base offset there, so the element
    /// offset is stepped from the base by the array stride instead.
    fn element_membership(
        &self,
        array_index: u32,
        element_name: &str,
        element: u32,
        whole: &BlockMembership,
    ) -> BlockMembership {
        let direct = self
            .device
            .uniform_indices(self.program, &[element_name])
            .first()
            .copied()
            .flatten()
            .filter(|&index| index != array_index);
        match direct.and_then(|index| self.block_membership(index)) {
            Some(membership) => membership,
            None => BlockMembership {
                offset: whole.offset + element as i32 * whole.array_stride,
                ..*whole
            },
        }
    }

    fn uniform_location(&self, name: &str) -> Option<ResourceLocation> {
        self.device
            .uniform_location(self.program, name)
            .map(ResourceLocation::Uniform)
    }

    fn describe_uniform(&self, index: u32, variable: ActiveVariable, out: &mut Vec<ActiveResourceDescriptor>) {
        let resource_type = ResourceType::from_raw(variable.raw_type);
        let block = self.block_membership(index);
        let name = base_name(&variable.name).to_string();
        let location = if block.is_some() { None } else { self.uniform_location(&variable.name) };

        out.push(ActiveResourceDescriptor {
            name: name.clone(),
            index,
            resource_type,
            array_size: variable.size,
            element: None,
            location,
            block,
        });

        if variable.size <= 1 {
            return;
        }

        for element in 0..variable.size as u32 {
            let element_name = format!("{}[{}]", name, element);
            let (location, element_block) = match &block {
                Some(whole) => (None, Some(self.element_membership(index, &element_name, element, whole))),
                None => (self.uniform_location(&element_name), None),
            };
            out.push(ActiveResourceDescriptor {
                name: element_name,
                index,
                resource_type,
                array_size: 1,
                element: Some(element),
                location,
                block: element_block,
            });
        }
    }

    /// Active uniforms, arrays expanded per element
    ///
    /// A finite snapshot: calling it again re-reads the driver and, for an
    /// unchanged program, yields an identical sequence.
    pub fn active_uniforms(&self) -> Vec<ActiveResourceDescriptor> {
        let count = self.device.program_parameter(self.program, GL_ACTIVE_UNIFORMS).max(0) as u32;
        let mut out = Vec::with_capacity(count as usize);
        for index in 0..count {
            match self.device.active_uniform(self.program, index) {
                Some(variable) => self.describe_uniform(index, variable, &mut out),
                None => tri_trace!("triangle::reflect", "Uniform index {} vanished during reflection", index),
            }
        }
        out
    }

    /// Active vertex attributes (arrays expanded like uniforms)
    pub fn active_attributes(&self) -> Vec<ActiveResourceDescriptor> {
        let count = self.device.program_parameter(self.program, GL_ACTIVE_ATTRIBUTES).max(0) as u32;
        let mut out = Vec::with_capacity(count as usize);
        for index in 0..count {
            let Some(variable) = self.device.active_attribute(self.program, index) else {
                continue;
            };
            let name = base_name(&variable.name).to_string();
            let resource_type = ResourceType::from_raw(variable.raw_type);
            let location = self
                .device
                .attribute_location(self.program, &variable.name)
                .map(ResourceLocation::Attribute);
            out.push(ActiveResourceDescriptor {
                name: name.clone(),
                index,
                resource_type,
                array_size: variable.size,
                element: None,
                location,
                block: None,
            });
            if variable.size > 1 {
                // Array attributes occupy consecutive locations
                for element in 0..variable.size as u32 {
                    let location = location.and_then(|location| match location {
                        ResourceLocation::Attribute(base) => {
                            AttributeLocation::from_raw((base.raw() + element) as i32)
                                .map(ResourceLocation::Attribute)
                        }
                        other => Some(other),
                    });
                    out.push(ActiveResourceDescriptor {
                        name: format!("{}[{}]", name, element),
                        index,
                        resource_type,
                        array_size: 1,
                        element: Some(element),
                        location,
                        block: None,
                    });
                }
            }
        }
        out
    }

    /// Active named uniform blocks
    pub fn uniform_blocks(&self) -> Vec<UniformBlockDescriptor> {
        let count = self.device.program_parameter(self.program, GL_ACTIVE_UNIFORM_BLOCKS).max(0) as u32;
        if count == 0 {
            return Vec::new();
        }

        let uniform_count = self.device.program_parameter(self.program, GL_ACTIVE_UNIFORMS).max(0) as u32;
        let all_indices: Vec<u32> = (0..uniform_count).collect();
        let owners = self
            .device
            .active_uniforms_parameter(self.program, &all_indices, GL_UNIFORM_BLOCK_INDEX);

        (0..count)
            .map(|block| {
                let param = |pname| self.device.uniform_block_parameter(self.program, block, pname);
                let mut referenced_by = StageFlags::empty();
                if param(GL_UNIFORM_BLOCK_REFERENCED_BY_VERTEX_SHADER) != 0 {
                    referenced_by |= StageFlags::VERTEX;
                }
                if param(GL_UNIFORM_BLOCK_REFERENCED_BY_FRAGMENT_SHADER) != 0 {
                    referenced_by |= StageFlags::FRAGMENT;
                }
                let member_indices = all_indices
                    .iter()
                    .zip(owners.iter())
                    .filter(|(_, owner)| **owner == block as i32)
                    .map(|(index, _)| *index)
                    .collect();
                UniformBlockDescriptor {
                    index: block,
                    name: self.device.uniform_block_name(self.program, block),
                    binding: param(GL_UNIFORM_BLOCK_BINDING),
                    data_size: param(GL_UNIFORM_BLOCK_DATA_SIZE),
                    member_indices,
                    referenced_by,
                }
            })
            .collect()
    }

    /// Program status flags plus the context's binary formats
    pub fn program_status(&self) -> ProgramStatus {
        let format_count = self.device.context_parameter(GL_NUM_PROGRAM_BINARY_FORMATS).max(0) as usize;
        let mut binary_formats = vec![0; format_count];
        if format_count > 0 {
            self.device.context_parameter_slice(GL_PROGRAM_BINARY_FORMATS, &mut binary_formats);
        }
        ProgramStatus::from_raw_values(
            |info| self.device.program_parameter(self.program, info.raw),
            binary_formats,
        )
    }

    /// Everything above in one snapshot
    pub fn report(&self) -> ProgramReport {
        ProgramReport {
            program: self.program,
            status: self.program_status(),
            uniforms: self.active_uniforms(),
            attributes: self.active_attributes(),
            blocks: self.uniform_blocks(),
        }
    }
}

/// Full diagnostic snapshot of a program
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramReport {
    pub program: ProgramHandle,
    pub status: ProgramStatus,
    pub uniforms: Vec<ActiveResourceDescriptor>,
    pub attributes: Vec<ActiveResourceDescriptor>,
    pub blocks: Vec<UniformBlockDescriptor>,
}

impl fmt::Display for ResourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceLocation::Uniform(location) => write!(f, "{}", location.raw()),
            ResourceLocation::Attribute(location) => write!(f, "{}", location.raw()),
        }
    }
}

fn write_descriptor(f: &mut fmt::Formatter<'_>, kind: &str, descriptor: &ActiveResourceDescriptor) -> fmt::Result {
    let indent = if descriptor.element.is_some() { "  " } else { "" };
    write!(
        f,
        "{}{}[{}]: {}, type: {}, size: {}",
        indent,
        kind,
        descriptor.index,
        descriptor.name,
        descriptor.resource_type.label(),
        descriptor.array_size
    )?;
    if let Some(location) = descriptor.location {
        write!(f, ", location: {}", location)?;
    }
    if let Some(block) = descriptor.block {
        write!(
            f,
            ", block: {}, offset: {}, array_stride: {}, matrix_stride: {}, row_major: {}",
            block.block_index, block.offset, block.array_stride, block.matrix_stride, block.row_major
        )?;
    }
    writeln!(f)
}

impl fmt::Display for ProgramReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "program: {}", self.program)?;
        write!(f, "{}", self.status)?;
        for attribute in &self.attributes {
            write_descriptor(f, "attribute", attribute)?;
        }
        for uniform in &self.uniforms {
            write_descriptor(f, "uniform", uniform)?;
        }
        for block in &self.blocks {
            writeln!(
                f,
                "uniform_block[{}]: {}, binding: {}, data_size: {}, active_uniforms: {:?}, stages: {:?}",
                block.index,
                block.name,
                block.binding,
                block.data_size,
                block.member_indices,
                block.referenced_by
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "reflector_tests.rs"]
mod tests;
