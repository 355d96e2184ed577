/// Program status flags
///
/// `PROGRAM_PARAMETERS` lists every per-program integer the reflector
/// queries for a status dump, with the way its value is meant to be read.

use std::fmt;

use crate::gl_types::*;

/// How a raw parameter value is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// GL_TRUE / GL_FALSE
    Boolean,
    /// Count or length
    Integer,
    /// Another GL enum
    Enum,
}

/// Per-program parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProgramParameter {
    DeleteStatus,
    LinkStatus,
    ValidateStatus,
    InfoLogLength,
    AttachedShaders,
    ActiveAttributes,
    ActiveAttributeMaxLength,
    ActiveUniforms,
    ActiveUniformMaxLength,
    ActiveUniformBlocks,
    ActiveUniformBlockMaxNameLength,
    BinaryRetrievableHint,
    BinaryLength,
    TransformFeedbackBufferMode,
    TransformFeedbackVaryings,
    TransformFeedbackVaryingMaxLength,
}

/// One row of the parameter table
#[derive(Debug, Clone, Copy)]
pub struct ParameterInfo {
    pub parameter: ProgramParameter,
    pub raw: u32,
    pub label: &'static str,
    pub kind: ValueKind,
}

const fn param(parameter: ProgramParameter, raw: u32, label: &'static str, kind: ValueKind) -> ParameterInfo {
    ParameterInfo { parameter, raw, label, kind }
}

/// Parameters in dump order
pub static PROGRAM_PARAMETERS: &[ParameterInfo] = &[
    param(ProgramParameter::DeleteStatus, GL_DELETE_STATUS, "GL_DELETE_STATUS", ValueKind::Boolean),
    param(ProgramParameter::LinkStatus, GL_LINK_STATUS, "GL_LINK_STATUS", ValueKind::Boolean),
    param(ProgramParameter::ValidateStatus, GL_VALIDATE_STATUS, "GL_VALIDATE_STATUS", ValueKind::Boolean),
    param(ProgramParameter::InfoLogLength, GL_INFO_LOG_LENGTH, "GL_INFO_LOG_LENGTH", ValueKind::Integer),
    param(ProgramParameter::AttachedShaders, GL_ATTACHED_SHADERS, "GL_ATTACHED_SHADERS", ValueKind::Integer),
    param(ProgramParameter::ActiveAttributes, GL_ACTIVE_ATTRIBUTES, "GL_ACTIVE_ATTRIBUTES", ValueKind::Integer),
    param(ProgramParameter::ActiveAttributeMaxLength, GL_ACTIVE_ATTRIBUTE_MAX_LENGTH, "GL_ACTIVE_ATTRIBUTE_MAX_LENGTH", ValueKind::Integer),
    param(ProgramParameter::ActiveUniforms, GL_ACTIVE_UNIFORMS, "GL_ACTIVE_UNIFORMS", ValueKind::Integer),
    param(ProgramParameter::ActiveUniformMaxLength, GL_ACTIVE_UNIFORM_MAX_LENGTH, "GL_ACTIVE_UNIFORM_MAX_LENGTH", ValueKind::Integer),
    param(ProgramParameter::ActiveUniformBlocks, GL_ACTIVE_UNIFORM_BLOCKS, "GL_ACTIVE_UNIFORM_BLOCKS", ValueKind::Integer),
    param(ProgramParameter::ActiveUniformBlockMaxNameLength, GL_ACTIVE_UNIFORM_BLOCK_MAX_NAME_LENGTH, "GL_ACTIVE_UNIFORM_BLOCK_MAX_NAME_LENGTH", ValueKind::Integer),
    param(ProgramParameter::BinaryRetrievableHint, GL_PROGRAM_BINARY_RETRIEVABLE_HINT, "GL_PROGRAM_BINARY_RETRIEVABLE_HINT", ValueKind::Boolean),
    param(ProgramParameter::BinaryLength, GL_PROGRAM_BINARY_LENGTH, "GL_PROGRAM_BINARY_LENGTH", ValueKind::Integer),
    param(ProgramParameter::TransformFeedbackBufferMode, GL_TRANSFORM_FEEDBACK_BUFFER_MODE, "GL_TRANSFORM_FEEDBACK_BUFFER_MODE", ValueKind::Enum),
    param(ProgramParameter::TransformFeedbackVaryings, GL_TRANSFORM_FEEDBACK_VARYINGS, "GL_TRANSFORM_FEEDBACK_VARYINGS", ValueKind::Integer),
    param(ProgramParameter::TransformFeedbackVaryingMaxLength, GL_TRANSFORM_FEEDBACK_VARYING_MAX_LENGTH, "GL_TRANSFORM_FEEDBACK_VARYING_MAX_LENGTH", ValueKind::Integer),
];

impl ProgramParameter {
    pub fn info(&self) -> &'static ParameterInfo {
        PROGRAM_PARAMETERS
            .iter()
            .find(|info| info.parameter == *self)
            .unwrap_or(&PROGRAM_PARAMETERS[0])
    }

    pub fn raw(&self) -> u32 {
        self.info().raw
    }

    pub fn label(&self) -> &'static str {
        self.info().label
    }
}

/// A parameter value read back from the driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusValue {
    Bool(bool),
    Int(i32),
    Enum(u32),
}

impl StatusValue {
    fn from_raw(kind: ValueKind, raw: i32) -> Self {
        match kind {
            ValueKind::Boolean => StatusValue::Bool(raw != 0),
            ValueKind::Integer => StatusValue::Int(raw),
            ValueKind::Enum => StatusValue::Enum(raw as u32),
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            StatusValue::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i32> {
        match self {
            StatusValue::Int(value) => Some(*value),
            _ => None,
        }
    }
}

impl fmt::Display for StatusValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusValue::Bool(true) => write!(f, "GL_TRUE"),
            StatusValue::Bool(false) => write!(f, "GL_FALSE"),
            StatusValue::Int(value) => write!(f, "{}", value),
            StatusValue::Enum(GL_INTERLEAVED_ATTRIBS) => write!(f, "GL_INTERLEAVED_ATTRIBS"),
            StatusValue::Enum(GL_SEPARATE_ATTRIBS) => write!(f, "GL_SEPARATE_ATTRIBS"),
            StatusValue::Enum(raw) => write!(f, "0x{:04X}", raw),
        }
    }
}

/// Snapshot of a program's status flags, in `PROGRAM_PARAMETERS` order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramStatus {
    entries: Vec<(ProgramParameter, StatusValue)>,
    /// Binary formats the context supports (context-wide, not per program)
    pub binary_formats: Vec<i32>,
}

impl ProgramStatus {
    /// Build a snapshot from raw reads, one per table row
    pub fn from_raw_values(
        mut read: impl FnMut(&ParameterInfo) -> i32,
        binary_formats: Vec<i32>,
    ) -> Self {
        let entries = PROGRAM_PARAMETERS
            .iter()
            .map(|info| (info.parameter, StatusValue::from_raw(info.kind, read(info))))
            .collect();
        Self { entries, binary_formats }
    }

    /// Look up a value by `GL_*` label
    pub fn get(&self, label: &str) -> Option<StatusValue> {
        self.entries
            .iter()
            .find(|(parameter, _)| parameter.label() == label)
            .map(|(_, value)| *value)
    }

    pub fn value(&self, parameter: ProgramParameter) -> Option<StatusValue> {
        self.entries
            .iter()
            .find(|(p, _)| *p == parameter)
            .map(|(_, value)| *value)
    }

    /// GL_LINK_STATUS as a bool (false if somehow absent)
    pub fn link_status(&self) -> bool {
        self.value(ProgramParameter::LinkStatus)
            .and_then(|value| value.as_bool())
            .unwrap_or(false)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, StatusValue)> + '_ {
        self.entries.iter().map(|(parameter, value)| (parameter.label(), *value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Display for ProgramStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (label, value) in self.iter() {
            writeln!(f, "{}: {}", label, value)?;
        }
        writeln!(f, "GL_NUM_PROGRAM_BINARY_FORMATS: {}", self.binary_formats.len())?;
        let formats: Vec<String> = self
            .binary_formats
            .iter()
            .map(|format| format!("0x{:04X}", format))
            .collect();
        writeln!(f, "GL_PROGRAM_BINARY_FORMATS: [{}]", formats.join(", "))
    }
}
