/// GL enum constants and the closed uniform/attribute type table
///
/// The core never links against GL headers; the handful of enum values it
/// needs are spelled out here. `TYPE_TABLE` is the only lookup from a raw
/// type enum to a label. It is immutable process-wide data.

// ===== SHADER / PROGRAM ENUMS =====

pub const GL_FRAGMENT_SHADER: u32 = 0x8B30;
pub const GL_VERTEX_SHADER: u32 = 0x8B31;
pub const GL_SHADER_TYPE: u32 = 0x8B4F;
pub const GL_DELETE_STATUS: u32 = 0x8B80;
pub const GL_COMPILE_STATUS: u32 = 0x8B81;
pub const GL_LINK_STATUS: u32 = 0x8B82;
pub const GL_VALIDATE_STATUS: u32 = 0x8B83;
pub const GL_INFO_LOG_LENGTH: u32 = 0x8B84;
pub const GL_ATTACHED_SHADERS: u32 = 0x8B85;
pub const GL_ACTIVE_UNIFORMS: u32 = 0x8B86;
pub const GL_ACTIVE_UNIFORM_MAX_LENGTH: u32 = 0x8B87;
pub const GL_ACTIVE_ATTRIBUTES: u32 = 0x8B89;
pub const GL_ACTIVE_ATTRIBUTE_MAX_LENGTH: u32 = 0x8B8A;
pub const GL_ACTIVE_UNIFORM_BLOCKS: u32 = 0x8A36;
pub const GL_ACTIVE_UNIFORM_BLOCK_MAX_NAME_LENGTH: u32 = 0x8A35;
pub const GL_PROGRAM_BINARY_RETRIEVABLE_HINT: u32 = 0x8257;
pub const GL_PROGRAM_BINARY_LENGTH: u32 = 0x8741;
pub const GL_NUM_PROGRAM_BINARY_FORMATS: u32 = 0x87FE;
pub const GL_PROGRAM_BINARY_FORMATS: u32 = 0x87FF;
pub const GL_TRANSFORM_FEEDBACK_BUFFER_MODE: u32 = 0x8C7F;
pub const GL_TRANSFORM_FEEDBACK_VARYINGS: u32 = 0x8C83;
pub const GL_TRANSFORM_FEEDBACK_VARYING_MAX_LENGTH: u32 = 0x8C76;
pub const GL_INTERLEAVED_ATTRIBS: u32 = 0x8C8C;
pub const GL_SEPARATE_ATTRIBS: u32 = 0x8C8D;

// ===== UNIFORM / UNIFORM BLOCK QUERIES =====

pub const GL_UNIFORM_TYPE: u32 = 0x8A37;
pub const GL_UNIFORM_SIZE: u32 = 0x8A38;
pub const GL_UNIFORM_NAME_LENGTH: u32 = 0x8A39;
pub const GL_UNIFORM_BLOCK_INDEX: u32 = 0x8A3A;
pub const GL_UNIFORM_OFFSET: u32 = 0x8A3B;
pub const GL_UNIFORM_ARRAY_STRIDE: u32 = 0x8A3C;
pub const GL_UNIFORM_MATRIX_STRIDE: u32 = 0x8A3D;
pub const GL_UNIFORM_IS_ROW_MAJOR: u32 = 0x8A3E;
pub const GL_UNIFORM_BLOCK_BINDING: u32 = 0x8A3F;
pub const GL_UNIFORM_BLOCK_DATA_SIZE: u32 = 0x8A40;
pub const GL_UNIFORM_BLOCK_NAME_LENGTH: u32 = 0x8A41;
pub const GL_UNIFORM_BLOCK_ACTIVE_UNIFORMS: u32 = 0x8A42;
pub const GL_UNIFORM_BLOCK_ACTIVE_UNIFORM_INDICES: u32 = 0x8A43;
pub const GL_UNIFORM_BLOCK_REFERENCED_BY_VERTEX_SHADER: u32 = 0x8A44;
pub const GL_UNIFORM_BLOCK_REFERENCED_BY_FRAGMENT_SHADER: u32 = 0x8A46;

/// Returned by uniform index queries for names that are not active
pub const GL_INVALID_INDEX: u32 = 0xFFFF_FFFF;

/// Context query for the program installed by glUseProgram
pub const GL_CURRENT_PROGRAM: u32 = 0x8B8D;

// ===== TYPE TABLE =====

/// Every uniform/attribute type a GLES 3.1 driver can report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(non_camel_case_types)]
pub enum GlType {
    Float,
    FloatVec2,
    FloatVec3,
    FloatVec4,
    Int,
    IntVec2,
    IntVec3,
    IntVec4,
    UnsignedInt,
    UnsignedIntVec2,
    UnsignedIntVec3,
    UnsignedIntVec4,
    Bool,
    BoolVec2,
    BoolVec3,
    BoolVec4,
    FloatMat2,
    FloatMat3,
    FloatMat4,
    FloatMat2x3,
    FloatMat2x4,
    FloatMat3x2,
    FloatMat3x4,
    FloatMat4x2,
    FloatMat4x3,
    Sampler2D,
    Sampler3D,
    SamplerCube,
    Sampler2DShadow,
    Sampler2DArray,
    Sampler2DArrayShadow,
    SamplerCubeShadow,
    Sampler2DMultisample,
    IntSampler2D,
    IntSampler3D,
    IntSamplerCube,
    IntSampler2DArray,
    IntSampler2DMultisample,
    UnsignedIntSampler2D,
    UnsignedIntSampler3D,
    UnsignedIntSamplerCube,
    UnsignedIntSampler2DArray,
    UnsignedIntSampler2DMultisample,
    Image2D,
    Image3D,
    ImageCube,
    Image2DArray,
    IntImage2D,
    IntImage3D,
    IntImageCube,
    IntImage2DArray,
    UnsignedIntImage2D,
    UnsignedIntImage3D,
    UnsignedIntImageCube,
    UnsignedIntImage2DArray,
    UnsignedIntAtomicCounter,
}

/// One row of the type table
#[derive(Debug, Clone, Copy)]
pub struct GlTypeInfo {
    pub ty: GlType,
    pub raw: u32,
    pub label: &'static str,
    /// Scalar components per element (0 for opaque types)
    pub components: u32,
}

const fn row(ty: GlType, raw: u32, label: &'static str, components: u32) -> GlTypeInfo {
    GlTypeInfo { ty, raw, label, components }
}

/// Raw enum → type, label, component count
pub static TYPE_TABLE: &[GlTypeInfo] = &[
    row(GlType::Float, 0x1406, "GL_FLOAT", 1),
    row(GlType::FloatVec2, 0x8B50, "GL_FLOAT_VEC2", 2),
    row(GlType::FloatVec3, 0x8B51, "GL_FLOAT_VEC3", 3),
    row(GlType::FloatVec4, 0x8B52, "GL_FLOAT_VEC4", 4),
    row(GlType::Int, 0x1404, "GL_INT", 1),
    row(GlType::IntVec2, 0x8B53, "GL_INT_VEC2", 2),
    row(GlType::IntVec3, 0x8B54, "GL_INT_VEC3", 3),
    row(GlType::IntVec4, 0x8B55, "GL_INT_VEC4", 4),
    row(GlType::UnsignedInt, 0x1405, "GL_UNSIGNED_INT", 1),
    row(GlType::UnsignedIntVec2, 0x8DC6, "GL_UNSIGNED_INT_VEC2", 2),
    row(GlType::UnsignedIntVec3, 0x8DC7, "GL_UNSIGNED_INT_VEC3", 3),
    row(GlType::UnsignedIntVec4, 0x8DC8, "GL_UNSIGNED_INT_VEC4", 4),
    row(GlType::Bool, 0x8B56, "GL_BOOL", 1),
    row(GlType::BoolVec2, 0x8B57, "GL_BOOL_VEC2", 2),
    row(GlType::BoolVec3, 0x8B58, "GL_BOOL_VEC3", 3),
    row(GlType::BoolVec4, 0x8B59, "GL_BOOL_VEC4", 4),
    row(GlType::FloatMat2, 0x8B5A, "GL_FLOAT_MAT2", 4),
    row(GlType::FloatMat3, 0x8B5B, "GL_FLOAT_MAT3", 9),
    row(GlType::FloatMat4, 0x8B5C, "GL_FLOAT_MAT4", 16),
    row(GlType::FloatMat2x3, 0x8B65, "GL_FLOAT_MAT2x3", 6),
    row(GlType::FloatMat2x4, 0x8B66, "GL_FLOAT_MAT2x4", 8),
    row(GlType::FloatMat3x2, 0x8B67, "GL_FLOAT_MAT3x2", 6),
    row(GlType::FloatMat3x4, 0x8B68, "GL_FLOAT_MAT3x4", 12),
    row(GlType::FloatMat4x2, 0x8B69, "GL_FLOAT_MAT4x2", 8),
    row(GlType::FloatMat4x3, 0x8B6A, "GL_FLOAT_MAT4x3", 12),
    row(GlType::Sampler2D, 0x8B5E, "GL_SAMPLER_2D", 0),
    row(GlType::Sampler3D, 0x8B5F, "GL_SAMPLER_3D", 0),
    row(GlType::SamplerCube, 0x8B60, "GL_SAMPLER_CUBE", 0),
    row(GlType::Sampler2DShadow, 0x8B62, "GL_SAMPLER_2D_SHADOW", 0),
    row(GlType::Sampler2DArray, 0x8DC1, "GL_SAMPLER_2D_ARRAY", 0),
    row(GlType::Sampler2DArrayShadow, 0x8DC4, "GL_SAMPLER_2D_ARRAY_SHADOW", 0),
    row(GlType::SamplerCubeShadow, 0x8DC5, "GL_SAMPLER_CUBE_SHADOW", 0),
    row(GlType::Sampler2DMultisample, 0x9108, "GL_SAMPLER_2D_MULTISAMPLE", 0),
    row(GlType::IntSampler2D, 0x8DCA, "GL_INT_SAMPLER_2D", 0),
    row(GlType::IntSampler3D, 0x8DCB, "GL_INT_SAMPLER_3D", 0),
    row(GlType::IntSamplerCube, 0x8DCC, "GL_INT_SAMPLER_CUBE", 0),
    row(GlType::IntSampler2DArray, 0x8DCF, "GL_INT_SAMPLER_2D_ARRAY", 0),
    row(GlType::IntSampler2DMultisample, 0x9109, "GL_INT_SAMPLER_2D_MULTISAMPLE", 0),
    row(GlType::UnsignedIntSampler2D, 0x8DD2, "GL_UNSIGNED_INT_SAMPLER_2D", 0),
    row(GlType::UnsignedIntSampler3D, 0x8DD3, "GL_UNSIGNED_INT_SAMPLER_3D", 0),
    row(GlType::UnsignedIntSamplerCube, 0x8DD4, "GL_UNSIGNED_INT_SAMPLER_CUBE", 0),
    row(GlType::UnsignedIntSampler2DArray, 0x8DD7, "GL_UNSIGNED_INT_SAMPLER_2D_ARRAY", 0),
    row(GlType::UnsignedIntSampler2DMultisample, 0x910A, "GL_UNSIGNED_INT_SAMPLER_2D_MULTISAMPLE", 0),
    row(GlType::Image2D, 0x904D, "GL_IMAGE_2D", 0),
    row(GlType::Image3D, 0x904E, "GL_IMAGE_3D", 0),
    row(GlType::ImageCube, 0x9050, "GL_IMAGE_CUBE", 0),
    row(GlType::Image2DArray, 0x9053, "GL_IMAGE_2D_ARRAY", 0),
    row(GlType::IntImage2D, 0x9058, "GL_INT_IMAGE_2D", 0),
    row(GlType::IntImage3D, 0x9059, "GL_INT_IMAGE_3D", 0),
    row(GlType::IntImageCube, 0x905B, "GL_INT_IMAGE_CUBE", 0),
    row(GlType::IntImage2DArray, 0x905E, "GL_INT_IMAGE_2D_ARRAY", 0),
    row(GlType::UnsignedIntImage2D, 0x9063, "GL_UNSIGNED_INT_IMAGE_2D", 0),
    row(GlType::UnsignedIntImage3D, 0x9064, "GL_UNSIGNED_INT_IMAGE_3D", 0),
    row(GlType::UnsignedIntImageCube, 0x9066, "GL_UNSIGNED_INT_IMAGE_CUBE", 0),
    row(GlType::UnsignedIntImage2DArray, 0x9069, "GL_UNSIGNED_INT_IMAGE_2D_ARRAY", 0),
    row(GlType::UnsignedIntAtomicCounter, 0x92DB, "GL_UNSIGNED_INT_ATOMIC_COUNTER", 0),
];

impl GlType {
    /// Table row for this type
    pub fn info(&self) -> &'static GlTypeInfo {
        // Every variant has exactly one row
        TYPE_TABLE
            .iter()
            .find(|info| info.ty == *self)
            .unwrap_or(&TYPE_TABLE[0])
    }

    /// Raw GL enum
    pub fn raw(&self) -> u32 {
        self.info().raw
    }

    /// `GL_*` label
    pub fn label(&self) -> &'static str {
        self.info().label
    }

    /// Samplers, images and atomic counters carry no component data
    pub fn is_opaque(&self) -> bool {
        self.info().components == 0
    }

    /// Matrix types (the only ones with a meaningful matrix stride)
    pub fn is_matrix(&self) -> bool {
        matches!(
            self,
            GlType::FloatMat2
                | GlType::FloatMat3
                | GlType::FloatMat4
                | GlType::FloatMat2x3
                | GlType::FloatMat2x4
                | GlType::FloatMat3x2
                | GlType::FloatMat3x4
                | GlType::FloatMat4x2
                | GlType::FloatMat4x3
        )
    }
}

/// Driver-reported type: a known table entry or the raw value it came with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceType {
    Known(GlType),
    Unknown(u32),
}

impl ResourceType {
    /// Map a raw type enum through `TYPE_TABLE`
    pub fn from_raw(raw: u32) -> Self {
        TYPE_TABLE
            .iter()
            .find(|info| info.raw == raw)
            .map(|info| ResourceType::Known(info.ty))
            .unwrap_or(ResourceType::Unknown(raw))
    }

    /// Raw enum as reported by the driver
    pub fn raw(&self) -> u32 {
        match self {
            ResourceType::Known(ty) => ty.raw(),
            ResourceType::Unknown(raw) => *raw,
        }
    }

    /// Human-readable label; unknown types keep their raw value visible
    pub fn label(&self) -> String {
        match self {
            ResourceType::Known(ty) => ty.label().to_string(),
            ResourceType::Unknown(raw) => format!("Unknown(0x{:04X})", raw),
        }
    }

    pub fn known(&self) -> Option<GlType> {
        match self {
            ResourceType::Known(ty) => Some(*ty),
            ResourceType::Unknown(_) => None,
        }
    }
}

#[cfg(test)]
#[path = "gl_types_tests.rs"]
mod tests;
