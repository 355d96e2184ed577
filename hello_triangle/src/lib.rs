/*!
# Hello Triangle

Shader program lifecycle and reflection for an OpenGL ES 3 "hello triangle".

The core is backend-agnostic: every driver call goes through the `GlDevice`
trait, implemented for real contexts by `hello_triangle_renderer_gles` and by
a mock device in this crate's tests.

## Architecture

- **compiler**: one GLSL source string → one compiled shader object
- **linker**: vertex + fragment stage → one linked program object
- **reflector**: read-only introspection of a linked program
- **program**: `ProgramManager`, the lifecycle state machine that drives
  the steps above and releases GPU objects on shutdown

All diagnostics (driver logs, reflection reports) go through the
`Diagnostics` stream and its pluggable `Logger`.
*/

// Internal modules
mod error;
mod diagnostics;
pub mod log;
pub mod handle;
pub mod gl_types;
pub mod status;
pub mod device;
pub mod compiler;
pub mod linker;
pub mod reflector;
pub mod config;
pub mod program;
pub mod sources;

// Main triangle namespace module
pub mod triangle {
    // Error types
    pub use crate::error::{Error, InitStage, Result};

    // Diagnostic stream
    pub use crate::diagnostics::Diagnostics;

    // Lifecycle manager
    pub use crate::config::ProgramConfig;
    pub use crate::program::{ProgramManager, ProgramState};

    // Device abstraction and typed handles
    pub use crate::device::{ActiveVariable, GlDevice};
    pub use crate::handle::{AttributeLocation, ProgramHandle, ShaderHandle, UniformLocation};

    // Pipeline steps
    pub use crate::compiler::{compile, CompiledStage, ShaderSource, ShaderStage};
    pub use crate::linker::{link, LinkFailure, LinkedProgram};
    pub use crate::reflector::{
        ActiveResourceDescriptor, BlockMembership, ProgramReport, Reflector, ResourceLocation,
        StageFlags, UniformBlockDescriptor,
    };
    pub use crate::status::{ProgramParameter, ProgramStatus, StatusValue};
    pub use crate::gl_types::{GlType, ResourceType};

    // Logging sub-module (types only, macros live at the crate root)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
    }

    // Shader text and geometry of the triangle
    pub mod sources {
        pub use crate::sources::*;
    }
}

// Re-export math library at crate root
pub use glam;
