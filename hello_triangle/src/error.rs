//! Error types for the shader program core
//!
//! Every fallible operation (compile, link, initialize, reflect) returns
//! `Result<T>` with the single `Error` enum below. Driver diagnostics are
//! carried verbatim in the `log` fields.

use std::fmt;

use crate::compiler::ShaderStage;

/// Result type for shader program operations
pub type Result<T> = std::result::Result<T, Error>;

/// Step of `ProgramManager::initialize` that produced an `InitFailed` error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitStage {
    /// Vertex stage compilation
    Vertex,
    /// Fragment stage compilation
    Fragment,
    /// Program link
    Link,
}

impl fmt::Display for InitStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InitStage::Vertex => write!(f, "vertex"),
            InitStage::Fragment => write!(f, "fragment"),
            InitStage::Link => write!(f, "link"),
        }
    }
}

impl From<ShaderStage> for InitStage {
    fn from(stage: ShaderStage) -> Self {
        match stage {
            ShaderStage::Vertex => InitStage::Vertex,
            ShaderStage::Fragment => InitStage::Fragment,
        }
    }
}

/// Shader program errors
#[derive(Debug, Clone)]
pub enum Error {
    /// The driver rejected a shader stage (log is the driver's info log)
    CompileFailed { stage: ShaderStage, log: String },

    /// The driver rejected the program link, or the stages were mismatched
    LinkFailed { log: String },

    /// `initialize` failed at `stage`; carries the failing step's log
    InitFailed { stage: InitStage, log: String },

    /// No current rendering context (fatal for the whole session)
    ContextError(String),

    /// Shader source rejected before reaching the driver
    InvalidSource(String),

    /// Operation not allowed in the current program state
    InvalidState(String),

    /// Backend-specific error
    BackendError(String),
}

impl Error {
    /// True when the error invalidates the whole session, not just one attempt
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::ContextError(_))
    }

    /// Driver diagnostic text, if the error carries one
    pub fn diagnostic_log(&self) -> Option<&str> {
        match self {
            Error::CompileFailed { log, .. }
            | Error::LinkFailed { log }
            | Error::InitFailed { log, .. } => Some(log),
            _ => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::CompileFailed { stage, log } => {
                write!(f, "Failed to compile {} shader:\n{}", stage, log)
            }
            Error::LinkFailed { log } => write!(f, "Failed to link program:\n{}", log),
            Error::InitFailed { stage, log } => {
                write!(f, "Initialization failed at {} stage:\n{}", stage, log)
            }
            Error::ContextError(msg) => write!(f, "Context error: {}", msg),
            Error::InvalidSource(msg) => write!(f, "Invalid shader source: {}", msg),
            Error::InvalidState(msg) => write!(f, "Invalid state: {}", msg),
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
