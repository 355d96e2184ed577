/// Typed handles for driver objects
///
/// Driver objects are plain integers on the wire. Each kind gets its own
/// type so a shader name can never be passed where a program name is
/// expected, and a uniform location never mixes with an attribute location.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::num::NonZeroU32;

/// Tag for shader objects
#[derive(Debug)]
pub enum ShaderObject {}

/// Tag for program objects
#[derive(Debug)]
pub enum ProgramObject {}

/// Non-null driver object name tagged with its object kind
pub struct Handle<T> {
    raw: NonZeroU32,
    _kind: PhantomData<fn() -> T>,
}

/// Shader object handle
pub type ShaderHandle = Handle<ShaderObject>;

/// Program object handle; the value handed to the renderer
pub type ProgramHandle = Handle<ProgramObject>;

impl<T> Handle<T> {
    /// Wrap a raw object name; `None` for the null object (0)
    pub fn from_raw(raw: u32) -> Option<Self> {
        NonZeroU32::new(raw).map(Self::new)
    }

    /// Wrap a non-null object name
    pub fn new(raw: NonZeroU32) -> Self {
        Self { raw, _kind: PhantomData }
    }

    /// Raw object name as the driver knows it
    pub fn raw(&self) -> u32 {
        self.raw.get()
    }

    /// Raw object name as `NonZeroU32`
    pub fn raw_non_zero(&self) -> NonZeroU32 {
        self.raw
    }
}

impl<T> Clone for Handle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Handle<T> {}

impl<T> PartialEq for Handle<T> {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl<T> Eq for Handle<T> {}

impl<T> Hash for Handle<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.raw.hash(state);
    }
}

impl fmt::Debug for Handle<ShaderObject> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Shader({})", self.raw)
    }
}

impl fmt::Debug for Handle<ProgramObject> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Program({})", self.raw)
    }
}

impl<T> fmt::Display for Handle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

/// Location of a default-block uniform (always non-negative)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UniformLocation(i32);

impl UniformLocation {
    /// Wrap a raw location; `None` for the driver's -1 "not found" value
    pub fn from_raw(raw: i32) -> Option<Self> {
        (raw >= 0).then_some(Self(raw))
    }

    /// Raw location for upload calls
    pub fn raw(&self) -> i32 {
        self.0
    }
}

/// Location of a vertex attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AttributeLocation(u32);

impl AttributeLocation {
    /// Wrap a raw location; `None` for the driver's -1 "not found" value
    pub fn from_raw(raw: i32) -> Option<Self> {
        u32::try_from(raw).ok().map(Self)
    }

    /// Raw location for vertex attribute pointer calls
    pub fn raw(&self) -> u32 {
        self.0
    }
}
