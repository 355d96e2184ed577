/// Device module - the seam between the core and the GL driver

pub mod gl_device;

pub use gl_device::*;

// Mock device for tests (no GPU required)
#[cfg(test)]
pub mod mock_device;
