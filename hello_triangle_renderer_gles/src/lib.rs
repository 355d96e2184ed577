/*!
# Hello Triangle - OpenGL ES Backend

OpenGL ES 3 implementation of the hello_triangle `GlDevice` trait, using
glow for the GL bindings.

The crate does not create windows or contexts. Hand it the GL loader of a
context that is already current (from glutin, SDL, EGL, ...) and it
compiles, links, reflects and draws the triangle.
*/

mod gles_device;
mod program_queries;
mod triangle_renderer;
mod triangle_app;

pub use gles_device::GlesDevice;
pub use triangle_renderer::TriangleRenderer;
pub use triangle_app::TriangleApp;
