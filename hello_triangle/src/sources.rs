/// Shader text and geometry for the hello-triangle program

use glam::{Vec3, Vec4};

/// Passes the position attribute straight through
pub const TRIANGLE_VERTEX_SHADER: &str = "#version 300 es
layout(location = 0) in vec4 vPosition;
void main()
{
    gl_Position = vPosition;
}
";

/// Solid red
pub const TRIANGLE_FRAGMENT_SHADER: &str = "#version 300 es
precision mediump float;
out vec4 fragColor;
void main()
{
    fragColor = vec4(1.0, 0.0, 0.0, 1.0);
}
";

/// Same as `TRIANGLE_FRAGMENT_SHADER` but with the color as a uniform
pub const COLORED_FRAGMENT_SHADER: &str = "#version 300 es
precision mediump float;
uniform vec4 uColor;
out vec4 fragColor;
void main()
{
    fragColor = uColor;
}
";

/// Attribute location the vertex shader reads positions from
pub const POSITION_ATTRIBUTE: u32 = 0;

/// Name of the color uniform in `COLORED_FRAGMENT_SHADER`
pub const COLOR_UNIFORM: &str = "uColor";

/// Clip-space triangle
pub static TRIANGLE_VERTICES: [Vec3; 3] = [
    Vec3::new(0.0, 0.5, 0.0),
    Vec3::new(-0.5, -0.5, 0.0),
    Vec3::new(0.5, -0.5, 0.0),
];

pub const TRIANGLE_COLOR: Vec4 = Vec4::new(1.0, 0.0, 0.0, 1.0);

/// Background color the renderer clears to
pub const CLEAR_COLOR: Vec4 = Vec4::new(1.0, 1.0, 1.0, 0.0);

/// `TRIANGLE_VERTICES` as tightly packed bytes for a vertex buffer upload
pub fn triangle_vertex_bytes() -> &'static [u8] {
    bytemuck::cast_slice(&TRIANGLE_VERTICES)
}
