/// TriangleRenderer - vertex data and the per-frame draw

use glam::Vec4;
use glow::HasContext;
use hello_triangle::triangle::sources::{triangle_vertex_bytes, CLEAR_COLOR, POSITION_ATTRIBUTE, TRIANGLE_COLOR};
use hello_triangle::triangle::{ProgramHandle, Result, UniformLocation};
use hello_triangle::{tri_debug, tri_err};

use crate::gles_device::{native_uniform_location, GlesDevice};

/// Vertices in `TRIANGLE_VERTICES`
const VERTEX_COUNT: i32 = 3;

/// Owns the triangle's vertex array and buffer
///
/// Holds only the program handle; the program itself belongs to the
/// `ProgramManager`.
pub struct TriangleRenderer {
    vertex_array: glow::NativeVertexArray,
    vertex_buffer: glow::NativeBuffer,
    program: ProgramHandle,
    color_location: Option<UniformLocation>,
    clear_color: Vec4,
    color: Vec4,
}

impl TriangleRenderer {
    /// Upload the triangle and bind it to `POSITION_ATTRIBUTE`
    ///
    /// `color_location` is the location of the optional color uniform;
    /// pass `None` for shaders with a hard-coded color.
    pub fn new(device: &GlesDevice, program: ProgramHandle, color_location: Option<UniformLocation>) -> Result<Self> {
        let gl = device.gl();
        unsafe {
            let vertex_array = gl
                .create_vertex_array()
                .map_err(|e| tri_err!("triangle::gles", "Failed to create vertex array: {}", e))?;
            let vertex_buffer = match gl.create_buffer() {
                Ok(buffer) => buffer,
                Err(e) => {
                    gl.delete_vertex_array(vertex_array);
                    return Err(tri_err!("triangle::gles", "Failed to create vertex buffer: {}", e));
                }
            };

            gl.bind_vertex_array(Some(vertex_array));
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(vertex_buffer));
            gl.buffer_data_u8_slice(glow::ARRAY_BUFFER, triangle_vertex_bytes(), glow::STATIC_DRAW);
            gl.vertex_attrib_pointer_f32(POSITION_ATTRIBUTE, 3, glow::FLOAT, false, 0, 0);
            gl.enable_vertex_attrib_array(POSITION_ATTRIBUTE);
            gl.bind_vertex_array(None);
            gl.bind_buffer(glow::ARRAY_BUFFER, None);

            tri_debug!(
                "triangle::gles",
                "Uploaded {} vertices ({} bytes)",
                VERTEX_COUNT,
                triangle_vertex_bytes().len()
            );

            Ok(Self {
                vertex_array,
                vertex_buffer,
                program,
                color_location,
                clear_color: CLEAR_COLOR,
                color: TRIANGLE_COLOR,
            })
        }
    }

    pub fn set_clear_color(&mut self, color: Vec4) {
        self.clear_color = color;
    }

    /// Color written to the color uniform (ignored without one)
    pub fn set_color(&mut self, color: Vec4) {
        self.color = color;
    }

    pub fn program(&self) -> ProgramHandle {
        self.program
    }

    /// Clear the viewport and draw the triangle
    ///
    /// The program must already be current (`ProgramManager::bind`).
    pub fn draw_frame(&self, device: &GlesDevice, width: u32, height: u32) {
        let gl = device.gl();
        unsafe {
            gl.viewport(0, 0, width as i32, height as i32);
            gl.clear_color(self.clear_color.x, self.clear_color.y, self.clear_color.z, self.clear_color.w);
            gl.clear(glow::COLOR_BUFFER_BIT);

            if let Some(location) = self.color_location {
                gl.uniform_4_f32_slice(Some(&native_uniform_location(location)), &self.color.to_array());
            }

            gl.bind_vertex_array(Some(self.vertex_array));
            gl.draw_arrays(glow::TRIANGLES, 0, VERTEX_COUNT);
            gl.bind_vertex_array(None);
        }
    }

    /// Delete the vertex array and buffer
    pub fn destroy(self, device: &GlesDevice) {
        let gl = device.gl();
        unsafe {
            gl.delete_vertex_array(self.vertex_array);
            gl.delete_buffer(self.vertex_buffer);
        }
        tri_debug!("triangle::gles", "Triangle geometry released");
    }
}
