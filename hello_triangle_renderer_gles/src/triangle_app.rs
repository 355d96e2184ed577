/// TriangleApp - init / draw / shutdown around one GL context

use hello_triangle::triangle::sources::{COLOR_UNIFORM, TRIANGLE_FRAGMENT_SHADER, TRIANGLE_VERTEX_SHADER};
use hello_triangle::triangle::{Error, ProgramConfig, ProgramManager, ProgramState, Result};
use hello_triangle::{tri_info, tri_warn};

use crate::gles_device::GlesDevice;
use crate::triangle_renderer::TriangleRenderer;

/// The whole hello-triangle sample on an existing context
///
/// # Example
///
/// ```no_run
/// # use std::ffi::{c_void, CStr};
/// # fn run(loader: impl FnMut(&CStr) -> *const c_void) -> hello_triangle::triangle::Result<()> {
/// use hello_triangle_renderer_gles::{GlesDevice, TriangleApp};
///
/// let device = unsafe { GlesDevice::from_loader_function_cstr(loader)? };
/// let mut app = TriangleApp::new(device, Default::default())?;
/// app.draw(800, 600)?;
/// app.shutdown();
/// # Ok(())
/// # }
/// ```
pub struct TriangleApp {
    manager: ProgramManager<GlesDevice>,
    renderer: Option<TriangleRenderer>,
}

impl TriangleApp {
    /// Compile, link and activate the triangle program, then upload geometry
    pub fn new(device: GlesDevice, config: ProgramConfig) -> Result<Self> {
        Self::with_sources(device, config, TRIANGLE_VERTEX_SHADER, TRIANGLE_FRAGMENT_SHADER)
    }

    /// Same as `new` with caller-provided shader text
    pub fn with_sources(
        device: GlesDevice,
        config: ProgramConfig,
        vertex_source: &str,
        fragment_source: &str,
    ) -> Result<Self> {
        let mut manager = ProgramManager::new(device, config);
        let program = manager.initialize(vertex_source, fragment_source)?;

        let color_location = manager.uniform_location(program, COLOR_UNIFORM);
        let renderer = match TriangleRenderer::new(manager.device(), program, color_location) {
            Ok(renderer) => renderer,
            Err(e) => {
                manager.shutdown();
                return Err(e);
            }
        };

        tri_info!("triangle::app", "Hello Triangle ready (program {})", program);
        Ok(Self { manager, renderer: Some(renderer) })
    }

    /// Draw one frame into a `width` x `height` viewport
    ///
    /// Binds through the manager so it always knows the program is current.
    pub fn draw(&mut self, width: u32, height: u32) -> Result<()> {
        match (&self.renderer, self.manager.state()) {
            (Some(renderer), ProgramState::Active) => {
                self.manager.bind()?;
                renderer.draw_frame(self.manager.device(), width, height);
                Ok(())
            }
            (_, state) => Err(Error::InvalidState(format!("cannot draw in state {}", state))),
        }
    }

    pub fn manager(&self) -> &ProgramManager<GlesDevice> {
        &self.manager
    }

    pub fn manager_mut(&mut self) -> &mut ProgramManager<GlesDevice> {
        &mut self.manager
    }

    pub fn renderer_mut(&mut self) -> Option<&mut TriangleRenderer> {
        self.renderer.as_mut()
    }

    /// Release geometry and program; safe to call more than once
    pub fn shutdown(&mut self) {
        if let Some(renderer) = self.renderer.take() {
            renderer.destroy(self.manager.device());
        }
        self.manager.shutdown();
    }
}

impl Drop for TriangleApp {
    fn drop(&mut self) {
        if self.renderer.is_some() {
            tri_warn!("triangle::app", "TriangleApp dropped without shutdown");
        }
    }
}
