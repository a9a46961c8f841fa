pub mod app;
pub mod error;
pub mod fallback;
pub mod plot_view;
pub mod renderer;
pub mod ui;
pub mod view;

use app::App;
use winit::event_loop::{ControlFlow, EventLoop};

pub use error::{LaunchError, RenderError};

pub const TITLE: &str = "HeNe Fabry-Perot Cavity";

/// Initial window size in logical pixels.
pub const INITIAL_SIZE: [f32; 2] = [960.0, 720.0];

/// Open the window and block until it is closed.
///
/// Uses the Vulkan renderer when a device is available, otherwise eframe's
/// built-in one. Fails only if neither can put a window on screen.
pub fn run() -> Result<(), LaunchError> {
    match renderer::probe() {
        Ok(device) => {
            log::info!("Vulkan backend available on {device}");
            run_vulkan()
        }
        Err(vulkan) => {
            log::warn!("Vulkan backend unavailable ({vulkan}), falling back to eframe");
            fallback::run().map_err(|e| LaunchError::NoBackend {
                vulkan,
                fallback: e.to_string(),
            })
        }
    }
}

fn run_vulkan() -> Result<(), LaunchError> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = App::new();
    event_loop.run_app(&mut app)?;
    app.into_result()
}
