// ApplicationHandler, event loop, state orchestration.

use std::cell::Cell;

use egui_winit_vulkano::{Gui, GuiConfig};
use vulkano::sync::GpuFuture;
use winit::{
    application::ApplicationHandler, event::WindowEvent, event_loop::ActiveEventLoop,
    window::WindowId,
};

use crate::error::{LaunchError, RenderError};
use crate::{renderer::Renderer, view::CavityView};

pub struct App {
    renderer: Option<Renderer>,
    gui: Option<Gui>,
    view: CavityView,
    /// Set if the renderer could not be created; reported after the loop exits.
    failure: Option<RenderError>,
}

impl App {
    pub fn new() -> Self {
        Self {
            renderer: None,
            gui: None,
            view: CavityView::new(),
            failure: None,
        }
    }

    /// Outcome of the event loop once it has returned.
    pub fn into_result(self) -> Result<(), LaunchError> {
        match self.failure {
            Some(e) => Err(e.into()),
            None => Ok(()),
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.renderer.is_some() {
            return;
        }

        let renderer = match Renderer::new(event_loop) {
            Ok(r) => r,
            Err(e) => {
                log::error!("failed to initialise Vulkan renderer: {e}");
                self.failure = Some(e);
                event_loop.exit();
                return;
            }
        };

        let gui = Gui::new(
            event_loop,
            renderer.surface.clone(),
            renderer.queue.clone(),
            renderer.swapchain_format(),
            GuiConfig {
                is_overlay: false,
                ..Default::default()
            },
        );

        // Request the very first frame.
        renderer.window.request_redraw();

        self.renderer = Some(renderer);
        self.gui = Some(gui);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        // Let egui process the event first.
        if let Some(gui) = self.gui.as_mut() {
            gui.update(&event);
        }

        match event {
            WindowEvent::CloseRequested => {
                log::info!("window closed");
                event_loop.exit();
            }
            WindowEvent::Resized(_) => {
                if let Some(renderer) = self.renderer.as_mut() {
                    renderer.recreate_swapchain = true;
                }
            }
            WindowEvent::RedrawRequested => {
                self.render_frame();
                return; // already rendering, no need to request another redraw
            }
            _ => {}
        }

        // Any input / resize event means egui state may have changed, so repaint.
        if let Some(renderer) = self.renderer.as_ref() {
            renderer.window.request_redraw();
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        // Only repaint in response to window events so the loop sleeps when idle.
    }
}

impl App {
    fn render_frame(&mut self) {
        let (Some(renderer), Some(gui)) = (self.renderer.as_mut(), self.gui.as_mut()) else {
            return;
        };

        let (image_index, acquire_future) = match renderer.begin_frame() {
            Some(r) => r,
            None => return,
        };

        let before_future = renderer.take_previous_frame_end().join(acquire_future);

        // Run the egui immediate-mode UI; the view recomputes on slider moves.
        let changed = Cell::new(false);
        {
            let view = &mut self.view;
            gui.immediate_ui(|gui| {
                let ctx = gui.context();
                changed.set(view.show(&ctx));
            });
        }

        // Draw egui onto the swapchain image and present.
        let image_view = renderer.image_views[image_index as usize].clone();
        let after_future = gui.draw_on_image(before_future, image_view);
        let final_future = renderer.present(after_future, image_index);
        renderer.end_frame(final_future);

        if changed.get() {
            renderer.window.request_redraw();
        }
    }
}
