// Minimal display path: eframe's own window and renderer.

use crate::view::CavityView;
use crate::{INITIAL_SIZE, TITLE};

pub struct FallbackApp {
    view: CavityView,
}

impl FallbackApp {
    pub fn new() -> Self {
        Self {
            view: CavityView::new(),
        }
    }
}

impl eframe::App for FallbackApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.view.show(ctx) {
            ctx.request_repaint();
        }
    }
}

/// Run the view under eframe until the window closes.
pub fn run() -> eframe::Result<()> {
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(TITLE)
            .with_inner_size(INITIAL_SIZE),
        ..Default::default()
    };
    eframe::run_native(
        TITLE,
        native_options,
        Box::new(|_cc| Ok(Box::new(FallbackApp::new()))),
    )
}
