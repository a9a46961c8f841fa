// Transmitted spectrum via egui_plot.

use egui_plot::{Line, Plot};

use crate::view::PlotBounds;

/// Draw the spectrum in the central panel.
///
/// `bounds` always contains the curve (it is sized from the gain envelope),
/// so auto-bounds settle on it and the axes stay put while the data changes.
pub fn draw_spectrum_plot(ctx: &egui::Context, points: Vec<[f64; 2]>, bounds: PlotBounds) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let line = Line::new(points)
            .color(egui::Color32::RED)
            .name("Transmitted intensity");

        Plot::new("spectrum_plot")
            .x_axis_label("Wavelength (nm)")
            .y_axis_label("Intensity (arb. units)")
            .include_x(bounds.x[0])
            .include_x(bounds.x[1])
            .include_y(bounds.y[0])
            .include_y(bounds.y[1])
            .show(ui, |plot_ui| {
                plot_ui.line(line);
            });
    });
}
