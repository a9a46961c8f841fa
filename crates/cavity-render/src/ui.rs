// egui control strip: the two cavity sliders plus a readout line.

use cavity_core::constants::saturation_radiation_density;
use cavity_core::{CavityParams, SpectralModel};

/// Derived cavity figures shown under the sliders.
#[derive(Debug, Clone, Copy)]
pub struct Readout {
    pub fsr_mhz: f64,
    pub finesse: f64,
    pub linewidth_mhz: f64,
    /// Longitudinal modes inside the gain FWHM.
    pub modes: u64,
    /// Saturation radiation density at line centre.
    pub saturation_density: f64,
}

impl Readout {
    pub fn new(params: &CavityParams, model: &SpectralModel) -> Self {
        let cavity = params.cavity();
        let center = model.center_frequency();
        Self {
            fsr_mhz: cavity.free_spectral_range() / 1e6,
            finesse: cavity.finesse(),
            linewidth_mhz: cavity.resonance_linewidth() / 1e6,
            modes: cavity.modes_within(center, model.gain_profile().fwhm() / 2.0),
            saturation_density: saturation_radiation_density(center),
        }
    }
}

/// Responses of the two sliders from the last drawn frame.
pub struct Controls {
    pub length: egui::Response,
    pub reflectivity: egui::Response,
}

impl Controls {
    /// `true` if either slider moved this frame.
    pub fn changed(&self) -> bool {
        self.length.changed() || self.reflectivity.changed()
    }
}

/// Draw the bottom control panel.
pub fn draw_controls(
    ctx: &egui::Context,
    params: &mut CavityParams,
    readout: &Readout,
) -> Controls {
    egui::TopBottomPanel::bottom("controls")
        .resizable(false)
        .show(ctx, |ui| {
            ui.add_space(6.0);
            ui.spacing_mut().slider_width = (ui.available_width() - 180.0).max(100.0);

            let length = ui.add(
                egui::Slider::new(&mut params.length, CavityParams::LENGTH_RANGE)
                    .text("Cavity length"),
            );
            let reflectivity = ui.add(
                egui::Slider::new(&mut params.reflectivity, CavityParams::REFLECTIVITY_RANGE)
                    .text("Reflectivity"),
            );

            ui.separator();
            ui.horizontal(|ui| {
                ui.label(format!("FSR {:.1} MHz", readout.fsr_mhz));
                ui.separator();
                ui.label(format!("Finesse {:.1}", readout.finesse));
                ui.separator();
                ui.label(format!("Linewidth {:.2} MHz", readout.linewidth_mhz));
                ui.separator();
                ui.label(format!("Modes in gain FWHM: {}", readout.modes));
                ui.separator();
                ui.label(format!("Ws = {:.3e}", readout.saturation_density));
            });
            ui.add_space(4.0);

            Controls {
                length,
                reflectivity,
            }
        })
        .inner
}
