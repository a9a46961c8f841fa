// View state shared by both display backends.

use cavity_core::{CavityParams, SpectralModel, Spectrum};

use crate::{plot_view, ui};

/// Axis limits, fixed at start-up so slider moves only change the curve.
///
/// The y range reaches the gain envelope, which no cavity setting can exceed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotBounds {
    pub x: [f64; 2],
    pub y: [f64; 2],
}

impl PlotBounds {
    fn around(wavelengths: &[f64], model: &SpectralModel) -> Self {
        let (x_min, x_max) = wavelengths
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &x| {
                (lo.min(x), hi.max(x))
            });
        let y_max = model.envelope_max();
        let y_max = if y_max > 0.0 { y_max * 1.05 } else { 1.0 };
        Self {
            x: [x_min, x_max],
            y: [0.0, y_max],
        }
    }
}

/// Owns the two slider parameters and the derived spectrum.
pub struct CavityView {
    model: SpectralModel,
    params: CavityParams,
    spectrum: Spectrum,
    /// Wavelength axis in nm; the grid never changes so neither does this.
    wavelengths: Vec<f64>,
    bounds: PlotBounds,
}

impl Default for CavityView {
    fn default() -> Self {
        Self::new()
    }
}

impl CavityView {
    pub fn new() -> Self {
        let model = SpectralModel::hene();
        let params = CavityParams::default();
        let spectrum = model.evaluate(&params);
        let wavelengths = spectrum.wavelengths_nm(model.center_frequency());
        let bounds = PlotBounds::around(&wavelengths, &model);
        Self {
            model,
            params,
            spectrum,
            wavelengths,
            bounds,
        }
    }

    pub fn params(&self) -> CavityParams {
        self.params
    }

    pub fn spectrum(&self) -> &Spectrum {
        &self.spectrum
    }

    pub fn bounds(&self) -> PlotBounds {
        self.bounds
    }

    /// Apply new slider values. Returns `true` if the spectrum was recomputed.
    ///
    /// Invalid values are logged and ignored; the sliders clamp to the valid
    /// ranges so this only guards programmatic callers.
    pub fn set_params(&mut self, params: CavityParams) -> bool {
        if params == self.params {
            return false;
        }
        if let Err(e) = params.validate() {
            log::warn!("ignoring cavity parameters: {e}");
            return false;
        }
        self.params = params;
        self.spectrum = self.model.evaluate(&self.params);
        log::debug!(
            "recomputed spectrum: L = {:.4} m, R = {:.4}",
            params.length,
            params.reflectivity
        );
        true
    }

    /// Curve points as (wavelength nm, intensity).
    pub fn points(&self) -> Vec<[f64; 2]> {
        self.wavelengths
            .iter()
            .zip(&self.spectrum.intensity)
            .map(|(&x, &y)| [x, y])
            .collect()
    }

    /// Draw one frame. Returns `true` if a slider moved, in which case the
    /// caller should request a redraw.
    pub fn show(&mut self, ctx: &egui::Context) -> bool {
        let mut params = self.params;
        let readout = ui::Readout::new(&params, &self.model);

        // Controls go first so the central panel gets the remaining space and
        // the plot already shows the recomputed curve this frame.
        let changed =
            ui::draw_controls(ctx, &mut params, &readout).changed() && self.set_params(params);
        plot_view::draw_spectrum_plot(ctx, self.points(), self.bounds);
        changed
    }
}
