use std::f64::consts::PI;

/// Gaussian (Doppler-broadened) gain lineshape of the lasing medium.
#[derive(Debug, Clone, Copy)]
pub struct GainProfile {
    /// Linewidth parameter in Hz.
    pub linewidth: f64,
    /// Peak amplitude `sqrt(π / linewidth)`.
    pub amplitude: f64,
}

impl GainProfile {
    pub fn gaussian(linewidth: f64) -> Self {
        Self {
            linewidth,
            amplitude: (PI / linewidth).sqrt(),
        }
    }

    /// Gain at `detuning` Hz from line centre: `A·exp(-(2Δ/width)²)`.
    pub fn at(&self, detuning: f64) -> f64 {
        let x = 2.0 * detuning / self.linewidth;
        self.amplitude * (-x * x).exp()
    }

    /// Full width at half maximum in Hz: `width·sqrt(ln 2)`.
    pub fn fwhm(&self) -> f64 {
        self.linewidth * std::f64::consts::LN_2.sqrt()
    }

    /// Sample the lineshape over a detuning grid.
    pub fn sample(&self, detuning: &[f64]) -> Vec<f64> {
        detuning.iter().map(|&d| self.at(d)).collect()
    }
}
