use crate::constants::{
    hene_center_frequency, wavelength_from_frequency, DETUNING_HALF_RANGE, DISPLAY_SCALE,
    GRID_RESOLUTION, HENE_LINEWIDTH,
};
use crate::gain::GainProfile;
use crate::CavityParams;

/// `resolution` evenly spaced detunings from `-half_range` to `+half_range`
/// inclusive.
pub fn detuning_grid(half_range: f64, resolution: usize) -> Vec<f64> {
    match resolution {
        0 => Vec::new(),
        1 => vec![-half_range],
        n => {
            let step = 2.0 * half_range / (n - 1) as f64;
            (0..n).map(|i| -half_range + i as f64 * step).collect()
        }
    }
}

/// Immutable part of the model: the grid and the gain sampled on it.
///
/// Only the cavity transmission depends on the slider values, so the gain
/// lineshape is evaluated once here and reused by every [`evaluate`] call.
///
/// [`evaluate`]: SpectralModel::evaluate
#[derive(Debug, Clone)]
pub struct SpectralModel {
    center_frequency: f64,
    profile: GainProfile,
    detuning: Vec<f64>,
    gain: Vec<f64>,
    display_scale: f64,
}

impl SpectralModel {
    pub fn new(
        center_frequency: f64,
        gain: GainProfile,
        half_range: f64,
        resolution: usize,
        display_scale: f64,
    ) -> Self {
        let detuning = detuning_grid(half_range, resolution);
        Self {
            center_frequency,
            profile: gain,
            gain: gain.sample(&detuning),
            detuning,
            display_scale,
        }
    }

    /// The HeNe 632.8 nm line on a 4096-point, ±4 GHz grid.
    pub fn hene() -> Self {
        Self::new(
            hene_center_frequency(),
            GainProfile::gaussian(HENE_LINEWIDTH),
            DETUNING_HALF_RANGE,
            GRID_RESOLUTION,
            DISPLAY_SCALE,
        )
    }

    pub fn center_frequency(&self) -> f64 {
        self.center_frequency
    }

    pub fn gain_profile(&self) -> GainProfile {
        self.profile
    }

    pub fn detuning(&self) -> &[f64] {
        &self.detuning
    }

    pub fn gain(&self) -> &[f64] {
        &self.gain
    }

    /// Largest displayable intensity: the gain peak at unit transmission.
    pub fn envelope_max(&self) -> f64 {
        self.gain.iter().copied().fold(0.0, f64::max) * self.display_scale
    }

    pub fn len(&self) -> usize {
        self.detuning.len()
    }

    pub fn is_empty(&self) -> bool {
        self.detuning.is_empty()
    }

    /// Gain × Airy transmission for the given cavity, scaled for display.
    pub fn evaluate(&self, params: &CavityParams) -> Spectrum {
        let cavity = params.cavity();
        let intensity = self
            .detuning
            .iter()
            .zip(&self.gain)
            .map(|(&d, &g)| {
                g * cavity.transmission(d + self.center_frequency) * self.display_scale
            })
            .collect();

        Spectrum {
            detuning: self.detuning.clone(),
            intensity,
        }
    }
}

/// Transmitted intensity sampled on the detuning grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Spectrum {
    /// Detuning from line centre in Hz (length N).
    pub detuning: Vec<f64>,
    /// Intensity at each detuning, display-scaled (length N).
    pub intensity: Vec<f64>,
}

impl Spectrum {
    pub fn len(&self) -> usize {
        self.intensity.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intensity.is_empty()
    }

    /// Display axis: wavelength in nm for each sample.
    pub fn wavelengths_nm(&self, center_frequency: f64) -> Vec<f64> {
        self.detuning
            .iter()
            .map(|&d| wavelength_from_frequency(d + center_frequency) * 1e9)
            .collect()
    }

    /// Index and value of the largest sample, `None` for an empty spectrum.
    pub fn peak(&self) -> Option<(usize, f64)> {
        self.intensity
            .iter()
            .copied()
            .enumerate()
            .fold(None, |best, (i, v)| match best {
                Some((_, b)) if b >= v => best,
                _ => Some((i, v)),
            })
    }

    /// Full width at half maximum, in Hz, of the peak containing `index`.
    ///
    /// Walks outwards until the intensity drops to half of `intensity[index]`
    /// and interpolates linearly between the straddling samples. Returns
    /// `None` if the peak is not resolved inside the grid on both sides.
    pub fn fwhm_around(&self, index: usize) -> Option<f64> {
        let y = &self.intensity;
        let x = &self.detuning;
        let half = *y.get(index)? / 2.0;
        if half <= 0.0 {
            return None;
        }

        let mut lo = index;
        while y[lo] > half {
            if lo == 0 {
                return None;
            }
            lo -= 1;
        }
        let mut hi = index;
        while y[hi] > half {
            if hi + 1 == y.len() {
                return None;
            }
            hi += 1;
        }

        let cross = |a: usize, b: usize| {
            let t = (half - y[a]) / (y[b] - y[a]);
            x[a] + t * (x[b] - x[a])
        };
        let left = cross(lo, lo + 1);
        let right = cross(hi - 1, hi);
        Some(right - left)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cavity::FabryPerot;

    fn params(length: f64, reflectivity: f64) -> CavityParams {
        CavityParams::new(length, reflectivity).unwrap()
    }

    #[test]
    fn test_grid_endpoints_and_spacing() {
        let grid = detuning_grid(4e9, 4096);
        assert_eq!(grid.len(), 4096);
        assert_eq!(grid[0], -4e9);
        assert!((grid[4095] - 4e9).abs() < 1e-3, "last = {}", grid[4095]);
        let step = 8e9 / 4095.0;
        for w in grid.windows(2) {
            assert!((w[1] - w[0] - step).abs() < 1e-3);
        }
    }

    #[test]
    fn test_grid_degenerate_sizes() {
        assert!(detuning_grid(1.0, 0).is_empty());
        assert_eq!(detuning_grid(1.0, 1), vec![-1.0]);
    }

    #[test]
    fn test_length_independent_of_params() {
        let model = SpectralModel::hene();
        for &(l, r) in &[(0.01, 0.1), (0.3, 0.9), (1.0, 1.0), (0.55, 0.42)] {
            let s = model.evaluate(&params(l, r));
            assert_eq!(s.len(), GRID_RESOLUTION, "L={l}, R={r}");
            assert_eq!(s.detuning.len(), s.intensity.len());
        }
    }

    #[test]
    fn test_finite_and_non_negative() {
        let model = SpectralModel::hene();
        for &(l, r) in &[(0.01, 0.1), (0.3, 0.9), (0.3, 0.999), (1.0, 1.0)] {
            let s = model.evaluate(&params(l, r));
            for (i, &v) in s.intensity.iter().enumerate() {
                assert!(v.is_finite() && v >= 0.0, "bin {i}: {v} (L={l}, R={r})");
            }
        }
    }

    #[test]
    fn test_bounded_by_gain() {
        let model = SpectralModel::hene();
        let s = model.evaluate(&params(0.3, 0.99));
        for (v, g) in s.intensity.iter().zip(model.gain()) {
            assert!(*v <= g * DISPLAY_SCALE * (1.0 + 1e-12));
        }
    }

    #[test]
    fn test_envelope_bounds_every_spectrum() {
        let model = SpectralModel::hene();
        let top = model.envelope_max();
        for &(l, r) in &[(0.01, 0.1), (0.3, 0.9), (0.7, 0.5), (1.0, 0.99)] {
            let (_, peak) = model.evaluate(&params(l, r)).peak().unwrap();
            assert!(peak <= top * (1.0 + 1e-12), "peak {peak} > envelope {top}");
        }
    }

    #[test]
    fn test_evaluate_is_idempotent() {
        let model = SpectralModel::hene();
        let p = params(0.42, 0.77);
        assert_eq!(model.evaluate(&p), model.evaluate(&p));
    }

    #[test]
    fn test_low_reflectivity_follows_gain() {
        // Nearly transparent mirrors leave the Gaussian envelope intact.
        let model = SpectralModel::hene();
        let s = model.evaluate(&params(0.3, 0.1));
        let t4 = FabryPerot::new(0.3, 0.1).mirror_transmission().powi(4);
        let floor = t4 / (t4 + 4.0 * 0.1 * 0.1);
        for (v, g) in s.intensity.iter().zip(model.gain()) {
            let ratio = v / (g * DISPLAY_SCALE);
            assert!(ratio >= floor - 1e-12 && ratio <= 1.0 + 1e-12, "ratio = {ratio}");
        }
        assert!(floor > 0.9, "floor = {floor}");
    }

    #[test]
    fn test_default_peak_on_nearest_resonance() {
        let model = SpectralModel::hene();
        let p = CavityParams::default();
        let s = model.evaluate(&p);
        let (i, _) = s.peak().unwrap();

        let cavity = FabryPerot::new(p.length, p.reflectivity);
        let fsr = cavity.free_spectral_range();
        let center = model.center_frequency();
        let resonance = cavity.nearest_resonance(center) - center;
        let step = s.detuning[1] - s.detuning[0];

        assert!(s.detuning[i].abs() < fsr / 2.0, "peak at {} Hz", s.detuning[i]);
        assert!(
            (s.detuning[i] - resonance).abs() <= step,
            "peak at {} Hz, resonance at {resonance} Hz",
            s.detuning[i]
        );
    }

    #[test]
    fn test_peak_at_zero_detuning_when_resonant() {
        // Choose L as an integer number of half-wavelengths so a mode sits
        // exactly on the line centre.
        let half_wave = crate::constants::HENE_WAVELENGTH / 2.0;
        let length = (0.3 / half_wave).round() * half_wave;
        let model = SpectralModel::hene();
        let s = model.evaluate(&params(length, 0.9));
        let (i, _) = s.peak().unwrap();
        let step = s.detuning[1] - s.detuning[0];
        assert!(s.detuning[i].abs() <= step, "peak at {} Hz", s.detuning[i]);
    }

    #[test]
    fn test_higher_reflectivity_narrows_central_peak() {
        let model = SpectralModel::hene();
        let wide = model.evaluate(&params(0.3, 0.9));
        let narrow = model.evaluate(&params(0.3, 0.99));

        let (iw, _) = wide.peak().unwrap();
        let (in_, _) = narrow.peak().unwrap();
        let fwhm_wide = wide.fwhm_around(iw).unwrap();
        let fwhm_narrow = narrow.fwhm_around(in_).unwrap();

        assert!(
            fwhm_narrow < fwhm_wide,
            "FWHM R=0.99: {fwhm_narrow} Hz, R=0.9: {fwhm_wide} Hz"
        );
        // R=0.9 resonance is ~34 MHz wide at L=0.3 m.
        let expected = FabryPerot::new(0.3, 0.9).resonance_linewidth();
        assert!((fwhm_wide - expected).abs() / expected < 0.05, "FWHM = {fwhm_wide}");
    }

    #[test]
    fn test_fwhm_unresolved_at_edge() {
        let s = Spectrum {
            detuning: vec![0.0, 1.0, 2.0],
            intensity: vec![3.0, 2.0, 1.0],
        };
        assert_eq!(s.fwhm_around(0), None);
        assert_eq!(s.fwhm_around(7), None);
    }

    #[test]
    fn test_fwhm_triangle() {
        let s = Spectrum {
            detuning: vec![-2.0, -1.0, 0.0, 1.0, 2.0],
            intensity: vec![0.0, 1.0, 2.0, 1.0, 0.0],
        };
        let w = s.fwhm_around(2).unwrap();
        assert!((w - 2.0).abs() < 1e-12, "w = {w}");
    }

    #[test]
    fn test_wavelength_axis_centre() {
        let model = SpectralModel::hene();
        let s = model.evaluate(&CavityParams::default());
        let nm = s.wavelengths_nm(model.center_frequency());
        assert_eq!(nm.len(), s.len());
        // Blue detuning shortens the wavelength.
        assert!(nm[0] > nm[nm.len() - 1]);
        let mid = nm[nm.len() / 2];
        assert!((mid - 632.8).abs() < 0.01, "mid = {mid}");
    }
}
