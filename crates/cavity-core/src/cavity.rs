use crate::constants::SPEED_OF_LIGHT;
use num_complex::Complex64;
use std::f64::consts::PI;

/// A two-mirror Fabry-Perot resonator with identical mirrors.
///
/// ```text
///  R |<------ L ------>| R
///    |                 |
/// ```
///
/// `reflectivity` is the amplitude reflection coefficient `r`; the
/// amplitude transmission is `t = sqrt(1 - r²)`.
#[derive(Debug, Clone, Copy)]
pub struct FabryPerot {
    /// Mirror separation in metres.
    pub length: f64,
    /// Mirror amplitude reflectivity, 0–1.
    pub reflectivity: f64,
}

impl FabryPerot {
    pub fn new(length: f64, reflectivity: f64) -> Self {
        Self {
            length,
            reflectivity,
        }
    }

    /// Single-mirror amplitude transmission `t = sqrt(1 - r²)`.
    pub fn mirror_transmission(&self) -> f64 {
        (1.0 - self.reflectivity * self.reflectivity).sqrt()
    }

    /// One-way phase `kL = 2π·ν·L / c` at optical frequency `frequency` (Hz).
    pub fn phase(&self, frequency: f64) -> f64 {
        2.0 * PI * frequency / SPEED_OF_LIGHT * self.length
    }

    /// Airy intensity transmission at absolute optical frequency `frequency`.
    ///
    /// I = t⁴ / (t⁴ + 4r²·sin²(kL))
    pub fn transmission(&self, frequency: f64) -> f64 {
        let t = self.mirror_transmission();
        let t4 = t.powi(4);
        if t4 == 0.0 {
            // Perfect mirrors: nothing gets through, including on resonance.
            return 0.0;
        }
        let r = self.reflectivity;
        let denom = t4 + 4.0 * r * r * self.phase(frequency).sin().powi(2);
        t4 / denom
    }

    /// Complex transmitted field for unit incident field.
    ///
    /// E_t = t² / (1 − r²·e^{2ikL})
    pub fn field_transmission(&self, frequency: f64) -> Complex64 {
        let t2 = Complex64::new(1.0 - self.reflectivity * self.reflectivity, 0.0);
        let round_trip = Complex64::from_polar(
            self.reflectivity * self.reflectivity,
            2.0 * self.phase(frequency),
        );
        t2 / (Complex64::new(1.0, 0.0) - round_trip)
    }

    /// Free spectral range `c / 2L` in Hz.
    pub fn free_spectral_range(&self) -> f64 {
        SPEED_OF_LIGHT / (2.0 * self.length)
    }

    /// Coefficient of finesse `4r² / t⁴`.
    pub fn coefficient_of_finesse(&self) -> f64 {
        let r = self.reflectivity;
        4.0 * r * r / self.mirror_transmission().powi(4)
    }

    /// Finesse `π·sqrt(F) / 2 = π·r / (1 − r²)`.
    pub fn finesse(&self) -> f64 {
        PI * self.coefficient_of_finesse().sqrt() / 2.0
    }

    /// Resonance full width at half maximum in Hz (`FSR / finesse`).
    pub fn resonance_linewidth(&self) -> f64 {
        self.free_spectral_range() / self.finesse()
    }

    /// Resonant frequency (integer multiple of the FSR) closest to `frequency`.
    pub fn nearest_resonance(&self, frequency: f64) -> f64 {
        let fsr = self.free_spectral_range();
        (frequency / fsr).round() * fsr
    }

    /// Number of longitudinal modes within `center ± half_width`.
    pub fn modes_within(&self, center: f64, half_width: f64) -> u64 {
        let fsr = self.free_spectral_range();
        let lo = ((center - half_width) / fsr).ceil();
        let hi = ((center + half_width) / fsr).floor();
        if hi < lo {
            0
        } else {
            (hi - lo) as u64 + 1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::hene_center_frequency;

    #[test]
    fn test_unity_transmission_on_resonance() {
        let fp = FabryPerot::new(0.3, 0.9);
        let nu = fp.nearest_resonance(hene_center_frequency());
        let i = fp.transmission(nu);
        assert!((i - 1.0).abs() < 1e-6, "on-resonance I = {i}");
    }

    #[test]
    fn test_minimum_transmission_between_resonances() {
        let fp = FabryPerot::new(0.3, 0.9);
        let nu = fp.nearest_resonance(hene_center_frequency()) + fp.free_spectral_range() / 2.0;
        let t4 = fp.mirror_transmission().powi(4);
        let expected = t4 / (t4 + 4.0 * 0.81);
        let i = fp.transmission(nu);
        assert!((i - expected).abs() < 1e-9, "anti-resonance I = {i}, expected {expected}");
    }

    #[test]
    fn test_denominator_positive_below_unit_reflectivity() {
        let nu0 = hene_center_frequency();
        for &r in &[0.1, 0.5, 0.9, 0.99, 0.999_999] {
            for &l in &[0.01, 0.3, 1.0] {
                let fp = FabryPerot::new(l, r);
                for k in 0..200 {
                    let nu = nu0 + (k as f64 - 100.0) * 4e7;
                    let i = fp.transmission(nu);
                    assert!(i.is_finite(), "non-finite at r={r}, L={l}, nu={nu}");
                    assert!((0.0..=1.0 + 1e-12).contains(&i), "I = {i} at r={r}, L={l}");
                }
            }
        }
    }

    #[test]
    fn test_perfect_mirrors_transmit_nothing() {
        let fp = FabryPerot::new(0.3, 1.0);
        let nu = fp.nearest_resonance(hene_center_frequency());
        assert_eq!(fp.transmission(nu), 0.0);
        assert_eq!(fp.transmission(nu + 1e8), 0.0);
    }

    #[test]
    fn test_low_reflectivity_is_nearly_flat() {
        let fp = FabryPerot::new(0.3, 1e-3);
        let nu0 = hene_center_frequency();
        for k in 0..100 {
            let i = fp.transmission(nu0 + k as f64 * 1e7);
            assert!((i - 1.0).abs() < 1e-5, "I = {i}");
        }
    }

    #[test]
    fn test_field_intensity_matches_airy() {
        let nu0 = hene_center_frequency();
        for &r in &[0.1, 0.6, 0.9, 0.99] {
            let fp = FabryPerot::new(0.3, r);
            for k in 0..50 {
                let nu = nu0 + k as f64 * 1.3e7;
                let airy = fp.transmission(nu);
                let field = fp.field_transmission(nu).norm_sqr();
                assert!(
                    (airy - field).abs() < 1e-6 * airy.max(1e-12),
                    "r={r}, nu={nu}: Airy {airy}, |E|² {field}"
                );
            }
        }
    }

    #[test]
    fn test_resonances_spaced_by_fsr() {
        let fp = FabryPerot::new(0.3, 0.95);
        assert!((fp.free_spectral_range() - 500e6).abs() < 1e-3);
        let nu = fp.nearest_resonance(hene_center_frequency());
        for n in 1..=4 {
            let i = fp.transmission(nu + n as f64 * fp.free_spectral_range());
            assert!((i - 1.0).abs() < 1e-6, "mode {n}: I = {i}");
        }
    }

    #[test]
    fn test_finesse_matches_reflectivity() {
        let fp = FabryPerot::new(0.3, 0.9);
        let expected = PI * 0.9 / (1.0 - 0.81);
        assert!((fp.finesse() - expected).abs() < 1e-9, "F = {}", fp.finesse());
        let narrow = FabryPerot::new(0.3, 0.99);
        assert!(narrow.resonance_linewidth() < fp.resonance_linewidth());
    }

    #[test]
    fn test_modes_within_gain() {
        let fp = FabryPerot::new(0.3, 0.9);
        // 500 MHz FSR across ±1 GHz holds four or five modes depending on phase.
        let n = fp.modes_within(hene_center_frequency(), 1e9);
        assert!(n == 4 || n == 5, "n = {n}");
        assert_eq!(fp.modes_within(hene_center_frequency(), 1.0), 0);
    }
}
