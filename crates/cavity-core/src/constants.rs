use std::f64::consts::PI;

/// Speed of light in m/s (rounded, as used throughout the model).
pub const SPEED_OF_LIGHT: f64 = 3e8;

/// Reduced Planck constant in J·s.
pub const HBAR: f64 = 1.0546e-34;

/// HeNe red emission line in metres.
pub const HENE_WAVELENGTH: f64 = 632.8e-9;

/// Doppler-broadened gain linewidth of the HeNe medium in Hz.
pub const HENE_LINEWIDTH: f64 = 1e9;

/// Half-width of the detuning window in Hz. The grid spans ±this value.
pub const DETUNING_HALF_RANGE: f64 = 4e9;

/// Number of samples in the detuning grid (2^12).
pub const GRID_RESOLUTION: usize = 1 << 12;

/// Multiplier applied to the spectrum before display.
pub const DISPLAY_SCALE: f64 = 1e6;

/// Centre emission frequency of the HeNe line in Hz.
pub fn hene_center_frequency() -> f64 {
    SPEED_OF_LIGHT / HENE_WAVELENGTH
}

/// Vacuum wavelength in metres for an optical frequency in Hz.
pub fn wavelength_from_frequency(frequency: f64) -> f64 {
    SPEED_OF_LIGHT / frequency
}

/// Saturation radiation density `ħν³ / (π²c²)` at optical frequency `nu`.
pub fn saturation_radiation_density(nu: f64) -> f64 {
    HBAR * nu.powi(3) / PI.powi(2) / SPEED_OF_LIGHT.powi(2)
}
