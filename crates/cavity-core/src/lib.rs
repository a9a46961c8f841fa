pub mod cavity;
pub mod constants;
pub mod error;
pub mod gain;
pub mod spectrum;

use std::ops::RangeInclusive;

pub use error::{CavityError, Result};
pub use spectrum::{SpectralModel, Spectrum};

// ---------------------------------------------------------------------------
// Shared interface types: the render crate builds against these
// ---------------------------------------------------------------------------

/// The two user-controlled cavity parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CavityParams {
    /// Mirror separation in metres.
    pub length: f64,
    /// Mirror amplitude reflectivity (0–1).
    pub reflectivity: f64,
}

impl CavityParams {
    /// Allowed cavity length in metres.
    pub const LENGTH_RANGE: RangeInclusive<f64> = 0.01..=1.0;
    /// Allowed mirror reflectivity.
    pub const REFLECTIVITY_RANGE: RangeInclusive<f64> = 0.1..=1.0;

    pub fn new(length: f64, reflectivity: f64) -> Result<Self> {
        let params = Self {
            length,
            reflectivity,
        };
        params.validate()?;
        Ok(params)
    }

    /// Check both values against their ranges. NaN is always rejected.
    pub fn validate(&self) -> Result<()> {
        if !Self::LENGTH_RANGE.contains(&self.length) {
            return Err(CavityError::LengthOutOfRange {
                value: self.length,
                range: Self::LENGTH_RANGE,
            });
        }
        if !Self::REFLECTIVITY_RANGE.contains(&self.reflectivity) {
            return Err(CavityError::ReflectivityOutOfRange {
                value: self.reflectivity,
                range: Self::REFLECTIVITY_RANGE,
            });
        }
        Ok(())
    }

    /// The resonator described by these parameters.
    pub fn cavity(&self) -> cavity::FabryPerot {
        cavity::FabryPerot::new(self.length, self.reflectivity)
    }
}

impl Default for CavityParams {
    fn default() -> Self {
        Self {
            length: 30e-2, // 30 cm
            reflectivity: 0.9,
        }
    }
}

/// Validate `params` and evaluate the HeNe spectrum.
///
/// Builds a fresh [`SpectralModel`]; callers that recompute repeatedly
/// should keep a model around and call [`SpectralModel::evaluate`].
pub fn compute(params: &CavityParams) -> Result<Spectrum> {
    params.validate()?;
    log::debug!(
        "evaluating spectrum: L = {} m, R = {}",
        params.length,
        params.reflectivity
    );
    Ok(SpectralModel::hene().evaluate(params))
}
