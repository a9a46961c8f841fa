use std::ops::RangeInclusive;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum CavityError {
    #[error("cavity length {value} m is outside {range:?}")]
    LengthOutOfRange {
        value: f64,
        range: RangeInclusive<f64>,
    },
    #[error("mirror reflectivity {value} is outside {range:?}")]
    ReflectivityOutOfRange {
        value: f64,
        range: RangeInclusive<f64>,
    },
}

pub type Result<T> = std::result::Result<T, CavityError>;
