//! Collection of all error types.
//!
//! All errors derive [`thiserror::Error`], making them composable when allowed
//! and compatible with application code using [`anyhow`][anyhow].
//!
//! Failure of the energy search to converge for a given level is *not* an
//! error; see [`Outcome`][crate::search::Outcome].
//!
//! [anyhow]: https://crates.io/crates/anyhow

use std::path::PathBuf;
use ndarray as nd;
use thiserror::Error;

/// Returned when an operation requiring equal-length arrays encounters arrays
/// with unequal length.
#[derive(Debug, Error)]
#[error("encountered arrays with incompatible lengths; got {0} and {1}")]
pub struct LengthError(pub usize, pub usize);

impl LengthError {
    pub(crate) fn check<S, A, T, B>(
        a: &nd::ArrayBase<S, nd::Ix1>,
        b: &nd::ArrayBase<T, nd::Ix1>,
    ) -> Result<(), Self>
    where
        S: nd::Data<Elem = A>,
        T: nd::Data<Elem = B>,
    {
        let na = a.len();
        let nb = b.len();
        (na == nb).then_some(()).ok_or(Self(na, nb))
    }
}

/// Returned from functions in [`interp`][crate::interp].
#[derive(Debug, Error)]
pub enum InterpError {
    /// [`LengthError`]
    #[error("length error: {0}")]
    Length(#[from] LengthError),
}

/// Returned when a [`Config`][crate::config::Config] is rejected, either while
/// loading or by validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The grid must start strictly above the Coulomb singularity at `r = 0`.
    #[error("r_min must be greater than 0; got {0}")]
    BadRMin(f64),

    /// The grid must have positive extent.
    #[error("r_max must be greater than r_min; got r_min = {0}, r_max = {1}")]
    BadRange(f64, f64),

    /// At least two grid points are needed to take a step.
    #[error("num_points must be at least 2; got {0}")]
    BadNumPoints(usize),

    /// Returned when a non-positive convergence threshold is encountered.
    #[error("threshold must be greater than 0; got {0}")]
    BadThreshold(f64),

    /// Returned when a non-positive initial energy step is encountered.
    #[error("de_init must be greater than 0; got {0}")]
    BadStep(f64),

    /// The step decay factor must shrink the step.
    #[error("decay must lie strictly between 0 and 1; got {0}")]
    BadDecay(f64),

    /// Returned when a non-positive `maxiters` value is encountered.
    #[error("maxiters must be greater than 0; got {0}")]
    BadMaxiters(usize),

    /// Returned when a physical constant or initial value is NaN or infinite.
    #[error("parameter `{0}` must be finite; got {1}")]
    NonFinite(&'static str, f64),

    /// Failed to read a configuration file.
    #[error("could not read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse a configuration file.
    #[error("malformed config: {0}")]
    Toml(#[from] toml::de::Error),
}

impl ConfigError {
    pub(crate) fn check_r_min(r_min: f64) -> Result<(), Self> {
        (r_min > 0.0).then_some(()).ok_or(Self::BadRMin(r_min))
    }

    pub(crate) fn check_range(r_min: f64, r_max: f64) -> Result<(), Self> {
        (r_max > r_min).then_some(()).ok_or(Self::BadRange(r_min, r_max))
    }

    pub(crate) fn check_num_points(num_points: usize) -> Result<(), Self> {
        (num_points >= 2).then_some(()).ok_or(Self::BadNumPoints(num_points))
    }

    pub(crate) fn check_threshold(threshold: f64) -> Result<(), Self> {
        (threshold > 0.0).then_some(()).ok_or(Self::BadThreshold(threshold))
    }

    pub(crate) fn check_step(de: f64) -> Result<(), Self> {
        (de > 0.0).then_some(()).ok_or(Self::BadStep(de))
    }

    pub(crate) fn check_decay(decay: f64) -> Result<(), Self> {
        (decay > 0.0 && decay < 1.0).then_some(()).ok_or(Self::BadDecay(decay))
    }

    pub(crate) fn check_maxiters(maxiters: usize) -> Result<(), Self> {
        (maxiters != 0).then_some(()).ok_or(Self::BadMaxiters(maxiters))
    }

    pub(crate) fn check_finite(name: &'static str, x: f64)
        -> Result<(), Self>
    {
        x.is_finite().then_some(()).ok_or(Self::NonFinite(name, x))
    }
}
