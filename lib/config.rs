//! Run configuration.
//!
//! Every entry point of the solver takes its parameters from a value of one of
//! the types here; there is no process-wide state. All types deserialize from
//! TOML with every field optional, missing fields taking the values of the
//! reference calculation:
//!
//! ```
//! use hshoot::config::Config;
//!
//! let config = Config::from_toml_str(r#"
//!     [search]
//!     l = 1
//!     num_levels = 3
//! "#).unwrap();
//! assert_eq!(config.search.l, 1);
//! assert_eq!(config.search.num_levels, 3);
//! assert_eq!(config.grid.num_points, 1000);
//! ```

use std::path::Path;
use serde::Deserialize;
use crate::{
    error::ConfigError,
    units,
    DEF_MAXITERS,
};

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Physical constants entering the radial equation.
#[derive(Copy, Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Constants {
    /// Electron mass (kg).
    pub me: f64,
    /// Reduced Planck constant (J s).
    pub hbar: f64,
    /// Elementary charge (C).
    pub e: f64,
    /// Coulomb constant (N m² C⁻²).
    pub ke: f64,
    /// Atomic number.
    pub z: f64,
    /// Reference ground-state binding energy (eV); level `n` is first tried at
    /// `-e0 / n²`.
    pub e0: f64,
    /// Joules per unit of trial energy.
    ///
    /// The default of `1.0` subtracts trial energies (in eV) directly from the
    /// potential (in J), which is what the reference calculation does. Use
    /// [`units::J_PER_EV`] for a dimensionally consistent equation.
    pub energy_scale: f64,
}

impl Default for Constants {
    fn default() -> Self {
        Self {
            me: units::me,
            hbar: units::hbar,
            e: units::e,
            ke: units::ke,
            z: units::Z,
            e0: units::E0,
            energy_scale: 1.0,
        }
    }
}

impl Constants {
    /// `2 m / ħ²`
    pub fn kinetic_factor(&self) -> f64 {
        2.0 * (self.me / self.hbar.powi(2))
    }

    /// Initial trial energy for level `n`, `-e0 / n²`.
    pub fn energy_guess(&self, n: usize) -> f64 {
        -self.e0 / (n as f64).powi(2)
    }

    fn validate(&self) -> ConfigResult<()> {
        ConfigError::check_finite("me", self.me)?;
        ConfigError::check_finite("hbar", self.hbar)?;
        ConfigError::check_finite("e", self.e)?;
        ConfigError::check_finite("ke", self.ke)?;
        ConfigError::check_finite("z", self.z)?;
        ConfigError::check_finite("e0", self.e0)?;
        ConfigError::check_finite("energy_scale", self.energy_scale)?;
        Ok(())
    }
}

/// Radial grid, in the "linspace-style" of a start, inclusive end, and number
/// of points.
#[derive(Copy, Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GridParams {
    /// First radius (m); must be strictly positive.
    pub r_min: f64,
    /// Last radius (m).
    pub r_max: f64,
    /// Number of grid points.
    pub num_points: usize,
}

impl Default for GridParams {
    fn default() -> Self {
        Self { r_min: units::a0, r_max: 100.0 * units::a0, num_points: 1000 }
    }
}

impl GridParams {
    /// Reject grids touching the Coulomb singularity or too short to step
    /// across.
    pub fn validate(&self) -> ConfigResult<()> {
        ConfigError::check_finite("r_max", self.r_max)?;
        ConfigError::check_r_min(self.r_min)?;
        ConfigError::check_range(self.r_min, self.r_max)?;
        ConfigError::check_num_points(self.num_points)?;
        Ok(())
    }
}

/// Which value of ψ the energy search drives to zero.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FarField {
    /// ψ at the last grid point. A shot halted at a node never reaches that
    /// point, which then reads as 0; this is the reference behavior.
    #[default]
    GridEnd,
    /// The last value of ψ actually computed, wherever the shot stopped.
    LastRecorded,
}

/// Parameters of the energy search.
#[derive(Copy, Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchParams {
    /// Number of levels to search for, `n = 1..=num_levels`.
    pub num_levels: usize,
    /// Angular quantum number.
    pub l: u32,
    /// Far-field acceptance bound on `|ψ|`; the energy step is also abandoned
    /// once it drops below this value.
    pub threshold: f64,
    /// Initial energy step.
    pub de_init: f64,
    /// Factor applied to the energy step before each decrement.
    pub decay: f64,
    /// ψ at the first grid point.
    pub psi_init: f64,
    /// dψ/dr at the first grid point.
    pub dpsi_init: f64,
    /// Maximum number of radial runs per level (default: `1000`).
    pub maxiters: usize,
    /// Far-field value tested against `threshold`.
    pub far_field: FarField,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            num_levels: 10,
            l: 0,
            threshold: 1e-50,
            de_init: 0.1,
            decay: 0.05,
            psi_init: 0.0,
            dpsi_init: 1.0,
            maxiters: DEF_MAXITERS,
            far_field: FarField::GridEnd,
        }
    }
}

impl SearchParams {
    pub fn validate(&self) -> ConfigResult<()> {
        ConfigError::check_finite("psi_init", self.psi_init)?;
        ConfigError::check_finite("dpsi_init", self.dpsi_init)?;
        ConfigError::check_threshold(self.threshold)?;
        ConfigError::check_step(self.de_init)?;
        ConfigError::check_decay(self.decay)?;
        ConfigError::check_maxiters(self.maxiters)?;
        Ok(())
    }
}

/// Top-level configuration.
#[derive(Copy, Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub constants: Constants,
    pub grid: GridParams,
    pub search: SearchParams,
}

impl Config {
    /// Check every parameter, returning the first violation found.
    pub fn validate(&self) -> ConfigResult<()> {
        self.constants.validate()?;
        self.grid.validate()?;
        self.search.validate()?;
        Ok(())
    }

    /// Parse from a TOML string and validate.
    pub fn from_toml_str(s: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a TOML file and validate.
    pub fn from_file<P>(path: P) -> ConfigResult<Self>
    where P: AsRef<Path>
    {
        let path = path.as_ref();
        let s = std::fs::read_to_string(path)
            .map_err(|source| {
                ConfigError::Io { path: path.to_path_buf(), source }
            })?;
        Self::from_toml_str(&s)
    }
}
