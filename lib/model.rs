//! Right-hand side of the radial Schrödinger equation written as a pair of
//! coupled first-order equations,
//! ```text
//! dψ/dr   = ψ'
//! d²ψ/dr² = [ l(l + 1) / r² - (2 m / ħ²) (V(r) - E) ] ψₙ
//! ```
//! where ψₙ is ψ rescaled by the largest magnitude in the current state (see
//! [`normalized`]).

use crate::{ config::Constants, State };

/// Anything that can supply `(dψ/dr, d²ψ/dr²)` for the radial integrator.
///
/// Implementors must be pure functions of their arguments: the integrator calls
/// [`derivs`][Self::derivs] four times per step and relies on getting the same
/// answer for the same input.
pub trait RadialModel {
    /// Return the derivative of the state `y = (ψ, dψ/dr)` at radius `r` for
    /// trial energy `E` and angular quantum number `l`.
    fn derivs(&self, r: f64, y: State, E: f64, l: u32) -> State;
}

impl<M: RadialModel + ?Sized> RadialModel for &M {
    fn derivs(&self, r: f64, y: State, E: f64, l: u32) -> State {
        (**self).derivs(r, y, E, l)
    }
}

/// Attractive Coulomb potential `-k Z e² / r` (J).
pub fn coulomb_potential(r: f64, consts: &Constants) -> f64 {
    -(consts.ke * consts.z * consts.e.powi(2)) / r
}

/// Rescale `psi` by the largest magnitude in the current state.
///
/// The state carries a single ψ sample, so this maps any nonzero value onto
/// ±1 while preserving its sign; zero is passed through untouched.
pub fn normalized(psi: f64) -> f64 {
    let max_psi = psi.abs();
    if max_psi != 0.0 { psi / max_psi } else { psi }
}

/// The hydrogen-like radial equation in a bare Coulomb potential.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Coulomb {
    consts: Constants,
    // 2 m / ħ²
    kin: f64,
}

impl Coulomb {
    pub fn new(consts: Constants) -> Self {
        Self { consts, kin: consts.kinetic_factor() }
    }

    pub fn constants(&self) -> &Constants { &self.consts }

    /// Potential energy at `r` (J).
    pub fn potential(&self, r: f64) -> f64 {
        coulomb_potential(r, &self.consts)
    }
}

impl Default for Coulomb {
    fn default() -> Self { Self::new(Constants::default()) }
}

impl RadialModel for Coulomb {
    fn derivs(&self, r: f64, y: State, E: f64, l: u32) -> State {
        let [psi, dpsi_dr] = y;
        let V = self.potential(r);
        let psi_n = normalized(psi);
        let l = l as f64;
        let d2psi_dr2
            = (l * (l + 1.0)) / r.powi(2) * psi_n
            - self.kin * (V - E * self.consts.energy_scale) * psi_n;
        [dpsi_dr, d2psi_dr2]
    }
}
