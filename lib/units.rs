#![allow(non_upper_case_globals)]

//! Physical constants used by the hydrogen solver.
//!
//! These are the values of the reference calculation, not the latest CODATA
//! recommendations; several are truncated. Everything is in SI units except
//! where noted.

/// Bohr radius (m)
pub const a0: f64 = 5.29e-11;

/// Reduced-mass Bohr radius for hydrogen (m)
pub const a_mu: f64 = 1.00054 * a0;

/// elementary charge (C)
pub const e: f64 = 1.602176634e-19;
//             +/- 0 (exact)

/// electron mass (kg)
pub const me: f64 = 9.10938356e-31;

/// reduced Planck constant (kg m^2 s^-1)
pub const hbar: f64 = 1.0545718e-34;

/// Coulomb constant (N m^2 C^-2)
pub const ke: f64 = 8.98755e9;

/// hydrogen ground-state binding energy (eV)
pub const E0: f64 = 13.606;

/// atomic number of hydrogen
pub const Z: f64 = 1.0;

/// joules per electronvolt
pub const J_PER_EV: f64 = e;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hartree_from_constants() {
        // 2 E0 is about one Hartree, e² kₑ / a0
        approx::assert_relative_eq!(
            ke * e.powi(2) / a0 / J_PER_EV, 2.0 * E0, max_relative = 1e-2);
    }
}
