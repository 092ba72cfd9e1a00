//! Theoretical background.
//!
//! # Contents
//! - [Radial equation](#radial-equation)
//! - [Shooting](#shooting)
//! - [Energy search](#energy-search)
//! - [Units](#units)
//!
//! # Radial equation
//! Separating the hydrogen-atom Schrödinger equation in spherical coordinates
//! and writing the radial part as *u*(*r*) = *r* *R*(*r*) gives
//! ```text
//! ∂²u   ⎡ l (l + 1)   2 m             ⎤
//! --- = ⎢ --------- + --- (V(r) - E)  ⎥ u
//! ∂r²   ⎣    r²       ħ²              ⎦
//!
//!          k Z e²
//! V(r) = - ------
//!            r
//! ```
//! for angular quantum number *l*. Bound states have *E* < 0 and *u* → 0 as
//! *r* → ∞. The solver does not integrate this equation as written: it flips
//! the sign of the potential term and integrates the first-order system
//! ```text
//! ∂ ⎛ ψ  ⎞   ⎛ ψ'                  ⎞
//! - ⎜    ⎟ = ⎜                     ⎟
//! r ⎝ ψ' ⎠   ⎝ [l (l + 1) / r² - (2 m / ħ²) (V - E)] ψₙ ⎠
//! ```
//! using the classical fourth-order Runge-Kutta scheme with a fixed step
//! ([`rk4`][crate::rk4]). The value ψₙ entering the curvature is ψ divided by
//! the largest magnitude in the current state, which keeps the curvature bounded
//! no matter how large ψ itself has grown. Because the state only holds one
//! sample of ψ, this rescaling reduces to taking the sign of ψ: it distorts the
//! magnitude of the solution but not where it changes sign.
//!
//! The Coulomb potential is singular at the origin, so the grid must start at
//! some *r*<sub>min</sub> > 0; [`Config`][crate::config::Config] rejects
//! anything else.
//!
//! # Shooting
//! For a trial energy, the system is integrated outward from
//! ψ(*r*<sub>min</sub>) = 0, ψ'(*r*<sub>min</sub>) = 1 ([`shoot`][crate::shoot]).
//! Integration stops at the first node, i.e. the first grid point at which ψ
//! has the opposite sign to the point before it, or else at the end of the grid.
//! The "far-field" value that an eigenstate should make vanish is chosen by
//! [`FarField`][crate::config::FarField]. The default, `GridEnd`, reads ψ at
//! the last grid point, which is 0 for any shot that stopped at a node; such a
//! trial is accepted immediately. `LastRecorded` reads the last ψ actually
//! computed, wherever the shot stopped.
//!
//! # Energy search
//! Starting from the Bohr-model energy *E*<sub>*n*</sub> = -*E*₀ / *n*², each
//! rejected trial shrinks the energy step by a fixed factor and then subtracts
//! it from the trial energy ([`search`][crate::search]):
//! ```text
//! δE ← γ δE
//! E  ← E - δE
//! ```
//! The search accepts *E* once |ψ<sub>far</sub>| falls below a threshold, and
//! gives up once δE does. Since the descent only ever moves down in energy and
//! never brackets a sign change, it is a heuristic: it reproduces a fixed
//! schedule of trial energies exactly, but it has no means of detecting an
//! overshoot. Every level is reported with its outcome so that abandoned levels
//! remain visible.
//!
//! # Units
//! Radii, masses, and the potential are in SI units. Trial energies are in
//! electronvolts and, by default, enter the equation unconverted; set
//! [`Constants::energy_scale`][crate::config::Constants::energy_scale] to
//! [`J_PER_EV`][crate::units::J_PER_EV] to convert them to joules first.
