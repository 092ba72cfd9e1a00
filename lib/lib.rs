#![allow(non_snake_case)]

//! Bound-state energies of the hydrogen atom from the radial Schrödinger
//! equation via a single-sided shooting method.
//!
//! The solver is split into four layers, each driving the one below it:
//! - [`search`]: energy search over trial energies for each principal quantum
//!   number
//! - [`shoot`]: a single outward integration over a fixed radial grid, halted
//!   at the first node
//! - [`rk4`]: a fixed-step fourth-order Runge-Kutta step
//! - [`model`]: the right-hand side of the radial equation
//!
//! All parameters are passed explicitly through a [`config::Config`].
//! [`analytic`] provides the closed-form hydrogen radial wavefunctions for
//! comparison.
//!
//! See [`docs`] for theoretical background.

pub mod analytic;
pub mod config;
pub mod error;
pub mod interp;
pub mod model;
pub mod rk4;
pub mod search;
pub mod shoot;
pub mod units;
pub mod utils;

pub mod docs;

pub(crate) const DEF_MAXITERS: usize = 1000;

pub type Arr1<S> = ndarray::ArrayBase<S, ndarray::Ix1>;

/// Radial state `(ψ, dψ/dr)`.
pub type State = [f64; 2];
