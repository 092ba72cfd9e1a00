//! Closed-form bound-state radial wavefunctions of hydrogen-like atoms.
//!
//! These are independent of the numerical solver and are provided as a
//! reference for comparison and plotting:
//! ```text
//!              ⎛⎛  2  ⎞³ (n - l - 1)! ⎞½            l
//! R_nl(r) =    ⎜⎜ --- ⎟  ------------ ⎟  e^(-ρ / 2) ρ  L[n - l - 1, 2l + 1](ρ)
//!              ⎝⎝ n a ⎠   2n (n + l)! ⎠
//!
//! ρ = 2 r / (n a)
//! ```
//! where *L*[*k*, *α*] is a generalized Laguerre polynomial and *a* is the
//! (reduced-mass) Bohr radius.

use ndarray as nd;
use num_traits::Float;
use crate::{ shoot::Grid, units, Arr1 };

/// `k!` as a float.
pub fn factorial<A: Float>(k: usize) -> A {
    (1..=k).fold(A::one(), |acc, j| acc * A::from(j).unwrap_or_else(A::nan))
}

/// Evaluate the generalized Laguerre polynomial *L*[*k*, *α*](*x*) by upward
/// recurrence.
pub fn genlaguerre<A: Float>(k: usize, alpha: A, x: A) -> A {
    let one = A::one();
    let mut lm1 = one;
    if k == 0 { return lm1; }
    let mut l = one + alpha - x;
    let mut lp1: A;
    for j in 1..k {
        let j = A::from(j).unwrap_or_else(A::nan);
        lp1 = ((j + j + one + alpha - x) * l - (j + alpha) * lm1) / (j + one);
        lm1 = l;
        l = lp1;
    }
    l
}

/// Normalized radial wavefunction *R*<sub>*nl*</sub>(*r*) for Bohr radius `a`.
///
/// Returns zero if `n <= l`, for which there is no bound state.
pub fn radial_wf(n: usize, l: u32, r: f64, a: f64) -> f64 {
    let l = l as usize;
    if n == 0 || n <= l { return 0.0; }
    let nf = n as f64;
    let k = n - 1 - l;
    let rho = 2.0 * r / (nf * a);
    let norm
        = ((2.0 / (nf * a)).powi(3)
            * (factorial::<f64>(k) / (2.0 * nf * factorial::<f64>(n + l))))
        .sqrt();
    norm
        * rho.powi(l as i32)
        * (-r / (nf * a)).exp()
        * genlaguerre(k, (2 * l + 1) as f64, rho)
}

/// Hydrogen radial wavefunction, using the reduced-mass Bohr radius.
pub fn hydrogen_wf(n: usize, l: u32, r: f64) -> f64 {
    radial_wf(n, l, r, units::a_mu)
}

/// Sample [`hydrogen_wf`] over an array of radii.
pub fn hydrogen_wf_on<S>(n: usize, l: u32, r: &Arr1<S>) -> nd::Array1<f64>
where S: nd::Data<Elem = f64>
{
    r.mapv(|rk| hydrogen_wf(n, l, rk))
}

/// Sample [`hydrogen_wf`] for `n = 1..=n_max` over a grid, one row per `n`.
pub fn hydrogen_wfs(n_max: usize, l: u32, grid: &Grid) -> nd::Array2<f64> {
    let r = grid.get_r();
    let mut wfs: nd::Array2<f64> = nd::Array2::zeros((n_max, r.len()));
    wfs.outer_iter_mut().enumerate()
        .for_each(|(k, mut row)| {
            row.assign(&hydrogen_wf_on(k + 1, l, r));
        });
    wfs
}
