//! Miscellaneous tools.

use ndarray::{ self as nd, Ix1 };
use num_traits::Float;

/// Integrate using the trapezoidal rule.
///
/// *Panics if `y` has length less than 2*.
pub fn trapz<S, A>(y: &nd::ArrayBase<S, Ix1>, dx: A) -> A
where
    S: nd::Data<Elem = A>,
    A: Float,
{
    let n: usize = y.len();
    let two = A::one() + A::one();
    let inner = y.iter().skip(1).take(n - 2).fold(A::zero(), |acc, &yk| acc + yk);
    (dx / two) * (y[0] + two * inner + y[n - 1])
}

/// Calculate the radial norm ∫ |R(r)|² r² dr of a radial wavefunction sampled
/// on an evenly spaced grid `r`.
///
/// *Panics if `wf` and `r` have different lengths or length less than 2*.
pub fn radial_norm<S, T, A>(
    wf: &nd::ArrayBase<S, Ix1>,
    r: &nd::ArrayBase<T, Ix1>,
    dr: A,
) -> A
where
    S: nd::Data<Elem = A>,
    T: nd::Data<Elem = A>,
    A: Float,
{
    assert_eq!(wf.len(), r.len(), "radial_norm: array lengths differ");
    let density: nd::Array1<A>
        = nd::Zip::from(wf).and(r)
        .map_collect(|&wk, &rk| (wk * rk).powi(2));
    trapz(&density, dr)
}

/// Rescale a radial wavefunction in place so that its [radial
/// norm][radial_norm] is 1.
///
/// *Panics if `wf` and `r` have different lengths or length less than 2*.
pub fn radial_renormalize<S, T, A>(
    wf: &mut nd::ArrayBase<S, Ix1>,
    r: &nd::ArrayBase<T, Ix1>,
    dr: A,
)
where
    S: nd::DataMut<Elem = A>,
    T: nd::Data<Elem = A>,
    A: Float,
{
    let norm = radial_norm(wf, r, dr).sqrt();
    if norm > A::zero() {
        wf.iter_mut().for_each(|wk| { *wk = *wk / norm; });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn trapz_is_exact_for_lines() {
        let x: nd::Array1<f64> = nd::Array1::linspace(0.0, 2.0, 11);
        let y = x.mapv(|xk| 3.0 * xk + 1.0);
        assert_abs_diff_eq!(trapz(&y, x[1] - x[0]), 8.0, epsilon = 1e-12);
    }

    #[test]
    fn renormalize() {
        let r: nd::Array1<f64> = nd::Array1::linspace(0.0, 40.0, 4001);
        let dr = r[1] - r[0];
        let mut wf = r.mapv(|rk| 7.0 * (-rk).exp());
        radial_renormalize(&mut wf, &r, dr);
        assert_abs_diff_eq!(radial_norm(&wf, &r, dr), 1.0, epsilon = 1e-12);
        // exact: 2 e^(-r)
        assert_abs_diff_eq!(wf[0], 2.0, epsilon = 1e-4);
    }

    #[test]
    fn renormalize_leaves_zero_alone() {
        let r: nd::Array1<f64> = nd::Array1::linspace(0.0, 1.0, 5);
        let mut wf: nd::Array1<f64> = nd::Array1::zeros(5);
        radial_renormalize(&mut wf, &r, 0.25);
        assert!(wf.iter().all(|wk| *wk == 0.0));
    }
}
