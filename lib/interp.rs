//! Lagrange interpolation, used to place nodes of a radial trajectory between
//! grid points by inverse interpolation.
//!
//! ```
//! use ndarray as nd;
//! use hshoot::interp::lagrange;
//!
//! // invert ψ = (r - 1)³ + 2 (r - 1) around its zero at r = 1
//! let r: nd::Array1<f64> = nd::array![0.5, 0.9, 1.2, 1.6];
//! let psi = r.mapv(|rk| (rk - 1.0).powi(3) + 2.0 * (rk - 1.0));
//! let r0 = lagrange(&psi, &r, 0.0).unwrap();
//! assert!((r0 - 1.0).abs() < 1e-2);
//! ```

use ndarray as nd;
use num_traits::Num;
use crate::error::*;

pub type InterpResult<T> = Result<T, InterpError>;

/// Evaluate the Lagrange polynomial through `(data_x, data_y)` at `x`.
pub fn lagrange<S, T, A>(
    data_x: &nd::ArrayBase<S, nd::Ix1>,
    data_y: &nd::ArrayBase<T, nd::Ix1>,
    x: A,
) -> InterpResult<A>
where
    S: nd::Data<Elem = A>,
    T: nd::Data<Elem = A>,
    A: Num + Copy
{
    LengthError::check(data_x, data_y)?;
    let res: A
        = data_x.iter().zip(data_y).enumerate()
        .map(|(j, (&xj, &yj))| {
            let basis
                = data_x.iter().enumerate()
                .filter(|(m, _)| *m != j)
                .map(|(_, &xm)| (x - xm) / (xj - xm))
                .fold(A::one(), A::mul);
            yj * basis
        })
        .fold(A::zero(), A::add);
    Ok(res)
}
