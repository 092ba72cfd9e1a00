//! Classical fourth-order Runge-Kutta stepping for the two-component radial
//! state.

use crate::{ model::RadialModel, State };

// perform the operation `a + v * b` succinctly
fn state_step(a: State, v: f64, b: State) -> State {
    [a[0] + v * b[0], a[1] + v * b[1]]
}

// scale a state by a constant
fn state_scale(v: f64, a: State) -> State {
    [v * a[0], v * a[1]]
}

/// Take a single RK4 step of size `h` from radius `r`, returning the state at
/// `r + h`.
///
/// Each stage derivative is pre-scaled by `h`:
/// ```text
/// k1 = h f(r,         y)
/// k2 = h f(r + h / 2, y + k1 / 2)
/// k3 = h f(r + h / 2, y + k2 / 2)
/// k4 = h f(r + h,     y + k3)
/// y(r + h) = y + (k1 + 2 k2 + 2 k3 + k4) / 6
/// ```
pub fn rk4_step<M>(model: &M, r: f64, y: State, h: f64, E: f64, l: u32)
    -> State
where M: RadialModel + ?Sized
{
    let k1 = state_scale(h, model.derivs(r, y, E, l));
    let k2 = state_scale(h, model.derivs(r + h / 2.0, state_step(y, 0.5, k1), E, l));
    let k3 = state_scale(h, model.derivs(r + h / 2.0, state_step(y, 0.5, k2), E, l));
    let k4 = state_scale(h, model.derivs(r + h, state_step(y, 1.0, k3), E, l));
    [
        y[0] + (k1[0] + 2.0 * k2[0] + 2.0 * k3[0] + k4[0]) / 6.0,
        y[1] + (k1[1] + 2.0 * k2[1] + 2.0 * k3[1] + k4[1]) / 6.0,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    // y'' = -y' written as (ψ, ψ'); ψ' decays as exp(-r)
    struct Decay;

    impl RadialModel for Decay {
        fn derivs(&self, _r: f64, y: State, _e: f64, _l: u32) -> State {
            [y[1], -y[1]]
        }
    }

    // ψ' = r³, exactly integrable by a fourth-order scheme
    struct Cubic;

    impl RadialModel for Cubic {
        fn derivs(&self, r: f64, _y: State, _e: f64, _l: u32) -> State {
            [r.powi(3), 0.0]
        }
    }

    fn local_error(h: f64) -> f64 {
        let y = rk4_step(&Decay, 0.0, [0.0, 1.0], h, 0.0, 0);
        (y[1] - (-h).exp()).abs()
    }

    #[test]
    fn local_error_is_fifth_order() {
        let e1 = local_error(0.2);
        let e2 = local_error(0.1);
        let e3 = local_error(0.05);
        // local error ~ h⁵ / 120, so each halving gains a factor of 32
        assert!((e1 / e2 - 32.0).abs() < 3.0, "ratio {}", e1 / e2);
        assert!((e2 / e3 - 32.0).abs() < 3.0, "ratio {}", e2 / e3);
    }

    #[test]
    fn exact_for_cubic_quadrature() {
        let y = rk4_step(&Cubic, 1.0, [0.0, 0.0], 1.0, 0.0, 0);
        // ∫₁² r³ dr = 15 / 4
        approx::assert_abs_diff_eq!(y[0], 3.75, epsilon = 1e-14);
    }

    #[test]
    fn deterministic() {
        let a = rk4_step(&Decay, 0.3, [0.1, -2.0], 0.01, 0.0, 0);
        let b = rk4_step(&Decay, 0.3, [0.1, -2.0], 0.01, 0.0, 0);
        assert_eq!(a[0].to_bits(), b[0].to_bits());
        assert_eq!(a[1].to_bits(), b[1].to_bits());
    }
}
