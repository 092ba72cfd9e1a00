//! Single-sided radial integration ("shots") for fixed trial energy.
//!
//! A shot starts at the first grid point from a fixed initial state and steps
//! outward until either the end of the grid or the first node in ψ. The last
//! recorded value of ψ is what the [energy search][crate::search] tries to
//! drive to zero.

use ndarray as nd;
use crate::{
    config::{ FarField, GridParams },
    error::{ ConfigError, InterpError },
    interp,
    model::RadialModel,
    rk4::rk4_step,
    State,
};

/// Uniform radial grid, immutable once built.
///
/// The grid points are "linspace-style" (both ends included), while the
/// integration step is `(r_max - r_min) / num_points`. The two differ by a
/// factor `(N - 1) / N`; this matches the reference calculation and is kept for
/// reproducibility.
#[derive(Clone, Debug)]
pub struct Grid {
    // radii
    r: nd::Array1<f64>,
    // integration step
    h: f64,
}

impl Grid {
    /// Build a grid, failing if it starts at or below the Coulomb singularity.
    pub fn new(params: &GridParams) -> Result<Self, ConfigError> {
        params.validate()?;
        let GridParams { r_min, r_max, num_points } = *params;
        let r: nd::Array1<f64> = nd::Array1::linspace(r_min, r_max, num_points);
        let h = (r_max - r_min) / num_points as f64;
        Ok(Self { r, h })
    }

    /// Get a reference to the radius array.
    pub fn get_r(&self) -> &nd::Array1<f64> { &self.r }

    /// Get the integration step.
    pub fn step(&self) -> f64 { self.h }

    /// Get the number of grid points.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize { self.r.len() }
}

/// State of a single shot.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RunState {
    /// Still advancing along the grid.
    Stepping,
    /// A sign change was recorded at the contained index; the shot stops
    /// there.
    NodeDetected(usize),
    /// The last grid point was reached without a node.
    Done,
}

impl RunState {
    /// Transition after recording `psi` at index `i`, where `psi_prev` is the
    /// value at `i - 1` and `last` is the final grid index.
    ///
    /// A node takes precedence over reaching the end of the grid.
    pub fn next(psi_prev: f64, psi: f64, i: usize, last: usize) -> Self {
        if psi * psi_prev < 0.0 {
            Self::NodeDetected(i)
        } else if i >= last {
            Self::Done
        } else {
            Self::Stepping
        }
    }

    /// Return `true` if `self` is `Stepping`.
    pub fn is_stepping(&self) -> bool { matches!(self, Self::Stepping) }

    /// Return `true` if `self` is `NodeDetected`.
    pub fn is_node(&self) -> bool { matches!(self, Self::NodeDetected(..)) }
}

/// The recorded part of a single shot.
///
/// All arrays have the same length: the number of grid points actually
/// visited, which is less than `grid_len` if a node was found.
#[derive(Clone, Debug, PartialEq)]
pub struct Trajectory {
    /// Radii.
    pub r: nd::Array1<f64>,
    /// Wavefunction.
    pub psi: nd::Array1<f64>,
    /// Radial derivative of the wavefunction.
    pub dpsi: nd::Array1<f64>,
    /// Grid index of the first sign change, if any.
    pub node: Option<usize>,
    /// Length of the grid the shot was taken on.
    pub grid_len: usize,
}

impl Trajectory {
    /// Last recorded value of ψ.
    pub fn last_recorded(&self) -> f64 {
        self.psi[self.psi.len() - 1]
    }

    /// Value of ψ at the last grid point, or 0 if the shot stopped short of it.
    pub fn at_grid_end(&self) -> f64 {
        if self.len() == self.grid_len { self.last_recorded() } else { 0.0 }
    }

    /// Far-field value of ψ of the given kind.
    pub fn far_field(&self, kind: FarField) -> f64 {
        match kind {
            FarField::GridEnd => self.at_grid_end(),
            FarField::LastRecorded => self.last_recorded(),
        }
    }

    /// Number of recorded points.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize { self.psi.len() }

    /// Estimate the radius of the node by inverse Lagrange interpolation.
    ///
    /// The interpolating window always contains the bracketing pair
    /// `(node - 1, node)` and is widened backward by up to two points while ψ
    /// stays strictly monotone, so a window of two points reduces to linear
    /// interpolation. Returns `Ok(None)` if the shot ran to the end of the grid
    /// without a sign change.
    pub fn node_radius(&self) -> Result<Option<f64>, InterpError> {
        let Some(k) = self.node.filter(|&k| k > 0) else { return Ok(None); };
        let rising = self.psi[k] > self.psi[k - 1];
        let mut il = k - 1;
        while il > 0 && k - il < 3 {
            let (a, b) = (self.psi[il - 1], self.psi[il]);
            if (rising && a < b) || (!rising && a > b) { il -= 1; } else { break; }
        }
        let rn = interp::lagrange(
            &self.psi.slice(nd::s![il..=k]),
            &self.r.slice(nd::s![il..=k]),
            0.0,
        )?;
        Ok(Some(rn))
    }
}

/// Integrate outward from `y0` at trial energy `E`, stopping after the first
/// sign change in ψ.
///
/// The state at grid index `i` is produced by a single RK4 step evaluated at
/// radius `r[i]`.
pub fn shoot<M>(model: &M, grid: &Grid, y0: State, E: f64, l: u32)
    -> Trajectory
where M: RadialModel + ?Sized
{
    let n = grid.len();
    let h = grid.step();
    let mut psi: nd::Array1<f64> = nd::Array1::zeros(n);
    let mut dpsi: nd::Array1<f64> = nd::Array1::zeros(n);
    psi[0] = y0[0];
    dpsi[0] = y0[1];
    let mut y = y0;
    let mut state = if n > 1 { RunState::Stepping } else { RunState::Done };
    let mut len: usize = 1;
    for (i, &r) in grid.get_r().iter().enumerate().skip(1) {
        if !state.is_stepping() { break; }
        y = rk4_step(model, r, y, h, E, l);
        psi[i] = y[0];
        dpsi[i] = y[1];
        len = i + 1;
        state = RunState::next(psi[i - 1], psi[i], i, n - 1);
    }
    let node = match state {
        RunState::NodeDetected(i) => Some(i),
        _ => None,
    };
    psi.slice_collapse(nd::s![..len]);
    dpsi.slice_collapse(nd::s![..len]);
    let r = grid.get_r().slice(nd::s![..len]).to_owned();
    Trajectory { r, psi, dpsi, node, grid_len: n }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Coulomb;

    // ψ' = 1 below `r_flip` and strongly negative above it
    struct FlipAt { r_flip: f64 }

    impl RadialModel for FlipAt {
        fn derivs(&self, r: f64, _y: State, _e: f64, _l: u32) -> State {
            if r < self.r_flip { [1.0, 0.0] } else { [-1e6, 0.0] }
        }
    }

    fn unit_grid(n: usize) -> Grid {
        Grid::new(&GridParams { r_min: 1.0, r_max: n as f64, num_points: n })
            .unwrap()
    }

    #[test]
    fn grid_step_differs_from_spacing() {
        let grid = Grid::new(&GridParams::default()).unwrap();
        assert_eq!(grid.len(), 1000);
        let r = grid.get_r();
        let spacing = r[1] - r[0];
        approx::assert_relative_eq!(
            grid.step(), spacing * 999.0 / 1000.0, max_relative = 1e-12);
    }

    #[test]
    fn grid_rejects_origin() {
        let params = GridParams { r_min: 0.0, ..GridParams::default() };
        assert!(matches!(Grid::new(&params), Err(ConfigError::BadRMin(_))));
    }

    #[test]
    fn transitions() {
        assert_eq!(RunState::next(1.0, 2.0, 3, 10), RunState::Stepping);
        assert_eq!(RunState::next(1.0, -2.0, 3, 10), RunState::NodeDetected(3));
        assert_eq!(RunState::next(0.0, -2.0, 3, 10), RunState::Stepping);
        assert_eq!(RunState::next(1.0, 2.0, 10, 10), RunState::Done);
        assert_eq!(RunState::next(1.0, -2.0, 10, 10), RunState::NodeDetected(10));
    }

    #[test]
    fn runs_to_end_without_node() {
        let grid = unit_grid(20);
        let traj = shoot(&FlipAt { r_flip: f64::INFINITY }, &grid, [1.0, 0.0], 0.0, 0);
        assert_eq!(traj.len(), 20);
        assert_eq!(traj.node, None);
        assert_eq!(&traj.r, grid.get_r());
        assert_eq!(traj.node_radius().unwrap(), None);
        assert_eq!(traj.at_grid_end(), traj.last_recorded());
    }

    #[test]
    fn stops_at_first_node() {
        let grid = unit_grid(50);
        // grid radii are 1, 2, 3, ... and h = 0.98; the step producing index 8
        // samples r ∊ [9, 9.98], the one producing index 9 starts at r = 10
        let traj = shoot(&FlipAt { r_flip: 9.99 }, &grid, [1.0, 0.0], 0.0, 0);
        assert_eq!(traj.node, Some(9));
        assert_eq!(traj.len(), 10);
        assert!(traj.psi[8] > 0.0);
        assert!(traj.last_recorded() < 0.0);
        assert_eq!(traj.at_grid_end(), 0.0);
    }

    #[test]
    fn first_step_node_keeps_two_points() {
        let grid = unit_grid(50);
        let traj = shoot(&FlipAt { r_flip: 0.0 }, &grid, [1.0, 0.0], 0.0, 0);
        assert_eq!(traj.node, Some(1));
        assert_eq!(traj.len(), 2);
        // ψ goes from 1 to 1 - 0.98e6 across r ∊ [1, 2]
        let rn = traj.node_radius().unwrap().unwrap();
        approx::assert_relative_eq!(
            rn, 1.0 + 1.0 / 0.98e6, max_relative = 1e-12);
    }

    #[test]
    fn node_radius_is_interpolated() {
        let r: nd::Array1<f64> = nd::Array1::linspace(0.0, 6.0, 7);
        let traj = Trajectory {
            psi: r.mapv(|rk| 4.5 - rk),
            dpsi: nd::Array1::from_elem(7, -1.0),
            r,
            node: Some(5),
            grid_len: 7,
        };
        let rn = traj.node_radius().unwrap().unwrap();
        approx::assert_abs_diff_eq!(rn, 4.5, epsilon = 1e-12);
    }

    #[test]
    fn coulomb_shot_is_reproducible() {
        let grid = Grid::new(&GridParams::default()).unwrap();
        let model = Coulomb::default();
        let a = shoot(&model, &grid, [0.0, 1.0], -13.606, 0);
        let b = shoot(&model, &grid, [0.0, 1.0], -13.606, 0);
        assert_eq!(a.len(), b.len());
        assert!(
            a.psi.iter().zip(&b.psi).all(|(x, y)| x.to_bits() == y.to_bits())
        );
        assert_eq!(a.node, Some(3));
        assert!(a.last_recorded().abs() > 1e10);
        assert_eq!(a.far_field(FarField::GridEnd), 0.0);
    }

    #[test]
    fn coulomb_node_lies_between_bracketing_points() {
        let grid = Grid::new(&GridParams::default()).unwrap();
        let traj = shoot(&Coulomb::default(), &grid, [0.0, 1.0], -13.606, 0);
        assert_eq!(traj.len(), 4);
        // ψ[1] == ψ[2], so only the bracketing pair is usable
        assert_eq!(traj.psi[1], traj.psi[2]);
        let rn = traj.node_radius().unwrap().unwrap();
        let r = grid.get_r();
        assert!(r[2] < rn && rn < r[3], "node radius {:e}", rn);
        let expected
            = r[2] - traj.psi[2] * (r[3] - r[2]) / (traj.psi[3] - traj.psi[2]);
        approx::assert_relative_eq!(rn, expected, max_relative = 1e-12);
    }
}
