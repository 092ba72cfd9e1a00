//! Energy search driving repeated [shots][crate::shoot::shoot].
//!
//! For each principal quantum number `n`, the trial energy starts at the
//! Bohr-model guess `-E0 / n²` and is lowered by a geometrically shrinking step
//! until the far-field value of ψ falls below a threshold. This is a monotone
//! descent, not a bracketing root-finder: it never steps back up, so it can
//! overshoot and fail to converge. Such levels are reported as
//! [`Outcome::Aborted`] rather than dropped.
//!
//! ```
//! use hshoot::{ config::Config, model::Coulomb, search::search_levels, shoot::Grid };
//!
//! let mut config = Config::default();
//! config.grid.num_points = 200;
//! config.search.num_levels = 2;
//! config.search.threshold = 1e300;
//! let grid = Grid::new(&config.grid).unwrap();
//! let model = Coulomb::new(config.constants);
//! let spectrum = search_levels(&model, &grid, &config.constants, &config.search);
//! assert_eq!(spectrum.accepted(), vec![(1, -13.606), (2, -13.606 / 4.0)]);
//! ```

use log::{ debug, info, warn };
use crate::{
    config::{ Constants, SearchParams },
    model::RadialModel,
    shoot::{ shoot, Grid, Trajectory },
};

/// A single trial in an [`EnergyDescent`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Trial {
    /// Trial energy.
    pub energy: f64,
    /// Step that was last subtracted to reach `energy` (the initial step for
    /// the first trial).
    pub step: f64,
}

/// Schedule of trial energies: after each rejected trial the step is
/// multiplied by `decay` and then subtracted from the energy.
///
/// Energies are non-increasing and steps strictly decreasing. Iteration ends
/// as soon as the step drops below `floor`; the energy reached by that last
/// decrement is never yielded, but remains available from [`Self::energy`].
#[derive(Copy, Clone, Debug)]
pub struct EnergyDescent {
    energy: f64,
    step: f64,
    decay: f64,
    floor: f64,
    started: bool,
    exhausted: bool,
}

impl EnergyDescent {
    pub fn new(energy: f64, step: f64, decay: f64, floor: f64) -> Self {
        Self { energy, step, decay, floor, started: false, exhausted: false }
    }

    /// Build the schedule for level `n`.
    pub fn for_level(n: usize, consts: &Constants, params: &SearchParams)
        -> Self
    {
        Self::new(
            consts.energy_guess(n),
            params.de_init,
            params.decay,
            params.threshold,
        )
    }

    /// Current energy.
    pub fn energy(&self) -> f64 { self.energy }

    /// Current step size.
    pub fn step(&self) -> f64 { self.step }

    /// Return `true` if the step has dropped below the floor.
    pub fn is_exhausted(&self) -> bool { self.exhausted }
}

impl Iterator for EnergyDescent {
    type Item = Trial;

    fn next(&mut self) -> Option<Trial> {
        if self.exhausted { return None; }
        if self.started {
            self.step *= self.decay;
            self.energy -= self.step;
            if self.step < self.floor {
                self.exhausted = true;
                return None;
            }
        } else {
            self.started = true;
        }
        Some(Trial { energy: self.energy, step: self.step })
    }
}

/// Why a level search stopped without accepting an energy.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum AbortReason {
    /// The energy step fell below the threshold.
    StepUnderflow {
        /// Energy after the final decrement (never tried).
        energy: f64,
        /// Final energy step.
        step: f64,
        /// Number of shots taken.
        iters: usize,
    },
    /// The per-level cap on the number of shots was reached.
    MaxIters {
        /// Last trial energy.
        energy: f64,
        /// Number of shots taken.
        iters: usize,
    },
}

impl AbortReason {
    /// Energy at which the search stopped.
    pub fn energy(&self) -> f64 {
        match self {
            Self::StepUnderflow { energy, .. } => *energy,
            Self::MaxIters { energy, .. } => *energy,
        }
    }

    /// Number of shots taken.
    pub fn iters(&self) -> usize {
        match self {
            Self::StepUnderflow { iters, .. } => *iters,
            Self::MaxIters { iters, .. } => *iters,
        }
    }
}

/// Result of searching a single level.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Outcome {
    /// The far-field value of ψ fell below the threshold at `energy`.
    Accepted {
        /// Accepted energy.
        energy: f64,
        /// Number of shots taken, including the accepted one.
        iters: usize,
    },
    /// No energy was accepted.
    Aborted(AbortReason),
}

impl Outcome {
    /// Return `true` if `self` is `Accepted`.
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }

    /// Return `true` if `self` is `Aborted`.
    pub fn is_aborted(&self) -> bool {
        matches!(self, Self::Aborted(..))
    }

    /// Get the accepted energy, if any.
    pub fn energy(&self) -> Option<f64> {
        match self {
            Self::Accepted { energy, .. } => Some(*energy),
            Self::Aborted(..) => None,
        }
    }
}

/// Search result for a single principal quantum number.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Level {
    /// Principal quantum number.
    pub n: usize,
    /// Angular quantum number.
    pub l: u32,
    pub outcome: Outcome,
}

/// Search results for `n = 1, 2, ...`, in order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Spectrum {
    pub levels: Vec<Level>,
}

impl Spectrum {
    /// Accepted energies as `(index, energy)` pairs, where `index` counts
    /// accepted levels from 1.
    ///
    /// This is the list printed by the reference calculation, which drops
    /// aborted levels; use [`Self::levels`] to see those.
    pub fn accepted(&self) -> Vec<(usize, f64)> {
        self.levels.iter()
            .filter_map(|level| level.outcome.energy())
            .enumerate()
            .map(|(k, e)| (k + 1, e))
            .collect()
    }

    /// Levels for which no energy was accepted.
    pub fn aborted(&self) -> impl Iterator<Item = &Level> + '_ {
        self.levels.iter().filter(|level| level.outcome.is_aborted())
    }
}

/// Search for the energy of level `n`, calling `inspect` with every trial and
/// the resulting shot.
///
/// *Panics if `n == 0`*.
pub fn search_level_with<M, F>(
    model: &M,
    grid: &Grid,
    n: usize,
    consts: &Constants,
    params: &SearchParams,
    mut inspect: F,
) -> Level
where
    M: RadialModel + ?Sized,
    F: FnMut(&Trial, &Trajectory),
{
    assert!(n > 0, "principal quantum number must be at least 1");
    let l = params.l;
    let y0 = [params.psi_init, params.dpsi_init];
    let mut descent = EnergyDescent::for_level(n, consts, params);
    let mut last_energy = consts.energy_guess(n);
    let mut iters: usize = 0;
    let outcome = loop {
        if iters >= params.maxiters {
            warn!(
                "level n = {}: reached maxiters ({}) at E = {:e}",
                n, params.maxiters, last_energy,
            );
            break Outcome::Aborted(
                AbortReason::MaxIters { energy: last_energy, iters });
        }
        let Some(trial) = descent.next() else {
            warn!(
                "level n = {}: energy step {:e} fell below threshold {:e} at \
                E = {:e}",
                n, descent.step(), params.threshold, descent.energy(),
            );
            break Outcome::Aborted(
                AbortReason::StepUnderflow {
                    energy: descent.energy(),
                    step: descent.step(),
                    iters,
                }
            );
        };
        let traj = shoot(model, grid, y0, trial.energy, l);
        iters += 1;
        last_energy = trial.energy;
        let far = traj.far_field(params.far_field);
        debug!(
            "level n = {}: iter {}: E = {:e}, dE = {:e}, psi_far = {:e}, \
            points = {}",
            n, iters, trial.energy, trial.step, far, traj.len(),
        );
        inspect(&trial, &traj);
        if far.abs() < params.threshold {
            info!("level n = {}: accepted E = {} after {} shots", n, trial.energy, iters);
            break Outcome::Accepted { energy: trial.energy, iters };
        }
    };
    Level { n, l, outcome }
}

/// Search for the energy of level `n`.
///
/// *Panics if `n == 0`*.
pub fn search_level<M>(
    model: &M,
    grid: &Grid,
    n: usize,
    consts: &Constants,
    params: &SearchParams,
) -> Level
where M: RadialModel + ?Sized
{
    search_level_with(model, grid, n, consts, params, |_, _| { })
}

/// Search for levels `n = 1..=params.num_levels`.
///
/// Each level is searched independently; an aborted level does not affect the
/// others.
pub fn search_levels<M>(
    model: &M,
    grid: &Grid,
    consts: &Constants,
    params: &SearchParams,
) -> Spectrum
where M: RadialModel + ?Sized
{
    let levels: Vec<Level>
        = (1..=params.num_levels)
        .map(|n| search_level(model, grid, n, consts, params))
        .collect();
    Spectrum { levels }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::{ Config, FarField, GridParams },
        model::Coulomb,
        State,
    };

    // constant far field of 1.0 regardless of energy
    struct Flat;

    impl RadialModel for Flat {
        fn derivs(&self, _r: f64, _y: State, _e: f64, _l: u32) -> State {
            [0.0, 0.0]
        }
    }

    // ψ' equal to the trial energy, so the far field vanishes when E = 0
    struct Linear;

    impl RadialModel for Linear {
        fn derivs(&self, _r: f64, _y: State, e: f64, _l: u32) -> State {
            [e, 0.0]
        }
    }

    fn small_grid() -> Grid {
        Grid::new(&GridParams { num_points: 50, ..GridParams::default() })
            .unwrap()
    }

    fn flat_params() -> SearchParams {
        SearchParams { psi_init: 1.0, ..SearchParams::default() }
    }

    #[test]
    fn descent_schedule() {
        let trials: Vec<Trial> = EnergyDescent::new(-1.0, 0.1, 0.5, 0.01).collect();
        let energies: Vec<f64> = trials.iter().map(|t| t.energy).collect();
        let steps: Vec<f64> = trials.iter().map(|t| t.step).collect();
        assert_eq!(steps, vec![0.1, 0.05, 0.025, 0.0125]);
        assert_eq!(energies[0], -1.0);
        assert_eq!(energies[1], -1.0 - 0.05);
        assert_eq!(energies[3], energies[2] - 0.0125);
    }

    #[test]
    fn descent_is_monotone() {
        let params = SearchParams::default();
        let consts = Constants::default();
        let mut descent = EnergyDescent::for_level(3, &consts, &params);
        let trials: Vec<Trial> = descent.by_ref().collect();
        assert_eq!(trials[0].energy, -13.606 / 9.0);
        assert!(trials.windows(2).all(|w| w[1].energy <= w[0].energy));
        assert!(trials.windows(2).all(|w| w[1].step < w[0].step));
        assert!(
            trials.windows(2)
                .all(|w| w[1].step == w[0].step * params.decay)
        );
        assert!(trials[trials.len() - 1].step >= params.threshold);
        assert!(descent.is_exhausted());
        assert!(descent.step() < params.threshold);
        assert_eq!(descent.next(), None);
    }

    #[test]
    fn loose_threshold_accepts_first_trial() {
        let params = SearchParams { threshold: 10.0, ..flat_params() };
        let level = search_level(&Flat, &small_grid(), 2, &Constants::default(), &params);
        assert_eq!(
            level.outcome,
            Outcome::Accepted { energy: -13.606 / 4.0, iters: 1 },
        );
    }

    #[test]
    fn unreachable_threshold_aborts_on_step_underflow() {
        let params = SearchParams { threshold: 1e-300, ..flat_params() };
        let level = search_level(&Flat, &small_grid(), 1, &Constants::default(), &params);
        match level.outcome {
            Outcome::Aborted(AbortReason::StepUnderflow { step, iters, .. }) => {
                assert!(step < 1e-300);
                let expected
                    = EnergyDescent::new(-13.606, 0.1, 0.05, 1e-300).count();
                assert_eq!(iters, expected);
            },
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[test]
    fn maxiters_caps_the_search() {
        let params = SearchParams { maxiters: 5, ..flat_params() };
        let level = search_level(&Flat, &small_grid(), 1, &Constants::default(), &params);
        assert!(matches!(
            level.outcome,
            Outcome::Aborted(AbortReason::MaxIters { iters: 5, .. }),
        ));
    }

    #[test]
    fn inspected_energies_follow_the_descent() {
        let params = SearchParams { maxiters: 20, ..flat_params() };
        let consts = Constants::default();
        let mut seen: Vec<f64> = Vec::new();
        search_level_with(
            &Flat, &small_grid(), 1, &consts, &params,
            |trial, traj| {
                assert_eq!(traj.last_recorded(), 1.0);
                seen.push(trial.energy);
            },
        );
        let expected: Vec<f64>
            = EnergyDescent::for_level(1, &consts, &params)
            .take(20)
            .map(|t| t.energy)
            .collect();
        assert_eq!(seen, expected);
    }

    #[test]
    #[should_panic(expected = "principal quantum number")]
    fn inspected_search_rejects_level_zero() {
        search_level_with(
            &Flat, &small_grid(), 0, &Constants::default(), &flat_params(),
            |_, _| panic!("no shot should be taken for n = 0"),
        );
    }

    #[test]
    #[should_panic(expected = "principal quantum number")]
    fn search_rejects_level_zero() {
        search_level(&Flat, &small_grid(), 0, &Constants::default(), &flat_params());
    }

    #[test]
    fn accepts_when_far_field_cancels() {
        // E starts at +1 and reaches exactly 0 after one step of 1
        let consts = Constants { e0: -1.0, ..Constants::default() };
        let params = SearchParams {
            de_init: 20.0,
            decay: 0.05,
            threshold: 1e-9,
            ..SearchParams::default()
        };
        let level = search_level(&Linear, &small_grid(), 1, &consts, &params);
        assert_eq!(level.outcome, Outcome::Accepted { energy: 0.0, iters: 2 });
    }

    #[test]
    fn aborted_levels_do_not_stop_the_rest() {
        let mut config = Config::default();
        config.grid.num_points = 100;
        config.search.num_levels = 3;
        config.search.maxiters = 3;
        config.search.far_field = FarField::LastRecorded;
        let grid = Grid::new(&config.grid).unwrap();
        let model = Coulomb::new(config.constants);
        let spectrum = search_levels(&model, &grid, &config.constants, &config.search);
        assert_eq!(spectrum.levels.len(), 3);
        assert_eq!(
            spectrum.levels.iter().map(|level| level.n).collect::<Vec<_>>(),
            vec![1, 2, 3],
        );
        assert!(spectrum.accepted().is_empty());
        assert!(
            spectrum.aborted()
                .all(|level| {
                    level.outcome
                        == Outcome::Aborted(AbortReason::MaxIters {
                            energy: EnergyDescent::for_level(
                                level.n, &config.constants, &config.search)
                                .nth(2).unwrap().energy,
                            iters: 3,
                        })
                })
        );
    }
}
