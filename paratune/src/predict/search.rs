use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::CostModel;
use crate::model::{CostEstimate, ParallelismPoint};
use crate::settings::PredictorSettings;

pub const NEIGHBORHOOD_SIZE: usize = 8;

/// Range of memory penalties considered a sensible use of the budget: `(floor, ceiling]`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FeasibleBand {
    pub floor: f64,
    pub ceiling: f64,
}

impl Default for FeasibleBand {
    fn default() -> Self {
        Self::from_settings(&PredictorSettings::default())
    }
}

impl FeasibleBand {
    pub const fn from_settings(settings: &PredictorSettings) -> Self {
        Self {
            floor: settings.feasible_penalty_floor,
            ceiling: settings.feasible_penalty_ceiling,
        }
    }

    #[inline]
    pub fn contains(&self, penalty: f64) -> bool {
        self.floor < penalty && penalty <= self.ceiling
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    /// No positive data size estimate; the seed stands.
    NoSignal,
    /// The same penalty was chosen in consecutive steps.
    PenaltyRepeated,
    IterationCap,
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rep = match self {
            Self::NoSignal => "NoSignal",
            Self::PenaltyRepeated => "PenaltyRepeated",
            Self::IterationCap => "IterationCap",
        };
        f.write_str(rep)
    }
}

/// The eight points reached by halving, holding or doubling each coordinate, minus the point
/// itself. Ordered LoP-major: LoP ÷2, ×1, ×2 crossed with DoP ÷2, ×1, ×2.
pub fn neighborhood(point: ParallelismPoint) -> [ParallelismPoint; NEIGHBORHOOD_SIZE] {
    let ParallelismPoint { lop, dop } = point;
    let lops = [lop.halve(), lop, lop.double()];
    let dops = [dop.halve(), dop, dop.double()];

    let mut neighbors = [point; NEIGHBORHOOD_SIZE];
    let mut idx = 0;
    for (i, lop) in lops.into_iter().enumerate() {
        for (j, dop) in dops.into_iter().enumerate() {
            if i == 1 && j == 1 {
                continue;
            }
            neighbors[idx] = ParallelismPoint { lop, dop };
            idx += 1;
        }
    }

    neighbors
}

/// Orders candidates best first: a feasible penalty beats an infeasible one, then lower round
/// cost, then lower stage cost. Remaining ties prefer the larger penalty when both are feasible
/// and the smaller one otherwise.
pub fn compare(band: &FeasibleBand, lhs: &CostEstimate, rhs: &CostEstimate) -> Ordering {
    let lhs_feasible = band.contains(lhs.penalty);
    let rhs_feasible = band.contains(rhs.penalty);

    rhs_feasible
        .cmp(&lhs_feasible)
        .then_with(|| lhs.round_cost.total_cmp(&rhs.round_cost))
        .then_with(|| lhs.stage_cost.total_cmp(&rhs.stage_cost))
        .then_with(|| {
            if lhs_feasible && rhs_feasible {
                rhs.penalty.total_cmp(&lhs.penalty)
            } else {
                lhs.penalty.total_cmp(&rhs.penalty)
            }
        })
}

/// Best candidate by `compare`; the earliest wins a full tie.
pub fn select_best<'a, I>(band: &FeasibleBand, candidates: I) -> Option<CostEstimate>
where
    I: IntoIterator<Item = &'a CostEstimate>,
{
    candidates.into_iter().copied().min_by(|lhs, rhs| compare(band, lhs, rhs))
}

/// Loop state threaded through the local search.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SearchState {
    pub current: CostEstimate,
    pub previous_penalty: Option<f64>,
    pub iterations: u32,
}

impl SearchState {
    pub const fn start(seed: CostEstimate) -> Self {
        Self { current: seed, previous_penalty: None, iterations: 0 }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum SearchStep {
    Continue(SearchState),
    Converged(SearchState),
}

/// Moves to the best neighbor of the current point. Converges when the winner's penalty repeats
/// the previous step's.
pub fn step(model: &CostModel, band: &FeasibleBand, state: SearchState) -> SearchStep {
    let estimates = neighborhood(state.current.point).map(|point| model.evaluate(point));
    let best = match select_best(band, estimates.iter()) {
        Some(best) => best,
        None => return SearchStep::Converged(state),
    };

    tracing::debug!(
        iteration=%(state.iterations + 1), from=%state.current.point, to=%best,
        "local search moved to best neighbor."
    );

    let repeated = state.previous_penalty == Some(best.penalty);
    let next = SearchState {
        current: best,
        previous_penalty: Some(best.penalty),
        iterations: state.iterations + 1,
    };

    if repeated {
        SearchStep::Converged(next)
    } else {
        SearchStep::Continue(next)
    }
}

/// Iterates `step` from `seed` until it converges or `max_iterations` steps have been taken.
pub fn search(
    model: &CostModel, band: &FeasibleBand, seed: ParallelismPoint, max_iterations: u32,
) -> (SearchState, Termination) {
    let mut state = SearchState::start(model.evaluate(seed));

    while state.iterations < max_iterations {
        match step(model, band, state) {
            SearchStep::Continue(next) => state = next,
            SearchStep::Converged(last) => return (last, Termination::PenaltyRepeated),
        }
    }

    tracing::warn!(%max_iterations, current=%state.current, "local search stopped at iteration cap.");
    (state, Termination::IterationCap)
}
