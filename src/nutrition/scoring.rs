use crate::config::{EngineConfig, ScoringWeights};
use crate::models::{Macro, Macros, Micros};
use crate::nutrition::density::density_score;
use crate::planner::constants::*;

/// Relative error of `value` against `target`.
///
/// A zero target gives 0 for a zero value and 1 otherwise.
#[inline]
pub fn relative_error(value: f64, target: f64) -> f64 {
    if target == 0.0 {
        return if value == 0.0 { 0.0 } else { 1.0 };
    }
    (value - target).abs() / target.max(SCORE_EPSILON)
}

/// Weighted mean of the four per-macro relative errors (unclamped).
pub fn weighted_macro_error(macros: &Macros, targets: &Macros, weights: &ScoringWeights) -> f64 {
    let weight_sum: f64 = Macro::ALL.iter().map(|&m| weights.get(m)).sum();
    let weighted: f64 = Macro::ALL
        .iter()
        .map(|&m| weights.get(m) * relative_error(macros.get(m), targets.get(m)))
        .sum();
    weighted / weight_sum.max(SCORE_EPSILON)
}

/// Macro-fit component, 0..100 (unrounded).
pub fn macro_fit_score(macros: &Macros, targets: &Macros, weights: &ScoringWeights) -> f64 {
    (1.0 - clamp01(weighted_macro_error(macros, targets, weights))) * 100.0
}

/// Composite meal score, 0..100 with one decimal.
///
/// `macro_fit * (1 - w) + density * w` where `w` is the clamped density weight.
pub fn score_meal(
    macros: &Macros,
    micros: &Micros,
    targets: &Macros,
    config: &EngineConfig,
) -> f64 {
    let macro_fit = macro_fit_score(macros, targets, &config.scoring_weights);
    let density = density_score(macros, micros);
    let w = clamp01(config.density_weight);
    round1(macro_fit * (1.0 - w) + density * w)
}
