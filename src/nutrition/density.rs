use crate::models::{Macros, Micros};
use crate::planner::constants::*;

/// Nutrient density score, 0..100 with one decimal.
///
/// Micros are normalised per 100 kcal (energy floored at 1 kcal). Fiber,
/// potassium, calcium, iron and vitamin C earn points up to their soft
/// targets; sodium subtracts up to `SODIUM_PENALTY_WEIGHT`. A heuristic, not
/// a dietary recommendation.
pub fn density_score(macros: &Macros, micros: &Micros) -> f64 {
    let kcal = macros.calories.max(1.0);
    let factor = 100.0 / kcal;

    let fiber = micros.fiber * factor;
    let potassium = micros.potassium_mg * factor;
    let calcium = micros.calcium_mg * factor;
    let iron = micros.iron_mg * factor;
    let vitamin_c = micros.vitamin_c_mg * factor;
    let sodium = micros.sodium_mg * factor;

    let bonus = clamp01(fiber / SOFT_TARGET_FIBER_G) * DENSITY_WEIGHT_FIBER
        + clamp01(potassium / SOFT_TARGET_POTASSIUM_MG) * DENSITY_WEIGHT_POTASSIUM
        + clamp01(calcium / SOFT_TARGET_CALCIUM_MG) * DENSITY_WEIGHT_CALCIUM
        + clamp01(iron / SOFT_TARGET_IRON_MG) * DENSITY_WEIGHT_IRON
        + clamp01(vitamin_c / SOFT_TARGET_VITAMIN_C_MG) * DENSITY_WEIGHT_VITAMIN_C;

    let penalty = clamp01(sodium / SODIUM_PENALTY_CEILING_MG) * SODIUM_PENALTY_WEIGHT;

    round1(clamp01(bonus - penalty) * 100.0)
}
