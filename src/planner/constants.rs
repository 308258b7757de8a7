use crate::models::FoodCategory;

// ─────────────────────────────────────────────────────────────────────────────
// Engine defaults
// ─────────────────────────────────────────────────────────────────────────────

/// Candidate meals generated before validation/scoring.
pub const DEFAULT_CANDIDATES: usize = 80;

/// Food items per candidate meal.
pub const DEFAULT_ITEMS_PER_MEAL: usize = 3;

/// Portion sizes tried for each item, in grams.
pub const DEFAULT_PORTION_GRAMS: [f64; 5] = [80.0, 100.0, 120.0, 150.0, 200.0];

/// Meal structure walked by the generator.
pub const DEFAULT_CATEGORY_PLAN: [FoodCategory; 4] = [
    FoodCategory::Protein,
    FoodCategory::Carb,
    FoodCategory::Vegetable,
    FoodCategory::Fat,
];

/// Times the same food may appear in one meal.
pub const DEFAULT_MAX_SAME_FOOD: usize = 1;

/// Tolerances (fraction of target) for calories, protein, carbs, fat.
pub const DEFAULT_TOLERANCE_CALORIES: f64 = 0.12;
pub const DEFAULT_TOLERANCE_PROTEIN: f64 = 0.15;
pub const DEFAULT_TOLERANCE_CARBS: f64 = 0.20;
pub const DEFAULT_TOLERANCE_FAT: f64 = 0.20;

/// Macro-fit weights for calories, protein, carbs, fat.
pub const DEFAULT_WEIGHT_CALORIES: f64 = 1.0;
pub const DEFAULT_WEIGHT_PROTEIN: f64 = 1.3;
pub const DEFAULT_WEIGHT_CARBS: f64 = 0.9;
pub const DEFAULT_WEIGHT_FAT: f64 = 0.9;

/// Share of the final score taken by nutrient density (0..1).
pub const DEFAULT_DENSITY_WEIGHT: f64 = 0.35;

/// Hard meal energy limits, kcal.
pub const DEFAULT_MIN_MEAL_CALORIES: f64 = 200.0;
pub const DEFAULT_MAX_MEAL_CALORIES: f64 = 1200.0;

/// Coordinate-descent sweeps allowed when fitting portions.
pub const DEFAULT_MAX_FIT_SWEEPS: usize = 8;

// ─────────────────────────────────────────────────────────────────────────────
// Clamping bounds
// ─────────────────────────────────────────────────────────────────────────────

pub const MIN_ITEMS_PER_MEAL: usize = 1;
pub const MAX_ITEMS_PER_MEAL: usize = 8;
pub const MIN_CANDIDATES: usize = 1;
pub const MAX_CANDIDATES: usize = 500;

/// Portion used when no portion options are configured.
pub const FALLBACK_PORTION_GRAMS: f64 = 100.0;

/// Floor for divisions by a target or a weight sum.
pub const SCORE_EPSILON: f64 = 1e-9;

// ─────────────────────────────────────────────────────────────────────────────
// Nutrient density (per 100 kcal)
// ─────────────────────────────────────────────────────────────────────────────

/// Soft targets at which a nutrient scores full marks.
pub const SOFT_TARGET_FIBER_G: f64 = 5.0;
pub const SOFT_TARGET_POTASSIUM_MG: f64 = 300.0;
pub const SOFT_TARGET_CALCIUM_MG: f64 = 200.0;
pub const SOFT_TARGET_IRON_MG: f64 = 2.0;
pub const SOFT_TARGET_VITAMIN_C_MG: f64 = 30.0;

/// Component weights; they sum to 1.0.
pub const DENSITY_WEIGHT_FIBER: f64 = 0.30;
pub const DENSITY_WEIGHT_POTASSIUM: f64 = 0.20;
pub const DENSITY_WEIGHT_CALCIUM: f64 = 0.15;
pub const DENSITY_WEIGHT_IRON: f64 = 0.15;
pub const DENSITY_WEIGHT_VITAMIN_C: f64 = 0.20;

/// Sodium level (mg per 100 kcal) at which the penalty saturates.
pub const SODIUM_PENALTY_CEILING_MG: f64 = 400.0;

/// Maximum score removed by the sodium penalty (fraction of 1.0).
pub const SODIUM_PENALTY_WEIGHT: f64 = 0.35;

// ─────────────────────────────────────────────────────────────────────────────
// Classification
// ─────────────────────────────────────────────────────────────────────────────

/// Energy per gram used when a meal carries no calorie value.
pub const KCAL_PER_G_CARBS: f64 = 4.0;
pub const KCAL_PER_G_PROTEIN: f64 = 4.0;
pub const KCAL_PER_G_FAT: f64 = 9.0;

/// Carb share of energy at or above which a meal is "high" carb.
pub const HIGH_CARB_SHARE: f64 = 0.45;

/// Carb share of energy at or below which a meal is "low" carb.
pub const LOW_CARB_SHARE: f64 = 0.25;

/// Default ingestion order by phase (lower eats earlier).
pub const INGESTION_ORDER_FIBER: i32 = 10;
pub const INGESTION_ORDER_PROTEIN: i32 = 20;
pub const INGESTION_ORDER_CARB: i32 = 30;
pub const INGESTION_ORDER_FAT: i32 = 40;
pub const INGESTION_ORDER_OTHER: i32 = 50;

/// Number of simultaneous macro violations that hints at over-tight tolerances.
pub const STRICT_TOLERANCE_WARNING_COUNT: usize = 3;

/// Clamp to the [0, 1] interval.
#[inline]
pub fn clamp01(x: f64) -> f64 {
    if x.is_nan() { 0.0 } else { x.clamp(0.0, 1.0) }
}

/// Round to one decimal place.
#[inline]
pub fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}
