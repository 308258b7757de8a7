use std::fs;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::Result;
use crate::models::{FoodCategory, Macro};
use crate::planner::constants::*;

/// Accepted deviation from each target, as a fraction (0.12 = ±12%).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MacroTolerances {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

impl Default for MacroTolerances {
    fn default() -> Self {
        Self {
            calories: DEFAULT_TOLERANCE_CALORIES,
            protein: DEFAULT_TOLERANCE_PROTEIN,
            carbs: DEFAULT_TOLERANCE_CARBS,
            fat: DEFAULT_TOLERANCE_FAT,
        }
    }
}

impl MacroTolerances {
    pub fn get(&self, key: Macro) -> f64 {
        match key {
            Macro::Calories => self.calories,
            Macro::Protein => self.protein,
            Macro::Carbs => self.carbs,
            Macro::Fat => self.fat,
        }
    }

    pub fn set(&mut self, key: Macro, value: f64) {
        match key {
            Macro::Calories => self.calories = value,
            Macro::Protein => self.protein = value,
            Macro::Carbs => self.carbs = value,
            Macro::Fat => self.fat = value,
        }
    }
}

/// Relative importance of each macro in the macro-fit score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            calories: DEFAULT_WEIGHT_CALORIES,
            protein: DEFAULT_WEIGHT_PROTEIN,
            carbs: DEFAULT_WEIGHT_CARBS,
            fat: DEFAULT_WEIGHT_FAT,
        }
    }
}

impl ScoringWeights {
    pub fn get(&self, key: Macro) -> f64 {
        match key {
            Macro::Calories => self.calories,
            Macro::Protein => self.protein,
            Macro::Carbs => self.carbs,
            Macro::Fat => self.fat,
        }
    }
}

/// Optional hard bounds on total meal energy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HardLimits {
    pub max_meal_calories: Option<f64>,
    pub min_meal_calories: Option<f64>,
}

impl Default for HardLimits {
    fn default() -> Self {
        Self {
            max_meal_calories: Some(DEFAULT_MAX_MEAL_CALORIES),
            min_meal_calories: Some(DEFAULT_MIN_MEAL_CALORIES),
        }
    }
}

impl HardLimits {
    pub fn none() -> Self {
        Self {
            max_meal_calories: None,
            min_meal_calories: None,
        }
    }

    /// True when `calories` breaks either configured bound.
    pub fn is_breached(&self, calories: f64) -> bool {
        self.max_meal_calories.is_some_and(|max| calories > max)
            || self.min_meal_calories.is_some_and(|min| calories < min)
    }
}

/// Tunable engine policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineConfig {
    pub candidates_to_generate: usize,
    pub items_per_meal: usize,
    /// Portion sizes in grams.
    pub portion_grams_options: Vec<f64>,
    /// Meal structure, e.g. protein, carb, vegetable, fat.
    pub category_plan: Vec<FoodCategory>,
    pub max_same_food_per_meal: usize,
    pub tolerances_pct: MacroTolerances,
    pub scoring_weights: ScoringWeights,
    /// Share of nutrient density in the final score (0..1).
    pub density_weight: f64,
    pub hard_limits: HardLimits,
    /// Rotate the template start when it is longer than `items_per_meal`.
    pub rotate_template: bool,
    /// Fit per-item portions to the targets before validation.
    pub fit_portions: bool,
    pub max_fit_sweeps: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            candidates_to_generate: DEFAULT_CANDIDATES,
            items_per_meal: DEFAULT_ITEMS_PER_MEAL,
            portion_grams_options: DEFAULT_PORTION_GRAMS.to_vec(),
            category_plan: DEFAULT_CATEGORY_PLAN.to_vec(),
            max_same_food_per_meal: DEFAULT_MAX_SAME_FOOD,
            tolerances_pct: MacroTolerances::default(),
            scoring_weights: ScoringWeights::default(),
            density_weight: DEFAULT_DENSITY_WEIGHT,
            hard_limits: HardLimits::default(),
            rotate_template: true,
            fit_portions: true,
            max_fit_sweeps: DEFAULT_MAX_FIT_SWEEPS,
        }
    }
}

impl EngineConfig {
    /// Apply a partial override field by field; nested groups merge independently.
    pub fn with_overrides(mut self, overrides: &EngineConfigOverrides) -> Self {
        if let Some(v) = overrides.candidates_to_generate {
            self.candidates_to_generate = v;
        }
        if let Some(v) = overrides.items_per_meal {
            self.items_per_meal = v;
        }
        if let Some(v) = &overrides.portion_grams_options {
            self.portion_grams_options = v.clone();
        }
        if let Some(v) = &overrides.category_plan {
            self.category_plan = v.clone();
        }
        if let Some(v) = overrides.max_same_food_per_meal {
            self.max_same_food_per_meal = v;
        }
        if let Some(t) = &overrides.tolerances_pct {
            let tol = &mut self.tolerances_pct;
            tol.calories = t.calories.unwrap_or(tol.calories);
            tol.protein = t.protein.unwrap_or(tol.protein);
            tol.carbs = t.carbs.unwrap_or(tol.carbs);
            tol.fat = t.fat.unwrap_or(tol.fat);
        }
        if let Some(w) = &overrides.scoring_weights {
            let weights = &mut self.scoring_weights;
            weights.calories = w.calories.unwrap_or(weights.calories);
            weights.protein = w.protein.unwrap_or(weights.protein);
            weights.carbs = w.carbs.unwrap_or(weights.carbs);
            weights.fat = w.fat.unwrap_or(weights.fat);
        }
        if let Some(v) = overrides.density_weight {
            self.density_weight = v;
        }
        if let Some(h) = &overrides.hard_limits {
            if let Some(v) = h.max_meal_calories {
                self.hard_limits.max_meal_calories = v;
            }
            if let Some(v) = h.min_meal_calories {
                self.hard_limits.min_meal_calories = v;
            }
        }
        if let Some(v) = overrides.rotate_template {
            self.rotate_template = v;
        }
        if let Some(v) = overrides.fit_portions {
            self.fit_portions = v;
        }
        if let Some(v) = overrides.max_fit_sweeps {
            self.max_fit_sweeps = v;
        }
        self
    }

    /// Clamp numeric policy to sane values.
    ///
    /// Tolerances and weights become finite and >= 0, the density weight is
    /// clamped to [0, 1], and non-positive portion options are dropped.
    /// Candidate and item counts are clamped later by the generator.
    pub fn sanitized(mut self) -> Self {
        let fix = |x: f64| if x.is_finite() && x > 0.0 { x } else { 0.0 };
        for key in Macro::ALL {
            let value = fix(self.tolerances_pct.get(key));
            self.tolerances_pct.set(key, value);
        }
        let w = &mut self.scoring_weights;
        w.calories = fix(w.calories);
        w.protein = fix(w.protein);
        w.carbs = fix(w.carbs);
        w.fat = fix(w.fat);
        self.density_weight = clamp01(self.density_weight);
        self.portion_grams_options
            .retain(|g| g.is_finite() && *g > 0.0);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MacroTolerancesOverride {
    pub calories: Option<f64>,
    pub protein: Option<f64>,
    pub carbs: Option<f64>,
    pub fat: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeightsOverride {
    pub calories: Option<f64>,
    pub protein: Option<f64>,
    pub carbs: Option<f64>,
    pub fat: Option<f64>,
}

/// Absent bounds keep their defaults; `Some(None)` (JSON `null`) removes a bound.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HardLimitsOverride {
    #[serde(
        default,
        deserialize_with = "present_or_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub max_meal_calories: Option<Option<f64>>,
    #[serde(
        default,
        deserialize_with = "present_or_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub min_meal_calories: Option<Option<f64>>,
}

/// Tells an explicit `null` apart from a missing field.
fn present_or_null<'de, D>(deserializer: D) -> std::result::Result<Option<Option<f64>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<f64>::deserialize(deserializer).map(Some)
}

/// Partial engine configuration; absent fields keep their defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineConfigOverrides {
    pub candidates_to_generate: Option<usize>,
    pub items_per_meal: Option<usize>,
    pub portion_grams_options: Option<Vec<f64>>,
    pub category_plan: Option<Vec<FoodCategory>>,
    pub max_same_food_per_meal: Option<usize>,
    pub tolerances_pct: Option<MacroTolerancesOverride>,
    pub scoring_weights: Option<ScoringWeightsOverride>,
    pub density_weight: Option<f64>,
    pub hard_limits: Option<HardLimitsOverride>,
    pub rotate_template: Option<bool>,
    pub fit_portions: Option<bool>,
    pub max_fit_sweeps: Option<usize>,
}

/// Load partial overrides from a JSON file.
pub fn load_config_overrides<P: AsRef<Path>>(path: P) -> Result<EngineConfigOverrides> {
    let content = fs::read_to_string(path)?;
    let overrides: EngineConfigOverrides = serde_json::from_str(&content)?;
    Ok(overrides)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_documentation() {
        let config = EngineConfig::default();
        assert_eq!(config.candidates_to_generate, 80);
        assert_eq!(config.items_per_meal, 3);
        assert_eq!(
            config.portion_grams_options,
            vec![80.0, 100.0, 120.0, 150.0, 200.0]
        );
        assert_eq!(config.max_same_food_per_meal, 1);
        assert_eq!(config.tolerances_pct.calories, 0.12);
        assert_eq!(config.scoring_weights.protein, 1.3);
        assert_eq!(config.density_weight, 0.35);
        assert_eq!(config.hard_limits.max_meal_calories, Some(1200.0));
        assert_eq!(config.hard_limits.min_meal_calories, Some(200.0));
    }

    #[test]
    fn test_nested_override_keeps_siblings() {
        let overrides: EngineConfigOverrides = serde_json::from_str(
            r#"{"tolerancesPct": {"protein": 0.0}, "hardLimits": {"maxMealCalories": 900}}"#,
        )
        .unwrap();
        let config = EngineConfig::default().with_overrides(&overrides);

        assert_eq!(config.tolerances_pct.protein, 0.0);
        assert_eq!(config.tolerances_pct.calories, 0.12);
        assert_eq!(config.tolerances_pct.fat, 0.20);
        assert_eq!(config.hard_limits.max_meal_calories, Some(900.0));
        assert_eq!(config.hard_limits.min_meal_calories, Some(200.0));
        assert_eq!(config.scoring_weights, ScoringWeights::default());
        assert_eq!(config.candidates_to_generate, 80);
    }

    #[test]
    fn test_null_hard_limit_removes_bound() {
        let json = r#"{"hardLimits": {"maxMealCalories": null}}"#;
        let overrides: EngineConfigOverrides = serde_json::from_str(json).unwrap();
        let limits = overrides.hard_limits.clone().unwrap();
        assert_eq!(limits.max_meal_calories, Some(None));
        assert_eq!(limits.min_meal_calories, None);

        let config = EngineConfig::default().with_overrides(&overrides);
        assert_eq!(config.hard_limits.max_meal_calories, None);
        assert_eq!(config.hard_limits.min_meal_calories, Some(200.0));
        assert!(!config.hard_limits.is_breached(5000.0));
    }

    #[test]
    fn test_sanitized_clamps() {
        let mut config = EngineConfig::default();
        config.density_weight = 1.7;
        config.tolerances_pct.fat = -0.3;
        config.scoring_weights.carbs = f64::NAN;
        config.portion_grams_options = vec![100.0, -5.0, 0.0, f64::INFINITY];

        let config = config.sanitized();
        assert_eq!(config.density_weight, 1.0);
        assert_eq!(config.tolerances_pct.fat, 0.0);
        assert_eq!(config.scoring_weights.carbs, 0.0);
        assert_eq!(config.portion_grams_options, vec![100.0]);
    }

    #[test]
    fn test_hard_limits_breach() {
        let limits = HardLimits::default();
        assert!(limits.is_breached(1500.0));
        assert!(limits.is_breached(150.0));
        assert!(!limits.is_breached(600.0));
        assert!(!HardLimits::none().is_breached(5000.0));
    }
}
