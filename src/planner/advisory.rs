use crate::config::EngineConfig;
use crate::error::Result;
use crate::models::{FoodCategory, Macro, Macros, Meal, MealSuggestion, MealWarning};
use crate::nutrition::{compute_macro_warnings, targets_to_ranges};
use crate::planner::constants::*;

/// Range and hard-limit warnings for a meal's macros.
pub fn analyze_warnings(
    macros: &Macros,
    targets: &Macros,
    config: &EngineConfig,
) -> Result<Vec<MealWarning>> {
    let ranges = targets_to_ranges(targets, &config.tolerances_pct)?;
    let mut warnings = compute_macro_warnings(macros, &ranges);

    if config.hard_limits.is_breached(macros.calories) {
        warnings.push(MealWarning::CaloriesOutOfBounds {
            calories: macros.calories,
        });
    }

    let violated = warnings.iter().filter(|w| w.is_macro_range()).count();
    if violated >= STRICT_TOLERANCE_WARNING_COUNT {
        warnings.push(MealWarning::ConstraintTooStrict {
            message: format!("{} macros out of range at once", violated),
        });
    }
    Ok(warnings)
}

fn category_for(key: Macro) -> Option<FoodCategory> {
    match key {
        Macro::Protein => Some(FoodCategory::Protein),
        Macro::Carbs => Some(FoodCategory::Carb),
        Macro::Fat => Some(FoodCategory::Fat),
        Macro::Calories => None,
    }
}

/// Suggestion list that ignores repeats of the same kind and target.
#[derive(Default)]
struct Suggestions(Vec<MealSuggestion>);

impl Suggestions {
    fn has_add_food(&self) -> bool {
        self.0
            .iter()
            .any(|s| matches!(s, MealSuggestion::AddFood { .. }))
    }

    fn add_food(&mut self, category: FoodCategory, reason: &str) {
        let exists = self.0.iter().any(|s| {
            matches!(s, MealSuggestion::AddFood { category: c, .. } if *c == category)
        });
        if !exists {
            self.0.push(MealSuggestion::AddFood {
                category,
                reason: reason.to_string(),
            });
        }
    }

    fn increase_portion(&mut self, food_id: &str, reason: &str) {
        let exists = self
            .0
            .iter()
            .any(|s| matches!(s, MealSuggestion::IncreasePortion { .. }));
        if !exists {
            self.0.push(MealSuggestion::IncreasePortion {
                food_id: food_id.to_string(),
                reason: reason.to_string(),
            });
        }
    }

    fn relax(&mut self, constraint: &str, reason: &str) {
        let exists = self.0.iter().any(|s| {
            matches!(s, MealSuggestion::RelaxConstraint { constraint: c, .. } if c == constraint)
        });
        if !exists {
            self.0.push(MealSuggestion::RelaxConstraint {
                constraint: constraint.to_string(),
                reason: reason.to_string(),
            });
        }
    }
}

/// Advisory hints derived from a meal's warnings.
///
/// Never emits two suggestions of the same kind and target. An empty warning
/// list yields no suggestions.
pub fn generate_suggestions(
    meal: &Meal<'_>,
    warnings: &[MealWarning],
    config: &EngineConfig,
) -> Vec<MealSuggestion> {
    if warnings.is_empty() {
        return Vec::new();
    }

    let mut out = Suggestions::default();
    for warning in warnings {
        match warning {
            MealWarning::MacroLow { macro_key, .. } => match category_for(*macro_key) {
                Some(category) => out.add_food(
                    category,
                    &format!("{} intake too low for this meal", macro_key.label()),
                ),
                None => {
                    if let Some(first) = meal.items().first() {
                        out.increase_portion(&first.food.id, "Calorie intake too low");
                    }
                }
            },
            MealWarning::CaloriesOutOfBounds { .. } => {
                out.relax("hardLimits", "Calories outside the configured hard limits");
            }
            MealWarning::MacroHigh { .. } | MealWarning::ConstraintTooStrict { .. } => {}
        }
    }

    let violated = warnings.iter().filter(|w| w.is_macro_range()).count();
    if violated >= STRICT_TOLERANCE_WARNING_COUNT {
        out.relax(
            "tolerancesPct",
            "Several targets are missed at the same time",
        );
    }

    let items_per_meal = config
        .items_per_meal
        .clamp(MIN_ITEMS_PER_MEAL, MAX_ITEMS_PER_MEAL);
    if meal.len() < items_per_meal && !out.has_add_food() {
        out.add_food(
            FoodCategory::Mixed,
            "Meal lacks variety, add a complementary food",
        );
    }

    out.0
}
