use crate::error::Result;
use crate::models::{CarbMealType, Food, IngestionPhase, Macros, Meal};
use crate::planner::constants::*;

/// Carb-cycling class from the share of energy supplied by carbohydrate.
///
/// When calories are zero the energy is estimated from the macros (4/4/9).
pub fn classify_carb_meal(macros: &Macros) -> CarbMealType {
    let energy = if macros.calories > 0.0 {
        macros.calories
    } else {
        macros.carbs * KCAL_PER_G_CARBS
            + macros.protein * KCAL_PER_G_PROTEIN
            + macros.fat * KCAL_PER_G_FAT
    };
    if energy.is_nan() || energy <= 0.0 {
        return CarbMealType::Moderate;
    }

    let share = macros.carbs * KCAL_PER_G_CARBS / energy;
    if share >= HIGH_CARB_SHARE {
        CarbMealType::High
    } else if share <= LOW_CARB_SHARE {
        CarbMealType::Low
    } else {
        CarbMealType::Moderate
    }
}

/// Eating order key: explicit priority, else the phase default.
pub fn ingestion_rank(food: &Food) -> i32 {
    if let Some(priority) = food.ingestion_priority {
        return priority;
    }
    match food.ingestion_phase.unwrap_or(IngestionPhase::Other) {
        IngestionPhase::Fiber => INGESTION_ORDER_FIBER,
        IngestionPhase::Protein => INGESTION_ORDER_PROTEIN,
        IngestionPhase::Carb => INGESTION_ORDER_CARB,
        IngestionPhase::Fat => INGESTION_ORDER_FAT,
        IngestionPhase::Other => INGESTION_ORDER_OTHER,
    }
}

/// Copy of `meal` with items in suggested eating order (stable).
pub fn sort_by_ingestion<'a>(meal: &Meal<'a>) -> Result<Meal<'a>> {
    let mut items = meal.items().to_vec();
    items.sort_by_key(|item| ingestion_rank(item.food));
    meal.with_items(items)
}
