use crate::error::{EngineError, Result};
use crate::models::{Food, Macros, Meal, MealItem, Micros};
use crate::nutrition::units::to_mass;

fn check_mass(mass: f64) -> Result<f64> {
    if !mass.is_finite() || mass <= 0.0 {
        return Err(EngineError::InvalidQuantity(mass));
    }
    Ok(mass)
}

/// Macros for `mass` grams of a food.
pub fn macros_for_portion(food: &Food, mass: f64) -> Result<Macros> {
    let mass = check_mass(mass)?;
    Ok(food.macros_per_100g.scale(mass / 100.0))
}

/// Macros for one meal item, converting its unit to grams first.
pub fn macros_for_item(item: &MealItem<'_>) -> Result<Macros> {
    let mass = to_mass(item.food, item.quantity, item.unit)?;
    macros_for_portion(item.food, mass)
}

/// Total macros of a meal, summed in item order.
pub fn macros_for_meal(meal: &Meal<'_>) -> Result<Macros> {
    meal.items().iter().map(macros_for_item).sum()
}

/// Micros for `mass` grams of a food; `None` when the food declares no profile.
pub fn micros_for_portion(food: &Food, mass: f64) -> Result<Option<Micros>> {
    let mass = check_mass(mass)?;
    Ok(food.micros_per_100g.map(|m| m.scale(mass / 100.0)))
}

pub fn micros_for_item(item: &MealItem<'_>) -> Result<Option<Micros>> {
    let mass = to_mass(item.food, item.quantity, item.unit)?;
    micros_for_portion(item.food, mass)
}

/// Total micros of a meal; foods without a profile contribute nothing.
pub fn micros_for_meal(meal: &Meal<'_>) -> Result<Micros> {
    let mut total = Micros::ZERO;
    for item in meal.items() {
        if let Some(micros) = micros_for_item(item)? {
            total = total + micros;
        }
    }
    Ok(total)
}
