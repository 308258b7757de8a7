use crate::error::{EngineError, Result};
use crate::models::{Food, FoodUnit};

fn grams_per_unit(food: &Food, unit: FoodUnit) -> Result<f64> {
    match food.grams_per_unit(unit) {
        Some(grams) => Ok(grams),
        None => Err(EngineError::UnitUndefined {
            food_id: food.id.clone(),
            unit,
        }),
    }
}

/// Convert a quantity in `unit` to grams using the food's unit table.
///
/// Grams pass through unchanged; quantity validation is left to the aggregator.
pub fn to_mass(food: &Food, quantity: f64, unit: FoodUnit) -> Result<f64> {
    if unit == FoodUnit::Gram {
        return Ok(quantity);
    }
    Ok(quantity * grams_per_unit(food, unit)?)
}

/// Inverse of [`to_mass`]: express `mass` grams as a quantity of `unit`.
pub fn from_mass(food: &Food, mass: f64, unit: FoodUnit) -> Result<f64> {
    if unit == FoodUnit::Gram {
        return Ok(mass);
    }
    Ok(mass / grams_per_unit(food, unit)?)
}

/// Quantity and unit used to present `mass` grams of a food.
///
/// Uses the food's default unit when it converts, grams otherwise.
pub fn display_portion(food: &Food, mass: f64) -> (f64, FoodUnit) {
    let unit = food.preferred_unit();
    match from_mass(food, mass, unit) {
        Ok(quantity) => (quantity, unit),
        Err(_) => (mass, FoodUnit::Gram),
    }
}
