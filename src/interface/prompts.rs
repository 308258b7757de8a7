use dialoguer::{Confirm, Input};

use crate::catalog::FoodCatalog;
use crate::error::{EngineError, Result};
use crate::models::{Macro, Macros};

/// Prompt for a non-negative number, offering `default`.
pub fn prompt_number(prompt: &str, default: f64) -> Result<f64> {
    let input: String = Input::new()
        .with_prompt(prompt)
        .default(format!("{}", default))
        .interact_text()?;

    let value: f64 = input
        .trim()
        .parse()
        .map_err(|_| EngineError::InvalidInput(format!("Invalid number: {}", input)))?;

    if !value.is_finite() || value < 0.0 {
        return Err(EngineError::InvalidInput(format!(
            "{} must be a finite number >= 0",
            prompt
        )));
    }
    Ok(value)
}

/// Prompt for per-meal macro targets, one macro at a time.
pub fn prompt_targets(defaults: &Macros) -> Result<Macros> {
    let mut values = [0.0; 4];
    for (slot, key) in values.iter_mut().zip(Macro::ALL) {
        let unit = if key == Macro::Calories { "kcal" } else { "g" };
        *slot = prompt_number(
            &format!("Target {} per meal ({})", key.label().to_lowercase(), unit),
            defaults.get(key),
        )?;
    }
    Ok(Macros::new(values[0], values[1], values[2], values[3]))
}

/// Prompt for yes/no confirmation.
pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}

/// Resolve a typed food id, offering the closest match when it is unknown.
///
/// Returns `None` when there is no match or the user declines the proposal.
pub fn resolve_food_id(catalog: &FoodCatalog, input: &str) -> Result<Option<String>> {
    let input = input.trim();
    if catalog.get(input).is_some() {
        return Ok(Some(input.to_string()));
    }

    match catalog.suggest_id(input) {
        Some(candidate) => {
            let accepted = prompt_yes_no(&format!("Did you mean '{}'?", candidate), true)?;
            Ok(accepted.then(|| candidate.to_string()))
        }
        None => {
            println!("No matching food found for '{}'", input);
            Ok(None)
        }
    }
}
