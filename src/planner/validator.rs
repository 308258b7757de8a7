use crate::config::EngineConfig;
use crate::models::{Macro, Macros, Meal};

/// Outcome of checking a meal against its targets.
#[derive(Debug, Clone, PartialEq)]
pub enum Validation {
    Accepted,
    Rejected(Vec<String>),
}

impl Validation {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Validation::Accepted)
    }

    pub fn reasons(&self) -> &[String] {
        match self {
            Validation::Accepted => &[],
            Validation::Rejected(reasons) => reasons,
        }
    }
}

/// Zero target requires exactly zero; otherwise `target * (1 ± tol)` inclusive.
fn within_tolerance(value: f64, target: f64, tolerance: f64) -> bool {
    if target == 0.0 {
        return value == 0.0;
    }
    let min = target * (1.0 - tolerance);
    let max = target * (1.0 + tolerance);
    value >= min && value <= max
}

/// Check hard limits and tolerance windows, collecting every failure.
///
/// Reasons are ordered: hard max, hard min, then calories, protein, carbs, fat.
pub fn validate_meal(
    _meal: &Meal<'_>,
    macros: &Macros,
    targets: &Macros,
    config: &EngineConfig,
) -> Validation {
    let mut reasons = Vec::new();

    let hard = &config.hard_limits;
    if let Some(max) = hard.max_meal_calories {
        if macros.calories > max {
            reasons.push(format!(
                "Calories above hard max ({:.0} > {})",
                macros.calories, max
            ));
        }
    }
    if let Some(min) = hard.min_meal_calories {
        if macros.calories < min {
            reasons.push(format!(
                "Calories below hard min ({:.0} < {})",
                macros.calories, min
            ));
        }
    }

    for key in Macro::ALL {
        let tolerance = config.tolerances_pct.get(key);
        if !within_tolerance(macros.get(key), targets.get(key), tolerance) {
            reasons.push(format!("{} out of tolerance", key.label()));
        }
    }

    if reasons.is_empty() {
        Validation::Accepted
    } else {
        Validation::Rejected(reasons)
    }
}
