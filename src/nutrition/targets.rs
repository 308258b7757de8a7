use serde::{Deserialize, Serialize};

use crate::config::MacroTolerances;
use crate::error::{EngineError, Result};
use crate::models::{Macro, Macros, MealWarning};

/// Closed acceptable interval for one macro.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacroRange {
    pub min: f64,
    pub max: f64,
}

impl MacroRange {
    #[inline]
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Acceptable intervals for all four macros.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacroTargetsRange {
    pub calories: MacroRange,
    pub protein: MacroRange,
    pub carbs: MacroRange,
    pub fat: MacroRange,
}

impl MacroTargetsRange {
    pub fn get(&self, key: Macro) -> MacroRange {
        match key {
            Macro::Calories => self.calories,
            Macro::Protein => self.protein,
            Macro::Carbs => self.carbs,
            Macro::Fat => self.fat,
        }
    }
}

/// A macro value outside its range (or not a finite non-negative number).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeViolation {
    pub key: Macro,
    pub value: f64,
    pub range: MacroRange,
}

fn non_negative(n: f64) -> f64 {
    if !n.is_finite() || n < 0.0 { 0.0 } else { n }
}

/// Ordered, non-negative range. Fails when a bound overflowed to infinity.
fn ensure_range(min: f64, max: f64, field: &str) -> Result<MacroRange> {
    if !min.is_finite() || !max.is_finite() {
        return Err(EngineError::InvalidRange {
            field: field.to_string(),
            reason: format!("bounds [{}, {}] are not finite", min, max),
        });
    }
    let lo = non_negative(min.min(max));
    let hi = non_negative(min.max(max));
    Ok(MacroRange { min: lo, max: hi })
}

/// Range `[t * (1 - tol), t * (1 + tol)]` around a target.
///
/// Negative or non-finite targets are treated as 0, and a zero target yields
/// the degenerate range `[0, 0]`. Fails if `tolerance_pct` is negative or
/// not finite, or if a bound overflows.
pub fn range_from_target_pct(target: f64, tolerance_pct: f64) -> Result<MacroRange> {
    if !tolerance_pct.is_finite() || tolerance_pct < 0.0 {
        return Err(EngineError::InvalidRange {
            field: "tolerancePct".to_string(),
            reason: format!("{} is not a finite number >= 0", tolerance_pct),
        });
    }
    let t = non_negative(target);
    if t == 0.0 {
        return Ok(MacroRange { min: 0.0, max: 0.0 });
    }
    ensure_range(
        t * (1.0 - tolerance_pct),
        t * (1.0 + tolerance_pct),
        "target",
    )
}

/// Per-macro ranges from point targets and tolerances.
pub fn targets_to_ranges(
    targets: &Macros,
    tolerances: &MacroTolerances,
) -> Result<MacroTargetsRange> {
    Ok(MacroTargetsRange {
        calories: range_from_target_pct(targets.calories, tolerances.calories)?,
        protein: range_from_target_pct(targets.protein, tolerances.protein)?,
        carbs: range_from_target_pct(targets.carbs, tolerances.carbs)?,
        fat: range_from_target_pct(targets.fat, tolerances.fat)?,
    })
}

/// Every macro that is not finite, negative, or outside its range.
pub fn check_macros_against_ranges(
    macros: &Macros,
    ranges: &MacroTargetsRange,
) -> Vec<RangeViolation> {
    Macro::ALL
        .iter()
        .filter_map(|&key| {
            let value = macros.get(key);
            let range = ranges.get(key);
            let ok = value.is_finite() && value >= 0.0 && range.contains(value);
            (!ok).then_some(RangeViolation { key, value, range })
        })
        .collect()
}

/// `MacroLow` / `MacroHigh` warnings, one per macro outside its range.
pub fn compute_macro_warnings(macros: &Macros, ranges: &MacroTargetsRange) -> Vec<MealWarning> {
    let mut warnings = Vec::new();
    for key in Macro::ALL {
        let value = macros.get(key);
        let range = ranges.get(key);
        if value < range.min {
            warnings.push(MealWarning::MacroLow {
                macro_key: key,
                value,
                target: range.min,
            });
        }
        if value > range.max {
            warnings.push(MealWarning::MacroHigh {
                macro_key: key,
                value,
                target: range.max,
            });
        }
    }
    warnings
}

/// Split daily targets evenly across `meals_per_day` meals.
pub fn per_meal_targets_from_daily(daily: &Macros, meals_per_day: u32) -> Result<Macros> {
    if meals_per_day == 0 {
        return Err(EngineError::InvalidRange {
            field: "mealsPerDay".to_string(),
            reason: "must be > 0".to_string(),
        });
    }
    Ok(daily.scale(1.0 / meals_per_day as f64))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_from_target() {
        let r = range_from_target_pct(100.0, 0.1).unwrap();
        assert!((r.min - 90.0).abs() < 1e-9);
        assert!((r.max - 110.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_target_is_degenerate() {
        let r = range_from_target_pct(0.0, 0.5).unwrap();
        assert_eq!(r, MacroRange { min: 0.0, max: 0.0 });
        assert!(r.contains(0.0));
        assert!(!r.contains(0.001));
    }

    #[test]
    fn test_wide_tolerance_is_rectified() {
        let r = range_from_target_pct(50.0, 1.5).unwrap();
        assert_eq!(r.min, 0.0);
        assert!((r.max - 125.0).abs() < 1e-9);
    }

    #[test]
    fn test_invalid_tolerance_fails() {
        assert!(matches!(
            range_from_target_pct(50.0, -0.1),
            Err(EngineError::InvalidRange { .. })
        ));
        assert!(range_from_target_pct(50.0, f64::NAN).is_err());
    }

    #[test]
    fn test_overflowing_bounds_fail() {
        assert!(matches!(
            range_from_target_pct(f64::MAX, 1.0),
            Err(EngineError::InvalidRange { .. })
        ));
        assert!(range_from_target_pct(1e300, 1e10).is_err());
        assert!(range_from_target_pct(f64::MAX, 0.0).is_ok());
    }

    #[test]
    fn test_warnings_and_violations_agree() {
        let ranges = targets_to_ranges(
            &Macros::new(600.0, 35.0, 60.0, 20.0),
            &MacroTolerances::default(),
        )
        .unwrap();
        let macros = Macros::new(600.0, 20.0, 90.0, 20.0);

        let violations = check_macros_against_ranges(&macros, &ranges);
        let keys: Vec<Macro> = violations.iter().map(|v| v.key).collect();
        assert_eq!(keys, vec![Macro::Protein, Macro::Carbs]);

        let warnings = compute_macro_warnings(&macros, &ranges);
        assert_eq!(warnings.len(), 2);
        assert!(matches!(
            warnings[0],
            MealWarning::MacroLow {
                macro_key: Macro::Protein,
                ..
            }
        ));
        assert!(matches!(
            warnings[1],
            MealWarning::MacroHigh {
                macro_key: Macro::Carbs,
                ..
            }
        ));
    }

    #[test]
    fn test_per_meal_targets() {
        let daily = Macros::new(2400.0, 150.0, 240.0, 90.0);
        let per_meal = per_meal_targets_from_daily(&daily, 3).unwrap();
        assert!((per_meal.calories - 800.0).abs() < 1e-9);
        assert!((per_meal.fat - 30.0).abs() < 1e-9);
        assert!(per_meal_targets_from_daily(&daily, 0).is_err());
    }
}
