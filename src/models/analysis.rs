use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::{FoodCategory, Macro, Macros, Meal, Micros};

/// A detected problem with a meal relative to its target ranges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MealWarning {
    /// Value below the acceptable range; `target` is the range minimum.
    MacroLow {
        macro_key: Macro,
        value: f64,
        target: f64,
    },
    /// Value above the acceptable range; `target` is the range maximum.
    MacroHigh {
        macro_key: Macro,
        value: f64,
        target: f64,
    },
    CaloriesOutOfBounds { calories: f64 },
    ConstraintTooStrict { message: String },
}

impl MealWarning {
    /// True for per-macro range violations.
    pub fn is_macro_range(&self) -> bool {
        matches!(
            self,
            MealWarning::MacroLow { .. } | MealWarning::MacroHigh { .. }
        )
    }
}

impl fmt::Display for MealWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MealWarning::MacroLow {
                macro_key,
                value,
                target,
            } => write!(f, "{} low ({:.1} < {:.1})", macro_key, value, target),
            MealWarning::MacroHigh {
                macro_key,
                value,
                target,
            } => write!(f, "{} high ({:.1} > {:.1})", macro_key, value, target),
            MealWarning::CaloriesOutOfBounds { calories } => {
                write!(f, "Calories out of hard limits ({:.0})", calories)
            }
            MealWarning::ConstraintTooStrict { message } => f.write_str(message),
        }
    }
}

/// A non-authoritative hint on how to improve a meal or the request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MealSuggestion {
    IncreasePortion { food_id: String, reason: String },
    AddFood {
        category: FoodCategory,
        reason: String,
    },
    RelaxConstraint { constraint: String, reason: String },
}

impl fmt::Display for MealSuggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MealSuggestion::IncreasePortion { food_id, reason } => {
                write!(f, "Increase portion of {}: {}", food_id, reason)
            }
            MealSuggestion::AddFood { category, reason } => {
                write!(f, "Add a {} food: {}", category, reason)
            }
            MealSuggestion::RelaxConstraint { constraint, reason } => {
                write!(f, "Relax {}: {}", constraint, reason)
            }
        }
    }
}

/// Carb-cycling class of a meal, by share of energy from carbohydrate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CarbMealType {
    High,
    Moderate,
    Low,
}

impl fmt::Display for CarbMealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CarbMealType::High => "high",
            CarbMealType::Moderate => "moderate",
            CarbMealType::Low => "low",
        };
        f.write_str(s)
    }
}

/// A meal with its computed nutrients, score and advisory output.
///
/// Derived and recomputable from the meal; never stored on its own.
#[derive(Debug, Clone, PartialEq)]
pub struct MealAnalysis<'a> {
    pub meal: Meal<'a>,
    pub macros: Macros,
    pub micros: Micros,
    pub score: f64,
    pub warnings: Vec<MealWarning>,
    pub suggestions: Vec<MealSuggestion>,
    pub carb_type: Option<CarbMealType>,
}

impl<'a> MealAnalysis<'a> {
    pub fn new(meal: Meal<'a>, macros: Macros, micros: Micros, score: f64) -> Self {
        Self {
            meal,
            macros,
            micros,
            score,
            warnings: Vec::new(),
            suggestions: Vec::new(),
            carb_type: None,
        }
    }
}

/// Accepted, scored meal in the engine output.
pub type RankedMeal<'a> = MealAnalysis<'a>;
