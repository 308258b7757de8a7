use std::fmt;
use std::iter::Sum;
use std::ops::Add;

use serde::{Deserialize, Serialize};

/// Macro-nutrients: energy in kcal, the rest in grams.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Macros {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

impl Macros {
    pub const ZERO: Macros = Macros {
        calories: 0.0,
        protein: 0.0,
        carbs: 0.0,
        fat: 0.0,
    };

    pub fn new(calories: f64, protein: f64, carbs: f64, fat: f64) -> Self {
        Self {
            calories,
            protein,
            carbs,
            fat,
        }
    }

    /// Multiply every field by `factor` (expected finite and >= 0).
    pub fn scale(&self, factor: f64) -> Self {
        debug_assert!(factor.is_finite() && factor >= 0.0);
        Self {
            calories: self.calories * factor,
            protein: self.protein * factor,
            carbs: self.carbs * factor,
            fat: self.fat * factor,
        }
    }

    /// Value of a single macro.
    #[inline]
    pub fn get(&self, key: Macro) -> f64 {
        match key {
            Macro::Calories => self.calories,
            Macro::Protein => self.protein,
            Macro::Carbs => self.carbs,
            Macro::Fat => self.fat,
        }
    }

    /// All fields finite and non-negative.
    pub fn is_valid(&self) -> bool {
        Macro::ALL
            .iter()
            .all(|&m| self.get(m).is_finite() && self.get(m) >= 0.0)
    }
}

impl Add for Macros {
    type Output = Macros;

    fn add(self, rhs: Macros) -> Macros {
        Macros {
            calories: self.calories + rhs.calories,
            protein: self.protein + rhs.protein,
            carbs: self.carbs + rhs.carbs,
            fat: self.fat + rhs.fat,
        }
    }
}

impl Sum for Macros {
    fn sum<I: Iterator<Item = Macros>>(iter: I) -> Macros {
        iter.fold(Macros::ZERO, |acc, m| acc + m)
    }
}

/// Micro-nutrients: fiber in grams, minerals and vitamin C in milligrams.
///
/// Absent fields read as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Micros {
    pub fiber: f64,
    pub sodium_mg: f64,
    pub potassium_mg: f64,
    pub calcium_mg: f64,
    pub iron_mg: f64,
    pub vitamin_c_mg: f64,
}

impl Micros {
    pub const ZERO: Micros = Micros {
        fiber: 0.0,
        sodium_mg: 0.0,
        potassium_mg: 0.0,
        calcium_mg: 0.0,
        iron_mg: 0.0,
        vitamin_c_mg: 0.0,
    };

    pub fn scale(&self, factor: f64) -> Self {
        debug_assert!(factor.is_finite() && factor >= 0.0);
        Self {
            fiber: self.fiber * factor,
            sodium_mg: self.sodium_mg * factor,
            potassium_mg: self.potassium_mg * factor,
            calcium_mg: self.calcium_mg * factor,
            iron_mg: self.iron_mg * factor,
            vitamin_c_mg: self.vitamin_c_mg * factor,
        }
    }
}

impl Add for Micros {
    type Output = Micros;

    fn add(self, rhs: Micros) -> Micros {
        Micros {
            fiber: self.fiber + rhs.fiber,
            sodium_mg: self.sodium_mg + rhs.sodium_mg,
            potassium_mg: self.potassium_mg + rhs.potassium_mg,
            calcium_mg: self.calcium_mg + rhs.calcium_mg,
            iron_mg: self.iron_mg + rhs.iron_mg,
            vitamin_c_mg: self.vitamin_c_mg + rhs.vitamin_c_mg,
        }
    }
}

impl Sum for Micros {
    fn sum<I: Iterator<Item = Micros>>(iter: I) -> Micros {
        iter.fold(Micros::ZERO, |acc, m| acc + m)
    }
}

/// Key for one macro-nutrient, in validation/reporting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Macro {
    Calories,
    Protein,
    Carbs,
    Fat,
}

impl Macro {
    pub const ALL: [Macro; 4] = [Macro::Calories, Macro::Protein, Macro::Carbs, Macro::Fat];

    pub fn label(&self) -> &'static str {
        match self {
            Macro::Calories => "Calories",
            Macro::Protein => "Protein",
            Macro::Carbs => "Carbs",
            Macro::Fat => "Fat",
        }
    }
}

impl fmt::Display for Macro {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
