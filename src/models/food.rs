use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::{Macros, Micros};

/// Nutritional category used by the meal template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FoodCategory {
    Protein,
    Carb,
    Vegetable,
    Fat,
    Fruit,
    Dairy,
    Mixed,
}

impl FoodCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            FoodCategory::Protein => "protein",
            FoodCategory::Carb => "carb",
            FoodCategory::Vegetable => "vegetable",
            FoodCategory::Fat => "fat",
            FoodCategory::Fruit => "fruit",
            FoodCategory::Dairy => "dairy",
            FoodCategory::Mixed => "mixed",
        }
    }
}

impl fmt::Display for FoodCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Unit a quantity can be expressed in. `Gram` is the universal mass unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FoodUnit {
    #[serde(rename = "g")]
    Gram,
    #[serde(rename = "piece")]
    Piece,
    #[serde(rename = "tbsp")]
    Tablespoon,
    #[serde(rename = "tsp")]
    Teaspoon,
    #[serde(rename = "portion")]
    Portion,
}

impl FoodUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            FoodUnit::Gram => "g",
            FoodUnit::Piece => "piece",
            FoodUnit::Tablespoon => "tbsp",
            FoodUnit::Teaspoon => "tsp",
            FoodUnit::Portion => "portion",
        }
    }
}

impl fmt::Display for FoodUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Phase in which a food is best eaten within a meal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IngestionPhase {
    Fiber,
    Protein,
    Carb,
    Fat,
    Other,
}

/// A food item with nutrient values per 100 g.
///
/// Optional members model the evolving catalog schema; consumers branch on
/// presence rather than on a food "kind".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Food {
    pub id: String,

    pub name: String,

    pub category: FoodCategory,

    pub macros_per_100g: Macros,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub micros_per_100g: Option<Micros>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_unit: Option<FoodUnit>,

    /// Grams per named unit, e.g. `piece: 60`.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub units: BTreeMap<FoodUnit, f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub popularity: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingestion_phase: Option<IngestionPhase>,

    /// Lower eats earlier; overrides the phase default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingestion_priority: Option<i32>,
}

impl Food {
    /// Minimal food with only the required members set.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: FoodCategory,
        macros_per_100g: Macros,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category,
            macros_per_100g,
            micros_per_100g: None,
            tags: Vec::new(),
            aliases: Vec::new(),
            default_unit: None,
            units: BTreeMap::new(),
            popularity: None,
            ingestion_phase: None,
            ingestion_priority: None,
        }
    }

    /// Protein per kcal, with energy floored at 1 kcal.
    #[inline]
    pub fn protein_density(&self) -> f64 {
        self.macros_per_100g.protein / self.macros_per_100g.calories.max(1.0)
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Grams in one `unit`, when the unit table declares a positive value.
    pub fn grams_per_unit(&self, unit: FoodUnit) -> Option<f64> {
        if unit == FoodUnit::Gram {
            return Some(1.0);
        }
        self.units
            .get(&unit)
            .copied()
            .filter(|g| g.is_finite() && *g > 0.0)
    }

    /// True when `unit` is grams or a convertible entry of the unit table.
    pub fn supports_unit(&self, unit: FoodUnit) -> bool {
        self.grams_per_unit(unit).is_some()
    }

    /// Preferred display unit: the default unit if convertible, else grams.
    pub fn preferred_unit(&self) -> FoodUnit {
        match self.default_unit {
            Some(unit) if self.supports_unit(unit) => unit,
            _ => FoodUnit::Gram,
        }
    }

    /// Basic validation: non-negative finite macros and a non-empty id.
    pub fn is_valid(&self) -> bool {
        !self.id.trim().is_empty()
            && self.macros_per_100g.is_valid()
            && self.units.values().all(|g| g.is_finite() && *g > 0.0)
    }

    /// Debug string for logging.
    pub fn debug_string(&self) -> String {
        let m = &self.macros_per_100g;
        format!(
            "{} ({}): {} kcal, P:{} C:{} F:{} [{}]",
            self.name, self.id, m.calories, m.protein, m.carbs, m.fat, self.category
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_food() -> Food {
        let mut food = Food::new(
            "eggs_whole",
            "Whole eggs",
            FoodCategory::Protein,
            Macros::new(155.0, 13.0, 1.1, 11.0),
        );
        food.default_unit = Some(FoodUnit::Piece);
        food.units.insert(FoodUnit::Piece, 60.0);
        food.tags = vec!["high_protein".to_string()];
        food
    }

    #[test]
    fn test_protein_density() {
        let food = sample_food();
        assert!((food.protein_density() - 13.0 / 155.0).abs() < 1e-12);

        let water = Food::new("water", "Water", FoodCategory::Mixed, Macros::ZERO);
        assert_eq!(water.protein_density(), 0.0);
    }

    #[test]
    fn test_preferred_unit_requires_conversion() {
        let mut food = sample_food();
        assert_eq!(food.preferred_unit(), FoodUnit::Piece);

        food.default_unit = Some(FoodUnit::Tablespoon);
        assert_eq!(food.preferred_unit(), FoodUnit::Gram);

        food.units.insert(FoodUnit::Tablespoon, 0.0);
        assert_eq!(food.preferred_unit(), FoodUnit::Gram);
    }

    #[test]
    fn test_is_valid() {
        let food = sample_food();
        assert!(food.is_valid());

        let mut invalid = sample_food();
        invalid.macros_per_100g.fat = -1.0;
        assert!(!invalid.is_valid());
    }

    #[test]
    fn test_json_field_names() {
        let json = r#"{
            "id": "olive_oil",
            "name": "Olive oil",
            "category": "fat",
            "macrosPer100g": {"calories": 884, "protein": 0, "carbs": 0, "fat": 100},
            "defaultUnit": "tbsp",
            "units": {"tbsp": 13.5, "tsp": 4.5}
        }"#;
        let food: Food = serde_json::from_str(json).unwrap();
        assert_eq!(food.category, FoodCategory::Fat);
        assert_eq!(food.grams_per_unit(FoodUnit::Tablespoon), Some(13.5));
        assert!(food.tags.is_empty());
        assert!(food.micros_per_100g.is_none());
    }
}
