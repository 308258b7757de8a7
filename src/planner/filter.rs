use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::Food;

/// Optional predicates restricting which foods may appear in meals.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Constraints {
    /// Food must carry at least one of these tags.
    pub include_tags: Option<Vec<String>>,
    /// Food must carry none of these tags.
    pub exclude_tags: Option<Vec<String>>,
    pub max_calories_per_100g: Option<f64>,
    pub min_protein_per_100g: Option<f64>,
    /// Case-insensitive substring of the display name.
    pub text_query: Option<String>,
    pub exclude_food_ids: Option<Vec<String>>,
}

impl Constraints {
    /// Normalized text query, `None` when absent or blank.
    fn query(&self) -> Option<String> {
        self.text_query
            .as_deref()
            .map(|q| q.trim().to_lowercase())
            .filter(|q| !q.is_empty())
    }

    /// True when `food` satisfies every active predicate.
    pub fn accepts(&self, food: &Food) -> bool {
        self.accepts_with_query(food, self.query().as_deref())
    }

    fn accepts_with_query(&self, food: &Food, query: Option<&str>) -> bool {
        if let Some(include) = self.include_tags.as_ref().filter(|t| !t.is_empty()) {
            if !include.iter().any(|tag| food.has_tag(tag)) {
                return false;
            }
        }
        if let Some(exclude) = &self.exclude_tags {
            if exclude.iter().any(|tag| food.has_tag(tag)) {
                return false;
            }
        }
        if let Some(max) = self.max_calories_per_100g {
            if food.macros_per_100g.calories > max {
                return false;
            }
        }
        if let Some(min) = self.min_protein_per_100g {
            if food.macros_per_100g.protein < min {
                return false;
            }
        }
        if let Some(ids) = &self.exclude_food_ids {
            if ids.iter().any(|id| *id == food.id) {
                return false;
            }
        }
        match query {
            Some(q) => food.name.to_lowercase().contains(q),
            None => true,
        }
    }
}

/// Foods satisfying `constraints`, in input order.
pub fn filter_foods<'a>(foods: &'a [Food], constraints: &Constraints) -> Vec<&'a Food> {
    let query = constraints.query();
    let eligible: Vec<&Food> = foods
        .iter()
        .filter(|food| constraints.accepts_with_query(food, query.as_deref()))
        .collect();

    debug!(
        total = foods.len(),
        eligible = eligible.len(),
        "filtered foods"
    );
    eligible
}
