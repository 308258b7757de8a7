use std::collections::HashMap;

use strsim::jaro_winkler;

use crate::catalog::dedupe_by_id;
use crate::error::{EngineError, Result};
use crate::models::{Food, FoodCategory};

/// Minimum Jaro-Winkler similarity for a "did you mean" proposal.
const SUGGESTION_THRESHOLD: f64 = 0.7;

/// Food records in load order, indexed by id.
#[derive(Debug, Clone, Default)]
pub struct FoodCatalog {
    foods: Vec<Food>,
    by_id: HashMap<String, usize>,
}

impl FoodCatalog {
    /// Build a catalog; duplicate ids keep the last record.
    pub fn new(foods: Vec<Food>) -> Self {
        let foods = dedupe_by_id(foods);
        let by_id = foods
            .iter()
            .enumerate()
            .map(|(i, f)| (f.id.clone(), i))
            .collect();
        Self { foods, by_id }
    }

    pub fn foods(&self) -> &[Food] {
        &self.foods
    }

    pub fn len(&self) -> usize {
        self.foods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.foods.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Food> {
        self.by_id.get(id).map(|&i| &self.foods[i])
    }

    /// Like [`get`](Self::get) but fails with `FoodNotFound`.
    pub fn require(&self, id: &str) -> Result<&Food> {
        self.get(id)
            .ok_or_else(|| EngineError::FoodNotFound(id.to_string()))
    }

    pub fn by_category(&self, category: FoodCategory) -> Vec<&Food> {
        self.foods
            .iter()
            .filter(|f| f.category == category)
            .collect()
    }

    pub fn by_tag(&self, tag: &str) -> Vec<&Food> {
        self.foods.iter().filter(|f| f.has_tag(tag)).collect()
    }

    /// Foods whose record fails basic validation.
    pub fn invalid_foods(&self) -> Vec<&Food> {
        self.foods.iter().filter(|f| !f.is_valid()).collect()
    }

    /// Closest known id to `query` by Jaro-Winkler similarity, if close enough.
    pub fn suggest_id(&self, query: &str) -> Option<&str> {
        let query = query.trim().to_lowercase();
        let mut candidates: Vec<(&Food, f64)> = self
            .foods
            .iter()
            .map(|f| (f, jaro_winkler(&f.id.to_lowercase(), &query)))
            .filter(|(_, score)| *score > SUGGESTION_THRESHOLD)
            .collect();

        candidates.sort_by(|a, b| b.1.total_cmp(&a.1));
        candidates.first().map(|(f, _)| f.id.as_str())
    }

    /// Ids from `ids` that are not in the catalog, each with its closest match.
    pub fn unknown_ids<'s>(&self, ids: &'s [String]) -> Vec<(&'s str, Option<&str>)> {
        ids.iter()
            .filter(|id| self.get(id).is_none())
            .map(|id| (id.as_str(), self.suggest_id(id)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Macros;

    fn catalog() -> FoodCatalog {
        let mut tofu = Food::new(
            "tofu_firm",
            "Tofu (firm)",
            FoodCategory::Protein,
            Macros::new(144.0, 17.0, 3.0, 8.0),
        );
        tofu.tags = vec!["vegan".to_string()];
        FoodCatalog::new(vec![
            Food::new(
                "chicken_breast",
                "Chicken breast",
                FoodCategory::Protein,
                Macros::new(165.0, 31.0, 0.0, 3.6),
            ),
            tofu,
            Food::new(
                "rice_white",
                "White rice",
                FoodCategory::Carb,
                Macros::new(130.0, 2.7, 28.0, 0.3),
            ),
        ])
    }

    #[test]
    fn test_lookup() {
        let catalog = catalog();
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.get("rice_white").unwrap().name, "White rice");
        assert!(matches!(
            catalog.require("salmon"),
            Err(EngineError::FoodNotFound(_))
        ));
        assert_eq!(catalog.by_category(FoodCategory::Protein).len(), 2);
        assert_eq!(catalog.by_tag("vegan")[0].id, "tofu_firm");
        assert!(catalog.invalid_foods().is_empty());
    }

    #[test]
    fn test_suggest_id() {
        let catalog = catalog();
        assert_eq!(catalog.suggest_id("chiken_breast"), Some("chicken_breast"));
        assert_eq!(catalog.suggest_id("zzzz"), None);

        let ids = vec!["rice_white".to_string(), "tofu_frim".to_string()];
        let unknown = catalog.unknown_ids(&ids);
        assert_eq!(unknown, vec![("tofu_frim", Some("tofu_firm"))]);
    }
}
