use std::collections::HashMap;

use tracing::{debug, warn};

use crate::config::EngineConfig;
use crate::error::Result;
use crate::models::{Food, FoodCategory, Meal, MealAnalysis, MealItem};
use crate::nutrition::{density_score, display_portion, macros_for_meal, micros_for_meal};
use crate::planner::constants::*;

/// Order foods by protein density (descending), then name, then id.
pub fn rank_foods_for_generation<'a>(foods: &[&'a Food]) -> Vec<&'a Food> {
    let mut ranked: Vec<&Food> = foods.to_vec();
    ranked.sort_by(|a, b| {
        b.protein_density()
            .total_cmp(&a.protein_density())
            .then_with(|| a.name.cmp(&b.name))
            .then_with(|| a.id.cmp(&b.id))
    });
    ranked
}

/// Portion options in grams, sorted ascending; `[100]` when none are configured.
pub(crate) fn portion_options(config: &EngineConfig) -> Vec<f64> {
    let mut options: Vec<f64> = config
        .portion_grams_options
        .iter()
        .copied()
        .filter(|g| g.is_finite() && *g > 0.0)
        .collect();
    if options.is_empty() {
        options.push(FALLBACK_PORTION_GRAMS);
    }
    options.sort_by(|a, b| a.total_cmp(b));
    options
}

/// Template index at which candidate `index` starts its walk.
fn template_offset(
    index: usize,
    option_count: usize,
    config: &EngineConfig,
    items_per_meal: usize,
) -> usize {
    let template_len = config.category_plan.len();
    if !config.rotate_template || template_len <= items_per_meal {
        return 0;
    }
    (index / option_count) % template_len
}

/// Builds candidate meals by walking the category template over the ranked pool.
struct CandidateBuilder<'a> {
    by_category: HashMap<FoodCategory, Vec<&'a Food>>,
    cursor: usize,
}

impl<'a> CandidateBuilder<'a> {
    fn new(ranked: &[&'a Food]) -> Self {
        let mut by_category: HashMap<FoodCategory, Vec<&'a Food>> = HashMap::new();
        for food in ranked {
            by_category.entry(food.category).or_default().push(*food);
        }
        Self {
            by_category,
            cursor: 0,
        }
    }

    fn pick(&self, category: FoodCategory) -> Option<&'a Food> {
        let foods = self.by_category.get(&category)?;
        if foods.is_empty() {
            return None;
        }
        Some(foods[self.cursor % foods.len()])
    }

    fn build_items(
        &mut self,
        template: &[FoodCategory],
        offset: usize,
        grams: f64,
        items_per_meal: usize,
        max_same: usize,
    ) -> Vec<MealItem<'a>> {
        let mut items: Vec<MealItem<'a>> = Vec::new();
        let mut used: HashMap<&str, usize> = HashMap::new();

        for step in 0..template.len() {
            if items.len() >= items_per_meal {
                break;
            }
            let category = template[(offset + step) % template.len()];
            let Some(food) = self.pick(category) else {
                continue;
            };

            let count = used.get(food.id.as_str()).copied().unwrap_or(0);
            if count >= max_same {
                continue;
            }

            let (quantity, unit) = display_portion(food, grams);
            match MealItem::new(food, quantity, unit) {
                Ok(item) => {
                    used.insert(food.id.as_str(), count + 1);
                    items.push(item);
                    self.cursor += 1;
                }
                Err(e) => warn!(food = %food.id, error = %e, "skipping unusable portion"),
            }
        }
        items
    }
}

/// Analyze a candidate with the generator-local score (nutrient density).
fn analyze_candidate<'a>(meal: Meal<'a>) -> Result<MealAnalysis<'a>> {
    let macros = macros_for_meal(&meal)?;
    let micros = micros_for_meal(&meal)?;
    let score = density_score(&macros, &micros);
    Ok(MealAnalysis::new(meal, macros, micros, score))
}

/// Generate analyzed candidate meals from an eligible food pool.
///
/// At most `candidates_to_generate` meals are produced, each with at most
/// `items_per_meal` items. Output is sorted by density score, descending,
/// with ties kept in generation order.
pub fn generate_candidates<'a>(foods: &[&'a Food], config: &EngineConfig) -> Vec<MealAnalysis<'a>> {
    let ranked = rank_foods_for_generation(foods);
    if ranked.is_empty() {
        return Vec::new();
    }

    let items_per_meal = config
        .items_per_meal
        .clamp(MIN_ITEMS_PER_MEAL, MAX_ITEMS_PER_MEAL);
    let candidates = config
        .candidates_to_generate
        .clamp(MIN_CANDIDATES, MAX_CANDIDATES);
    let options = portion_options(config);

    let mut builder = CandidateBuilder::new(&ranked);
    let mut analyzed: Vec<MealAnalysis<'a>> = Vec::with_capacity(candidates);

    for i in 0..candidates {
        let grams = options[i % options.len()];
        let offset = template_offset(i, options.len(), config, items_per_meal);
        let items = builder.build_items(
            &config.category_plan,
            offset,
            grams,
            items_per_meal,
            config.max_same_food_per_meal,
        );
        if items.is_empty() {
            continue;
        }

        let id = format!("meal_{}", i + 1);
        match Meal::new(id.clone(), items).and_then(analyze_candidate) {
            Ok(analysis) => analyzed.push(analysis),
            Err(e) => warn!(meal = %id, error = %e, "skipping candidate"),
        }
    }

    analyzed.sort_by(|a, b| b.score.total_cmp(&a.score));
    debug!(
        pool = ranked.len(),
        generated = analyzed.len(),
        "generated candidates"
    );
    analyzed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FoodUnit, Macros};

    fn food(id: &str, category: FoodCategory, macros: Macros) -> Food {
        Food::new(id, id, category, macros)
    }

    fn pool() -> Vec<Food> {
        let mut oil = food(
            "olive_oil",
            FoodCategory::Fat,
            Macros::new(884.0, 0.0, 0.0, 100.0),
        );
        oil.default_unit = Some(FoodUnit::Tablespoon);
        oil.units.insert(FoodUnit::Tablespoon, 13.5);
        vec![
            food(
                "chicken_breast",
                FoodCategory::Protein,
                Macros::new(165.0, 31.0, 0.0, 3.6),
            ),
            food(
                "rice_white",
                FoodCategory::Carb,
                Macros::new(130.0, 2.7, 28.0, 0.3),
            ),
            food(
                "broccoli",
                FoodCategory::Vegetable,
                Macros::new(35.0, 2.4, 7.2, 0.4),
            ),
            oil,
        ]
    }

    fn protein(id: &str, macros: Macros) -> Food {
        food(id, FoodCategory::Protein, macros)
    }

    fn ids<'a>(foods: &[&'a Food]) -> Vec<&'a str> {
        foods.iter().map(|f| f.id.as_str()).collect()
    }

    fn literal_config() -> EngineConfig {
        EngineConfig {
            rotate_template: false,
            fit_portions: false,
            ..EngineConfig::default()
        }
    }

    #[test]
    fn test_rank_by_protein_density_then_name() {
        let a = protein("b_id", Macros::new(100.0, 10.0, 0.0, 0.0));
        let b = protein("a_id", Macros::new(200.0, 20.0, 0.0, 0.0));
        let c = protein("c_id", Macros::new(100.0, 30.0, 0.0, 0.0));
        let ranked = rank_foods_for_generation(&[&a, &b, &c]);
        assert_eq!(ids(&ranked), vec!["c_id", "a_id", "b_id"]);
    }

    #[test]
    fn test_same_name_ties_break_on_id() {
        let macros = Macros::new(165.0, 31.0, 0.0, 3.6);
        let second = Food::new("chicken_2", "Chicken", FoodCategory::Protein, macros);
        let first = Food::new("chicken_1", "Chicken", FoodCategory::Protein, macros);
        let forward = rank_foods_for_generation(&[&second, &first]);
        let backward = rank_foods_for_generation(&[&first, &second]);
        assert_eq!(ids(&forward), vec!["chicken_1", "chicken_2"]);
        assert_eq!(ids(&forward), ids(&backward));
    }

    #[test]
    fn test_rank_ignores_input_order_with_nan_density() {
        let a = protein("a_id", Macros::new(100.0, 10.0, 0.0, 0.0));
        let b = protein("b_id", Macros::new(100.0, f64::NAN, 0.0, 0.0));
        let c = protein("c_id", Macros::new(100.0, 30.0, 0.0, 0.0));
        let d = protein("d_id", Macros::new(100.0, 20.0, 0.0, 0.0));
        let expected = ids(&rank_foods_for_generation(&[&a, &b, &c, &d]));
        for order in [[&d, &c, &b, &a], [&b, &a, &d, &c], [&c, &d, &a, &b]] {
            assert_eq!(ids(&rank_foods_for_generation(&order)), expected);
        }
        let finite: Vec<&str> = expected
            .into_iter()
            .filter(|id| *id != "b_id")
            .collect();
        assert_eq!(finite, vec!["c_id", "d_id", "a_id"]);
    }

    #[test]
    fn test_portion_options_fallback_and_sort() {
        let mut config = EngineConfig::default();
        config.portion_grams_options = vec![150.0, 80.0];
        assert_eq!(portion_options(&config), vec![80.0, 150.0]);
        config.portion_grams_options.clear();
        assert_eq!(portion_options(&config), vec![100.0]);
    }

    #[test]
    fn test_literal_walk_stops_at_item_budget() {
        let foods = pool();
        let refs: Vec<&Food> = foods.iter().collect();
        let meals = generate_candidates(&refs, &literal_config());

        assert_eq!(meals.len(), 80);
        for analysis in &meals {
            let categories: Vec<FoodCategory> = analysis
                .meal
                .items()
                .iter()
                .map(|i| i.food.category)
                .collect();
            assert_eq!(
                categories,
                vec![
                    FoodCategory::Protein,
                    FoodCategory::Carb,
                    FoodCategory::Vegetable,
                ]
            );
        }
    }

    #[test]
    fn test_rotation_reaches_every_category() {
        let foods = pool();
        let refs: Vec<&Food> = foods.iter().collect();
        let meals = generate_candidates(&refs, &EngineConfig::default());

        let with_fat = meals
            .iter()
            .flat_map(|m| m.meal.items())
            .filter(|i| i.food.category == FoodCategory::Fat)
            .count();
        assert!(with_fat > 0);
        let oil_item = meals
            .iter()
            .flat_map(|m| m.meal.items())
            .find(|i| i.food.id == "olive_oil")
            .unwrap();
        assert_eq!(oil_item.unit, FoodUnit::Tablespoon);
    }

    #[test]
    fn test_candidate_budget_is_clamped() {
        let foods = pool();
        let refs: Vec<&Food> = foods.iter().collect();
        let mut config = literal_config();
        config.candidates_to_generate = 0;
        config.items_per_meal = 50;
        let meals = generate_candidates(&refs, &config);
        assert_eq!(meals.len(), 1);
        assert_eq!(meals[0].meal.len(), 4);
    }

    #[test]
    fn test_max_same_food_is_enforced() {
        let chicken = protein("chicken_breast", Macros::new(165.0, 31.0, 0.0, 3.6));
        let mut config = literal_config();
        config.category_plan = vec![FoodCategory::Protein, FoodCategory::Protein];
        config.items_per_meal = 2;
        let meals = generate_candidates(&[&chicken], &config);
        assert!(meals.iter().all(|m| m.meal.len() == 1));
    }

    #[test]
    fn test_empty_pool_generates_nothing() {
        assert!(generate_candidates(&[], &EngineConfig::default()).is_empty());
    }
}
