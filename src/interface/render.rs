use crate::models::{Food, FoodUnit, Macros, Meal, MealAnalysis, MealItem};
use crate::nutrition::to_mass;
use crate::planner::{EngineMeta, EngineResult, Rejection, sort_by_ingestion};

fn format_quantity(quantity: f64) -> String {
    if (quantity - quantity.round()).abs() < 1e-9 {
        format!("{:.0}", quantity)
    } else {
        format!("{:.1}", quantity)
    }
}

/// One line per item, e.g. `1 tbsp Olive oil (13.5 g)`.
fn format_item(item: &MealItem<'_>) -> String {
    let portion = format!("{} {}", format_quantity(item.quantity), item.unit);
    match to_mass(item.food, item.quantity, item.unit) {
        Ok(grams) if item.unit != FoodUnit::Gram => {
            format!("{} {} ({:.1} g)", portion, item.food.name, grams)
        }
        _ => format!("{} {}", portion, item.food.name),
    }
}

fn format_macros(macros: &Macros) -> String {
    format!(
        "{:.0} kcal | P {:.1} g | C {:.1} g | F {:.1} g",
        macros.calories, macros.protein, macros.carbs, macros.fat
    )
}

fn display_items(meal: &Meal<'_>) {
    let ordered = sort_by_ingestion(meal).unwrap_or_else(|_| meal.clone());
    for item in ordered.items() {
        println!("       - {}", format_item(item));
    }
}

fn display_advisory(analysis: &MealAnalysis<'_>) {
    for warning in &analysis.warnings {
        println!("       ! {}", warning);
    }
    for suggestion in &analysis.suggestions {
        println!("       > {}", suggestion);
    }
}

/// Display the top accepted meals.
pub fn display_ranked_meals(result: &EngineResult<'_>, top: usize) {
    if result.ranked.is_empty() {
        println!("No meal satisfies the targets with the current constraints.");
        return;
    }

    println!();
    println!("=== Recommended Meals ===");
    println!();

    for (i, analysis) in result.ranked.iter().take(top).enumerate() {
        let carb = analysis
            .carb_type
            .map(|c| format!(" [{} carb]", c))
            .unwrap_or_default();
        println!(
            "{:>3}. {} - score {:.1}{}",
            i + 1,
            analysis.meal.id(),
            analysis.score,
            carb
        );
        println!("       {}", format_macros(&analysis.macros));
        display_items(&analysis.meal);
        display_advisory(analysis);
        println!();
    }
}

/// Display the best rejected meals with their reasons and advisory.
pub fn display_rejections(rejected: &[Rejection<'_>], top: usize) {
    if rejected.is_empty() || top == 0 {
        return;
    }

    println!("--- Closest Rejected Meals ---");
    println!();
    for rejection in rejected.iter().take(top) {
        let analysis = &rejection.analysis;
        println!("  {} - score {:.1}", analysis.meal.id(), analysis.score);
        println!("       {}", format_macros(&analysis.macros));
        display_items(&analysis.meal);
        for reason in &rejection.reasons {
            println!("       x {}", reason);
        }
        display_advisory(analysis);
        println!();
    }
}

/// Display the run summary counters.
pub fn display_meta(meta: &EngineMeta) {
    println!("--- Summary ---");
    println!(
        "Foods: {} total, {} eligible",
        meta.foods_total, meta.foods_eligible
    );
    println!(
        "Meals: {} generated, {} valid, {} rejected",
        meta.meals_generated, meta.meals_valid, meta.meals_rejected
    );
    println!();
}

/// Display per-meal targets.
pub fn display_targets(targets: &Macros, meals_per_day: u32) {
    println!();
    println!("=== Targets per meal ({} meals/day) ===", meals_per_day);
    println!("  {}", format_macros(targets));
    println!();
}

/// Display a simple list of foods with their details.
pub fn display_food_list(foods: &[&Food], title: &str) {
    if foods.is_empty() {
        println!("{}: (none)", title);
        return;
    }

    println!();
    println!("=== {} ({} items) ===", title, foods.len());
    println!();

    let width = foods.iter().map(|f| f.id.len()).max().unwrap_or(10);
    for food in foods {
        let m = &food.macros_per_100g;
        let tags = if food.tags.is_empty() {
            String::new()
        } else {
            format!("  [{}]", food.tags.join(", "))
        };
        println!(
            "  {:<width$}  {:<9}  {:>4.0} kcal, P:{} C:{} F:{} per 100 g{}",
            food.id,
            food.category,
            m.calories,
            m.protein,
            m.carbs,
            m.fat,
            tags,
            width = width
        );
    }

    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FoodCategory;

    #[test]
    fn test_format_item() {
        let mut oil = Food::new(
            "olive_oil",
            "Olive oil",
            FoodCategory::Fat,
            Macros::new(884.0, 0.0, 0.0, 100.0),
        );
        oil.units.insert(FoodUnit::Tablespoon, 13.5);

        let item = MealItem::new(&oil, 2.0, FoodUnit::Tablespoon).unwrap();
        assert_eq!(format_item(&item), "2 tbsp Olive oil (27.0 g)");

        let item = MealItem::grams(&oil, 12.5).unwrap();
        assert_eq!(format_item(&item), "12.5 g Olive oil");
    }
}
