use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::error::Result;
use crate::models::{
    CarbMealType, FoodUnit, Macros, MealAnalysis, MealSuggestion, MealWarning, Micros,
};
use crate::nutrition::to_mass;
use crate::planner::{EngineMeta, EngineResult};

/// Truncate a float to n decimal places.
fn truncate(value: f64, decimals: u32) -> f64 {
    let factor = 10_f64.powi(decimals as i32);
    (value * factor).round() / factor
}

fn truncate_macros(m: &Macros) -> Macros {
    Macros::new(
        truncate(m.calories, 1),
        truncate(m.protein, 1),
        truncate(m.carbs, 1),
        truncate(m.fat, 1),
    )
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ItemRecord {
    food_id: String,
    name: String,
    quantity: f64,
    unit: FoodUnit,
    grams: Option<f64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct MealRecord {
    id: String,
    score: f64,
    carb_type: Option<CarbMealType>,
    macros: Macros,
    micros: Micros,
    items: Vec<ItemRecord>,
    warnings: Vec<MealWarning>,
    suggestions: Vec<MealSuggestion>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    reasons: Vec<String>,
}

impl MealRecord {
    fn from_analysis(analysis: &MealAnalysis<'_>, reasons: &[String]) -> Self {
        let items = analysis
            .meal
            .items()
            .iter()
            .map(|item| ItemRecord {
                food_id: item.food.id.clone(),
                name: item.food.name.clone(),
                quantity: truncate(item.quantity, 2),
                unit: item.unit,
                grams: to_mass(item.food, item.quantity, item.unit)
                    .ok()
                    .map(|g| truncate(g, 1)),
            })
            .collect();

        Self {
            id: analysis.meal.id().to_string(),
            score: analysis.score,
            carb_type: analysis.carb_type,
            macros: truncate_macros(&analysis.macros),
            micros: analysis.micros,
            items,
            warnings: analysis.warnings.clone(),
            suggestions: analysis.suggestions.clone(),
            reasons: reasons.to_vec(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ResultRecord {
    meta: EngineMeta,
    best: Option<MealRecord>,
    ranked: Vec<MealRecord>,
    rejected: Vec<MealRecord>,
}

fn describe_items(analysis: &MealAnalysis<'_>) -> String {
    analysis
        .meal
        .items()
        .iter()
        .map(|item| {
            let quantity = truncate(item.quantity, 2);
            format!("{} {} {}", quantity, item.unit, item.food.id)
        })
        .collect::<Vec<_>>()
        .join("; ")
}

/// Write ranked meals to a CSV file, one row per meal.
pub fn write_csv(ranked: &[MealAnalysis<'_>], path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "rank",
        "meal_id",
        "score",
        "calories",
        "protein",
        "carbs",
        "fat",
        "carb_type",
        "items",
    ])?;

    for (i, analysis) in ranked.iter().enumerate() {
        let m = &analysis.macros;
        wtr.write_record([
            (i + 1).to_string(),
            analysis.meal.id().to_string(),
            format!("{:.1}", analysis.score),
            format!("{:.1}", m.calories),
            format!("{:.1}", m.protein),
            format!("{:.1}", m.carbs),
            format!("{:.1}", m.fat),
            analysis
                .carb_type
                .map(|c| c.to_string())
                .unwrap_or_default(),
            describe_items(analysis),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Write the full engine result to a JSON file.
pub fn write_json(result: &EngineResult<'_>, path: &Path) -> Result<()> {
    let record = ResultRecord {
        meta: result.meta,
        best: result
            .best
            .as_ref()
            .map(|b| MealRecord::from_analysis(b, &[])),
        ranked: result
            .ranked
            .iter()
            .map(|a| MealRecord::from_analysis(a, &[]))
            .collect(),
        rejected: result
            .rejected
            .iter()
            .map(|r| MealRecord::from_analysis(&r.analysis, &r.reasons))
            .collect(),
    };

    let json = serde_json::to_string_pretty(&record)?;
    let mut file = File::create(path)?;
    file.write_all(json.as_bytes())?;
    Ok(())
}
