use tracing::debug;

use crate::config::EngineConfig;
use crate::error::Result;
use crate::models::{FoodUnit, Macros, Meal, MealItem};
use crate::nutrition::{macros_for_portion, to_mass, weighted_macro_error};
use crate::planner::constants::SCORE_EPSILON;
use crate::planner::generator::portion_options;

/// Candidate quantities for one item, in the item's own unit.
fn ladder_for(item: &MealItem<'_>, options: &[f64]) -> Vec<f64> {
    if item.unit == FoodUnit::Gram {
        options.to_vec()
    } else {
        (1..=options.len()).map(|n| n as f64).collect()
    }
}

/// Index of the ladder entry closest to `quantity`; ties go to the lower index.
fn nearest_index(ladder: &[f64], quantity: f64) -> usize {
    let mut best = 0;
    let mut best_dist = f64::INFINITY;
    for (i, q) in ladder.iter().enumerate() {
        let dist = (q - quantity).abs();
        if dist < best_dist {
            best = i;
            best_dist = dist;
        }
    }
    best
}

/// Per-item ladder with the macros of each rung precomputed.
struct ItemLadder {
    quantities: Vec<f64>,
    macros: Vec<Macros>,
}

fn total(ladders: &[ItemLadder], picks: &[usize]) -> Macros {
    ladders
        .iter()
        .zip(picks)
        .map(|(ladder, &j)| ladder.macros[j])
        .sum()
}

/// Re-portion a meal to approach `targets`.
///
/// Coordinate descent over each item's portion ladder, minimizing the
/// weighted relative macro error. Foods, units and item order are kept; only
/// quantities change. Tolerances play no part in the search.
pub fn fit_portions<'a>(
    meal: &Meal<'a>,
    targets: &Macros,
    config: &EngineConfig,
) -> Result<Meal<'a>> {
    let options = portion_options(config);

    let mut ladders: Vec<ItemLadder> = Vec::with_capacity(meal.len());
    let mut picks: Vec<usize> = Vec::with_capacity(meal.len());
    for item in meal.items() {
        let quantities = ladder_for(item, &options);
        let macros = quantities
            .iter()
            .map(|&q| macros_for_portion(item.food, to_mass(item.food, q, item.unit)?))
            .collect::<Result<Vec<Macros>>>()?;
        picks.push(nearest_index(&quantities, item.quantity));
        ladders.push(ItemLadder { quantities, macros });
    }

    let weights = &config.scoring_weights;
    let mut sweeps = 0;
    while sweeps < config.max_fit_sweeps {
        sweeps += 1;
        let mut changed = false;

        for i in 0..ladders.len() {
            let mut best = picks[i];
            let mut best_err = weighted_macro_error(&total(&ladders, &picks), targets, weights);
            for j in 0..ladders[i].quantities.len() {
                let mut trial = picks.clone();
                trial[i] = j;
                let err = weighted_macro_error(&total(&ladders, &trial), targets, weights);
                if err < best_err - SCORE_EPSILON {
                    best = j;
                    best_err = err;
                }
            }
            if best != picks[i] {
                picks[i] = best;
                changed = true;
            }
        }

        if !changed {
            break;
        }
    }

    let mut fitted = meal.clone();
    for (i, ladder) in ladders.iter().enumerate() {
        let quantity = ladder.quantities[picks[i]];
        if quantity != fitted.items()[i].quantity {
            fitted = fitted.with_quantity(i, quantity)?;
        }
    }

    debug!(meal = meal.id(), sweeps, "fitted portions");
    Ok(fitted)
}
