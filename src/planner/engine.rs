use std::cmp::Ordering;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::{EngineConfig, EngineConfigOverrides};
use crate::error::Result;
use crate::models::{Food, Macros, MealAnalysis, RankedMeal};
use crate::nutrition::{macros_for_meal, micros_for_meal, score_meal};
use crate::planner::advisory::{analyze_warnings, generate_suggestions};
use crate::planner::classify::classify_carb_meal;
use crate::planner::filter::{Constraints, filter_foods};
use crate::planner::generator::generate_candidates;
use crate::planner::portions::fit_portions;
use crate::planner::validator::{Validation, validate_meal};

/// Everything one engine run needs. The food pool is borrowed, never modified.
#[derive(Debug, Clone)]
pub struct EngineContext<'a> {
    pub foods: &'a [Food],
    pub constraints: Constraints,
    /// Targets for a single meal.
    pub targets: Macros,
    pub config: EngineConfig,
}

impl<'a> EngineContext<'a> {
    /// Build a context, merging `overrides` over the default configuration.
    pub fn new(
        foods: &'a [Food],
        constraints: Constraints,
        targets: Macros,
        overrides: &EngineConfigOverrides,
    ) -> Self {
        let config = EngineConfig::default().with_overrides(overrides);
        Self::with_config(foods, constraints, targets, config)
    }

    /// Build a context from a complete configuration.
    pub fn with_config(
        foods: &'a [Food],
        constraints: Constraints,
        targets: Macros,
        config: EngineConfig,
    ) -> Self {
        Self {
            foods,
            constraints,
            targets,
            config: config.sanitized(),
        }
    }
}

/// Run counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineMeta {
    pub foods_total: usize,
    pub foods_eligible: usize,
    pub meals_generated: usize,
    pub meals_valid: usize,
    pub meals_rejected: usize,
}

/// A candidate that failed validation, with its advisory output.
#[derive(Debug, Clone, PartialEq)]
pub struct Rejection<'a> {
    pub analysis: MealAnalysis<'a>,
    pub reasons: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct EngineResult<'a> {
    /// Accepted meals, best first.
    pub ranked: Vec<RankedMeal<'a>>,
    pub best: Option<RankedMeal<'a>>,
    pub meta: EngineMeta,
    /// Rejected meals, best composite score first.
    pub rejected: Vec<Rejection<'a>>,
}

/// Fit portions and recompute nutrients for one candidate.
fn refit<'a>(
    candidate: &MealAnalysis<'a>,
    targets: &Macros,
    config: &EngineConfig,
) -> Result<MealAnalysis<'a>> {
    let meal = fit_portions(&candidate.meal, targets, config)?;
    let macros = macros_for_meal(&meal)?;
    let micros = micros_for_meal(&meal)?;
    Ok(MealAnalysis::new(meal, macros, micros, candidate.score))
}

fn by_score_desc(a: f64, b: f64) -> Ordering {
    b.total_cmp(&a)
}

/// Filter, generate, fit, validate, score and rank.
///
/// An empty or fully filtered pool yields an empty result, not an error.
pub fn run_engine<'a>(ctx: &EngineContext<'a>) -> EngineResult<'a> {
    let config = &ctx.config;
    let targets = &ctx.targets;

    let eligible = filter_foods(ctx.foods, &ctx.constraints);
    let candidates = generate_candidates(&eligible, config);

    let mut ranked: Vec<RankedMeal<'a>> = Vec::new();
    let mut rejected: Vec<Rejection<'a>> = Vec::new();

    for candidate in &candidates {
        let mut analysis = if config.fit_portions {
            match refit(candidate, targets, config) {
                Ok(fitted) => fitted,
                Err(e) => {
                    warn!(
                        meal = candidate.meal.id(),
                        error = %e,
                        "portion fitting failed, keeping generated portions"
                    );
                    candidate.clone()
                }
            }
        } else {
            candidate.clone()
        };

        analysis.score = score_meal(&analysis.macros, &analysis.micros, targets, config);
        analysis.warnings = match analyze_warnings(&analysis.macros, targets, config) {
            Ok(warnings) => warnings,
            Err(e) => {
                warn!(meal = analysis.meal.id(), error = %e, "could not derive warnings");
                Vec::new()
            }
        };
        analysis.suggestions = generate_suggestions(&analysis.meal, &analysis.warnings, config);
        analysis.carb_type = Some(classify_carb_meal(&analysis.macros));

        match validate_meal(&analysis.meal, &analysis.macros, targets, config) {
            Validation::Accepted => ranked.push(analysis),
            Validation::Rejected(reasons) => {
                debug!(meal = analysis.meal.id(), ?reasons, "rejected");
                rejected.push(Rejection { analysis, reasons });
            }
        }
    }

    ranked.sort_by(|a, b| by_score_desc(a.score, b.score));
    rejected.sort_by(|a, b| by_score_desc(a.analysis.score, b.analysis.score));

    let meta = EngineMeta {
        foods_total: ctx.foods.len(),
        foods_eligible: eligible.len(),
        meals_generated: candidates.len(),
        meals_valid: ranked.len(),
        meals_rejected: rejected.len(),
    };
    info!(
        foods = meta.foods_total,
        eligible = meta.foods_eligible,
        generated = meta.meals_generated,
        valid = meta.meals_valid,
        rejected = meta.meals_rejected,
        "engine run complete"
    );

    EngineResult {
        best: ranked.first().cloned(),
        ranked,
        meta,
        rejected,
    }
}
