use clap::Parser;
use std::path::Path;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use meal_recommender_rs::catalog::{FoodCatalog, load_foods};
use meal_recommender_rs::cli::{Cli, Command, ConstraintArgs, RecommendArgs, TargetArgs};
use meal_recommender_rs::config::{EngineConfigOverrides, load_config_overrides};
use meal_recommender_rs::error::Result;
use meal_recommender_rs::interface::{
    display_food_list, display_meta, display_ranked_meals, display_rejections, display_targets,
    prompt_targets, resolve_food_id, write_csv, write_json,
};
use meal_recommender_rs::nutrition::per_meal_targets_from_daily;
use meal_recommender_rs::planner::{EngineContext, filter_foods, run_engine};

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Command::Recommend(args) => cmd_recommend(&cli.file, args),
        Command::Foods(args) => cmd_foods(&cli.file, args),
        Command::Targets { daily, meals } => cmd_targets(daily, *meals),
    }
}

fn load_catalog(path: &Path) -> Result<Option<FoodCatalog>> {
    if !path.exists() {
        eprintln!("Food catalog not found: {}", path.display());
        eprintln!("Pass --file or place foods.json in the current directory.");
        return Ok(None);
    }
    let catalog = FoodCatalog::new(load_foods(path)?);
    for food in catalog.invalid_foods() {
        warn!(food = %food.debug_string(), "food record has invalid values");
    }
    Ok(Some(catalog))
}

/// Warn about excluded ids that match nothing, proposing the closest id.
fn check_excluded_ids(catalog: &FoodCatalog, args: &ConstraintArgs) {
    for (id, suggestion) in catalog.unknown_ids(&args.exclude_foods) {
        match suggestion {
            Some(s) => warn!(id, suggestion = s, "unknown food id in --exclude-food"),
            None => warn!(id, "unknown food id in --exclude-food"),
        }
    }
}

/// Resolve unknown excluded ids interactively.
fn resolve_excluded_ids(catalog: &FoodCatalog, args: &ConstraintArgs) -> Result<ConstraintArgs> {
    let mut resolved = args.clone();
    resolved.exclude_foods.clear();
    for id in &args.exclude_foods {
        if let Some(id) = resolve_food_id(catalog, id)? {
            resolved.exclude_foods.push(id);
        }
    }
    Ok(resolved)
}

/// Recommend meals for the given targets.
fn cmd_recommend(file: &Path, args: &RecommendArgs) -> Result<()> {
    let Some(catalog) = load_catalog(file)? else {
        return Ok(());
    };
    println!("Loaded {} foods", catalog.len());

    let overrides = match &args.config {
        Some(path) => load_config_overrides(path)?,
        None => EngineConfigOverrides::default(),
    };
    let overrides = args.apply_overrides(overrides);

    let (targets, constraint_args) = if args.interactive {
        (
            prompt_targets(&args.targets.to_macros())?,
            resolve_excluded_ids(&catalog, &args.constraints)?,
        )
    } else {
        check_excluded_ids(&catalog, &args.constraints);
        (args.targets.to_macros(), args.constraints.clone())
    };

    let ctx = EngineContext::new(
        catalog.foods(),
        constraint_args.to_constraints(),
        targets,
        &overrides,
    );
    info!(?targets, "running engine");
    let result = run_engine(&ctx);

    display_ranked_meals(&result, args.top);
    if result.ranked.len() < args.top {
        display_rejections(&result.rejected, args.show_rejected);
    }
    display_meta(&result.meta);

    if let Some(path) = &args.csv {
        write_csv(&result.ranked, path)?;
        println!("Ranked meals written to {}", path.display());
    }
    if let Some(path) = &args.json {
        write_json(&result, path)?;
        println!("Result written to {}", path.display());
    }

    Ok(())
}

/// List foods matching the constraints.
fn cmd_foods(file: &Path, args: &ConstraintArgs) -> Result<()> {
    let Some(catalog) = load_catalog(file)? else {
        return Ok(());
    };
    check_excluded_ids(&catalog, args);

    let foods = filter_foods(catalog.foods(), &args.to_constraints());
    display_food_list(&foods, "Foods");
    Ok(())
}

/// Print per-meal targets derived from daily targets.
fn cmd_targets(daily: &TargetArgs, meals: u32) -> Result<()> {
    let per_meal = per_meal_targets_from_daily(&daily.to_macros(), meals)?;
    display_targets(&per_meal, meals);
    Ok(())
}
