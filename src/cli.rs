use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::EngineConfigOverrides;
use crate::models::Macros;
use crate::planner::Constraints;

/// MealRecommender: builds, validates and ranks meals against macro targets.
#[derive(Parser, Debug)]
#[command(name = "meal_recommender")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Path to the food catalog JSON file.
    #[arg(short, long, global = true, default_value = "foods.json")]
    pub file: PathBuf,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Recommend meals for per-meal macro targets.
    Recommend(RecommendArgs),

    /// List foods matching the constraint flags.
    Foods(ConstraintArgs),

    /// Derive per-meal targets from daily targets.
    Targets {
        #[command(flatten)]
        daily: TargetArgs,

        /// Meals per day.
        #[arg(long, default_value_t = 3)]
        meals: u32,
    },
}

/// Macro targets in kcal and grams.
#[derive(Args, Debug, Clone)]
pub struct TargetArgs {
    #[arg(long, default_value_t = 600.0)]
    pub calories: f64,

    #[arg(long, default_value_t = 35.0)]
    pub protein: f64,

    #[arg(long, default_value_t = 60.0)]
    pub carbs: f64,

    #[arg(long, default_value_t = 20.0)]
    pub fat: f64,
}

impl TargetArgs {
    pub fn to_macros(&self) -> Macros {
        Macros::new(self.calories, self.protein, self.carbs, self.fat)
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct ConstraintArgs {
    /// Keep foods carrying at least one of these tags (repeatable).
    #[arg(long = "include-tag")]
    pub include_tags: Vec<String>,

    /// Drop foods carrying any of these tags (repeatable).
    #[arg(long = "exclude-tag")]
    pub exclude_tags: Vec<String>,

    /// Drop foods whose id is listed (repeatable).
    #[arg(long = "exclude-food")]
    pub exclude_foods: Vec<String>,

    /// Maximum kcal per 100 g.
    #[arg(long)]
    pub max_calories: Option<f64>,

    /// Minimum protein grams per 100 g.
    #[arg(long)]
    pub min_protein: Option<f64>,

    /// Case-insensitive search in food names.
    #[arg(short, long)]
    pub query: Option<String>,
}

fn non_empty(values: &[String]) -> Option<Vec<String>> {
    (!values.is_empty()).then(|| values.to_vec())
}

impl ConstraintArgs {
    pub fn to_constraints(&self) -> Constraints {
        Constraints {
            include_tags: non_empty(&self.include_tags),
            exclude_tags: non_empty(&self.exclude_tags),
            max_calories_per_100g: self.max_calories,
            min_protein_per_100g: self.min_protein,
            text_query: self.query.clone(),
            exclude_food_ids: non_empty(&self.exclude_foods),
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct RecommendArgs {
    #[command(flatten)]
    pub targets: TargetArgs,

    #[command(flatten)]
    pub constraints: ConstraintArgs,

    /// JSON file of engine configuration overrides.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Prompt for targets instead of reading them from flags.
    #[arg(short, long)]
    pub interactive: bool,

    /// Number of meals to show.
    #[arg(long, default_value_t = 5)]
    pub top: usize,

    /// Number of rejected meals to show when few or none are accepted.
    #[arg(long, default_value_t = 3)]
    pub show_rejected: usize,

    /// Items per meal (overrides the config file).
    #[arg(long)]
    pub items: Option<usize>,

    /// Keep generated portions instead of fitting them to the targets.
    #[arg(long)]
    pub no_fit: bool,

    /// Walk the category template from its start for every candidate.
    #[arg(long)]
    pub no_rotate: bool,

    /// Export ranked meals to CSV.
    #[arg(long)]
    pub csv: Option<PathBuf>,

    /// Export the full result to JSON.
    #[arg(long)]
    pub json: Option<PathBuf>,
}

impl RecommendArgs {
    /// Layer command-line overrides over those loaded from a file.
    pub fn apply_overrides(&self, mut overrides: EngineConfigOverrides) -> EngineConfigOverrides {
        if let Some(items) = self.items {
            overrides.items_per_meal = Some(items);
        }
        if self.no_fit {
            overrides.fit_portions = Some(false);
        }
        if self.no_rotate {
            overrides.rotate_template = Some(false);
        }
        overrides
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_recommend() {
        let cli = Cli::parse_from([
            "meal_recommender",
            "recommend",
            "--protein",
            "40",
            "--include-tag",
            "vegan",
            "--include-tag",
            "vegetarian",
            "--no-fit",
        ]);
        let Command::Recommend(args) = cli.command else {
            panic!("expected recommend");
        };
        assert_eq!(
            args.targets.to_macros(),
            Macros::new(600.0, 40.0, 60.0, 20.0)
        );
        let constraints = args.constraints.to_constraints();
        assert_eq!(
            constraints.include_tags,
            Some(vec!["vegan".to_string(), "vegetarian".to_string()])
        );
        assert!(constraints.exclude_tags.is_none());

        let overrides = args.apply_overrides(EngineConfigOverrides::default());
        assert_eq!(overrides.fit_portions, Some(false));
        assert_eq!(overrides.rotate_template, None);
        assert_eq!(cli.file, PathBuf::from("foods.json"));
    }

    #[test]
    fn test_parse_targets() {
        let cli = Cli::parse_from([
            "meal_recommender",
            "targets",
            "--calories",
            "2400",
            "--meals",
            "4",
        ]);
        let Command::Targets { daily, meals } = cli.command else {
            panic!("expected targets");
        };
        assert_eq!(daily.calories, 2400.0);
        assert_eq!(meals, 4);
    }
}
