#[macro_use]
extern crate assert_float_eq;

use meal_recommender_rs::config::{EngineConfig, HardLimits, ScoringWeights};
use meal_recommender_rs::error::EngineError;
use meal_recommender_rs::models::{Food, FoodCategory, FoodUnit, Macros, Meal, MealItem, Micros};
use meal_recommender_rs::nutrition::{
    check_macros_against_ranges, density_score, from_mass, macro_fit_score, macros_for_meal,
    micros_for_meal, range_from_target_pct, score_meal, targets_to_ranges, to_mass,
};
use meal_recommender_rs::planner::{Validation, validate_meal};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn eggs() -> Food {
    let mut food = Food::new(
        "eggs_whole",
        "Whole eggs",
        FoodCategory::Protein,
        Macros::new(155.0, 13.0, 1.1, 11.0),
    );
    food.default_unit = Some(FoodUnit::Piece);
    food.units.insert(FoodUnit::Piece, 60.0);
    food
}

fn spinach() -> Food {
    let mut food = Food::new(
        "spinach",
        "Spinach",
        FoodCategory::Vegetable,
        Macros::new(23.0, 2.9, 3.6, 0.4),
    );
    food.micros_per_100g = Some(Micros {
        fiber: 2.2,
        sodium_mg: 79.0,
        potassium_mg: 558.0,
        calcium_mg: 99.0,
        iron_mg: 2.7,
        vitamin_c_mg: 28.1,
    });
    food
}

#[test]
fn test_unit_round_trip() {
    let food = eggs();
    let mut rng = StdRng::seed_from_u64(1);
    for _ in 0..200 {
        let mass = rng.gen_range(0.5..2000.0);
        for unit in [FoodUnit::Gram, FoodUnit::Piece] {
            let quantity = from_mass(&food, mass, unit).unwrap();
            let back = to_mass(&food, quantity, unit).unwrap();
            assert_float_relative_eq!(back, mass, 1e-12);
        }
    }
    assert!(matches!(
        to_mass(&food, 1.0, FoodUnit::Tablespoon),
        Err(EngineError::UnitUndefined { .. })
    ));
}

#[test]
fn test_meal_aggregation_mixes_units() {
    let (e, s) = (eggs(), spinach());
    let meal = Meal::new(
        "meal_1",
        vec![
            MealItem::new(&e, 2.0, FoodUnit::Piece).unwrap(),
            MealItem::grams(&s, 50.0).unwrap(),
        ],
    )
    .unwrap();

    let macros = macros_for_meal(&meal).unwrap();
    assert_float_absolute_eq!(macros.calories, 1.2 * 155.0 + 0.5 * 23.0, 1e-9);
    assert_float_absolute_eq!(macros.protein, 1.2 * 13.0 + 0.5 * 2.9, 1e-9);

    let micros = micros_for_meal(&meal).unwrap();
    assert_float_absolute_eq!(micros.potassium_mg, 279.0, 1e-9);
    assert_float_absolute_eq!(micros.fiber, 1.1, 1e-9);
}

#[test]
fn test_zero_target_validation_is_exact() {
    let s = spinach();
    let meal = Meal::new("meal_1", vec![MealItem::grams(&s, 100.0).unwrap()]).unwrap();
    let mut config = EngineConfig::default();
    config.hard_limits.min_meal_calories = None;
    config.tolerances_pct.fat = 10.0;

    let targets = Macros::new(23.0, 2.9, 3.6, 0.0);
    let macros = macros_for_meal(&meal).unwrap();
    match validate_meal(&meal, &macros, &targets, &config) {
        Validation::Rejected(reasons) => assert_eq!(reasons, vec!["Fat out of tolerance"]),
        Validation::Accepted => panic!("nonzero fat must fail a zero fat target"),
    }
}

#[test]
fn test_ranges_agree_with_validator_windows() {
    let mut rng = StdRng::seed_from_u64(17);
    let config = EngineConfig {
        hard_limits: HardLimits::none(),
        ..EngineConfig::default()
    };
    let s = spinach();
    let meal = Meal::new("meal_1", vec![MealItem::grams(&s, 100.0).unwrap()]).unwrap();

    for _ in 0..200 {
        let targets = Macros::new(
            rng.gen_range(100.0..900.0),
            rng.gen_range(5.0..60.0),
            rng.gen_range(5.0..100.0),
            rng.gen_range(2.0..40.0),
        );
        let macros = Macros::new(
            rng.gen_range(50.0..1200.0),
            rng.gen_range(0.0..80.0),
            rng.gen_range(0.0..140.0),
            rng.gen_range(0.0..60.0),
        );
        let ranges = targets_to_ranges(&targets, &config.tolerances_pct).unwrap();
        let violations = check_macros_against_ranges(&macros, &ranges);
        let accepted = validate_meal(&meal, &macros, &targets, &config).is_accepted();
        assert_eq!(violations.is_empty(), accepted);
    }
}

#[test]
fn test_range_bounds_are_ordered() {
    let mut rng = StdRng::seed_from_u64(29);
    for _ in 0..200 {
        let target = rng.gen_range(-50.0..500.0);
        let tol = rng.gen_range(0.0..3.0);
        let range = range_from_target_pct(target, tol).unwrap();
        assert!(range.min >= 0.0);
        assert!(range.min <= range.max);
    }
}

#[test]
fn test_composite_score_blends_components() {
    let s = spinach();
    let meal = Meal::new("meal_1", vec![MealItem::grams(&s, 400.0).unwrap()]).unwrap();
    let macros = macros_for_meal(&meal).unwrap();
    let micros = micros_for_meal(&meal).unwrap();
    let targets = Macros::new(100.0, 12.0, 15.0, 2.0);

    let config = EngineConfig {
        density_weight: 0.5,
        ..EngineConfig::default()
    };
    let fit = macro_fit_score(&macros, &targets, &ScoringWeights::default());
    let density = density_score(&macros, &micros);
    let score = score_meal(&macros, &micros, &targets, &config);
    let expected = ((fit * 0.5 + density * 0.5) * 10.0).round() / 10.0;
    assert_float_absolute_eq!(score, expected, 1e-9);
    assert!((0.0..=100.0).contains(&score));
}
