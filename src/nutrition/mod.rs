pub mod aggregate;
pub mod density;
pub mod scoring;
pub mod targets;
pub mod units;

pub use aggregate::{
    macros_for_item, macros_for_meal, macros_for_portion, micros_for_item, micros_for_meal,
    micros_for_portion,
};
pub use density::density_score;
pub use scoring::{macro_fit_score, relative_error, score_meal, weighted_macro_error};
pub use targets::{
    MacroRange, MacroTargetsRange, RangeViolation, check_macros_against_ranges,
    compute_macro_warnings, per_meal_targets_from_daily, range_from_target_pct, targets_to_ranges,
};
pub use units::{display_portion, from_mass, to_mass};
