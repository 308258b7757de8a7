mod analysis;
mod food;
mod meal;
mod nutrients;

pub use analysis::{CarbMealType, MealAnalysis, MealSuggestion, MealWarning, RankedMeal};
pub use food::{Food, FoodCategory, FoodUnit, IngestionPhase};
pub use meal::{Meal, MealItem};
pub use nutrients::{Macro, Macros, Micros};
