pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod interface;
pub mod models;
pub mod nutrition;
pub mod planner;

pub use config::{EngineConfig, EngineConfigOverrides};
pub use error::{EngineError, Result};
pub use models::{Food, FoodCategory, FoodUnit, Macros, Meal, MealItem, Micros};
pub use planner::{EngineContext, EngineResult, run_engine};
