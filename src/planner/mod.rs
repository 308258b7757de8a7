pub mod advisory;
pub mod classify;
pub mod constants;
pub mod engine;
pub mod filter;
pub mod generator;
pub mod portions;
pub mod validator;

pub use advisory::{analyze_warnings, generate_suggestions};
pub use classify::{classify_carb_meal, ingestion_rank, sort_by_ingestion};
pub use engine::{EngineContext, EngineMeta, EngineResult, Rejection, run_engine};
pub use filter::{Constraints, filter_foods};
pub use generator::{generate_candidates, rank_foods_for_generation};
pub use portions::fit_portions;
pub use validator::{Validation, validate_meal};
