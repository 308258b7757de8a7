use thiserror::Error;

use crate::models::FoodUnit;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid quantity: {0} (must be a finite number > 0)")]
    InvalidQuantity(f64),

    #[error("Unit '{unit}' not defined for food '{food_id}'")]
    UnitUndefined { food_id: String, unit: FoodUnit },

    #[error("Cannot build a meal without items")]
    EmptyMealConstruction,

    #[error("Invalid range for {field}: {reason}")]
    InvalidRange { field: String, reason: String },

    #[error("Food not found: {0}")]
    FoodNotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;
