use thiserror::Error;

#[derive(Debug, Error)]
pub enum CambiaError {
    #[error("Food not found: {0}")]
    FoodNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Catalog data that breaks the conversion preconditions (bad ratio, empty name).
    #[error("Data integrity error for '{food}': {reason}")]
    DataIntegrity { food: String, reason: String },

    #[error("Catalog contains no foods")]
    NoFoods,
}

pub type Result<T> = std::result::Result<T, CambiaError>;
