use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MealPlanError {
    #[error("Invalid planning range: {0}")]
    InvalidRange(String),

    #[error("Unknown dish category: {0}")]
    UnknownCategory(String),
}
