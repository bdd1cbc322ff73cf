pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod import;
pub mod observability;
pub mod report;

pub use error::AppError;
