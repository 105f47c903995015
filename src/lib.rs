pub mod configuration;
pub mod core;
pub mod estimate;
pub mod pdf;
pub mod rates;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Config Error:{0}")]
    ConfigError(String),

    #[error("Server error")]
    ServerError,
}
