pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod storage;
pub mod validation;

pub use config::ApiConfig;
pub use error::{AppError, Result};
