pub mod app;
pub mod config;
pub mod error;
pub mod extension;
pub mod host;
pub mod records;
pub mod ui;
pub mod utils;

pub use error::{AppError, Result};
