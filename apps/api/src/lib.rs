pub mod app;
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use crate::config::Config;
pub use crate::error::{ApiError, Result};
