//! Shared errors and configuration for Tradewind.
//!
//! This crate provides the types used across all other crates:
//! - Application-wide error taxonomy
//! - Configuration management

pub mod config;
pub mod error;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
