//! Shared types, errors, and configuration for Kharcha.
//!
//! This crate provides common types used across all other crates:
//! - Application-wide error types
//! - Configuration management
//! - JWT claims and token service
//! - Sanitized user profile returned by auth endpoints

pub mod auth;
pub mod config;
pub mod error;
pub mod jwt;

pub use auth::{Claims, UserProfile};
pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use jwt::{JwtError, JwtService};
