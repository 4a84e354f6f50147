//! Libris Library Management System
//!
//! A Rust implementation of a library management server, providing a REST
//! JSON API for cataloging books, registering members, issuing and returning
//! loans, and reporting on overdue items.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
    /// Kept alongside the services so the readiness check can reach the database
    pub pool: sqlx::PgPool,
}
