//! Shelfmark Book Catalog Management System
//!
//! A Rust REST JSON API for managing a book catalog. Every book receives an
//! auto-generated ISBN-13 identifier, unique across the catalog.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod isbn;
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
}
