//! Shared types for the restaurant ordering backend
//!
//! API-facing models (menu items, orders, sales report) and the unified
//! error system used by the HTTP layer.

pub mod error;
pub mod models;

// Re-exports
pub use axum::Json;
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
