//! Shared types for the course storefront
//!
//! Domain models, request/response payloads, the unified error system and
//! small utilities used by the server and its tests.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use axum::Json;
pub use http;
pub use serde::{Deserialize, Serialize};
