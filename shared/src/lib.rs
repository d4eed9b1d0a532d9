//! Shared types for the back-office
//!
//! Common types used by the admin server and its clients: data models,
//! request/response payloads and the API response envelope.
//!
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`
//! so clients can depend on this crate without pulling in sqlx.

pub mod models;
pub mod response;

// Re-exports
pub use response::ApiResponse;
pub use serde::{Deserialize, Serialize};
