//! Data models
//!
//! Shared between admin-server and frontend (via API).
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are uuid strings assigned at creation.

pub mod category;
pub mod menu;
pub mod product;

// Re-exports
pub use category::*;
pub use menu::*;
pub use product::*;
