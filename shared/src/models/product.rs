//! Product Model
//!
//! The menu subsystem only consumes products to compute per-category
//! counts and to block deletion of categories that still have products.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Product entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    /// Primary category link (FK to `categories.id`)
    pub category_id: Option<String>,
    /// Legacy name-string link, only honored when `category_id` is NULL.
    /// Rows migrated from the old schema may still carry this.
    pub category_name: Option<String>,
    pub price_cents: i64,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create product payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCreate {
    pub name: String,
    pub category_id: Option<String>,
    pub category_name: Option<String>,
    pub price_cents: Option<i64>,
    pub is_active: Option<bool>,
}
