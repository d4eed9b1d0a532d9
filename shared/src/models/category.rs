//! Category Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Category entity
///
/// Canonical category row plus the menu display fields. `sort_order`
/// controls catalog ordering, `menu_order` controls navigation ordering;
/// the two can diverge and are reconciled by the menu sync endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub image: Option<String>,
    /// Inactive categories are excluded from customer-facing listings
    /// but stay around for admin bookkeeping
    pub is_active: bool,
    /// Catalog ordering, independent of menu ordering
    pub sort_order: i32,
    /// Position within the navigation menu
    pub menu_order: i32,
    /// Whether the category appears in the site navigation
    pub show_in_menu: bool,
    /// Depth in the menu hierarchy (0 = top-level)
    pub menu_level: i32,
    /// Parent category id; None = top-level
    pub parent_id: Option<String>,

    // -- Derived at query time (not stored columns) --

    /// Number of linked products
    #[cfg_attr(feature = "db", sqlx(default))]
    #[serde(default)]
    pub product_count: i64,
    /// Number of linked active products
    #[cfg_attr(feature = "db", sqlx(default))]
    #[serde(default)]
    pub active_product_count: i64,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create category payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CategoryCreate {
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    /// Derived from `name` when absent
    #[validate(length(min = 1, max = 120))]
    pub slug: Option<String>,
    #[validate(length(min = 1, max = 2000))]
    pub description: String,
    pub image: Option<String>,
    pub is_active: Option<bool>,
    pub sort_order: Option<i32>,
    pub menu_order: Option<i32>,
    pub show_in_menu: Option<bool>,
    #[validate(range(min = 0))]
    pub menu_level: Option<i32>,
    pub parent_id: Option<String>,
}

/// Update category payload (partial)
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CategoryUpdate {
    #[validate(length(min = 1, max = 120))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 120))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[validate(length(min = 1, max = 2000))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Double Option: missing = keep, null = clear, value = replace
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_double_option"
    )]
    pub image: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub menu_order: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_in_menu: Option<bool>,
    #[validate(range(min = 0))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub menu_level: Option<i32>,
    /// Double Option: missing = keep, null = move to top level, value = re-parent
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_double_option"
    )]
    pub parent_id: Option<Option<String>>,
}

/// Serde helper distinguishing "field absent" from "field: null"
mod serde_double_option {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S, T>(value: &Option<Option<T>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        T: Serialize,
    {
        match value {
            Some(inner) => inner.serialize(serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de>,
    {
        Ok(Some(Option::deserialize(deserializer)?))
    }
}
