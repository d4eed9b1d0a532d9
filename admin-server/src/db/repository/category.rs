//! Category Repository
//!
//! Owns every query against the `categories` table: the canonical CRUD
//! side, the menu query, and the two write paths that must be atomic
//! (reorder batch, sync). Product counts are annotated through a
//! subquery on the product link (FK first, legacy name match for rows
//! migrated from the old schema).

use std::collections::HashMap;

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use super::{ProductRepository, RepoError, RepoResult};
use crate::menu::{self, SyncLevelPolicy};
use crate::utils::slugify;
use shared::models::{Category, CategoryCreate, CategoryUpdate, ReorderItem};

/// Product count annotation, correlated with the outer `categories c`.
/// FK link wins; the name match only applies to legacy rows without one.
const COUNT_COLUMNS: &str = r#"
    (SELECT COUNT(*) FROM products p
      WHERE p.category_id = c.id
         OR (p.category_id IS NULL AND p.category_name = c.name)) AS product_count,
    (SELECT COUNT(*) FROM products p
      WHERE (p.category_id = c.id
         OR (p.category_id IS NULL AND p.category_name = c.name))
        AND p.is_active = 1) AS active_product_count
"#;

#[derive(Clone)]
pub struct CategoryRepository {
    pool: SqlitePool,
}

impl CategoryRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Find all categories (canonical list), ordered by catalog order
    pub async fn find_all(&self) -> RepoResult<Vec<Category>> {
        let sql = format!(
            "SELECT c.*, {COUNT_COLUMNS} FROM categories c ORDER BY c.sort_order ASC, c.name ASC"
        );
        let categories = sqlx::query_as::<_, Category>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(categories)
    }

    /// Menu query: flat list for navigation display.
    ///
    /// `show_all = false` (public site nav) returns only visible, active
    /// categories; `show_all = true` (admin editing view) returns every
    /// row so hidden items can be toggled back on. Ordering is always
    /// `(menu_order, menu_level, name)` so ties resolve deterministically.
    pub async fn list_menu(&self, show_all: bool) -> RepoResult<Vec<Category>> {
        let sql = format!(
            r#"
            SELECT c.*, {COUNT_COLUMNS}
            FROM categories c
            WHERE ?1 OR (c.show_in_menu = 1 AND c.is_active = 1)
            ORDER BY c.menu_order ASC, c.menu_level ASC, c.name ASC
            "#
        );
        let categories = sqlx::query_as::<_, Category>(&sql)
            .bind(show_all)
            .fetch_all(&self.pool)
            .await?;
        Ok(categories)
    }

    /// Find category by id, with product counts
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Category>> {
        let sql = format!("SELECT c.*, {COUNT_COLUMNS} FROM categories c WHERE c.id = ?1");
        let category = sqlx::query_as::<_, Category>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(category)
    }

    /// Find category by name (uniqueness checks)
    pub async fn find_by_name(&self, name: &str) -> RepoResult<Option<Category>> {
        let category = sqlx::query_as::<_, Category>("SELECT * FROM categories WHERE name = ?1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;
        Ok(category)
    }

    /// Find category by slug (uniqueness checks)
    pub async fn find_by_slug(&self, slug: &str) -> RepoResult<Option<Category>> {
        let category = sqlx::query_as::<_, Category>("SELECT * FROM categories WHERE slug = ?1")
            .bind(slug)
            .fetch_optional(&self.pool)
            .await?;
        Ok(category)
    }

    /// id → parent_id adjacency for cycle checks
    pub async fn parent_map(&self) -> RepoResult<HashMap<String, Option<String>>> {
        let rows: Vec<(String, Option<String>)> =
            sqlx::query_as("SELECT id, parent_id FROM categories")
                .fetch_all(&self.pool)
                .await?;
        Ok(rows.into_iter().collect())
    }

    /// Create a new category
    ///
    /// Assigns a uuid id, derives the slug from the name when absent and
    /// enforces name/slug uniqueness plus parent existence.
    pub async fn create(&self, data: CategoryCreate) -> RepoResult<Category> {
        if self.find_by_name(&data.name).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Category '{}' already exists",
                data.name
            )));
        }

        let slug = match &data.slug {
            Some(s) => s.clone(),
            None => slugify(&data.name),
        };
        if slug.is_empty() {
            return Err(RepoError::Validation(format!(
                "Cannot derive a slug from '{}'",
                data.name
            )));
        }
        if self.find_by_slug(&slug).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Category slug '{slug}' already exists"
            )));
        }

        if let Some(parent) = &data.parent_id {
            self.find_by_id(parent).await?.ok_or_else(|| {
                RepoError::Validation(format!("Parent category {parent} not found"))
            })?;
        }

        let id = Uuid::new_v4().to_string();
        let now = Utc::now();
        debug!(id = %id, name = %data.name, "Creating category");

        sqlx::query(
            r#"
            INSERT INTO categories (
                id, name, slug, description, image, is_active,
                sort_order, menu_order, show_in_menu, menu_level, parent_id,
                created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)
            "#,
        )
        .bind(&id)
        .bind(&data.name)
        .bind(&slug)
        .bind(&data.description)
        .bind(&data.image)
        .bind(data.is_active.unwrap_or(true))
        .bind(data.sort_order.unwrap_or(0))
        .bind(data.menu_order.unwrap_or(0))
        .bind(data.show_in_menu.unwrap_or(true))
        .bind(data.menu_level.unwrap_or(0))
        .bind(&data.parent_id)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;

        self.find_by_id(&id)
            .await?
            .ok_or_else(|| RepoError::Database("Failed to create category".to_string()))
    }

    /// Update a category (partial)
    pub async fn update(&self, id: &str, data: CategoryUpdate) -> RepoResult<Category> {
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Category {id} not found")))?;

        // Uniqueness checks only when the value actually changes
        if let Some(new_name) = &data.name
            && new_name != &existing.name
            && self.find_by_name(new_name).await?.is_some()
        {
            return Err(RepoError::Duplicate(format!(
                "Category '{new_name}' already exists"
            )));
        }
        if let Some(new_slug) = &data.slug
            && new_slug != &existing.slug
            && self.find_by_slug(new_slug).await?.is_some()
        {
            return Err(RepoError::Duplicate(format!(
                "Category slug '{new_slug}' already exists"
            )));
        }

        // Resolve the new parent: missing = keep, null = top level
        let parent_id = match &data.parent_id {
            None => existing.parent_id.clone(),
            Some(None) => None,
            Some(Some(parent)) => {
                if parent == id {
                    return Err(RepoError::Validation(
                        "Category cannot be its own parent".to_string(),
                    ));
                }
                self.find_by_id(parent).await?.ok_or_else(|| {
                    RepoError::Validation(format!("Parent category {parent} not found"))
                })?;
                Some(parent.clone())
            }
        };

        // Same three-way resolution for the image: missing = keep,
        // null = clear, value = replace
        let image = match &data.image {
            None => existing.image.clone(),
            Some(image) => image.clone(),
        };

        if parent_id != existing.parent_id {
            let parents = self.parent_map().await?;
            if menu::would_create_cycle(id, parent_id.as_deref(), &parents) {
                return Err(RepoError::Validation(format!(
                    "Category {id} cannot be its own ancestor"
                )));
            }
        }

        let now = Utc::now();
        sqlx::query(
            r#"
            UPDATE categories SET
                name = ?2,
                slug = ?3,
                description = ?4,
                image = ?5,
                is_active = ?6,
                sort_order = ?7,
                menu_order = ?8,
                show_in_menu = ?9,
                menu_level = ?10,
                parent_id = ?11,
                updated_at = ?12
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(data.name.as_ref().unwrap_or(&existing.name))
        .bind(data.slug.as_ref().unwrap_or(&existing.slug))
        .bind(data.description.as_ref().unwrap_or(&existing.description))
        .bind(&image)
        .bind(data.is_active.unwrap_or(existing.is_active))
        .bind(data.sort_order.unwrap_or(existing.sort_order))
        .bind(data.menu_order.unwrap_or(existing.menu_order))
        .bind(data.show_in_menu.unwrap_or(existing.show_in_menu))
        .bind(data.menu_level.unwrap_or(existing.menu_level))
        .bind(&parent_id)
        .bind(now)
        .execute(&self.pool)
        .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Category {id} not found")))
    }

    /// Toggle menu visibility
    pub async fn toggle_visibility(&self, id: &str, show_in_menu: bool) -> RepoResult<()> {
        let result =
            sqlx::query("UPDATE categories SET show_in_menu = ?2, updated_at = ?3 WHERE id = ?1")
                .bind(id)
                .bind(show_in_menu)
                .bind(Utc::now())
                .execute(&self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound(format!("Category {id} not found")));
        }
        Ok(())
    }

    /// Hard delete a category
    ///
    /// Rejected while products are still linked (by FK or legacy name
    /// match). Direct children are re-parented to the deleted node's
    /// parent and take over its depth.
    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Category {id} not found")))?;

        let linked = ProductRepository::new(self.pool.clone())
            .count_for_category(id, &existing.name)
            .await?;
        if linked > 0 {
            return Err(RepoError::Validation(format!(
                "Cannot delete category '{}' with {linked} linked products",
                existing.name
            )));
        }

        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            UPDATE categories
            SET parent_id = ?2, menu_level = ?3, updated_at = ?4
            WHERE parent_id = ?1
            "#,
        )
        .bind(id)
        .bind(&existing.parent_id)
        .bind(existing.menu_level)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM categories WHERE id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        debug!(id = %id, name = %existing.name, "Category deleted");
        Ok(())
    }

    /// Persist a reorder batch atomically.
    ///
    /// The batch is validated against current rows first, then every
    /// entry is written inside a single transaction — either all
    /// positions update or none do. A row that disappears between
    /// validation and write aborts the transaction.
    pub async fn reorder(&self, items: &[ReorderItem]) -> RepoResult<()> {
        let current = self.parent_map().await?;
        menu::validate_batch(items, &current).map_err(|e| match e {
            menu::MenuError::UnknownCategory(id) => {
                RepoError::NotFound(format!("Category {id} not found"))
            }
            other => RepoError::Validation(other.to_string()),
        })?;

        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        for item in items {
            let result = sqlx::query(
                r#"
                UPDATE categories SET
                    menu_order = ?2,
                    menu_level = ?3,
                    parent_id = ?4,
                    show_in_menu = ?5,
                    updated_at = ?6
                WHERE id = ?1
                "#,
            )
            .bind(&item.id)
            .bind(item.menu_order)
            .bind(item.level)
            .bind(&item.parent_id)
            .bind(item.show_in_menu)
            .bind(now)
            .execute(&mut *tx)
            .await?;

            if result.rows_affected() == 0 {
                // Dropping tx rolls the whole batch back
                return Err(RepoError::NotFound(format!(
                    "Category {} not found",
                    item.id
                )));
            }
        }

        tx.commit().await?;
        debug!(count = items.len(), "Menu order updated");
        Ok(())
    }

    /// Sync menu display state from the canonical category list.
    ///
    /// One bulk statement keyed on `is_active` — never a per-row loop —
    /// so a failure cannot leave some categories synced and others not.
    /// Returns the number of categories touched.
    pub async fn sync_from_catalog(&self, policy: SyncLevelPolicy) -> RepoResult<u64> {
        let now = Utc::now();
        let sql = match policy {
            SyncLevelPolicy::Flatten => {
                r#"
                UPDATE categories
                SET show_in_menu = 1, menu_order = sort_order, menu_level = 0, updated_at = ?1
                WHERE is_active = 1
                "#
            }
            SyncLevelPolicy::Preserve => {
                r#"
                UPDATE categories
                SET show_in_menu = 1, menu_order = sort_order, updated_at = ?1
                WHERE is_active = 1
                "#
            }
        };

        let result = sqlx::query(sql).bind(now).execute(&self.pool).await?;
        let total = result.rows_affected();
        debug!(total, policy = %policy, "Menu synced from catalog");
        Ok(total)
    }
}
