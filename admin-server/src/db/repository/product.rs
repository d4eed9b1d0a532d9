//! Product Repository
//!
//! The menu subsystem does not own products; it only needs enough of
//! them to compute per-category counts and to seed fixtures. The delete
//! guard takes its linked-product count from here; the annotated counts
//! on category rows use the same FK-or-legacy-name rule.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use super::{RepoError, RepoResult};
use shared::models::{Product, ProductCreate};

#[derive(Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Count products linked to a category.
    ///
    /// The FK link wins; the name match is the legacy compatibility shim
    /// and only applies to rows without a `category_id`, so renaming a
    /// migrated category no longer silently orphans its count.
    pub async fn count_for_category(
        &self,
        category_id: &str,
        category_name: &str,
    ) -> RepoResult<i64> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM products
            WHERE category_id = ?1
               OR (category_id IS NULL AND category_name = ?2)
            "#,
        )
        .bind(category_id)
        .bind(category_name)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    /// Insert a product (seeding and fixtures; product CRUD proper lives
    /// outside this service)
    pub async fn create(&self, data: ProductCreate) -> RepoResult<Product> {
        let id = Uuid::new_v4().to_string();
        let now = Utc::now();
        debug!(id = %id, name = %data.name, "Creating product");

        sqlx::query(
            r#"
            INSERT INTO products (
                id, name, category_id, category_name, price_cents, is_active,
                created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(&id)
        .bind(&data.name)
        .bind(&data.category_id)
        .bind(&data.category_name)
        .bind(data.price_cents.unwrap_or(0))
        .bind(data.is_active.unwrap_or(true))
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;

        self.find_by_id(&id)
            .await?
            .ok_or_else(|| RepoError::Database("Failed to create product".to_string()))
    }

    /// Find product by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(product)
    }
}
