use sqlx::PgPool;
use uuid::Uuid;

use super::models::{Category, CategoryKind, CreateCategoryDto, UpdateCategoryDto};
use crate::errors::AppError;

/// Service layer for category business logic.
pub struct CategoryService;

impl CategoryService {
    pub async fn get_by_id(pool: &PgPool, category_id: Uuid) -> Result<Category, AppError> {
        sqlx::query_as::<_, Category>(
            r#"
            SELECT id, name, kind, icon, created_at, updated_at
            FROM categories
            WHERE id = $1
            "#,
        )
        .bind(category_id)
        .fetch_optional(pool)
        .await
        .map_err(|e| AppError::InternalError(e.to_string()))?
        .ok_or_else(|| AppError::NotFound("Category not found".to_string()))
    }

    /// List categories, optionally filtered by kind.
    pub async fn list(pool: &PgPool, kind: Option<&str>) -> Result<Vec<Category>, AppError> {
        sqlx::query_as::<_, Category>(
            r#"
            SELECT id, name, kind, icon, created_at, updated_at
            FROM categories
            WHERE ($1::text IS NULL OR kind = $1)
            ORDER BY created_at DESC
            "#,
        )
        .bind(kind)
        .fetch_all(pool)
        .await
        .map_err(|e| AppError::InternalError(e.to_string()))
    }

    /// Create a new category.
    pub async fn create(pool: &PgPool, dto: &CreateCategoryDto) -> Result<Category, AppError> {
        let kind = Self::parse_kind(&dto.kind)?;

        let name = dto.name.trim().to_string();
        if name.is_empty() {
            return Err(AppError::ValidationError(
                "Name cannot be empty".to_string(),
            ));
        }

        sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO categories (name, kind, icon)
            VALUES ($1, $2, $3)
            RETURNING id, name, kind, icon, created_at, updated_at
            "#,
        )
        .bind(&name)
        .bind(kind.as_str())
        .bind(&dto.icon)
        .fetch_one(pool)
        .await
        .map_err(|e| AppError::InternalError(e.to_string()))
    }

    /// Overwrite name, kind and icon (PUT semantics).
    pub async fn update(
        pool: &PgPool,
        category_id: Uuid,
        dto: &UpdateCategoryDto,
    ) -> Result<Category, AppError> {
        let kind = Self::parse_kind(&dto.kind)?;

        let name = dto.name.trim().to_string();
        if name.is_empty() {
            return Err(AppError::ValidationError(
                "Name cannot be empty".to_string(),
            ));
        }

        sqlx::query_as::<_, Category>(
            r#"
            UPDATE categories
            SET name = $2, kind = $3, icon = $4, updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, kind, icon, created_at, updated_at
            "#,
        )
        .bind(category_id)
        .bind(&name)
        .bind(kind.as_str())
        .bind(&dto.icon)
        .fetch_optional(pool)
        .await
        .map_err(|e| AppError::InternalError(e.to_string()))?
        .ok_or_else(|| AppError::NotFound("Category not found".to_string()))
    }

    /// Delete a category. Refused while any transaction or budget references it.
    pub async fn delete(pool: &PgPool, category_id: Uuid) -> Result<(), AppError> {
        // Verify existence first so a missing id reports 404, not a guard error
        let _ = Self::get_by_id(pool, category_id).await?;

        let transaction_count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM transactions WHERE category_id = $1",
        )
        .bind(category_id)
        .fetch_one(pool)
        .await
        .map_err(|e| AppError::InternalError(e.to_string()))?;

        if transaction_count > 0 {
            return Err(AppError::Conflict(
                "Cannot delete category with associated transactions".to_string(),
            ));
        }

        let budget_count =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM budgets WHERE category_id = $1")
                .bind(category_id)
                .fetch_one(pool)
                .await
                .map_err(|e| AppError::InternalError(e.to_string()))?;

        if budget_count > 0 {
            return Err(AppError::Conflict(
                "Cannot delete category with associated budgets".to_string(),
            ));
        }

        sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(category_id)
            .execute(pool)
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?;

        Ok(())
    }

    fn parse_kind(raw: &str) -> Result<CategoryKind, AppError> {
        CategoryKind::parse(raw).ok_or_else(|| {
            AppError::ValidationError(
                "Category type must be either 'expense' or 'income'".to_string(),
            )
        })
    }
}
