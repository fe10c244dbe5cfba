use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use super::models::{Budget, BudgetInputDto, BudgetStatus, BudgetWithCategory, ListBudgetsQuery};
use crate::errors::AppError;

/// Service layer for budget business logic.
pub struct BudgetService;

impl BudgetService {
    /// Percentage of `amount` consumed by `actual`, guarded against a zero
    /// denominator (budget creation already rejects non-positive amounts).
    pub(crate) fn percentage_used(actual: Decimal, amount: Decimal) -> Decimal {
        if amount > Decimal::ZERO {
            actual / amount * Decimal::from(100)
        } else {
            Decimal::ZERO
        }
    }

    pub async fn get_with_category(
        pool: &PgPool,
        budget_id: Uuid,
    ) -> Result<BudgetWithCategory, AppError> {
        sqlx::query_as::<_, BudgetWithCategory>(
            r#"
            SELECT b.id, b.category_id, b.amount, b.start_date, b.end_date,
                   b.created_at, b.updated_at,
                   c.name AS category_name, c.kind AS category_kind, c.icon AS category_icon
            FROM budgets b
            JOIN categories c ON b.category_id = c.id
            WHERE b.id = $1
            "#,
        )
        .bind(budget_id)
        .fetch_optional(pool)
        .await
        .map_err(|e| AppError::InternalError(e.to_string()))?
        .ok_or_else(|| AppError::NotFound("Budget not found".to_string()))
    }

    /// List budgets joined with category info. Date bounds filter by window
    /// overlap: a budget matches when its window intersects the supplied range.
    pub async fn list(
        pool: &PgPool,
        query: &ListBudgetsQuery,
    ) -> Result<Vec<BudgetWithCategory>, AppError> {
        sqlx::query_as::<_, BudgetWithCategory>(
            r#"
            SELECT b.id, b.category_id, b.amount, b.start_date, b.end_date,
                   b.created_at, b.updated_at,
                   c.name AS category_name, c.kind AS category_kind, c.icon AS category_icon
            FROM budgets b
            JOIN categories c ON b.category_id = c.id
            WHERE ($1::uuid IS NULL OR b.category_id = $1)
              AND ($2::date IS NULL OR b.end_date >= $2)
              AND ($3::date IS NULL OR b.start_date <= $3)
            ORDER BY b.start_date DESC, b.created_at DESC
            "#,
        )
        .bind(query.category_id)
        .bind(query.start_date)
        .bind(query.end_date)
        .fetch_all(pool)
        .await
        .map_err(|e| AppError::InternalError(e.to_string()))
    }

    /// Create a new budget. The category must exist; overlapping budgets for
    /// one category are allowed.
    pub async fn create(
        pool: &PgPool,
        dto: &BudgetInputDto,
    ) -> Result<BudgetWithCategory, AppError> {
        Self::ensure_category_exists(pool, dto.category_id).await?;

        let budget = sqlx::query_as::<_, Budget>(
            r#"
            INSERT INTO budgets (category_id, amount, start_date, end_date)
            VALUES ($1, $2, $3, $4)
            RETURNING id, category_id, amount, start_date, end_date, created_at, updated_at
            "#,
        )
        .bind(dto.category_id)
        .bind(dto.amount)
        .bind(dto.start_date)
        .bind(dto.end_date)
        .fetch_one(pool)
        .await
        .map_err(|e| AppError::InternalError(e.to_string()))?;

        Self::get_with_category(pool, budget.id).await
    }

    /// Overwrite a budget (PUT semantics). Category existence is re-checked
    /// only when the category changed.
    pub async fn update(
        pool: &PgPool,
        budget_id: Uuid,
        dto: &BudgetInputDto,
    ) -> Result<BudgetWithCategory, AppError> {
        let current = Self::get_with_category(pool, budget_id).await?;

        if dto.category_id != current.category_id {
            Self::ensure_category_exists(pool, dto.category_id).await?;
        }

        sqlx::query(
            r#"
            UPDATE budgets
            SET category_id = $2, amount = $3, start_date = $4, end_date = $5, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(budget_id)
        .bind(dto.category_id)
        .bind(dto.amount)
        .bind(dto.start_date)
        .bind(dto.end_date)
        .execute(pool)
        .await
        .map_err(|e| AppError::InternalError(e.to_string()))?;

        Self::get_with_category(pool, budget_id).await
    }

    /// Delete a budget. Unguarded: nothing references budgets downstream.
    pub async fn delete(pool: &PgPool, budget_id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM budgets WHERE id = $1")
            .bind(budget_id)
            .execute(pool)
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Budget not found".to_string()));
        }

        Ok(())
    }

    /// Spend-to-date against the budget's own window.
    pub async fn status(
        pool: &PgPool,
        budget_id: Uuid,
    ) -> Result<(BudgetWithCategory, BudgetStatus), AppError> {
        let budget = Self::get_with_category(pool, budget_id).await?;

        let actual_expense = Self::expense_within(
            pool,
            budget.category_id,
            budget.start_date,
            budget.end_date,
        )
        .await?;

        let status = BudgetStatus {
            actual_expense,
            percentage_used: Self::percentage_used(actual_expense, budget.amount),
            remaining: budget.amount - actual_expense,
        };

        Ok((budget, status))
    }

    /// Sum of expense amounts for a category with creation date inside the
    /// inclusive window. Reversal entries carry negated amounts, so reversed
    /// spend nets out here without special handling.
    pub async fn expense_within(
        pool: &PgPool,
        category_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Decimal, AppError> {
        sqlx::query_scalar::<_, Decimal>(
            r#"
            SELECT COALESCE(SUM(amount), 0)
            FROM transactions
            WHERE category_id = $1
              AND transaction_type = 'expense'
              AND created_at::date BETWEEN $2 AND $3
            "#,
        )
        .bind(category_id)
        .bind(start)
        .bind(end)
        .fetch_one(pool)
        .await
        .map_err(|e| AppError::InternalError(e.to_string()))
    }

    async fn ensure_category_exists(pool: &PgPool, category_id: Uuid) -> Result<(), AppError> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM categories WHERE id = $1)")
                .bind(category_id)
                .fetch_one(pool)
                .await
                .map_err(|e| AppError::InternalError(e.to_string()))?;

        if !exists {
            return Err(AppError::NotFound("Category not found".to_string()));
        }

        Ok(())
    }
}
