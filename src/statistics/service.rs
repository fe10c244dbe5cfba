use chrono::{Datelike, Days, Months, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use super::models::{
    BudgetOverviewEntry, BudgetOverviewRow, CategoryStatRow, CategoryStatistics, CurrentMonth,
    MonthlyStatRow, MonthlyStatistics, StatisticsResponse,
};
use crate::budget::service::BudgetService;
use crate::errors::AppError;

/// Service layer for windowed aggregation over transactions and budgets.
pub struct StatisticsService;

impl StatisticsService {
    /// Default aggregation window: the trailing 365 days ending today.
    pub(crate) fn default_window(today: NaiveDate) -> (NaiveDate, NaiveDate) {
        (today - Days::new(365), today)
    }

    /// Inclusive bounds of the calendar month containing `today`.
    pub(crate) fn current_month_bounds(today: NaiveDate) -> (NaiveDate, NaiveDate) {
        let first = NaiveDate::from_ymd_opt(today.year(), today.month(), 1).unwrap_or(today);
        let last = first + Months::new(1) - Days::new(1);
        (first, last)
    }

    /// Aggregate totals, per-category breakdown and monthly series over the
    /// window. Missing bounds fall back to the trailing year.
    pub async fn aggregate(
        pool: &PgPool,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<StatisticsResponse, AppError> {
        let (default_start, default_end) = Self::default_window(Utc::now().date_naive());
        let start = start_date.unwrap_or(default_start);
        let end = end_date.unwrap_or(default_end);

        let total_income = Self::sum_by_type(pool, "income", start, end).await?;
        let total_expense = Self::sum_by_type(pool, "expense", start, end).await?;

        let category_rows = sqlx::query_as::<_, CategoryStatRow>(
            r#"
            SELECT c.id AS category_id, c.name AS category_name, SUM(t.amount) AS amount
            FROM transactions t
            JOIN categories c ON t.category_id = c.id
            WHERE t.created_at::date BETWEEN $1 AND $2
            GROUP BY c.id, c.name
            ORDER BY amount DESC
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_all(pool)
        .await
        .map_err(|e| AppError::InternalError(e.to_string()))?;

        let by_category = category_rows
            .into_iter()
            .map(|row| {
                let percentage = Self::share_of_expense(row.amount, total_expense);
                CategoryStatistics {
                    category_id: row.category_id,
                    category_name: row.category_name,
                    amount: row.amount,
                    percentage,
                }
            })
            .collect();

        let monthly_rows = sqlx::query_as::<_, MonthlyStatRow>(
            r#"
            SELECT EXTRACT(YEAR FROM t.created_at)::int AS year,
                   EXTRACT(MONTH FROM t.created_at)::int AS month,
                   COALESCE(SUM(CASE WHEN t.transaction_type = 'income' THEN t.amount ELSE 0 END), 0) AS income,
                   COALESCE(SUM(CASE WHEN t.transaction_type = 'expense' THEN t.amount ELSE 0 END), 0) AS expense
            FROM transactions t
            WHERE t.created_at::date BETWEEN $1 AND $2
            GROUP BY year, month
            ORDER BY year DESC, month DESC
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_all(pool)
        .await
        .map_err(|e| AppError::InternalError(e.to_string()))?;

        let by_month = monthly_rows
            .into_iter()
            .map(|row| MonthlyStatistics {
                year: row.year,
                month: row.month,
                income: row.income,
                expense: row.expense,
                net_amount: row.income - row.expense,
            })
            .collect();

        Ok(StatisticsResponse {
            total_income,
            total_expense,
            net_amount: total_income - total_expense,
            by_category,
            by_month,
        })
    }

    /// Budgets whose windows overlap the current calendar month, annotated
    /// with spend computed over the month (not the budget's own window).
    pub async fn budget_overview(
        pool: &PgPool,
    ) -> Result<(CurrentMonth, Vec<BudgetOverviewEntry>), AppError> {
        let (month_start, month_end) = Self::current_month_bounds(Utc::now().date_naive());

        let rows = sqlx::query_as::<_, BudgetOverviewRow>(
            r#"
            SELECT b.id, b.category_id, b.amount, b.start_date, b.end_date,
                   b.created_at, b.updated_at,
                   c.name AS category_name,
                   COALESCE((
                       SELECT SUM(t.amount)
                       FROM transactions t
                       WHERE t.category_id = b.category_id
                         AND t.transaction_type = 'expense'
                         AND t.created_at::date BETWEEN $1 AND $2
                   ), 0) AS actual_expense
            FROM budgets b
            JOIN categories c ON b.category_id = c.id
            WHERE b.start_date <= $2 AND b.end_date >= $1
            ORDER BY b.start_date DESC, b.created_at DESC
            "#,
        )
        .bind(month_start)
        .bind(month_end)
        .fetch_all(pool)
        .await
        .map_err(|e| AppError::InternalError(e.to_string()))?;

        let budgets = rows
            .into_iter()
            .map(|row| BudgetOverviewEntry {
                id: row.id,
                category_id: row.category_id,
                category_name: row.category_name,
                amount: row.amount,
                start_date: row.start_date,
                end_date: row.end_date,
                created_at: row.created_at,
                updated_at: row.updated_at,
                actual_expense: row.actual_expense,
                remaining: row.amount - row.actual_expense,
                percentage_used: BudgetService::percentage_used(row.actual_expense, row.amount),
            })
            .collect();

        let current_month = CurrentMonth {
            start_date: month_start,
            end_date: month_end,
        };

        Ok((current_month, budgets))
    }

    /// Share of `amount` against the total-expense denominator. Kept at zero
    /// for non-positive amounts and when no expenses fall in the window.
    pub(crate) fn share_of_expense(amount: Decimal, total_expense: Decimal) -> Decimal {
        if amount > Decimal::ZERO && total_expense > Decimal::ZERO {
            amount / total_expense * Decimal::from(100)
        } else {
            Decimal::ZERO
        }
    }

    async fn sum_by_type(
        pool: &PgPool,
        transaction_type: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Decimal, AppError> {
        sqlx::query_scalar::<_, Decimal>(
            r#"
            SELECT COALESCE(SUM(amount), 0)
            FROM transactions
            WHERE transaction_type = $1
              AND created_at::date BETWEEN $2 AND $3
            "#,
        )
        .bind(transaction_type)
        .bind(start)
        .bind(end)
        .fetch_one(pool)
        .await
        .map_err(|e| AppError::InternalError(e.to_string()))
    }
}
