use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

/// Query parameters for the statistics window. Both bounds are inclusive
/// calendar dates; omitted bounds default to the trailing 365 days.
#[derive(Debug, Deserialize, IntoParams)]
pub struct StatisticsQuery {
    /// Window start (YYYY-MM-DD, inclusive)
    pub start_date: Option<NaiveDate>,
    /// Window end (YYYY-MM-DD, inclusive)
    pub end_date: Option<NaiveDate>,
}

/// Per-category aggregation row
#[derive(Debug, FromRow)]
pub struct CategoryStatRow {
    pub category_id: Uuid,
    pub category_name: String,
    pub amount: Decimal,
}

/// Per-category breakdown entry
#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryStatistics {
    pub category_id: Uuid,
    #[schema(example = "Food")]
    pub category_name: String,
    /// Summed transaction amount for the category in the window
    #[schema(example = 300.00)]
    pub amount: Decimal,
    /// Share of total expense. The expense denominator applies to income
    /// categories too, mirroring the consumer-facing dashboard.
    #[schema(example = 25.00)]
    pub percentage: Decimal,
}

/// Per-month aggregation row
#[derive(Debug, FromRow)]
pub struct MonthlyStatRow {
    pub year: i32,
    pub month: i32,
    pub income: Decimal,
    pub expense: Decimal,
}

/// Monthly series entry, most recent first
#[derive(Debug, Serialize, ToSchema)]
pub struct MonthlyStatistics {
    #[schema(example = 2025)]
    pub year: i32,
    #[schema(example = 2)]
    pub month: i32,
    pub income: Decimal,
    pub expense: Decimal,
    pub net_amount: Decimal,
}

/// Aggregate statistics over a date window
#[derive(Debug, Serialize, ToSchema)]
pub struct StatisticsResponse {
    pub total_income: Decimal,
    pub total_expense: Decimal,
    /// total_income - total_expense
    pub net_amount: Decimal,
    pub by_category: Vec<CategoryStatistics>,
    pub by_month: Vec<MonthlyStatistics>,
}

/// Joined row for the budget overview query
#[derive(Debug, FromRow)]
pub struct BudgetOverviewRow {
    pub id: Uuid,
    pub category_id: Uuid,
    pub amount: Decimal,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub category_name: String,
    pub actual_expense: Decimal,
}

/// Budget annotated with current-month spend
#[derive(Debug, Serialize, ToSchema)]
pub struct BudgetOverviewEntry {
    pub id: Uuid,
    pub category_id: Uuid,
    #[schema(example = "Food")]
    pub category_name: String,
    #[schema(example = 1000.00)]
    pub amount: Decimal,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Expenses in the category dated within the current month
    #[schema(example = 300.00)]
    pub actual_expense: Decimal,
    #[schema(example = 700.00)]
    pub remaining: Decimal,
    #[schema(example = 30.00)]
    pub percentage_used: Decimal,
}

/// Current calendar month bounds
#[derive(Debug, Serialize, ToSchema)]
pub struct CurrentMonth {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Response for GET /statistics/budget-overview
#[derive(Debug, Serialize, ToSchema)]
pub struct BudgetOverviewResponse {
    pub current_month: CurrentMonth,
    pub budgets: Vec<BudgetOverviewEntry>,
}
