use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// Validate that amount is positive
fn validate_positive_amount(amount: &Decimal) -> Result<(), ValidationError> {
    if *amount <= Decimal::ZERO {
        return Err(ValidationError::new("amount_must_be_positive"));
    }
    Ok(())
}

/// Database entity for budgets
#[derive(Debug, Clone, FromRow)]
pub struct Budget {
    pub id: Uuid,
    pub category_id: Uuid,
    pub amount: Decimal,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Budget joined with its category for display
#[derive(Debug, Clone, FromRow)]
pub struct BudgetWithCategory {
    pub id: Uuid,
    pub category_id: Uuid,
    pub amount: Decimal,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub category_name: String,
    pub category_kind: String,
    pub category_icon: Option<String>,
}

/// Category info embedded in budget responses
#[derive(Debug, Serialize, ToSchema)]
pub struct BudgetCategoryInfo {
    pub id: Uuid,
    #[schema(example = "Food")]
    pub name: String,
    #[serde(rename = "type")]
    #[schema(example = "expense")]
    pub kind: String,
    pub icon: Option<String>,
}

/// Budget information returned in responses
#[derive(Debug, Serialize, ToSchema)]
pub struct BudgetResponse {
    /// Unique budget identifier
    pub id: Uuid,
    /// Category this budget constrains
    pub category_id: Uuid,
    /// Budgeted amount (positive)
    #[schema(example = 1000.00)]
    pub amount: Decimal,
    /// First day of the budget window (inclusive)
    pub start_date: NaiveDate,
    /// Last day of the budget window (inclusive)
    pub end_date: NaiveDate,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
    /// Joined category info
    pub category: BudgetCategoryInfo,
}

impl BudgetResponse {
    pub fn from_row(row: BudgetWithCategory) -> Self {
        Self {
            id: row.id,
            category_id: row.category_id,
            amount: row.amount,
            start_date: row.start_date,
            end_date: row.end_date,
            created_at: row.created_at,
            updated_at: row.updated_at,
            category: BudgetCategoryInfo {
                id: row.category_id,
                name: row.category_name,
                kind: row.category_kind,
                icon: row.category_icon,
            },
        }
    }
}

/// Spend-to-date figures for a budget window
#[derive(Debug, Serialize, ToSchema)]
pub struct BudgetStatus {
    /// Sum of expense amounts in the budget's category and window
    #[schema(example = 300.00)]
    pub actual_expense: Decimal,
    /// actual_expense / amount * 100
    #[schema(example = 30.00)]
    pub percentage_used: Decimal,
    /// amount - actual_expense (negative signals overspend)
    #[schema(example = 700.00)]
    pub remaining: Decimal,
}

/// Response for GET /budgets/{id}/status
#[derive(Debug, Serialize, ToSchema)]
pub struct BudgetStatusResponse {
    pub budget: BudgetResponse,
    pub status: BudgetStatus,
}

/// Request body for creating or overwriting a budget
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct BudgetInputDto {
    /// Category this budget constrains
    pub category_id: Uuid,

    /// Budgeted amount (must be positive)
    #[validate(custom(
        function = "validate_positive_amount",
        message = "Amount must be greater than 0"
    ))]
    #[schema(example = 1000.00)]
    pub amount: Decimal,

    /// First day of the budget window (YYYY-MM-DD, inclusive)
    pub start_date: NaiveDate,

    /// Last day of the budget window (YYYY-MM-DD, inclusive)
    pub end_date: NaiveDate,
}

impl BudgetInputDto {
    /// The window must be well-formed: start on or before end.
    pub fn validate_window(&self) -> Result<(), ValidationError> {
        if self.end_date < self.start_date {
            return Err(ValidationError::new("invalid_window")
                .with_message("End date must be on or after start date".into()));
        }
        Ok(())
    }
}

/// Query parameters for listing budgets. Date bounds select budgets whose
/// windows overlap the supplied range.
#[derive(Debug, Deserialize, IntoParams)]
pub struct ListBudgetsQuery {
    /// Filter by category
    pub category_id: Option<Uuid>,
    /// Keep budgets whose window ends on or after this date
    pub start_date: Option<NaiveDate>,
    /// Keep budgets whose window starts on or before this date
    pub end_date: Option<NaiveDate>,
}

/// Path parameters for budget ID
#[derive(Debug, Deserialize, IntoParams)]
pub struct BudgetIdPath {
    /// Budget UUID
    pub id: Uuid,
}
