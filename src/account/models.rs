use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Database entity for accounts
#[derive(Debug, Clone, FromRow)]
pub struct Account {
    pub id: Uuid,
    pub name: String,
    pub balance: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Account information returned in responses
#[derive(Debug, Serialize, ToSchema)]
pub struct AccountResponse {
    /// Unique account identifier
    pub id: Uuid,
    /// Account name
    #[schema(example = "Checking")]
    pub name: String,
    /// Current balance (signed; postings move it, direct edits overwrite it)
    #[schema(example = 1500.00)]
    pub balance: Decimal,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl AccountResponse {
    pub fn from_account(account: Account) -> Self {
        Self {
            id: account.id,
            name: account.name,
            balance: account.balance,
            created_at: account.created_at,
            updated_at: account.updated_at,
        }
    }
}

/// Response for listing accounts
#[derive(Debug, Serialize, ToSchema)]
pub struct AccountsListResponse {
    /// List of accounts
    pub accounts: Vec<AccountResponse>,
    /// Sum of all account balances
    #[schema(example = 2500.00)]
    pub total_balance: Decimal,
}

/// Request body for creating an account
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateAccountDto {
    /// Account name (1-50 characters)
    #[validate(length(min = 1, max = 50, message = "Name must be 1-50 characters"))]
    #[schema(example = "Checking")]
    pub name: String,

    /// Initial balance (defaults to 0, accepted as given)
    #[serde(default)]
    #[schema(example = 1000.00)]
    pub balance: Option<Decimal>,
}

/// Request body for updating an account (PUT - full overwrite)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateAccountDto {
    /// Account name (1-50 characters)
    #[validate(length(min = 1, max = 50, message = "Name must be 1-50 characters"))]
    #[schema(example = "Savings")]
    pub name: String,

    /// New balance. Overwrites the stored running total without reconciling
    /// against transaction history.
    #[schema(example = 2500.00)]
    pub balance: Decimal,
}

/// Delete operation response
#[derive(Debug, Serialize, ToSchema)]
pub struct DeleteResponse {
    /// Success message
    #[schema(example = "Account deleted successfully")]
    pub message: String,
    /// Deleted resource ID
    pub id: Uuid,
}

/// Path parameters for account ID
#[derive(Debug, Deserialize, IntoParams)]
pub struct AccountIdPath {
    /// Account UUID
    pub id: Uuid,
}
