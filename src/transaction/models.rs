use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// Transaction type enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money spent (decreases account balance)
    #[default]
    Expense,
    /// Money received (increases account balance)
    Income,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Expense => "expense",
            TransactionType::Income => "income",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "expense" => Some(TransactionType::Expense),
            "income" => Some(TransactionType::Income),
            _ => None,
        }
    }
}

/// Validate that amount is positive
fn validate_positive_amount(amount: &Decimal) -> Result<(), ValidationError> {
    if *amount <= Decimal::ZERO {
        return Err(ValidationError::new("amount_must_be_positive"));
    }
    Ok(())
}

/// Database model for transactions.
/// `amount` is positive for postings; reversal entries carry the negated
/// amount of the entry they offset and point back at it.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Transaction {
    pub id: Uuid,
    pub account_id: Uuid,
    pub category_id: Uuid,
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub transaction_type: String,
    pub description: Option<String>,
    pub reverses_transaction_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Transaction {
    pub fn get_type(&self) -> TransactionType {
        TransactionType::parse(&self.transaction_type).unwrap_or_default()
    }
}

/// Transaction information returned in responses
#[derive(Debug, Serialize, ToSchema)]
pub struct TransactionResponse {
    /// Unique transaction identifier
    pub id: Uuid,
    /// Account the posting was applied to
    pub account_id: Uuid,
    /// Category this transaction belongs to
    pub category_id: Uuid,
    /// Transaction amount (negative only for reversal entries)
    #[schema(example = 50.00)]
    pub amount: Decimal,
    /// Transaction type (expense or income)
    #[serde(rename = "type")]
    #[schema(example = "expense")]
    pub transaction_type: String,
    /// Optional description
    #[schema(example = "Weekly groceries")]
    pub description: Option<String>,
    /// Set on reversal entries: the transaction this one offsets
    pub reverses_transaction_id: Option<Uuid>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl From<Transaction> for TransactionResponse {
    fn from(t: Transaction) -> Self {
        Self {
            id: t.id,
            account_id: t.account_id,
            category_id: t.category_id,
            amount: t.amount,
            transaction_type: t.transaction_type,
            description: t.description,
            reverses_transaction_id: t.reverses_transaction_id,
            created_at: t.created_at,
            updated_at: t.updated_at,
        }
    }
}

/// Account info embedded in detailed transaction listings
#[derive(Debug, Serialize, ToSchema)]
pub struct EmbeddedAccountInfo {
    pub id: Uuid,
    #[schema(example = "Checking")]
    pub name: String,
}

/// Category info embedded in detailed transaction listings
#[derive(Debug, Serialize, ToSchema)]
pub struct EmbeddedCategoryInfo {
    pub id: Uuid,
    #[schema(example = "Food")]
    pub name: String,
    #[serde(rename = "type")]
    #[schema(example = "expense")]
    pub kind: String,
    pub icon: Option<String>,
}

/// Joined row for transaction listings
#[derive(Debug, FromRow)]
pub struct TransactionDetailRow {
    pub id: Uuid,
    pub account_id: Uuid,
    pub category_id: Uuid,
    pub amount: Decimal,
    pub transaction_type: String,
    pub description: Option<String>,
    pub reverses_transaction_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub account_name: String,
    pub category_name: String,
    pub category_kind: String,
    pub category_icon: Option<String>,
}

/// Transaction joined with its account and category for display
#[derive(Debug, Serialize, ToSchema)]
pub struct TransactionDetailResponse {
    pub id: Uuid,
    pub account_id: Uuid,
    pub category_id: Uuid,
    #[schema(example = 50.00)]
    pub amount: Decimal,
    #[serde(rename = "type")]
    #[schema(example = "expense")]
    pub transaction_type: String,
    pub description: Option<String>,
    pub reverses_transaction_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub account: EmbeddedAccountInfo,
    pub category: EmbeddedCategoryInfo,
}

impl TransactionDetailRow {
    pub fn into_response(self) -> TransactionDetailResponse {
        TransactionDetailResponse {
            id: self.id,
            account_id: self.account_id,
            category_id: self.category_id,
            amount: self.amount,
            transaction_type: self.transaction_type,
            description: self.description,
            reverses_transaction_id: self.reverses_transaction_id,
            created_at: self.created_at,
            updated_at: self.updated_at,
            account: EmbeddedAccountInfo {
                id: self.account_id,
                name: self.account_name,
            },
            category: EmbeddedCategoryInfo {
                id: self.category_id,
                name: self.category_name,
                kind: self.category_kind,
                icon: self.category_icon,
            },
        }
    }
}

/// Request body for posting a transaction
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateTransactionDto {
    /// Account whose balance the posting mutates
    pub account_id: Uuid,

    /// Category this transaction belongs to
    pub category_id: Uuid,

    /// Transaction amount (must be positive)
    #[validate(custom(
        function = "validate_positive_amount",
        message = "Amount must be positive"
    ))]
    #[schema(example = 50.00)]
    pub amount: Decimal,

    /// Transaction type (expense or income); must match the category's kind
    #[serde(rename = "type")]
    #[schema(example = "expense")]
    pub transaction_type: String,

    /// Optional description (max 200 chars)
    #[validate(length(max = 200, message = "Description cannot exceed 200 characters"))]
    #[schema(example = "Weekly groceries")]
    pub description: Option<String>,
}

/// Response for posting or reversing a transaction: the created record plus
/// the account balance after the atomic update.
#[derive(Debug, Serialize, ToSchema)]
pub struct PostingResponse {
    pub transaction: TransactionResponse,
    /// Account balance after the posting was applied
    #[schema(example = -50.00)]
    pub new_balance: Decimal,
}

/// Query parameters for listing transactions
#[derive(Debug, Deserialize, IntoParams)]
pub struct TransactionFilters {
    /// Filter by account
    pub account_id: Option<Uuid>,
    /// Filter by type (expense or income)
    #[serde(rename = "type")]
    #[param(example = "expense")]
    pub transaction_type: Option<String>,
}

/// Path parameters for transaction ID
#[derive(Debug, Deserialize, IntoParams)]
pub struct TransactionIdPath {
    /// Transaction UUID
    pub id: Uuid,
}
