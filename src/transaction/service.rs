use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use super::models::{
    CreateTransactionDto, Transaction, TransactionDetailRow, TransactionFilters, TransactionType,
};
use crate::account::models::Account;
use crate::category::models::Category;
use crate::errors::AppError;

/// Service layer for transaction business logic.
/// CRITICAL: balance updates must be atomic with the transaction insert.
pub struct TransactionService;

impl TransactionService {
    /// Signed effect of a transaction on its account balance.
    pub(crate) fn balance_effect(amount: Decimal, transaction_type: TransactionType) -> Decimal {
        match transaction_type {
            TransactionType::Expense => -amount,
            TransactionType::Income => amount,
        }
    }

    /// Post a transaction: validate account/category/type, apply the balance
    /// delta and insert the record inside one store transaction. Either both
    /// writes commit or neither is visible.
    pub async fn create_transaction(
        pool: &PgPool,
        dto: CreateTransactionDto,
    ) -> Result<(Transaction, Decimal), AppError> {
        let transaction_type = TransactionType::parse(&dto.transaction_type).ok_or_else(|| {
            AppError::ValidationError(
                "Transaction type must be either 'expense' or 'income'".to_string(),
            )
        })?;

        let mut tx = pool
            .begin()
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?;

        // Lock the account row so concurrent postings against the same
        // account serialize instead of losing updates.
        let account = sqlx::query_as::<_, Account>(
            r#"
            SELECT id, name, balance, created_at, updated_at
            FROM accounts
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(dto.account_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| AppError::InternalError(e.to_string()))?
        .ok_or_else(|| AppError::NotFound("Account not found".to_string()))?;

        let category = sqlx::query_as::<_, Category>(
            r#"
            SELECT id, name, kind, icon, created_at, updated_at
            FROM categories
            WHERE id = $1
            "#,
        )
        .bind(dto.category_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| AppError::InternalError(e.to_string()))?
        .ok_or_else(|| AppError::NotFound("Category not found".to_string()))?;

        if category.kind != transaction_type.as_str() {
            return Err(AppError::Conflict(
                "Category type does not match transaction type".to_string(),
            ));
        }

        let new_balance = account.balance + Self::balance_effect(dto.amount, transaction_type);

        sqlx::query("UPDATE accounts SET balance = $1, updated_at = NOW() WHERE id = $2")
            .bind(new_balance)
            .bind(dto.account_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?;

        let transaction = sqlx::query_as::<_, Transaction>(
            r#"
            INSERT INTO transactions (account_id, category_id, amount, transaction_type, description)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, account_id, category_id, amount, transaction_type, description,
                      reverses_transaction_id, created_at, updated_at
            "#,
        )
        .bind(dto.account_id)
        .bind(dto.category_id)
        .bind(dto.amount)
        .bind(transaction_type.as_str())
        .bind(&dto.description)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::InternalError(e.to_string()))?;

        tx.commit()
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?;

        Ok((transaction, new_balance))
    }

    /// Reverse a posted transaction by inserting an offsetting entry.
    /// The reversal keeps the original's category and type but negates the
    /// amount, so the balance delta and all aggregations net out. History is
    /// never mutated.
    pub async fn reverse_transaction(
        pool: &PgPool,
        transaction_id: Uuid,
    ) -> Result<(Transaction, Decimal), AppError> {
        let mut tx = pool
            .begin()
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?;

        // Lock the original so two concurrent reversals cannot both pass the
        // already-reversed check.
        let original = sqlx::query_as::<_, Transaction>(
            r#"
            SELECT id, account_id, category_id, amount, transaction_type, description,
                   reverses_transaction_id, created_at, updated_at
            FROM transactions
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(transaction_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| AppError::InternalError(e.to_string()))?
        .ok_or_else(|| AppError::NotFound("Transaction not found".to_string()))?;

        if original.reverses_transaction_id.is_some() {
            return Err(AppError::Conflict(
                "Cannot reverse a reversal entry".to_string(),
            ));
        }

        let already_reversed = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM transactions WHERE reverses_transaction_id = $1)",
        )
        .bind(transaction_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::InternalError(e.to_string()))?;

        if already_reversed {
            return Err(AppError::Conflict(
                "Transaction has already been reversed".to_string(),
            ));
        }

        // The account must still exist: account deletion is guarded by
        // transaction references.
        let account = sqlx::query_as::<_, Account>(
            r#"
            SELECT id, name, balance, created_at, updated_at
            FROM accounts
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(original.account_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| AppError::InternalError(e.to_string()))?
        .ok_or_else(|| AppError::NotFound("Account not found".to_string()))?;

        let reversal_amount = -original.amount;
        let new_balance =
            account.balance + Self::balance_effect(reversal_amount, original.get_type());

        sqlx::query("UPDATE accounts SET balance = $1, updated_at = NOW() WHERE id = $2")
            .bind(new_balance)
            .bind(original.account_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?;

        let description = format!("Reversal of transaction {}", original.id);

        let reversal = sqlx::query_as::<_, Transaction>(
            r#"
            INSERT INTO transactions
                (account_id, category_id, amount, transaction_type, description, reverses_transaction_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, account_id, category_id, amount, transaction_type, description,
                      reverses_transaction_id, created_at, updated_at
            "#,
        )
        .bind(original.account_id)
        .bind(original.category_id)
        .bind(reversal_amount)
        .bind(&original.transaction_type)
        .bind(&description)
        .bind(original.id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::InternalError(e.to_string()))?;

        tx.commit()
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?;

        Ok((reversal, new_balance))
    }

    /// List transactions newest-first, joined with account and category info.
    pub async fn list_transactions(
        pool: &PgPool,
        filters: &TransactionFilters,
    ) -> Result<Vec<TransactionDetailRow>, AppError> {
        sqlx::query_as::<_, TransactionDetailRow>(
            r#"
            SELECT t.id, t.account_id, t.category_id, t.amount, t.transaction_type,
                   t.description, t.reverses_transaction_id, t.created_at, t.updated_at,
                   a.name AS account_name,
                   c.name AS category_name, c.kind AS category_kind, c.icon AS category_icon
            FROM transactions t
            JOIN accounts a ON t.account_id = a.id
            JOIN categories c ON t.category_id = c.id
            WHERE ($1::uuid IS NULL OR t.account_id = $1)
              AND ($2::text IS NULL OR t.transaction_type = $2)
            ORDER BY t.created_at DESC
            "#,
        )
        .bind(filters.account_id)
        .bind(&filters.transaction_type)
        .fetch_all(pool)
        .await
        .map_err(|e| AppError::InternalError(e.to_string()))
    }
}
