use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use super::models::{Account, CreateAccountDto, UpdateAccountDto};
use crate::errors::AppError;

/// Service layer for account business logic.
pub struct AccountService;

impl AccountService {
    /// List all accounts, newest first.
    pub async fn list_accounts(pool: &PgPool) -> Result<Vec<Account>, AppError> {
        sqlx::query_as::<_, Account>(
            r#"
            SELECT id, name, balance, created_at, updated_at
            FROM accounts
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(pool)
        .await
        .map_err(|e| AppError::InternalError(e.to_string()))
    }

    /// Create a new account. The initial balance is stored as given.
    pub async fn create_account(pool: &PgPool, dto: &CreateAccountDto) -> Result<Account, AppError> {
        let name = dto.name.trim().to_string();
        if name.is_empty() {
            return Err(AppError::ValidationError(
                "Name cannot be empty".to_string(),
            ));
        }

        let balance = dto.balance.unwrap_or(Decimal::ZERO);

        sqlx::query_as::<_, Account>(
            r#"
            INSERT INTO accounts (name, balance)
            VALUES ($1, $2)
            RETURNING id, name, balance, created_at, updated_at
            "#,
        )
        .bind(&name)
        .bind(balance)
        .fetch_one(pool)
        .await
        .map_err(|e| AppError::InternalError(e.to_string()))
    }

    /// Overwrite name and balance (PUT semantics). The balance written here is
    /// not reconciled against transaction history; it is a direct correction.
    pub async fn update_account(
        pool: &PgPool,
        account_id: Uuid,
        dto: &UpdateAccountDto,
    ) -> Result<Account, AppError> {
        let name = dto.name.trim().to_string();
        if name.is_empty() {
            return Err(AppError::ValidationError(
                "Name cannot be empty".to_string(),
            ));
        }

        sqlx::query_as::<_, Account>(
            r#"
            UPDATE accounts
            SET name = $2, balance = $3, updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, balance, created_at, updated_at
            "#,
        )
        .bind(account_id)
        .bind(&name)
        .bind(dto.balance)
        .fetch_optional(pool)
        .await
        .map_err(|e| AppError::InternalError(e.to_string()))?
        .ok_or_else(|| AppError::NotFound("Account not found".to_string()))
    }

    /// Delete an account. Refused while any transaction references it.
    pub async fn delete_account(pool: &PgPool, account_id: Uuid) -> Result<(), AppError> {
        let transaction_count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM transactions WHERE account_id = $1",
        )
        .bind(account_id)
        .fetch_one(pool)
        .await
        .map_err(|e| AppError::InternalError(e.to_string()))?;

        if transaction_count > 0 {
            return Err(AppError::Conflict(
                "Cannot delete account with associated transactions".to_string(),
            ));
        }

        let result = sqlx::query("DELETE FROM accounts WHERE id = $1")
            .bind(account_id)
            .execute(pool)
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Account not found".to_string()));
        }

        Ok(())
    }
}
