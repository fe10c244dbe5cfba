use actix_web::{delete, get, post, put, web, HttpResponse};
use rust_decimal::Decimal;
use sqlx::PgPool;
use validator::Validate;

use crate::errors::{AppError, ErrorResponse};

use super::models::{
    AccountIdPath, AccountResponse, AccountsListResponse, CreateAccountDto, DeleteResponse,
    UpdateAccountDto,
};
use super::service::AccountService;

/// GET /accounts - List all accounts with the sum of their balances
#[utoipa::path(
    get,
    path = "/api/v1/accounts",
    tag = "Accounts",
    responses(
        (status = 200, description = "List of accounts with total balance", body = AccountsListResponse)
    )
)]
#[get("/accounts")]
pub async fn list_accounts(pool: web::Data<PgPool>) -> Result<HttpResponse, AppError> {
    let accounts = AccountService::list_accounts(pool.get_ref()).await?;

    let total_balance: Decimal = accounts.iter().map(|a| a.balance).sum();

    let response = AccountsListResponse {
        accounts: accounts
            .into_iter()
            .map(AccountResponse::from_account)
            .collect(),
        total_balance,
    };

    Ok(HttpResponse::Ok().json(response))
}

/// POST /accounts - Create a new account
#[utoipa::path(
    post,
    path = "/api/v1/accounts",
    tag = "Accounts",
    request_body = CreateAccountDto,
    responses(
        (status = 201, description = "Account created", body = AccountResponse),
        (status = 400, description = "Validation error", body = ErrorResponse)
    )
)]
#[post("/accounts")]
pub async fn create_account(
    pool: web::Data<PgPool>,
    body: web::Json<CreateAccountDto>,
) -> Result<HttpResponse, AppError> {
    body.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let account = AccountService::create_account(pool.get_ref(), &body).await?;

    Ok(HttpResponse::Created().json(AccountResponse::from_account(account)))
}

/// PUT /accounts/{id} - Overwrite an account's name and balance
#[utoipa::path(
    put,
    path = "/api/v1/accounts/{id}",
    tag = "Accounts",
    params(AccountIdPath),
    request_body = UpdateAccountDto,
    responses(
        (status = 200, description = "Account updated", body = AccountResponse),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 404, description = "Account not found", body = ErrorResponse)
    )
)]
#[put("/accounts/{id}")]
pub async fn update_account(
    pool: web::Data<PgPool>,
    path: web::Path<AccountIdPath>,
    body: web::Json<UpdateAccountDto>,
) -> Result<HttpResponse, AppError> {
    body.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let account = AccountService::update_account(pool.get_ref(), path.id, &body).await?;

    Ok(HttpResponse::Ok().json(AccountResponse::from_account(account)))
}

/// DELETE /accounts/{id} - Delete an account (guarded by transaction references)
#[utoipa::path(
    delete,
    path = "/api/v1/accounts/{id}",
    tag = "Accounts",
    params(AccountIdPath),
    responses(
        (status = 200, description = "Account deleted", body = DeleteResponse),
        (status = 400, description = "Account still referenced by transactions", body = ErrorResponse),
        (status = 404, description = "Account not found", body = ErrorResponse)
    )
)]
#[delete("/accounts/{id}")]
pub async fn delete_account(
    pool: web::Data<PgPool>,
    path: web::Path<AccountIdPath>,
) -> Result<HttpResponse, AppError> {
    AccountService::delete_account(pool.get_ref(), path.id).await?;

    Ok(HttpResponse::Ok().json(DeleteResponse {
        message: "Account deleted successfully".to_string(),
        id: path.id,
    }))
}
