use actix_web::{get, post, web, HttpResponse};
use sqlx::PgPool;
use validator::Validate;

use crate::errors::{AppError, ErrorResponse};

use super::models::{
    CreateTransactionDto, PostingResponse, TransactionDetailResponse, TransactionFilters,
    TransactionIdPath,
};
use super::service::TransactionService;

/// GET /transactions - List transactions with optional filters
#[utoipa::path(
    get,
    path = "/api/v1/transactions",
    tag = "Transactions",
    params(TransactionFilters),
    responses(
        (status = 200, description = "Transactions newest-first with embedded account/category info", body = Vec<TransactionDetailResponse>)
    )
)]
#[get("/transactions")]
pub async fn list_transactions(
    pool: web::Data<PgPool>,
    query: web::Query<TransactionFilters>,
) -> Result<HttpResponse, AppError> {
    let transactions = TransactionService::list_transactions(pool.get_ref(), &query).await?;

    let response: Vec<TransactionDetailResponse> = transactions
        .into_iter()
        .map(|row| row.into_response())
        .collect();

    Ok(HttpResponse::Ok().json(response))
}

/// POST /transactions - Post a transaction (atomically updates account balance)
#[utoipa::path(
    post,
    path = "/api/v1/transactions",
    tag = "Transactions",
    request_body = CreateTransactionDto,
    responses(
        (status = 201, description = "Transaction posted", body = PostingResponse),
        (status = 400, description = "Validation error or category/type mismatch", body = ErrorResponse),
        (status = 404, description = "Account or category not found", body = ErrorResponse)
    )
)]
#[post("/transactions")]
pub async fn create_transaction(
    pool: web::Data<PgPool>,
    body: web::Json<CreateTransactionDto>,
) -> Result<HttpResponse, AppError> {
    body.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let (transaction, new_balance) =
        TransactionService::create_transaction(pool.get_ref(), body.into_inner()).await?;

    Ok(HttpResponse::Created().json(PostingResponse {
        transaction: transaction.into(),
        new_balance,
    }))
}

/// POST /transactions/{id}/reversal - Insert an offsetting entry for a posted
/// transaction instead of mutating it
#[utoipa::path(
    post,
    path = "/api/v1/transactions/{id}/reversal",
    tag = "Transactions",
    params(TransactionIdPath),
    responses(
        (status = 201, description = "Reversal entry posted", body = PostingResponse),
        (status = 400, description = "Transaction already reversed or is itself a reversal", body = ErrorResponse),
        (status = 404, description = "Transaction not found", body = ErrorResponse)
    )
)]
#[post("/transactions/{id}/reversal")]
pub async fn reverse_transaction(
    pool: web::Data<PgPool>,
    path: web::Path<TransactionIdPath>,
) -> Result<HttpResponse, AppError> {
    let (reversal, new_balance) =
        TransactionService::reverse_transaction(pool.get_ref(), path.id).await?;

    Ok(HttpResponse::Created().json(PostingResponse {
        transaction: reversal.into(),
        new_balance,
    }))
}
