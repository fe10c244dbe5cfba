use actix_web::{delete, get, post, put, web, HttpResponse};
use sqlx::PgPool;
use validator::Validate;

use crate::account::models::DeleteResponse;
use crate::errors::{AppError, ErrorResponse};

use super::models::{
    BudgetIdPath, BudgetInputDto, BudgetResponse, BudgetStatusResponse, ListBudgetsQuery,
};
use super::service::BudgetService;

/// GET /budgets - List budgets, filtered by category and window overlap
#[utoipa::path(
    get,
    path = "/api/v1/budgets",
    tag = "Budgets",
    params(ListBudgetsQuery),
    responses(
        (status = 200, description = "List of budgets with joined category info", body = Vec<BudgetResponse>)
    )
)]
#[get("/budgets")]
pub async fn list_budgets(
    pool: web::Data<PgPool>,
    query: web::Query<ListBudgetsQuery>,
) -> Result<HttpResponse, AppError> {
    let budgets = BudgetService::list(pool.get_ref(), &query).await?;

    let response: Vec<BudgetResponse> = budgets.into_iter().map(BudgetResponse::from_row).collect();

    Ok(HttpResponse::Ok().json(response))
}

/// POST /budgets - Create a new budget
#[utoipa::path(
    post,
    path = "/api/v1/budgets",
    tag = "Budgets",
    request_body = BudgetInputDto,
    responses(
        (status = 201, description = "Budget created", body = BudgetResponse),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 404, description = "Category not found", body = ErrorResponse)
    )
)]
#[post("/budgets")]
pub async fn create_budget(
    pool: web::Data<PgPool>,
    body: web::Json<BudgetInputDto>,
) -> Result<HttpResponse, AppError> {
    body.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;
    body.validate_window()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let budget = BudgetService::create(pool.get_ref(), &body).await?;

    Ok(HttpResponse::Created().json(BudgetResponse::from_row(budget)))
}

/// GET /budgets/{id}/status - Spend-to-date against the budget window
#[utoipa::path(
    get,
    path = "/api/v1/budgets/{id}/status",
    tag = "Budgets",
    params(BudgetIdPath),
    responses(
        (status = 200, description = "Budget with spend-to-date figures", body = BudgetStatusResponse),
        (status = 404, description = "Budget not found", body = ErrorResponse)
    )
)]
#[get("/budgets/{id}/status")]
pub async fn get_budget_status(
    pool: web::Data<PgPool>,
    path: web::Path<BudgetIdPath>,
) -> Result<HttpResponse, AppError> {
    let (budget, status) = BudgetService::status(pool.get_ref(), path.id).await?;

    Ok(HttpResponse::Ok().json(BudgetStatusResponse {
        budget: BudgetResponse::from_row(budget),
        status,
    }))
}

/// PUT /budgets/{id} - Overwrite a budget
#[utoipa::path(
    put,
    path = "/api/v1/budgets/{id}",
    tag = "Budgets",
    params(BudgetIdPath),
    request_body = BudgetInputDto,
    responses(
        (status = 200, description = "Budget updated", body = BudgetResponse),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 404, description = "Budget or category not found", body = ErrorResponse)
    )
)]
#[put("/budgets/{id}")]
pub async fn update_budget(
    pool: web::Data<PgPool>,
    path: web::Path<BudgetIdPath>,
    body: web::Json<BudgetInputDto>,
) -> Result<HttpResponse, AppError> {
    body.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;
    body.validate_window()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let budget = BudgetService::update(pool.get_ref(), path.id, &body).await?;

    Ok(HttpResponse::Ok().json(BudgetResponse::from_row(budget)))
}

/// DELETE /budgets/{id} - Delete a budget (unguarded)
#[utoipa::path(
    delete,
    path = "/api/v1/budgets/{id}",
    tag = "Budgets",
    params(BudgetIdPath),
    responses(
        (status = 200, description = "Budget deleted", body = DeleteResponse),
        (status = 404, description = "Budget not found", body = ErrorResponse)
    )
)]
#[delete("/budgets/{id}")]
pub async fn delete_budget(
    pool: web::Data<PgPool>,
    path: web::Path<BudgetIdPath>,
) -> Result<HttpResponse, AppError> {
    BudgetService::delete(pool.get_ref(), path.id).await?;

    Ok(HttpResponse::Ok().json(DeleteResponse {
        message: "Budget deleted successfully".to_string(),
        id: path.id,
    }))
}
