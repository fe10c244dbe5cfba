pub mod account;
pub mod budget;
pub mod category;
pub mod errors;
pub mod openapi;
pub mod statistics;
pub mod transaction;

use actix_web::{get, web, HttpResponse, Responder};
use sqlx::PgPool;

/// Health check endpoint that verifies database connectivity
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service and store are healthy"),
        (status = 503, description = "Store unreachable")
    )
)]
#[get("/health")]
pub async fn health_check(pool: web::Data<PgPool>) -> impl Responder {
    match sqlx::query("SELECT 1").execute(pool.get_ref()).await {
        Ok(_) => HttpResponse::Ok().json(serde_json::json!({
            "status": "healthy",
            "database": "connected"
        })),
        Err(_) => HttpResponse::ServiceUnavailable().json(serde_json::json!({
            "status": "unhealthy",
            "database": "disconnected"
        })),
    }
}

/// Register every /api/v1 route. Shared between the server binary and the
/// integration tests so the two cannot drift.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg
        // Account endpoints
        .service(account::handlers::list_accounts)
        .service(account::handlers::create_account)
        .service(account::handlers::update_account)
        .service(account::handlers::delete_account)
        // Category endpoints
        .service(category::handlers::list_categories)
        .service(category::handlers::create_category)
        .service(category::handlers::update_category)
        .service(category::handlers::delete_category)
        // Transaction endpoints (specific routes before generic ones)
        .service(transaction::handlers::reverse_transaction)
        .service(transaction::handlers::list_transactions)
        .service(transaction::handlers::create_transaction)
        // Budget endpoints
        .service(budget::handlers::get_budget_status)
        .service(budget::handlers::list_budgets)
        .service(budget::handlers::create_budget)
        .service(budget::handlers::update_budget)
        .service(budget::handlers::delete_budget)
        // Statistics endpoints (budget-overview before the bare path)
        .service(statistics::handlers::get_budget_overview)
        .service(statistics::handlers::get_statistics);
}

/// Map body, query-string and path deserialization failures onto the standard
/// `{"error": ...}` shape instead of actix's plain-text 400s.
pub fn payload_error_config(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        errors::AppError::ValidationError(err.to_string()).into()
    }))
    .app_data(web::QueryConfig::default().error_handler(|err, _req| {
        errors::AppError::ValidationError(err.to_string()).into()
    }))
    .app_data(web::PathConfig::default().error_handler(|err, _req| {
        errors::AppError::ValidationError(err.to_string()).into()
    }));
}
