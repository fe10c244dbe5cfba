use actix_web::{get, web, HttpResponse};
use sqlx::PgPool;

use crate::errors::{AppError, ErrorResponse};

use super::models::{BudgetOverviewResponse, StatisticsQuery, StatisticsResponse};
use super::service::StatisticsService;

/// GET /statistics - Aggregate totals, breakdowns and monthly series
#[utoipa::path(
    get,
    path = "/api/v1/statistics",
    tag = "Statistics",
    params(StatisticsQuery),
    responses(
        (status = 200, description = "Aggregated statistics over the window", body = StatisticsResponse),
        (status = 400, description = "Unparseable date bound", body = ErrorResponse)
    )
)]
#[get("/statistics")]
pub async fn get_statistics(
    pool: web::Data<PgPool>,
    query: web::Query<StatisticsQuery>,
) -> Result<HttpResponse, AppError> {
    let response =
        StatisticsService::aggregate(pool.get_ref(), query.start_date, query.end_date).await?;

    Ok(HttpResponse::Ok().json(response))
}

/// GET /statistics/budget-overview - Budgets overlapping the current month
/// with this month's spend
#[utoipa::path(
    get,
    path = "/api/v1/statistics/budget-overview",
    tag = "Statistics",
    responses(
        (status = 200, description = "Current-month budget overview", body = BudgetOverviewResponse)
    )
)]
#[get("/statistics/budget-overview")]
pub async fn get_budget_overview(pool: web::Data<PgPool>) -> Result<HttpResponse, AppError> {
    let (current_month, budgets) = StatisticsService::budget_overview(pool.get_ref()).await?;

    Ok(HttpResponse::Ok().json(BudgetOverviewResponse {
        current_month,
        budgets,
    }))
}
