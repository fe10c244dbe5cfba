use actix_web::{delete, get, post, put, web, HttpResponse};
use sqlx::PgPool;
use validator::Validate;

use crate::account::models::DeleteResponse;
use crate::errors::{AppError, ErrorResponse};

use super::models::{
    CategoryIdPath, CategoryResponse, CreateCategoryDto, ListCategoriesQuery, UpdateCategoryDto,
};
use super::service::CategoryService;

/// GET /categories - List categories, optionally filtered by kind
#[utoipa::path(
    get,
    path = "/api/v1/categories",
    tag = "Categories",
    params(ListCategoriesQuery),
    responses(
        (status = 200, description = "List of categories", body = Vec<CategoryResponse>)
    )
)]
#[get("/categories")]
pub async fn list_categories(
    pool: web::Data<PgPool>,
    query: web::Query<ListCategoriesQuery>,
) -> Result<HttpResponse, AppError> {
    let categories = CategoryService::list(pool.get_ref(), query.kind.as_deref()).await?;

    let response: Vec<CategoryResponse> = categories
        .into_iter()
        .map(CategoryResponse::from_category)
        .collect();

    Ok(HttpResponse::Ok().json(response))
}

/// POST /categories - Create a new category
#[utoipa::path(
    post,
    path = "/api/v1/categories",
    tag = "Categories",
    request_body = CreateCategoryDto,
    responses(
        (status = 201, description = "Category created", body = CategoryResponse),
        (status = 400, description = "Validation error", body = ErrorResponse)
    )
)]
#[post("/categories")]
pub async fn create_category(
    pool: web::Data<PgPool>,
    body: web::Json<CreateCategoryDto>,
) -> Result<HttpResponse, AppError> {
    body.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let category = CategoryService::create(pool.get_ref(), &body).await?;

    Ok(HttpResponse::Created().json(CategoryResponse::from_category(category)))
}

/// PUT /categories/{id} - Overwrite a category
#[utoipa::path(
    put,
    path = "/api/v1/categories/{id}",
    tag = "Categories",
    params(CategoryIdPath),
    request_body = UpdateCategoryDto,
    responses(
        (status = 200, description = "Category updated", body = CategoryResponse),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 404, description = "Category not found", body = ErrorResponse)
    )
)]
#[put("/categories/{id}")]
pub async fn update_category(
    pool: web::Data<PgPool>,
    path: web::Path<CategoryIdPath>,
    body: web::Json<UpdateCategoryDto>,
) -> Result<HttpResponse, AppError> {
    body.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let category = CategoryService::update(pool.get_ref(), path.id, &body).await?;

    Ok(HttpResponse::Ok().json(CategoryResponse::from_category(category)))
}

/// DELETE /categories/{id} - Delete a category (guarded by references)
#[utoipa::path(
    delete,
    path = "/api/v1/categories/{id}",
    tag = "Categories",
    params(CategoryIdPath),
    responses(
        (status = 200, description = "Category deleted", body = DeleteResponse),
        (status = 400, description = "Category still referenced by transactions or budgets", body = ErrorResponse),
        (status = 404, description = "Category not found", body = ErrorResponse)
    )
)]
#[delete("/categories/{id}")]
pub async fn delete_category(
    pool: web::Data<PgPool>,
    path: web::Path<CategoryIdPath>,
) -> Result<HttpResponse, AppError> {
    CategoryService::delete(pool.get_ref(), path.id).await?;

    Ok(HttpResponse::Ok().json(DeleteResponse {
        message: "Category deleted successfully".to_string(),
        id: path.id,
    }))
}
