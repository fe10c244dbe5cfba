use utoipa::OpenApi;

use crate::account::models::{
    AccountResponse, AccountsListResponse, CreateAccountDto, DeleteResponse, UpdateAccountDto,
};
use crate::budget::models::{
    BudgetCategoryInfo, BudgetInputDto, BudgetResponse, BudgetStatus, BudgetStatusResponse,
};
use crate::category::models::{
    CategoryKind, CategoryResponse, CreateCategoryDto, UpdateCategoryDto,
};
use crate::errors::ErrorResponse;
use crate::statistics::models::{
    BudgetOverviewEntry, BudgetOverviewResponse, CategoryStatistics, CurrentMonth,
    MonthlyStatistics, StatisticsResponse,
};
use crate::transaction::models::{
    CreateTransactionDto, EmbeddedAccountInfo, EmbeddedCategoryInfo, PostingResponse,
    TransactionDetailResponse, TransactionResponse, TransactionType,
};

/// OpenAPI documentation configuration
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Finbook API",
        version = "1.0.0",
        description = "RESTful API for personal-finance bookkeeping"
    ),
    servers(
        (url = "http://localhost:8080", description = "Development server"),
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Accounts", description = "Financial account management"),
        (name = "Categories", description = "Expense and income category management"),
        (name = "Transactions", description = "Transaction posting with atomic balance updates"),
        (name = "Budgets", description = "Per-category budget windows"),
        (name = "Statistics", description = "Windowed aggregation and budget overview")
    ),
    paths(
        // Health
        crate::health_check,
        // Account endpoints
        crate::account::handlers::list_accounts,
        crate::account::handlers::create_account,
        crate::account::handlers::update_account,
        crate::account::handlers::delete_account,
        // Category endpoints
        crate::category::handlers::list_categories,
        crate::category::handlers::create_category,
        crate::category::handlers::update_category,
        crate::category::handlers::delete_category,
        // Transaction endpoints
        crate::transaction::handlers::list_transactions,
        crate::transaction::handlers::create_transaction,
        crate::transaction::handlers::reverse_transaction,
        // Budget endpoints
        crate::budget::handlers::list_budgets,
        crate::budget::handlers::create_budget,
        crate::budget::handlers::update_budget,
        crate::budget::handlers::delete_budget,
        crate::budget::handlers::get_budget_status,
        // Statistics endpoints
        crate::statistics::handlers::get_statistics,
        crate::statistics::handlers::get_budget_overview,
    ),
    components(
        schemas(
            // Error response
            ErrorResponse,
            // Account schemas
            AccountResponse,
            AccountsListResponse,
            CreateAccountDto,
            UpdateAccountDto,
            DeleteResponse,
            // Category schemas
            CategoryKind,
            CategoryResponse,
            CreateCategoryDto,
            UpdateCategoryDto,
            // Transaction schemas
            TransactionType,
            TransactionResponse,
            TransactionDetailResponse,
            EmbeddedAccountInfo,
            EmbeddedCategoryInfo,
            CreateTransactionDto,
            PostingResponse,
            // Budget schemas
            BudgetCategoryInfo,
            BudgetResponse,
            BudgetStatus,
            BudgetStatusResponse,
            BudgetInputDto,
            // Statistics schemas
            CategoryStatistics,
            MonthlyStatistics,
            StatisticsResponse,
            BudgetOverviewEntry,
            CurrentMonth,
            BudgetOverviewResponse,
        )
    )
)]
pub struct ApiDoc;
