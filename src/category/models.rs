use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Category kind enum. Every transaction referencing a category must carry a
/// matching type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKind {
    /// Money spent
    Expense,
    /// Money received
    Income,
}

impl CategoryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryKind::Expense => "expense",
            CategoryKind::Income => "income",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "expense" => Some(CategoryKind::Expense),
            "income" => Some(CategoryKind::Income),
            _ => None,
        }
    }
}

/// Database entity for categories
#[derive(Debug, Clone, FromRow)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub kind: String,
    pub icon: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Category information returned in responses
#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryResponse {
    /// Unique category identifier
    pub id: Uuid,
    /// Category name
    #[schema(example = "Food")]
    pub name: String,
    /// Category kind (expense or income)
    #[serde(rename = "type")]
    #[schema(example = "expense")]
    pub kind: String,
    /// Optional display icon
    #[schema(example = "🍜")]
    pub icon: Option<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl CategoryResponse {
    pub fn from_category(category: Category) -> Self {
        Self {
            id: category.id,
            name: category.name,
            kind: category.kind,
            icon: category.icon,
            created_at: category.created_at,
            updated_at: category.updated_at,
        }
    }
}

/// Request body for creating a category
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCategoryDto {
    /// Category name (1-50 characters)
    #[validate(length(min = 1, max = 50, message = "Name must be 1-50 characters"))]
    #[schema(example = "Food")]
    pub name: String,

    /// Category kind (expense or income)
    #[serde(rename = "type")]
    #[schema(example = "expense")]
    pub kind: String,

    /// Optional display icon (max 50 characters)
    #[validate(length(max = 50, message = "Icon cannot exceed 50 characters"))]
    #[schema(example = "🍜")]
    pub icon: Option<String>,
}

/// Request body for updating a category (PUT - full overwrite)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateCategoryDto {
    /// Category name (1-50 characters)
    #[validate(length(min = 1, max = 50, message = "Name must be 1-50 characters"))]
    #[schema(example = "Dining out")]
    pub name: String,

    /// Category kind (expense or income)
    #[serde(rename = "type")]
    #[schema(example = "expense")]
    pub kind: String,

    /// Optional display icon (max 50 characters)
    #[validate(length(max = 50, message = "Icon cannot exceed 50 characters"))]
    pub icon: Option<String>,
}

/// Query parameters for listing categories
#[derive(Debug, Deserialize, IntoParams)]
pub struct ListCategoriesQuery {
    /// Filter by kind (expense or income)
    #[serde(rename = "type")]
    #[param(example = "expense")]
    pub kind: Option<String>,
}

/// Path parameters for category ID
#[derive(Debug, Deserialize, IntoParams)]
pub struct CategoryIdPath {
    /// Category UUID
    pub id: Uuid,
}
