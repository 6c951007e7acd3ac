//! Category endpoints

use axum::{extract::State, Json};

use crate::{error::AppResult, models::category::Category};

/// List all categories
#[utoipa::path(
    get,
    path = "/categories",
    tag = "categories",
    responses(
        (status = 200, description = "List of categories", body = Vec<Category>)
    )
)]
pub async fn list_categories(State(state): State<crate::AppState>) -> AppResult<Json<Vec<Category>>> {
    let categories = state.services.books.list_categories().await?;
    Ok(Json(categories))
}
