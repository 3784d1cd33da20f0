//! Mesa API handlers

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use shared::error::{AppError, ErrorCode};
use shared::models::Mesa;

use super::ApiResult;
use crate::extract::AppPath;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/mesas", get(list))
        .route("/mesas/{id}", get(get_by_id))
}

/// GET /mesas - all mesas ordered by numero
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<Mesa>> {
    let mesas = state.store.list_mesas().await?;
    Ok(Json(mesas))
}

/// GET /mesas/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> ApiResult<Mesa> {
    let mesa = state.store.find_mesa(id).await?.ok_or_else(|| {
        AppError::with_message(ErrorCode::TableNotFound, format!("Mesa {id} not found"))
    })?;
    Ok(Json(mesa))
}
