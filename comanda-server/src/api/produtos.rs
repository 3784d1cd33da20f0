//! Produto API handlers

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use http::StatusCode;
use shared::error::{AppError, ErrorCode};
use shared::models::{Produto, ProdutoCreate, ProdutoUpdate};

use super::ApiResult;
use crate::domain::validation;
use crate::extract::{AppJson, AppPath};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/produtos", get(list).post(create))
        .route("/produtos/{id}", get(get_by_id).patch(update))
}

fn produto_not_found(id: i64) -> AppError {
    AppError::with_message(ErrorCode::ProductNotFound, format!("Produto {id} not found"))
}

/// GET /produtos - menu ordered by nome
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<Produto>> {
    let produtos = state.store.list_produtos().await?;
    Ok(Json(produtos))
}

/// GET /produtos/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> ApiResult<Produto> {
    let produto = state
        .store
        .find_produto(id)
        .await?
        .ok_or_else(|| produto_not_found(id))?;
    Ok(Json(produto))
}

/// POST /produtos - add a menu item
pub async fn create(
    State(state): State<AppState>,
    AppJson(payload): AppJson<ProdutoCreate>,
) -> Result<(StatusCode, Json<Produto>), AppError> {
    let data = validation::validate_produto_create(payload)?;
    let produto = state.store.create_produto(&data).await?;
    tracing::info!(produto_id = produto.id, nome = %produto.nome, "Produto created");
    Ok((StatusCode::CREATED, Json(produto)))
}

/// PATCH /produtos/{id} - partial update
pub async fn update(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
    AppJson(payload): AppJson<ProdutoUpdate>,
) -> ApiResult<Produto> {
    let data = validation::validate_produto_update(payload)?;
    let produto = state
        .store
        .update_produto(id, &data)
        .await?
        .ok_or_else(|| produto_not_found(id))?;
    tracing::info!(produto_id = id, disponibilidade = produto.disponibilidade, "Produto updated");
    Ok(Json(produto))
}
