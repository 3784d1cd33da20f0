//! Pedido API handlers
//!
//! Lines are created against an open comanda and then walk the kitchen
//! status line. The filtered lists back the kitchen display.

use std::collections::HashMap;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use http::StatusCode;
use serde::Serialize;
use shared::error::{AppError, ErrorCode};
use shared::models::{Pedido, PedidoCreate, PedidoDetail, PedidoStatus, PedidoStatusUpdate};

use super::ApiResult;
use crate::domain::{lifecycle, validation};
use crate::extract::{AppJson, AppPath};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/pedidos", get(list).post(create))
        .route("/pedidos/prontos", get(list_ready))
        .route("/pedidos/em-preparo", get(list_in_preparation))
        .route("/pedidos/aguardando", get(list_awaiting))
        .route(
            "/pedidos/{id}",
            get(get_by_id).patch(update_status).delete(delete),
        )
}

/// A single object in, a single object out; arrays otherwise
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum PedidoCreated {
    One(Pedido),
    Many(Vec<Pedido>),
}

fn pedido_not_found(id: i64) -> AppError {
    AppError::with_message(ErrorCode::OrderNotFound, format!("Pedido {id} not found"))
}

/// POST /pedidos - add one or more lines to an open comanda
pub async fn create(
    State(state): State<AppState>,
    AppJson(payload): AppJson<PedidoCreate>,
) -> Result<(StatusCode, Json<PedidoCreated>), AppError> {
    let single = payload.is_single();
    let batch = validation::validate_pedidos(payload)?;

    let comanda = state
        .store
        .find_comanda(batch.comanda_id)
        .await?
        .ok_or_else(|| {
            AppError::with_message(
                ErrorCode::ComandaNotFound,
                format!("Comanda {} not found", batch.comanda_id),
            )
        })?;
    lifecycle::ensure_comanda_open(&comanda)?;

    let mut ids: Vec<i64> = batch.itens.iter().map(|item| item.produto_id).collect();
    ids.sort_unstable();
    ids.dedup();
    let produtos: HashMap<i64, _> = state
        .store
        .find_produtos(&ids)
        .await?
        .into_iter()
        .map(|p| (p.id, p))
        .collect();

    for id in &ids {
        let produto = produtos.get(id).ok_or_else(|| {
            AppError::with_message(ErrorCode::ProductNotFound, format!("Produto {id} not found"))
                .with_detail("produto_id", *id)
        })?;
        lifecycle::ensure_produto_available(produto)?;
    }

    let mut created = state.store.create_pedidos(&comanda, &batch.itens).await?;
    tracing::info!(
        comanda_id = comanda.id,
        mesa_id = comanda.mesa_id,
        count = created.len(),
        "Pedidos created"
    );

    let body = match (single, created.len()) {
        (true, 1) => PedidoCreated::One(created.remove(0)),
        _ => PedidoCreated::Many(created),
    };
    Ok((StatusCode::CREATED, Json(body)))
}

/// GET /pedidos - every pedido, newest first
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<PedidoDetail>> {
    let pedidos = state.store.list_pedidos(None).await?;
    Ok(Json(pedidos))
}

/// GET /pedidos/prontos - ready for pickup
pub async fn list_ready(State(state): State<AppState>) -> ApiResult<Vec<PedidoDetail>> {
    let pedidos = state.store.list_pedidos(Some(PedidoStatus::Ready)).await?;
    Ok(Json(pedidos))
}

/// GET /pedidos/em-preparo
pub async fn list_in_preparation(
    State(state): State<AppState>,
) -> ApiResult<Vec<PedidoDetail>> {
    let pedidos = state
        .store
        .list_pedidos(Some(PedidoStatus::InPreparation))
        .await?;
    Ok(Json(pedidos))
}

/// GET /pedidos/aguardando - not started by the kitchen
pub async fn list_awaiting(State(state): State<AppState>) -> ApiResult<Vec<PedidoDetail>> {
    let pedidos = state
        .store
        .list_pedidos(Some(PedidoStatus::AwaitingPreparation))
        .await?;
    Ok(Json(pedidos))
}

/// GET /pedidos/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> ApiResult<PedidoDetail> {
    let pedido = state
        .store
        .find_pedido(id)
        .await?
        .ok_or_else(|| pedido_not_found(id))?;
    Ok(Json(pedido))
}

/// PATCH /pedidos/{id} - move the pedido along the status line
pub async fn update_status(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
    AppJson(payload): AppJson<PedidoStatusUpdate>,
) -> ApiResult<PedidoDetail> {
    let to = validation::parse_pedido_status(&payload)?;

    let current = state
        .store
        .find_pedido(id)
        .await?
        .ok_or_else(|| pedido_not_found(id))?;
    lifecycle::ensure_transition(&current.pedido, to)?;

    let from = current.pedido.status;
    if from == to {
        return Ok(Json(current));
    }

    if state.store.update_pedido_status(id, from, to).await?.is_none() {
        // Lost a race: report against whatever is stored now
        return Err(match state.store.find_pedido(id).await? {
            None => pedido_not_found(id),
            Some(now) => AppError::with_message(
                ErrorCode::InvalidStatusTransition,
                format!("Pedido {id} changed to {} meanwhile", now.pedido.status),
            )
            .with_detail("from", now.pedido.status.as_str())
            .with_detail("to", to.as_str()),
        });
    }
    tracing::info!(pedido_id = id, from = %from, to = %to, "Pedido status changed");

    let updated = state
        .store
        .find_pedido(id)
        .await?
        .ok_or_else(|| pedido_not_found(id))?;
    Ok(Json(updated))
}

/// DELETE /pedidos/{id} - only while awaiting preparation
pub async fn delete(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<StatusCode, AppError> {
    let current = state
        .store
        .find_pedido(id)
        .await?
        .ok_or_else(|| pedido_not_found(id))?;
    lifecycle::ensure_deletable(&current.pedido)?;

    if !state.store.delete_pedido(id).await? {
        return Err(match state.store.find_pedido(id).await? {
            None => pedido_not_found(id),
            Some(now) => {
                lifecycle::ensure_deletable(&now.pedido).err().unwrap_or_else(|| {
                    AppError::with_message(
                        ErrorCode::OrderNotDeletable,
                        format!("Pedido {id} could not be deleted"),
                    )
                })
            }
        });
    }
    tracing::info!(pedido_id = id, comanda_id = current.pedido.comanda_id, "Pedido deleted");
    Ok(StatusCode::NO_CONTENT)
}
