//! Comanda API handlers
//!
//! Opening a comanda occupies its mesa; closing it releases the mesa and
//! reports the final total.

use axum::extract::State;
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use http::StatusCode;
use shared::error::{AppError, ErrorCode};
use shared::models::{Comanda, ComandaCreate, ComandaDetail, ComandaEncerrada};

use super::ApiResult;
use crate::domain::{lifecycle, validation};
use crate::extract::{AppJson, AppPath};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/comandas", post(create).get(list))
        .route("/comandas/{id}", get(get_by_id))
        .route("/comandas/{id}/encerrar", patch(close))
}

fn comanda_not_found(id: i64) -> AppError {
    AppError::with_message(ErrorCode::ComandaNotFound, format!("Comanda {id} not found"))
}

/// POST /comandas - open a comanda on an available mesa
pub async fn create(
    State(state): State<AppState>,
    AppJson(payload): AppJson<ComandaCreate>,
) -> Result<(StatusCode, Json<Comanda>), AppError> {
    let data = validation::validate_comanda(payload)?;

    let mesa = state.store.find_mesa(data.mesa_id).await?.ok_or_else(|| {
        AppError::with_message(
            ErrorCode::TableNotFound,
            format!("Mesa {} not found", data.mesa_id),
        )
    })?;
    lifecycle::ensure_mesa_available(&mesa)?;

    let comanda = state.store.open_comanda(&data).await?;
    tracing::info!(
        comanda_id = comanda.id,
        mesa_id = comanda.mesa_id,
        mesa_numero = mesa.numero,
        "Comanda opened"
    );
    Ok((StatusCode::CREATED, Json(comanda)))
}

/// GET /comandas - every comanda, newest first, with pedidos and total
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<ComandaDetail>> {
    let comandas = state.store.list_comandas().await?;
    Ok(Json(comandas))
}

/// GET /comandas/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> ApiResult<ComandaDetail> {
    let detail = state
        .store
        .find_comanda_detail(id)
        .await?
        .ok_or_else(|| comanda_not_found(id))?;
    Ok(Json(detail))
}

/// PATCH /comandas/{id}/encerrar - close the comanda and free its mesa
pub async fn close(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> ApiResult<ComandaEncerrada> {
    let comanda = state
        .store
        .find_comanda(id)
        .await?
        .ok_or_else(|| comanda_not_found(id))?;
    lifecycle::ensure_comanda_open(&comanda)?;

    let closed = state.store.close_comanda(id).await?;

    // The close is committed from here on; a failed total must not hide it.
    let total = match state.store.find_comanda_detail(id).await {
        Ok(Some(detail)) => detail.total,
        Ok(None) => {
            tracing::error!(comanda_id = id, "Comanda vanished after close");
            return Err(partial_close(&closed));
        }
        Err(e) => {
            tracing::error!(comanda_id = id, error = %e, "Failed to total closed comanda");
            return Err(partial_close(&closed));
        }
    };

    tracing::info!(comanda_id = id, mesa_id = closed.mesa_id, total, "Comanda closed");
    Ok(Json(ComandaEncerrada {
        message: "Comanda closed".to_string(),
        comanda: closed,
        total,
    }))
}

fn partial_close(closed: &Comanda) -> AppError {
    AppError::partial_failure(
        format!(
            "Comanda {} was closed and its mesa released, but the total could not be computed",
            closed.id
        ),
        serde_json::to_value(closed).unwrap_or_default(),
    )
}
