//! Service index and health check

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{Value, json};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health_check))
}

/// GET /health - liveness probe
pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "comanda-server",
        "version": env!("CARGO_PKG_VERSION"),
        "environment": state.environment,
        "store": state.store.kind(),
        "timestamp": shared::util::now().to_rfc3339(),
    }))
}

/// GET / - what this service is and where things live
pub async fn index() -> Json<Value> {
    Json(json!({
        "service": "comanda-server",
        "message": "Restaurant order management API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "health": "GET /health",
            "mesas": ["GET /mesas", "GET /mesas/{id}"],
            "comandas": [
                "POST /comandas",
                "GET /comandas",
                "GET /comandas/{id}",
                "PATCH /comandas/{id}/encerrar"
            ],
            "pedidos": [
                "POST /pedidos",
                "GET /pedidos",
                "GET /pedidos/{id}",
                "PATCH /pedidos/{id}",
                "DELETE /pedidos/{id}",
                "GET /pedidos/prontos",
                "GET /pedidos/em-preparo",
                "GET /pedidos/aguardando"
            ],
            "produtos": [
                "GET /produtos",
                "GET /produtos/{id}",
                "POST /produtos",
                "PATCH /produtos/{id}"
            ]
        },
        "prefix": "every route is also served under /api"
    }))
}
