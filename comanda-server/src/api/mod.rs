//! HTTP API
//!
//! - [`health`] - service index and liveness probe
//! - [`mesas`] - tables
//! - [`comandas`] - customer tabs
//! - [`pedidos`] - order lines and kitchen filters
//! - [`produtos`] - menu items
//!
//! Every route is served at the root and again under `/api`.

pub mod comandas;
pub mod health;
pub mod mesas;
pub mod pedidos;
pub mod produtos;

use axum::middleware as axum_middleware;
use axum::{Json, Router};
use http::{HeaderName, HeaderValue, Method, Uri};
use shared::error::{AppError, ErrorCode};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::middleware::logging_middleware;
use crate::state::AppState;

type ApiResult<T> = Result<Json<T>, AppError>;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Request ID generator (UUID v4)
#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// Every resource route, unprefixed
fn routes() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(mesas::router())
        .merge(comandas::router())
        .merge(pedidos::router())
        .merge(produtos::router())
}

/// Router with all routes registered at `/` and `/api` (no middleware, no state)
pub fn build_router() -> Router<AppState> {
    Router::new()
        .merge(routes())
        .nest("/api", routes())
        .fallback(not_found)
}

/// Fully configured application with all middleware and state
pub fn build_app(state: AppState) -> Router {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    build_router()
        .with_state(state)
        // CORS - any origin, as the front-end is served separately
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        .layer(axum_middleware::from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::new(request_id.clone(), XRequestId))
        .layer(PropagateRequestIdLayer::new(request_id))
}

/// JSON 404 for unknown routes
async fn not_found(method: Method, uri: Uri) -> AppError {
    AppError::with_message(
        ErrorCode::NotFound,
        format!("Route {} {} not found", method, uri.path()),
    )
    .with_detail("method", method.as_str())
    .with_detail("path", uri.path())
}
