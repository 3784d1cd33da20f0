//! HTTP API tests
//!
//! Drive the full application (router + middleware) against the in-memory
//! store with `tower::ServiceExt::oneshot`.

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use comanda_server::db::{MemoryStore, Store};
use comanda_server::error::{ServiceError, ServiceResult};
use comanda_server::{AppState, build_app};
use http::{Method, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use shared::models::{
    Comanda, ComandaDetail, Mesa, NewComanda, NewPedido, NewProduto, Pedido, PedidoDetail,
    PedidoStatus, Produto, ProdutoUpdate,
};
use tower::ServiceExt;

fn app() -> Router {
    build_app(AppState::with_store(Arc::new(MemoryStore::new())))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::GET, uri, None).await
}

async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, Method::POST, uri, Some(body)).await
}

async fn patch(app: &Router, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    send(app, Method::PATCH, uri, body).await
}

async fn create_produto(app: &Router, nome: &str, preco: f64) -> i64 {
    let (status, body) = post(app, "/produtos", json!({"nome": nome, "preco": preco})).await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["id"].as_i64().unwrap()
}

async fn open_comanda(app: &Router, nome: &str, mesa_id: i64) -> i64 {
    let (status, body) = post(
        app,
        "/comandas",
        json!({"nome_cliente": nome, "mesa_id": mesa_id}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["id"].as_i64().unwrap()
}

async fn create_pedido(app: &Router, comanda_id: i64, produto_id: i64, quantidade: i64) -> i64 {
    let (status, body) = post(
        app,
        "/pedidos",
        json!({"comanda_id": comanda_id, "produto_id": produto_id, "quantidade": quantidade}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["id"].as_i64().unwrap()
}

// ── Service ──

#[tokio::test]
async fn test_health_and_index() {
    let app = app();

    let (status, body) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "comanda-server");
    assert_eq!(body["store"], "memory");
    assert!(body["timestamp"].is_string());

    let (status, body) = get(&app, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["endpoints"]["pedidos"].is_array());
}

#[tokio::test]
async fn test_routes_served_under_api_prefix() {
    let app = app();

    let (status, body) = get(&app, "/api/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let (status, body) = get(&app, "/api/mesas").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 10);
}

#[tokio::test]
async fn test_unknown_route_is_json_404() {
    let app = app();

    let (status, body) = get(&app, "/nada/aqui").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 3);
    assert!(body["message"].as_str().unwrap().contains("/nada/aqui"));
}

#[tokio::test]
async fn test_request_id_is_propagated() {
    let app = app();
    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn test_malformed_input_is_bad_request() {
    let app = app();

    let request = Request::builder()
        .method(Method::POST)
        .uri("/comandas")
        .header("content-type", "application/json")
        .body(Body::from("{nome_cliente:"))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["code"], 6);

    // Valid JSON, wrong type
    let (status, body) = post(&app, "/comandas", json!({"nome_cliente": "Ana", "mesa_id": "um"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 6);

    let (status, body) = get(&app, "/pedidos/abc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 6);
}

// ── Mesas ──

#[tokio::test]
async fn test_mesas_ordered_by_numero() {
    let app = app();

    let (status, body) = get(&app, "/mesas").await;
    assert_eq!(status, StatusCode::OK);
    let numeros: Vec<i64> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["numero"].as_i64().unwrap())
        .collect();
    assert_eq!(numeros, (1..=10).collect::<Vec<_>>());

    let (status, body) = get(&app, "/mesas/999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 7001);
}

// ── Comandas ──

#[tokio::test]
async fn test_open_comanda_occupies_mesa() {
    let app = app();

    let (status, body) = post(&app, "/comandas", json!({"nome_cliente": "Ana", "mesa_id": 1})).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "open");
    assert_eq!(body["nome_cliente"], "Ana");
    assert_eq!(body["mesa_id"], 1);

    let (_, mesa) = get(&app, "/mesas/1").await;
    assert_eq!(mesa["status"], "occupied");

    let (status, body) = post(&app, "/comandas", json!({"nome_cliente": "Bia", "mesa_id": 1})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 7002);

    let (_, comandas) = get(&app, "/comandas").await;
    assert_eq!(comandas.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_open_comanda_validation() {
    let app = app();

    let (status, body) = post(&app, "/comandas", json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 7);
    assert_eq!(body["details"]["fields"], json!(["nome_cliente", "mesa_id"]));

    let (status, body) = post(&app, "/comandas", json!({"nome_cliente": "Ana", "mesa_id": 99})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 7001);

    let (_, mesas) = get(&app, "/mesas").await;
    assert!(mesas.as_array().unwrap().iter().all(|m| m["status"] == "available"));
}

#[tokio::test]
async fn test_close_comanda_reports_total_and_frees_mesa() {
    let app = app();
    let prato = create_produto(&app, "Prato do Dia", 10.00).await;
    let suco = create_produto(&app, "Suco", 5.50).await;
    let comanda = open_comanda(&app, "Ana", 5).await;

    let (status, _) = post(
        &app,
        "/pedidos",
        json!({
            "comanda_id": comanda,
            "pedidos": [
                {"produto_id": prato, "quantidade": 2},
                {"produto_id": suco, "quantidade": 1}
            ]
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, detail) = get(&app, &format!("/comandas/{comanda}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(detail["total"], 25.5);
    assert_eq!(detail["mesa"]["numero"], 5);
    assert_eq!(detail["pedidos"].as_array().unwrap().len(), 2);

    let (status, body) = patch(&app, &format!("/comandas/{comanda}/encerrar"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 25.5);
    assert_eq!(body["comanda"]["status"], "closed");
    assert!(body["comanda"]["closed_at"].is_string());
    assert!(body["message"].is_string());

    let (_, mesa) = get(&app, "/mesas/5").await;
    assert_eq!(mesa["status"], "available");

    let (status, body) = patch(&app, &format!("/comandas/{comanda}/encerrar"), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 3002);

    // Mesa can take a new comanda once freed
    open_comanda(&app, "Bia", 5).await;
}

#[tokio::test]
async fn test_close_unknown_comanda() {
    let app = app();
    let (status, body) = patch(&app, "/comandas/404/encerrar", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 3001);
}

// ── Pedidos ──

#[tokio::test]
async fn test_pedido_response_shape_follows_input() {
    let app = app();
    let produto = create_produto(&app, "Pastel", 7.00).await;
    let comanda = open_comanda(&app, "Ana", 2).await;

    let (status, body) = post(
        &app,
        "/pedidos",
        json!({"comanda_id": comanda, "produto_id": produto, "quantidade": 3}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(body.is_object());
    assert_eq!(body["quantidade"], 3);
    assert_eq!(body["mesa_id"], 2);
    assert_eq!(body["status"], "awaiting_preparation");

    let (status, body) = post(
        &app,
        "/pedidos",
        json!([{"comanda_id": comanda, "produto_id": produto, "quantidade": 1}]),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (status, body) = post(&app, "/pedidos", json!({"comanda_id": comanda, "produto_id": produto})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 7);
    assert_eq!(body["details"]["fields"], json!(["quantidade"]));

    let (_, pedidos) = get(&app, "/pedidos").await;
    let pedidos = pedidos.as_array().unwrap();
    assert_eq!(pedidos.len(), 2);
    assert_eq!(pedidos[0]["produto"]["nome"], "Pastel");
    assert_eq!(pedidos[0]["comanda"]["nome_cliente"], "Ana");
}

#[tokio::test]
async fn test_pedido_on_closed_comanda_fails() {
    let app = app();
    let produto = create_produto(&app, "Pastel", 7.00).await;
    let comanda = open_comanda(&app, "Ana", 3).await;
    patch(&app, &format!("/comandas/{comanda}/encerrar"), None).await;

    let (status, body) = post(
        &app,
        "/pedidos",
        json!({"comanda_id": comanda, "produto_id": produto, "quantidade": 1}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 3002);

    // Closed wins even when the produto does not exist
    let (status, body) = post(
        &app,
        "/pedidos",
        json!({"comanda_id": comanda, "produto_id": 9999, "quantidade": 1}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 3002);

    let (_, pedidos) = get(&app, "/pedidos").await;
    assert!(pedidos.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_pedido_product_checks() {
    let app = app();
    let produto = create_produto(&app, "Sorvete", 9.00).await;
    let comanda = open_comanda(&app, "Ana", 4).await;

    let (status, _) = patch(
        &app,
        &format!("/produtos/{produto}"),
        Some(json!({"disponibilidade": false})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = post(
        &app,
        "/pedidos",
        json!({"comanda_id": comanda, "produto_id": produto, "quantidade": 1}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 6003);

    let (status, body) = post(
        &app,
        "/pedidos",
        json!({"comanda_id": comanda, "produto_id": 9999, "quantidade": 1}),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 6001);

    let (status, body) = post(&app, "/pedidos", json!({"comanda_id": comanda, "pedidos": []})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 4002);
}

#[tokio::test]
async fn test_batch_with_unavailable_produto_inserts_nothing() {
    let app = app();
    let pastel = create_produto(&app, "Pastel", 7.00).await;
    let sorvete = create_produto(&app, "Sorvete", 9.00).await;
    patch(
        &app,
        &format!("/produtos/{sorvete}"),
        Some(json!({"disponibilidade": false})),
    )
    .await;
    let comanda = open_comanda(&app, "Ana", 9).await;

    let (status, body) = post(
        &app,
        "/pedidos",
        json!({
            "comanda_id": comanda,
            "pedidos": [
                {"produto_id": pastel, "quantidade": 1},
                {"produto_id": sorvete, "quantidade": 2}
            ]
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 6003);

    let (status, body) = post(
        &app,
        "/pedidos",
        json!([
            {"comanda_id": comanda, "produto_id": pastel, "quantidade": 1},
            {"comanda_id": comanda, "produto_id": 9999, "quantidade": 1}
        ]),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 6001);
    assert_eq!(body["details"]["produto_id"], 9999);

    let (_, pedidos) = get(&app, "/pedidos").await;
    assert!(pedidos.as_array().unwrap().is_empty());
    let (_, detail) = get(&app, &format!("/comandas/{comanda}")).await;
    assert!(detail["pedidos"].as_array().unwrap().is_empty());
    assert_eq!(detail["total"], 0.0);
}

#[tokio::test]
async fn test_price_cap_keeps_totals_computable() {
    let app = app();

    let (status, body) = post(&app, "/produtos", json!({"nome": "Caviar", "preco": 1e28})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 6002);

    let banquete = create_produto(&app, "Banquete", 1_000_000.0).await;
    let (status, body) = patch(
        &app,
        &format!("/produtos/{banquete}"),
        Some(json!({"preco": 1e28})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 6002);

    let comanda = open_comanda(&app, "Ana", 10).await;
    create_pedido(&app, comanda, banquete, 9999).await;

    let (status, detail) = get(&app, &format!("/comandas/{comanda}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(detail["total"], 9_999_000_000.0);

    let (status, _) = get(&app, "/comandas").await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = patch(&app, &format!("/comandas/{comanda}/encerrar"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 9_999_000_000.0);
}

#[tokio::test]
async fn test_pedido_status_updates() {
    let app = app();
    let produto = create_produto(&app, "Pastel", 7.00).await;
    let comanda = open_comanda(&app, "Ana", 6).await;
    let pedido = create_pedido(&app, comanda, produto, 2).await;
    let uri = format!("/pedidos/{pedido}");

    let (status, body) = patch(&app, &uri, Some(json!({"status": "queimado"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 4003);
    assert!(body["details"]["valid_values"].is_array());

    let (_, body) = get(&app, &uri).await;
    assert_eq!(body["status"], "awaiting_preparation");

    let (status, body) = patch(&app, &uri, Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 7);

    let (status, body) = patch(&app, &uri, Some(json!({"status": "in_preparation"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "in_preparation");
    assert_eq!(body["total"], 14.0);
    assert_eq!(body["mesa"]["numero"], 6);

    let (_, list) = get(&app, "/pedidos/em-preparo").await;
    assert_eq!(list.as_array().unwrap().len(), 1);
    let (_, list) = get(&app, "/pedidos/aguardando").await;
    assert!(list.as_array().unwrap().is_empty());

    // No going back
    let (status, body) = patch(&app, &uri, Some(json!({"status": "awaiting_preparation"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 4004);

    // Portuguese values are accepted
    let (status, body) = patch(&app, &uri, Some(json!({"status": "pronto"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ready");

    let (_, list) = get(&app, "/api/pedidos/prontos").await;
    assert_eq!(list.as_array().unwrap()[0]["id"], pedido);

    let (status, body) = patch(&app, "/pedidos/9999", Some(json!({"status": "ready"}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 4001);
}

#[tokio::test]
async fn test_delete_pedido_only_while_awaiting() {
    let app = app();
    let produto = create_produto(&app, "Pastel", 7.00).await;
    let comanda = open_comanda(&app, "Ana", 7).await;
    let waiting = create_pedido(&app, comanda, produto, 1).await;
    let started = create_pedido(&app, comanda, produto, 1).await;

    let (status, body) = send(&app, Method::DELETE, &format!("/pedidos/{waiting}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, _) = get(&app, &format!("/pedidos/{waiting}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    patch(&app, &format!("/pedidos/{started}"), Some(json!({"status": "in_preparation"}))).await;
    let (status, body) = send(&app, Method::DELETE, &format!("/pedidos/{started}"), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 4005);
}

// ── Produtos ──

#[tokio::test]
async fn test_produto_crud() {
    let app = app();

    let (status, body) = post(&app, "/produtos", json!({"nome": "Café", "preco": 4.0})).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["disponibilidade"], true);
    let id = body["id"].as_i64().unwrap();

    let (status, body) = post(&app, "/produtos", json!({"nome": "Água", "preco": 0})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 6002);

    let (status, body) = patch(&app, &format!("/produtos/{id}"), Some(json!({"preco": 4.5}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["preco"], 4.5);
    assert_eq!(body["nome"], "Café");

    let (status, body) = patch(&app, &format!("/produtos/{id}"), Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 2);

    let (status, body) = patch(&app, "/produtos/9999", Some(json!({"preco": 1.0}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 6001);

    create_produto(&app, "Bolo", 6.0).await;
    let (_, list) = get(&app, "/produtos").await;
    let nomes: Vec<&str> = list
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["nome"].as_str().unwrap())
        .collect();
    assert_eq!(nomes, ["Bolo", "Café"]);
}

// ── Partial failure ──

/// Store whose comanda detail read always fails
struct BrokenDetailStore {
    inner: MemoryStore,
}

#[async_trait]
impl Store for BrokenDetailStore {
    fn kind(&self) -> &'static str {
        "broken"
    }

    async fn list_mesas(&self) -> ServiceResult<Vec<Mesa>> {
        self.inner.list_mesas().await
    }

    async fn find_mesa(&self, id: i64) -> ServiceResult<Option<Mesa>> {
        self.inner.find_mesa(id).await
    }

    async fn list_produtos(&self) -> ServiceResult<Vec<Produto>> {
        self.inner.list_produtos().await
    }

    async fn find_produto(&self, id: i64) -> ServiceResult<Option<Produto>> {
        self.inner.find_produto(id).await
    }

    async fn find_produtos(&self, ids: &[i64]) -> ServiceResult<Vec<Produto>> {
        self.inner.find_produtos(ids).await
    }

    async fn create_produto(&self, data: &NewProduto) -> ServiceResult<Produto> {
        self.inner.create_produto(data).await
    }

    async fn update_produto(
        &self,
        id: i64,
        data: &ProdutoUpdate,
    ) -> ServiceResult<Option<Produto>> {
        self.inner.update_produto(id, data).await
    }

    async fn seed_produtos(&self, produtos: &[NewProduto]) -> ServiceResult<u64> {
        self.inner.seed_produtos(produtos).await
    }

    async fn list_comandas(&self) -> ServiceResult<Vec<ComandaDetail>> {
        self.inner.list_comandas().await
    }

    async fn find_comanda(&self, id: i64) -> ServiceResult<Option<Comanda>> {
        self.inner.find_comanda(id).await
    }

    async fn find_comanda_detail(&self, _id: i64) -> ServiceResult<Option<ComandaDetail>> {
        Err(ServiceError::Db("connection reset".into()))
    }

    async fn open_comanda(&self, data: &NewComanda) -> ServiceResult<Comanda> {
        self.inner.open_comanda(data).await
    }

    async fn close_comanda(&self, id: i64) -> ServiceResult<Comanda> {
        self.inner.close_comanda(id).await
    }

    async fn list_pedidos(
        &self,
        status: Option<PedidoStatus>,
    ) -> ServiceResult<Vec<PedidoDetail>> {
        self.inner.list_pedidos(status).await
    }

    async fn find_pedido(&self, id: i64) -> ServiceResult<Option<PedidoDetail>> {
        self.inner.find_pedido(id).await
    }

    async fn create_pedidos(
        &self,
        comanda: &Comanda,
        itens: &[NewPedido],
    ) -> ServiceResult<Vec<Pedido>> {
        self.inner.create_pedidos(comanda, itens).await
    }

    async fn update_pedido_status(
        &self,
        id: i64,
        from: PedidoStatus,
        to: PedidoStatus,
    ) -> ServiceResult<Option<Pedido>> {
        self.inner.update_pedido_status(id, from, to).await
    }

    async fn delete_pedido(&self, id: i64) -> ServiceResult<bool> {
        self.inner.delete_pedido(id).await
    }
}

#[tokio::test]
async fn test_close_reports_partial_failure_with_completed_comanda() {
    let store = Arc::new(BrokenDetailStore {
        inner: MemoryStore::new(),
    });
    let app = build_app(AppState::with_store(store.clone()));
    let comanda = open_comanda(&app, "Ana", 8).await;

    let (status, body) = patch(&app, &format!("/comandas/{comanda}/encerrar"), None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], 9004);
    assert_eq!(body["details"]["completed"]["id"], comanda);
    assert_eq!(body["details"]["completed"]["status"], "closed");

    // The close itself went through
    let (_, mesa) = get(&app, "/mesas/8").await;
    assert_eq!(mesa["status"], "available");
    let stored = store.inner.find_comanda(comanda).await.unwrap().unwrap();
    assert!(!stored.is_open());
}
