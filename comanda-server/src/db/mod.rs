//! Persistence gateway
//!
//! [`Store`] is the only way handlers touch data. Two implementations:
//! - [`PgStore`]: PostgreSQL through a sqlx pool, migrations applied on connect
//! - [`MemoryStore`]: process-local, used in development mode and tests
//!
//! Multi-step mutations (opening and closing a comanda, inserting a batch of
//! pedidos) are atomic in both: either every row changes or none does.

mod memory;
mod pg;

pub use memory::MemoryStore;
pub use pg::PgStore;

use async_trait::async_trait;
use shared::models::{
    Comanda, ComandaDetail, Mesa, NewComanda, NewPedido, NewProduto, Pedido, PedidoDetail,
    PedidoStatus, Produto, ProdutoUpdate,
};

use crate::error::ServiceResult;

/// Number of mesas a fresh database starts with
pub const SEED_MESAS: i32 = 10;

/// Sample menu inserted when the produtos table is empty
pub fn default_produtos() -> Vec<NewProduto> {
    vec![
        NewProduto::new("Pizza Margherita", 25.90),
        NewProduto::new("Hambúrguer Clássico", 18.50),
        NewProduto::new("Batata Frita", 8.90),
        NewProduto::new("Refrigerante Lata", 4.50),
        NewProduto::new("Salada Caesar", 15.90),
    ]
}

#[async_trait]
pub trait Store: Send + Sync {
    /// Short backend name for logs and the health probe
    fn kind(&self) -> &'static str;

    // ── Mesas ──

    /// All mesas ordered by numero
    async fn list_mesas(&self) -> ServiceResult<Vec<Mesa>>;

    async fn find_mesa(&self, id: i64) -> ServiceResult<Option<Mesa>>;

    // ── Produtos ──

    /// All produtos ordered by nome
    async fn list_produtos(&self) -> ServiceResult<Vec<Produto>>;

    async fn find_produto(&self, id: i64) -> ServiceResult<Option<Produto>>;

    /// Produtos whose id is in `ids` (missing ids are simply absent)
    async fn find_produtos(&self, ids: &[i64]) -> ServiceResult<Vec<Produto>>;

    async fn create_produto(&self, data: &NewProduto) -> ServiceResult<Produto>;

    /// Partial update; `None` when the produto does not exist
    async fn update_produto(&self, id: i64, data: &ProdutoUpdate)
    -> ServiceResult<Option<Produto>>;

    /// Insert `produtos` only if the table is empty. Returns the number inserted.
    async fn seed_produtos(&self, produtos: &[NewProduto]) -> ServiceResult<u64>;

    // ── Comandas ──

    /// All comandas, newest first, with mesa, pedidos and total
    async fn list_comandas(&self) -> ServiceResult<Vec<ComandaDetail>>;

    async fn find_comanda(&self, id: i64) -> ServiceResult<Option<Comanda>>;

    async fn find_comanda_detail(&self, id: i64) -> ServiceResult<Option<ComandaDetail>>;

    /// Insert an open comanda and mark its mesa occupied.
    ///
    /// Fails with `TableNotFound` / `TableOccupied` if the mesa vanished or was
    /// taken after the caller's check.
    async fn open_comanda(&self, data: &NewComanda) -> ServiceResult<Comanda>;

    /// Close an open comanda and release its mesa.
    ///
    /// Fails with `ComandaNotFound` / `ComandaClosed` on a lost race.
    async fn close_comanda(&self, id: i64) -> ServiceResult<Comanda>;

    // ── Pedidos ──

    /// Pedidos newest first, optionally filtered by status
    async fn list_pedidos(&self, status: Option<PedidoStatus>)
    -> ServiceResult<Vec<PedidoDetail>>;

    async fn find_pedido(&self, id: i64) -> ServiceResult<Option<PedidoDetail>>;

    /// Insert every item against `comanda` (mesa copied from it) in one step.
    ///
    /// Fails with `ComandaClosed` if the comanda was closed meanwhile.
    async fn create_pedidos(
        &self,
        comanda: &Comanda,
        itens: &[NewPedido],
    ) -> ServiceResult<Vec<Pedido>>;

    /// Set the status if it is still `from`. `None` when it changed meanwhile
    /// or the pedido is gone.
    async fn update_pedido_status(
        &self,
        id: i64,
        from: PedidoStatus,
        to: PedidoStatus,
    ) -> ServiceResult<Option<Pedido>>;

    /// Delete the pedido if it is still awaiting preparation
    async fn delete_pedido(&self, id: i64) -> ServiceResult<bool>;
}
