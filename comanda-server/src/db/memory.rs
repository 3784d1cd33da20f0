//! In-memory store
//!
//! Seeded with mesas 1..=10. A single lock guards all tables so every
//! multi-step mutation is applied as one unit.

use std::collections::{BTreeMap, HashSet};

use async_trait::async_trait;
use parking_lot::Mutex;
use shared::error::{AppError, ErrorCode};
use shared::models::{
    Comanda, ComandaDetail, ComandaRef, ComandaStatus, Mesa, MesaStatus, NewComanda, NewPedido,
    NewProduto, Pedido, PedidoDetail, PedidoStatus, Produto, ProdutoUpdate,
};

use super::{SEED_MESAS, Store};
use crate::domain::totals;
use crate::error::ServiceResult;

#[derive(Debug, Default)]
struct Tables {
    mesas: BTreeMap<i64, Mesa>,
    comandas: BTreeMap<i64, Comanda>,
    produtos: BTreeMap<i64, Produto>,
    pedidos: BTreeMap<i64, Pedido>,
    seq: Sequences,
}

/// One id sequence per table, like BIGSERIAL
#[derive(Debug, Default)]
struct Sequences {
    mesas: Sequence,
    comandas: Sequence,
    produtos: Sequence,
    pedidos: Sequence,
}

#[derive(Debug, Default)]
struct Sequence(i64);

impl Sequence {
    /// Ids start at 1 and are never reused
    fn next_id(&mut self) -> i64 {
        self.0 += 1;
        self.0
    }
}

impl Tables {

    fn comanda_detail(&self, comanda: &Comanda) -> ComandaDetail {
        let mesa = self.mesas.get(&comanda.mesa_id).map(Mesa::summary);
        let pedidos = self
            .pedidos
            .values()
            .filter(|p| p.comanda_id == comanda.id)
            .map(|p| {
                let produto = self.produtos.get(&p.produto_id).map(Produto::reference);
                totals::comanda_pedido(p, produto)
            })
            .collect();
        totals::comanda_detail(comanda.clone(), mesa, pedidos)
    }

    fn pedido_detail(&self, pedido: &Pedido) -> PedidoDetail {
        totals::pedido_detail(
            pedido.clone(),
            self.produtos.get(&pedido.produto_id).map(Produto::reference),
            self.mesas.get(&pedido.mesa_id).map(Mesa::reference),
            self.comandas.get(&pedido.comanda_id).map(|c| ComandaRef {
                nome_cliente: c.nome_cliente.clone(),
            }),
        )
    }
}

/// Process-local [`Store`]
#[derive(Debug)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    /// Store with mesas 1..=10 and no produtos
    pub fn new() -> Self {
        let mut tables = Tables::default();
        for numero in 1..=SEED_MESAS {
            let id = tables.seq.mesas.next_id();
            tables.mesas.insert(
                id,
                Mesa {
                    id,
                    numero,
                    capacidade: if numero <= 6 { 4 } else { 6 },
                    status: MesaStatus::Available,
                },
            );
        }
        Self {
            tables: Mutex::new(tables),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn newest_first<T>(items: &mut [T], key: impl Fn(&T) -> (chrono::DateTime<chrono::Utc>, i64)) {
    items.sort_by(|a, b| key(b).cmp(&key(a)));
}

#[async_trait]
impl Store for MemoryStore {
    fn kind(&self) -> &'static str {
        "memory"
    }

    async fn list_mesas(&self) -> ServiceResult<Vec<Mesa>> {
        let tables = self.tables.lock();
        let mut mesas: Vec<Mesa> = tables.mesas.values().cloned().collect();
        mesas.sort_by_key(|m| m.numero);
        Ok(mesas)
    }

    async fn find_mesa(&self, id: i64) -> ServiceResult<Option<Mesa>> {
        Ok(self.tables.lock().mesas.get(&id).cloned())
    }

    async fn list_produtos(&self) -> ServiceResult<Vec<Produto>> {
        let tables = self.tables.lock();
        let mut produtos: Vec<Produto> = tables.produtos.values().cloned().collect();
        produtos.sort_by(|a, b| a.nome.cmp(&b.nome).then(a.id.cmp(&b.id)));
        Ok(produtos)
    }

    async fn find_produto(&self, id: i64) -> ServiceResult<Option<Produto>> {
        Ok(self.tables.lock().produtos.get(&id).cloned())
    }

    async fn find_produtos(&self, ids: &[i64]) -> ServiceResult<Vec<Produto>> {
        let wanted: HashSet<i64> = ids.iter().copied().collect();
        let tables = self.tables.lock();
        Ok(tables
            .produtos
            .values()
            .filter(|p| wanted.contains(&p.id))
            .cloned()
            .collect())
    }

    async fn create_produto(&self, data: &NewProduto) -> ServiceResult<Produto> {
        let mut tables = self.tables.lock();
        let id = tables.seq.produtos.next_id();
        let produto = Produto {
            id,
            nome: data.nome.clone(),
            preco: data.preco,
            disponibilidade: data.disponibilidade,
        };
        tables.produtos.insert(id, produto.clone());
        Ok(produto)
    }

    async fn update_produto(
        &self,
        id: i64,
        data: &ProdutoUpdate,
    ) -> ServiceResult<Option<Produto>> {
        let mut tables = self.tables.lock();
        let Some(produto) = tables.produtos.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(nome) = &data.nome {
            produto.nome = nome.clone();
        }
        if let Some(preco) = data.preco {
            produto.preco = preco;
        }
        if let Some(disponibilidade) = data.disponibilidade {
            produto.disponibilidade = disponibilidade;
        }
        Ok(Some(produto.clone()))
    }

    async fn seed_produtos(&self, produtos: &[NewProduto]) -> ServiceResult<u64> {
        let mut tables = self.tables.lock();
        if !tables.produtos.is_empty() {
            return Ok(0);
        }
        for data in produtos {
            let id = tables.seq.produtos.next_id();
            tables.produtos.insert(
                id,
                Produto {
                    id,
                    nome: data.nome.clone(),
                    preco: data.preco,
                    disponibilidade: data.disponibilidade,
                },
            );
        }
        Ok(produtos.len() as u64)
    }

    async fn list_comandas(&self) -> ServiceResult<Vec<ComandaDetail>> {
        let tables = self.tables.lock();
        let mut comandas: Vec<&Comanda> = tables.comandas.values().collect();
        newest_first(&mut comandas, |c| (c.created_at, c.id));
        Ok(comandas
            .into_iter()
            .map(|c| tables.comanda_detail(c))
            .collect())
    }

    async fn find_comanda(&self, id: i64) -> ServiceResult<Option<Comanda>> {
        Ok(self.tables.lock().comandas.get(&id).cloned())
    }

    async fn find_comanda_detail(&self, id: i64) -> ServiceResult<Option<ComandaDetail>> {
        let tables = self.tables.lock();
        Ok(tables.comandas.get(&id).map(|c| tables.comanda_detail(c)))
    }

    async fn open_comanda(&self, data: &NewComanda) -> ServiceResult<Comanda> {
        let mut tables = self.tables.lock();
        let mesa = tables
            .mesas
            .get(&data.mesa_id)
            .ok_or_else(|| AppError::new(ErrorCode::TableNotFound).with_detail("mesa_id", data.mesa_id))?;
        crate::domain::lifecycle::ensure_mesa_available(mesa)?;

        let id = tables.seq.comandas.next_id();
        let comanda = Comanda {
            id,
            nome_cliente: data.nome_cliente.clone(),
            mesa_id: data.mesa_id,
            status: ComandaStatus::Open,
            created_at: shared::util::now(),
            closed_at: None,
        };
        tables.comandas.insert(id, comanda.clone());
        if let Some(mesa) = tables.mesas.get_mut(&data.mesa_id) {
            mesa.status = MesaStatus::Occupied;
        }
        Ok(comanda)
    }

    async fn close_comanda(&self, id: i64) -> ServiceResult<Comanda> {
        let mut tables = self.tables.lock();
        let comanda = tables
            .comandas
            .get_mut(&id)
            .ok_or_else(|| AppError::new(ErrorCode::ComandaNotFound).with_detail("comanda_id", id))?;
        crate::domain::lifecycle::ensure_comanda_open(comanda)?;

        comanda.status = ComandaStatus::Closed;
        comanda.closed_at = Some(shared::util::now());
        let closed = comanda.clone();
        if let Some(mesa) = tables.mesas.get_mut(&closed.mesa_id) {
            mesa.status = MesaStatus::Available;
        }
        Ok(closed)
    }

    async fn list_pedidos(
        &self,
        status: Option<PedidoStatus>,
    ) -> ServiceResult<Vec<PedidoDetail>> {
        let tables = self.tables.lock();
        let mut pedidos: Vec<&Pedido> = tables
            .pedidos
            .values()
            .filter(|p| status.is_none_or(|s| p.status == s))
            .collect();
        newest_first(&mut pedidos, |p| (p.criado_em, p.id));
        Ok(pedidos
            .into_iter()
            .map(|p| tables.pedido_detail(p))
            .collect())
    }

    async fn find_pedido(&self, id: i64) -> ServiceResult<Option<PedidoDetail>> {
        let tables = self.tables.lock();
        Ok(tables.pedidos.get(&id).map(|p| tables.pedido_detail(p)))
    }

    async fn create_pedidos(
        &self,
        comanda: &Comanda,
        itens: &[NewPedido],
    ) -> ServiceResult<Vec<Pedido>> {
        let mut tables = self.tables.lock();
        let current = tables
            .comandas
            .get(&comanda.id)
            .ok_or_else(|| AppError::new(ErrorCode::ComandaNotFound).with_detail("comanda_id", comanda.id))?;
        crate::domain::lifecycle::ensure_comanda_open(current)?;
        let mesa_id = current.mesa_id;

        let criado_em = shared::util::now();
        let mut created = Vec::with_capacity(itens.len());
        for item in itens {
            let id = tables.seq.pedidos.next_id();
            let pedido = Pedido {
                id,
                comanda_id: comanda.id,
                mesa_id,
                produto_id: item.produto_id,
                quantidade: item.quantidade,
                status: PedidoStatus::AwaitingPreparation,
                criado_em,
            };
            tables.pedidos.insert(id, pedido.clone());
            created.push(pedido);
        }
        Ok(created)
    }

    async fn update_pedido_status(
        &self,
        id: i64,
        from: PedidoStatus,
        to: PedidoStatus,
    ) -> ServiceResult<Option<Pedido>> {
        let mut tables = self.tables.lock();
        match tables.pedidos.get_mut(&id) {
            Some(pedido) if pedido.status == from => {
                pedido.status = to;
                Ok(Some(pedido.clone()))
            }
            _ => Ok(None),
        }
    }

    async fn delete_pedido(&self, id: i64) -> ServiceResult<bool> {
        let mut tables = self.tables.lock();
        let waiting = tables
            .pedidos
            .get(&id)
            .is_some_and(|p| p.status == PedidoStatus::AwaitingPreparation);
        if waiting {
            tables.pedidos.remove(&id);
        }
        Ok(waiting)
    }
}
