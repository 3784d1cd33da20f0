//! PostgreSQL store
//!
//! Status columns are TEXT holding the canonical snake_case names.
//! Open/close lock the rows they read (`FOR UPDATE`) and use conditional
//! updates, so two requests racing for the same mesa cannot both win.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shared::error::{AppError, ErrorCode};
use shared::models::{
    Comanda, ComandaDetail, ComandaRef, ComandaStatus, Mesa, MesaRef, MesaStatus, NewComanda,
    NewPedido, NewProduto, Pedido, PedidoDetail, PedidoStatus, Produto, ProdutoRef, ProdutoUpdate,
};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use super::Store;
use crate::domain::{lifecycle, totals};
use crate::error::ServiceResult;

const COMANDA_COLUMNS: &str = "id, nome_cliente, mesa_id, status, created_at, closed_at";
const PEDIDO_COLUMNS: &str = "id, comanda_id, mesa_id, produto_id, quantidade, status, criado_em";

/// Pedido joined with its produto / mesa / comanda names
#[derive(Debug, sqlx::FromRow)]
struct PedidoJoinRow {
    id: i64,
    comanda_id: i64,
    mesa_id: i64,
    produto_id: i64,
    quantidade: i32,
    #[sqlx(try_from = "String")]
    status: PedidoStatus,
    criado_em: DateTime<Utc>,
    produto_nome: Option<String>,
    produto_preco: Option<f64>,
    mesa_numero: Option<i32>,
    comanda_nome_cliente: Option<String>,
}

impl PedidoJoinRow {
    fn split(self) -> (Pedido, Option<ProdutoRef>, Option<MesaRef>, Option<ComandaRef>) {
        let produto = match (self.produto_nome, self.produto_preco) {
            (Some(nome), Some(preco)) => Some(ProdutoRef { nome, preco }),
            _ => None,
        };
        let mesa = self.mesa_numero.map(|numero| MesaRef { numero });
        let comanda = self
            .comanda_nome_cliente
            .map(|nome_cliente| ComandaRef { nome_cliente });
        let pedido = Pedido {
            id: self.id,
            comanda_id: self.comanda_id,
            mesa_id: self.mesa_id,
            produto_id: self.produto_id,
            quantidade: self.quantidade,
            status: self.status,
            criado_em: self.criado_em,
        };
        (pedido, produto, mesa, comanda)
    }

    fn into_detail(self) -> PedidoDetail {
        let (pedido, produto, mesa, comanda) = self.split();
        totals::pedido_detail(pedido, produto, mesa, comanda)
    }
}

const PEDIDO_JOIN_SELECT: &str = r#"
    SELECT p.id, p.comanda_id, p.mesa_id, p.produto_id, p.quantidade, p.status, p.criado_em,
           pr.nome AS produto_nome, pr.preco AS produto_preco,
           m.numero AS mesa_numero, c.nome_cliente AS comanda_nome_cliente
    FROM pedidos p
    LEFT JOIN produtos pr ON pr.id = p.produto_id
    LEFT JOIN mesas m ON m.id = p.mesa_id
    LEFT JOIN comandas c ON c.id = p.comanda_id
"#;

/// sqlx-backed [`Store`]
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Connect, then apply pending migrations
    pub async fn connect(database_url: &str, max_connections: u32) -> ServiceResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;

        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("Database migrations applied");

        Ok(Self { pool })
    }

    /// Attach mesa and pedidos to each comanda (two queries for the whole set)
    async fn with_details(&self, comandas: Vec<Comanda>) -> ServiceResult<Vec<ComandaDetail>> {
        if comandas.is_empty() {
            return Ok(Vec::new());
        }
        let comanda_ids: Vec<i64> = comandas.iter().map(|c| c.id).collect();
        let mesa_ids: Vec<i64> = comandas.iter().map(|c| c.mesa_id).collect();

        let mesas: Vec<Mesa> = sqlx::query_as(
            "SELECT id, numero, capacidade, status FROM mesas WHERE id = ANY($1)",
        )
        .bind(&mesa_ids)
        .fetch_all(&self.pool)
        .await?;
        let mesas: HashMap<i64, Mesa> = mesas.into_iter().map(|m| (m.id, m)).collect();

        let rows: Vec<PedidoJoinRow> = sqlx::query_as(&format!(
            "{PEDIDO_JOIN_SELECT} WHERE p.comanda_id = ANY($1) ORDER BY p.criado_em, p.id"
        ))
        .bind(&comanda_ids)
        .fetch_all(&self.pool)
        .await?;

        let mut pedidos: HashMap<i64, Vec<_>> = HashMap::new();
        for row in rows {
            let (pedido, produto, _, _) = row.split();
            pedidos
                .entry(pedido.comanda_id)
                .or_default()
                .push(totals::comanda_pedido(&pedido, produto));
        }

        Ok(comandas
            .into_iter()
            .map(|comanda| {
                let mesa = mesas.get(&comanda.mesa_id).map(Mesa::summary);
                let lines = pedidos.remove(&comanda.id).unwrap_or_default();
                totals::comanda_detail(comanda, mesa, lines)
            })
            .collect())
    }
}

#[async_trait]
impl Store for PgStore {
    fn kind(&self) -> &'static str {
        "postgres"
    }

    async fn list_mesas(&self) -> ServiceResult<Vec<Mesa>> {
        let mesas = sqlx::query_as(
            "SELECT id, numero, capacidade, status FROM mesas ORDER BY numero ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(mesas)
    }

    async fn find_mesa(&self, id: i64) -> ServiceResult<Option<Mesa>> {
        let mesa = sqlx::query_as("SELECT id, numero, capacidade, status FROM mesas WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(mesa)
    }

    async fn list_produtos(&self) -> ServiceResult<Vec<Produto>> {
        let produtos = sqlx::query_as(
            "SELECT id, nome, preco, disponibilidade FROM produtos ORDER BY nome, id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(produtos)
    }

    async fn find_produto(&self, id: i64) -> ServiceResult<Option<Produto>> {
        let produto =
            sqlx::query_as("SELECT id, nome, preco, disponibilidade FROM produtos WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(produto)
    }

    async fn find_produtos(&self, ids: &[i64]) -> ServiceResult<Vec<Produto>> {
        let produtos = sqlx::query_as(
            "SELECT id, nome, preco, disponibilidade FROM produtos WHERE id = ANY($1)",
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;
        Ok(produtos)
    }

    async fn create_produto(&self, data: &NewProduto) -> ServiceResult<Produto> {
        let produto = sqlx::query_as(
            r#"
            INSERT INTO produtos (nome, preco, disponibilidade)
            VALUES ($1, $2, $3)
            RETURNING id, nome, preco, disponibilidade
            "#,
        )
        .bind(&data.nome)
        .bind(data.preco)
        .bind(data.disponibilidade)
        .fetch_one(&self.pool)
        .await?;
        Ok(produto)
    }

    async fn update_produto(
        &self,
        id: i64,
        data: &ProdutoUpdate,
    ) -> ServiceResult<Option<Produto>> {
        let produto = sqlx::query_as(
            r#"
            UPDATE produtos SET
                nome = COALESCE($1, nome),
                preco = COALESCE($2, preco),
                disponibilidade = COALESCE($3, disponibilidade)
            WHERE id = $4
            RETURNING id, nome, preco, disponibilidade
            "#,
        )
        .bind(&data.nome)
        .bind(data.preco)
        .bind(data.disponibilidade)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(produto)
    }

    async fn seed_produtos(&self, produtos: &[NewProduto]) -> ServiceResult<u64> {
        let mut tx = self.pool.begin().await?;
        // Serialize concurrent seeders so the emptiness check holds
        sqlx::query("LOCK TABLE produtos IN SHARE ROW EXCLUSIVE MODE")
            .execute(&mut *tx)
            .await?;
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM produtos")
            .fetch_one(&mut *tx)
            .await?;
        if count > 0 {
            tx.rollback().await?;
            return Ok(0);
        }

        let mut inserted = 0;
        for data in produtos {
            inserted += sqlx::query(
                "INSERT INTO produtos (nome, preco, disponibilidade) VALUES ($1, $2, $3)",
            )
            .bind(&data.nome)
            .bind(data.preco)
            .bind(data.disponibilidade)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        }
        tx.commit().await?;
        Ok(inserted)
    }

    async fn list_comandas(&self) -> ServiceResult<Vec<ComandaDetail>> {
        let comandas: Vec<Comanda> = sqlx::query_as(&format!(
            "SELECT {COMANDA_COLUMNS} FROM comandas ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(&self.pool)
        .await?;
        self.with_details(comandas).await
    }

    async fn find_comanda(&self, id: i64) -> ServiceResult<Option<Comanda>> {
        let comanda = sqlx::query_as(&format!(
            "SELECT {COMANDA_COLUMNS} FROM comandas WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(comanda)
    }

    async fn find_comanda_detail(&self, id: i64) -> ServiceResult<Option<ComandaDetail>> {
        let Some(comanda) = self.find_comanda(id).await? else {
            return Ok(None);
        };
        Ok(self.with_details(vec![comanda]).await?.pop())
    }

    async fn open_comanda(&self, data: &NewComanda) -> ServiceResult<Comanda> {
        let mut tx = self.pool.begin().await?;

        let mesa: Option<Mesa> = sqlx::query_as(
            "SELECT id, numero, capacidade, status FROM mesas WHERE id = $1 FOR UPDATE",
        )
        .bind(data.mesa_id)
        .fetch_optional(&mut *tx)
        .await?;
        let mesa = mesa.ok_or_else(|| {
            AppError::new(ErrorCode::TableNotFound).with_detail("mesa_id", data.mesa_id)
        })?;
        lifecycle::ensure_mesa_available(&mesa)?;

        let comanda: Comanda = sqlx::query_as(&format!(
            r#"
            INSERT INTO comandas (nome_cliente, mesa_id, status)
            VALUES ($1, $2, $3)
            RETURNING {COMANDA_COLUMNS}
            "#
        ))
        .bind(&data.nome_cliente)
        .bind(data.mesa_id)
        .bind(ComandaStatus::Open.as_str())
        .fetch_one(&mut *tx)
        .await?;

        let updated = sqlx::query("UPDATE mesas SET status = $1 WHERE id = $2 AND status = $3")
            .bind(MesaStatus::Occupied.as_str())
            .bind(data.mesa_id)
            .bind(MesaStatus::Available.as_str())
            .execute(&mut *tx)
            .await?;
        if updated.rows_affected() == 0 {
            return Err(AppError::new(ErrorCode::TableOccupied)
                .with_detail("mesa_id", data.mesa_id)
                .into());
        }

        tx.commit().await?;
        Ok(comanda)
    }

    async fn close_comanda(&self, id: i64) -> ServiceResult<Comanda> {
        let mut tx = self.pool.begin().await?;

        let comanda: Option<Comanda> = sqlx::query_as(&format!(
            r#"
            UPDATE comandas SET status = $1, closed_at = now()
            WHERE id = $2 AND status = $3
            RETURNING {COMANDA_COLUMNS}
            "#
        ))
        .bind(ComandaStatus::Closed.as_str())
        .bind(id)
        .bind(ComandaStatus::Open.as_str())
        .fetch_optional(&mut *tx)
        .await?;

        let Some(comanda) = comanda else {
            let exists: Option<(i64,)> = sqlx::query_as("SELECT id FROM comandas WHERE id = $1")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
            let code = if exists.is_some() {
                ErrorCode::ComandaClosed
            } else {
                ErrorCode::ComandaNotFound
            };
            return Err(AppError::new(code).with_detail("comanda_id", id).into());
        };

        sqlx::query("UPDATE mesas SET status = $1 WHERE id = $2")
            .bind(MesaStatus::Available.as_str())
            .bind(comanda.mesa_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(comanda)
    }

    async fn list_pedidos(
        &self,
        status: Option<PedidoStatus>,
    ) -> ServiceResult<Vec<PedidoDetail>> {
        let rows: Vec<PedidoJoinRow> = sqlx::query_as(&format!(
            "{PEDIDO_JOIN_SELECT} WHERE ($1::TEXT IS NULL OR p.status = $1) \
             ORDER BY p.criado_em DESC, p.id DESC"
        ))
        .bind(status.map(|s| s.as_str()))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(PedidoJoinRow::into_detail).collect())
    }

    async fn find_pedido(&self, id: i64) -> ServiceResult<Option<PedidoDetail>> {
        let row: Option<PedidoJoinRow> =
            sqlx::query_as(&format!("{PEDIDO_JOIN_SELECT} WHERE p.id = $1"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(row.map(PedidoJoinRow::into_detail))
    }

    async fn create_pedidos(
        &self,
        comanda: &Comanda,
        itens: &[NewPedido],
    ) -> ServiceResult<Vec<Pedido>> {
        let mut tx = self.pool.begin().await?;

        let current: Option<Comanda> = sqlx::query_as(&format!(
            "SELECT {COMANDA_COLUMNS} FROM comandas WHERE id = $1 FOR UPDATE"
        ))
        .bind(comanda.id)
        .fetch_optional(&mut *tx)
        .await?;
        let current = current.ok_or_else(|| {
            AppError::new(ErrorCode::ComandaNotFound).with_detail("comanda_id", comanda.id)
        })?;
        lifecycle::ensure_comanda_open(&current)?;

        let mut created = Vec::with_capacity(itens.len());
        for item in itens {
            let pedido: Pedido = sqlx::query_as(&format!(
                r#"
                INSERT INTO pedidos (comanda_id, mesa_id, produto_id, quantidade, status)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING {PEDIDO_COLUMNS}
                "#
            ))
            .bind(current.id)
            .bind(current.mesa_id)
            .bind(item.produto_id)
            .bind(item.quantidade)
            .bind(PedidoStatus::AwaitingPreparation.as_str())
            .fetch_one(&mut *tx)
            .await?;
            created.push(pedido);
        }

        tx.commit().await?;
        Ok(created)
    }

    async fn update_pedido_status(
        &self,
        id: i64,
        from: PedidoStatus,
        to: PedidoStatus,
    ) -> ServiceResult<Option<Pedido>> {
        let pedido = sqlx::query_as(&format!(
            r#"
            UPDATE pedidos SET status = $1
            WHERE id = $2 AND status = $3
            RETURNING {PEDIDO_COLUMNS}
            "#
        ))
        .bind(to.as_str())
        .bind(id)
        .bind(from.as_str())
        .fetch_optional(&self.pool)
        .await?;
        Ok(pedido)
    }

    async fn delete_pedido(&self, id: i64) -> ServiceResult<bool> {
        let result = sqlx::query("DELETE FROM pedidos WHERE id = $1 AND status = $2")
            .bind(id)
            .bind(PedidoStatus::AwaitingPreparation.as_str())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
