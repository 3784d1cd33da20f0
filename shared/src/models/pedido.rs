//! Pedido (order line) Model

use super::{InvalidStatus, MesaRef, ProdutoRef};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kitchen stage of a pedido
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PedidoStatus {
    #[serde(
        rename = "awaiting_preparation",
        alias = "aguardando preparo",
        alias = "pendente"
    )]
    AwaitingPreparation,
    #[serde(rename = "in_preparation", alias = "em preparo", alias = "preparando")]
    InPreparation,
    #[serde(rename = "ready", alias = "pronto")]
    Ready,
    #[serde(rename = "delivered", alias = "entregue")]
    Delivered,
    #[serde(rename = "cancelled", alias = "cancelado")]
    Cancelled,
}

impl PedidoStatus {
    pub const ALL: [PedidoStatus; 5] = [
        Self::AwaitingPreparation,
        Self::InPreparation,
        Self::Ready,
        Self::Delivered,
        Self::Cancelled,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::AwaitingPreparation => "awaiting_preparation",
            Self::InPreparation => "in_preparation",
            Self::Ready => "ready",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }

    /// Canonical names of every status, for error messages
    pub fn valid_values() -> Vec<&'static str> {
        Self::ALL.iter().map(|s| s.as_str()).collect()
    }
}

impl FromStr for PedidoStatus {
    type Err = InvalidStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "awaiting_preparation" | "aguardando preparo" | "pendente" => {
                Ok(Self::AwaitingPreparation)
            }
            "in_preparation" | "em preparo" | "preparando" => Ok(Self::InPreparation),
            "ready" | "pronto" => Ok(Self::Ready),
            "delivered" | "entregue" => Ok(Self::Delivered),
            "cancelled" | "cancelado" => Ok(Self::Cancelled),
            other => Err(InvalidStatus::new("pedido", other)),
        }
    }
}

impl TryFrom<String> for PedidoStatus {
    type Error = InvalidStatus;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for PedidoStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pedido entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Pedido {
    pub id: i64,
    pub comanda_id: i64,
    /// Copied from the comanda at creation
    pub mesa_id: i64,
    pub produto_id: i64,
    pub quantidade: i32,
    #[cfg_attr(feature = "db", sqlx(try_from = "String"))]
    pub status: PedidoStatus,
    pub criado_em: DateTime<Utc>,
}

/// Comanda fields embedded in a pedido read
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComandaRef {
    pub nome_cliente: String,
}

/// Pedido with the names a kitchen display needs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PedidoDetail {
    #[serde(flatten)]
    pub pedido: Pedido,
    pub produto: Option<ProdutoRef>,
    pub mesa: Option<MesaRef>,
    pub comanda: Option<ComandaRef>,
    /// preco x quantidade of this line
    pub total: f64,
}

/// One pedido as posted on its own or inside an array
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PedidoInput {
    pub comanda_id: Option<i64>,
    pub produto_id: Option<i64>,
    pub quantidade: Option<i64>,
}

/// One item inside a grouped post
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PedidoItemInput {
    pub produto_id: Option<i64>,
    pub quantidade: Option<i64>,
}

/// Accepted shapes for `POST /pedidos`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PedidoCreate {
    /// `{comanda_id, pedidos: [{produto_id, quantidade}]}`
    Grouped {
        comanda_id: Option<i64>,
        pedidos: Vec<PedidoItemInput>,
    },
    /// `[{comanda_id, produto_id, quantidade}, ...]`, comanda taken from the first
    Batch(Vec<PedidoInput>),
    /// `{comanda_id, produto_id, quantidade}`
    Single(PedidoInput),
}

impl PedidoCreate {
    /// Whether the caller posted a single object and expects one back
    pub fn is_single(&self) -> bool {
        matches!(self, Self::Single(_))
    }
}

/// Validated pedido line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPedido {
    pub produto_id: i64,
    pub quantidade: i32,
}

/// Validated set of pedidos for one comanda
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PedidoBatch {
    pub comanda_id: i64,
    pub itens: Vec<NewPedido>,
}

/// Status update payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PedidoStatusUpdate {
    pub status: Option<String>,
}
