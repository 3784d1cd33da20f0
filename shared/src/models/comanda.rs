//! Comanda (customer tab) Model

use super::{InvalidStatus, MesaSummary, PedidoStatus, ProdutoRef};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Comanda lifecycle: `Open -> Closed` (terminal)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComandaStatus {
    #[serde(rename = "open", alias = "aberta")]
    Open,
    #[serde(rename = "closed", alias = "encerrada")]
    Closed,
}

impl ComandaStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
        }
    }
}

impl FromStr for ComandaStatus {
    type Err = InvalidStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "open" | "aberta" => Ok(Self::Open),
            "closed" | "encerrada" => Ok(Self::Closed),
            other => Err(InvalidStatus::new("comanda", other)),
        }
    }
}

impl TryFrom<String> for ComandaStatus {
    type Error = InvalidStatus;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for ComandaStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Comanda entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Comanda {
    pub id: i64,
    pub nome_cliente: String,
    pub mesa_id: i64,
    #[cfg_attr(feature = "db", sqlx(try_from = "String"))]
    pub status: ComandaStatus,
    pub created_at: DateTime<Utc>,
    pub closed_at: Option<DateTime<Utc>>,
}

impl Comanda {
    pub fn is_open(&self) -> bool {
        self.status == ComandaStatus::Open
    }
}

/// Open comanda payload (as received)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ComandaCreate {
    pub nome_cliente: Option<String>,
    pub mesa_id: Option<i64>,
}

/// Validated comanda ready to open
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewComanda {
    pub nome_cliente: String,
    pub mesa_id: i64,
}

/// Pedido line as nested in a comanda read
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComandaPedido {
    pub id: i64,
    pub produto_id: i64,
    pub quantidade: i32,
    pub status: PedidoStatus,
    pub criado_em: DateTime<Utc>,
    pub produto: Option<ProdutoRef>,
}

/// Comanda with its mesa, pedidos and running total
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComandaDetail {
    #[serde(flatten)]
    pub comanda: Comanda,
    pub mesa: Option<MesaSummary>,
    pub pedidos: Vec<ComandaPedido>,
    pub total: f64,
}

/// Result of closing a comanda
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComandaEncerrada {
    pub message: String,
    pub comanda: Comanda,
    pub total: f64,
}
