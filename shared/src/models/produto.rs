//! Produto (menu item) Model

use serde::{Deserialize, Serialize};

/// Produto entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Produto {
    pub id: i64,
    pub nome: String,
    /// Unit price, always > 0
    pub preco: f64,
    pub disponibilidade: bool,
}

impl Produto {
    pub fn reference(&self) -> ProdutoRef {
        ProdutoRef {
            nome: self.nome.clone(),
            preco: self.preco,
        }
    }
}

/// Produto fields embedded in pedido reads
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProdutoRef {
    pub nome: String,
    pub preco: f64,
}

/// Create produto payload (as received)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProdutoCreate {
    pub nome: Option<String>,
    pub preco: Option<f64>,
    pub disponibilidade: Option<bool>,
}

/// Update produto payload (partial)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProdutoUpdate {
    pub nome: Option<String>,
    pub preco: Option<f64>,
    pub disponibilidade: Option<bool>,
}

impl ProdutoUpdate {
    pub fn is_empty(&self) -> bool {
        self.nome.is_none() && self.preco.is_none() && self.disponibilidade.is_none()
    }
}

/// Validated produto ready to insert
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProduto {
    pub nome: String,
    pub preco: f64,
    pub disponibilidade: bool,
}

impl NewProduto {
    pub fn new(nome: impl Into<String>, preco: f64) -> Self {
        Self {
            nome: nome.into(),
            preco,
            disponibilidade: true,
        }
    }
}
