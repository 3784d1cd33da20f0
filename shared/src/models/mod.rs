//! Data models
//!
//! Shared between the HTTP handlers and the persistence layer.
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`;
//! status columns are TEXT and decode through `TryFrom<String>`.
//! All IDs are `i64` (BIGSERIAL).

pub mod comanda;
pub mod mesa;
pub mod pedido;
pub mod produto;

// Re-exports
pub use comanda::*;
pub use mesa::*;
pub use pedido::*;
pub use produto::*;

use thiserror::Error;

/// A status string that is not part of the enum's value set
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {kind} status: {value:?}")]
pub struct InvalidStatus {
    pub kind: &'static str,
    pub value: String,
}

impl InvalidStatus {
    pub(crate) fn new(kind: &'static str, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }
}
