//! Shared types for the comanda service
//!
//! Domain models (mesas, comandas, produtos, pedidos) and the unified
//! error system used by the HTTP layer.

pub mod error;
pub mod models;
pub mod util;
