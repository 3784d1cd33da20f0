//! Domain rules
//!
//! - [`validation`] - input shape checks, returning normalized values
//! - [`lifecycle`] - mesa / comanda / pedido state guards
//! - [`totals`] - decimal totals for comandas and pedido lines

pub mod lifecycle;
pub mod totals;
pub mod validation;
