//! Lifecycle guards
//!
//! ```text
//! Mesa:    available -> occupied -> available   (driven by comanda open/close)
//! Comanda: open -> closed                       (terminal)
//! Pedido:  awaiting_preparation -> in_preparation -> ready -> delivered
//!               \________________________\_____> cancelled
//! ```
//!
//! Guards are pure; stores repeat the same checks as conditional writes so a
//! concurrent change between read and write still fails cleanly.

use shared::error::{AppError, ErrorCode};
use shared::models::{
    Comanda, ComandaStatus, Mesa, MesaStatus, Pedido, PedidoStatus, Produto,
};

/// A comanda can only be opened on an available mesa
pub fn ensure_mesa_available(mesa: &Mesa) -> Result<(), AppError> {
    if mesa.status == MesaStatus::Occupied {
        return Err(AppError::with_message(
            ErrorCode::TableOccupied,
            format!("Mesa {} is already occupied", mesa.numero),
        )
        .with_detail("mesa_id", mesa.id));
    }
    Ok(())
}

/// Closing and ordering both require an open comanda
pub fn ensure_comanda_open(comanda: &Comanda) -> Result<(), AppError> {
    if comanda.status == ComandaStatus::Closed {
        return Err(AppError::with_message(
            ErrorCode::ComandaClosed,
            format!("Comanda {} is already closed", comanda.id),
        )
        .with_detail("comanda_id", comanda.id));
    }
    Ok(())
}

pub fn ensure_produto_available(produto: &Produto) -> Result<(), AppError> {
    if !produto.disponibilidade {
        return Err(AppError::with_message(
            ErrorCode::ProductUnavailable,
            format!("Produto \"{}\" is not available", produto.nome),
        )
        .with_detail("produto_id", produto.id));
    }
    Ok(())
}

/// Position on the kitchen line; cancelled sits outside it
fn rank(status: PedidoStatus) -> Option<u8> {
    match status {
        PedidoStatus::AwaitingPreparation => Some(0),
        PedidoStatus::InPreparation => Some(1),
        PedidoStatus::Ready => Some(2),
        PedidoStatus::Delivered => Some(3),
        PedidoStatus::Cancelled => None,
    }
}

pub fn is_terminal(status: PedidoStatus) -> bool {
    matches!(status, PedidoStatus::Delivered | PedidoStatus::Cancelled)
}

/// Forward (or same) moves along the line; cancel only before it is ready
pub fn can_transition(from: PedidoStatus, to: PedidoStatus) -> bool {
    if from == to {
        return true;
    }
    if is_terminal(from) {
        return false;
    }
    match (rank(from), rank(to)) {
        (Some(current), Some(target)) => target >= current,
        (Some(current), None) => current <= 1,
        _ => false,
    }
}

pub fn ensure_transition(pedido: &Pedido, to: PedidoStatus) -> Result<(), AppError> {
    if !can_transition(pedido.status, to) {
        return Err(AppError::with_message(
            ErrorCode::InvalidStatusTransition,
            format!(
                "Pedido {} cannot move from {} to {}",
                pedido.id, pedido.status, to
            ),
        )
        .with_detail("from", pedido.status.as_str())
        .with_detail("to", to.as_str()));
    }
    Ok(())
}

/// Only pedidos the kitchen has not started can be deleted
pub fn ensure_deletable(pedido: &Pedido) -> Result<(), AppError> {
    if pedido.status != PedidoStatus::AwaitingPreparation {
        return Err(AppError::with_message(
            ErrorCode::OrderNotDeletable,
            format!("Pedido {} is {} and can no longer be deleted", pedido.id, pedido.status),
        )
        .with_detail("status", pedido.status.as_str()));
    }
    Ok(())
}
